//! The hotspot overlay: one polygon region per valid hotspot, in the
//! image's natural pixel space.

use hotspot_tour_core::{
    effective_natural_size, resolve_hotspot, AdjustDefaults, Point, Polygon, Rect, Size, Slide,
};
use tracing::{debug, warn};

use crate::error::RenderError;

/// A clickable region of the overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayRegion {
    pub hotspot_id: String,
    /// Accessible label: the hotspot's label, else its id, else "Learn more".
    pub label: String,
    /// Outline in natural image pixels.
    pub polygon: Polygon,
}

/// The vector layer drawn over the current slide image.
///
/// Always rebuilt from scratch; regions never carry over between slides.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub slide_id: String,
    /// Coordinate space of every region (`viewBox`).
    pub view_box: Size,
    pub regions: Vec<OverlayRegion>,
    hovered: Option<usize>,
}

/// Build the overlay for `slide` over an image of `natural` size.
///
/// A zero dimension in `natural` falls back to 100. Hotspots without
/// usable coordinates are logged and left out.
pub fn build_overlay(slide: &Slide, natural: Size, defaults: &AdjustDefaults) -> Overlay {
    let view_box = effective_natural_size(natural);
    let regions: Vec<OverlayRegion> = slide
        .hotspots
        .iter()
        .filter_map(|h| match resolve_hotspot(h, view_box, defaults) {
            Ok(polygon) => Some(OverlayRegion {
                hotspot_id: h.id.clone(),
                label: h.display_label().to_string(),
                polygon,
            }),
            Err(e) => {
                warn!(slide = %slide.id, "Skipping hotspot: {e}");
                None
            }
        })
        .collect();

    debug!(
        slide = %slide.id,
        regions = regions.len(),
        width = view_box.width,
        height = view_box.height,
        "Built overlay"
    );

    Overlay {
        slide_id: slide.id.clone(),
        view_box,
        regions,
        hovered: None,
    }
}

impl Overlay {
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn region(&self, hotspot_id: &str) -> Option<&OverlayRegion> {
        self.regions.iter().find(|r| r.hotspot_id == hotspot_id)
    }

    /// The topmost region containing `p` (natural pixels). Later regions
    /// are drawn above earlier ones.
    pub fn region_at(&self, p: Point) -> Option<&OverlayRegion> {
        self.index_at(p).map(|i| &self.regions[i])
    }

    fn index_at(&self, p: Point) -> Option<usize> {
        self.regions.iter().rposition(|r| r.polygon.contains(p))
    }

    pub fn hovered(&self) -> Option<&OverlayRegion> {
        self.hovered.map(|i| &self.regions[i])
    }

    /// Track the pointer. `None` means the pointer left the overlay.
    ///
    /// Returns `true` when a region was entered or left.
    pub fn update_hover(&mut self, pointer: Option<Point>) -> bool {
        let next = pointer.and_then(|p| self.index_at(p));
        if next == self.hovered {
            return false;
        }
        self.hovered = next;
        true
    }
}

/// Maps between natural image pixels and a display rectangle.
///
/// The axes scale independently, so the overlay always covers the
/// display rectangle exactly even if its aspect ratio differs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayTransform {
    natural: Size,
    display: Rect,
    scale_x: f64,
    scale_y: f64,
}

impl OverlayTransform {
    pub fn new(natural: Size, display: Rect) -> crate::Result<Self> {
        if display.size().is_empty() || !display.width.is_finite() || !display.height.is_finite() {
            return Err(RenderError::InvalidDimensions {
                width: display.width,
                height: display.height,
            });
        }
        let natural = effective_natural_size(natural);
        Ok(Self {
            natural,
            display,
            scale_x: display.width / natural.width,
            scale_y: display.height / natural.height,
        })
    }

    pub fn display(&self) -> Rect {
        self.display
    }

    pub fn natural(&self) -> Size {
        self.natural
    }

    pub fn to_display(&self, p: Point) -> Point {
        Point::new(
            self.display.left + p.x * self.scale_x,
            self.display.top + p.y * self.scale_y,
        )
    }

    pub fn to_natural(&self, p: Point) -> Point {
        Point::new(
            (p.x - self.display.left) / self.scale_x,
            (p.y - self.display.top) / self.scale_y,
        )
    }

    /// On-screen bounding box of a region, used as the popup trigger rect.
    pub fn trigger_rect(&self, region: &OverlayRegion) -> Rect {
        let b = region.polygon.bounding_rect();
        let min = self.to_display(Point::new(b.left, b.top));
        let max = self.to_display(Point::new(b.right(), b.bottom()));
        Rect::from_min_max(min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotspot_tour_core::TourData;
    use serde_json::json;

    fn slide() -> Slide {
        let data = TourData::from_value(&json!({
            "images": [{
                "id": "front", "src": "front.png", "alt": "Front",
                "hotspots": [
                    { "id": "big", "label": "Chassis", "points": [[0, 0], [100, 0], [100, 100], [0, 100]] },
                    { "id": "broken" },
                    { "id": "small", "points": [[40, 40], [60, 40], [60, 60], [40, 60]] },
                    { "id": "px", "pointsPx": [0, 0, 50, 0, 50, 50], "sourceWidth": 100, "sourceHeight": 100 }
                ]
            }]
        }));
        data.slides.into_iter().next().expect("one slide")
    }

    #[test]
    fn invalid_hotspots_are_omitted_in_order() {
        let overlay = build_overlay(&slide(), Size::new(200.0, 100.0), &AdjustDefaults::default());
        let ids: Vec<_> = overlay.regions.iter().map(|r| r.hotspot_id.as_str()).collect();
        assert_eq!(ids, ["big", "small", "px"]);
        assert_eq!(overlay.region("big").map(|r| r.label.as_str()), Some("Chassis"));
        assert_eq!(overlay.region("small").map(|r| r.label.as_str()), Some("small"));
    }

    #[test]
    fn zero_natural_size_falls_back_to_100() {
        let overlay = build_overlay(&slide(), Size::new(0.0, 0.0), &AdjustDefaults::default());
        assert_eq!(overlay.view_box, Size::new(100.0, 100.0));
        let small = overlay.region("small").expect("region");
        assert_eq!(small.polygon.points()[0], Point::new(40.0, 40.0));
    }

    #[test]
    fn hit_test_prefers_topmost_region() {
        let overlay = build_overlay(&slide(), Size::new(100.0, 100.0), &AdjustDefaults::default());
        assert_eq!(
            overlay.region_at(Point::new(55.0, 45.0)).map(|r| r.hotspot_id.as_str()),
            Some("small")
        );
        assert_eq!(
            overlay.region_at(Point::new(10.0, 5.0)).map(|r| r.hotspot_id.as_str()),
            Some("px")
        );
        assert_eq!(
            overlay.region_at(Point::new(90.0, 90.0)).map(|r| r.hotspot_id.as_str()),
            Some("big")
        );
        assert!(overlay.region_at(Point::new(150.0, 50.0)).is_none());
    }

    #[test]
    fn hover_reports_enter_and_leave() {
        let mut overlay = build_overlay(&slide(), Size::new(100.0, 100.0), &AdjustDefaults::default());
        assert!(overlay.update_hover(Some(Point::new(55.0, 45.0))));
        assert_eq!(overlay.hovered().map(|r| r.hotspot_id.as_str()), Some("small"));
        assert!(!overlay.update_hover(Some(Point::new(57.0, 47.0))));
        assert!(overlay.update_hover(None));
        assert!(overlay.hovered().is_none());
    }

    #[test]
    fn transform_stretches_axes_independently() {
        let t = OverlayTransform::new(
            Size::new(200.0, 100.0),
            Rect::new(10.0, 20.0, 400.0, 100.0),
        )
        .expect("valid display");
        assert_eq!(t.to_display(Point::new(100.0, 50.0)), Point::new(210.0, 70.0));
        assert_eq!(t.to_natural(Point::new(210.0, 70.0)), Point::new(100.0, 50.0));
    }

    #[test]
    fn trigger_rect_is_in_display_space() {
        let overlay = build_overlay(&slide(), Size::new(100.0, 100.0), &AdjustDefaults::default());
        let t = OverlayTransform::new(Size::new(100.0, 100.0), Rect::new(0.0, 0.0, 200.0, 200.0))
            .expect("valid display");
        let r = t.trigger_rect(overlay.region("small").expect("region"));
        assert_eq!(r, Rect::new(80.0, 80.0, 40.0, 40.0));
    }

    #[test]
    fn empty_display_is_rejected() {
        assert!(matches!(
            OverlayTransform::new(Size::new(10.0, 10.0), Rect::new(0.0, 0.0, 0.0, 10.0)),
            Err(RenderError::InvalidDimensions { .. })
        ));
    }
}
