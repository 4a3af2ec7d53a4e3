//! Hotspot geometry: resolving stored coordinates into polygons in
//! rendered-image pixel space.

use std::fmt::Write as _;

use crate::error::{CoreError, GeometryError};
use crate::model::{AdjustDefaults, Hotspot, HotspotCoordinates};

/// A point in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Side length used for an image whose natural size is unknown (zero).
pub const FALLBACK_NATURAL_SIDE: f64 = 100.0;

/// The natural image size the overlay is built against, substituting
/// [`FALLBACK_NATURAL_SIDE`] for missing dimensions.
pub fn effective_natural_size(natural: Size) -> Size {
    let side = |v: f64| {
        if v > 0.0 && v.is_finite() {
            v
        } else {
            FALLBACK_NATURAL_SIDE
        }
    };
    Size::new(side(natural.width), side(natural.height))
}

/// Axis-aligned rectangle in screen or image pixels.
///
/// `left`/`top` is the minimum corner; `right`/`bottom` are derived.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn from_min_max(min: Point, max: Point) -> Self {
        Self {
            left: min.x,
            top: min.y,
            width: max.x - min.x,
            height: max.y - min.y,
        }
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.left + self.width / 2.0,
            self.top + self.height / 2.0,
        )
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x <= self.right() && p.y >= self.top && p.y <= self.bottom()
    }
}

/// An ordered polygon with at least two points.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    points: Vec<Point>,
}

impl Polygon {
    /// Wrap `points` as a polygon, rejecting fewer than two points.
    pub fn new(points: Vec<Point>) -> Result<Self, GeometryError> {
        if points.len() < 2 {
            return Err(GeometryError::TooFewPoints(points.len()));
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Mean of all vertices.
    pub fn centroid(&self) -> Point {
        centroid(&self.points)
    }

    pub fn bounding_rect(&self) -> Rect {
        let mut min = Point::new(f64::INFINITY, f64::INFINITY);
        let mut max = Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in &self.points {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Rect::from_min_max(min, max)
    }

    /// Even-odd point-in-polygon test.
    ///
    /// Two-point polygons enclose no area and never contain anything.
    pub fn contains(&self, p: Point) -> bool {
        let pts = &self.points;
        let mut inside = false;
        let mut j = pts.len() - 1;
        for i in 0..pts.len() {
            let (a, b) = (pts[i], pts[j]);
            if (a.y > p.y) != (b.y > p.y) {
                let x_cross = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
                if p.x < x_cross {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }

    /// SVG path data: `M x y L x y ... Z`.
    pub fn to_svg_path(&self) -> String {
        let mut d = String::new();
        for (i, p) in self.points.iter().enumerate() {
            let cmd = if i == 0 { "M" } else { " L" };
            let _ = write!(d, "{cmd} {} {}", p.x, p.y);
        }
        d.push_str(" Z");
        d
    }
}

fn centroid(points: &[Point]) -> Point {
    let n = points.len().max(1) as f64;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Point::new(sx / n, sy / n)
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Resolve a hotspot into a polygon in rendered-image pixel space.
pub fn resolve_hotspot(
    hotspot: &Hotspot,
    rendered: Size,
    defaults: &AdjustDefaults,
) -> crate::Result<Polygon> {
    resolve_points(&hotspot.coordinates, rendered, defaults).map_err(|reason| {
        CoreError::InvalidHotspot {
            id: hotspot.id.clone(),
            reason,
        }
    })
}

/// Resolve raw coordinate data against the rendered image size.
///
/// Pixel coordinates take precedence over percentages. The optional
/// offset is applied before the centroid scale.
pub fn resolve_points(
    coords: &HotspotCoordinates,
    rendered: Size,
    defaults: &AdjustDefaults,
) -> Result<Polygon, GeometryError> {
    let mut pts = base_points(coords, rendered)?;

    let ox = finite_or(coords.adjust_offset_x, defaults.offset_x);
    let oy = finite_or(coords.adjust_offset_y, defaults.offset_y);
    if ox != 0.0 || oy != 0.0 {
        for p in &mut pts {
            p.x += ox;
            p.y += oy;
        }
    }

    if let Some((sx, sy)) = adjust_scale(coords) {
        scale_about_centroid(&mut pts, sx, sy);
    }

    Polygon::new(pts)
}

fn base_points(coords: &HotspotCoordinates, rendered: Size) -> Result<Vec<Point>, GeometryError> {
    if let Some(px) = coords.points_px.as_deref().filter(|px| px.len() >= 4) {
        // A zero or missing source size degrades to a divisor of 1.
        let src_w = nonzero_or_one(coords.source_width);
        let src_h = nonzero_or_one(coords.source_height);
        let scale_x = rendered.width / src_w;
        let scale_y = rendered.height / src_h;
        return Ok(px
            .chunks_exact(2)
            .map(|c| Point::new(c[0] * scale_x, c[1] * scale_y))
            .collect());
    }

    if let Some(points) = coords.points.as_deref().filter(|p| p.len() >= 2) {
        let pts: Vec<Point> = points
            .iter()
            .filter(|p| p.len() >= 2)
            .map(|p| {
                Point::new(
                    p[0] / 100.0 * rendered.width,
                    p[1] / 100.0 * rendered.height,
                )
            })
            .collect();
        return Ok(pts);
    }

    let px_count = coords.points_px.as_ref().map(|px| px.len() / 2);
    let pct_count = coords.points.as_ref().map(Vec::len);
    match px_count.max(pct_count) {
        None => Err(GeometryError::MissingCoordinates),
        Some(n) => Err(GeometryError::TooFewPoints(n)),
    }
}

fn nonzero_or_one(v: Option<f64>) -> f64 {
    match v {
        Some(v) if v != 0.0 && v.is_finite() => v,
        _ => 1.0,
    }
}

fn finite_or(v: Option<f64>, fallback: Option<f64>) -> f64 {
    v.filter(|v| v.is_finite())
        .or(fallback.filter(|v| v.is_finite()))
        .unwrap_or(0.0)
}

fn adjust_scale(coords: &HotspotCoordinates) -> Option<(f64, f64)> {
    let positive = |v: Option<f64>| v.filter(|v| v.is_finite() && *v > 0.0);
    let sx = positive(coords.adjust_scale_x);
    let sy = positive(coords.adjust_scale_y);
    if sx.is_none() && sy.is_none() {
        return None;
    }
    let sx = sx.unwrap_or(1.0);
    Some((sx, sy.unwrap_or(sx)))
}

fn scale_about_centroid(pts: &mut [Point], sx: f64, sy: f64) {
    let mid = centroid(pts);
    for p in pts.iter_mut() {
        p.x = mid.x + (p.x - mid.x) * sx;
        p.y = mid.y + (p.y - mid.y) * sy;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn px_coords(points_px: Vec<f64>, src: (f64, f64)) -> HotspotCoordinates {
        HotspotCoordinates {
            points_px: Some(points_px),
            source_width: Some(src.0),
            source_height: Some(src.1),
            ..HotspotCoordinates::default()
        }
    }

    fn pct_coords(points: &[[f64; 2]]) -> HotspotCoordinates {
        HotspotCoordinates {
            points: Some(points.iter().map(|p| p.to_vec()).collect()),
            ..HotspotCoordinates::default()
        }
    }

    fn assert_point(p: Point, x: f64, y: f64) {
        assert!((p.x - x).abs() < EPSILON, "x: {} != {x}", p.x);
        assert!((p.y - y).abs() < EPSILON, "y: {} != {y}", p.y);
    }

    #[test]
    fn pixel_coordinates_scale_per_axis() {
        let coords = px_coords(vec![100.0, 50.0, 300.0, 50.0, 300.0, 150.0], (400.0, 200.0));
        let poly = resolve_points(&coords, Size::new(800.0, 100.0), &AdjustDefaults::default())
            .unwrap();
        assert_eq!(poly.len(), 3);
        assert_point(poly.points()[0], 200.0, 25.0);
        assert_point(poly.points()[1], 600.0, 25.0);
        assert_point(poly.points()[2], 600.0, 75.0);
    }

    #[test]
    fn percentage_coordinates_scale_to_rendered_size() {
        let coords = pct_coords(&[[10.0, 20.0], [50.0, 20.0], [50.0, 80.0]]);
        let poly = resolve_points(&coords, Size::new(1000.0, 500.0), &AdjustDefaults::default())
            .unwrap();
        assert_point(poly.points()[0], 100.0, 100.0);
        assert_point(poly.points()[2], 500.0, 400.0);
    }

    #[test]
    fn pixel_coordinates_win_over_percentages() {
        let mut coords = px_coords(vec![10.0, 10.0, 20.0, 20.0], (100.0, 100.0));
        coords.points = Some(vec![vec![50.0, 50.0], vec![60.0, 60.0]]);
        let poly = resolve_points(&coords, Size::new(100.0, 100.0), &AdjustDefaults::default())
            .unwrap();
        assert_point(poly.points()[0], 10.0, 10.0);
    }

    #[test]
    fn short_pixel_list_falls_back_to_percentages() {
        let mut coords = px_coords(vec![10.0, 10.0], (100.0, 100.0));
        coords.points = Some(vec![vec![50.0, 50.0], vec![60.0, 60.0]]);
        let poly = resolve_points(&coords, Size::new(200.0, 200.0), &AdjustDefaults::default())
            .unwrap();
        assert_point(poly.points()[0], 100.0, 100.0);
    }

    #[test]
    fn zero_source_size_degrades_to_unit_divisor() {
        let coords = px_coords(vec![1.0, 2.0, 3.0, 4.0], (0.0, 0.0));
        let poly = resolve_points(&coords, Size::new(10.0, 10.0), &AdjustDefaults::default())
            .unwrap();
        assert_point(poly.points()[0], 10.0, 20.0);
    }

    #[test]
    fn trailing_odd_pixel_value_is_ignored() {
        let coords = px_coords(vec![1.0, 2.0, 3.0, 4.0, 5.0], (1.0, 1.0));
        let poly = resolve_points(&coords, Size::new(1.0, 1.0), &AdjustDefaults::default())
            .unwrap();
        assert_eq!(poly.len(), 2);
    }

    #[test]
    fn hotspot_offset_overrides_default() {
        let mut coords = pct_coords(&[[0.0, 0.0], [10.0, 10.0]]);
        coords.adjust_offset_x = Some(5.0);
        let defaults = AdjustDefaults {
            offset_x: Some(100.0),
            offset_y: Some(-3.0),
        };
        let poly = resolve_points(&coords, Size::new(100.0, 100.0), &defaults).unwrap();
        assert_point(poly.points()[0], 5.0, -3.0);
        assert_point(poly.points()[1], 15.0, 7.0);
    }

    #[test]
    fn scale_keeps_centroid_and_scales_offsets() {
        let mut coords = pct_coords(&[[0.0, 0.0], [40.0, 0.0], [40.0, 20.0], [0.0, 20.0]]);
        let base = resolve_points(&coords, Size::new(100.0, 100.0), &AdjustDefaults::default())
            .unwrap();
        coords.adjust_scale_x = Some(2.0);
        coords.adjust_scale_y = Some(0.5);
        let scaled = resolve_points(&coords, Size::new(100.0, 100.0), &AdjustDefaults::default())
            .unwrap();

        let c0 = base.centroid();
        let c1 = scaled.centroid();
        assert_point(c1, c0.x, c0.y);
        for (b, s) in base.points().iter().zip(scaled.points()) {
            assert!(((s.x - c1.x) - (b.x - c0.x) * 2.0).abs() < EPSILON);
            assert!(((s.y - c1.y) - (b.y - c0.y) * 0.5).abs() < EPSILON);
        }
    }

    #[test]
    fn scale_y_defaults_to_scale_x() {
        let mut coords = pct_coords(&[[0.0, 0.0], [10.0, 10.0]]);
        coords.adjust_scale_x = Some(3.0);
        coords.adjust_scale_y = Some(-1.0);
        let poly = resolve_points(&coords, Size::new(100.0, 100.0), &AdjustDefaults::default())
            .unwrap();
        // centroid (5, 5), offsets ±5 scaled by 3 on both axes
        assert_point(poly.points()[0], -10.0, -10.0);
        assert_point(poly.points()[1], 20.0, 20.0);
    }

    #[test]
    fn missing_coordinates_are_invalid() {
        let err = resolve_points(
            &HotspotCoordinates::default(),
            Size::new(10.0, 10.0),
            &AdjustDefaults::default(),
        )
        .unwrap_err();
        assert_eq!(err, GeometryError::MissingCoordinates);
    }

    #[test]
    fn single_percentage_point_is_invalid() {
        let coords = pct_coords(&[[10.0, 10.0]]);
        let err = resolve_points(&coords, Size::new(10.0, 10.0), &AdjustDefaults::default())
            .unwrap_err();
        assert_eq!(err, GeometryError::TooFewPoints(1));
    }

    #[test]
    fn unresolvable_hotspot_error_names_the_hotspot() {
        let hotspot = Hotspot {
            id: "rack".into(),
            label: None,
            content: None,
            coordinates: pct_coords(&[[10.0, 10.0]]),
        };
        let err = resolve_hotspot(&hotspot, Size::new(10.0, 10.0), &AdjustDefaults::default())
            .unwrap_err();
        assert!(matches!(
            &err,
            CoreError::InvalidHotspot { id, reason: GeometryError::TooFewPoints(1) } if id == "rack"
        ));
        assert!(err.to_string().contains("'rack'"));
    }

    #[test]
    fn malformed_percentage_points_are_dropped() {
        let coords = HotspotCoordinates {
            points: Some(vec![vec![10.0, 10.0], vec![20.0]]),
            ..HotspotCoordinates::default()
        };
        let err = resolve_points(&coords, Size::new(10.0, 10.0), &AdjustDefaults::default())
            .unwrap_err();
        assert_eq!(err, GeometryError::TooFewPoints(1));
    }

    #[test]
    fn polygon_contains_uses_even_odd_rule() {
        let square = Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ])
        .unwrap();
        assert!(square.contains(Point::new(5.0, 5.0)));
        assert!(!square.contains(Point::new(15.0, 5.0)));
        assert!(!square.contains(Point::new(5.0, -1.0)));

        let line = Polygon::new(vec![Point::new(0.0, 0.0), Point::new(10.0, 10.0)]).unwrap();
        assert!(!line.contains(Point::new(5.0, 5.0)));
    }

    #[test]
    fn bounding_rect_and_svg_path() {
        let poly = Polygon::new(vec![
            Point::new(1.0, 2.0),
            Point::new(5.0, 2.0),
            Point::new(3.0, 7.5),
        ])
        .unwrap();
        let r = poly.bounding_rect();
        assert_eq!(r, Rect::new(1.0, 2.0, 4.0, 5.5));
        assert_eq!(poly.to_svg_path(), "M 1 2 L 5 2 L 3 7.5 Z");
    }
}
