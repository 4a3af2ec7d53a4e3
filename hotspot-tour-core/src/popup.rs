//! Popup placement next to a trigger region.
//!
//! Placement is a two-phase protocol because the popup's size is only
//! known after it has been laid out:
//!
//! 1. [`provisional_placement`] picks a side using an assumed width.
//! 2. [`clamp_placement`] runs once the real size has been measured and
//!    pulls the box back inside the viewport margins.

use crate::geometry::{Rect, Size};

/// Gap between the trigger region and the popup.
pub const POPUP_GAP: f64 = 12.0;
/// Minimum distance kept between the popup and the viewport edges.
pub const VIEWPORT_MARGIN: f64 = 8.0;
/// Width assumed for side selection before the popup was ever measured.
pub const TYPICAL_POPUP_WIDTH: f64 = 380.0;

/// Source of layout measurements.
///
/// The viewer shell implements this over its real display surface;
/// tests use [`FixedLayout`].
pub trait LayoutMetrics {
    fn viewport_size(&self) -> Size;

    /// Rendered popup size, or `None` before the popup has been laid out.
    fn popup_size(&self) -> Option<Size>;
}

/// Static measurements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedLayout {
    pub viewport: Size,
    pub popup: Option<Size>,
}

impl LayoutMetrics for FixedLayout {
    fn viewport_size(&self) -> Size {
        self.viewport
    }

    fn popup_size(&self) -> Option<Size> {
        self.popup
    }
}

/// How the popup box is positioned relative to its anchor coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupTransform {
    /// `top` is the box's vertical centre.
    CenterY,
    /// `left` and `top` are the box's centre (`translate(-50%, -50%)`).
    CenterXY,
}

/// Placement directives, in viewport pixels.
///
/// Exactly one of `left`/`right` is set. `right` is the distance between
/// the viewport's right edge and the box's right edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopupPlacement {
    pub left: Option<f64>,
    pub right: Option<f64>,
    pub top: f64,
    pub transform: PopupTransform,
}

impl PopupPlacement {
    /// The box this placement produces for a popup of `size`.
    pub fn box_rect(&self, size: Size, viewport: Size) -> Rect {
        let left = match (self.transform, self.left, self.right) {
            (PopupTransform::CenterXY, Some(l), _) => l - size.width / 2.0,
            (_, Some(l), _) => l,
            (_, None, Some(r)) => viewport.width - r - size.width,
            (_, None, None) => 0.0,
        };
        Rect::new(left, self.top - size.height / 2.0, size.width, size.height)
    }
}

/// Phase 1: choose a side for the popup before its size is known.
///
/// The side with more free space wins (right on ties). The popup is only
/// anchored beside the trigger when it fits there at `assumed width`;
/// otherwise it is centred on the trigger.
pub fn provisional_placement(trigger: Rect, layout: &impl LayoutMetrics, gap: f64) -> PopupPlacement {
    let viewport = layout.viewport_size();
    let popup_width = layout
        .popup_size()
        .map(|s| s.width)
        .filter(|w| *w > 0.0)
        .unwrap_or(TYPICAL_POPUP_WIDTH);

    let space_right = viewport.width - trigger.right();
    let space_left = trigger.left;
    let show_on_right = space_right >= space_left;
    let top = trigger.center().y;

    if show_on_right && trigger.right() + gap + popup_width <= viewport.width {
        PopupPlacement {
            left: Some(trigger.right() + gap),
            right: None,
            top,
            transform: PopupTransform::CenterY,
        }
    } else if !show_on_right && trigger.left - gap - popup_width >= 0.0 {
        PopupPlacement {
            left: None,
            right: Some(viewport.width - trigger.left + gap),
            top,
            transform: PopupTransform::CenterY,
        }
    } else {
        PopupPlacement {
            left: Some(trigger.center().x),
            right: None,
            top,
            transform: PopupTransform::CenterXY,
        }
    }
}

/// Phase 2: clamp a provisional placement using the measured popup size.
///
/// Returns the placement unchanged when the popup has not been measured
/// yet. The result is always expressed as an absolute left edge with a
/// vertically centred `top`. Right overflow is corrected before left
/// overflow, so a popup wider than the usable area sticks to the left
/// margin.
pub fn clamp_placement(
    placement: PopupPlacement,
    trigger: Rect,
    layout: &impl LayoutMetrics,
) -> PopupPlacement {
    let Some(size) = layout.popup_size().filter(|s| !s.is_empty()) else {
        return placement;
    };
    let viewport = layout.viewport_size();
    let min_x = VIEWPORT_MARGIN;
    let max_x = viewport.width - VIEWPORT_MARGIN;
    let min_y = VIEWPORT_MARGIN;
    let max_y = viewport.height - VIEWPORT_MARGIN;

    let current = placement.box_rect(size, viewport);
    let mut left = current.left;
    if current.right() > max_x {
        left = max_x - size.width;
    }
    if left < min_x {
        left = min_x;
    }

    let center_y = trigger.center().y;
    let top = if center_y - size.height / 2.0 < min_y {
        min_y + size.height / 2.0
    } else if center_y + size.height / 2.0 > max_y {
        max_y - size.height / 2.0
    } else {
        center_y
    };

    PopupPlacement {
        left: Some(left),
        right: None,
        top,
        transform: PopupTransform::CenterY,
    }
}

/// Largest popup size that still fits inside the viewport margins.
pub fn max_popup_size(viewport: Size) -> Size {
    Size::new(
        (viewport.width - 2.0 * VIEWPORT_MARGIN).max(0.0),
        (viewport.height - 2.0 * VIEWPORT_MARGIN).max(0.0),
    )
}
