//! Fitting the image container into the available area.

use hotspot_tour_core::{Rect, Size};

/// Size of the image container for an image of `natural` size inside
/// `available`: aspect ratio kept, never enlarged, rounded to whole pixels.
///
/// Returns `None` when the natural size is unknown.
pub fn fit_within(natural: Size, available: Size) -> Option<Size> {
    if natural.is_empty() {
        return None;
    }
    let scale = (available.width / natural.width)
        .min(available.height / natural.height)
        .min(1.0)
        .max(0.0);
    Some(Size::new(
        (natural.width * scale).round(),
        (natural.height * scale).round(),
    ))
}

/// Centre a box of `size` inside `area`.
pub fn centered(size: Size, area: Rect) -> Rect {
    let c = area.center();
    Rect::new(
        c.x - size.width / 2.0,
        c.y - size.height / 2.0,
        size.width,
        size.height,
    )
}
