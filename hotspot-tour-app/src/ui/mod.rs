mod help;
mod hud;
mod menu_bar;
mod popup;
mod settings;
mod stage;
mod strip;
mod toolbar;

use eframe::egui;

use hotspot_tour_core::{Point, Rect};

/// The image area reacts to clicks but is never an egui tab stop; region
/// focus is tracked by the app itself.
pub(crate) const STAGE_SENSE: egui::Sense = egui::Sense::CLICK;

pub(crate) fn to_point(p: egui::Pos2) -> Point {
    Point::new(p.x as f64, p.y as f64)
}

pub(crate) fn to_pos2(p: Point) -> egui::Pos2 {
    egui::pos2(p.x as f32, p.y as f32)
}

pub(crate) fn to_rect(r: egui::Rect) -> Rect {
    Rect::new(r.min.x as f64, r.min.y as f64, r.width() as f64, r.height() as f64)
}

pub(crate) fn to_egui_rect(r: Rect) -> egui::Rect {
    egui::Rect::from_min_size(
        egui::pos2(r.left as f32, r.top as f32),
        egui::vec2(r.width as f32, r.height as f32),
    )
}
