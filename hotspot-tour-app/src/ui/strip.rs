use eframe::egui;

use hotspot_tour_render::{centered, fit_within};
use hotspot_tour_core::Size;

use super::{to_egui_rect, to_rect};
use crate::app::{TourApp, STRIP_HEIGHT};

const TILE_WIDTH: f32 = 112.0;
const TILE_CORNER_RADIUS: f32 = 4.0;
const HIGHLIGHT: egui::Color32 = egui::Color32::from_rgb(80, 200, 255);

/// Tooltip of a strip tile: the slide's alt text, else its position.
pub(crate) fn strip_label(alt: &str, index: usize) -> String {
    if alt.trim().is_empty() {
        format!("View image {}", index + 1)
    } else {
        format!("View {alt}")
    }
}

impl TourApp {
    /// Thumbnail strip along the bottom edge. The current slide is
    /// highlighted and scrolled to the centre whenever it changes.
    pub(crate) fn draw_thumbnail_strip(&mut self, ctx: &egui::Context) {
        let current = self.viewer.state().current_index;
        let scroll_needed = self.strip_scrolled_to != Some(current);
        let mut selected = None;

        egui::TopBottomPanel::bottom("thumbnail_strip")
            .exact_height(STRIP_HEIGHT)
            .show(ctx, |ui| {
                egui::ScrollArea::horizontal().show(ui, |ui| {
                    ui.horizontal_centered(|ui| {
                        let tile_height = STRIP_HEIGHT - 16.0;
                        for (i, slide) in self.viewer.data().slides.iter().enumerate() {
                            let (rect, response) = ui.allocate_exact_size(
                                egui::vec2(TILE_WIDTH, tile_height),
                                egui::Sense::click(),
                            );
                            if ui.is_rect_visible(rect) {
                                let painter = ui.painter();
                                painter.rect_filled(rect, TILE_CORNER_RADIUS, egui::Color32::from_gray(28));
                                match self.thumbnails.get(i).and_then(Option::as_ref) {
                                    Some(tex) => {
                                        let [w, h] = tex.size();
                                        let natural = Size::new(w as f64, h as f64);
                                        let area = to_rect(rect.shrink(2.0));
                                        if let Some(fitted) = fit_within(natural, area.size()) {
                                            let uv = egui::Rect::from_min_max(
                                                egui::pos2(0.0, 0.0),
                                                egui::pos2(1.0, 1.0),
                                            );
                                            painter.image(
                                                tex.id(),
                                                to_egui_rect(centered(fitted, area)),
                                                uv,
                                                egui::Color32::WHITE,
                                            );
                                        }
                                    }
                                    None => {
                                        painter.text(
                                            rect.center(),
                                            egui::Align2::CENTER_CENTER,
                                            format!("{}", i + 1),
                                            egui::FontId::proportional(14.0),
                                            egui::Color32::GRAY,
                                        );
                                    }
                                }
                                let (width, color) = if i == current {
                                    (2.0, HIGHLIGHT)
                                } else if response.hovered() {
                                    (1.0, egui::Color32::from_gray(120))
                                } else {
                                    (0.5, egui::Color32::from_gray(50))
                                };
                                painter.rect_stroke(
                                    rect,
                                    TILE_CORNER_RADIUS,
                                    egui::Stroke::new(width, color),
                                    egui::StrokeKind::Inside,
                                );
                            }
                            if i == current && scroll_needed {
                                response.scroll_to_me(Some(egui::Align::Center));
                            }
                            if response.hovered() {
                                ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                            }
                            if response.on_hover_text(strip_label(&slide.alt, i)).clicked() {
                                selected = Some(i);
                            }
                        }
                    });
                });
            });

        if scroll_needed {
            self.strip_scrolled_to = Some(current);
        }
        if let Some(index) = selected {
            self.viewer.select_slide(index);
            self.apply_effects();
        }
    }
}
