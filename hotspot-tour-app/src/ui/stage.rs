use std::time::Instant;

use eframe::egui;

use hotspot_tour_render::{centered, fit_within, OverlayTransform};

use super::{to_egui_rect, to_point, to_pos2, to_rect, STAGE_SENSE};
use crate::app::{TourApp, FALLBACK_MESSAGE, STAGE_BACKGROUND};

const REGION_IDLE: egui::Color32 = egui::Color32::from_rgba_premultiplied(60, 60, 60, 60);
const REGION_HOVER: egui::Color32 = egui::Color32::from_rgb(80, 200, 255);
const REGION_ACTIVE: egui::Color32 = egui::Color32::from_rgb(255, 160, 80);
const REGION_FOCUS: egui::Color32 = egui::Color32::WHITE;

impl TourApp {
    /// Draw the slide image, its hotspot overlay and the fade cover, and
    /// route pointer input on the image area.
    pub(crate) fn draw_stage(&mut self, ctx: &egui::Context, now: Instant) {
        let mut clicked_hotspot: Option<String> = None;
        let mut clicked_outside = false;

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(STAGE_BACKGROUND))
            .show(ctx, |ui| {
                let available = ui.available_size();
                let (response, painter) = ui.allocate_painter(available, STAGE_SENSE);
                let area = to_rect(response.rect);

                // Image container sized to the image, recomputed every frame
                // so window resizes keep the overlay aligned.
                self.overlay_transform = None;
                if let Some(image) = &self.image {
                    if let Some(fitted) = fit_within(image.natural, area.size()) {
                        let display = centered(fitted, area);
                        let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
                        painter.image(
                            image.texture.id(),
                            to_egui_rect(display),
                            uv,
                            egui::Color32::WHITE,
                        );
                        if let Some(overlay) = &self.overlay {
                            self.overlay_transform = OverlayTransform::new(overlay.view_box, display).ok();
                        }
                    }
                } else if let Some(reason) = &self.image_error {
                    let center = response.rect.center();
                    painter.text(
                        center,
                        egui::Align2::CENTER_CENTER,
                        FALLBACK_MESSAGE,
                        egui::FontId::proportional(18.0),
                        egui::Color32::from_gray(170),
                    );
                    painter.text(
                        center + egui::vec2(0.0, 24.0),
                        egui::Align2::CENTER_CENTER,
                        reason,
                        egui::FontId::proportional(11.0),
                        egui::Color32::from_gray(110),
                    );
                }

                let mut hovered_label = None;
                if let (Some(overlay), Some(t)) = (self.overlay.as_mut(), self.overlay_transform) {
                    let pointer = response.hover_pos().map(|p| t.to_natural(to_point(p)));
                    if overlay.update_hover(pointer) {
                        ctx.request_repaint();
                    }

                    let active = self.viewer.state().active_hotspot_id.as_deref();
                    let hovered = overlay.hovered().map(|r| r.hotspot_id.clone());
                    for (i, region) in overlay.regions.iter().enumerate() {
                        let color = if active == Some(region.hotspot_id.as_str()) {
                            REGION_ACTIVE
                        } else if hovered.as_deref() == Some(region.hotspot_id.as_str()) {
                            REGION_HOVER
                        } else if self.focused_region == Some(i) {
                            REGION_FOCUS
                        } else {
                            REGION_IDLE
                        };
                        let points: Vec<egui::Pos2> = region
                            .polygon
                            .points()
                            .iter()
                            .map(|p| to_pos2(t.to_display(*p)))
                            .collect();
                        let width = if color == REGION_IDLE { 1.0 } else { 2.0 };
                        painter.add(egui::Shape::closed_line(points, egui::Stroke::new(width, color)));
                    }

                    if let Some(region) = overlay.hovered() {
                        ctx.set_cursor_icon(egui::CursorIcon::PointingHand);
                        hovered_label = Some(region.label.clone());
                    }

                    // A click without a pointer position came from the keyboard.
                    let click_pos = response.interact_pointer_pos().filter(|_| response.clicked());
                    if let Some(pos) = click_pos {
                        match overlay.region_at(t.to_natural(to_point(pos))) {
                            Some(region) => clicked_hotspot = Some(region.hotspot_id.clone()),
                            None => clicked_outside = true,
                        }
                    }
                } else if response.clicked() && response.interact_pointer_pos().is_some() {
                    clicked_outside = true;
                }

                let cover = self.fade.cover(now);
                if cover > 0.0 {
                    painter.rect_filled(response.rect, 0.0, STAGE_BACKGROUND.gamma_multiply(cover));
                }

                if let Some(label) = hovered_label {
                    response.on_hover_text(label);
                }
            });

        if let Some(id) = clicked_hotspot {
            self.focused_region = None;
            self.viewer.click_hotspot(&id);
        } else if clicked_outside {
            self.viewer.click_outside_popup();
        }
        self.apply_effects();
    }
}
