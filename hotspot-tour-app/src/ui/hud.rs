use eframe::egui;

use crate::app::{TourApp, HUD_CORNER_RADIUS, HUD_MARGIN};

impl TourApp {
    /// Top-left panel: slide position, alt text and tour state.
    pub(crate) fn show_slide_info(&mut self, ctx: &egui::Context) {
        let Some(slide) = self.viewer.current_slide() else {
            return;
        };
        let position = format!(
            "Slide {} / {}",
            self.viewer.state().current_index + 1,
            self.viewer.slide_count()
        );
        let alt = slide.alt.clone();
        let regions = self.overlay.as_ref().map(|o| o.regions.len());

        let top_y = HUD_MARGIN + self.menu_bar_height;
        egui::Area::new(egui::Id::new("hud_slide"))
            .anchor(egui::Align2::LEFT_TOP, [HUD_MARGIN, top_y])
            .interactable(false)
            .show(ctx, |ui| {
                egui::Frame::NONE
                    .fill(egui::Color32::from_black_alpha(160))
                    .inner_margin(egui::Margin::same(8))
                    .corner_radius(HUD_CORNER_RADIUS)
                    .show(ui, |ui| {
                        ui.style_mut().visuals.override_text_color =
                            Some(egui::Color32::from_rgb(220, 220, 220));
                        ui.style_mut().spacing.item_spacing.y = 2.0;

                        ui.label(egui::RichText::new(position).strong());
                        if !alt.is_empty() {
                            ui.label(alt);
                        }
                        if let Some(n) = regions {
                            ui.label(
                                egui::RichText::new(format!("{n} hotspot(s)"))
                                    .small()
                                    .color(egui::Color32::from_gray(150)),
                            );
                        }
                        if self.viewer.tour_running() {
                            ui.colored_label(egui::Color32::from_rgb(255, 160, 80), "Auto tour running");
                        }
                        if let Some(status) = &self.status {
                            ui.colored_label(egui::Color32::from_rgb(80, 200, 255), status.as_str());
                        }
                        if self.preferences.show_help_hints {
                            ui.label(
                                egui::RichText::new("←/→ slides · Tab regions · Enter open · Esc close")
                                    .small()
                                    .color(egui::Color32::from_gray(120)),
                            );
                        }
                    });
            });
    }
}
