use eframe::egui;

use crate::app::{TourApp, HUD_CORNER_RADIUS, HUD_MARGIN};

impl TourApp {
    /// Prev/next, auto-tour and window toggles in the top-right corner.
    pub(crate) fn show_top_right_toolbar(&mut self, ctx: &egui::Context) {
        use egui_material_icons::icons::*;

        let icon_on = egui::Color32::from_rgb(200, 200, 200);
        let icon_active = egui::Color32::from_rgb(255, 160, 80);
        let mi = |icon: &str| egui::RichText::new(icon).size(18.0).color(icon_on);

        let cell = egui::vec2(26.0, 22.0);
        let add_icon_btn =
            |ui: &mut egui::Ui, label: egui::RichText, enabled: bool| -> egui::Response {
                ui.allocate_ui_with_layout(
                    cell,
                    egui::Layout::centered_and_justified(egui::Direction::TopDown),
                    |ui| ui.add_enabled(enabled, egui::Button::new(label).frame(false)),
                )
                .inner
            };

        let has_slides = !self.viewer.is_empty();
        let can_step = self.viewer.can_step();
        let running = self.viewer.tour_running();

        let top_y = HUD_MARGIN + self.menu_bar_height;
        egui::Area::new(egui::Id::new("hud_toolbar"))
            .anchor(egui::Align2::RIGHT_TOP, [-HUD_MARGIN, top_y])
            .show(ctx, |ui| {
                egui::Frame::NONE
                    .fill(egui::Color32::from_black_alpha(160))
                    .inner_margin(egui::Margin::same(4))
                    .corner_radius(HUD_CORNER_RADIUS)
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            ui.spacing_mut().item_spacing.x = 0.0;

                            if add_icon_btn(ui, mi(ICON_ARROW_BACK), can_step)
                                .on_hover_text("Previous slide (Left)")
                                .clicked()
                            {
                                self.viewer.prev();
                            }
                            if add_icon_btn(ui, mi(ICON_ARROW_FORWARD), can_step)
                                .on_hover_text("Next slide (Right)")
                                .clicked()
                            {
                                self.viewer.next();
                            }

                            let (tour_icon, tour_tip) = if running {
                                (
                                    egui::RichText::new(ICON_STOP).size(18.0).color(icon_active),
                                    "Stop tour (Esc)",
                                )
                            } else {
                                (mi(ICON_PLAY_ARROW), "Start tour")
                            };
                            if add_icon_btn(ui, tour_icon, has_slides)
                                .on_hover_text(tour_tip)
                                .clicked()
                            {
                                self.viewer.toggle_tour();
                            }

                            if add_icon_btn(ui, mi(ICON_HELP_OUTLINE), true)
                                .on_hover_text("Keyboard and mouse help")
                                .clicked()
                            {
                                self.show_help = !self.show_help;
                            }
                            if add_icon_btn(ui, mi(ICON_SETTINGS), true)
                                .on_hover_text("Settings")
                                .clicked()
                            {
                                self.show_settings = !self.show_settings;
                            }
                        });
                    });
            });

        self.apply_effects();
    }
}
