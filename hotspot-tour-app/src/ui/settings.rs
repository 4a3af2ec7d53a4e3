use eframe::egui;

use crate::app::TourApp;

impl TourApp {
    pub(crate) fn show_settings_window(&mut self, ctx: &egui::Context) {
        if !self.show_settings {
            return;
        }

        let mut open = true;
        let mut changed = false;
        let mut reload = false;
        egui::Window::new("Settings")
            .open(&mut open)
            .resizable(true)
            .default_width(320.0)
            .frame(
                egui::Frame::window(&ctx.style())
                    .fill(egui::Color32::from_rgba_unmultiplied(10, 10, 10, 210)),
            )
            .show(ctx, |ui| {
                let prefs = &mut self.preferences;

                ui.heading("Slides");
                changed |= ui
                    .checkbox(&mut prefs.fade_enabled, "Cross-fade between images")
                    .changed();
                ui.horizontal(|ui| {
                    ui.label("Fade duration:");
                    changed |= ui
                        .add(
                            egui::DragValue::new(&mut prefs.fade_duration_ms)
                                .range(0..=2000)
                                .suffix(" ms"),
                        )
                        .changed();
                });

                ui.add_space(10.0);
                ui.heading("Auto tour");
                egui::Grid::new("settings_tour")
                    .num_columns(2)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        ui.label("Time per hotspot:");
                        changed |= ui
                            .add(
                                egui::DragValue::new(&mut prefs.hotspot_dwell_ms)
                                    .range(500..=60_000)
                                    .speed(50)
                                    .suffix(" ms"),
                            )
                            .changed();
                        ui.end_row();

                        ui.label("Pause on a new slide:");
                        changed |= ui
                            .add(
                                egui::DragValue::new(&mut prefs.empty_slide_delay_ms)
                                    .range(250..=60_000)
                                    .speed(50)
                                    .suffix(" ms"),
                            )
                            .changed();
                        ui.end_row();
                    });

                ui.add_space(10.0);
                ui.heading("Popup & HUD");
                ui.horizontal(|ui| {
                    ui.label("Popup width:");
                    changed |= ui
                        .add(
                            egui::DragValue::new(&mut prefs.popup_width_hint)
                                .range(160.0..=800.0)
                                .suffix(" px"),
                        )
                        .changed();
                });
                changed |= ui
                    .checkbox(&mut prefs.show_help_hints, "Show key hints")
                    .changed();

                ui.add_space(10.0);
                ui.label(
                    egui::RichText::new("Fade and tour timing apply when a tour is loaded.")
                        .small()
                        .color(egui::Color32::from_gray(140)),
                );
                if ui.button("Reload tour").clicked() {
                    reload = true;
                }
            });

        if changed {
            self.fade.set_duration(self.preferences.fade_duration());
            self.preferences.save();
        }
        if reload {
            if let Some(path) = self.tour_path.clone() {
                self.load_tour(path);
            }
        }
        if !open {
            self.show_settings = false;
        }
    }
}
