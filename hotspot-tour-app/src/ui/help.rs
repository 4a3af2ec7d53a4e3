use eframe::egui;

use crate::app::TourApp;

impl TourApp {
    pub(crate) fn show_help_window(&mut self, ctx: &egui::Context) {
        if !self.show_help {
            return;
        }

        let mut open = true;
        egui::Window::new("Controls & Shortcuts")
            .open(&mut open)
            .resizable(false)
            .default_width(340.0)
            .frame(
                egui::Frame::window(&ctx.style())
                    .fill(egui::Color32::from_rgba_unmultiplied(10, 10, 10, 210)),
            )
            .show(ctx, |ui| {
                ui.style_mut().visuals.override_text_color =
                    Some(egui::Color32::from_rgb(220, 220, 220));

                ui.heading("Keyboard");
                ui.add_space(2.0);
                key_table(
                    ui,
                    "help_kb",
                    &[
                        ("Left / Right", "Previous / next slide (no popup open)"),
                        ("Tab", "Focus next hotspot, or back into the open popup"),
                        ("Shift+Tab", "Focus previous hotspot"),
                        ("Enter / Space", "Open the focused hotspot"),
                        ("Esc", "Stop the auto tour, else close the popup"),
                    ],
                );

                ui.add_space(8.0);
                ui.heading("Mouse");
                ui.add_space(2.0);
                key_table(
                    ui,
                    "help_mouse",
                    &[
                        ("Click hotspot", "Open its popup (click again to close)"),
                        ("Click elsewhere", "Close a popup you opened"),
                        ("Click thumbnail", "Jump to that slide"),
                    ],
                );

                ui.add_space(8.0);
                ui.heading("Toolbar icons");
                ui.add_space(2.0);
                {
                    use egui_material_icons::icons::*;
                    let icons: &[(&str, &str)] = &[
                        (ICON_ARROW_BACK, "Previous slide"),
                        (ICON_ARROW_FORWARD, "Next slide"),
                        (ICON_PLAY_ARROW, "Start the auto tour"),
                        (ICON_STOP, "Stop the auto tour"),
                        (ICON_HELP_OUTLINE, "This help window"),
                        (ICON_SETTINGS, "Open settings"),
                    ];
                    egui::Grid::new("help_toolbar")
                        .num_columns(2)
                        .spacing([12.0, 2.0])
                        .show(ui, |ui| {
                            for &(k, d) in icons {
                                ui.label(
                                    egui::RichText::new(k)
                                        .size(18.0)
                                        .color(egui::Color32::WHITE),
                                );
                                ui.label(d);
                                ui.end_row();
                            }
                        });
                }
            });

        if !open {
            self.show_help = false;
        }
    }
}

fn key_table(ui: &mut egui::Ui, id: &str, rows: &[(&str, &str)]) {
    egui::Grid::new(id)
        .num_columns(2)
        .spacing([12.0, 2.0])
        .show(ui, |ui| {
            for &(k, d) in rows {
                ui.label(egui::RichText::new(k).strong().color(egui::Color32::WHITE));
                ui.label(d);
                ui.end_row();
            }
        });
}
