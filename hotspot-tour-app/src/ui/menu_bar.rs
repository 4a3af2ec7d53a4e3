use std::path::Path;

use eframe::egui;
use tracing::{error, info};

use hotspot_tour_render::export_svg;

use crate::app::TourApp;

impl TourApp {
    /// Draw the top menu bar. Must be called **before** `CentralPanel` so that
    /// `egui` reserves vertical space for it.
    pub(crate) fn draw_menu_bar(&mut self, ctx: &egui::Context) {
        let resp = egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                self.menu_file(ui, ctx);
                self.menu_view(ui);
                self.menu_help(ui);
            });
        });
        self.menu_bar_height = resp.response.rect.height();
    }

    fn menu_file(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.menu_button("File", |ui| {
            if ui.button("Open Tour…").clicked() {
                ui.close();
                let mut dialog = rfd::FileDialog::new().add_filter("Tour", &["json"]);
                if let Some(dir) = self.tour_path.as_ref().and_then(|p| p.parent()) {
                    if dir.is_dir() {
                        dialog = dialog.set_directory(dir);
                    }
                }
                if let Some(path) = dialog.pick_file() {
                    self.load_tour(path);
                }
            }
            let has_overlay = self.overlay.is_some();
            if ui
                .add_enabled(has_overlay, egui::Button::new("Export Overlay SVG…"))
                .on_disabled_hover_text("No image with hotspots is shown")
                .clicked()
            {
                ui.close();
                self.export_overlay_svg();
            }
            ui.separator();
            if ui.button("Quit").clicked() {
                ui.close();
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });
    }

    fn menu_view(&mut self, ui: &mut egui::Ui) {
        let has_slides = !self.viewer.is_empty();
        let can_step = self.viewer.can_step();
        ui.menu_button("View", |ui| {
            if ui
                .add_enabled(can_step, shortcut_item("Previous Slide", "Left"))
                .clicked()
            {
                ui.close();
                self.viewer.prev();
            }
            if ui
                .add_enabled(can_step, shortcut_item("Next Slide", "Right"))
                .clicked()
            {
                ui.close();
                self.viewer.next();
            }
            ui.separator();
            let tour_label = if self.viewer.tour_running() {
                "Stop Tour"
            } else {
                "Start Tour"
            };
            if ui
                .add_enabled(has_slides, egui::Button::new(tour_label))
                .clicked()
            {
                ui.close();
                self.viewer.toggle_tour();
            }
            ui.separator();
            if ui.button("Settings…").clicked() {
                ui.close();
                self.show_settings = !self.show_settings;
            }
        });
        self.apply_effects();
    }

    fn menu_help(&mut self, ui: &mut egui::Ui) {
        ui.menu_button("Help", |ui| {
            if ui.button("Keyboard Shortcuts").clicked() {
                ui.close();
                self.show_help = true;
            }
            ui.separator();
            if ui.button("About Hotspot Tour").clicked() {
                ui.close();
                self.show_about = true;
            }
        });
    }

    /// Save the current overlay as a standalone SVG file.
    fn export_overlay_svg(&mut self) {
        let (Some(overlay), Some(slide)) = (&self.overlay, self.viewer.current_slide()) else {
            return;
        };
        let Some(path) = rfd::FileDialog::new()
            .add_filter("SVG", &["svg"])
            .set_file_name(format!("{}.svg", overlay.slide_id))
            .save_file()
        else {
            return;
        };
        let href = image_href(&self.viewer.data().image_path(&slide.src), &path);
        match export_svg(overlay, Some(&href), &path) {
            Ok(()) => {
                info!(path = %path.display(), "Exported overlay");
                self.status = Some(format!("Exported {}", path.display()));
            }
            Err(e) => {
                error!("Overlay export failed: {e}");
                self.status = Some(format!("Export failed: {e}"));
            }
        }
    }

    pub(crate) fn draw_about_window(&mut self, ctx: &egui::Context) {
        if !self.show_about {
            return;
        }
        let mut open = true;
        egui::Window::new("About Hotspot Tour")
            .open(&mut open)
            .resizable(false)
            .collapsible(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(4.0);
                    ui.heading(
                        egui::RichText::new("Hotspot Tour")
                            .strong()
                            .color(egui::Color32::from_rgb(80, 200, 255)),
                    );
                    ui.add_space(4.0);
                    ui.label("Interactive image tours with clickable hotspot regions.");
                    ui.add_space(8.0);
                    ui.label(
                        egui::RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                            .small()
                            .color(egui::Color32::from_rgb(160, 160, 160)),
                    );
                    ui.add_space(4.0);
                });
            });
        if !open {
            self.show_about = false;
        }
    }
}

/// Image reference written into an exported SVG: the file name when the
/// image sits next to the SVG, otherwise its full path.
fn image_href(image: &Path, svg: &Path) -> String {
    match (image.parent(), svg.parent(), image.file_name()) {
        (Some(a), Some(b), Some(name)) if a == b => name.to_string_lossy().into_owned(),
        _ => image.to_string_lossy().into_owned(),
    }
}

/// Build a `Button` with a right-aligned keyboard shortcut hint.
fn shortcut_item(label: &str, shortcut: &str) -> egui::Button<'static> {
    let text = format!("{label}    {shortcut}");
    egui::Button::new(egui::RichText::new(text).size(13.0)).wrap_mode(egui::TextWrapMode::Extend)
}
