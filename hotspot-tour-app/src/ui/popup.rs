use eframe::egui;

use hotspot_tour_core::popup::{max_popup_size, POPUP_GAP};
use hotspot_tour_core::{clamp_placement, provisional_placement, LayoutMetrics, PopupContent, Size};

use crate::app::TourApp;

/// Measurements of the egui window for popup placement.
struct ScreenLayout {
    viewport: Size,
    measured: Option<Size>,
    width_hint: f64,
}

impl LayoutMetrics for ScreenLayout {
    fn viewport_size(&self) -> Size {
        self.viewport
    }

    // Until the popup has been laid out only the hinted width is known.
    fn popup_size(&self) -> Option<Size> {
        self.measured.or(Some(Size::new(self.width_hint, 0.0)))
    }
}

/// Title and body paragraphs for a hotspot popup.
///
/// A hotspot without content (or with an empty title) is titled with its
/// region label.
pub(crate) fn popup_text(content: Option<&PopupContent>, label: &str) -> (String, Vec<String>) {
    match content {
        Some(c) => {
            let title = match c.title() {
                "" => label,
                t => t,
            };
            let paragraphs = c.paragraphs().into_iter().map(str::to_string).collect();
            (title.to_string(), paragraphs)
        }
        None => (label.to_string(), Vec::new()),
    }
}

/// Area the popup must stay inside, excluding OS insets such as notches.
fn content_size(ctx: &egui::Context) -> Size {
    let rect = ctx.content_rect();
    Size::new(rect.width() as f64, rect.height() as f64)
}

impl TourApp {
    pub(crate) fn draw_popup(&mut self, ctx: &egui::Context) {
        use egui_material_icons::icons::ICON_CLOSE;

        let Some(hotspot_id) = self.viewer.state().active_hotspot_id.clone() else {
            return;
        };
        let (Some(overlay), Some(transform)) = (&self.overlay, &self.overlay_transform) else {
            return;
        };
        let Some(region) = overlay.region(&hotspot_id) else {
            return;
        };
        let trigger = transform.trigger_rect(region);
        let content = self
            .viewer
            .current_slide()
            .and_then(|s| s.hotspot(&hotspot_id))
            .and_then(|h| h.content.as_ref());
        let (title, paragraphs) = popup_text(content, &region.label);

        let layout = ScreenLayout {
            viewport: content_size(ctx),
            measured: self.popup.measured,
            width_hint: self.preferences.popup_width_hint as f64,
        };
        let placement = clamp_placement(
            provisional_placement(trigger, &layout, POPUP_GAP),
            trigger,
            &layout,
        );
        let popup_box = placement.box_rect(layout.popup_size().unwrap_or_default(), layout.viewport);
        let max = max_popup_size(layout.viewport);
        let max_width = (layout.width_hint.min(max.width) as f32).max(120.0);

        let focus = std::mem::take(&mut self.popup.focus_requested);
        let mut close_clicked = false;

        let shown = egui::Area::new(egui::Id::new("hotspot_popup"))
            .order(egui::Order::Foreground)
            .fixed_pos(egui::pos2(popup_box.left as f32, popup_box.top as f32))
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.set_max_width(max_width);
                    ui.horizontal(|ui| {
                        ui.label(egui::RichText::new(&title).strong().size(16.0));
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            let close = ui
                                .add(egui::Button::new(egui::RichText::new(ICON_CLOSE).size(16.0)).frame(false))
                                .on_hover_text("Close (Esc)");
                            if focus {
                                close.request_focus();
                            }
                            if close.clicked() {
                                close_clicked = true;
                            }
                        });
                    });
                    if !paragraphs.is_empty() {
                        ui.separator();
                        egui::ScrollArea::vertical()
                            .max_height((max.height as f32 - 60.0).max(60.0))
                            .show(ui, |ui| {
                                for p in &paragraphs {
                                    ui.label(p);
                                    ui.add_space(4.0);
                                }
                            });
                    }
                });
            });

        let rect = shown.response.rect;
        let measured = Size::new(rect.width() as f64, rect.height() as f64);
        if self.popup.measured != Some(measured) {
            self.popup.measured = Some(measured);
            ctx.request_repaint();
        }

        if close_clicked {
            self.viewer.close_popup();
            self.apply_effects();
        }
    }
}
