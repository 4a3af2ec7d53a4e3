use eframe::egui;

use hotspot_tour_core::ViewerKey;

use crate::app::TourApp;

/// Keys the viewer acts on, read once per frame.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct KeyPresses {
    pub(crate) left: bool,
    pub(crate) right: bool,
    pub(crate) escape: bool,
    pub(crate) tab: bool,
    pub(crate) shift: bool,
    pub(crate) activate: bool,
}

impl KeyPresses {
    pub(crate) fn read(ctx: &egui::Context) -> Self {
        ctx.input(|i| Self {
            left: i.key_pressed(egui::Key::ArrowLeft),
            right: i.key_pressed(egui::Key::ArrowRight),
            escape: i.key_pressed(egui::Key::Escape),
            tab: i.key_pressed(egui::Key::Tab),
            shift: i.modifiers.shift,
            activate: i.key_pressed(egui::Key::Enter) || i.key_pressed(egui::Key::Space),
        })
    }
}

/// Take key presses the viewer handled away from egui for the rest of the
/// frame. Tab and the arrows also cancel egui's own focus traversal, and
/// an activation removes Enter/Space so no focused widget turns them into
/// a click. Must run before any widget is added.
pub(crate) fn claim_keys(ctx: &egui::Context, traversal: bool, activation: bool) {
    if traversal {
        ctx.input_mut(|i| {
            i.consume_key(egui::Modifiers::NONE, egui::Key::Tab);
        });
        ctx.memory_mut(|m| {
            m.move_focus(egui::FocusDirection::None);
            if let Some(id) = m.focused() {
                m.surrender_focus(id);
            }
        });
    }
    if activation {
        ctx.input_mut(|i| {
            i.consume_key(egui::Modifiers::NONE, egui::Key::Enter);
            i.consume_key(egui::Modifiers::NONE, egui::Key::Space);
        });
    }
}

impl TourApp {
    /// Route key presses to the viewer. Ignored while a text field has focus.
    ///
    /// Runs before the menu bar and the stage are drawn so the keys it
    /// claims never reach egui widgets.
    pub(crate) fn handle_keyboard(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        let keys = KeyPresses::read(ctx);

        if keys.escape && !self.viewer.handle_key(ViewerKey::Escape) {
            self.show_help = false;
        }
        let mut navigated = false;
        if keys.left {
            navigated |= self.viewer.handle_key(ViewerKey::ArrowLeft);
        }
        if keys.right {
            navigated |= self.viewer.handle_key(ViewerKey::ArrowRight);
        }
        if keys.tab && !self.viewer.handle_key(ViewerKey::Tab) {
            let regions = self.overlay.as_ref().map_or(0, |o| o.regions.len());
            self.focused_region = cycle_focus(self.focused_region, regions, keys.shift);
        }

        // A widget the user focused since (toolbar, settings) keeps Enter/Space.
        let widget_focused = ctx.memory(|m| m.focused().is_some());
        let mut activated = false;
        if keys.activate && !self.viewer.popup_open() && !widget_focused {
            let focused = self
                .focused_region
                .and_then(|i| self.overlay.as_ref()?.regions.get(i))
                .map(|r| r.hotspot_id.clone());
            if let Some(id) = focused {
                activated = self.viewer.click_hotspot(&id);
            }
        }

        claim_keys(ctx, keys.tab || navigated, activated);
        self.apply_effects();
    }

    /// Focus the overlay region of `hotspot_id`, used when its popup closes.
    pub(crate) fn focus_region_of(&mut self, hotspot_id: &str) {
        self.focused_region = self
            .overlay
            .as_ref()
            .and_then(|o| o.regions.iter().position(|r| r.hotspot_id == hotspot_id));
    }
}

/// Move keyboard focus to the next (or previous) of `len` regions,
/// wrapping at both ends.
pub(crate) fn cycle_focus(current: Option<usize>, len: usize, backwards: bool) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match (current, backwards) {
        (None, false) => 0,
        (None, true) => len - 1,
        (Some(i), false) => (i + 1) % len,
        (Some(i), true) => (i + len - 1) % len,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::STAGE_SENSE;

    #[test]
    fn focus_cycles_forward_and_back() {
        assert_eq!(cycle_focus(None, 3, false), Some(0));
        assert_eq!(cycle_focus(Some(2), 3, false), Some(0));
        assert_eq!(cycle_focus(None, 3, true), Some(2));
        assert_eq!(cycle_focus(Some(0), 3, true), Some(2));
    }

    #[test]
    fn no_regions_means_no_focus() {
        assert_eq!(cycle_focus(Some(1), 0, false), None);
    }

    fn key(key: egui::Key) -> egui::Event {
        egui::Event::Key {
            key,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers: egui::Modifiers::NONE,
        }
    }

    struct Frame {
        button_clicked: bool,
        stage_focused: bool,
        stage_clicked: bool,
    }

    /// One frame with a focusable button and the stage, claiming `claim`
    /// keys first as the app does.
    fn run_frame(ctx: &egui::Context, events: Vec<egui::Event>, claim: (bool, bool)) -> Frame {
        let input = egui::RawInput {
            events,
            ..Default::default()
        };
        let mut frame = Frame {
            button_clicked: false,
            stage_focused: false,
            stage_clicked: false,
        };
        let _ = ctx.run(input, |ctx| {
            claim_keys(ctx, claim.0, claim.1);
            egui::CentralPanel::default().show(ctx, |ui| {
                frame.button_clicked = ui.button("Next").clicked();
                let (response, _) = ui.allocate_painter(egui::vec2(200.0, 100.0), STAGE_SENSE);
                frame.stage_focused = response.has_focus();
                frame.stage_clicked = response.clicked();
            });
        });
        frame
    }

    #[test]
    fn stage_is_not_a_tab_stop() {
        let ctx = egui::Context::default();
        run_frame(&ctx, vec![], (false, false));
        run_frame(&ctx, vec![key(egui::Key::Tab)], (false, false));
        let f = run_frame(&ctx, vec![key(egui::Key::Tab)], (false, false));
        assert!(!f.stage_focused);
        let f = run_frame(&ctx, vec![key(egui::Key::Enter)], (false, false));
        assert!(!f.stage_clicked);
    }

    #[test]
    fn claimed_tab_then_enter_reaches_no_widget() {
        let ctx = egui::Context::default();
        run_frame(&ctx, vec![], (false, false));
        run_frame(&ctx, vec![key(egui::Key::Tab)], (true, false));
        assert!(ctx.memory(|m| m.focused()).is_none());

        let f = run_frame(&ctx, vec![key(egui::Key::Enter)], (false, true));
        assert!(!f.button_clicked);
        assert!(!f.stage_clicked);
    }

    #[test]
    fn claiming_tab_drops_existing_widget_focus() {
        let ctx = egui::Context::default();
        run_frame(&ctx, vec![], (false, false));
        // Unclaimed Tab lets egui focus the button.
        run_frame(&ctx, vec![key(egui::Key::Tab)], (false, false));
        assert!(ctx.memory(|m| m.focused()).is_some());

        run_frame(&ctx, vec![key(egui::Key::Tab)], (true, false));
        assert!(ctx.memory(|m| m.focused()).is_none());
        let f = run_frame(&ctx, vec![key(egui::Key::Space)], (false, true));
        assert!(!f.button_clicked);
    }
}
