//! Timed auto tour: walk every distinct hotspot of every slide, forever.

use std::collections::HashSet;
use std::time::Duration;

use tracing::{debug, info};

use crate::model::Hotspot;
use crate::viewer::{Effect, StepToken, Viewer};

/// How long each hotspot popup stays open during the tour.
pub const HOTSPOT_DWELL: Duration = Duration::from_millis(5000);
/// Pause after arriving on a slide before its first hotspot opens.
pub const EMPTY_SLIDE_DELAY: Duration = Duration::from_millis(2000);

/// Tour pacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TourTiming {
    pub hotspot_dwell: Duration,
    pub empty_slide: Duration,
}

impl Default for TourTiming {
    fn default() -> Self {
        Self {
            hotspot_dwell: HOTSPOT_DWELL,
            empty_slide: EMPTY_SLIDE_DELAY,
        }
    }
}

/// The first hotspot for each distinct tour key, in order. Hotspots whose
/// key is empty are skipped.
pub fn unique_hotspots_by_label(hotspots: &[Hotspot]) -> Vec<&Hotspot> {
    let mut seen = HashSet::new();
    hotspots
        .iter()
        .filter(|h| {
            let key = h.tour_key();
            !key.is_empty() && seen.insert(key)
        })
        .collect()
}

impl Viewer {
    /// Restart the tour from the first slide.
    pub fn start_tour(&mut self) {
        if self.is_empty() {
            return;
        }
        self.stop_tour();
        info!("Auto tour started");
        self.state.auto_tour_active = true;
        self.state.auto_tour_hotspot_index = 0;
        self.emit(Effect::TourStateChanged { running: true });
        self.go_to_slide(0);
        self.schedule_step(self.options.timing.empty_slide);
    }

    /// Cancel any pending step and close the popup.
    pub fn stop_tour(&mut self) {
        if let Some(token) = self.pending_step.take() {
            self.emit(Effect::CancelStep { token });
        }
        let was_running = std::mem::replace(&mut self.state.auto_tour_active, false);
        self.close_popup();
        if was_running {
            info!("Auto tour stopped");
            self.emit(Effect::TourStateChanged { running: false });
        }
    }

    pub fn toggle_tour(&mut self) {
        if self.state.auto_tour_active {
            self.stop_tour();
        } else {
            self.start_tour();
        }
    }

    fn schedule_step(&mut self, delay: Duration) {
        if let Some(token) = self.pending_step.take() {
            self.emit(Effect::CancelStep { token });
        }
        self.next_token += 1;
        let token = StepToken(self.next_token);
        self.pending_step = Some(token);
        self.emit(Effect::ScheduleStep { token, delay });
    }

    pub(crate) fn on_timer_fired(&mut self, token: StepToken) -> bool {
        if self.pending_step != Some(token) {
            debug!(?token, "Ignoring stale tour timer");
            return false;
        }
        self.pending_step = None;
        self.tour_step();
        true
    }

    /// Open the next distinct hotspot, or move on to the next slide once
    /// the current one is exhausted.
    fn tour_step(&mut self) {
        if !self.state.auto_tour_active {
            return;
        }
        let Some(slide) = self.current_slide() else {
            return;
        };
        let cursor = self.state.auto_tour_hotspot_index;
        let target = unique_hotspots_by_label(&slide.hotspots)
            .get(cursor)
            .map(|h| h.id.clone());

        match target {
            Some(id) => {
                if self.hotspot_rendered(&id) {
                    self.close_popup();
                    self.open_hotspot(&id);
                } else {
                    debug!(hotspot = %id, "Tour skipping hotspot without a region");
                }
                self.state.auto_tour_hotspot_index = cursor + 1;
                self.schedule_step(self.options.timing.hotspot_dwell);
            }
            None => {
                self.state.auto_tour_hotspot_index = 0;
                debug!(slide = self.state.current_index, "Tour advancing to next slide");
                self.go_to_slide(self.state.current_index as isize + 1);
                self.schedule_step(self.options.timing.empty_slide);
            }
        }
    }
}
