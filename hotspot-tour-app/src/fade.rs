use std::time::{Duration, Instant};

use hotspot_tour_core::RequestId;

/// Cross-fade of the image area.
///
/// The image is covered by a panel-coloured overlay whose opacity runs
/// 0 → 1 while fading out and 1 → 0 while fading in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum FadeState {
    Visible,
    FadingOut { request: RequestId, started: Instant },
    /// Fully covered, waiting for the new image.
    Hidden,
    FadingIn { started: Instant },
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Fade {
    state: FadeState,
    duration: Duration,
}

impl Fade {
    pub(crate) fn new(duration: Duration) -> Self {
        Self {
            state: FadeState::Visible,
            duration,
        }
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> FadeState {
        self.state
    }

    pub(crate) fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    /// Fade out for `request`. A fade already in progress or complete
    /// keeps its progress, so repeated navigation does not flash the image.
    pub(crate) fn start_out(&mut self, request: RequestId, now: Instant) {
        let started = match self.state {
            FadeState::FadingOut { started, .. } => started,
            FadeState::Hidden => now.checked_sub(self.duration).unwrap_or(now),
            _ => now,
        };
        self.state = FadeState::FadingOut { request, started };
    }

    /// Fade back in, starting from whatever is currently covered.
    pub(crate) fn start_in(&mut self, now: Instant) {
        self.state = match self.state {
            FadeState::Visible => FadeState::Visible,
            _ => FadeState::FadingIn { started: now },
        };
    }

    pub(crate) fn reset(&mut self) {
        self.state = FadeState::Visible;
    }

    /// Overlay opacity in `0.0..=1.0` at `now`.
    pub(crate) fn cover(&self, now: Instant) -> f32 {
        match self.state {
            FadeState::Visible => 0.0,
            FadeState::Hidden => 1.0,
            FadeState::FadingOut { started, .. } => self.progress(started, now),
            FadeState::FadingIn { started } => 1.0 - self.progress(started, now),
        }
    }

    /// Advance the animation. Returns the request whose fade-out just
    /// completed, if any.
    pub(crate) fn tick(&mut self, now: Instant) -> Option<RequestId> {
        match self.state {
            FadeState::FadingOut { request, started } if self.progress(started, now) >= 1.0 => {
                self.state = FadeState::Hidden;
                Some(request)
            }
            FadeState::FadingIn { started } if self.progress(started, now) >= 1.0 => {
                self.state = FadeState::Visible;
                None
            }
            _ => None,
        }
    }

    pub(crate) fn is_animating(&self) -> bool {
        matches!(
            self.state,
            FadeState::FadingOut { .. } | FadeState::FadingIn { .. }
        )
    }

    fn progress(&self, started: Instant, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let t = now.saturating_duration_since(started).as_secs_f32() / self.duration.as_secs_f32();
        t.clamp(0.0, 1.0)
    }
}
