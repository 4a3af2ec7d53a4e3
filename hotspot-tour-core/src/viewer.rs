//! The viewer state machine.
//!
//! [`Viewer`] owns the single mutable [`ViewerState`] and is driven by
//! commands (navigation, hotspot clicks, tour control, keys) and by
//! [`ViewerEvent`]s reporting the completion of asynchronous work. Every
//! side effect the display surface must perform is queued as an
//! [`Effect`], in the order it happened, and drained by the shell.
//!
//! Navigation lives in `navigator.rs`, the auto tour in `tour.rs`.

use std::time::Duration;

use tracing::debug;

use crate::data::TourData;
use crate::geometry::{effective_natural_size, resolve_hotspot, Size};
use crate::model::Slide;
use crate::tour::TourTiming;

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// Identifies one navigation request (fade + image load).
///
/// Completions carrying an older id are stale and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

/// Identifies one scheduled auto-tour step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StepToken(pub u64);

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// The mutable viewer state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewerState {
    /// Always `< slide count` when there is at least one slide.
    pub current_index: usize,
    /// The hotspot whose popup is open. Always a hotspot of the current slide.
    pub active_hotspot_id: Option<String>,
    pub auto_tour_active: bool,
    /// Position within the current slide's deduplicated hotspot list.
    pub auto_tour_hotspot_index: usize,
}

/// Navigation phase of the image area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavPhase {
    /// Showing the current slide (or its load error).
    Idle,
    /// The fade overlay is darkening before the image swap.
    FadingOut(RequestId),
    /// Waiting for the current slide's image to load.
    Loading(RequestId),
}

/// What the image area currently displays.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum DisplayedImage {
    None,
    Loaded { src: String, natural: Size },
    Failed { src: String },
}

impl DisplayedImage {
    pub(crate) fn src(&self) -> Option<&str> {
        match self {
            Self::None => None,
            Self::Loaded { src, .. } | Self::Failed { src } => Some(src),
        }
    }
}

// ---------------------------------------------------------------------------
// Events and effects
// ---------------------------------------------------------------------------

/// Completion of asynchronous work started by an [`Effect`].
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerEvent {
    ImageLoaded { request: RequestId, natural: Size },
    ImageFailed { request: RequestId, reason: String },
    FadeOutFinished { request: RequestId },
    TimerFired { token: StepToken },
}

/// A side effect the display surface must carry out.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Show the popup for this hotspot of the current slide and place it.
    PopupOpened { hotspot_id: String },
    /// Hide the popup and return focus to its trigger.
    PopupClosed,
    /// Start fading the image area out; report [`ViewerEvent::FadeOutFinished`].
    FadeOut { request: RequestId },
    /// Start loading an image; report `ImageLoaded` or `ImageFailed`.
    LoadImage {
        request: RequestId,
        slide_index: usize,
        src: String,
    },
    /// Fit the image container and replace the overlay with a fresh one.
    RebuildOverlay { slide_index: usize, natural: Size },
    /// Replace the image with a fallback message and drop the overlay.
    ShowImageError { slide_index: usize, reason: String },
    /// Fade the image area back in.
    FadeIn,
    /// Fire [`ViewerEvent::TimerFired`] with `token` after `delay`.
    ScheduleStep { token: StepToken, delay: Duration },
    /// Drop the timer for `token`.
    CancelStep { token: StepToken },
    /// Move keyboard focus back into the open popup.
    FocusPopup,
    TourStateChanged { running: bool },
}

/// Keys the viewer reacts to. Enter/Space activation of a focused region
/// goes through [`Viewer::click_hotspot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerKey {
    ArrowLeft,
    ArrowRight,
    Escape,
    Tab,
}

/// Construction options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerOptions {
    /// Whether a fade overlay is available for image changes.
    pub fade: bool,
    pub timing: TourTiming,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            fade: true,
            timing: TourTiming::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Viewer
// ---------------------------------------------------------------------------

pub struct Viewer {
    pub(crate) data: TourData,
    pub(crate) state: ViewerState,
    pub(crate) phase: NavPhase,
    pub(crate) displayed: DisplayedImage,
    pub(crate) options: ViewerOptions,
    pub(crate) next_request: u64,
    pub(crate) pending_step: Option<StepToken>,
    pub(crate) next_token: u64,
    effects: Vec<Effect>,
}

impl Viewer {
    /// Create a viewer and navigate to the first slide.
    ///
    /// With no slides the viewer is inert: every command is a no-op.
    pub fn new(data: TourData, options: ViewerOptions) -> Self {
        let mut viewer = Self {
            data,
            state: ViewerState::default(),
            phase: NavPhase::Idle,
            displayed: DisplayedImage::None,
            options,
            next_request: 0,
            pending_step: None,
            next_token: 0,
            effects: Vec::new(),
        };
        if !viewer.is_empty() {
            viewer.go_to_slide(0);
        }
        viewer
    }

    // -- Accessors ---------------------------------------------------------

    pub fn data(&self) -> &TourData {
        &self.data
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    pub fn phase(&self) -> NavPhase {
        self.phase
    }

    pub fn options(&self) -> &ViewerOptions {
        &self.options
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn slide_count(&self) -> usize {
        self.data.len()
    }

    pub fn current_slide(&self) -> Option<&Slide> {
        self.data.slides.get(self.state.current_index)
    }

    pub fn popup_open(&self) -> bool {
        self.state.active_hotspot_id.is_some()
    }

    pub fn tour_running(&self) -> bool {
        self.state.auto_tour_active
    }

    pub fn pending_step(&self) -> Option<StepToken> {
        self.pending_step
    }

    /// Prev/next only make sense with more than one slide.
    pub fn can_step(&self) -> bool {
        self.slide_count() > 1
    }

    /// Natural size of the current slide's image, once it has loaded.
    pub fn current_image_size(&self) -> Option<Size> {
        if self.phase != NavPhase::Idle {
            return None;
        }
        let slide = self.current_slide()?;
        match &self.displayed {
            DisplayedImage::Loaded { src, natural } if *src == slide.src => Some(*natural),
            _ => None,
        }
    }

    pub fn current_image_failed(&self) -> bool {
        self.phase == NavPhase::Idle
            && matches!(&self.displayed, DisplayedImage::Failed { src }
                if self.current_slide().is_some_and(|s| s.src == *src))
    }

    /// Take every queued effect, oldest first.
    pub fn drain_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    pub(crate) fn emit(&mut self, effect: Effect) {
        debug!(?effect, "Viewer effect");
        self.effects.push(effect);
    }

    /// Whether `hotspot_id` currently has a region in the overlay.
    pub fn hotspot_rendered(&self, hotspot_id: &str) -> bool {
        let (Some(slide), Some(natural)) = (self.current_slide(), self.current_image_size()) else {
            return false;
        };
        slide.hotspot(hotspot_id).is_some_and(|h| {
            resolve_hotspot(h, effective_natural_size(natural), &self.data.defaults).is_ok()
        })
    }

    // -- Popup / hotspot activation ----------------------------------------

    /// A manual click (or Enter/Space) on a hotspot region.
    ///
    /// Stops a running tour. Clicking the hotspot whose popup is open
    /// closes it instead of reopening. Returns `false` when the hotspot
    /// has no region in the current overlay.
    pub fn click_hotspot(&mut self, hotspot_id: &str) -> bool {
        if !self.hotspot_rendered(hotspot_id) {
            debug!(hotspot_id, "Ignoring click on hotspot without a region");
            return false;
        }
        let was_active = self.state.active_hotspot_id.as_deref() == Some(hotspot_id);
        self.stop_tour();
        if was_active {
            self.close_popup();
        } else {
            self.open_hotspot(hotspot_id);
        }
        true
    }

    /// Highlight a hotspot of the current slide and open its popup.
    pub(crate) fn open_hotspot(&mut self, hotspot_id: &str) {
        if self.current_slide().and_then(|s| s.hotspot(hotspot_id)).is_none() {
            return;
        }
        self.state.active_hotspot_id = Some(hotspot_id.to_string());
        self.emit(Effect::PopupOpened {
            hotspot_id: hotspot_id.to_string(),
        });
    }

    /// Close the popup and clear the active highlight.
    pub fn close_popup(&mut self) {
        if self.state.active_hotspot_id.take().is_some() {
            self.emit(Effect::PopupClosed);
        }
    }

    /// A pointer click outside the popup content.
    ///
    /// Only manually opened popups are dismissed this way; popups opened
    /// by the running tour stay until the tour moves on.
    pub fn click_outside_popup(&mut self) {
        if !self.state.auto_tour_active {
            self.close_popup();
        }
    }

    // -- Keyboard ----------------------------------------------------------

    /// Route a key press. Returns `true` when the key was consumed.
    pub fn handle_key(&mut self, key: ViewerKey) -> bool {
        if self.is_empty() {
            return false;
        }
        match key {
            ViewerKey::Escape => {
                if self.state.auto_tour_active {
                    self.stop_tour();
                    true
                } else if self.popup_open() {
                    self.close_popup();
                    true
                } else {
                    false
                }
            }
            ViewerKey::ArrowLeft | ViewerKey::ArrowRight if !self.popup_open() => {
                if key == ViewerKey::ArrowLeft {
                    self.prev();
                } else {
                    self.next();
                }
                true
            }
            ViewerKey::ArrowLeft | ViewerKey::ArrowRight => false,
            ViewerKey::Tab => {
                if self.popup_open() {
                    self.emit(Effect::FocusPopup);
                    true
                } else {
                    false
                }
            }
        }
    }

    // -- Events ------------------------------------------------------------

    /// Feed the completion of asynchronous work back into the viewer.
    ///
    /// Returns `false` when the event was stale and ignored.
    pub fn handle_event(&mut self, event: ViewerEvent) -> bool {
        match event {
            ViewerEvent::ImageLoaded { request, natural } => self.on_image_loaded(request, natural),
            ViewerEvent::ImageFailed { request, reason } => self.on_image_failed(request, reason),
            ViewerEvent::FadeOutFinished { request } => self.on_fade_out_finished(request),
            ViewerEvent::TimerFired { token } => self.on_timer_fired(token),
        }
    }
}
