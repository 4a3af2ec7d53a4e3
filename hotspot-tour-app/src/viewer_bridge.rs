use std::time::{Duration, Instant};

use eframe::egui;
use tracing::{debug, error, warn};

use hotspot_tour_core::{Effect, Size, ViewerEvent};
use hotspot_tour_render::build_overlay;

use crate::app::{SlideImage, TourApp, THUMBNAIL_MAX_SIDE};
use crate::image_loader::{LoaderRequest, LoaderResponse};

// ---------------------------------------------------------------------------
// impl TourApp: viewer effects and async completions
// ---------------------------------------------------------------------------

impl TourApp {
    /// Carry out every effect the viewer has queued, including effects
    /// queued while applying them.
    pub(crate) fn apply_effects(&mut self) {
        loop {
            let effects = self.viewer.drain_effects();
            if effects.is_empty() {
                break;
            }
            for effect in effects {
                self.apply_effect(effect);
            }
        }
    }

    fn apply_effect(&mut self, effect: Effect) {
        match effect {
            Effect::PopupOpened { hotspot_id } => {
                debug!(%hotspot_id, "Popup opened");
                self.popup.hotspot_id = Some(hotspot_id);
                self.popup.measured = None;
                self.popup.focus_requested = true;
            }
            Effect::PopupClosed => {
                self.popup.focus_requested = false;
                if let Some(trigger) = self.popup.hotspot_id.take() {
                    self.focus_region_of(&trigger);
                }
            }
            Effect::FadeOut { request } => self.fade.start_out(request, Instant::now()),
            Effect::FadeIn => self.fade.start_in(Instant::now()),
            Effect::LoadImage {
                request,
                slide_index,
                src,
            } => {
                self.overlay = None;
                self.overlay_transform = None;
                self.focused_region = None;
                let path = self.viewer.data().image_path(&src);
                debug!(request = request.0, slide_index, path = %path.display(), "Loading slide image");
                if self
                    .loader_tx
                    .send(LoaderRequest::Image { request, path })
                    .is_err()
                {
                    error!("Image loader is gone");
                    self.viewer.handle_event(ViewerEvent::ImageFailed {
                        request,
                        reason: "image loader is not running".into(),
                    });
                }
            }
            Effect::RebuildOverlay {
                slide_index,
                natural,
            } => {
                let data = self.viewer.data();
                if let Some(slide) = data.slides.get(slide_index) {
                    let overlay = build_overlay(slide, natural, &data.defaults);
                    debug!(slide = %slide.id, regions = overlay.regions.len(), "Overlay rebuilt");
                    self.overlay = Some(overlay);
                }
                self.image_error = None;
                self.focused_region = None;
            }
            Effect::ShowImageError {
                slide_index,
                reason,
            } => {
                warn!(slide_index, "Showing image fallback: {reason}");
                self.image = None;
                self.overlay = None;
                self.overlay_transform = None;
                self.image_error = Some(reason);
            }
            Effect::ScheduleStep { token, delay } => {
                self.step_deadline = Some((token, Instant::now() + delay));
            }
            Effect::CancelStep { token } => {
                if self.step_deadline.is_some_and(|(t, _)| t == token) {
                    self.step_deadline = None;
                }
            }
            Effect::FocusPopup => self.popup.focus_requested = true,
            Effect::TourStateChanged { running } => {
                debug!(running, "Tour state changed");
                if running {
                    self.status = None;
                }
            }
        }
    }

    /// Drain responses from the image loader.
    pub(crate) fn poll_loader(&mut self, ctx: &egui::Context) {
        while let Ok(response) = self.loader_rx.try_recv() {
            match response {
                LoaderResponse::Image { request, result } => match result {
                    Ok(decoded) => {
                        let natural = Size::new(decoded.width as f64, decoded.height as f64);
                        let texture = ctx.load_texture(
                            "slide",
                            decoded.to_color_image(),
                            egui::TextureOptions::LINEAR,
                        );
                        if self
                            .viewer
                            .handle_event(ViewerEvent::ImageLoaded { request, natural })
                        {
                            self.image = Some(SlideImage { texture, natural });
                        } else {
                            debug!(request = request.0, "Discarding stale image");
                        }
                    }
                    Err(reason) => {
                        self.viewer
                            .handle_event(ViewerEvent::ImageFailed { request, reason });
                    }
                },
                LoaderResponse::Thumbnail {
                    generation,
                    index,
                    image,
                } => {
                    if generation != self.thumbnail_generation {
                        continue;
                    }
                    if let Some(slot) = self.thumbnails.get_mut(index) {
                        *slot = Some(ctx.load_texture(
                            format!("thumbnail-{index}"),
                            image.to_color_image(),
                            egui::TextureOptions::LINEAR,
                        ));
                    }
                }
            }
        }
        self.apply_effects();
    }

    /// Advance the fade animation and fire a due tour step.
    pub(crate) fn poll_timers(&mut self, now: Instant) {
        if let Some(request) = self.fade.tick(now) {
            self.viewer
                .handle_event(ViewerEvent::FadeOutFinished { request });
        }
        if let Some((token, due)) = self.step_deadline {
            if now >= due {
                self.step_deadline = None;
                self.viewer.handle_event(ViewerEvent::TimerFired { token });
            }
        }
        self.apply_effects();
    }

    /// Ask for another frame when an animation or timer is pending.
    pub(crate) fn schedule_repaint(&self, ctx: &egui::Context, now: Instant) {
        if self.fade.is_animating() {
            ctx.request_repaint();
        } else if let Some((_, due)) = self.step_deadline {
            ctx.request_repaint_after(due.saturating_duration_since(now).max(Duration::from_millis(1)));
        }
    }

    /// Start decoding strip thumbnails for the loaded tour.
    pub(crate) fn request_thumbnails(&mut self) {
        self.thumbnail_generation += 1;
        let data = self.viewer.data();
        self.thumbnails = vec![None; data.len()];
        if data.is_empty() {
            return;
        }
        let paths = data.slides.iter().map(|s| data.image_path(&s.src)).collect();
        let _ = self.loader_tx.send(LoaderRequest::Thumbnails {
            generation: self.thumbnail_generation,
            paths,
            max_side: THUMBNAIL_MAX_SIDE,
        });
    }
}
