use tracing::{debug, info, warn};

use crate::geometry::Size;
use crate::viewer::{DisplayedImage, Effect, NavPhase, RequestId, Viewer};

impl Viewer {
    /// Navigate to `index`, wrapped into range (negative indices count back
    /// from the end).
    ///
    /// The popup is always closed first, even when `index` is the current
    /// slide. A changed image fades out first when fading is enabled and an
    /// image is already on screen; otherwise it is loaded right away. The
    /// same, already loaded image only gets its overlay rebuilt.
    pub fn go_to_slide(&mut self, index: isize) {
        let total = self.slide_count();
        if total == 0 {
            return;
        }
        let index = index.rem_euclid(total as isize) as usize;
        self.state.current_index = index;
        self.close_popup();

        let src = self.data.slides[index].src.clone();
        let request = self.new_request();
        let changing_image = self.displayed.src() != Some(src.as_str());
        let should_fade = changing_image && self.displayed.src().is_some() && self.options.fade;
        debug!(index, ?request, changing_image, should_fade, "Navigating");

        if should_fade {
            self.phase = NavPhase::FadingOut(request);
            self.emit(Effect::FadeOut { request });
        } else {
            self.apply_new_image(request);
        }
    }

    /// Previous slide, wrapping. Stops a running tour.
    pub fn prev(&mut self) {
        if self.is_empty() {
            return;
        }
        self.stop_tour();
        self.go_to_slide(self.state.current_index as isize - 1);
    }

    /// Next slide, wrapping. Stops a running tour.
    pub fn next(&mut self) {
        if self.is_empty() {
            return;
        }
        self.stop_tour();
        self.go_to_slide(self.state.current_index as isize + 1);
    }

    /// Thumbnail strip selection. Stops a running tour.
    pub fn select_slide(&mut self, index: usize) {
        if self.is_empty() {
            return;
        }
        self.stop_tour();
        self.go_to_slide(index as isize);
    }

    fn new_request(&mut self) -> RequestId {
        self.next_request += 1;
        RequestId(self.next_request)
    }

    /// Swap in the current slide's image, or rebuild the overlay directly
    /// when that image is already loaded.
    fn apply_new_image(&mut self, request: RequestId) {
        let slide_index = self.state.current_index;
        let src = self.data.slides[slide_index].src.clone();

        match &self.displayed {
            DisplayedImage::Loaded { src: shown, natural } if *shown == src => {
                let natural = *natural;
                self.phase = NavPhase::Idle;
                self.emit(Effect::RebuildOverlay {
                    slide_index,
                    natural,
                });
                self.finish_fade();
            }
            _ => {
                self.phase = NavPhase::Loading(request);
                self.emit(Effect::LoadImage {
                    request,
                    slide_index,
                    src,
                });
            }
        }
    }

    fn finish_fade(&mut self) {
        if self.options.fade {
            self.emit(Effect::FadeIn);
        }
    }

    pub(crate) fn on_fade_out_finished(&mut self, request: RequestId) -> bool {
        if self.phase != NavPhase::FadingOut(request) {
            debug!(?request, "Ignoring stale fade completion");
            return false;
        }
        self.apply_new_image(request);
        true
    }

    pub(crate) fn on_image_loaded(&mut self, request: RequestId, natural: Size) -> bool {
        if self.phase != NavPhase::Loading(request) {
            debug!(?request, "Ignoring stale image load");
            return false;
        }
        let slide_index = self.state.current_index;
        let src = self.data.slides[slide_index].src.clone();
        info!(
            slide = slide_index,
            width = natural.width,
            height = natural.height,
            "Image loaded: {src}"
        );
        self.displayed = DisplayedImage::Loaded { src, natural };
        self.phase = NavPhase::Idle;
        self.emit(Effect::RebuildOverlay {
            slide_index,
            natural,
        });
        self.finish_fade();
        true
    }

    pub(crate) fn on_image_failed(&mut self, request: RequestId, reason: String) -> bool {
        if self.phase != NavPhase::Loading(request) {
            debug!(?request, "Ignoring stale image failure");
            return false;
        }
        let slide_index = self.state.current_index;
        let src = self.data.slides[slide_index].src.clone();
        warn!(slide = slide_index, "Image failed to load: {src}: {reason}");
        self.displayed = DisplayedImage::Failed { src };
        self.phase = NavPhase::Idle;
        self.emit(Effect::ShowImageError {
            slide_index,
            reason,
        });
        self.finish_fade();
        true
    }
}
