use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Instant;

use eframe::egui;
use tracing::{error, info};

use hotspot_tour_core::{Size, StepToken, TourData, Viewer, ViewerOptions};
use hotspot_tour_render::{Overlay, OverlayTransform};

use crate::app_dir;
use crate::app_state::AppScreen;
use crate::fade::Fade;
use crate::image_loader::{spawn_image_loader, LoaderRequest, LoaderResponse};
use crate::preferences::AppPreferences;
use crate::Cli;

pub(crate) const HUD_MARGIN: f32 = 8.0;
pub(crate) const HUD_CORNER_RADIUS: f32 = 6.0;
pub(crate) const STRIP_HEIGHT: f32 = 88.0;
pub(crate) const THUMBNAIL_MAX_SIDE: u32 = 160;
pub(crate) const FALLBACK_MESSAGE: &str = "Image failed to load.";
pub(crate) const NO_CONTENT_MESSAGE: &str = "This tour has no slides to show.";
pub(crate) const STAGE_BACKGROUND: egui::Color32 = egui::Color32::from_rgb(18, 18, 20);

// ---------------------------------------------------------------------------
// Display-side state
// ---------------------------------------------------------------------------

/// The slide image currently uploaded to the GPU.
pub(crate) struct SlideImage {
    pub(crate) texture: egui::TextureHandle,
    pub(crate) natural: Size,
}

/// Popup bookkeeping that lives outside the viewer state machine.
#[derive(Debug, Default)]
pub(crate) struct PopupView {
    /// Hotspot whose popup is on screen; its region gets focus back on close.
    pub(crate) hotspot_id: Option<String>,
    /// Size of the popup as laid out last frame, `None` until measured.
    pub(crate) measured: Option<Size>,
    pub(crate) focus_requested: bool,
}

// ---------------------------------------------------------------------------
// Application
// ---------------------------------------------------------------------------

pub(crate) struct TourApp {
    pub(crate) viewer: Viewer,
    pub(crate) screen: AppScreen,
    pub(crate) tour_path: Option<PathBuf>,
    pub(crate) status: Option<String>,

    pub(crate) loader_tx: mpsc::Sender<LoaderRequest>,
    pub(crate) loader_rx: mpsc::Receiver<LoaderResponse>,

    pub(crate) image: Option<SlideImage>,
    pub(crate) image_error: Option<String>,
    pub(crate) overlay: Option<Overlay>,
    pub(crate) overlay_transform: Option<OverlayTransform>,
    pub(crate) fade: Fade,

    pub(crate) thumbnails: Vec<Option<egui::TextureHandle>>,
    pub(crate) thumbnail_generation: u64,
    /// Slide the strip last scrolled to.
    pub(crate) strip_scrolled_to: Option<usize>,

    pub(crate) popup: PopupView,
    pub(crate) step_deadline: Option<(StepToken, Instant)>,
    /// Overlay region holding keyboard focus (index into `overlay.regions`).
    pub(crate) focused_region: Option<usize>,

    pub(crate) preferences: AppPreferences,
    pub(crate) show_help: bool,
    pub(crate) show_settings: bool,
    pub(crate) show_about: bool,
    pub(crate) menu_bar_height: f32,
    shown_title: String,
}

impl TourApp {
    pub(crate) fn new(egui_ctx: &egui::Context, prefs: AppPreferences, cli: Cli) -> Self {
        let (loader_tx, loader_rx) = spawn_image_loader(egui_ctx.clone());
        let fade = Fade::new(prefs.fade_duration());
        let options = viewer_options(&prefs);

        let mut app = Self {
            viewer: Viewer::new(TourData::default(), options),
            screen: AppScreen::default(),
            tour_path: None,
            status: None,
            loader_tx,
            loader_rx,
            image: None,
            image_error: None,
            overlay: None,
            overlay_transform: None,
            fade,
            thumbnails: Vec::new(),
            thumbnail_generation: 0,
            strip_scrolled_to: None,
            popup: PopupView::default(),
            step_deadline: None,
            focused_region: None,
            preferences: prefs,
            show_help: false,
            show_settings: false,
            show_about: false,
            menu_bar_height: 0.0,
            shown_title: String::new(),
        };

        let path = app_dir::resolve_tour_path(
            cli.tour,
            &app.preferences.last_tour_path,
            &app_dir::exe_directory(),
        );
        app.load_tour(path);

        if let Some(n) = cli.slide.filter(|_| !app.viewer.is_empty()) {
            let last = app.viewer.slide_count() - 1;
            app.viewer.go_to_slide(n.saturating_sub(1).min(last) as isize);
        }
        if cli.autoplay {
            app.viewer.start_tour();
        }
        app.apply_effects();
        app
    }

    /// Replace the current tour with the one at `path`.
    ///
    /// Failures leave an inert viewer and a "no content" screen.
    pub(crate) fn load_tour(&mut self, path: PathBuf) {
        self.reset_display();
        let options = viewer_options(&self.preferences);

        match TourData::load(&path) {
            Ok(data) => {
                info!(path = %path.display(), slides = data.len(), "Loaded tour");
                self.screen = if data.is_empty() {
                    AppScreen::no_content(NO_CONTENT_MESSAGE)
                } else {
                    AppScreen::Viewer
                };
                self.viewer = Viewer::new(data, options);
                self.preferences.last_tour_path = path.to_string_lossy().into_owned();
                self.preferences.save();
                self.status = None;
            }
            Err(e) => {
                error!(path = %path.display(), "Failed to load tour: {e}");
                self.viewer = Viewer::new(TourData::default(), options);
                self.screen = AppScreen::no_content(format!("Could not open {}: {e}", path.display()));
            }
        }
        self.tour_path = Some(path);
        self.request_thumbnails();
        self.apply_effects();
    }

    fn reset_display(&mut self) {
        self.image = None;
        self.image_error = None;
        self.overlay = None;
        self.overlay_transform = None;
        self.fade.reset();
        self.fade.set_duration(self.preferences.fade_duration());
        self.popup = PopupView::default();
        self.step_deadline = None;
        self.focused_region = None;
        self.strip_scrolled_to = None;
    }

    pub(crate) fn window_title(&self) -> String {
        match self.tour_path.as_ref().and_then(|p| p.file_name()) {
            Some(name) => format!("Hotspot Tour - {}", name.to_string_lossy()),
            None => "Hotspot Tour".to_string(),
        }
    }
}

pub(crate) fn viewer_options(prefs: &AppPreferences) -> ViewerOptions {
    ViewerOptions {
        fade: prefs.fade_enabled,
        timing: prefs.tour_timing(),
    }
}

// ---------------------------------------------------------------------------
// eframe::App
// ---------------------------------------------------------------------------

impl eframe::App for TourApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(egui::Visuals::dark());
        let now = Instant::now();
        self.poll_loader(ctx);
        self.poll_timers(now);

        let title = self.window_title();
        if title != self.shown_title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.shown_title = title;
        }

        if self.screen == AppScreen::Viewer {
            self.handle_keyboard(ctx);
        }
        self.draw_menu_bar(ctx);
        if self.screen == AppScreen::Viewer {
            self.draw_thumbnail_strip(ctx);
        }

        match self.screen.clone() {
            AppScreen::Viewer => {
                self.draw_stage(ctx, now);
                self.draw_popup(ctx);
                self.show_slide_info(ctx);
                self.show_top_right_toolbar(ctx);
            }
            AppScreen::NoContent { message } => self.draw_message_screen(ctx, &message),
            AppScreen::Empty => self.draw_message_screen(ctx, "Open a tour file to begin."),
        }

        self.show_help_window(ctx);
        self.show_settings_window(ctx);
        self.draw_about_window(ctx);

        self.schedule_repaint(ctx, now);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.preferences.save();
        info!("Saved preferences on exit");
    }
}

impl TourApp {
    fn draw_message_screen(&mut self, ctx: &egui::Context, message: &str) {
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(STAGE_BACKGROUND))
            .show(ctx, |ui| {
                ui.centered_and_justified(|ui| {
                    ui.label(
                        egui::RichText::new(message)
                            .size(16.0)
                            .color(egui::Color32::from_gray(170)),
                    );
                });
            });
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub(crate) fn run(cli: Cli) -> eframe::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting Hotspot Tour");

    let prefs = AppPreferences::load();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Hotspot Tour")
            .with_inner_size([prefs.window_width, prefs.window_height]),
        ..Default::default()
    };

    eframe::run_native(
        "Hotspot Tour",
        options,
        Box::new(move |cc| {
            egui_material_icons::initialize(&cc.egui_ctx);
            Ok(Box::new(TourApp::new(&cc.egui_ctx, prefs, cli)))
        }),
    )
}
