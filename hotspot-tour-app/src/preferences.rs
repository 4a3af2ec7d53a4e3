use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use hotspot_tour_core::TourTiming;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

// ---------------------------------------------------------------------------
// Application preferences
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppPreferences {
    #[serde(default = "default_window_width")]
    pub window_width: f32,
    #[serde(default = "default_window_height")]
    pub window_height: f32,
    /// Cross-fade the image area when the slide image changes.
    #[serde(default = "default_true")]
    pub fade_enabled: bool,
    /// Duration of each half of the cross-fade.
    #[serde(default = "default_fade_duration_ms")]
    pub fade_duration_ms: u64,
    /// Auto tour: how long each hotspot popup stays open.
    #[serde(default = "default_hotspot_dwell_ms")]
    pub hotspot_dwell_ms: u64,
    /// Auto tour: pause on a slide before its first hotspot.
    #[serde(default = "default_empty_slide_delay_ms")]
    pub empty_slide_delay_ms: u64,
    /// Tour file opened last. Empty when none.
    #[serde(default)]
    pub last_tour_path: String,
    /// Show the key hints line under the toolbar.
    #[serde(default = "default_true")]
    pub show_help_hints: bool,
    /// Popup width assumed for side selection before the popup was measured.
    #[serde(default = "default_popup_width_hint")]
    pub popup_width_hint: f32,
}

fn default_window_width() -> f32 {
    1280.0
}
fn default_window_height() -> f32 {
    800.0
}
fn default_true() -> bool {
    true
}
fn default_fade_duration_ms() -> u64 {
    125
}
fn default_hotspot_dwell_ms() -> u64 {
    5000
}
fn default_empty_slide_delay_ms() -> u64 {
    2000
}
fn default_popup_width_hint() -> f32 {
    380.0
}

impl Default for AppPreferences {
    fn default() -> Self {
        Self {
            window_width: default_window_width(),
            window_height: default_window_height(),
            fade_enabled: true,
            fade_duration_ms: default_fade_duration_ms(),
            hotspot_dwell_ms: default_hotspot_dwell_ms(),
            empty_slide_delay_ms: default_empty_slide_delay_ms(),
            last_tour_path: String::new(),
            show_help_hints: true,
            popup_width_hint: default_popup_width_hint(),
        }
    }
}

impl AppPreferences {
    /// Load preferences from next to the executable, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(json) => match serde_json::from_str::<AppPreferences>(&json) {
                    Ok(prefs) => {
                        info!("Loaded preferences from {}", path.display());
                        return prefs;
                    }
                    Err(e) => {
                        error!("Failed to parse preferences: {e}");
                    }
                },
                Err(e) => {
                    error!("Failed to read preferences file: {e}");
                }
            }
        } else {
            debug!("No preferences file at {}", path.display());
        }
        Self::default()
    }

    /// Persist preferences to disk.
    pub fn save(&self) {
        self.save_to(&config_path());
    }

    pub fn save_to(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                error!("Failed to create config directory: {e}");
                return;
            }
        }
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = fs::write(path, &json) {
                    error!("Failed to write preferences: {e}");
                } else {
                    debug!("Saved preferences");
                }
            }
            Err(e) => error!("Failed to serialize preferences: {e}"),
        }
    }

    pub fn tour_timing(&self) -> TourTiming {
        TourTiming {
            hotspot_dwell: Duration::from_millis(self.hotspot_dwell_ms.max(1)),
            empty_slide: Duration::from_millis(self.empty_slide_delay_ms.max(1)),
        }
    }

    pub fn fade_duration(&self) -> Duration {
        Duration::from_millis(self.fade_duration_ms)
    }
}

fn config_path() -> PathBuf {
    crate::app_dir::exe_directory().join("preferences.json")
}
