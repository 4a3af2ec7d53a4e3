//! Directory where the executable lives. Preferences and the default tour
//! are looked up next to the app so it runs as a standalone exe.

use std::path::{Path, PathBuf};

/// File name of the tour loaded when nothing else is specified.
pub const DEFAULT_TOUR_FILE: &str = "tour.json";

/// Directory containing the running executable. Falls back to current directory if unavailable.
pub fn exe_directory() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(PathBuf::from))
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// Pick the tour file to open at startup: the command-line argument, then
/// the last opened tour (if it still exists), then `tour.json` in `app_dir`.
pub fn resolve_tour_path(cli: Option<PathBuf>, last_opened: &str, app_dir: &Path) -> PathBuf {
    if let Some(path) = cli {
        return path;
    }
    let last = Path::new(last_opened.trim());
    if !last_opened.trim().is_empty() && last.is_file() {
        return last.to_path_buf();
    }
    app_dir.join(DEFAULT_TOUR_FILE)
}
