//! Where the settings file lives.

use std::path::PathBuf;

/// Overrides every other settings location when set.
pub const SETTINGS_ENV: &str = "MANDELZOOM_SETTINGS";

const SETTINGS_FILE: &str = "settings.json";

/// Directory containing the running executable. Falls back to current directory if unavailable.
pub fn exe_directory() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(PathBuf::from))
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// The per-user config directory, if the platform has one.
fn config_directory() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "MandelZoom").map(|d| d.config_dir().to_path_buf())
}

/// Resolve the settings file: `$MANDELZOOM_SETTINGS`, then the user config
/// directory if a file exists there, then next to the executable.
pub fn settings_path() -> PathBuf {
    if let Some(path) = std::env::var_os(SETTINGS_ENV) {
        return PathBuf::from(path);
    }
    if let Some(path) = config_directory().map(|d| d.join(SETTINGS_FILE)) {
        if path.exists() {
            return path;
        }
    }
    exe_directory().join(SETTINGS_FILE)
}
