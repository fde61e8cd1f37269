use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use mandelzoom_core::{KernelParams, PlaneBounds};
use mandelzoom_render::CosinePalette;

use crate::error::AppError;

// ---------------------------------------------------------------------------
// Session settings
// ---------------------------------------------------------------------------

/// Fixed for the lifetime of a session. Missing fields take their defaults,
/// so a settings file only needs the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Pixels per side of the square view.
    #[serde(default = "default_size")]
    pub size: u32,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
    #[serde(default = "default_escape_radius")]
    pub escape_radius: f64,
    /// Window shown on startup and restored by a reset.
    #[serde(default)]
    pub default_bounds: PlaneBounds,
    #[serde(default)]
    pub palette: CosinePalette,
    /// Pin the worker count; `None` uses one worker per core.
    #[serde(default)]
    pub threads: Option<usize>,
}

fn default_size() -> u32 {
    600
}
fn default_max_iterations() -> u32 {
    KernelParams::DEFAULT_MAX_ITERATIONS
}
fn default_escape_radius() -> f64 {
    KernelParams::DEFAULT_ESCAPE_RADIUS
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            size: default_size(),
            max_iterations: default_max_iterations(),
            escape_radius: default_escape_radius(),
            default_bounds: PlaneBounds::DEFAULT,
            palette: CosinePalette::default(),
            threads: None,
        }
    }
}

impl Settings {
    /// Load from the resolved settings path, falling back to defaults.
    pub fn load() -> Self {
        let path = crate::app_dir::settings_path();
        if !path.exists() {
            debug!("No settings file at {}", path.display());
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(settings) => {
                info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                error!("{e}; using defaults");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, AppError> {
        let json = fs::read_to_string(path).map_err(|source| AppError::SettingsIo {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| AppError::SettingsParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save_to(&self, path: &Path) -> Result<(), AppError> {
        let io_err = |source| AppError::SettingsIo {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|source| {
            AppError::SettingsParse {
                path: path.to_path_buf(),
                source,
            }
        })?;
        fs::write(path, json).map_err(io_err)?;
        debug!("Saved settings to {}", path.display());
        Ok(())
    }

    /// Validated iteration parameters for the kernel.
    pub fn kernel_params(&self) -> mandelzoom_core::Result<KernelParams> {
        KernelParams::new(self.max_iterations, self.escape_radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("mandelzoom-settings-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn defaults_match_a_full_view_session() {
        let s = Settings::default();
        assert_eq!(s.size, 600);
        assert_eq!(s.max_iterations, 6000);
        assert_eq!(s.default_bounds, PlaneBounds::DEFAULT);
        assert_eq!(s.threads, None);
        assert!(s.kernel_params().is_ok());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let s: Settings = serde_json::from_str(r#"{ "size": 300, "threads": 2 }"#).unwrap();
        assert_eq!(s.size, 300);
        assert_eq!(s.threads, Some(2));
        assert_eq!(s.max_iterations, 6000);
        assert_eq!(s.palette, CosinePalette::default());
    }

    #[test]
    fn inverted_default_bounds_are_rejected() {
        let json = r#"{ "default_bounds": { "re_min": 1.0, "im_min": 0.0, "re_max": 0.0, "im_max": 1.0 } }"#;
        assert!(serde_json::from_str::<Settings>(json).is_err());
    }

    #[test]
    fn zero_iterations_fail_validation() {
        let s = Settings {
            max_iterations: 0,
            ..Settings::default()
        };
        assert!(s.kernel_params().unwrap_err().is_invalid_argument());
    }

    #[test]
    fn save_then_load_from_disk() {
        let path = temp_path("roundtrip.json");
        let s = Settings {
            size: 256,
            palette: CosinePalette::new(1.0, 0.5, 0.25),
            ..Settings::default()
        };
        s.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path).unwrap(), s);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn unreadable_and_malformed_files_are_reported() {
        let missing = temp_path("does-not-exist.json");
        assert!(matches!(
            Settings::load_from(&missing),
            Err(AppError::SettingsIo { .. })
        ));

        let bad = temp_path("malformed.json");
        fs::create_dir_all(bad.parent().unwrap()).unwrap();
        fs::write(&bad, "{ size: ").unwrap();
        assert!(matches!(
            Settings::load_from(&bad),
            Err(AppError::SettingsParse { .. })
        ));
        let _ = fs::remove_file(&bad);
    }
}
