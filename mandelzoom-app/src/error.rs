use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the controller and the driver binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] mandelzoom_core::CoreError),

    #[error(transparent)]
    Render(#[from] mandelzoom_render::RenderError),

    #[error("failed to access settings file {}: {source}", path.display())]
    SettingsIo {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse settings file {}: {source}", path.display())]
    SettingsParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid gesture '{0}' (expected `x0,y0,x1,y1` or `reset`)")]
    Usage(String),
}
