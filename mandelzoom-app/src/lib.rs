//! Viewport controller: turns drag gestures into new plane bounds, drives
//! the kernel, and hands finished frames to a display surface.

pub mod app_dir;
pub mod controller;
pub mod error;
pub mod gesture;
pub mod selection;
pub mod settings;

pub use controller::{FrameReport, FrameSink, LogSink, ViewportController};
pub use error::AppError;
pub use gesture::Gesture;
pub use selection::Selection;
pub use settings::Settings;
