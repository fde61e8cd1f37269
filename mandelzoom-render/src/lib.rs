pub mod error;
pub mod grid;
pub mod kernel;
pub mod palette;

pub use error::RenderError;
pub use grid::RgbGrid;
pub use kernel::{compute, compute_in, render, worker_pool, RenderCancel, RenderReport};
pub use palette::{CosinePalette, Palette};

/// Convenience result type for the render crate.
pub type Result<T> = std::result::Result<T, RenderError>;
