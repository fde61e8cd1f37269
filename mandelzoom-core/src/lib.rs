pub mod bounds;
pub mod complex;
pub mod error;
pub mod escape;

// Re-export primary types for convenience.
pub use bounds::{PixelRect, PlaneBounds};
pub use complex::Complex;
pub use error::CoreError;
pub use escape::{EscapeTime, Fractal, KernelParams, Mandelbrot};

/// Convenience result type for the core crate.
pub type Result<T> = std::result::Result<T, CoreError>;
