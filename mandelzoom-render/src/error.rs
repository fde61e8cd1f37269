use thiserror::Error;

/// Errors originating from the fractal kernel.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("render cancelled after {rows_done} of {rows_total} rows")]
    Cancelled { rows_done: usize, rows_total: usize },

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error(transparent)]
    Core(#[from] mandelzoom_core::CoreError),
}
