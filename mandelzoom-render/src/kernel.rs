use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use rayon::prelude::*;
use tracing::{debug, info};

use mandelzoom_core::{CoreError, EscapeTime, Fractal, KernelParams, Mandelbrot, PlaneBounds};

use crate::error::RenderError;
use crate::grid::{RgbGrid, CHANNELS};
use crate::palette::{CosinePalette, Palette};

// ---------------------------------------------------------------------------
// Cancellation
// ---------------------------------------------------------------------------

/// Tracks the current render generation for cancellation and progress.
///
/// Incrementing the generation makes every in-flight render skip its
/// remaining rows and return [`RenderError::Cancelled`]. Rows already in
/// progress finish first; the check happens between rows.
#[derive(Debug)]
pub struct RenderCancel {
    generation: AtomicU64,
    rows_done: AtomicUsize,
    rows_total: AtomicUsize,
}

impl RenderCancel {
    pub fn new() -> Self {
        Self {
            generation: AtomicU64::new(0),
            rows_done: AtomicUsize::new(0),
            rows_total: AtomicUsize::new(0),
        }
    }

    /// Cancel whatever is rendering by advancing the generation.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    fn reset_progress(&self, total: usize) {
        self.rows_total.store(total, Ordering::Relaxed);
        self.rows_done.store(0, Ordering::Relaxed);
    }

    fn inc_progress(&self) {
        self.rows_done.fetch_add(1, Ordering::Relaxed);
    }

    /// Rows finished by the latest render, as `(done, total)`.
    pub fn progress(&self) -> (usize, usize) {
        (
            self.rows_done.load(Ordering::Relaxed),
            self.rows_total.load(Ordering::Relaxed),
        )
    }
}

impl Default for RenderCancel {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Diagnostics for one completed render, returned alongside the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderReport {
    pub elapsed: Duration,
    pub rows_rendered: usize,
    /// Pixels whose orbit escaped (and were therefore colored).
    pub escaped_pixels: usize,
}

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

/// Fill one row of the grid. Bounded pixels are left untouched (black).
///
/// Returns the number of escaped pixels.
#[inline]
fn render_row<F: Fractal, P: Palette>(
    fractal: &F,
    palette: &P,
    bounds: &PlaneBounds,
    size: u32,
    y: u32,
    row: &mut [u8],
) -> usize {
    let mut escaped = 0;
    for (x, px) in row.chunks_exact_mut(CHANNELS).enumerate() {
        let c = bounds.pixel_to_complex(x as u32, y, size);
        if let EscapeTime::Escaped { iteration } = fractal.escape_time(c) {
            px.copy_from_slice(&palette.color(iteration));
            escaped += 1;
        }
    }
    escaped
}

// ---------------------------------------------------------------------------
// Full frame
// ---------------------------------------------------------------------------

/// Render a full `size × size` frame on the current rayon pool.
///
/// Each row is an independent task writing into its own slice of a freshly
/// allocated grid, so the output does not depend on how rows are scheduled.
/// The grid is returned only after every row has finished.
pub fn render<F: Fractal + Sync, P: Palette>(
    fractal: &F,
    palette: &P,
    bounds: &PlaneBounds,
    size: u32,
    cancel: &RenderCancel,
) -> crate::Result<(RgbGrid, RenderReport)> {
    if size == 0 {
        return Err(CoreError::InvalidGridSize(size).into());
    }

    let start = Instant::now();
    let gen = cancel.generation();
    let mut grid = RgbGrid::new(size);
    let stride = grid.stride();
    cancel.reset_progress(size as usize);

    debug!(
        size,
        max_iterations = fractal.params().max_iterations,
        bounds = %bounds,
        threads = rayon::current_num_threads(),
        "Starting render"
    );

    let escaped_pixels: usize = grid
        .pixels
        .par_chunks_mut(stride)
        .enumerate()
        .map(|(y, row)| {
            if cancel.generation() != gen {
                return 0;
            }
            let escaped = render_row(fractal, palette, bounds, size, y as u32, row);
            cancel.inc_progress();
            escaped
        })
        .sum();

    let (rows_done, rows_total) = cancel.progress();
    if cancel.generation() != gen {
        debug!(rows_done, rows_total, "Render cancelled");
        return Err(RenderError::Cancelled {
            rows_done,
            rows_total,
        });
    }

    let elapsed = start.elapsed();
    info!(
        elapsed_ms = elapsed.as_millis(),
        size, escaped_pixels, "Render complete"
    );

    Ok((
        grid,
        RenderReport {
            elapsed,
            rows_rendered: rows_done,
            escaped_pixels,
        },
    ))
}

/// Render the Mandelbrot set with the smooth cosine palette and a radius of 2.
///
/// Fails with an invalid-argument [`CoreError`] when `size` or `max_iter`
/// is zero.
pub fn compute(bounds: &PlaneBounds, size: u32, max_iter: u32) -> crate::Result<RgbGrid> {
    let fractal = Mandelbrot::new(KernelParams::with_max_iterations(max_iter)?);
    let (grid, _) = render(
        &fractal,
        &CosinePalette::default(),
        bounds,
        size,
        &RenderCancel::new(),
    )?;
    Ok(grid)
}

/// [`compute`] on an explicit worker pool instead of the global one.
pub fn compute_in(
    pool: &rayon::ThreadPool,
    bounds: &PlaneBounds,
    size: u32,
    max_iter: u32,
) -> crate::Result<RgbGrid> {
    pool.install(|| compute(bounds, size, max_iter))
}

/// Build a dedicated pool with `threads` workers.
pub fn worker_pool(threads: usize) -> crate::Result<rayon::ThreadPool> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("mandelzoom-worker-{i}"))
        .build()?;
    Ok(pool)
}
