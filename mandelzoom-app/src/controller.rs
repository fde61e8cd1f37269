use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use mandelzoom_core::{CoreError, Mandelbrot, PixelRect, PlaneBounds};
use mandelzoom_render::{render, worker_pool, CosinePalette, RenderCancel, RenderReport, RgbGrid};

use crate::error::AppError;
use crate::selection::Selection;
use crate::settings::Settings;

// ---------------------------------------------------------------------------
// Display boundary
// ---------------------------------------------------------------------------

/// What the controller knows about a frame it just presented.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    pub bounds: PlaneBounds,
    /// Magnification relative to the session's default window.
    pub zoom: f64,
    /// Kernel wall time; zero for frames served from the cache.
    pub elapsed: Duration,
    pub escaped_pixels: usize,
    /// `true` when the frame is the cached initial render.
    pub cached: bool,
}

impl FrameReport {
    fn rendered(bounds: PlaneBounds, default: &PlaneBounds, render: &RenderReport) -> Self {
        Self {
            bounds,
            zoom: bounds.zoom_relative_to(default),
            elapsed: render.elapsed,
            escaped_pixels: render.escaped_pixels,
            cached: false,
        }
    }

    /// Window title text, e.g. `3.00e1X Zoom - Time: 0.412 secs`.
    pub fn title(&self) -> String {
        format!(
            "{:.2e}X Zoom - Time: {:.3} secs",
            self.zoom,
            self.elapsed.as_secs_f64()
        )
    }
}

/// Whatever shows frames to the user: a window, a test recorder, a log.
pub trait FrameSink {
    fn present(&mut self, frame: &RgbGrid, report: &FrameReport);
}

/// Presents frames by logging their report.
#[derive(Debug, Default)]
pub struct LogSink {
    pub frames_presented: usize,
}

impl FrameSink for LogSink {
    fn present(&mut self, frame: &RgbGrid, report: &FrameReport) {
        self.frames_presented += 1;
        info!(
            frame = self.frames_presented,
            size = frame.size,
            bounds = %report.bounds,
            escaped = report.escaped_pixels,
            cached = report.cached,
            "{}",
            report.title()
        );
    }
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Owns the session: current bounds, the cached initial frame, and the sink.
///
/// Bounds are only replaced after a frame for them has rendered, so a
/// rejected selection or a cancelled render leaves the view unchanged.
pub struct ViewportController<S: FrameSink> {
    size: u32,
    fractal: Mandelbrot,
    palette: CosinePalette,
    default_bounds: PlaneBounds,
    bounds: PlaneBounds,
    initial_frame: RgbGrid,
    pool: Option<rayon::ThreadPool>,
    cancel: Arc<RenderCancel>,
    sink: S,
}

impl<S: FrameSink> ViewportController<S> {
    /// Render the default window once, cache it, and present it.
    pub fn new(settings: &Settings, sink: S) -> Result<Self, AppError> {
        if settings.size == 0 {
            return Err(CoreError::InvalidGridSize(settings.size).into());
        }
        let fractal = Mandelbrot::new(settings.kernel_params()?);
        let pool = settings.threads.map(worker_pool).transpose()?;

        let mut controller = Self {
            size: settings.size,
            fractal,
            palette: settings.palette,
            default_bounds: settings.default_bounds,
            bounds: settings.default_bounds,
            initial_frame: RgbGrid::new(0),
            pool,
            cancel: Arc::new(RenderCancel::new()),
            sink,
        };

        let (frame, stats) = controller.render_frame(&controller.default_bounds)?;
        let report = FrameReport::rendered(
            controller.default_bounds,
            &controller.default_bounds,
            &stats,
        );
        controller.sink.present(&frame, &report);
        controller.initial_frame = frame;
        info!(
            size = controller.size,
            max_iterations = settings.max_iterations,
            threads = ?settings.threads,
            "Viewport ready"
        );
        Ok(controller)
    }

    fn render_frame(&self, bounds: &PlaneBounds) -> Result<(RgbGrid, RenderReport), AppError> {
        let (fractal, palette, size) = (&self.fractal, &self.palette, self.size);
        let cancel: &RenderCancel = &self.cancel;
        let run = move || render(fractal, palette, bounds, size, cancel);
        let out = match &self.pool {
            Some(pool) => pool.install(run),
            None => run(),
        }?;
        Ok(out)
    }

    /// Zoom into a pixel-space box of the current view and present the result.
    pub fn compute_and_display(&mut self, rect: PixelRect) -> Result<FrameReport, AppError> {
        let next = match self.bounds.select(rect, self.size) {
            Ok(next) => next,
            Err(e) => {
                warn!(%rect, "Selection rejected: {e}");
                return Err(e.into());
            }
        };
        debug!(%rect, from = %self.bounds, to = %next, "Zooming");

        let (frame, stats) = self.render_frame(&next)?;
        self.bounds = next;
        let report = FrameReport::rendered(next, &self.default_bounds, &stats);
        self.sink.present(&frame, &report);
        Ok(report)
    }

    /// Finish a drag gesture and zoom into it.
    pub fn release(&mut self, selection: Selection) -> Result<FrameReport, AppError> {
        self.compute_and_display(selection.release())
    }

    /// Return to the default window, re-presenting the cached first frame.
    pub fn reset(&mut self) -> FrameReport {
        self.bounds = self.default_bounds;
        let report = FrameReport {
            bounds: self.default_bounds,
            zoom: 1.0,
            elapsed: Duration::ZERO,
            escaped_pixels: self.initial_frame.colored_count(),
            cached: true,
        };
        debug!("Reset to default view");
        self.sink.present(&self.initial_frame, &report);
        report
    }

    pub fn bounds(&self) -> PlaneBounds {
        self.bounds
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Handle for aborting an in-flight render from another thread.
    pub fn canceller(&self) -> Arc<RenderCancel> {
        Arc::clone(&self.cancel)
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
