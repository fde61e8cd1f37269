use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::complex::Complex;
use crate::error::{check_grid_size, CoreError};

/// Pixel steps closer than this many ULPs of the coordinates lose detail.
const PRECISION_MARGIN_ULPS: f64 = 1024.0;

/// The rectangle of the complex plane mapped onto a square pixel grid.
///
/// Pixel `(x, y)` samples the point
/// `(re_min + re_span·x/size, im_min + im_span·y/size)`: `x` runs along the
/// real axis, `y` along the imaginary axis, and `(0, 0)` is the top-left
/// pixel. [`select`](Self::select) and [`complex_to_pixel`](Self::complex_to_pixel)
/// use the exact same scale factors, so zooming never drifts or mirrors.
///
/// Always non-degenerate: every constructor (including deserialization)
/// checks `re_max > re_min` and `im_max > im_min`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlaneBounds {
    re_min: f64,
    im_min: f64,
    re_max: f64,
    im_max: f64,
}

/// Deserialize through [`PlaneBounds::new`] so a settings file can never
/// smuggle in an inverted rectangle.
impl<'de> Deserialize<'de> for PlaneBounds {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            re_min: f64,
            im_min: f64,
            re_max: f64,
            im_max: f64,
        }
        let raw = Raw::deserialize(deserializer)?;
        Self::new(raw.re_min, raw.im_min, raw.re_max, raw.im_max)
            .map_err(serde::de::Error::custom)
    }
}

impl PlaneBounds {
    /// The full view of the set: `[-2.0, 1.0] × [-1.5, 1.5]`.
    pub const DEFAULT: Self = Self {
        re_min: -2.0,
        im_min: -1.5,
        re_max: 1.0,
        im_max: 1.5,
    };

    pub fn new(re_min: f64, im_min: f64, re_max: f64, im_max: f64) -> crate::Result<Self> {
        let corners = [re_min, im_min, re_max, im_max];
        if corners.iter().any(|v| !v.is_finite()) {
            return Err(CoreError::InvalidBounds {
                reason: format!("corners must be finite, got {corners:?}"),
            });
        }
        if re_max <= re_min {
            return Err(CoreError::InvalidBounds {
                reason: format!("re_max ({re_max}) must exceed re_min ({re_min})"),
            });
        }
        if im_max <= im_min {
            return Err(CoreError::InvalidBounds {
                reason: format!("im_max ({im_max}) must exceed im_min ({im_min})"),
            });
        }
        if !(re_max - re_min).is_finite() || !(im_max - im_min).is_finite() {
            return Err(CoreError::InvalidBounds {
                reason: "span overflows f64".to_string(),
            });
        }
        Ok(Self {
            re_min,
            im_min,
            re_max,
            im_max,
        })
    }

    #[inline]
    pub fn re_min(&self) -> f64 {
        self.re_min
    }

    #[inline]
    pub fn im_min(&self) -> f64 {
        self.im_min
    }

    #[inline]
    pub fn re_max(&self) -> f64 {
        self.re_max
    }

    #[inline]
    pub fn im_max(&self) -> f64 {
        self.im_max
    }

    /// Width of the window along the real axis.
    #[inline]
    pub fn re_span(&self) -> f64 {
        self.re_max - self.re_min
    }

    /// Height of the window along the imaginary axis.
    #[inline]
    pub fn im_span(&self) -> f64 {
        self.im_max - self.im_min
    }

    /// `(re_min, im_min, re_max, im_max)` in the order the kernel takes them.
    pub fn to_array(&self) -> [f64; 4] {
        [self.re_min, self.im_min, self.re_max, self.im_max]
    }

    /// Map a pixel of a `size × size` grid to its sample point.
    #[inline]
    pub fn pixel_to_complex(&self, x: u32, y: u32, size: u32) -> Complex {
        self.subpixel_to_complex(x as f64, y as f64, size)
    }

    /// Like [`pixel_to_complex`](Self::pixel_to_complex) but for fractional
    /// or out-of-grid pixel coordinates (selection corners).
    #[inline]
    pub fn subpixel_to_complex(&self, px: f64, py: f64, size: u32) -> Complex {
        let n = size as f64;
        Complex::new(
            self.re_min + self.re_span() * px / n,
            self.im_min + self.im_span() * py / n,
        )
    }

    /// Inverse of [`subpixel_to_complex`](Self::subpixel_to_complex).
    pub fn complex_to_pixel(&self, c: Complex, size: u32) -> (f64, f64) {
        let n = size as f64;
        (
            (c.re - self.re_min) * n / self.re_span(),
            (c.im - self.im_min) * n / self.im_span(),
        )
    }

    /// Bounds covered by a pixel-space rectangle of the current `size × size` view.
    ///
    /// Fails with [`CoreError::InvalidBounds`] when the rectangle has zero
    /// width or height, and with [`CoreError::InvalidGridSize`] for `size == 0`.
    pub fn select(&self, rect: PixelRect, size: u32) -> crate::Result<Self> {
        check_grid_size(size)?;
        if rect.is_empty() {
            return Err(CoreError::InvalidBounds {
                reason: format!("selection {rect} has no area"),
            });
        }
        let lo = self.subpixel_to_complex(rect.x0 as f64, rect.y0 as f64, size);
        let hi = self.subpixel_to_complex(rect.x1 as f64, rect.y1 as f64, size);
        let next = Self::new(lo.re, lo.im, hi.re, hi.im)?;
        if next.near_precision_limit(size) {
            warn!(bounds = %next, size, "Zoom depth is near the limit of f64 precision");
        }
        Ok(next)
    }

    /// `true` once neighbouring pixels are only a few hundred ULPs apart,
    /// where the image starts to block up.
    pub fn near_precision_limit(&self, size: u32) -> bool {
        let n = size.max(1) as f64;
        let step = (self.re_span() / n).min(self.im_span() / n);
        let magnitude = self
            .to_array()
            .iter()
            .fold(f64::MIN_POSITIVE, |m, v| m.max(v.abs()));
        step < magnitude * f64::EPSILON * PRECISION_MARGIN_ULPS
    }

    /// Magnification of this window relative to `base`, measured on the real axis.
    pub fn zoom_relative_to(&self, base: &Self) -> f64 {
        base.re_span() / self.re_span()
    }

    pub fn center(&self) -> Complex {
        Complex::new(
            self.re_min + self.re_span() / 2.0,
            self.im_min + self.im_span() / 2.0,
        )
    }
}

impl Default for PlaneBounds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl std::fmt::Display for PlaneBounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}, {}] × [{}, {}]",
            self.re_min, self.re_max, self.im_min, self.im_max
        )
    }
}

/// Axis-aligned rectangle in pixel space with `x0 <= x1` and `y0 <= y1`.
///
/// Corners may lie outside the grid; dragging past the edge zooms out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl PixelRect {
    /// Build from two arbitrary corners, normalising each axis independently.
    pub fn from_corners(a: (i32, i32), b: (i32, i32)) -> Self {
        Self {
            x0: a.0.min(b.0),
            y0: a.1.min(b.1),
            x1: a.0.max(b.0),
            y1: a.1.max(b.1),
        }
    }

    pub fn width(&self) -> u32 {
        self.x0.abs_diff(self.x1)
    }

    pub fn height(&self) -> u32 {
        self.y0.abs_diff(self.y1)
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

impl std::fmt::Display for PixelRect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})-({}, {})", self.x0, self.y0, self.x1, self.y1)
    }
}
