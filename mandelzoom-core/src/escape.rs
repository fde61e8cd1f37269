use crate::complex::Complex;
use crate::error::CoreError;

/// Outcome of iterating a single sample point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeTime {
    /// `|z_{i-1}|` exceeded the escape radius at step `iteration`.
    ///
    /// Always `>= 2`: the check runs on `z₀ = 0` first, which never escapes.
    Escaped { iteration: u32 },

    /// No escape within the iteration cap.
    Bounded,
}

impl EscapeTime {
    #[inline]
    pub fn iteration(self) -> Option<u32> {
        match self {
            Self::Escaped { iteration } => Some(iteration),
            Self::Bounded => None,
        }
    }

    #[inline]
    pub fn escaped(self) -> bool {
        matches!(self, Self::Escaped { .. })
    }
}

/// Iteration cap and bailout radius for the escape-time loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KernelParams {
    /// Steps `i = 1 .. max_iterations - 1` are tried before giving up.
    pub max_iterations: u32,

    pub escape_radius: f64,

    /// `escape_radius²`, so the loop never takes a square root.
    escape_radius_sq: f64,
}

impl KernelParams {
    pub const DEFAULT_MAX_ITERATIONS: u32 = 6000;
    pub const DEFAULT_ESCAPE_RADIUS: f64 = 2.0;

    pub fn new(max_iterations: u32, escape_radius: f64) -> crate::Result<Self> {
        if max_iterations < 1 {
            return Err(CoreError::InvalidMaxIterations(max_iterations));
        }
        if escape_radius <= 0.0 || !escape_radius.is_finite() {
            return Err(CoreError::InvalidEscapeRadius(escape_radius));
        }
        Ok(Self {
            max_iterations,
            escape_radius,
            escape_radius_sq: escape_radius * escape_radius,
        })
    }

    /// Params with the standard radius of 2.
    pub fn with_max_iterations(max_iterations: u32) -> crate::Result<Self> {
        Self::new(max_iterations, Self::DEFAULT_ESCAPE_RADIUS)
    }

    #[inline]
    pub fn escape_radius_sq(&self) -> f64 {
        self.escape_radius_sq
    }
}

impl Default for KernelParams {
    fn default() -> Self {
        Self {
            max_iterations: Self::DEFAULT_MAX_ITERATIONS,
            escape_radius: Self::DEFAULT_ESCAPE_RADIUS,
            escape_radius_sq: Self::DEFAULT_ESCAPE_RADIUS * Self::DEFAULT_ESCAPE_RADIUS,
        }
    }
}

/// An escape-time fractal.
///
/// Renderers are generic over `F: Fractal` so the inner loop is inlined.
pub trait Fractal {
    fn escape_time(&self, c: Complex) -> EscapeTime;

    fn params(&self) -> &KernelParams;
}

/// `z₀ = 0`, `z_i = z_{i-1}² + c`.
#[derive(Debug, Clone)]
pub struct Mandelbrot {
    params: KernelParams,
}

impl Mandelbrot {
    pub fn new(params: KernelParams) -> Self {
        Self { params }
    }
}

impl Default for Mandelbrot {
    fn default() -> Self {
        Self::new(KernelParams::default())
    }
}

impl Fractal for Mandelbrot {
    #[inline]
    fn escape_time(&self, c: Complex) -> EscapeTime {
        let radius_sq = self.params.escape_radius_sq();
        let mut z = Complex::ZERO;
        for iteration in 1..self.params.max_iterations {
            if z.norm_sq() > radius_sq {
                return EscapeTime::Escaped { iteration };
            }
            z = z.square_add(c);
        }
        EscapeTime::Bounded
    }

    fn params(&self) -> &KernelParams {
        &self.params
    }
}
