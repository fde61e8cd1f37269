use thiserror::Error;

/// Errors originating from the core fractal math.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    #[error("invalid plane bounds: {reason}")]
    InvalidBounds { reason: String },

    #[error("invalid grid size: {0} (must be >= 1)")]
    InvalidGridSize(u32),

    #[error("invalid max iterations: {0} (must be >= 1)")]
    InvalidMaxIterations(u32),

    #[error("invalid escape radius: {0} (must be > 0.0)")]
    InvalidEscapeRadius(f64),
}

impl CoreError {
    /// `true` for caller errors on scalar arguments (grid size, iteration cap, radius).
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::InvalidGridSize(_) | Self::InvalidMaxIterations(_) | Self::InvalidEscapeRadius(_)
        )
    }
}

/// Reject a zero grid size.
pub(crate) fn check_grid_size(size: u32) -> crate::Result<()> {
    if size == 0 {
        return Err(CoreError::InvalidGridSize(size));
    }
    Ok(())
}
