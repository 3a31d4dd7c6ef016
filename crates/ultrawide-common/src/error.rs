//! Error types for Ultrawide.

use thiserror::Error;

/// Top-level error type for Ultrawide operations.
#[derive(Debug, Error)]
pub enum UltrawideError {
    /// Degenerate aspect or display size
    #[error("Aspect error: {0}")]
    Aspect(#[from] AspectError),
}

/// Degenerate input feeding the layout calculation.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum AspectError {
    /// Ratio is zero, negative, NaN or infinite
    #[error("degenerate aspect ratio {0}")]
    Degenerate(f32),

    /// Display size cannot produce a ratio
    #[error("degenerate display size {width}x{height}")]
    DegenerateSize {
        /// Reported width
        width: f32,
        /// Reported height
        height: f32,
    },
}

/// Result type alias for Ultrawide operations.
pub type UltrawideResult<T> = Result<T, UltrawideError>;
