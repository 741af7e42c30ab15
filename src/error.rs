//! Error types for grid construction.
//!
//! Everything data-driven at runtime (bad indices, missing strategies, empty
//! text) is a sentinel or a no-op; only an unusable configuration is an error.

use thiserror::Error;

/// Reasons a grid cannot be built.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GridError {
    /// Rows or columns is zero, which would divide the canvas by zero.
    #[error("grid needs at least one row and one column (got {rows}x{cols})")]
    EmptyGrid { rows: usize, cols: usize },

    /// Canvas size is zero, negative, NaN or infinite.
    #[error("canvas size must be positive and finite (got {width}x{height})")]
    InvalidCanvas { width: f32, height: f32 },
}
