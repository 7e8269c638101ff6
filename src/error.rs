//! Error types for grid construction and queries.

use thiserror::Error;

/// A malformed request against a grid. All variants are local, synchronous
/// and recoverable; "no path exists" is never an error but a regular
/// [None](Option::None) result of the search.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum GridError {
    #[error("grid dimensions must be positive, got {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("coordinate ({x}, {y}) lies outside the {cols}x{rows} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        cols: usize,
        rows: usize,
    },

    #[error("wall probability {0} is outside [0, 1]")]
    InvalidParameter(f64),
}

pub type Result<T> = std::result::Result<T, GridError>;
