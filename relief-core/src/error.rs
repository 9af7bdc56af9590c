//! Error types for grid construction and mesh configuration.
//!
//! The mesh builder itself never fails; these errors are raised at the
//! boundaries where a malformed grid or configuration would otherwise slip in.

use thiserror::Error;

/// Result type alias using GridError.
pub type GridResult<T> = Result<T, GridError>;

/// Errors raised while constructing an [`ElevationGrid`](crate::ElevationGrid).
#[derive(Debug, Error, PartialEq)]
pub enum GridError {
    #[error("grid must have at least one row and one column, got {rows}x{cols}")]
    EmptyGrid { rows: usize, cols: usize },

    #[error("expected {expected} elevation samples for a {rows}x{cols} grid, got {actual}")]
    ElevationLength {
        rows: usize,
        cols: usize,
        expected: usize,
        actual: usize,
    },

    #[error("expected {expected} {axis} values, got {actual}")]
    AxisLength {
        axis: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("non-finite {axis} value at index {index}")]
    NonFiniteCoordinate { axis: &'static str, index: usize },
}

/// Errors raised by [`MeshConfig::validate`](crate::MeshConfig::validate).
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("exaggeration must be a positive finite number, got {0}")]
    InvalidExaggeration(f64),

    #[error("base thickness must be a non-negative finite number, got {0}")]
    InvalidBaseThickness(f64),

    #[error("max_dim must be between {min} and {max}, got {value}")]
    MaxDimOutOfRange { value: usize, min: usize, max: usize },

    #[error("vertex cap must be at least 2, got {0}")]
    InvalidVertexCap(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = GridError::ElevationLength {
            rows: 2,
            cols: 3,
            expected: 6,
            actual: 5,
        };
        assert_eq!(
            err.to_string(),
            "expected 6 elevation samples for a 2x3 grid, got 5"
        );

        let err = ConfigError::MaxDimOutOfRange {
            value: 50,
            min: 100,
            max: 1200,
        };
        assert!(err.to_string().contains("between 100 and 1200"));
    }
}
