//! Construction errors for the forest fire automaton.
//!
//! Every error is raised synchronously by the constructor. Once a simulation exists,
//! stepping and querying cannot fail.

use std::fmt;

/// Reasons a [`ForestFireSimulation`](crate::ForestFireSimulation) cannot be built.
#[derive(Debug, Clone, PartialEq)]
pub enum ForestFireError {
    /// Width or height is zero, or `width × height` does not fit in memory.
    InvalidDimension {
        /// Requested number of columns
        width: usize,
        /// Requested number of rows
        height: usize,
    },

    /// Spread probability is NaN, infinite or outside `[0, 1]`.
    InvalidProbability(f64),

    /// An initial ignition lies outside the grid.
    OutOfBoundsIgnition {
        /// Row of the rejected coordinate
        row: usize,
        /// Column of the rejected coordinate
        col: usize,
        /// Grid width (columns)
        width: usize,
        /// Grid height (rows)
        height: usize,
    },
}

impl fmt::Display for ForestFireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ForestFireError::InvalidDimension { width, height } => write!(
                f,
                "Grid dimensions must be positive and addressable, got {width}x{height}"
            ),
            ForestFireError::InvalidProbability(value) => {
                write!(f, "Propagation probability must be within [0, 1], got {value}")
            }
            ForestFireError::OutOfBoundsIgnition {
                row,
                col,
                width,
                height,
            } => write!(
                f,
                "Ignition at (row {row}, col {col}) lies outside the {width}x{height} grid"
            ),
        }
    }
}

impl std::error::Error for ForestFireError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offending_values() {
        let err = ForestFireError::InvalidDimension {
            width: 0,
            height: 4,
        };
        assert_eq!(
            err.to_string(),
            "Grid dimensions must be positive and addressable, got 0x4"
        );

        let err = ForestFireError::InvalidProbability(1.5);
        assert!(err.to_string().contains("1.5"));

        let err = ForestFireError::OutOfBoundsIgnition {
            row: 7,
            col: 2,
            width: 5,
            height: 3,
        };
        assert_eq!(
            err.to_string(),
            "Ignition at (row 7, col 2) lies outside the 5x3 grid"
        );
    }
}
