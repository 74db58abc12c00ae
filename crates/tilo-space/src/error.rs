//! Error types for space construction.

use std::fmt;

/// Errors arising from space construction.
#[derive(Debug, Clone, PartialEq)]
pub enum SpaceError {
    /// Attempted to construct a space with zero components or values.
    EmptySpace,
    /// A bounds vector does not match the declared shape.
    ShapeMismatch {
        /// Which bounds vector was malformed.
        what: &'static str,
        /// Component count implied by the shape.
        expected: usize,
        /// Length supplied.
        actual: usize,
    },
    /// A component has a NaN bound or `low > high`.
    InvalidBounds {
        /// Flat index of the offending component.
        index: usize,
        /// Lower bound at `index`.
        low: f32,
        /// Upper bound at `index`.
        high: f32,
    },
}

impl fmt::Display for SpaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySpace => write!(f, "space must have at least one component"),
            Self::ShapeMismatch {
                what,
                expected,
                actual,
            } => write!(f, "{what} has {actual} components, shape requires {expected}"),
            Self::InvalidBounds { index, low, high } => {
                write!(f, "invalid bounds at component {index}: [{low}, {high}]")
            }
        }
    }
}

impl std::error::Error for SpaceError {}
