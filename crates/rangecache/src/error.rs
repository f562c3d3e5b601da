//! Error types for rangecache

use std::fmt;

/// Result type alias for rangecache operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for cache operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Query bounds outside `[0, len)` or `left > right`
    OutOfRange {
        /// Requested left bound (inclusive)
        left: usize,
        /// Requested right bound (inclusive)
        right: usize,
        /// Length of the array the request was made against
        len: usize,
    },

    /// Update index outside `[0, len)`
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Length of the array the request was made against
        len: usize,
    },

    /// Capacity must be at least 1
    InvalidCapacity(usize),
}

impl Error {
    /// True for both bounds errors (range and point index)
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Error::OutOfRange { .. } | Error::IndexOutOfRange { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::OutOfRange { left, right, len } => write!(
                f,
                "Range out of bounds: [{}, {}] (array length {})",
                left, right, len
            ),
            Error::IndexOutOfRange { index, len } => {
                write!(f, "Index out of bounds: {} (array length {})", index, len)
            }
            Error::InvalidCapacity(capacity) => {
                write!(f, "Invalid capacity: {} (must be at least 1)", capacity)
            }
        }
    }
}

impl std::error::Error for Error {}
