//! Error types for amgr

use thiserror::Error;

/// Result type alias using amgr's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while validating CSR structure
#[derive(Error, Debug)]
pub enum Error {
    /// An array did not have the expected length
    #[error("Length mismatch for '{what}': expected {expected}, got {got}")]
    LengthMismatch {
        /// Which array was malformed
        what: &'static str,
        /// Expected length
        expected: usize,
        /// Actual length
        got: usize,
    },

    /// Row pointer is malformed (wrong endpoints or decreasing)
    #[error("Invalid row pointer at position {position}: {reason}")]
    InvalidRowPointer {
        /// Offending position in `row_ptr`
        position: usize,
        /// Reason for invalidity
        reason: String,
    },

    /// Column index out of bounds
    #[error("Column index {index} out of bounds for {n_cols} columns")]
    ColumnOutOfBounds {
        /// The invalid column index
        index: usize,
        /// Number of columns
        n_cols: usize,
    },

    /// Sparsity patterns that were required to match do not
    #[error("Pattern mismatch: {0}")]
    PatternMismatch(String),
}

impl Error {
    /// Create a length mismatch error
    pub fn length_mismatch(what: &'static str, expected: usize, got: usize) -> Self {
        Self::LengthMismatch {
            what,
            expected,
            got,
        }
    }
}
