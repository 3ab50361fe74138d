//! Error types for the algebra substrate.

use thiserror::Error;

/// Errors raised by polynomial, interval and algebraic number operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MathError {
    /// Lower bound exceeds upper bound.
    #[error("invalid interval: lower bound exceeds upper bound")]
    InvalidInterval,
    /// The interval does not isolate a simple root of the polynomial.
    #[error("interval does not isolate a simple root of {0}")]
    NonIsolatingInterval(String),
    /// No rational lies strictly between the given numbers.
    #[error("empty range: the lower number is not strictly below the upper one")]
    EmptyRange,
    /// Malformed polynomial text.
    #[error("parse error at offset {offset}: {message}")]
    Parse {
        /// Byte offset of the offending token.
        offset: usize,
        /// Description of the problem.
        message: String,
    },
}

/// Result type for the algebra substrate.
pub type Result<T> = std::result::Result<T, MathError>;
