//! Error types for curve analysis.

use oxcurve_math::{BiPoly, MathError};
use thiserror::Error;

/// Errors raised while analysing a curve.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CurveAnalysisError {
    /// The primitive part is not square-free, so its discriminant vanishes.
    #[error("resultant of {polynomial} and its y-derivative is identically zero")]
    ZeroResultant {
        /// The primitive part that was rejected.
        polynomial: BiPoly,
    },
    /// An event line cannot be resolved directly in the current coordinates.
    #[error("curve is not in generic position at event {index} (x = {x})")]
    NonGenericPosition {
        /// Index of the offending event.
        index: usize,
        /// Approximate x-coordinate of the event.
        x: String,
    },
    /// A shear factor failed to produce generic coordinates.
    #[error("shear factor {factor} does not put the curve in generic position")]
    BadShear {
        /// The rejected factor.
        factor: i64,
    },
    /// Every permitted shear attempt failed.
    #[error("no usable shear factor after {attempts} attempts")]
    ShearLimitExceeded {
        /// Number of attempts made.
        attempts: usize,
    },
    /// A query needs a polynomial, but none has been set.
    #[error("no defining polynomial has been set")]
    NoDefiningPolynomial,
    /// The defining polynomial can only be set once.
    #[error("a defining polynomial is already set")]
    PolynomialAlreadySet,
    /// An index is outside the valid range.
    #[error("{what} index {index} out of range (limit {limit})")]
    IndexOutOfRange {
        /// The kind of object being indexed.
        what: &'static str,
        /// The requested index.
        index: usize,
        /// The exclusive upper limit.
        limit: usize,
    },
    /// Malformed curve text.
    #[error("invalid curve text: {0}")]
    Parse(MathError),
    /// Failure in the algebra substrate.
    #[error(transparent)]
    Math(#[from] MathError),
}

impl CurveAnalysisError {
    /// Whether a different shear factor could avoid the error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::NonGenericPosition { .. } | Self::BadShear { .. })
    }

    pub(crate) fn out_of_range(what: &'static str, index: usize, limit: usize) -> Self {
        Self::IndexOutOfRange { what, index, limit }
    }
}

/// Result type for curve analysis.
pub type Result<T> = std::result::Result<T, CurveAnalysisError>;
