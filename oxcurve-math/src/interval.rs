//! Closed rational intervals with exact interval arithmetic.
//!
//! Used to enclose values that are rational functions of a refinable real
//! algebraic number: when the argument interval shrinks, so does the
//! enclosure.

use crate::error::{MathError, Result};
use num_rational::BigRational;
use num_traits::{Signed, Zero};
use std::fmt;

/// A closed interval `[lo, hi]` with rational endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RationalInterval {
    lo: BigRational,
    hi: BigRational,
}

impl RationalInterval {
    /// Create a new interval.
    pub fn new(lo: BigRational, hi: BigRational) -> Result<Self> {
        if lo > hi {
            return Err(MathError::InvalidInterval);
        }
        Ok(Self { lo, hi })
    }

    /// Build from endpoints already known to satisfy `lo <= hi`.
    pub(crate) fn from_ordered(lo: BigRational, hi: BigRational) -> Self {
        debug_assert!(lo <= hi);
        Self { lo, hi }
    }

    /// The degenerate interval `[v, v]`.
    pub fn point(v: BigRational) -> Self {
        Self {
            lo: v.clone(),
            hi: v,
        }
    }

    /// Lower endpoint.
    #[inline]
    pub fn lo(&self) -> &BigRational {
        &self.lo
    }

    /// Upper endpoint.
    #[inline]
    pub fn hi(&self) -> &BigRational {
        &self.hi
    }

    /// Width `hi - lo`.
    pub fn width(&self) -> BigRational {
        &self.hi - &self.lo
    }

    /// Midpoint.
    pub fn midpoint(&self) -> BigRational {
        (&self.lo + &self.hi) / BigRational::from_integer(2.into())
    }

    /// Check whether the interval is a single point.
    pub fn is_point(&self) -> bool {
        self.lo == self.hi
    }

    /// Check whether the two closed intervals share a point.
    pub fn intersects(&self, other: &Self) -> bool {
        self.lo <= other.hi && other.lo <= self.hi
    }

    /// Check whether zero lies in the interval.
    pub fn contains_zero(&self) -> bool {
        !self.lo.is_positive() && !self.hi.is_negative()
    }

    /// Upper bound on the absolute value of the members.
    pub fn magnitude(&self) -> BigRational {
        self.lo.abs().max(self.hi.abs())
    }

    /// Lower bound on the absolute value of the members; zero if the
    /// interval straddles zero.
    pub fn mignitude(&self) -> BigRational {
        if self.contains_zero() {
            BigRational::zero()
        } else {
            self.lo.abs().min(self.hi.abs())
        }
    }

    /// Interval sum.
    pub fn add(&self, other: &Self) -> Self {
        Self {
            lo: &self.lo + &other.lo,
            hi: &self.hi + &other.hi,
        }
    }

    /// Interval difference.
    pub fn sub(&self, other: &Self) -> Self {
        Self {
            lo: &self.lo - &other.hi,
            hi: &self.hi - &other.lo,
        }
    }

    /// Interval product.
    pub fn mul(&self, other: &Self) -> Self {
        let products = [
            &self.lo * &other.lo,
            &self.lo * &other.hi,
            &self.hi * &other.lo,
            &self.hi * &other.hi,
        ];
        let lo = products.iter().min().cloned().unwrap_or_else(BigRational::zero);
        let hi = products.iter().max().cloned().unwrap_or_else(BigRational::zero);
        Self { lo, hi }
    }

    /// Multiply by a rational scalar.
    pub fn scale(&self, c: &BigRational) -> Self {
        let (a, b) = (&self.lo * c, &self.hi * c);
        if a <= b {
            Self { lo: a, hi: b }
        } else {
            Self { lo: b, hi: a }
        }
    }

    /// Interval quotient, `None` when the divisor contains zero.
    pub fn div(&self, other: &Self) -> Option<Self> {
        if other.contains_zero() {
            return None;
        }
        let inv = Self {
            lo: other.hi.recip(),
            hi: other.lo.recip(),
        };
        Some(self.mul(&inv))
    }
}

impl fmt::Display for RationalInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lo, self.hi)
    }
}
