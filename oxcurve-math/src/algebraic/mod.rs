//! Real algebraic numbers.
//!
//! Exact representatives of real roots of integer polynomials, root
//! isolation, and the rational bounds the curve analysis samples at.

pub mod isolate;
pub mod number;

pub use isolate::{count_real_roots, real_roots, real_roots_with_multiplicities};
pub use number::{rational_between, AlgebraicReal};

use crate::error::{MathError, Result};
use num_rational::BigRational;
use num_traits::One;

/// A simple rational strictly between `a` and `b`.
///
/// Fails with [`MathError::EmptyRange`] unless `a < b`.
pub fn bound_between(a: &AlgebraicReal, b: &AlgebraicReal) -> Result<BigRational> {
    if a >= b {
        return Err(MathError::EmptyRange);
    }
    loop {
        let (upper, lower) = (a.upper(), b.lower());
        if upper < lower {
            return Ok(rational_between(&upper, &lower));
        }
        a.refine();
        b.refine();
    }
}

/// An integer strictly below `a`.
pub fn bound_left(a: &AlgebraicReal) -> BigRational {
    a.lower().floor() - BigRational::one()
}

/// An integer strictly above `a`.
pub fn bound_right(a: &AlgebraicReal) -> BigRational {
    a.upper().ceil() + BigRational::one()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polynomial::UPoly;
    use num_bigint::BigInt;

    #[test]
    fn test_bounds() {
        let roots = real_roots(&UPoly::from_i64(&[-2, 0, 1]));
        let (a, b) = (&roots[0], &roots[1]);
        let q = bound_between(a, b).expect("distinct roots");
        assert_eq!(q, BigRational::from_integer(BigInt::from(0)));
        assert!(a.compare_rational(&bound_left(a)).is_gt());
        assert!(b.compare_rational(&bound_right(b)).is_lt());
        assert_eq!(bound_between(b, a), Err(MathError::EmptyRange));
    }

    #[test]
    fn test_bound_between_close_numbers() {
        // sqrt(2) and 1.415
        let a = real_roots(&UPoly::from_i64(&[-2, 0, 1]))[1].clone();
        let b = AlgebraicReal::from_rational(BigRational::new(BigInt::from(283), BigInt::from(200)));
        let q = bound_between(&a, &b).expect("sqrt(2) < 1.415");
        assert!(a.compare_rational(&q).is_lt());
        assert!(q < BigRational::new(BigInt::from(283), BigInt::from(200)));
    }
}
