//! Real algebraic numbers.
//!
//! An [`AlgebraicReal`] is either an exact rational or the unique root of a
//! square-free integer polynomial inside an open interval `(lo, hi)` whose
//! endpoints are not roots. Numbers built through [`crate::algebraic::isolate`]
//! that are rational are always stored exactly, so the interval form means
//! irrational.
//!
//! The value lives behind a shared single-threaded handle: clones share one
//! isolating interval, so refining one clone refines all of them. Refinement
//! only ever shrinks the interval, which makes comparisons and sign
//! evaluations cheaper over time without changing the value.

use crate::error::{MathError, Result};
use crate::interval::RationalInterval;
use crate::polynomial::{SturmSequence, UPoly};
use num_bigint::{BigInt, Sign};
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};
use std::cell::RefCell;
use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

#[derive(Debug, Clone)]
enum Repr {
    Rational(BigRational),
    Interval {
        poly: UPoly,
        lo: BigRational,
        hi: BigRational,
        /// Sign of `poly` at `lo`; the sign at `hi` is the opposite.
        sign_lo: Sign,
    },
}

/// A real algebraic number with a refinable isolating interval.
#[derive(Clone)]
pub struct AlgebraicReal {
    inner: Rc<RefCell<Repr>>,
}

impl AlgebraicReal {
    /// An exact rational number.
    pub fn from_rational(value: BigRational) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Repr::Rational(value))),
        }
    }

    /// An exact integer.
    pub fn from_integer(value: i64) -> Self {
        Self::from_rational(BigRational::from_integer(BigInt::from(value)))
    }

    /// The unique root of `poly` in the open interval `(lo, hi)`.
    ///
    /// Fails unless `poly` is nonzero at both endpoints, changes sign across
    /// the interval and has exactly one distinct root inside it.
    pub fn new(poly: &UPoly, lo: BigRational, hi: BigRational) -> Result<Self> {
        if lo >= hi {
            return Err(MathError::InvalidInterval);
        }
        let poly = poly.square_free_part();
        let (sign_lo, sign_hi) = (poly.sign_at(&lo), poly.sign_at(&hi));
        if sign_lo == Sign::NoSign || sign_hi == Sign::NoSign || sign_lo == sign_hi {
            return Err(MathError::NonIsolatingInterval(format!(
                "{} has no sign change on ({}, {})",
                poly, lo, hi
            )));
        }
        if SturmSequence::new(&poly).count_open(&lo, &hi) != 1 {
            return Err(MathError::NonIsolatingInterval(format!(
                "{} has several roots on ({}, {})",
                poly, lo, hi
            )));
        }
        let number = Self::from_isolated(poly, lo, hi, sign_lo);
        number.detect_rational();
        Ok(number)
    }

    /// Trusted constructor: `poly` is square-free with a single root in
    /// `(lo, hi)` and `sign_lo` is its sign at `lo`.
    pub(crate) fn from_isolated(poly: UPoly, lo: BigRational, hi: BigRational, sign_lo: Sign) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Repr::Interval {
                poly,
                lo,
                hi,
                sign_lo,
            })),
        }
    }

    /// Check whether two handles share the same number object.
    pub fn same_handle(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Check whether the number is stored as an exact rational.
    pub fn is_rational(&self) -> bool {
        matches!(*self.inner.borrow(), Repr::Rational(_))
    }

    /// The exact value, if rational.
    pub fn to_rational(&self) -> Option<BigRational> {
        match &*self.inner.borrow() {
            Repr::Rational(v) => Some(v.clone()),
            Repr::Interval { .. } => None,
        }
    }

    /// A square-free integer polynomial having this number as a root.
    pub fn defining_polynomial(&self) -> UPoly {
        match &*self.inner.borrow() {
            Repr::Rational(v) => UPoly::linear_for(v),
            Repr::Interval { poly, .. } => poly.clone(),
        }
    }

    /// Current lower bound (the value itself when rational).
    pub fn lower(&self) -> BigRational {
        match &*self.inner.borrow() {
            Repr::Rational(v) => v.clone(),
            Repr::Interval { lo, .. } => lo.clone(),
        }
    }

    /// Current upper bound (the value itself when rational).
    pub fn upper(&self) -> BigRational {
        match &*self.inner.borrow() {
            Repr::Rational(v) => v.clone(),
            Repr::Interval { hi, .. } => hi.clone(),
        }
    }

    /// Closed enclosure `[lower, upper]`.
    pub fn enclosure(&self) -> RationalInterval {
        match &*self.inner.borrow() {
            Repr::Rational(v) => RationalInterval::point(v.clone()),
            Repr::Interval { lo, hi, .. } => {
                RationalInterval::from_ordered(lo.clone(), hi.clone())
            }
        }
    }

    /// Width of the isolating interval (zero when rational).
    pub fn width(&self) -> BigRational {
        self.upper() - self.lower()
    }

    /// Halve the isolating interval once.
    pub fn refine(&self) {
        let mut repr = self.inner.borrow_mut();
        let Repr::Interval {
            poly,
            lo,
            hi,
            sign_lo,
        } = &mut *repr
        else {
            return;
        };
        let mid = (&*lo + &*hi) / BigRational::from_integer(BigInt::from(2));
        let s = poly.sign_at(&mid);
        if s == Sign::NoSign {
            *repr = Repr::Rational(mid);
        } else if s == *sign_lo {
            *lo = mid;
        } else {
            *hi = mid;
        }
    }

    /// Refine until the isolating interval is no wider than `precision`.
    ///
    /// Idempotent: a second call with the same or a coarser precision does
    /// nothing.
    pub fn refine_to(&self, precision: &BigRational) {
        while &self.width() > precision {
            self.refine();
        }
    }

    /// Rational midpoint of the current enclosure.
    pub fn approximation(&self) -> BigRational {
        self.enclosure().midpoint()
    }

    /// Floating point approximation, for diagnostics.
    pub fn to_f64(&self) -> f64 {
        self.approximation().to_f64().unwrap_or(f64::NAN)
    }

    /// Switch to the exact representation if the root is rational.
    ///
    /// A rational root `p/q` of an integer polynomial has `q` dividing the
    /// leading coefficient `l`, so once the interval is narrower than `1/l`
    /// it holds at most one candidate `k/l`.
    pub(crate) fn detect_rational(&self) {
        let (poly, lc) = match &*self.inner.borrow() {
            Repr::Rational(_) => return,
            Repr::Interval { poly, .. } => (poly.clone(), poly.leading_coeff().abs()),
        };
        let step = BigRational::new(BigInt::one(), lc.clone());
        while self.width() > step {
            self.refine();
        }
        if self.is_rational() {
            return;
        }
        let lo = self.lower();
        let scaled = &lo * BigRational::from_integer(lc.clone());
        let candidate = BigRational::new(scaled.floor().to_integer() + BigInt::one(), lc);
        if candidate < self.upper() && poly.sign_at(&candidate) == Sign::NoSign {
            *self.inner.borrow_mut() = Repr::Rational(candidate);
        }
    }

    /// Compare against a rational, shrinking the interval on the way.
    pub fn compare_rational(&self, q: &BigRational) -> Ordering {
        let mut repr = self.inner.borrow_mut();
        match &mut *repr {
            Repr::Rational(v) => (*v).cmp(q),
            Repr::Interval {
                poly,
                lo,
                hi,
                sign_lo,
            } => {
                if *q <= *lo {
                    return Ordering::Greater;
                }
                if *q >= *hi {
                    return Ordering::Less;
                }
                let s = poly.sign_at(q);
                if s == Sign::NoSign {
                    *repr = Repr::Rational(q.clone());
                    Ordering::Equal
                } else if s == *sign_lo {
                    *lo = q.clone();
                    Ordering::Greater
                } else {
                    *hi = q.clone();
                    Ordering::Less
                }
            }
        }
    }

    /// Exact comparison of two algebraic numbers.
    pub fn compare(&self, other: &Self) -> Ordering {
        if self.same_handle(other) {
            return Ordering::Equal;
        }
        if let Some(q) = other.to_rational() {
            return self.compare_rational(&q);
        }
        if let Some(q) = self.to_rational() {
            return other.compare_rational(&q).reverse();
        }
        let (alo, ahi, blo, bhi) = (self.lower(), self.upper(), other.lower(), other.upper());
        if ahi <= blo {
            return Ordering::Less;
        }
        if bhi <= alo {
            return Ordering::Greater;
        }
        let g = self.defining_polynomial().gcd(&other.defining_polynomial());
        if !g.is_constant() {
            let lo = alo.max(blo);
            let hi = ahi.min(bhi);
            if SturmSequence::new(&g).count_open(&lo, &hi) > 0 {
                return Ordering::Equal;
            }
        }
        loop {
            self.refine();
            other.refine();
            if self.upper() <= other.lower() {
                return Ordering::Less;
            }
            if other.upper() <= self.lower() {
                return Ordering::Greater;
            }
        }
    }

    /// Sign of an integer polynomial at this number.
    pub fn sign_of(&self, p: &UPoly) -> Sign {
        if p.is_zero() {
            return Sign::NoSign;
        }
        if let Some(v) = self.to_rational() {
            return p.sign_at(&v);
        }
        let g = p.gcd(&self.defining_polynomial());
        if !g.is_constant()
            && SturmSequence::new(&g).count_open(&self.lower(), &self.upper()) > 0
        {
            return Sign::NoSign;
        }
        let sturm = SturmSequence::new(p);
        loop {
            let (lo, hi) = (self.lower(), self.upper());
            let range = p.eval_interval(&self.enclosure());
            if !range.contains_zero() {
                return if range.lo().is_positive() {
                    Sign::Plus
                } else {
                    Sign::Minus
                };
            }
            if sturm.count_closed(&lo, &hi) == 0 {
                return p.sign_at(&lo);
            }
            self.refine();
        }
    }
}

/// The simplest rational strictly inside `(lo, hi)`: the integer of least
/// magnitude if there is one, otherwise a dyadic with the least denominator.
///
/// # Panics
///
/// Panics if `lo >= hi`.
pub fn rational_between(lo: &BigRational, hi: &BigRational) -> BigRational {
    assert!(lo < hi, "empty open interval");
    let zero = BigRational::zero();
    if lo < &zero && hi > &zero {
        return zero;
    }
    let above = lo.floor() + BigRational::one();
    if &above < hi {
        let below = hi.ceil() - BigRational::one();
        return if lo.is_negative() { below } else { above };
    }
    let mut d = BigInt::from(2);
    loop {
        let n = (lo * BigRational::from_integer(d.clone())).floor().to_integer() + BigInt::one();
        let q = BigRational::new(n, d.clone());
        if &q < hi {
            return q;
        }
        d *= 2;
    }
}

impl PartialEq for AlgebraicReal {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl Eq for AlgebraicReal {}

impl PartialOrd for AlgebraicReal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AlgebraicReal {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl fmt::Debug for AlgebraicReal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.inner.borrow() {
            Repr::Rational(v) => write!(f, "AlgebraicReal({})", v),
            Repr::Interval { poly, lo, hi, .. } => {
                write!(f, "AlgebraicReal(root of {} in ({}, {}))", poly, lo, hi)
            }
        }
    }
}

impl fmt::Display for AlgebraicReal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_rational() {
            Some(v) => write!(f, "{}", v),
            None => {
                // narrow enough that the six printed digits are settled
                self.refine_to(&BigRational::new(BigInt::one(), BigInt::from(100_000_000)));
                write!(f, "~{:.6}", self.to_f64())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rat(n: i64, d: i64) -> BigRational {
        BigRational::new(BigInt::from(n), BigInt::from(d))
    }

    fn sqrt2() -> AlgebraicReal {
        AlgebraicReal::new(&UPoly::from_i64(&[-2, 0, 1]), rat(1, 1), rat(2, 1))
            .expect("isolating interval")
    }

    #[test]
    fn test_new_rejects_bad_intervals() {
        let p = UPoly::from_i64(&[-2, 0, 1]);
        assert!(AlgebraicReal::new(&p, rat(2, 1), rat(3, 1)).is_err());
        assert!(AlgebraicReal::new(&p, rat(-2, 1), rat(2, 1)).is_err());
        assert_eq!(
            AlgebraicReal::new(&p, rat(2, 1), rat(1, 1)).err(),
            Some(MathError::InvalidInterval)
        );
    }

    #[test]
    fn test_rational_roots_become_exact() {
        // 2x - 1 isolated in (0, 1) is exactly 1/2
        let half = AlgebraicReal::new(&UPoly::from_i64(&[-1, 2]), rat(0, 1), rat(1, 1))
            .expect("isolating interval");
        assert_eq!(half.to_rational(), Some(rat(1, 2)));
        assert!(!sqrt2().is_rational());
    }

    #[test]
    fn test_refinement_shrinks_monotonically() {
        let a = sqrt2();
        a.refine_to(&rat(1, 1000));
        let w1 = a.width();
        assert!(w1 <= rat(1, 1000));
        a.refine_to(&rat(1, 2000));
        assert!(a.width() <= rat(1, 2000));
        assert!(a.width() <= w1);
        assert!(a.lower() < rat(1415, 1000) && a.upper() > rat(1414, 1000));
    }

    #[test]
    fn test_shared_handle_refines_all_clones() {
        let a = sqrt2();
        let b = a.clone();
        a.refine_to(&rat(1, 100));
        assert!(b.width() <= rat(1, 100));
        assert!(a.same_handle(&b));
    }

    #[test]
    fn test_ordering() {
        let a = sqrt2();
        // sqrt(2) as a root of x^4 - 4 in a different interval
        let b = AlgebraicReal::new(&UPoly::from_i64(&[-4, 0, 0, 0, 1]), rat(0, 1), rat(3, 1))
            .expect("isolating interval");
        assert_eq!(a.cmp(&b), Ordering::Equal);
        let c = AlgebraicReal::new(&UPoly::from_i64(&[-3, 0, 1]), rat(1, 1), rat(2, 1))
            .expect("isolating interval");
        assert!(a < c);
        assert!(AlgebraicReal::from_integer(1) < a);
        assert_eq!(a.compare_rational(&rat(3, 2)), Ordering::Less);
    }

    #[test]
    fn test_compare_exact_rational() {
        let half = AlgebraicReal::from_rational(rat(1, 2));
        assert_eq!(half.compare_rational(&rat(1, 2)), Ordering::Equal);
        assert_eq!(half.compare_rational(&rat(1, 1)), Ordering::Less);
        assert_eq!(half.compare_rational(&rat(0, 1)), Ordering::Greater);
    }

    #[test]
    fn test_display_does_not_depend_on_refinement() {
        let a = sqrt2();
        assert_eq!(a.to_string(), "~1.414214");
        a.refine_to(&rat(1, 1_000_000_000));
        assert_eq!(a.to_string(), "~1.414214");
        let minus = AlgebraicReal::new(&UPoly::from_i64(&[-2, 0, 1]), rat(-2, 1), rat(-1, 1))
            .expect("isolating interval");
        assert_eq!(minus.to_string(), "~-1.414214");
        assert_eq!(AlgebraicReal::from_rational(rat(-3, 4)).to_string(), "-3/4");
    }

    #[test]
    fn test_sign_of_polynomial() {
        let a = sqrt2();
        assert_eq!(a.sign_of(&UPoly::from_i64(&[-2, 0, 1])), Sign::NoSign);
        assert_eq!(a.sign_of(&UPoly::from_i64(&[-3, 0, 1])), Sign::Minus);
        // x^3 - 2x vanishes at sqrt(2) through a common factor
        assert_eq!(a.sign_of(&UPoly::from_i64(&[0, -2, 0, 1])), Sign::NoSign);
        // 100x - 141 > 0 at 1.41421...
        assert_eq!(a.sign_of(&UPoly::from_i64(&[-141, 100])), Sign::Plus);
    }

    #[test]
    fn test_rational_between() {
        assert_eq!(rational_between(&rat(-1, 2), &rat(3, 1)), rat(0, 1));
        assert_eq!(rational_between(&rat(3, 2), &rat(7, 2)), rat(2, 1));
        assert_eq!(rational_between(&rat(-7, 2), &rat(-3, 2)), rat(-2, 1));
        assert_eq!(rational_between(&rat(1, 3), &rat(2, 3)), rat(1, 2));
        let q = rational_between(&rat(1, 10), &rat(1, 9));
        assert!(q > rat(1, 10) && q < rat(1, 9));
    }
}
