//! Sturm sequences and real root counting.
//!
//! The sequence is built from sign-corrected pseudo-remainders, so every
//! member is a positive multiple of the classical Euclidean Sturm member and
//! all arithmetic stays in `Z[x]`.
//!
//! For a square-free `p` and `a < b`, the number of distinct real roots in
//! the half-open interval `(a, b]` is `V(a) - V(b)`, where `V` counts sign
//! variations after dropping zeros. This holds even when `a` or `b` is a
//! root, which lets the isolation code split at arbitrary rationals.
//!
//! ## References
//!
//! - "Algorithms in Real Algebraic Geometry" (Basu et al., 2006), ch. 2

use super::UPoly;
use num_bigint::Sign;
use num_rational::BigRational;
use num_traits::Signed;

/// The Sturm sequence of a square-free polynomial.
#[derive(Debug, Clone)]
pub struct SturmSequence {
    seq: Vec<UPoly>,
}

impl SturmSequence {
    /// Build the Sturm sequence of the square-free part of `p`.
    pub fn new(p: &UPoly) -> Self {
        let p = p.square_free_part();
        if p.is_constant() {
            return Self { seq: vec![p] };
        }
        let mut seq = vec![p.clone(), p.derivative()];
        loop {
            let n = seq.len();
            let (a, b) = (&seq[n - 2], &seq[n - 1]);
            if b.is_constant() {
                break;
            }
            let mut r = a.pseudo_rem(b);
            let exponent = a.degree() - b.degree() + 1;
            if b.leading_coeff().is_negative() && exponent % 2 == 1 {
                r = -r;
            }
            if r.is_zero() {
                break;
            }
            seq.push((-r).primitive());
        }
        Self { seq }
    }

    /// The square-free polynomial the sequence was built for.
    pub fn polynomial(&self) -> &UPoly {
        &self.seq[0]
    }

    /// Members of the sequence.
    pub fn members(&self) -> &[UPoly] {
        &self.seq
    }

    /// Number of sign variations at a rational point, zeros dropped.
    pub fn variations_at(&self, x: &BigRational) -> usize {
        count_variations(self.seq.iter().map(|p| p.sign_at(x)))
    }

    /// Number of sign variations at `-inf` (`negative = true`) or `+inf`.
    pub fn variations_at_infinity(&self, negative: bool) -> usize {
        count_variations(self.seq.iter().filter(|p| !p.is_zero()).map(|p| {
            let lc_negative = p.leading_coeff().is_negative();
            let odd = p.degree() % 2 == 1;
            if lc_negative ^ (negative && odd) {
                Sign::Minus
            } else {
                Sign::Plus
            }
        }))
    }

    /// Distinct real roots in `(a, b]`.
    pub fn count_half_open(&self, a: &BigRational, b: &BigRational) -> usize {
        if a >= b {
            return 0;
        }
        self.variations_at(a).saturating_sub(self.variations_at(b))
    }

    /// Distinct real roots in the open interval `(a, b)`.
    pub fn count_open(&self, a: &BigRational, b: &BigRational) -> usize {
        let n = self.count_half_open(a, b);
        if a < b && self.polynomial().sign_at(b) == Sign::NoSign {
            n.saturating_sub(1)
        } else {
            n
        }
    }

    /// Distinct real roots in the closed interval `[a, b]`.
    pub fn count_closed(&self, a: &BigRational, b: &BigRational) -> usize {
        let at_a = usize::from(self.polynomial().sign_at(a) == Sign::NoSign);
        if a >= b {
            return if a == b { at_a } else { 0 };
        }
        self.count_half_open(a, b) + at_a
    }

    /// Total number of distinct real roots.
    pub fn count_all(&self) -> usize {
        self.variations_at_infinity(true)
            .saturating_sub(self.variations_at_infinity(false))
    }
}

/// Count sign changes in a sign sequence, ignoring zeros.
pub fn count_variations(signs: impl IntoIterator<Item = Sign>) -> usize {
    let mut last = Sign::NoSign;
    let mut changes = 0;
    for s in signs {
        if s == Sign::NoSign {
            continue;
        }
        if last != Sign::NoSign && s != last {
            changes += 1;
        }
        last = s;
    }
    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    fn rat(n: i64) -> BigRational {
        BigRational::from_integer(BigInt::from(n))
    }

    #[test]
    fn test_count_variations() {
        use Sign::*;
        assert_eq!(count_variations([Plus, NoSign, Minus, Minus, Plus]), 2);
        assert_eq!(count_variations([NoSign, NoSign]), 0);
    }

    #[test]
    fn test_counts_on_cubic() {
        // x^3 - x has roots -1, 0, 1
        let s = SturmSequence::new(&UPoly::from_i64(&[0, -1, 0, 1]));
        assert_eq!(s.count_all(), 3);
        assert_eq!(s.count_open(&rat(-2), &rat(2)), 3);
        assert_eq!(s.count_open(&rat(-1), &rat(1)), 1);
        assert_eq!(s.count_closed(&rat(-1), &rat(1)), 3);
        assert_eq!(s.count_half_open(&rat(-1), &rat(1)), 2);
    }

    #[test]
    fn test_counts_ignore_multiplicity() {
        // (x - 1)^2 (x^2 + 1)
        let p = &UPoly::from_i64(&[-1, 1]).pow(2) * &UPoly::from_i64(&[1, 0, 1]);
        let s = SturmSequence::new(&p);
        assert_eq!(s.count_all(), 1);
        assert_eq!(s.count_open(&rat(0), &rat(2)), 1);
    }

    #[test]
    fn test_negative_leading_coefficients() {
        // -2x^2 + 8 has roots -2, 2
        let s = SturmSequence::new(&UPoly::from_i64(&[8, 0, -2]));
        assert_eq!(s.count_all(), 2);
        assert_eq!(s.count_open(&rat(0), &rat(3)), 1);
    }
}
