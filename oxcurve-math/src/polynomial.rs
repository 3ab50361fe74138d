//! Dense univariate polynomials over the integers.
//!
//! [`UPoly`] is the coefficient type of every bivariate polynomial in this
//! crate and the input type of real root isolation. Coefficients are stored
//! in increasing degree order without trailing zeros, so the zero polynomial
//! is the empty vector and structural equality is polynomial equality.
//!
//! All algorithms stay in `Z[x]`: gcds use the primitive PRS, division is
//! exact division (the caller knows the quotient is integral) or
//! pseudo-division.
//!
//! ## References
//!
//! - "Algorithms for Computer Algebra" (Geddes, Czapor, Labahn, 1992)
//! - Yun: "On square-free decomposition algorithms" (1976)

pub mod bivariate;
pub mod sturm;
pub mod subresultant;
pub mod text;

use crate::interval::RationalInterval;
use num_bigint::{BigInt, Sign};
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

pub use bivariate::BiPoly;
pub use sturm::SturmSequence;

/// A univariate polynomial with arbitrary precision integer coefficients.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct UPoly {
    /// Coefficients, `coeffs[k]` belongs to `x^k`. No trailing zeros.
    coeffs: Vec<BigInt>,
}

impl UPoly {
    /// The zero polynomial.
    #[inline]
    pub fn zero() -> Self {
        Self { coeffs: Vec::new() }
    }

    /// The constant polynomial 1.
    #[inline]
    pub fn one() -> Self {
        Self::constant(BigInt::one())
    }

    /// A constant polynomial.
    pub fn constant(c: BigInt) -> Self {
        Self::from_coeffs(vec![c])
    }

    /// The polynomial `x`.
    pub fn x() -> Self {
        Self::monomial(BigInt::one(), 1)
    }

    /// The polynomial `c * x^k`.
    pub fn monomial(c: BigInt, k: usize) -> Self {
        let mut coeffs = vec![BigInt::zero(); k + 1];
        coeffs[k] = c;
        Self::from_coeffs(coeffs)
    }

    /// Build from coefficients in increasing degree order.
    pub fn from_coeffs(mut coeffs: Vec<BigInt>) -> Self {
        while coeffs.last().is_some_and(Zero::is_zero) {
            coeffs.pop();
        }
        Self { coeffs }
    }

    /// Build from small integer coefficients in increasing degree order.
    pub fn from_i64(coeffs: &[i64]) -> Self {
        Self::from_coeffs(coeffs.iter().map(|&c| BigInt::from(c)).collect())
    }

    /// Build the integer polynomial with the same roots as a polynomial with
    /// rational coefficients, multiplying through by the positive lcm of the
    /// denominators.
    pub fn from_rationals(coeffs: &[BigRational]) -> Self {
        let lcm = coeffs
            .iter()
            .fold(BigInt::one(), |acc, c| acc.lcm(c.denom()));
        Self::from_coeffs(
            coeffs
                .iter()
                .map(|c| c.numer() * (&lcm / c.denom()))
                .collect(),
        )
    }

    /// The polynomial `d*x - n` whose only root is the rational `n/d`.
    pub fn linear_for(value: &BigRational) -> Self {
        Self::from_coeffs(vec![-value.numer().clone(), value.denom().clone()])
    }

    /// Coefficients in increasing degree order.
    #[inline]
    pub fn coeffs(&self) -> &[BigInt] {
        &self.coeffs
    }

    /// Coefficient of `x^k` (zero beyond the degree).
    pub fn coeff(&self, k: usize) -> BigInt {
        self.coeffs.get(k).cloned().unwrap_or_else(BigInt::zero)
    }

    /// Check whether this is the zero polynomial.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Check whether this polynomial is constant (including zero).
    #[inline]
    pub fn is_constant(&self) -> bool {
        self.coeffs.len() <= 1
    }

    /// Degree; the zero polynomial reports degree 0.
    #[inline]
    pub fn degree(&self) -> usize {
        self.coeffs.len().saturating_sub(1)
    }

    /// Leading coefficient (zero for the zero polynomial).
    pub fn leading_coeff(&self) -> BigInt {
        self.coeffs.last().cloned().unwrap_or_else(BigInt::zero)
    }

    /// Scale every coefficient by an integer.
    pub fn scale(&self, c: &BigInt) -> Self {
        if c.is_zero() {
            return Self::zero();
        }
        Self::from_coeffs(self.coeffs.iter().map(|a| a * c).collect())
    }

    /// Multiply by `x^k`.
    pub fn shift(&self, k: usize) -> Self {
        if self.is_zero() || k == 0 {
            return self.clone();
        }
        let mut coeffs = vec![BigInt::zero(); k];
        coeffs.extend(self.coeffs.iter().cloned());
        Self { coeffs }
    }

    /// Raise to a power.
    pub fn pow(&self, mut k: u32) -> Self {
        let mut base = self.clone();
        let mut result = Self::one();
        while k > 0 {
            if k & 1 == 1 {
                result = &result * &base;
            }
            k >>= 1;
            if k > 0 {
                base = &base * &base;
            }
        }
        result
    }

    /// Formal derivative.
    pub fn derivative(&self) -> Self {
        Self::from_coeffs(
            self.coeffs
                .iter()
                .enumerate()
                .skip(1)
                .map(|(k, c)| c * BigInt::from(k))
                .collect(),
        )
    }

    /// Evaluate at a rational point with Horner's scheme.
    pub fn eval(&self, x: &BigRational) -> BigRational {
        let mut acc = BigRational::zero();
        for c in self.coeffs.iter().rev() {
            acc = acc * x + BigRational::from_integer(c.clone());
        }
        acc
    }

    /// Sign of the value at a rational point.
    ///
    /// Evaluates the numerator of `d^n * p(n/d)` so that no rational
    /// normalisation happens on the way.
    pub fn sign_at(&self, x: &BigRational) -> Sign {
        let (n, d) = (x.numer(), x.denom());
        let mut acc = BigInt::zero();
        let mut dpow = BigInt::one();
        for c in self.coeffs.iter().rev() {
            acc = acc * n + c * &dpow;
            dpow *= d;
        }
        acc.sign()
    }

    /// Enclose the range of the polynomial over a closed rational interval.
    pub fn eval_interval(&self, x: &RationalInterval) -> RationalInterval {
        let mut acc = RationalInterval::point(BigRational::zero());
        for c in self.coeffs.iter().rev() {
            acc = acc
                .mul(x)
                .add(&RationalInterval::point(BigRational::from_integer(c.clone())));
        }
        acc
    }

    /// Gcd of the coefficients, positive; zero for the zero polynomial.
    pub fn content(&self) -> BigInt {
        self.coeffs
            .iter()
            .fold(BigInt::zero(), |acc, c| acc.gcd(c))
    }

    /// Divide out the integer content, keeping the sign of the leading
    /// coefficient.
    pub fn primitive(&self) -> Self {
        let content = self.content();
        if content.is_zero() || content.is_one() {
            return self.clone();
        }
        Self {
            coeffs: self.coeffs.iter().map(|c| c / &content).collect(),
        }
    }

    /// Primitive part with a positive leading coefficient.
    pub fn canonical(&self) -> Self {
        let p = self.primitive();
        if p.leading_coeff().is_negative() {
            -p
        } else {
            p
        }
    }

    /// Exact division by a polynomial known to divide `self` in `Z[x]`.
    ///
    /// # Panics
    ///
    /// Panics when `divisor` is zero.
    pub fn div_exact(&self, divisor: &UPoly) -> UPoly {
        assert!(!divisor.is_zero(), "division by the zero polynomial");
        if self.is_zero() {
            return Self::zero();
        }
        let db = divisor.degree();
        if self.degree() < db {
            debug_assert!(false, "inexact polynomial division");
            return Self::zero();
        }
        let lc = divisor.leading_coeff();
        let mut rem = self.coeffs.clone();
        let mut quot = vec![BigInt::zero(); self.degree() - db + 1];
        for k in (0..quot.len()).rev() {
            let top = &rem[k + db];
            if top.is_zero() {
                continue;
            }
            let q = top / &lc;
            debug_assert!((&q * &lc) == *top, "inexact polynomial division");
            for (i, c) in divisor.coeffs.iter().enumerate() {
                rem[k + i] -= &q * c;
            }
            quot[k] = q;
        }
        debug_assert!(rem.iter().all(Zero::is_zero), "inexact polynomial division");
        Self::from_coeffs(quot)
    }

    /// Exact division of every coefficient by an integer.
    pub fn div_exact_integer(&self, c: &BigInt) -> UPoly {
        Self::from_coeffs(self.coeffs.iter().map(|a| a / c).collect())
    }

    /// Pseudo-remainder: `lc(b)^(deg a - deg b + 1) * a mod b`.
    ///
    /// # Panics
    ///
    /// Panics when `divisor` is zero.
    pub fn pseudo_rem(&self, divisor: &UPoly) -> UPoly {
        assert!(!divisor.is_zero(), "division by the zero polynomial");
        if self.degree() < divisor.degree() || self.is_zero() {
            return self.clone();
        }
        let db = divisor.degree();
        let lc = divisor.leading_coeff();
        let mut exponent = self.degree() - db + 1;
        let mut r = self.clone();
        while !r.is_zero() && r.degree() >= db {
            let shift = r.degree() - db;
            let lr = r.leading_coeff();
            r = &r.scale(&lc) - &divisor.scale(&lr).shift(shift);
            exponent -= 1;
        }
        r.scale(&num_traits::pow(lc, exponent))
    }

    /// Greatest common divisor up to a constant factor, returned canonical
    /// (primitive, positive leading coefficient). `gcd(0, 0) = 0`.
    pub fn gcd(&self, other: &UPoly) -> UPoly {
        if self.is_zero() {
            return other.canonical();
        }
        if other.is_zero() {
            return self.canonical();
        }
        let (mut a, mut b) = (self.primitive(), other.primitive());
        if a.degree() < b.degree() {
            std::mem::swap(&mut a, &mut b);
        }
        while !b.is_zero() {
            if b.is_constant() {
                return Self::one();
            }
            let r = a.pseudo_rem(&b);
            a = b;
            b = r.primitive();
        }
        a.canonical()
    }

    /// Square-free part, canonical.
    pub fn square_free_part(&self) -> UPoly {
        if self.is_constant() {
            return self.canonical();
        }
        let g = self.gcd(&self.derivative());
        self.div_exact(&g).canonical()
    }

    /// Yun's square-free factorisation: pairwise coprime square-free
    /// factors `(f_i, i)` of positive degree with `self = c * prod f_i^i`.
    pub fn square_free_factorization(&self) -> Vec<(UPoly, u32)> {
        let mut factors = Vec::new();
        if self.is_constant() {
            return factors;
        }
        let a = self.primitive();
        let da = a.derivative();
        let c = a.gcd(&da);
        let mut w = a.div_exact(&c);
        let mut y = da.div_exact(&c);
        let mut z = &y - &w.derivative();
        let mut i = 1u32;
        while !w.is_constant() {
            let g = w.gcd(&z);
            if !g.is_constant() {
                factors.push((g.canonical(), i));
            }
            w = w.div_exact(&g);
            y = z.div_exact(&g);
            z = &y - &w.derivative();
            i += 1;
        }
        factors
    }

    /// Cauchy bound: every complex root has absolute value strictly below
    /// the returned value.
    pub fn cauchy_bound(&self) -> BigRational {
        let lc = self.leading_coeff().abs();
        if lc.is_zero() {
            return BigRational::one();
        }
        let max = self.coeffs[..self.degree()]
            .iter()
            .map(|c| BigRational::new(c.abs(), lc.clone()))
            .max()
            .unwrap_or_else(BigRational::zero);
        BigRational::one() + max
    }

    /// Multiplicity of `value` as a root (0 if it is not a root).
    pub fn root_multiplicity(&self, value: &BigRational) -> u32 {
        if self.is_zero() {
            return 0;
        }
        let lin = Self::linear_for(value);
        let mut p = self.clone();
        let mut m = 0;
        while !p.is_constant() && p.sign_at(value) == Sign::NoSign {
            p = p.div_exact(&lin);
            m += 1;
        }
        m
    }
}

impl fmt::Debug for UPoly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl fmt::Display for UPoly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        text::write_univariate(f, self, 'x')
    }
}

impl Neg for UPoly {
    type Output = UPoly;

    fn neg(self) -> UPoly {
        UPoly {
            coeffs: self.coeffs.into_iter().map(|c| -c).collect(),
        }
    }
}

impl Neg for &UPoly {
    type Output = UPoly;

    fn neg(self) -> UPoly {
        -self.clone()
    }
}

impl Add<&UPoly> for &UPoly {
    type Output = UPoly;

    fn add(self, other: &UPoly) -> UPoly {
        let n = self.coeffs.len().max(other.coeffs.len());
        UPoly::from_coeffs(
            (0..n)
                .map(|k| match (self.coeffs.get(k), other.coeffs.get(k)) {
                    (Some(a), Some(b)) => a + b,
                    (Some(a), None) => a.clone(),
                    (None, Some(b)) => b.clone(),
                    (None, None) => BigInt::zero(),
                })
                .collect(),
        )
    }
}

impl Add for UPoly {
    type Output = UPoly;

    fn add(self, other: UPoly) -> UPoly {
        &self + &other
    }
}

impl Sub<&UPoly> for &UPoly {
    type Output = UPoly;

    fn sub(self, other: &UPoly) -> UPoly {
        self + &(-other)
    }
}

impl Sub for UPoly {
    type Output = UPoly;

    fn sub(self, other: UPoly) -> UPoly {
        &self - &other
    }
}

impl Mul<&UPoly> for &UPoly {
    type Output = UPoly;

    fn mul(self, other: &UPoly) -> UPoly {
        if self.is_zero() || other.is_zero() {
            return UPoly::zero();
        }
        let mut coeffs = vec![BigInt::zero(); self.coeffs.len() + other.coeffs.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            if a.is_zero() {
                continue;
            }
            for (j, b) in other.coeffs.iter().enumerate() {
                coeffs[i + j] += a * b;
            }
        }
        UPoly::from_coeffs(coeffs)
    }
}

impl Mul for UPoly {
    type Output = UPoly;

    fn mul(self, other: UPoly) -> UPoly {
        &self * &other
    }
}
