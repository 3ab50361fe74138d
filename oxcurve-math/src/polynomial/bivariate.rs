//! Bivariate integer polynomials in recursive representation.
//!
//! A [`BiPoly`] is a polynomial in `y` whose coefficients are [`UPoly`]s in
//! `x`, i.e. an element of `Z[x][y]`. This is the natural layout for curve
//! analysis: specialising `x` yields a univariate polynomial in `y`, the
//! leading coefficient in `y` is a polynomial in `x`, and subresultants are
//! taken with respect to `y`.

use super::UPoly;
use crate::interval::RationalInterval;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// A polynomial in `Z[x][y]`.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct BiPoly {
    /// `coeffs[j]` is the coefficient of `y^j`. No trailing zeros.
    coeffs: Vec<UPoly>,
}

impl BiPoly {
    /// The zero polynomial.
    pub fn zero() -> Self {
        Self { coeffs: Vec::new() }
    }

    /// The constant polynomial 1.
    pub fn one() -> Self {
        Self::from_x_poly(UPoly::one())
    }

    /// The polynomial `x`.
    pub fn x() -> Self {
        Self::from_x_poly(UPoly::x())
    }

    /// The polynomial `y`.
    pub fn y() -> Self {
        Self::from_coeffs(vec![UPoly::zero(), UPoly::one()])
    }

    /// Build from coefficients of `y^0, y^1, ...`.
    pub fn from_coeffs(mut coeffs: Vec<UPoly>) -> Self {
        while coeffs.last().is_some_and(UPoly::is_zero) {
            coeffs.pop();
        }
        Self { coeffs }
    }

    /// Embed a polynomial in `x`.
    pub fn from_x_poly(p: UPoly) -> Self {
        Self::from_coeffs(vec![p])
    }

    /// Embed a polynomial in `y` with integer coefficients.
    pub fn from_y_poly(p: &UPoly) -> Self {
        Self::from_coeffs(p.coeffs().iter().cloned().map(UPoly::constant).collect())
    }

    /// Build from `(coefficient, x exponent, y exponent)` triples.
    ///
    /// ```
    /// use oxcurve_math::polynomial::BiPoly;
    ///
    /// // y^2 - x
    /// let f = BiPoly::from_terms(&[(1, 0, 2), (-1, 1, 0)]);
    /// assert_eq!(f.degree_y(), 2);
    /// assert_eq!(f.degree_x(), 1);
    /// ```
    pub fn from_terms(terms: &[(i64, usize, usize)]) -> Self {
        let mut result = Self::zero();
        for &(c, i, j) in terms {
            let term = Self::from_x_poly(UPoly::monomial(BigInt::from(c), i)).shift_y(j);
            result = &result + &term;
        }
        result
    }

    /// Coefficients of `y^0, y^1, ...`.
    #[inline]
    pub fn coeffs(&self) -> &[UPoly] {
        &self.coeffs
    }

    /// Coefficient of `y^j`.
    pub fn coeff(&self, j: usize) -> UPoly {
        self.coeffs.get(j).cloned().unwrap_or_else(UPoly::zero)
    }

    /// Check whether this is the zero polynomial.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Degree in `y` (0 for the zero polynomial).
    #[inline]
    pub fn degree_y(&self) -> usize {
        self.coeffs.len().saturating_sub(1)
    }

    /// Degree in `x`.
    pub fn degree_x(&self) -> usize {
        self.coeffs.iter().map(UPoly::degree).max().unwrap_or(0)
    }

    /// Total degree.
    pub fn total_degree(&self) -> usize {
        self.coeffs
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_zero())
            .map(|(j, c)| j + c.degree())
            .max()
            .unwrap_or(0)
    }

    /// Leading coefficient with respect to `y`.
    pub fn leading_coeff(&self) -> UPoly {
        self.coeffs.last().cloned().unwrap_or_else(UPoly::zero)
    }

    /// True iff the leading coefficient in `y` is a nonzero constant.
    pub fn is_y_regular(&self) -> bool {
        let lc = self.leading_coeff();
        !lc.is_zero() && lc.is_constant()
    }

    /// Multiply by `y^k`.
    pub fn shift_y(&self, k: usize) -> Self {
        if self.is_zero() || k == 0 {
            return self.clone();
        }
        let mut coeffs = vec![UPoly::zero(); k];
        coeffs.extend(self.coeffs.iter().cloned());
        Self { coeffs }
    }

    /// Multiply every coefficient by a polynomial in `x`.
    pub fn scale_x_poly(&self, c: &UPoly) -> Self {
        Self::from_coeffs(self.coeffs.iter().map(|a| a * c).collect())
    }

    /// Drop every term of `y`-degree above `d`.
    pub fn truncate_y(&self, d: usize) -> Self {
        Self::from_coeffs(self.coeffs.iter().take(d + 1).cloned().collect())
    }

    /// Partial derivative with respect to `y`.
    pub fn derivative_y(&self) -> Self {
        Self::from_coeffs(
            self.coeffs
                .iter()
                .enumerate()
                .skip(1)
                .map(|(j, c)| c.scale(&BigInt::from(j)))
                .collect(),
        )
    }

    /// Partial derivative with respect to `x`.
    pub fn derivative_x(&self) -> Self {
        Self::from_coeffs(self.coeffs.iter().map(UPoly::derivative).collect())
    }

    /// Content with respect to `y`: the canonical gcd of the coefficients.
    pub fn content(&self) -> UPoly {
        self.coeffs
            .iter()
            .fold(UPoly::zero(), |acc, c| acc.gcd(c))
    }

    /// The polynomial divided by its content.
    pub fn primitive_part(&self) -> Self {
        let content = self.content();
        if content.is_zero() || content == UPoly::one() {
            return self.clone();
        }
        Self::from_coeffs(self.coeffs.iter().map(|c| c.div_exact(&content)).collect())
    }

    /// Specialise `x` at a rational, yielding a positive integer multiple of
    /// `f(q, y)` as a polynomial in `y`.
    pub fn eval_x(&self, q: &BigRational) -> UPoly {
        let values: Vec<BigRational> = self.coeffs.iter().map(|c| c.eval(q)).collect();
        UPoly::from_rationals(&values)
    }

    /// Specialise `y` at a rational, yielding a positive integer multiple of
    /// `f(x, q)` as a polynomial in `x`.
    pub fn eval_y(&self, q: &BigRational) -> UPoly {
        if self.is_zero() {
            return UPoly::zero();
        }
        let (n, d) = (q.numer(), q.denom());
        let deg = self.degree_y();
        let mut result = UPoly::zero();
        let mut npow = BigInt::one();
        for (j, c) in self.coeffs.iter().enumerate() {
            let dpow = num_traits::pow(d.clone(), deg - j);
            result = &result + &c.scale(&(&npow * dpow));
            npow *= n;
        }
        result
    }

    /// Enclose the range of the polynomial over a box.
    pub fn eval_interval(&self, x: &RationalInterval, y: &RationalInterval) -> RationalInterval {
        let mut acc = RationalInterval::point(BigRational::zero());
        for c in self.coeffs.iter().rev() {
            acc = acc.mul(y).add(&c.eval_interval(x));
        }
        acc
    }

    /// Leading coefficient with respect to `x`, as a polynomial in `y`.
    pub fn leading_coeff_in_x(&self) -> UPoly {
        let d = self.degree_x();
        UPoly::from_coeffs(self.coeffs.iter().map(|c| c.coeff(d)).collect())
    }

    /// Exchange the roles of `x` and `y`.
    pub fn swap_variables(&self) -> Self {
        let mut coeffs = vec![vec![BigInt::zero(); self.coeffs.len()]; self.degree_x() + 1];
        for (j, c) in self.coeffs.iter().enumerate() {
            for (i, a) in c.coeffs().iter().enumerate() {
                coeffs[i][j] = a.clone();
            }
        }
        Self::from_coeffs(coeffs.into_iter().map(UPoly::from_coeffs).collect())
    }

    /// The x-shear `f(x + s*y, y)`.
    ///
    /// A point `(x, y)` of the zero set of `f` becomes the point
    /// `(x - s*y, y)` of the sheared zero set; shearing by `-s` undoes it.
    pub fn shear(&self, s: &BigInt) -> Self {
        if s.is_zero() {
            return self.clone();
        }
        let sheared_x = Self::from_coeffs(vec![UPoly::x(), UPoly::constant(s.clone())]);
        let mut result = Self::zero();
        for (j, c) in self.coeffs.iter().enumerate() {
            let mut acc = Self::zero();
            for a in c.coeffs().iter().rev() {
                acc = &(&acc * &sheared_x) + &Self::from_x_poly(UPoly::constant(a.clone()));
            }
            result = &result + &acc.shift_y(j);
        }
        result
    }
}

impl fmt::Debug for BiPoly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl fmt::Display for BiPoly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        super::text::write_bivariate(f, self)
    }
}

impl Neg for &BiPoly {
    type Output = BiPoly;

    fn neg(self) -> BiPoly {
        BiPoly {
            coeffs: self.coeffs.iter().map(|c| -c).collect(),
        }
    }
}

impl Neg for BiPoly {
    type Output = BiPoly;

    fn neg(self) -> BiPoly {
        -&self
    }
}

impl Add<&BiPoly> for &BiPoly {
    type Output = BiPoly;

    fn add(self, other: &BiPoly) -> BiPoly {
        let n = self.coeffs.len().max(other.coeffs.len());
        BiPoly::from_coeffs(
            (0..n)
                .map(|j| match (self.coeffs.get(j), other.coeffs.get(j)) {
                    (Some(a), Some(b)) => a + b,
                    (Some(a), None) => a.clone(),
                    (None, Some(b)) => b.clone(),
                    (None, None) => UPoly::zero(),
                })
                .collect(),
        )
    }
}

impl Sub<&BiPoly> for &BiPoly {
    type Output = BiPoly;

    fn sub(self, other: &BiPoly) -> BiPoly {
        self + &(-other)
    }
}

impl Mul<&BiPoly> for &BiPoly {
    type Output = BiPoly;

    fn mul(self, other: &BiPoly) -> BiPoly {
        if self.is_zero() || other.is_zero() {
            return BiPoly::zero();
        }
        let mut coeffs = vec![UPoly::zero(); self.coeffs.len() + other.coeffs.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            if a.is_zero() {
                continue;
            }
            for (j, b) in other.coeffs.iter().enumerate() {
                coeffs[i + j] = &coeffs[i + j] + &(a * b);
            }
        }
        BiPoly::from_coeffs(coeffs)
    }
}

impl Add for BiPoly {
    type Output = BiPoly;

    fn add(self, other: BiPoly) -> BiPoly {
        &self + &other
    }
}

impl Sub for BiPoly {
    type Output = BiPoly;

    fn sub(self, other: BiPoly) -> BiPoly {
        &self - &other
    }
}

impl Mul for BiPoly {
    type Output = BiPoly;

    fn mul(self, other: BiPoly) -> BiPoly {
        &self * &other
    }
}
