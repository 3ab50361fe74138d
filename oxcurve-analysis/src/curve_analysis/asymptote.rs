//! Behaviour of arcs as `x` tends to `-inf` or `+inf`.
//!
//! An arc that runs off to `x = +-inf` either converges to a real root `c`
//! of the leading coefficient in `x` (a horizontal asymptote `y = c`) or
//! diverges. Rational separators between those roots cut the plane into
//! horizontal stripes; far enough out no separator line meets the curve, so
//! the stripe of each root of the far fibre tells where its arc goes.

use super::CurveAnalysis;
use crate::error::{CurveAnalysisError, Result};
use crate::event_line::separators;
use num_rational::BigRational;
use num_traits::Zero;
use oxcurve_math::AlgebraicReal;
use std::cmp::Ordering;
use std::fmt;
use tracing::trace;

/// The two ends of the x-axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XSide {
    /// `x -> -inf`
    Left,
    /// `x -> +inf`
    Right,
}

impl XSide {
    pub(super) fn slot(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => 1,
        }
    }
}

/// Limit of the `y`-coordinate along an arc.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AsymptoticValue {
    /// `y -> -inf`
    MinusInfinity,
    /// `y` converges to a real value.
    Finite(AlgebraicReal),
    /// `y -> +inf`
    PlusInfinity,
}

impl fmt::Display for AsymptoticValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MinusInfinity => write!(f, "-inf"),
            Self::Finite(y) => write!(f, "{}", y),
            Self::PlusInfinity => write!(f, "+inf"),
        }
    }
}

impl CurveAnalysis {
    /// Where arc `arc` of the outermost interval on `side` goes as `x`
    /// tends to infinity. Arcs are numbered from below.
    pub fn asymptotic_value_of_arc(&self, side: XSide, arc: usize) -> Result<AsymptoticValue> {
        let values = self.asymptotic_values(side)?;
        values
            .get(arc)
            .cloned()
            .ok_or_else(|| CurveAnalysisError::out_of_range("arc", arc, values.len()))
    }

    /// Limits of all arcs of the outermost interval on `side`.
    pub fn asymptotic_values(&self, side: XSide) -> Result<&[AsymptoticValue]> {
        let cell = &self.asymptotes[side.slot()];
        if let Some(values) = cell.get() {
            return Ok(values);
        }
        let computed = self.compute_asymptotic_values(side)?;
        Ok(cell.get_or_init(|| computed))
    }

    fn compute_asymptotic_values(&self, side: XSide) -> Result<Vec<AsymptoticValue>> {
        let primitive = self.primitive_polynomial_2()?;
        let limits = self.kernel.isolate(&primitive.leading_coeff_in_x());
        let stripes = separators(&limits)?;
        // Beyond every root of f(x, t) for each separator t
        let reach = stripes
            .iter()
            .map(|t| primitive.eval_y(t).cauchy_bound())
            .max()
            .unwrap_or_else(BigRational::zero);
        let n = self.number_of_status_lines_with_event()?;
        let x = match side {
            XSide::Left => self.bound_value_in_interval(0)?.min(-reach),
            XSide::Right => self.bound_value_in_interval(n)?.max(reach),
        };
        let values: Vec<AsymptoticValue> = self
            .roots_over_rational(&x)?
            .iter()
            .map(|y| {
                let stripe = stripes
                    .iter()
                    .take_while(|t| y.compare_rational(t) == Ordering::Greater)
                    .count();
                if stripe == 0 {
                    AsymptoticValue::MinusInfinity
                } else if stripe > limits.len() {
                    AsymptoticValue::PlusInfinity
                } else {
                    AsymptoticValue::Finite(limits[stripe - 1].clone())
                }
            })
            .collect();
        trace!(side = ?side, x = %x, arcs = values.len(), "classified asymptotic arcs");
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxcurve_math::BiPoly;

    #[test]
    fn test_parabola_diverges() {
        // y^2 - x: both arcs at x = +inf diverge, none exist at -inf
        let engine = CurveAnalysis::from_polynomial(BiPoly::from_terms(&[(1, 0, 2), (-1, 1, 0)]));
        assert_eq!(
            engine.asymptotic_values(XSide::Right).map(<[_]>::to_vec),
            Ok(vec![AsymptoticValue::MinusInfinity, AsymptoticValue::PlusInfinity])
        );
        assert_eq!(engine.asymptotic_values(XSide::Left).map(<[_]>::len), Ok(0));
        assert!(engine.asymptotic_value_of_arc(XSide::Left, 0).is_err());
    }

    #[test]
    fn test_hyperbola_converges() {
        // x*y - 1 approaches y = 0 on both sides
        let engine = CurveAnalysis::from_polynomial(BiPoly::from_terms(&[(1, 1, 1), (-1, 0, 0)]));
        let zero = AsymptoticValue::Finite(AlgebraicReal::from_integer(0));
        assert_eq!(engine.asymptotic_value_of_arc(XSide::Left, 0), Ok(zero.clone()));
        assert_eq!(engine.asymptotic_value_of_arc(XSide::Right, 0), Ok(zero));
    }

    #[test]
    fn test_horizontal_lines() {
        // y^2 - 1 keeps both lines at y = -1 and y = 1
        let engine = CurveAnalysis::from_polynomial(BiPoly::from_terms(&[(1, 0, 2), (-1, 0, 0)]));
        let values = engine.asymptotic_values(XSide::Right).expect("values");
        assert_eq!(values.len(), 2);
        assert_eq!(values[0].to_string(), "-1");
        assert_eq!(values[1].to_string(), "1");
    }
}
