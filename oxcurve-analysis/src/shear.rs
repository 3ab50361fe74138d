//! Shear transformations.
//!
//! A curve in non-generic position (two critical points over one `x`, or a
//! singular point the fibre alone cannot resolve) is put into generic
//! position by the substitution `x -> x + s*y`. The sheared curve has the
//! same points as the original, moved by `(x, y) -> (x - s*y, y)`.
//!
//! The critical points of the original curve are recovered in the sheared
//! coordinates, where each of them sits alone over its own `u = x - s*y`:
//! with `P_s` and `Q_s` the sheared curve and sheared `y`-derivative, the
//! critical `u` are the roots of `sRes_0(P_s, Q_s)` and the unique critical
//! `y` over such a `u` is the root of the linear subresultant `sRes_1`.
//!
//! ## References
//!
//! - Eigenwillig, Kerber, Wolpert: "Fast and exact geometric analysis of
//!   real algebraic plane curves" (2007)
//! - Basu, Pollack, Roy: "Algorithms in Real Algebraic Geometry", ch. 8

use num_bigint::{BigInt, Sign};
use num_rational::BigRational;
use oxcurve_math::polynomial::subresultant::signed_subresultant;
use oxcurve_math::{AlgebraicKernel, AlgebraicReal, BiPoly, RationalInterval, UPoly};
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;
use tracing::trace;

/// Produces shear factors `1, -1, 2, -2, ...`, skipping known failures.
#[derive(Debug, Clone, Default)]
pub struct ShearController {
    cursor: u64,
    failed: BTreeSet<i64>,
}

impl ShearController {
    /// Create a controller at the start of the sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// The next factor that has not been reported as failed.
    pub fn get_shear_factor(&mut self) -> i64 {
        loop {
            let magnitude = (self.cursor / 2 + 1) as i64;
            let factor = if self.cursor % 2 == 0 {
                magnitude
            } else {
                -magnitude
            };
            self.cursor += 1;
            if !self.failed.contains(&factor) {
                return factor;
            }
        }
    }

    /// Remember that `factor` did not work.
    pub fn report_failure(&mut self, factor: i64) {
        self.failed.insert(factor);
    }

    /// Whether `factor` has been reported as failed.
    pub fn has_failed(&self, factor: i64) -> bool {
        self.failed.contains(&factor)
    }
}

/// The substitution `x -> x + s*y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShearTransformation {
    factor: i64,
}

impl ShearTransformation {
    /// Shear by `factor`.
    pub fn new(factor: i64) -> Self {
        Self { factor }
    }

    /// The shear factor.
    pub fn factor(&self) -> i64 {
        self.factor
    }

    /// The transformation undoing this one.
    pub fn inverse(&self) -> Self {
        Self {
            factor: -self.factor,
        }
    }

    /// `f(x + s*y, y)`.
    pub fn apply(&self, f: &BiPoly) -> BiPoly {
        f.shear(&BigInt::from(self.factor))
    }

    /// Map an enclosure of a sheared point back to an `x` enclosure:
    /// `x = u + s*y`.
    pub fn unshear_x(&self, u: &RationalInterval, y: &RationalInterval) -> RationalInterval {
        let s = BigRational::from_integer(BigInt::from(self.factor));
        u.add(&y.scale(&s))
    }

    /// The critical points of `primitive`, that is the common real zeros of
    /// the curve and its `y`-derivative, found in sheared coordinates.
    ///
    /// Returns `None` when this shear does not separate them: the sheared
    /// curve is not `y`-regular, or two critical points share a sheared
    /// abscissa, or the sheared curve has a tangency of higher order.
    pub fn critical_points(
        &self,
        kernel: &AlgebraicKernel,
        primitive: &BiPoly,
    ) -> Option<Vec<CriticalPoint>> {
        let p_s = self.apply(primitive);
        if !p_s.is_y_regular() {
            trace!(factor = self.factor, "sheared curve is not y-regular");
            return None;
        }
        let q_s = self.apply(&primitive.derivative_y());
        if q_s.is_zero() {
            return Some(Vec::new());
        }
        if q_s.degree_y() >= p_s.degree_y() {
            return None;
        }
        let resultant = signed_subresultant(&p_s, &q_s, 0).coeff(0);
        if resultant.is_zero() {
            return None;
        }
        let roots = kernel.isolate(&resultant);
        if roots.is_empty() {
            return Some(Vec::new());
        }
        let linear = signed_subresultant(&p_s, &q_s, 1);
        let (denominator, numerator) = (linear.coeff(1), -&linear.coeff(0));
        let mut points = Vec::with_capacity(roots.len());
        for u in roots {
            if kernel.sign_at(&denominator, &u) == Sign::NoSign {
                trace!(factor = self.factor, u = %u, "degenerate sheared fibre");
                return None;
            }
            points.push(CriticalPoint {
                u,
                numerator: numerator.clone(),
                denominator: denominator.clone(),
                shear: *self,
            });
        }
        trace!(factor = self.factor, count = points.len(), "critical points");
        Some(points)
    }
}

/// A critical point `(x, y)` of the original curve, known through its
/// sheared abscissa `u` and `y = numerator(u) / denominator(u)`.
#[derive(Debug, Clone)]
pub struct CriticalPoint {
    u: AlgebraicReal,
    numerator: UPoly,
    denominator: UPoly,
    shear: ShearTransformation,
}

impl CriticalPoint {
    /// The sheared abscissa.
    pub fn u(&self) -> &AlgebraicReal {
        &self.u
    }

    /// An enclosure of `y`, or `None` while the denominator enclosure still
    /// contains zero.
    pub fn y_enclosure(&self) -> Option<RationalInterval> {
        let u = self.u.enclosure();
        let den = self.denominator.eval_interval(&u);
        self.numerator.eval_interval(&u).div(&den)
    }

    /// An enclosure of the original `x`.
    pub fn x_enclosure(&self) -> Option<RationalInterval> {
        let y = self.y_enclosure()?;
        Some(self.shear.unshear_x(&self.u.enclosure(), &y))
    }

    /// Halve the isolating interval of `u`.
    pub fn refine(&self) {
        self.u.refine();
    }
}

/// Handle of an engine stored in a [`ShearRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ShearHandle(usize);

/// Arena of sheared analyses, addressed by shear factor.
///
/// Sheared copies are owned by the arena and shared out through `Rc`, so a
/// copy of the owning engine shares them too.
#[derive(Debug, Clone)]
pub struct ShearRegistry<T> {
    arena: Vec<Rc<T>>,
    by_factor: BTreeMap<i64, ShearHandle>,
}

impl<T> Default for ShearRegistry<T> {
    fn default() -> Self {
        Self {
            arena: Vec::new(),
            by_factor: BTreeMap::new(),
        }
    }
}

impl<T> ShearRegistry<T> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the analysis for `factor`.
    pub fn insert(&mut self, factor: i64, engine: Rc<T>) -> ShearHandle {
        let handle = ShearHandle(self.arena.len());
        self.arena.push(engine);
        self.by_factor.insert(factor, handle);
        handle
    }

    /// The analysis for `factor`, if one was stored.
    pub fn get(&self, factor: i64) -> Option<Rc<T>> {
        self.by_factor.get(&factor).and_then(|h| self.resolve(*h))
    }

    /// The analysis behind a handle.
    pub fn resolve(&self, handle: ShearHandle) -> Option<Rc<T>> {
        self.arena.get(handle.0).cloned()
    }

    /// Number of stored analyses.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Whether no analysis is stored.
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factor_sequence_skips_failures() {
        let mut controller = ShearController::new();
        assert_eq!(controller.get_shear_factor(), 1);
        assert_eq!(controller.get_shear_factor(), -1);
        controller.report_failure(-2);
        assert!(controller.has_failed(-2));
        assert_eq!(controller.get_shear_factor(), 2);
        assert_eq!(controller.get_shear_factor(), 3);
    }

    #[test]
    fn test_registry() {
        let mut registry: ShearRegistry<&str> = ShearRegistry::new();
        assert!(registry.is_empty());
        let h = registry.insert(2, Rc::new("sheared"));
        assert_eq!(registry.get(2).as_deref(), Some(&"sheared"));
        assert_eq!(registry.resolve(h).as_deref(), Some(&"sheared"));
        assert!(registry.get(3).is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_critical_points_of_node() {
        // (y - x)(y + x): one node at the origin
        let kernel = AlgebraicKernel::default();
        let f = BiPoly::from_terms(&[(1, 0, 2), (-1, 2, 0)]);
        let points = ShearTransformation::new(2)
            .critical_points(&kernel, &f)
            .expect("shear by 2 is generic");
        assert_eq!(points.len(), 1);
        let x = points[0].x_enclosure().expect("denominator is nonzero");
        let y = points[0].y_enclosure().expect("denominator is nonzero");
        assert!(x.contains_zero() && y.contains_zero());
    }

    #[test]
    fn test_critical_points_of_circle() {
        // x^2 + y^2 - 1: vertical tangents at (-1, 0) and (1, 0)
        let kernel = AlgebraicKernel::default();
        let f = BiPoly::from_terms(&[(1, 2, 0), (1, 0, 2), (-1, 0, 0)]);
        let points = ShearTransformation::new(1)
            .critical_points(&kernel, &f)
            .expect("shear by 1 is generic");
        assert_eq!(points.len(), 2);
        let first = points[0].x_enclosure().expect("enclosure");
        let one = BigRational::from_integer(BigInt::from(1));
        let shifted = first.add(&RationalInterval::point(one));
        assert!(shifted.contains_zero());
    }

    #[test]
    fn test_vertical_shear_is_rejected() {
        // y - x sheared by 1 becomes -x, which is not y-regular
        let kernel = AlgebraicKernel::default();
        let f = BiPoly::from_terms(&[(1, 0, 1), (-1, 1, 0)]);
        assert!(ShearTransformation::new(1).critical_points(&kernel, &f).is_none());
        assert_eq!(ShearTransformation::new(3).inverse().factor(), -3);
    }
}
