//! Construction of status lines over events.
//!
//! Over an event `alpha` the builder needs the distinct real roots of
//! `P(alpha, y)` and, for each of them, the number of arcs arriving from the
//! left and leaving to the right.
//!
//! The number of roots comes from the Sturm-Habicht sequence of the fibre
//! truncated to its actual degree, evaluated at `alpha`. The arcs are
//! counted exactly: rational separators between the fibre roots are chosen,
//! a neighbourhood of `alpha` is shrunk until no separator line meets the
//! curve over it, and the roots over both ends of the neighbourhood are
//! sorted into the cells between the separators.
//!
//! Finding the roots themselves is the hard part when `alpha` is irrational.
//! The direct route only accepts events where this is possible from the
//! fibre alone (at most one multiple root, with known multiplicity);
//! everything else is reported as non-generic and left to the shear route.

use crate::config::LeadingCoefficientPolicy;
use crate::error::Result;
use crate::event::EventCoordinate;
use crate::shear::CriticalPoint;
use crate::status_line::{ArcCounts, AsymptoteCounts, StatusLine, StatusPoint};
use num_bigint::{BigInt, Sign};
use num_rational::BigRational;
use num_traits::{One, Zero};
use oxcurve_math::algebraic::{bound_between, bound_left, bound_right};
use oxcurve_math::polynomial::subresultant::{permanences_minus_variations, sturm_habicht_sequence};
use oxcurve_math::{AlgebraicKernel, AlgebraicReal, BiPoly, SturmSequence};
use smallvec::SmallVec;
use std::borrow::Cow;
use std::cmp::Ordering;
use tracing::trace;

/// Result of the direct construction.
#[derive(Debug)]
pub(crate) enum BuildOutcome {
    Line(StatusLine),
    NonGeneric,
}

/// An event together with the rational interval representatives around it.
#[derive(Debug, Clone, Copy)]
pub(crate) struct EventSlot<'a> {
    pub index: usize,
    pub event: &'a EventCoordinate,
    /// Representative of the interval left of the event.
    pub left: &'a BigRational,
    /// Representative of the interval right of the event.
    pub right: &'a BigRational,
}

/// What the Sturm-Habicht sequence says about one fibre.
#[derive(Debug)]
struct FibreStructure<'s> {
    /// Actual degree of `P(alpha, y)`.
    degree: usize,
    /// Number of distinct real roots.
    roots: usize,
    /// Degree of `gcd(P(alpha, y), P_y(alpha, y))`.
    gcd_degree: usize,
    /// Sturm-Habicht sequence of the truncated fibre.
    sequence: Cow<'s, [BiPoly]>,
}

/// Builds event lines of one primitive, square-free curve.
pub(crate) struct EventLineBuilder<'a> {
    kernel: &'a AlgebraicKernel,
    primitive: &'a BiPoly,
    sturm_habicht: &'a [BiPoly],
    policy: LeadingCoefficientPolicy,
}

impl<'a> EventLineBuilder<'a> {
    pub fn new(
        kernel: &'a AlgebraicKernel,
        primitive: &'a BiPoly,
        sturm_habicht: &'a [BiPoly],
        policy: LeadingCoefficientPolicy,
    ) -> Self {
        Self {
            kernel,
            primitive,
            sturm_habicht,
            policy,
        }
    }

    /// Build the line from the fibre alone, if the event allows it.
    pub fn build_direct(&self, slot: EventSlot<'_>) -> Result<BuildOutcome> {
        let alpha = &slot.event.x;
        let fibre = self.fibre_structure(alpha);
        let lcoeff_vanishes = fibre.degree < self.primitive.degree_y();
        if lcoeff_vanishes
            && (self.policy == LeadingCoefficientPolicy::Strict || fibre.gcd_degree > 0)
        {
            trace!(index = slot.index, x = %alpha, "leading coefficient vanishes at event");
            return Ok(BuildOutcome::NonGeneric);
        }
        if fibre.gcd_degree >= 2 && !self.has_single_multiple_root(alpha, &fibre) {
            trace!(
                index = slot.index,
                x = %alpha,
                gcd_degree = fibre.gcd_degree,
                "several multiple roots over event"
            );
            return Ok(BuildOutcome::NonGeneric);
        }
        let ys = match alpha.to_rational() {
            Some(q) => self.kernel.isolate(&self.primitive.eval_x(&q)),
            None => self.kernel.fibre_roots(self.primitive, alpha, fibre.roots),
        };
        self.build_from_points(slot, ys).map(BuildOutcome::Line)
    }

    /// Build the line over a rational event by exact isolation.
    pub fn build_rational(&self, slot: EventSlot<'_>, q: &BigRational) -> Result<StatusLine> {
        let ys = self.kernel.isolate(&self.primitive.eval_x(q));
        self.build_from_points(slot, ys)
    }

    /// Build the line given the critical points over the event, as found in
    /// sheared coordinates.
    pub fn build_with_critical_points(
        &self,
        slot: EventSlot<'_>,
        critical: &[CriticalPoint],
    ) -> Result<StatusLine> {
        let alpha = &slot.event.x;
        let candidates = self.kernel.fibre_candidates(self.primitive, alpha);
        let mut confirmed = vec![false; candidates.len()];
        for point in critical {
            let i = identify_candidate(point, &candidates);
            confirmed[i] = true;
        }
        let ys = if alpha.is_rational() {
            candidates
        } else {
            let count = self.fibre_structure(alpha).roots;
            self.kernel
                .select_fibre_roots(self.primitive, alpha, candidates, &confirmed, count)
        };
        self.build_from_points(slot, ys)
    }

    /// Attach exact arc counts to known fibre roots.
    pub fn build_from_points(
        &self,
        slot: EventSlot<'_>,
        ys: Vec<AlgebraicReal>,
    ) -> Result<StatusLine> {
        let alpha = &slot.event.x;
        let (arcs, asymptotes) = self.local_arcs(alpha, &ys, slot.left, slot.right)?;
        let points = ys
            .into_iter()
            .zip(arcs)
            .map(|(y, arcs)| StatusPoint { y, arcs })
            .collect();
        let mut line = StatusLine::for_event(alpha.clone(), slot.index, points, asymptotes);
        line.set_vertical_line(slot.event.is_content_root());
        trace!(line = %line, "built event line");
        Ok(line)
    }

    fn fibre_structure(&self, alpha: &AlgebraicReal) -> FibreStructure<'a> {
        let deg = self.primitive.degree_y();
        let degree = (0..=deg)
            .rev()
            .find(|&j| self.kernel.sign_at(&self.primitive.coeff(j), alpha) != Sign::NoSign)
            .unwrap_or(0);
        let sequence = if degree == deg {
            Cow::Borrowed(self.sturm_habicht)
        } else {
            Cow::Owned(sturm_habicht_sequence(&self.primitive.truncate_y(degree)))
        };
        let signs: Vec<Sign> = sequence
            .iter()
            .enumerate()
            .map(|(j, member)| self.kernel.sign_at(&member.coeff(j), alpha))
            .collect();
        let roots = usize::try_from(permanences_minus_variations(&signs)).unwrap_or(0);
        let gcd_degree = signs
            .iter()
            .position(|s| *s != Sign::NoSign)
            .unwrap_or(degree);
        FibreStructure {
            degree,
            roots,
            gcd_degree,
            sequence,
        }
    }

    /// Whether the gcd of the fibre and its derivative is `(y - r)^k`.
    ///
    /// With `G = StHa_k = sum G_j y^j` the gcd up to a factor, this holds iff
    /// `G_j * k^(k-j) * G_k^(k-j-1) = C(k, j) * G_(k-1)^(k-j)` at `alpha` for
    /// every `j < k - 1`.
    fn has_single_multiple_root(
        &self,
        alpha: &AlgebraicReal,
        fibre: &FibreStructure<'_>,
    ) -> bool {
        let k = fibre.gcd_degree;
        let Some(g) = fibre.sequence.get(k) else {
            return false;
        };
        let lc = g.coeff(k);
        let b = g.coeff(k - 1);
        let mut binomial = BigInt::one();
        for j in 0..k - 1 {
            if j > 0 {
                binomial = binomial * BigInt::from(k - j + 1) / BigInt::from(j);
            }
            let power = (k - j) as u32;
            let lhs = g
                .coeff(j)
                .scale(&num_traits::pow(BigInt::from(k), k - j))
                * lc.pow(power - 1);
            let rhs = b.pow(power).scale(&binomial);
            if self.kernel.sign_at(&(lhs - rhs), alpha) != Sign::NoSign {
                return false;
            }
        }
        true
    }

    /// Exact arc counts at the points `ys` over `alpha`.
    fn local_arcs(
        &self,
        alpha: &AlgebraicReal,
        ys: &[AlgebraicReal],
        left: &BigRational,
        right: &BigRational,
    ) -> Result<(Vec<ArcCounts>, AsymptoteCounts)> {
        let separators = separators(ys)?;
        let lines: Vec<SturmSequence> = separators
            .iter()
            .map(|s| SturmSequence::new(&self.primitive.eval_y(s)))
            .collect();
        let (lo, hi) = neighbourhood(alpha, left, right, &lines);
        let before = self.cell_counts(&lo, &separators);
        let after = self.cell_counts(&hi, &separators);
        let n = ys.len();
        let arcs = (1..=n)
            .map(|cell| ArcCounts {
                left: before[cell],
                right: after[cell],
            })
            .collect();
        let asymptotes = AsymptoteCounts {
            left_minus: before[0],
            left_plus: before[n + 1],
            right_minus: after[0],
            right_plus: after[n + 1],
        };
        Ok((arcs, asymptotes))
    }

    /// How many roots of `P(x0, y)` lie in each cell cut out by the
    /// separators.
    fn cell_counts(&self, x0: &BigRational, separators: &[BigRational]) -> Vec<usize> {
        let mut counts = vec![0; separators.len() + 1];
        for root in self.kernel.isolate(&self.primitive.eval_x(x0)) {
            let cell = separators
                .iter()
                .take_while(|s| root.compare_rational(s) == Ordering::Greater)
                .count();
            counts[cell] += 1;
        }
        counts
    }
}

/// Rationals `s_0 < y_1 < s_1 < ... < y_n < s_n`.
pub(crate) fn separators(ys: &[AlgebraicReal]) -> Result<Vec<BigRational>> {
    let (Some(first), Some(last)) = (ys.first(), ys.last()) else {
        return Ok(vec![BigRational::zero()]);
    };
    let mut out = Vec::with_capacity(ys.len() + 1);
    out.push(bound_left(first));
    for pair in ys.windows(2) {
        out.push(bound_between(&pair[0], &pair[1])?);
    }
    out.push(bound_right(last));
    Ok(out)
}

/// A rational neighbourhood `(lo, hi)` of `alpha` inside `(left, right)`
/// over which no separator line `y = s` meets the curve.
fn neighbourhood(
    alpha: &AlgebraicReal,
    left: &BigRational,
    right: &BigRational,
    lines: &[SturmSequence],
) -> (BigRational, BigRational) {
    let clear = |lo: &BigRational, hi: &BigRational| {
        lines.iter().all(|line| line.count_closed(lo, hi) == 0)
    };
    match alpha.to_rational() {
        Some(q) => {
            let two = BigRational::from_integer(BigInt::from(2));
            let mut delta = (&q - left).min(right - &q) / &two;
            loop {
                let (lo, hi) = (&q - &delta, &q + &delta);
                if clear(&lo, &hi) {
                    return (lo, hi);
                }
                delta = delta / &two;
            }
        }
        None => loop {
            let (lo, hi) = (alpha.lower(), alpha.upper());
            if lo > *left && hi < *right && clear(&lo, &hi) {
                return (lo, hi);
            }
            alpha.refine();
        },
    }
}

/// Index of the unique candidate equal to the critical `y`.
fn identify_candidate(point: &CriticalPoint, candidates: &[AlgebraicReal]) -> usize {
    loop {
        if let Some(y) = point.y_enclosure() {
            let hits: SmallVec<[usize; 2]> = candidates
                .iter()
                .enumerate()
                .filter(|(_, c)| c.enclosure().intersects(&y))
                .map(|(i, _)| i)
                .collect();
            if let [only] = hits.as_slice() {
                return *only;
            }
            for &i in &hits {
                candidates[i].refine();
            }
        }
        point.refine();
    }
}
