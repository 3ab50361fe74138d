//! The algebraic kernel.
//!
//! [`AlgebraicKernel`] bundles the exact univariate services a curve
//! analysis needs: real root isolation with multiplicities, comparison and
//! refinement of algebraic numbers, sign evaluation, rational bounds, and
//! the solution of a bivariate polynomial over an algebraic `x`. Engines
//! share one kernel through an `Rc`, so the statistics cover a whole
//! analysis including its sheared copies.

use crate::algebraic::{self, AlgebraicReal};
use crate::error::Result;
use crate::polynomial::{subresultant, BiPoly, UPoly};
use num_bigint::{BigInt, Sign};
use num_rational::BigRational;
use num_traits::One;
use std::cell::Cell;
use std::cmp::Ordering;
use tracing::trace;

/// Configuration for the algebraic kernel.
#[derive(Debug, Clone)]
pub struct KernelConfig {
    /// Width that refinement helpers aim for when no precision is given.
    pub default_precision: BigRational,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            default_precision: BigRational::new(BigInt::one(), BigInt::from(1u64 << 20)),
        }
    }
}

/// Statistics for the algebraic kernel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KernelStats {
    /// Number of univariate root isolations.
    pub isolations: u64,
    /// Number of comparisons between algebraic numbers.
    pub comparisons: u64,
    /// Number of polynomial sign evaluations at algebraic numbers.
    pub sign_evaluations: u64,
    /// Number of rational bounds produced.
    pub bounds: u64,
    /// Number of explicit refinement requests.
    pub refinements: u64,
    /// Number of fibres solved over an algebraic `x`.
    pub fibres: u64,
}

/// Exact univariate algebra shared by curve analyses.
#[derive(Debug, Default)]
pub struct AlgebraicKernel {
    config: KernelConfig,
    stats: Cell<KernelStats>,
}

impl AlgebraicKernel {
    /// Create a kernel with the given configuration.
    pub fn new(config: KernelConfig) -> Self {
        Self {
            config,
            stats: Cell::new(KernelStats::default()),
        }
    }

    /// The configuration.
    pub fn config(&self) -> &KernelConfig {
        &self.config
    }

    /// A snapshot of the statistics.
    pub fn stats(&self) -> KernelStats {
        self.stats.get()
    }

    /// Reset the statistics.
    pub fn reset_stats(&self) {
        self.stats.set(KernelStats::default());
    }

    fn bump(&self, update: impl FnOnce(&mut KernelStats)) {
        let mut stats = self.stats.get();
        update(&mut stats);
        self.stats.set(stats);
    }

    /// Distinct real roots in increasing order.
    pub fn isolate(&self, p: &UPoly) -> Vec<AlgebraicReal> {
        self.bump(|s| s.isolations += 1);
        algebraic::real_roots(p)
    }

    /// Distinct real roots with multiplicities, in increasing order.
    pub fn isolate_with_multiplicities(&self, p: &UPoly) -> Vec<(AlgebraicReal, u32)> {
        self.bump(|s| s.isolations += 1);
        algebraic::real_roots_with_multiplicities(p)
    }

    /// Exact comparison.
    pub fn compare(&self, a: &AlgebraicReal, b: &AlgebraicReal) -> Ordering {
        self.bump(|s| s.comparisons += 1);
        a.compare(b)
    }

    /// Sign of `p` at `a`.
    pub fn sign_at(&self, p: &UPoly, a: &AlgebraicReal) -> Sign {
        self.bump(|s| s.sign_evaluations += 1);
        a.sign_of(p)
    }

    /// A rational strictly between `a < b`.
    pub fn bound_between(&self, a: &AlgebraicReal, b: &AlgebraicReal) -> Result<BigRational> {
        self.bump(|s| s.bounds += 1);
        algebraic::bound_between(a, b)
    }

    /// A rational strictly left of `a`.
    pub fn bound_left(&self, a: &AlgebraicReal) -> BigRational {
        self.bump(|s| s.bounds += 1);
        algebraic::bound_left(a)
    }

    /// A rational strictly right of `a`.
    pub fn bound_right(&self, a: &AlgebraicReal) -> BigRational {
        self.bump(|s| s.bounds += 1);
        algebraic::bound_right(a)
    }

    /// Refine `a` to the given width, or to the default precision.
    pub fn refine(&self, a: &AlgebraicReal, precision: Option<&BigRational>) {
        self.bump(|s| s.refinements += 1);
        a.refine_to(precision.unwrap_or(&self.config.default_precision));
    }

    /// A nonzero polynomial in `y` vanishing at every `y` with `f(alpha, y) = 0`.
    ///
    /// For rational `alpha` this is the fibre itself. Otherwise it is the
    /// resultant with respect to `x` of `f` and the defining polynomial of
    /// `alpha`, which also picks up the fibres over the conjugates of
    /// `alpha`. `f` must be primitive with respect to `y`.
    pub fn fibre_polynomial(&self, f: &BiPoly, alpha: &AlgebraicReal) -> UPoly {
        if let Some(q) = alpha.to_rational() {
            return f.eval_x(&q);
        }
        let in_x = f.swap_variables();
        let m = BiPoly::from_y_poly(&alpha.defining_polynomial());
        subresultant::sylvester_resultant(&in_x, &m)
    }

    /// Candidate `y`-coordinates over `alpha`, in increasing order.
    pub fn fibre_candidates(&self, f: &BiPoly, alpha: &AlgebraicReal) -> Vec<AlgebraicReal> {
        self.isolate(&self.fibre_polynomial(f, alpha))
    }

    /// Pick the `count` true roots of `f(alpha, y)` out of `candidates`.
    ///
    /// Candidates flagged in `confirmed` are known roots and are kept
    /// untested. The others are refined together with `alpha` until interval
    /// evaluation has excluded all but `count` of the candidates; a true root
    /// is never excluded, so the survivors are exactly the roots.
    pub fn select_fibre_roots(
        &self,
        f: &BiPoly,
        alpha: &AlgebraicReal,
        candidates: Vec<AlgebraicReal>,
        confirmed: &[bool],
        count: usize,
    ) -> Vec<AlgebraicReal> {
        self.bump(|s| s.fibres += 1);
        let mut alive = vec![true; candidates.len()];
        let mut rounds = 0usize;
        while alive.iter().filter(|a| **a).count() > count {
            let x_box = alpha.enclosure();
            for (i, c) in candidates.iter().enumerate() {
                if !alive[i] || confirmed.get(i).copied().unwrap_or(false) {
                    continue;
                }
                if !f.eval_interval(&x_box, &c.enclosure()).contains_zero() {
                    alive[i] = false;
                }
            }
            if alive.iter().filter(|a| **a).count() <= count {
                break;
            }
            alpha.refine();
            for (i, c) in candidates.iter().enumerate() {
                if alive[i] && !confirmed.get(i).copied().unwrap_or(false) {
                    c.refine();
                }
            }
            rounds += 1;
        }
        trace!(
            candidates = candidates.len(),
            count,
            rounds,
            "selected fibre roots"
        );
        candidates
            .into_iter()
            .zip(alive)
            .filter_map(|(c, keep)| keep.then_some(c))
            .collect()
    }

    /// The distinct real roots of `f(alpha, y)`, given how many there are.
    pub fn fibre_roots(&self, f: &BiPoly, alpha: &AlgebraicReal, count: usize) -> Vec<AlgebraicReal> {
        let candidates = self.fibre_candidates(f, alpha);
        if alpha.is_rational() {
            self.bump(|s| s.fibres += 1);
            return candidates;
        }
        self.select_fibre_roots(f, alpha, candidates, &[], count)
    }
}
