//! Real root isolation for integer polynomials.
//!
//! Sturm-sequence bisection on `(-B, B)` with `B` the Cauchy bound. Split
//! points are never roots: when a midpoint is a root it is reported exactly
//! and the two halves are cut at a safe distance from it. Every isolated
//! root then goes through rational detection, so rational roots come back
//! exact and interval-represented roots are irrational.

use super::number::AlgebraicReal;
use crate::error::Result;
use crate::polynomial::{SturmSequence, UPoly};
use num_bigint::Sign;
use num_rational::BigRational;
use num_traits::Zero;
use tracing::trace;

/// Distinct real roots of `p` in increasing order.
pub fn real_roots(p: &UPoly) -> Vec<AlgebraicReal> {
    if p.is_constant() {
        return Vec::new();
    }
    isolate_square_free(&p.square_free_part())
}

/// Distinct real roots of `p` with their multiplicities, in increasing
/// order.
pub fn real_roots_with_multiplicities(p: &UPoly) -> Vec<(AlgebraicReal, u32)> {
    let mut roots: Vec<(AlgebraicReal, u32)> = p
        .square_free_factorization()
        .into_iter()
        .flat_map(|(factor, m)| {
            isolate_square_free(&factor)
                .into_iter()
                .map(move |root| (root, m))
        })
        .collect();
    roots.sort_by(|a, b| a.0.cmp(&b.0));
    roots
}

/// Number of distinct real roots of `p`.
pub fn count_real_roots(p: &UPoly) -> usize {
    if p.is_constant() {
        return 0;
    }
    SturmSequence::new(p).count_all()
}

/// Isolate the roots of a square-free polynomial.
fn isolate_square_free(p: &UPoly) -> Vec<AlgebraicReal> {
    match p.degree() {
        0 => return Vec::new(),
        1 => {
            let root = BigRational::new(-p.coeff(0), p.coeff(1));
            return vec![AlgebraicReal::from_rational(root)];
        }
        _ => {}
    }
    let sturm = SturmSequence::new(p);
    let bound = p.cauchy_bound();
    let mut pending = vec![(-bound.clone(), bound)];
    let mut exact = Vec::new();
    let mut isolated = Vec::new();
    while let Some((lo, hi)) = pending.pop() {
        match sturm.count_open(&lo, &hi) {
            0 => continue,
            1 => {
                isolated.push((lo, hi));
                continue;
            }
            _ => {}
        }
        let mid = (&lo + &hi) / BigRational::from_integer(2.into());
        if p.sign_at(&mid) != Sign::NoSign {
            pending.push((lo, mid.clone()));
            pending.push((mid, hi));
            continue;
        }
        // Cut around the rational root so that neither half ends on a root.
        let mut delta = (&hi - &lo) / BigRational::from_integer(4.into());
        while sturm.count_closed(&(&mid - &delta), &(&mid + &delta)) != 1 {
            delta = delta / BigRational::from_integer(2.into());
        }
        pending.push((lo, &mid - &delta));
        pending.push((&mid + &delta, hi));
        exact.push(mid);
    }
    trace!(
        degree = p.degree(),
        rational = exact.len(),
        intervals = isolated.len(),
        "isolated real roots"
    );
    let mut roots: Vec<AlgebraicReal> = exact
        .into_iter()
        .map(AlgebraicReal::from_rational)
        .chain(isolated.into_iter().map(|(lo, hi)| {
            let sign_lo = p.sign_at(&lo);
            let root = AlgebraicReal::from_isolated(p.clone(), lo, hi, sign_lo);
            root.detect_rational();
            root
        }))
        .collect();
    roots.sort_by_key(AlgebraicReal::lower);
    roots
}

/// Sign of `p` on each of the open cells between consecutive roots: one
/// entry more than there are roots.
///
/// Fails when `roots` is not strictly increasing.
pub fn signs_between_roots(p: &UPoly, roots: &[AlgebraicReal]) -> Result<Vec<Sign>> {
    if p.is_zero() {
        return Ok(vec![Sign::NoSign; roots.len() + 1]);
    }
    let mut samples = Vec::with_capacity(roots.len() + 1);
    match (roots.first(), roots.last()) {
        (Some(first), Some(last)) => {
            samples.push(first.lower().floor() - BigRational::from_integer(1.into()));
            for pair in roots.windows(2) {
                samples.push(super::bound_between(&pair[0], &pair[1])?);
            }
            samples.push(last.upper().ceil() + BigRational::from_integer(1.into()));
        }
        _ => samples.push(BigRational::zero()),
    }
    Ok(samples.iter().map(|s| p.sign_at(s)).collect())
}
