//! Property-based tests for root counting, isolation and refinement

use num_bigint::{BigInt, Sign};
use num_rational::BigRational;
use oxcurve_math::algebraic::{real_roots, real_roots_with_multiplicities};
use oxcurve_math::polynomial::subresultant::{
    permanences_minus_variations, principal_coefficients, sturm_habicht_sequence,
};
use oxcurve_math::polynomial::{BiPoly, SturmSequence, UPoly};
use proptest::prelude::*;

fn rat(n: i64, d: i64) -> BigRational {
    BigRational::new(BigInt::from(n), BigInt::from(d))
}

/// Product of `(x - r)` over the given integer roots.
fn from_roots(roots: &[i64]) -> UPoly {
    roots
        .iter()
        .fold(UPoly::one(), |acc, r| &acc * &UPoly::from_i64(&[-r, 1]))
}

proptest! {
    /// Isolation finds exactly the distinct integer roots, exactly
    #[test]
    fn isolation_recovers_integer_roots(roots in prop::collection::vec(-8i64..=8, 1..=5)) {
        let p = from_roots(&roots);
        let mut expected = roots.clone();
        expected.sort_unstable();
        expected.dedup();
        let found: Vec<Option<BigRational>> = real_roots(&p).iter().map(|r| r.to_rational()).collect();
        let wanted: Vec<Option<BigRational>> = expected.iter().map(|r| Some(rat(*r, 1))).collect();
        prop_assert_eq!(found, wanted);
    }

    /// Multiplicities match the number of repeated linear factors
    #[test]
    fn multiplicities_match(roots in prop::collection::vec(-4i64..=4, 1..=5)) {
        let p = from_roots(&roots);
        for (root, m) in real_roots_with_multiplicities(&p) {
            let value = root.to_rational().expect("integer roots are exact");
            let count = roots.iter().filter(|r| rat(**r, 1) == value).count();
            prop_assert_eq!(m as usize, count);
        }
    }

    /// Sturm-Habicht counting agrees with Sturm counting
    #[test]
    fn sturm_habicht_counts_distinct_roots(coeffs in prop::collection::vec(-5i64..=5, 2..=6)) {
        let p = UPoly::from_i64(&coeffs);
        prop_assume!(p.degree() >= 1);
        let seq = sturm_habicht_sequence(&BiPoly::from_y_poly(&p));
        let signs: Vec<Sign> = principal_coefficients(&seq)
            .iter()
            .map(|c| c.leading_coeff().sign())
            .collect();
        let count = permanences_minus_variations(&signs);
        prop_assert_eq!(count, SturmSequence::new(&p).count_all() as i64);
    }

    /// Refinement never widens an interval and reaches the requested width
    #[test]
    fn refinement_is_monotone(c in 2i64..50, k in 1u32..12) {
        // x^2 - c is irrational unless c is a square
        let p = UPoly::from_i64(&[-c, 0, 1]);
        let roots = real_roots(&p);
        prop_assert_eq!(roots.len(), 2);
        let root = &roots[1];
        let eps = BigRational::new(BigInt::from(1), BigInt::from(1u64 << k));
        root.refine_to(&eps);
        let first = root.width();
        prop_assert!(first <= eps);
        let half = &eps / BigRational::from_integer(BigInt::from(2));
        root.refine_to(&half);
        prop_assert!(root.width() <= first);
        prop_assert!(root.width() <= half);
        prop_assert!(root.lower() * root.lower() <= rat(c, 1));
        prop_assert!(root.upper() * root.upper() >= rat(c, 1));
    }
}
