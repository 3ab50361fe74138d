//! Property-based tests for bivariate polynomials

use num_bigint::BigInt;
use num_rational::BigRational;
use oxcurve_math::polynomial::subresultant::sylvester_resultant;
use oxcurve_math::polynomial::{BiPoly, UPoly};
use proptest::prelude::*;

/// Strategy for small bivariate polynomials given as terms
fn bipoly_strategy() -> impl Strategy<Value = BiPoly> {
    prop::collection::vec((-5i64..=5, 0usize..=2, 0usize..=3), 1..=5)
        .prop_map(|terms| BiPoly::from_terms(&terms))
}

proptest! {
    /// Shearing by s and then by -s is the identity
    #[test]
    fn shear_is_invertible(f in bipoly_strategy(), s in -3i64..=3) {
        let s = BigInt::from(s);
        prop_assert_eq!(f.shear(&s).shear(&-s), f);
    }

    /// Shearing preserves the total degree
    #[test]
    fn shear_preserves_total_degree(f in bipoly_strategy(), s in 1i64..=3) {
        prop_assume!(!f.is_zero());
        prop_assert_eq!(f.shear(&BigInt::from(s)).total_degree(), f.total_degree());
    }

    /// Swapping variables twice is the identity
    #[test]
    fn swap_is_involution(f in bipoly_strategy()) {
        prop_assert_eq!(f.swap_variables().swap_variables(), f);
    }

    /// Printed polynomials parse back to themselves
    #[test]
    fn text_round_trip(f in bipoly_strategy()) {
        let parsed: BiPoly = f.to_string().parse().expect("printed polynomial parses");
        prop_assert_eq!(parsed, f);
    }

    /// The resultant with a linear factor in y vanishes where the factor's
    /// root meets the other polynomial
    #[test]
    fn resultant_detects_common_roots(a in -4i64..=4, b in -4i64..=4, c in -4i64..=4) {
        // g = y - (a x + b), f = g * (y - c) + (x - 1) vanishes at x = 1, y = a + b
        let g = BiPoly::from_terms(&[(1, 0, 1), (-a, 1, 0), (-b, 0, 0)]);
        let h = BiPoly::from_terms(&[(1, 0, 1), (-c, 0, 0)]);
        let f = &(&g * &h) + &BiPoly::from_terms(&[(1, 1, 0), (-1, 0, 0)]);
        let res = sylvester_resultant(&f, &g);
        let one = BigRational::from_integer(BigInt::from(1));
        prop_assert_eq!(res.eval(&one), BigRational::from_integer(BigInt::from(0)));
        prop_assert!(res != UPoly::zero());
    }
}
