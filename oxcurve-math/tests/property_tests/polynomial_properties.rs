//! Property-based tests for univariate polynomial algebra

use oxcurve_math::polynomial::UPoly;
use proptest::prelude::*;

/// Strategy for small dense polynomials of degree at most 4
fn poly_strategy() -> impl Strategy<Value = UPoly> {
    prop::collection::vec(-6i64..=6, 1..=5).prop_map(|c| UPoly::from_i64(&c))
}

/// Strategy for nonzero polynomials
fn nonzero_poly_strategy() -> impl Strategy<Value = UPoly> {
    poly_strategy().prop_filter("nonzero", |p| !p.is_zero())
}

proptest! {
    /// Multiplication distributes over addition
    #[test]
    fn mul_distributes(a in poly_strategy(), b in poly_strategy(), c in poly_strategy()) {
        let lhs = &a * &(&b + &c);
        let rhs = &(&a * &b) + &(&a * &c);
        prop_assert_eq!(lhs, rhs);
    }

    /// Exact division undoes multiplication
    #[test]
    fn div_exact_inverts_mul(a in poly_strategy(), b in nonzero_poly_strategy()) {
        let product = &a * &b;
        prop_assert_eq!(product.div_exact(&b), a);
    }

    /// The gcd divides both arguments
    #[test]
    fn gcd_divides_both(a in nonzero_poly_strategy(), b in nonzero_poly_strategy()) {
        let g = a.gcd(&b);
        prop_assert!(!g.is_zero());
        prop_assert!(a.pseudo_rem(&g).is_zero());
        prop_assert!(b.pseudo_rem(&g).is_zero());
    }

    /// A common factor shows up in the gcd
    #[test]
    fn gcd_contains_common_factor(
        a in nonzero_poly_strategy(),
        b in nonzero_poly_strategy(),
        c in nonzero_poly_strategy(),
    ) {
        let g = (&a * &c).gcd(&(&b * &c));
        prop_assert!(g.pseudo_rem(&c.canonical()).is_zero());
    }

    /// Square-free factors multiply back to the primitive part
    #[test]
    fn square_free_factorization_reconstructs(a in nonzero_poly_strategy(), b in nonzero_poly_strategy()) {
        let p = &(&a * &a) * &b;
        prop_assume!(!p.is_constant());
        let product = p
            .square_free_factorization()
            .into_iter()
            .fold(UPoly::one(), |acc, (f, m)| &acc * &f.pow(m));
        prop_assert_eq!(product.canonical(), p.canonical());
    }

    /// The square-free part has no repeated factor
    #[test]
    fn square_free_part_is_square_free(a in nonzero_poly_strategy(), b in nonzero_poly_strategy()) {
        let p = &(&a * &a) * &b;
        let s = p.square_free_part();
        prop_assert!(s.gcd(&s.derivative()).is_constant());
    }
}
