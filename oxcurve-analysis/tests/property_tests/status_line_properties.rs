//! Property-based tests for status lines

use super::strategies::{lines_strategy, parabola_strategy};
use num_bigint::BigInt;
use num_rational::BigRational;
use oxcurve_analysis::CurveAnalysis;
use proptest::prelude::*;

proptest! {
    /// Refining to half the precision never widens an interval
    #[test]
    fn refinement_is_monotone(f in parabola_strategy(), j in 0usize..2, e in 1u32..=6) {
        let analysis = CurveAnalysis::from_polynomial(f);
        let line = analysis.status_line_of_interval(1).expect("right of the vertex");
        prop_assert_eq!(line.number_of_events(), 2);
        let eps = BigRational::new(BigInt::from(1), BigInt::from(10).pow(e));
        line.refine_to(j, &eps).expect("point");
        let first = line.y(j).expect("point").width();
        let half = &eps / BigRational::from_integer(BigInt::from(2));
        line.refine_to(j, &half).expect("point");
        let second = line.y(j).expect("point").width();
        prop_assert!(second <= first);
        prop_assert!(second <= half);
    }

    /// Arcs are conserved across every event of a line arrangement
    #[test]
    fn arcs_are_conserved(f in lines_strategy()) {
        let analysis = CurveAnalysis::from_polynomial(f);
        let n = analysis.number_of_status_lines_with_event().expect("events");
        for i in 0..n {
            let line = analysis.status_line_at_event(i).expect("event line");
            prop_assert_eq!(line.number_of_arcs_left(), analysis.arcs_over_interval(i).expect("arcs"));
            prop_assert_eq!(line.number_of_arcs_right(), analysis.arcs_over_interval(i + 1).expect("arcs"));
        }
    }
}
