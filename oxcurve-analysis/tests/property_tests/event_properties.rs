//! Property-based tests for events and their classification

use super::strategies::{content_strategy, lines_strategy, parabola_strategy};
use num_bigint::BigInt;
use num_rational::BigRational;
use oxcurve_analysis::{AlgebraicReal, CurveAnalysis};
use proptest::prelude::*;
use std::cmp::Ordering;

proptest! {
    /// Event lines come in strictly increasing x
    #[test]
    fn events_are_ordered(f in lines_strategy()) {
        let analysis = CurveAnalysis::from_polynomial(f);
        let n = analysis.number_of_status_lines_with_event().expect("events");
        for i in 1..n {
            let a = analysis.status_line_at_event(i - 1).expect("event line");
            let b = analysis.status_line_at_event(i).expect("event line");
            prop_assert_eq!(analysis.kernel().compare(a.x(), b.x()), Ordering::Less);
        }
    }

    /// A rational x is an event or lies strictly between its neighbours
    #[test]
    fn classification_is_consistent(f in lines_strategy(), num in -12i64..=12, den in 1i64..=3) {
        let analysis = CurveAnalysis::from_polynomial(f);
        let x = AlgebraicReal::from_rational(BigRational::new(BigInt::from(num), BigInt::from(den)));
        let (i, is_event) = analysis.x_to_index(&x).expect("classified");
        let events = analysis.events().expect("events");
        if is_event {
            let line = analysis.status_line_at_event(i).expect("event line");
            prop_assert_eq!(line.x(), &x);
        } else {
            if i > 0 {
                prop_assert_eq!(events[i - 1].x.compare(&x), Ordering::Less);
            }
            if i < events.len() {
                prop_assert_eq!(x.compare(&events[i].x), Ordering::Less);
            }
        }
    }

    /// The interval representatives are classified as their own interval
    #[test]
    fn interval_bounds_are_in_their_interval(f in lines_strategy()) {
        let analysis = CurveAnalysis::from_polynomial(f);
        let n = analysis.number_of_status_lines_with_event().expect("events");
        for i in 0..=n {
            let b = analysis.bound_value_in_interval(i).expect("bound");
            let x = AlgebraicReal::from_rational(b);
            prop_assert_eq!(analysis.x_to_index(&x).expect("classified"), (i, false));
        }
    }

    /// The zeroth principal Sturm-Habicht coefficient is the resultant of the
    /// primitive part and its y-derivative
    #[test]
    fn resultant_matches_sturm_habicht(f in prop_oneof![lines_strategy(), parabola_strategy()]) {
        let analysis = CurveAnalysis::from_polynomial(f);
        let principal = analysis.principal_sturm_habicht_of_primitive(0).expect("coefficient");
        let resultant = analysis.resultant_of_primitive().expect("resultant");
        prop_assert_eq!(principal.canonical(), resultant.canonical());
    }

    /// A vertical line component exists exactly when the content is not constant
    #[test]
    fn vertical_component_iff_content(c in content_strategy(), f in lines_strategy()) {
        let analysis = CurveAnalysis::from_polynomial(&c * &f);
        let degree = analysis.content().expect("content").degree();
        prop_assert_eq!(analysis.has_vertical_component().expect("bound"), degree > 0);
        let flagged = analysis
            .events()
            .expect("events")
            .iter()
            .filter(|e| e.is_content_root())
            .count();
        prop_assert_eq!(flagged, degree);
    }
}
