//! Property-based tests for shears

use super::strategies::{lines_strategy, shape};
use oxcurve_analysis::{CurveAnalysis, CurveAnalysisError, ShearTransformation};
use proptest::prelude::*;

fn factor_strategy() -> impl Strategy<Value = i64> {
    prop::sample::select(vec![-3i64, -2, 2, 3])
}

proptest! {
    /// Event lines transported back from a shear agree with the lines the
    /// engine builds itself
    #[test]
    fn backsheared_lines_match(f in lines_strategy(), s in factor_strategy()) {
        let analysis = CurveAnalysis::from_polynomial(f);
        let sheared = analysis.event_lines_via_shear(s);
        prop_assume!(!matches!(sheared, Err(CurveAnalysisError::BadShear { .. })));
        let sheared = sheared.expect("only bad shears fail");
        prop_assert_eq!(
            sheared.len(),
            analysis.number_of_status_lines_with_event().expect("events")
        );
        for (i, line) in sheared.iter().enumerate() {
            let direct = analysis.status_line_at_event(i).expect("event line");
            prop_assert_eq!(line.x(), direct.x());
            prop_assert_eq!(shape(line), shape(&direct));
        }
    }

    /// Shearing back by the opposite factor restores the primitive part
    #[test]
    fn shear_then_inverse_is_identity(f in lines_strategy(), s in factor_strategy()) {
        let analysis = CurveAnalysis::from_polynomial(f);
        let sheared = analysis.shear_primitive_part(s);
        prop_assume!(sheared.is_ok());
        let sheared = sheared.expect("checked above");
        let restored = ShearTransformation::new(s)
            .inverse()
            .apply(sheared.polynomial().expect("bound"));
        prop_assert_eq!(&restored, analysis.primitive_polynomial_2().expect("primitive"));
    }
}
