//! Curve generators shared by the property tests

use oxcurve_analysis::{BiPoly, StatusLine};
use proptest::prelude::*;

/// `y - (a x + b)`
fn line(a: i64, b: i64) -> BiPoly {
    BiPoly::from_terms(&[(1, 0, 1), (-a, 1, 0), (-b, 0, 0)])
}

/// Products of one to three distinct non-vertical lines
pub fn lines_strategy() -> impl Strategy<Value = BiPoly> {
    prop::collection::btree_set((-2i64..=2, -3i64..=3), 1..=3).prop_map(|lines| {
        lines
            .into_iter()
            .fold(BiPoly::one(), |acc, (a, b)| &acc * &line(a, b))
    })
}

/// Products of distinct factors `x - r`, possibly none
pub fn content_strategy() -> impl Strategy<Value = BiPoly> {
    prop::collection::btree_set(-3i64..=3, 0..=2).prop_map(|roots| {
        roots.into_iter().fold(BiPoly::one(), |acc, r| {
            &acc * &BiPoly::from_terms(&[(1, 1, 0), (-r, 0, 0)])
        })
    })
}

/// Parabolas `y^2 = k x + c` opening to the right
pub fn parabola_strategy() -> impl Strategy<Value = BiPoly> {
    (1i64..=5, -4i64..=4).prop_map(|(k, c)| BiPoly::from_terms(&[(1, 0, 2), (-k, 1, 0), (-c, 0, 0)]))
}

/// `(y, left, right)` for every point of an event line
pub fn shape(line: &StatusLine) -> Vec<(String, usize, usize)> {
    (0..line.number_of_events())
        .map(|j| {
            let arcs = line.number_of_incident_branches(j).expect("point");
            (line.y(j).expect("point").to_string(), arcs.left, arcs.right)
        })
        .collect()
}
