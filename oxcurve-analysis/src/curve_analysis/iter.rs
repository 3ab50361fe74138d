//! Lazy iterators over status lines and Sturm-Habicht coefficients.
//!
//! The iterators borrow the engine and build each item on demand, so an
//! unvisited line is never computed. They are double-ended and cheap to
//! clone, which restarts them.

use super::CurveAnalysis;
use crate::error::Result;
use crate::status_line::StatusLine;
use oxcurve_math::{BiPoly, UPoly};
use std::iter::{Enumerate, FusedIterator};
use std::ops::Range;
use std::slice;

type Fetch = fn(&CurveAnalysis, usize) -> Result<StatusLine>;

/// Status lines built one by one.
#[derive(Clone)]
pub struct StatusLines<'a> {
    analysis: &'a CurveAnalysis,
    fetch: Fetch,
    range: Range<usize>,
}

impl Iterator for StatusLines<'_> {
    type Item = Result<StatusLine>;

    fn next(&mut self) -> Option<Self::Item> {
        self.range.next().map(|i| (self.fetch)(self.analysis, i))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.range.size_hint()
    }
}

impl DoubleEndedIterator for StatusLines<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.range.next_back().map(|i| (self.fetch)(self.analysis, i))
    }
}

impl ExactSizeIterator for StatusLines<'_> {}

impl FusedIterator for StatusLines<'_> {}

/// Principal Sturm-Habicht coefficients of the primitive part, by index.
#[derive(Clone)]
pub struct PrincipalCoefficients<'a> {
    members: Enumerate<slice::Iter<'a, BiPoly>>,
}

impl Iterator for PrincipalCoefficients<'_> {
    type Item = UPoly;

    fn next(&mut self) -> Option<UPoly> {
        self.members.next().map(|(j, member)| member.coeff(j))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.members.size_hint()
    }
}

impl DoubleEndedIterator for PrincipalCoefficients<'_> {
    fn next_back(&mut self) -> Option<UPoly> {
        self.members.next_back().map(|(j, member)| member.coeff(j))
    }
}

impl ExactSizeIterator for PrincipalCoefficients<'_> {}

impl FusedIterator for PrincipalCoefficients<'_> {}

impl CurveAnalysis {
    /// The event lines in increasing `x`.
    pub fn event_lines(&self) -> Result<StatusLines<'_>> {
        Ok(StatusLines {
            analysis: self,
            fetch: Self::status_line_at_event,
            range: 0..self.number_of_status_lines_with_event()?,
        })
    }

    /// The interval lines in increasing `x`.
    pub fn interval_lines(&self) -> Result<StatusLines<'_>> {
        Ok(StatusLines {
            analysis: self,
            fetch: Self::status_line_of_interval,
            range: 0..self.number_of_status_lines_with_event()? + 1,
        })
    }

    /// The principal Sturm-Habicht coefficients, index 0 first.
    pub fn principal_sturm_habicht_coefficients(&self) -> Result<PrincipalCoefficients<'_>> {
        Ok(PrincipalCoefficients {
            members: self.sturm_habicht()?.iter().enumerate(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn circle() -> CurveAnalysis {
        CurveAnalysis::from_polynomial(BiPoly::from_terms(&[(1, 2, 0), (1, 0, 2), (-1, 0, 0)]))
    }

    #[test]
    fn test_event_lines_both_directions() {
        let engine = circle();
        let forward: Vec<String> = engine
            .event_lines()
            .expect("events")
            .map(|l| l.expect("line").x().to_string())
            .collect();
        assert_eq!(forward, vec!["-1", "1"]);
        let backward: Vec<usize> = engine
            .event_lines()
            .expect("events")
            .rev()
            .map(|l| l.expect("line").index())
            .collect();
        assert_eq!(backward, vec![1, 0]);
    }

    #[test]
    fn test_interval_lines_restart() {
        let engine = circle();
        let lines = engine.interval_lines().expect("intervals");
        assert_eq!(lines.len(), 3);
        let arcs: Vec<usize> = lines
            .clone()
            .map(|l| l.expect("line").number_of_events())
            .collect();
        assert_eq!(arcs, vec![0, 2, 0]);
        assert_eq!(lines.count(), 3);
    }

    #[test]
    fn test_principal_coefficients() {
        // x^2 + y^2 - 1: [-4(x^2 - 1), 2, 1]
        let engine = circle();
        let coeffs: Vec<UPoly> = engine
            .principal_sturm_habicht_coefficients()
            .expect("sequence")
            .collect();
        assert_eq!(
            coeffs,
            vec![
                UPoly::from_i64(&[4, 0, -4]),
                UPoly::from_i64(&[2]),
                UPoly::from_i64(&[1])
            ]
        );
        let last = engine
            .principal_sturm_habicht_coefficients()
            .expect("sequence")
            .next_back();
        assert_eq!(last, Some(UPoly::one()));
    }
}
