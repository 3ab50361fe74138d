//! Status lines: the curve over a single vertical line.
//!
//! A status line records the sorted real `y`-coordinates of the curve over
//! one `x`, and for each of them how many arcs enter it from the left and
//! leave it to the right. Over an interval every point carries exactly one
//! arc on each side; over an event a point may carry several or none, and
//! arcs may also run off to `y = -inf` or `y = +inf` (vertical asymptotes).

use crate::error::{CurveAnalysisError, Result};
use num_rational::BigRational;
use oxcurve_math::AlgebraicReal;
use smallvec::SmallVec;
use std::fmt;
use std::ops::Range;

/// Number of arcs incident to a point from each side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArcCounts {
    /// Arcs arriving from smaller `x`.
    pub left: usize,
    /// Arcs leaving towards larger `x`.
    pub right: usize,
}

impl ArcCounts {
    /// Counts for a regular point.
    pub const REGULAR: Self = Self { left: 1, right: 1 };
}

/// Arcs of an event line that escape to `y = -inf` or `y = +inf`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AsymptoteCounts {
    /// Arcs from the left tending to `-inf`.
    pub left_minus: usize,
    /// Arcs from the left tending to `+inf`.
    pub left_plus: usize,
    /// Arcs to the right coming from `-inf`.
    pub right_minus: usize,
    /// Arcs to the right coming from `+inf`.
    pub right_plus: usize,
}

impl AsymptoteCounts {
    /// Whether any arc escapes vertically.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A curve point on a status line.
#[derive(Debug, Clone)]
pub struct StatusPoint {
    /// The `y`-coordinate.
    pub y: AlgebraicReal,
    /// Incident arcs.
    pub arcs: ArcCounts,
}

/// The curve over a single `x`.
#[derive(Debug, Clone)]
pub struct StatusLine {
    x: AlgebraicReal,
    index: usize,
    is_event: bool,
    points: SmallVec<[StatusPoint; 4]>,
    asymptotes: AsymptoteCounts,
    vertical_line: bool,
}

impl StatusLine {
    /// A line over the rational representative of interval `index`.
    pub fn for_interval(x: BigRational, index: usize, ys: Vec<AlgebraicReal>) -> Self {
        Self::non_event(AlgebraicReal::from_rational(x), index, ys)
    }

    /// A line over a non-event `x` inside interval `index`.
    pub fn non_event(x: AlgebraicReal, index: usize, ys: Vec<AlgebraicReal>) -> Self {
        Self {
            x,
            index,
            is_event: false,
            points: ys
                .into_iter()
                .map(|y| StatusPoint {
                    y,
                    arcs: ArcCounts::REGULAR,
                })
                .collect(),
            asymptotes: AsymptoteCounts::default(),
            vertical_line: false,
        }
    }

    /// A line over event `index`.
    pub fn for_event(
        x: AlgebraicReal,
        index: usize,
        points: Vec<StatusPoint>,
        asymptotes: AsymptoteCounts,
    ) -> Self {
        Self {
            x,
            index,
            is_event: true,
            points: points.into(),
            asymptotes,
            vertical_line: false,
        }
    }

    /// The `x`-coordinate.
    pub fn x(&self) -> &AlgebraicReal {
        &self.x
    }

    /// Event index for event lines, interval index otherwise.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Whether this is a line over an event.
    pub fn is_event(&self) -> bool {
        self.is_event
    }

    /// Number of curve points on the line.
    pub fn number_of_events(&self) -> usize {
        self.points.len()
    }

    /// The curve points, sorted by `y`.
    pub fn points(&self) -> &[StatusPoint] {
        &self.points
    }

    /// The `y`-coordinate of point `j`.
    pub fn y(&self, j: usize) -> Result<&AlgebraicReal> {
        self.point(j).map(|p| &p.y)
    }

    fn point(&self, j: usize) -> Result<&StatusPoint> {
        self.points
            .get(j)
            .ok_or_else(|| CurveAnalysisError::out_of_range("point", j, self.points.len()))
    }

    /// Arcs incident to point `j` from the left and from the right.
    pub fn number_of_incident_branches(&self, j: usize) -> Result<ArcCounts> {
        self.point(j).map(|p| p.arcs)
    }

    /// Vertical asymptote counts.
    pub fn asymptotes(&self) -> AsymptoteCounts {
        self.asymptotes
    }

    /// Whether the whole vertical line belongs to the curve.
    pub fn has_vertical_line(&self) -> bool {
        self.vertical_line
    }

    /// Mark the vertical line as part of the curve.
    pub fn set_vertical_line(&mut self, on_curve: bool) {
        self.vertical_line = on_curve;
    }

    /// Total number of arcs arriving from the left, asymptotes included.
    pub fn number_of_arcs_left(&self) -> usize {
        let points: usize = self.points.iter().map(|p| p.arcs.left).sum();
        points + self.asymptotes.left_minus + self.asymptotes.left_plus
    }

    /// Total number of arcs leaving to the right, asymptotes included.
    pub fn number_of_arcs_right(&self) -> usize {
        let points: usize = self.points.iter().map(|p| p.arcs.right).sum();
        points + self.asymptotes.right_minus + self.asymptotes.right_plus
    }

    /// Arc numbers, counted from below in the left interval, that end at
    /// point `j`.
    ///
    /// Arcs tending to `-inf` come first, so they occupy the lowest numbers.
    pub fn left_arc_range(&self, j: usize) -> Result<Range<usize>> {
        self.point(j)?;
        let start = self.asymptotes.left_minus
            + self.points[..j].iter().map(|p| p.arcs.left).sum::<usize>();
        Ok(start..start + self.points[j].arcs.left)
    }

    /// Arc numbers, counted from below in the right interval, that start at
    /// point `j`.
    pub fn right_arc_range(&self, j: usize) -> Result<Range<usize>> {
        self.point(j)?;
        let start = self.asymptotes.right_minus
            + self.points[..j].iter().map(|p| p.arcs.right).sum::<usize>();
        Ok(start..start + self.points[j].arcs.right)
    }

    /// The arc number of point `j` on a non-event line.
    pub fn arc_number(&self, j: usize) -> Result<usize> {
        self.point(j)?;
        Ok(j)
    }

    /// Refine the `y`-coordinate of point `j` to the given width.
    pub fn refine_to(&self, j: usize, precision: &BigRational) -> Result<()> {
        self.point(j)?.y.refine_to(precision);
        Ok(())
    }

    /// Refine the `x`-coordinate and every `y`-coordinate to the given width.
    pub fn refine_all(&self, precision: &BigRational) {
        self.x.refine_to(precision);
        for p in &self.points {
            p.y.refine_to(precision);
        }
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_event { "event" } else { "interval" };
        write!(f, "x = {} ({} {}): ", self.x, kind, self.index)?;
        write!(f, "{} point(s) [", self.points.len())?;
        for (j, p) in self.points.iter().enumerate() {
            if j > 0 {
                write!(f, ", ")?;
            }
            if self.is_event {
                write!(f, "{} ({}|{})", p.y, p.arcs.left, p.arcs.right)?;
            } else {
                write!(f, "{}", p.y)?;
            }
        }
        write!(f, "]")?;
        if !self.asymptotes.is_empty() {
            let a = &self.asymptotes;
            write!(
                f,
                " asymptotes -inf {}|{} +inf {}|{}",
                a.left_minus, a.right_minus, a.left_plus, a.right_plus
            )?;
        }
        if self.vertical_line {
            write!(f, " vertical line")?;
        }
        Ok(())
    }
}
