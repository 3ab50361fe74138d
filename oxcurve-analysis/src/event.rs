//! Event x-coordinates.
//!
//! The events of a curve are the real roots of its content (vertical line
//! components) merged with the real roots of the resultant of its primitive
//! part and the `y`-derivative. Each event remembers where it came from,
//! with multiplicities, so the event line builder can tell a vertical line
//! from a vanishing leading coefficient from a critical fibre.

use oxcurve_math::{AlgebraicKernel, AlgebraicReal};
use std::cmp::Ordering;
use tracing::trace;

/// One event abscissa with its provenance.
#[derive(Debug, Clone)]
pub struct EventCoordinate {
    /// The `x`-coordinate.
    pub x: AlgebraicReal,
    /// Multiplicity as a root of the resultant, zero if it is not one.
    pub resultant_multiplicity: u32,
    /// Multiplicity as a root of the content, zero if it is not one.
    pub content_multiplicity: u32,
    /// Multiplicity as a root of the leading coefficient in `y`.
    pub lcoeff_multiplicity: u32,
}

impl EventCoordinate {
    fn new(x: AlgebraicReal) -> Self {
        Self {
            x,
            resultant_multiplicity: 0,
            content_multiplicity: 0,
            lcoeff_multiplicity: 0,
        }
    }

    /// Whether the event is a root of the resultant.
    pub fn is_resultant_root(&self) -> bool {
        self.resultant_multiplicity > 0
    }

    /// Whether the vertical line over the event is part of the curve.
    pub fn is_content_root(&self) -> bool {
        self.content_multiplicity > 0
    }

    /// Whether the leading coefficient in `y` vanishes at the event.
    pub fn is_lcoeff_root(&self) -> bool {
        self.lcoeff_multiplicity > 0
    }
}

/// Merge sorted content roots and resultant roots into sorted events, and
/// annotate them with the sorted roots of the leading coefficient.
///
/// A root shared by both lists becomes a single event that carries both
/// multiplicities.
pub fn merge_event_coordinates(
    kernel: &AlgebraicKernel,
    content_roots: Vec<(AlgebraicReal, u32)>,
    resultant_roots: Vec<(AlgebraicReal, u32)>,
    lcoeff_roots: &[(AlgebraicReal, u32)],
) -> Vec<EventCoordinate> {
    let (n_content, n_resultant) = (content_roots.len(), resultant_roots.len());
    let mut events = Vec::with_capacity(n_content + n_resultant);
    let mut content = content_roots.into_iter().peekable();
    let mut resultant = resultant_roots.into_iter().peekable();
    let (mut used_content, mut used_resultant) = (0usize, 0usize);

    loop {
        let order = match (content.peek(), resultant.peek()) {
            (None, None) => break,
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (Some((c, _)), Some((r, _))) => kernel.compare(c, r),
        };
        let event = match order {
            Ordering::Less => content.next().map(|(x, m)| {
                used_content += 1;
                EventCoordinate {
                    content_multiplicity: m,
                    ..EventCoordinate::new(x)
                }
            }),
            Ordering::Greater => resultant.next().map(|(x, m)| {
                used_resultant += 1;
                EventCoordinate {
                    resultant_multiplicity: m,
                    ..EventCoordinate::new(x)
                }
            }),
            Ordering::Equal => match (content.next(), resultant.next()) {
                (Some((x, mc)), Some((_, mr))) => {
                    used_content += 1;
                    used_resultant += 1;
                    Some(EventCoordinate {
                        content_multiplicity: mc,
                        resultant_multiplicity: mr,
                        ..EventCoordinate::new(x)
                    })
                }
                _ => None,
            },
        };
        events.extend(event);
    }
    debug_assert_eq!(used_content, n_content);
    debug_assert_eq!(used_resultant, n_resultant);

    annotate_lcoeff_roots(kernel, &mut events, lcoeff_roots);
    trace!(
        events = events.len(),
        content = n_content,
        resultant = n_resultant,
        "merged event coordinates"
    );
    events
}

fn annotate_lcoeff_roots(
    kernel: &AlgebraicKernel,
    events: &mut [EventCoordinate],
    lcoeff_roots: &[(AlgebraicReal, u32)],
) {
    let mut start = 0;
    for (root, m) in lcoeff_roots {
        match locate_event(kernel, &events[start..], root) {
            (i, true) => {
                events[start + i].lcoeff_multiplicity = *m;
                start += i + 1;
            }
            (i, false) => {
                // The leading coefficient divides the resultant
                trace!(root = %root, "leading coefficient root is not an event");
                start += i;
            }
        }
    }
}

/// Binary search for `x` among sorted events.
///
/// Returns `(i, true)` if `x` is event `i`, otherwise `(i, false)` where `i`
/// is the number of events below `x`, which is the index of the interval
/// containing it.
pub fn locate_event(
    kernel: &AlgebraicKernel,
    events: &[EventCoordinate],
    x: &AlgebraicReal,
) -> (usize, bool) {
    let (mut lo, mut hi) = (0, events.len());
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        match kernel.compare(&events[mid].x, x) {
            Ordering::Less => lo = mid + 1,
            Ordering::Equal => return (mid, true),
            Ordering::Greater => hi = mid,
        }
    }
    (lo, false)
}
