//! The curve analysis engine.
//!
//! [`CurveAnalysis`] decomposes a real algebraic plane curve `f(x, y) = 0`
//! along the x-axis. Every derived quantity is computed on first request
//! and memoised behind `&self`: the content and primitive part, the
//! Sturm-Habicht sequence, the event coordinates, the interval
//! representatives, and each status line separately. Only the requested
//! slice of the curve is ever computed.
//!
//! ## Degeneracies
//!
//! An event line is first built from the fibre over the event alone. When
//! that is ambiguous the configured [`DegeneracyStrategy`] decides: report
//! the event, or shear the whole curve into generic position, recover the
//! critical points there and rebuild every event line of this engine from
//! them in one pass.
//!
//! ## References
//!
//! - Eigenwillig, Kerber, Wolpert: "Fast and exact geometric analysis of
//!   real algebraic plane curves" (2007)
//! - Gonzalez-Vega, Necula: "Efficient topology determination of implicitly
//!   defined algebraic plane curves" (2002)

mod asymptote;
mod iter;
mod text;

pub use asymptote::{AsymptoticValue, XSide};
pub use iter::{PrincipalCoefficients, StatusLines};

use crate::cache::{RootCache, RootCacheStats};
use crate::config::{CurveAnalysisConfig, DegeneracyStrategy, LeadingCoefficientPolicy};
use crate::error::{CurveAnalysisError, Result};
use crate::event::{locate_event, merge_event_coordinates, EventCoordinate};
use crate::event_line::{BuildOutcome, EventLineBuilder, EventSlot};
use crate::shear::{CriticalPoint, ShearController, ShearRegistry, ShearTransformation};
use crate::status_line::StatusLine;
use num_rational::BigRational;
use num_traits::Zero;
use oxcurve_math::polynomial::subresultant::{
    coprincipal_coefficients, sturm_habicht_sequence, sylvester_resultant,
};
use oxcurve_math::{AlgebraicKernel, AlgebraicReal, BiPoly, KernelStats, UPoly};
use std::cell::{OnceCell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;
use tracing::debug;

/// Which side of an event a query refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Perturbation {
    /// Just left of `x`.
    Negative,
    /// Exactly at `x`.
    Zero,
    /// Just right of `x`.
    Positive,
}

/// Counters describing the work done by an analysis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalysisStatistics {
    /// Shared kernel counters, sheared copies included.
    pub kernel: KernelStats,
    /// Root cache counters of this engine.
    pub root_cache: RootCacheStats,
    /// Event lines built so far.
    pub event_lines: usize,
    /// Interval lines built so far.
    pub interval_lines: usize,
    /// Sheared copies analysed and kept.
    pub sheared_copies: usize,
}

#[derive(Debug, Clone)]
struct Decomposition {
    content: UPoly,
    primitive: BiPoly,
}

/// Lazy topological analysis of one plane curve.
///
/// Cloning copies every cache computed so far; sheared copies are shared.
#[derive(Debug, Clone)]
pub struct CurveAnalysis {
    kernel: Rc<AlgebraicKernel>,
    config: CurveAnalysisConfig,
    polynomial: OnceCell<BiPoly>,
    decomposition: OnceCell<Decomposition>,
    sturm_habicht: OnceCell<Vec<BiPoly>>,
    resultant: OnceCell<UPoly>,
    events: OnceCell<Vec<EventCoordinate>>,
    event_lines: RefCell<Vec<Option<StatusLine>>>,
    interval_bounds: RefCell<Vec<Option<BigRational>>>,
    interval_lines: RefCell<Vec<Option<StatusLine>>>,
    rational_lines: RefCell<BTreeMap<BigRational, StatusLine>>,
    algebraic_lines: RefCell<BTreeMap<AlgebraicReal, StatusLine>>,
    root_cache: RefCell<RootCache>,
    shears: RefCell<ShearRegistry<CurveAnalysis>>,
    shear_controller: RefCell<ShearController>,
    asymptotes: [OnceCell<Vec<AsymptoticValue>>; 2],
}

impl CurveAnalysis {
    /// An engine without a polynomial; see [`Self::set_polynomial`].
    pub fn new(kernel: Rc<AlgebraicKernel>, config: CurveAnalysisConfig) -> Self {
        let root_cache = RootCache::new(config.root_cache_capacity);
        Self {
            kernel,
            config,
            polynomial: OnceCell::new(),
            decomposition: OnceCell::new(),
            sturm_habicht: OnceCell::new(),
            resultant: OnceCell::new(),
            events: OnceCell::new(),
            event_lines: RefCell::new(Vec::new()),
            interval_bounds: RefCell::new(Vec::new()),
            interval_lines: RefCell::new(Vec::new()),
            rational_lines: RefCell::new(BTreeMap::new()),
            algebraic_lines: RefCell::new(BTreeMap::new()),
            root_cache: RefCell::new(root_cache),
            shears: RefCell::new(ShearRegistry::new()),
            shear_controller: RefCell::new(ShearController::new()),
            asymptotes: [OnceCell::new(), OnceCell::new()],
        }
    }

    /// An engine for the square-free polynomial `f`.
    pub fn with_polynomial(
        kernel: Rc<AlgebraicKernel>,
        config: CurveAnalysisConfig,
        f: BiPoly,
    ) -> Self {
        let analysis = Self::new(kernel, config);
        analysis.polynomial.get_or_init(|| f);
        analysis
    }

    /// An engine for `f` with a private kernel and the default configuration.
    pub fn from_polynomial(f: BiPoly) -> Self {
        Self::with_polynomial(
            Rc::new(AlgebraicKernel::default()),
            CurveAnalysisConfig::default(),
            f,
        )
    }

    /// Bind the defining polynomial. It can only be set once.
    pub fn set_polynomial(&self, f: BiPoly) -> Result<()> {
        self.polynomial
            .set(f)
            .map_err(|_| CurveAnalysisError::PolynomialAlreadySet)
    }

    /// Whether a polynomial has been bound.
    pub fn has_defining_polynomial(&self) -> bool {
        self.polynomial.get().is_some()
    }

    /// The defining polynomial.
    pub fn polynomial(&self) -> Result<&BiPoly> {
        self.polynomial
            .get()
            .ok_or(CurveAnalysisError::NoDefiningPolynomial)
    }

    /// The shared algebraic kernel.
    pub fn kernel(&self) -> &Rc<AlgebraicKernel> {
        &self.kernel
    }

    /// The configuration.
    pub fn config(&self) -> &CurveAnalysisConfig {
        &self.config
    }

    /// True iff the leading coefficient in `y` is a nonzero constant.
    pub fn is_y_regular(&self) -> Result<bool> {
        Ok(self.polynomial()?.is_y_regular())
    }

    /// True iff the curve contains a vertical line.
    pub fn has_vertical_component(&self) -> Result<bool> {
        if self.is_y_regular()? {
            return Ok(false);
        }
        Ok(self.events()?.iter().any(EventCoordinate::is_content_root))
    }

    fn decomposition(&self) -> Result<&Decomposition> {
        if let Some(d) = self.decomposition.get() {
            return Ok(d);
        }
        let f = self.polynomial()?;
        let computed = Decomposition {
            content: f.content(),
            primitive: f.primitive_part(),
        };
        Ok(self.decomposition.get_or_init(|| computed))
    }

    /// The gcd of the coefficients of `f` with respect to `y`.
    pub fn content(&self) -> Result<&UPoly> {
        Ok(&self.decomposition()?.content)
    }

    /// `f` divided by its content.
    pub fn primitive_polynomial_2(&self) -> Result<&BiPoly> {
        Ok(&self.decomposition()?.primitive)
    }

    fn sturm_habicht(&self) -> Result<&[BiPoly]> {
        if let Some(seq) = self.sturm_habicht.get() {
            return Ok(seq);
        }
        let computed = sturm_habicht_sequence(self.primitive_polynomial_2()?);
        Ok(self.sturm_habicht.get_or_init(|| computed))
    }

    fn sturm_habicht_member(&self, i: usize) -> Result<&BiPoly> {
        let seq = self.sturm_habicht()?;
        seq.get(i)
            .ok_or_else(|| CurveAnalysisError::out_of_range("Sturm-Habicht", i, seq.len()))
    }

    /// Number of members of the Sturm-Habicht sequence.
    pub fn number_of_sturm_habicht_members(&self) -> Result<usize> {
        Ok(self.sturm_habicht()?.len())
    }

    /// The `i`-th Sturm-Habicht polynomial of the primitive part.
    pub fn sturm_habicht_of_primitive(&self, i: usize) -> Result<BiPoly> {
        self.sturm_habicht_member(i).cloned()
    }

    /// The coefficient of `y^i` in the `i`-th Sturm-Habicht polynomial.
    pub fn principal_sturm_habicht_of_primitive(&self, i: usize) -> Result<UPoly> {
        Ok(self.sturm_habicht_member(i)?.coeff(i))
    }

    /// The coefficient of `y^(i-1)` in the `i`-th Sturm-Habicht polynomial.
    pub fn coprincipal_sturm_habicht_of_primitive(&self, i: usize) -> Result<UPoly> {
        let seq = self.sturm_habicht()?;
        coprincipal_coefficients(seq)
            .into_iter()
            .nth(i)
            .ok_or_else(|| CurveAnalysisError::out_of_range("Sturm-Habicht", i, seq.len()))
    }

    /// Sylvester resultant of the primitive part and its `y`-derivative,
    /// computed independently of the Sturm-Habicht sequence.
    pub fn resultant_of_primitive(&self) -> Result<&UPoly> {
        if let Some(r) = self.resultant.get() {
            return Ok(r);
        }
        let p = self.primitive_polynomial_2()?;
        let computed = sylvester_resultant(p, &p.derivative_y());
        Ok(self.resultant.get_or_init(|| computed))
    }

    /// The sorted event coordinates.
    pub fn events(&self) -> Result<&[EventCoordinate]> {
        if let Some(events) = self.events.get() {
            return Ok(events);
        }
        let computed = self.compute_events()?;
        Ok(self.events.get_or_init(|| computed))
    }

    fn compute_events(&self) -> Result<Vec<EventCoordinate>> {
        let content = self.content()?;
        let primitive = self.primitive_polynomial_2()?;
        let discriminant = self.principal_sturm_habicht_of_primitive(0)?;
        if discriminant.is_zero() {
            return Err(CurveAnalysisError::ZeroResultant {
                polynomial: primitive.clone(),
            });
        }
        let kernel = &*self.kernel;
        let content_roots = kernel.isolate_with_multiplicities(content);
        let resultant_roots = kernel.isolate_with_multiplicities(&discriminant);
        let lcoeff_roots = kernel.isolate_with_multiplicities(&primitive.leading_coeff());
        let vertical = content_roots.len();
        let events = merge_event_coordinates(kernel, content_roots, resultant_roots, &lcoeff_roots);
        let n = events.len();
        *self.event_lines.borrow_mut() = vec![None; n];
        *self.interval_bounds.borrow_mut() = vec![None; n + 1];
        *self.interval_lines.borrow_mut() = vec![None; n + 1];
        debug!(
            polynomial = %primitive,
            events = n,
            vertical_lines = vertical,
            "computed event coordinates"
        );
        Ok(events)
    }

    /// Number of events.
    pub fn number_of_status_lines_with_event(&self) -> Result<usize> {
        Ok(self.events()?.len())
    }

    /// Classify `x`: `(i, true)` if it is event `i`, otherwise `(i, false)`
    /// with `i` the interval containing it.
    pub fn x_to_index(&self, x: &AlgebraicReal) -> Result<(usize, bool)> {
        Ok(locate_event(&self.kernel, self.events()?, x))
    }

    /// A rational inside interval `i`, `0 <= i <= number of events`.
    pub fn bound_value_in_interval(&self, i: usize) -> Result<BigRational> {
        let events = self.events()?;
        let n = events.len();
        if i > n {
            return Err(CurveAnalysisError::out_of_range("interval", i, n + 1));
        }
        if let Some(b) = self.interval_bounds.borrow()[i].clone() {
            return Ok(b);
        }
        let b = if n == 0 {
            BigRational::zero()
        } else if i == 0 {
            self.kernel.bound_left(&events[0].x)
        } else if i == n {
            self.kernel.bound_right(&events[n - 1].x)
        } else {
            self.kernel.bound_between(&events[i - 1].x, &events[i].x)?
        };
        self.interval_bounds.borrow_mut()[i] = Some(b.clone());
        Ok(b)
    }

    /// Sorted roots of `P(x, y)` for a rational `x`, through the root cache.
    fn roots_over_rational(&self, x: &BigRational) -> Result<Vec<AlgebraicReal>> {
        let primitive = self.primitive_polynomial_2()?;
        Ok(self
            .root_cache
            .borrow_mut()
            .get_or_insert_with(x, || self.kernel.isolate(&primitive.eval_x(x))))
    }

    /// The status line of interval `i`, `0 <= i <= number of events`.
    pub fn status_line_of_interval(&self, i: usize) -> Result<StatusLine> {
        let n = self.number_of_status_lines_with_event()?;
        if i > n {
            return Err(CurveAnalysisError::out_of_range("interval", i, n + 1));
        }
        if let Some(line) = self.interval_lines.borrow()[i].clone() {
            return Ok(line);
        }
        let x = self.bound_value_in_interval(i)?;
        let ys = self.roots_over_rational(&x)?;
        let line = StatusLine::for_interval(x, i, ys);
        self.interval_lines.borrow_mut()[i] = Some(line.clone());
        Ok(line)
    }

    /// Number of arcs over interval `i`.
    pub fn arcs_over_interval(&self, i: usize) -> Result<usize> {
        Ok(self.status_line_of_interval(i)?.number_of_events())
    }

    /// The status line of event `i`, `0 <= i < number of events`.
    pub fn status_line_at_event(&self, i: usize) -> Result<StatusLine> {
        let n = self.number_of_status_lines_with_event()?;
        if i >= n {
            return Err(CurveAnalysisError::out_of_range("event", i, n));
        }
        if let Some(line) = self.event_lines.borrow()[i].clone() {
            return Ok(line);
        }
        let line = self.construct_event_line(i)?;
        self.event_lines.borrow_mut()[i] = Some(line.clone());
        Ok(line)
    }

    /// The status line over `x`, an event line or a non-event line.
    pub fn status_line_at_exact_x(&self, x: &AlgebraicReal) -> Result<StatusLine> {
        let (i, is_event) = self.x_to_index(x)?;
        if is_event {
            return self.status_line_at_event(i);
        }
        if let Some(q) = x.to_rational() {
            if let Some(line) = self.rational_lines.borrow().get(&q) {
                return Ok(line.clone());
            }
            let line = StatusLine::non_event(x.clone(), i, self.roots_over_rational(&q)?);
            self.rational_lines.borrow_mut().insert(q, line.clone());
            return Ok(line);
        }
        if let Some(line) = self.algebraic_lines.borrow().get(x) {
            return Ok(line.clone());
        }
        let count = self.arcs_over_interval(i)?;
        let ys = self
            .kernel
            .fibre_roots(self.primitive_polynomial_2()?, x, count);
        let line = StatusLine::non_event(x.clone(), i, ys);
        self.algebraic_lines
            .borrow_mut()
            .insert(x.clone(), line.clone());
        Ok(line)
    }

    /// The interval line containing `x`, or for an event `x` the event line
    /// or one of its neighbouring interval lines.
    pub fn status_line_for_x(
        &self,
        x: &AlgebraicReal,
        perturbation: Perturbation,
    ) -> Result<StatusLine> {
        let (i, is_event) = self.x_to_index(x)?;
        if !is_event {
            return self.status_line_of_interval(i);
        }
        match perturbation {
            Perturbation::Negative => self.status_line_of_interval(i),
            Perturbation::Zero => self.status_line_at_event(i),
            Perturbation::Positive => self.status_line_of_interval(i + 1),
        }
    }

    fn event_line_builder(&self) -> Result<EventLineBuilder<'_>> {
        Ok(EventLineBuilder::new(
            &self.kernel,
            self.primitive_polynomial_2()?,
            self.sturm_habicht()?,
            self.config.lcoeff_policy,
        ))
    }

    fn construct_event_line(&self, i: usize) -> Result<StatusLine> {
        let events = self.events()?;
        let left = self.bound_value_in_interval(i)?;
        let right = self.bound_value_in_interval(i + 1)?;
        let slot = EventSlot {
            index: i,
            event: &events[i],
            left: &left,
            right: &right,
        };
        let builder = self.event_line_builder()?;
        match builder.build_direct(slot)? {
            BuildOutcome::Line(line) => Ok(line),
            BuildOutcome::NonGeneric => self.resolve_non_generic(&builder, slot),
        }
    }

    fn resolve_non_generic(
        &self,
        builder: &EventLineBuilder<'_>,
        slot: EventSlot<'_>,
    ) -> Result<StatusLine> {
        let x = &slot.event.x;
        match self.config.strategy {
            DegeneracyStrategy::Exception => Err(CurveAnalysisError::NonGenericPosition {
                index: slot.index,
                x: x.to_string(),
            }),
            DegeneracyStrategy::ShearOnlyAtIrrational => match x.to_rational() {
                Some(q) => {
                    debug!(index = slot.index, x = %q, "resolving rational event exactly");
                    builder.build_rational(slot, &q)
                }
                None => self.shear_until_generic(slot.index),
            },
            DegeneracyStrategy::Shear => self.shear_until_generic(slot.index),
        }
    }

    fn shear_until_generic(&self, index: usize) -> Result<StatusLine> {
        let attempts = self.config.max_shear_attempts;
        for attempt in 1..=attempts {
            let factor = self.shear_controller.borrow_mut().get_shear_factor();
            debug!("Trying shear factor {} (attempt {}) for event {}", factor, attempt, index);
            match self.event_lines_via_shear(factor) {
                Ok(lines) => {
                    let limit = lines.len();
                    let line = lines
                        .get(index)
                        .cloned()
                        .ok_or_else(|| CurveAnalysisError::out_of_range("event", index, limit))?;
                    self.store_sheared_lines(lines)?;
                    debug!(factor, "backshear complete");
                    return Ok(line);
                }
                Err(err) if err.is_recoverable() => {
                    debug!(factor, error = %err, "shear failed");
                    self.shear_controller.borrow_mut().report_failure(factor);
                }
                Err(err) => return Err(err),
            }
        }
        Err(CurveAnalysisError::ShearLimitExceeded { attempts })
    }

    fn store_sheared_lines(&self, lines: Vec<StatusLine>) -> Result<()> {
        {
            let mut cache = self.event_lines.borrow_mut();
            for (slot, line) in cache.iter_mut().zip(lines) {
                if slot.is_none() {
                    *slot = Some(line);
                }
            }
        }
        for i in 0..=self.number_of_status_lines_with_event()? {
            self.status_line_of_interval(i)?;
        }
        Ok(())
    }

    /// An analysis of the primitive part sheared by `factor`, cached.
    ///
    /// The sheared copy is analysed completely, rejecting every degenerate
    /// event. A factor for which that fails is remembered and rejected with
    /// [`CurveAnalysisError::BadShear`] from then on.
    pub fn shear_primitive_part(&self, factor: i64) -> Result<Rc<CurveAnalysis>> {
        if factor == 0 || self.shear_controller.borrow().has_failed(factor) {
            return Err(CurveAnalysisError::BadShear { factor });
        }
        if let Some(engine) = self.shears.borrow().get(factor) {
            return Ok(engine);
        }
        let sheared = ShearTransformation::new(factor).apply(self.primitive_polynomial_2()?);
        if !sheared.is_y_regular() {
            debug!(factor, "sheared curve is not y-regular");
            self.shear_controller.borrow_mut().report_failure(factor);
            return Err(CurveAnalysisError::BadShear { factor });
        }
        let config = CurveAnalysisConfig {
            strategy: DegeneracyStrategy::Exception,
            lcoeff_policy: LeadingCoefficientPolicy::Strict,
            ..self.config.clone()
        };
        let engine = CurveAnalysis::with_polynomial(Rc::clone(&self.kernel), config, sheared);
        match engine.resolve_all_events() {
            Ok(()) => {
                let engine = Rc::new(engine);
                self.shears.borrow_mut().insert(factor, Rc::clone(&engine));
                Ok(engine)
            }
            Err(err) if err.is_recoverable() => {
                debug!(factor, error = %err, "sheared curve is not generic");
                self.shear_controller.borrow_mut().report_failure(factor);
                Err(CurveAnalysisError::BadShear { factor })
            }
            Err(err) => Err(err),
        }
    }

    fn resolve_all_events(&self) -> Result<()> {
        for i in 0..self.number_of_status_lines_with_event()? {
            self.status_line_at_event(i)?;
        }
        Ok(())
    }

    /// Every event line, built from the critical points found in the
    /// coordinates sheared by `factor`.
    ///
    /// Agrees with the directly built lines wherever those exist.
    pub fn event_lines_via_shear(&self, factor: i64) -> Result<Vec<StatusLine>> {
        let sheared = self.shear_primitive_part(factor)?;
        let events = self.events()?;
        let primitive = self.primitive_polynomial_2()?;
        let bad = CurveAnalysisError::BadShear { factor };
        let critical = ShearTransformation::new(factor)
            .critical_points(&self.kernel, primitive)
            .ok_or_else(|| bad.clone())?;
        let bounds = (0..=events.len())
            .map(|i| self.bound_value_in_interval(i))
            .collect::<Result<Vec<_>>>()?;

        let mut per_event: Vec<Vec<CriticalPoint>> = vec![Vec::new(); events.len()];
        for point in critical {
            let i = event_of_critical_point(&point, &bounds).ok_or_else(|| bad.clone())?;
            per_event[i].push(point);
        }

        let builder = self.event_line_builder()?;
        let lines = events
            .iter()
            .zip(per_event)
            .enumerate()
            .map(|(i, (event, points))| {
                let slot = EventSlot {
                    index: i,
                    event,
                    left: &bounds[i],
                    right: &bounds[i + 1],
                };
                builder.build_with_critical_points(slot, &points)
            })
            .collect::<Result<Vec<_>>>()?;
        debug!(
            factor,
            sheared_events = sheared.number_of_status_lines_with_event()?,
            events = lines.len(),
            "backsheared event lines"
        );
        Ok(lines)
    }

    /// Build every event and interval line and refine all coordinates to
    /// the given width.
    pub fn refine_all(&self, precision: &BigRational) -> Result<()> {
        for line in self.event_lines()? {
            line?.refine_all(precision);
        }
        for line in self.interval_lines()? {
            line?.refine_all(precision);
        }
        Ok(())
    }

    /// Counters describing the work done so far.
    pub fn statistics(&self) -> AnalysisStatistics {
        let built = |lines: &RefCell<Vec<Option<StatusLine>>>| {
            lines.borrow().iter().filter(|l| l.is_some()).count()
        };
        AnalysisStatistics {
            kernel: self.kernel.stats(),
            root_cache: self.root_cache.borrow().stats(),
            event_lines: built(&self.event_lines),
            interval_lines: built(&self.interval_lines),
            sheared_copies: self.shears.borrow().len(),
        }
    }
}

/// The event whose slot `(bounds[i], bounds[i + 1])` contains the critical
/// point, or `None` when there are no events.
fn event_of_critical_point(point: &CriticalPoint, bounds: &[BigRational]) -> Option<usize> {
    let slots = bounds.len().checked_sub(1).filter(|s| *s > 0)?;
    loop {
        if let Some(x) = point.x_enclosure() {
            let found = (0..slots).find(|&i| bounds[i] < *x.lo() && *x.hi() < bounds[i + 1]);
            if found.is_some() {
                return found;
            }
        }
        point.refine();
    }
}
