//! OxCurve Analysis - Topology of Real Algebraic Plane Curves
//!
//! This crate decomposes a curve `f(x, y) = 0`, `f` a square-free integer
//! polynomial, along the x-axis:
//! - Finitely many *events*, the x-coordinates of critical points, vertical
//!   asymptotes and vertical lines
//! - Between two events the curve is a fixed number of non-crossing arcs,
//!   described by an interval status line
//! - Over each event a status line lists the points of the curve and how
//!   many arcs enter each point from the left and leave it to the right
//! - Curves in non-generic position are sheared into generic position and
//!   the result is transported back
//!
//! Every quantity is computed on first request and memoised.
//!
//! # Examples
//!
//! ```
//! use oxcurve_analysis::{ArcCounts, CurveAnalysis};
//!
//! // The parabola y^2 = x has one event, its vertex
//! let curve = CurveAnalysis::from_text("y^2 - x").unwrap();
//! assert_eq!(curve.number_of_status_lines_with_event().unwrap(), 1);
//!
//! let vertex = curve.status_line_at_event(0).unwrap();
//! assert_eq!(vertex.number_of_events(), 1);
//! assert_eq!(
//!     vertex.number_of_incident_branches(0).unwrap(),
//!     ArcCounts { left: 0, right: 2 }
//! );
//!
//! // Two arcs to the right of the vertex, none to the left
//! assert_eq!(curve.arcs_over_interval(0).unwrap(), 0);
//! assert_eq!(curve.arcs_over_interval(1).unwrap(), 2);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod cache;
pub mod config;
pub mod curve_analysis;
pub mod error;
pub mod event;
mod event_line;
pub mod shear;
pub mod status_line;

pub use cache::{RootCache, RootCacheStats};
pub use config::{CurveAnalysisConfig, DegeneracyStrategy, LeadingCoefficientPolicy};
pub use curve_analysis::{
    AnalysisStatistics, AsymptoticValue, CurveAnalysis, Perturbation, PrincipalCoefficients,
    StatusLines, XSide,
};
pub use error::{CurveAnalysisError, Result};
pub use event::EventCoordinate;
pub use shear::{CriticalPoint, ShearController, ShearHandle, ShearRegistry, ShearTransformation};
pub use status_line::{ArcCounts, AsymptoteCounts, StatusLine, StatusPoint};

pub use oxcurve_math::{AlgebraicKernel, AlgebraicReal, BiPoly, UPoly};
