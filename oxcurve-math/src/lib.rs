//! OxCurve Math - Exact Algebra for Plane Curve Analysis
//!
//! This crate provides the exact scalar algebra the curve analysis engine
//! is built on:
//! - Dense integer polynomials in one variable ([`UPoly`]) and in two
//!   variables ([`BiPoly`], a polynomial in `y` over `Z[x]`)
//! - Sturm sequences, signed subresultants and Sturm-Habicht sequences
//! - Real algebraic numbers with refinable isolating intervals
//! - The [`AlgebraicKernel`], which bundles root isolation, comparison,
//!   bound finding and fibre solving behind one shared object
//!
//! # Examples
//!
//! ```
//! use oxcurve_math::{AlgebraicKernel, BiPoly};
//!
//! let kernel = AlgebraicKernel::default();
//! let f: BiPoly = "y^2 - x".parse().unwrap();
//!
//! // y-coordinates of the parabola over x = 4
//! let x = oxcurve_math::AlgebraicReal::from_integer(4);
//! let ys = kernel.fibre_roots(&f, &x, 2);
//! assert_eq!(ys.len(), 2);
//! assert_eq!(ys[1], oxcurve_math::AlgebraicReal::from_integer(2));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod algebraic;
pub mod error;
pub mod interval;
pub mod kernel;
pub mod polynomial;

pub use algebraic::AlgebraicReal;
pub use error::{MathError, Result};
pub use interval::RationalInterval;
pub use kernel::{AlgebraicKernel, KernelConfig, KernelStats};
pub use polynomial::{BiPoly, SturmSequence, UPoly};
