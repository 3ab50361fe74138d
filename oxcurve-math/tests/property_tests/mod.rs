//! Property-based tests for oxcurve-math
//!
//! This module contains property tests for:
//! - Polynomial arithmetic, gcd and square-free factorisation
//! - Sturm-Habicht root counting and root isolation
//! - Bivariate shears and the text format

mod bivariate_properties;
mod polynomial_properties;
mod root_properties;
