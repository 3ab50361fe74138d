//! Property-based tests for oxcurve-analysis
//!
//! This module contains property tests for:
//! - Event ordering and classification of x-coordinates
//! - Agreement of sheared and direct event lines
//! - Refinement of status line coordinates
//! - Vertical line components

mod event_properties;
mod shear_properties;
mod status_line_properties;
mod strategies;
