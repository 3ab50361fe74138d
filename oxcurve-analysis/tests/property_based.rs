//! Property-based testing entry point for oxcurve-analysis
//!
//! Run with: cargo test --test property_based

mod property_tests;
