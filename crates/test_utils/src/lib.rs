//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! pricing engine test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built prices, dates and rating payloads
//! - `builders`: Builder patterns for compound prices
//! - `assertions`: Custom assertion helpers for priced components
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
