//! Core Kernel - Foundational types for the pricing engine
//!
//! This crate provides the building blocks shared by the pricing domain
//! and its HTTP surface:
//! - Money and currency with the single currency-rounding rule
//! - Half-open cover periods for priced timelines
//! - Strongly typed identifiers

pub mod money;
pub mod temporal;
pub mod identifiers;
pub mod error;

pub use money::{Money, Currency};
pub use temporal::{CoverPeriod, TemporalError, start_of_day_utc};
pub use identifiers::CalculationResultId;
pub use error::CoreError;
