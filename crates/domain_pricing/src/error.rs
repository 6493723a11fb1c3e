//! Pricing domain errors
//!
//! Every error here is raised while constructing a value and indicates
//! inconsistent upstream data. None of them is transient; callers decide
//! whether to surface them to users or treat them as system faults.

use rust_decimal::Decimal;
use thiserror::Error;

use core_kernel::TemporalError;

/// Errors that can occur in the pricing domain
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    /// A reported total does not reconcile with the sum of its parts
    #[error("Calculation data inconsistent: {field} reported as {reported} but components sum to {computed}")]
    CalculationDataInconsistent {
        field: String,
        reported: Decimal,
        computed: Decimal,
    },

    /// An interval with `start >= end`
    #[error("Invalid interval: start {start} must be before end {end}")]
    InvalidInterval {
        start: String,
        end: String,
    },

    /// Consecutive intervals with a gap or an overlap between them
    #[error("Non-contiguous compound price: interval ending {previous_end} followed by interval starting {next_start}")]
    NonContiguousCompoundPrice {
        previous_end: String,
        next_start: String,
    },

    /// Components in different currencies combined into one price
    #[error("Currency mismatch: expected {expected}, got {actual}")]
    CurrencyMismatch {
        expected: String,
        actual: String,
    },

    /// A compound price reconstructed from an empty history
    #[error("Compound price requires at least one interval")]
    EmptyCompoundPrice,

    /// A derived amount too large to represent
    #[error("Amount overflow: {component} cannot be represented")]
    AmountOverflow {
        component: String,
    },

    /// A calculation payload that is not valid V1 or V2 JSON
    #[error("Malformed calculation payload: {0}")]
    MalformedPayload(String),
}

impl PricingError {
    /// Creates a currency mismatch error
    pub fn currency_mismatch(expected: impl std::fmt::Display, actual: impl std::fmt::Display) -> Self {
        PricingError::CurrencyMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Creates a malformed payload error
    pub fn malformed(message: impl std::fmt::Display) -> Self {
        PricingError::MalformedPayload(message.to_string())
    }
}

impl From<TemporalError> for PricingError {
    fn from(err: TemporalError) -> Self {
        match err {
            TemporalError::InvalidPeriod { start, end } => PricingError::InvalidInterval { start, end },
            TemporalError::GapInSequence { previous_end, next_start }
            | TemporalError::PeriodsOverlap { previous_end, next_start } => {
                PricingError::NonContiguousCompoundPrice { previous_end, next_start }
            }
        }
    }
}
