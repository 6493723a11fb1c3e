//! Pricing Domain
//!
//! This crate implements the compound interval pricing engine: itemised
//! prices, the prices fixed for spans of a policy's life, and the refund
//! owed when cover stops part way through.
//!
//! # Model
//!
//! ```text
//! PriceComponents -> FixedAndScalablePrice -> IntervalPrice -> CompoundPrice
//!                                                                  |
//!                                             RefundBreakdown <----+----> PayablePrice
//! ```
//!
//! Everything here is an immutable value. Operations build new values and
//! never touch shared state, so the engine can be called from any number of
//! threads without coordination.
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use core_kernel::Currency;
//! use domain_pricing::{CompoundPrice, FixedAndScalablePrice, IntervalPrice, PriceComponents};
//! use rust_decimal_macros::dec;
//!
//! let price = PriceComponents::builder(Currency::AUD)
//!     .base_premium(dec!(117))
//!     .premium_gst(dec!(11.70))
//!     .stamp_duty_nsw(dec!(12.87))
//!     .build();
//! let start = NaiveDate::from_ymd_opt(2019, 7, 1).unwrap();
//! let end = NaiveDate::from_ymd_opt(2019, 10, 9).unwrap();
//! let interval = IntervalPrice::new(FixedAndScalablePrice::with_default_filter(price), start, end)?;
//!
//! let compound = CompoundPrice::new(interval);
//! let refund = compound.calculate_refund(NaiveDate::from_ymd_opt(2019, 8, 25).unwrap());
//! assert_eq!(refund.total_payable(), dec!(63.71));
//! # Ok::<(), domain_pricing::PricingError>(())
//! ```

pub mod components;
pub mod filter;
pub mod fixed_scalable;
pub mod calculation_format;
pub mod interval;
pub mod compound;
pub mod refund;
pub mod payable;
pub mod calculation_result;
pub mod error;

pub use components::{Jurisdiction, PriceComponent, PriceComponents, PriceComponentsBuilder};
pub use filter::PriceComponentFilter;
pub use fixed_scalable::FixedAndScalablePrice;
pub use calculation_format::{
    CalculationComponentsV2, CalculationPayload, CalculationTotalsV1, PayloadFormat,
    DEFAULT_RECONCILIATION_TOLERANCE,
};
pub use interval::IntervalPrice;
pub use compound::CompoundPrice;
pub use refund::{ProratedInterval, RefundBreakdown};
pub use payable::PayablePrice;
pub use calculation_result::{CalculationResult, PricingModel};
pub use error::PricingError;
