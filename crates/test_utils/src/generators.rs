//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating priced data that respects
//! the engine's invariants: whole cents, positive interval lengths and a
//! single currency.

use domain_pricing::{PriceComponent, PriceComponentFilter, PriceComponents};
use core_kernel::Currency;
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for whole-cent amounts between 0.00 and 100,000.00
pub fn cents_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for whole-cent amounts that may be negative
pub fn signed_cents_strategy() -> impl Strategy<Value = Decimal> {
    (-10_000_000i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for AUD components with every slot populated
pub fn price_components_strategy() -> impl Strategy<Value = PriceComponents> {
    proptest::collection::vec(cents_strategy(), PriceComponent::ALL.len()).prop_map(|amounts| {
        PriceComponent::ALL
            .iter()
            .zip(amounts)
            .fold(PriceComponents::builder(Currency::AUD), |builder, (component, amount)| {
                builder.component(*component, amount)
            })
            .build()
    })
}

/// Strategy for filters fixing an arbitrary subset of components
pub fn filter_strategy() -> impl Strategy<Value = PriceComponentFilter> {
    proptest::sample::subsequence(PriceComponent::ALL.to_vec(), 0..=PriceComponent::ALL.len())
        .prop_map(PriceComponentFilter::fixed)
}

/// Strategy for interval lengths in days, up to a little over two years
pub fn interval_days_strategy() -> impl Strategy<Value = i64> {
    1i64..800i64
}

/// Strategy for a sequence of interval lengths
pub fn interval_lengths_strategy(max_intervals: usize) -> impl Strategy<Value = Vec<i64>> {
    proptest::collection::vec(interval_days_strategy(), 1..=max_intervals)
}
