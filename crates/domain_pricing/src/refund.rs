//! Refund proration
//!
//! Computes the unearned share of a priced timeline at a target instant.
//!
//! For each interval ending after the target, the scalable components are
//! multiplied by the interval's unearned fraction: the remaining-over-total
//! day ratio for the interval containing the target, and 1 for every
//! interval that starts at or after it. Fully elapsed intervals contribute
//! nothing. Fixed components (interest, merchant fees, transaction costs
//! and whatever else the filter fixes) are never refunded.
//!
//! Ratios and products stay unrounded while summing across intervals.
//! Rounding happens once at the end: each component is rounded to currency
//! precision, the refund total is the rounded sum of the unrounded
//! components, and any residual cent is carried by the largest component
//! so the breakdown always adds up to its total.
//!
//! No clamping is applied. A refund larger than what has been paid, or a
//! negative refund from a reduction interval, is returned as computed.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{CoverPeriod, Currency};
use crate::components::{PriceComponent, PriceComponents};
use crate::interval::IntervalPrice;

/// The unearned fraction applied to one interval
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProratedInterval {
    pub period: CoverPeriod,
    pub unearned_fraction: Decimal,
}

/// The refundable, scalable portion of a priced timeline at a point in time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefundBreakdown {
    as_of: DateTime<Utc>,
    components: PriceComponents,
    prorated_intervals: Vec<ProratedInterval>,
}

impl RefundBreakdown {
    /// The instant the refund was calculated for
    pub fn as_of(&self) -> DateTime<Utc> {
        self.as_of
    }

    /// Refunded amount per component, rounded to currency precision
    pub fn components(&self) -> &PriceComponents {
        &self.components
    }

    pub fn into_components(self) -> PriceComponents {
        self.components
    }

    /// Intervals that contributed, with the fraction applied to each
    pub fn prorated_intervals(&self) -> &[ProratedInterval] {
        &self.prorated_intervals
    }

    pub fn currency(&self) -> Currency {
        self.components.currency()
    }

    /// Sum of all refunded components
    pub fn total_payable(&self) -> Decimal {
        self.components.total_payable()
    }

    pub fn is_zero(&self) -> bool {
        self.components.is_zero()
    }
}

/// Prorates `intervals` at `as_of`.
///
/// `intervals` must be ordered, contiguous and in `currency`, which
/// `CompoundPrice` guarantees.
pub(crate) fn prorate(intervals: &[IntervalPrice], currency: Currency, as_of: DateTime<Utc>) -> RefundBreakdown {
    let mut unrounded = PriceComponents::zero(currency);
    let mut unrounded_total = Decimal::ZERO;
    let mut prorated_intervals = Vec::new();

    for interval in intervals.iter().skip_while(|interval| interval.end() <= as_of) {
        let period = interval.period();
        let remaining = period.remaining_seconds(as_of);
        let length = period.seconds();
        let scalable = interval.scalable_components();

        unrounded = unrounded.zip_with(scalable, |sum, amount| sum + unearned(amount, remaining, length));
        unrounded_total += unearned(scalable.total_payable(), remaining, length);
        prorated_intervals.push(ProratedInterval {
            period: *period,
            unearned_fraction: remaining / length,
        });
    }

    // Rounding each component alone can drift a cent from the rounded
    // total; the total wins and the largest component absorbs the cent.
    RefundBreakdown {
        as_of,
        components: round_reconciled(&unrounded, unrounded_total),
        prorated_intervals,
    }
}

/// `amount * remaining / length`, dividing last.
///
/// Falls back to multiplying by the ratio when the product would overflow;
/// the ratio never exceeds 1 so that form always fits.
fn unearned(amount: Decimal, remaining: Decimal, length: Decimal) -> Decimal {
    if remaining == length {
        return amount;
    }
    match amount.checked_mul(remaining) {
        Some(product) => product / length,
        None => amount * (remaining / length),
    }
}

/// Rounds each component and assigns the rounding residual against the
/// rounded `unrounded_total` to the component with the largest unrounded
/// magnitude.
fn round_reconciled(unrounded: &PriceComponents, unrounded_total: Decimal) -> PriceComponents {
    let currency = unrounded.currency();
    let target_total = currency.round(unrounded_total);
    let rounded = unrounded.rounded();
    let residual = target_total - rounded.total_payable();
    if residual.is_zero() {
        return rounded;
    }

    let mut largest: Option<(PriceComponent, Decimal)> = None;
    for (component, amount) in unrounded.iter() {
        let magnitude = amount.abs();
        if largest.map_or(true, |(_, best)| magnitude > best) {
            largest = Some((component, magnitude));
        }
    }

    match largest {
        Some((component, _)) => rounded.with(component, rounded.get(component) + residual),
        None => rounded,
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use core_kernel::start_of_day_utc;
    use proptest::prelude::*;
    use crate::compound::CompoundPrice;
    use crate::fixed_scalable::FixedAndScalablePrice;

    fn single_interval(premium_cents: i64, gst_cents: i64, duty_cents: i64, days: i64) -> CompoundPrice {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let price = PriceComponents::builder(Currency::AUD)
            .base_premium(Decimal::new(premium_cents, 2))
            .premium_gst(Decimal::new(gst_cents, 2))
            .stamp_duty_sa(Decimal::new(duty_cents, 2))
            .merchant_fees(Decimal::new(199, 2))
            .build();
        CompoundPrice::new(
            IntervalPrice::new(
                FixedAndScalablePrice::with_default_filter(price),
                start,
                start + Duration::days(days),
            )
            .unwrap(),
        )
    }

    proptest! {
        #[test]
        fn refund_total_is_rounded_linear_share(
            premium in 0i64..10_000_000i64,
            gst in 0i64..1_000_000i64,
            duty in 0i64..1_000_000i64,
            days in 1i64..800i64,
            elapsed_seed in 0i64..800i64,
        ) {
            let compound = single_interval(premium, gst, duty, days);
            let elapsed = elapsed_seed % (days + 1);
            let target = start_of_day_utc(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + Duration::days(elapsed));
            let refund = compound.calculate_refund_at(target);

            let scalable = compound.scalable_components().total_payable();
            let remaining = Decimal::from((days - elapsed) * 86_400);
            let length = Decimal::from(days * 86_400);
            let expected = Currency::AUD.round(scalable * remaining / length);
            prop_assert_eq!(refund.total_payable(), expected);
            prop_assert_eq!(refund.components().merchant_fees(), Decimal::ZERO);
        }

        #[test]
        fn refund_components_always_add_up(
            premium in 0i64..10_000_000i64,
            gst in 0i64..1_000_000i64,
            duty in 0i64..1_000_000i64,
            days in 1i64..800i64,
            elapsed in 0i64..800i64,
        ) {
            let compound = single_interval(premium, gst, duty, days);
            let target = start_of_day_utc(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap() + Duration::days(elapsed));
            let refund = compound.calculate_refund_at(target);

            let summed: Decimal = refund.components().iter().map(|(_, amount)| amount).sum();
            prop_assert_eq!(summed, refund.total_payable());
            prop_assert!(refund.total_payable() >= Decimal::ZERO);
            prop_assert!(refund.total_payable() <= compound.scalable_components().total_payable());
        }
    }
}
