//! Interval prices
//!
//! An [`IntervalPrice`] fixes a price for one half-open span of a policy's
//! life, such as a term or the part of a term between two adjustments.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::{CoverPeriod, Currency};
use crate::components::PriceComponents;
use crate::fixed_scalable::FixedAndScalablePrice;
use crate::error::PricingError;

const DAYS_PER_YEAR: Decimal = dec!(365);

/// A price applying to the period `[start, end)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalPrice {
    price: FixedAndScalablePrice,
    period: CoverPeriod,
}

impl IntervalPrice {
    /// Creates an interval price over calendar dates
    ///
    /// # Errors
    ///
    /// `PricingError::InvalidInterval` unless `start < end`.
    pub fn new(price: FixedAndScalablePrice, start: NaiveDate, end: NaiveDate) -> Result<Self, PricingError> {
        let period = CoverPeriod::from_dates(start, end)?;
        Ok(Self::for_period(price, period))
    }

    /// Creates an interval price over instants, for custom periods that
    /// do not fall on day boundaries
    pub fn with_timestamps(
        price: FixedAndScalablePrice,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Self, PricingError> {
        let period = CoverPeriod::new(start, end)?;
        Ok(Self::for_period(price, period))
    }

    pub fn for_period(price: FixedAndScalablePrice, period: CoverPeriod) -> Self {
        Self { price, period }
    }

    pub fn price(&self) -> &FixedAndScalablePrice {
        &self.price
    }

    pub fn period(&self) -> &CoverPeriod {
        &self.period
    }

    /// Start of the interval (inclusive)
    pub fn start(&self) -> DateTime<Utc> {
        self.period.start()
    }

    /// End of the interval (exclusive)
    pub fn end(&self) -> DateTime<Utc> {
        self.period.end()
    }

    /// Length in days; fractional only for sub-day boundaries
    pub fn days(&self) -> Decimal {
        self.period.days()
    }

    pub fn currency(&self) -> Currency {
        self.price.currency()
    }

    pub fn total_components(&self) -> &PriceComponents {
        self.price.total()
    }

    pub fn fixed_components(&self) -> &PriceComponents {
        self.price.fixed()
    }

    pub fn scalable_components(&self) -> &PriceComponents {
        self.price.scalable()
    }

    pub fn total_payable(&self) -> Decimal {
        self.price.total().total_payable()
    }

    /// Share of the interval not yet elapsed at `instant`, in `[0, 1]`
    pub fn unearned_fraction(&self, instant: DateTime<Utc>) -> Decimal {
        self.period.remaining_fraction(instant)
    }

    /// What this interval's price would come to over a 365-day year.
    ///
    /// Scalable components are stretched by `365 / days` and rounded to
    /// currency precision; fixed components pass through unchanged. Used
    /// for display and reporting, never for refunds.
    ///
    /// # Errors
    ///
    /// `PricingError::AmountOverflow` if a stretched amount does not fit in
    /// a `Decimal`, which only very short intervals or extreme amounts reach.
    pub fn annualize(&self) -> Result<PriceComponents, PricingError> {
        let days = self.days();
        let currency = self.currency();
        let filter = self.price.filter();
        self.price.total().try_map(|component, amount| {
            if filter.is_fixed(component) {
                return Ok(amount);
            }
            annualized(amount, days)
                .map(|annual| currency.round(annual))
                .ok_or_else(|| PricingError::AmountOverflow {
                    component: component.label().to_string(),
                })
        })
    }
}

/// `amount * 365 / days`, or `amount * (365 / days)` when the product
/// overflows
fn annualized(amount: Decimal, days: Decimal) -> Option<Decimal> {
    amount
        .checked_mul(DAYS_PER_YEAR)
        .and_then(|product| product.checked_div(days))
        .or_else(|| (DAYS_PER_YEAR / days).checked_mul(amount))
}
