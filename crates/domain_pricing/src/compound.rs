//! Compound prices
//!
//! A [`CompoundPrice`] is the priced history of a policy: interval prices
//! ordered by start, each beginning exactly where the previous one ends,
//! all in one currency. It is append-only. [`CompoundPrice::update`]
//! returns a new value and leaves the original untouched, so snapshots can
//! be shared freely across threads.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::{start_of_day_utc, CoverPeriod, Currency};
use crate::components::PriceComponents;
use crate::error::PricingError;
use crate::filter::PriceComponentFilter;
use crate::fixed_scalable::FixedAndScalablePrice;
use crate::interval::IntervalPrice;
use crate::payable::PayablePrice;
use crate::refund::{self, RefundBreakdown};

/// An ordered, contiguous sequence of interval prices
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CompoundPriceRecord")]
pub struct CompoundPrice {
    intervals: Vec<IntervalPrice>,
}

#[derive(Deserialize)]
struct CompoundPriceRecord {
    intervals: Vec<IntervalPrice>,
}

impl TryFrom<CompoundPriceRecord> for CompoundPrice {
    type Error = PricingError;

    fn try_from(record: CompoundPriceRecord) -> Result<Self, Self::Error> {
        CompoundPrice::from_intervals(record.intervals)
    }
}

impl CompoundPrice {
    /// Starts a compound price from its new-business interval
    pub fn new(seed: IntervalPrice) -> Self {
        Self { intervals: vec![seed] }
    }

    /// Assembles a compound price from chronologically ordered intervals
    ///
    /// # Errors
    ///
    /// - `EmptyCompoundPrice` if there are no intervals
    /// - `NonContiguousCompoundPrice` on any gap or overlap
    /// - `CurrencyMismatch` if the intervals are not all in one currency
    pub fn from_intervals(intervals: impl IntoIterator<Item = IntervalPrice>) -> Result<Self, PricingError> {
        let mut intervals = intervals.into_iter();
        let seed = intervals.next().ok_or(PricingError::EmptyCompoundPrice)?;
        let mut compound = Self::new(seed);
        for next in intervals {
            compound.ensure_appendable(&next)?;
            compound.intervals.push(next);
        }
        Ok(compound)
    }

    /// Rebuilds a compound price from the priced history stored against
    /// policy transactions, splitting every entry with `filter`
    pub fn from_history(
        history: impl IntoIterator<Item = (PriceComponents, CoverPeriod)>,
        filter: &PriceComponentFilter,
    ) -> Result<Self, PricingError> {
        let compound = Self::from_intervals(history.into_iter().map(|(components, period)| {
            IntervalPrice::for_period(FixedAndScalablePrice::new(components, filter.clone()), period)
        }))?;

        debug!(
            intervals = compound.len(),
            start = %compound.start(),
            end = %compound.end(),
            "Reconstructed compound price from history"
        );
        Ok(compound)
    }

    /// Returns a new compound price with `next` appended
    ///
    /// # Errors
    ///
    /// `NonContiguousCompoundPrice` unless `next` starts where the last
    /// interval ends; `CurrencyMismatch` if its currency differs.
    pub fn update(&self, next: IntervalPrice) -> Result<Self, PricingError> {
        self.ensure_appendable(&next)?;

        let mut intervals = Vec::with_capacity(self.intervals.len() + 1);
        intervals.extend(self.intervals.iter().cloned());
        intervals.push(next);

        debug!(intervals = intervals.len(), "Appended interval to compound price");
        Ok(Self { intervals })
    }

    fn ensure_appendable(&self, next: &IntervalPrice) -> Result<(), PricingError> {
        let last = self.last();
        if last.currency() != next.currency() {
            return Err(PricingError::currency_mismatch(last.currency(), next.currency()));
        }
        last.period().ensure_followed_by(next.period())?;
        Ok(())
    }

    pub fn intervals(&self) -> &[IntervalPrice] {
        &self.intervals
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Always false; a compound price has at least one interval
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn first(&self) -> &IntervalPrice {
        &self.intervals[0]
    }

    pub fn last(&self) -> &IntervalPrice {
        &self.intervals[self.intervals.len() - 1]
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.first().start()
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.last().end()
    }

    pub fn currency(&self) -> Currency {
        self.first().currency()
    }

    /// The interval in force at `instant`, if any
    pub fn interval_at(&self, instant: DateTime<Utc>) -> Option<&IntervalPrice> {
        self.intervals.iter().find(|interval| interval.period().contains(instant))
    }

    /// All components charged across every interval
    pub fn total_components(&self) -> PriceComponents {
        self.sum_by(IntervalPrice::total_components)
    }

    pub fn fixed_components(&self) -> PriceComponents {
        self.sum_by(IntervalPrice::fixed_components)
    }

    pub fn scalable_components(&self) -> PriceComponents {
        self.sum_by(IntervalPrice::scalable_components)
    }

    /// Sum of every interval's total payable
    pub fn total_payable(&self) -> Decimal {
        self.intervals.iter().map(IntervalPrice::total_payable).sum()
    }

    fn sum_by(&self, select: impl Fn(&IntervalPrice) -> &PriceComponents) -> PriceComponents {
        self.intervals
            .iter()
            .fold(PriceComponents::zero(self.currency()), |acc, interval| {
                acc.zip_with(select(interval), |a, b| a + b)
            })
    }

    /// Refund owed if cover stops at the start of `date`
    pub fn calculate_refund(&self, date: NaiveDate) -> RefundBreakdown {
        self.calculate_refund_at(start_of_day_utc(date))
    }

    /// Refund owed if cover stops at `instant`
    ///
    /// A target before the first interval refunds every interval in full;
    /// a target at or after the last interval's end refunds nothing.
    pub fn calculate_refund_at(&self, instant: DateTime<Utc>) -> RefundBreakdown {
        refund::prorate(&self.intervals, self.currency(), instant)
    }

    /// What remains payable if cover stops at the start of `date`
    pub fn payable_price(&self, date: NaiveDate) -> PayablePrice {
        PayablePrice::from_compound(self, start_of_day_utc(date))
    }
}
