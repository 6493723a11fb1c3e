//! Test Data Builders
//!
//! Provides builder patterns for constructing priced timelines with
//! sensible defaults. Tests describe only the intervals they care about.

use chrono::{Duration, NaiveDate};
use domain_pricing::{
    CompoundPrice, FixedAndScalablePrice, IntervalPrice, PriceComponentFilter, PriceComponents,
};

use crate::fixtures::{DateFixtures, PriceFixtures};

/// Builder for contiguous compound prices
///
/// Each interval starts where the previous one ended.
pub struct CompoundPriceBuilder {
    start: NaiveDate,
    filter: PriceComponentFilter,
    intervals: Vec<(PriceComponents, i64)>,
}

impl Default for CompoundPriceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CompoundPriceBuilder {
    /// Creates a builder starting on the standard interval start date
    pub fn new() -> Self {
        Self {
            start: DateFixtures::interval_start(),
            filter: PriceComponentFilter::default_fixed(),
            intervals: Vec::new(),
        }
    }

    /// Sets the start of the first interval
    pub fn starting(mut self, start: NaiveDate) -> Self {
        self.start = start;
        self
    }

    /// Sets the filter applied to every interval
    pub fn with_filter(mut self, filter: PriceComponentFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Appends an interval of `days` days priced at `components`
    pub fn interval(mut self, components: PriceComponents, days: i64) -> Self {
        self.intervals.push((components, days));
        self
    }

    /// Appends an interval of `days` days at the standard price shape
    /// for `base_premium`
    pub fn scaled_interval(self, base_premium: rust_decimal::Decimal, days: i64) -> Self {
        self.interval(PriceFixtures::scaled(base_premium), days)
    }

    /// The intervals the builder would assemble
    pub fn build_intervals(&self) -> Vec<IntervalPrice> {
        let mut start = self.start;
        let mut intervals = Vec::with_capacity(self.intervals.len());
        for (components, days) in &self.intervals {
            let end = start + Duration::days(*days);
            let price = FixedAndScalablePrice::new(components.clone(), self.filter.clone());
            intervals.push(IntervalPrice::new(price, start, end).unwrap());
            start = end;
        }
        intervals
    }

    /// Builds the compound price
    ///
    /// # Panics
    ///
    /// Panics if no interval was added or any interval is not positive in
    /// length.
    pub fn build(self) -> CompoundPrice {
        CompoundPrice::from_intervals(self.build_intervals()).unwrap()
    }
}
