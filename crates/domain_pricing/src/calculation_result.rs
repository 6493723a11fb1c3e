//! Calculation results
//!
//! A [`CalculationResult`] is what a quote or policy transaction stores
//! after pricing. Its [`PricingModel`] is either a single interval price or
//! a compound price and is serialised with a `"type"` tag so stored
//! results deserialize back into the right shape.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::CalculationResultId;
use crate::calculation_format::PayloadFormat;
use crate::components::PriceComponents;
use crate::compound::CompoundPrice;
use crate::interval::IntervalPrice;
use crate::payable::PayablePrice;
use crate::refund::RefundBreakdown;

/// The priced shape held by a calculation result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PricingModel {
    Interval(IntervalPrice),
    Compound(CompoundPrice),
}

impl PricingModel {
    /// The model as a compound price; a single interval becomes a
    /// one-interval compound
    pub fn to_compound(&self) -> CompoundPrice {
        match self {
            PricingModel::Interval(interval) => CompoundPrice::new(interval.clone()),
            PricingModel::Compound(compound) => compound.clone(),
        }
    }
}

/// A stored pricing outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub id: CalculationResultId,
    pub calculated_at: DateTime<Utc>,
    /// Wire format of the rating payload the price was built from
    pub source_format: Option<PayloadFormat>,
    pub model: PricingModel,
}

impl CalculationResult {
    pub fn new(model: PricingModel) -> Self {
        Self {
            id: CalculationResultId::new_v7(),
            calculated_at: Utc::now(),
            source_format: None,
            model,
        }
    }

    pub fn for_interval(interval: IntervalPrice) -> Self {
        Self::new(PricingModel::Interval(interval))
    }

    pub fn for_compound(compound: CompoundPrice) -> Self {
        Self::new(PricingModel::Compound(compound))
    }

    /// Records which rating payload format the price came from
    pub fn with_source_format(mut self, format: PayloadFormat) -> Self {
        self.source_format = Some(format);
        self
    }

    pub fn total_components(&self) -> PriceComponents {
        match &self.model {
            PricingModel::Interval(interval) => interval.total_components().clone(),
            PricingModel::Compound(compound) => compound.total_components(),
        }
    }

    pub fn fixed_components(&self) -> PriceComponents {
        match &self.model {
            PricingModel::Interval(interval) => interval.fixed_components().clone(),
            PricingModel::Compound(compound) => compound.fixed_components(),
        }
    }

    pub fn scalable_components(&self) -> PriceComponents {
        match &self.model {
            PricingModel::Interval(interval) => interval.scalable_components().clone(),
            PricingModel::Compound(compound) => compound.scalable_components(),
        }
    }

    pub fn total_payable(&self) -> Decimal {
        self.total_components().total_payable()
    }

    pub fn calculate_refund(&self, date: NaiveDate) -> RefundBreakdown {
        self.model.to_compound().calculate_refund(date)
    }

    pub fn payable_price(&self, date: NaiveDate) -> PayablePrice {
        self.model.to_compound().payable_price(date)
    }
}
