//! Refund and payable price DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{CoverPeriod, Currency, TemporalError};
use domain_pricing::{
    CompoundPrice, PayablePrice, PriceComponentFilter, PriceComponents, PricingError, ProratedInterval,
    RefundBreakdown,
};

use super::components::IntervalRequest;

/// A priced history and the date cover stops
#[derive(Debug, Deserialize, Validate)]
pub struct CompoundPriceRequest {
    /// Chronologically ordered, contiguous intervals
    #[validate(length(min = 1, message = "At least one interval is required"), nested)]
    pub intervals: Vec<IntervalRequest>,
    /// Components to treat as fixed on top of the always-fixed ones
    #[serde(default)]
    pub filter: Option<PriceComponentFilter>,
    pub as_of: NaiveDate,
}

impl CompoundPriceRequest {
    /// Rebuilds the compound price the request describes
    pub fn to_compound(&self) -> Result<CompoundPrice, PricingError> {
        let filter = self.filter.clone().unwrap_or_default();
        let history = self
            .intervals
            .iter()
            .map(|interval| Ok((interval.components.clone(), CoverPeriod::new(interval.start, interval.end)?)))
            .collect::<Result<Vec<_>, TemporalError>>()?;
        CompoundPrice::from_history(history, &filter)
    }
}

#[derive(Debug, Serialize)]
pub struct RefundResponse {
    pub as_of: NaiveDate,
    pub currency: Currency,
    pub total: Decimal,
    pub components: PriceComponents,
    pub prorated_intervals: Vec<ProratedInterval>,
}

impl RefundResponse {
    pub fn new(as_of: NaiveDate, refund: RefundBreakdown) -> Self {
        Self {
            as_of,
            currency: refund.currency(),
            total: refund.total_payable(),
            components: refund.components().clone(),
            prorated_intervals: refund.prorated_intervals().to_vec(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PayableResponse {
    pub as_of: NaiveDate,
    pub currency: Currency,
    pub charged_total: Decimal,
    pub refunded_total: Decimal,
    pub total_payable: Decimal,
    /// Present when the policyholder is owed money
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund_owed: Option<Decimal>,
    pub charged: PriceComponents,
    pub refunded: PriceComponents,
    pub payable: PriceComponents,
}

impl PayableResponse {
    pub fn new(as_of: NaiveDate, payable: PayablePrice) -> Self {
        Self {
            as_of,
            currency: payable.currency(),
            charged_total: payable.charged().total_payable(),
            refunded_total: payable.refunded().total_payable(),
            total_payable: payable.total_payable(),
            refund_owed: payable.refund_owed().map(|owed| owed.amount()),
            charged: payable.charged().clone(),
            refunded: payable.refunded().clone(),
            payable: payable.components().clone(),
        }
    }
}
