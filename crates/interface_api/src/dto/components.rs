//! Price component DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use core_kernel::Currency;
use domain_pricing::{FixedAndScalablePrice, PayloadFormat, PriceComponentFilter, PriceComponents};

/// A rating engine payload to resolve into components
#[derive(Debug, Deserialize, Validate)]
pub struct ParseComponentsRequest {
    /// V1 or V2 calculation JSON, tagged or not
    #[validate(custom(function = "validate_object"))]
    pub calculation: serde_json::Value,
    /// Components to treat as fixed on top of the always-fixed ones
    #[serde(default)]
    pub filter: Option<PriceComponentFilter>,
}

fn validate_object(value: &serde_json::Value) -> Result<(), ValidationError> {
    if value.is_object() {
        Ok(())
    } else {
        Err(ValidationError::new("calculation_not_object"))
    }
}

/// Totals derived from a set of components
#[derive(Debug, Serialize)]
pub struct DerivedTotals {
    pub stamp_duty_total: Decimal,
    pub total_premium: Decimal,
    pub total_gst: Decimal,
    pub total_payable: Decimal,
}

impl From<&PriceComponents> for DerivedTotals {
    fn from(components: &PriceComponents) -> Self {
        Self {
            stamp_duty_total: components.stamp_duty_total(),
            total_premium: components.total_premium(),
            total_gst: components.total_gst(),
            total_payable: components.total_payable(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PriceComponentsResponse {
    pub format: PayloadFormat,
    pub currency: Currency,
    pub total: PriceComponents,
    pub fixed: PriceComponents,
    pub scalable: PriceComponents,
    pub totals: DerivedTotals,
}

impl PriceComponentsResponse {
    pub fn new(format: PayloadFormat, price: &FixedAndScalablePrice) -> Self {
        Self {
            format,
            currency: price.currency(),
            total: price.total().clone(),
            fixed: price.fixed().clone(),
            scalable: price.scalable().clone(),
            totals: DerivedTotals::from(price.total()),
        }
    }
}

/// One priced span of cover
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_interval_bounds"))]
pub struct IntervalRequest {
    pub components: PriceComponents,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

pub(crate) fn validate_interval_bounds(interval: &IntervalRequest) -> Result<(), ValidationError> {
    if interval.start < interval.end {
        Ok(())
    } else {
        let mut error = ValidationError::new("invalid_interval");
        error.message = Some(format!("start {} must be before end {}", interval.start, interval.end).into());
        Err(error)
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct AnnualizeRequest {
    #[validate(nested)]
    pub interval: IntervalRequest,
    #[serde(default)]
    pub filter: Option<PriceComponentFilter>,
}

#[derive(Debug, Serialize)]
pub struct AnnualizeResponse {
    pub days: Decimal,
    pub annualized: PriceComponents,
    pub annual_total: Decimal,
}
