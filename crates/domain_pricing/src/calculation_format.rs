//! Calculation result wire formats
//!
//! The external rating engine has produced two JSON shapes over time:
//!
//! - **V1** carries aggregate totals (premium, levy, GST, a single stamp
//!   duty figure, fees and charges, and a grand total).
//! - **V2** carries an itemised breakdown with stamp duty per jurisdiction,
//!   commission and fees with their GST, plus computed totals.
//!
//! Field names follow the rating spreadsheet and must not change. Stored
//! results written since versioning carry a `formatVersion` tag; older
//! ones are recognised by shape.
//!
//! Both formats resolve into a canonical [`PriceComponents`]. Reported
//! totals are checked against the sum of their parts and rejected when
//! they differ by more than the reconciliation tolerance.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::Currency;
use crate::components::{Jurisdiction, PriceComponents};
use crate::error::PricingError;

/// Default tolerance when reconciling reported totals with their parts
pub const DEFAULT_RECONCILIATION_TOLERANCE: Decimal = dec!(0.05);

/// Aggregate totals, as produced by the V1 rating format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationTotalsV1 {
    pub premium: Decimal,
    #[serde(default)]
    pub esl: Decimal,
    pub gst: Decimal,
    #[serde(default)]
    pub stamp_duty: Decimal,
    #[serde(default)]
    pub service_fees: Decimal,
    #[serde(default)]
    pub interest: Decimal,
    #[serde(default)]
    pub merchant_fees: Decimal,
    #[serde(default)]
    pub transaction_costs: Decimal,
    pub total_payable: Decimal,
    pub currency_code: Currency,
}

/// Itemised components, as produced by the V2 rating format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationComponentsV2 {
    pub base_premium: Decimal,
    #[serde(default)]
    pub esl: Decimal,
    pub premium_gst: Decimal,
    #[serde(default)]
    pub stamp_duty: BTreeMap<Jurisdiction, Decimal>,
    #[serde(default)]
    pub commission: Decimal,
    #[serde(default)]
    pub commission_gst: Decimal,
    #[serde(default)]
    pub broker_fee: Decimal,
    #[serde(default)]
    pub broker_fee_gst: Decimal,
    #[serde(default)]
    pub underwriter_fee: Decimal,
    #[serde(default)]
    pub underwriter_fee_gst: Decimal,
    #[serde(default)]
    pub interest: Decimal,
    #[serde(default)]
    pub merchant_fees: Decimal,
    #[serde(default)]
    pub transaction_costs: Decimal,
    pub total_duty: Decimal,
    pub total_premium: Decimal,
    pub total_gst: Decimal,
    pub total_payable: Decimal,
    pub currency_code: Currency,
}

/// Which wire format a payload arrived in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayloadFormat {
    V1,
    V2,
}

/// A calculation payload in either wire format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "formatVersion")]
pub enum CalculationPayload {
    #[serde(rename = "v1")]
    V1(CalculationTotalsV1),
    #[serde(rename = "v2")]
    V2(CalculationComponentsV2),
}

/// Payloads stored before the format tag existed. V2 is tried first; its
/// required `basePremium` never appears in V1.
#[derive(Deserialize)]
#[serde(untagged)]
enum UntaggedPayload {
    V2(CalculationComponentsV2),
    V1(CalculationTotalsV1),
}

impl From<UntaggedPayload> for CalculationPayload {
    fn from(payload: UntaggedPayload) -> Self {
        match payload {
            UntaggedPayload::V2(components) => CalculationPayload::V2(components),
            UntaggedPayload::V1(totals) => CalculationPayload::V1(totals),
        }
    }
}

impl CalculationPayload {
    /// Parses a payload from JSON text
    pub fn from_json(json: &str) -> Result<Self, PricingError> {
        let value: serde_json::Value = serde_json::from_str(json).map_err(PricingError::malformed)?;
        Self::from_value(value)
    }

    /// Parses a payload from a JSON value, tagged or legacy
    pub fn from_value(value: serde_json::Value) -> Result<Self, PricingError> {
        let payload = if value.get("formatVersion").is_some() {
            serde_json::from_value::<CalculationPayload>(value)
        } else {
            serde_json::from_value::<UntaggedPayload>(value).map(CalculationPayload::from)
        }
        .map_err(PricingError::malformed)?;

        debug!(format = ?payload.format(), "Resolved calculation payload format");
        Ok(payload)
    }

    pub fn format(&self) -> PayloadFormat {
        match self {
            CalculationPayload::V1(_) => PayloadFormat::V1,
            CalculationPayload::V2(_) => PayloadFormat::V2,
        }
    }

    /// Resolves the payload into canonical components
    pub fn to_components(&self, tolerance: Decimal) -> Result<PriceComponents, PricingError> {
        match self {
            CalculationPayload::V1(totals) => PriceComponents::from_calculation_v1(totals, tolerance),
            CalculationPayload::V2(components) => PriceComponents::from_calculation_v2(components, tolerance),
        }
    }
}

impl PriceComponents {
    /// Maps V1 aggregate totals onto components.
    ///
    /// Per-jurisdiction duty and commission are unknown in V1; the duty
    /// figure lands in the unallocated stamp duty bucket.
    ///
    /// # Errors
    ///
    /// `CalculationDataInconsistent` when `totalPayable` does not reconcile.
    pub fn from_calculation_v1(totals: &CalculationTotalsV1, tolerance: Decimal) -> Result<Self, PricingError> {
        let components = PriceComponents::builder(totals.currency_code)
            .base_premium(totals.premium)
            .emergency_services_levy(totals.esl)
            .premium_gst(totals.gst)
            .stamp_duty_unallocated(totals.stamp_duty)
            .service_fees(totals.service_fees)
            .interest(totals.interest)
            .merchant_fees(totals.merchant_fees)
            .transaction_costs(totals.transaction_costs)
            .build();

        reconcile("totalPayable", totals.total_payable, components.total_payable(), tolerance)?;
        Ok(components)
    }

    /// Maps V2 itemised components one to one.
    ///
    /// # Errors
    ///
    /// `CalculationDataInconsistent` when any of `totalDuty`, `totalPremium`,
    /// `totalGst` or `totalPayable` does not reconcile.
    pub fn from_calculation_v2(payload: &CalculationComponentsV2, tolerance: Decimal) -> Result<Self, PricingError> {
        let mut builder = PriceComponents::builder(payload.currency_code)
            .base_premium(payload.base_premium)
            .emergency_services_levy(payload.esl)
            .premium_gst(payload.premium_gst)
            .commission(payload.commission)
            .commission_gst(payload.commission_gst)
            .broker_fee(payload.broker_fee)
            .broker_fee_gst(payload.broker_fee_gst)
            .underwriter_fee(payload.underwriter_fee)
            .underwriter_fee_gst(payload.underwriter_fee_gst)
            .interest(payload.interest)
            .merchant_fees(payload.merchant_fees)
            .transaction_costs(payload.transaction_costs);
        for (jurisdiction, duty) in &payload.stamp_duty {
            builder = builder.stamp_duty(*jurisdiction, *duty);
        }
        let components = builder.build();

        reconcile("totalDuty", payload.total_duty, components.stamp_duty_total(), tolerance)?;
        reconcile("totalPremium", payload.total_premium, components.total_premium(), tolerance)?;
        reconcile("totalGst", payload.total_gst, components.total_gst(), tolerance)?;
        reconcile("totalPayable", payload.total_payable, components.total_payable(), tolerance)?;
        Ok(components)
    }
}

fn reconcile(field: &str, reported: Decimal, computed: Decimal, tolerance: Decimal) -> Result<(), PricingError> {
    if (reported - computed).abs() > tolerance {
        return Err(PricingError::CalculationDataInconsistent {
            field: field.to_string(),
            reported,
            computed,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::PriceComponent;

    const V1_JSON: &str = r#"{
        "premium": 117.00,
        "gst": 11.70,
        "stampDuty": 12.87,
        "interest": 2.50,
        "totalPayable": 144.07,
        "currencyCode": "AUD"
    }"#;

    const V2_JSON: &str = r#"{
        "basePremium": "117.00",
        "premiumGst": "11.70",
        "stampDuty": { "NSW": "12.87" },
        "interest": "2.50",
        "totalDuty": "12.87",
        "totalPremium": "117.00",
        "totalGst": "11.70",
        "totalPayable": "144.07",
        "currencyCode": "AUD"
    }"#;

    #[test]
    fn test_legacy_v1_is_recognised_by_shape() {
        let payload = CalculationPayload::from_json(V1_JSON).unwrap();
        assert_eq!(payload.format(), PayloadFormat::V1);
    }

    #[test]
    fn test_legacy_v2_is_recognised_by_shape() {
        let payload = CalculationPayload::from_json(V2_JSON).unwrap();
        assert_eq!(payload.format(), PayloadFormat::V2);
    }

    #[test]
    fn test_v1_and_v2_resolve_equivalently() {
        let v1 = CalculationPayload::from_json(V1_JSON).unwrap()
            .to_components(DEFAULT_RECONCILIATION_TOLERANCE).unwrap();
        let v2 = CalculationPayload::from_json(V2_JSON).unwrap()
            .to_components(DEFAULT_RECONCILIATION_TOLERANCE).unwrap();

        assert_eq!(v1.total_payable(), v2.total_payable());
        assert_eq!(v1.stamp_duty_total(), v2.stamp_duty_total());
        assert_eq!(v1.get(PriceComponent::StampDutyUnallocated), dec!(12.87));
        assert_eq!(v2.get(PriceComponent::StampDutyNsw), dec!(12.87));
    }

    #[test]
    fn test_inconsistent_total_is_rejected() {
        let json = V1_JSON.replace("144.07", "150.00");
        let result = CalculationPayload::from_json(&json).unwrap()
            .to_components(DEFAULT_RECONCILIATION_TOLERANCE);

        assert!(matches!(
            result,
            Err(PricingError::CalculationDataInconsistent { ref field, .. }) if field == "totalPayable"
        ));
    }

    #[test]
    fn test_unparseable_payload() {
        assert!(matches!(
            CalculationPayload::from_json(r#"{"currencyCode":"AUD"}"#),
            Err(PricingError::MalformedPayload(_))
        ));
    }
}
