//! Fixed and scalable price split

use serde::{Deserialize, Serialize};

use core_kernel::Currency;
use crate::components::PriceComponents;
use crate::filter::PriceComponentFilter;

/// A price partitioned into fixed and scalable components
///
/// `fixed` holds the filter's fixed components and zero elsewhere,
/// `scalable` holds the rest. Adding the two gives back `total` exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "FixedAndScalableRecord")]
pub struct FixedAndScalablePrice {
    total: PriceComponents,
    filter: PriceComponentFilter,
    #[serde(skip_serializing)]
    fixed: PriceComponents,
    #[serde(skip_serializing)]
    scalable: PriceComponents,
}

#[derive(Deserialize)]
struct FixedAndScalableRecord {
    total: PriceComponents,
    #[serde(default)]
    filter: PriceComponentFilter,
}

impl From<FixedAndScalableRecord> for FixedAndScalablePrice {
    fn from(record: FixedAndScalableRecord) -> Self {
        FixedAndScalablePrice::new(record.total, record.filter)
    }
}

impl FixedAndScalablePrice {
    /// Splits `total` according to `filter`
    pub fn new(total: PriceComponents, filter: PriceComponentFilter) -> Self {
        let fixed = total.retain(|c| filter.is_fixed(c));
        let scalable = total.retain(|c| filter.is_scalable(c));
        Self {
            total,
            filter,
            fixed,
            scalable,
        }
    }

    /// Splits `total` with the default fixed-component filter
    pub fn with_default_filter(total: PriceComponents) -> Self {
        Self::new(total, PriceComponentFilter::default_fixed())
    }

    pub fn total(&self) -> &PriceComponents {
        &self.total
    }

    /// Components considered earned as soon as they are charged
    pub fn fixed(&self) -> &PriceComponents {
        &self.fixed
    }

    /// Components earned in proportion to elapsed time
    pub fn scalable(&self) -> &PriceComponents {
        &self.scalable
    }

    pub fn filter(&self) -> &PriceComponentFilter {
        &self.filter
    }

    pub fn currency(&self) -> Currency {
        self.total.currency()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::PriceComponent;
    use rust_decimal_macros::dec;

    fn price() -> PriceComponents {
        PriceComponents::builder(Currency::AUD)
            .base_premium(dec!(117))
            .premium_gst(dec!(11.70))
            .stamp_duty_vic(dec!(12.87))
            .broker_fee(dec!(20))
            .interest(dec!(4.10))
            .merchant_fees(dec!(1.55))
            .transaction_costs(dec!(0.30))
            .build()
    }

    #[test]
    fn test_default_split() {
        let split = FixedAndScalablePrice::with_default_filter(price());

        assert_eq!(split.fixed().total_payable(), dec!(5.95));
        assert_eq!(split.scalable().total_payable(), dec!(161.57));
        assert_eq!(split.scalable().get(PriceComponent::Interest), dec!(0));
    }

    #[test]
    fn test_fixed_fees_split() {
        let split = FixedAndScalablePrice::new(price(), PriceComponentFilter::with_fixed_fees());

        assert_eq!(split.fixed().total_payable(), dec!(25.95));
        assert_eq!(split.scalable().total_payable(), dec!(141.57));
    }

    #[test]
    fn test_serde_rebuilds_split() {
        let split = FixedAndScalablePrice::new(price(), PriceComponentFilter::with_fixed_fees());
        let json = serde_json::to_string(&split).unwrap();
        let back: FixedAndScalablePrice = serde_json::from_str(&json).unwrap();

        assert_eq!(back, split);
    }
}
