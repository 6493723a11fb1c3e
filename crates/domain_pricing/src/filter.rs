//! Fixed/scalable component filters
//!
//! A [`PriceComponentFilter`] decides which components are fixed (fully
//! earned once charged) and which scale with elapsed time. Interest,
//! merchant fees and transaction costs are fixed under every filter.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::components::PriceComponent;

/// Components that are fixed under every filter
pub const ALWAYS_FIXED: [PriceComponent; 3] = [
    PriceComponent::Interest,
    PriceComponent::MerchantFees,
    PriceComponent::TransactionCosts,
];

const FEE_COMPONENTS: [PriceComponent; 5] = [
    PriceComponent::BrokerFee,
    PriceComponent::BrokerFeeGst,
    PriceComponent::UnderwriterFee,
    PriceComponent::UnderwriterFeeGst,
    PriceComponent::ServiceFees,
];

/// Partition of price components into fixed and scalable sets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "FilterRecord")]
pub struct PriceComponentFilter {
    fixed: BTreeSet<PriceComponent>,
}

#[derive(Deserialize)]
struct FilterRecord {
    fixed: BTreeSet<PriceComponent>,
}

impl From<FilterRecord> for PriceComponentFilter {
    fn from(record: FilterRecord) -> Self {
        PriceComponentFilter::fixed(record.fixed)
    }
}

impl PriceComponentFilter {
    /// Builds a filter treating `components` as fixed, in addition to
    /// the components that are always fixed
    pub fn fixed(components: impl IntoIterator<Item = PriceComponent>) -> Self {
        let mut fixed: BTreeSet<PriceComponent> = components.into_iter().collect();
        fixed.extend(ALWAYS_FIXED);
        Self { fixed }
    }

    /// Interest, merchant fees and transaction costs are fixed;
    /// premium, levies, duty, GST, commission and fees scale
    pub fn default_fixed() -> Self {
        Self::fixed([])
    }

    /// Like [`default_fixed`](Self::default_fixed), but broker,
    /// underwriter and service fees (and their GST) are also fixed
    pub fn with_fixed_fees() -> Self {
        Self::fixed(FEE_COMPONENTS)
    }

    pub fn is_fixed(&self, component: PriceComponent) -> bool {
        self.fixed.contains(&component)
    }

    pub fn is_scalable(&self, component: PriceComponent) -> bool {
        !self.is_fixed(component)
    }

    /// Fixed components in canonical order
    pub fn fixed_components(&self) -> impl Iterator<Item = PriceComponent> + '_ {
        self.fixed.iter().copied()
    }

    /// Scalable components in canonical order
    pub fn scalable_components(&self) -> impl Iterator<Item = PriceComponent> + '_ {
        PriceComponent::ALL
            .iter()
            .copied()
            .filter(move |c| self.is_scalable(*c))
    }
}

impl Default for PriceComponentFilter {
    fn default() -> Self {
        Self::default_fixed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        let filter = PriceComponentFilter::default_fixed();

        assert!(filter.is_fixed(PriceComponent::Interest));
        assert!(filter.is_fixed(PriceComponent::MerchantFees));
        assert!(filter.is_fixed(PriceComponent::TransactionCosts));
        assert!(filter.is_scalable(PriceComponent::BasePremium));
        assert!(filter.is_scalable(PriceComponent::StampDutyNsw));
        assert!(filter.is_scalable(PriceComponent::CommissionGst));
        assert!(filter.is_scalable(PriceComponent::BrokerFee));
        assert_eq!(filter.fixed_components().count(), 3);
    }

    #[test]
    fn test_fixed_fees_filter() {
        let filter = PriceComponentFilter::with_fixed_fees();

        assert!(filter.is_fixed(PriceComponent::BrokerFee));
        assert!(filter.is_fixed(PriceComponent::ServiceFees));
        assert!(filter.is_scalable(PriceComponent::Commission));
    }

    #[test]
    fn test_always_fixed_cannot_be_removed() {
        let filter = PriceComponentFilter::fixed([PriceComponent::Commission]);
        assert!(ALWAYS_FIXED.iter().all(|c| filter.is_fixed(*c)));
    }

    #[test]
    fn test_deserialized_filter_keeps_always_fixed() {
        let filter: PriceComponentFilter =
            serde_json::from_str(r#"{"fixed":["broker_fee"]}"#).unwrap();

        assert!(filter.is_fixed(PriceComponent::BrokerFee));
        assert!(filter.is_fixed(PriceComponent::Interest));
    }

    #[test]
    fn test_partition_is_complete() {
        let filter = PriceComponentFilter::with_fixed_fees();
        let total = filter.fixed_components().count() + filter.scalable_components().count();
        assert_eq!(total, PriceComponent::ALL.len());
    }
}
