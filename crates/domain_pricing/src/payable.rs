//! Payable prices
//!
//! A [`PayablePrice`] nets a refund off what has been charged. A negative
//! total means a net refund is owed to the policyholder; deciding how to
//! present that (a negative payable or a separate refund line) is left to
//! the caller.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{Currency, Money};
use crate::components::PriceComponents;
use crate::compound::CompoundPrice;
use crate::error::PricingError;
use crate::refund::RefundBreakdown;

/// Charged components less refunded components
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayablePrice {
    charged: PriceComponents,
    refunded: PriceComponents,
    payable: PriceComponents,
}

impl PayablePrice {
    /// Nets `refund` off `charged`
    ///
    /// # Errors
    ///
    /// `CurrencyMismatch` if the refund is in another currency.
    pub fn new(charged: PriceComponents, refund: &RefundBreakdown) -> Result<Self, PricingError> {
        let payable = charged.checked_sub(refund.components())?;
        Ok(Self {
            charged,
            refunded: refund.components().clone(),
            payable,
        })
    }

    /// Everything charged across `compound`, less its refund at `as_of`
    pub fn from_compound(compound: &CompoundPrice, as_of: DateTime<Utc>) -> Self {
        let charged = compound.total_components();
        let refunded = compound.calculate_refund_at(as_of).into_components();
        let payable = charged.zip_with(&refunded, |a, b| a - b);
        Self {
            charged,
            refunded,
            payable,
        }
    }

    pub fn charged(&self) -> &PriceComponents {
        &self.charged
    }

    pub fn refunded(&self) -> &PriceComponents {
        &self.refunded
    }

    /// Net amount per component
    pub fn components(&self) -> &PriceComponents {
        &self.payable
    }

    pub fn currency(&self) -> Currency {
        self.payable.currency()
    }

    /// Charged total less refunded total; negative when a refund is owed
    pub fn total_payable(&self) -> Decimal {
        self.payable.total_payable()
    }

    pub fn is_refund_owed(&self) -> bool {
        self.total_payable() < Decimal::ZERO
    }

    /// The net refund owed to the policyholder, if any
    pub fn refund_owed(&self) -> Option<Money> {
        if self.is_refund_owed() {
            Some(Money::new(-self.total_payable(), self.currency()))
        } else {
            None
        }
    }
}
