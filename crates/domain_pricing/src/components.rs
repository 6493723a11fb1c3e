//! Price components
//!
//! A [`PriceComponents`] value is an immutable snapshot of a price broken
//! into its line items, all in one currency. [`PriceComponent`] names each
//! line item so filters and proration can address them uniformly.
//!
//! Every line item counts towards [`PriceComponents::total_payable`]; base
//! premium is carried net of commission and fees, which are charged on top.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{Currency, Money};
use crate::error::PricingError;

/// Australian jurisdictions that levy stamp duty on premiums
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Jurisdiction {
    Act,
    Nsw,
    Nt,
    Qld,
    Sa,
    Tas,
    Vic,
    Wa,
}

impl Jurisdiction {
    pub const ALL: [Jurisdiction; 8] = [
        Jurisdiction::Act,
        Jurisdiction::Nsw,
        Jurisdiction::Nt,
        Jurisdiction::Qld,
        Jurisdiction::Sa,
        Jurisdiction::Tas,
        Jurisdiction::Vic,
        Jurisdiction::Wa,
    ];

    /// The price component holding this jurisdiction's stamp duty
    pub fn stamp_duty_component(&self) -> PriceComponent {
        match self {
            Jurisdiction::Act => PriceComponent::StampDutyAct,
            Jurisdiction::Nsw => PriceComponent::StampDutyNsw,
            Jurisdiction::Nt => PriceComponent::StampDutyNt,
            Jurisdiction::Qld => PriceComponent::StampDutyQld,
            Jurisdiction::Sa => PriceComponent::StampDutySa,
            Jurisdiction::Tas => PriceComponent::StampDutyTas,
            Jurisdiction::Vic => PriceComponent::StampDutyVic,
            Jurisdiction::Wa => PriceComponent::StampDutyWa,
        }
    }
}

macro_rules! define_price_components {
    ($($variant:ident => $field:ident, $label:literal;)+) => {
        /// A single named line item of a price
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum PriceComponent {
            $($variant,)+
        }

        impl PriceComponent {
            /// Every component, in canonical order
            pub const ALL: &'static [PriceComponent] = &[$(PriceComponent::$variant,)+];

            /// Human-readable name of the line item
            pub fn label(&self) -> &'static str {
                match self {
                    $(PriceComponent::$variant => $label,)+
                }
            }
        }

        /// An immutable, itemised price in a single currency
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        pub struct PriceComponents {
            $(#[serde(default)] $field: Decimal,)+
            currency_code: Currency,
        }

        impl PriceComponents {
            /// Creates a price with every component at zero
            pub fn zero(currency: Currency) -> Self {
                Self {
                    $($field: Decimal::ZERO,)+
                    currency_code: currency,
                }
            }

            /// Returns the amount of a single component
            pub fn get(&self, component: PriceComponent) -> Decimal {
                match component {
                    $(PriceComponent::$variant => self.$field,)+
                }
            }

            fn slot_mut(&mut self, component: PriceComponent) -> &mut Decimal {
                match component {
                    $(PriceComponent::$variant => &mut self.$field,)+
                }
            }

            $(
                #[doc = concat!("Returns the ", $label, " amount")]
                pub fn $field(&self) -> Decimal {
                    self.$field
                }
            )+
        }

        impl PriceComponentsBuilder {
            $(
                #[doc = concat!("Sets the ", $label, " amount")]
                pub fn $field(mut self, amount: Decimal) -> Self {
                    self.inner.$field = amount;
                    self
                }
            )+
        }
    };
}

define_price_components! {
    BasePremium => base_premium, "base premium";
    EmergencyServicesLevy => emergency_services_levy, "emergency services levy";
    PremiumGst => premium_gst, "premium GST";
    StampDutyAct => stamp_duty_act, "ACT stamp duty";
    StampDutyNsw => stamp_duty_nsw, "NSW stamp duty";
    StampDutyNt => stamp_duty_nt, "NT stamp duty";
    StampDutyQld => stamp_duty_qld, "QLD stamp duty";
    StampDutySa => stamp_duty_sa, "SA stamp duty";
    StampDutyTas => stamp_duty_tas, "TAS stamp duty";
    StampDutyVic => stamp_duty_vic, "VIC stamp duty";
    StampDutyWa => stamp_duty_wa, "WA stamp duty";
    StampDutyUnallocated => stamp_duty_unallocated, "unallocated stamp duty";
    Commission => commission, "commission";
    CommissionGst => commission_gst, "commission GST";
    BrokerFee => broker_fee, "broker fee";
    BrokerFeeGst => broker_fee_gst, "broker fee GST";
    UnderwriterFee => underwriter_fee, "underwriter fee";
    UnderwriterFeeGst => underwriter_fee_gst, "underwriter fee GST";
    ServiceFees => service_fees, "service fees";
    Interest => interest, "interest";
    MerchantFees => merchant_fees, "merchant fees";
    TransactionCosts => transaction_costs, "transaction costs";
}

impl PriceComponents {
    /// Starts building a price in the given currency
    ///
    /// # Example
    ///
    /// ```rust
    /// use core_kernel::Currency;
    /// use domain_pricing::PriceComponents;
    /// use rust_decimal_macros::dec;
    ///
    /// let price = PriceComponents::builder(Currency::AUD)
    ///     .base_premium(dec!(117))
    ///     .premium_gst(dec!(11.70))
    ///     .stamp_duty_nsw(dec!(12.87))
    ///     .build();
    ///
    /// assert_eq!(price.total_payable(), dec!(141.57));
    /// ```
    pub fn builder(currency: Currency) -> PriceComponentsBuilder {
        PriceComponentsBuilder {
            inner: Self::zero(currency),
        }
    }

    /// Returns the currency every component is denominated in
    pub fn currency(&self) -> Currency {
        self.currency_code
    }

    /// Iterates components in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (PriceComponent, Decimal)> + '_ {
        PriceComponent::ALL.iter().map(move |c| (*c, self.get(*c)))
    }

    /// Returns a copy with a single component replaced
    pub fn with(&self, component: PriceComponent, amount: Decimal) -> Self {
        let mut next = self.clone();
        *next.slot_mut(component) = amount;
        next
    }

    /// Returns a new price with `f` applied to every component
    pub fn map(&self, mut f: impl FnMut(PriceComponent, Decimal) -> Decimal) -> Self {
        let mut next = self.clone();
        for component in PriceComponent::ALL {
            let slot = next.slot_mut(*component);
            *slot = f(*component, *slot);
        }
        next
    }

    /// Like [`PriceComponents::map`], stopping at the first error
    pub fn try_map<E>(
        &self,
        mut f: impl FnMut(PriceComponent, Decimal) -> Result<Decimal, E>,
    ) -> Result<Self, E> {
        let mut next = self.clone();
        for &component in PriceComponent::ALL {
            let slot = next.slot_mut(component);
            *slot = f(component, *slot)?;
        }
        Ok(next)
    }

    /// Keeps components matching `keep` and zeroes the rest
    pub fn retain(&self, mut keep: impl FnMut(PriceComponent) -> bool) -> Self {
        self.map(|component, amount| if keep(component) { amount } else { Decimal::ZERO })
    }

    /// Combines two prices component by component.
    ///
    /// Callers guarantee both prices share a currency.
    pub(crate) fn zip_with(&self, other: &PriceComponents, mut f: impl FnMut(Decimal, Decimal) -> Decimal) -> Self {
        self.map(|component, amount| f(amount, other.get(component)))
    }

    /// Adds two prices component by component
    ///
    /// # Errors
    ///
    /// Returns `PricingError::CurrencyMismatch` if the currencies differ.
    pub fn checked_add(&self, other: &PriceComponents) -> Result<Self, PricingError> {
        self.ensure_same_currency(other)?;
        Ok(self.zip_with(other, |a, b| a + b))
    }

    /// Subtracts `other` component by component
    pub fn checked_sub(&self, other: &PriceComponents) -> Result<Self, PricingError> {
        self.ensure_same_currency(other)?;
        Ok(self.zip_with(other, |a, b| a - b))
    }

    /// Scales every component by `factor`, without rounding
    pub fn scale(&self, factor: Decimal) -> Self {
        self.map(|_, amount| amount * factor)
    }

    /// Rounds every component to currency precision
    pub fn rounded(&self) -> Self {
        let currency = self.currency_code;
        self.map(|_, amount| currency.round(amount))
    }

    pub fn is_zero(&self) -> bool {
        self.iter().all(|(_, amount)| amount.is_zero())
    }

    /// Stamp duty across all jurisdictions, including unallocated duty
    pub fn stamp_duty_total(&self) -> Decimal {
        Jurisdiction::ALL
            .iter()
            .map(|j| self.get(j.stamp_duty_component()))
            .sum::<Decimal>()
            + self.stamp_duty_unallocated
    }

    /// Premium before taxes and charges: base premium plus levy
    pub fn total_premium(&self) -> Decimal {
        self.base_premium + self.emergency_services_levy
    }

    /// GST across premium, commission and fees
    pub fn total_gst(&self) -> Decimal {
        self.premium_gst + self.commission_gst + self.broker_fee_gst + self.underwriter_fee_gst
    }

    /// Sum of every component
    pub fn total_payable(&self) -> Decimal {
        self.iter().map(|(_, amount)| amount).sum()
    }

    /// Total payable as money in this price's currency
    pub fn total_payable_money(&self) -> Money {
        Money::new(self.total_payable(), self.currency_code)
    }

    pub(crate) fn ensure_same_currency(&self, other: &PriceComponents) -> Result<(), PricingError> {
        if self.currency_code != other.currency_code {
            return Err(PricingError::currency_mismatch(self.currency_code, other.currency_code));
        }
        Ok(())
    }
}

/// Builder for [`PriceComponents`], the raw numeric constructor
#[derive(Debug, Clone)]
pub struct PriceComponentsBuilder {
    inner: PriceComponents,
}

impl PriceComponentsBuilder {
    /// Sets an arbitrary component
    pub fn component(mut self, component: PriceComponent, amount: Decimal) -> Self {
        *self.inner.slot_mut(component) = amount;
        self
    }

    /// Sets the stamp duty for a jurisdiction
    pub fn stamp_duty(self, jurisdiction: Jurisdiction, amount: Decimal) -> Self {
        self.component(jurisdiction.stamp_duty_component(), amount)
    }

    pub fn build(self) -> PriceComponents {
        self.inner
    }
}
