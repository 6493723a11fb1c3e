//! Pre-built Test Fixtures
//!
//! Provides ready-to-use prices, dates and rating payloads. The figures are
//! the worked examples the pricing tests are written against: a 100-day
//! interval priced at 117.00 premium, 11.70 GST and 12.87 NSW stamp duty.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use core_kernel::{start_of_day_utc, Currency};
use domain_pricing::{FixedAndScalablePrice, IntervalPrice, PriceComponents};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Fixture for priced components
pub struct PriceFixtures;

impl PriceFixtures {
    /// 117.00 premium, 11.70 GST and 12.87 NSW duty; 141.57 in total
    pub fn standard() -> PriceComponents {
        Self::scaled(dec!(117))
    }

    /// The standard shape for any base premium: GST at 10% and duty at 11%
    pub fn scaled(base_premium: Decimal) -> PriceComponents {
        PriceComponents::builder(Currency::AUD)
            .base_premium(base_premium)
            .premium_gst(base_premium * dec!(0.10))
            .stamp_duty_nsw(base_premium * dec!(0.11))
            .build()
    }

    /// The standard price with 2.00 of merchant fees on top
    pub fn with_merchant_fees() -> PriceComponents {
        PriceComponents::builder(Currency::AUD)
            .base_premium(dec!(117))
            .premium_gst(dec!(11.70))
            .stamp_duty_nsw(dec!(12.87))
            .merchant_fees(dec!(2.00))
            .build()
    }

    /// Every component set to a distinct non-zero amount
    pub fn fully_itemised() -> PriceComponents {
        PriceComponents::builder(Currency::AUD)
            .base_premium(dec!(500.00))
            .emergency_services_levy(dec!(25.00))
            .premium_gst(dec!(52.50))
            .stamp_duty_nsw(dec!(30.00))
            .stamp_duty_vic(dec!(20.00))
            .commission(dec!(75.00))
            .commission_gst(dec!(7.50))
            .broker_fee(dec!(40.00))
            .broker_fee_gst(dec!(4.00))
            .underwriter_fee(dec!(15.00))
            .underwriter_fee_gst(dec!(1.50))
            .service_fees(dec!(5.00))
            .interest(dec!(3.10))
            .merchant_fees(dec!(1.90))
            .transaction_costs(dec!(0.55))
            .build()
    }

    /// A reduction: negative premium, GST and duty
    pub fn reduction() -> PriceComponents {
        Self::scaled(dec!(-200))
    }
}

/// Fixture for dates used by the worked examples
pub struct DateFixtures;

impl DateFixtures {
    /// Start of the standard 100-day interval
    pub fn interval_start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2019, 7, 1).unwrap()
    }

    /// End (exclusive) of the standard 100-day interval
    pub fn interval_end() -> NaiveDate {
        Self::interval_start() + Duration::days(100)
    }

    /// The day `days` after the interval start
    pub fn day(days: i64) -> NaiveDate {
        Self::interval_start() + Duration::days(days)
    }

    /// Midnight UTC on `day(days)`
    pub fn instant(days: i64) -> DateTime<Utc> {
        start_of_day_utc(Self::day(days))
    }
}

/// Fixture for interval prices
pub struct IntervalFixtures;

impl IntervalFixtures {
    /// The standard price over the standard 100 days
    pub fn standard() -> IntervalPrice {
        Self::over(PriceFixtures::standard(), DateFixtures::interval_start(), 100)
    }

    /// `components` with the default filter over `days` days from `start`
    pub fn over(components: PriceComponents, start: NaiveDate, days: i64) -> IntervalPrice {
        IntervalPrice::new(
            FixedAndScalablePrice::with_default_filter(components),
            start,
            start + Duration::days(days),
        )
        .unwrap()
    }
}

/// Fixture for rating engine payloads
pub struct PayloadFixtures;

impl PayloadFixtures {
    /// A legacy V1 payload with no format tag
    pub fn v1_untagged() -> &'static str {
        r#"{
            "premium": "117.00",
            "gst": "11.70",
            "stampDuty": "12.87",
            "merchantFees": "2.00",
            "totalPayable": "143.57",
            "currencyCode": "AUD"
        }"#
    }

    /// A tagged V1 payload
    pub fn v1_tagged() -> &'static str {
        r#"{
            "formatVersion": "v1",
            "premium": "117.00",
            "gst": "11.70",
            "stampDuty": "12.87",
            "merchantFees": "2.00",
            "totalPayable": "143.57",
            "currencyCode": "AUD"
        }"#
    }

    /// A legacy V2 payload with no format tag
    pub fn v2_untagged() -> &'static str {
        r#"{
            "basePremium": "117.00",
            "premiumGst": "11.70",
            "stampDuty": { "NSW": "12.87" },
            "merchantFees": "2.00",
            "totalDuty": "12.87",
            "totalPremium": "117.00",
            "totalGst": "11.70",
            "totalPayable": "143.57",
            "currencyCode": "AUD"
        }"#
    }

    /// A tagged V2 payload with duty in two jurisdictions
    pub fn v2_tagged() -> &'static str {
        r#"{
            "formatVersion": "v2",
            "basePremium": "117.00",
            "premiumGst": "11.70",
            "stampDuty": { "NSW": "8.00", "VIC": "4.87" },
            "merchantFees": "2.00",
            "totalDuty": "12.87",
            "totalPremium": "117.00",
            "totalGst": "11.70",
            "totalPayable": "143.57",
            "currencyCode": "AUD"
        }"#
    }
}
