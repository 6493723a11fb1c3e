//! HTTP tests against the full router

use axum::http::StatusCode;
use axum_test::TestServer;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};

use domain_pricing::PriceComponents;
use interface_api::{config::ApiConfig, create_router};
use test_utils::{DateFixtures, PayloadFixtures, PriceFixtures};

fn server() -> TestServer {
    TestServer::new(create_router(ApiConfig::default())).unwrap()
}

fn decimal(value: &Value) -> Decimal {
    value.as_str().unwrap().parse().unwrap()
}

fn interval(components: &PriceComponents, start_day: i64, days: i64) -> Value {
    json!({
        "components": components,
        "start": DateFixtures::instant(start_day),
        "end": DateFixtures::instant(start_day + days),
    })
}

fn sub_second_interval(components: &PriceComponents) -> Value {
    let start = DateFixtures::instant(0);
    json!({
        "components": components,
        "start": start,
        "end": start + chrono::Duration::milliseconds(500),
    })
}

// ============= HEALTH TESTS =============
mod health_tests {
    use super::*;

    #[tokio::test]
    async fn test_health_check() {
        let response = server().get("/health").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let response = server().get("/api/v1/policies").await;

        response.assert_status(StatusCode::NOT_FOUND);
        let body: Value = response.json();
        assert_eq!(body["error"], "not_found");
    }

    #[tokio::test]
    async fn test_request_id_is_returned() {
        let response = server().get("/health").await;
        assert!(response.headers().contains_key("x-request-id"));
    }
}

// ============= REFUND TESTS =============
mod refund_tests {
    use super::*;

    #[tokio::test]
    async fn test_refund_with_45_days_left() {
        let body = json!({
            "intervals": [interval(&PriceFixtures::standard(), 0, 100)],
            "as_of": DateFixtures::day(55),
        });
        let response = server().post("/api/v1/refunds").json(&body).await;

        response.assert_status_ok();
        let refund: Value = response.json();
        assert_eq!(decimal(&refund["total"]), dec!(63.71));
        assert_eq!(refund["currency"], "AUD");
        assert_eq!(decimal(&refund["prorated_intervals"][0]["unearned_fraction"]), dec!(0.45));
    }

    #[tokio::test]
    async fn test_sub_second_interval_refunds_in_full_at_start() {
        let body = json!({
            "intervals": [sub_second_interval(&PriceFixtures::standard())],
            "as_of": DateFixtures::day(0),
        });
        let response = server().post("/api/v1/refunds").json(&body).await;

        response.assert_status_ok();
        let refund: Value = response.json();
        assert_eq!(decimal(&refund["total"]), dec!(141.57));
    }

    #[tokio::test]
    async fn test_refund_skips_elapsed_intervals() {
        let body = json!({
            "intervals": [
                interval(&PriceFixtures::scaled(dec!(217)), -100, 100),
                interval(&PriceFixtures::standard(), 0, 100),
            ],
            "as_of": DateFixtures::day(50),
        });
        let response = server().post("/api/v1/refunds").json(&body).await;

        response.assert_status_ok();
        let refund: Value = response.json();
        assert_eq!(decimal(&refund["total"]), dec!(70.78));
        assert_eq!(refund["prorated_intervals"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_refund_with_gap_is_rejected() {
        let body = json!({
            "intervals": [
                interval(&PriceFixtures::standard(), 0, 100),
                interval(&PriceFixtures::standard(), 101, 100),
            ],
            "as_of": DateFixtures::day(50),
        });
        let response = server().post("/api/v1/refunds").json(&body).await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let error: Value = response.json();
        assert_eq!(error["error"], "validation_error");
    }

    #[tokio::test]
    async fn test_refund_without_intervals_is_rejected() {
        let body = json!({ "intervals": [], "as_of": DateFixtures::day(0) });
        let response = server().post("/api/v1/refunds").json(&body).await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let error: Value = response.json();
        assert!(error["details"].as_array().is_some_and(|details| !details.is_empty()));
    }

    #[tokio::test]
    async fn test_inverted_interval_is_rejected() {
        let body = json!({
            "intervals": [interval(&PriceFixtures::standard(), 100, -100)],
            "as_of": DateFixtures::day(0),
        });
        let response = server().post("/api/v1/refunds").json(&body).await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let response = server()
            .post("/api/v1/refunds")
            .content_type("application/json")
            .bytes("{\"intervals\": [".into())
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }
}

// ============= PAYABLE TESTS =============
mod payable_tests {
    use super::*;

    #[tokio::test]
    async fn test_payable_nets_refund_off_charged() {
        let body = json!({
            "intervals": [interval(&PriceFixtures::with_merchant_fees(), 0, 100)],
            "as_of": DateFixtures::day(55),
        });
        let response = server().post("/api/v1/payable").json(&body).await;

        response.assert_status_ok();
        let payable: Value = response.json();
        assert_eq!(decimal(&payable["charged_total"]), dec!(143.57));
        assert_eq!(decimal(&payable["refunded_total"]), dec!(63.71));
        assert_eq!(decimal(&payable["total_payable"]), dec!(79.86));
        assert!(payable.get("refund_owed").is_none());
    }

    #[tokio::test]
    async fn test_payable_reports_refund_owed_for_reduction() {
        let body = json!({
            "intervals": [interval(&PriceFixtures::reduction(), 0, 100)],
            "as_of": DateFixtures::day(50),
        });
        let response = server().post("/api/v1/payable").json(&body).await;

        response.assert_status_ok();
        let payable: Value = response.json();
        // -242.00 charged, -121.00 refunded
        assert_eq!(decimal(&payable["total_payable"]), dec!(-121.00));
        assert_eq!(decimal(&payable["refund_owed"]), dec!(121.00));
    }
}

// ============= PRICE COMPONENT TESTS =============
mod price_component_tests {
    use super::*;

    fn payload(json: &str) -> Value {
        serde_json::from_str(json).unwrap()
    }

    #[tokio::test]
    async fn test_parse_v2_payload() {
        let body = json!({ "calculation": payload(PayloadFixtures::v2_tagged()) });
        let response = server().post("/api/v1/price-components").json(&body).await;

        response.assert_status_ok();
        let parsed: Value = response.json();
        assert_eq!(parsed["format"], "v2");
        assert_eq!(decimal(&parsed["totals"]["total_payable"]), dec!(143.57));
        assert_eq!(decimal(&parsed["totals"]["stamp_duty_total"]), dec!(12.87));
        assert_eq!(decimal(&parsed["fixed"]["merchant_fees"]), dec!(2.00));
        assert_eq!(decimal(&parsed["scalable"]["merchant_fees"]), dec!(0));
    }

    #[tokio::test]
    async fn test_parse_legacy_v1_payload() {
        let body = json!({ "calculation": payload(PayloadFixtures::v1_untagged()) });
        let response = server().post("/api/v1/price-components").json(&body).await;

        response.assert_status_ok();
        let parsed: Value = response.json();
        assert_eq!(parsed["format"], "v1");
        assert_eq!(decimal(&parsed["total"]["stamp_duty_unallocated"]), dec!(12.87));
    }

    #[tokio::test]
    async fn test_parse_applies_requested_filter() {
        let body = json!({
            "calculation": payload(PayloadFixtures::v2_tagged()),
            "filter": { "fixed": ["stamp_duty_nsw"] },
        });
        let response = server().post("/api/v1/price-components").json(&body).await;

        response.assert_status_ok();
        let parsed: Value = response.json();
        assert_eq!(decimal(&parsed["fixed"]["stamp_duty_nsw"]), dec!(8.00));
        assert_eq!(decimal(&parsed["scalable"]["stamp_duty_vic"]), dec!(4.87));
    }

    #[tokio::test]
    async fn test_inconsistent_payload_is_unprocessable() {
        let json = PayloadFixtures::v1_untagged().replace("143.57", "150.00");
        let body = json!({ "calculation": payload(&json) });
        let response = server().post("/api/v1/price-components").json(&body).await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_unrecognised_payload_is_bad_request() {
        let body = json!({ "calculation": { "currencyCode": "AUD" } });
        let response = server().post("/api/v1/price-components").json(&body).await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_non_object_calculation_is_unprocessable() {
        let body = json!({ "calculation": [1, 2, 3] });
        let response = server().post("/api/v1/price-components").json(&body).await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_annualize_interval() {
        let body = json!({ "interval": interval(&PriceFixtures::standard(), 0, 100) });
        let response = server().post("/api/v1/intervals/annualize").json(&body).await;

        response.assert_status_ok();
        let annual: Value = response.json();
        assert_eq!(decimal(&annual["days"]), dec!(100));
        assert_eq!(decimal(&annual["annualized"]["base_premium"]), dec!(427.05));
        assert_eq!(decimal(&annual["annual_total"]), dec!(516.73));
    }

    #[tokio::test]
    async fn test_annualize_sub_second_interval() {
        let body = json!({ "interval": sub_second_interval(&PriceFixtures::standard()) });
        let response = server().post("/api/v1/intervals/annualize").json(&body).await;

        response.assert_status_ok();
        let annual: Value = response.json();
        assert!(decimal(&annual["days"]) > Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_unrepresentable_annual_amount_is_unprocessable() {
        let huge = PriceComponents::builder(core_kernel::Currency::AUD)
            .base_premium(Decimal::MAX)
            .build();
        let body = json!({ "interval": sub_second_interval(&huge) });
        let response = server().post("/api/v1/intervals/annualize").json(&body).await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let error: Value = response.json();
        assert_eq!(error["error"], "validation_error");
    }
}
