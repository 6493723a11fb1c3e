//! Price component handlers

use axum::{extract::State, Json};
use tracing::info;

use domain_pricing::{CalculationPayload, FixedAndScalablePrice, IntervalPrice};

use crate::dto::components::*;
use crate::extract::ValidatedJson;
use crate::{error::ApiError, AppState};

/// Resolves a V1 or V2 rating payload into canonical components and
/// splits them into fixed and scalable parts
pub async fn parse_components(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ParseComponentsRequest>,
) -> Result<Json<PriceComponentsResponse>, ApiError> {
    let payload = CalculationPayload::from_value(request.calculation)?;
    let format = payload.format();
    let components = payload.to_components(state.config.reconciliation_tolerance)?;
    let price = FixedAndScalablePrice::new(components, request.filter.unwrap_or_default());

    info!(
        format = ?format,
        total_payable = %price.total().total_payable(),
        "Resolved calculation payload"
    );
    Ok(Json(PriceComponentsResponse::new(format, &price)))
}

/// Scales an interval's price to a 365-day year
pub async fn annualize(
    ValidatedJson(request): ValidatedJson<AnnualizeRequest>,
) -> Result<Json<AnnualizeResponse>, ApiError> {
    let price = FixedAndScalablePrice::new(request.interval.components, request.filter.unwrap_or_default());
    let interval = IntervalPrice::with_timestamps(price, request.interval.start, request.interval.end)?;
    let annualized = interval.annualize()?;

    info!(days = %interval.days(), "Annualized interval price");
    Ok(Json(AnnualizeResponse {
        days: interval.days(),
        annual_total: annualized.total_payable(),
        annualized,
    }))
}
