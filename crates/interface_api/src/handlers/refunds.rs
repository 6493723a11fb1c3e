//! Refund and payable price handlers

use axum::Json;
use tracing::info;

use crate::dto::refunds::*;
use crate::error::ApiError;
use crate::extract::ValidatedJson;

/// Refund owed when cover stops at the start of `as_of`
pub async fn calculate_refund(
    ValidatedJson(request): ValidatedJson<CompoundPriceRequest>,
) -> Result<Json<RefundResponse>, ApiError> {
    let compound = request.to_compound()?;
    let refund = compound.calculate_refund(request.as_of);

    info!(
        intervals = compound.len(),
        as_of = %request.as_of,
        refund_total = %refund.components().total_payable_money(),
        "Calculated refund"
    );
    Ok(Json(RefundResponse::new(request.as_of, refund)))
}

/// Charged less refunded when cover stops at the start of `as_of`
pub async fn payable_price(
    ValidatedJson(request): ValidatedJson<CompoundPriceRequest>,
) -> Result<Json<PayableResponse>, ApiError> {
    let compound = request.to_compound()?;
    let payable = compound.payable_price(request.as_of);

    info!(
        intervals = compound.len(),
        as_of = %request.as_of,
        total_payable = %payable.components().total_payable_money(),
        "Calculated payable price"
    );
    if let Some(owed) = payable.refund_owed() {
        info!(refund_owed = %owed, "Net refund owed to policyholder");
    }
    Ok(Json(PayableResponse::new(request.as_of, payable)))
}
