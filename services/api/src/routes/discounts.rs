//! Discount administration routes

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::models::{NewDiscount, UpdateDiscount};
use crate::repositories::is_unique_violation;
use crate::state::AppState;

fn validate_percentage(percentage: Decimal) -> Result<(), ApiError> {
    if percentage <= Decimal::ZERO || percentage > Decimal::from(100) {
        return Err(ApiError::BadRequest(
            "Percentage must be between 0 and 100".to_string(),
        ));
    }
    Ok(())
}

/// List all discounts (admin only)
pub async fn list_discounts(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let discounts = state.discount_repository.list().await?;
    Ok(Json(discounts))
}

/// Create a new discount (admin only)
pub async fn create_discount(
    State(state): State<AppState>,
    Json(payload): Json<NewDiscount>,
) -> ApiResult<impl IntoResponse> {
    if payload.code.trim().is_empty() {
        return Err(ApiError::BadRequest("Discount code is required".to_string()));
    }
    validate_percentage(payload.percentage)?;
    if payload.valid_from >= payload.valid_to {
        return Err(ApiError::BadRequest(
            "valid_from must be before valid_to".to_string(),
        ));
    }

    let discount = state
        .discount_repository
        .create(&payload)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::Conflict(format!("Discount code {} already exists", payload.code))
            } else {
                e.into()
            }
        })?;

    Ok((StatusCode::CREATED, Json(discount)))
}

/// Update a discount (admin only)
///
/// The code itself is immutable; orders snapshot it at checkout, and
/// edits here never change historical orders.
pub async fn update_discount(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateDiscount>,
) -> ApiResult<impl IntoResponse> {
    if let Some(percentage) = payload.percentage {
        validate_percentage(percentage)?;
    }

    let discount = state
        .discount_repository
        .update(id, &payload)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Discount {id} not found")))?;

    Ok(Json(discount))
}

/// Delete a discount (admin only)
pub async fn delete_discount(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let deleted = state.discount_repository.delete(id).await?;
    if !deleted {
        return Err(ApiError::NotFound(format!("Discount {id} not found")));
    }

    Ok(Json(serde_json::json!({ "message": "Discount deleted" })))
}
