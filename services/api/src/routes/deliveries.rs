//! Delivery administration routes

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::models::DeliveryStatus;
use crate::state::AppState;

/// Request to move a delivery to a new status
#[derive(Deserialize)]
pub struct UpdateDeliveryStatusRequest {
    pub status: String,
    /// Optional override for the transition timestamp
    pub timestamp: Option<DateTime<Utc>>,
}

/// Update the delivery status for an order (admin only)
pub async fn update_delivery_status(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
    Json(payload): Json<UpdateDeliveryStatusRequest>,
) -> ApiResult<impl IntoResponse> {
    let next = payload
        .status
        .parse::<DeliveryStatus>()
        .map_err(ApiError::BadRequest)?;

    let delivery = state
        .delivery_service
        .update_status(order_id, next, payload.timestamp)
        .await?;

    Ok(Json(delivery))
}
