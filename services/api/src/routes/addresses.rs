//! Address routes for the current user

use axum::{
    Json,
    extract::{Extension, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::middleware::AuthUser;
use crate::models::{NewAddress, UpdateAddress};
use crate::state::AppState;

/// List the current user's addresses
pub async fn list_addresses(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<impl IntoResponse> {
    let addresses = state.address_repository.list_by_user(auth.id).await?;
    Ok(Json(addresses))
}

/// Create an address for the current user
pub async fn create_address(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<NewAddress>,
) -> ApiResult<impl IntoResponse> {
    let address = state.address_repository.create(auth.id, &payload).await?;
    Ok((StatusCode::CREATED, Json(address)))
}

/// Update one of the current user's addresses
pub async fn update_address(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAddress>,
) -> ApiResult<impl IntoResponse> {
    let address = state
        .address_repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Address {id} not found")))?;

    if !auth.can_access(address.user_id) {
        return Err(ApiError::Forbidden);
    }

    let updated = state
        .address_repository
        .update(id, &payload)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Address {id} not found")))?;

    Ok(Json(updated))
}

/// Delete one of the current user's addresses
///
/// Blocked while orders reference the address as shipping or billing;
/// re-deleting an already-deleted address is a clean not-found.
pub async fn delete_address(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let address = state
        .address_repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Address {id} not found")))?;

    if !auth.can_access(address.user_id) {
        return Err(ApiError::Forbidden);
    }

    let order_count = state.address_repository.order_count(id).await?;
    if order_count > 0 {
        return Err(ApiError::Conflict(format!(
            "Address {id} is referenced by {order_count} orders"
        )));
    }

    state.address_repository.delete(id).await?;

    Ok(Json(serde_json::json!({ "message": "Address deleted" })))
}
