//! User profile routes

use axum::{
    Json,
    extract::{Extension, Path, State},
    response::IntoResponse,
};
use tracing::info;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::middleware::AuthUser;
use crate::models::UpdateUser;
use crate::state::AppState;
use crate::validation::{validate_email, validate_password};

/// Get the current user's profile
pub async fn get_me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<impl IntoResponse> {
    let user = state
        .user_repository
        .find_by_id(auth.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(user))
}

/// Update the current user's email and/or password
pub async fn update_me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<UpdateUser>,
) -> ApiResult<impl IntoResponse> {
    if let Some(email) = &payload.email {
        validate_email(email).map_err(ApiError::BadRequest)?;
    }
    if let Some(password) = &payload.password {
        validate_password(password).map_err(ApiError::BadRequest)?;
    }

    let user = state
        .user_repository
        .update(auth.id, &payload)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(user))
}

/// Delete a user (self or admin)
///
/// Blocked while orders reference the user; re-deleting an already-deleted
/// user is a clean not-found.
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    if !auth.can_access(id) {
        return Err(ApiError::Forbidden);
    }

    if state.user_repository.find_by_id(id).await?.is_none() {
        return Err(ApiError::NotFound(format!("User {id} not found")));
    }

    let order_count = state.user_repository.order_count(id).await?;
    if order_count > 0 {
        return Err(ApiError::Conflict(format!(
            "User {id} is referenced by {order_count} orders"
        )));
    }

    state.user_repository.delete(id).await?;

    info!(user_id = %id, "User deleted");

    Ok(Json(serde_json::json!({ "message": "User deleted" })))
}
