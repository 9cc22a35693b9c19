//! Category routes

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::models::{NewCategory, UpdateCategory};
use crate::repositories::is_unique_violation;
use crate::state::AppState;

/// List all categories
pub async fn list_categories(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let categories = state.category_repository.list().await?;
    Ok(Json(categories))
}

/// Get a category by ID
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let category = state
        .category_repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Category {id} not found")))?;

    Ok(Json(category))
}

/// Create a new category (admin only)
pub async fn create_category(
    State(state): State<AppState>,
    Json(payload): Json<NewCategory>,
) -> ApiResult<impl IntoResponse> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::BadRequest("Category name is required".to_string()));
    }

    let category = state
        .category_repository
        .create(&payload)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::Conflict(format!("Category \"{}\" already exists", payload.name))
            } else {
                e.into()
            }
        })?;

    Ok((StatusCode::CREATED, Json(category)))
}

/// Update a category (admin only)
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCategory>,
) -> ApiResult<impl IntoResponse> {
    let category = state
        .category_repository
        .update(id, &payload)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::Conflict("A category with that name already exists".to_string())
            } else {
                e.into()
            }
        })?
        .ok_or_else(|| ApiError::NotFound(format!("Category {id} not found")))?;

    Ok(Json(category))
}

/// Delete a category (admin only)
///
/// Deletion is blocked while pets reference the category; re-deleting an
/// already-deleted category is a clean not-found.
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let category = state
        .category_repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Category {id} not found")))?;

    let pet_count = state.category_repository.pet_count(id).await?;
    if pet_count > 0 {
        return Err(ApiError::Conflict(format!(
            "Category \"{}\" is referenced by {} pets",
            category.name, pet_count
        )));
    }

    state.category_repository.delete(id).await?;

    Ok(Json(serde_json::json!({ "message": "Category deleted" })))
}
