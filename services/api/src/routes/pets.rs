//! Pet catalog routes

use axum::{
    Json,
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::middleware::AuthUser;
use crate::models::{NewPet, Pet, PetQuery, UpdatePet};
use crate::state::AppState;

/// Response for pet listing with pagination
#[derive(Serialize)]
pub struct PetListResponse {
    pub items: Vec<Pet>,
    pub page: u32,
    pub limit: u32,
    pub total: i64,
}

/// List pets with pagination and optional filters
pub async fn list_pets(
    State(state): State<AppState>,
    Query(query): Query<PetQuery>,
) -> ApiResult<impl IntoResponse> {
    let (items, total) = state.pet_repository.list(&query).await?;

    Ok(Json(PetListResponse {
        items,
        page: query.page.unwrap_or(1).max(1),
        limit: query.limit.unwrap_or(20).clamp(1, 100),
        total,
    }))
}

/// Get a pet by ID
pub async fn get_pet(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let pet = state
        .pet_repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Pet {id} not found")))?;

    Ok(Json(pet))
}

/// Create a new pet (admin only)
pub async fn create_pet(
    State(state): State<AppState>,
    Json(payload): Json<NewPet>,
) -> ApiResult<impl IntoResponse> {
    if state
        .category_repository
        .find_by_id(payload.category_id)
        .await?
        .is_none()
    {
        return Err(ApiError::BadRequest(format!(
            "Category {} does not exist",
            payload.category_id
        )));
    }

    let pet = state.pet_repository.create(&payload).await?;

    info!(pet_id = %pet.id, "Pet created");

    Ok((StatusCode::CREATED, Json(pet)))
}

/// Update a pet (admin only)
pub async fn update_pet(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePet>,
) -> ApiResult<impl IntoResponse> {
    if let Some(category_id) = payload.category_id {
        if state
            .category_repository
            .find_by_id(category_id)
            .await?
            .is_none()
        {
            return Err(ApiError::BadRequest(format!(
                "Category {category_id} does not exist"
            )));
        }
    }

    let pet = state
        .pet_repository
        .update(id, &payload)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Pet {id} not found")))?;

    Ok(Json(pet))
}

/// Delete a pet (admin only)
pub async fn delete_pet(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let references = state.pet_repository.reference_count(id).await?;
    if references > 0 {
        return Err(ApiError::Conflict(format!(
            "Pet {id} is referenced by {references} order or cart items"
        )));
    }

    let deleted = state.pet_repository.delete(id).await?;
    if !deleted {
        return Err(ApiError::NotFound(format!("Pet {id} not found")));
    }

    Ok(Json(serde_json::json!({ "message": "Pet deleted" })))
}

/// Purchase a pet directly
///
/// The guarded update only matches an AVAILABLE pet with no owner, so a
/// pet can be purchased at most once.
pub async fn purchase_pet(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let pet = state
        .pet_repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Pet {id} not found")))?;

    let sold = state
        .pet_repository
        .purchase(id, auth.id)
        .await?
        .ok_or_else(|| {
            ApiError::Conflict(format!("Pet {} is not available for purchase", pet.name))
        })?;

    state
        .audit_repository
        .append(
            "PET",
            sold.id,
            "PURCHASE",
            Some(&serde_json::json!({ "status": pet.status.as_str() })),
            Some(&serde_json::json!({
                "status": sold.status.as_str(),
                "owner_id": sold.owner_id,
            })),
        )
        .await?;

    info!(pet_id = %sold.id, buyer = %auth.email, "Pet purchased");

    Ok(Json(sold))
}
