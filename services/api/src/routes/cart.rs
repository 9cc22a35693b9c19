//! Shopping cart routes

use axum::{
    Json,
    extract::{Extension, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::middleware::AuthUser;
use crate::models::{CartItem, PetStatus};
use crate::repositories::is_unique_violation;
use crate::state::AppState;

/// Request to add a pet to the cart
#[derive(Deserialize)]
pub struct AddItemRequest {
    pub pet_id: Uuid,
}

/// The current user's cart contents
#[derive(Serialize)]
pub struct CartResponse {
    pub items: Vec<CartItem>,
    pub subtotal: Decimal,
}

impl CartResponse {
    fn from_items(items: Vec<CartItem>) -> Self {
        let subtotal = items.iter().map(|item| item.price).sum();
        Self { items, subtotal }
    }
}

/// Get the current user's cart
pub async fn get_cart(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<impl IntoResponse> {
    let items = match state.cart_repository.find_by_user(auth.id).await? {
        Some(cart) => state.cart_repository.items(cart.id).await?,
        None => Vec::new(),
    };

    Ok(Json(CartResponse::from_items(items)))
}

/// Add a pet to the current user's cart
///
/// Snapshots the pet's current price; the same pet cannot be added twice.
pub async fn add_item(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<AddItemRequest>,
) -> ApiResult<impl IntoResponse> {
    let pet = state
        .pet_repository
        .find_by_id(payload.pet_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Pet {} not found", payload.pet_id)))?;

    if pet.status != PetStatus::Available {
        return Err(ApiError::Conflict(format!(
            "Pet {} is not available",
            pet.name
        )));
    }

    let cart = state.cart_repository.get_or_create(auth.id).await?;

    let item = state
        .cart_repository
        .add_item(cart.id, &pet)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::Conflict(format!("Pet {} is already in the cart", pet.name))
            } else {
                e.into()
            }
        })?;

    Ok((StatusCode::CREATED, Json(item)))
}

/// Remove a pet from the current user's cart
pub async fn remove_item(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(pet_id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let cart = state
        .cart_repository
        .find_by_user(auth.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Cart not found".to_string()))?;

    let removed = state.cart_repository.remove_item(cart.id, pet_id).await?;
    if !removed {
        return Err(ApiError::NotFound(format!(
            "Pet {pet_id} is not in the cart"
        )));
    }

    Ok(Json(serde_json::json!({ "message": "Item removed" })))
}

/// Delete the current user's cart
pub async fn clear_cart(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<impl IntoResponse> {
    state.cart_repository.clear(auth.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
