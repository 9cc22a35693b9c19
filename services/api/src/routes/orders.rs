//! Order routes: checkout, listing, cancellation, and payment

use axum::{
    Json,
    extract::{Extension, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::middleware::AuthUser;
use crate::models::{Delivery, Order, OrderItem, Payment, PaymentRequest, Role};
use crate::state::AppState;

/// Request for checkout
#[derive(Deserialize)]
pub struct CheckoutRequest {
    pub discount_code: Option<String>,
}

/// An order with its items
#[derive(Serialize)]
pub struct OrderResponse {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// Response for a completed payment
#[derive(Serialize)]
pub struct PaymentCompletedResponse {
    pub order: Order,
    pub payment: Payment,
    pub delivery: Delivery,
}

/// Turn the current user's cart into an order
pub async fn checkout(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<CheckoutRequest>,
) -> ApiResult<impl IntoResponse> {
    let order = state
        .order_service
        .checkout(auth.id, payload.discount_code.as_deref())
        .await?;

    let items = state.order_repository.items(order.id).await?;

    Ok((StatusCode::CREATED, Json(OrderResponse { order, items })))
}

/// List orders: admins see all, users see their own
pub async fn list_orders(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<impl IntoResponse> {
    let orders = if auth.role == Role::Admin {
        state.order_repository.list_all().await?
    } else {
        state.order_repository.list_by_user(auth.id).await?
    };

    Ok(Json(orders))
}

/// Get an order with its items (owner or admin)
pub async fn get_order(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let order = state
        .order_repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Order {id} not found")))?;

    if !auth.can_access(order.user_id) {
        return Err(ApiError::Forbidden);
    }

    let items = state.order_repository.items(order.id).await?;

    Ok(Json(OrderResponse { order, items }))
}

/// Cancel an order that has not been paid yet
pub async fn cancel_order(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let order = state.order_service.cancel(id, auth.id).await?;
    Ok(Json(order))
}

/// Get the payment recorded for an order (owner or admin)
pub async fn get_order_payment(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let order = state
        .order_repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Order {id} not found")))?;

    if !auth.can_access(order.user_id) {
        return Err(ApiError::Forbidden);
    }

    let payment = state
        .order_repository
        .find_payment(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Order {id} has no payment")))?;

    Ok(Json(payment))
}

/// Get the delivery for an order (owner or admin)
pub async fn get_order_delivery(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let order = state
        .order_repository
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Order {id} not found")))?;

    if !auth.can_access(order.user_id) {
        return Err(ApiError::Forbidden);
    }

    let delivery = state
        .delivery_repository
        .find_by_order(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Order {id} has no delivery")))?;

    Ok(Json(delivery))
}

/// Pay for an order
pub async fn pay_order(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<PaymentRequest>,
) -> ApiResult<impl IntoResponse> {
    let (order, payment, delivery) = state.payment_service.pay(id, auth.id, &payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(PaymentCompletedResponse {
            order,
            payment,
            delivery,
        }),
    ))
}
