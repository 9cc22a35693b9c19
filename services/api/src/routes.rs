//! API routes
//!
//! Three layers: public catalog and auth routes, authenticated routes
//! behind the JWT middleware, and admin routes additionally behind the
//! role check. The error-envelope layer wraps everything so failing
//! responses carry the request path.

use axum::{
    Json, Router,
    middleware,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use serde_json::json;

use crate::middleware::{auth_middleware, error_envelope, require_admin};
use crate::state::AppState;

pub mod addresses;
pub mod audit;
pub mod auth;
pub mod cart;
pub mod categories;
pub mod deliveries;
pub mod discounts;
pub mod orders;
pub mod pets;
pub mod users;

/// Create the router for the API service
pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/pets", get(pets::list_pets))
        .route("/api/pets/:id", get(pets::get_pet))
        .route("/api/categories", get(categories::list_categories))
        .route("/api/categories/:id", get(categories::get_category));

    let user_routes = Router::new()
        .route("/api/pets/:id/purchase", post(pets::purchase_pet))
        .route("/api/cart", get(cart::get_cart).delete(cart::clear_cart))
        .route("/api/cart/items", post(cart::add_item))
        .route("/api/cart/items/:pet_id", delete(cart::remove_item))
        .route("/api/orders", get(orders::list_orders))
        .route("/api/orders/checkout", post(orders::checkout))
        .route("/api/orders/:id", get(orders::get_order))
        .route("/api/orders/:id/cancel", post(orders::cancel_order))
        .route(
            "/api/orders/:id/payments",
            post(orders::pay_order).get(orders::get_order_payment),
        )
        .route("/api/orders/:id/delivery", get(orders::get_order_delivery))
        .route("/api/users/me", get(users::get_me).put(users::update_me))
        .route("/api/users/:id", delete(users::delete_user))
        .route(
            "/api/users/me/addresses",
            get(addresses::list_addresses).post(addresses::create_address),
        )
        .route(
            "/api/users/me/addresses/:id",
            put(addresses::update_address).delete(addresses::delete_address),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let admin_routes = Router::new()
        .route("/api/pets", post(pets::create_pet))
        .route(
            "/api/pets/:id",
            put(pets::update_pet).delete(pets::delete_pet),
        )
        .route("/api/categories", post(categories::create_category))
        .route(
            "/api/categories/:id",
            put(categories::update_category).delete(categories::delete_category),
        )
        .route(
            "/api/discounts",
            get(discounts::list_discounts).post(discounts::create_discount),
        )
        .route(
            "/api/discounts/:id",
            put(discounts::update_discount).delete(discounts::delete_discount),
        )
        .route(
            "/api/deliveries/:order_id/status",
            put(deliveries::update_delivery_status),
        )
        .route("/api/audit", get(audit::list_audit))
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(public_routes)
        .merge(user_routes)
        .merge(admin_routes)
        .layer(middleware::from_fn(error_envelope))
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "petstore-api"
    }))
}
