//! Custom error types for the API service
//!
//! `ApiError` is the flat, HTTP-facing error set; every failure in the
//! application maps onto one of its variants and is rendered centrally as
//! the JSON envelope `{timestamp, status, error, message, path}`. Domain
//! failures from the order/payment/delivery flows are collected in
//! `OrderError` and folded in via `From`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Domain errors raised by the checkout, payment, and delivery flows
#[derive(Error, Debug)]
pub enum OrderError {
    #[error("Cart not found")]
    CartNotFound,

    #[error("Cart is empty")]
    CartEmpty,

    #[error("Discount code {0} is not valid")]
    InvalidDiscount(String),

    #[error("Order not found")]
    OrderNotFound,

    #[error("Order is in status {0} and cannot be paid")]
    OrderNotPayable(String),

    #[error("Order is in status {0} and cannot be cancelled")]
    CancelNotAllowed(String),

    #[error("Address not found")]
    AddressNotFound,

    #[error("Unsupported payment type: {0}")]
    UnsupportedPaymentType(String),

    #[error("Unsupported wallet type: {0}")]
    UnsupportedWalletType(String),

    #[error("Missing required payment field: {0}")]
    MissingPaymentField(&'static str),

    #[error("Delivery not found for order {0}")]
    DeliveryNotFound(Uuid),

    #[error("Delivery cannot move from {from} to {to}")]
    InvalidDeliveryTransition { from: String, to: String },

    #[error("Database error")]
    Database(#[from] anyhow::Error),
}

impl From<sqlx::Error> for OrderError {
    fn from(err: sqlx::Error) -> Self {
        OrderError::Database(err.into())
    }
}

/// Custom error type for the API service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Resource not found
    #[error("{0}")]
    NotFound(String),

    /// Resource is referenced by other records or already exists
    #[error("{0}")]
    Conflict(String),

    /// Bad request with message
    #[error("{0}")]
    BadRequest(String),

    /// Missing or invalid credentials
    #[error("Unauthorized")]
    Unauthorized,

    /// Authenticated but not allowed
    #[error("Access denied")]
    Forbidden,

    /// Domain error from the order/payment/delivery flows
    #[error(transparent)]
    Order(#[from] OrderError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] common::error::DatabaseError),

    /// Internal server error
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

/// The fixed JSON error envelope returned by every failing request
///
/// `path` is empty when the envelope is built and filled in by the
/// response middleware, which is the only place the request URI is known.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub timestamp: String,
    pub status: u16,
    pub error: String,
    pub message: String,
    pub path: String,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::Order(err) => match err {
                OrderError::CartNotFound
                | OrderError::OrderNotFound
                | OrderError::AddressNotFound
                | OrderError::DeliveryNotFound(_) => StatusCode::NOT_FOUND,
                OrderError::CartEmpty
                | OrderError::InvalidDiscount(_)
                | OrderError::UnsupportedPaymentType(_)
                | OrderError::UnsupportedWalletType(_)
                | OrderError::MissingPaymentField(_) => StatusCode::BAD_REQUEST,
                OrderError::OrderNotPayable(_)
                | OrderError::CancelNotAllowed(_)
                | OrderError::InvalidDeliveryTransition { .. } => StatusCode::CONFLICT,
                OrderError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Database(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Server errors keep their detail in the log, never in the response
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = ?self, "Request failed");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let body = ErrorBody {
            timestamp: Utc::now().to_rfc3339(),
            status: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            message,
            path: String::new(),
        };

        (status, Json(body)).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: ApiError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_api_error_status_codes() {
        assert_eq!(
            status_of(ApiError::NotFound("pet".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(ApiError::Conflict("in use".to_string())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(ApiError::BadRequest("bad".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status_of(ApiError::Unauthorized), StatusCode::UNAUTHORIZED);
        assert_eq!(status_of(ApiError::Forbidden), StatusCode::FORBIDDEN);
        assert_eq!(
            status_of(ApiError::Internal(anyhow::anyhow!("boom"))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_order_error_status_codes() {
        assert_eq!(
            status_of(OrderError::CartNotFound.into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(OrderError::CartEmpty.into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(OrderError::InvalidDiscount("SAVE10".to_string()).into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(OrderError::MissingPaymentField("card_number").into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(OrderError::UnsupportedPaymentType("BITCOIN".to_string()).into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(
                OrderError::InvalidDeliveryTransition {
                    from: "SHIPPED".to_string(),
                    to: "PENDING".to_string(),
                }
                .into()
            ),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(OrderError::OrderNotPayable("APPROVED".to_string()).into()),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_error_messages() {
        let err = OrderError::InvalidDiscount("SAVE10".to_string());
        assert_eq!(err.to_string(), "Discount code SAVE10 is not valid");

        let err = OrderError::MissingPaymentField("card_number");
        assert_eq!(
            err.to_string(),
            "Missing required payment field: card_number"
        );
    }
}
