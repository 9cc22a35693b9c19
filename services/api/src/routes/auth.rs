//! Registration and login routes

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::models::NewUser;
use crate::state::AppState;
use crate::validation::{validate_email, validate_password};

/// Request for user registration
#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

/// Response for successful login
#[derive(Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Request for user login
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Register a new user
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<impl IntoResponse> {
    validate_email(&payload.email).map_err(ApiError::BadRequest)?;
    validate_password(&payload.password).map_err(ApiError::BadRequest)?;

    if state
        .user_repository
        .find_by_email(&payload.email)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict(
            "An account with this email already exists".to_string(),
        ));
    }

    let user = state
        .user_repository
        .create(&NewUser {
            email: payload.email,
            password: payload.password,
        })
        .await?;

    info!(user_id = %user.id, "User registered");

    Ok((StatusCode::CREATED, Json(user)))
}

/// Authenticate a user and issue a JWT
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    let user = state
        .user_repository
        .find_by_email(&payload.email)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    let valid = state
        .user_repository
        .verify_password(&user, &payload.password)
        .await?;

    if !valid {
        return Err(ApiError::Unauthorized);
    }

    let access_token = state.jwt_service.generate_token(&user)?;

    info!(user_id = %user.id, "User logged in");

    Ok(Json(TokenResponse {
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: state.jwt_service.expiry_seconds(),
    }))
}
