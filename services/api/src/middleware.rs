//! Middleware for JWT validation, role checks, and the error envelope

use axum::{
    body::{Body, to_bytes},
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use tracing::error;
use uuid::Uuid;

use crate::{
    error::{ApiError, ErrorBody},
    models::Role,
    state::AppState,
};

/// Authenticated user information extracted from a validated token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
}

impl AuthUser {
    /// Whether this user may act on resources owned by `owner_id`
    pub fn can_access(&self, owner_id: Uuid) -> bool {
        self.id == owner_id || self.role == Role::Admin
    }
}

/// Extract and validate the JWT bearer token from the Authorization header
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or(ApiError::Unauthorized)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(ApiError::Unauthorized)?;

    let claims = state.jwt_service.validate_token(token).map_err(|e| {
        error!("Failed to validate token: {}", e);
        ApiError::Unauthorized
    })?;

    let role = claims.role.parse::<Role>().map_err(|e| {
        error!("Token carries an invalid role: {}", e);
        ApiError::Unauthorized
    })?;

    let user = AuthUser {
        id: claims.sub,
        email: claims.email,
        role,
    };

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

/// Reject non-admin users; must run after `auth_middleware`
pub async fn require_admin(req: Request, next: Next) -> Result<Response, ApiError> {
    let user = req
        .extensions()
        .get::<AuthUser>()
        .ok_or(ApiError::Unauthorized)?;

    if user.role != Role::Admin {
        return Err(ApiError::Forbidden);
    }

    Ok(next.run(req).await)
}

/// Fill the `path` field of the JSON error envelope
///
/// `ApiError::into_response` has no access to the request URI, so error
/// bodies leave it empty and this outermost layer injects it.
pub async fn error_envelope(req: Request, next: Next) -> Response {
    let path = req.uri().path().to_string();
    let response = next.run(req).await;

    if !(response.status().is_client_error() || response.status().is_server_error()) {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            error!("Failed to buffer error response body: {}", e);
            return Response::from_parts(parts, Body::empty());
        }
    };

    // Only rewrite bodies that actually are the envelope; axum's own
    // rejections (bad JSON, path type mismatches) pass through untouched.
    match serde_json::from_slice::<ErrorBody>(&bytes) {
        Ok(mut envelope) => {
            envelope.path = path;
            match serde_json::to_vec(&envelope) {
                Ok(buf) => {
                    parts.headers.remove(header::CONTENT_LENGTH);
                    Response::from_parts(parts, Body::from(buf))
                }
                Err(e) => {
                    error!("Failed to serialize error envelope: {}", e);
                    Response::from_parts(parts, Body::from(bytes))
                }
            }
        }
        Err(_) => Response::from_parts(parts, Body::from(bytes)),
    }
}
