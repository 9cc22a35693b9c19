//! Audit log routes

use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiResult;
use crate::models::AuditLog;
use crate::state::AppState;

/// Query parameters for audit listing
#[derive(Deserialize)]
pub struct AuditQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// Response for audit listing with pagination
#[derive(Serialize)]
pub struct AuditListResponse {
    pub items: Vec<AuditLog>,
    pub page: u32,
    pub limit: u32,
    pub total: i64,
}

/// List audit records (admin only)
pub async fn list_audit(
    State(state): State<AppState>,
    Query(query): Query<AuditQuery>,
) -> ApiResult<impl IntoResponse> {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(50).clamp(1, 200);

    let (items, total) = state.audit_repository.list(page, limit).await?;

    Ok(Json(AuditListResponse {
        items,
        page,
        limit,
        total,
    }))
}
