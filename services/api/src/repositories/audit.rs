//! Audit log repository
//!
//! The audit log is append-only. `insert_audit` takes a bare connection so
//! services can append records inside their own transactions; the
//! repository wraps listing and standalone appends.

use anyhow::Result;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::AuditLog;

/// Append an audit record on an existing connection or transaction
pub async fn insert_audit(
    conn: &mut PgConnection,
    entity_type: &str,
    entity_id: Uuid,
    action: &str,
    old_value: Option<&serde_json::Value>,
    new_value: Option<&serde_json::Value>,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO audit_log (entity_type, entity_id, action, old_value, new_value)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(entity_type)
    .bind(entity_id)
    .bind(action)
    .bind(old_value)
    .bind(new_value)
    .execute(conn)
    .await?;

    Ok(())
}

/// Audit log repository
#[derive(Clone)]
pub struct AuditRepository {
    pool: PgPool,
}

impl AuditRepository {
    /// Create a new audit repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append an audit record outside a transaction
    pub async fn append(
        &self,
        entity_type: &str,
        entity_id: Uuid,
        action: &str,
        old_value: Option<&serde_json::Value>,
        new_value: Option<&serde_json::Value>,
    ) -> Result<()> {
        let mut conn = self.pool.acquire().await?;
        insert_audit(
            &mut conn,
            entity_type,
            entity_id,
            action,
            old_value,
            new_value,
        )
        .await
    }

    /// List audit records with pagination, newest first
    pub async fn list(&self, page: u32, limit: u32) -> Result<(Vec<AuditLog>, i64)> {
        let offset = (page.max(1) - 1) as i64 * limit as i64;

        let entries = sqlx::query_as::<_, AuditLog>(
            r#"
            SELECT id, entity_type, entity_id, action, old_value, new_value, created_at
            FROM audit_log
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit as i64)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM audit_log")
            .fetch_one(&self.pool)
            .await?;

        Ok((entries, total))
    }
}
