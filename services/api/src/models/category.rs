//! Category model and related functionality

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Category entity
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// New category creation payload
#[derive(Debug, Clone, Deserialize)]
pub struct NewCategory {
    pub name: String,
}

/// Category update payload
#[derive(Debug, Clone, Deserialize, Default)]
pub struct UpdateCategory {
    pub name: Option<String>,
}
