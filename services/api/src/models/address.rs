//! Address model and related functionality

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Address entity, owned by a user
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Address {
    pub id: Uuid,
    pub user_id: Uuid,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
}

/// New address creation payload
#[derive(Debug, Clone, Deserialize)]
pub struct NewAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
    #[serde(default)]
    pub is_default: bool,
}

/// Address update payload
#[derive(Debug, Clone, Deserialize, Default)]
pub struct UpdateAddress {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub country: Option<String>,
    pub is_default: Option<bool>,
}
