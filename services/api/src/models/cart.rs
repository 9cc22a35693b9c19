//! Cart and cart item models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Cart entity, one per user
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Cart {
    pub id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Cart item carrying a price snapshot taken when the pet was added
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CartItem {
    pub id: Uuid,
    pub cart_id: Uuid,
    pub pet_id: Uuid,
    pub pet_name: String,
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
}
