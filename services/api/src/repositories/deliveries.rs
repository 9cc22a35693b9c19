//! Delivery repository for database operations

use anyhow::Result;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::models::{Delivery, DeliveryStatus};

pub(crate) const DELIVERY_COLUMNS: &str =
    "id, order_id, status, shipped_at, delivered_at, created_at, updated_at";

pub(crate) fn map_delivery(row: &PgRow) -> Result<Delivery> {
    let status: String = row.get("status");
    Ok(Delivery {
        id: row.get("id"),
        order_id: row.get("order_id"),
        status: status
            .parse::<DeliveryStatus>()
            .map_err(anyhow::Error::msg)?,
        shipped_at: row.get("shipped_at"),
        delivered_at: row.get("delivered_at"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

/// Delivery repository
#[derive(Clone)]
pub struct DeliveryRepository {
    pool: PgPool,
}

impl DeliveryRepository {
    /// Create a new delivery repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find the delivery for an order
    pub async fn find_by_order(&self, order_id: Uuid) -> Result<Option<Delivery>> {
        let row = sqlx::query(&format!(
            "SELECT {DELIVERY_COLUMNS} FROM deliveries WHERE order_id = $1"
        ))
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_delivery).transpose()
    }
}
