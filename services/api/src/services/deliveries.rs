//! Delivery status transitions
//!
//! The machine is one-directional and strictly sequential:
//! PENDING -> SHIPPED -> DELIVERED. Reaching DELIVERED also flips the
//! parent order to DELIVERED.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::error::OrderError;
use crate::models::{Delivery, DeliveryStatus, OrderStatus};
use crate::repositories::audit::insert_audit;
use crate::repositories::deliveries::{DELIVERY_COLUMNS, map_delivery};

/// Service driving delivery status updates
#[derive(Clone)]
pub struct DeliveryService {
    pool: PgPool,
}

impl DeliveryService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Move an order's delivery to `next`, with an optional timestamp
    /// override for the transition
    pub async fn update_status(
        &self,
        order_id: Uuid,
        next: DeliveryStatus,
        timestamp: Option<DateTime<Utc>>,
    ) -> Result<Delivery, OrderError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(&format!(
            "SELECT {DELIVERY_COLUMNS} FROM deliveries WHERE order_id = $1"
        ))
        .bind(order_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(OrderError::DeliveryNotFound(order_id))?;
        let delivery = map_delivery(&row)?;

        if !delivery.status.can_transition(next) {
            return Err(OrderError::InvalidDeliveryTransition {
                from: delivery.status.as_str().to_string(),
                to: next.as_str().to_string(),
            });
        }

        let stamp = timestamp.unwrap_or_else(Utc::now);

        let updated_row = match next {
            DeliveryStatus::Shipped => {
                sqlx::query(&format!(
                    r#"
                    UPDATE deliveries
                    SET status = $2, shipped_at = $3, updated_at = now()
                    WHERE order_id = $1
                    RETURNING {DELIVERY_COLUMNS}
                    "#
                ))
                .bind(order_id)
                .bind(next.as_str())
                .bind(stamp)
                .fetch_one(&mut *tx)
                .await?
            }
            DeliveryStatus::Delivered => {
                let row = sqlx::query(&format!(
                    r#"
                    UPDATE deliveries
                    SET status = $2, delivered_at = $3, updated_at = now()
                    WHERE order_id = $1
                    RETURNING {DELIVERY_COLUMNS}
                    "#
                ))
                .bind(order_id)
                .bind(next.as_str())
                .bind(stamp)
                .fetch_one(&mut *tx)
                .await?;

                // Delivered deliveries complete the parent order too
                sqlx::query("UPDATE orders SET status = $2, updated_at = now() WHERE id = $1")
                    .bind(order_id)
                    .bind(OrderStatus::Delivered.as_str())
                    .execute(&mut *tx)
                    .await?;

                row
            }
            // can_transition never allows moving back to PENDING
            DeliveryStatus::Pending => {
                return Err(OrderError::InvalidDeliveryTransition {
                    from: delivery.status.as_str().to_string(),
                    to: next.as_str().to_string(),
                });
            }
        };
        let updated = map_delivery(&updated_row)?;

        insert_audit(
            &mut tx,
            "DELIVERY",
            updated.id,
            "STATUS_CHANGE",
            Some(&serde_json::json!({ "status": delivery.status.as_str() })),
            Some(&serde_json::json!({ "status": updated.status.as_str() })),
        )
        .await?;

        tx.commit().await?;

        info!(
            %order_id,
            status = updated.status.as_str(),
            "Delivery status updated"
        );

        Ok(updated)
    }
}
