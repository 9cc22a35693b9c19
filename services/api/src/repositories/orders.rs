//! Order repository for database operations
//!
//! Reads only: order creation and payment happen in the service layer
//! inside transactions.

use anyhow::Result;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::models::{Order, OrderItem, OrderStatus, Payment, PaymentStatus, PaymentType};

pub(crate) const ORDER_COLUMNS: &str = "id, order_number, user_id, status, subtotal, \
     discount_code, discount_percentage, discount_amount, total, \
     shipping_address_id, billing_address_id, created_at, updated_at";

pub(crate) fn map_order(row: &PgRow) -> Result<Order> {
    let status: String = row.get("status");
    Ok(Order {
        id: row.get("id"),
        order_number: row.get("order_number"),
        user_id: row.get("user_id"),
        status: status.parse::<OrderStatus>().map_err(anyhow::Error::msg)?,
        subtotal: row.get("subtotal"),
        discount_code: row.get("discount_code"),
        discount_percentage: row.get("discount_percentage"),
        discount_amount: row.get("discount_amount"),
        total: row.get("total"),
        shipping_address_id: row.get("shipping_address_id"),
        billing_address_id: row.get("billing_address_id"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

pub(crate) fn map_payment(row: &PgRow) -> Result<Payment> {
    let status: String = row.get("status");
    let payment_type: String = row.get("payment_type");
    Ok(Payment {
        id: row.get("id"),
        order_id: row.get("order_id"),
        amount: row.get("amount"),
        status: status.parse::<PaymentStatus>().map_err(anyhow::Error::msg)?,
        payment_type: payment_type
            .parse::<PaymentType>()
            .map_err(anyhow::Error::msg)?,
        note: row.get("note"),
        created_at: row.get("created_at"),
    })
}

/// Order repository
#[derive(Clone)]
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    /// Create a new order repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an order by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>> {
        let row = sqlx::query(&format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(map_order).transpose()
    }

    /// List the items of an order
    pub async fn items(&self, order_id: Uuid) -> Result<Vec<OrderItem>> {
        let items = sqlx::query_as::<_, OrderItem>(
            r#"
            SELECT id, order_id, pet_id, pet_name, price
            FROM order_items
            WHERE order_id = $1
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// List a user's orders, newest first
    pub async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Order>> {
        let rows = sqlx::query(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_order).collect()
    }

    /// List all orders, newest first
    pub async fn list_all(&self) -> Result<Vec<Order>> {
        let rows = sqlx::query(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_order).collect()
    }

    /// Find the payment for an order, if any
    pub async fn find_payment(&self, order_id: Uuid) -> Result<Option<Payment>> {
        let row = sqlx::query(
            r#"
            SELECT id, order_id, amount, status, payment_type, note, created_at
            FROM payments
            WHERE order_id = $1
            "#,
        )
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_payment).transpose()
    }
}
