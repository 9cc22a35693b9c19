//! Checkout and order lifecycle
//!
//! Checkout turns a cart into an order in one transaction: validate the
//! cart and the optional discount code, snapshot prices and the discount,
//! copy the items, delete the cart, and append an audit record. The cart's
//! deletion is what makes checkout single-shot per cart; there is no
//! idempotency key.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::{PgPool, Row};
use tracing::info;
use uuid::Uuid;

use crate::error::OrderError;
use crate::models::{Discount, Order, OrderStatus};
use crate::repositories::audit::insert_audit;
use crate::repositories::orders::{ORDER_COLUMNS, map_order};
use crate::services::order_numbers::OrderNumberGenerator;

/// Discount amount for a subtotal, rounded to two decimal places
pub fn discount_amount(subtotal: Decimal, percentage: Decimal) -> Decimal {
    (subtotal * percentage / Decimal::from(100)).round_dp(2)
}

/// Service running checkout and order lifecycle operations
#[derive(Clone)]
pub struct OrderService {
    pool: PgPool,
    order_numbers: Arc<dyn OrderNumberGenerator>,
}

struct CheckoutItem {
    pet_id: Uuid,
    pet_name: String,
    price: Decimal,
}

impl OrderService {
    pub fn new(pool: PgPool, order_numbers: Arc<dyn OrderNumberGenerator>) -> Self {
        Self {
            pool,
            order_numbers,
        }
    }

    /// Turn the user's cart into an order
    ///
    /// The cart must exist and be non-empty. A supplied discount code must
    /// exist, be active, and cover the current time, otherwise checkout
    /// fails without creating anything.
    pub async fn checkout(
        &self,
        user_id: Uuid,
        discount_code: Option<&str>,
    ) -> Result<Order, OrderError> {
        let mut tx = self.pool.begin().await?;

        let cart_id: Uuid = sqlx::query_scalar("SELECT id FROM carts WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(OrderError::CartNotFound)?;

        let rows = sqlx::query(
            r#"
            SELECT ci.pet_id, p.name AS pet_name, ci.price
            FROM cart_items ci
            JOIN pets p ON p.id = ci.pet_id
            WHERE ci.cart_id = $1
            ORDER BY ci.created_at
            "#,
        )
        .bind(cart_id)
        .fetch_all(&mut *tx)
        .await?;

        if rows.is_empty() {
            return Err(OrderError::CartEmpty);
        }

        let items: Vec<CheckoutItem> = rows
            .iter()
            .map(|row| CheckoutItem {
                pet_id: row.get("pet_id"),
                pet_name: row.get("pet_name"),
                price: row.get("price"),
            })
            .collect();

        let subtotal: Decimal = items.iter().map(|item| item.price).sum();

        let discount = match discount_code {
            Some(code) => {
                let discount = sqlx::query_as::<_, Discount>(
                    r#"
                    SELECT id, code, percentage, valid_from, valid_to, active, created_at
                    FROM discounts
                    WHERE code = $1
                    "#,
                )
                .bind(code)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| OrderError::InvalidDiscount(code.to_string()))?;

                if !discount.is_valid_at(Utc::now()) {
                    return Err(OrderError::InvalidDiscount(code.to_string()));
                }

                Some(discount)
            }
            None => None,
        };

        let amount = discount
            .as_ref()
            .map(|d| discount_amount(subtotal, d.percentage))
            .unwrap_or(Decimal::ZERO);
        let total = subtotal - amount;

        let order_number = self.order_numbers.generate();

        let order_row = sqlx::query(&format!(
            r#"
            INSERT INTO orders
                (order_number, user_id, status, subtotal,
                 discount_code, discount_percentage, discount_amount, total)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(&order_number)
        .bind(user_id)
        .bind(OrderStatus::Placed.as_str())
        .bind(subtotal)
        .bind(discount.as_ref().map(|d| d.code.as_str()))
        .bind(discount.as_ref().map(|d| d.percentage))
        .bind(amount)
        .bind(total)
        .fetch_one(&mut *tx)
        .await?;
        let order = map_order(&order_row)?;

        for item in &items {
            sqlx::query(
                r#"
                INSERT INTO order_items (order_id, pet_id, pet_name, price)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(order.id)
            .bind(item.pet_id)
            .bind(&item.pet_name)
            .bind(item.price)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query("DELETE FROM carts WHERE id = $1")
            .bind(cart_id)
            .execute(&mut *tx)
            .await?;

        insert_audit(
            &mut tx,
            "ORDER",
            order.id,
            "CHECKOUT",
            None,
            Some(&serde_json::json!({
                "order_number": order.order_number,
                "status": order.status.as_str(),
                "subtotal": subtotal,
                "discount_amount": amount,
                "total": total,
            })),
        )
        .await?;

        tx.commit().await?;

        info!(order_number = %order.order_number, %user_id, "Checkout complete");

        Ok(order)
    }

    /// Cancel an order that has not been paid yet
    pub async fn cancel(&self, order_id: Uuid, user_id: Uuid) -> Result<Order, OrderError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1 AND user_id = $2"
        ))
        .bind(order_id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(OrderError::OrderNotFound)?;
        let order = map_order(&row)?;

        if order.status != OrderStatus::Placed {
            return Err(OrderError::CancelNotAllowed(
                order.status.as_str().to_string(),
            ));
        }

        let order_row = sqlx::query(&format!(
            r#"
            UPDATE orders
            SET status = $2, updated_at = now()
            WHERE id = $1
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(order_id)
        .bind(OrderStatus::Cancelled.as_str())
        .fetch_one(&mut *tx)
        .await?;
        let cancelled = map_order(&order_row)?;

        insert_audit(
            &mut tx,
            "ORDER",
            order_id,
            "CANCEL",
            Some(&serde_json::json!({ "status": order.status.as_str() })),
            Some(&serde_json::json!({ "status": cancelled.status.as_str() })),
        )
        .await?;

        tx.commit().await?;

        Ok(cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().expect("decimal literal")
    }

    #[test]
    fn test_discount_amount_example() {
        // 100.00 + 50.00 with SAVE10 at 10% -> 15.00 off, total 135.00
        let subtotal = dec("150.00");
        let amount = discount_amount(subtotal, dec("10"));
        assert_eq!(amount, dec("15.00"));
        assert_eq!(subtotal - amount, dec("135.00"));
    }

    #[test]
    fn test_discount_amount_rounds_to_cents() {
        let amount = discount_amount(dec("99.99"), dec("7.5"));
        assert_eq!(amount, dec("7.50"));
    }

    #[test]
    fn test_zero_percentage_is_free() {
        assert_eq!(discount_amount(dec("150.00"), Decimal::ZERO), Decimal::ZERO);
    }
}
