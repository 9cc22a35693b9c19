//! Discount repository for database operations

use anyhow::Result;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Discount, NewDiscount, UpdateDiscount};

const DISCOUNT_COLUMNS: &str = "id, code, percentage, valid_from, valid_to, active, created_at";

/// Discount repository
#[derive(Clone)]
pub struct DiscountRepository {
    pool: PgPool,
}

impl DiscountRepository {
    /// Create a new discount repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new discount
    pub async fn create(&self, new_discount: &NewDiscount) -> Result<Discount> {
        let discount = sqlx::query_as::<_, Discount>(&format!(
            r#"
            INSERT INTO discounts (code, percentage, valid_from, valid_to, active)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {DISCOUNT_COLUMNS}
            "#
        ))
        .bind(&new_discount.code)
        .bind(new_discount.percentage)
        .bind(new_discount.valid_from)
        .bind(new_discount.valid_to)
        .bind(new_discount.active)
        .fetch_one(&self.pool)
        .await?;

        Ok(discount)
    }

    /// List all discounts
    pub async fn list(&self) -> Result<Vec<Discount>> {
        let discounts = sqlx::query_as::<_, Discount>(&format!(
            "SELECT {DISCOUNT_COLUMNS} FROM discounts ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(discounts)
    }

    /// Find a discount by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Discount>> {
        let discount = sqlx::query_as::<_, Discount>(&format!(
            "SELECT {DISCOUNT_COLUMNS} FROM discounts WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(discount)
    }

    /// Update a discount
    pub async fn update(&self, id: Uuid, update: &UpdateDiscount) -> Result<Option<Discount>> {
        let discount = sqlx::query_as::<_, Discount>(&format!(
            r#"
            UPDATE discounts
            SET percentage = COALESCE($2, percentage),
                valid_from = COALESCE($3, valid_from),
                valid_to = COALESCE($4, valid_to),
                active = COALESCE($5, active)
            WHERE id = $1
            RETURNING {DISCOUNT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(update.percentage)
        .bind(update.valid_from)
        .bind(update.valid_to)
        .bind(update.active)
        .fetch_optional(&self.pool)
        .await?;

        Ok(discount)
    }

    /// Delete a discount by ID
    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM discounts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
