//! Cart repository for database operations

use anyhow::Result;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Cart, CartItem, Pet};

/// Cart repository
#[derive(Clone)]
pub struct CartRepository {
    pool: PgPool,
}

impl CartRepository {
    /// Create a new cart repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user's cart
    pub async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Cart>> {
        let cart = sqlx::query_as::<_, Cart>(
            "SELECT id, user_id, created_at FROM carts WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(cart)
    }

    /// Get a user's cart, creating it if it does not exist
    pub async fn get_or_create(&self, user_id: Uuid) -> Result<Cart> {
        let cart = sqlx::query_as::<_, Cart>(
            r#"
            INSERT INTO carts (user_id)
            VALUES ($1)
            ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id
            RETURNING id, user_id, created_at
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(cart)
    }

    /// List the items in a cart, joined with the pet name
    pub async fn items(&self, cart_id: Uuid) -> Result<Vec<CartItem>> {
        let items = sqlx::query_as::<_, CartItem>(
            r#"
            SELECT ci.id, ci.cart_id, ci.pet_id, p.name AS pet_name, ci.price, ci.created_at
            FROM cart_items ci
            JOIN pets p ON p.id = ci.pet_id
            WHERE ci.cart_id = $1
            ORDER BY ci.created_at
            "#,
        )
        .bind(cart_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Add a pet to a cart, snapshotting its current price
    ///
    /// The UNIQUE (cart_id, pet_id) constraint rejects duplicates; callers
    /// map that to a conflict response.
    pub async fn add_item(&self, cart_id: Uuid, pet: &Pet) -> Result<CartItem> {
        let item = sqlx::query_as::<_, CartItem>(
            r#"
            INSERT INTO cart_items (cart_id, pet_id, price)
            VALUES ($1, $2, $3)
            RETURNING id, cart_id, pet_id, $4::text AS pet_name, price, created_at
            "#,
        )
        .bind(cart_id)
        .bind(pet.id)
        .bind(pet.price)
        .bind(&pet.name)
        .fetch_one(&self.pool)
        .await?;

        Ok(item)
    }

    /// Remove a pet from a cart
    pub async fn remove_item(&self, cart_id: Uuid, pet_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM cart_items WHERE cart_id = $1 AND pet_id = $2")
            .bind(cart_id)
            .bind(pet_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a user's cart and its items
    pub async fn clear(&self, user_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM carts WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
