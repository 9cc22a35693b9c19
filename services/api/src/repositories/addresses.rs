//! Address repository for database operations

use anyhow::Result;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Address, NewAddress, UpdateAddress};

const ADDRESS_COLUMNS: &str =
    "id, user_id, street, city, state, zip, country, is_default, created_at";

/// Address repository
#[derive(Clone)]
pub struct AddressRepository {
    pool: PgPool,
}

impl AddressRepository {
    /// Create a new address repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create an address for a user
    ///
    /// Marking the new address as default clears the flag on the user's
    /// previous default in the same transaction.
    pub async fn create(&self, user_id: Uuid, new_address: &NewAddress) -> Result<Address> {
        let mut tx = self.pool.begin().await?;

        if new_address.is_default {
            sqlx::query("UPDATE addresses SET is_default = FALSE WHERE user_id = $1")
                .bind(user_id)
                .execute(&mut *tx)
                .await?;
        }

        let address = sqlx::query_as::<_, Address>(&format!(
            r#"
            INSERT INTO addresses (user_id, street, city, state, zip, country, is_default)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {ADDRESS_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(&new_address.street)
        .bind(&new_address.city)
        .bind(&new_address.state)
        .bind(&new_address.zip)
        .bind(&new_address.country)
        .bind(new_address.is_default)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(address)
    }

    /// List a user's addresses
    pub async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Address>> {
        let addresses = sqlx::query_as::<_, Address>(&format!(
            "SELECT {ADDRESS_COLUMNS} FROM addresses WHERE user_id = $1 ORDER BY created_at"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(addresses)
    }

    /// Find an address by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Address>> {
        let address = sqlx::query_as::<_, Address>(&format!(
            "SELECT {ADDRESS_COLUMNS} FROM addresses WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(address)
    }

    /// Update an address
    pub async fn update(&self, id: Uuid, update: &UpdateAddress) -> Result<Option<Address>> {
        let mut tx = self.pool.begin().await?;

        if update.is_default == Some(true) {
            sqlx::query(
                r#"
                UPDATE addresses SET is_default = FALSE
                WHERE user_id = (SELECT user_id FROM addresses WHERE id = $1)
                "#,
            )
            .bind(id)
            .execute(&mut *tx)
            .await?;
        }

        let address = sqlx::query_as::<_, Address>(&format!(
            r#"
            UPDATE addresses
            SET street = COALESCE($2, street),
                city = COALESCE($3, city),
                state = COALESCE($4, state),
                zip = COALESCE($5, zip),
                country = COALESCE($6, country),
                is_default = COALESCE($7, is_default)
            WHERE id = $1
            RETURNING {ADDRESS_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&update.street)
        .bind(&update.city)
        .bind(&update.state)
        .bind(&update.zip)
        .bind(&update.country)
        .bind(update.is_default)
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(address)
    }

    /// Delete an address by ID
    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM addresses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count the orders referencing an address as shipping or billing
    pub async fn order_count(&self, id: Uuid) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM orders WHERE shipping_address_id = $1 OR billing_address_id = $1",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}
