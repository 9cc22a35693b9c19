//! Pet repository for database operations

use anyhow::Result;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::models::{NewPet, Pet, PetQuery, PetStatus, UpdatePet};

pub(crate) fn map_pet(row: &PgRow) -> Result<Pet> {
    let status: String = row.get("status");
    Ok(Pet {
        id: row.get("id"),
        name: row.get("name"),
        category_id: row.get("category_id"),
        price: row.get("price"),
        status: status.parse::<PetStatus>().map_err(anyhow::Error::msg)?,
        owner_id: row.get("owner_id"),
        photo_urls: row.get("photo_urls"),
        tags: row.get("tags"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

const PET_COLUMNS: &str =
    "id, name, category_id, price, status, owner_id, photo_urls, tags, created_at, updated_at";

/// Pet repository
#[derive(Clone)]
pub struct PetRepository {
    pool: PgPool,
}

impl PetRepository {
    /// Create a new pet repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new pet in AVAILABLE status
    pub async fn create(&self, new_pet: &NewPet) -> Result<Pet> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO pets (name, category_id, price, status, photo_urls, tags)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {PET_COLUMNS}
            "#
        ))
        .bind(&new_pet.name)
        .bind(new_pet.category_id)
        .bind(new_pet.price)
        .bind(PetStatus::Available.as_str())
        .bind(&new_pet.photo_urls)
        .bind(&new_pet.tags)
        .fetch_one(&self.pool)
        .await?;

        map_pet(&row)
    }

    /// Find a pet by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Pet>> {
        let row = sqlx::query(&format!("SELECT {PET_COLUMNS} FROM pets WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(map_pet).transpose()
    }

    /// List pets with pagination and optional status/category filters
    pub async fn list(&self, query: &PetQuery) -> Result<(Vec<Pet>, i64)> {
        let page = query.page.unwrap_or(1).max(1);
        let limit = query.limit.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1) as i64 * limit as i64;
        let status = query.status.map(|s| s.as_str());

        let rows = sqlx::query(&format!(
            r#"
            SELECT {PET_COLUMNS}
            FROM pets
            WHERE ($1::text IS NULL OR status = $1)
              AND ($2::uuid IS NULL OR category_id = $2)
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#
        ))
        .bind(status)
        .bind(query.category_id)
        .bind(limit as i64)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM pets
            WHERE ($1::text IS NULL OR status = $1)
              AND ($2::uuid IS NULL OR category_id = $2)
            "#,
        )
        .bind(status)
        .bind(query.category_id)
        .fetch_one(&self.pool)
        .await?;

        let pets = rows.iter().map(map_pet).collect::<Result<Vec<_>>>()?;

        Ok((pets, total))
    }

    /// Update a pet
    pub async fn update(&self, id: Uuid, update: &UpdatePet) -> Result<Option<Pet>> {
        let status = update.status.map(|s| s.as_str());

        let row = sqlx::query(&format!(
            r#"
            UPDATE pets
            SET name = COALESCE($2, name),
                category_id = COALESCE($3, category_id),
                price = COALESCE($4, price),
                status = COALESCE($5, status),
                photo_urls = COALESCE($6, photo_urls),
                tags = COALESCE($7, tags),
                updated_at = now()
            WHERE id = $1
            RETURNING {PET_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&update.name)
        .bind(update.category_id)
        .bind(update.price)
        .bind(status)
        .bind(&update.photo_urls)
        .bind(&update.tags)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_pet).transpose()
    }

    /// Delete a pet by ID
    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM pets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count order and cart items referencing a pet
    pub async fn reference_count(&self, id: Uuid) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT (SELECT COUNT(*) FROM order_items WHERE pet_id = $1)
                 + (SELECT COUNT(*) FROM cart_items WHERE pet_id = $1)
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    /// Mark a pet as sold to `owner_id`
    ///
    /// The AVAILABLE + null-owner guard in the WHERE clause is what makes a
    /// pet purchasable at most once: a second purchase matches zero rows.
    pub async fn purchase(&self, id: Uuid, owner_id: Uuid) -> Result<Option<Pet>> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE pets
            SET status = $3, owner_id = $2, updated_at = now()
            WHERE id = $1 AND status = $4 AND owner_id IS NULL
            RETURNING {PET_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(owner_id)
        .bind(PetStatus::Sold.as_str())
        .bind(PetStatus::Available.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_pet).transpose()
    }
}
