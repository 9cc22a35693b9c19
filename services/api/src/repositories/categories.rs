//! Category repository for database operations

use anyhow::Result;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Category, NewCategory, UpdateCategory};

/// Category repository
#[derive(Clone)]
pub struct CategoryRepository {
    pool: PgPool,
}

impl CategoryRepository {
    /// Create a new category repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new category
    pub async fn create(&self, new_category: &NewCategory) -> Result<Category> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name)
            VALUES ($1)
            RETURNING id, name, created_at
            "#,
        )
        .bind(&new_category.name)
        .fetch_one(&self.pool)
        .await?;

        Ok(category)
    }

    /// List all categories
    pub async fn list(&self) -> Result<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, created_at FROM categories ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    /// Find a category by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, name, created_at FROM categories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    /// Update a category's name
    pub async fn update(&self, id: Uuid, update: &UpdateCategory) -> Result<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories
            SET name = COALESCE($2, name)
            WHERE id = $1
            RETURNING id, name, created_at
            "#,
        )
        .bind(id)
        .bind(&update.name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    /// Delete a category by ID
    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count the pets referencing a category
    pub async fn pet_count(&self, id: Uuid) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM pets WHERE category_id = $1")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
