//! User repository for database operations

use anyhow::Result;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::info;
use uuid::Uuid;

use crate::models::{NewUser, Role, UpdateUser, User};

fn map_user(row: &PgRow) -> Result<User> {
    let role: String = row.get("role");
    Ok(User {
        id: row.get("id"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        role: role.parse::<Role>().map_err(anyhow::Error::msg)?,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?
        .to_string();
    Ok(hash)
}

/// User repository
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new user with the USER role
    ///
    /// The email is lowercased before storage so uniqueness is
    /// case-insensitive.
    pub async fn create(&self, new_user: &NewUser) -> Result<User> {
        let email = new_user.email.to_lowercase();
        info!("Creating new user: {}", email);

        let password_hash = hash_password(&new_user.password)?;

        let row = sqlx::query(
            r#"
            INSERT INTO users (email, password_hash, role)
            VALUES ($1, $2, $3)
            RETURNING id, email, password_hash, role, created_at, updated_at
            "#,
        )
        .bind(&email)
        .bind(&password_hash)
        .bind(Role::User.as_str())
        .fetch_one(&self.pool)
        .await?;

        map_user(&row)
    }

    /// Find a user by email (case-insensitive)
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, email, password_hash, role, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.to_lowercase())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_user).transpose()
    }

    /// Find a user by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, email, password_hash, role, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_user).transpose()
    }

    /// Verify a user's password
    pub async fn verify_password(&self, user: &User, password: &str) -> Result<bool> {
        let parsed_hash = PasswordHash::new(&user.password_hash)
            .map_err(|e| anyhow::anyhow!("Failed to parse password hash: {}", e))?;

        let argon2 = Argon2::default();
        let result = argon2.verify_password(password.as_bytes(), &parsed_hash);

        Ok(result.is_ok())
    }

    /// Update a user's email and/or password
    pub async fn update(&self, id: Uuid, update: &UpdateUser) -> Result<Option<User>> {
        let email = update.email.as_ref().map(|e| e.to_lowercase());
        let password_hash = match &update.password {
            Some(password) => Some(hash_password(password)?),
            None => None,
        };

        let row = sqlx::query(
            r#"
            UPDATE users
            SET email = COALESCE($2, email),
                password_hash = COALESCE($3, password_hash),
                updated_at = now()
            WHERE id = $1
            RETURNING id, email, password_hash, role, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(email)
        .bind(password_hash)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_user).transpose()
    }

    /// Delete a user by ID
    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count the orders referencing a user
    pub async fn order_count(&self, id: Uuid) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE user_id = $1")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
