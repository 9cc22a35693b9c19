//! Integration tests for the infrastructure components
//!
//! These tests verify that the PostgreSQL database is properly configured
//! and accessible from the application. They require a running PostgreSQL
//! instance and are ignored by default.

use common::database::{DatabaseConfig, health_check, init_pool};
use sqlx::Row;

/// Test that verifies PostgreSQL is accessible and can perform basic queries
#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_infrastructure_integration() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize PostgreSQL connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    // Verify PostgreSQL connectivity
    assert!(health_check(&pool).await?, "Database health check failed");

    // Perform a simple query to test database connectivity
    let row = sqlx::query("SELECT 1 as result").fetch_one(&pool).await?;

    let result: i32 = row.get("result");
    assert_eq!(result, 1, "PostgreSQL simple query test failed");

    Ok(())
}
