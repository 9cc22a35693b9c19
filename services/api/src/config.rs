//! Application configuration
//!
//! Settings are layered from environment variables over coded defaults
//! using the `config` crate. Variables use the `PETSTORE_` prefix with
//! `__` separating nested keys, e.g.:
//!
//! - `PETSTORE_BIND_ADDR`
//! - `PETSTORE_JWT__SECRET`
//! - `PETSTORE_JWT__EXPIRY_SECONDS`
//! - `PETSTORE_ORDER_NUMBERS__STRATEGY` (`uuid`, `sequential`, or `timestamp`)
//!
//! The database connection is configured separately through
//! `common::database::DatabaseConfig`.

use anyhow::Result;
use serde::Deserialize;

/// Top-level application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Address the HTTP server binds to
    pub bind_addr: String,
    pub jwt: JwtSettings,
    pub order_numbers: OrderNumberSettings,
}

/// JWT signing settings
#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    /// Shared HS512 signing secret
    pub secret: String,
    /// Token lifetime in seconds
    pub expiry_seconds: u64,
}

/// Order number generation settings
#[derive(Debug, Clone, Deserialize)]
pub struct OrderNumberSettings {
    /// Generator strategy: `uuid`, `sequential`, or `timestamp`
    pub strategy: String,
}

impl AppConfig {
    /// Load configuration from the environment over coded defaults
    pub fn load() -> Result<Self> {
        let settings = config::Config::builder()
            .set_default("bind_addr", "0.0.0.0:3000")?
            .set_default("jwt.secret", "insecure-dev-secret-change-me")?
            .set_default("jwt.expiry_seconds", 86400_i64)?
            .set_default("order_numbers.strategy", "uuid")?
            .add_source(config::Environment::with_prefix("PETSTORE").separator("__"))
            .build()?;

        let config = settings.try_deserialize()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    // Reads the process environment, so keep it serialized with any other
    // env-touching tests.
    #[test]
    #[serial]
    fn test_defaults() {
        let config = AppConfig::load().expect("config");
        assert_eq!(config.order_numbers.strategy, "uuid");
        assert_eq!(config.jwt.expiry_seconds, 86400);
        assert!(!config.bind_addr.is_empty());
    }
}
