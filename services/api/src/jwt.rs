//! JWT service for token generation and validation
//!
//! Tokens are signed with HS512 using a shared secret; the secret and the
//! token lifetime are configurable. Claims carry the user id, email, and
//! role so handlers can authorize without a database round trip.

use anyhow::Result;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use crate::config::JwtSettings;
use crate::models::User;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: Uuid,
    /// User email
    pub email: String,
    /// User role
    pub role: String,
    /// Issued at time
    pub iat: u64,
    /// Expiration time
    pub exp: u64,
}

/// JWT service
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expiry_seconds: u64,
}

impl JwtService {
    /// Initialize a new JWT service from the configured secret
    pub fn new(settings: &JwtSettings) -> Self {
        let encoding_key = EncodingKey::from_secret(settings.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(settings.secret.as_bytes());
        let mut validation = Validation::new(Algorithm::HS512);
        validation.validate_exp = true;

        JwtService {
            encoding_key,
            decoding_key,
            validation,
            expiry_seconds: settings.expiry_seconds,
        }
    }

    /// Generate an access token for a user
    pub fn generate_token(&self, user: &User) -> Result<String> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| anyhow::anyhow!("Failed to get current time: {}", e))?
            .as_secs();

        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            role: user.role.as_str().to_string(),
            iat: now,
            exp: now + self.expiry_seconds,
        };

        let token = encode(&Header::new(Algorithm::HS512), &claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Validate a token and return the claims
    pub fn validate_token(&self, token: &str) -> Result<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(token_data.claims)
    }

    /// Get the access token expiry time in seconds
    pub fn expiry_seconds(&self) -> u64 {
        self.expiry_seconds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use chrono::Utc;

    fn test_user() -> User {
        User {
            id: Uuid::new_v4(),
            email: "buyer@example.com".to_string(),
            password_hash: "hash".to_string(),
            role: Role::User,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn service(secret: &str) -> JwtService {
        JwtService::new(&JwtSettings {
            secret: secret.to_string(),
            expiry_seconds: 3600,
        })
    }

    #[test]
    fn test_token_round_trip() {
        let service = service("test-secret");
        let user = test_user();

        let token = service.generate_token(&user).expect("token");
        let claims = service.validate_token(&token).expect("claims");

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.email, user.email);
        assert_eq!(claims.role, "USER");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = service("secret-a")
            .generate_token(&test_user())
            .expect("token");

        assert!(service("secret-b").validate_token(&token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = service("test-secret");
        let user = test_user();

        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time")
            .as_secs();
        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            role: "USER".to_string(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &service.encoding_key,
        )
        .expect("token");

        assert!(service.validate_token(&token).is_err());
    }
}
