//! Discount model and validity checks

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Time-bounded percentage discount identified by a code
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Discount {
    pub id: Uuid,
    pub code: String,
    pub percentage: Decimal,
    pub valid_from: DateTime<Utc>,
    pub valid_to: DateTime<Utc>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl Discount {
    /// Whether the discount can be applied at `now`
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.active && now >= self.valid_from && now <= self.valid_to
    }
}

/// New discount creation payload
#[derive(Debug, Clone, Deserialize)]
pub struct NewDiscount {
    pub code: String,
    pub percentage: Decimal,
    pub valid_from: DateTime<Utc>,
    pub valid_to: DateTime<Utc>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// Discount update payload
#[derive(Debug, Clone, Deserialize, Default)]
pub struct UpdateDiscount {
    pub percentage: Option<Decimal>,
    pub valid_from: Option<DateTime<Utc>>,
    pub valid_to: Option<DateTime<Utc>>,
    pub active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn discount(active: bool, from_offset: i64, to_offset: i64) -> Discount {
        let now = Utc::now();
        Discount {
            id: Uuid::new_v4(),
            code: "SAVE10".to_string(),
            percentage: Decimal::new(10, 0),
            valid_from: now + Duration::days(from_offset),
            valid_to: now + Duration::days(to_offset),
            active,
            created_at: now,
        }
    }

    #[test]
    fn test_valid_inside_window() {
        assert!(discount(true, -1, 1).is_valid_at(Utc::now()));
    }

    #[test]
    fn test_invalid_when_inactive() {
        assert!(!discount(false, -1, 1).is_valid_at(Utc::now()));
    }

    #[test]
    fn test_invalid_before_window() {
        assert!(!discount(true, 1, 2).is_valid_at(Utc::now()));
    }

    #[test]
    fn test_invalid_after_window() {
        assert!(!discount(true, -2, -1).is_valid_at(Utc::now()));
    }
}
