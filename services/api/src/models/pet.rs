//! Pet model and related functionality

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Pet availability status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PetStatus {
    Available,
    Sold,
    Pending,
}

impl PetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PetStatus::Available => "AVAILABLE",
            PetStatus::Sold => "SOLD",
            PetStatus::Pending => "PENDING",
        }
    }
}

impl std::str::FromStr for PetStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AVAILABLE" => Ok(PetStatus::Available),
            "SOLD" => Ok(PetStatus::Sold),
            "PENDING" => Ok(PetStatus::Pending),
            other => Err(format!("unknown pet status: {other}")),
        }
    }
}

/// Pet entity
#[derive(Debug, Clone, Serialize)]
pub struct Pet {
    pub id: Uuid,
    pub name: String,
    pub category_id: Uuid,
    pub price: Decimal,
    pub status: PetStatus,
    pub owner_id: Option<Uuid>,
    pub photo_urls: Vec<String>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// New pet creation payload
#[derive(Debug, Clone, Deserialize)]
pub struct NewPet {
    pub name: String,
    pub category_id: Uuid,
    pub price: Decimal,
    #[serde(default)]
    pub photo_urls: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Pet update payload
#[derive(Debug, Clone, Deserialize, Default)]
pub struct UpdatePet {
    pub name: Option<String>,
    pub category_id: Option<Uuid>,
    pub price: Option<Decimal>,
    pub status: Option<PetStatus>,
    pub photo_urls: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
}

/// Query parameters for pet listing
#[derive(Debug, Clone, Deserialize)]
pub struct PetQuery {
    /// Page number (1-based)
    pub page: Option<u32>,
    /// Number of items per page
    pub limit: Option<u32>,
    /// Filter by status
    pub status: Option<PetStatus>,
    /// Filter by category
    pub category_id: Option<Uuid>,
}
