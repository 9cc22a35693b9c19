//! Order and order item models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Order lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    Placed,
    Approved,
    Cancelled,
    Delivered,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Placed => "PLACED",
            OrderStatus::Approved => "APPROVED",
            OrderStatus::Cancelled => "CANCELLED",
            OrderStatus::Delivered => "DELIVERED",
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PLACED" => Ok(OrderStatus::Placed),
            "APPROVED" => Ok(OrderStatus::Approved),
            "CANCELLED" => Ok(OrderStatus::Cancelled),
            "DELIVERED" => Ok(OrderStatus::Delivered),
            other => Err(format!("unknown order status: {other}")),
        }
    }
}

/// Order entity
///
/// The discount fields are a frozen snapshot taken at checkout time, not a
/// live foreign-key read: later discount edits never change historical
/// orders.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub id: Uuid,
    pub order_number: String,
    pub user_id: Uuid,
    pub status: OrderStatus,
    pub subtotal: Decimal,
    pub discount_code: Option<String>,
    pub discount_percentage: Option<Decimal>,
    pub discount_amount: Decimal,
    pub total: Decimal,
    pub shipping_address_id: Option<Uuid>,
    pub billing_address_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Order item: a snapshot of one cart item at checkout time
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub pet_id: Uuid,
    pub pet_name: String,
    pub price: Decimal,
}
