//! Delivery model and its status machine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Delivery status, a one-directional machine
///
/// Transitions are strictly sequential: PENDING -> SHIPPED -> DELIVERED.
/// Skipping a step or moving backwards is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DeliveryStatus {
    Pending,
    Shipped,
    Delivered,
}

impl DeliveryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryStatus::Pending => "PENDING",
            DeliveryStatus::Shipped => "SHIPPED",
            DeliveryStatus::Delivered => "DELIVERED",
        }
    }

    /// Whether a transition from `self` to `next` is allowed
    pub fn can_transition(&self, next: DeliveryStatus) -> bool {
        matches!(
            (self, next),
            (DeliveryStatus::Pending, DeliveryStatus::Shipped)
                | (DeliveryStatus::Shipped, DeliveryStatus::Delivered)
        )
    }
}

impl std::str::FromStr for DeliveryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(DeliveryStatus::Pending),
            "SHIPPED" => Ok(DeliveryStatus::Shipped),
            "DELIVERED" => Ok(DeliveryStatus::Delivered),
            other => Err(format!("unknown delivery status: {other}")),
        }
    }
}

/// Delivery entity, 1:1 with an order
#[derive(Debug, Clone, Serialize)]
pub struct Delivery {
    pub id: Uuid,
    pub order_id: Uuid,
    pub status: DeliveryStatus,
    pub shipped_at: Option<DateTime<Utc>>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_transitions_allowed() {
        assert!(DeliveryStatus::Pending.can_transition(DeliveryStatus::Shipped));
        assert!(DeliveryStatus::Shipped.can_transition(DeliveryStatus::Delivered));
    }

    #[test]
    fn test_backward_and_skip_transitions_rejected() {
        assert!(!DeliveryStatus::Shipped.can_transition(DeliveryStatus::Pending));
        assert!(!DeliveryStatus::Delivered.can_transition(DeliveryStatus::Shipped));
        assert!(!DeliveryStatus::Pending.can_transition(DeliveryStatus::Delivered));
        assert!(!DeliveryStatus::Pending.can_transition(DeliveryStatus::Pending));
    }
}
