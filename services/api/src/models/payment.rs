//! Payment models and the payment request payload

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Supported payment methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentType {
    CreditCard,
    DebitCard,
    Paypal,
    EWallet,
}

impl PaymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentType::CreditCard => "CREDIT_CARD",
            PaymentType::DebitCard => "DEBIT_CARD",
            PaymentType::Paypal => "PAYPAL",
            PaymentType::EWallet => "E_WALLET",
        }
    }
}

impl std::str::FromStr for PaymentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CREDIT_CARD" => Ok(PaymentType::CreditCard),
            "DEBIT_CARD" => Ok(PaymentType::DebitCard),
            "PAYPAL" => Ok(PaymentType::Paypal),
            "E_WALLET" => Ok(PaymentType::EWallet),
            other => Err(format!("unknown payment type: {other}")),
        }
    }
}

/// E-wallet sub-types, dispatched inside the e-wallet strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WalletType {
    GrabPay,
    BoostPay,
    TouchNGo,
}

impl WalletType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WalletType::GrabPay => "GRAB_PAY",
            WalletType::BoostPay => "BOOST_PAY",
            WalletType::TouchNGo => "TOUCH_N_GO",
        }
    }
}

impl std::str::FromStr for WalletType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GRAB_PAY" => Ok(WalletType::GrabPay),
            "BOOST_PAY" => Ok(WalletType::BoostPay),
            "TOUCH_N_GO" => Ok(WalletType::TouchNGo),
            other => Err(format!("unknown wallet type: {other}")),
        }
    }
}

/// Payment outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentStatus {
    Completed,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Completed => "COMPLETED",
            PaymentStatus::Failed => "FAILED",
        }
    }
}

impl std::str::FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "COMPLETED" => Ok(PaymentStatus::Completed),
            "FAILED" => Ok(PaymentStatus::Failed),
            other => Err(format!("unknown payment status: {other}")),
        }
    }
}

/// Payment entity, 1:1 with an order
#[derive(Debug, Clone, Serialize)]
pub struct Payment {
    pub id: Uuid,
    pub order_id: Uuid,
    pub amount: Decimal,
    pub status: PaymentStatus,
    pub payment_type: PaymentType,
    pub note: String,
    pub created_at: DateTime<Utc>,
}

/// Payment request payload
///
/// `payment_type` and `wallet_type` are raw strings so that unsupported
/// methods surface as distinct domain errors instead of deserialization
/// failures.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentRequest {
    pub payment_type: String,
    pub shipping_address_id: Uuid,
    pub billing_address_id: Option<Uuid>,
    pub card_number: Option<String>,
    pub paypal_id: Option<String>,
    pub wallet_type: Option<String>,
    pub wallet_account: Option<String>,
}
