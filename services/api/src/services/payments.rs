//! Payment strategy dispatch and the order payment flow
//!
//! Each payment method is a `PaymentStrategy` resolved from a type→strategy
//! map; the e-wallet strategy dispatches again by wallet sub-type through a
//! nested provider table. Strategies validate their own required fields and
//! stamp the payment note. Validation runs before any state mutation; the
//! mutation itself is one transaction.

use std::collections::HashMap;
use std::sync::Arc;

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::error::OrderError;
use crate::models::{
    Delivery, DeliveryStatus, Order, OrderStatus, Payment, PaymentRequest, PaymentStatus,
    PaymentType, PetStatus, WalletType,
};
use crate::repositories::audit::insert_audit;
use crate::repositories::deliveries::{DELIVERY_COLUMNS, map_delivery};
use crate::repositories::orders::{ORDER_COLUMNS, map_order, map_payment};

/// Pluggable handler for one payment method's validation and processing
pub trait PaymentStrategy: Send + Sync {
    /// Validate the request fields for this method and return the payment
    /// note to stamp on the payment record
    fn process(&self, request: &PaymentRequest) -> Result<String, OrderError>;
}

fn last_four(number: &str) -> &str {
    &number[number.len().saturating_sub(4)..]
}

/// Credit card payments; requires a card number
struct CreditCardStrategy;

impl PaymentStrategy for CreditCardStrategy {
    fn process(&self, request: &PaymentRequest) -> Result<String, OrderError> {
        let card_number = request
            .card_number
            .as_deref()
            .filter(|n| !n.is_empty())
            .ok_or(OrderError::MissingPaymentField("card_number"))?;

        Ok(format!(
            "Paid by credit card ending in {}",
            last_four(card_number)
        ))
    }
}

/// Debit card payments; requires a card number
struct DebitCardStrategy;

impl PaymentStrategy for DebitCardStrategy {
    fn process(&self, request: &PaymentRequest) -> Result<String, OrderError> {
        let card_number = request
            .card_number
            .as_deref()
            .filter(|n| !n.is_empty())
            .ok_or(OrderError::MissingPaymentField("card_number"))?;

        Ok(format!(
            "Paid by debit card ending in {}",
            last_four(card_number)
        ))
    }
}

/// PayPal payments; requires a PayPal account id
struct PayPalStrategy;

impl PaymentStrategy for PayPalStrategy {
    fn process(&self, request: &PaymentRequest) -> Result<String, OrderError> {
        let paypal_id = request
            .paypal_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or(OrderError::MissingPaymentField("paypal_id"))?;

        Ok(format!("Paid via PayPal account {paypal_id}"))
    }
}

/// One e-wallet network inside the e-wallet strategy
trait WalletProvider: Send + Sync {
    fn process(&self, account: &str) -> String;
}

struct GrabPayProvider;

impl WalletProvider for GrabPayProvider {
    fn process(&self, account: &str) -> String {
        format!("Paid via GrabPay wallet {account}")
    }
}

struct BoostPayProvider;

impl WalletProvider for BoostPayProvider {
    fn process(&self, account: &str) -> String {
        format!("Paid via BoostPay wallet {account}")
    }
}

struct TouchNGoProvider;

impl WalletProvider for TouchNGoProvider {
    fn process(&self, account: &str) -> String {
        format!("Paid via Touch 'n Go wallet {account}")
    }
}

/// E-wallet payments, dispatched again by wallet sub-type
struct EWalletStrategy {
    providers: HashMap<WalletType, Arc<dyn WalletProvider>>,
}

impl EWalletStrategy {
    fn new() -> Self {
        let mut providers: HashMap<WalletType, Arc<dyn WalletProvider>> = HashMap::new();
        providers.insert(WalletType::GrabPay, Arc::new(GrabPayProvider));
        providers.insert(WalletType::BoostPay, Arc::new(BoostPayProvider));
        providers.insert(WalletType::TouchNGo, Arc::new(TouchNGoProvider));
        Self { providers }
    }
}

impl PaymentStrategy for EWalletStrategy {
    fn process(&self, request: &PaymentRequest) -> Result<String, OrderError> {
        let raw_wallet = request
            .wallet_type
            .as_deref()
            .filter(|w| !w.is_empty())
            .ok_or(OrderError::MissingPaymentField("wallet_type"))?;

        let wallet_type = raw_wallet
            .parse::<WalletType>()
            .map_err(|_| OrderError::UnsupportedWalletType(raw_wallet.to_string()))?;

        let provider = self
            .providers
            .get(&wallet_type)
            .ok_or_else(|| OrderError::UnsupportedWalletType(raw_wallet.to_string()))?;

        let account = request
            .wallet_account
            .as_deref()
            .filter(|a| !a.is_empty())
            .ok_or(OrderError::MissingPaymentField("wallet_account"))?;

        Ok(provider.process(account))
    }
}

/// Type→strategy lookup table for payment dispatch
pub struct PaymentStrategies {
    strategies: HashMap<PaymentType, Arc<dyn PaymentStrategy>>,
}

impl PaymentStrategies {
    /// Build the default registry with all four payment methods
    pub fn new() -> Self {
        let mut strategies: HashMap<PaymentType, Arc<dyn PaymentStrategy>> = HashMap::new();
        strategies.insert(PaymentType::CreditCard, Arc::new(CreditCardStrategy));
        strategies.insert(PaymentType::DebitCard, Arc::new(DebitCardStrategy));
        strategies.insert(PaymentType::Paypal, Arc::new(PayPalStrategy));
        strategies.insert(PaymentType::EWallet, Arc::new(EWalletStrategy::new()));
        Self { strategies }
    }

    /// Resolve the strategy for a payment type
    pub fn resolve(&self, payment_type: PaymentType) -> Result<&dyn PaymentStrategy, OrderError> {
        self.strategies
            .get(&payment_type)
            .map(Arc::as_ref)
            .ok_or_else(|| OrderError::UnsupportedPaymentType(payment_type.as_str().to_string()))
    }
}

impl Default for PaymentStrategies {
    fn default() -> Self {
        Self::new()
    }
}

/// Service running the order payment flow
#[derive(Clone)]
pub struct PaymentService {
    pool: PgPool,
    strategies: Arc<PaymentStrategies>,
}

impl PaymentService {
    pub fn new(pool: PgPool, strategies: Arc<PaymentStrategies>) -> Self {
        Self { pool, strategies }
    }

    /// Pay for an order
    ///
    /// Strategy validation runs before the transaction opens, so a request
    /// missing a required field mutates nothing. On success the payment is
    /// recorded, every ordered pet flips to SOLD with the buyer as owner,
    /// the order becomes APPROVED with its addresses resolved (billing
    /// defaults to shipping), and a PENDING delivery is created. Any
    /// failure rolls the whole operation back.
    pub async fn pay(
        &self,
        order_id: Uuid,
        buyer_id: Uuid,
        request: &PaymentRequest,
    ) -> Result<(Order, Payment, Delivery), OrderError> {
        let payment_type = request
            .payment_type
            .parse::<PaymentType>()
            .map_err(|_| OrderError::UnsupportedPaymentType(request.payment_type.clone()))?;

        let strategy = self.strategies.resolve(payment_type)?;
        let note = strategy.process(request)?;

        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1 AND user_id = $2"
        ))
        .bind(order_id)
        .bind(buyer_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(OrderError::OrderNotFound)?;
        let order = map_order(&row)?;

        if order.status != OrderStatus::Placed {
            return Err(OrderError::OrderNotPayable(
                order.status.as_str().to_string(),
            ));
        }

        let shipping_address_id: Uuid =
            sqlx::query_scalar("SELECT id FROM addresses WHERE id = $1 AND user_id = $2")
                .bind(request.shipping_address_id)
                .bind(buyer_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or(OrderError::AddressNotFound)?;

        // Billing defaults to shipping when omitted
        let billing_address_id = match request.billing_address_id {
            Some(billing_id) => {
                sqlx::query_scalar("SELECT id FROM addresses WHERE id = $1 AND user_id = $2")
                    .bind(billing_id)
                    .bind(buyer_id)
                    .fetch_optional(&mut *tx)
                    .await?
                    .ok_or(OrderError::AddressNotFound)?
            }
            None => shipping_address_id,
        };

        let payment_row = sqlx::query(
            r#"
            INSERT INTO payments (order_id, amount, status, payment_type, note)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, order_id, amount, status, payment_type, note, created_at
            "#,
        )
        .bind(order_id)
        .bind(order.total)
        .bind(PaymentStatus::Completed.as_str())
        .bind(payment_type.as_str())
        .bind(&note)
        .fetch_one(&mut *tx)
        .await?;
        let payment = map_payment(&payment_row)?;

        sqlx::query(
            r#"
            UPDATE pets
            SET status = $2, owner_id = $3, updated_at = now()
            WHERE id IN (SELECT pet_id FROM order_items WHERE order_id = $1)
            "#,
        )
        .bind(order_id)
        .bind(PetStatus::Sold.as_str())
        .bind(buyer_id)
        .execute(&mut *tx)
        .await?;

        let order_row = sqlx::query(&format!(
            r#"
            UPDATE orders
            SET status = $2, shipping_address_id = $3, billing_address_id = $4, updated_at = now()
            WHERE id = $1
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(order_id)
        .bind(OrderStatus::Approved.as_str())
        .bind(shipping_address_id)
        .bind(billing_address_id)
        .fetch_one(&mut *tx)
        .await?;
        let order = map_order(&order_row)?;

        let delivery_row = sqlx::query(&format!(
            r#"
            INSERT INTO deliveries (order_id, status)
            VALUES ($1, $2)
            RETURNING {DELIVERY_COLUMNS}
            "#
        ))
        .bind(order_id)
        .bind(DeliveryStatus::Pending.as_str())
        .fetch_one(&mut *tx)
        .await?;
        let delivery = map_delivery(&delivery_row)?;

        insert_audit(
            &mut tx,
            "ORDER",
            order_id,
            "PAYMENT",
            Some(&serde_json::json!({ "status": OrderStatus::Placed.as_str() })),
            Some(&serde_json::json!({
                "status": order.status.as_str(),
                "payment_type": payment_type.as_str(),
                "amount": order.total,
            })),
        )
        .await?;

        tx.commit().await?;

        info!(
            order_number = %order.order_number,
            payment_type = payment_type.as_str(),
            "Order paid"
        );

        Ok((order, payment, delivery))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(payment_type: &str) -> PaymentRequest {
        PaymentRequest {
            payment_type: payment_type.to_string(),
            shipping_address_id: Uuid::new_v4(),
            billing_address_id: None,
            card_number: None,
            paypal_id: None,
            wallet_type: None,
            wallet_account: None,
        }
    }

    #[test]
    fn test_credit_card_requires_card_number() {
        let strategies = PaymentStrategies::new();
        let strategy = strategies.resolve(PaymentType::CreditCard).expect("strategy");

        let err = strategy.process(&request("CREDIT_CARD")).unwrap_err();
        assert!(matches!(
            err,
            OrderError::MissingPaymentField("card_number")
        ));
    }

    #[test]
    fn test_credit_card_note_has_last_four() {
        let strategies = PaymentStrategies::new();
        let strategy = strategies.resolve(PaymentType::CreditCard).expect("strategy");

        let mut req = request("CREDIT_CARD");
        req.card_number = Some("4111111111111234".to_string());

        let note = strategy.process(&req).expect("note");
        assert_eq!(note, "Paid by credit card ending in 1234");
    }

    #[test]
    fn test_debit_card_requires_card_number() {
        let strategies = PaymentStrategies::new();
        let strategy = strategies.resolve(PaymentType::DebitCard).expect("strategy");

        let mut req = request("DEBIT_CARD");
        req.card_number = Some(String::new());

        assert!(matches!(
            strategy.process(&req).unwrap_err(),
            OrderError::MissingPaymentField("card_number")
        ));
    }

    #[test]
    fn test_paypal_requires_account_id() {
        let strategies = PaymentStrategies::new();
        let strategy = strategies.resolve(PaymentType::Paypal).expect("strategy");

        assert!(matches!(
            strategy.process(&request("PAYPAL")).unwrap_err(),
            OrderError::MissingPaymentField("paypal_id")
        ));

        let mut req = request("PAYPAL");
        req.paypal_id = Some("buyer@example.com".to_string());
        assert_eq!(
            strategy.process(&req).expect("note"),
            "Paid via PayPal account buyer@example.com"
        );
    }

    #[test]
    fn test_ewallet_requires_wallet_type() {
        let strategies = PaymentStrategies::new();
        let strategy = strategies.resolve(PaymentType::EWallet).expect("strategy");

        assert!(matches!(
            strategy.process(&request("E_WALLET")).unwrap_err(),
            OrderError::MissingPaymentField("wallet_type")
        ));
    }

    #[test]
    fn test_ewallet_rejects_unknown_wallet() {
        let strategies = PaymentStrategies::new();
        let strategy = strategies.resolve(PaymentType::EWallet).expect("strategy");

        let mut req = request("E_WALLET");
        req.wallet_type = Some("APPLE_PAY".to_string());
        req.wallet_account = Some("acct-1".to_string());

        match strategy.process(&req).unwrap_err() {
            OrderError::UnsupportedWalletType(wallet) => assert_eq!(wallet, "APPLE_PAY"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_ewallet_dispatches_by_sub_type() {
        let strategies = PaymentStrategies::new();
        let strategy = strategies.resolve(PaymentType::EWallet).expect("strategy");

        let mut req = request("E_WALLET");
        req.wallet_type = Some("BOOST_PAY".to_string());
        req.wallet_account = Some("acct-7".to_string());
        assert_eq!(
            strategy.process(&req).expect("note"),
            "Paid via BoostPay wallet acct-7"
        );

        req.wallet_type = Some("TOUCH_N_GO".to_string());
        assert_eq!(
            strategy.process(&req).expect("note"),
            "Paid via Touch 'n Go wallet acct-7"
        );
    }

    #[test]
    fn test_ewallet_requires_account() {
        let strategies = PaymentStrategies::new();
        let strategy = strategies.resolve(PaymentType::EWallet).expect("strategy");

        let mut req = request("E_WALLET");
        req.wallet_type = Some("GRAB_PAY".to_string());

        assert!(matches!(
            strategy.process(&req).unwrap_err(),
            OrderError::MissingPaymentField("wallet_account")
        ));
    }

    #[test]
    fn test_registry_resolves_all_methods() {
        let strategies = PaymentStrategies::new();
        for payment_type in [
            PaymentType::CreditCard,
            PaymentType::DebitCard,
            PaymentType::Paypal,
            PaymentType::EWallet,
        ] {
            assert!(strategies.resolve(payment_type).is_ok());
        }
    }

    #[test]
    fn test_unknown_payment_type_is_distinct_error() {
        let err = "BITCOIN".parse::<PaymentType>().unwrap_err();
        assert!(err.contains("BITCOIN"));
    }
}
