//! Domain services orchestrating the multi-step order flows
//!
//! Repositories stay single-statement; everything that must be atomic
//! (checkout, payment, delivery transitions) runs here inside one sqlx
//! transaction so a failure at any step rolls back the whole operation.

pub mod deliveries;
pub mod order_numbers;
pub mod orders;
pub mod payments;

pub use deliveries::DeliveryService;
pub use order_numbers::OrderNumberGenerator;
pub use orders::OrderService;
pub use payments::{PaymentService, PaymentStrategies};
