//! Repositories for database operations
//!
//! One repository per aggregate, each a thin `PgPool` wrapper in the same
//! shape: runtime `sqlx::query` with explicit binds and `Row::get`
//! mapping, returning `anyhow::Result`. Multi-row mutations that must be
//! atomic live in the service layer, which owns the transactions.

pub mod addresses;
pub mod audit;
pub mod carts;
pub mod categories;
pub mod deliveries;
pub mod discounts;
pub mod orders;
pub mod pets;
pub mod users;

pub use addresses::AddressRepository;
pub use audit::AuditRepository;
pub use carts::CartRepository;
pub use categories::CategoryRepository;
pub use deliveries::DeliveryRepository;
pub use discounts::DiscountRepository;
pub use orders::OrderRepository;
pub use pets::PetRepository;
pub use users::UserRepository;

/// Whether an error is a unique-constraint violation from PostgreSQL
///
/// Used by handlers to turn duplicate inserts (email, category name, cart
/// item) into conflict responses instead of server errors.
pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<sqlx::Error>(),
        Some(sqlx::Error::Database(db_err)) if db_err.is_unique_violation()
    )
}
