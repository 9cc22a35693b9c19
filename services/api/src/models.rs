//! Domain models for the pet store API
//!
//! Entities mirror the relational schema; status fields are small enums
//! stored as TEXT and converted with `as_str`/`FromStr`.

pub mod address;
pub mod audit;
pub mod cart;
pub mod category;
pub mod delivery;
pub mod discount;
pub mod order;
pub mod payment;
pub mod pet;
pub mod user;

pub use address::{Address, NewAddress, UpdateAddress};
pub use audit::AuditLog;
pub use cart::{Cart, CartItem};
pub use category::{Category, NewCategory, UpdateCategory};
pub use delivery::{Delivery, DeliveryStatus};
pub use discount::{Discount, NewDiscount, UpdateDiscount};
pub use order::{Order, OrderItem, OrderStatus};
pub use payment::{Payment, PaymentRequest, PaymentStatus, PaymentType, WalletType};
pub use pet::{NewPet, Pet, PetQuery, PetStatus, UpdatePet};
pub use user::{NewUser, Role, UpdateUser, User};
