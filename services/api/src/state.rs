//! Application state shared across handlers

use sqlx::PgPool;

use crate::jwt::JwtService;
use crate::repositories::{
    AddressRepository, AuditRepository, CartRepository, CategoryRepository, DeliveryRepository,
    DiscountRepository, OrderRepository, PetRepository, UserRepository,
};
use crate::services::{DeliveryService, OrderService, PaymentService};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_service: JwtService,
    pub user_repository: UserRepository,
    pub pet_repository: PetRepository,
    pub category_repository: CategoryRepository,
    pub cart_repository: CartRepository,
    pub address_repository: AddressRepository,
    pub discount_repository: DiscountRepository,
    pub order_repository: OrderRepository,
    pub delivery_repository: DeliveryRepository,
    pub audit_repository: AuditRepository,
    pub order_service: OrderService,
    pub payment_service: PaymentService,
    pub delivery_service: DeliveryService,
}
