use anyhow::Result;
use std::sync::Arc;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

mod config;
mod error;
mod jwt;
mod middleware;
mod models;
mod repositories;
mod routes;
mod services;
mod state;
mod validation;

use common::database::{DatabaseConfig, health_check, init_pool};

use crate::config::AppConfig;
use crate::jwt::JwtService;
use crate::repositories::{
    AddressRepository, AuditRepository, CartRepository, CategoryRepository, DeliveryRepository,
    DiscountRepository, OrderRepository, PetRepository, UserRepository,
};
use crate::services::{DeliveryService, OrderService, PaymentService, PaymentStrategies};
use crate::services::order_numbers;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting pet store API service");

    let app_config = AppConfig::load()?;

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    // Check database connectivity
    if health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    // Run embedded migrations
    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("Database migrations applied");

    // Initialize the JWT service and the order number generator
    let jwt_service = JwtService::new(&app_config.jwt);
    let order_number_generator = order_numbers::from_strategy(&app_config.order_numbers.strategy)?;
    info!(
        strategy = %app_config.order_numbers.strategy,
        "Order number generator initialized"
    );

    // Initialize repositories and services
    let app_state = AppState {
        db_pool: pool.clone(),
        jwt_service,
        user_repository: UserRepository::new(pool.clone()),
        pet_repository: PetRepository::new(pool.clone()),
        category_repository: CategoryRepository::new(pool.clone()),
        cart_repository: CartRepository::new(pool.clone()),
        address_repository: AddressRepository::new(pool.clone()),
        discount_repository: DiscountRepository::new(pool.clone()),
        order_repository: OrderRepository::new(pool.clone()),
        delivery_repository: DeliveryRepository::new(pool.clone()),
        audit_repository: AuditRepository::new(pool.clone()),
        order_service: OrderService::new(pool.clone(), order_number_generator),
        payment_service: PaymentService::new(pool.clone(), Arc::new(PaymentStrategies::new())),
        delivery_service: DeliveryService::new(pool),
    };

    info!("Pet store API service initialized successfully");

    // Start the web server
    let app = routes::create_router(app_state);

    let listener = tokio::net::TcpListener::bind(&app_config.bind_addr).await?;
    info!("Pet store API service listening on {}", app_config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
