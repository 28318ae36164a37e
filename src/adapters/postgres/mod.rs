//! PostgreSQL adapters for the repository ports.
//!
//! One repository per port, all sharing a `PgPool`. Schema lives in
//! `migrations/`; every dependent table cascades from `trips(id)`.

mod activity_repository;
mod budget_repository;
mod packing_repository;
mod rows;
mod trip_repository;

pub use activity_repository::PostgresActivityRepository;
pub use budget_repository::PostgresBudgetRepository;
pub use packing_repository::PostgresPackingRepository;
pub use trip_repository::PostgresTripRepository;

use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::config::DatabaseConfig;

/// Opens a pool sized and timed from configuration.
pub async fn connect(url: &str, config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .idle_timeout(config.idle_timeout())
        .connect(url)
        .await
}

/// Applies pending migrations from `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
