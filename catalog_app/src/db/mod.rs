// catalog_app/src/db/mod.rs

pub mod product_store;

pub use product_store::PgProductStore;

use crate::config::AppConfig;
use crate::errors::{AppError, Result};
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

/// Opens the pool and, when enabled, applies the embedded migrations.
pub async fn connect(config: &AppConfig) -> Result<PgPool> {
  let database_url = config
    .database_url
    .as_ref()
    .ok_or_else(|| AppError::Config("DATABASE_URL is required for the postgres product store".to_string()))?;

  let pool = PgPoolOptions::new()
    .max_connections(config.db_max_connections)
    .acquire_timeout(Duration::from_secs(5))
    .connect(database_url.expose())
    .await?;
  tracing::info!("Successfully connected to the database.");

  if config.run_migrations {
    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Database migrations applied.");
  }
  Ok(pool)
}
