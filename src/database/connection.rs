//! Database connection management
//!
//! The pool is built straight from `[database]` settings; migrations are
//! embedded at compile time from `./migrations`.

use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use tracing::{debug, info};
use crate::config::DatabaseConfig;
use crate::utils::errors::EventDeskError;

pub type DatabasePool = Pool<Postgres>;

/// Translate the configured limits and timeouts into pool options
pub fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.acquire_timeout())
        .idle_timeout(config.idle_timeout())
        .max_lifetime(config.max_lifetime())
}

/// Open the pool and make sure the server answers
pub async fn create_pool(config: &DatabaseConfig) -> Result<DatabasePool, EventDeskError> {
    debug!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        "Opening database pool"
    );
    let pool = pool_options(config).connect(&config.url).await?;
    health_check(&pool).await?;

    info!("Database connection pool created successfully");
    Ok(pool)
}

/// Bring the schema up to date
pub async fn run_migrations(pool: &DatabasePool) -> Result<(), EventDeskError> {
    info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Database migrations completed successfully");
    Ok(())
}

/// Round-trip a trivial query
pub async fn health_check(pool: &DatabasePool) -> Result<(), EventDeskError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
