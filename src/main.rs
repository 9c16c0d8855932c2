//! EventDesk
//!
//! Bootstrap entry point: loads configuration, prepares the database schema
//! and reports what is stored.

use anyhow::Context;
use tracing::{info, warn};

use event_desk::{
    config::Settings,
    database::connection::{create_pool, run_migrations},
    services::ServiceFactory,
    utils::logging,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; real deployments set the environment directly
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new().context("failed to load configuration")?;
    settings.validate().context("invalid configuration")?;

    // Initialize logging; the guard keeps the file sink flushing until exit
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", event_desk::info());

    // Initialize database connection
    info!("Connecting to database...");
    let db_pool = create_pool(&settings.database).await.context("failed to connect to the database")?;

    // Run database migrations
    run_migrations(&db_pool).await.context("failed to run migrations")?;

    // Initialize services
    let services = ServiceFactory::new(db_pool.clone());
    let health = services.health_check().await;

    if health.is_healthy() {
        if let Some(records) = health.records {
            info!(
                events = records.events,
                participants = records.participants,
                inscriptions = records.inscriptions,
                "EventDesk storage is ready"
            );
        }
    }
    for issue in health.get_issues() {
        warn!(issue = %issue, "Health check reported an issue");
    }

    db_pool.close().await;
    info!("EventDesk bootstrap finished.");
    Ok(())
}
