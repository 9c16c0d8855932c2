//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the EventDesk application.

use tracing::{debug, error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};
use crate::config::LoggingConfig;
use crate::utils::errors::{EventDeskError, FieldErrors, Result};

/// Initialize logging based on configuration.
///
/// The returned guard flushes the file sink when dropped; keep it alive for
/// the lifetime of the process.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_new(&config.level)
        .map_err(|e| EventDeskError::Config(format!("Invalid log level {}: {}", config.level, e)))?;
    let json = config.format == "json";

    let stdout_layer = if json {
        fmt::layer().json().with_writer(std::io::stdout).boxed()
    } else {
        fmt::layer().with_writer(std::io::stdout).boxed()
    };

    let (file_layer, guard) = match &config.directory {
        Some(directory) => {
            let file_appender = tracing_appender::rolling::daily(directory, "event_desk.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = if json {
                fmt::layer().json().with_writer(non_blocking).boxed()
            } else {
                fmt::layer().with_ansi(false).with_writer(non_blocking).boxed()
            };
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| EventDeskError::Config(format!("Logging already initialized: {}", e)))?;

    info!(level = %config.level, format = %config.format, "Logging initialized");
    Ok(guard)
}

/// Log a completed create/update/delete on one entity
pub fn log_entity_action(entity: &str, id: i64, action: &str, details: Option<&str>) {
    info!(
        entity = entity,
        id = id,
        action = action,
        details = details,
        "Entity action performed"
    );
}

/// Log rejected input; only the field names are recorded, never the values
pub fn log_validation_failure(operation: &str, errors: &FieldErrors) {
    let fields: Vec<&str> = errors.keys().map(String::as_str).collect();
    debug!(
        operation = operation,
        fields = ?fields,
        "Validation failed"
    );
}

/// Log a domain conflict (duplicate inscription, email already in use)
pub fn log_conflict(operation: &str, reason: &str) {
    warn!(
        operation = operation,
        reason = reason,
        "Operation rejected by a uniqueness rule"
    );
}

/// Log a failed database operation with the driver detail.
///
/// This is the only place the underlying error text is recorded.
pub fn log_database_failure(operation: &str, table: &str, error: &sqlx::Error) {
    error!(
        operation = operation,
        table = table,
        error = %error,
        "Database operation failed"
    );
}
