//! Database repositories module
//!
//! This module contains all repository implementations for data access.
//! Driver errors never leave a repository: they are logged here and replaced
//! by `EventDeskError::Storage`, or by a domain error when a constraint
//! explains them.

pub mod event;
pub mod participant;
pub mod inscription;

// Re-export repositories
pub use event::EventRepository;
pub use participant::ParticipantRepository;
pub use inscription::InscriptionRepository;

use crate::utils::errors::EventDeskError;
use crate::utils::logging::log_database_failure;

/// Build a `map_err` adapter that logs the driver error and returns a generic storage error
pub(crate) fn storage_failure(
    operation: &'static str,
    table: &'static str,
    context: &'static str,
) -> impl FnOnce(sqlx::Error) -> EventDeskError {
    move |error| {
        log_database_failure(operation, table, &error);
        EventDeskError::Storage { context }
    }
}

pub(crate) fn is_unique_violation(error: &sqlx::Error) -> bool {
    matches!(error, sqlx::Error::Database(db) if db.is_unique_violation())
}

/// Name of the violated foreign key constraint, if that is what failed
pub(crate) fn foreign_key_constraint(error: &sqlx::Error) -> Option<String> {
    match error {
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => db.constraint().map(str::to_string),
        _ => None,
    }
}
