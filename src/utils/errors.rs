//! Error handling for EventDesk
//!
//! This module defines the main error type used throughout the application
//! and provides a unified error handling strategy. Repositories log storage
//! failures with full detail and hand back `Storage`, so no driver message
//! ever reaches a caller.

use std::collections::BTreeMap;
use thiserror::Error;

/// Field name to user-facing message, collected during validation
pub type FieldErrors = BTreeMap<String, String>;

/// Main error type for EventDesk application
#[derive(Error, Debug)]
pub enum EventDeskError {
    #[error("Validation failed")]
    Validation(FieldErrors),

    #[error("Event not found.")]
    EventNotFound { event_id: i64 },

    #[error("Participant not found.")]
    ParticipantNotFound { participant_id: i64 },

    #[error("Inscription not found.")]
    InscriptionNotFound { inscription_id: i64 },

    #[error("This participant is already registered for this event.")]
    DuplicateInscription { event_id: i64, participant_id: i64 },

    #[error("This email is already used by another participant.")]
    EmailTaken { email: String },

    #[error("An error occurred while {context}.")]
    Storage { context: &'static str },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for EventDesk operations
pub type Result<T> = std::result::Result<T, EventDeskError>;

impl EventDeskError {
    /// Check if the error is recoverable by the caller correcting its input
    pub fn is_recoverable(&self) -> bool {
        match self {
            EventDeskError::Validation(_) => true,
            EventDeskError::EventNotFound { .. } => true,
            EventDeskError::ParticipantNotFound { .. } => true,
            EventDeskError::InscriptionNotFound { .. } => true,
            EventDeskError::DuplicateInscription { .. } => true,
            EventDeskError::EmailTaken { .. } => true,
            EventDeskError::Storage { .. } => false,
            EventDeskError::Database(_) => false,
            EventDeskError::Migration(_) => false,
            EventDeskError::Config(_) => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            EventDeskError::Database(_) => ErrorSeverity::Critical,
            EventDeskError::Migration(_) => ErrorSeverity::Critical,
            EventDeskError::Config(_) => ErrorSeverity::Critical,
            EventDeskError::Storage { .. } => ErrorSeverity::Error,
            EventDeskError::DuplicateInscription { .. } => ErrorSeverity::Warning,
            EventDeskError::EmailTaken { .. } => ErrorSeverity::Warning,
            _ => ErrorSeverity::Info,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_errors_are_recoverable_info() {
        let error = EventDeskError::InscriptionNotFound { inscription_id: 4 };
        assert_eq!(error.to_string(), "Inscription not found.");
        assert!(error.is_recoverable());
        assert_eq!(error.severity(), ErrorSeverity::Info);
    }

    #[test]
    fn test_storage_message_hides_detail() {
        let error = EventDeskError::Storage { context: "creating the event" };
        assert_eq!(error.to_string(), "An error occurred while creating the event.");
        assert!(!error.is_recoverable());
        assert_eq!(error.severity(), ErrorSeverity::Error);
    }

    #[test]
    fn test_conflicts_are_recoverable_warnings() {
        let error = EventDeskError::DuplicateInscription { event_id: 1, participant_id: 2 };
        assert!(error.is_recoverable());
        assert_eq!(error.severity(), ErrorSeverity::Warning);
        assert_eq!(error.severity().to_string(), "WARN");
    }
}
