//! Services module
//!
//! This module contains business logic services

pub mod event;
pub mod inscription;
pub mod participant;
pub mod response;
pub mod validation;

// Re-export commonly used services
pub use event::EventService;
pub use inscription::InscriptionService;
pub use participant::ParticipantService;
pub use response::{ErrorCode, Flash, FlashLevel, ResponseStatus, ServiceResponse};

use std::sync::Arc;
use tracing::warn;
use crate::database::{health_check, DatabasePool, DatabaseService, RecordCounts};
use crate::utils::clock::{Clock, SystemClock};
use crate::utils::errors::{EventDeskError, FieldErrors};
use crate::utils::logging::log_validation_failure;

/// Log rejected input and wrap it as a validation error
pub(crate) fn invalid(operation: &str, errors: FieldErrors) -> EventDeskError {
    log_validation_failure(operation, &errors);
    EventDeskError::Validation(errors)
}

/// Service factory for creating and managing all services
#[derive(Debug, Clone)]
pub struct ServiceFactory {
    pub event_service: EventService,
    pub participant_service: ParticipantService,
    pub inscription_service: InscriptionService,
    database: DatabaseService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory using the system date
    pub fn new(pool: DatabasePool) -> Self {
        Self::with_clock(pool, Arc::new(SystemClock))
    }

    /// Create a new ServiceFactory with an explicit date source
    pub fn with_clock(pool: DatabasePool, clock: Arc<dyn Clock>) -> Self {
        let database = DatabaseService::new(pool);

        Self {
            event_service: EventService::new(database.clone(), clock),
            participant_service: ParticipantService::new(database.clone()),
            inscription_service: InscriptionService::new(database.clone()),
            database,
        }
    }

    /// Health check for the storage behind all services
    pub async fn health_check(&self) -> ServiceHealthStatus {
        if let Err(e) = health_check(self.database.pool()).await {
            warn!(error = %e, "Database health check failed");
            return ServiceHealthStatus { database_healthy: false, records: None };
        }

        let records = match self.database.counts().await {
            Ok(counts) => Some(counts),
            Err(e) => {
                warn!(error = %e, "Could not count stored records");
                None
            }
        };

        ServiceHealthStatus { database_healthy: true, records }
    }
}

/// Health status for all services
#[derive(Debug, Clone)]
pub struct ServiceHealthStatus {
    pub database_healthy: bool,
    pub records: Option<RecordCounts>,
}

impl ServiceHealthStatus {
    /// Check if all critical services are healthy
    pub fn is_healthy(&self) -> bool {
        self.database_healthy
    }

    /// Get list of detected problems
    pub fn get_issues(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if !self.database_healthy {
            issues.push("Database connection failed".to_string());
        } else if self.records.is_none() {
            issues.push("Record counts unavailable".to_string());
        }

        issues
    }
}
