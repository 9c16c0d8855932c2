//! Uniform result envelope returned by every service operation
//!
//! Services never return `Err`; callers branch on `status` (and `code` for
//! the failure kind) and render `message`/`errors` as they see fit.

use serde::Serialize;
use tracing::error;
use crate::utils::errors::{EventDeskError, FieldErrors};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// Failure kind, present on error responses only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Validation,
    NotFound,
    Conflict,
    Storage,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceResponse<T> {
    pub status: ResponseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
    #[serde(flatten)]
    pub payload: Option<T>,
}

/// One-shot message for the next rendered page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Error,
}

impl<T> ServiceResponse<T> {
    /// Successful response carrying a payload only
    pub fn ok(payload: T) -> Self {
        Self {
            status: ResponseStatus::Success,
            code: None,
            message: None,
            errors: None,
            payload: Some(payload),
        }
    }

    /// Successful response with a message for the user
    pub fn success(message: impl Into<String>, payload: T) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::ok(payload)
        }
    }

    /// Failed response built from a domain or storage error
    pub fn failure(error: EventDeskError) -> Self {
        let (code, message, errors) = match error {
            EventDeskError::Validation(errors) => {
                (ErrorCode::Validation, "Validation errors.".to_string(), Some(errors))
            }
            EventDeskError::EventNotFound { .. }
            | EventDeskError::ParticipantNotFound { .. }
            | EventDeskError::InscriptionNotFound { .. } => {
                (ErrorCode::NotFound, error.to_string(), None)
            }
            EventDeskError::DuplicateInscription { .. } => {
                (ErrorCode::Conflict, error.to_string(), None)
            }
            EventDeskError::EmailTaken { .. } => {
                let message = error.to_string();
                let mut errors = FieldErrors::new();
                errors.insert("email".to_string(), message.clone());
                (ErrorCode::Conflict, message, Some(errors))
            }
            EventDeskError::Storage { .. } => (ErrorCode::Storage, error.to_string(), None),
            other => {
                error!(error = %other, severity = %other.severity(), "Unexpected error reached the service boundary");
                (ErrorCode::Storage, "An unexpected error occurred.".to_string(), None)
            }
        };

        Self {
            status: ResponseStatus::Error,
            code: Some(code),
            message: Some(message),
            errors,
            payload: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ResponseStatus::Success
    }

    /// Message to show on the next page, if the response carries one
    pub fn flash(&self) -> Option<Flash> {
        let level = match self.status {
            ResponseStatus::Success => FlashLevel::Success,
            ResponseStatus::Error => FlashLevel::Error,
        };
        self.message.as_ref().map(|message| Flash {
            level,
            message: message.clone(),
        })
    }

    /// Field errors, or an empty map
    pub fn field_errors(&self) -> FieldErrors {
        self.errors.clone().unwrap_or_default()
    }
}

impl<T> From<crate::utils::errors::Result<ServiceResponse<T>>> for ServiceResponse<T> {
    fn from(result: crate::utils::errors::Result<ServiceResponse<T>>) -> Self {
        result.unwrap_or_else(ServiceResponse::failure)
    }
}
