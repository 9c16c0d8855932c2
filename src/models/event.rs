//! Event model

use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: i64,
    #[serde(rename = "titre")]
    #[sqlx(rename = "titre")]
    pub title: String,
    #[serde(rename = "date_evenement")]
    #[sqlx(rename = "date_evenement")]
    pub event_date: NaiveDate,
    pub description: String,
}

/// Validated input for a new event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub event_date: NaiveDate,
    pub description: String,
}

/// Validated replacement values for an existing event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateEventRequest {
    pub title: String,
    pub event_date: NaiveDate,
    pub description: String,
}

impl From<CreateEventRequest> for UpdateEventRequest {
    fn from(request: CreateEventRequest) -> Self {
        Self {
            title: request.title,
            event_date: request.event_date,
            description: request.description,
        }
    }
}
