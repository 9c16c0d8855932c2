//! Inscription model and the joined rows used by listings

use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Inscription {
    pub id: i64,
    pub event_id: i64,
    pub participant_id: i64,
    #[serde(rename = "date_inscription")]
    #[sqlx(rename = "date_inscription")]
    pub registered_at: DateTime<Utc>,
}

/// Inscription joined with both its event and its participant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct InscriptionDetails {
    pub id: i64,
    #[serde(rename = "date_inscription")]
    #[sqlx(rename = "date_inscription")]
    pub registered_at: DateTime<Utc>,
    pub event_id: i64,
    #[serde(rename = "event_titre")]
    #[sqlx(rename = "event_titre")]
    pub event_title: String,
    #[serde(rename = "date_evenement")]
    #[sqlx(rename = "date_evenement")]
    pub event_date: NaiveDate,
    pub participant_id: i64,
    #[serde(rename = "participant_nom")]
    #[sqlx(rename = "participant_nom")]
    pub participant_name: String,
    pub email: String,
}

/// One row of an event's attendee list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct EventInscription {
    pub id: i64,
    #[serde(rename = "date_inscription")]
    #[sqlx(rename = "date_inscription")]
    pub registered_at: DateTime<Utc>,
    pub participant_id: i64,
    #[serde(rename = "participant_nom")]
    #[sqlx(rename = "participant_nom")]
    pub participant_name: String,
    pub email: String,
}

/// One row of a participant's agenda
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ParticipantInscription {
    pub id: i64,
    #[serde(rename = "date_inscription")]
    #[sqlx(rename = "date_inscription")]
    pub registered_at: DateTime<Utc>,
    pub event_id: i64,
    #[serde(rename = "event_titre")]
    #[sqlx(rename = "event_titre")]
    pub event_title: String,
    #[serde(rename = "date_evenement")]
    #[sqlx(rename = "date_evenement")]
    pub event_date: NaiveDate,
}
