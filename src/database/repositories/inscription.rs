//! Inscription repository implementation

use sqlx::{PgConnection, PgPool};
use crate::database::repositories::{foreign_key_constraint, is_unique_violation, storage_failure};
use crate::models::inscription::{Inscription, InscriptionDetails, EventInscription, ParticipantInscription};
use crate::utils::errors::EventDeskError;

#[derive(Debug, Clone)]
pub struct InscriptionRepository {
    pool: PgPool,
}

impl InscriptionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Register a participant for an event; the timestamp is set by the database.
    ///
    /// Constraint violations raised by concurrent writers come back as domain
    /// errors: the unique pair as `DuplicateInscription`, a vanished event or
    /// participant as the matching not-found.
    pub async fn create(&self, conn: &mut PgConnection, event_id: i64, participant_id: i64) -> Result<Inscription, EventDeskError> {
        let inscription = sqlx::query_as::<_, Inscription>(
            r#"
            INSERT INTO inscriptions (event_id, participant_id, date_inscription)
            VALUES ($1, $2, NOW())
            RETURNING id, event_id, participant_id, date_inscription
            "#
        )
        .bind(event_id)
        .bind(participant_id)
        .fetch_one(&mut *conn)
        .await
        .map_err(|error| {
            if is_unique_violation(&error) {
                return EventDeskError::DuplicateInscription { event_id, participant_id };
            }
            match foreign_key_constraint(&error).as_deref() {
                Some("inscriptions_event_id_fkey") => EventDeskError::EventNotFound { event_id },
                Some("inscriptions_participant_id_fkey") => EventDeskError::ParticipantNotFound { participant_id },
                _ => storage_failure("create", "inscriptions", "registering the participant")(error),
            }
        })?;

        Ok(inscription)
    }

    /// Check if the participant is already registered for the event
    pub async fn exists(&self, conn: &mut PgConnection, event_id: i64, participant_id: i64) -> Result<bool, EventDeskError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM inscriptions WHERE event_id = $1 AND participant_id = $2"
        )
        .bind(event_id)
        .bind(participant_id)
        .fetch_one(&mut *conn)
        .await
        .map_err(storage_failure("exists", "inscriptions", "checking the inscription"))?;

        Ok(count.0 > 0)
    }

    /// List every inscription with its event and participant, newest first
    pub async fn find_all(&self) -> Result<Vec<InscriptionDetails>, EventDeskError> {
        let inscriptions = sqlx::query_as::<_, InscriptionDetails>(
            r#"
            SELECT i.id, i.date_inscription,
                   e.id AS event_id, e.titre AS event_titre, e.date_evenement,
                   p.id AS participant_id, p.nom AS participant_nom, p.email
            FROM inscriptions i
            INNER JOIN events e ON i.event_id = e.id
            INNER JOIN participants p ON i.participant_id = p.id
            ORDER BY i.date_inscription DESC, i.id DESC
            "#
        )
        .fetch_all(&self.pool)
        .await
        .map_err(storage_failure("find_all", "inscriptions", "loading the inscriptions"))?;

        Ok(inscriptions)
    }

    /// Get the attendee list of an event, newest first
    pub async fn find_by_event(&self, event_id: i64) -> Result<Vec<EventInscription>, EventDeskError> {
        let inscriptions = sqlx::query_as::<_, EventInscription>(
            r#"
            SELECT i.id, i.date_inscription,
                   p.id AS participant_id, p.nom AS participant_nom, p.email
            FROM inscriptions i
            INNER JOIN participants p ON i.participant_id = p.id
            WHERE i.event_id = $1
            ORDER BY i.date_inscription DESC, i.id DESC
            "#
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_failure("find_by_event", "inscriptions", "loading the inscriptions for the event"))?;

        Ok(inscriptions)
    }

    /// Get the events a participant is registered for, newest inscription first
    pub async fn find_by_participant(&self, participant_id: i64) -> Result<Vec<ParticipantInscription>, EventDeskError> {
        let inscriptions = sqlx::query_as::<_, ParticipantInscription>(
            r#"
            SELECT i.id, i.date_inscription,
                   e.id AS event_id, e.titre AS event_titre, e.date_evenement
            FROM inscriptions i
            INNER JOIN events e ON i.event_id = e.id
            WHERE i.participant_id = $1
            ORDER BY i.date_inscription DESC, i.id DESC
            "#
        )
        .bind(participant_id)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_failure("find_by_participant", "inscriptions", "loading the inscriptions for the participant"))?;

        Ok(inscriptions)
    }

    /// Delete one inscription, returning the number of rows removed
    pub async fn delete(&self, id: i64) -> Result<u64, EventDeskError> {
        let result = sqlx::query("DELETE FROM inscriptions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(storage_failure("delete", "inscriptions", "deleting the inscription"))?;

        Ok(result.rows_affected())
    }

    /// Delete all inscriptions of an event
    pub async fn delete_by_event(&self, conn: &mut PgConnection, event_id: i64) -> Result<u64, EventDeskError> {
        let result = sqlx::query("DELETE FROM inscriptions WHERE event_id = $1")
            .bind(event_id)
            .execute(&mut *conn)
            .await
            .map_err(storage_failure("delete_by_event", "inscriptions", "deleting the inscriptions for the event"))?;

        Ok(result.rows_affected())
    }

    /// Delete all inscriptions of a participant
    pub async fn delete_by_participant(&self, conn: &mut PgConnection, participant_id: i64) -> Result<u64, EventDeskError> {
        let result = sqlx::query("DELETE FROM inscriptions WHERE participant_id = $1")
            .bind(participant_id)
            .execute(&mut *conn)
            .await
            .map_err(storage_failure("delete_by_participant", "inscriptions", "deleting the inscriptions for the participant"))?;

        Ok(result.rows_affected())
    }

    /// Count total inscriptions
    pub async fn count(&self) -> Result<i64, EventDeskError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM inscriptions")
            .fetch_one(&self.pool)
            .await
            .map_err(storage_failure("count", "inscriptions", "counting the inscriptions"))?;

        Ok(count.0)
    }
}
