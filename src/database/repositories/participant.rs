//! Participant repository implementation

use sqlx::{PgConnection, PgPool};
use crate::database::repositories::{is_unique_violation, storage_failure};
use crate::models::participant::{Participant, CreateParticipantRequest, UpdateParticipantRequest};
use crate::utils::errors::EventDeskError;

#[derive(Debug, Clone)]
pub struct ParticipantRepository {
    pool: PgPool,
}

impl ParticipantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a participant, or return the one already holding this email.
    ///
    /// The boolean is `true` when a new row was written. Emails match without
    /// regard to case, and `ON CONFLICT` keeps two concurrent registrations
    /// with the same email down to one row.
    pub async fn insert_or_get(&self, conn: &mut PgConnection, request: &CreateParticipantRequest) -> Result<(Participant, bool), EventDeskError> {
        let inserted = sqlx::query_as::<_, Participant>(
            r#"
            INSERT INTO participants (nom, email)
            VALUES ($1, $2)
            ON CONFLICT ((lower(email))) DO NOTHING
            RETURNING id, nom, email
            "#
        )
        .bind(&request.name)
        .bind(&request.email)
        .fetch_optional(&mut *conn)
        .await
        .map_err(storage_failure("insert_or_get", "participants", "creating the participant"))?;

        if let Some(participant) = inserted {
            return Ok((participant, true));
        }

        let existing = sqlx::query_as::<_, Participant>(
            "SELECT id, nom, email FROM participants WHERE lower(email) = lower($1)"
        )
        .bind(&request.email)
        .fetch_one(&mut *conn)
        .await
        .map_err(storage_failure("insert_or_get", "participants", "creating the participant"))?;

        Ok((existing, false))
    }

    /// List every participant by name
    pub async fn find_all(&self) -> Result<Vec<Participant>, EventDeskError> {
        let participants = sqlx::query_as::<_, Participant>(
            "SELECT id, nom, email FROM participants ORDER BY nom ASC, id ASC"
        )
        .fetch_all(&self.pool)
        .await
        .map_err(storage_failure("find_all", "participants", "loading the participants"))?;

        Ok(participants)
    }

    /// Find participant by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Participant>, EventDeskError> {
        let participant = sqlx::query_as::<_, Participant>(
            "SELECT id, nom, email FROM participants WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_failure("find_by_id", "participants", "loading the participant"))?;

        Ok(participant)
    }

    /// Find participant by email, ignoring case
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Participant>, EventDeskError> {
        let participant = sqlx::query_as::<_, Participant>(
            "SELECT id, nom, email FROM participants WHERE lower(email) = lower($1)"
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_failure("find_by_email", "participants", "loading the participant"))?;

        Ok(participant)
    }

    /// Find participant by ID and lock the row until the surrounding transaction ends
    pub async fn find_by_id_for_update(&self, conn: &mut PgConnection, id: i64) -> Result<Option<Participant>, EventDeskError> {
        let participant = sqlx::query_as::<_, Participant>(
            "SELECT id, nom, email FROM participants WHERE id = $1 FOR UPDATE"
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(storage_failure("find_by_id_for_update", "participants", "loading the participant"))?;

        Ok(participant)
    }

    /// Check whether a participant other than `id` already uses this email
    pub async fn email_taken_by_other(&self, conn: &mut PgConnection, email: &str, id: i64) -> Result<bool, EventDeskError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM participants WHERE lower(email) = lower($1) AND id <> $2"
        )
        .bind(email)
        .bind(id)
        .fetch_one(&mut *conn)
        .await
        .map_err(storage_failure("email_taken_by_other", "participants", "checking the email"))?;

        Ok(count.0 > 0)
    }

    /// Replace name and email of a participant
    pub async fn update(&self, conn: &mut PgConnection, id: i64, request: &UpdateParticipantRequest) -> Result<Participant, EventDeskError> {
        let participant = sqlx::query_as::<_, Participant>(
            r#"
            UPDATE participants
            SET nom = $2,
                email = $3
            WHERE id = $1
            RETURNING id, nom, email
            "#
        )
        .bind(id)
        .bind(&request.name)
        .bind(&request.email)
        .fetch_one(&mut *conn)
        .await
        .map_err(|error| {
            if is_unique_violation(&error) {
                EventDeskError::EmailTaken { email: request.email.clone() }
            } else {
                storage_failure("update", "participants", "updating the participant")(error)
            }
        })?;

        Ok(participant)
    }

    /// Delete participant, returning the number of rows removed
    pub async fn delete(&self, conn: &mut PgConnection, id: i64) -> Result<u64, EventDeskError> {
        let result = sqlx::query("DELETE FROM participants WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(storage_failure("delete", "participants", "deleting the participant"))?;

        Ok(result.rows_affected())
    }

    /// Count total participants
    pub async fn count(&self) -> Result<i64, EventDeskError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM participants")
            .fetch_one(&self.pool)
            .await
            .map_err(storage_failure("count", "participants", "counting the participants"))?;

        Ok(count.0)
    }
}
