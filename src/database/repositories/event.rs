//! Event repository implementation

use sqlx::{PgConnection, PgPool};
use crate::database::repositories::storage_failure;
use crate::models::event::{Event, CreateEventRequest, UpdateEventRequest};
use crate::utils::errors::EventDeskError;

#[derive(Debug, Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new event
    pub async fn create(&self, request: &CreateEventRequest) -> Result<Event, EventDeskError> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (titre, date_evenement, description)
            VALUES ($1, $2, $3)
            RETURNING id, titre, date_evenement, description
            "#
        )
        .bind(&request.title)
        .bind(request.event_date)
        .bind(&request.description)
        .fetch_one(&self.pool)
        .await
        .map_err(storage_failure("create", "events", "creating the event"))?;

        Ok(event)
    }

    /// List every event, latest date first
    pub async fn find_all(&self) -> Result<Vec<Event>, EventDeskError> {
        let events = sqlx::query_as::<_, Event>(
            "SELECT id, titre, date_evenement, description FROM events ORDER BY date_evenement DESC, id DESC"
        )
        .fetch_all(&self.pool)
        .await
        .map_err(storage_failure("find_all", "events", "loading the events"))?;

        Ok(events)
    }

    /// Find event by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Event>, EventDeskError> {
        let event = sqlx::query_as::<_, Event>(
            "SELECT id, titre, date_evenement, description FROM events WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_failure("find_by_id", "events", "loading the event"))?;

        Ok(event)
    }

    /// Find event by ID and lock the row until the surrounding transaction ends
    pub async fn find_by_id_for_update(&self, conn: &mut PgConnection, id: i64) -> Result<Option<Event>, EventDeskError> {
        let event = sqlx::query_as::<_, Event>(
            "SELECT id, titre, date_evenement, description FROM events WHERE id = $1 FOR UPDATE"
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(storage_failure("find_by_id_for_update", "events", "loading the event"))?;

        Ok(event)
    }

    /// Replace all fields of an event.
    ///
    /// Returns `None` when no event has this id, so the existence check and
    /// the write happen in one statement.
    pub async fn update(&self, id: i64, request: &UpdateEventRequest) -> Result<Option<Event>, EventDeskError> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            UPDATE events
            SET titre = $2,
                date_evenement = $3,
                description = $4
            WHERE id = $1
            RETURNING id, titre, date_evenement, description
            "#
        )
        .bind(id)
        .bind(&request.title)
        .bind(request.event_date)
        .bind(&request.description)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_failure("update", "events", "updating the event"))?;

        Ok(event)
    }

    /// Delete event, returning the number of rows removed
    pub async fn delete(&self, conn: &mut PgConnection, id: i64) -> Result<u64, EventDeskError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(storage_failure("delete", "events", "deleting the event"))?;

        Ok(result.rows_affected())
    }

    /// Count total events
    pub async fn count(&self) -> Result<i64, EventDeskError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM events")
            .fetch_one(&self.pool)
            .await
            .map_err(storage_failure("count", "events", "counting the events"))?;

        Ok(count.0)
    }
}
