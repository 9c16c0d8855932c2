//! Event service implementation
//!
//! This service validates event input, keeps events and their inscriptions
//! consistent on delete, and reports every outcome as a `ServiceResponse`.

use std::sync::Arc;
use serde::Serialize;
use tracing::debug;
use crate::database::DatabaseService;
use crate::models::event::{Event, UpdateEventRequest};
use crate::services::response::ServiceResponse;
use crate::services::{invalid, validation};
use crate::utils::clock::Clock;
use crate::utils::errors::{EventDeskError, Result};
use crate::utils::logging::log_entity_action;

#[derive(Debug, Clone, Serialize)]
pub struct EventCreated {
    pub event_id: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct EventList {
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EventPayload {
    pub event: Event,
}

#[derive(Debug, Clone, Serialize)]
pub struct EventDeleted {
    pub event_id: i64,
    pub inscriptions_removed: u64,
}

/// Event service for managing event operations
#[derive(Debug, Clone)]
pub struct EventService {
    db: DatabaseService,
    clock: Arc<dyn Clock>,
}

impl EventService {
    /// Create a new EventService instance
    pub fn new(db: DatabaseService, clock: Arc<dyn Clock>) -> Self {
        Self { db, clock }
    }

    /// Validate and store a new event
    pub async fn create_event(&self, title: &str, event_date: &str, description: &str) -> ServiceResponse<EventCreated> {
        self.try_create_event(title, event_date, description).await.into()
    }

    /// Get all events, latest date first
    pub async fn get_all_events(&self) -> ServiceResponse<EventList> {
        debug!("Listing events");
        self.db
            .events
            .find_all()
            .await
            .map(|events| ServiceResponse::ok(EventList { events }))
            .into()
    }

    /// Get one event
    pub async fn get_event(&self, id: i64) -> ServiceResponse<EventPayload> {
        self.try_get_event(id).await.into()
    }

    /// Validate and replace the fields of an existing event
    pub async fn update_event(&self, id: i64, title: &str, event_date: &str, description: &str) -> ServiceResponse<EventPayload> {
        self.try_update_event(id, title, event_date, description).await.into()
    }

    /// Delete an event together with all of its inscriptions
    pub async fn delete_event(&self, id: i64) -> ServiceResponse<EventDeleted> {
        self.try_delete_event(id).await.into()
    }

    async fn try_create_event(&self, title: &str, event_date: &str, description: &str) -> Result<ServiceResponse<EventCreated>> {
        let request = validation::validate_event(title.trim(), event_date.trim(), description.trim(), self.clock.today())
            .map_err(|errors| invalid("create_event", errors))?;

        let event = self.db.events.create(&request).await?;
        log_entity_action("event", event.id, "created", None);

        Ok(ServiceResponse::success(
            "Event created successfully.",
            EventCreated { event_id: event.id },
        ))
    }

    async fn try_get_event(&self, id: i64) -> Result<ServiceResponse<EventPayload>> {
        debug!(event_id = id, "Getting event by ID");
        let event = self.db.events.find_by_id(id).await?
            .ok_or(EventDeskError::EventNotFound { event_id: id })?;

        Ok(ServiceResponse::ok(EventPayload { event }))
    }

    async fn try_update_event(&self, id: i64, title: &str, event_date: &str, description: &str) -> Result<ServiceResponse<EventPayload>> {
        let request = validation::validate_event(title.trim(), event_date.trim(), description.trim(), self.clock.today())
            .map_err(|errors| invalid("update_event", errors))?;

        let update: UpdateEventRequest = request.into();
        let event = self.db.events.update(id, &update).await?
            .ok_or(EventDeskError::EventNotFound { event_id: id })?;
        log_entity_action("event", id, "updated", None);

        Ok(ServiceResponse::success("Event updated successfully.", EventPayload { event }))
    }

    async fn try_delete_event(&self, id: i64) -> Result<ServiceResponse<EventDeleted>> {
        let mut tx = self.db.begin().await?;

        if self.db.events.find_by_id_for_update(&mut tx, id).await?.is_none() {
            return Err(EventDeskError::EventNotFound { event_id: id });
        }

        // Inscriptions reference the event, so they go first
        let inscriptions_removed = self.db.inscriptions.delete_by_event(&mut tx, id).await?;
        self.db.events.delete(&mut tx, id).await?;
        self.db.commit(tx).await?;

        let details = format!("{} inscriptions removed", inscriptions_removed);
        log_entity_action("event", id, "deleted", Some(&details));

        Ok(ServiceResponse::success(
            "Event and its inscriptions deleted successfully.",
            EventDeleted { event_id: id, inscriptions_removed },
        ))
    }
}
