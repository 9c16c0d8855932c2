//! Participant service implementation
//!
//! This service handles participant registration (reusing an existing record
//! when the email is already known), profile updates with email uniqueness,
//! and cascading deletes.

use serde::Serialize;
use tracing::{debug, info};
use crate::database::DatabaseService;
use crate::models::participant::{Participant, UpdateParticipantRequest};
use crate::services::response::ServiceResponse;
use crate::services::{invalid, validation};
use crate::utils::errors::{EventDeskError, Result};
use crate::utils::logging::{log_conflict, log_entity_action};

#[derive(Debug, Clone, Serialize)]
pub struct ParticipantCreated {
    pub participant_id: i64,
    /// `false` when an existing participant with the same email was reused
    pub created: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParticipantList {
    pub participants: Vec<Participant>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParticipantPayload {
    pub participant: Participant,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParticipantDeleted {
    pub participant_id: i64,
    pub inscriptions_removed: u64,
}

/// Participant service for managing participant operations
#[derive(Debug, Clone)]
pub struct ParticipantService {
    db: DatabaseService,
}

impl ParticipantService {
    /// Create a new ParticipantService instance
    pub fn new(db: DatabaseService) -> Self {
        Self { db }
    }

    /// Register a participant, or return the existing one with this email
    pub async fn create_participant(&self, name: &str, email: &str) -> ServiceResponse<ParticipantCreated> {
        self.try_create_participant(name, email).await.into()
    }

    /// Get all participants by name
    pub async fn get_all_participants(&self) -> ServiceResponse<ParticipantList> {
        debug!("Listing participants");
        self.db
            .participants
            .find_all()
            .await
            .map(|participants| ServiceResponse::ok(ParticipantList { participants }))
            .into()
    }

    /// Get one participant
    pub async fn get_participant(&self, id: i64) -> ServiceResponse<ParticipantPayload> {
        self.try_get_participant(id).await.into()
    }

    /// Validate and replace name and email of an existing participant
    pub async fn update_participant(&self, id: i64, name: &str, email: &str) -> ServiceResponse<ParticipantPayload> {
        self.try_update_participant(id, name, email).await.into()
    }

    /// Delete a participant together with all of their inscriptions
    pub async fn delete_participant(&self, id: i64) -> ServiceResponse<ParticipantDeleted> {
        self.try_delete_participant(id).await.into()
    }

    async fn try_create_participant(&self, name: &str, email: &str) -> Result<ServiceResponse<ParticipantCreated>> {
        let request = validation::validate_participant(name.trim(), email.trim())
            .map_err(|errors| invalid("create_participant", errors))?;

        let mut tx = self.db.begin().await?;
        let (participant, created) = self.db.participants.insert_or_get(&mut tx, &request).await?;
        self.db.commit(tx).await?;

        let message = if created {
            log_entity_action("participant", participant.id, "created", None);
            "Participant created successfully."
        } else {
            info!(participant_id = participant.id, "Email already registered, reusing participant");
            "Participant already registered with this email."
        };

        Ok(ServiceResponse::success(
            message,
            ParticipantCreated { participant_id: participant.id, created },
        ))
    }

    async fn try_get_participant(&self, id: i64) -> Result<ServiceResponse<ParticipantPayload>> {
        debug!(participant_id = id, "Getting participant by ID");
        let participant = self.db.participants.find_by_id(id).await?
            .ok_or(EventDeskError::ParticipantNotFound { participant_id: id })?;

        Ok(ServiceResponse::ok(ParticipantPayload { participant }))
    }

    async fn try_update_participant(&self, id: i64, name: &str, email: &str) -> Result<ServiceResponse<ParticipantPayload>> {
        let request: UpdateParticipantRequest = validation::validate_participant(name.trim(), email.trim())
            .map_err(|errors| invalid("update_participant", errors))?
            .into();

        let mut tx = self.db.begin().await?;

        let current = self.db.participants.find_by_id_for_update(&mut tx, id).await?
            .ok_or(EventDeskError::ParticipantNotFound { participant_id: id })?;

        if !request.email.eq_ignore_ascii_case(&current.email)
            && self.db.participants.email_taken_by_other(&mut tx, &request.email, id).await?
        {
            log_conflict("update_participant", "email already in use");
            return Err(EventDeskError::EmailTaken { email: request.email });
        }

        let participant = self.db.participants.update(&mut tx, id, &request).await?;
        self.db.commit(tx).await?;
        log_entity_action("participant", id, "updated", None);

        Ok(ServiceResponse::success(
            "Participant updated successfully.",
            ParticipantPayload { participant },
        ))
    }

    async fn try_delete_participant(&self, id: i64) -> Result<ServiceResponse<ParticipantDeleted>> {
        let mut tx = self.db.begin().await?;

        if self.db.participants.find_by_id_for_update(&mut tx, id).await?.is_none() {
            return Err(EventDeskError::ParticipantNotFound { participant_id: id });
        }

        let inscriptions_removed = self.db.inscriptions.delete_by_participant(&mut tx, id).await?;
        self.db.participants.delete(&mut tx, id).await?;
        self.db.commit(tx).await?;

        let details = format!("{} inscriptions removed", inscriptions_removed);
        log_entity_action("participant", id, "deleted", Some(&details));

        Ok(ServiceResponse::success(
            "Participant and their inscriptions deleted successfully.",
            ParticipantDeleted { participant_id: id, inscriptions_removed },
        ))
    }
}
