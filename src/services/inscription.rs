//! Inscription service implementation
//!
//! Links participants to events. Both referenced rows must exist and a
//! participant can hold at most one inscription per event; the pair check
//! and the insert share a transaction and the unique constraint backs them.

use serde::Serialize;
use tracing::debug;
use crate::database::DatabaseService;
use crate::models::event::Event;
use crate::models::inscription::{EventInscription, Inscription, InscriptionDetails, ParticipantInscription};
use crate::models::participant::Participant;
use crate::services::response::ServiceResponse;
use crate::services::validation::{self, FIELD_EVENT_ID, FIELD_PARTICIPANT_ID};
use crate::services::invalid;
use crate::utils::errors::{EventDeskError, FieldErrors, Result};
use crate::utils::logging::{log_conflict, log_entity_action};

#[derive(Debug, Clone, Serialize)]
pub struct InscriptionCreated {
    pub inscription_id: i64,
    pub inscription: Inscription,
}

#[derive(Debug, Clone, Serialize)]
pub struct InscriptionList {
    pub inscriptions: Vec<InscriptionDetails>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EventInscriptions {
    pub event: Event,
    pub inscriptions: Vec<EventInscription>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParticipantInscriptions {
    pub participant: Participant,
    pub inscriptions: Vec<ParticipantInscription>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InscriptionDeleted {
    pub inscription_id: i64,
}

/// Outcome of the combined "register a person for an event" form
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub participant_id: i64,
    pub participant_created: bool,
    pub inscription_id: i64,
}

/// Inscription service for managing inscription operations
#[derive(Debug, Clone)]
pub struct InscriptionService {
    db: DatabaseService,
}

impl InscriptionService {
    /// Create a new InscriptionService instance
    pub fn new(db: DatabaseService) -> Self {
        Self { db }
    }

    /// Register an existing participant for an existing event.
    ///
    /// Ids arrive as raw form values; each one is checked on its own so both
    /// field errors can be reported together.
    pub async fn create_inscription(&self, event_id: &str, participant_id: &str) -> ServiceResponse<InscriptionCreated> {
        self.try_create_inscription(event_id, participant_id).await.into()
    }

    /// Get all inscriptions with event and participant details, newest first
    pub async fn get_all_inscriptions(&self) -> ServiceResponse<InscriptionList> {
        debug!("Listing inscriptions");
        self.db
            .inscriptions
            .find_all()
            .await
            .map(|inscriptions| ServiceResponse::ok(InscriptionList { inscriptions }))
            .into()
    }

    /// Get an event and its attendee list
    pub async fn get_inscriptions_by_event(&self, event_id: i64) -> ServiceResponse<EventInscriptions> {
        self.try_get_inscriptions_by_event(event_id).await.into()
    }

    /// Get a participant and the events they are registered for
    pub async fn get_inscriptions_by_participant(&self, participant_id: i64) -> ServiceResponse<ParticipantInscriptions> {
        self.try_get_inscriptions_by_participant(participant_id).await.into()
    }

    /// Delete one inscription
    pub async fn delete_inscription(&self, id: i64) -> ServiceResponse<InscriptionDeleted> {
        self.try_delete_inscription(id).await.into()
    }

    /// Create or reuse a participant by email and register them for an event.
    ///
    /// Participant fields and the event id are validated together, and the
    /// participant is only written if the inscription succeeds.
    pub async fn register_participant(&self, name: &str, email: &str, event_id: &str) -> ServiceResponse<Registration> {
        self.try_register_participant(name, email, event_id).await.into()
    }

    async fn try_create_inscription(&self, event_id: &str, participant_id: &str) -> Result<ServiceResponse<InscriptionCreated>> {
        let mut errors = FieldErrors::new();
        let event_id = self.check_event_reference(event_id.trim(), &mut errors).await?;
        let participant_id = self.check_participant_reference(participant_id.trim(), &mut errors).await?;

        let (event_id, participant_id) = match (event_id, participant_id) {
            (Some(event_id), Some(participant_id)) if errors.is_empty() => (event_id, participant_id),
            _ => return Err(invalid("create_inscription", errors)),
        };

        let mut tx = self.db.begin().await?;

        if self.db.inscriptions.exists(&mut tx, event_id, participant_id).await? {
            log_conflict("create_inscription", "participant already registered for event");
            return Err(EventDeskError::DuplicateInscription { event_id, participant_id });
        }

        let inscription = self.db.inscriptions.create(&mut tx, event_id, participant_id).await?;
        self.db.commit(tx).await?;
        log_entity_action("inscription", inscription.id, "created", None);

        Ok(ServiceResponse::success(
            "Inscription created successfully.",
            InscriptionCreated { inscription_id: inscription.id, inscription },
        ))
    }

    async fn try_get_inscriptions_by_event(&self, event_id: i64) -> Result<ServiceResponse<EventInscriptions>> {
        debug!(event_id = event_id, "Getting inscriptions for event");
        let event = self.db.events.find_by_id(event_id).await?
            .ok_or(EventDeskError::EventNotFound { event_id })?;
        let inscriptions = self.db.inscriptions.find_by_event(event_id).await?;

        Ok(ServiceResponse::ok(EventInscriptions { event, inscriptions }))
    }

    async fn try_get_inscriptions_by_participant(&self, participant_id: i64) -> Result<ServiceResponse<ParticipantInscriptions>> {
        debug!(participant_id = participant_id, "Getting inscriptions for participant");
        let participant = self.db.participants.find_by_id(participant_id).await?
            .ok_or(EventDeskError::ParticipantNotFound { participant_id })?;
        let inscriptions = self.db.inscriptions.find_by_participant(participant_id).await?;

        Ok(ServiceResponse::ok(ParticipantInscriptions { participant, inscriptions }))
    }

    async fn try_delete_inscription(&self, id: i64) -> Result<ServiceResponse<InscriptionDeleted>> {
        if self.db.inscriptions.delete(id).await? == 0 {
            return Err(EventDeskError::InscriptionNotFound { inscription_id: id });
        }
        log_entity_action("inscription", id, "deleted", None);

        Ok(ServiceResponse::success(
            "Inscription deleted successfully.",
            InscriptionDeleted { inscription_id: id },
        ))
    }

    async fn try_register_participant(&self, name: &str, email: &str, event_id: &str) -> Result<ServiceResponse<Registration>> {
        let (request, mut errors) = match validation::validate_participant(name.trim(), email.trim()) {
            Ok(request) => (Some(request), FieldErrors::new()),
            Err(errors) => (None, errors),
        };
        let event_id = self.check_event_reference(event_id.trim(), &mut errors).await?;

        let (request, event_id) = match (request, event_id) {
            (Some(request), Some(event_id)) if errors.is_empty() => (request, event_id),
            _ => return Err(invalid("register_participant", errors)),
        };

        let mut tx = self.db.begin().await?;
        let (participant, participant_created) = self.db.participants.insert_or_get(&mut tx, &request).await?;

        if self.db.inscriptions.exists(&mut tx, event_id, participant.id).await? {
            log_conflict("register_participant", "participant already registered for event");
            return Err(EventDeskError::DuplicateInscription { event_id, participant_id: participant.id });
        }

        let inscription = self.db.inscriptions.create(&mut tx, event_id, participant.id).await?;
        self.db.commit(tx).await?;

        if participant_created {
            log_entity_action("participant", participant.id, "created", None);
        }
        log_entity_action("inscription", inscription.id, "created", None);

        Ok(ServiceResponse::success(
            "Participant registered successfully.",
            Registration {
                participant_id: participant.id,
                participant_created,
                inscription_id: inscription.id,
            },
        ))
    }

    /// Parse and resolve an event id, recording a field error when it is unusable
    async fn check_event_reference(&self, raw: &str, errors: &mut FieldErrors) -> Result<Option<i64>> {
        let Some(event_id) = validation::parse_reference_id(raw) else {
            errors.insert(FIELD_EVENT_ID.to_string(), "Invalid event ID.".to_string());
            return Ok(None);
        };

        if self.db.events.find_by_id(event_id).await?.is_none() {
            errors.insert(FIELD_EVENT_ID.to_string(), "Event not found.".to_string());
            return Ok(None);
        }

        Ok(Some(event_id))
    }

    /// Parse and resolve a participant id, recording a field error when it is unusable
    async fn check_participant_reference(&self, raw: &str, errors: &mut FieldErrors) -> Result<Option<i64>> {
        let Some(participant_id) = validation::parse_reference_id(raw) else {
            errors.insert(FIELD_PARTICIPANT_ID.to_string(), "Invalid participant ID.".to_string());
            return Ok(None);
        };

        if self.db.participants.find_by_id(participant_id).await?.is_none() {
            errors.insert(FIELD_PARTICIPANT_ID.to_string(), "Participant not found.".to_string());
            return Ok(None);
        }

        Ok(Some(participant_id))
    }
}
