//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod event;
pub mod participant;
pub mod inscription;

// Re-export commonly used models
pub use event::{Event, CreateEventRequest, UpdateEventRequest};
pub use participant::{Participant, CreateParticipantRequest, UpdateParticipantRequest};
pub use inscription::{Inscription, InscriptionDetails, EventInscription, ParticipantInscription};
