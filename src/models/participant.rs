//! Participant model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Participant {
    pub id: i64,
    #[serde(rename = "nom")]
    #[sqlx(rename = "nom")]
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateParticipantRequest {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateParticipantRequest {
    pub name: String,
    pub email: String,
}

impl From<CreateParticipantRequest> for UpdateParticipantRequest {
    fn from(request: CreateParticipantRequest) -> Self {
        Self {
            name: request.name,
            email: request.email,
        }
    }
}
