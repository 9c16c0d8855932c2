//! Database service layer
//!
//! This module bundles the repositories over one pool and hands out
//! transactions for the operations that check before they write.

use serde::Serialize;
use sqlx::{Postgres, Transaction};
use crate::database::repositories::storage_failure;
use crate::database::{DatabasePool, EventRepository, ParticipantRepository, InscriptionRepository};
use crate::utils::errors::EventDeskError;

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub events: EventRepository,
    pub participants: ParticipantRepository,
    pub inscriptions: InscriptionRepository,
    pool: DatabasePool,
}

/// Number of stored rows per table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecordCounts {
    pub events: i64,
    pub participants: i64,
    pub inscriptions: i64,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            events: EventRepository::new(pool.clone()),
            participants: ParticipantRepository::new(pool.clone()),
            inscriptions: InscriptionRepository::new(pool.clone()),
            pool,
        }
    }

    pub fn pool(&self) -> &DatabasePool {
        &self.pool
    }

    /// Start a transaction; dropping it without `commit` rolls back
    pub async fn begin(&self) -> Result<Transaction<'static, Postgres>, EventDeskError> {
        self.pool
            .begin()
            .await
            .map_err(storage_failure("begin", "-", "starting a transaction"))
    }

    /// Commit a transaction opened with [`DatabaseService::begin`]
    pub async fn commit(&self, tx: Transaction<'static, Postgres>) -> Result<(), EventDeskError> {
        tx.commit()
            .await
            .map_err(storage_failure("commit", "-", "saving the changes"))
    }

    /// Get row counts for all tables
    pub async fn counts(&self) -> Result<RecordCounts, EventDeskError> {
        Ok(RecordCounts {
            events: self.events.count().await?,
            participants: self.participants.count().await?,
            inscriptions: self.inscriptions.count().await?,
        })
    }
}
