//! Test context for unified test setup
//!
//! Wires the services to a test database with a fixed "today", so date
//! validation does not depend on when the suite runs.

use chrono::NaiveDate;
use event_desk::database::{DatabaseService, RecordCounts};
use event_desk::services::ServiceFactory;
use event_desk::utils::clock::FixedClock;
use std::sync::Arc;

use super::database_helper::{TestDatabase, TestError};

/// The date services treat as today
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, 1, 15).expect("valid date")
}

pub const TODAY: &str = "2030-01-15";
pub const YESTERDAY: &str = "2030-01-14";

/// Unified test context that manages all test components
pub struct TestContext {
    pub database: TestDatabase,
    pub services: ServiceFactory,
    /// Direct repository access for assertions that bypass the services
    pub db: DatabaseService,
}

impl TestContext {
    pub async fn new() -> Result<Self, TestError> {
        let database = TestDatabase::new().await?;
        let services = ServiceFactory::with_clock(
            database.pool.clone(),
            Arc::new(FixedClock::new(today())),
        );
        let db = DatabaseService::new(database.pool.clone());

        Ok(Self { database, services, db })
    }

    pub async fn counts(&self) -> RecordCounts {
        self.database.count_records().await.expect("Failed to count records")
    }

    /// Create an event that must pass validation and return its id
    pub async fn event(&self, title: &str, event_date: &str) -> i64 {
        let response = self
            .services
            .event_service
            .create_event(title, event_date, "Test event description")
            .await;
        assert!(response.is_success(), "event setup failed: {:?}", response);
        response.payload.expect("created event payload").event_id
    }

    /// Create a participant that must pass validation and return its id
    pub async fn participant(&self, name: &str, email: &str) -> i64 {
        let response = self
            .services
            .participant_service
            .create_participant(name, email)
            .await;
        assert!(response.is_success(), "participant setup failed: {:?}", response);
        response.payload.expect("created participant payload").participant_id
    }

    /// Register a participant for an event and return the inscription id
    pub async fn inscription(&self, event_id: i64, participant_id: i64) -> i64 {
        let response = self
            .services
            .inscription_service
            .create_inscription(&event_id.to_string(), &participant_id.to_string())
            .await;
        assert!(response.is_success(), "inscription setup failed: {:?}", response);
        response.payload.expect("created inscription payload").inscription_id
    }
}

/// Environment variables that make a missing database a test failure
pub const REQUIRE_DATABASE_VARS: [&str; 3] = ["TEST_DATABASE_URL", "EVENT_DESK_REQUIRE_TEST_DB", "CI"];

/// Whether the integration suite must run, given a lookup for set variables
pub fn database_required(is_set: impl Fn(&str) -> bool) -> bool {
    REQUIRE_DATABASE_VARS.iter().any(|name| is_set(name))
}

/// Build a context, or skip the calling test when no database can be reached.
///
/// Skipping is only allowed on a developer machine: with `TEST_DATABASE_URL`,
/// `EVENT_DESK_REQUIRE_TEST_DB` or `CI` set, setup failures panic.
pub async fn setup_test() -> Option<TestContext> {
    match TestContext::new().await {
        Ok(ctx) => Some(ctx),
        Err(e) if !database_required(|name| std::env::var_os(name).is_some()) => {
            eprintln!("SKIPPED: no test database available ({e}); set EVENT_DESK_REQUIRE_TEST_DB=1 to fail instead");
            None
        }
        Err(e) => panic!("Failed to set up test database: {e}"),
    }
}
