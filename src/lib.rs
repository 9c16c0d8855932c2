//! EventDesk
//!
//! Event management back end: events, participants, and the inscriptions
//! linking them. This library provides the storage layer, validation, and
//! services that report every outcome through a uniform response envelope.

pub mod config;
pub mod database;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{EventDeskError, Result};

// Re-export main components for easy access
pub use database::DatabaseService;
pub use services::{ServiceFactory, ServiceResponse};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
