//! Test helpers module
//!
//! Database setup and a service context shared by the integration tests.

#![allow(dead_code)]

pub mod database_helper;
pub mod test_context;

pub use database_helper::*;
pub use test_context::*;
