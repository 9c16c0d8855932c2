//! Utility modules
//!
//! This module contains common utilities used throughout the application,
//! including error handling, logging setup and the date source.

pub mod clock;
pub mod errors;
pub mod logging;

pub use clock::{Clock, FixedClock, SystemClock};
pub use errors::{EventDeskError, FieldErrors, Result};
