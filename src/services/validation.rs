//! Field validation shared by the services
//!
//! Every rule runs on every field so a form can show all of its problems at
//! once. Lengths are counted in characters, matching `VARCHAR(255)`.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use crate::models::event::CreateEventRequest;
use crate::models::participant::CreateParticipantRequest;
use crate::utils::errors::FieldErrors;

pub const MAX_FIELD_LENGTH: usize = 255;
pub const MAX_EMAIL_LOCAL_LENGTH: usize = 64;

pub const FIELD_TITLE: &str = "titre";
pub const FIELD_EVENT_DATE: &str = "date_evenement";
pub const FIELD_DESCRIPTION: &str = "description";
pub const FIELD_NAME: &str = "nom";
pub const FIELD_EMAIL: &str = "email";
pub const FIELD_EVENT_ID: &str = "event_id";
pub const FIELD_PARTICIPANT_ID: &str = "participant_id";

const DATE_FORMAT: &str = "%Y-%m-%d";

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*@[A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?(\.[A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$"#,
    )
    .expect("email pattern is valid")
});

/// Validate the three event fields against `today`
pub fn validate_event(
    title: &str,
    event_date: &str,
    description: &str,
    today: NaiveDate,
) -> Result<CreateEventRequest, FieldErrors> {
    let mut errors = FieldErrors::new();

    if title.is_empty() {
        errors.insert(FIELD_TITLE.to_string(), "Title is required.".to_string());
    } else if title.chars().count() > MAX_FIELD_LENGTH {
        errors.insert(FIELD_TITLE.to_string(), "Title must not exceed 255 characters.".to_string());
    }

    let parsed_date = if event_date.is_empty() {
        errors.insert(FIELD_EVENT_DATE.to_string(), "Date is required.".to_string());
        None
    } else {
        match parse_strict_date(event_date) {
            None => {
                errors.insert(
                    FIELD_EVENT_DATE.to_string(),
                    "Invalid date format. Use YYYY-MM-DD.".to_string(),
                );
                None
            }
            Some(date) if date < today => {
                errors.insert(FIELD_EVENT_DATE.to_string(), "Date cannot be in the past.".to_string());
                None
            }
            Some(date) => Some(date),
        }
    };

    if description.is_empty() {
        errors.insert(FIELD_DESCRIPTION.to_string(), "Description is required.".to_string());
    }

    match parsed_date {
        Some(event_date) if errors.is_empty() => Ok(CreateEventRequest {
            title: title.to_string(),
            event_date,
            description: description.to_string(),
        }),
        _ => Err(errors),
    }
}

/// Validate participant name and email syntax; uniqueness is checked against storage
pub fn validate_participant(name: &str, email: &str) -> Result<CreateParticipantRequest, FieldErrors> {
    let mut errors = FieldErrors::new();

    if name.is_empty() {
        errors.insert(FIELD_NAME.to_string(), "Name is required.".to_string());
    } else if name.chars().count() > MAX_FIELD_LENGTH {
        errors.insert(FIELD_NAME.to_string(), "Name must not exceed 255 characters.".to_string());
    }

    if email.is_empty() {
        errors.insert(FIELD_EMAIL.to_string(), "Email is required.".to_string());
    } else if !is_valid_email(email) {
        errors.insert(FIELD_EMAIL.to_string(), "Invalid email format.".to_string());
    } else if email.chars().count() > MAX_FIELD_LENGTH {
        errors.insert(FIELD_EMAIL.to_string(), "Email must not exceed 255 characters.".to_string());
    }

    if errors.is_empty() {
        Ok(CreateParticipantRequest {
            name: name.to_string(),
            email: email.to_string(),
        })
    } else {
        Err(errors)
    }
}

/// Parse a `YYYY-MM-DD` date, rejecting anything that does not format back identically
pub fn parse_strict_date(input: &str) -> Option<NaiveDate> {
    let date = NaiveDate::parse_from_str(input, DATE_FORMAT).ok()?;
    (date.format(DATE_FORMAT).to_string() == input).then_some(date)
}

/// Mailbox syntax check; the local part is limited to 64 characters
pub fn is_valid_email(email: &str) -> bool {
    let local_fits = email
        .split_once('@')
        .is_some_and(|(local, _)| local.len() <= MAX_EMAIL_LOCAL_LENGTH);
    local_fits && EMAIL_RE.is_match(email)
}

/// Parse a form-supplied row id: digits only, strictly positive
pub fn parse_reference_id(input: &str) -> Option<i64> {
    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    input.parse::<i64>().ok().filter(|id| *id > 0)
}
