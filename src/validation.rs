//! Validation functions for appointment data.
//
// Dates are `YYYY-MM-DD`, times are 24-hour `HH:MM`. Anything stored must pass
// these checks so chronological sorting never has to guess.

use crate::appointment::AppointmentDraft;
use crate::error::ValidationError;
use chrono::{NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date regex"));
static TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,2}:\d{2}$").expect("valid time regex"));

/// Validate date string has format YYYY-MM-DD and names a real day
pub fn validate_date_format(date: &str) -> bool {
    DATE_RE.is_match(date) && NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok()
}

/// Validate time string has format HH:MM (a single-digit hour is tolerated)
pub fn validate_time_format(time: &str) -> bool {
    normalize_time(time).is_some()
}

/// Zero-pad a valid 24-hour time, e.g. `9:05` becomes `09:05`
pub fn normalize_time(time: &str) -> Option<String> {
    let time = time.trim();
    if !TIME_RE.is_match(time) {
        return None;
    }
    NaiveTime::parse_from_str(time, "%H:%M")
        .ok()
        .map(|t| t.format("%H:%M").to_string())
}

/// Names of the required fields that are blank
pub fn missing_required_fields(draft: &AppointmentDraft) -> Vec<&'static str> {
    [
        ("title", &draft.title),
        ("date", &draft.date),
        ("time", &draft.time),
        ("location", &draft.location),
    ]
    .into_iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(name, _)| name)
    .collect()
}

/// Check a draft before it becomes an appointment
pub fn validate_draft(draft: &AppointmentDraft) -> Result<(), ValidationError> {
    let missing = missing_required_fields(draft);
    if !missing.is_empty() {
        return Err(ValidationError::MissingFields(missing));
    }
    if !validate_date_format(draft.date.trim()) {
        return Err(ValidationError::InvalidDate(draft.date.clone()));
    }
    if !validate_time_format(&draft.time) {
        return Err(ValidationError::InvalidTime(draft.time.clone()));
    }
    Ok(())
}
