//! The appointment record and its id-less draft.

use crate::state::Persistent;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Storage key holding the whole appointment collection
pub const APPOINTMENTS_KEY: &str = "appointments";

/// A stored appointment. Immutable once created.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Appointment {
    pub id: String,
    pub title: String,
    /// YYYY-MM-DD
    pub date: String,
    /// HH:MM, 24-hour
    pub time: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Appointment fields as captured by the form or the smart parser
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct AppointmentDraft {
    pub title: String,
    pub date: String,
    pub time: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Appointment {
    /// Turn a draft into a record with a fresh id
    pub fn from_draft(draft: AppointmentDraft) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: draft.title.trim().to_string(),
            date: draft.date.trim().to_string(),
            time: draft.time.trim().to_string(),
            location: draft.location.trim().to_string(),
            notes: draft.notes.map(|n| n.trim().to_string()).filter(|n| !n.is_empty()),
        }
    }

    /// Date and time combined into one instant, if both parse
    pub fn starts_at(&self) -> Option<NaiveDateTime> {
        let date = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()?;
        let time = NaiveTime::parse_from_str(&self.time, "%H:%M").ok()?;
        Some(date.and_time(time))
    }
}

impl Persistent for Appointment {
    fn key() -> &'static str {
        APPOINTMENTS_KEY
    }
}

/// Sort ascending by start instant.
///
/// Stable, so equal instants keep insertion order. Records with an
/// unreadable date or time go last.
pub fn sort_chronologically(appointments: &mut [Appointment]) {
    appointments.sort_by_key(|a| {
        let start = a.starts_at();
        (start.is_none(), start)
    });
}
