//! State of the "new appointment" form.
//!
//! Every operation here returns control with the form still editable:
//! failures set [`AppointmentForm::error`] and leave the fields as they were.

use crate::app::AppState;
use crate::appointment::{Appointment, AppointmentDraft};
use crate::error::ValidationError;
use crate::geolocation::{describe_position, Locator};
use crate::messages;
use crate::parser::SmartParser;
use crate::validation::{normalize_time, validate_draft};
use anyhow::{anyhow, Result};
use log::{debug, info, warn};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Date,
    Time,
    Location,
    Notes,
}

impl FromStr for Field {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "title" => Ok(Field::Title),
            "date" => Ok(Field::Date),
            "time" => Ok(Field::Time),
            "location" | "place" => Ok(Field::Location),
            "notes" | "note" => Ok(Field::Notes),
            _ => Err(anyhow!("Unknown field: {}", s)),
        }
    }
}

/// What happened to a smart parse request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmartParseOutcome {
    /// Fields were replaced by the parsed draft
    Filled,
    /// Nothing to parse; no call was made
    EmptyInput,
    /// A call is already outstanding; this one was ignored
    Busy,
    /// The parser rejected the input; fields untouched
    Failed,
}

#[derive(Debug, Default, Clone)]
pub struct AppointmentForm {
    pub title: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub notes: String,
    pub smart_input: String,
    is_parsing: bool,
    error: Option<String>,
}

impl AppointmentForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::Date => &self.date,
            Field::Time => &self.time,
            Field::Location => &self.location,
            Field::Notes => &self.notes,
        }
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Title => self.title = value,
            Field::Date => self.date = value,
            Field::Time => self.time = value,
            Field::Location => self.location = value,
            Field::Notes => self.notes = value,
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_parsing(&self) -> bool {
        self.is_parsing
    }

    /// Current field values as a draft
    pub fn draft(&self) -> AppointmentDraft {
        let notes = self.notes.trim();
        AppointmentDraft {
            title: self.title.clone(),
            date: self.date.clone(),
            time: self.time.clone(),
            location: self.location.clone(),
            notes: if notes.is_empty() { None } else { Some(notes.to_string()) },
        }
    }

    /// Replace every field with a parsed draft
    pub fn apply_draft(&mut self, draft: AppointmentDraft) {
        self.title = draft.title;
        self.date = draft.date;
        self.time = draft.time;
        self.location = draft.location;
        self.notes = draft.notes.unwrap_or_default();
    }

    pub fn clear(&mut self) {
        *self = Self { is_parsing: self.is_parsing, ..Self::default() };
    }

    /// Fill the form from `smart_input`.
    pub async fn smart_parse(&mut self, parser: &SmartParser) -> SmartParseOutcome {
        if self.is_parsing {
            debug!("Smart parse already in flight, ignoring request");
            return SmartParseOutcome::Busy;
        }
        if self.smart_input.trim().is_empty() {
            self.error = Some(messages::EMPTY_SMART_INPUT.to_string());
            return SmartParseOutcome::EmptyInput;
        }

        self.is_parsing = true;
        self.error = None;
        let result = parser.parse(&self.smart_input).await;
        self.is_parsing = false;

        match result {
            Ok(draft) => {
                self.apply_draft(draft);
                SmartParseOutcome::Filled
            }
            Err(e) => {
                self.error = Some(e.to_string());
                SmartParseOutcome::Failed
            }
        }
    }

    /// Put the current position into the location field
    pub async fn use_current_location(&mut self, locator: &dyn Locator) -> bool {
        match locator.locate().await {
            Ok(coords) => {
                self.location = describe_position(coords);
                self.error = None;
                true
            }
            Err(e) => {
                warn!("Geolocation failed: {:?}", e);
                self.error = Some(e.to_string());
                false
            }
        }
    }

    /// Validate and store the form, then clear it.
    ///
    /// On failure nothing is stored and the fields stay as typed.
    pub fn submit(&mut self, state: &mut AppState) -> Result<Appointment, ValidationError> {
        let mut draft = self.draft();
        if let Err(e) = validate_draft(&draft) {
            debug!("Rejected submission: {:?}", e);
            self.error = Some(e.to_string());
            return Err(e);
        }
        // Stored times are always zero-padded HH:MM
        if let Some(time) = normalize_time(&draft.time) {
            draft.time = time;
        }

        let appointment = state.add(draft);
        info!("Added appointment {}", appointment.id);
        self.clear();
        Ok(appointment)
    }
}
