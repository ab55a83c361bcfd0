//! In-memory appointment collection, kept in insertion order.

use crate::appointment::{sort_chronologically, Appointment, AppointmentDraft};
use log::debug;

#[derive(Debug, Default, Clone)]
pub struct AppointmentBook {
    appointments: Vec<Appointment>,
}

impl AppointmentBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap records loaded from storage
    pub fn from_records(appointments: Vec<Appointment>) -> Self {
        Self { appointments }
    }

    /// Store a draft under a fresh id
    pub fn add(&mut self, draft: AppointmentDraft) -> Appointment {
        let appointment = Appointment::from_draft(draft);
        debug!("Adding appointment {} ({})", appointment.id, appointment.title);
        self.appointments.push(appointment.clone());
        appointment
    }

    /// Delete by id. Absent ids are ignored; returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.appointments.len();
        self.appointments.retain(|a| a.id != id);
        let removed = self.appointments.len() != before;
        if !removed {
            debug!("No appointment with id {}", id);
        }
        removed
    }

    pub fn list(&self) -> &[Appointment] {
        &self.appointments
    }

    /// Copy of the collection in display order
    pub fn sorted(&self) -> Vec<Appointment> {
        let mut sorted = self.appointments.clone();
        sort_chronologically(&mut sorted);
        sorted
    }

    pub fn get(&self, id: &str) -> Option<&Appointment> {
        self.appointments.iter().find(|a| a.id == id)
    }

    pub fn len(&self) -> usize {
        self.appointments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.appointments.is_empty()
    }
}
