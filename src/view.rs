//! Terminal rendering for the form and the appointment list.

use crate::appointment::Appointment;
use crate::form::AppointmentForm;
use crate::messages;
use chrono::NaiveDate;
use std::fmt::Write;

pub const HELP: &str = "Available commands:
  <description>            Smart-parse a free-text description into the form
  smart <description>      Same, explicitly
  set <field> <value>      Set title, date, time, location or notes
                           (date YYYY-MM-DD, time HH:MM)
  here                     Fill location from the current position
  form                     Show the form
  submit                   Save the form as a new appointment
  clear                    Reset the form
  list                     Show appointments in chronological order
  delete <id>              Delete an appointment
  help                     Show this help
  exit                     Quit";

/// Long date with weekday, falling back to the stored text
pub fn format_date(date: &str) -> String {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|d| d.format("%A, %-d %B %Y").to_string())
        .unwrap_or_else(|_| date.to_string())
}

pub fn render_appointment(appointment: &Appointment) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "■ {}", appointment.title);
    let _ = writeln!(out, "  📅 {}", format_date(&appointment.date));
    let _ = writeln!(out, "  🕒 {}", appointment.time);
    let _ = writeln!(out, "  📍 {}", appointment.location);
    if let Some(notes) = &appointment.notes {
        let _ = writeln!(out, "  📝 {}", notes);
    }
    let _ = write!(out, "  id: {}", appointment.id);
    out
}

/// Render appointments in the order given; callers pass them sorted
pub fn render_list(appointments: &[Appointment]) -> String {
    if appointments.is_empty() {
        return format!("{}\n\n{}\n{}", messages::LIST_HEADING, messages::LIST_EMPTY, messages::LIST_EMPTY_HINT);
    }
    let items: Vec<String> = appointments.iter().map(render_appointment).collect();
    format!("{}\n\n{}", messages::LIST_HEADING, items.join("\n\n"))
}

pub fn render_form(form: &AppointmentForm) -> String {
    let show = |value: &str| if value.is_empty() { "-".to_string() } else { value.to_string() };
    let mut out = String::new();
    let _ = writeln!(out, "{}", messages::FORM_HEADING);
    let _ = writeln!(out, "  title:    {}", show(&form.title));
    let _ = writeln!(out, "  date:     {}", show(&form.date));
    let _ = writeln!(out, "  time:     {}", show(&form.time));
    let _ = writeln!(out, "  location: {}", show(&form.location));
    let _ = write!(out, "  notes:    {}", show(&form.notes));
    if let Some(error) = form.error() {
        let _ = write!(out, "\n⚠ {}", error);
    }
    out
}
