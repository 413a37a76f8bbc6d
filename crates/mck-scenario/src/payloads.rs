//! Request payloads for every endpoint the scenario exercises.
//!
//! Field names match the MindCare wire format exactly; serde derives the
//! JSON bodies. Dates computed per run (medication schedule, appointment
//! time) are chrono values; fixed values stay as the strings the API
//! expects.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
    pub full_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Full profile replacement (PUT semantics: every field is sent).
#[derive(Debug, Clone, Serialize)]
pub struct ProfileUpdate {
    pub full_name: String,
    pub phone: String,
    pub gender: String,
    pub emergency_contact: String,
    pub medical_history: String,
    pub psychiatric_history: String,
    pub date_of_birth: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewMedication {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub time_to_take: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub refill_date: NaiveDate,
    pub doctor_name: String,
    pub doctor_contact: String,
    pub notes: String,
    pub reminder_enabled: bool,
}

/// Partial update: only the notes field.
#[derive(Debug, Clone, Serialize)]
pub struct MedicationPatch {
    pub notes: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewAppointment {
    pub title: String,
    pub description: String,
    pub doctor_name: String,
    pub location: String,
    /// Naive UTC timestamp, truncated to whole seconds.
    pub appointment_date: NaiveDateTime,
    /// Minutes before the appointment to send a reminder.
    pub reminder_time: u32,
}

/// Status transition, e.g. `"completed"`.
#[derive(Debug, Clone, Serialize)]
pub struct AppointmentPatch {
    pub status: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub category: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewReply {
    pub content: String,
}
