//! Appointment row model and input DTOs.

use jobtrail_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `appointments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Appointment {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub description: String,
    /// `interview` or `study_session`.
    pub kind: String,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub all_day: bool,
    pub job_opportunity_id: Option<DbId>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub attendees: Vec<String>,
    pub notification_sent: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an appointment.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAppointment {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub kind: String,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    #[serde(default)]
    pub all_day: bool,
    pub job_opportunity_id: Option<DbId>,
    pub company: Option<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub attendees: Vec<String>,
}

/// DTO for partial updates; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAppointment {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_time: Option<Timestamp>,
    pub end_time: Option<Timestamp>,
    pub all_day: Option<bool>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub attendees: Option<Vec<String>>,
    pub notification_sent: Option<bool>,
}

/// Optional list filters for `GET /appointments`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppointmentFilter {
    pub kind: Option<String>,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
}
