//! Recruiter row model and input DTOs.

use jobtrail_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `recruiters` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Recruiter {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub company: String,
    pub location: String,
    pub industry: Option<String>,
    pub linkedin_profile_url: String,
    pub status: String,
    pub discovered_at: Timestamp,
    pub connection_sent_at: Option<Timestamp>,
    pub connected_at: Option<Timestamp>,
    pub rejected_at: Option<Timestamp>,
    /// Monday of the week the connection request went out, pinned when the
    /// status became `connection_sent`.
    pub connection_week: Option<Timestamp>,
    /// `[{message, generated_at, used}, ...]`
    pub generated_messages: serde_json::Value,
    pub notes: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a recruiter.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRecruiter {
    pub name: String,
    pub company: String,
    #[serde(default)]
    pub location: String,
    pub industry: Option<String>,
    pub linkedin_profile_url: String,
    #[serde(default)]
    pub notes: String,
}

/// DTO for partial updates; status changes go through `update_status`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateRecruiter {
    pub name: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub industry: Option<String>,
    pub notes: Option<String>,
}

/// Optional list filters for `GET /recruiters`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecruiterFilter {
    pub status: Option<String>,
}
