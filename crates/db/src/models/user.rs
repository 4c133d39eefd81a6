//! User row model, the sanitized profile view, and input DTOs.

use jobtrail_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// A row from the `users` table. Never serialized to clients directly --
/// use [`UserProfile`] so the password hash cannot leak.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub timezone: String,
    pub skills: Vec<String>,
    pub target_industries: Vec<String>,
    pub target_regions: Vec<String>,
    pub weekly_connection_limit: i32,
    pub week_start_date: Timestamp,
    pub notifications: serde_json::Value,
    pub linkedin_connected: bool,
    pub linkedin_access_token: Option<String>,
    pub linkedin_refresh_token: Option<String>,
    pub linkedin_expires_at: Option<Timestamp>,
    pub linkedin_member_id: Option<String>,
    pub linkedin_profile_url: Option<String>,
    pub linkedin_ssi_score: Option<i32>,
    pub linkedin_ssi_updated_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// UserProfile (sanitized view)
// ---------------------------------------------------------------------------

/// The user as returned to the client: the row minus the password hash and
/// minus raw (even encrypted) OAuth token material.
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub id: DbId,
    pub email: String,
    pub name: String,
    pub timezone: String,
    pub skills: Vec<String>,
    pub target_industries: Vec<String>,
    pub target_regions: Vec<String>,
    pub weekly_connection_limit: i32,
    pub week_start_date: Timestamp,
    pub notifications: serde_json::Value,
    pub linkedin: LinkedInIntegrationView,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Client-facing view of the LinkedIn integration record.
#[derive(Debug, Clone, Serialize)]
pub struct LinkedInIntegrationView {
    pub connected: bool,
    pub expires_at: Option<Timestamp>,
    pub profile_url: Option<String>,
    pub ssi_score: Option<i32>,
    pub ssi_updated_at: Option<Timestamp>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            timezone: user.timezone,
            skills: user.skills,
            target_industries: user.target_industries,
            target_regions: user.target_regions,
            weekly_connection_limit: user.weekly_connection_limit,
            week_start_date: user.week_start_date,
            notifications: user.notifications,
            linkedin: LinkedInIntegrationView {
                connected: user.linkedin_connected,
                expires_at: user.linkedin_expires_at,
                profile_url: user.linkedin_profile_url,
                ssi_score: user.linkedin_ssi_score,
                ssi_updated_at: user.linkedin_ssi_updated_at,
            },
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// DTO for inserting a new user at registration.
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Already lowercased by the caller.
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub timezone: String,
    pub week_start_date: Timestamp,
    pub notifications: serde_json::Value,
}

/// DTO for partial profile/settings updates; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserSettings {
    pub name: Option<String>,
    pub timezone: Option<String>,
    pub skills: Option<Vec<String>>,
    pub target_industries: Option<Vec<String>>,
    pub target_regions: Option<Vec<String>>,
    pub weekly_connection_limit: Option<i32>,
    pub notifications: Option<serde_json::Value>,
}

/// DTO applied when a LinkedIn account is connected. Token fields hold the
/// encrypted blobs, never plaintext.
#[derive(Debug, Clone)]
pub struct ConnectLinkedIn {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: Option<Timestamp>,
    pub member_id: Option<String>,
    pub profile_url: Option<String>,
}

/// Default notification preferences for a new account.
pub fn default_notifications(email: &str) -> serde_json::Value {
    serde_json::json!({
        "email": { "enabled": true, "address": email },
        "desktop": { "enabled": false },
        "appointment_reminder": { "enabled": true, "minutes_before": 60 }
    })
}
