//! Job opportunity row model and input DTOs.

use jobtrail_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `job_opportunities` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct JobOpportunity {
    pub id: DbId,
    pub user_id: DbId,
    pub company: String,
    pub position: String,
    pub description: String,
    pub stage: String,
    /// Append-only audit log: `[{stage, timestamp, notes?}, ...]`.
    pub stage_history: serde_json::Value,
    pub contact_email: Option<String>,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub recruiter_id: Option<DbId>,
    pub job_posting_url: Option<String>,
    pub company_website: Option<String>,
    pub notes: String,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub salary_currency: Option<String>,
    pub location: Option<String>,
    pub remote_type: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an opportunity. The stage is always `initial_contacts`;
/// the seed history entry is built by the repository.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateJobOpportunity {
    pub company: String,
    pub position: String,
    #[serde(default)]
    pub description: String,
    pub contact_email: Option<String>,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub recruiter_id: Option<DbId>,
    pub job_posting_url: Option<String>,
    pub company_website: Option<String>,
    #[serde(default)]
    pub notes: String,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub salary_currency: Option<String>,
    pub location: Option<String>,
    pub remote_type: Option<String>,
}

/// DTO for partial updates of mutable fields; stage changes go through
/// `update_stage`, never through this patch.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateJobOpportunity {
    pub company: Option<String>,
    pub position: Option<String>,
    pub description: Option<String>,
    pub contact_email: Option<String>,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub recruiter_id: Option<DbId>,
    pub job_posting_url: Option<String>,
    pub company_website: Option<String>,
    pub notes: Option<String>,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub salary_currency: Option<String>,
    pub location: Option<String>,
    pub remote_type: Option<String>,
}
