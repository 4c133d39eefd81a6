//! Recruiter outreach statuses.
//!
//! A recruiter is `discovered`, then a connection request may be
//! `connection_sent`, which later resolves to `connected` or `rejected`.
//! The moment a request is sent, the Monday of that week is pinned as the
//! `connection_week` for quota accounting and never recomputed.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecruiterStatus {
    Discovered,
    ConnectionSent,
    Connected,
    Rejected,
}

impl RecruiterStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Discovered => "discovered",
            Self::ConnectionSent => "connection_sent",
            Self::Connected => "connected",
            Self::Rejected => "rejected",
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "discovered" => Ok(Self::Discovered),
            "connection_sent" => Ok(Self::ConnectionSent),
            "connected" => Ok(Self::Connected),
            "rejected" => Ok(Self::Rejected),
            other => Err(CoreError::Validation(format!(
                "Unknown recruiter status: {other}"
            ))),
        }
    }
}

/// A contact message generated for a recruiter, stored on the recruiter row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedMessage {
    pub message: String,
    pub generated_at: crate::types::Timestamp,
    pub used: bool,
}
