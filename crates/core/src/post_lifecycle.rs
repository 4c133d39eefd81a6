//! LinkedIn post lifecycle: `draft -> scheduled -> published`, with
//! `scheduled -> failed` on a failed publish attempt and `failed -> scheduled`
//! on retry.
//!
//! The retry transition is the only guarded one: it requires the post to be
//! exactly `failed` and under the retry cap. The publish collaborator, not
//! the retry transition, increments `retry_count`.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Maximum publish attempts before a failed post can no longer be retried.
pub const MAX_RETRY_COUNT: i32 = 3;

/// Maximum post content length in characters.
pub const MAX_CONTENT_LENGTH: usize = 3000;

/// Lifecycle status of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
    Draft,
    Scheduled,
    Published,
    Failed,
}

impl PostStatus {
    /// Database string for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Scheduled => "scheduled",
            Self::Published => "published",
            Self::Failed => "failed",
        }
    }

    /// Parse a status string; unknown values are a validation error.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "draft" => Ok(Self::Draft),
            "scheduled" => Ok(Self::Scheduled),
            "published" => Ok(Self::Published),
            "failed" => Ok(Self::Failed),
            other => Err(CoreError::Validation(format!(
                "Unknown post status: {other}"
            ))),
        }
    }
}

/// Status a new post is created in: `scheduled` when a publish time is
/// provided up front, else `draft`.
pub fn initial_status(has_scheduled_at: bool) -> PostStatus {
    if has_scheduled_at {
        PostStatus::Scheduled
    } else {
        PostStatus::Draft
    }
}

/// Check that a failed post may be retried.
///
/// Fails unless the current status is exactly `failed` and the retry count is
/// below [`MAX_RETRY_COUNT`]. On success the caller resets the status to
/// `scheduled`; `retry_count` is left untouched here.
pub fn check_retry(status: PostStatus, retry_count: i32) -> Result<(), CoreError> {
    if status != PostStatus::Failed {
        return Err(CoreError::Validation(
            "Only failed posts can be retried".into(),
        ));
    }
    if retry_count >= MAX_RETRY_COUNT {
        return Err(CoreError::Validation(
            "Maximum retry attempts reached".into(),
        ));
    }
    Ok(())
}

/// Validate post content length (1..=3000 characters).
pub fn validate_content(content: &str) -> Result<(), CoreError> {
    let len = content.chars().count();
    if len == 0 {
        return Err(CoreError::Validation(
            "Content must be at least 1 characters".into(),
        ));
    }
    if len > MAX_CONTENT_LENGTH {
        return Err(CoreError::Validation(format!(
            "Content must be at most {MAX_CONTENT_LENGTH} characters"
        )));
    }
    Ok(())
}
