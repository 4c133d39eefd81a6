//! Post idea row model and input DTOs.

use jobtrail_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `post_ideas` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PostIdea {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub status: String,
    /// Ids of posts that consumed this idea (JSONB array of numbers).
    pub used_in_post_ids: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an idea.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePostIdea {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// DTO for partial updates; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePostIdea {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub status: Option<String>,
}

/// Optional list filters for `GET /post-ideas`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostIdeaFilter {
    pub status: Option<String>,
    pub tag: Option<String>,
}
