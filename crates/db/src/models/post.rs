//! Post row model and input DTOs.

use jobtrail_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `posts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Post {
    pub id: DbId,
    pub user_id: DbId,
    pub post_idea_id: Option<DbId>,
    pub content: String,
    pub status: String,
    pub scheduled_at: Option<Timestamp>,
    pub published_at: Option<Timestamp>,
    pub likes: i32,
    pub comments: i32,
    pub shares: i32,
    pub retry_count: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a post. Status is derived from `scheduled_at` by the
/// caller via the lifecycle rules, not passed in.
#[derive(Debug, Clone)]
pub struct CreatePost {
    pub post_idea_id: Option<DbId>,
    pub content: String,
    pub status: &'static str,
    pub scheduled_at: Option<Timestamp>,
}

/// DTO for partial updates; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePost {
    pub content: Option<String>,
    pub status: Option<String>,
    pub scheduled_at: Option<Timestamp>,
}

/// Optional list filters for `GET /posts`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostFilter {
    pub status: Option<String>,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
}
