//! Repository for the `posts` table.

use jobtrail_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::post::{CreatePost, Post, PostFilter, UpdatePost};

/// Column list for `posts` queries.
const COLUMNS: &str = "id, user_id, post_idea_id, content, status, scheduled_at, \
    published_at, likes, comments, shares, retry_count, created_at, updated_at";

/// Provides CRUD and lifecycle operations for posts. Every query is scoped
/// to the owning user; a wrong-owner id behaves exactly like a missing row.
pub struct PostRepo;

impl PostRepo {
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreatePost,
    ) -> Result<Post, sqlx::Error> {
        let query = format!(
            "INSERT INTO posts (user_id, post_idea_id, content, status, scheduled_at) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(user_id)
            .bind(input.post_idea_id)
            .bind(&input.content)
            .bind(input.status)
            .bind(input.scheduled_at)
            .fetch_one(pool)
            .await
    }

    /// List posts, optionally filtered by status and creation-date range,
    /// newest first.
    pub async fn list(
        pool: &PgPool,
        user_id: DbId,
        filter: &PostFilter,
    ) -> Result<Vec<Post>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM posts \
             WHERE user_id = $1 \
               AND ($2::text IS NULL OR status = $2) \
               AND ($3::timestamptz IS NULL OR created_at >= $3) \
               AND ($4::timestamptz IS NULL OR created_at <= $4) \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(user_id)
            .bind(&filter.status)
            .bind(filter.start_date)
            .bind(filter.end_date)
            .fetch_all(pool)
            .await
    }

    pub async fn find(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<Post>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM posts WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Partial update; `COALESCE` keeps fields the patch omits.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        patch: &UpdatePost,
    ) -> Result<Option<Post>, sqlx::Error> {
        let query = format!(
            "UPDATE posts SET \
                content = COALESCE($3, content), \
                status = COALESCE($4, status), \
                scheduled_at = COALESCE($5, scheduled_at), \
                updated_at = NOW() \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&patch.content)
            .bind(&patch.status)
            .bind(patch.scheduled_at)
            .fetch_optional(pool)
            .await
    }

    /// Returns `true` when a row was deleted.
    pub async fn delete(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Force status to `scheduled` with a new publish time. Idempotent:
    /// allowed from any prior state, and the last call's time wins.
    pub async fn schedule(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        scheduled_at: Timestamp,
    ) -> Result<Option<Post>, sqlx::Error> {
        let query = format!(
            "UPDATE posts SET \
                status = 'scheduled', \
                scheduled_at = $3, \
                updated_at = NOW() \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .bind(user_id)
            .bind(scheduled_at)
            .fetch_optional(pool)
            .await
    }

    /// Reset a failed post to `scheduled` for another publish attempt. The
    /// retry preconditions (status/retry cap) are checked by the caller.
    pub async fn reset_to_scheduled(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<Post>, sqlx::Error> {
        let query = format!(
            "UPDATE posts SET status = 'scheduled', updated_at = NOW() \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Mark a post published now.
    pub async fn mark_published(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<Post>, sqlx::Error> {
        let query = format!(
            "UPDATE posts SET \
                status = 'published', \
                published_at = NOW(), \
                updated_at = NOW() \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Record a failed publish attempt: status `failed` and the attempt
    /// counter incremented, in one statement.
    pub async fn mark_publish_failed(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<Post>, sqlx::Error> {
        let query = format!(
            "UPDATE posts SET \
                status = 'failed', \
                retry_count = retry_count + 1, \
                updated_at = NOW() \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Count posts created on/after the week boundary with status
    /// `scheduled` or `published`.
    pub async fn count_since(
        pool: &PgPool,
        user_id: DbId,
        week_start: Timestamp,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM posts \
             WHERE user_id = $1 \
               AND created_at >= $2 \
               AND status IN ('scheduled', 'published')",
        )
        .bind(user_id)
        .bind(week_start)
        .fetch_one(pool)
        .await?;
        Ok(count)
    }
}
