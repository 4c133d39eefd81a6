//! Repository for the `post_ideas` table.

use jobtrail_core::types::DbId;
use sqlx::PgPool;

use crate::models::post_idea::{CreatePostIdea, PostIdea, PostIdeaFilter, UpdatePostIdea};

/// Column list for `post_ideas` queries.
const COLUMNS: &str =
    "id, user_id, title, description, tags, status, used_in_post_ids, created_at, updated_at";

/// Provides CRUD operations for post ideas.
pub struct PostIdeaRepo;

impl PostIdeaRepo {
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreatePostIdea,
    ) -> Result<PostIdea, sqlx::Error> {
        let query = format!(
            "INSERT INTO post_ideas (user_id, title, description, tags) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PostIdea>(&query)
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.tags)
            .fetch_one(pool)
            .await
    }

    /// List ideas, optionally filtered by status and tag, newest first.
    pub async fn list(
        pool: &PgPool,
        user_id: DbId,
        filter: &PostIdeaFilter,
    ) -> Result<Vec<PostIdea>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM post_ideas \
             WHERE user_id = $1 \
               AND ($2::text IS NULL OR status = $2) \
               AND ($3::text IS NULL OR $3 = ANY(tags)) \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, PostIdea>(&query)
            .bind(user_id)
            .bind(&filter.status)
            .bind(&filter.tag)
            .fetch_all(pool)
            .await
    }

    pub async fn find(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<PostIdea>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM post_ideas WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, PostIdea>(&query)
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
        patch: &UpdatePostIdea,
    ) -> Result<Option<PostIdea>, sqlx::Error> {
        let query = format!(
            "UPDATE post_ideas SET \
                title = COALESCE($3, title), \
                description = COALESCE($4, description), \
                tags = COALESCE($5, tags), \
                status = COALESCE($6, status), \
                updated_at = NOW() \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PostIdea>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&patch.title)
            .bind(&patch.description)
            .bind(&patch.tags)
            .bind(&patch.status)
            .fetch_optional(pool)
            .await
    }

    /// Returns `true` when a row was deleted.
    pub async fn delete(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM post_ideas WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Mark an idea consumed by a post: status `used` plus a set-append of
    /// the post id, in one atomic statement (the `@>` guard gives
    /// `$addToSet` semantics, so re-linking the same post is a no-op).
    pub async fn mark_used(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        post_id: DbId,
    ) -> Result<Option<PostIdea>, sqlx::Error> {
        let post_id_json = serde_json::json!(post_id);
        let query = format!(
            "UPDATE post_ideas SET \
                status = 'used', \
                used_in_post_ids = CASE \
                    WHEN used_in_post_ids @> $3::jsonb THEN used_in_post_ids \
                    ELSE used_in_post_ids || $3::jsonb \
                END, \
                updated_at = NOW() \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PostIdea>(&query)
            .bind(id)
            .bind(user_id)
            .bind(post_id_json)
            .fetch_optional(pool)
            .await
    }
}
