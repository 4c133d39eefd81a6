//! Repository for the `recruiters` table.

use jobtrail_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::recruiter::{CreateRecruiter, Recruiter, RecruiterFilter, UpdateRecruiter};

/// Column list for `recruiters` queries.
const COLUMNS: &str = "id, user_id, name, company, location, industry, \
    linkedin_profile_url, status, discovered_at, connection_sent_at, connected_at, \
    rejected_at, connection_week, generated_messages, notes, created_at, updated_at";

/// Provides CRUD, status-transition, and quota-count operations for recruiters.
pub struct RecruiterRepo;

impl RecruiterRepo {
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateRecruiter,
    ) -> Result<Recruiter, sqlx::Error> {
        let query = format!(
            "INSERT INTO recruiters \
                (user_id, name, company, location, industry, linkedin_profile_url, notes) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Recruiter>(&query)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.company)
            .bind(&input.location)
            .bind(&input.industry)
            .bind(&input.linkedin_profile_url)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        user_id: DbId,
        filter: &RecruiterFilter,
    ) -> Result<Vec<Recruiter>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM recruiters \
             WHERE user_id = $1 AND ($2::text IS NULL OR status = $2) \
             ORDER BY discovered_at DESC"
        );
        sqlx::query_as::<_, Recruiter>(&query)
            .bind(user_id)
            .bind(&filter.status)
            .fetch_all(pool)
            .await
    }

    pub async fn find(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<Recruiter>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM recruiters WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Recruiter>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Looks up a recruiter by LinkedIn profile URL, for friendly duplicate
    /// detection ahead of the unique constraint.
    pub async fn find_by_profile_url(
        pool: &PgPool,
        user_id: DbId,
        profile_url: &str,
    ) -> Result<Option<Recruiter>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM recruiters \
             WHERE user_id = $1 AND linkedin_profile_url = $2"
        );
        sqlx::query_as::<_, Recruiter>(&query)
            .bind(user_id)
            .bind(profile_url)
            .fetch_optional(pool)
            .await
    }

    /// Partial update of descriptive fields; `COALESCE` keeps fields the
    /// patch omits.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        patch: &UpdateRecruiter,
    ) -> Result<Option<Recruiter>, sqlx::Error> {
        let query = format!(
            "UPDATE recruiters SET \
                name = COALESCE($3, name), \
                company = COALESCE($4, company), \
                location = COALESCE($5, location), \
                industry = COALESCE($6, industry), \
                notes = COALESCE($7, notes), \
                updated_at = NOW() \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Recruiter>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&patch.name)
            .bind(&patch.company)
            .bind(&patch.location)
            .bind(&patch.industry)
            .bind(&patch.notes)
            .fetch_optional(pool)
            .await
    }

    /// Moves a recruiter to `status`, stamping the matching timestamp column.
    /// `week_start` is the Monday to pin when the status becomes
    /// `connection_sent`; it is ignored for other statuses. An already-set
    /// `connection_sent_at` / `connection_week` is never overwritten, so the
    /// pinned week survives later transitions.
    pub async fn update_status(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        status: &str,
        week_start: Timestamp,
    ) -> Result<Option<Recruiter>, sqlx::Error> {
        let query = format!(
            "UPDATE recruiters SET \
                status = $3, \
                connection_sent_at = CASE \
                    WHEN $3 = 'connection_sent' AND connection_sent_at IS NULL THEN NOW() \
                    ELSE connection_sent_at END, \
                connection_week = CASE \
                    WHEN $3 = 'connection_sent' AND connection_week IS NULL THEN $4 \
                    ELSE connection_week END, \
                connected_at = CASE \
                    WHEN $3 = 'connected' AND connected_at IS NULL THEN NOW() \
                    ELSE connected_at END, \
                rejected_at = CASE \
                    WHEN $3 = 'rejected' AND rejected_at IS NULL THEN NOW() \
                    ELSE rejected_at END, \
                updated_at = NOW() \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Recruiter>(&query)
            .bind(id)
            .bind(user_id)
            .bind(status)
            .bind(week_start)
            .fetch_optional(pool)
            .await
    }

    /// Replaces the stored generated-message array.
    pub async fn set_generated_messages(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        messages: &serde_json::Value,
    ) -> Result<Option<Recruiter>, sqlx::Error> {
        let query = format!(
            "UPDATE recruiters SET generated_messages = $3, updated_at = NOW() \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Recruiter>(&query)
            .bind(id)
            .bind(user_id)
            .bind(messages)
            .fetch_optional(pool)
            .await
    }

    /// Counts connection requests pinned to the week starting at
    /// `week_start`. Rows keep their original week even if the status later
    /// moves on, so this matches on the pinned value exactly.
    pub async fn count_connections_in_week(
        pool: &PgPool,
        user_id: DbId,
        week_start: Timestamp,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM recruiters WHERE user_id = $1 AND connection_week = $2",
        )
        .bind(user_id)
        .bind(week_start)
        .fetch_one(pool)
        .await?;
        Ok(count)
    }

    /// Returns `true` when a row was deleted.
    pub async fn delete(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM recruiters WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
