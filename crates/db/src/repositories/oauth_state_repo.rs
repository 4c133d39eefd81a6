//! Repository for the `oauth_states` table.

use jobtrail_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::oauth_state::OauthState;

/// Stores short-lived OAuth CSRF state tokens.
pub struct OauthStateRepo;

impl OauthStateRepo {
    /// Records a new in-flight authorization attempt.
    pub async fn insert(
        pool: &PgPool,
        state: &str,
        user_id: DbId,
        expires_at: Timestamp,
    ) -> Result<OauthState, sqlx::Error> {
        sqlx::query_as::<_, OauthState>(
            "INSERT INTO oauth_states (state, user_id, expires_at) \
             VALUES ($1, $2, $3) \
             RETURNING id, state, user_id, expires_at, created_at",
        )
        .bind(state)
        .bind(user_id)
        .bind(expires_at)
        .fetch_one(pool)
        .await
    }

    /// Atomically consumes a state token: deletes it and returns the row only
    /// if it exists and has not expired. A second call with the same token
    /// returns `None`.
    pub async fn consume(pool: &PgPool, state: &str) -> Result<Option<OauthState>, sqlx::Error> {
        sqlx::query_as::<_, OauthState>(
            "DELETE FROM oauth_states \
             WHERE state = $1 AND expires_at > NOW() \
             RETURNING id, state, user_id, expires_at, created_at",
        )
        .bind(state)
        .fetch_optional(pool)
        .await
    }

    /// Drops tokens past their expiry. Returns how many rows were removed.
    pub async fn purge_expired(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM oauth_states WHERE expires_at <= NOW()")
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
