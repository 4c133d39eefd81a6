//! Repository for the `users` table.

use jobtrail_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::user::{ConnectLinkedIn, CreateUser, UpdateUserSettings, User};

/// Column list for `users` queries.
const COLUMNS: &str = "id, email, password_hash, name, timezone, skills, \
    target_industries, target_regions, weekly_connection_limit, week_start_date, \
    notifications, linkedin_connected, linkedin_access_token, linkedin_refresh_token, \
    linkedin_expires_at, linkedin_member_id, linkedin_profile_url, linkedin_ssi_score, \
    linkedin_ssi_updated_at, created_at, updated_at";

/// Provides CRUD operations for user accounts.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user. The unique `uq_users_email` constraint rejects
    /// duplicate emails (callers should pre-check for a friendly message).
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users \
                (email, password_hash, name, timezone, week_start_date, notifications) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.name)
            .bind(&input.timezone)
            .bind(input.week_start_date)
            .bind(&input.notifications)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Look up a user by email. Callers pass the lowercased form; emails are
    /// stored lowercased at registration.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Bump `updated_at` after a successful login.
    pub async fn record_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET updated_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Partial settings update; `COALESCE` keeps fields the patch omits.
    pub async fn update_settings(
        pool: &PgPool,
        id: DbId,
        patch: &UpdateUserSettings,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET \
                name = COALESCE($2, name), \
                timezone = COALESCE($3, timezone), \
                skills = COALESCE($4, skills), \
                target_industries = COALESCE($5, target_industries), \
                target_regions = COALESCE($6, target_regions), \
                weekly_connection_limit = COALESCE($7, weekly_connection_limit), \
                notifications = COALESCE($8, notifications), \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&patch.name)
            .bind(&patch.timezone)
            .bind(&patch.skills)
            .bind(&patch.target_industries)
            .bind(&patch.target_regions)
            .bind(patch.weekly_connection_limit)
            .bind(&patch.notifications)
            .fetch_optional(pool)
            .await
    }

    /// Store a freshly connected LinkedIn integration (encrypted tokens).
    pub async fn connect_linkedin(
        pool: &PgPool,
        id: DbId,
        input: &ConnectLinkedIn,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET \
                linkedin_connected = TRUE, \
                linkedin_access_token = $2, \
                linkedin_refresh_token = $3, \
                linkedin_expires_at = $4, \
                linkedin_member_id = $5, \
                linkedin_profile_url = $6, \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.access_token)
            .bind(&input.refresh_token)
            .bind(input.expires_at)
            .bind(&input.member_id)
            .bind(&input.profile_url)
            .fetch_optional(pool)
            .await
    }

    /// Clear the LinkedIn integration record.
    pub async fn disconnect_linkedin(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE users SET \
                linkedin_connected = FALSE, \
                linkedin_access_token = NULL, \
                linkedin_refresh_token = NULL, \
                linkedin_expires_at = NULL, \
                linkedin_member_id = NULL, \
                linkedin_profile_url = NULL, \
                updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Replace the stored (encrypted) access token after a provider refresh.
    pub async fn update_linkedin_access_token(
        pool: &PgPool,
        id: DbId,
        encrypted_token: &str,
        expires_at: Option<Timestamp>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE users SET \
                linkedin_access_token = $2, \
                linkedin_expires_at = $3, \
                updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(encrypted_token)
        .bind(expires_at)
        .execute(pool)
        .await?;
        Ok(())
    }
}
