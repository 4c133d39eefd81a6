//! Repository for the `job_opportunities` table.

use chrono::Utc;
use jobtrail_core::job_stage::{JobStage, StageHistoryEntry};
use jobtrail_core::types::DbId;
use sqlx::PgPool;

use crate::models::job_opportunity::{
    CreateJobOpportunity, JobOpportunity, UpdateJobOpportunity,
};

/// Column list for `job_opportunities` queries.
const COLUMNS: &str = "id, user_id, company, position, description, stage, stage_history, \
    contact_email, contact_name, contact_phone, recruiter_id, job_posting_url, \
    company_website, notes, salary_min, salary_max, salary_currency, location, \
    remote_type, created_at, updated_at";

/// Provides CRUD and stage-transition operations for job opportunities.
pub struct JobOpportunityRepo;

impl JobOpportunityRepo {
    /// Insert a new opportunity in `initial_contacts` with a one-entry seed
    /// history.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateJobOpportunity,
    ) -> Result<JobOpportunity, sqlx::Error> {
        let seed = StageHistoryEntry::new(JobStage::INITIAL, Utc::now(), None);
        let seed_history = serde_json::json!([seed]);

        let query = format!(
            "INSERT INTO job_opportunities \
                (user_id, company, position, description, stage, stage_history, \
                 contact_email, contact_name, contact_phone, recruiter_id, \
                 job_posting_url, company_website, notes, salary_min, salary_max, \
                 salary_currency, location, remote_type) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, \
                     $15, $16, $17, $18) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, JobOpportunity>(&query)
            .bind(user_id)
            .bind(&input.company)
            .bind(&input.position)
            .bind(&input.description)
            .bind(JobStage::INITIAL.as_str())
            .bind(seed_history)
            .bind(&input.contact_email)
            .bind(&input.contact_name)
            .bind(&input.contact_phone)
            .bind(input.recruiter_id)
            .bind(&input.job_posting_url)
            .bind(&input.company_website)
            .bind(&input.notes)
            .bind(input.salary_min)
            .bind(input.salary_max)
            .bind(&input.salary_currency)
            .bind(&input.location)
            .bind(&input.remote_type)
            .fetch_one(pool)
            .await
    }

    /// List opportunities, optionally filtered by stage, newest first.
    pub async fn list(
        pool: &PgPool,
        user_id: DbId,
        stage: Option<&str>,
    ) -> Result<Vec<JobOpportunity>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM job_opportunities \
             WHERE user_id = $1 \
               AND ($2::text IS NULL OR stage = $2) \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, JobOpportunity>(&query)
            .bind(user_id)
            .bind(stage)
            .fetch_all(pool)
            .await
    }

    pub async fn find(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<JobOpportunity>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM job_opportunities WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, JobOpportunity>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Partial update of mutable fields; the stage and its history are only
    /// touched by [`Self::update_stage`].
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        patch: &UpdateJobOpportunity,
    ) -> Result<Option<JobOpportunity>, sqlx::Error> {
        let query = format!(
            "UPDATE job_opportunities SET \
                company = COALESCE($3, company), \
                position = COALESCE($4, position), \
                description = COALESCE($5, description), \
                contact_email = COALESCE($6, contact_email), \
                contact_name = COALESCE($7, contact_name), \
                contact_phone = COALESCE($8, contact_phone), \
                recruiter_id = COALESCE($9, recruiter_id), \
                job_posting_url = COALESCE($10, job_posting_url), \
                company_website = COALESCE($11, company_website), \
                notes = COALESCE($12, notes), \
                salary_min = COALESCE($13, salary_min), \
                salary_max = COALESCE($14, salary_max), \
                salary_currency = COALESCE($15, salary_currency), \
                location = COALESCE($16, location), \
                remote_type = COALESCE($17, remote_type), \
                updated_at = NOW() \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, JobOpportunity>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&patch.company)
            .bind(&patch.position)
            .bind(&patch.description)
            .bind(&patch.contact_email)
            .bind(&patch.contact_name)
            .bind(&patch.contact_phone)
            .bind(patch.recruiter_id)
            .bind(&patch.job_posting_url)
            .bind(&patch.company_website)
            .bind(&patch.notes)
            .bind(patch.salary_min)
            .bind(patch.salary_max)
            .bind(&patch.salary_currency)
            .bind(&patch.location)
            .bind(&patch.remote_type)
            .fetch_optional(pool)
            .await
    }

    /// Move an opportunity to a new stage and append the audit entry to
    /// `stage_history`, in one atomic statement. Two concurrent transitions
    /// are last-write-wins on the `stage` scalar, but both history appends
    /// always land.
    pub async fn update_stage(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        entry: &StageHistoryEntry,
    ) -> Result<Option<JobOpportunity>, sqlx::Error> {
        let entry_json = serde_json::json!(entry);
        let query = format!(
            "UPDATE job_opportunities SET \
                stage = $3, \
                stage_history = stage_history || $4::jsonb, \
                updated_at = NOW() \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, JobOpportunity>(&query)
            .bind(id)
            .bind(user_id)
            .bind(entry.stage.as_str())
            .bind(entry_json)
            .fetch_optional(pool)
            .await
    }

    /// Returns `true` when a row was deleted.
    pub async fn delete(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM job_opportunities WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
