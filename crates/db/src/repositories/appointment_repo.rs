//! Repository for the `appointments` table.

use jobtrail_core::types::DbId;
use sqlx::PgPool;

use crate::models::appointment::{
    Appointment, AppointmentFilter, CreateAppointment, UpdateAppointment,
};

/// Column list for `appointments` queries.
const COLUMNS: &str = "id, user_id, title, description, kind, start_time, end_time, \
    all_day, job_opportunity_id, company, location, attendees, notification_sent, \
    created_at, updated_at";

/// Provides CRUD operations for appointments.
pub struct AppointmentRepo;

impl AppointmentRepo {
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateAppointment,
    ) -> Result<Appointment, sqlx::Error> {
        let query = format!(
            "INSERT INTO appointments \
                (user_id, title, description, kind, start_time, end_time, all_day, \
                 job_opportunity_id, company, location, attendees) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Appointment>(&query)
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.kind)
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(input.all_day)
            .bind(input.job_opportunity_id)
            .bind(&input.company)
            .bind(&input.location)
            .bind(&input.attendees)
            .fetch_one(pool)
            .await
    }

    /// List appointments, optionally filtered by kind and start-time range,
    /// soonest first.
    pub async fn list(
        pool: &PgPool,
        user_id: DbId,
        filter: &AppointmentFilter,
    ) -> Result<Vec<Appointment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM appointments \
             WHERE user_id = $1 \
               AND ($2::text IS NULL OR kind = $2) \
               AND ($3::timestamptz IS NULL OR start_time >= $3) \
               AND ($4::timestamptz IS NULL OR start_time <= $4) \
             ORDER BY start_time ASC"
        );
        sqlx::query_as::<_, Appointment>(&query)
            .bind(user_id)
            .bind(&filter.kind)
            .bind(filter.start_date)
            .bind(filter.end_date)
            .fetch_all(pool)
            .await
    }

    pub async fn find(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<Appointment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM appointments WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Appointment>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Partial update; `COALESCE` keeps fields the patch omits. The caller
    /// validates the effective time range before calling.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        patch: &UpdateAppointment,
    ) -> Result<Option<Appointment>, sqlx::Error> {
        let query = format!(
            "UPDATE appointments SET \
                title = COALESCE($3, title), \
                description = COALESCE($4, description), \
                start_time = COALESCE($5, start_time), \
                end_time = COALESCE($6, end_time), \
                all_day = COALESCE($7, all_day), \
                company = COALESCE($8, company), \
                location = COALESCE($9, location), \
                attendees = COALESCE($10, attendees), \
                notification_sent = COALESCE($11, notification_sent), \
                updated_at = NOW() \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Appointment>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&patch.title)
            .bind(&patch.description)
            .bind(patch.start_time)
            .bind(patch.end_time)
            .bind(patch.all_day)
            .bind(&patch.company)
            .bind(&patch.location)
            .bind(&patch.attendees)
            .bind(patch.notification_sent)
            .fetch_optional(pool)
            .await
    }

    /// Returns `true` when a row was deleted.
    pub async fn delete(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM appointments WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
