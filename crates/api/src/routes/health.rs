//! Liveness endpoint, mounted at the root rather than under `/api/v1`.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok` when the database answers, `degraded` otherwise.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Applied migration count, absent when the database is unreachable.
    pub migrations_applied: Option<i64>,
}

/// GET /health
///
/// The migration count doubles as the reachability probe: if the query
/// fails, the database is reported unhealthy.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let migrations_applied = match jobtrail_db::applied_migration_count(&state.pool).await {
        Ok(count) => Some(count),
        Err(e) => {
            tracing::warn!(error = %e, "Database health probe failed");
            None
        }
    };
    let db_healthy = migrations_applied.is_some();

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        migrations_applied,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
