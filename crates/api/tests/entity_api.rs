//! HTTP-level integration tests for job opportunities, recruiters, and
//! appointments, plus the health endpoint and error envelope.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get, get_auth, post_json, post_json_auth, put_json_auth};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn access_token(app: axum::Router) -> String {
    let body = serde_json::json!({
        "email": "hunter@example.com",
        "password": "correct-horse-42",
        "name": "Hunter"
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    json["access_token"].as_str().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// Job opportunities
// ---------------------------------------------------------------------------

/// New opportunities start at the first stage with a seed history entry,
/// and each transition appends to the history.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_stage_transition_appends_history(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = access_token(app.clone()).await;

    let response = post_json_auth(
        app.clone(),
        "/api/v1/job-opportunities",
        &token,
        serde_json::json!({ "company": "Acme", "position": "Backend Engineer" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let opportunity = body_json(response).await;
    assert_eq!(opportunity["stage"], "initial_contacts");
    assert_eq!(opportunity["stage_history"].as_array().unwrap().len(), 1);
    let id = opportunity["id"].as_i64().unwrap();

    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/job-opportunities/{id}/stage"),
        &token,
        serde_json::json!({ "stage": "in_progress", "notes": "Recruiter call booked" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["stage"], "in_progress");
    let history = json["stage_history"].as_array().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[1]["stage"], "in_progress");
    assert_eq!(history[1]["notes"], "Recruiter call booked");

    let response = put_json_auth(
        app,
        &format!("/api/v1/job-opportunities/{id}/stage"),
        &token,
        serde_json::json!({ "stage": "nirvana" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Opportunities of one user are invisible to another.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_opportunities_are_user_scoped(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = access_token(app.clone()).await;

    let response = post_json_auth(
        app.clone(),
        "/api/v1/job-opportunities",
        &token,
        serde_json::json!({ "company": "Acme", "position": "Backend Engineer" }),
    )
    .await;
    let id = body_json(response).await["id"].as_i64().unwrap();

    let other = post_json(
        app.clone(),
        "/api/v1/auth/register",
        serde_json::json!({
            "email": "other@example.com",
            "password": "correct-horse-42",
            "name": "Other"
        }),
    )
    .await;
    let other_token = body_json(other).await["access_token"]
        .as_str()
        .unwrap()
        .to_string();

    let response = get_auth(
        app,
        &format!("/api/v1/job-opportunities/{id}"),
        &other_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"], "NOT_FOUND");
    assert!(json["message"].is_string());
}

// ---------------------------------------------------------------------------
// Recruiters
// ---------------------------------------------------------------------------

/// Sending a connection pins the week; the weekly counter reflects it and a
/// later transition does not change the count.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_connection_quota_flow(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = access_token(app.clone()).await;

    let response = post_json_auth(
        app.clone(),
        "/api/v1/recruiters",
        &token,
        serde_json::json!({
            "name": "Rita Recruiter",
            "company": "TalentCo",
            "linkedin_profile_url": "https://linkedin.com/in/rita"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let recruiter = body_json(response).await;
    assert_eq!(recruiter["status"], "discovered");
    let id = recruiter["id"].as_i64().unwrap();

    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/recruiters/{id}/status"),
        &token,
        serde_json::json!({ "status": "connection_sent" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["connection_sent_at"].is_string());
    assert!(json["connection_week"].is_string());

    let response = get_auth(app.clone(), "/api/v1/recruiters/stats/weekly-count", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["count"], 1);
    assert_eq!(json["limit"], 100);

    // Accepting the connection keeps the pinned week.
    put_json_auth(
        app.clone(),
        &format!("/api/v1/recruiters/{id}/status"),
        &token,
        serde_json::json!({ "status": "connected" }),
    )
    .await;
    let response = get_auth(app, "/api/v1/recruiters/stats/weekly-count", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["count"], 1);
}

/// Duplicate profile URLs for the same user return 409.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_duplicate_profile_url(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = access_token(app.clone()).await;

    let body = serde_json::json!({
        "name": "Rita Recruiter",
        "company": "TalentCo",
        "linkedin_profile_url": "https://linkedin.com/in/rita"
    });
    let response = post_json_auth(app.clone(), "/api/v1/recruiters", &token, body.clone()).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json_auth(app, "/api/v1/recruiters", &token, body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

/// Message generation stores three drafts on the recruiter row.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_generate_messages(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = access_token(app.clone()).await;

    let response = post_json_auth(
        app.clone(),
        "/api/v1/recruiters",
        &token,
        serde_json::json!({
            "name": "Rita Recruiter",
            "company": "TalentCo",
            "linkedin_profile_url": "https://linkedin.com/in/rita"
        }),
    )
    .await;
    let id = body_json(response).await["id"].as_i64().unwrap();

    let response = post_json_auth(
        app,
        &format!("/api/v1/recruiters/{id}/generate-messages"),
        &token,
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let messages = json["generated_messages"].as_array().unwrap();
    assert_eq!(messages.len(), 3);
    assert!(messages[0]["message"].as_str().unwrap().contains("Rita"));
    assert_eq!(messages[0]["used"], false);
}

/// Search URLs are seeded from the user's skills and first target region.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_recruiter_search_urls(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = access_token(app.clone()).await;

    let response = put_json_auth(
        app.clone(),
        "/api/v1/auth/me",
        &token,
        serde_json::json!({
            "skills": ["Rust", "Postgres"],
            "target_regions": ["Brazil", "Portugal"]
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(app, "/api/v1/recruiters/search/linkedin-urls", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let urls = json["search_urls"].as_array().unwrap();
    assert_eq!(urls.len(), 4);
    for entry in urls {
        let url = entry["url"].as_str().unwrap();
        assert!(url.starts_with("https://www.linkedin.com/search/results/people/?"));
        assert!(url.contains("geoUrn=Brazil"));
    }
    assert!(urls[0]["url"].as_str().unwrap().contains("Rust"));
    assert!(urls[0]["description"]
        .as_str()
        .unwrap()
        .contains("Technical Recruiters"));
}

// ---------------------------------------------------------------------------
// Appointments
// ---------------------------------------------------------------------------

/// An appointment whose end precedes its start is rejected, on create and
/// when a patch would invert the range.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_appointment_time_range(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = access_token(app.clone()).await;

    let response = post_json_auth(
        app.clone(),
        "/api/v1/appointments",
        &token,
        serde_json::json!({
            "title": "Backwards",
            "kind": "interview",
            "start_time": "2030-01-07T11:00:00Z",
            "end_time": "2030-01-07T10:00:00Z"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json_auth(
        app.clone(),
        "/api/v1/appointments",
        &token,
        serde_json::json!({
            "title": "System design interview",
            "kind": "interview",
            "start_time": "2030-01-07T10:00:00Z",
            "end_time": "2030-01-07T11:00:00Z"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["id"].as_i64().unwrap();

    let response = put_json_auth(
        app,
        &format!("/api/v1/appointments/{id}"),
        &token,
        serde_json::json!({ "end_time": "2030-01-07T09:00:00Z" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Deleting an appointment returns 204, then 404 on a second attempt.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_appointment_delete(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = access_token(app.clone()).await;

    let response = post_json_auth(
        app.clone(),
        "/api/v1/appointments",
        &token,
        serde_json::json!({
            "title": "Study: distributed systems",
            "kind": "study_session",
            "start_time": "2030-01-07T10:00:00Z",
            "end_time": "2030-01-07T11:00:00Z"
        }),
    )
    .await;
    let id = body_json(response).await["id"].as_i64().unwrap();

    let response = delete_auth(app.clone(), &format!("/api/v1/appointments/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete_auth(app, &format!("/api/v1/appointments/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// LinkedIn + health
// ---------------------------------------------------------------------------

/// Without a configured LinkedIn application, the auth-url endpoint
/// reports the integration as misconfigured.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_linkedin_auth_url_unconfigured(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = access_token(app.clone()).await;

    let response = get_auth(app, "/api/v1/linkedin/auth-url", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(response).await;
    assert_eq!(json["error"], "EXTERNAL_SERVICE_ERROR");
}

/// Disconnect always succeeds and reports the integration as cleared.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_linkedin_disconnect(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = access_token(app.clone()).await;

    let response = post_json_auth(
        app.clone(),
        "/api/v1/linkedin/disconnect",
        &token,
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["connected"], false);

    let response = get_auth(app, "/api/v1/auth/me", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["linkedin"]["connected"], false);
}

/// The root health endpoint reports a reachable database and how many
/// migrations have been applied.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_health(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["db_healthy"], true);
    assert!(json["migrations_applied"].as_i64().unwrap() >= 1);
}
