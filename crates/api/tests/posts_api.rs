//! HTTP-level integration tests for the post lifecycle: draft and scheduled
//! creation, scheduling, retry, publishing, generation, and the weekly
//! counter.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json, post_json_auth, put_json_auth};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Register a user and return an access token.
async fn access_token(app: axum::Router) -> String {
    let body = serde_json::json!({
        "email": "poster@example.com",
        "password": "correct-horse-42",
        "name": "Poster"
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    json["access_token"].as_str().unwrap().to_string()
}

async fn create_post(
    app: axum::Router,
    token: &str,
    body: serde_json::Value,
) -> serde_json::Value {
    let response = post_json_auth(app, "/api/v1/posts", token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Creation
// ---------------------------------------------------------------------------

/// A post without a schedule time starts as a draft; with one it starts
/// scheduled.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_status_from_schedule(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = access_token(app.clone()).await;

    let draft = create_post(
        app.clone(),
        &token,
        serde_json::json!({ "content": "Thoughts on code review." }),
    )
    .await;
    assert_eq!(draft["status"], "draft");
    assert!(draft["scheduled_at"].is_null());

    let scheduled = create_post(
        app,
        &token,
        serde_json::json!({
            "content": "Scheduled thoughts.",
            "scheduled_at": "2030-01-07T09:00:00Z"
        }),
    )
    .await;
    assert_eq!(scheduled["status"], "scheduled");
}

/// Content over the platform limit is rejected with 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_content_too_long(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = access_token(app.clone()).await;

    let response = post_json_auth(
        app,
        "/api/v1/posts",
        &token,
        serde_json::json!({ "content": "x".repeat(3001) }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

/// Scheduling a draft moves it to scheduled; scheduling again just moves
/// the time.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_schedule(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = access_token(app.clone()).await;
    let post = create_post(
        app.clone(),
        &token,
        serde_json::json!({ "content": "Draft for later." }),
    )
    .await;
    let id = post["id"].as_i64().unwrap();

    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/posts/{id}/schedule"),
        &token,
        serde_json::json!({ "scheduled_at": "2030-01-07T09:00:00Z" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "scheduled");

    let response = post_json_auth(
        app,
        &format!("/api/v1/posts/{id}/schedule"),
        &token,
        serde_json::json!({ "scheduled_at": "2030-01-08T09:00:00Z" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// Only failed posts can be retried.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_retry_requires_failed_status(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = access_token(app.clone()).await;
    let post = create_post(
        app.clone(),
        &token,
        serde_json::json!({ "content": "Never failed." }),
    )
    .await;
    let id = post["id"].as_i64().unwrap();

    let response = post_json_auth(
        app,
        &format!("/api/v1/posts/{id}/retry"),
        &token,
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Publishing without a configured LinkedIn application returns 502.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_publish_without_linkedin_config(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = access_token(app.clone()).await;
    let post = create_post(
        app.clone(),
        &token,
        serde_json::json!({ "content": "Publish me." }),
    )
    .await;
    let id = post["id"].as_i64().unwrap();

    let response = post_json_auth(
        app,
        &format!("/api/v1/posts/{id}/publish"),
        &token,
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(response).await;
    assert_eq!(json["error"], "EXTERNAL_SERVICE_ERROR");
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Without a provider, content generation uses the deterministic template.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_generate_falls_back_without_provider(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = access_token(app.clone()).await;

    let response = post_json_auth(
        app.clone(),
        "/api/v1/post-ideas",
        &token,
        serde_json::json!({ "title": "Code review culture", "description": "Why it matters" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let idea = body_json(response).await;
    let idea_id = idea["id"].as_i64().unwrap();

    let response = post_json_auth(
        app,
        "/api/v1/posts/generate",
        &token,
        serde_json::json!({ "post_idea_id": idea_id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let content = json["content"].as_str().unwrap();
    assert!(content.contains("Code review culture"));
}

/// The ideas generation endpoint never fails for a missing provider: it
/// persists template ideas tagged `generated`.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_idea_generation_falls_back(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = access_token(app.clone()).await;

    let response = post_json_auth(
        app,
        "/api/v1/post-ideas/generate",
        &token,
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let ideas = body_json(response).await;
    let ideas = ideas.as_array().unwrap();
    assert_eq!(ideas.len(), 5);
    for idea in ideas {
        assert_eq!(idea["status"], "active");
        assert_eq!(idea["tags"][0], "generated");
    }
}

// ---------------------------------------------------------------------------
// Weekly counter
// ---------------------------------------------------------------------------

/// The weekly counter excludes drafts and is scoped to the caller.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_weekly_count_excludes_drafts(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = access_token(app.clone()).await;

    create_post(
        app.clone(),
        &token,
        serde_json::json!({ "content": "Just a draft." }),
    )
    .await;
    let scheduled = create_post(
        app.clone(),
        &token,
        serde_json::json!({ "content": "On the calendar.", "scheduled_at": "2030-01-07T09:00:00Z" }),
    )
    .await;
    assert_eq!(scheduled["status"], "scheduled");

    let response = get_auth(app, "/api/v1/posts/stats/weekly-count", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["count"], 1);
    assert!(json["week_start"].is_string());
}

// ---------------------------------------------------------------------------
// Updates
// ---------------------------------------------------------------------------

/// Partial update patches only the provided fields.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_partial_update(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = access_token(app.clone()).await;
    let post = create_post(
        app.clone(),
        &token,
        serde_json::json!({ "content": "Original content." }),
    )
    .await;
    let id = post["id"].as_i64().unwrap();

    let response = put_json_auth(
        app,
        &format!("/api/v1/posts/{id}"),
        &token,
        serde_json::json!({ "content": "Edited content." }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["content"], "Edited content.");
    assert_eq!(json["status"], "draft");
}
