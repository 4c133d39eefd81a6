//! Integration tests for entity CRUD across the repository layer.
//!
//! Exercises the repositories against a real database:
//! - User registration and lookup
//! - Owner-scoped CRUD and cross-owner isolation
//! - Unique constraint violations
//! - Update/delete of non-existent rows
//! - OAuth state single-use consumption

use chrono::{Duration, Utc};
use jobtrail_core::types::DbId;
use sqlx::PgPool;
use jobtrail_db::models::appointment::{AppointmentFilter, CreateAppointment, UpdateAppointment};
use jobtrail_db::models::post::{CreatePost, PostFilter, UpdatePost};
use jobtrail_db::models::post_idea::{CreatePostIdea, PostIdeaFilter};
use jobtrail_db::models::recruiter::{CreateRecruiter, RecruiterFilter, UpdateRecruiter};
use jobtrail_db::models::user::{default_notifications, CreateUser, UpdateUserSettings};
use jobtrail_db::repositories::{
    AppointmentRepo, OauthStateRepo, PostIdeaRepo, PostRepo, RecruiterRepo, UserRepo,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_user(pool: &PgPool, email: &str) -> DbId {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            password_hash: "$argon2id$fake".to_string(),
            name: "Test User".to_string(),
            timezone: "UTC".to_string(),
            week_start_date: Utc::now(),
            notifications: default_notifications(email),
        },
    )
    .await
    .unwrap();
    user.id
}

fn new_post(content: &str) -> CreatePost {
    CreatePost {
        post_idea_id: None,
        content: content.to_string(),
        status: "draft",
        scheduled_at: None,
    }
}

fn new_recruiter(name: &str, profile_url: &str) -> CreateRecruiter {
    CreateRecruiter {
        name: name.to_string(),
        company: "Acme".to_string(),
        location: "Remote".to_string(),
        industry: None,
        linkedin_profile_url: profile_url.to_string(),
        notes: String::new(),
    }
}

fn new_appointment(title: &str, kind: &str, offset_hours: i64) -> CreateAppointment {
    let start = Utc::now() + Duration::hours(offset_hours);
    CreateAppointment {
        title: title.to_string(),
        description: String::new(),
        kind: kind.to_string(),
        start_time: start,
        end_time: start + Duration::hours(1),
        all_day: false,
        job_opportunity_id: None,
        company: None,
        location: None,
        attendees: vec![],
    }
}

// ---------------------------------------------------------------------------
// Test: User registration and lookup
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_user_create_and_find(pool: PgPool) {
    let id = seed_user(&pool, "alice@example.com").await;

    let by_id = UserRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(by_id.email, "alice@example.com");
    assert_eq!(by_id.weekly_connection_limit, 100);
    assert!(!by_id.linkedin_connected);

    let by_email = UserRepo::find_by_email(&pool, "alice@example.com")
        .await
        .unwrap();
    assert!(by_email.is_some());

    let missing = UserRepo::find_by_email(&pool, "nobody@example.com")
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_email_rejected(pool: PgPool) {
    seed_user(&pool, "dup@example.com").await;
    let result = UserRepo::create(
        &pool,
        &CreateUser {
            email: "dup@example.com".to_string(),
            password_hash: "$argon2id$fake".to_string(),
            name: "Other".to_string(),
            timezone: "UTC".to_string(),
            week_start_date: Utc::now(),
            notifications: default_notifications("dup@example.com"),
        },
    )
    .await;
    assert!(result.is_err(), "Duplicate email should fail");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_user_settings_partial(pool: PgPool) {
    let id = seed_user(&pool, "settings@example.com").await;

    let updated = UserRepo::update_settings(
        &pool,
        id,
        &UpdateUserSettings {
            name: Some("Renamed".to_string()),
            skills: Some(vec!["rust".to_string(), "sql".to_string()]),
            weekly_connection_limit: Some(25),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .expect("Update should return the row");

    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.skills, vec!["rust", "sql"]);
    assert_eq!(updated.weekly_connection_limit, 25);
    // Untouched fields keep their values.
    assert_eq!(updated.timezone, "UTC");
}

// ---------------------------------------------------------------------------
// Test: Posts CRUD and owner scoping
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_post_crud(pool: PgPool) {
    let user_id = seed_user(&pool, "posts@example.com").await;

    let post = PostRepo::create(&pool, user_id, &new_post("Hello world"))
        .await
        .unwrap();
    assert_eq!(post.status, "draft");
    assert_eq!(post.retry_count, 0);

    let updated = PostRepo::update(
        &pool,
        user_id,
        post.id,
        &UpdatePost {
            content: Some("Edited".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.content, "Edited");
    assert_eq!(updated.status, "draft");

    let listed = PostRepo::list(&pool, user_id, &PostFilter::default())
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);

    assert!(PostRepo::delete(&pool, user_id, post.id).await.unwrap());
    assert!(PostRepo::find(&pool, user_id, post.id)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_post_wrong_owner_is_invisible(pool: PgPool) {
    let owner = seed_user(&pool, "owner@example.com").await;
    let other = seed_user(&pool, "other@example.com").await;

    let post = PostRepo::create(&pool, owner, &new_post("Private"))
        .await
        .unwrap();

    assert!(PostRepo::find(&pool, other, post.id)
        .await
        .unwrap()
        .is_none());
    assert!(!PostRepo::delete(&pool, other, post.id).await.unwrap());
    // Still there for the owner.
    assert!(PostRepo::find(&pool, owner, post.id)
        .await
        .unwrap()
        .is_some());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_post_list_status_filter(pool: PgPool) {
    let user_id = seed_user(&pool, "filter@example.com").await;

    PostRepo::create(&pool, user_id, &new_post("a")).await.unwrap();
    let scheduled = CreatePost {
        post_idea_id: None,
        content: "b".to_string(),
        status: "scheduled",
        scheduled_at: Some(Utc::now() + Duration::hours(2)),
    };
    PostRepo::create(&pool, user_id, &scheduled).await.unwrap();

    let drafts = PostRepo::list(
        &pool,
        user_id,
        &PostFilter {
            status: Some("draft".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts[0].content, "a");

    let all = PostRepo::list(&pool, user_id, &PostFilter::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 2);
}

// ---------------------------------------------------------------------------
// Test: Post ideas, tag filter and mark_used set semantics
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_post_idea_tag_filter(pool: PgPool) {
    let user_id = seed_user(&pool, "ideas@example.com").await;

    PostIdeaRepo::create(
        &pool,
        user_id,
        &CreatePostIdea {
            title: "Tagged".to_string(),
            description: String::new(),
            tags: vec!["career".to_string(), "rust".to_string()],
        },
    )
    .await
    .unwrap();
    PostIdeaRepo::create(
        &pool,
        user_id,
        &CreatePostIdea {
            title: "Untagged".to_string(),
            description: String::new(),
            tags: vec![],
        },
    )
    .await
    .unwrap();

    let hits = PostIdeaRepo::list(
        &pool,
        user_id,
        &PostIdeaFilter {
            tag: Some("rust".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Tagged");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_mark_used_is_idempotent_per_post(pool: PgPool) {
    let user_id = seed_user(&pool, "used@example.com").await;
    let idea = PostIdeaRepo::create(
        &pool,
        user_id,
        &CreatePostIdea {
            title: "Consumable".to_string(),
            description: String::new(),
            tags: vec![],
        },
    )
    .await
    .unwrap();
    assert_eq!(idea.status, "active");

    let post = PostRepo::create(&pool, user_id, &new_post("From idea"))
        .await
        .unwrap();

    let marked = PostIdeaRepo::mark_used(&pool, user_id, idea.id, post.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(marked.status, "used");
    assert_eq!(marked.used_in_post_ids, serde_json::json!([post.id]));

    // Linking the same post again must not duplicate the id.
    let again = PostIdeaRepo::mark_used(&pool, user_id, idea.id, post.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(again.used_in_post_ids, serde_json::json!([post.id]));

    // A different post appends.
    let post2 = PostRepo::create(&pool, user_id, &new_post("Second"))
        .await
        .unwrap();
    let both = PostIdeaRepo::mark_used(&pool, user_id, idea.id, post2.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(both.used_in_post_ids, serde_json::json!([post.id, post2.id]));
}

// ---------------------------------------------------------------------------
// Test: Recruiters, duplicate profile URL
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_recruiter_crud_and_duplicate_url(pool: PgPool) {
    let user_id = seed_user(&pool, "recruiters@example.com").await;
    let url = "https://linkedin.com/in/jane";

    let recruiter = RecruiterRepo::create(&pool, user_id, &new_recruiter("Jane", url))
        .await
        .unwrap();
    assert_eq!(recruiter.status, "discovered");
    assert!(recruiter.connection_week.is_none());

    let found = RecruiterRepo::find_by_profile_url(&pool, user_id, url)
        .await
        .unwrap();
    assert!(found.is_some());

    let dup = RecruiterRepo::create(&pool, user_id, &new_recruiter("Jane Again", url)).await;
    assert!(dup.is_err(), "Duplicate profile URL should fail");

    // Same URL under another account is fine.
    let other = seed_user(&pool, "recruiters2@example.com").await;
    RecruiterRepo::create(&pool, other, &new_recruiter("Jane", url))
        .await
        .unwrap();

    let updated = RecruiterRepo::update(
        &pool,
        user_id,
        recruiter.id,
        &UpdateRecruiter {
            notes: Some("Met at conference".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.notes, "Met at conference");

    let filtered = RecruiterRepo::list(
        &pool,
        user_id,
        &RecruiterFilter {
            status: Some("discovered".to_string()),
        },
    )
    .await
    .unwrap();
    assert_eq!(filtered.len(), 1);
}

// ---------------------------------------------------------------------------
// Test: Appointments, kind filter and start ordering
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_appointments_filtered_and_ordered(pool: PgPool) {
    let user_id = seed_user(&pool, "cal@example.com").await;

    AppointmentRepo::create(&pool, user_id, &new_appointment("Later", "interview", 48))
        .await
        .unwrap();
    AppointmentRepo::create(&pool, user_id, &new_appointment("Sooner", "interview", 2))
        .await
        .unwrap();
    AppointmentRepo::create(&pool, user_id, &new_appointment("Study", "study_session", 24))
        .await
        .unwrap();

    let all = AppointmentRepo::list(&pool, user_id, &AppointmentFilter::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].title, "Sooner");
    assert_eq!(all[2].title, "Later");

    let interviews = AppointmentRepo::list(
        &pool,
        user_id,
        &AppointmentFilter {
            kind: Some("interview".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(interviews.len(), 2);

    let upcoming = AppointmentRepo::list(
        &pool,
        user_id,
        &AppointmentFilter {
            start_date: Some(Utc::now() + Duration::hours(12)),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(upcoming.len(), 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_appointment_invalid_range_rejected(pool: PgPool) {
    let user_id = seed_user(&pool, "range@example.com").await;
    let start = Utc::now();
    let result = AppointmentRepo::create(
        &pool,
        user_id,
        &CreateAppointment {
            title: "Backwards".to_string(),
            description: String::new(),
            kind: "interview".to_string(),
            start_time: start,
            end_time: start - Duration::hours(1),
            all_day: false,
            job_opportunity_id: None,
            company: None,
            location: None,
            attendees: vec![],
        },
    )
    .await;
    assert!(result.is_err(), "end before start should violate the check");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_appointment_partial_update(pool: PgPool) {
    let user_id = seed_user(&pool, "patch@example.com").await;
    let appt = AppointmentRepo::create(&pool, user_id, &new_appointment("Orig", "interview", 5))
        .await
        .unwrap();

    let updated = AppointmentRepo::update(
        &pool,
        user_id,
        appt.id,
        &UpdateAppointment {
            location: Some("Office 4B".to_string()),
            notification_sent: Some(true),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.title, "Orig");
    assert_eq!(updated.location.as_deref(), Some("Office 4B"));
    assert!(updated.notification_sent);
}

// ---------------------------------------------------------------------------
// Test: OAuth state is single-use and expiry-checked
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_oauth_state_consumed_once(pool: PgPool) {
    let user_id = seed_user(&pool, "oauth@example.com").await;
    let expires = Utc::now() + Duration::hours(1);

    OauthStateRepo::insert(&pool, "abc123", user_id, expires)
        .await
        .unwrap();

    let first = OauthStateRepo::consume(&pool, "abc123").await.unwrap();
    assert_eq!(first.unwrap().user_id, user_id);

    let second = OauthStateRepo::consume(&pool, "abc123").await.unwrap();
    assert!(second.is_none(), "State token must be single-use");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_oauth_state_expired_rejected(pool: PgPool) {
    let user_id = seed_user(&pool, "oauth2@example.com").await;

    OauthStateRepo::insert(&pool, "stale", user_id, Utc::now() - Duration::minutes(1))
        .await
        .unwrap();

    let result = OauthStateRepo::consume(&pool, "stale").await.unwrap();
    assert!(result.is_none(), "Expired state must not be accepted");

    let purged = OauthStateRepo::purge_expired(&pool).await.unwrap();
    assert_eq!(purged, 1);
}
