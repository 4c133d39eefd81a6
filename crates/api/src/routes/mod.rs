pub mod appointments;
pub mod auth;
pub mod health;
pub mod job_opportunities;
pub mod linkedin;
pub mod post_ideas;
pub mod posts;
pub mod recruiters;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                        register (public)
/// /auth/login                           login (public)
/// /auth/refresh                         refresh (public)
/// /auth/me                              profile: get, update settings
///
/// /posts                                list, create
/// /posts/generate                       draft content from an idea (POST)
/// /posts/stats/weekly-count             published + scheduled this week
/// /posts/{id}                           get, update, delete
/// /posts/{id}/schedule                  set schedule time (POST)
/// /posts/{id}/retry                     re-queue a failed post (POST)
/// /posts/{id}/publish                   publish to LinkedIn now (POST)
///
/// /post-ideas                           list, create
/// /post-ideas/generate                  generate idea drafts (POST)
/// /post-ideas/{id}                      get, update, delete
///
/// /job-opportunities                    list, create
/// /job-opportunities/{id}               get, update, delete
/// /job-opportunities/{id}/stage         stage transition with history (PUT)
///
/// /appointments                         list, create
/// /appointments/{id}                    get, update, delete
///
/// /recruiters                           list, create
/// /recruiters/stats/weekly-count        connection requests this week
/// /recruiters/search/linkedin-urls      recruiter search URLs (GET)
/// /recruiters/{id}                      get, update, delete
/// /recruiters/{id}/status               outreach status move (PUT)
/// /recruiters/{id}/generate-messages    draft contact messages (POST)
///
/// /linkedin/auth-url                    OAuth authorization URL (GET)
/// /linkedin/callback                    OAuth callback (GET, public)
/// /linkedin/disconnect                  clear the integration (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (register, login, refresh, me).
        .nest("/auth", auth::router())
        // LinkedIn post lifecycle: draft, schedule, publish, retry.
        .nest("/posts", posts::router())
        // Post idea backlog and generation.
        .nest("/post-ideas", post_ideas::router())
        // Job opportunity pipeline with stage audit history.
        .nest("/job-opportunities", job_opportunities::router())
        // Interview and study-session calendar.
        .nest("/appointments", appointments::router())
        // Recruiter outreach tracking and weekly connection quota.
        .nest("/recruiters", recruiters::router())
        // LinkedIn OAuth connect / disconnect flow.
        .nest("/linkedin", linkedin::router())
}
