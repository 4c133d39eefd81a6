//! Route definitions for the LinkedIn OAuth integration.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::linkedin;
use crate::state::AppState;

/// Routes mounted at `/linkedin`.
///
/// The callback is public: the browser arrives from the provider without a
/// bearer token, and the state token ties the request to a user.
///
/// ```text
/// GET  /auth-url    -> auth_url (requires auth)
/// GET  /callback    -> callback (public, state-token validated)
/// POST /disconnect  -> disconnect (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth-url", get(linkedin::auth_url))
        .route("/callback", get(linkedin::callback))
        .route("/disconnect", post(linkedin::disconnect))
}
