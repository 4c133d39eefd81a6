//! OAuth CSRF state row model.

use jobtrail_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `oauth_states` table: one in-flight authorization attempt.
#[derive(Debug, Clone, FromRow)]
pub struct OauthState {
    pub id: DbId,
    pub state: String,
    pub user_id: DbId,
    pub expires_at: Timestamp,
    pub created_at: Timestamp,
}
