use crate::types::DbId;

/// How a downstream provider failed, so callers can decide whether a retry
/// makes sense or an operator needs to act.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternalServiceKind {
    /// The provider rate-limited us; retry later.
    RateLimited,
    /// Credentials are missing or rejected; operator action required.
    AuthMisconfigured,
    /// Anything else (network failure, 5xx, malformed response).
    Unavailable,
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("External service error: {message}")]
    ExternalService {
        kind: ExternalServiceKind,
        message: String,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Build a rate-limit external-service error.
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::ExternalService {
            kind: ExternalServiceKind::RateLimited,
            message: message.into(),
        }
    }

    /// Build an auth-misconfiguration external-service error.
    pub fn auth_misconfigured(message: impl Into<String>) -> Self {
        Self::ExternalService {
            kind: ExternalServiceKind::AuthMisconfigured,
            message: message.into(),
        }
    }

    /// Build a generic external-service error.
    pub fn external(message: impl Into<String>) -> Self {
        Self::ExternalService {
            kind: ExternalServiceKind::Unavailable,
            message: message.into(),
        }
    }
}
