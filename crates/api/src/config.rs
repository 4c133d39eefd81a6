use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration (secrets, expiry durations).
    pub jwt: JwtConfig,
    /// Secret the OAuth credential-store key is derived from.
    pub encryption_secret: String,
    /// LinkedIn OAuth application settings, when configured.
    pub linkedin: Option<LinkedInConfig>,
    /// Anthropic text-generation settings, when configured.
    pub anthropic: Option<AnthropicConfig>,
}

/// OAuth application settings for the LinkedIn integration.
#[derive(Debug, Clone)]
pub struct LinkedInConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

/// Settings for the Anthropic Messages API text generator.
#[derive(Debug, Clone)]
pub struct AnthropicConfig {
    pub api_key: String,
    /// Model identifier (default: `claude-3-5-haiku-latest`).
    pub model: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                    |
    /// |--------------------------|----------------------------|
    /// | `HOST`                   | `0.0.0.0`                  |
    /// | `PORT`                   | `3000`                     |
    /// | `CORS_ORIGINS`           | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`   | `30`                       |
    /// | `ENCRYPTION_KEY`         | **required**               |
    /// | `LINKEDIN_CLIENT_ID`     | unset disables LinkedIn    |
    /// | `LINKEDIN_CLIENT_SECRET` | unset disables LinkedIn    |
    /// | `LINKEDIN_REDIRECT_URI`  | unset disables LinkedIn    |
    /// | `ANTHROPIC_API_KEY`      | unset enables fallbacks    |
    /// | `ANTHROPIC_MODEL`        | `claude-3-5-haiku-latest`  |
    ///
    /// # Panics
    ///
    /// Panics if `ENCRYPTION_KEY` is not set or is empty; starting without
    /// it would silently break credential storage.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let jwt = JwtConfig::from_env();

        let encryption_secret =
            std::env::var("ENCRYPTION_KEY").expect("ENCRYPTION_KEY must be set");
        assert!(!encryption_secret.is_empty(), "ENCRYPTION_KEY must not be empty");

        let linkedin = match (
            std::env::var("LINKEDIN_CLIENT_ID"),
            std::env::var("LINKEDIN_CLIENT_SECRET"),
            std::env::var("LINKEDIN_REDIRECT_URI"),
        ) {
            (Ok(client_id), Ok(client_secret), Ok(redirect_uri)) => Some(LinkedInConfig {
                client_id,
                client_secret,
                redirect_uri,
            }),
            _ => None,
        };

        let anthropic = std::env::var("ANTHROPIC_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())
            .map(|api_key| AnthropicConfig {
                api_key,
                model: std::env::var("ANTHROPIC_MODEL")
                    .unwrap_or_else(|_| "claude-3-5-haiku-latest".into()),
            });

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt,
            encryption_secret,
            linkedin,
            anthropic,
        }
    }
}
