//! API server configuration.
//!
//! Built once at startup and handed to [`crate::AppState`]; services never
//! read the environment after construction.

use learnpath_core::auth::jwt::resolve_jwt_secret;
use learnpath_core::roadmap::gemini::DEFAULT_GEMINI_MODEL;

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:8080").
    pub bind_addr: String,
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// JWT signing secret.
    pub jwt_secret: String,
    /// Google Gemini API key.
    pub gemini_api_key: String,
    /// Gemini model used for roadmap generation.
    pub gemini_model: String,
    /// YouTube Data API key.
    pub youtube_api_key: String,
}

impl ApiConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable            | Default                                  |
    /// |---------------------|------------------------------------------|
    /// | `BIND_ADDR`         | `127.0.0.1:8080`                         |
    /// | `DATABASE_URL`      | `postgres://localhost:5432/learnpath`    |
    /// | `JWT_SECRET`        | generated & persisted to file            |
    /// | `GEMINI_API_KEY`    | empty (roadmap calls will fail)          |
    /// | `GEMINI_MODEL`      | `gemini-2.5-flash`                       |
    /// | `GOOGLE_YT_API_KEY` | empty (video search will fail)           |
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".into()),
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost:5432/learnpath".into()),
            jwt_secret: resolve_jwt_secret(),
            gemini_api_key: std::env::var("GEMINI_API_KEY").unwrap_or_default(),
            gemini_model: std::env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.into()),
            youtube_api_key: std::env::var("GOOGLE_YT_API_KEY").unwrap_or_default(),
        }
    }
}
