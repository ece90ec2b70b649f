//! Application configuration loaded from environment variables.
//!
//! Everything is read once at startup; the library never touches the
//! environment after `Config` is constructed.

use std::env;

/// Base URL of the hosted identity provider's REST API.
const DEFAULT_IDENTITY_BASE_URL: &str = "https://identitytoolkit.googleapis.com/v1";

/// Local OTP/chat backend default. The mobile app maps this through the
/// emulator loopback (10.0.2.2); on a host machine plain localhost is right.
const DEFAULT_BACKEND_BASE_URL: &str = "http://localhost:8000";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Identity provider web API key (public, per-project)
    pub identity_api_key: String,
    /// Identity provider REST base URL (override for emulators)
    pub identity_base_url: String,
    /// GCP project ID for the Firestore profile store
    pub gcp_project_id: String,
    /// OTP backend base URL
    pub otp_base_url: String,
    /// Chat relay backend base URL
    pub chat_base_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file is honored when present (local development).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            identity_api_key: env::var("IDENTITY_API_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("IDENTITY_API_KEY"))?,
            identity_base_url: env::var("IDENTITY_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_IDENTITY_BASE_URL.to_string()),
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            otp_base_url: env::var("OTP_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BACKEND_BASE_URL.to_string()),
            chat_base_url: env::var("CHAT_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BACKEND_BASE_URL.to_string()),
        })
    }

    /// Fixed configuration for tests; no environment access.
    pub fn test_default() -> Self {
        Self {
            identity_api_key: "test_api_key".to_string(),
            identity_base_url: DEFAULT_IDENTITY_BASE_URL.to_string(),
            gcp_project_id: "test-project".to_string(),
            otp_base_url: DEFAULT_BACKEND_BASE_URL.to_string(),
            chat_base_url: DEFAULT_BACKEND_BASE_URL.to_string(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
