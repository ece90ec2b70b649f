// SPDX-License-Identifier: MIT
// Copyright 2026 SkinPilot Contributors

//! REST client for the hosted identity provider.
//!
//! Handles:
//! - Email/password sign-in and sign-up
//! - Federated sign-in with an external credential (Google)
//! - Local sign-out
//!
//! Every successful state change is published on the [`IdentityFeed`] so the
//! session gate re-evaluates routing.

use crate::auth::events::IdentityFeed;
use crate::config::Config;
use crate::models::Identity;
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Identity provider error categories.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("An account with this email already exists")]
    EmailInUse,

    #[error("Password is too weak: {0}")]
    WeakPassword(String),

    #[error("This account has been disabled")]
    AccountDisabled,

    #[error("Too many attempts, try again later")]
    TooManyAttempts,

    #[error("Email and password are required")]
    MissingCredentials,

    /// The provider could not be reached or returned garbage.
    #[error("Identity provider request failed: {0}")]
    Network(String),

    /// The provider rejected the request with an unrecognized code.
    #[error("Identity provider error: {0}")]
    Provider(String),
}

/// In-memory session established by a successful sign-in.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub identity: Identity,
    pub id_token: String,
    pub refresh_token: String,
}

/// Identity provider client.
///
/// Cloning shares the session and the feed.
#[derive(Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    session: Arc<Mutex<Option<AuthSession>>>,
    feed: IdentityFeed,
}

impl AuthClient {
    /// Create a client and resolve the initial identity state.
    ///
    /// There is no persisted session on this platform, so the initial state
    /// is always signed-out and is published immediately.
    pub fn new(config: &Config, feed: IdentityFeed) -> Self {
        let client = Self {
            http: reqwest::Client::new(),
            base_url: config.identity_base_url.trim_end_matches('/').to_string(),
            api_key: config.identity_api_key.clone(),
            session: Arc::new(Mutex::new(None)),
            feed,
        };
        client.feed.publish(None);
        client
    }

    /// Sign in with email and password.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let body = serde_json::json!({
            "email": email,
            "password": password,
            "returnSecureToken": true
        });
        let response = self.post_account("signInWithPassword", &body).await?;
        Ok(self.establish_session(response).await)
    }

    /// Create an account with email and password and sign in as it.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let body = serde_json::json!({
            "email": email,
            "password": password,
            "returnSecureToken": true
        });
        let response = self.post_account("signUp", &body).await?;
        Ok(self.establish_session(response).await)
    }

    /// Sign in with a federated credential (e.g. a Google ID token).
    pub async fn sign_in_with_credential(
        &self,
        provider_id: &str,
        id_token: &str,
    ) -> Result<Identity, AuthError> {
        if id_token.trim().is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let body = serde_json::json!({
            "postBody": format!("id_token={}&providerId={}", id_token, provider_id),
            "requestUri": "http://localhost",
            "returnSecureToken": true,
            "returnIdpCredential": true
        });
        let response = self.post_account("signInWithIdp", &body).await?;
        Ok(self.establish_session(response).await)
    }

    /// Drop the local session. Publishes a signed-out event only when a
    /// session actually existed, matching provider notification behavior.
    pub async fn sign_out(&self) {
        let had_session = self.session.lock().await.take().is_some();
        if had_session {
            tracing::info!("Signed out");
            self.feed.publish(None);
        }
    }

    /// The currently signed-in identity, if any.
    pub async fn current_identity(&self) -> Option<Identity> {
        self.session.lock().await.as_ref().map(|s| s.identity.clone())
    }

    /// The full current session, including provider tokens.
    pub async fn current_session(&self) -> Option<AuthSession> {
        self.session.lock().await.clone()
    }

    async fn post_account(
        &self,
        action: &str,
        body: &serde_json::Value,
    ) -> Result<SignInResponse, AuthError> {
        let url = format!("{}/accounts:{}?key={}", self.base_url, action, self.api_key);
        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        self.check_response(response).await
    }

    /// Check response status, parse the success body or map the provider
    /// error code.
    async fn check_response(
        &self,
        response: reqwest::Response,
    ) -> Result<SignInResponse, AuthError> {
        if response.status().is_success() {
            return response
                .json()
                .await
                .map_err(|e| AuthError::Network(format!("Invalid provider response: {}", e)));
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        match serde_json::from_str::<ApiErrorBody>(&body) {
            Ok(parsed) => Err(map_provider_error(&parsed.error.message)),
            Err(_) => Err(AuthError::Network(format!("HTTP {}: {}", status, body))),
        }
    }

    async fn establish_session(&self, response: SignInResponse) -> Identity {
        let identity = Identity {
            uid: response.local_id,
            email: response.email,
            phone_number: response.phone_number,
        };

        *self.session.lock().await = Some(AuthSession {
            identity: identity.clone(),
            id_token: response.id_token,
            refresh_token: response.refresh_token,
        });

        tracing::info!(uid = %identity.uid, "Signed in");
        self.feed.publish(Some(identity.clone()));
        identity
    }
}

/// Success body shared by the sign-in, sign-up and federated endpoints.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    phone_number: Option<String>,
    id_token: String,
    refresh_token: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Map a provider error code to an [`AuthError`].
///
/// Codes sometimes carry a suffix ("WEAK_PASSWORD : Password should be at
/// least 6 characters"), so matching is by prefix.
fn map_provider_error(message: &str) -> AuthError {
    let code = message.trim();
    if code.starts_with("EMAIL_NOT_FOUND")
        || code.starts_with("INVALID_PASSWORD")
        || code.starts_with("INVALID_LOGIN_CREDENTIALS")
    {
        AuthError::InvalidCredentials
    } else if code.starts_with("EMAIL_EXISTS") {
        AuthError::EmailInUse
    } else if code.starts_with("WEAK_PASSWORD") {
        AuthError::WeakPassword(code.to_string())
    } else if code.starts_with("USER_DISABLED") {
        AuthError::AccountDisabled
    } else if code.starts_with("TOO_MANY_ATTEMPTS_TRY_LATER") {
        AuthError::TooManyAttempts
    } else if code.starts_with("MISSING_PASSWORD") || code.starts_with("MISSING_EMAIL") {
        AuthError::MissingCredentials
    } else {
        AuthError::Provider(code.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_codes_map_by_prefix() {
        assert_eq!(
            map_provider_error("INVALID_PASSWORD"),
            AuthError::InvalidCredentials
        );
        assert_eq!(
            map_provider_error("EMAIL_NOT_FOUND"),
            AuthError::InvalidCredentials
        );
        assert_eq!(
            map_provider_error("INVALID_LOGIN_CREDENTIALS"),
            AuthError::InvalidCredentials
        );
        assert_eq!(map_provider_error("EMAIL_EXISTS"), AuthError::EmailInUse);
        assert_eq!(
            map_provider_error("TOO_MANY_ATTEMPTS_TRY_LATER : Access blocked."),
            AuthError::TooManyAttempts
        );
        assert_eq!(map_provider_error("USER_DISABLED"), AuthError::AccountDisabled);
    }

    #[test]
    fn test_weak_password_keeps_provider_detail() {
        let mapped = map_provider_error("WEAK_PASSWORD : Password should be at least 6 characters");
        match mapped {
            AuthError::WeakPassword(detail) => assert!(detail.contains("6 characters")),
            other => panic!("expected WeakPassword, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_codes_stay_provider_errors() {
        assert_eq!(
            map_provider_error("OPERATION_NOT_ALLOWED"),
            AuthError::Provider("OPERATION_NOT_ALLOWED".to_string())
        );
    }
}
