// SPDX-License-Identifier: MIT
// Copyright 2026 SkinPilot Contributors

//! OTP backend client for phone sign-in.
//!
//! Talks to the companion backend's `/send-otp` and `/verify-otp` endpoints.
//! Local builds of that backend return the code in the send response so the
//! flow can be exercised without an SMS provider; when present it is passed
//! through as `debug_code`.

use crate::error::{AppError, Result};
use serde::Deserialize;

/// OTP backend client.
#[derive(Clone)]
pub struct OtpClient {
    http: reqwest::Client,
    base_url: String,
}

impl OtpClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Request a one-time code for a normalized phone number.
    pub async fn send_code(&self, phone: &str) -> Result<OtpDelivery> {
        let url = format!("{}/send-otp", self.base_url);
        let body = serde_json::json!({ "phone": phone });

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Otp(format!("Send request failed: {}", e)))?;

        let body: SendOtpResponse = check_response_json(response, "send").await?;
        if !(body.success || body.sent) {
            return Err(AppError::Otp(
                body.error.unwrap_or_else(|| "Failed to send OTP".to_string()),
            ));
        }

        tracing::info!(debug_code = body.code.is_some(), "OTP sent");
        Ok(OtpDelivery {
            debug_code: body.code,
        })
    }

    /// Verify a code the user entered. Resolves `Ok(())` only on success.
    pub async fn verify_code(&self, phone: &str, code: &str) -> Result<()> {
        let url = format!("{}/verify-otp", self.base_url);
        let body = serde_json::json!({ "phone": phone, "otp": code });

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Otp(format!("Verify request failed: {}", e)))?;

        let body: VerifyOtpResponse = check_response_json(response, "verify").await?;
        if !(body.success || body.verified) {
            return Err(AppError::Otp(
                body.error.unwrap_or_else(|| "Invalid OTP".to_string()),
            ));
        }

        tracing::info!("OTP verified");
        Ok(())
    }
}

/// Outcome of a send request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpDelivery {
    /// Code echoed back by local backend builds; absent in production.
    pub debug_code: Option<String>,
}

/// Check response status and parse JSON body.
async fn check_response_json<T: for<'de> Deserialize<'de>>(
    response: reqwest::Response,
    action: &str,
) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AppError::Otp(format!(
            "OTP {} returned HTTP {}: {}",
            action, status, body
        )));
    }

    response
        .json()
        .await
        .map_err(|e| AppError::Otp(format!("Invalid OTP {} response: {}", action, e)))
}

/// Responses are accepted from several backend revisions, so every field
/// is optional.
#[derive(Debug, Deserialize)]
struct SendOtpResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    sent: bool,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VerifyOtpResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    verified: bool,
    #[serde(default)]
    error: Option<String>,
}
