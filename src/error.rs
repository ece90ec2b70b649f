// SPDX-License-Identifier: MIT
// Copyright 2026 SkinPilot Contributors

//! Application error types with per-operation kinds.
//!
//! Every fallible operation returns a typed error; the presentation layer
//! decides how each category is surfaced (inline message, dialog, silent
//! fallback). Nothing here is fatal to the process.

use crate::auth::AuthError;

/// Application error type shared by the gate, the profile store and the
/// backend clients.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("No signed-in identity")]
    NotSignedIn,

    #[error("Profile store error: {0}")]
    Store(String),

    #[error("Invalid profile data: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid phone number: {0}")]
    InvalidPhone(String),

    #[error("OTP backend error: {0}")]
    Otp(String),

    #[error("Chat backend error: {0}")]
    Chat(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Coarse error categories matching how failures degrade: identity-provider
/// errors go back to the sign-in screen, store read errors fail safe inside
/// the gate, backend errors render inline in the calling screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    IdentityProvider,
    ProfileStore,
    Backend,
    InvalidInput,
    Internal,
}

impl AppError {
    /// Category of this error for presentation decisions.
    pub fn category(&self) -> ErrorCategory {
        match self {
            AppError::Auth(_) | AppError::NotSignedIn => ErrorCategory::IdentityProvider,
            AppError::Store(_) => ErrorCategory::ProfileStore,
            AppError::Otp(_) | AppError::Chat(_) => ErrorCategory::Backend,
            AppError::Validation(_) | AppError::InvalidPhone(_) => ErrorCategory::InvalidInput,
            AppError::Internal(_) => ErrorCategory::Internal,
        }
    }
}

/// Result type alias for gate and client operations
pub type Result<T> = std::result::Result<T, AppError>;
