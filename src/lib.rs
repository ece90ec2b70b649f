// SPDX-License-Identifier: MIT
// Copyright 2026 SkinPilot Contributors

//! SkinPilot session core: identity, profile gate and backend clients.
//!
//! This crate is the non-UI core of the SkinPilot app. It watches the
//! identity provider, keeps the profile document in the hosted store in
//! step, and exposes a single route decision for the screens to follow.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod session;
pub mod time_utils;

use auth::{AuthClient, IdentityFeed};
use config::Config;
use db::{FirestoreDb, ProfileStore};
use services::{ChatClient, OtpClient};
use session::SessionGate;

/// Shared session context.
///
/// Owns the identity feed plus every client the screens need. Constructed
/// once at startup and passed down; nothing in the crate reaches for
/// globals.
pub struct SessionContext<S> {
    pub config: Config,
    pub feed: IdentityFeed,
    pub auth: AuthClient,
    pub profiles: S,
    pub otp: OtpClient,
    pub chat: ChatClient,
}

impl SessionContext<FirestoreDb> {
    /// Connect to the hosted profile store and build the production context.
    pub async fn connect(config: Config) -> error::Result<Self> {
        let profiles = FirestoreDb::new(&config.gcp_project_id).await?;
        Ok(Self::with_store(config, profiles))
    }
}

impl<S: ProfileStore> SessionContext<S> {
    /// Build a context over any profile store.
    ///
    /// The identity feed is created here and handed to the auth client,
    /// which immediately resolves the initial (signed-out) identity state.
    pub fn with_store(config: Config, profiles: S) -> Self {
        let feed = IdentityFeed::new();
        let auth = AuthClient::new(&config, feed.clone());
        let otp = OtpClient::new(&config.otp_base_url);
        let chat = ChatClient::new(&config.chat_base_url);
        Self {
            config,
            feed,
            auth,
            profiles,
            otp,
            chat,
        }
    }

    /// Create the session gate over this context's store and feed.
    pub fn gate(&self) -> SessionGate<S> {
        SessionGate::new(self.profiles.clone(), self.feed.clone())
    }
}
