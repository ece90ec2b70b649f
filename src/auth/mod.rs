// SPDX-License-Identifier: MIT
// Copyright 2026 SkinPilot Contributors

//! Identity provider integration: the REST client and the change feed.

pub mod client;
pub mod events;

pub use client::{AuthClient, AuthError};
pub use events::{AuthEvent, FeedSeq, IdentityFeed};
