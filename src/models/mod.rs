// SPDX-License-Identifier: MIT
// Copyright 2026 SkinPilot Contributors

//! Data models for the application.

pub mod identity;
pub mod phone;
pub mod profile;
pub mod route;
pub mod tracker;

pub use identity::Identity;
pub use phone::{CountryCode, COUNTRY_CODES};
pub use profile::{Profile, ProfileDoc, ProfilePatch};
pub use route::{Route, RouteState};
pub use tracker::DailyTracker;
