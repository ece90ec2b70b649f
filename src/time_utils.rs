// SPDX-License-Identifier: MIT
// Copyright 2026 SkinPilot Contributors

//! Shared helpers for date/time formatting.
//!
//! Profile timestamps are stored as RFC3339 strings and parsed only at the
//! point of comparison.

use chrono::{DateTime, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 with a `Z` suffix.
///
/// Microsecond precision keeps consecutive writes distinguishable.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Current time, formatted for storage.
pub fn now_rfc3339() -> String {
    format_utc_rfc3339(Utc::now())
}
