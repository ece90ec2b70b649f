// SPDX-License-Identifier: MIT
// Copyright 2026 SkinPilot Contributors

//! Phone-number dialing codes and normalization for the OTP flow.

use crate::error::{AppError, Result};

/// One entry of the country picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountryCode {
    /// Dialing prefix including the leading `+`
    pub dial: &'static str,
    pub name: &'static str,
    pub flag: &'static str,
}

/// Picker entries in display order; India is the default selection.
pub const COUNTRY_CODES: &[CountryCode] = &[
    CountryCode { dial: "+91", name: "India", flag: "\u{1F1EE}\u{1F1F3}" },
    CountryCode { dial: "+1", name: "United States", flag: "\u{1F1FA}\u{1F1F8}" },
    CountryCode { dial: "+44", name: "United Kingdom", flag: "\u{1F1EC}\u{1F1E7}" },
    CountryCode { dial: "+61", name: "Australia", flag: "\u{1F1E6}\u{1F1FA}" },
    CountryCode { dial: "+49", name: "Germany", flag: "\u{1F1E9}\u{1F1EA}" },
    CountryCode { dial: "+33", name: "France", flag: "\u{1F1EB}\u{1F1F7}" },
    CountryCode { dial: "+81", name: "Japan", flag: "\u{1F1EF}\u{1F1F5}" },
    CountryCode { dial: "+82", name: "South Korea", flag: "\u{1F1F0}\u{1F1F7}" },
    CountryCode { dial: "+86", name: "China", flag: "\u{1F1E8}\u{1F1F3}" },
    CountryCode { dial: "+971", name: "United Arab Emirates", flag: "\u{1F1E6}\u{1F1EA}" },
];

pub fn default_country() -> &'static CountryCode {
    &COUNTRY_CODES[0]
}

/// Normalize user input to E.164-ish form for the OTP backend.
///
/// Separator characters (spaces, dashes, parentheses, dots) are stripped.
/// Input that already starts with `+` keeps its prefix; otherwise a leading
/// trunk `0` is dropped and the selected dialing code is prepended.
pub fn normalize_phone(raw: &str, country: &CountryCode) -> Result<String> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')' | '.'))
        .collect();

    let normalized = if let Some(rest) = cleaned.strip_prefix('+') {
        if rest.is_empty() || !rest.chars().all(|c| c.is_ascii_digit()) {
            return Err(AppError::InvalidPhone(raw.to_string()));
        }
        cleaned
    } else {
        if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_ascii_digit()) {
            return Err(AppError::InvalidPhone(raw.to_string()));
        }
        let national = cleaned.strip_prefix('0').unwrap_or(&cleaned);
        format!("{}{}", country.dial, national)
    };

    let digits = normalized.len() - 1;
    if !(8..=15).contains(&digits) {
        return Err(AppError::InvalidPhone(raw.to_string()));
    }
    Ok(normalized)
}
