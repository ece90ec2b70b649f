// SPDX-License-Identifier: MIT
// Copyright 2026 SkinPilot Contributors

//! Profile schema: stored document, in-memory model and write patch.
//!
//! The stored representation (`ProfileDoc`) mirrors what the mobile clients
//! actually wrote to the `users` collection: camelCase fields, everything
//! nullable, numbers occasionally serialized as strings, and `currentWeight`
//! as a legacy spelling of `weight`. Reads are tolerant of all of that;
//! writes always produce the canonical shape. `Profile::from_doc` is the one
//! conversion point between the two representations.

use crate::models::Identity;
use crate::time_utils;
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

/// Profile document as stored in `users/{uid}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDoc {
    /// Identity id, repeated inside the document
    pub uid: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// Height in centimeters
    #[serde(default, deserialize_with = "de_lenient_number")]
    pub height: Option<f64>,
    /// Weight in kilograms; older documents spell this `currentWeight`
    #[serde(default, alias = "currentWeight", deserialize_with = "de_lenient_number")]
    pub weight: Option<f64>,
    #[serde(default)]
    pub skin_type: Option<String>,
    #[serde(default, deserialize_with = "de_lenient_number")]
    pub target_weight: Option<f64>,
    #[serde(default)]
    pub goal_pace: Option<String>,
    #[serde(default, deserialize_with = "de_lenient_number")]
    pub age: Option<f64>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub daily_activity: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub medical_conditions: Vec<String>,
    #[serde(default)]
    pub emotional_health: Vec<String>,
    #[serde(default, deserialize_with = "de_lenient_number")]
    pub bmi: Option<f64>,
    /// First-write timestamp (RFC3339); preserved across patches
    #[serde(default)]
    pub created_at: Option<String>,
    /// Last-write timestamp (RFC3339)
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl ProfileDoc {
    /// The document written on first sign-in: identity contact fields carried
    /// over, every profile field null, both timestamps set to now.
    pub fn empty_for(identity: &Identity) -> Self {
        let now = time_utils::now_rfc3339();
        Self {
            uid: identity.uid.clone(),
            email: identity.email.clone(),
            phone: identity.phone_number.clone(),
            name: None,
            height: None,
            weight: None,
            skin_type: None,
            target_weight: None,
            goal_pace: None,
            age: None,
            gender: None,
            daily_activity: None,
            city: None,
            medical_conditions: Vec::new(),
            emotional_health: Vec::new(),
            bmi: None,
            created_at: Some(now.clone()),
            updated_at: Some(now),
        }
    }
}

/// Accept numbers that older clients stored as JSON strings ("170", "22.5").
/// Unparseable values read as absent rather than failing the whole document.
fn de_lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Lenient {
        Number(f64),
        Text(String),
    }

    let value = Option::<Lenient>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Lenient::Number(n) => Some(n),
        Lenient::Text(s) => s.trim().parse().ok(),
    }))
}

/// In-memory profile model used by the gate and the screens.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub uid: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub name: Option<String>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub skin_type: Option<String>,
    pub target_weight_kg: Option<f64>,
    pub goal_pace: Option<String>,
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub daily_activity: Option<String>,
    pub city: Option<String>,
    pub medical_conditions: Vec<String>,
    pub emotional_health: Vec<String>,
    pub bmi: Option<f64>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Profile {
    /// Convert the stored representation into the in-memory model.
    ///
    /// Empty strings collapse to absent (the mobile clients coerced them to
    /// null on write, but not every document went through that path), ages
    /// round to whole years, and a missing BMI is derived when height and
    /// weight are both known.
    pub fn from_doc(doc: ProfileDoc) -> Self {
        let bmi = doc.bmi.or_else(|| compute_bmi(doc.height, doc.weight));
        Self {
            uid: doc.uid,
            email: non_empty(doc.email),
            phone: non_empty(doc.phone),
            name: non_empty(doc.name),
            height_cm: doc.height,
            weight_kg: doc.weight,
            skin_type: non_empty(doc.skin_type),
            target_weight_kg: doc.target_weight,
            goal_pace: non_empty(doc.goal_pace),
            age: doc.age.map(|a| a.round() as u32),
            gender: non_empty(doc.gender),
            daily_activity: non_empty(doc.daily_activity),
            city: non_empty(doc.city),
            medical_conditions: doc.medical_conditions,
            emotional_health: doc.emotional_health,
            bmi,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }

    /// Completeness invariant applied by the gate: the four required fields
    /// {name, height, weight, skin type} are all present.
    pub fn is_complete(&self) -> bool {
        self.name.is_some()
            && self.height_cm.is_some()
            && self.weight_kg.is_some()
            && self.skin_type.is_some()
    }

    /// Avatar initials: "U" when unnamed, two leading characters for a
    /// one-word name, first and last initials otherwise.
    pub fn initials(&self) -> String {
        let name = match self.name.as_deref().map(str::trim) {
            Some(n) if !n.is_empty() => n,
            _ => return "U".to_string(),
        };
        let parts: Vec<&str> = name.split_whitespace().collect();
        let raw: String = if parts.len() == 1 {
            parts[0].chars().take(2).collect()
        } else {
            parts[0]
                .chars()
                .next()
                .into_iter()
                .chain(parts[parts.len() - 1].chars().next())
                .collect()
        };
        raw.to_uppercase()
    }
}

/// BMI from height in centimeters and weight in kilograms, rounded to one
/// decimal. Absent unless both inputs are present and positive.
pub fn compute_bmi(height_cm: Option<f64>, weight_kg: Option<f64>) -> Option<f64> {
    let height = height_cm?;
    let weight = weight_kg?;
    if height <= 0.0 || weight <= 0.0 {
        return None;
    }
    let meters = height / 100.0;
    Some(((weight / (meters * meters)) * 10.0).round() / 10.0)
}

/// Full-overwrite patch saved from the onboarding/profile screen.
///
/// Every field of the stored document is replaced by the patch (absent fields
/// become null); only `uid` and `createdAt` are controlled by the writer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfilePatch {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(max = 32))]
    pub gender: Option<String>,
    pub phone: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(range(min = 1, max = 120))]
    pub age: Option<u32>,
    #[validate(length(max = 100))]
    pub daily_activity: Option<String>,
    #[validate(range(min = 30.0, max = 300.0))]
    pub height: Option<f64>,
    #[validate(range(min = 1.0, max = 500.0))]
    pub weight: Option<f64>,
    #[validate(range(min = 1.0, max = 500.0))]
    pub target_weight: Option<f64>,
    #[validate(length(max = 100))]
    pub goal_pace: Option<String>,
    #[validate(length(max = 64))]
    pub skin_type: Option<String>,
    #[validate(length(max = 32))]
    pub medical_conditions: Vec<String>,
    #[validate(length(max = 32))]
    pub emotional_health: Vec<String>,
    #[validate(length(max = 100))]
    pub city: Option<String>,
}

impl ProfilePatch {
    /// Build the stored document for this patch.
    ///
    /// `createdAt` is carried over from the prior document when one exists,
    /// otherwise set to now; `updatedAt` is always now; `uid` always comes
    /// from the identity.
    pub fn into_doc(self, identity: &Identity, prior: Option<&ProfileDoc>) -> ProfileDoc {
        let now = time_utils::now_rfc3339();
        let created_at = prior
            .and_then(|p| p.created_at.clone())
            .unwrap_or_else(|| now.clone());
        let bmi = compute_bmi(self.height, self.weight);
        ProfileDoc {
            uid: identity.uid.clone(),
            email: non_empty(self.email),
            phone: non_empty(self.phone),
            name: non_empty(self.name),
            height: self.height,
            weight: self.weight,
            skin_type: non_empty(self.skin_type),
            target_weight: self.target_weight,
            goal_pace: non_empty(self.goal_pace),
            age: self.age.map(f64::from),
            gender: non_empty(self.gender),
            daily_activity: non_empty(self.daily_activity),
            city: non_empty(self.city),
            medical_conditions: self.medical_conditions,
            emotional_health: self.emotional_health,
            bmi,
            created_at: Some(created_at),
            updated_at: Some(now),
        }
    }
}

/// The mobile clients wrote `value || null`; mirror that coercion.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> Identity {
        Identity {
            uid: "u1".to_string(),
            email: Some("u1@example.com".to_string()),
            phone_number: None,
        }
    }

    fn complete_doc() -> ProfileDoc {
        ProfileDoc {
            name: Some("A".to_string()),
            height: Some(170.0),
            weight: Some(65.0),
            skin_type: Some("Normal".to_string()),
            ..ProfileDoc::empty_for(&identity())
        }
    }

    #[test]
    fn test_empty_for_nulls_every_profile_field() {
        let doc = ProfileDoc::empty_for(&identity());
        assert_eq!(doc.uid, "u1");
        assert_eq!(doc.email, Some("u1@example.com".to_string()));
        assert!(doc.name.is_none());
        assert!(doc.height.is_none());
        assert!(doc.weight.is_none());
        assert!(doc.skin_type.is_none());
        assert!(doc.medical_conditions.is_empty());
        assert_eq!(doc.created_at, doc.updated_at);
        assert!(!Profile::from_doc(doc).is_complete());
    }

    #[test]
    fn test_completeness_requires_all_four_fields() {
        assert!(Profile::from_doc(complete_doc()).is_complete());

        for wipe in 0..4 {
            let mut doc = complete_doc();
            match wipe {
                0 => doc.name = None,
                1 => doc.height = None,
                2 => doc.weight = None,
                _ => doc.skin_type = None,
            }
            assert!(
                !Profile::from_doc(doc).is_complete(),
                "missing field {} should be incomplete",
                wipe
            );
        }
    }

    #[test]
    fn test_stored_documents_use_camel_case() {
        let json = serde_json::to_value(complete_doc()).unwrap();
        assert!(json.get("skinType").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("medicalConditions").is_some());
        assert!(json.get("skin_type").is_none());
    }

    #[test]
    fn test_legacy_current_weight_alias() {
        let doc: ProfileDoc = serde_json::from_value(serde_json::json!({
            "uid": "u1",
            "name": "A",
            "height": 170,
            "currentWeight": 65,
            "skinType": "Normal"
        }))
        .unwrap();
        assert_eq!(doc.weight, Some(65.0));
        assert!(Profile::from_doc(doc).is_complete());
    }

    #[test]
    fn test_lenient_numbers_accept_strings() {
        let doc: ProfileDoc = serde_json::from_value(serde_json::json!({
            "uid": "u1",
            "height": "170",
            "weight": " 65.5 ",
            "age": "41",
            "bmi": "not a number"
        }))
        .unwrap();
        assert_eq!(doc.height, Some(170.0));
        assert_eq!(doc.weight, Some(65.5));
        assert_eq!(doc.age, Some(41.0));
        assert_eq!(doc.bmi, None);
    }

    #[test]
    fn test_from_doc_collapses_empty_strings() {
        let mut doc = complete_doc();
        doc.name = Some(String::new());
        doc.city = Some(String::new());
        let profile = Profile::from_doc(doc);
        assert!(profile.name.is_none());
        assert!(profile.city.is_none());
        assert!(!profile.is_complete());
    }

    #[test]
    fn test_from_doc_derives_missing_bmi() {
        let mut doc = complete_doc();
        doc.bmi = None;
        let profile = Profile::from_doc(doc);
        // 65 / 1.7^2 = 22.49 -> 22.5
        assert_eq!(profile.bmi, Some(22.5));
    }

    #[test]
    fn test_compute_bmi_rejects_nonpositive_inputs() {
        assert_eq!(compute_bmi(Some(0.0), Some(65.0)), None);
        assert_eq!(compute_bmi(Some(170.0), None), None);
    }

    #[test]
    fn test_into_doc_preserves_created_at() {
        let mut prior = ProfileDoc::empty_for(&identity());
        prior.created_at = Some("2024-01-15T10:00:00Z".to_string());
        prior.updated_at = Some("2024-01-15T10:00:00Z".to_string());

        let patch = ProfilePatch {
            name: Some("Asha".to_string()),
            height: Some(170.0),
            weight: Some(65.0),
            skin_type: Some("Normal".to_string()),
            ..ProfilePatch::default()
        };
        let doc = patch.into_doc(&identity(), Some(&prior));

        assert_eq!(doc.uid, "u1");
        assert_eq!(doc.created_at, Some("2024-01-15T10:00:00Z".to_string()));
        let updated = chrono::DateTime::parse_from_rfc3339(doc.updated_at.as_deref().unwrap())
            .expect("updatedAt parses");
        let created = chrono::DateTime::parse_from_rfc3339("2024-01-15T10:00:00Z").unwrap();
        assert!(updated > created, "updatedAt moves forward");
        assert_eq!(doc.bmi, Some(22.5));
    }

    #[test]
    fn test_into_doc_without_prior_sets_created_at_now() {
        let patch = ProfilePatch::default();
        let doc = patch.into_doc(&identity(), None);
        assert!(doc.created_at.is_some());
        assert_eq!(doc.created_at, doc.updated_at);
    }

    #[test]
    fn test_into_doc_is_a_full_overwrite() {
        let mut prior = ProfileDoc::empty_for(&identity());
        prior.city = Some("Pune".to_string());
        prior.medical_conditions = vec!["Asthma".to_string()];

        // Patch omits city and conditions; the overwrite clears them.
        let doc = ProfilePatch {
            name: Some("Asha".to_string()),
            ..ProfilePatch::default()
        }
        .into_doc(&identity(), Some(&prior));

        assert!(doc.city.is_none());
        assert!(doc.medical_conditions.is_empty());
    }

    #[test]
    fn test_patch_validation_bounds() {
        let valid = ProfilePatch {
            name: Some("Asha".to_string()),
            age: Some(34),
            height: Some(170.0),
            weight: Some(65.0),
            ..ProfilePatch::default()
        };
        assert!(valid.validate().is_ok());

        let bad_age = ProfilePatch {
            age: Some(300),
            ..ProfilePatch::default()
        };
        assert!(bad_age.validate().is_err());

        let bad_height = ProfilePatch {
            height: Some(5.0),
            ..ProfilePatch::default()
        };
        assert!(bad_height.validate().is_err());

        let empty_name = ProfilePatch {
            name: Some(String::new()),
            ..ProfilePatch::default()
        };
        assert!(empty_name.validate().is_err());
    }

    #[test]
    fn test_initials() {
        let mut profile = Profile::from_doc(complete_doc());
        profile.name = Some("Asha Rao".to_string());
        assert_eq!(profile.initials(), "AR");

        profile.name = Some("asha".to_string());
        assert_eq!(profile.initials(), "AS");

        profile.name = None;
        assert_eq!(profile.initials(), "U");
    }
}
