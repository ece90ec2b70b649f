// SPDX-License-Identifier: MIT
// Copyright 2026 SkinPilot Contributors

//! Saving the onboarding patch through the gate.

use skinpilot_session::error::AppError;
use skinpilot_session::models::{ProfileDoc, ProfilePatch, Route};
use std::time::Duration;

mod common;
use common::{identity, memory_gate, wait_for_route};

fn full_patch() -> ProfilePatch {
    ProfilePatch {
        name: Some("Asha Rao".to_string()),
        age: Some(34),
        height: Some(170.0),
        weight: Some(65.0),
        skin_type: Some("Combination".to_string()),
        city: Some("Pune".to_string()),
        medical_conditions: vec!["Thyroid".to_string()],
        ..ProfilePatch::default()
    }
}

#[tokio::test]
async fn test_completing_onboarding_saves_and_routes_home() {
    let (gate, store, feed) = memory_gate();
    let mut prior = ProfileDoc::empty_for(&identity("u1"));
    prior.created_at = Some("2024-01-15T10:00:00Z".to_string());
    prior.updated_at = Some("2024-01-15T10:00:00Z".to_string());
    store.insert(prior);

    let _task = gate.start();
    let mut routes = gate.watch_route();
    feed.publish(Some(identity("u1")));
    wait_for_route(&mut routes, Route::OnboardingRequired).await;

    let profile = gate.complete_onboarding(full_patch()).await.unwrap();
    assert!(profile.is_complete());
    assert_eq!(profile.name.as_deref(), Some("Asha Rao"));
    assert_eq!(profile.bmi, Some(22.5));
    assert_eq!(profile.created_at.as_deref(), Some("2024-01-15T10:00:00Z"));

    let saved = store.snapshot("u1").unwrap();
    assert_eq!(saved.created_at.as_deref(), Some("2024-01-15T10:00:00Z"));
    assert!(
        saved.updated_at > saved.created_at,
        "updatedAt moves forward on save"
    );
    assert_eq!(saved.medical_conditions, vec!["Thyroid".to_string()]);

    wait_for_route(&mut routes, Route::Home).await;
}

#[tokio::test]
async fn test_partial_patch_saves_but_keeps_onboarding_route() {
    let (gate, store, feed) = memory_gate();
    let _task = gate.start();
    let mut routes = gate.watch_route();
    feed.publish(Some(identity("u1")));
    wait_for_route(&mut routes, Route::OnboardingRequired).await;

    let patch = ProfilePatch {
        name: Some("Asha".to_string()),
        ..ProfilePatch::default()
    };
    let profile = gate.complete_onboarding(patch).await.unwrap();
    assert!(!profile.is_complete());

    // The save is accepted, but the route does not advance.
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(gate.route().route, Route::OnboardingRequired);
    assert_eq!(store.snapshot("u1").unwrap().name.as_deref(), Some("Asha"));
}

#[tokio::test]
async fn test_invalid_patch_is_rejected_before_write() {
    let (gate, store, feed) = memory_gate();
    let _task = gate.start();
    let mut routes = gate.watch_route();
    feed.publish(Some(identity("u1")));
    wait_for_route(&mut routes, Route::OnboardingRequired).await;

    let before = store.snapshot("u1").unwrap();
    let patch = ProfilePatch {
        age: Some(300),
        ..full_patch()
    };

    let err = gate.complete_onboarding(patch).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(store.snapshot("u1").unwrap(), before, "document unchanged");
    assert_eq!(gate.route().route, Route::OnboardingRequired);
}

#[tokio::test]
async fn test_write_failure_surfaces_and_leaves_document_alone() {
    let (gate, store, feed) = memory_gate();
    let _task = gate.start();
    let mut routes = gate.watch_route();
    feed.publish(Some(identity("u1")));
    wait_for_route(&mut routes, Route::OnboardingRequired).await;

    store.set_fail_writes(true);
    let err = gate.complete_onboarding(full_patch()).await.unwrap_err();
    assert!(matches!(err, AppError::Store(_)));

    assert!(store.snapshot("u1").unwrap().name.is_none());
    assert_eq!(gate.route().route, Route::OnboardingRequired);
}

#[tokio::test]
async fn test_save_without_identity_is_rejected() {
    let (gate, _store, feed) = memory_gate();
    let _task = gate.start();
    let mut routes = gate.watch_route();
    feed.publish(None);
    wait_for_route(&mut routes, Route::Unauthenticated).await;

    let err = gate.complete_onboarding(full_patch()).await.unwrap_err();
    assert!(matches!(err, AppError::NotSignedIn));
}

#[tokio::test]
async fn test_save_without_prior_document_sets_fresh_timestamps() {
    let (gate, store, feed) = memory_gate();
    // Reject the ensure write so no document exists at save time.
    store.set_fail_writes(true);

    let _task = gate.start();
    let mut routes = gate.watch_route();
    feed.publish(Some(identity("u1")));
    wait_for_route(&mut routes, Route::OnboardingRequired).await;
    assert!(store.snapshot("u1").is_none(), "ensure write was rejected");

    store.set_fail_writes(false);
    let profile = gate.complete_onboarding(full_patch()).await.unwrap();
    assert_eq!(profile.created_at, profile.updated_at);
    assert!(profile.created_at.is_some());

    wait_for_route(&mut routes, Route::Home).await;
}
