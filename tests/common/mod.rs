// SPDX-License-Identifier: MIT
// Copyright 2026 SkinPilot Contributors

use skinpilot_session::auth::IdentityFeed;
use skinpilot_session::db::{FirestoreDb, MemoryStore};
use skinpilot_session::models::{Identity, ProfileDoc, Route, RouteState};
use skinpilot_session::session::SessionGate;
use std::time::Duration;
use tokio::sync::watch;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Identity fixture.
#[allow(dead_code)]
pub fn identity(uid: &str) -> Identity {
    Identity {
        uid: uid.to_string(),
        email: Some(format!("{uid}@example.com")),
        phone_number: None,
    }
}

/// A profile document that passes the completeness check.
#[allow(dead_code)]
pub fn complete_doc(uid: &str) -> ProfileDoc {
    ProfileDoc {
        name: Some("A".to_string()),
        height: Some(170.0),
        weight: Some(65.0),
        skin_type: Some("Normal".to_string()),
        ..ProfileDoc::empty_for(&identity(uid))
    }
}

/// Gate over a fresh in-memory store, plus the store and feed handles.
#[allow(dead_code)]
pub fn memory_gate() -> (SessionGate<MemoryStore>, MemoryStore, IdentityFeed) {
    let store = MemoryStore::new();
    let feed = IdentityFeed::new();
    let gate = SessionGate::new(store.clone(), feed.clone());
    (gate, store, feed)
}

/// Wait until the gate publishes the expected route, or panic after 2s.
#[allow(dead_code)]
pub async fn wait_for_route(rx: &mut watch::Receiver<RouteState>, expected: Route) {
    let result = tokio::time::timeout(Duration::from_secs(2), async {
        loop {
            if rx.borrow_and_update().route == expected {
                return;
            }
            if rx.changed().await.is_err() {
                panic!("route channel closed while waiting for {expected}");
            }
        }
    })
    .await;
    assert!(result.is_ok(), "timed out waiting for route {expected}");
}
