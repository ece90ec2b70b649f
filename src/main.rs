// SPDX-License-Identifier: MIT
// Copyright 2026 SkinPilot Contributors

//! SkinPilot session shell.
//!
//! Headless harness for the session core: resolves the identity state,
//! optionally signs in with debug credentials, and logs every route
//! transition. Useful against the Firestore emulator and a locally running
//! backend.

use skinpilot_session::{config::Config, SessionContext};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(project = %config.gcp_project_id, "Starting session shell");

    let context = SessionContext::connect(config)
        .await
        .expect("Failed to connect to profile store");

    let gate = context.gate();
    let gate_task = gate.start();
    let mut routes = gate.watch_route();

    // Optional debug sign-in so the full routing flow can be observed.
    if let (Ok(email), Ok(password)) = (
        std::env::var("DEBUG_EMAIL"),
        std::env::var("DEBUG_PASSWORD"),
    ) {
        match context.auth.sign_in(&email, &password).await {
            Ok(identity) => tracing::info!(uid = %identity.uid, "Debug sign-in succeeded"),
            Err(e) => tracing::warn!(error = %e, "Debug sign-in failed"),
        }
    }

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutting down");
                break;
            }
            changed = routes.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = routes.borrow_and_update().clone();
                tracing::info!(
                    route = %state.route,
                    uid = state.identity.as_ref().map(|i| i.uid.as_str()).unwrap_or("-"),
                    "Route changed"
                );
            }
        }
    }

    gate_task.abort();
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("skinpilot_session=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
