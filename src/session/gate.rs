// SPDX-License-Identifier: MIT
// Copyright 2026 SkinPilot Contributors

//! The session/profile gate.
//!
//! Subscribes to the identity feed and, for every notification, decides which
//! top-level route the app should show:
//!
//! - no notification yet         -> `initializing`
//! - signed out                  -> `unauthenticated`
//! - signed in, profile partial  -> `onboarding-required`
//! - signed in, profile complete -> `home`
//!
//! On each sign-in the gate ensures a profile document exists (creating the
//! nulled initial document on first sign-in), then fetches it and evaluates
//! completeness. Store failures never sign the user out: fetch errors route
//! to onboarding so the user can re-enter their data.
//!
//! Lookups are tagged with the identity event's sequence number; a result
//! whose sequence number is behind the feed is discarded instead of
//! publishing a route for a superseded identity.

use crate::auth::{AuthEvent, FeedSeq, IdentityFeed};
use crate::db::ProfileStore;
use crate::error::{AppError, Result};
use crate::models::{Identity, Profile, ProfileDoc, ProfilePatch, RouteState};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use validator::Validate;

/// Route-deciding gate between the identity provider and the profile store.
///
/// Cloning shares the gate; all clones observe the same route state.
pub struct SessionGate<S> {
    inner: Arc<GateInner<S>>,
    feed: IdentityFeed,
}

struct GateInner<S> {
    profiles: S,
    seq: FeedSeq,
    route_tx: watch::Sender<RouteState>,
}

impl<S> Clone for SessionGate<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            feed: self.feed.clone(),
        }
    }
}

impl<S: ProfileStore> SessionGate<S> {
    pub fn new(profiles: S, feed: IdentityFeed) -> Self {
        let (route_tx, _rx) = watch::channel(RouteState::initializing());
        Self {
            inner: Arc::new(GateInner {
                profiles,
                seq: feed.seq_handle(),
                route_tx,
            }),
            feed,
        }
    }

    /// Spawn the evaluation loop.
    ///
    /// Events published before the call are replayed, so starting the gate
    /// after the identity provider resolved its initial state is fine. The
    /// task holds no feed publisher itself, so it ends once every publisher
    /// of the feed is gone.
    pub fn start(&self) -> JoinHandle<()> {
        let inner = self.inner.clone();
        let mut events = self.feed.subscribe();
        tokio::spawn(async move {
            let current = events.borrow_and_update().clone();
            if current.seq > 0 {
                inner.evaluate(current).await;
            }
            while events.changed().await.is_ok() {
                let event = events.borrow_and_update().clone();
                inner.evaluate(event).await;
            }
            tracing::debug!("Identity feed closed; gate loop ending");
        })
    }

    /// Current route decision.
    pub fn route(&self) -> RouteState {
        self.inner.route_tx.borrow().clone()
    }

    /// Subscribe to route changes. Only distinct route states wake watchers.
    pub fn watch_route(&self) -> watch::Receiver<RouteState> {
        self.inner.route_tx.subscribe()
    }

    /// Save the onboarding patch as the signed-in identity's full profile
    /// document and return the profile the store now holds.
    ///
    /// The write replaces the whole document except `createdAt`, which is
    /// carried over from the prior document. After the save the document is
    /// re-fetched so the returned profile (and the route decision) reflect
    /// what the store accepted rather than what was submitted.
    pub async fn complete_onboarding(&self, patch: ProfilePatch) -> Result<Profile> {
        patch.validate()?;

        let identity = self
            .inner
            .route_tx
            .borrow()
            .identity
            .clone()
            .ok_or(AppError::NotSignedIn)?;
        let seq = self.feed.latest_seq();

        let prior = self.inner.profiles.get_profile(&identity.uid).await?;
        let doc = patch.into_doc(&identity, prior.as_ref());
        self.inner.profiles.upsert_profile(&doc).await?;

        let saved = self
            .inner
            .profiles
            .get_profile(&identity.uid)
            .await?
            .ok_or_else(|| AppError::Store("Profile document missing after save".to_string()))?;
        let profile = Profile::from_doc(saved);

        tracing::info!(
            uid = %identity.uid,
            complete = profile.is_complete(),
            "Profile saved"
        );

        if seq == self.feed.latest_seq() {
            self.inner
                .publish(seq, RouteState::signed_in(identity, profile.is_complete()));
        } else {
            tracing::debug!(uid = %profile.uid, "Identity changed during save; route not updated");
        }

        Ok(profile)
    }
}

impl<S: ProfileStore> GateInner<S> {
    async fn evaluate(&self, event: AuthEvent) {
        match event.identity {
            None => self.publish(event.seq, RouteState::unauthenticated()),
            Some(identity) => {
                let route = self.route_for_identity(&identity).await;
                self.publish(event.seq, route);
            }
        }
    }

    /// Ensure-then-fetch for a signed-in identity.
    async fn route_for_identity(&self, identity: &Identity) -> RouteState {
        // A failed ensure is not fatal: the document may already exist, and
        // the fetch below decides the route either way.
        if let Err(e) = self.ensure_profile_doc(identity).await {
            tracing::warn!(uid = %identity.uid, error = %e, "Profile ensure failed");
        }

        match self.profiles.get_profile(&identity.uid).await {
            Ok(Some(doc)) => {
                let profile = Profile::from_doc(doc);
                RouteState::signed_in(identity.clone(), profile.is_complete())
            }
            Ok(None) => RouteState::signed_in(identity.clone(), false),
            Err(e) => {
                tracing::warn!(
                    uid = %identity.uid,
                    error = %e,
                    "Profile fetch failed; routing to onboarding"
                );
                RouteState::signed_in(identity.clone(), false)
            }
        }
    }

    async fn ensure_profile_doc(&self, identity: &Identity) -> Result<()> {
        if self.profiles.get_profile(&identity.uid).await?.is_none() {
            tracing::info!(uid = %identity.uid, "Creating initial profile document");
            self.profiles
                .upsert_profile(&ProfileDoc::empty_for(identity))
                .await?;
        }
        Ok(())
    }

    /// Publish a route computed for the identity event `seq`, unless a newer
    /// identity notification has arrived in the meantime.
    fn publish(&self, seq: u64, route: RouteState) {
        let latest = self.seq.latest();
        if seq < latest {
            tracing::debug!(seq, latest, "Discarding route for superseded identity");
            return;
        }

        let changed = self.route_tx.send_if_modified(|current| {
            if *current == route {
                return false;
            }
            *current = route.clone();
            true
        });
        if changed {
            tracing::info!(seq, route = %route.route, "Route updated");
        }
    }
}
