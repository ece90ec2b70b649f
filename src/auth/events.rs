// SPDX-License-Identifier: MIT
// Copyright 2026 SkinPilot Contributors

//! Identity-change notification feed.
//!
//! Every sign-in, sign-out and restored session is published here as an
//! [`AuthEvent`] carrying a monotonically increasing sequence number. The
//! sequence number lets downstream consumers (the session gate) detect that
//! a slow lookup belongs to a superseded identity and discard its result
//! instead of publishing stale state.

use crate::models::Identity;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

/// One identity-change notification.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthEvent {
    /// Monotonic sequence number; 0 is reserved for "nothing published yet"
    pub seq: u64,
    /// The signed-in identity, or `None` after sign-out
    pub identity: Option<Identity>,
}

impl AuthEvent {
    fn initial() -> Self {
        Self {
            seq: 0,
            identity: None,
        }
    }
}

/// Broadcast feed of identity changes.
///
/// Cloning is cheap; all clones publish to and subscribe from the same
/// underlying channel. Subscribers only ever observe the latest event, and
/// the channel never moves backwards in sequence order even when publishers
/// race.
#[derive(Clone)]
pub struct IdentityFeed {
    inner: Arc<FeedInner>,
}

struct FeedInner {
    tx: watch::Sender<AuthEvent>,
    seq: Arc<AtomicU64>,
}

impl IdentityFeed {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(AuthEvent::initial());
        Self {
            inner: Arc::new(FeedInner {
                tx,
                seq: Arc::new(AtomicU64::new(0)),
            }),
        }
    }

    /// Publish the next identity state and return its sequence number.
    pub fn publish(&self, identity: Option<Identity>) -> u64 {
        let seq = self.inner.seq.fetch_add(1, Ordering::SeqCst) + 1;
        let event = AuthEvent { seq, identity };
        self.inner.tx.send_if_modified(move |current| {
            if current.seq < seq {
                *current = event;
                true
            } else {
                false
            }
        });
        seq
    }

    /// Subscribe to identity changes. The receiver starts marked as changed
    /// if anything has been published before the call.
    pub fn subscribe(&self) -> watch::Receiver<AuthEvent> {
        self.inner.tx.subscribe()
    }

    /// Highest sequence number handed out so far.
    pub fn latest_seq(&self) -> u64 {
        self.inner.seq.load(Ordering::SeqCst)
    }

    /// The most recently published event (seq 0 when nothing was published).
    pub fn current(&self) -> AuthEvent {
        self.inner.tx.borrow().clone()
    }

    /// Handle onto the sequence counter that does not keep the feed open.
    ///
    /// Receivers see the feed as closed once every [`IdentityFeed`] clone is
    /// dropped; a `FeedSeq` can outlive that without pinning the channel.
    pub fn seq_handle(&self) -> FeedSeq {
        FeedSeq {
            seq: self.inner.seq.clone(),
        }
    }
}

/// Read-only view of the feed's sequence counter.
#[derive(Clone)]
pub struct FeedSeq {
    seq: Arc<AtomicU64>,
}

impl FeedSeq {
    /// Highest sequence number the feed has handed out so far.
    pub fn latest(&self) -> u64 {
        self.seq.load(Ordering::SeqCst)
    }
}

impl Default for IdentityFeed {
    fn default() -> Self {
        Self::new()
    }
}
