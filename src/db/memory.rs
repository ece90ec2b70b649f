// SPDX-License-Identifier: MIT
// Copyright 2026 SkinPilot Contributors

//! In-memory profile store for tests and offline tooling.
//!
//! Behaves like the hosted store (keyed full-document overwrite) and can
//! inject failures and read latency to exercise the gate's fail-safe and
//! stale-lookup paths.

use crate::db::ProfileStore;
use crate::error::{AppError, Result};
use crate::models::ProfileDoc;
use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// In-memory document store keyed by identity id.
///
/// Cloning shares the underlying map and the failure switches.
#[derive(Clone)]
pub struct MemoryStore {
    docs: Arc<DashMap<String, ProfileDoc>>,
    fail_reads: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
    read_delay_ms: Arc<AtomicU64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            docs: Arc::new(DashMap::new()),
            fail_reads: Arc::new(AtomicBool::new(false)),
            fail_writes: Arc::new(AtomicBool::new(false)),
            read_delay_ms: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Seed a document directly, bypassing the failure switches.
    pub fn insert(&self, doc: ProfileDoc) {
        self.docs.insert(doc.uid.clone(), doc);
    }

    /// Current stored document for `uid`, bypassing the failure switches.
    pub fn snapshot(&self, uid: &str) -> Option<ProfileDoc> {
        self.docs.get(uid).map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Make every subsequent read fail with a store error.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent write fail with a store error.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Delay every subsequent read, simulating a slow lookup.
    pub fn set_read_delay(&self, delay: Duration) {
        self.read_delay_ms
            .store(delay.as_millis() as u64, Ordering::SeqCst);
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileStore for MemoryStore {
    async fn get_profile(&self, uid: &str) -> Result<Option<ProfileDoc>> {
        let delay = self.read_delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(AppError::Store("injected read failure".to_string()));
        }
        Ok(self.docs.get(uid).map(|entry| entry.value().clone()))
    }

    async fn upsert_profile(&self, doc: &ProfileDoc) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::Store("injected write failure".to_string()));
        }
        self.docs.insert(doc.uid.clone(), doc.clone());
        Ok(())
    }
}
