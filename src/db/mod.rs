//! Profile document store (Firestore, plus an in-memory store for tests).

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::MemoryStore;

use crate::error::Result;
use crate::models::ProfileDoc;
use std::future::Future;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
}

/// Keyed access to profile documents.
///
/// The session gate is generic over this trait so the hosted store can be
/// swapped for [`MemoryStore`] in tests and local tools.
pub trait ProfileStore: Clone + Send + Sync + 'static {
    /// Fetch the document for `uid`; `None` when it has never been written.
    fn get_profile(&self, uid: &str) -> impl Future<Output = Result<Option<ProfileDoc>>> + Send;

    /// Create or fully overwrite the document keyed by `doc.uid`.
    fn upsert_profile(&self, doc: &ProfileDoc) -> impl Future<Output = Result<()>> + Send;
}
