//! External collaborators the engine reads from.
//!
//! The engine never talks to the network itself. Callers plug in the
//! profile store, the referral-history service and a local snapshot cache
//! through these traits.

use std::collections::HashMap;
use std::sync::RwLock;

use tracing::warn;

use crate::error::EngineResult;
use crate::models::{Profile, ReferralHistory, Snapshot};

/// Read access to the profile store.
pub trait ProfileStore {
    /// Fetches the current profile snapshot for a user.
    ///
    /// Implementations report transport failures as
    /// [`crate::error::EngineError::SourceUnavailable`].
    fn fetch_profile(&self, user_id: &str) -> EngineResult<Profile>;
}

/// Read access to the referral-history service.
pub trait ReferralHistorySource {
    /// Fetches referral counts for the users a member has referred.
    fn fetch_referral_history(&self, user_id: &str) -> EngineResult<ReferralHistory>;
}

/// Local storage for the last successfully fetched profile.
///
/// Cached profiles are advisory: they may be displayed when the profile
/// store is down, but are never used to authorize a checkout.
pub trait SnapshotCache {
    /// Returns the stored profile, tagged as a cached fallback.
    fn load(&self, user_id: &str) -> Option<Snapshot<Profile>>;

    /// Stores a freshly fetched profile.
    fn store(&self, user_id: &str, snapshot: &Snapshot<Profile>);
}

/// A process-local [`SnapshotCache`].
#[derive(Debug, Default)]
pub struct InMemorySnapshotCache {
    entries: RwLock<HashMap<String, Snapshot<Profile>>>,
}

impl InMemorySnapshotCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotCache for InMemorySnapshotCache {
    fn load(&self, user_id: &str) -> Option<Snapshot<Profile>> {
        // A poisoned lock reads as a cache miss.
        let entries = match self.entries.read() {
            Ok(entries) => entries,
            Err(_) => {
                warn!(user_id, "Snapshot cache lock poisoned; treating as cache miss");
                return None;
            }
        };
        entries.get(user_id).cloned().map(Snapshot::into_cached)
    }

    fn store(&self, user_id: &str, snapshot: &Snapshot<Profile>) {
        // A poisoned lock only loses the cache entry.
        match self.entries.write() {
            Ok(mut entries) => {
                entries.insert(user_id.to_string(), snapshot.clone());
            }
            Err(_) => {
                warn!(user_id, "Snapshot cache lock poisoned; dropping cache entry");
            }
        }
    }
}
