//! Freshness-tagged snapshots of externally owned data.
//!
//! Balances and profiles are fetched from other services on every action.
//! When a fetch fails, a previously stored copy may be shown to the user,
//! but it must never authorize a purchase. [`Snapshot`] makes the
//! difference explicit in the type that flows through the engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Where a snapshot's value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Freshness {
    /// Fetched from the owning service for this invocation.
    Fresh,
    /// Read from a local cache because the owning service was unavailable.
    CachedFallback,
}

/// A value together with its provenance.
///
/// # Example
///
/// ```
/// use rewards_engine::models::Snapshot;
///
/// let balance = Snapshot::fresh(250u64);
/// assert!(balance.is_fresh());
/// assert_eq!(*balance.require_fresh().unwrap(), 250);
///
/// let cached = Snapshot::cached(400u64, balance.fetched_at);
/// assert!(cached.require_fresh().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot<T> {
    /// The captured value.
    pub value: T,
    /// Whether the value was fetched now or read from cache.
    pub freshness: Freshness,
    /// When the value was originally fetched from its owner.
    pub fetched_at: DateTime<Utc>,
}

impl<T> Snapshot<T> {
    /// Wraps a value that was just fetched from its owning service.
    pub fn fresh(value: T) -> Self {
        Self {
            value,
            freshness: Freshness::Fresh,
            fetched_at: Utc::now(),
        }
    }

    /// Wraps a value read from a cache, keeping its original fetch time.
    pub fn cached(value: T, fetched_at: DateTime<Utc>) -> Self {
        Self {
            value,
            freshness: Freshness::CachedFallback,
            fetched_at,
        }
    }

    /// Returns true if the value was fetched for this invocation.
    pub fn is_fresh(&self) -> bool {
        self.freshness == Freshness::Fresh
    }

    /// Returns the value, or `StaleBalance` if it came from a cache.
    pub fn require_fresh(&self) -> EngineResult<&T> {
        if self.is_fresh() {
            Ok(&self.value)
        } else {
            Err(EngineError::StaleBalance {
                fetched_at: self.fetched_at,
            })
        }
    }

    /// Re-tags a stored copy as a cached fallback.
    pub fn into_cached(self) -> Self {
        Self {
            freshness: Freshness::CachedFallback,
            ..self
        }
    }

    /// Transforms the value, keeping freshness and fetch time.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Snapshot<U> {
        Snapshot {
            value: f(self.value),
            freshness: self.freshness,
            fetched_at: self.fetched_at,
        }
    }
}
