//! Process-wide query cache.
//!
//! Keys are (group, parameter digest). Three behaviors the read paths rely
//! on:
//!
//! - **TTL**: each entry carries its fetch time; a hit older than the
//!   caller's TTL is refetched.
//! - **Single-flight**: concurrent requests for the same key share one
//!   fetch. Callers serialize on a per-key lock, so the second caller finds
//!   the first one's fresh entry instead of issuing its own request.
//! - **Group invalidation**: writes invalidate whole groups by key prefix
//!   ("refresh every triples list") rather than enumerating exact keys.
//!
//! Values are stored as JSON, which every cached read type round-trips
//! through anyway on the wire. Errors are never cached.

use dashmap::DashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Cache groups shared by the read paths and the write-side invalidations.
pub mod groups {
    /// Atom search results.
    pub const SEARCH: &str = "global-search";
    /// Single-atom detail views.
    pub const ATOM_DETAILS: &str = "atom-details";
    /// Relationship lists keyed by subject.
    pub const TRIPLES: &str = "triples-by-subject";
    /// Protocol fee quotes.
    pub const TRIPLE_COST: &str = "triple-cost";
}

/// TTL for indexer reads.
pub const READ_TTL: Duration = Duration::from_secs(30);

/// TTL for protocol fee quotes; the fee can change with protocol state, so
/// quotes go stale after a minute.
pub const COST_TTL: Duration = Duration::from_secs(60);

#[derive(Default)]
struct Slot {
    value: Option<(serde_json::Value, Instant)>,
}

#[derive(Default)]
pub struct QueryCache {
    slots: DashMap<String, Arc<Mutex<Slot>>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached value for (group, params) if it is younger than
    /// `ttl`, otherwise run `fetch` and cache its success.
    pub async fn get_or_fetch<T, E, F, Fut>(
        &self,
        group: &str,
        params: &impl Serialize,
        ttl: Duration,
        fetch: F,
    ) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let key = cache_key(group, params);
        let slot = self
            .slots
            .entry(key.clone())
            .or_default()
            .clone();

        // Per-key lock held across the fetch: this is what makes identical
        // concurrent requests share a single flight.
        let mut guard = slot.lock().await;
        if let Some((value, stored_at)) = &guard.value {
            if stored_at.elapsed() < ttl {
                match serde_json::from_value::<T>(value.clone()) {
                    Ok(hit) => {
                        tracing::trace!(group, key = %key, "cache hit");
                        return Ok(hit);
                    }
                    Err(err) => {
                        tracing::warn!(group, %err, "dropping undecodable cache entry");
                        guard.value = None;
                    }
                }
            }
        }

        let fresh = fetch().await?;
        match serde_json::to_value(&fresh) {
            Ok(encoded) => guard.value = Some((encoded, Instant::now())),
            Err(err) => tracing::warn!(group, %err, "cache skip: value not encodable"),
        }
        Ok(fresh)
    }

    /// Drop every entry in a group. Entries mid-fetch repopulate their own
    /// (detached) slots and are re-requested on next use.
    pub fn invalidate_group(&self, group: &str) {
        let prefix = format!("{group}:");
        let before = self.slots.len();
        self.slots.retain(|key, _| !key.starts_with(&prefix));
        let dropped = before.saturating_sub(self.slots.len());
        tracing::debug!(group, dropped, "cache group invalidated");
    }

    #[cfg(test)]
    fn entry_count(&self) -> usize {
        self.slots.len()
    }
}

fn cache_key(group: &str, params: &impl Serialize) -> String {
    let encoded = serde_json::to_vec(params).unwrap_or_default();
    let digest = Sha256::digest(&encoded);
    format!("{group}:{}", hex::encode(&digest[..8]))
}
