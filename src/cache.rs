//! Immutable classification cache.
//!
//! Once a wallet's exit from a token is classified, that verdict never
//! changes, so entries carry no TTL and are never invalidated. The only
//! bound is a hard capacity cap; at capacity moka admits new entries and
//! evicts per its own policy. Evicted pairs are recomputable from chain
//! history.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use moka::future::Cache;
use serde::Serialize;

use crate::types::ClassificationResult;

/// Hard cap on cached (wallet, token) pairs.
const MAX_ENTRIES: u64 = 100_000;

/// A finalized classification plus its rendered badge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CachedClassification {
    pub result: ClassificationResult,
    /// Badge image as a base64 data URL.
    pub badge_base64: String,
    /// Unix milliseconds at insertion.
    pub cached_at: i64,
}

/// Counters exposed on the public endpoint description.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CacheStats {
    pub keys: u64,
    pub hits: u64,
    pub misses: u64,
}

/// Permanent (wallet, token) to classification store.
///
/// Keys are the exact-case `wallet:token` pair; addresses are
/// case-sensitive, so no normalization happens here.
pub struct ResultCache {
    entries: Cache<String, Arc<CachedClassification>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ResultCache {
    pub fn new() -> Self {
        Self {
            entries: Cache::builder().max_capacity(MAX_ENTRIES).build(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    fn key(wallet: &str, token: &str) -> String {
        format!("{wallet}:{token}")
    }

    /// Cached entry for the pair, if any.
    pub async fn get(&self, wallet: &str, token: &str) -> Option<Arc<CachedClassification>> {
        let entry = self.entries.get(&Self::key(wallet, token)).await;
        match entry {
            Some(_) => self.hits.fetch_add(1, Ordering::Relaxed),
            None => self.misses.fetch_add(1, Ordering::Relaxed),
        };
        entry
    }

    /// Record a finalized classification. Idempotent for concurrent
    /// writers: both store the same immutable value.
    pub async fn insert(&self, wallet: &str, token: &str, entry: CachedClassification) {
        self.entries
            .insert(Self::key(wallet, token), Arc::new(entry))
            .await;
    }

    /// Whether the pair is already classified.
    pub fn contains(&self, wallet: &str, token: &str) -> bool {
        self.entries.contains_key(&Self::key(wallet, token))
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            keys: self.entries.entry_count(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new()
    }
}
