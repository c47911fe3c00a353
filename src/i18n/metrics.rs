//! Locale resolution metrics.
//!
//! Counters for message cache usage, store failures and resolver outcomes.
//! One instance is owned by the `MessageLoader` and shared with the resolver.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Atomic counters; all updates use relaxed ordering.
#[derive(Debug, Default)]
pub struct LocaleMetrics {
    /// Messages served from the in-process cache
    cache_hits: AtomicUsize,

    /// Messages that had to be fetched from the store
    cache_misses: AtomicUsize,

    /// Store fetches that failed or returned a malformed document
    load_failures: AtomicUsize,

    /// Requests served in the default locale instead of the requested one
    fallbacks: AtomicUsize,

    /// Requests whose locale candidate was not registered
    not_found: AtomicUsize,
}

impl LocaleMetrics {
    /// Create a metrics instance with every counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a cache hit (messages already loaded for the locale).
    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a cache miss (messages fetched from the store).
    pub fn record_cache_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a failed or malformed store fetch.
    pub fn record_load_failure(&self) {
        self.load_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a request served in the default locale instead of the requested one.
    pub fn record_fallback(&self) {
        self.fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an unregistered locale candidate.
    pub fn record_not_found(&self) {
        self.not_found.fetch_add(1, Ordering::Relaxed);
    }

    /// Get the current cache hit count.
    pub fn cache_hits(&self) -> usize {
        self.cache_hits.load(Ordering::Relaxed)
    }

    /// Get the current cache miss count.
    pub fn cache_misses(&self) -> usize {
        self.cache_misses.load(Ordering::Relaxed)
    }

    /// Get the current load failure count.
    pub fn load_failures(&self) -> usize {
        self.load_failures.load(Ordering::Relaxed)
    }

    /// Get the current fallback count.
    pub fn fallbacks(&self) -> usize {
        self.fallbacks.load(Ordering::Relaxed)
    }

    /// Get the current count of unregistered candidates.
    pub fn not_found(&self) -> usize {
        self.not_found.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let hits = self.cache_hits();
        let misses = self.cache_misses();
        let total_lookups = hits + misses;
        let cache_hit_rate = if total_lookups > 0 {
            (hits as f64 / total_lookups as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            cache_hits: hits,
            cache_misses: misses,
            cache_hit_rate,
            load_failures: self.load_failures(),
            fallbacks: self.fallbacks(),
            not_found: self.not_found(),
        }
    }
}

/// Snapshot of the locale metrics, served by the health endpoint.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MetricsReport {
    pub cache_hits: usize,
    pub cache_misses: usize,

    /// Cache hit rate as a percentage (0-100)
    pub cache_hit_rate: f64,

    pub load_failures: usize,
    pub fallbacks: usize,
    pub not_found: usize,
}
