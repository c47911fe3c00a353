//! Message loader: fetches, parses and caches per-locale messages.

use crate::i18n::{LocaleMetrics, LocaleRegistry, MessageMapping, MessageStore};
use crate::i18n::Locale;
use futures::future::join_all;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};
use tracing::{debug, info, warn};

/// Loads `MessageMapping`s from a `MessageStore`.
///
/// Each successful load is cached in a write-once slot per registered
/// locale; readers never lock. Failures are not cached, so every call after a
/// failure makes exactly one new attempt against the store.
pub struct MessageLoader {
    store: Arc<dyn MessageStore>,
    cache: HashMap<&'static str, OnceLock<Arc<MessageMapping>>>,
    metrics: Arc<LocaleMetrics>,
}

impl MessageLoader {
    /// Create a loader with one cache slot per locale in `registry`.
    pub fn new(registry: &LocaleRegistry, store: Arc<dyn MessageStore>) -> Self {
        let cache = registry
            .codes()
            .into_iter()
            .map(|code| (code, OnceLock::new()))
            .collect();

        Self {
            store,
            cache,
            metrics: Arc::new(LocaleMetrics::new()),
        }
    }

    pub fn metrics(&self) -> &Arc<LocaleMetrics> {
        &self.metrics
    }

    /// Whether messages for `locale` are already cached.
    pub fn is_cached(&self, locale: Locale) -> bool {
        self.cache
            .get(locale.code())
            .is_some_and(|slot| slot.get().is_some())
    }

    /// Load the messages for `locale`.
    ///
    /// Returns `None` when the store has no document for the locale or the
    /// document is malformed; the cause is logged, never propagated.
    pub async fn load_messages(&self, locale: Locale) -> Option<Arc<MessageMapping>> {
        let slot = self.cache.get(locale.code());

        if let Some(messages) = slot.and_then(OnceLock::get) {
            self.metrics.record_cache_hit();
            return Some(Arc::clone(messages));
        }
        self.metrics.record_cache_miss();

        let document = match self.store.fetch(locale.code()).await {
            Ok(document) => document,
            Err(e) => {
                self.metrics.record_load_failure();
                warn!("Could not load messages for locale {}: {}", locale, e);
                return None;
            }
        };

        let messages = match MessageMapping::from_json(&document) {
            Ok(messages) => Arc::new(messages),
            Err(e) => {
                self.metrics.record_load_failure();
                warn!("Malformed messages for locale {}: {}", locale, e);
                return None;
            }
        };

        debug!("Loaded {} messages for locale {}", messages.len(), locale);

        match slot {
            // A concurrent load may have filled the slot first; keep the first value.
            Some(slot) => Some(Arc::clone(slot.get_or_init(|| messages))),
            None => Some(messages),
        }
    }

    /// Load several locales concurrently, warming the cache.
    ///
    /// # Returns
    /// The locales whose messages could not be loaded.
    pub async fn preload(&self, locales: &[Locale]) -> Vec<Locale> {
        let results = join_all(
            locales
                .iter()
                .map(|&locale| async move { (locale, self.load_messages(locale).await) }),
        )
        .await;

        let failed: Vec<Locale> = results
            .into_iter()
            .filter(|(_, messages)| messages.is_none())
            .map(|(locale, _)| locale)
            .collect();

        info!(
            "Preloaded messages for {} of {} locales",
            locales.len() - failed.len(),
            locales.len()
        );

        failed
    }
}
