//! Request locale resolution.
//!
//! Turns a locale candidate into a `(Locale, MessageMapping)` pair, falling
//! back to the default locale once when the candidate's messages are missing.

use crate::i18n::detect::{detect_candidate, LocaleSource, RequestLocaleContext};
use crate::i18n::{Locale, LocaleRegistry, MessageLoader, MessageMapping};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

/// A fully resolved locale with its messages.
#[derive(Debug, Clone)]
pub struct ResolvedLocale {
    pub locale: Locale,
    pub messages: Arc<MessageMapping>,

    /// Set when the requested locale's messages were missing and the default
    /// locale was substituted.
    pub fell_back: bool,
}

/// Terminal failures of locale resolution.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// The candidate is not a registered locale. Surfaces as "not found".
    #[error("unsupported locale: '{0}'")]
    NotFound(String),

    /// The default locale's messages are unavailable. This is an operator
    /// error, not a request error.
    #[error("could not load messages for default locale: {0}")]
    MissingDefaultMessages(&'static str),
}

impl ResolveError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, ResolveError::MissingDefaultMessages(_))
    }
}

/// Resolves locales for incoming requests.
#[derive(Clone)]
pub struct LocaleResolver {
    registry: Arc<LocaleRegistry>,
    loader: Arc<MessageLoader>,
}

impl LocaleResolver {
    pub fn new(registry: Arc<LocaleRegistry>, loader: Arc<MessageLoader>) -> Self {
        Self { registry, loader }
    }

    pub fn registry(&self) -> &Arc<LocaleRegistry> {
        &self.registry
    }

    pub fn loader(&self) -> &Arc<MessageLoader> {
        &self.loader
    }

    /// Resolve a locale candidate.
    ///
    /// # Errors
    /// * `ResolveError::NotFound` if `candidate` is not registered
    /// * `ResolveError::MissingDefaultMessages` if the default locale's
    ///   messages are needed and cannot be loaded
    pub async fn resolve(&self, candidate: &str) -> Result<ResolvedLocale, ResolveError> {
        let Ok(locale) = Locale::from_code(&self.registry, candidate) else {
            self.loader.metrics().record_not_found();
            return Err(ResolveError::NotFound(candidate.to_string()));
        };

        if let Some(messages) = self.loader.load_messages(locale).await {
            return Ok(ResolvedLocale {
                locale,
                messages,
                fell_back: false,
            });
        }

        let default = Locale::default_of(&self.registry);
        if locale == default {
            error!("Messages for default locale {} are unavailable", default);
            return Err(ResolveError::MissingDefaultMessages(default.code()));
        }

        match self.loader.load_messages(default).await {
            Some(messages) => {
                self.loader.metrics().record_fallback();
                info!(
                    "Messages for {} unavailable, falling back to {}",
                    locale, default
                );
                Ok(ResolvedLocale {
                    locale: default,
                    messages,
                    fell_back: true,
                })
            }
            None => {
                error!(
                    "Messages for {} and default locale {} are unavailable",
                    locale, default
                );
                Err(ResolveError::MissingDefaultMessages(default.code()))
            }
        }
    }

    /// Detect the candidate from request signals and resolve it.
    pub async fn resolve_request(
        &self,
        ctx: &RequestLocaleContext,
    ) -> Result<(ResolvedLocale, LocaleSource), ResolveError> {
        let candidate = detect_candidate(&self.registry, ctx);
        let resolved = self.resolve(&candidate.value).await?;
        Ok((resolved, candidate.source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::InMemoryMessageStore;

    const EN: &str = r#"{"meta": {"title": "Portal"}}"#;
    const FR: &str = r#"{"meta": {"title": "Portail"}}"#;

    fn resolver_with(store: InMemoryMessageStore) -> LocaleResolver {
        let registry = Arc::new(LocaleRegistry::standard());
        let loader = Arc::new(MessageLoader::new(&registry, Arc::new(store)));
        LocaleResolver::new(registry, loader)
    }

    fn full_store() -> InMemoryMessageStore {
        InMemoryMessageStore::new()
            .with_document("en", EN)
            .with_document("fr", FR)
    }

    #[tokio::test]
    async fn test_resolves_valid_locale() {
        let resolver = resolver_with(full_store());
        let resolved = resolver.resolve("fr").await.unwrap();

        assert_eq!(resolved.locale.code(), "fr");
        assert_eq!(resolved.messages.get("meta.title"), Some("Portail"));
        assert!(!resolved.fell_back);
    }

    #[tokio::test]
    async fn test_unregistered_candidate_is_not_found() {
        let resolver = resolver_with(full_store());
        let err = resolver.resolve("xx").await.unwrap_err();

        assert_eq!(err, ResolveError::NotFound("xx".to_string()));
        assert!(!err.is_fatal());
        assert_eq!(resolver.loader().metrics().not_found(), 1);
    }

    #[tokio::test]
    async fn test_wrong_case_is_not_found() {
        let resolver = resolver_with(full_store());
        assert!(matches!(
            resolver.resolve("FR").await,
            Err(ResolveError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_messages_fall_back_to_default() {
        let resolver = resolver_with(full_store());
        let resolved = resolver.resolve("es").await.unwrap();

        assert_eq!(resolved.locale.code(), "en");
        assert_eq!(resolved.messages.get("meta.title"), Some("Portal"));
        assert!(resolved.fell_back);
        assert_eq!(resolver.loader().metrics().fallbacks(), 1);
    }

    #[tokio::test]
    async fn test_missing_default_messages_is_fatal() {
        let resolver = resolver_with(InMemoryMessageStore::new().with_document("fr", FR));
        let err = resolver.resolve("en").await.unwrap_err();

        assert_eq!(err, ResolveError::MissingDefaultMessages("en"));
        assert!(err.is_fatal());
    }

    #[tokio::test]
    async fn test_fallback_without_default_messages_is_fatal() {
        let resolver = resolver_with(InMemoryMessageStore::new().with_document("fr", FR));
        let err = resolver.resolve("es").await.unwrap_err();
        assert_eq!(err, ResolveError::MissingDefaultMessages("en"));
    }

    #[tokio::test]
    async fn test_resolve_request_uses_precedence() {
        let resolver = resolver_with(full_store());
        let ctx = RequestLocaleContext {
            path_locale: None,
            cookie_locale: Some("fr".to_string()),
            accept_language: Some("en".to_string()),
        };

        let (resolved, source) = resolver.resolve_request(&ctx).await.unwrap();
        assert_eq!(resolved.locale.code(), "fr");
        assert_eq!(source, LocaleSource::Cookie);
    }

    #[tokio::test]
    async fn test_resolve_request_invalid_cookie_is_not_found() {
        let resolver = resolver_with(full_store());
        let ctx = RequestLocaleContext {
            cookie_locale: Some("klingon".to_string()),
            accept_language: Some("fr".to_string()),
            ..Default::default()
        };

        assert!(matches!(
            resolver.resolve_request(&ctx).await,
            Err(ResolveError::NotFound(ref c)) if c == "klingon"
        ));
    }
}
