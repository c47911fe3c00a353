//! Internationalization (i18n) module for locale routing and translations.
//!
//! # Architecture
//!
//! - `registry`: the closed set of supported locales and the default locale
//! - `locale`: validated `Locale` type
//! - `validator`: membership check for arbitrary candidate strings
//! - `messages`: flattened translation mappings and the `t()` lookup
//! - `store`: where per-locale message documents come from
//! - `loader`: fetch, parse and cache messages per locale
//! - `metrics`: counters for cache usage, failures and fallbacks
//! - `detect`: locale candidate detection (URL > cookie > Accept-Language)
//! - `resolver`: validation plus one-level fallback to the default locale
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tenant_locale_web::i18n::*;
//!
//! let registry = Arc::new(LocaleRegistry::standard());
//! let store = Arc::new(FsMessageStore::new("locales"));
//! let loader = Arc::new(MessageLoader::new(&registry, store));
//! let resolver = LocaleResolver::new(registry, loader);
//!
//! let resolved = resolver.resolve("fr").await?;
//! let title = resolved.messages.translator().t("meta.title");
//! ```

pub mod detect;
mod loader;
mod locale;
mod messages;
mod metrics;
mod registry;
mod resolver;
mod store;
mod validator;

pub use detect::{LocaleCandidate, LocaleSource, RequestLocaleContext};
pub use loader::MessageLoader;
pub use locale::{Locale, UnknownLocale};
pub use messages::{interpolate, MessageFormatError, MessageMapping, Translator};
pub use metrics::{LocaleMetrics, MetricsReport};
pub use registry::{LocaleConfig, LocaleRegistry, RegistryError};
pub use resolver::{LocaleResolver, ResolveError, ResolvedLocale};
pub use store::{FsMessageStore, InMemoryMessageStore, MessageStore, StoreError};
pub use validator::is_valid_locale;
