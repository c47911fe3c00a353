//! Locale type: a code that has been validated against the registry.

use crate::i18n::{LocaleConfig, LocaleRegistry};
use serde::{Serialize, Serializer};
use std::fmt;
use thiserror::Error;

/// Error returned when a string is not a registered locale code.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown locale code: '{0}'")]
pub struct UnknownLocale(pub String);

/// A validated locale.
///
/// Only codes found in a `LocaleRegistry` can become a `Locale`, so every
/// value of this type that exists at runtime is a registry member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Locale {
    code: &'static str,
}

impl Locale {
    /// Create a Locale from a code string.
    ///
    /// # Returns
    /// * `Ok(Locale)` if the code is registered
    /// * `Err(UnknownLocale)` otherwise
    pub fn from_code(registry: &LocaleRegistry, code: &str) -> Result<Locale, UnknownLocale> {
        registry
            .get_by_code(code)
            .map(|config| Locale { code: config.code })
            .ok_or_else(|| UnknownLocale(code.to_string()))
    }

    /// The registry's default locale.
    pub fn default_of(registry: &LocaleRegistry) -> Locale {
        Locale {
            code: registry.default_code(),
        }
    }

    /// The locale code (e.g., "en", "fr").
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Full configuration for this locale.
    ///
    /// # Panics
    /// Panics if `registry` is not the registry this locale was built from
    /// and does not contain the code.
    pub fn config<'r>(&self, registry: &'r LocaleRegistry) -> &'r LocaleConfig {
        registry
            .get_by_code(self.code)
            .expect("Locale code should always be registered")
    }

    /// Whether this is the registry's default locale.
    pub fn is_default(&self, registry: &LocaleRegistry) -> bool {
        self.code == registry.default_code()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}

impl Serialize for Locale {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code)
    }
}
