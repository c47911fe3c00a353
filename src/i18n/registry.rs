//! Locale registry: single source of truth for all supported locales.
//!
//! The registry is an immutable value built once at startup and shared
//! through an `Arc`. Components receive it explicitly instead of reaching for
//! ambient global state, which keeps the validator and resolver testable in
//! isolation.

use thiserror::Error;

/// Configuration for a supported locale.
///
/// Contains the code, the human-readable names and whether it is the default
/// locale of the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleConfig {
    /// Locale code as it appears in URLs (e.g., "en", "fr")
    pub code: &'static str,

    /// Display name in the locale's own language (e.g., "Français")
    pub display_name: &'static str,

    /// English name of the locale (e.g., "French")
    pub english_name: &'static str,

    /// Flag shown next to the locale in the language switcher
    pub flag: &'static str,

    /// Whether this is the default locale (exactly one must be true)
    pub is_default: bool,
}

/// Errors raised when a registry is built from an inconsistent locale list.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("locale registry must contain at least one locale")]
    Empty,

    #[error("duplicate locale code: '{0}'")]
    DuplicateCode(&'static str),

    #[error("locale '{0}' has no display name")]
    MissingDisplayName(&'static str),

    #[error("no default locale defined")]
    NoDefault,

    #[error("multiple default locales defined: {0:?}")]
    MultipleDefaults(Vec<&'static str>),
}

/// The closed set of supported locales.
#[derive(Debug, Clone)]
pub struct LocaleRegistry {
    locales: Vec<LocaleConfig>,
    default_index: usize,
}

impl LocaleRegistry {
    /// Build a registry from a list of locale configurations.
    ///
    /// # Errors
    /// Returns a `RegistryError` if the list is empty, contains a duplicate
    /// code, a locale without a display name, or does not designate exactly
    /// one default locale.
    pub fn new(locales: Vec<LocaleConfig>) -> Result<Self, RegistryError> {
        if locales.is_empty() {
            return Err(RegistryError::Empty);
        }

        for (i, locale) in locales.iter().enumerate() {
            if locales[..i].iter().any(|other| other.code == locale.code) {
                return Err(RegistryError::DuplicateCode(locale.code));
            }
            if locale.display_name.trim().is_empty() {
                return Err(RegistryError::MissingDisplayName(locale.code));
            }
        }

        let defaults: Vec<usize> = locales
            .iter()
            .enumerate()
            .filter(|(_, locale)| locale.is_default)
            .map(|(i, _)| i)
            .collect();

        let default_index = match defaults.as_slice() {
            [] => return Err(RegistryError::NoDefault),
            [index] => *index,
            _ => {
                return Err(RegistryError::MultipleDefaults(
                    defaults.iter().map(|&i| locales[i].code).collect(),
                ))
            }
        };

        Ok(Self {
            locales,
            default_index,
        })
    }

    /// The registry shipped with the application: `en, es, fr, de, it, ro`
    /// with `en` as the default.
    pub fn standard() -> Self {
        Self::new(standard_locales()).expect("standard locale list is consistent")
    }

    /// Get a locale configuration by its code (exact, case-sensitive match).
    pub fn get_by_code(&self, code: &str) -> Option<&LocaleConfig> {
        self.locales.iter().find(|locale| locale.code == code)
    }

    /// All locales in declaration order.
    pub fn list(&self) -> &[LocaleConfig] {
        &self.locales
    }

    /// All locale codes in declaration order.
    pub fn codes(&self) -> Vec<&'static str> {
        self.locales.iter().map(|locale| locale.code).collect()
    }

    /// The default locale configuration.
    pub fn default_config(&self) -> &LocaleConfig {
        &self.locales[self.default_index]
    }

    /// The default locale code.
    pub fn default_code(&self) -> &'static str {
        self.default_config().code
    }

    /// Display name for a locale code, if the code is registered.
    pub fn display_name(&self, code: &str) -> Option<&'static str> {
        self.get_by_code(code).map(|locale| locale.display_name)
    }

    /// Check whether a code is a member of the registry.
    pub fn contains(&self, code: &str) -> bool {
        self.get_by_code(code).is_some()
    }
}

impl Default for LocaleRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

fn standard_locales() -> Vec<LocaleConfig> {
    vec![
        LocaleConfig {
            code: "en",
            display_name: "English",
            english_name: "English",
            flag: "🇬🇧",
            is_default: true,
        },
        LocaleConfig {
            code: "es",
            display_name: "Español",
            english_name: "Spanish",
            flag: "🇪🇸",
            is_default: false,
        },
        LocaleConfig {
            code: "fr",
            display_name: "Français",
            english_name: "French",
            flag: "🇫🇷",
            is_default: false,
        },
        LocaleConfig {
            code: "de",
            display_name: "Deutsch",
            english_name: "German",
            flag: "🇩🇪",
            is_default: false,
        },
        LocaleConfig {
            code: "it",
            display_name: "Italiano",
            english_name: "Italian",
            flag: "🇮🇹",
            is_default: false,
        },
        LocaleConfig {
            code: "ro",
            display_name: "Română",
            english_name: "Romanian",
            flag: "🇷🇴",
            is_default: false,
        },
    ]
}
