//! Locale validation.

use crate::i18n::LocaleRegistry;

/// Check whether `candidate` is exactly (case-sensitively) one of the
/// registry's locale codes.
///
/// Arbitrary input is accepted: surrounding whitespace, region subtags and
/// different casing all make the candidate invalid.
pub fn is_valid_locale(registry: &LocaleRegistry, candidate: &str) -> bool {
    registry.contains(candidate)
}
