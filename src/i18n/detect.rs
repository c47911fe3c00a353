//! Locale detection from request signals.
//!
//! Precedence is fixed: URL path segment, then the locale cookie, then the
//! `Accept-Language` header. The first signal that is present decides the
//! candidate; later signals are not consulted even if the candidate turns out
//! to be invalid.

use crate::i18n::LocaleRegistry;
use serde::Serialize;

/// Request signals relevant to locale detection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestLocaleContext {
    /// Locale segment from the URL (`/{tenant}/{locale}/...`)
    pub path_locale: Option<String>,

    /// Value of the locale cookie
    pub cookie_locale: Option<String>,

    /// Raw `Accept-Language` header
    pub accept_language: Option<String>,
}

/// Where a locale candidate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LocaleSource {
    Url,
    Cookie,
    AcceptLanguage,
    Default,
}

/// Unvalidated locale candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleCandidate {
    pub value: String,
    pub source: LocaleSource,
}

/// Pick the locale candidate for a request.
///
/// Empty URL and cookie values count as absent. A header with no supported
/// language counts as absent. Without any signal the registry default is used.
pub fn detect_candidate(registry: &LocaleRegistry, ctx: &RequestLocaleContext) -> LocaleCandidate {
    if let Some(value) = ctx.path_locale.as_deref().filter(|v| !v.is_empty()) {
        return LocaleCandidate {
            value: value.to_string(),
            source: LocaleSource::Url,
        };
    }

    if let Some(value) = ctx.cookie_locale.as_deref().filter(|v| !v.is_empty()) {
        return LocaleCandidate {
            value: value.to_string(),
            source: LocaleSource::Cookie,
        };
    }

    if let Some(code) = ctx
        .accept_language
        .as_deref()
        .and_then(|header| negotiate_accept_language(registry, header))
    {
        return LocaleCandidate {
            value: code.to_string(),
            source: LocaleSource::AcceptLanguage,
        };
    }

    LocaleCandidate {
        value: registry.default_code().to_string(),
        source: LocaleSource::Default,
    }
}

/// Parse an `Accept-Language` header into `(tag, quality)` pairs ordered by
/// descending quality. Ties keep header order; `q=0` entries and the `*`
/// wildcard are dropped, unparsable quality values count as 1.0.
pub fn parse_accept_language(header: &str) -> Vec<(String, f32)> {
    let mut entries: Vec<(String, f32)> = header
        .split(',')
        .filter_map(|part| {
            let mut pieces = part.split(';');
            let tag = pieces.next()?.trim();
            if tag.is_empty() || tag == "*" {
                return None;
            }

            let quality = pieces
                .filter_map(|param| param.trim().strip_prefix("q="))
                .next()
                .map(|q| q.trim().parse::<f32>().unwrap_or(1.0))
                .unwrap_or(1.0);

            (quality > 0.0).then(|| (tag.to_string(), quality))
        })
        .collect();

    // sort_by is stable, so equal qualities keep their header order
    entries.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    entries
}

/// Choose the best registered locale for an `Accept-Language` header.
///
/// For each entry in preference order the full tag is tried first, then its
/// primary subtag (`fr-CA` matches `fr`).
pub fn negotiate_accept_language(registry: &LocaleRegistry, header: &str) -> Option<&'static str> {
    parse_accept_language(header).iter().find_map(|(tag, _)| {
        let primary = tag.split(['-', '_']).next().unwrap_or(tag);
        registry
            .get_by_code(tag)
            .or_else(|| registry.get_by_code(&primary.to_ascii_lowercase()))
            .map(|config| config.code)
    })
}
