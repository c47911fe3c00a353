//! Tenant/locale URL composition and the language switcher.
//!
//! Paths have the shape `/{tenant}/{locale}/{content...}`. Decomposition is
//! positional: the first two segments are assumed to be tenant and locale and
//! are never validated here.

use serde::Serialize;
use tracing::debug;

/// Tenant used by the root redirect.
pub const DEFAULT_TENANT: &str = "default";

/// Build `/{tenant}/{locale}` or `/{tenant}/{locale}/{content}`.
///
/// One leading slash is stripped from `content_path`; an empty result adds no
/// trailing slash.
pub fn compose(tenant: &str, locale: &str, content_path: &str) -> String {
    let content = content_path.strip_prefix('/').unwrap_or(content_path);
    if content.is_empty() {
        format!("/{}/{}", tenant, locale)
    } else {
        format!("/{}/{}/{}", tenant, locale, content)
    }
}

/// Content path of `full_path` once the tenant and locale segments are removed.
///
/// Returns `"/"` when fewer than two segments are present. Empty segments are
/// ignored, so leading, trailing and doubled slashes make no difference.
pub fn decompose(full_path: &str) -> String {
    let segments: Vec<&str> = full_path.split('/').filter(|s| !s.is_empty()).collect();
    if segments.len() < 2 {
        return "/".to_string();
    }
    format!("/{}", segments[2..].join("/"))
}

/// A parsed `/{tenant}/{locale}/{content...}` path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutePath {
    pub tenant: String,

    /// Locale segment as written in the URL (not validated)
    pub locale: String,

    pub content: Vec<String>,
}

impl RoutePath {
    /// Parse a path with at least tenant and locale segments.
    pub fn parse(full_path: &str) -> Option<RoutePath> {
        let mut segments = full_path.split('/').filter(|s| !s.is_empty());
        let tenant = segments.next()?.to_string();
        let locale = segments.next()?.to_string();
        Some(RoutePath {
            tenant,
            locale,
            content: segments.map(str::to_string).collect(),
        })
    }

    /// Content path with a leading slash (`"/"` when empty).
    pub fn content_path(&self) -> String {
        format!("/{}", self.content.join("/"))
    }

    pub fn to_path(&self) -> String {
        compose(&self.tenant, &self.locale, &self.content.join("/"))
    }
}

/// Root redirect target: the default tenant in `default_locale`.
pub fn root_redirect(default_locale: &str) -> String {
    compose(DEFAULT_TENANT, default_locale, "")
}

/// Destination of a language switch (the client router, or an HTTP redirect).
pub trait Navigator {
    fn navigate(&mut self, path: &str);
}

/// Navigator that records the requested path, used to answer with a redirect.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RedirectNavigator {
    pub target: Option<String>,
}

impl Navigator for RedirectNavigator {
    fn navigate(&mut self, path: &str) {
        self.target = Some(path.to_string());
    }
}

/// Recomputes the current path for a newly selected locale.
///
/// The new locale is not validated: it comes from a list built from the
/// registry.
#[derive(Debug, Default, Clone, Copy)]
pub struct LanguageSwitcher;

impl LanguageSwitcher {
    /// Path of `current_path` rewritten for `tenant` and `new_locale`.
    pub fn switched_path(current_path: &str, tenant: &str, new_locale: &str) -> String {
        compose(tenant, new_locale, &decompose(current_path))
    }

    /// Compute the switched path and navigate to it.
    pub fn switch(
        &self,
        current_path: &str,
        tenant: &str,
        new_locale: &str,
        navigator: &mut dyn Navigator,
    ) -> String {
        let path = Self::switched_path(current_path, tenant, new_locale);
        debug!("Switching language: {} -> {}", current_path, path);
        navigator.navigate(&path);
        path
    }
}
