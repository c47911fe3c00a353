//! Page models handed to the renderer.
//!
//! Every user-visible string is already translated; a renderer only lays the
//! model out.

use crate::forms::SignUpFormLabels;
use crate::i18n::{Locale, LocaleRegistry, MessageMapping};
use crate::routing::{compose, LanguageSwitcher};
use serde::Serialize;

/// Main navigation entries as `(message key, content path)`.
pub const NAV_ITEMS: [(&str, &str); 5] = [
    ("home", ""),
    ("dashboard", "/dashboard"),
    ("projects", "/projects"),
    ("teams", "/teams"),
    ("settings", "/settings"),
];

/// Name shown in the home page welcome line.
const HOME_WELCOME_NAME: &str = "User";

/// Name shown in the examples page welcome line.
const EXAMPLES_WELCOME_NAME: &str = "Developer";

const COPYRIGHT_YEAR: u16 = 2025;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    Home,
    Examples,
    Section,
}

/// Which page a content path maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRoute<'a> {
    Home,
    Examples,
    /// A navigation section (or the profile page) by message key
    Section(&'a str),
}

impl<'a> PageRoute<'a> {
    /// Match content segments to a page; `None` for unknown paths.
    pub fn from_segments(segments: &[&'a str]) -> Option<PageRoute<'a>> {
        match segments {
            [] => Some(PageRoute::Home),
            ["examples"] => Some(PageRoute::Examples),
            ["profile"] => Some(PageRoute::Section("profile")),
            [section] => NAV_ITEMS
                .iter()
                .find(|(key, path)| !path.is_empty() && key == section)
                .map(|(key, _)| PageRoute::Section(key)),
            _ => None,
        }
    }
}

/// Everything needed to build a page for one request.
pub struct PageContext<'a> {
    pub tenant: &'a str,
    pub locale: Locale,
    pub registry: &'a LocaleRegistry,
    pub messages: &'a MessageMapping,

    /// Path as requested, used for active links and language switching
    pub current_path: &'a str,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NavItem {
    pub key: String,
    pub label: String,
    pub href: String,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Navigation {
    /// Tenant name with its first character upper-cased
    pub brand: String,
    pub items: Vec<NavItem>,
    pub profile: NavItem,
    pub logout_label: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LanguageOption {
    pub code: &'static str,
    pub name: &'static str,
    pub flag: &'static str,
    pub href: String,
    pub current: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LanguageSwitcherModel {
    pub label: String,
    pub current_name: &'static str,
    pub options: Vec<LanguageOption>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PageHeader {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub welcome: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Card {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PageModel {
    pub kind: PageKind,
    pub tenant: String,
    pub locale: Locale,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigation: Option<Navigation>,
    pub header: PageHeader,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_switcher: Option<LanguageSwitcherModel>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cards: Vec<Card>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signup_form: Option<SignUpFormLabels>,
    pub footer: String,
}

/// Upper-case the first character of a tenant identifier.
pub fn tenant_display_name(tenant: &str) -> String {
    let mut chars = tenant.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Build the navigation bar for the current path.
///
/// An item is active when the current path equals its link; items other than
/// home are also active for any path below their link.
pub fn navigation(ctx: &PageContext<'_>) -> Navigation {
    let nav_t = ctx.messages.namespaced("navigation");
    let locale = ctx.locale.code();

    let items = NAV_ITEMS
        .iter()
        .map(|(key, path)| {
            let href = compose(ctx.tenant, locale, path);
            let active = ctx.current_path == href
                || (!path.is_empty() && ctx.current_path.starts_with(&href));
            NavItem {
                key: key.to_string(),
                label: nav_t.t(key),
                href,
                active,
            }
        })
        .collect();

    let profile_href = compose(ctx.tenant, locale, "/profile");
    Navigation {
        brand: tenant_display_name(ctx.tenant),
        items,
        profile: NavItem {
            key: "profile".to_string(),
            label: nav_t.t("profile"),
            active: ctx.current_path == profile_href,
            href: profile_href,
        },
        logout_label: nav_t.t("logout"),
    }
}

/// One option per registered locale, each linking to the current page in
/// that locale.
pub fn language_switcher(ctx: &PageContext<'_>) -> LanguageSwitcherModel {
    let options = ctx
        .registry
        .list()
        .iter()
        .map(|config| LanguageOption {
            code: config.code,
            name: config.display_name,
            flag: config.flag,
            href: LanguageSwitcher::switched_path(ctx.current_path, ctx.tenant, config.code),
            current: config.code == ctx.locale.code(),
        })
        .collect();

    LanguageSwitcherModel {
        label: ctx.messages.translator().t("common.language"),
        current_name: ctx.locale.config(ctx.registry).display_name,
        options,
    }
}

fn footer(messages: &MessageMapping) -> String {
    format!(
        "© {} {}",
        COPYRIGHT_YEAR,
        messages.translator().t("meta.title")
    )
}

fn page_title(ctx: &PageContext<'_>, key: &str) -> String {
    format!("{} - {}", ctx.messages.translator().t(key), ctx.tenant)
}

/// Build the page model for a route.
pub fn build_page(ctx: &PageContext<'_>, route: PageRoute<'_>) -> PageModel {
    match route {
        PageRoute::Home => home_page(ctx),
        PageRoute::Examples => examples_page(ctx),
        PageRoute::Section(key) => section_page(ctx, key),
    }
}

fn home_page(ctx: &PageContext<'_>) -> PageModel {
    let t = ctx.messages.translator();

    PageModel {
        kind: PageKind::Home,
        tenant: ctx.tenant.to_string(),
        locale: ctx.locale,
        navigation: None,
        header: PageHeader {
            title: page_title(ctx, "meta.title"),
            description: Some(t.t("meta.description")),
            welcome: Some(t.t_with("dashboard.welcome", &[("name", HOME_WELCOME_NAME)])),
            actions: Vec::new(),
        },
        language_switcher: Some(language_switcher(ctx)),
        cards: vec![
            Card {
                title: t.t("dashboard.overview"),
                body: t.t("dashboard.recentActivity"),
            },
            Card {
                title: t.t("navigation.projects"),
                body: t.t("dashboard.noData"),
            },
            Card {
                title: t.t("navigation.teams"),
                body: t.t("teams.myTeams"),
            },
        ],
        signup_form: None,
        footer: footer(ctx.messages),
    }
}

fn examples_page(ctx: &PageContext<'_>) -> PageModel {
    let t = ctx.messages.translator();
    let dashboard_t = ctx.messages.namespaced("dashboard");

    PageModel {
        kind: PageKind::Examples,
        tenant: ctx.tenant.to_string(),
        locale: ctx.locale,
        navigation: Some(navigation(ctx)),
        header: PageHeader {
            title: page_title(ctx, "meta.title"),
            description: Some(t.t("meta.description")),
            welcome: Some(dashboard_t.t_with("welcome", &[("name", EXAMPLES_WELCOME_NAME)])),
            actions: vec![t.t("common.edit"), t.t("common.create")],
        },
        language_switcher: Some(language_switcher(ctx)),
        cards: Vec::new(),
        signup_form: Some(SignUpFormLabels::new(ctx.messages)),
        footer: footer(ctx.messages),
    }
}

fn section_page(ctx: &PageContext<'_>, key: &str) -> PageModel {
    PageModel {
        kind: PageKind::Section,
        tenant: ctx.tenant.to_string(),
        locale: ctx.locale,
        navigation: Some(navigation(ctx)),
        header: PageHeader {
            title: page_title(ctx, &format!("navigation.{}", key)),
            description: None,
            welcome: None,
            actions: Vec::new(),
        },
        language_switcher: None,
        cards: Vec::new(),
        signup_form: None,
        footer: footer(ctx.messages),
    }
}
