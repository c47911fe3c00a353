//! Multi-tenant, multi-locale web front-end.
//!
//! Requests are routed as `/{tenant}/{locale}/{page}`. The locale segment is
//! validated against a fixed registry, messages are loaded per locale with a
//! one-level fallback to the default locale, and pages are returned as
//! translated page models.

pub mod config;
pub mod forms;
pub mod i18n;
pub mod pages;
pub mod routing;
pub mod server;
