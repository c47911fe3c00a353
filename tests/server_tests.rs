//! Integration tests for the HTTP layer.
//!
//! Requests are sent in-process through the router; message documents come
//! from the bundled `locales/` directory.

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use tenant_locale_web::config::Config;
use tenant_locale_web::i18n::{
    InMemoryMessageStore, LocaleRegistry, LocaleResolver, MessageLoader,
};
use tenant_locale_web::server::{build_fs_state, build_state, router, AppState};
use tower::ServiceExt;

// ==================== Test Helpers ====================

fn locales_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("locales")
}

fn bundled_document(locale: &str) -> String {
    std::fs::read_to_string(locales_dir().join(locale).join("messages.json"))
        .expect("bundled messages exist")
}

fn test_config() -> Config {
    Config {
        messages_dir: locales_dir(),
        ..Config::default()
    }
}

async fn full_app() -> Router {
    let state = build_fs_state(&test_config()).await.expect("state builds");
    router(state)
}

/// App whose store only has the given bundled locales.
async fn app_with_locales(locales: &[&str]) -> Router {
    let store = locales.iter().fold(InMemoryMessageStore::new(), |store, locale| {
        store.with_document(locale, bundled_document(locale))
    });
    let state = build_state(&test_config(), Arc::new(store))
        .await
        .expect("state builds");
    router(state)
}

async fn get(app: Router, uri: &str, headers: &[(&str, &str)]) -> Response {
    let mut builder = Request::get(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    app.oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn post_form(app: Router, uri: &str, body: &str) -> Response {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).expect("response is JSON")
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("redirect has a location")
        .to_str()
        .unwrap()
}

fn content_language(response: &Response) -> &str {
    response
        .headers()
        .get(header::CONTENT_LANGUAGE)
        .expect("content-language is set")
        .to_str()
        .unwrap()
}

// ==================== Root and Tenant Redirects ====================

#[tokio::test]
async fn test_root_redirects_to_default_tenant_and_locale() {
    let response = get(full_app().await, "/", &[]).await;

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/default/en");
}

#[tokio::test]
async fn test_root_ignores_cookie_and_header() {
    let response = get(
        full_app().await,
        "/",
        &[("cookie", "NEXT_LOCALE=fr"), ("accept-language", "de")],
    )
    .await;

    assert_eq!(location(&response), "/default/en");
}

#[tokio::test]
async fn test_tenant_root_uses_cookie_over_header() {
    let response = get(
        full_app().await,
        "/acme",
        &[("cookie", "NEXT_LOCALE=de"), ("accept-language", "fr")],
    )
    .await;

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/acme/de");
}

#[tokio::test]
async fn test_tenant_root_uses_accept_language() {
    let response = get(
        full_app().await,
        "/acme",
        &[("accept-language", "ja, fr-CA;q=0.9, en;q=0.5")],
    )
    .await;

    assert_eq!(location(&response), "/acme/fr");
}

#[tokio::test]
async fn test_tenant_root_defaults_to_english() {
    let response = get(full_app().await, "/acme", &[]).await;
    assert_eq!(location(&response), "/acme/en");
}

#[tokio::test]
async fn test_tenant_root_invalid_cookie_is_not_found() {
    let response = get(full_app().await, "/acme", &[("cookie", "NEXT_LOCALE=xx")]).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_tenant_root_with_non_ascii_tenant_redirects_encoded() {
    let response = get(full_app().await, "/caf%C3%A9", &[]).await;

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/caf%C3%A9/en");
}

// ==================== Localized Pages ====================

#[tokio::test]
async fn test_home_page_in_requested_locale() {
    let response = get(full_app().await, "/acme/fr", &[]).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(content_language(&response), "fr");

    let page = json_body(response).await;
    assert_eq!(page["kind"], "home");
    assert_eq!(page["locale"], "fr");
    assert_eq!(page["header"]["title"], "Portail Locataire - acme");
    assert_eq!(page["header"]["welcome"], "Bienvenue, User !");
    assert_eq!(page["language_switcher"]["current_name"], "Français");
}

#[tokio::test]
async fn test_unsupported_locale_is_not_found() {
    let response = get(full_app().await, "/acme/xx", &[]).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get(full_app().await, "/acme/xx/dashboard", &[]).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_url_locale_beats_cookie() {
    let response = get(full_app().await, "/acme/it", &[("cookie", "NEXT_LOCALE=de")]).await;
    assert_eq!(content_language(&response), "it");
}

#[tokio::test]
async fn test_section_page_with_active_navigation() {
    let response = get(full_app().await, "/acme/de/teams", &[]).await;
    assert_eq!(response.status(), StatusCode::OK);

    let page = json_body(response).await;
    assert_eq!(page["kind"], "section");
    assert_eq!(page["navigation"]["brand"], "Acme");

    let active: Vec<&str> = page["navigation"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|item| item["active"] == true)
        .map(|item| item["key"].as_str().unwrap())
        .collect();
    assert_eq!(active, vec!["teams"]);
}

#[tokio::test]
async fn test_examples_page_switcher_links_keep_path() {
    let response = get(full_app().await, "/acme/en/examples", &[]).await;
    let page = json_body(response).await;

    let options = page["language_switcher"]["options"].as_array().unwrap();
    assert_eq!(options.len(), 6);
    let romanian = options.iter().find(|o| o["code"] == "ro").unwrap();
    assert_eq!(romanian["href"], "/acme/ro/examples");
    assert_eq!(page["signup_form"]["heading"], "Sign up");
}

#[tokio::test]
async fn test_section_page_for_encoded_tenant() {
    let response = get(full_app().await, "/caf%C3%A9/en/teams", &[]).await;
    assert_eq!(response.status(), StatusCode::OK);

    let page = json_body(response).await;
    assert_eq!(page["tenant"], "café");
    assert_eq!(page["navigation"]["brand"], "Café");
}

#[tokio::test]
async fn test_unknown_page_is_not_found() {
    let response = get(full_app().await, "/acme/en/billing", &[]).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get(full_app().await, "/acme/en/dashboard/settings", &[]).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ==================== Fallback and Fatal Configuration ====================

#[tokio::test]
async fn test_missing_messages_fall_back_to_default() {
    let app = app_with_locales(&["en", "fr"]).await;
    let response = get(app, "/acme/es", &[]).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(content_language(&response), "en");

    let page = json_body(response).await;
    assert_eq!(page["locale"], "en");
    assert_eq!(page["header"]["title"], "Tenant Portal - acme");
}

#[tokio::test]
async fn test_startup_fails_without_default_messages() {
    let store = InMemoryMessageStore::new().with_document("fr", bundled_document("fr"));
    let result = build_state(&test_config(), Arc::new(store)).await;

    let err = result.err().expect("startup must fail");
    assert!(err.to_string().contains("default locale"));
}

#[tokio::test]
async fn test_startup_fails_with_empty_messages_dir() {
    let dir = TempDir::new().unwrap();
    let config = Config {
        messages_dir: dir.path().to_path_buf(),
        ..Config::default()
    };

    assert!(build_fs_state(&config).await.is_err());
}

#[tokio::test]
async fn test_request_without_default_messages_is_server_error() {
    // Bypasses the startup check to exercise the per-request path.
    let registry = Arc::new(LocaleRegistry::standard());
    let store = InMemoryMessageStore::new().with_document("fr", bundled_document("fr"));
    let loader = Arc::new(MessageLoader::new(&registry, Arc::new(store)));
    let app = router(AppState::new(
        LocaleResolver::new(registry, loader),
        "NEXT_LOCALE",
    ));

    let response = get(app.clone(), "/acme/es", &[]).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let response = get(app, "/acme/fr", &[]).await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ==================== Language Switching ====================

#[tokio::test]
async fn test_switch_language_redirects_and_sets_cookie() {
    let response = post_form(
        full_app().await,
        "/acme/en/language",
        "locale=it&path=%2Facme%2Fen%2Fprojects",
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/acme/it/projects");

    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(cookie.starts_with("NEXT_LOCALE=it"));
}

#[tokio::test]
async fn test_switch_language_without_path_goes_home() {
    let response = post_form(full_app().await, "/acme/fr/language", "locale=ro").await;
    assert_eq!(location(&response), "/acme/ro");
}

#[tokio::test]
async fn test_switch_to_unregistered_locale_sets_no_cookie() {
    let response = post_form(full_app().await, "/acme/en/language", "locale=xx").await;

    assert_eq!(location(&response), "/acme/xx");
    assert!(response.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn test_switch_to_locale_with_control_character_is_encoded() {
    let response = post_form(full_app().await, "/acme/en/language", "locale=fr%0Ax").await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/acme/fr%0Ax");
    assert!(response.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn test_switch_with_control_character_in_path_is_bad_request() {
    let response = post_form(
        full_app().await,
        "/acme/en/language",
        "locale=fr&path=%2Facme%2Fen%2Fteams%0A",
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn test_switch_keeps_non_ascii_tenant_encoded() {
    let response = post_form(full_app().await, "/caf%C3%A9/en/language", "locale=de").await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/caf%C3%A9/de");
}

// ==================== Sign-up Form ====================

#[tokio::test]
async fn test_sign_up_validation_errors_are_localized() {
    let response = post_form(
        full_app().await,
        "/acme/es/examples/signup",
        "first_name=&last_name=Pop&email=bad&password=short&confirm_password=short",
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(content_language(&response), "es");

    let body = json_body(response).await;
    assert_eq!(body["errors"]["first_name"], "Nombre es obligatorio");
    assert_eq!(body["errors"]["email"], "Introduce un correo electrónico válido");
    assert_eq!(
        body["errors"]["password"],
        "Contraseña debe tener al menos 8 caracteres"
    );
    assert!(body["errors"].get("last_name").is_none());
}

#[tokio::test]
async fn test_sign_up_success() {
    let response = post_form(
        full_app().await,
        "/acme/en/examples/signup",
        "first_name=Ana&last_name=Pop&email=ana%40example.com&password=long+enough&confirm_password=long+enough",
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["message"], "Your account has been created successfully!");
}

// ==================== Health ====================

#[tokio::test]
async fn test_health_reports_locales_and_metrics() {
    let response = get(full_app().await, "/api/health", &[]).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["default_locale"], "en");
    assert_eq!(body["locales"].as_array().unwrap().len(), 6);
    assert_eq!(body["metrics"]["load_failures"], 0);
}
