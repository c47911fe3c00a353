//! HTTP layer: routes, locale resolution per request and error responses.

use crate::config::Config;
use crate::forms::SignUpForm;
use crate::i18n::detect::detect_candidate;
use crate::i18n::{
    is_valid_locale, FsMessageStore, Locale, LocaleRegistry, LocaleResolver, MessageLoader, MessageStore,
    RequestLocaleContext, ResolveError, ResolvedLocale,
};
use crate::pages::{build_page, PageContext, PageRoute};
use crate::routing::{compose, root_redirect, LanguageSwitcher, RedirectNavigator, RoutePath};
use axum::extract::{OriginalUri, Path, State};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

/// Shared per-process state.
#[derive(Clone)]
pub struct AppState {
    pub resolver: LocaleResolver,
    pub cookie_name: Arc<str>,
}

impl AppState {
    pub fn new(resolver: LocaleResolver, cookie_name: impl Into<Arc<str>>) -> Self {
        Self {
            resolver,
            cookie_name: cookie_name.into(),
        }
    }

    fn registry(&self) -> &LocaleRegistry {
        self.resolver.registry()
    }
}

/// Wire the registry, message store, loader and resolver together.
///
/// The default locale's messages are loaded before anything else; without
/// them no request could ever be served, so startup fails instead.
pub async fn build_state(config: &Config, store: Arc<dyn MessageStore>) -> anyhow::Result<AppState> {
    let registry = Arc::new(LocaleRegistry::standard());
    let loader = Arc::new(MessageLoader::new(&registry, store));

    let default = Locale::default_of(&registry);
    if loader.load_messages(default).await.is_none() {
        anyhow::bail!(ResolveError::MissingDefaultMessages(default.code()));
    }

    if config.preload_all_locales {
        let locales: Vec<Locale> = registry
            .codes()
            .into_iter()
            .filter_map(|code| Locale::from_code(&registry, code).ok())
            .collect();
        for locale in loader.preload(&locales).await {
            warn!(
                "Messages for {} are unavailable; requests will fall back to {}",
                locale, default
            );
        }
    }

    let resolver = LocaleResolver::new(registry, loader);
    Ok(AppState::new(resolver, config.locale_cookie_name.as_str()))
}

/// State backed by the file-system message store configured in `config`.
pub async fn build_fs_state(config: &Config) -> anyhow::Result<AppState> {
    let store = Arc::new(FsMessageStore::new(config.messages_dir.clone()));
    info!("Loading messages from {}", store.root().display());
    build_state(config, store).await
}

/// Errors surfaced to HTTP clients.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Resolve(ResolveError::NotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Resolve(ResolveError::MissingDefaultMessages(_)) => {
                error!("Configuration error while serving request: {}", self);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            "internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/health", get(health))
        .route("/:tenant", get(tenant_root))
        .route("/:tenant/:locale", get(home_page))
        .route("/:tenant/:locale/language", post(switch_language))
        .route("/:tenant/:locale/examples/signup", post(sign_up))
        .route("/:tenant/:locale/:page", get(content_page))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root(State(state): State<AppState>) -> Redirect {
    Redirect::temporary(&root_redirect(state.registry().default_code()))
}

async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let registry = state.registry();
    Json(json!({
        "status": "ok",
        "locales": registry.codes(),
        "default_locale": registry.default_code(),
        "metrics": state.resolver.loader().metrics().report(),
    }))
}

async fn not_found(OriginalUri(uri): OriginalUri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}

/// Redirect response for a computed target.
///
/// Targets carry request input, so one that is not a valid header value is
/// rejected instead of being passed to `Redirect`.
fn redirect(status: StatusCode, target: &str) -> Result<Response, AppError> {
    let location = HeaderValue::try_from(target)
        .map_err(|_| AppError::BadRequest(format!("invalid redirect target {:?}", target)))?;
    Ok((status, [(header::LOCATION, location)]).into_response())
}

fn accept_language(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// `/{tenant}` without a locale: redirect to the detected locale.
async fn tenant_root(
    State(state): State<AppState>,
    Path(tenant): Path<String>,
    jar: CookieJar,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let ctx = RequestLocaleContext {
        path_locale: None,
        cookie_locale: jar.get(&state.cookie_name).map(|c| c.value().to_string()),
        accept_language: accept_language(&headers),
    };

    let candidate = detect_candidate(state.registry(), &ctx);
    let resolved = state.resolver.resolve(&candidate.value).await?;
    let target = compose(&urlencoding::encode(&tenant), resolved.locale.code(), "");

    debug!(
        "Redirecting {} to {} (locale from {:?})",
        tenant, target, candidate.source
    );
    redirect(StatusCode::TEMPORARY_REDIRECT, &target)
}

async fn resolve_path_locale(state: &AppState, locale: &str) -> Result<ResolvedLocale, AppError> {
    let ctx = RequestLocaleContext {
        path_locale: Some(locale.to_string()),
        ..Default::default()
    };
    let (resolved, _) = state.resolver.resolve_request(&ctx).await?;
    Ok(resolved)
}

async fn render(
    state: &AppState,
    tenant: &str,
    locale: &str,
    current_path: &str,
) -> Result<Response, AppError> {
    let resolved = resolve_path_locale(state, locale).await?;

    let not_found = || AppError::NotFound(current_path.to_string());
    let path = RoutePath::parse(current_path).ok_or_else(not_found)?;
    let segments: Vec<&str> = path.content.iter().map(String::as_str).collect();
    let route = PageRoute::from_segments(&segments).ok_or_else(not_found)?;

    let ctx = PageContext {
        tenant,
        locale: resolved.locale,
        registry: state.registry(),
        messages: &resolved.messages,
        current_path,
    };
    let model = build_page(&ctx, route);

    let mut response = Json(model).into_response();
    response.headers_mut().insert(
        header::CONTENT_LANGUAGE,
        HeaderValue::from_static(resolved.locale.code()),
    );
    Ok(response)
}

async fn home_page(
    State(state): State<AppState>,
    Path((tenant, locale)): Path<(String, String)>,
    OriginalUri(uri): OriginalUri,
) -> Result<Response, AppError> {
    render(&state, &tenant, &locale, uri.path()).await
}

async fn content_page(
    State(state): State<AppState>,
    Path((tenant, locale, _page)): Path<(String, String, String)>,
    OriginalUri(uri): OriginalUri,
) -> Result<Response, AppError> {
    render(&state, &tenant, &locale, uri.path()).await
}

#[derive(Debug, Deserialize)]
pub struct LanguageSwitchForm {
    /// Newly selected locale
    pub locale: String,

    /// Path the switch was made from; defaults to the tenant/locale home
    pub path: Option<String>,
}

/// Switch language for the current page and remember the choice in a cookie.
async fn switch_language(
    State(state): State<AppState>,
    Path((tenant, current_locale)): Path<(String, String)>,
    jar: CookieJar,
    Form(form): Form<LanguageSwitchForm>,
) -> Result<(CookieJar, Response), AppError> {
    let tenant_segment = urlencoding::encode(&tenant);
    let current_path = form
        .path
        .unwrap_or_else(|| compose(&tenant_segment, &urlencoding::encode(&current_locale), ""));

    let mut navigator = RedirectNavigator::default();
    let target = LanguageSwitcher.switch(
        &current_path,
        &tenant_segment,
        &urlencoding::encode(&form.locale),
        &mut navigator,
    );
    let response = redirect(StatusCode::SEE_OTHER, &target)?;

    // Only registered locales are remembered; anything else would make the
    // tenant root unreachable until the cookie expires.
    let jar = if is_valid_locale(state.registry(), &form.locale) {
        info!("Language switched to {} for tenant {}", form.locale, tenant);
        jar.add(
            Cookie::build((state.cookie_name.to_string(), form.locale))
                .path("/")
                .same_site(SameSite::Lax),
        )
    } else {
        jar
    };

    Ok((jar, response))
}

async fn sign_up(
    State(state): State<AppState>,
    Path((_tenant, locale)): Path<(String, String)>,
    Form(form): Form<SignUpForm>,
) -> Result<Response, AppError> {
    let resolved = resolve_path_locale(&state, &locale).await?;

    let (status, body) = match form.validate(&resolved.messages) {
        Ok(()) => (
            StatusCode::OK,
            json!({ "message": resolved.messages.translator().t("auth.accountCreated") }),
        ),
        Err(errors) => (StatusCode::UNPROCESSABLE_ENTITY, json!({ "errors": errors })),
    };

    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CONTENT_LANGUAGE,
        HeaderValue::from_static(resolved.locale.code()),
    );
    Ok(response)
}
