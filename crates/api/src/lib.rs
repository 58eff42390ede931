mod config;
mod error;
mod rate_limit;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use axum::body::{Body, Bytes};
use axum::extract::{ConnectInfo, Query, State};
use axum::http::{header, HeaderMap, HeaderName, HeaderValue, Method, Request, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use moodlog_journal::{Claims, EntryInput, JournalError, JournalService, TokenSigner};
use moodlog_ml::MoodMlStack;
use moodlog_observability::{AppMetrics, MetricsSnapshot};
use moodlog_storage::Store;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub use crate::config::ApiConfig;
pub use crate::error::ApiError;
pub use crate::rate_limit::IpRateLimiter;

const MAX_BODY_BYTES: usize = 64 * 1024;

#[derive(Clone)]
pub struct ApiState {
    journal: Arc<JournalService<Store>>,
    metrics: Arc<AppMetrics>,
    auth_limiter: IpRateLimiter,
    trust_forwarded_for: bool,
    storage: &'static str,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp_utc: String,
    storage: &'static str,
    remote_model: bool,
    metrics: MetricsSnapshot,
}

#[derive(Debug, Default, Deserialize)]
struct ActionQuery {
    action: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct EntryQuery {
    id: Option<String>,
    all: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct CredentialsBody {
    email: Option<String>,
    password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct AnalyzeBody {
    text: Option<String>,
}

pub async fn build_app(config: ApiConfig) -> Result<Router> {
    let store = match config.database_url.as_deref() {
        Some(url) => Store::sqlite(url).await?,
        None => Store::memory(),
    };
    let ml_stack = MoodMlStack::from_config(&config.ml);
    info!(
        storage = store.backend_name(),
        remote_model = ml_stack.remote_enabled(),
        arbitration = ?ml_stack.arbitration,
        "journal service ready"
    );

    let storage = store.backend_name();
    let metrics = AppMetrics::shared();
    let journal = JournalService::new(
        Arc::new(store),
        ml_stack,
        TokenSigner::new(&config.token_secret, config.token_ttl_seconds),
        metrics.clone(),
    );

    let state = ApiState {
        journal: Arc::new(journal),
        metrics,
        auth_limiter: IpRateLimiter::new(config.auth_rate_limit_window, config.auth_rate_limit_max),
        trust_forwarded_for: config.trust_forwarded_for,
        storage,
    };

    Ok(build_router(state))
}

fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health).fallback(method_not_allowed))
        .route(
            "/auth",
            post(auth_post).get(auth_get).fallback(method_not_allowed),
        )
        .route(
            "/entries",
            get(list_entries)
                .post(create_entry)
                .put(update_entry)
                .delete(delete_entry)
                .fallback(method_not_allowed),
        )
        .route("/weekly", get(weekly).fallback(method_not_allowed))
        .route("/analyze", post(analyze).fallback(method_not_allowed))
        .fallback(not_found)
        .layer(build_cors_layer())
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            metrics_middleware,
        ))
        .with_state(state)
}

async fn health(State(state): State<ApiState>) -> impl IntoResponse {
    let payload = HealthResponse {
        status: "ok",
        timestamp_utc: chrono::Utc::now().to_rfc3339(),
        storage: state.storage,
        remote_model: state.journal.ml_stack().remote_enabled(),
        metrics: state.metrics.snapshot(),
    };
    (StatusCode::OK, Json(payload))
}

async fn auth_post(
    State(state): State<ApiState>,
    Query(query): Query<ActionQuery>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let action = query.action.as_deref().unwrap_or_default();
    if action != "register" && action != "login" {
        return Err(ApiError::bad_request("Invalid action"));
    }

    let body: CredentialsBody = parse_body(&body)?;
    let email = body.email.unwrap_or_default();
    let password = body.password.unwrap_or_default();
    if email.trim().is_empty() || password.is_empty() {
        return Err(ApiError::bad_request("Email and password are required"));
    }

    let (status, session, message) = if action == "register" {
        let session = state.journal.register(&email, &password).await?;
        (StatusCode::CREATED, session, "Registration successful")
    } else {
        let session = state.journal.login(&email, &password).await?;
        (StatusCode::OK, session, "Login successful")
    };

    Ok((
        status,
        Json(json!({
            "user": session.user,
            "token": session.token,
            "message": message,
        })),
    )
        .into_response())
}

async fn auth_get(
    State(state): State<ApiState>,
    Query(query): Query<ActionQuery>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    if query.action.as_deref() != Some("me") {
        return Err(ApiError::bad_request("Invalid action"));
    }

    let claims = authenticate(&state, &headers)?;
    let user = state.journal.current_user(claims.user_id).await?;
    Ok(Json(json!({ "user": user })).into_response())
}

async fn list_entries(
    State(state): State<ApiState>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let claims = authenticate(&state, &headers)?;
    let entries = state.journal.list_entries(claims.user_id).await?;
    Ok(Json(json!({ "entries": entries })).into_response())
}

async fn create_entry(
    State(state): State<ApiState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let claims = authenticate(&state, &headers)?;
    let input: EntryInput = parse_body(&body)?;
    let entry = state.journal.create_entry(claims.user_id, input).await?;
    Ok((StatusCode::CREATED, Json(json!({ "entry": entry }))).into_response())
}

async fn update_entry(
    State(state): State<ApiState>,
    Query(query): Query<EntryQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let claims = authenticate(&state, &headers)?;
    let entry_id = required_entry_id(&query)?;
    let input: EntryInput = parse_body(&body)?;
    let entry = state
        .journal
        .update_entry(claims.user_id, entry_id, input)
        .await?;
    Ok(Json(json!({ "entry": entry })).into_response())
}

async fn delete_entry(
    State(state): State<ApiState>,
    Query(query): Query<EntryQuery>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let claims = authenticate(&state, &headers)?;

    if query
        .all
        .as_deref()
        .is_some_and(|value| matches!(value, "true" | "1"))
    {
        let deleted = state.journal.delete_all_entries(claims.user_id).await?;
        return Ok(Json(json!({
            "message": "All entries deleted",
            "deleted": deleted,
        }))
        .into_response());
    }

    let entry_id = required_entry_id(&query)?;
    state.journal.delete_entry(claims.user_id, entry_id).await?;
    Ok(Json(json!({ "message": "Entry deleted" })).into_response())
}

async fn weekly(
    State(state): State<ApiState>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let claims = authenticate(&state, &headers)?;
    let summary = state.journal.weekly_summary(claims.user_id).await?;
    Ok(Json(summary).into_response())
}

async fn analyze(
    State(state): State<ApiState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    authenticate(&state, &headers)?;
    let body: AnalyzeBody = parse_body(&body)?;
    let analysis = state
        .journal
        .analyze(body.text.as_deref().unwrap_or_default())
        .await?;
    Ok(Json(analysis).into_response())
}

async fn method_not_allowed(method: Method) -> Response {
    if method == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    ApiError::new(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed").into_response()
}

async fn not_found() -> Response {
    ApiError::new(StatusCode::NOT_FOUND, "Not found").into_response()
}

fn authenticate(state: &ApiState, headers: &HeaderMap) -> Result<Claims, ApiError> {
    let Some(token) = bearer_token(headers) else {
        state.metrics.inc_auth_failure();
        return Err(JournalError::Unauthenticated.into());
    };
    Ok(state.journal.authenticate(token)?)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?.trim();
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

fn required_entry_id(query: &EntryQuery) -> Result<i64, ApiError> {
    let raw = query
        .id
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ApiError::bad_request("Entry ID is required"))?;
    raw.parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| ApiError::bad_request("Invalid entry ID"))
}

/// An empty body reads as the default value; anything else must be valid JSON.
fn parse_body<T: DeserializeOwned + Default>(body: &Bytes) -> Result<T, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body).map_err(|_| ApiError::bad_request("Invalid JSON body"))
}

fn build_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-requested-with"),
        ])
}

async fn rate_limit_middleware(
    State(state): State<ApiState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if request.method() != Method::POST || request.uri().path() != "/auth" {
        return next.run(request).await;
    }

    let auth_key = format!("auth:{}", request_ip(&request, state.trust_forwarded_for));
    if !state.auth_limiter.allow(&auth_key) {
        return ApiError::new(
            StatusCode::TOO_MANY_REQUESTS,
            "Too many authentication attempts. Please wait and try again.",
        )
        .into_response();
    }

    next.run(request).await
}

async fn metrics_middleware(
    State(state): State<ApiState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let started = Instant::now();
    state.metrics.inc_request();
    let response = next.run(request).await;
    state.metrics.observe_latency(started.elapsed());
    response
}

/// The TCP peer address, or the first `X-Forwarded-For` hop when the
/// deployment sits behind a trusted proxy.
fn request_ip(request: &Request<Body>, trust_forwarded_for: bool) -> String {
    if trust_forwarded_for {
        let forwarded = request
            .headers()
            .get("x-forwarded-for")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(',').next())
            .map(str::trim)
            .filter(|value| !value.is_empty());
        if let Some(ip) = forwarded {
            return ip.to_string();
        }
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "local".to_string())
}

async fn security_headers_middleware(request: Request<Body>, next: Next) -> Response {
    let mut response = next.run(request).await;

    response.headers_mut().insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    response.headers_mut().insert(
        HeaderName::from_static("x-frame-options"),
        HeaderValue::from_static("DENY"),
    );
    response.headers_mut().insert(
        HeaderName::from_static("referrer-policy"),
        HeaderValue::from_static("no-referrer"),
    );
    response.headers_mut().insert(
        HeaderName::from_static("permissions-policy"),
        HeaderValue::from_static("camera=(), microphone=(), geolocation=()"),
    );
    response.headers_mut().insert(
        HeaderName::from_static("content-security-policy"),
        HeaderValue::from_static("default-src 'none'; frame-ancestors 'none'; base-uri 'none'"),
    );

    response
}
