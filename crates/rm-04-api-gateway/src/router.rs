//! HTTP routes and handlers.

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, DefaultBodyLimit, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use monitor_telemetry::{
    encode_metrics, metrics_content_type, HistogramTimer, DELTAS_RECEIVED, EMIT_DURATION,
    NOTIFICATIONS_EMITTED, NOTIFICATIONS_MATCHED, QUADS_PROCESSED, SINK_FAILURES,
    SUBSCRIPTIONS_ACTIVE, SUBSCRIPTIONS_REGISTERED, SUBSCRIPTIONS_UNREGISTERED,
};
use rm_01_subscription_index::{PatternKey, SubscriptionApi, SubscriptionRegistry};
use rm_02_delta_matcher::{DeltaMatcher, DeltaMatcherApi};
use rm_03_notification_emitter::{
    EmitOutcome, NotificationEmitter, NotificationSink, RequestContext,
};
use serde::Deserialize;
use shared_types::{Delta, TabId};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{error, warn};

use crate::domain::{parse_delta_body, ApiError, GatewayConfig};

/// Header carrying the identifier of the calling tab.
pub const TAB_ID_HEADER: &str = "mu-tab-id";

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub subscriptions: Arc<dyn SubscriptionApi>,
    pub matcher: Arc<dyn DeltaMatcherApi>,
    pub emitter: Arc<NotificationEmitter>,
}

impl AppState {
    pub fn new(
        subscriptions: Arc<dyn SubscriptionApi>,
        matcher: Arc<dyn DeltaMatcherApi>,
        emitter: Arc<NotificationEmitter>,
    ) -> Self {
        Self {
            subscriptions,
            matcher,
            emitter,
        }
    }

    /// Fresh registry and matcher, emitting into `sink`.
    pub fn with_sink(sink: Arc<dyn NotificationSink>) -> Self {
        let registry = Arc::new(SubscriptionRegistry::new());
        let matcher = Arc::new(DeltaMatcher::new(Arc::clone(&registry)));
        Self::new(registry, matcher, Arc::new(NotificationEmitter::new(sink)))
    }
}

/// Build the router with its middleware stack.
///
/// The request timeout covers every route except `/.mu/delta`. A delta
/// batch runs to completion once matched; its duration is bounded by the
/// sink's own timeouts.
pub fn build_router(state: AppState, config: &GatewayConfig) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(config.max_body_bytes));

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .route(
            "/monitor",
            post(register).delete(unregister).get(list_patterns),
        )
        .route("/monitors", delete(unregister_all))
        .layer(TimeoutLayer::new(config.request_timeout))
        .route("/.mu/delta", post(handle_delta))
        .layer(DefaultBodyLimit::disable())
        .layer(middleware)
        .with_state(state)
}

/// Pattern query parameters; absent or empty means "any value".
#[derive(Debug, Default, Deserialize)]
pub struct PatternQuery {
    pub subject: Option<String>,
    pub predicate: Option<String>,
    pub object: Option<String>,
}

impl PatternQuery {
    pub fn pattern(&self) -> PatternKey {
        PatternKey::from_params(
            self.subject.as_deref(),
            self.predicate.as_deref(),
            self.object.as_deref(),
        )
    }
}

fn pattern(query: Result<Query<PatternQuery>, QueryRejection>) -> Result<PatternKey, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::InvalidQuery(e.body_text()))?;
    Ok(query.pattern())
}

fn request_context(headers: &HeaderMap) -> RequestContext {
    RequestContext::from_headers(|name| headers.get(name).and_then(|value| value.to_str().ok()))
}

fn tab_id(headers: &HeaderMap) -> Result<TabId, ApiError> {
    headers
        .get(TAB_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(TabId::from)
        .ok_or(ApiError::MissingTabId)
}

/// `POST /monitor`
async fn register(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<PatternQuery>, QueryRejection>,
) -> Result<StatusCode, ApiError> {
    let tab_id = tab_id(&headers)?;
    if state.subscriptions.register(tab_id, pattern(query)?) {
        SUBSCRIPTIONS_REGISTERED.inc();
        SUBSCRIPTIONS_ACTIVE.inc();
    }
    Ok(StatusCode::CREATED)
}

/// `DELETE /monitor`; removing an unknown subscription is not an error.
async fn unregister(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<PatternQuery>, QueryRejection>,
) -> Result<StatusCode, ApiError> {
    let tab_id = tab_id(&headers)?;
    if state.subscriptions.unregister(&tab_id, &pattern(query)?) {
        SUBSCRIPTIONS_UNREGISTERED.inc();
        SUBSCRIPTIONS_ACTIVE.dec();
    }
    Ok(StatusCode::CREATED)
}

/// `GET /monitor`
async fn list_patterns(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<PatternKey>>, ApiError> {
    let tab_id = tab_id(&headers)?;
    Ok(Json(state.subscriptions.patterns_for(&tab_id)))
}

/// `DELETE /monitors`
async fn unregister_all(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let tab_id = tab_id(&headers)?;
    let removed = state.subscriptions.unregister_all(&tab_id);
    if removed > 0 {
        SUBSCRIPTIONS_UNREGISTERED.inc_by(removed as u64);
        SUBSCRIPTIONS_ACTIVE.sub(i64::try_from(removed).unwrap_or(i64::MAX));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /.mu/delta`
///
/// Matching completes before the sink is contacted, so no index lock is
/// held while waiting on the triple store. The mu session and call ids of
/// the request are forwarded on the store write.
async fn handle_delta(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let deltas = parse_delta_body(&body).map_err(|e| {
        warn!(error = %e, "Rejected malformed delta payload");
        ApiError::InvalidDelta(e)
    })?;

    DELTAS_RECEIVED.inc();
    QUADS_PROCESSED.inc_by(deltas.iter().map(Delta::len).sum::<usize>() as u64);

    let batch = state.matcher.process_delta(&deltas);
    NOTIFICATIONS_MATCHED.inc_by(batch.record_count() as u64);

    let outcome = {
        let _timer = HistogramTimer::new(&EMIT_DURATION);
        state
            .emitter
            .emit_with_context(&batch, &request_context(&headers))
            .await
    };

    match outcome {
        Ok(EmitOutcome::Sent { messages }) => {
            NOTIFICATIONS_EMITTED.inc_by(messages as u64);
            Ok(StatusCode::OK)
        }
        Ok(EmitOutcome::NothingToSend) => Ok(StatusCode::OK),
        Err(e) => {
            SINK_FAILURES.inc();
            error!(error = %e, "Failed to deliver notifications");
            Err(e.into())
        }
    }
}

/// `GET /`
async fn root() -> &'static str {
    "Hello from resource-monitor"
}

/// Health check endpoint
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "resource-monitor",
        "version": env!("CARGO_PKG_VERSION"),
        "index": state.subscriptions.stats(),
    }))
}

/// Prometheus scrape endpoint
async fn metrics() -> Result<impl IntoResponse, ApiError> {
    let body = encode_metrics().map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok(([(header::CONTENT_TYPE, metrics_content_type())], body))
}
