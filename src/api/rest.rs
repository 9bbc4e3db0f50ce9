// =============================================================================
// REST API Endpoints - Axum 0.7
// =============================================================================
//
// All endpoints live under `/api/v1/`. The service is a development mock, so
// CORS is configured permissively and there is no authentication.
//
// Every endpoint accepts an optional `delay` query parameter (milliseconds,
// clamped to [0, 10000]) that defers transmission of the response. The
// payload is always computed before the delay starts: the delay simulates a
// slow upstream, it never changes the result.
// =============================================================================

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tracing::debug;

use crate::api::error::ApiError;
use crate::config::ServerConfig;
use crate::dataset::Dataset;
use crate::query::{self, QueryError};

/// Upper bound for the artificial response delay.
const MAX_DELAY_MS: u64 = 10_000;

// =============================================================================
// Shared state
// =============================================================================

/// Immutable per-process state handed to every handler via `Arc`.
pub struct AppState {
    pub dataset: Dataset,
    pub config: ServerConfig,
}

// =============================================================================
// Router construction
// =============================================================================

/// Build the full REST API router with CORS middleware and shared state.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/stocks", get(list_stocks))
        .route("/api/v1/stocks/:symbol", get(stock_detail))
        .route("/api/v1/stocks/:symbol/daily", get(daily_series))
        .route("/api/v1/stocks/:symbol/intraday", get(intraday_series))
        .layer(cors)
        .with_state(state)
}

// =============================================================================
// Query parameter handling
// =============================================================================

/// All parameters arrive as raw strings so malformed values can be ignored
/// instead of rejected; a typed extractor would turn `limit=abc` into a 400.
#[derive(Debug, Default, Deserialize)]
struct SeriesParams {
    interval: Option<String>,
    limit: Option<String>,
    delay: Option<String>,
}

/// Positive integer or nothing. Zero, negative, and non-numeric values are
/// all treated as "no limit".
fn parse_limit(raw: Option<&str>) -> Option<usize> {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|&n| n > 0)
}

/// Delay in milliseconds, clamped to [0, MAX_DELAY_MS]. Non-numeric and
/// negative values are treated as zero.
fn parse_delay(raw: Option<&str>) -> u64 {
    match raw.and_then(|s| s.trim().parse::<i64>().ok()) {
        Some(ms) if ms > 0 => (ms as u64).min(MAX_DELAY_MS),
        _ => 0,
    }
}

/// Hold the already-computed payload for `delay_ms` before transmission.
async fn respond(payload: Value, delay_ms: u64) -> Json<Value> {
    if delay_ms > 0 {
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    }
    Json(payload)
}

// =============================================================================
// Handlers
// =============================================================================

async fn health(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SeriesParams>,
) -> impl IntoResponse {
    let payload = json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "environment": state.config.environment,
    });
    respond(payload, parse_delay(params.delay.as_deref())).await
}

async fn list_stocks(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SeriesParams>,
) -> impl IntoResponse {
    let summaries = state.dataset.list_summaries();
    debug!(count = summaries.len(), "listing tracked stocks");
    let payload = json!({ "data": summaries });
    respond(payload, parse_delay(params.delay.as_deref())).await
}

async fn stock_detail(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
    Query(params): Query<SeriesParams>,
) -> Result<impl IntoResponse, ApiError> {
    let symbol = symbol.to_uppercase();
    if !state.dataset.exists(&symbol) {
        return Err(ApiError::SymbolNotFound(symbol));
    }

    let payload = json!({
        "data": {
            "symbol": symbol,
            "availableIntervals": state.dataset.intervals_for(&symbol),
        }
    });
    Ok(respond(payload, parse_delay(params.delay.as_deref())).await)
}

async fn daily_series(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
    Query(params): Query<SeriesParams>,
) -> Result<impl IntoResponse, ApiError> {
    let symbol = symbol.to_uppercase();
    let limit = parse_limit(params.limit.as_deref());

    // Daily lookups can only fail on the symbol.
    let Ok(payload) = query::resolve_daily(&state.dataset, &symbol, limit) else {
        return Err(ApiError::SymbolNotFound(symbol));
    };

    debug!(%symbol, ?limit, "daily series resolved");
    Ok(respond(payload, parse_delay(params.delay.as_deref())).await)
}

async fn intraday_series(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
    Query(params): Query<SeriesParams>,
) -> Result<impl IntoResponse, ApiError> {
    let symbol = symbol.to_uppercase();

    // Reject before the query engine runs: a missing interval is a caller
    // bug, not a lookup miss.
    let Some(interval) = params.interval.as_deref().filter(|s| !s.is_empty()) else {
        return Err(ApiError::MissingInterval);
    };

    let limit = parse_limit(params.limit.as_deref());
    let payload = match query::resolve_intraday(&state.dataset, &symbol, interval, limit) {
        Ok(payload) => payload,
        Err(QueryError::UnknownSymbol) => return Err(ApiError::SymbolNotFound(symbol)),
        Err(QueryError::UnknownInterval) => {
            return Err(ApiError::IntervalNotFound {
                symbol,
                interval: interval.to_string(),
            })
        }
    };

    debug!(%symbol, interval, ?limit, "intraday series resolved");
    Ok(respond(payload, parse_delay(params.delay.as_deref())).await)
}
