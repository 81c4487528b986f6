use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::activity;
use crate::types::*;
use crate::AppState;

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Room for the JSON envelope around the HTML payload.
const BODY_SLACK_BYTES: usize = 64 * 1024;

/// Worst-case JSON escaping grows one HTML byte to six (`\u00XX`).
const JSON_ESCAPE_FACTOR: usize = 6;

/// Request body ceiling. The HTML length check in `extract_handler` is the
/// real guard; this only has to admit any escaped payload that passes it.
pub fn body_limit(max_html_bytes: usize) -> usize {
    max_html_bytes
        .saturating_mul(JSON_ESCAPE_FACTOR)
        .saturating_add(BODY_SLACK_BYTES)
}

pub fn router(state: Arc<AppState>) -> Router {
    let limit = body_limit(state.max_html_bytes);
    Router::new()
        .route("/", get(health_check))
        .route("/health", get(health_check))
        .route("/strategies", get(list_strategies))
        .route("/extract", post(extract_handler))
        .layer(DefaultBodyLimit::max(limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Milliseconds since `start`, saturating instead of truncating.
pub fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "product-scout",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn list_strategies(State(state): State<Arc<AppState>>) -> Json<StrategiesResponse> {
    Json(StrategiesResponse {
        strategies: state
            .registry
            .names()
            .into_iter()
            .map(str::to_string)
            .collect(),
    })
}

async fn extract_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ExtractRequest>,
) -> Result<Json<ExtractResponse>, ApiError> {
    let start_time = Instant::now();
    let ExtractRequest { url, html } = request;

    if url.trim().is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "url must not be empty"));
    }
    if html.len() > state.max_html_bytes {
        warn!(
            "Rejecting {} bytes of HTML for {} (limit {})",
            html.len(),
            url,
            state.max_html_bytes
        );
        return Err(api_error(
            StatusCode::PAYLOAD_TOO_LARGE,
            format!("html exceeds {} bytes", state.max_html_bytes),
        ));
    }

    info!("Extracting product data for: {}", url);

    // scraper::Html is !Send; parse and query entirely on the blocking pool.
    let registry = Arc::clone(&state.registry);
    let task_url = url.clone();
    let extraction = tokio::task::spawn_blocking(move || registry.extract(&html, &task_url))
        .await
        .map_err(|e| {
            error!("Extraction task join error: {}", e);
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "extraction task failed")
        })?;

    if extraction.record.is_empty() {
        warn!("No product fields resolved for {}", url);
    }

    let logs = activity::report(&url, &extraction);
    Ok(Json(ExtractResponse {
        domain: activity::domain_of(&url),
        url,
        strategy: extraction.strategy,
        record: extraction.record,
        logs,
        duration_ms: elapsed_ms(start_time),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_limit_admits_fully_escaped_html() {
        assert_eq!(body_limit(1000), 6000 + BODY_SLACK_BYTES);
        assert_eq!(body_limit(usize::MAX), usize::MAX);
    }

    #[test]
    fn elapsed_ms_is_small_for_a_fresh_instant() {
        assert!(elapsed_ms(Instant::now()) < 60_000);
    }
}
