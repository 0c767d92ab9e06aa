//! Pass-through relay to the upstream quote providers.
//!
//! Answers with the upstream status and body untouched. Only a failure to
//! talk to the upstream at all becomes `500 {"error": ...}`.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use yieldmax_market_data::provider::{alpha_vantage, yahoo};

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AlphaVantageQuery {
    api_key: Option<String>,
}

async fn yahoo_finance(
    Path(symbol): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Response> {
    let symbol = checked_symbol(&symbol)?;
    let url = yahoo::chart_url(&state.relay.yahoo_chart_url, &symbol);
    Ok(forward(&state.relay.client, &url).await)
}

async fn alpha_vantage_quote(
    Path(symbol): Path<String>,
    Query(query): Query<AlphaVantageQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Response> {
    let symbol = checked_symbol(&symbol)?;
    let api_key = query
        .api_key
        .filter(|k| !k.trim().is_empty())
        .unwrap_or_else(|| alpha_vantage::DEMO_API_KEY.to_string());
    let url = alpha_vantage::global_quote_url(&state.relay.alpha_vantage_url, &symbol, &api_key);
    Ok(forward(&state.relay.client, &url).await)
}

async fn relay_test() -> Json<serde_json::Value> {
    Json(json!({ "message": "Proxy server is running!" }))
}

async fn forward(client: &reqwest::Client, url: &str) -> Response {
    let upstream = match client.get(url).send().await {
        Ok(resp) => resp,
        Err(e) => return relay_error(&e),
    };

    let status =
        StatusCode::from_u16(upstream.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
    let content_type = upstream
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/json")
        .to_string();

    match upstream.bytes().await {
        Ok(body) => {
            if !status.is_success() {
                tracing::warn!("Upstream answered {} for {}", status, url);
            }
            (status, [(header::CONTENT_TYPE, content_type)], Body::from(body)).into_response()
        }
        Err(e) => relay_error(&e),
    }
}

fn relay_error(e: &reqwest::Error) -> Response {
    tracing::error!("Relay request failed: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": e.to_string() })),
    )
        .into_response()
}

/// Tickers are short and plain; anything else never reaches an upstream.
fn checked_symbol(raw: &str) -> ApiResult<String> {
    let symbol = raw.trim().to_uppercase();
    let valid = !symbol.is_empty()
        && symbol.len() <= 16
        && symbol
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '='));
    if valid {
        Ok(symbol)
    } else {
        Err(ApiError::BadRequest(format!("Invalid ticker '{}'", raw)))
    }
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/yahoo-finance/{symbol}", get(yahoo_finance))
        .route("/alpha-vantage/{symbol}", get(alpha_vantage_quote))
        .route("/test", get(relay_test))
}
