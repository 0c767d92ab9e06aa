use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use yieldmax_market_data::{CanonicalQuote, PublishedState};

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
    models::DashboardRow,
    scheduler::refresh_quotes,
};

/// Current published state
async fn get_dashboard(State(state): State<Arc<AppState>>) -> Json<PublishedState> {
    Json(state.snapshot().as_ref().clone())
}

/// Published records formatted for display
async fn get_dashboard_rows(State(state): State<Arc<AppState>>) -> Json<Vec<DashboardRow>> {
    let snapshot = state.snapshot();
    Json(snapshot.records.iter().map(DashboardRow::from).collect())
}

/// One published record by ticker
async fn get_record(
    Path(symbol): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<CanonicalQuote>> {
    let symbol = symbol.trim().to_uppercase();
    state
        .snapshot()
        .records
        .iter()
        .find(|q| q.symbol == symbol)
        .cloned()
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// Run a fetch cycle now and return what it published
async fn refresh_dashboard(State(state): State<Arc<AppState>>) -> Json<PublishedState> {
    let published = refresh_quotes(&state).await;
    Json(published.as_ref().clone())
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/dashboard", get(get_dashboard))
        .route("/dashboard/rows", get(get_dashboard_rows))
        .route("/dashboard/records/{symbol}", get(get_record))
        .route("/dashboard/refresh", post(refresh_dashboard))
}
