//! Background quote refresh.
//!
//! Runs one fetch cycle on start and then every refresh interval. Cycles are
//! independent; each one fully replaces the published state.

use std::sync::Arc;

use serde_json::json;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info};
use yieldmax_market_data::{CycleFailure, PublishedState, CONNECTION_ERROR_LABEL};

use crate::events::{
    ServerEvent, QUOTES_REFRESH_COMPLETE, QUOTES_REFRESH_ERROR, QUOTES_REFRESH_START,
};
use crate::main_lib::AppState;

pub fn start_quote_refresh_scheduler(state: Arc<AppState>) {
    tokio::spawn(async move {
        info!(
            "Quote refresh scheduler started ({}s interval)",
            state.refresh_interval.as_secs()
        );

        // First tick is immediate
        let mut refresh_interval = interval(state.refresh_interval);
        refresh_interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            refresh_interval.tick().await;
            refresh_quotes(&state).await;
        }
    });
}

/// Run one fetch cycle and publish its result.
///
/// The cycle and its publication run on a detached task, so a caller that
/// stops waiting (e.g. a timed-out request) never loses the result.
pub async fn refresh_quotes(state: &Arc<AppState>) -> Arc<PublishedState> {
    let task_state = state.clone();
    match tokio::spawn(async move { run_and_publish(&task_state).await }).await {
        Ok(published) => published,
        Err(e) => {
            error!("Quote publish task failed: {}", e);
            state.snapshot()
        }
    }
}

async fn run_and_publish(state: &Arc<AppState>) -> Arc<PublishedState> {
    state
        .event_bus
        .publish(ServerEvent::new(QUOTES_REFRESH_START));

    // The cycle runs on its own task so a panic becomes a published failure.
    let controller = state.controller.clone();
    let published = match tokio::spawn(async move { controller.run_cycle().await }).await {
        Ok(report) => report.into_published(),
        Err(e) => {
            error!("Quote refresh task failed: {}", e);
            let failure = CycleFailure::Critical(e.to_string());
            PublishedState::failed(CONNECTION_ERROR_LABEL, failure.user_message())
        }
    };

    let published = Arc::new(published);
    state.published.send_replace(published.clone());

    match &published.error_message {
        None => {
            info!(
                "Published {} records from {}",
                published.records.len(),
                published.source_label
            );
            state.event_bus.publish(ServerEvent::with_payload(
                QUOTES_REFRESH_COMPLETE,
                json!({
                    "sourceLabel": published.source_label,
                    "records": published.records.len(),
                }),
            ));
        }
        Some(message) => {
            state.event_bus.publish(ServerEvent::with_payload(
                QUOTES_REFRESH_ERROR,
                json!({ "message": message }),
            ));
        }
    }

    published
}
