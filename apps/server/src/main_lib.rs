use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use yieldmax_market_data::{
    fetcher::BROWSER_USER_AGENT, AlphaVantageProvider, BatchOrchestrator, HttpTransport,
    JsonTransport, ProviderFallbackController, PublishedState, QuoteFetcher, QuoteProvider,
    YahooProvider,
};

use crate::config::Config;
use crate::events::EventBus;

/// Upstreams and client used by the relay routes.
pub struct RelayTargets {
    pub client: reqwest::Client,
    pub yahoo_chart_url: String,
    pub alpha_vantage_url: String,
}

pub struct AppState {
    pub controller: ProviderFallbackController,
    /// Latest published state; replaced wholesale after every cycle.
    pub published: watch::Sender<Arc<PublishedState>>,
    pub event_bus: EventBus,
    pub relay: RelayTargets,
    pub refresh_interval: Duration,
}

impl AppState {
    /// Snapshot of the current published state.
    pub fn snapshot(&self) -> Arc<PublishedState> {
        self.published.borrow().clone()
    }
}

pub fn init_tracing() {
    let log_format = std::env::var("YM_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let transport = Arc::new(HttpTransport::new(config.attempt_timeout)?);
    build_state_with_transport(config, transport)
}

/// Build the application state around a caller-supplied pipeline transport.
pub fn build_state_with_transport(
    config: &Config,
    transport: Arc<dyn JsonTransport>,
) -> anyhow::Result<Arc<AppState>> {
    let fetcher = QuoteFetcher::new(transport, config.attempt_timeout);
    let orchestrator = BatchOrchestrator::new(fetcher);

    let primary: Option<Arc<dyn QuoteProvider>> = if config.use_primary {
        Some(Arc::new(YahooProvider::new(config.relay_base_url.clone())))
    } else {
        tracing::info!("Primary provider disabled; cycles start at the secondary");
        None
    };
    let secondary: Arc<dyn QuoteProvider> = Arc::new(
        AlphaVantageProvider::new(config.alpha_vantage_api_key.clone())
            .with_relay(config.relay_base_url.clone()),
    );

    let controller =
        ProviderFallbackController::new(orchestrator, primary, secondary, config.tickers.clone());
    tracing::info!("Tracking tickers: {}", config.tickers.join(", "));

    let client = reqwest::Client::builder()
        .timeout(config.attempt_timeout)
        .user_agent(BROWSER_USER_AGENT)
        .build()?;

    let (published, _) = watch::channel(Arc::new(PublishedState::loading()));

    Ok(Arc::new(AppState {
        controller,
        published,
        event_bus: EventBus::new(256),
        relay: RelayTargets {
            client,
            yahoo_chart_url: config.yahoo_chart_url.clone(),
            alpha_vantage_url: config.alpha_vantage_url.clone(),
        },
        refresh_interval: config.refresh_interval,
    }))
}
