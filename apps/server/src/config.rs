use std::{net::SocketAddr, str::FromStr, time::Duration};

use anyhow::{bail, Context};
use yieldmax_market_data::{
    default_tickers, normalize_tickers, provider::alpha_vantage, provider::yahoo,
    DEFAULT_ATTEMPT_TIMEOUT,
};

pub struct Config {
    pub listen_addr: SocketAddr,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub tickers: Vec<String>,
    pub alpha_vantage_api_key: String,
    /// Base URL of the relay the pipeline tries first; `None` skips it.
    pub relay_base_url: Option<String>,
    pub use_primary: bool,
    pub attempt_timeout: Duration,
    pub refresh_interval: Duration,
    /// Upstreams the relay routes forward to.
    pub yahoo_chart_url: String,
    pub alpha_vantage_url: String,
}

/// Built-in settings, independent of the environment.
impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 3003)),
            cors_allow: vec!["*".to_string()],
            request_timeout: Duration::from_millis(30_000),
            tickers: default_tickers(),
            alpha_vantage_api_key: alpha_vantage::DEMO_API_KEY.to_string(),
            relay_base_url: Some("http://localhost:3003".to_string()),
            use_primary: true,
            attempt_timeout: DEFAULT_ATTEMPT_TIMEOUT,
            refresh_interval: Duration::from_secs(300),
            yahoo_chart_url: yahoo::CHART_BASE_URL.to_string(),
            alpha_vantage_url: alpha_vantage::BASE_URL.to_string(),
        }
    }
}

impl Config {
    /// Defaults overridden by `YM_*` variables (and a `.env` file, if any).
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let mut config = Self::default();

        if let Some(addr) = env_parsed::<SocketAddr>("YM_LISTEN_ADDR")? {
            config.listen_addr = addr;
        }
        if let Some(raw) = env_var("YM_CORS_ALLOW_ORIGINS") {
            config.cors_allow = raw
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        if let Some(ms) = env_positive("YM_REQUEST_TIMEOUT_MS")? {
            config.request_timeout = Duration::from_millis(ms);
        }
        if let Some(raw) = env_var("YM_TICKERS") {
            config.tickers = normalize_tickers(raw.split(','));
            if config.tickers.is_empty() {
                bail!("YM_TICKERS contains no tickers");
            }
        }
        if let Some(key) = env_var("YM_ALPHA_VANTAGE_API_KEY") {
            config.alpha_vantage_api_key = key;
        }
        if let Some(raw) = env_var("YM_RELAY_BASE_URL") {
            let url = raw.trim().trim_end_matches('/').to_string();
            config.relay_base_url = (!url.is_empty()).then_some(url);
        }
        if let Some(raw) = env_var("YM_USE_PRIMARY") {
            config.use_primary = parse_bool(&raw).context("Invalid YM_USE_PRIMARY")?;
        }
        if let Some(ms) = env_positive("YM_ATTEMPT_TIMEOUT_MS")? {
            config.attempt_timeout = Duration::from_millis(ms);
        }
        if let Some(secs) = env_positive("YM_REFRESH_INTERVAL_SECS")? {
            config.refresh_interval = Duration::from_secs(secs);
        }
        if let Some(url) = env_var("YM_YAHOO_CHART_URL") {
            config.yahoo_chart_url = url;
        }
        if let Some(url) = env_var("YM_ALPHA_VANTAGE_URL") {
            config.alpha_vantage_url = url;
        }

        Ok(config)
    }
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn env_parsed<T>(key: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    env_var(key)
        .map(|raw| raw.trim().parse::<T>())
        .transpose()
        .with_context(|| format!("Invalid {}", key))
}

fn env_positive(key: &str) -> anyhow::Result<Option<u64>> {
    match env_parsed::<u64>(key)? {
        Some(0) => bail!("{} must be positive", key),
        other => Ok(other),
    }
}

fn parse_bool(raw: &str) -> anyhow::Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("expected a boolean, got '{}'", other),
    }
}
