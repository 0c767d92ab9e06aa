//! Yahoo Finance market data provider (primary tier).
//!
//! Reads the v8 chart endpoint for a 1-day window. The same payload can be
//! reached through the local relay, two public CORS mirrors, or directly;
//! they are offered to the fetcher in that order.

mod models;

use log::warn;
use serde_json::Value;
use urlencoding::encode;

use crate::errors::MarketDataError;
use crate::models::{CanonicalQuote, ProviderId};
use crate::provider::numbers::volume_from_f64;
use crate::provider::QuoteProvider;

use models::{YahooChartResponse, YahooIndicators};

/// Public chart endpoint; the symbol is appended as a path segment.
pub const CHART_BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

const ALLORIGINS_RAW_URL: &str = "https://api.allorigins.win/raw?url=";
const CORS_ANYWHERE_URL: &str = "https://cors-anywhere.herokuapp.com/";

/// Direct chart URL for one symbol (1-day range, 1-day interval).
pub fn chart_url(base_url: &str, symbol: &str) -> String {
    format!(
        "{}/{}?interval=1d&range=1d",
        base_url.trim_end_matches('/'),
        encode(symbol)
    )
}

/// Yahoo Finance chart provider.
pub struct YahooProvider {
    relay_base_url: Option<String>,
    use_public_mirrors: bool,
}

impl YahooProvider {
    /// Create a provider that tries `relay_base_url` first when given.
    pub fn new(relay_base_url: Option<String>) -> Self {
        Self {
            relay_base_url: relay_base_url.map(|u| u.trim_end_matches('/').to_string()),
            use_public_mirrors: true,
        }
    }

    /// Skip the third-party CORS mirrors (relay and direct only).
    pub fn without_public_mirrors(mut self) -> Self {
        self.use_public_mirrors = false;
        self
    }

    /// Normalize a typed chart response.
    fn chart_to_quote(
        symbol: &str,
        response: YahooChartResponse,
    ) -> Result<CanonicalQuote, MarketDataError> {
        let chart = response.chart;
        let result = chart
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| {
                let reason = chart
                    .error
                    .and_then(|e| e.description.or(e.code))
                    .unwrap_or_else(|| "empty chart result".to_string());
                MarketDataError::malformed(ProviderId::Yahoo, reason)
            })?;

        let meta = result
            .meta
            .ok_or_else(|| MarketDataError::malformed(ProviderId::Yahoo, "missing chart meta"))?;

        let price = meta.regular_market_price.ok_or_else(|| {
            MarketDataError::malformed(ProviderId::Yahoo, "missing regularMarketPrice")
        })?;
        let previous_close = meta
            .previous_close
            .ok_or_else(|| MarketDataError::malformed(ProviderId::Yahoo, "missing previousClose"))?;

        let changes_percentage = (price - previous_close) / previous_close * 100.0;
        if !changes_percentage.is_finite() {
            return Err(MarketDataError::malformed(
                ProviderId::Yahoo,
                format!("non-finite change percentage (previousClose = {})", previous_close),
            ));
        }

        if let Some(echoed) = meta.symbol.as_deref() {
            if !echoed.eq_ignore_ascii_case(symbol) {
                warn!("Yahoo answered {} for requested symbol {}", echoed, symbol);
            }
        }

        let mut quote = CanonicalQuote::new(symbol.to_uppercase());
        quote.name = meta.long_name.or(meta.short_name);
        quote.price = Some(price);
        quote.previous_close = Some(previous_close);
        quote.changes_percentage = Some(changes_percentage);
        quote.volume = Some(Self::last_volume(result.indicators.as_ref()).unwrap_or(0));
        quote.timestamp = meta.regular_market_time;
        quote.dividend_yield = meta
            .trailing_annual_dividend_yield
            .map(|y| y * 100.0)
            .filter(|v| v.is_finite());
        quote.monthly_payout = meta
            .trailing_annual_dividend_rate
            .map(|rate| rate / 12.0)
            .filter(|v| v.is_finite());
        quote.nav_change_1y = meta
            .fifty_two_week_change
            .map(|c| c * 100.0)
            .filter(|v| v.is_finite());

        Ok(quote)
    }

    /// Last non-null entry of the first volume series.
    fn last_volume(indicators: Option<&YahooIndicators>) -> Option<u64> {
        indicators?
            .quote
            .first()?
            .volume
            .as_ref()?
            .iter()
            .rev()
            .flatten()
            .next()
            .and_then(|v| volume_from_f64(*v))
    }
}

impl QuoteProvider for YahooProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Yahoo
    }

    fn candidate_urls(&self, symbol: &str) -> Vec<String> {
        let direct = chart_url(CHART_BASE_URL, symbol);
        let mut urls = Vec::with_capacity(4);

        if let Some(relay) = &self.relay_base_url {
            urls.push(format!("{}/api/yahoo-finance/{}", relay, encode(symbol)));
        }
        if self.use_public_mirrors {
            urls.push(format!("{}{}", ALLORIGINS_RAW_URL, encode(&direct)));
            urls.push(format!("{}{}", CORS_ANYWHERE_URL, direct));
        }
        urls.push(direct);

        urls
    }

    fn normalize(&self, symbol: &str, body: Value) -> Result<CanonicalQuote, MarketDataError> {
        let response: YahooChartResponse = serde_json::from_value(body).map_err(|e| {
            MarketDataError::malformed(ProviderId::Yahoo, format!("unexpected chart shape: {}", e))
        })?;
        Self::chart_to_quote(symbol, response)
    }
}
