//! Alpha Vantage market data provider (secondary tier).
//!
//! Uses the GLOBAL_QUOTE endpoint, which returns a flat object of numbered
//! string fields. It carries no dividend, payout or NAV data and no quote
//! time, so those stay unknown and the timestamp is taken at normalization.
//!
//! Note: the free tier (and the `demo` key) is heavily rate limited; limit
//! notices arrive as `Note`/`Information` keys instead of a quote.

use chrono::Utc;
use log::{debug, warn};
use serde::Deserialize;
use serde_json::Value;
use urlencoding::encode;

use crate::errors::MarketDataError;
use crate::models::{CanonicalQuote, ProviderId};
use crate::provider::numbers::{parse_f64, parse_volume};
use crate::provider::QuoteProvider;

/// Public query endpoint.
pub const BASE_URL: &str = "https://www.alphavantage.co/query";

/// Key used when none is configured.
pub const DEMO_API_KEY: &str = "demo";

/// Direct GLOBAL_QUOTE URL for one symbol.
pub fn global_quote_url(base_url: &str, symbol: &str, api_key: &str) -> String {
    format!(
        "{}?function=GLOBAL_QUOTE&symbol={}&apikey={}",
        base_url,
        encode(symbol),
        encode(api_key)
    )
}

/// Alpha Vantage GLOBAL_QUOTE provider.
pub struct AlphaVantageProvider {
    api_key: String,
    relay_base_url: Option<String>,
}

// ============================================================================
// Response structures for Alpha Vantage API
// ============================================================================

/// GLOBAL_QUOTE response
#[derive(Debug, Deserialize)]
struct GlobalQuoteResponse {
    #[serde(rename = "Global Quote")]
    global_quote: Option<GlobalQuote>,
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Information")]
    information: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GlobalQuote {
    #[serde(rename = "01. symbol")]
    symbol: Option<String>,
    #[serde(rename = "05. price")]
    price: Option<String>,
    #[serde(rename = "06. volume")]
    volume: Option<String>,
    #[serde(rename = "08. previous close")]
    previous_close: Option<String>,
    #[serde(rename = "10. change percent")]
    change_percent: Option<String>,
}

impl GlobalQuote {
    /// Alpha Vantage answers unknown symbols with `"Global Quote": {}`.
    fn is_empty(&self) -> bool {
        self.symbol.is_none()
            && self.price.is_none()
            && self.volume.is_none()
            && self.previous_close.is_none()
            && self.change_percent.is_none()
    }
}

// ============================================================================
// AlphaVantageProvider implementation
// ============================================================================

impl AlphaVantageProvider {
    /// Create a new Alpha Vantage provider with the given API key.
    pub fn new(api_key: String) -> Self {
        let api_key = if api_key.trim().is_empty() {
            DEMO_API_KEY.to_string()
        } else {
            api_key
        };
        Self {
            api_key,
            relay_base_url: None,
        }
    }

    /// Route requests through the local relay before going direct.
    pub fn with_relay(mut self, relay_base_url: Option<String>) -> Self {
        self.relay_base_url = relay_base_url.map(|u| u.trim_end_matches('/').to_string());
        self
    }

    /// Explain why a response carries no quote.
    fn missing_quote_reason(response: &GlobalQuoteResponse) -> String {
        if let Some(msg) = &response.error_message {
            return msg.clone();
        }
        // "Note"/"Information" usually mean the call budget is spent
        if let Some(msg) = response.note.as_ref().or(response.information.as_ref()) {
            warn!("Alpha Vantage notice: {}", msg);
            return msg.clone();
        }
        "missing Global Quote".to_string()
    }

    /// Normalize a typed GLOBAL_QUOTE response.
    fn global_quote_to_quote(
        symbol: &str,
        response: GlobalQuoteResponse,
    ) -> Result<CanonicalQuote, MarketDataError> {
        let global = match response.global_quote {
            Some(ref q) if !q.is_empty() => q,
            _ => {
                return Err(MarketDataError::malformed(
                    ProviderId::AlphaVantage,
                    Self::missing_quote_reason(&response),
                ))
            }
        };

        if let Some(echoed) = global.symbol.as_deref() {
            if !echoed.trim().eq_ignore_ascii_case(symbol) {
                warn!("Alpha Vantage answered {} for requested symbol {}", echoed, symbol);
            }
        }

        let mut quote = CanonicalQuote::new(symbol.to_uppercase());
        quote.price = global.price.as_deref().and_then(parse_f64);
        quote.changes_percentage = global.change_percent.as_deref().and_then(parse_f64);
        quote.previous_close = global.previous_close.as_deref().and_then(parse_f64);
        quote.volume = global.volume.as_deref().and_then(parse_volume);
        quote.timestamp = Some(Utc::now().timestamp());

        if quote.price.is_none() {
            debug!("Alpha Vantage quote for {} has no usable price", symbol);
        }

        Ok(quote)
    }
}

impl QuoteProvider for AlphaVantageProvider {
    fn id(&self) -> ProviderId {
        ProviderId::AlphaVantage
    }

    fn candidate_urls(&self, symbol: &str) -> Vec<String> {
        let mut urls = Vec::with_capacity(2);
        if let Some(relay) = &self.relay_base_url {
            urls.push(format!(
                "{}/api/alpha-vantage/{}?apiKey={}",
                relay,
                encode(symbol),
                encode(&self.api_key)
            ));
        }
        urls.push(global_quote_url(BASE_URL, symbol, &self.api_key));
        urls
    }

    fn normalize(&self, symbol: &str, body: Value) -> Result<CanonicalQuote, MarketDataError> {
        let response: GlobalQuoteResponse = serde_json::from_value(body).map_err(|e| {
            MarketDataError::malformed(
                ProviderId::AlphaVantage,
                format!("unexpected GLOBAL_QUOTE shape: {}", e),
            )
        })?;
        Self::global_quote_to_quote(symbol, response)
    }
}
