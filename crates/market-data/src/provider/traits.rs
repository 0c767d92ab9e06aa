//! Quote provider trait definitions.
//!
//! This module defines the `QuoteProvider` trait that both upstream
//! providers implement.

use serde_json::Value;

use crate::errors::MarketDataError;
use crate::models::{CanonicalQuote, ProviderId};

/// One upstream quote provider: where to ask, and how to read the answer.
///
/// Fetching itself is provider-agnostic (see [`crate::fetcher`]); a provider
/// only contributes its ranked candidate endpoints and its normalizer.
///
/// # Example
///
/// ```ignore
/// use yieldmax_market_data::provider::QuoteProvider;
///
/// struct MyProvider;
///
/// impl QuoteProvider for MyProvider {
///     fn id(&self) -> ProviderId {
///         ProviderId::Yahoo
///     }
///
///     fn candidate_urls(&self, symbol: &str) -> Vec<String> {
///         vec![format!("https://example.com/quote/{}", symbol)]
///     }
///
///     fn normalize(&self, symbol: &str, body: Value) -> Result<CanonicalQuote, MarketDataError> {
///         // ... map provider fields onto CanonicalQuote
///     }
/// }
/// ```
pub trait QuoteProvider: Send + Sync {
    /// Which provider this is. Drives the source label and error context.
    fn id(&self) -> ProviderId;

    /// Semantically equivalent endpoints for `symbol`, most preferred first.
    fn candidate_urls(&self, symbol: &str) -> Vec<String>;

    /// Convert a raw response body into the canonical record.
    ///
    /// # Arguments
    ///
    /// * `symbol` - The configured ticker the request was issued for
    /// * `body` - The parsed JSON body returned by a candidate endpoint
    ///
    /// # Returns
    ///
    /// The canonical record, or `MalformedResponse` when required fields are
    /// missing or a derived value is not finite.
    fn normalize(&self, symbol: &str, body: Value) -> Result<CanonicalQuote, MarketDataError>;
}
