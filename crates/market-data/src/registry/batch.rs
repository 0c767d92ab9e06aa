//! Batch orchestration.
//!
//! Fans one provider out over every configured ticker. All per-ticker
//! pipelines are polled together on the calling task; each one only produces
//! its own slot, so nothing is shared between them.

use futures::future::join_all;
use log::{debug, info, warn};

use super::QuoteValidator;
use crate::errors::MarketDataError;
use crate::fetcher::QuoteFetcher;
use crate::models::{BatchResult, CanonicalQuote};
use crate::provider::QuoteProvider;

/// Runs one provider across a ticker list.
#[derive(Clone)]
pub struct BatchOrchestrator {
    fetcher: QuoteFetcher,
    validator: QuoteValidator,
}

impl BatchOrchestrator {
    pub fn new(fetcher: QuoteFetcher) -> Self {
        Self::with_validator(fetcher, QuoteValidator::new())
    }

    pub fn with_validator(fetcher: QuoteFetcher, validator: QuoteValidator) -> Self {
        Self { fetcher, validator }
    }

    /// Fetch and normalize every ticker concurrently.
    ///
    /// The result is aligned with `tickers`; failed tickers are `None`.
    ///
    /// # Errors
    ///
    /// - `NoDataAvailable` when no ticker produced a record
    /// - `InvalidConfig` when `tickers` is empty
    pub async fn run(
        &self,
        provider: &dyn QuoteProvider,
        tickers: &[String],
    ) -> Result<BatchResult, MarketDataError> {
        if tickers.is_empty() {
            return Err(MarketDataError::InvalidConfig(
                "ticker list is empty".to_string(),
            ));
        }

        let entries = join_all(
            tickers
                .iter()
                .map(|symbol| self.fetch_slot(provider, symbol, tickers)),
        )
        .await;

        let batch = BatchResult::new(provider.id(), entries);
        if !batch.has_data() {
            warn!("No ticker produced data from '{}'", provider.id());
            return Err(MarketDataError::NoDataAvailable {
                provider: provider.id(),
            });
        }

        info!(
            "Batch from '{}': {}/{} tickers",
            provider.id(),
            batch.valid_count(),
            tickers.len()
        );
        Ok(batch)
    }

    /// One ticker's slot: a record, or `None` after logging why not.
    async fn fetch_slot(
        &self,
        provider: &dyn QuoteProvider,
        symbol: &str,
        tickers: &[String],
    ) -> Option<CanonicalQuote> {
        match self.fetch_one(provider, symbol, tickers).await {
            Ok(quote) => {
                debug!("'{}' produced a record for {}", provider.id(), symbol);
                Some(quote)
            }
            Err(e) => {
                warn!("'{}' failed for {}: {}", provider.id(), symbol, e);
                None
            }
        }
    }

    async fn fetch_one(
        &self,
        provider: &dyn QuoteProvider,
        symbol: &str,
        tickers: &[String],
    ) -> Result<CanonicalQuote, MarketDataError> {
        let candidates = provider.candidate_urls(symbol);
        let body = self.fetcher.fetch(symbol, &candidates).await?;
        let quote = provider.normalize(symbol, body)?;
        self.validator.validate(provider.id(), &quote, tickers)?;
        Ok(quote)
    }
}
