//! Error types and retry classification for the market data crate.
//!
//! This module provides:
//! - [`MarketDataError`]: The main error enum for all pipeline operations
//! - [`RetryClass`]: Classification for determining which level recovers

mod retry;

pub use retry::RetryClass;

use thiserror::Error;

use crate::models::ProviderId;

/// Errors that can occur while fetching and normalizing quotes.
///
/// Each variant is classified into a [`RetryClass`] via the
/// [`retry_class`](Self::retry_class) method.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The endpoint could not be reached (DNS, connect, reset, ...).
    #[error("Transport error: {endpoint} - {message}")]
    Transport {
        /// The candidate URL that failed
        endpoint: String,
        /// The underlying error message
        message: String,
    },

    /// The attempt did not complete within the per-attempt budget.
    #[error("Timeout: {endpoint}")]
    Timeout {
        /// The candidate URL that timed out
        endpoint: String,
    },

    /// The endpoint answered with a non-2xx status.
    #[error("HTTP {status}: {endpoint}")]
    HttpStatus {
        /// The candidate URL that answered
        endpoint: String,
        /// The HTTP status code
        status: u16,
    },

    /// The body was not valid JSON.
    #[error("Invalid JSON from {endpoint}: {message}")]
    InvalidJson {
        /// The candidate URL that answered
        endpoint: String,
        /// The parser message
        message: String,
    },

    /// The response parsed but lacks required fields or yields non-finite values.
    #[error("Malformed response from {provider}: {message}")]
    MalformedResponse {
        /// The provider whose response was rejected
        provider: ProviderId,
        /// What was wrong with it
        message: String,
    },

    /// Every candidate endpoint failed for one ticker.
    #[error("Fetch exhausted for {symbol}: {last_error}")]
    FetchExhausted {
        /// The ticker being fetched
        symbol: String,
        /// The failure of the last candidate tried
        last_error: Box<MarketDataError>,
    },

    /// No ticker in a provider batch produced a record.
    #[error("No data available from {provider}")]
    NoDataAvailable {
        /// The provider whose batch came back empty
        provider: ProviderId,
    },

    /// The pipeline was asked to run without anything to fetch.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl MarketDataError {
    /// Returns the retry classification for this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use yieldmax_market_data::errors::{MarketDataError, RetryClass};
    /// use yieldmax_market_data::ProviderId;
    ///
    /// let error = MarketDataError::Timeout { endpoint: "http://relay".to_string() };
    /// assert_eq!(error.retry_class(), RetryClass::NextCandidate);
    ///
    /// let error = MarketDataError::NoDataAvailable { provider: ProviderId::Yahoo };
    /// assert_eq!(error.retry_class(), RetryClass::NextTier);
    /// ```
    pub fn retry_class(&self) -> RetryClass {
        match self {
            Self::Transport { .. }
            | Self::Timeout { .. }
            | Self::HttpStatus { .. }
            | Self::InvalidJson { .. } => RetryClass::NextCandidate,

            Self::MalformedResponse { .. } | Self::FetchExhausted { .. } => RetryClass::SkipTicker,

            Self::NoDataAvailable { .. } => RetryClass::NextTier,

            Self::InvalidConfig(_) => RetryClass::Never,
        }
    }

    /// Shorthand used by the normalizers.
    pub(crate) fn malformed(provider: ProviderId, message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            provider,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attempt_failures_try_next_candidate() {
        let errors = [
            MarketDataError::Transport {
                endpoint: "a".to_string(),
                message: "connection refused".to_string(),
            },
            MarketDataError::Timeout {
                endpoint: "a".to_string(),
            },
            MarketDataError::HttpStatus {
                endpoint: "a".to_string(),
                status: 503,
            },
            MarketDataError::InvalidJson {
                endpoint: "a".to_string(),
                message: "expected value".to_string(),
            },
        ];
        for error in errors {
            assert_eq!(error.retry_class(), RetryClass::NextCandidate);
        }
    }

    #[test]
    fn test_malformed_response_skips_ticker() {
        let error = MarketDataError::malformed(ProviderId::Yahoo, "missing meta");
        assert_eq!(error.retry_class(), RetryClass::SkipTicker);
    }

    #[test]
    fn test_fetch_exhausted_skips_ticker() {
        let error = MarketDataError::FetchExhausted {
            symbol: "MSTY".to_string(),
            last_error: Box::new(MarketDataError::HttpStatus {
                endpoint: "a".to_string(),
                status: 404,
            }),
        };
        assert_eq!(error.retry_class(), RetryClass::SkipTicker);
    }

    #[test]
    fn test_no_data_available_moves_to_next_tier() {
        let error = MarketDataError::NoDataAvailable {
            provider: ProviderId::AlphaVantage,
        };
        assert_eq!(error.retry_class(), RetryClass::NextTier);
    }

    #[test]
    fn test_invalid_config_never_retries() {
        let error = MarketDataError::InvalidConfig("empty ticker list".to_string());
        assert_eq!(error.retry_class(), RetryClass::Never);
    }

    #[test]
    fn test_error_display() {
        let error = MarketDataError::HttpStatus {
            endpoint: "http://localhost:3003/api/yahoo-finance/MSTY".to_string(),
            status: 500,
        };
        assert_eq!(
            format!("{}", error),
            "HTTP 500: http://localhost:3003/api/yahoo-finance/MSTY"
        );

        let error = MarketDataError::FetchExhausted {
            symbol: "TSLY".to_string(),
            last_error: Box::new(MarketDataError::Timeout {
                endpoint: "x".to_string(),
            }),
        };
        assert_eq!(format!("{}", error), "Fetch exhausted for TSLY: Timeout: x");

        let error = MarketDataError::NoDataAvailable {
            provider: ProviderId::Yahoo,
        };
        assert_eq!(format!("{}", error), "No data available from YAHOO");
    }
}
