//! Quote fetcher.
//!
//! Retrieves one ticker's raw response from a ranked list of equivalent
//! candidate endpoints. Candidates are tried strictly in order, each exactly
//! once and each under its own time budget; the first 2xx JSON answer wins.

mod transport;

#[cfg(test)]
pub(crate) mod scripted;

pub use transport::{HttpTransport, JsonTransport, BROWSER_USER_AGENT};

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use crate::errors::MarketDataError;

/// Default per-attempt budget.
pub const DEFAULT_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(10);

/// Walks candidate endpoints until one answers.
#[derive(Clone)]
pub struct QuoteFetcher {
    transport: Arc<dyn JsonTransport>,
    attempt_timeout: Duration,
}

impl QuoteFetcher {
    pub fn new(transport: Arc<dyn JsonTransport>, attempt_timeout: Duration) -> Self {
        Self {
            transport,
            attempt_timeout,
        }
    }

    /// Fetch `symbol` from the first candidate that answers with 2xx JSON.
    ///
    /// # Errors
    ///
    /// `FetchExhausted` carrying the last candidate's failure when no
    /// candidate succeeds (or the list is empty).
    pub async fn fetch(&self, symbol: &str, candidates: &[String]) -> Result<Value, MarketDataError> {
        let mut last_error: Option<MarketDataError> = None;

        for url in candidates {
            let attempt = tokio::time::timeout(self.attempt_timeout, self.transport.get_json(url)).await;

            let error = match attempt {
                Ok(Ok(body)) => {
                    debug!(symbol, endpoint = %url, "candidate answered");
                    return Ok(body);
                }
                Ok(Err(e)) => e,
                Err(_) => MarketDataError::Timeout {
                    endpoint: url.clone(),
                },
            };

            debug!(symbol, endpoint = %url, error = %error, "candidate failed, moving on");
            last_error = Some(error);
        }

        Err(MarketDataError::FetchExhausted {
            symbol: symbol.to_string(),
            last_error: Box::new(last_error.unwrap_or_else(|| {
                MarketDataError::InvalidConfig("no candidate endpoints".to_string())
            })),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::scripted::{Reply, ScriptedTransport};
    use super::*;
    use serde_json::json;

    fn candidates() -> Vec<String> {
        vec![
            "relay/MSTY".to_string(),
            "mirror/MSTY".to_string(),
            "direct/MSTY".to_string(),
        ]
    }

    fn fetcher(transport: Arc<ScriptedTransport>) -> QuoteFetcher {
        QuoteFetcher::new(transport, Duration::from_millis(100))
    }

    #[tokio::test]
    async fn test_first_success_wins() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .reply("relay/MSTY", Reply::Json(json!({ "from": "relay" })))
                .reply("mirror/MSTY", Reply::Json(json!({ "from": "mirror" }))),
        );

        let body = fetcher(transport.clone()).fetch("MSTY", &candidates()).await.unwrap();
        assert_eq!(body["from"], "relay");
        assert_eq!(transport.calls(), vec!["relay/MSTY"]);
    }

    #[tokio::test]
    async fn test_failures_advance_in_order_without_retry() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .reply("relay/MSTY", Reply::Status(500))
                .reply("mirror/MSTY", Reply::BadBody)
                .reply("direct/MSTY", Reply::Json(json!({ "from": "direct" }))),
        );

        let body = fetcher(transport.clone()).fetch("MSTY", &candidates()).await.unwrap();
        assert_eq!(body["from"], "direct");
        assert_eq!(
            transport.calls(),
            vec!["relay/MSTY", "mirror/MSTY", "direct/MSTY"]
        );
    }

    #[tokio::test]
    async fn test_any_candidate_error_moves_on() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .reply("relay/MSTY", Reply::Malformed)
                .reply("mirror/MSTY", Reply::Json(json!({ "from": "mirror" }))),
        );

        let body = fetcher(transport.clone()).fetch("MSTY", &candidates()).await.unwrap();
        assert_eq!(body["from"], "mirror");
        assert_eq!(transport.calls(), vec!["relay/MSTY", "mirror/MSTY"]);
    }

    #[tokio::test]
    async fn test_hung_candidate_is_bounded_by_timeout() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .reply("relay/MSTY", Reply::Hang)
                .reply("mirror/MSTY", Reply::Json(json!({ "from": "mirror" }))),
        );

        let body = fetcher(transport).fetch("MSTY", &candidates()).await.unwrap();
        assert_eq!(body["from"], "mirror");
    }

    #[tokio::test]
    async fn test_exhaustion_reports_last_error() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .reply("relay/MSTY", Reply::Refused)
                .reply("mirror/MSTY", Reply::Status(403))
                .reply("direct/MSTY", Reply::Status(429)),
        );

        let err = fetcher(transport.clone())
            .fetch("MSTY", &candidates())
            .await
            .unwrap_err();

        match err {
            MarketDataError::FetchExhausted { symbol, last_error } => {
                assert_eq!(symbol, "MSTY");
                assert!(matches!(
                    *last_error,
                    MarketDataError::HttpStatus { status: 429, .. }
                ));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(transport.calls().len(), 3);
    }

    #[tokio::test]
    async fn test_empty_candidate_list_is_exhausted() {
        let transport = Arc::new(ScriptedTransport::new());
        let err = fetcher(transport.clone()).fetch("MSTY", &[]).await.unwrap_err();
        assert!(matches!(err, MarketDataError::FetchExhausted { .. }));
        assert!(transport.calls().is_empty());
    }
}
