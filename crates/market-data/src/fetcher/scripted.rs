//! In-memory transport for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use super::JsonTransport;
use crate::errors::MarketDataError;
use crate::models::ProviderId;

/// What a scripted endpoint does when called.
#[derive(Clone, Debug)]
pub enum Reply {
    Json(Value),
    Status(u16),
    Refused,
    BadBody,
    /// Fails with an error outside the transport family.
    Malformed,
    /// Never answers; only a timeout gets past it.
    Hang,
}

/// Transport answering from a fixed URL -> reply table.
///
/// Unknown URLs are refused. Every call is recorded in order.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: HashMap<String, Reply>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, url: impl Into<String>, reply: Reply) -> Self {
        self.replies.insert(url.into(), reply);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_matching(&self, needle: &str) -> usize {
        self.calls().iter().filter(|c| c.contains(needle)).count()
    }
}

#[async_trait]
impl JsonTransport for ScriptedTransport {
    async fn get_json(&self, url: &str) -> Result<Value, MarketDataError> {
        self.calls.lock().unwrap().push(url.to_string());

        match self.replies.get(url).cloned().unwrap_or(Reply::Refused) {
            Reply::Json(body) => Ok(body),
            Reply::Status(status) => Err(MarketDataError::HttpStatus {
                endpoint: url.to_string(),
                status,
            }),
            Reply::Refused => Err(MarketDataError::Transport {
                endpoint: url.to_string(),
                message: "connection refused".to_string(),
            }),
            Reply::BadBody => Err(MarketDataError::InvalidJson {
                endpoint: url.to_string(),
                message: "expected value at line 1 column 1".to_string(),
            }),
            Reply::Malformed => Err(MarketDataError::MalformedResponse {
                provider: ProviderId::Yahoo,
                message: "unexpected payload".to_string(),
            }),
            Reply::Hang => std::future::pending().await,
        }
    }
}
