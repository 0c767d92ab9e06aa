use serde_json::Value;
use tokio::sync::broadcast;

/// Event names streamed to dashboard clients.
pub const QUOTES_REFRESH_START: &str = "quotes:refresh-start";
pub const QUOTES_REFRESH_COMPLETE: &str = "quotes:refresh-complete";
pub const QUOTES_REFRESH_ERROR: &str = "quotes:refresh-error";

/// Event name plus optional JSON payload.
#[derive(Clone, Debug)]
pub struct ServerEvent {
    pub name: &'static str,
    pub payload: Option<Value>,
}

impl ServerEvent {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            payload: None,
        }
    }

    pub fn with_payload(name: &'static str, payload: Value) -> Self {
        Self {
            name,
            payload: Some(payload),
        }
    }
}

/// Broadcast bus fanning events out to every connected stream.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<ServerEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _receiver) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ServerEvent> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: ServerEvent) {
        // No subscribers is fine; nobody is watching.
        let _ = self.sender.send(event);
    }
}
