use crate::api::types::{ChatId, Markup, MessageSink, OutboundMessage, SendError};
use async_trait::async_trait;
use std::sync::Mutex;

/// Keeps every message the transport accepted.
pub struct RecordingSink {
    sent: Mutex<Vec<(ChatId, OutboundMessage)>>,
    reject_escaped: bool,
    reject_all: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            reject_escaped: false,
            reject_all: false,
        }
    }

    pub fn rejecting_escaped(mut self) -> Self {
        self.reject_escaped = true;
        self
    }

    pub fn rejecting_all(mut self) -> Self {
        self.reject_all = true;
        self
    }

    pub fn sent(&self) -> Vec<(ChatId, OutboundMessage)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent().into_iter().map(|(_, message)| message.text).collect()
    }
}

#[async_trait]
impl MessageSink for RecordingSink {
    async fn send_text(&self, chat_id: ChatId, message: &OutboundMessage) -> Result<(), SendError> {
        if self.reject_all || (self.reject_escaped && message.markup == Markup::Escaped) {
            return Err(SendError::Rejected("can't parse entities".to_string()));
        }
        self.sent.lock().unwrap().push((chat_id, message.clone()));
        Ok(())
    }
}
