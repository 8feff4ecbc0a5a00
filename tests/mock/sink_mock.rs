use async_trait::async_trait;
use mockall::mock;
use persona_chat::api::{ChatId, Markup, MessageSink, OutboundMessage, SendError};
use std::sync::Mutex;

pub struct RecordingSink {
    sent: Mutex<Vec<(ChatId, OutboundMessage)>>,
    typing: Mutex<Vec<ChatId>>,
    reject_escaped: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            typing: Mutex::new(Vec::new()),
            reject_escaped: false,
        }
    }

    pub fn rejecting_escaped(mut self) -> Self {
        self.reject_escaped = true;
        self
    }

    pub fn sent(&self) -> Vec<(ChatId, OutboundMessage)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent().into_iter().map(|(_, message)| message.text).collect()
    }

    pub fn last(&self) -> Option<OutboundMessage> {
        self.sent().pop().map(|(_, message)| message)
    }

    pub fn typing_count(&self) -> usize {
        self.typing.lock().unwrap().len()
    }
}

#[async_trait]
impl MessageSink for RecordingSink {
    async fn send_text(&self, chat_id: ChatId, message: &OutboundMessage) -> Result<(), SendError> {
        if self.reject_escaped && message.markup == Markup::Escaped {
            return Err(SendError::Rejected("can't parse entities".to_string()));
        }
        self.sent.lock().unwrap().push((chat_id, message.clone()));
        Ok(())
    }

    async fn send_typing(&self, chat_id: ChatId) -> Result<(), SendError> {
        self.typing.lock().unwrap().push(chat_id);
        Ok(())
    }
}

mock! {
    pub Sink {}

    #[async_trait]
    impl MessageSink for Sink {
        async fn send_text(&self, chat_id: ChatId, message: &OutboundMessage) -> Result<(), SendError>;
        async fn send_typing(&self, chat_id: ChatId) -> Result<(), SendError>;
    }
}
