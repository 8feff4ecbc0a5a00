#![allow(dead_code)]

pub mod llm_mock;
pub mod sink_mock;

pub use llm_mock::MockLlm;
pub use sink_mock::{MockSink, RecordingSink};

use persona_chat::modules::prompt::{FixedDelta, PromptAssembler};
use persona_chat::{BotHandler, PersistenceStore};
use std::sync::Arc;

pub struct TestBot {
    pub handler: BotHandler,
    pub sink: Arc<RecordingSink>,
    pub llm: Arc<MockLlm>,
}

impl TestBot {
    pub fn new(llm: MockLlm) -> Self {
        Self::with_store(PersistenceStore::in_memory(), llm, 0.0)
    }

    pub fn with_store(store: PersistenceStore, llm: MockLlm, mood_delta: f32) -> Self {
        let sink = Arc::new(RecordingSink::new());
        let llm = Arc::new(llm);
        let handler = BotHandler::new(
            store,
            llm.clone(),
            PromptAssembler::new(Arc::new(FixedDelta(mood_delta))),
            sink.clone(),
        );
        Self { handler, sink, llm }
    }

    pub fn last_text(&self) -> String {
        self.sink.texts().last().cloned().unwrap_or_default()
    }
}
