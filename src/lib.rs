pub mod api;
pub mod config;
pub mod modules;
pub mod utils;

#[cfg(test)]
mod _test_mock;

pub use api::{BotHandler, ChatError, MessageSink, OutboundMessage};
pub use config::{BotConfig, LlmConfig, StorageConfig};
pub use modules::llm::{LlmCapability, MistralClient};
pub use modules::persona::{CharacterCatalog, Persona, PersonalityTraits};
pub use modules::prompt::PromptAssembler;
pub use modules::session::SessionState;
pub use modules::storage::PersistenceStore;
