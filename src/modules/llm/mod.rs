pub mod client;

pub use client::{ChatMessage, CompletionRequest, GenerationError, LlmCapability, MistralClient};
