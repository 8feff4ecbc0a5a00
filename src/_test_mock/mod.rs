pub mod llm_mock;
pub mod sink_mock;

pub use llm_mock::MockLlm;
pub use sink_mock::RecordingSink;
