pub mod assembler;
pub mod mood;

pub use assembler::{InterpretedReply, PromptAssembler};
pub use mood::{FixedDelta, MoodStrategy, RandomDrift, MOOD_DELTA_LIMIT};
