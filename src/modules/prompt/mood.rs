use crate::modules::session::ConversationLog;
use rand::Rng;

/// Bound on how far a single reply may move the mood.
pub const MOOD_DELTA_LIMIT: f32 = 0.5;

pub trait MoodStrategy: Send + Sync {
    fn derive_mood_delta(&self, reply: &str, history: &ConversationLog) -> f32;
}

/// Uniform drift in `[-0.5, 0.5]`, independent of the reply text.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomDrift;

impl MoodStrategy for RandomDrift {
    fn derive_mood_delta(&self, _reply: &str, _history: &ConversationLog) -> f32 {
        rand::rng().random_range(-MOOD_DELTA_LIMIT..=MOOD_DELTA_LIMIT)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FixedDelta(pub f32);

impl MoodStrategy for FixedDelta {
    fn derive_mood_delta(&self, _reply: &str, _history: &ConversationLog) -> f32 {
        self.0
    }
}
