use crate::modules::llm::{CompletionRequest, GenerationError};
use crate::modules::persona::Persona;
use crate::modules::prompt::mood::{MoodStrategy, RandomDrift, MOOD_DELTA_LIMIT};
use crate::modules::session::{CharacterMetrics, ConversationLog};
use std::sync::Arc;

const GUIDELINES: &str = "\nGuidelines:\n\
1. Stay in character at all times\n\
2. Keep responses concise but meaningful\n\
3. Express emotions and reactions consistent with the character\n\
4. If asked about being an AI, maintain the character illusion\n\
5. Base responses on the character's knowledge, not modern information they wouldn't know\n";

#[derive(Debug, Clone, PartialEq)]
pub struct InterpretedReply {
    pub text: String,
    pub mood_delta: f32,
}

/// Turns persona and metrics into a system prompt, and a raw completion
/// into display text plus a mood delta.
#[derive(Clone)]
pub struct PromptAssembler {
    mood: Arc<dyn MoodStrategy>,
}

impl PromptAssembler {
    pub fn new(mood: Arc<dyn MoodStrategy>) -> Self {
        Self { mood }
    }

    pub fn with_random_drift() -> Self {
        Self::new(Arc::new(RandomDrift))
    }

    pub fn build_system_prompt(&self, persona: &Persona, metrics: &CharacterMetrics) -> String {
        // A persona's own trait vector wins over the live per-user stats.
        let traits = persona.traits.as_ref().unwrap_or(&metrics.personality_stats);
        let mut traits_info = String::from("Personality traits:\n");
        for (name, value) in traits.iter() {
            traits_info.push_str(&format!("- {}: {}/10\n", name.label(), value));
        }

        let current_state = format!(
            "\nCurrent state:\n- Mood: {}\n- Conversation count: {}\n",
            metrics.mood_band().label(),
            metrics.conversation_count
        );

        format!(
            "{}\n\n{}{}{}",
            persona.base_prompt(),
            traits_info,
            current_state,
            GUIDELINES
        )
    }

    pub fn build_request(
        &self,
        persona: &Persona,
        metrics: &CharacterMetrics,
        history: &ConversationLog,
    ) -> CompletionRequest {
        CompletionRequest::new(self.build_system_prompt(persona, metrics), history.turns())
    }

    pub fn interpret_reply(
        &self,
        raw: &str,
        history: &ConversationLog,
    ) -> Result<InterpretedReply, GenerationError> {
        let text = raw.trim();
        if text.is_empty() {
            return Err(GenerationError::EmptyReply);
        }

        let mood_delta = self
            .mood
            .derive_mood_delta(text, history)
            .clamp(-MOOD_DELTA_LIMIT, MOOD_DELTA_LIMIT);

        Ok(InterpretedReply {
            text: text.to_string(),
            mood_delta,
        })
    }
}

impl Default for PromptAssembler {
    fn default() -> Self {
        Self::with_random_drift()
    }
}
