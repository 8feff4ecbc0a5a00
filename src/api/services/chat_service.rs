use crate::api::types::{ChatError, PersonaId, UserId};
use crate::modules::llm::LlmCapability;
use crate::modules::persona::{CharacterCatalog, Persona};
use crate::modules::prompt::PromptAssembler;
use crate::modules::session::{CharacterMetrics, MetricsDelta, Role, SessionState};
use crate::modules::storage::{run_blocking, StorageError};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub struct ChatReply {
    pub persona_id: PersonaId,
    pub text: String,
    pub metrics: CharacterMetrics,
}

/// The conversational reply pipeline for one inbound message.
#[derive(Clone)]
pub struct ChatService {
    catalog: CharacterCatalog,
    session: SessionState,
    llm: Arc<dyn LlmCapability>,
    assembler: PromptAssembler,
}

impl ChatService {
    pub fn new(
        catalog: CharacterCatalog,
        session: SessionState,
        llm: Arc<dyn LlmCapability>,
        assembler: PromptAssembler,
    ) -> Self {
        Self {
            catalog,
            session,
            llm,
            assembler,
        }
    }

    pub fn active_persona(&self, user_id: UserId) -> Result<Persona, ChatError> {
        let persona_id = self
            .session
            .get_selected(user_id)
            .ok_or(ChatError::NoPersonaSelected)?;

        self.catalog.get(&persona_id).ok_or_else(|| {
            tracing::warn!(user_id, persona_id = %persona_id, "selected persona no longer exists");
            ChatError::UnknownPersona(persona_id)
        })
    }

    /// Records the user turn, asks the model for a reply and commits the
    /// reply and metrics. On failure only the user turn stays recorded.
    /// Store access runs on the blocking pool; the model call is the only
    /// await on the async workers.
    pub async fn respond(
        &self,
        user_id: UserId,
        persona: &Persona,
        text: &str,
    ) -> Result<ChatReply, ChatError> {
        let session = self.session.clone();
        let persona_id = persona.id.clone();
        let user_text = text.to_string();
        let (history, mut metrics) = run_blocking(move || -> Result<_, StorageError> {
            session.append_turn(user_id, &persona_id, Role::User, &user_text)?;
            Ok((
                session.get_history(user_id, &persona_id),
                session.get_metrics(user_id, &persona_id),
            ))
        })
        .await??;
        metrics.conversation_count += 1;

        let request = self.assembler.build_request(persona, &metrics, &history);
        let reply = self
            .llm
            .complete(&request)
            .await
            .and_then(|raw| self.assembler.interpret_reply(&raw, &history))
            .map_err(|e| {
                tracing::error!(user_id, persona_id = %persona.id, error = %e, "error generating response");
                e
            })?;

        let delta = MetricsDelta::new()
            .with_mood(reply.mood_delta)
            .with_conversation_count(metrics.conversation_count);
        let session = self.session.clone();
        let persona_id = persona.id.clone();
        let reply_text = reply.text.clone();
        let metrics = run_blocking(move || -> Result<CharacterMetrics, StorageError> {
            let metrics = session.update_metrics(user_id, &persona_id, &delta)?;
            session.append_turn(user_id, &persona_id, Role::Assistant, &reply_text)?;
            Ok(metrics)
        })
        .await??;

        tracing::debug!(
            user_id,
            persona_id = %persona.id,
            mood = metrics.mood,
            conversation_count = metrics.conversation_count,
            "reply generated"
        );

        Ok(ChatReply {
            persona_id: persona.id.clone(),
            text: reply.text,
            metrics,
        })
    }
}
