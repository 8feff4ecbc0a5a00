use crate::api::types::{PersonaId, UserId};
use crate::modules::creation::draft::{CreationDraft, CreationStage, NewPersona, Transition, NAME_PROMPT};
use crate::modules::persona::{CharacterCatalog, Persona};
use crate::modules::session::SessionState;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub const CANCELLED_MESSAGE: &str =
    "Character creation cancelled. Use /characters to choose from existing characters.";

#[derive(Debug, Clone, PartialEq)]
pub struct CreationReply {
    pub stage: CreationStage,
    pub text: String,
    pub persona_id: Option<PersonaId>,
}

impl CreationReply {
    fn new(stage: CreationStage, text: impl Into<String>) -> Self {
        Self {
            stage,
            text: text.into(),
            persona_id: None,
        }
    }
}

/// Character-creation dialogue. Drafts are held in memory per user and
/// are gone after commit, cancel or a restart. Clones share the drafts.
#[derive(Clone)]
pub struct CreationFlow {
    catalog: CharacterCatalog,
    session: SessionState,
    drafts: Arc<Mutex<HashMap<UserId, CreationDraft>>>,
}

impl CreationFlow {
    pub fn new(catalog: CharacterCatalog, session: SessionState) -> Self {
        Self {
            catalog,
            session,
            drafts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn drafts(&self) -> MutexGuard<'_, HashMap<UserId, CreationDraft>> {
        self.drafts.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn start(&self, user_id: UserId) -> CreationReply {
        if self.drafts().insert(user_id, CreationDraft::new()).is_some() {
            tracing::debug!(user_id, "restarting character creation");
        }
        tracing::info!(user_id, stage = CreationStage::AwaitingName.as_str(), "character creation started");

        CreationReply::new(CreationStage::AwaitingName, NAME_PROMPT)
    }

    pub fn is_active(&self, user_id: UserId) -> bool {
        self.drafts().contains_key(&user_id)
    }

    pub fn stage(&self, user_id: UserId) -> Option<CreationStage> {
        self.drafts().get(&user_id).map(|draft| draft.stage)
    }

    /// Feeds one text message into the user's draft. `None` when the user
    /// has no creation in progress.
    pub fn handle_input(&self, user_id: UserId, input: &str) -> Option<CreationReply> {
        let draft = self.drafts().remove(&user_id)?;

        let reply = match draft.apply(input) {
            Transition::Advanced { draft, prompt } => {
                let stage = draft.stage;
                self.drafts().insert(user_id, draft);
                tracing::debug!(user_id, stage = stage.as_str(), "creation advanced");
                CreationReply::new(stage, prompt)
            }
            Transition::Rejected { draft, error } => {
                let stage = draft.stage;
                self.drafts().insert(user_id, draft);
                tracing::debug!(user_id, stage = stage.as_str(), error = ?error, "creation input rejected");
                CreationReply::new(stage, error.to_string())
            }
            Transition::Complete(new_persona) => self.commit(user_id, new_persona),
        };

        Some(reply)
    }

    fn commit(&self, user_id: UserId, new_persona: NewPersona) -> CreationReply {
        let system_prompt = Persona::default_system_prompt(&new_persona.name, &new_persona.description);

        let created = self
            .catalog
            .create(
                user_id,
                &new_persona.name,
                &new_persona.description,
                new_persona.traits,
                Some(system_prompt),
                false,
            )
            .and_then(|persona_id| {
                self.session.add_owned(user_id, &persona_id)?;
                self.session.set_selected(user_id, &persona_id)?;
                Ok(persona_id)
            });

        match created {
            Ok(persona_id) => {
                tracing::info!(user_id, persona_id = %persona_id, stage = CreationStage::Committed.as_str(), "character creation committed");
                CreationReply {
                    stage: CreationStage::Committed,
                    text: format!(
                        "🎉 Character {} created successfully!\n\nYou are now chatting with your new character. Say hello!",
                        new_persona.name
                    ),
                    persona_id: Some(persona_id),
                }
            }
            Err(e) => {
                tracing::error!(user_id, stage = CreationStage::AwaitingTraits.as_str(), error = %e, "failed to save new character");
                let mut draft = CreationDraft::new();
                draft.stage = CreationStage::AwaitingTraits;
                draft.name = new_persona.name;
                draft.description = new_persona.description;
                self.drafts().insert(user_id, draft);
                CreationReply::new(
                    CreationStage::AwaitingTraits,
                    "Sorry, I couldn't save your character. Please send the traits again or use /cancel.",
                )
            }
        }
    }

    pub fn cancel(&self, user_id: UserId) -> Option<CreationReply> {
        let draft = self.drafts().remove(&user_id)?;
        tracing::info!(user_id, stage = draft.stage.as_str(), "character creation cancelled");

        Some(CreationReply::new(CreationStage::Cancelled, CANCELLED_MESSAGE))
    }
}
