use crate::api::services::catalog_service::CatalogView;
use crate::api::services::chat_service::ChatService;
use crate::api::services::menu_service::{self, NO_SELECTION_SHORT_MESSAGE, UNKNOWN_COMMAND_MESSAGE, UNKNOWN_PERSONA_MESSAGE};
use crate::api::services::validation_service::Command;
use crate::api::types::{CallbackAction, ChatError, ChatId, MessageSink, OutboundMessage, UserId};
use crate::modules::creation::CreationFlow;
use crate::modules::formatter::{deliver_message, deliver_reply};
use crate::modules::llm::LlmCapability;
use crate::modules::persona::{CharacterCatalog, Persona};
use crate::modules::prompt::PromptAssembler;
use crate::modules::session::SessionState;
use crate::modules::storage::{run_blocking, PersistenceStore};
use std::sync::Arc;

/// Where an inbound text message goes.
enum TextRoute {
    Reply(OutboundMessage),
    Chat(Persona),
}

/// Synchronous half of the handler: everything that touches the store.
/// Cheap to clone, so each event moves a copy onto the blocking pool.
#[derive(Clone)]
struct BotCore {
    catalog: CharacterCatalog,
    session: SessionState,
    creation: CreationFlow,
    chat: ChatService,
}

/// Inbound event surface of the bot. One instance per process; the
/// transport is expected to serialise events per chat.
pub struct BotHandler {
    core: BotCore,
    sink: Arc<dyn MessageSink>,
}

impl BotHandler {
    pub fn new(
        store: PersistenceStore,
        llm: Arc<dyn LlmCapability>,
        assembler: PromptAssembler,
        sink: Arc<dyn MessageSink>,
    ) -> Self {
        let catalog = CharacterCatalog::new(store.clone());
        let session = SessionState::new(store);

        let core = BotCore {
            creation: CreationFlow::new(catalog.clone(), session.clone()),
            chat: ChatService::new(catalog.clone(), session.clone(), llm, assembler),
            catalog,
            session,
        };
        Self { core, sink }
    }

    pub fn catalog_view(&self) -> CatalogView {
        CatalogView::new(self.core.catalog.clone())
    }

    pub fn session(&self) -> &SessionState {
        &self.core.session
    }

    pub fn creation(&self) -> &CreationFlow {
        &self.core.creation
    }

    async fn send(&self, chat_id: ChatId, message: OutboundMessage) {
        deliver_message(self.sink.as_ref(), chat_id, message).await;
    }

    /// Runs store-bound work off the async workers. `None` only when the
    /// blocking task itself died; that is logged here.
    async fn offload<R, F>(&self, chat_id: ChatId, f: F) -> Option<R>
    where
        F: FnOnce(BotCore) -> R + Send + 'static,
        R: Send + 'static,
    {
        let core = self.core.clone();
        match run_blocking(move || f(core)).await {
            Ok(result) => Some(result),
            Err(e) => {
                tracing::error!(chat_id, error = %e, "event handling task failed");
                None
            }
        }
    }

    pub async fn on_command(&self, name: &str, user_id: UserId, chat_id: ChatId) {
        let Some(command) = Command::parse(name) else {
            tracing::debug!(user_id, chat_id, command = name, "unknown command");
            self.send(chat_id, OutboundMessage::plain(UNKNOWN_COMMAND_MESSAGE)).await;
            return;
        };
        tracing::debug!(user_id, chat_id, command = command.as_str(), "command received");

        if let Some(message) = self.offload(chat_id, move |core| core.command(command, user_id)).await {
            self.send(chat_id, message).await;
        }
    }

    /// Text goes to the creation dialogue while one is active, and to the
    /// selected persona otherwise.
    pub async fn on_text(&self, user_id: UserId, chat_id: ChatId, text: &str) {
        let input = text.to_string();
        let Some(route) = self
            .offload(chat_id, move |core| core.route_text(user_id, chat_id, &input))
            .await
        else {
            return;
        };

        let persona = match route {
            TextRoute::Reply(message) => {
                self.send(chat_id, message).await;
                return;
            }
            TextRoute::Chat(persona) => persona,
        };

        if let Err(e) = self.sink.send_typing(chat_id).await {
            tracing::debug!(chat_id, error = %e, "typing indicator failed");
        }

        match self.core.chat.respond(user_id, &persona, text).await {
            Ok(reply) => {
                deliver_reply(self.sink.as_ref(), chat_id, &reply.text).await;
            }
            Err(e) => {
                self.send(chat_id, error_message(&e, Some(&persona))).await;
            }
        }
    }

    pub async fn on_button_press(&self, user_id: UserId, chat_id: ChatId, token: &str) {
        let Some(action) = CallbackAction::parse(token) else {
            tracing::warn!(user_id, chat_id, token, "unrecognised callback token");
            return;
        };

        let reply = self
            .offload(chat_id, move |core| core.button(action, user_id))
            .await
            .flatten();
        if let Some(message) = reply {
            self.send(chat_id, message).await;
        }
    }
}

fn error_message(error: &ChatError, persona: Option<&Persona>) -> OutboundMessage {
    match (error, persona) {
        (ChatError::NoPersonaSelected, _) => menu_service::no_selection_message(),
        (ChatError::UnknownPersona(_), _) => OutboundMessage::plain(UNKNOWN_PERSONA_MESSAGE),
        (_, Some(persona)) => OutboundMessage::plain(format!(
            "Sorry, I couldn't generate a response from {} right now. Please try again later.",
            persona.name
        )),
        (_, None) => OutboundMessage::plain("Sorry, something went wrong. Please try again later."),
    }
}

impl BotCore {
    fn command(&self, command: Command, user_id: UserId) -> OutboundMessage {
        match command {
            Command::Start => menu_service::start_message(),
            Command::Help => menu_service::help_message(),
            Command::Characters => self.show_characters(user_id),
            Command::Character => self.show_current(user_id),
            Command::Reset => self.reset_selected(user_id),
            Command::Stats => self.show_stats(user_id),
            Command::Create => OutboundMessage::plain(self.creation.start(user_id).text),
            Command::Cancel => OutboundMessage::plain(match self.creation.cancel(user_id) {
                Some(reply) => reply.text,
                None => "There is no character creation in progress.".to_string(),
            }),
            Command::Delete => self.show_delete_menu(user_id),
            Command::Nsfw => self.toggle_mature(user_id),
        }
    }

    fn button(&self, action: CallbackAction, user_id: UserId) -> Option<OutboundMessage> {
        let message = match action {
            CallbackAction::ShowCharacters => self.show_characters(user_id),
            CallbackAction::CreateCharacter => OutboundMessage::plain(self.creation.start(user_id).text),
            CallbackAction::Help => menu_service::help_message(),
            CallbackAction::SelectCharacter(id) => self.select(user_id, &id),
            CallbackAction::Reset(id) => self.reset(user_id, &id),
            CallbackAction::DeleteCharacter(id) => self.delete(user_id, &id),
            CallbackAction::CancelDelete => OutboundMessage::plain("Deletion cancelled."),
            CallbackAction::PresetHeader | CallbackAction::CustomHeader => return None,
        };
        Some(message)
    }

    fn route_text(&self, user_id: UserId, chat_id: ChatId, text: &str) -> TextRoute {
        if let Some(reply) = self.creation.handle_input(user_id, text) {
            tracing::debug!(user_id, chat_id, stage = reply.stage.as_str(), "text consumed by creation flow");
            return TextRoute::Reply(OutboundMessage::plain(reply.text));
        }

        match self.chat.active_persona(user_id) {
            Ok(persona) => TextRoute::Chat(persona),
            Err(e) => TextRoute::Reply(error_message(&e, None)),
        }
    }

    /// Selected persona for commands that need one, or the message that
    /// explains why there is none.
    fn require_selected(&self, user_id: UserId) -> Result<Persona, OutboundMessage> {
        self.chat.active_persona(user_id).map_err(|e| match e {
            ChatError::NoPersonaSelected => OutboundMessage::plain(NO_SELECTION_SHORT_MESSAGE),
            other => error_message(&other, None),
        })
    }

    fn show_characters(&self, user_id: UserId) -> OutboundMessage {
        let all = self.catalog.get_all();
        let owned = self.session.owned_personas(user_id);
        let allow_mature = self.session.allows_mature(user_id);
        menu_service::character_list(&all, &owned, allow_mature)
    }

    fn show_current(&self, user_id: UserId) -> OutboundMessage {
        match self.chat.active_persona(user_id) {
            Ok(persona) => {
                let metrics = self.session.peek_metrics(user_id, &persona.id);
                menu_service::current_character(&persona, metrics.as_ref())
            }
            Err(e) => error_message(&e, None),
        }
    }

    fn show_stats(&self, user_id: UserId) -> OutboundMessage {
        let persona = match self.require_selected(user_id) {
            Ok(persona) => persona,
            Err(message) => return message,
        };

        match self.session.peek_metrics(user_id, &persona.id) {
            Some(metrics) => menu_service::stats_message(&persona, &metrics),
            None => OutboundMessage::plain(format!(
                "No stats available for {} yet. Start chatting to build up stats!",
                persona.name
            )),
        }
    }

    fn reset_selected(&self, user_id: UserId) -> OutboundMessage {
        match self.require_selected(user_id) {
            Ok(persona) => self.reset(user_id, &persona.id),
            Err(message) => message,
        }
    }

    fn reset(&self, user_id: UserId, persona_id: &str) -> OutboundMessage {
        let Some(persona) = self.catalog.get(persona_id) else {
            return OutboundMessage::plain(UNKNOWN_PERSONA_MESSAGE);
        };

        match self.session.reset_history(user_id, persona_id) {
            Ok(()) => OutboundMessage::plain(format!(
                "Conversation with {} has been reset! Start chatting again.",
                persona.name
            )),
            Err(e) => {
                tracing::error!(user_id, persona_id, error = %e, "failed to reset conversation");
                OutboundMessage::plain("Sorry, I couldn't reset the conversation. Please try again later.")
            }
        }
    }

    fn select(&self, user_id: UserId, persona_id: &str) -> OutboundMessage {
        let Some(persona) = self.catalog.get(persona_id) else {
            return OutboundMessage::plain(UNKNOWN_PERSONA_MESSAGE);
        };

        if persona.is_mature && !self.session.allows_mature(user_id) {
            return OutboundMessage::plain(
                "This character is only available after enabling mature characters with /nsfw.",
            );
        }

        match self.session.set_selected(user_id, persona_id) {
            Ok(()) => menu_service::selected_message(&persona),
            Err(e) => {
                tracing::error!(user_id, persona_id, error = %e, "failed to save selection");
                OutboundMessage::plain("Sorry, I couldn't select that character. Please try again later.")
            }
        }
    }

    fn show_delete_menu(&self, user_id: UserId) -> OutboundMessage {
        let owned: Vec<Persona> = self
            .session
            .owned_personas(user_id)
            .iter()
            .filter_map(|id| self.catalog.get(id))
            .collect();
        menu_service::delete_menu(&owned)
    }

    fn delete(&self, user_id: UserId, persona_id: &str) -> OutboundMessage {
        let name = self.catalog.get(persona_id).map(|persona| persona.name);

        if !self.catalog.delete(user_id, persona_id) {
            return OutboundMessage::plain("You can only delete custom characters that you created.");
        }

        if let Err(e) = self.session.release_persona(user_id, persona_id) {
            tracing::error!(user_id, persona_id, error = %e, "failed to clean up user record after delete");
        }

        let name = name.unwrap_or_else(|| persona_id.to_string());
        OutboundMessage::plain(format!("Character {} has been deleted.", name))
    }

    fn toggle_mature(&self, user_id: UserId) -> OutboundMessage {
        let text = match self.session.toggle_mature(user_id) {
            Ok(true) => "Mature characters are now shown in /characters.",
            Ok(false) => "Mature characters are now hidden.",
            Err(e) => {
                tracing::error!(user_id, error = %e, "failed to toggle mature setting");
                "Sorry, I couldn't update that setting. Please try again later."
            }
        };
        OutboundMessage::plain(text)
    }
}
