use crate::modules::llm::GenerationError;
use crate::modules::storage::StorageError;
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

pub type PersonaId = String;
pub type UserId = i64;
pub type ChatId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Markup {
    #[default]
    Plain,
    Escaped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub token: String,
}

impl Button {
    pub fn new(label: impl Into<String>, action: &CallbackAction) -> Self {
        Self {
            label: label.into(),
            token: action.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OutboundMessage {
    pub text: String,
    pub markup: Markup,
    pub buttons: Vec<Vec<Button>>,
}

impl OutboundMessage {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            markup: Markup::Plain,
            buttons: Vec::new(),
        }
    }

    pub fn escaped(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            markup: Markup::Escaped,
            buttons: Vec::new(),
        }
    }

    pub fn with_row(mut self, row: Vec<Button>) -> Self {
        self.buttons.push(row);
        self
    }

    pub fn with_button(self, button: Button) -> Self {
        self.with_row(vec![button])
    }
}

/// Callback tokens carried by inline buttons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackAction {
    ShowCharacters,
    CreateCharacter,
    Help,
    SelectCharacter(PersonaId),
    Reset(PersonaId),
    DeleteCharacter(PersonaId),
    CancelDelete,
    PresetHeader,
    CustomHeader,
}

impl CallbackAction {
    pub fn parse(token: &str) -> Option<Self> {
        let action = match token {
            "show_characters" => CallbackAction::ShowCharacters,
            "create_character" => CallbackAction::CreateCharacter,
            "help" => CallbackAction::Help,
            "cancel_delete" => CallbackAction::CancelDelete,
            "preset_header" => CallbackAction::PresetHeader,
            "custom_header" => CallbackAction::CustomHeader,
            _ => {
                let (kind, id) = token.split_once(':')?;
                if id.is_empty() {
                    return None;
                }
                match kind {
                    "select_character" => CallbackAction::SelectCharacter(id.to_string()),
                    "reset" => CallbackAction::Reset(id.to_string()),
                    "delete_character" => CallbackAction::DeleteCharacter(id.to_string()),
                    _ => return None,
                }
            }
        };
        Some(action)
    }
}

impl fmt::Display for CallbackAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallbackAction::ShowCharacters => write!(f, "show_characters"),
            CallbackAction::CreateCharacter => write!(f, "create_character"),
            CallbackAction::Help => write!(f, "help"),
            CallbackAction::SelectCharacter(id) => write!(f, "select_character:{}", id),
            CallbackAction::Reset(id) => write!(f, "reset:{}", id),
            CallbackAction::DeleteCharacter(id) => write!(f, "delete_character:{}", id),
            CallbackAction::CancelDelete => write!(f, "cancel_delete"),
            CallbackAction::PresetHeader => write!(f, "preset_header"),
            CallbackAction::CustomHeader => write!(f, "custom_header"),
        }
    }
}

#[derive(Error, Debug)]
pub enum SendError {
    #[error("Message rejected by transport: {0}")]
    Rejected(String),

    #[error("Transport unavailable: {0}")]
    Transport(String),
}

/// Outbound half of the messaging transport.
#[async_trait]
pub trait MessageSink: Send + Sync {
    async fn send_text(&self, chat_id: ChatId, message: &OutboundMessage) -> Result<(), SendError>;

    async fn send_typing(&self, _chat_id: ChatId) -> Result<(), SendError> {
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Persona '{0}' no longer exists")]
    UnknownPersona(PersonaId),

    #[error("No persona selected")]
    NoPersonaSelected,

    #[error("Generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
