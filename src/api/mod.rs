pub mod types;
pub mod services;
pub mod endpoints;

pub use endpoints::BotHandler;
pub use types::{
    Button, CallbackAction, ChatError, ChatId, Markup, MessageSink, OutboundMessage, PersonaId,
    SendError, UserId,
};
