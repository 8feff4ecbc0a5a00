pub mod catalog_service;
pub mod chat_service;
pub mod menu_service;
pub mod validation_service;

pub use catalog_service::CatalogView;
pub use chat_service::{ChatReply, ChatService};
pub use validation_service::{parse_inbound, Command, InboundEvent};
