pub mod draft;
pub mod flow;

pub use draft::{parse_traits, CreationDraft, CreationStage, DraftInputError, NewPersona, Transition};
pub use flow::{CreationFlow, CreationReply};
