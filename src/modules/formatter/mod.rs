pub mod chunker;
pub mod delivery;
pub mod emotive;
pub mod escape;

pub use chunker::{split_message, CONTINUED_PREFIX, CONTINUED_SUFFIX, MAX_MESSAGE_CHARS};
pub use delivery::{deliver_message, deliver_reply, format_reply, DeliveryReport};
pub use emotive::{find_emotive_spans, EmotiveSpan, INTERJECTIONS};
pub use escape::{escape_markup, strip_code_spans, RESERVED_CHARS};
