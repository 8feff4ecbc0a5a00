pub mod history;
pub mod metrics;
pub mod record;
pub mod state;

pub use history::{ConversationLog, ConversationTurn, Role, HISTORY_WINDOW};
pub use metrics::{clamp_mood, CharacterMetrics, MetricsDelta, MoodBand, MOOD_MAX, MOOD_MIN};
pub use record::{UserRecord, UserRecords};
pub use state::SessionState;
