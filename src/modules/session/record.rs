use crate::api::types::{PersonaId, UserId};
use crate::modules::session::history::ConversationLog;
use crate::modules::session::metrics::CharacterMetrics;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub type UserRecords = HashMap<UserId, UserRecord>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(rename = "selected_character", default)]
    pub selected_persona_id: Option<PersonaId>,
    #[serde(rename = "custom_characters", default)]
    pub owned_persona_ids: Vec<PersonaId>,
    #[serde(rename = "character_stats", default)]
    pub metrics_by_persona: HashMap<PersonaId, CharacterMetrics>,
    #[serde(rename = "conversation_history", default)]
    pub history_by_persona: HashMap<PersonaId, ConversationLog>,
    #[serde(default)]
    pub allow_mature: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_active: Option<DateTime<Utc>>,
}

impl UserRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn metrics_mut(&mut self, persona_id: &str) -> &mut CharacterMetrics {
        self.metrics_by_persona
            .entry(persona_id.to_string())
            .or_insert_with(CharacterMetrics::new)
    }

    pub fn history_mut(&mut self, persona_id: &str) -> &mut ConversationLog {
        self.history_by_persona
            .entry(persona_id.to_string())
            .or_insert_with(ConversationLog::new)
    }

    pub fn add_owned(&mut self, persona_id: &str) {
        if !self.owned_persona_ids.iter().any(|id| id == persona_id) {
            self.owned_persona_ids.push(persona_id.to_string());
        }
    }

    /// Drops ownership of a deleted persona and deselects it. Metrics and
    /// history stay in place.
    pub fn release(&mut self, persona_id: &str) {
        self.owned_persona_ids.retain(|id| id != persona_id);
        if self.selected_persona_id.as_deref() == Some(persona_id) {
            self.selected_persona_id = None;
        }
    }

    pub fn touch(&mut self) {
        self.last_active = Some(Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::{UserRecord, UserRecords};

    #[test]
    fn test_add_owned_deduplicates() {
        let mut record = UserRecord::new();
        record.add_owned("custom_bob_1");
        record.add_owned("custom_amy_1");
        record.add_owned("custom_bob_1");
        assert_eq!(record.owned_persona_ids, vec!["custom_bob_1", "custom_amy_1"]);
    }

    #[test]
    fn test_release_clears_selection() {
        let mut record = UserRecord::new();
        record.add_owned("custom_bob_1");
        record.selected_persona_id = Some("custom_bob_1".to_string());
        record.metrics_mut("custom_bob_1");

        record.release("custom_bob_1");
        assert!(record.owned_persona_ids.is_empty());
        assert!(record.selected_persona_id.is_none());
        assert!(record.metrics_by_persona.contains_key("custom_bob_1"));
    }

    #[test]
    fn test_release_keeps_other_selection() {
        let mut record = UserRecord::new();
        record.add_owned("custom_bob_1");
        record.selected_persona_id = Some("sherlock".to_string());

        record.release("custom_bob_1");
        assert_eq!(record.selected_persona_id.as_deref(), Some("sherlock"));
    }

    #[test]
    fn test_user_records_json_keys() {
        let mut records = UserRecords::new();
        records.insert(42, UserRecord::new());
        let json = serde_json::to_string(&records).unwrap();
        assert!(json.contains("\"42\""));
        assert!(json.contains("selected_character"));

        let parsed: UserRecords = serde_json::from_str(&json).unwrap();
        assert!(parsed.contains_key(&42));
    }
}
