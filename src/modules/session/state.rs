use crate::api::types::{PersonaId, UserId};
use crate::modules::session::history::{ConversationLog, ConversationTurn, Role};
use crate::modules::session::metrics::{CharacterMetrics, MetricsDelta};
use crate::modules::session::record::{UserRecord, UserRecords};
use crate::modules::storage::{PersistenceStore, StorageError, USER_RECORDS_KEY};

/// Per-user conversational state on top of the `user_data` document.
/// Every mutation re-reads and rewrites the whole document.
#[derive(Clone)]
pub struct SessionState {
    store: PersistenceStore,
}

impl SessionState {
    pub fn new(store: PersistenceStore) -> Self {
        Self { store }
    }

    fn load_all(&self) -> UserRecords {
        self.store.load(USER_RECORDS_KEY)
    }

    /// User-driven mutation: also stamps `last_active`.
    fn with_record<R, F>(&self, user_id: UserId, f: F) -> Result<R, StorageError>
    where
        F: FnOnce(&mut UserRecord) -> R,
    {
        self.mutate_record(user_id, |record| {
            record.touch();
            f(record)
        })
    }

    fn mutate_record<R, F>(&self, user_id: UserId, f: F) -> Result<R, StorageError>
    where
        F: FnOnce(&mut UserRecord) -> R,
    {
        self.store.update(USER_RECORDS_KEY, |records: &mut UserRecords| {
            f(records.entry(user_id).or_default())
        })
    }

    pub fn record(&self, user_id: UserId) -> UserRecord {
        self.load_all().remove(&user_id).unwrap_or_default()
    }

    pub fn get_selected(&self, user_id: UserId) -> Option<PersonaId> {
        self.record(user_id).selected_persona_id
    }

    pub fn set_selected(&self, user_id: UserId, persona_id: &str) -> Result<(), StorageError> {
        self.with_record(user_id, |record| {
            record.selected_persona_id = Some(persona_id.to_string());
            record.metrics_mut(persona_id);
        })?;

        tracing::debug!(user_id, persona_id, "persona selected");
        Ok(())
    }

    /// Stored metrics for the pair, initialising and persisting them on
    /// first reference.
    pub fn get_metrics(&self, user_id: UserId, persona_id: &str) -> CharacterMetrics {
        if let Some(metrics) = self.peek_metrics(user_id, persona_id) {
            return metrics;
        }

        match self.mutate_record(user_id, |record| record.metrics_mut(persona_id).clone()) {
            Ok(metrics) => metrics,
            Err(e) => {
                tracing::warn!(user_id, persona_id, error = %e, "failed to persist initial metrics");
                CharacterMetrics::new()
            }
        }
    }

    pub fn peek_metrics(&self, user_id: UserId, persona_id: &str) -> Option<CharacterMetrics> {
        self.record(user_id).metrics_by_persona.remove(persona_id)
    }

    pub fn update_metrics(
        &self,
        user_id: UserId,
        persona_id: &str,
        delta: &MetricsDelta,
    ) -> Result<CharacterMetrics, StorageError> {
        self.with_record(user_id, |record| {
            let metrics = record.metrics_mut(persona_id);
            metrics.apply(delta);
            metrics.clone()
        })
    }

    pub fn append_turn(
        &self,
        user_id: UserId,
        persona_id: &str,
        role: Role,
        content: &str,
    ) -> Result<(), StorageError> {
        self.with_record(user_id, |record| {
            record
                .history_mut(persona_id)
                .push(ConversationTurn::new(role, content));
        })
    }

    pub fn get_history(&self, user_id: UserId, persona_id: &str) -> ConversationLog {
        self.record(user_id)
            .history_by_persona
            .remove(persona_id)
            .unwrap_or_default()
    }

    pub fn reset_history(&self, user_id: UserId, persona_id: &str) -> Result<(), StorageError> {
        self.with_record(user_id, |record| {
            if let Some(history) = record.history_by_persona.get_mut(persona_id) {
                history.clear();
            }
        })?;

        tracing::info!(user_id, persona_id, "conversation history reset");
        Ok(())
    }

    pub fn owned_personas(&self, user_id: UserId) -> Vec<PersonaId> {
        self.record(user_id).owned_persona_ids
    }

    pub fn add_owned(&self, user_id: UserId, persona_id: &str) -> Result<(), StorageError> {
        self.with_record(user_id, |record| record.add_owned(persona_id))
    }

    pub fn release_persona(&self, user_id: UserId, persona_id: &str) -> Result<(), StorageError> {
        self.with_record(user_id, |record| record.release(persona_id))
    }

    pub fn allows_mature(&self, user_id: UserId) -> bool {
        self.record(user_id).allow_mature
    }

    pub fn toggle_mature(&self, user_id: UserId) -> Result<bool, StorageError> {
        self.with_record(user_id, |record| {
            record.allow_mature = !record.allow_mature;
            record.allow_mature
        })
    }
}
