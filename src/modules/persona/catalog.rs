use crate::api::types::{PersonaId, UserId};
use crate::modules::persona::model::{Persona, PersonalityTraits};
use crate::modules::persona::presets::PRESET_PERSONAS;
use crate::modules::storage::{PersistenceStore, StorageError, CUSTOM_PERSONAS_KEY};
use std::collections::BTreeMap;

pub type PersonaMap = BTreeMap<PersonaId, Persona>;

/// Presets merged with user-authored personas. Custom personas live in the
/// `custom_characters` document and are re-read on every call.
#[derive(Clone)]
pub struct CharacterCatalog {
    store: PersistenceStore,
}

impl CharacterCatalog {
    pub fn new(store: PersistenceStore) -> Self {
        Self { store }
    }

    fn load_custom(&self) -> PersonaMap {
        let mut custom: PersonaMap = self.store.load(CUSTOM_PERSONAS_KEY);
        for (id, persona) in custom.iter_mut() {
            if persona.id != *id {
                persona.id = id.clone();
            }
        }
        custom
    }

    pub fn presets(&self) -> PersonaMap {
        PRESET_PERSONAS
            .iter()
            .map(|persona| (persona.id.clone(), persona.clone()))
            .collect()
    }

    pub fn custom(&self) -> PersonaMap {
        self.load_custom()
    }

    pub fn get_all(&self) -> PersonaMap {
        let mut all = self.presets();
        all.extend(self.load_custom());
        all
    }

    pub fn get(&self, id: &str) -> Option<Persona> {
        if let Some(persona) = self.load_custom().remove(id) {
            return Some(persona);
        }

        PRESET_PERSONAS.iter().find(|persona| persona.id == id).cloned()
    }

    pub fn create(
        &self,
        creator_id: UserId,
        name: &str,
        description: &str,
        traits: PersonalityTraits,
        system_prompt: Option<String>,
        is_mature: bool,
    ) -> Result<PersonaId, StorageError> {
        let id = Persona::custom_id(name, creator_id);
        let persona = Persona {
            id: id.clone(),
            name: name.trim().to_string(),
            description: description.trim().to_string(),
            traits: Some(traits),
            system_prompt,
            is_mature,
            creator_id: Some(creator_id),
        };

        let replaced = self
            .store
            .update(CUSTOM_PERSONAS_KEY, |custom: &mut PersonaMap| {
                custom.insert(id.clone(), persona).is_some()
            })?;
        if replaced {
            tracing::info!(user_id = creator_id, persona_id = %id, "replaced existing custom persona");
        }

        tracing::info!(user_id = creator_id, persona_id = %id, "custom persona created");
        Ok(id)
    }

    /// Removes a custom persona. Only its creator may delete it; any other
    /// case returns `false` and leaves the catalog untouched.
    pub fn delete(&self, creator_id: UserId, id: &str) -> bool {
        let removed = self.store.update_if(CUSTOM_PERSONAS_KEY, |custom: &mut PersonaMap| {
            let owned = custom
                .get(id)
                .map(|persona| persona.is_created_by(creator_id))
                .unwrap_or(false);
            if owned {
                custom.remove(id);
            }
            (owned, owned)
        });

        match removed {
            Ok(true) => {
                tracing::info!(user_id = creator_id, persona_id = id, "custom persona deleted");
                true
            }
            Ok(false) => {
                tracing::debug!(user_id = creator_id, persona_id = id, "delete refused");
                false
            }
            Err(e) => {
                tracing::error!(user_id = creator_id, persona_id = id, error = %e, "failed to persist persona deletion");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CharacterCatalog;
    use crate::modules::persona::model::{Persona, PersonalityTraits};
    use crate::modules::storage::{PersistenceStore, CUSTOM_PERSONAS_KEY};
    use std::collections::BTreeMap;

    fn catalog() -> CharacterCatalog {
        CharacterCatalog::new(PersistenceStore::in_memory())
    }

    #[test]
    fn test_get_all_contains_presets() {
        let catalog = catalog();
        let all = catalog.get_all();
        assert!(all.contains_key("sherlock"));
        assert!(all.contains_key("wednesday"));
        assert_eq!(all.len(), 5);
    }

    #[test]
    fn test_create_and_get() {
        let catalog = catalog();
        let id = catalog
            .create(7, "Bob", "A brave knight", PersonalityTraits::new(), None, false)
            .unwrap();

        assert_eq!(id, "custom_bob_7");
        let persona = catalog.get(&id).unwrap();
        assert_eq!(persona.name, "Bob");
        assert!(persona.is_created_by(7));
        assert_eq!(catalog.get_all().len(), 6);
    }

    #[test]
    fn test_custom_wins_on_collision() {
        let store = PersistenceStore::in_memory();
        let mut custom = BTreeMap::new();
        let mut shadow = Persona::preset("sherlock", "Not Sherlock", "Impostor", PersonalityTraits::new(), "");
        shadow.creator_id = Some(1);
        custom.insert("sherlock".to_string(), shadow);
        store.save(CUSTOM_PERSONAS_KEY, &custom).unwrap();

        let catalog = CharacterCatalog::new(store);
        assert_eq!(catalog.get("sherlock").unwrap().name, "Not Sherlock");
        assert_eq!(catalog.get_all().get("sherlock").unwrap().name, "Not Sherlock");
    }

    #[test]
    fn test_delete_requires_creator() {
        let catalog = catalog();
        let id = catalog
            .create(1, "Bob", "A brave knight", PersonalityTraits::new(), None, false)
            .unwrap();

        assert!(!catalog.delete(2, &id));
        assert!(catalog.get(&id).is_some());

        assert!(catalog.delete(1, &id));
        assert!(catalog.get(&id).is_none());
    }

    #[test]
    fn test_delete_missing_and_preset() {
        let catalog = catalog();
        assert!(!catalog.delete(1, "custom_nobody_1"));
        assert!(!catalog.delete(1, "sherlock"));
        assert!(catalog.get("sherlock").is_some());
    }
}
