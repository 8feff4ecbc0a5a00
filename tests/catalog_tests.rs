use persona_chat::modules::persona::{CharacterCatalog, PersonalityTraits, PRESET_PERSONAS};
use persona_chat::modules::storage::{PersistenceStore, CUSTOM_PERSONAS_KEY};
use persona_chat::Persona;
use std::fs;
use tempfile::tempdir;

fn traits() -> PersonalityTraits {
    PersonalityTraits::from_values([7, 5, 9, 6, 8])
}

#[test]
fn test_presets_present() {
    let catalog = CharacterCatalog::new(PersistenceStore::in_memory());
    let all = catalog.get_all();

    assert_eq!(all.len(), PRESET_PERSONAS.len());
    for id in ["sherlock", "tyrion", "naruto", "totoro", "wednesday"] {
        let persona = all.get(id).unwrap();
        assert!(!persona.is_custom());
        assert!(persona.creator_id.is_none());
    }
}

#[test]
fn test_create_derives_id_per_creator() {
    let catalog = CharacterCatalog::new(PersistenceStore::in_memory());
    let first = catalog.create(1, "Sir Bob", "A brave knight", traits(), None, false).unwrap();
    let second = catalog.create(2, "Sir Bob", "Another knight", traits(), None, false).unwrap();

    assert_eq!(first, "custom_sir_bob_1");
    assert_eq!(second, "custom_sir_bob_2");
    assert_eq!(catalog.custom().len(), 2);
}

#[test]
fn test_delete_requires_creator() {
    let catalog = CharacterCatalog::new(PersistenceStore::in_memory());
    let id = catalog.create(1, "Bob", "A brave knight", traits(), None, false).unwrap();

    assert!(!catalog.delete(2, &id));
    assert!(catalog.get(&id).is_some());

    assert!(!catalog.delete(1, "sherlock"));
    assert!(catalog.get("sherlock").is_some());

    assert!(!catalog.delete(1, "custom_nobody_1"));

    assert!(catalog.delete(1, &id));
    assert!(catalog.get(&id).is_none());
}

#[test]
fn test_custom_wins_on_collision() {
    let store = PersistenceStore::in_memory();
    let mut shadow = PRESET_PERSONAS[0].clone();
    shadow.name = "Shadow Holmes".to_string();
    let mut custom = std::collections::BTreeMap::new();
    custom.insert(shadow.id.clone(), shadow.clone());
    store.save(CUSTOM_PERSONAS_KEY, &custom).unwrap();

    let catalog = CharacterCatalog::new(store);
    assert_eq!(catalog.get(&shadow.id).unwrap().name, "Shadow Holmes");
    assert_eq!(catalog.get_all().get(&shadow.id).unwrap().name, "Shadow Holmes");
}

#[test]
fn test_personas_survive_restart() {
    let dir = tempdir().unwrap();
    let id = {
        let catalog = CharacterCatalog::new(PersistenceStore::json_files(dir.path()));
        catalog.create(3, "Luna", "A quiet witch", traits(), None, true).unwrap()
    };

    let reopened = CharacterCatalog::new(PersistenceStore::json_files(dir.path()));
    let persona: Persona = reopened.get(&id).unwrap();
    assert_eq!(persona.name, "Luna");
    assert!(persona.is_mature);
    assert_eq!(persona.creator_id, Some(3));
    assert_eq!(persona.traits.unwrap().energy, 8);

    let raw = fs::read_to_string(dir.path().join("custom_characters.json")).unwrap();
    assert!(raw.contains("\"nsfw\": true") || raw.contains("\"nsfw\":true"));
}

#[test]
fn test_corrupt_document_falls_back_to_presets() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("custom_characters.json"), "{ not json").unwrap();

    let catalog = CharacterCatalog::new(PersistenceStore::json_files(dir.path()));
    assert!(catalog.custom().is_empty());
    assert_eq!(catalog.get_all().len(), PRESET_PERSONAS.len());
}
