use crate::modules::persona::{CharacterCatalog, Persona, PersonaMap};
use serde_json::json;

/// Read-only face of the catalog for the web listing. Nothing here writes.
#[derive(Clone)]
pub struct CatalogView {
    catalog: CharacterCatalog,
}

impl CatalogView {
    pub fn new(catalog: CharacterCatalog) -> Self {
        Self { catalog }
    }

    pub fn list_all(&self) -> PersonaMap {
        self.catalog.get_all()
    }

    pub fn get(&self, id: &str) -> Option<Persona> {
        self.catalog.get(id)
    }

    pub fn presets(&self) -> PersonaMap {
        self.list_all()
            .into_iter()
            .filter(|(_, persona)| !persona.is_custom())
            .collect()
    }

    pub fn customs(&self) -> PersonaMap {
        self.list_all()
            .into_iter()
            .filter(|(_, persona)| persona.is_custom())
            .collect()
    }

    pub fn catalog_json(&self) -> String {
        json!({
            "preset_characters": self.presets(),
            "custom_characters": self.customs(),
        })
        .to_string()
    }

    pub fn persona_json(&self, id: &str) -> String {
        match self.get(id) {
            Some(persona) => json!(persona).to_string(),
            None => json!({ "error": "Character not found" }).to_string(),
        }
    }
}
