pub mod catalog;
pub mod model;
pub mod presets;

pub use catalog::{CharacterCatalog, PersonaMap};
pub use model::{
    clamp_trait, Persona, PersonalityTraits, Trait, TraitValue, CUSTOM_PREFIX, TRAIT_MAX, TRAIT_MIN,
};
pub use presets::PRESET_PERSONAS;
