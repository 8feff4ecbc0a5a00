use crate::api::types::{PersonaId, UserId};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

pub type TraitValue = u8;

pub const TRAIT_MIN: TraitValue = 1;
pub const TRAIT_MAX: TraitValue = 10;
pub const TRAIT_NEUTRAL: TraitValue = 5;
pub const CUSTOM_PREFIX: &str = "custom_";

pub fn clamp_trait(value: i64) -> TraitValue {
    value.clamp(TRAIT_MIN as i64, TRAIT_MAX as i64) as TraitValue
}

fn deserialize_trait<'de, D>(deserializer: D) -> Result<TraitValue, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    Ok(clamp_trait(raw.round() as i64))
}

fn neutral_trait() -> TraitValue {
    TRAIT_NEUTRAL
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trait {
    Friendliness,
    Humor,
    Intelligence,
    Empathy,
    Energy,
}

impl Trait {
    /// Canonical order, also the order of the creation dialogue's input.
    pub const ALL: [Trait; 5] = [
        Trait::Friendliness,
        Trait::Humor,
        Trait::Intelligence,
        Trait::Empathy,
        Trait::Energy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Trait::Friendliness => "friendliness",
            Trait::Humor => "humor",
            Trait::Intelligence => "intelligence",
            Trait::Empathy => "empathy",
            Trait::Energy => "energy",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Trait::Friendliness => "Friendliness",
            Trait::Humor => "Humor",
            Trait::Intelligence => "Intelligence",
            Trait::Empathy => "Empathy",
            Trait::Energy => "Energy",
        }
    }
}

impl fmt::Display for Trait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalityTraits {
    #[serde(default = "neutral_trait", deserialize_with = "deserialize_trait")]
    pub friendliness: TraitValue,
    #[serde(default = "neutral_trait", deserialize_with = "deserialize_trait")]
    pub humor: TraitValue,
    #[serde(default = "neutral_trait", deserialize_with = "deserialize_trait")]
    pub intelligence: TraitValue,
    #[serde(default = "neutral_trait", deserialize_with = "deserialize_trait")]
    pub empathy: TraitValue,
    #[serde(default = "neutral_trait", deserialize_with = "deserialize_trait")]
    pub energy: TraitValue,
}

impl PersonalityTraits {
    pub fn new() -> Self {
        Self {
            friendliness: TRAIT_NEUTRAL,
            humor: TRAIT_NEUTRAL,
            intelligence: TRAIT_NEUTRAL,
            empathy: TRAIT_NEUTRAL,
            energy: TRAIT_NEUTRAL,
        }
    }

    /// Values in [`Trait::ALL`] order, clamped into range.
    pub fn from_values(values: [i64; 5]) -> Self {
        let mut traits = Self::new();
        for (name, value) in Trait::ALL.iter().zip(values) {
            traits.set(*name, value);
        }
        traits
    }

    pub fn get(&self, name: Trait) -> TraitValue {
        match name {
            Trait::Friendliness => self.friendliness,
            Trait::Humor => self.humor,
            Trait::Intelligence => self.intelligence,
            Trait::Empathy => self.empathy,
            Trait::Energy => self.energy,
        }
    }

    pub fn set(&mut self, name: Trait, value: i64) {
        let value = clamp_trait(value);
        match name {
            Trait::Friendliness => self.friendliness = value,
            Trait::Humor => self.humor = value,
            Trait::Intelligence => self.intelligence = value,
            Trait::Empathy => self.empathy = value,
            Trait::Energy => self.energy = value,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Trait, TraitValue)> + '_ {
        Trait::ALL.iter().map(move |name| (*name, self.get(*name)))
    }

    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in self.iter() {
            if !(TRAIT_MIN..=TRAIT_MAX).contains(&value) {
                return Err(format!(
                    "Personality trait '{}' has value {}, but must be between {} and {}",
                    name, value, TRAIT_MIN, TRAIT_MAX
                ));
            }
        }

        Ok(())
    }
}

impl Default for PersonalityTraits {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Persona {
    #[serde(default)]
    pub id: PersonaId,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traits: Option<PersonalityTraits>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    #[serde(rename = "nsfw", default)]
    pub is_mature: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator_id: Option<UserId>,
}

impl Persona {
    pub fn preset(
        id: &str,
        name: &str,
        description: &str,
        traits: PersonalityTraits,
        system_prompt: &str,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            traits: Some(traits),
            system_prompt: Some(system_prompt.to_string()),
            is_mature: false,
            creator_id: None,
        }
    }

    /// Custom ids are unique per creator only: `custom_{slug}_{creator}`.
    pub fn custom_id(name: &str, creator_id: UserId) -> PersonaId {
        format!(
            "{}{}_{}",
            CUSTOM_PREFIX,
            name.trim().to_lowercase().replace(' ', "_"),
            creator_id
        )
    }

    pub fn default_system_prompt(name: &str, description: &str) -> String {
        format!(
            "You are {}. {}\n\nRespond as this character would, maintaining their personality and speech patterns.",
            name, description
        )
    }

    pub fn is_custom(&self) -> bool {
        self.id.starts_with(CUSTOM_PREFIX)
    }

    pub fn is_created_by(&self, user_id: UserId) -> bool {
        self.creator_id == Some(user_id)
    }

    pub fn base_prompt(&self) -> String {
        match self.system_prompt.as_deref() {
            Some(prompt) if !prompt.trim().is_empty() => prompt.to_string(),
            _ => Self::default_system_prompt(&self.name, &self.description),
        }
    }
}
