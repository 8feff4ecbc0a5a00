use crate::modules::persona::{PersonalityTraits, Trait, TRAIT_MAX, TRAIT_MIN};
use thiserror::Error;

pub const NAME_PROMPT: &str = "Let's create a custom character! 🎭\n\n\
First, what's the name of your character?\n\
Send me the name or use /cancel to stop the creation process.";

pub const TRAITS_PROMPT: &str = "Excellent description! Now, let's set some personality traits for your character.\n\n\
Rate each trait on a scale from 1-10, separated by commas:\n\
friendliness, humor, intelligence, empathy, energy\n\n\
For example: 7, 5, 9, 6, 8";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreationStage {
    AwaitingName,
    AwaitingDescription,
    AwaitingTraits,
    Committed,
    Cancelled,
}

impl CreationStage {
    pub fn is_terminal(&self) -> bool {
        matches!(self, CreationStage::Committed | CreationStage::Cancelled)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CreationStage::AwaitingName => "awaiting_name",
            CreationStage::AwaitingDescription => "awaiting_description",
            CreationStage::AwaitingTraits => "awaiting_traits",
            CreationStage::Committed => "committed",
            CreationStage::Cancelled => "cancelled",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DraftInputError {
    #[error("Please send a name for your character, or use /cancel to stop.")]
    EmptyName,

    #[error("Please send a short description of your character, or use /cancel to stop.")]
    EmptyDescription,

    #[error("Please provide numbers only, separated by commas. Try again:")]
    NotInteger(String),

    #[error("Please provide exactly 5 numbers separated by commas. Try again:")]
    WrongCount(usize),

    #[error("All values must be between 1 and 10. Try again:")]
    OutOfRange(i64),

    #[error("This character creation has already finished. Use /create to start again.")]
    Finished,
}

/// Parses `"7, 5, 9, 6, 8"` into traits in friendliness, humor,
/// intelligence, empathy, energy order.
pub fn parse_traits(input: &str) -> Result<PersonalityTraits, DraftInputError> {
    let mut values = Vec::with_capacity(Trait::ALL.len());
    for part in input.split(',') {
        let part = part.trim();
        let value = part
            .parse::<i64>()
            .map_err(|_| DraftInputError::NotInteger(part.to_string()))?;
        values.push(value);
    }

    let values: [i64; 5] = values
        .as_slice()
        .try_into()
        .map_err(|_| DraftInputError::WrongCount(values.len()))?;

    if let Some(bad) = values
        .iter()
        .find(|value| !(TRAIT_MIN as i64..=TRAIT_MAX as i64).contains(*value))
    {
        return Err(DraftInputError::OutOfRange(*bad));
    }

    Ok(PersonalityTraits::from_values(values))
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPersona {
    pub name: String,
    pub description: String,
    pub traits: PersonalityTraits,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreationDraft {
    pub stage: CreationStage,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    Advanced { draft: CreationDraft, prompt: String },
    Rejected { draft: CreationDraft, error: DraftInputError },
    Complete(NewPersona),
}

impl CreationDraft {
    pub fn new() -> Self {
        Self {
            stage: CreationStage::AwaitingName,
            name: String::new(),
            description: String::new(),
        }
    }

    pub fn apply(mut self, input: &str) -> Transition {
        let input = input.trim();

        match self.stage {
            CreationStage::AwaitingName => {
                if input.is_empty() {
                    return Transition::Rejected { draft: self, error: DraftInputError::EmptyName };
                }
                self.name = input.to_string();
                self.stage = CreationStage::AwaitingDescription;
                let prompt = format!(
                    "Great! Your character will be named {}.\n\n\
                     Now, write a brief description of your character. Include their personality, background, and any important traits:",
                    self.name
                );
                Transition::Advanced { draft: self, prompt }
            }
            CreationStage::AwaitingDescription => {
                if input.is_empty() {
                    return Transition::Rejected { draft: self, error: DraftInputError::EmptyDescription };
                }
                self.description = input.to_string();
                self.stage = CreationStage::AwaitingTraits;
                Transition::Advanced { draft: self, prompt: TRAITS_PROMPT.to_string() }
            }
            CreationStage::AwaitingTraits => match parse_traits(input) {
                Ok(traits) => Transition::Complete(NewPersona {
                    name: self.name,
                    description: self.description,
                    traits,
                }),
                Err(error) => Transition::Rejected { draft: self, error },
            },
            CreationStage::Committed | CreationStage::Cancelled => Transition::Rejected {
                draft: self,
                error: DraftInputError::Finished,
            },
        }
    }
}

impl Default for CreationDraft {
    fn default() -> Self {
        Self::new()
    }
}
