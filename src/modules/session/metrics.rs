use crate::modules::persona::{PersonalityTraits, Trait};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

pub const MOOD_MIN: f32 = 1.0;
pub const MOOD_MAX: f32 = 10.0;
pub const MOOD_NEUTRAL: f32 = 5.0;

pub fn clamp_mood(mood: f32) -> f32 {
    if mood.is_nan() {
        return MOOD_NEUTRAL;
    }
    mood.clamp(MOOD_MIN, MOOD_MAX)
}

fn deserialize_mood<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(clamp_mood(f32::deserialize(deserializer)?))
}

fn neutral_mood() -> f32 {
    MOOD_NEUTRAL
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoodBand {
    Ecstatic,
    VeryHappy,
    Happy,
    Content,
    Neutral,
    SlightlyAnnoyed,
    Frustrated,
    Upset,
    Angry,
}

impl MoodBand {
    // Neutral is an exact match on 5, so 5.3 reads as slightly annoyed.
    pub fn from_mood(mood: f32) -> Self {
        if mood >= 9.0 {
            MoodBand::Ecstatic
        } else if mood >= 8.0 {
            MoodBand::VeryHappy
        } else if mood >= 7.0 {
            MoodBand::Happy
        } else if mood >= 6.0 {
            MoodBand::Content
        } else if mood == 5.0 {
            MoodBand::Neutral
        } else if mood >= 4.0 {
            MoodBand::SlightlyAnnoyed
        } else if mood >= 3.0 {
            MoodBand::Frustrated
        } else if mood >= 2.0 {
            MoodBand::Upset
        } else {
            MoodBand::Angry
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MoodBand::Ecstatic => "Ecstatic",
            MoodBand::VeryHappy => "Very happy",
            MoodBand::Happy => "Happy",
            MoodBand::Content => "Content",
            MoodBand::Neutral => "Neutral",
            MoodBand::SlightlyAnnoyed => "Slightly annoyed",
            MoodBand::Frustrated => "Frustrated",
            MoodBand::Upset => "Upset",
            MoodBand::Angry => "Angry",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            MoodBand::Ecstatic => "😄",
            MoodBand::VeryHappy => "😊",
            MoodBand::Happy => "🙂",
            MoodBand::Content => "😌",
            MoodBand::Neutral => "😐",
            MoodBand::SlightlyAnnoyed => "😕",
            MoodBand::Frustrated => "😒",
            MoodBand::Upset => "😠",
            MoodBand::Angry => "😡",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterMetrics {
    #[serde(default = "neutral_mood", deserialize_with = "deserialize_mood")]
    pub mood: f32,
    #[serde(default)]
    pub conversation_count: u32,
    #[serde(default)]
    pub personality_stats: PersonalityTraits,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_interaction: Option<DateTime<Utc>>,
}

impl CharacterMetrics {
    pub fn new() -> Self {
        Self {
            mood: MOOD_NEUTRAL,
            conversation_count: 0,
            personality_stats: PersonalityTraits::new(),
            last_interaction: None,
        }
    }

    pub fn mood_band(&self) -> MoodBand {
        MoodBand::from_mood(self.mood)
    }

    /// Mood is added then clamped, the count is replaced, named stats are
    /// clamped and set. Anything the delta leaves out is untouched.
    pub fn apply(&mut self, delta: &MetricsDelta) {
        if let Some(mood_delta) = delta.mood {
            self.mood = clamp_mood(self.mood + mood_delta);
        }

        if let Some(count) = delta.conversation_count {
            self.conversation_count = count;
        }

        for (name, value) in &delta.personality_stats {
            self.personality_stats.set(*name, *value);
        }

        self.last_interaction = Some(Utc::now());
    }
}

impl Default for CharacterMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricsDelta {
    pub mood: Option<f32>,
    pub conversation_count: Option<u32>,
    pub personality_stats: Vec<(Trait, i64)>,
}

impl MetricsDelta {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mood(mut self, delta: f32) -> Self {
        self.mood = Some(delta);
        self
    }

    pub fn with_conversation_count(mut self, count: u32) -> Self {
        self.conversation_count = Some(count);
        self
    }

    pub fn with_stat(mut self, name: Trait, value: i64) -> Self {
        self.personality_stats.push((name, value));
        self
    }
}
