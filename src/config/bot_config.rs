use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const API_KEY_ENV: &str = "MISTRAL_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new("data")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub api_url: String,
    #[serde(skip_serializing)]
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
    pub safe_prompt: bool,
}

impl LlmConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.api_url.trim().is_empty() {
            return Err("LLM api_url must not be empty".to_string());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!(
                "LLM temperature is {}, but must be between 0.0 and 2.0",
                self.temperature
            ));
        }
        if self.top_p <= 0.0 || self.top_p > 1.0 {
            return Err(format!(
                "LLM top_p is {}, but must be in (0.0, 1.0]",
                self.top_p
            ));
        }
        if self.max_tokens == 0 {
            return Err("LLM max_tokens must be greater than zero".to_string());
        }

        Ok(())
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.mistral.ai/v1/chat/completions".to_string(),
            api_key: String::new(),
            model: "mistral-medium".to_string(),
            temperature: 0.7,
            max_tokens: 1000,
            top_p: 0.9,
            safe_prompt: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    pub storage: StorageConfig,
    pub llm: LlmConfig,
}

impl BotConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, String> {
        let config: BotConfig =
            toml::from_str(raw).map_err(|e| format!("Failed to parse config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads the TOML file at `path` (defaults when it does not exist) and
    /// lets the environment supply the API key.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(path)
                .map_err(|e| format!("Failed to read config {}: {}", path.display(), e))?;
            Self::from_toml_str(&raw)?
        } else {
            tracing::info!(path = %path.display(), "config file not found, using defaults");
            Self::default()
        };

        config.apply_env();
        Ok(config)
    }

    pub fn apply_env(&mut self) {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                self.llm.api_key = key;
            }
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        self.llm.validate()
    }
}
