use crate::config::BotConfig;
use std::fs;
use std::path::Path;

pub const DEFAULT_LOG_FILTER: &str = "info,persona_chat=debug";

pub struct SetupUtils;

impl SetupUtils {
    /// Installs the global subscriber once. `RUST_LOG` overrides the
    /// default filter; later calls are no-ops.
    pub fn init_logging() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
            )
            .try_init();
    }

    pub fn load_env() {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env file");
        }
    }

    pub fn ensure_data_dir(dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if !dir.exists() {
            fs::create_dir_all(dir)?;
            tracing::info!(path = %dir.display(), "created data directory");
        }
        Ok(())
    }

    /// Environment, config file, validation and data directory, in that order.
    pub fn run_setup(config_path: &Path) -> Result<BotConfig, Box<dyn std::error::Error>> {
        Self::load_env();

        let config = BotConfig::load(config_path)?;
        config.validate()?;
        if config.llm.api_key.trim().is_empty() {
            return Err("MISTRAL_API_KEY environment variable not set!".into());
        }

        Self::ensure_data_dir(&config.storage.data_dir)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::SetupUtils;
    use tempfile::tempdir;

    #[test]
    fn test_ensure_data_dir_creates_nested() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("bot").join("data");

        SetupUtils::ensure_data_dir(&nested).unwrap();
        assert!(nested.is_dir());
        SetupUtils::ensure_data_dir(&nested).unwrap();
    }

    #[test]
    fn test_init_logging_twice() {
        SetupUtils::init_logging();
        SetupUtils::init_logging();
    }
}
