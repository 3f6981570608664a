use crate::config::config::AppConfig;
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::PathBuf;

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the default path
    ///
    /// Search order:
    /// 1. ./config.toml
    /// 2. HEMLINE_* environment variables
    ///
    /// The external API credential is read separately from OPENAI_API_KEY;
    /// when absent, the placeholder from the file/defaults stays in place
    /// and the first chat-completion call will fail.
    pub fn load() -> Result<AppConfig, figment::Error> {
        let mut config: AppConfig = Figment::from(
            figment::providers::Serialized::defaults(AppConfig::development()),
        )
        .merge(Toml::file("config.toml"))
        .merge(Env::prefixed("HEMLINE_").split("_"))
        .extract()?;

        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            config.assistant.api_key = key;
        }

        Ok(config)
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: PathBuf) -> Result<AppConfig, figment::Error> {
        Figment::from(figment::providers::Serialized::defaults(
            AppConfig::development(),
        ))
        .merge(Toml::file(path))
        .merge(Env::prefixed("HEMLINE_").split("_"))
        .extract()
    }

    /// Validate loaded configuration
    pub fn validate(config: &AppConfig) -> Result<(), ConfigValidationError> {
        if config.server.port == 0 {
            return Err(ConfigValidationError::InvalidPort);
        }

        if config.model.path.as_os_str().is_empty() {
            return Err(ConfigValidationError::MissingModelPath);
        }

        if config.assistant.base_url.is_empty() {
            return Err(ConfigValidationError::MissingAssistantUrl);
        }

        Ok(())
    }
}

/// Configuration validation error
#[derive(thiserror::Error, Debug)]
pub enum ConfigValidationError {
    #[error("server port must be greater than 0")]
    InvalidPort,

    #[error("model artifact path is not configured")]
    MissingModelPath,

    #[error("assistant base URL is not configured")]
    MissingAssistantUrl,
}

/// Default configuration file path
pub fn default_config_path() -> PathBuf {
    PathBuf::from("config.toml")
}

/// Check whether the configuration file exists
pub fn config_exists() -> bool {
    default_config_path().exists()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_development_defaults_validate() {
        let config = AppConfig::development();
        assert!(ConfigLoader::validate(&config).is_ok());
        assert_eq!(config.auth.username, "admin");
        assert_eq!(config.assistant.model, "gpt-3.5-turbo");
    }

    #[test]
    fn test_invalid_port_rejected() {
        let mut config = AppConfig::development();
        config.server.port = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigValidationError::InvalidPort)
        ));
    }
}
