use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// Bind port
    pub port: u16,
}

/// Forecasting model configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ModelConfig {
    /// Path to the serialized pretrained artifact
    pub path: PathBuf,
}

/// Assistant (chat-completion collaborator) configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AssistantConfig {
    /// Base URL of the OpenAI-compatible endpoint
    pub base_url: String,
    /// Completion model identifier
    pub model: String,
    /// API credential; overridden by OPENAI_API_KEY at startup
    pub api_key: String,
    /// Persona injected as the first system message of every conversation
    pub system_prompt: String,
}

/// Dashboard credential configuration (single-tenant)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AuthConfig {
    /// Accepted username
    pub username: String,
    /// Accepted password
    pub password: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level
    pub level: String,
    /// Structured (JSON) log format
    pub structured: bool,
    /// Optional log file directory
    pub log_dir: Option<PathBuf>,
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Server configuration
    pub server: ServerConfig,
    /// Forecasting model configuration
    pub model: ModelConfig,
    /// Assistant configuration
    pub assistant: AssistantConfig,
    /// Dashboard credentials
    pub auth: AuthConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Application name
    pub app_name: String,
    /// Environment
    pub environment: String,
}

impl AppConfig {
    /// Create the development configuration
    pub fn development() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".into(),
                port: 8080,
            },
            model: ModelConfig {
                path: PathBuf::from("./data/seasonal_trend_model.json"),
            },
            assistant: AssistantConfig {
                base_url: "https://api.openai.com".into(),
                model: "gpt-3.5-turbo".into(),
                api_key: "YOUR_API_KEY".into(),
                system_prompt: "You are a fashion sales assistant with access to \
                                predictive data and resource allocation forecasts."
                    .into(),
            },
            auth: AuthConfig {
                username: "admin".into(),
                password: "password".into(),
            },
            logging: LoggingConfig {
                level: "debug".into(),
                structured: false,
                log_dir: None,
            },
            app_name: "hemline".into(),
            environment: "development".into(),
        }
    }

    /// Create the production configuration
    pub fn production() -> Self {
        let mut config = Self::development();
        config.environment = "production".into();
        config.logging.level = "info".into();
        config.logging.structured = true;
        config
    }
}
