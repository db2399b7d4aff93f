use config::{Config, File};
use serde::{Deserialize, Serialize};

use super::Environment;

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are an intelligent assistant that helps users with a variety of \
queries, from general questions to legal and tax document replies. \
If the input is a general question, answer clearly and completely. \
If the input is an official or legal document (e.g. a tax notice), \
produce a professional reply letter the user can submit. \
If the user asks for a summary, give a concise summary. \
Respond in plain language, with clear structure, no unnecessary AI disclaimers.";

const ENV_PREFIX: &str = "APP";
const ENV_SEPARATOR: &str = "__";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub llm: LlmSettings,
    pub summarization: SummarizationSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub max_body_mb: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            max_body_mb: 25,
        }
    }
}

impl ServerSettings {
    pub fn max_body_bytes(&self) -> usize {
        self.max_body_mb * 1024 * 1024
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    pub base_url: String,
    pub api_key: String,
    pub chat_model: String,
    pub temperature: f32,
    pub max_retries: u32,
    pub timeout_seconds: u64,
    pub system_prompt: String,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: String::new(),
            chat_model: "gpt-4o".to_string(),
            temperature: 0.0,
            max_retries: 2,
            timeout_seconds: 120,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizationSettings {
    pub token_budget: usize,
    pub max_recursion_depth: usize,
}

impl Default for SummarizationSettings {
    fn default() -> Self {
        Self {
            token_budget: 6000,
            max_recursion_depth: 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub json_format: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info,replydesk=debug,tower_http=debug".to_string(),
            json_format: false,
        }
    }
}

impl Settings {
    /// Layers, lowest precedence first: built-in defaults,
    /// `appsettings.<environment>.*`, `APP__SECTION__KEY` variables, and
    /// finally `OPENAI_API_KEY` for the model credentials.
    pub fn load(environment: Environment) -> Result<Self, SettingsError> {
        let configuration = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.as_str())).required(false),
            )
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .set_override_option("llm.api_key", std::env::var("OPENAI_API_KEY").ok())?
            .build()?;

        let settings: Settings = configuration.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.summarization.token_budget == 0 {
            return Err(SettingsError::Invalid(
                "summarization.token_budget must be greater than zero".to_string(),
            ));
        }
        if self.server.max_body_mb == 0 {
            return Err(SettingsError::Invalid(
                "server.max_body_mb must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("configuration: {0}")]
    Config(#[from] config::ConfigError),
    #[error("invalid settings: {0}")]
    Invalid(String),
}
