mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    DEFAULT_SYSTEM_PROMPT, LlmSettings, LoggingSettings, ServerSettings, Settings, SettingsError,
    SummarizationSettings,
};
