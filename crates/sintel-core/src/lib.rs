pub mod app_config;
pub mod config;
pub mod triggers;

use thiserror::Error;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use triggers::{load_triggers, TriggerCatalog, TriggerQuery};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read triggers file {path}: {source}")]
    TriggersFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse triggers file: {0}")]
    TriggersFileParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),
}
