pub mod app_config;
pub mod config;
pub mod entry;
pub mod preferences;

use thiserror::Error;

pub use app_config::{AppConfig, EnrichmentMode};
pub use config::{load_app_config, load_app_config_from_env};
pub use entry::AlmanaxEntry;
pub use preferences::{
    resolve_language, FilePreferences, PreferenceSource, Preferences, StaticPreferences,
    DEFAULT_LANGUAGE, DEFAULT_LEVEL, SOURCE_LANGUAGE,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("unknown enrichment mode \"{0}\" (expected \"search\" or \"daily-list\")")]
    UnknownEnrichmentMode(String),

    #[error("failed to read preferences file {path}: {source}")]
    PreferencesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse preferences file: {0}")]
    PreferencesFileParse(#[source] serde_yaml::Error),

    #[error("failed to serialize preferences: {0}")]
    PreferencesSerialize(#[source] serde_yaml::Error),

    #[error("failed to write preferences file {path}: {source}")]
    PreferencesFileWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
