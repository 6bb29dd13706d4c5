use std::path::PathBuf;
use std::str::FromStr;

use crate::ConfigError;

/// How tribute images are looked up on the secondary provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnrichmentMode {
    /// One item search per almanax day.
    #[default]
    Search,
    /// A single fetch of the secondary provider's own almanax window,
    /// issued alongside the primary fetch.
    DailyList,
}

impl std::fmt::Display for EnrichmentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnrichmentMode::Search => write!(f, "search"),
            EnrichmentMode::DailyList => write!(f, "daily-list"),
        }
    }
}

impl FromStr for EnrichmentMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "search" => Ok(EnrichmentMode::Search),
            "daily-list" | "daily_list" => Ok(EnrichmentMode::DailyList),
            other => Err(ConfigError::UnknownEnrichmentMode(other.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub primary_base_url: String,
    pub secondary_base_url: String,
    /// `None` leaves the HTTP transport's own default in place.
    pub request_timeout_secs: Option<u64>,
    pub user_agent: String,
    pub lookup_concurrency: usize,
    pub enrichment: EnrichmentMode,
    pub preferences_path: PathBuf,
}
