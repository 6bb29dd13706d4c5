use crate::app_config::{AppConfig, EnrichmentMode};
use crate::ConfigError;

pub const DEFAULT_PRIMARY_BASE_URL: &str = "https://api.dofusdu.de/dofus3/v1";
pub const DEFAULT_SECONDARY_BASE_URL: &str = "https://api.dofusdu.de/dofus2";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_base_url = |var: &str, default: &str| -> Result<String, ConfigError> {
        let raw = or_default(var, default);
        let trimmed = raw.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            Ok(trimmed.trim_end_matches('/').to_string())
        } else {
            Err(invalid(var, format!("\"{raw}\" is not an http(s) URL")))
        }
    };

    let log_level = or_default("ALMANAX_LOG_LEVEL", "info");
    let primary_base_url = parse_base_url("ALMANAX_PRIMARY_BASE_URL", DEFAULT_PRIMARY_BASE_URL)?;
    let secondary_base_url =
        parse_base_url("ALMANAX_SECONDARY_BASE_URL", DEFAULT_SECONDARY_BASE_URL)?;

    let request_timeout_secs = match lookup("ALMANAX_REQUEST_TIMEOUT_SECS") {
        Ok(raw) => Some(
            raw.parse::<u64>()
                .map_err(|e| invalid("ALMANAX_REQUEST_TIMEOUT_SECS", e.to_string()))?,
        ),
        Err(_) => None,
    };

    let user_agent = or_default("ALMANAX_USER_AGENT", "almanax/0.1 (daily-bonus)");

    let lookup_concurrency = or_default("ALMANAX_LOOKUP_CONCURRENCY", "7")
        .parse::<usize>()
        .map_err(|e| invalid("ALMANAX_LOOKUP_CONCURRENCY", e.to_string()))?;
    if lookup_concurrency == 0 {
        return Err(invalid(
            "ALMANAX_LOOKUP_CONCURRENCY",
            "must be at least 1".to_string(),
        ));
    }

    let enrichment = or_default("ALMANAX_ENRICHMENT", "search")
        .parse::<EnrichmentMode>()
        .map_err(|e| invalid("ALMANAX_ENRICHMENT", e.to_string()))?;

    let preferences_path = PathBuf::from(or_default(
        "ALMANAX_PREFERENCES_PATH",
        "./config/preferences.yaml",
    ));

    Ok(AppConfig {
        log_level,
        primary_base_url,
        secondary_base_url,
        request_timeout_secs,
        user_agent,
        lookup_concurrency,
        enrichment,
        preferences_path,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
