//! User-chosen fetch parameters: character level and language.
//!
//! The aggregation core only ever reads these through [`PreferenceSource`].
//! Persisting them is the caller's business; [`FilePreferences`] is the YAML
//! store the CLI uses.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ConfigError;

pub const DEFAULT_LEVEL: u32 = 150;
pub const DEFAULT_LANGUAGE: &str = "fr";

/// Process-wide fallback locale used whenever no language is given.
pub const SOURCE_LANGUAGE: &str = "fr";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            level: DEFAULT_LEVEL,
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

fn default_level() -> u32 {
    DEFAULT_LEVEL
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

/// Returns `language` trimmed, or [`SOURCE_LANGUAGE`] when it is blank.
#[must_use]
pub fn resolve_language(language: &str) -> &str {
    let trimmed = language.trim();
    if trimmed.is_empty() {
        SOURCE_LANGUAGE
    } else {
        trimmed
    }
}

/// Read-only access to the current preferences.
pub trait PreferenceSource {
    fn read(&self) -> Preferences;
}

/// A fixed pair of preferences, e.g. built from command-line flags.
#[derive(Debug, Clone, Default)]
pub struct StaticPreferences(pub Preferences);

impl PreferenceSource for StaticPreferences {
    fn read(&self) -> Preferences {
        self.0.clone()
    }
}

/// Preferences persisted as a small YAML document:
///
/// ```yaml
/// level: 150
/// language: fr
/// ```
#[derive(Debug, Clone)]
pub struct FilePreferences {
    path: PathBuf,
}

impl FilePreferences {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the stored preferences. A missing file is not an error and
    /// yields the defaults; keys absent from the file take their own default.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::PreferencesFileIo`] if the file exists but cannot
    /// be read, or [`ConfigError::PreferencesFileParse`] if it is not valid YAML
    /// for [`Preferences`].
    pub fn load(&self) -> Result<Preferences, ConfigError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Preferences::default());
            }
            Err(e) => {
                return Err(ConfigError::PreferencesFileIo {
                    path: self.path.display().to_string(),
                    source: e,
                });
            }
        };

        if content.trim().is_empty() {
            return Ok(Preferences::default());
        }

        serde_yaml::from_str(&content).map_err(ConfigError::PreferencesFileParse)
    }

    /// Writes `preferences` to the file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::PreferencesSerialize`] if `preferences` cannot be
    /// rendered as YAML, or [`ConfigError::PreferencesFileWrite`] on any I/O
    /// failure.
    pub fn save(&self, preferences: &Preferences) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::PreferencesFileWrite {
            path: self.path.display().to_string(),
            source,
        };

        let yaml = serde_yaml::to_string(preferences).map_err(ConfigError::PreferencesSerialize)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        std::fs::write(&self.path, yaml).map_err(write_err)
    }
}

impl PreferenceSource for FilePreferences {
    /// Falls back to the defaults when the file cannot be loaded.
    fn read(&self) -> Preferences {
        self.load().unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "preferences_test.rs"]
mod tests;
