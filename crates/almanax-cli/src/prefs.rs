//! `prefs` sub-commands. The CLI owns the preferences file; the aggregation
//! crates only read it.

use almanax_core::{AppConfig, FilePreferences};
use clap::Subcommand;

#[derive(Debug, Subcommand)]
pub enum PrefsCommands {
    /// Print the resolved preferences
    Show,
    /// Update the stored preferences
    Set {
        /// Character level used to pick tribute quantities
        #[arg(long)]
        level: Option<u32>,
        /// Language code (fr, en, es, de, pt)
        #[arg(long = "lang")]
        language: Option<String>,
    },
}

pub(crate) fn run_prefs(config: &AppConfig, command: &PrefsCommands) -> anyhow::Result<()> {
    let store = FilePreferences::new(&config.preferences_path);

    match command {
        PrefsCommands::Show => {
            let prefs = store.load()?;
            println!("level:    {}", prefs.level);
            println!("language: {}", prefs.language);
            println!("file:     {}", store.path().display());
        }
        PrefsCommands::Set { level, language } => {
            if level.is_none() && language.is_none() {
                anyhow::bail!("nothing to set; pass --level and/or --lang");
            }
            // A file that fails to load is left untouched rather than
            // overwritten with defaults.
            let mut prefs = store.load()?;
            if let Some(level) = level {
                prefs.level = *level;
            }
            if let Some(language) = language {
                prefs.language = language.trim().to_string();
            }
            store.save(&prefs)?;
            tracing::info!(
                level = prefs.level,
                language = %prefs.language,
                path = %store.path().display(),
                "preferences saved"
            );
        }
    }

    Ok(())
}
