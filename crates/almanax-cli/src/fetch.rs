//! `fetch` command: one aggregation run, rendered for the terminal.

use std::fmt::Write as _;

use almanax_client::Aggregator;
use almanax_core::{
    AlmanaxEntry, AppConfig, EnrichmentMode, FilePreferences, Preferences, StaticPreferences,
};
use clap::Args;

#[derive(Debug, Default, Args)]
pub struct FetchArgs {
    /// Character level (overrides the stored preference for this run)
    #[arg(long)]
    pub level: Option<u32>,
    /// Language code (overrides the stored preference for this run)
    #[arg(long = "lang")]
    pub language: Option<String>,
    /// Image enrichment strategy: search or daily-list
    #[arg(long)]
    pub enrichment: Option<EnrichmentMode>,
    /// Print the entries as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// Stored preferences with any command-line overrides applied.
pub(crate) fn effective_preferences(stored: Preferences, args: &FetchArgs) -> Preferences {
    Preferences {
        level: args.level.unwrap_or(stored.level),
        language: args.language.clone().unwrap_or(stored.language),
    }
}

/// The stored preferences, or the defaults when the file cannot be loaded.
pub(crate) fn stored_preferences(store: &FilePreferences) -> Preferences {
    store.load().unwrap_or_else(|e| {
        tracing::warn!(
            error = %e,
            path = %store.path().display(),
            "preferences file unusable, falling back to defaults"
        );
        Preferences::default()
    })
}

/// Runs one aggregation and prints the result.
///
/// A failed aggregation is logged and rendered as an empty list; only
/// configuration problems end the command with an error.
pub(crate) async fn run_fetch(config: &AppConfig, args: &FetchArgs) -> anyhow::Result<()> {
    let stored = stored_preferences(&FilePreferences::new(&config.preferences_path));
    let prefs = StaticPreferences(effective_preferences(stored, args));

    let mut aggregator = Aggregator::from_config(config)?;
    if let Some(mode) = args.enrichment {
        aggregator = aggregator.with_enrichment(mode);
    }

    let entries = match aggregator.aggregate_with(&prefs).await {
        Ok(entries) => entries,
        Err(e) => {
            tracing::error!(error = %e, "almanax aggregation failed");
            Vec::new()
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        print!("{}", render_table(&entries));
    }
    Ok(())
}

pub(crate) fn render_table(entries: &[AlmanaxEntry]) -> String {
    if entries.is_empty() {
        return "no almanax entries available\n".to_string();
    }

    let bonus_width = entries
        .iter()
        .map(|e| e.bonus.chars().count())
        .max()
        .unwrap_or(0)
        .max("BONUS".len());
    let tribute_width = entries
        .iter()
        .map(|e| tribute_label(e).chars().count())
        .max()
        .unwrap_or(0)
        .max("TRIBUTE".len());

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<10}  {:<bonus_width$}  {:<tribute_width$}  {:>10}  {:>10}  IMAGE",
        "DATE", "BONUS", "TRIBUTE", "KAMAS", "XP"
    );
    for entry in entries {
        let image = if entry.has_image() { entry.image.as_str() } else { "\u{2014}" };
        let _ = writeln!(
            out,
            "{:<10}  {:<bonus_width$}  {:<tribute_width$}  {:>10}  {:>10}  {}",
            entry.date,
            entry.bonus,
            tribute_label(entry),
            entry.reward_kamas,
            entry.reward_xp,
            image
        );
    }
    out
}

fn tribute_label(entry: &AlmanaxEntry) -> String {
    format!("{}x {}", entry.quantity, entry.loot)
}
