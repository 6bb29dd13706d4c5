use clap::Parser;

use super::*;
use std::path::{Path, PathBuf};

use crate::fetch::{effective_preferences, render_table, stored_preferences};
use crate::prefs::run_prefs;
use almanax_core::{AlmanaxEntry, AppConfig, EnrichmentMode, FilePreferences, Preferences};

fn entry(date: &str, bonus: &str, image: &str) -> AlmanaxEntry {
    AlmanaxEntry {
        description: String::new(),
        bonus: bonus.to_string(),
        bonus_id: "8".to_string(),
        date: date.to_string(),
        image: image.to_string(),
        loot: "Gobball Wool".to_string(),
        loot_id: 42,
        quantity: 10,
        reward_kamas: 500,
        reward_xp: 1000,
        subtype: "Resource".to_string(),
    }
}

fn temp_prefs_file(content: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("almanax-cli-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    let path = dir.join("preferences.yaml");
    std::fs::write(&path, content).expect("write preferences");
    path
}

fn config_with_prefs(path: &Path) -> AppConfig {
    AppConfig {
        log_level: "info".to_string(),
        primary_base_url: "http://127.0.0.1:1/dofus3/v1".to_string(),
        secondary_base_url: "http://127.0.0.1:1/dofus2".to_string(),
        request_timeout_secs: None,
        user_agent: "almanax-test".to_string(),
        lookup_concurrency: 7,
        enrichment: EnrichmentMode::Search,
        preferences_path: path.to_path_buf(),
    }
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["almanax"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_fetch_with_overrides() {
    let cli = Cli::try_parse_from([
        "almanax",
        "fetch",
        "--level",
        "60",
        "--lang",
        "en",
        "--enrichment",
        "daily-list",
        "--json",
    ])
    .expect("expected valid cli args");

    match cli.command {
        Some(Commands::Fetch(args)) => {
            assert_eq!(args.level, Some(60));
            assert_eq!(args.language.as_deref(), Some("en"));
            assert_eq!(args.enrichment, Some(EnrichmentMode::DailyList));
            assert!(args.json);
        }
        other => panic!("expected fetch command, got: {other:?}"),
    }
}

#[test]
fn fetch_rejects_unknown_enrichment() {
    let result = Cli::try_parse_from(["almanax", "fetch", "--enrichment", "scrape"]);
    assert!(result.is_err());
}

#[test]
fn fetch_rejects_negative_level() {
    let result = Cli::try_parse_from(["almanax", "fetch", "--level", "-3"]);
    assert!(result.is_err());
}

#[test]
fn parses_prefs_set() {
    let cli = Cli::try_parse_from(["almanax", "prefs", "set", "--level", "200"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Prefs {
            command: PrefsCommands::Set {
                level: Some(200),
                language: None
            }
        })
    ));
}

#[test]
fn parses_prefs_show() {
    let cli = Cli::try_parse_from(["almanax", "prefs", "show"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Prefs {
            command: PrefsCommands::Show
        })
    ));
}

#[test]
fn overrides_replace_only_given_fields() {
    let stored = Preferences {
        level: 150,
        language: "fr".to_string(),
    };
    let args = FetchArgs {
        level: Some(60),
        ..FetchArgs::default()
    };
    let prefs = effective_preferences(stored, &args);
    assert_eq!(prefs.level, 60);
    assert_eq!(prefs.language, "fr");
}

#[test]
fn render_table_lists_entries_in_order() {
    let table = render_table(&[
        entry("2024-05-01", "Pet's", "h.png"),
        entry("2024-05-02", "Harvest", ""),
    ]);
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("DATE"));
    assert!(lines[1].starts_with("2024-05-01"));
    assert!(lines[1].contains("10x Gobball Wool"));
    assert!(lines[1].ends_with("h.png"));
    assert!(lines[2].starts_with("2024-05-02"));
    assert!(lines[2].ends_with('\u{2014}'));
}

#[test]
fn render_table_empty_list() {
    assert_eq!(render_table(&[]), "no almanax entries available\n");
}

#[test]
fn prefs_set_keeps_untouched_fields() {
    let path = temp_prefs_file("level: 150\nlanguage: en\n");
    let command = PrefsCommands::Set {
        level: Some(60),
        language: None,
    };

    run_prefs(&config_with_prefs(&path), &command).expect("prefs set");

    let saved = FilePreferences::new(&path).load().expect("reload");
    assert_eq!(saved.level, 60);
    assert_eq!(saved.language, "en");
}

#[test]
fn prefs_set_refuses_to_overwrite_malformed_file() {
    let original = "level: abc\nlanguage: en\n";
    let path = temp_prefs_file(original);
    let command = PrefsCommands::Set {
        level: Some(60),
        language: None,
    };

    let result = run_prefs(&config_with_prefs(&path), &command);

    assert!(result.is_err());
    assert_eq!(std::fs::read_to_string(&path).expect("read back"), original);
}

#[test]
fn prefs_show_reports_malformed_file() {
    let path = temp_prefs_file("level: abc\n");
    assert!(run_prefs(&config_with_prefs(&path), &PrefsCommands::Show).is_err());
}

#[test]
fn fetch_falls_back_to_defaults_for_malformed_file() {
    let path = temp_prefs_file("level: abc\nlanguage: en\n");
    let prefs = stored_preferences(&FilePreferences::new(&path));
    assert_eq!(prefs, Preferences::default());
}
