mod fetch;
mod prefs;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::fetch::FetchArgs;
use crate::prefs::PrefsCommands;

#[derive(Debug, Parser)]
#[command(name = "almanax")]
#[command(about = "Upcoming almanax bonuses and their tributes")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch and print the upcoming almanax days
    Fetch(FetchArgs),
    /// Show or change the stored level/language preferences
    Prefs {
        #[command(subcommand)]
        command: PrefsCommands,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = almanax_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Fetch(args)) => fetch::run_fetch(&config, &args).await,
        Some(Commands::Prefs { command }) => prefs::run_prefs(&config, &command),
        None => fetch::run_fetch(&config, &FetchArgs::default()).await,
    }
}

#[cfg(test)]
mod tests;
