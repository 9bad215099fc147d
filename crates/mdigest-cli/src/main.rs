mod events;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "mdigest-cli")]
#[command(about = "Livestock market disruption event collector")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch every configured feed and update the official and news event files
    Events {
        /// Sources file to use instead of `MDIGEST_SOURCES_PATH`
        #[arg(long)]
        sources: Option<PathBuf>,

        /// Run the pipeline and print counts without writing any files
        #[arg(long)]
        dry_run: bool,
    },
    /// Load and validate the sources file without fetching anything
    CheckSources {
        /// Sources file to use instead of `MDIGEST_SOURCES_PATH`
        #[arg(long)]
        sources: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = mdigest_core::load_run_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Some(Commands::Events { sources, dry_run }) => {
            events::run_events(&config, sources.as_deref(), dry_run).await
        }
        Some(Commands::CheckSources { sources }) => {
            events::check_sources(&config, sources.as_deref())
        }
        None => events::run_events(&config, None, false).await,
    }
}

#[cfg(test)]
mod tests;
