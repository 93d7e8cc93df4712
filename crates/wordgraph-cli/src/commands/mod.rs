//! CLI command definitions and handlers.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod run;
pub mod settings;
pub mod status;
pub mod sync;

use settings::SettingsArgs;

/// Wordgraph - keeps a Neo4j word graph in step with a Redis word dataset
#[derive(Parser)]
#[command(name = "wordgraph")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Also write logs to this file
    #[arg(long, global = true, env = "WORDGRAPH_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    #[command(flatten)]
    pub settings: SettingsArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sync now, then keep syncing on an interval until stopped
    Run,

    /// Run a single sync pass and report the result
    Sync,

    /// Show word and relationship counts in the graph store
    Status,
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let config = self.settings.resolve()?;

        match self.command {
            Commands::Run => run::execute(config).await,
            Commands::Sync => sync::execute(config).await,
            Commands::Status => status::execute(config).await,
        }
    }
}
