//! CLI commands module
//!
//! This module contains all CLI command implementations.

pub mod config;
pub mod erase;
pub mod export;
pub mod exporters;
pub mod init;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use wcb_core::config::Config;
use wcb_core::privacy::PrivacyRegistry;
use wcb_storage::SnapshotStore;

/// Default configuration file location
pub const DEFAULT_CONFIG_PATH: &str = ".wcb-privacy/config.toml";

/// wcb-privacy - Personal data export for WordCamp budget records
#[derive(Debug, Parser)]
#[command(name = "wcb-privacy")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Export personal data for an email address
    Export(export::ExportArgs),

    /// List registered exporters and erasers
    Exporters(exporters::ExportersArgs),

    /// Run registered erasers for an email address
    Erase(erase::EraseArgs),

    /// Initialize wcb-privacy in the current directory
    Init(init::InitArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(config::ConfigCommand),
}

/// Run the CLI application
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    setup_logging(cli.verbose);

    // Handle color output
    if cli.no_color {
        colored::control::set_override(false);
    }

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    // Dispatch to command handler
    match cli.command {
        Commands::Export(args) => export::execute(args, &load_config(&config_path)?),
        Commands::Exporters(args) => exporters::execute(args, &load_config(&config_path)?),
        Commands::Erase(args) => erase::execute(args, &load_config(&config_path)?),
        Commands::Init(args) => init::execute(args),
        Commands::Config(cmd) => config::execute(cmd, &config_path),
    }
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbosity {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: &Path) -> Result<Config> {
    Config::load_or_default(path).with_context(|| format!("Failed to load {}", path.display()))
}

/// Snapshot to open: command line, then config, then the platform data dir
pub fn snapshot_path(snapshot: Option<&Path>, config: &Config) -> PathBuf {
    snapshot
        .or(config.storage.snapshot.as_deref())
        .map(Path::to_path_buf)
        .unwrap_or_else(SnapshotStore::default_location)
}

/// Open the snapshot store and build the privacy registry on top of it
pub fn open_registry(snapshot: Option<&Path>, config: &Config) -> Result<PrivacyRegistry> {
    let path = snapshot_path(snapshot, config);
    tracing::debug!("Using snapshot {:?}", path);
    let store = Arc::new(
        SnapshotStore::open(&path)
            .with_context(|| format!("Failed to open snapshot {}", path.display()))?,
    );
    Ok(PrivacyRegistry::bootstrap(store.clone(), store))
}
