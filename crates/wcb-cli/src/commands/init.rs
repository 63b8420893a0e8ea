//! Init command
//!
//! Create the wcb-privacy configuration and an empty snapshot.

use anyhow::{Context, Result};
use clap::Args;
use std::fs;
use std::path::PathBuf;

use wcb_core::config::Config;
use wcb_storage::{Snapshot, SnapshotStore};

/// Arguments for the init command
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Force overwrite existing configuration
    #[arg(long)]
    pub force: bool,

    /// Directory to initialize (default: current directory)
    #[arg(long)]
    pub path: Option<PathBuf>,
}

/// Execute the init command
pub fn execute(args: InitArgs) -> Result<()> {
    use colored::Colorize;

    let project_dir = args
        .path
        .clone()
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    let base_dir = project_dir.join(".wcb-privacy");
    let config_path = base_dir.join("config.toml");
    if config_path.exists() && !args.force {
        eprintln!(
            "{} wcb-privacy already initialized. Use --force to reinitialize.",
            "⚠".yellow()
        );
        return Ok(());
    }

    fs::create_dir_all(&base_dir).context("Failed to create .wcb-privacy directory")?;

    let mut config = Config::default();
    config.storage.snapshot = Some(PathBuf::from("snapshot.json"));
    config
        .save(&config_path)
        .context("Failed to write config.toml")?;
    println!("{} Generated {}", "✓".green(), config_path.display());

    let snapshot_path = base_dir.join("snapshot.json");
    if !snapshot_path.exists() {
        SnapshotStore::from_snapshot(Snapshot::default())?
            .save(&snapshot_path)
            .context("Failed to write snapshot.json")?;
        println!("{} Created empty {}", "✓".green(), snapshot_path.display());
    }

    println!("\n{}", "Next steps:".bold());
    println!("  1. Fill .wcb-privacy/snapshot.json with users and records");
    println!(
        "  2. Run {}",
        "wcb-privacy export --email <address>".cyan()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_files() {
        let temp = TempDir::new().unwrap();
        execute(InitArgs {
            force: false,
            path: Some(temp.path().to_path_buf()),
        })
        .unwrap();

        let config = Config::load(&temp.path().join(".wcb-privacy/config.toml")).unwrap();
        assert_eq!(config.export.max_pages, 1000);

        let snapshot = temp.path().join(".wcb-privacy/snapshot.json");
        assert_eq!(config.storage.snapshot, Some(snapshot.clone()));

        let store = SnapshotStore::open(&snapshot).unwrap();
        assert_eq!(store.record_count(), 0);
    }

    #[test]
    fn test_init_keeps_existing_without_force() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join(".wcb-privacy/config.toml");
        fs::create_dir_all(config_path.parent().unwrap()).unwrap();
        fs::write(&config_path, "[export]\nmax_pages = 3\n").unwrap();

        execute(InitArgs {
            force: false,
            path: Some(temp.path().to_path_buf()),
        })
        .unwrap();

        let config = Config::load(&config_path).unwrap();
        assert_eq!(config.export.max_pages, 3);
    }
}
