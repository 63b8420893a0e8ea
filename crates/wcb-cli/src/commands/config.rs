//! Config command
//!
//! Manage wcb-privacy configuration.

use anyhow::{Context, Result};
use clap::Subcommand;
use std::fs;
use std::path::Path;

use wcb_core::config::Config;

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Show as JSON
        #[arg(long)]
        json: bool,
    },

    /// Reset to default configuration
    Reset {
        /// Force reset without confirmation
        #[arg(long)]
        force: bool,
    },

    /// Validate configuration
    Validate,
}

/// Execute the config command
pub fn execute(cmd: ConfigCommand, config_path: &Path) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => show_config(config_path, json),
        ConfigCommand::Reset { force } => reset_config(config_path, force),
        ConfigCommand::Validate => validate_config(config_path),
    }
}

fn show_config(config_path: &Path, as_json: bool) -> Result<()> {
    use colored::Colorize;

    let config = if config_path.exists() {
        Config::load(config_path)?
    } else {
        eprintln!(
            "{} Configuration not found, showing defaults. Run '{}' to create.",
            "⚠".yellow(),
            "wcb-privacy init".cyan()
        );
        Config::default()
    };

    if as_json {
        println!("{}", serde_json::to_string_pretty(&config)?);
    } else {
        println!("{}", "Configuration:".bold().underline());
        println!("{}", config_path.display().to_string().dimmed());
        println!();
        println!("{}", config.to_toml()?);
    }

    Ok(())
}

fn reset_config(config_path: &Path, force: bool) -> Result<()> {
    use colored::Colorize;

    if !force {
        use dialoguer::Confirm;

        let confirmed = Confirm::new()
            .with_prompt("Reset configuration to defaults?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("Reset cancelled.");
            return Ok(());
        }
    }

    // Backup existing
    if config_path.exists() {
        let backup_path = format!(
            "{}.backup-{}",
            config_path.display(),
            chrono::Local::now().format("%Y%m%d-%H%M%S")
        );
        fs::copy(config_path, &backup_path)?;
        println!("{} Backed up to {}", "✓".green(), backup_path);
    }

    Config::default()
        .save(config_path)
        .context("Failed to write default configuration")?;

    println!("{} Configuration reset to defaults.", "✓".green());

    Ok(())
}

fn validate_config(config_path: &Path) -> Result<()> {
    use colored::Colorize;

    if !config_path.exists() {
        eprintln!(
            "{} Configuration not found at {}",
            "✗".red(),
            config_path.display()
        );
        return Ok(());
    }

    let content = fs::read_to_string(config_path)?;
    let value: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            eprintln!("{} Invalid TOML: {}", "✗".red(), e);
            return Ok(());
        }
    };
    println!("{} Configuration is valid TOML", "✓".green());

    let mut warnings = Vec::new();
    if value.get("export").is_none() {
        warnings.push("[export] section not found");
    }
    for warning in &warnings {
        println!("{} {}", "⚠".yellow(), warning);
    }

    match Config::load(config_path) {
        Ok(config) => {
            println!("{} Settings are valid", "✓".green());
            let snapshot = super::snapshot_path(None, &config);
            if !snapshot.exists() {
                println!(
                    "{} Snapshot {} does not exist yet",
                    "⚠".yellow(),
                    snapshot.display()
                );
            }
        }
        Err(e) => eprintln!("{} {}", "✗".red(), e),
    }

    Ok(())
}
