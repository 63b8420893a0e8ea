//! Exporters command
//!
//! List the exporters and erasers registered at startup.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use wcb_core::config::Config;
use wcb_core::privacy::PrivacyRegistry;

use super::open_registry;

/// Arguments for the exporters command
#[derive(Debug, Args)]
pub struct ExportersArgs {
    /// Snapshot file (overrides storage.snapshot)
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct Listing<'a> {
    exporters: Vec<ListingEntry<'a>>,
    erasers: Vec<ListingEntry<'a>>,
}

#[derive(Debug, Serialize)]
struct ListingEntry<'a> {
    key: &'a str,
    friendly_name: &'a str,
}

fn listing(registry: &PrivacyRegistry) -> Listing<'_> {
    Listing {
        exporters: registry
            .exporters()
            .iter()
            .map(|(key, e)| ListingEntry {
                key,
                friendly_name: &e.friendly_name,
            })
            .collect(),
        erasers: registry
            .erasers()
            .iter()
            .map(|(key, e)| ListingEntry {
                key,
                friendly_name: &e.friendly_name,
            })
            .collect(),
    }
}

/// Execute the exporters command
pub fn execute(args: ExportersArgs, config: &Config) -> Result<()> {
    use colored::Colorize;

    let registry = open_registry(args.snapshot.as_deref(), config)?;
    let listing = listing(&registry);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    println!("{}", "Exporters:".bold().underline());
    for entry in &listing.exporters {
        println!("  {} - {}", entry.key.cyan(), entry.friendly_name);
    }

    println!();
    println!("{}", "Erasers:".bold().underline());
    if listing.erasers.is_empty() {
        println!("  {}", "(none - budget records are retained for accounting)".dimmed());
    }
    for entry in &listing.erasers {
        println!("  {} - {}", entry.key.cyan(), entry.friendly_name);
    }

    Ok(())
}
