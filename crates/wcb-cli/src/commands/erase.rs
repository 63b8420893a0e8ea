//! Erase command
//!
//! Run registered erasers. Budget records have none: they are retained for
//! accounting and audit, so this only reports that fact.

use anyhow::{bail, Context, Result};
use clap::Args;
use std::path::PathBuf;

use wcb_core::config::Config;

use super::open_registry;

/// Arguments for the erase command
#[derive(Debug, Args)]
pub struct EraseArgs {
    /// Email address of the requester
    #[arg(long, short)]
    pub email: String,

    /// Snapshot file (overrides storage.snapshot)
    #[arg(long)]
    pub snapshot: Option<PathBuf>,
}

/// Execute the erase command
pub fn execute(args: EraseArgs, config: &Config) -> Result<()> {
    use colored::Colorize;

    let registry = open_registry(args.snapshot.as_deref(), config)?;

    if registry.erasers().is_empty() {
        println!(
            "{} No erasers registered. Reimbursement and vendor payment records are retained for accounting purposes.",
            "ℹ".blue()
        );
        return Ok(());
    }

    for (key, entry) in registry.erasers().iter() {
        let mut page = 1;
        loop {
            let result = entry
                .eraser
                .erase(&args.email, page)
                .with_context(|| format!("Eraser '{}' failed", key))?;
            for message in &result.messages {
                println!("  {}", message);
            }
            if result.done {
                break;
            }
            if page >= config.export.max_pages {
                bail!("Eraser '{}' did not finish within {} pages", key, config.export.max_pages);
            }
            page += 1;
        }
        println!("{} {}", "✓".green(), entry.friendly_name);
    }

    Ok(())
}
