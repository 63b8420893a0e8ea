//! Export command
//!
//! Run registered exporters page by page for an email address.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use indicatif::ProgressBar;
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use uuid::Uuid;

use wcb_core::config::Config;
use wcb_core::privacy::{ExporterRegistry, PersonalDataExporter};
use wcb_core::types::ExportItem;

use super::open_registry;

/// Arguments for the export command
#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Email address of the requester
    #[arg(long, short)]
    pub email: String,

    /// Exporter key to run (repeatable; default runs all)
    #[arg(long = "exporter", short = 'x')]
    pub exporters: Vec<String>,

    /// Snapshot file (overrides storage.snapshot)
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Output file path (stdout if not specified)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Emit compact JSON
    #[arg(long)]
    pub compact: bool,
}

/// Aggregated result of one export request
#[derive(Debug, Serialize)]
pub struct ExportReport {
    /// Request ID
    pub request_id: Uuid,
    /// Requester email address
    pub email: String,
    /// Time the export finished
    pub exported_at: DateTime<Utc>,
    /// Per-exporter results in registry order
    pub exporters: Vec<ExporterReport>,
}

/// Items collected from one exporter
#[derive(Debug, Serialize)]
pub struct ExporterReport {
    /// Registry key
    pub key: String,
    /// Display name
    pub friendly_name: String,
    /// Number of pages requested
    pub pages: u32,
    /// Items across all pages
    pub items: Vec<ExportItem>,
}

/// Execute the export command
pub fn execute(args: ExportArgs, config: &Config) -> Result<()> {
    use colored::Colorize;

    let registry = open_registry(args.snapshot.as_deref(), config)?;
    let keys = select_exporters(registry.exporters(), &args.exporters, &config.export.exporters)?;
    tracing::debug!(exporters = ?keys, max_pages = config.export.max_pages, "Running exporters");

    let mut reports = Vec::with_capacity(keys.len());
    for key in keys {
        let entry = registry
            .exporters()
            .get(&key)
            .context(format!("Exporter '{}' not registered", key))?;

        let spinner = ProgressBar::new_spinner();
        spinner.set_message(entry.friendly_name.clone());
        let (pages, items) = collect_pages(
            entry.exporter.as_ref(),
            &args.email,
            config.export.max_pages,
            |page| spinner.set_message(format!("{} (page {})", entry.friendly_name, page)),
        )
        .with_context(|| format!("Exporter '{}' failed", key))?;
        spinner.finish_and_clear();

        eprintln!(
            "{} {}: {} item(s) in {} page(s)",
            "✓".green(),
            entry.friendly_name,
            items.len().to_string().yellow(),
            pages
        );

        reports.push(ExporterReport {
            key,
            friendly_name: entry.friendly_name.clone(),
            pages,
            items,
        });
    }

    let report = ExportReport {
        request_id: Uuid::new_v4(),
        email: args.email.trim().to_string(),
        exported_at: Utc::now(),
        exporters: reports,
    };

    let output = if args.compact || !config.export.pretty {
        serde_json::to_string(&report)?
    } else {
        serde_json::to_string_pretty(&report)?
    };

    if let Some(output_path) = args.output {
        std::fs::write(&output_path, &output)
            .context(format!("Failed to write to {}", output_path.display()))?;
        eprintln!("{} Exported to {}", "✓".green(), output_path.display());
    } else {
        let mut stdout = std::io::stdout();
        writeln!(stdout, "{}", output).context("Failed to write to stdout")?;
    }

    Ok(())
}

/// Resolve which exporters to run
///
/// Keys given on the command line win over the configured list; with
/// neither, every registered exporter runs.
fn select_exporters(
    registry: &ExporterRegistry,
    requested: &[String],
    configured: &[String],
) -> Result<Vec<String>> {
    let selected = if !requested.is_empty() {
        requested
    } else {
        configured
    };

    if selected.is_empty() {
        return Ok(registry.keys().into_iter().map(String::from).collect());
    }

    for key in selected {
        if !registry.contains(key) {
            bail!(
                "Unknown exporter '{}'. Available: {}",
                key,
                registry.keys().join(", ")
            );
        }
    }
    Ok(selected.to_vec())
}

/// Call an exporter with pages 1, 2, ... until it reports done
fn collect_pages(
    exporter: &dyn PersonalDataExporter,
    email: &str,
    max_pages: u32,
    mut on_page: impl FnMut(u32),
) -> Result<(u32, Vec<ExportItem>)> {
    let mut items = Vec::new();
    let mut page = 1;

    loop {
        on_page(page);
        let result = exporter.export(email, page)?;
        items.extend(result.data);

        if result.done {
            return Ok((page, items));
        }
        if page >= max_pages {
            bail!("Exporter did not finish within {} pages", max_pages);
        }
        page += 1;
    }
}
