//! wcb-privacy - personal data export for WordCamp budget records
//!
//! Runs the reimbursement and vendor payment exporters against a snapshot
//! of the budget database, the way a privacy request orchestrator would.
//!
//! ## Quick Start
//!
//! ```bash
//! # Create .wcb-privacy/config.toml and an empty snapshot
//! wcb-privacy init
//!
//! # List registered exporters
//! wcb-privacy exporters
//!
//! # Export everything stored for an email address
//! wcb-privacy export --email pat@example.com --snapshot data.json
//! ```

mod commands;

fn main() {
    if let Err(err) = commands::run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
