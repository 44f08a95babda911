//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::verify::RateTier;

/// Top-level CLI parser for `breachscan`.
#[derive(Debug, Parser)]
#[command(
    name = "breachscan",
    version,
    about = "Audit directory group members against breach intelligence"
)]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Walk the seed groups, check every member's email and write a report.
    Scan(ScanArgs),
    /// List directory groups to help pick seeds.
    Groups {
        /// Only show groups whose name contains this text (case-insensitive).
        #[arg(long)]
        filter: Option<String>,
    },
}

/// Arguments of the `scan` subcommand.
#[derive(Debug, Clone, Args)]
pub struct ScanArgs {
    /// Seed group object id (repeatable).
    #[arg(long = "group-id", value_name = "ID", conflicts_with = "group_names")]
    pub group_ids: Vec<String>,

    /// Seed group display name (repeatable).
    #[arg(long = "group-name", value_name = "NAME")]
    pub group_names: Vec<String>,

    /// Breach lookups per minute: 10, 50, 100, 500 or 1000.
    #[arg(long, default_value_t = RateTier::Rpm10)]
    pub rate: RateTier,

    /// Do not descend into nested groups.
    #[arg(long)]
    pub no_nested: bool,

    /// Only enumerate members; do not query the breach service.
    #[arg(long)]
    pub skip_breach_check: bool,

    /// Path of the HTML report.
    #[arg(long, default_value = "breach-report.html")]
    pub output: PathBuf,

    /// Also print the report to PDF with a headless browser.
    #[arg(long)]
    pub pdf: bool,

    /// Browser executable used for PDF export.
    #[arg(long, default_value = "chromium")]
    pub browser: String,
}
