//! Timeline inspector
//!
//! Replays a timeline scenario headlessly: applies the user intents to the
//! provider list, prints the callback payloads, the compiled KQL, and the
//! page of results that would be displayed.
//!
//! Usage:
//!   timeline-inspector --scenario scenario.json --kql "user.name : root" --page-size 10
//!
//! The report is written to stdout as JSON; logs go to stderr.

use anyhow::{Context, Result};
use clap::Parser;
use std::{fs, path::PathBuf};
use timeline_inspector::{run, RunOptions, Scenario};
use timeline_query::KqlMode;
use timeline_window::{Sort, WindowConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "timeline-inspector")]
#[command(about = "Replay timeline provider intents and inspect the compiled query")]
struct Args {
    /// Scenario file (JSON: providers, intents, results)
    #[arg(short, long)]
    scenario: PathBuf,

    /// Window config file (TOML, [window] section)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Free-form KQL from the search bar
    #[arg(long, default_value = "")]
    kql: String,

    /// How the search bar query combines with providers
    #[arg(long, default_value = "filter")]
    kql_mode: KqlMode,

    /// Sort as column:asc|desc
    #[arg(long)]
    sort: Option<Sort>,

    /// Rows per page (clamped to the configured options)
    #[arg(long)]
    page_size: Option<usize>,

    /// Zero-based page index
    #[arg(long, allow_negative_numbers = true)]
    page: Option<i64>,

    /// Pretty-print the JSON report
    #[arg(long)]
    pretty: bool,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let window = match &args.config {
        Some(path) => WindowConfig::load_from(path),
        None => WindowConfig::default(),
    };

    info!("Loading scenario from {:?}", args.scenario);
    let contents = fs::read_to_string(&args.scenario).context("Failed to read scenario file")?;
    let scenario: Scenario =
        serde_json::from_str(&contents).context("Failed to parse scenario file")?;

    let options = RunOptions {
        window,
        kql: args.kql,
        kql_mode: args.kql_mode,
        sort: args.sort,
        items_per_page: args.page_size,
        page: args.page,
    };
    let report = run(scenario, &options)?;

    let output = if args.pretty {
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string(&report)
    }
    .context("Failed to serialize report")?;
    println!("{output}");
    Ok(())
}
