//! A tool to fetch, compare, and export public metrics for social media accounts.
//!
//! # Overview
//!
//! `socialrank` takes a batch of account handles, resolves each one against a
//! metrics provider concurrently, and presents the results as a sortable,
//! exportable dataset. Handles that cannot be resolved are reported
//! individually; one bad handle never sinks the rest of the batch.
//!
//! # Basic Usage
//!
//! **Analyze a few handles:**
//! ```bash
//! socialrank analyze nasa spacex natgeo
//! ```
//!
//! **Paste a free-form list:**
//! ```bash
//! socialrank analyze --input "@nasa, @spacex natgeo"
//! ```
//!
//! **Sort and export:**
//! ```bash
//! socialrank analyze nasa spacex --sort engagement-rate --order desc --csv metrics.csv
//! socialrank analyze nasa spacex --excel            # timestamped .xlsx file name
//! ```
//!
//! **Run the HTTP API:**
//! ```bash
//! socialrank serve --listen 0.0.0.0:8080
//! # POST /api/analyze {"handles": ["nasa", "spacex"]}
//! ```
//!
//! # Provider Configuration
//!
//! The metrics provider endpoint comes from `socialrank.toml`, the
//! `SOCIALRANK_PROVIDER_URL` / `SOCIALRANK_PROVIDER_TOKEN` environment
//! variables, or the `--provider-url` / `--provider-token` flags; flags win
//! over environment, environment wins over the config file.

use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};
use socialrank::Result;
use socialrank::commands::{AnalyzeArgs, ServeArgs, analyze, serve};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "socialrank", version, about)]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a batch of account handles and generate reports
    Analyze(Box<AnalyzeArgs>),
    /// Run the HTTP API server
    Serve(ServeArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    match &Cli::parse().command {
        Command::Analyze(args) => analyze(args).await,
        Command::Serve(args) => serve(args).await,
    }
}
