//! A tool to track aggregate AGI progress from live public metrics.
//!
//! # Overview
//!
//! `agi-meter` pulls numeric progress indicators from several independent public
//! data sources — benchmark leaderboards, model-hub download counts, repository
//! activity — normalizes each into a `[0, 1]` score, folds them into
//! trust-weighted per-domain means, and persists an aggregate progress snapshot
//! that a dashboard can render.
//!
//! # Quick Start
//!
//! Collect live metrics, score them, and write fresh snapshots into `data/`:
//!
//! ```bash
//! agi-meter run
//! ```
//!
//! The run prints a short summary and leaves two artifacts behind:
//! `data/metrics.json` (the raw collected metrics) and `data/state.json` (the
//! scored state the dashboard reads). Both are replaced atomically; a run that
//! collects nothing fails without touching them.
//!
//! # Basic Usage
//!
//! **Authenticated GitHub queries** (avoids the low anonymous rate limit):
//! ```bash
//! export GITHUB_TOKEN=ghp_xxxxxxxxxxxxxxxxxxxx
//! agi-meter run
//! ```
//!
//! **Re-score the last collected metrics** after tuning the weights, without
//! hitting the network:
//! ```bash
//! agi-meter score
//! ```
//!
//! **Generate a sources configuration to tune**:
//! ```bash
//! agi-meter init data/sources.toml
//! ```
//!
//! # Configuration
//!
//! Scoring is driven by a sources file (`sources.[toml|yml|yaml|json]` in the
//! data directory, or `--sources PATH`). All fields are optional; unspecified
//! fields use the built-in defaults.
//!
//! ```toml
//! # Weight applied per trust tier; zero excludes the tier from scoring.
//! [trust_weights]
//! measured = 1.0
//!
//! # Weight applied per capability domain; absent domains contribute nothing.
//! [domain_weights]
//! K = 0.1
//! R = 0.1
//! WM = 0.1
//!
//! # Elapsed-time reference bar.
//! [time_bar]
//! mode = "median_date"
//! lower_bound_year = 2020
//! median_year = 2034
//! ```
//!
//! # Exit Status
//!
//! - `0`: at least one metric was collected and both snapshots were written
//! - nonzero: no source produced a metric; previous snapshots are left untouched
//!
//! Individual source failures are not fatal — they are logged as warnings
//! (enable with `--log-level warn`) and reflected in the summary counts.

use agi_meter::Result;
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

mod commands;

use crate::commands::{InitArgs, RunArgs, ScoreArgs, init_sources, process_run, process_score};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "agi-meter", version, about)]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: MeterSubcommand,
}

#[derive(Subcommand, Debug)]
enum MeterSubcommand {
    /// Collect live metrics, score them, and persist fresh snapshots
    Run(RunArgs),
    /// Re-score the persisted metric snapshot without collecting
    Score(ScoreArgs),
    /// Generate a default sources configuration file
    Init(InitArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    match &Cli::parse().command {
        MeterSubcommand::Run(run_args) => process_run(run_args).await,
        MeterSubcommand::Score(score_args) => process_score(score_args).await,
        MeterSubcommand::Init(init_args) => init_sources(init_args),
    }
}
