use super::common::{CommonArgs, init_logging};
use agi_meter::Result;
use agi_meter::collect;
use agi_meter::fetch::{Fetcher, RetryPolicy};
use agi_meter::pipeline;
use agi_meter::scoring::projected_completion_year;
use agi_meter::snapshot::StateSnapshot;
use chrono::{Datelike, Utc};
use clap::Parser;
use owo_colors::OwoColorize;

#[derive(Parser, Debug)]
pub struct RunArgs {
    /// GitHub personal access token used by the repository-activity collector
    #[arg(long, value_name = "TOKEN", env = "GITHUB_TOKEN")]
    pub github_token: Option<String>,

    /// Run classification tag recorded in the snapshots
    #[arg(long, value_name = "TRACK", default_value = "pure_model")]
    pub track: String,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub async fn process_run(args: &RunArgs) -> Result<()> {
    init_logging(args.common.log_level);

    let fetcher = Fetcher::new(RetryPolicy::default())?;
    let collectors = collect::registry(args.github_token.as_deref());

    let state = pipeline::run(
        &collectors,
        &fetcher,
        &args.common.data_dir,
        args.common.sources.as_ref(),
        &args.track,
    )
    .await?;

    print_summary(&state);
    Ok(())
}

fn print_summary(state: &StateSnapshot) {
    println!();
    println!("{}", "AGI Progress Summary".bold());
    println!("  AGI Progress : {}", format!("{:.1}%", state.agi_percent).green().bold());
    println!("  Time Bar     : {:.1}%", state.time_percent);
    println!("  Metrics Used : {}/{}", state.counts.metrics_counted, state.counts.metrics_total);

    match projected_completion_year(state.agi_percent, Utc::now().year()) {
        Some(year) => println!("  Projection   : ~{year} at the current linear rate"),
        None => println!("  Projection   : insufficient data"),
    }

    println!("  Commit       : {}", state.commit);
}
