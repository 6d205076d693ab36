use super::common::{CommonArgs, init_logging};
use agi_meter::config::SourcesConfig;
use agi_meter::snapshot::{METRICS_FILE, MetricSnapshot, STATE_FILE};
use agi_meter::{Result, provenance, scoring, store};
use chrono::{Datelike, Utc};
use clap::Parser;
use ohno::IntoAppError;

#[derive(Parser, Debug)]
pub struct ScoreArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Re-score the persisted metric snapshot without collecting anything.
pub async fn process_score(args: &ScoreArgs) -> Result<()> {
    init_logging(args.common.log_level);

    let metrics_path = args.common.data_dir.join(METRICS_FILE);
    let metric_snapshot: MetricSnapshot = store::load(&metrics_path, "metric snapshot")?;

    let sources = SourcesConfig::load(&args.common.data_dir, args.common.sources.as_ref())?;
    let commit = provenance::git_commit().await;

    let state = scoring::score(&metric_snapshot, &sources, Utc::now().year(), commit);
    store::save_atomic(&state, args.common.data_dir.join(STATE_FILE))?;

    println!(
        "{}",
        serde_json::to_string_pretty(&state).into_app_err("serializing state snapshot")?
    );
    Ok(())
}
