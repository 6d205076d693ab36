//! The full collect-score-persist pipeline.
//!
//! Exposed as an in-process entry point so the web layer can trigger a fresh run
//! by calling [`run`] directly instead of spawning the binary.

use crate::Result;
use crate::collect::{self, Collector};
use crate::config::SourcesConfig;
use crate::fetch::Fetcher;
use crate::provenance;
use crate::scoring;
use crate::snapshot::{METRICS_FILE, MetricSnapshot, STATE_FILE, StateSnapshot};
use crate::store;
use camino::{Utf8Path, Utf8PathBuf};
use chrono::{Datelike, Utc};
use ohno::bail;

const LOG_TARGET: &str = "  pipeline";

/// Run every collector, score the results, and atomically replace both snapshots.
///
/// Zero collected metrics is the one fatal condition: the run fails before any
/// persistence so a previous good snapshot is never overwritten by an empty one.
pub async fn run(
    collectors: &[Box<dyn Collector>],
    fetcher: &Fetcher,
    data_dir: &Utf8Path,
    sources_path: Option<&Utf8PathBuf>,
    track: &str,
) -> Result<StateSnapshot> {
    let outcome = collect::run_all(collectors, fetcher).await;

    if outcome.metrics.is_empty() {
        bail!(
            "no metrics were collected from any of the {} sources; previous snapshots left untouched",
            outcome.failed
        );
    }

    let metric_snapshot = MetricSnapshot {
        as_of: Utc::now(),
        track: track.to_string(),
        metrics: outcome.metrics,
    };
    store::save_atomic(&metric_snapshot, data_dir.join(METRICS_FILE))?;

    let sources = SourcesConfig::load(data_dir, sources_path)?;
    let commit = provenance::git_commit().await;

    let state = scoring::score(&metric_snapshot, &sources, Utc::now().year(), commit);
    store::save_atomic(&state, data_dir.join(STATE_FILE))?;

    log::info!(
        target: LOG_TARGET,
        "Run complete: {} of {} metrics counted, aggregate {:.1}%",
        state.counts.metrics_counted,
        state.counts.metrics_total,
        state.agi_percent
    );

    Ok(state)
}
