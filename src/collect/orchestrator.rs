use super::{Collector, Metric};
use crate::fetch::Fetcher;
use futures_util::future::join_all;

const LOG_TARGET: &str = "collectors";

/// Aggregated result of one collection pass.
#[derive(Debug)]
pub struct RunOutcome {
    /// Successfully produced metrics, in collector invocation order.
    pub metrics: Vec<Metric>,

    /// Number of collectors that produced a metric.
    pub successful: usize,

    /// Number of collectors that produced nothing (absent data or error).
    pub failed: usize,
}

/// Run every registered collector and gather what succeeded.
///
/// Collectors run concurrently as a latency optimization only; each one's failure
/// stays isolated and is reported as a warning rather than stopping the pass.
/// The caller decides whether an empty metric list is fatal.
pub async fn run_all(collectors: &[Box<dyn Collector>], fetcher: &Fetcher) -> RunOutcome {
    let results = join_all(collectors.iter().map(|c| c.collect(fetcher))).await;

    let mut metrics = Vec::with_capacity(collectors.len());
    let mut successful = 0;
    let mut failed = 0;

    for (collector, result) in collectors.iter().zip(results) {
        match result {
            Ok(Some(metric)) => {
                log::info!(target: LOG_TARGET, "{}: collected '{}' with score {:.3}", collector.id(), metric.name, metric.score);
                metrics.push(metric);
                successful += 1;
            }
            Ok(None) => {
                log::warn!(target: LOG_TARGET, "{}: no usable data", collector.id());
                failed += 1;
            }
            Err(e) => {
                log::warn!(target: LOG_TARGET, "{}: {e:#}", collector.id());
                failed += 1;
            }
        }
    }

    log::info!(target: LOG_TARGET, "Collection finished: {successful} successful, {failed} failed");

    RunOutcome {
        metrics,
        successful,
        failed,
    }
}
