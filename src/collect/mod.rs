//! Metric collection from live data sources.
//!
//! Each [`Collector`] owns one upstream source (or a fixed list of endpoints for
//! aggregate-style sources) and turns its raw payload into a normalized [`Metric`].
//! All per-source failures stop at the collector boundary: a collector either
//! produces a metric, reports that the source had no usable data (`Ok(None)`), or
//! fails with an error the orchestrator records as a warning. Nothing a single
//! collector does can take down the run.

mod arc_agi;
mod github_activity;
mod hf_ecosystem;
mod metric;
mod orchestrator;

pub use arc_agi::ArcAgi;
pub use github_activity::GithubActivity;
pub use hf_ecosystem::HfEcosystem;
pub use metric::{Metric, TRUST_MEASURED};
pub use orchestrator::{RunOutcome, run_all};

use crate::Result;
use crate::fetch::Fetcher;
use async_trait::async_trait;
use chrono::Utc;

/// A single registered data source.
///
/// Implementations must not panic: hard failures are returned as errors and
/// structurally-empty payloads as `Ok(None)`, so the orchestrator can isolate
/// them from the rest of the run.
#[async_trait]
pub trait Collector: Send + Sync {
    /// Stable identifier used in diagnostics and run reports.
    fn id(&self) -> &'static str;

    /// Fetch and normalize this source's metric.
    ///
    /// `Ok(None)` means the source responded but carried no usable data.
    async fn collect(&self, fetcher: &Fetcher) -> Result<Option<Metric>>;
}

/// All collectors shipped with the tool, in invocation order.
///
/// This static registry replaces runtime discovery: adding a source means adding
/// it here at compile time.
#[must_use]
pub fn registry(github_token: Option<&str>) -> Vec<Box<dyn Collector>> {
    vec![
        Box::new(ArcAgi::new()),
        Box::new(HfEcosystem::mmlu()),
        Box::new(HfEcosystem::gsm8k()),
        Box::new(GithubActivity::new(github_token)),
    ]
}

/// Provenance tag embedding the collection date, e.g. `arc-prize-live-20260806`.
fn source_tag(origin: &str) -> String {
    format!("{origin}-live-{}", Utc::now().format("%Y%m%d"))
}
