//! Persisted snapshot artifacts consumed by the rendering layer.

use crate::collect::Metric;
use crate::domain::Domain;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// File name of the raw metric snapshot within the data directory.
pub const METRICS_FILE: &str = "metrics.json";

/// File name of the scored state snapshot within the data directory.
pub const STATE_FILE: &str = "state.json";

/// The orchestrator's output: everything collected in one run.
///
/// Fully replaces the previous snapshot on disk; there is no merging across runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSnapshot {
    pub as_of: DateTime<Utc>,

    /// Run classification tag, e.g. `pure_model`.
    pub track: String,

    /// Collected metrics, in collector invocation order.
    pub metrics: Vec<Metric>,
}

/// Summary counts recorded alongside the scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    /// Metrics present in the snapshot.
    pub metrics_total: usize,

    /// Metrics whose trust tier carried a positive weight.
    pub metrics_counted: usize,
}

/// The scoring engine's output: the authoritative state for the dashboard.
///
/// `domain_means` is an ordered map so identical inputs always serialize to
/// identical bytes. Domains with no counted metric are absent, never fabricated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub as_of: DateTime<Utc>,
    pub track: String,

    /// Trust-weighted mean per domain, each within `[0, 1]`.
    pub domain_means: BTreeMap<Domain, f64>,

    /// Aggregate progress percentage, `[0, 100]`, one decimal.
    pub agi_percent: f64,

    /// Elapsed-time reference percentage, `[0, 100]`, one decimal.
    pub time_percent: f64,

    pub counts: Counts,

    /// Short source-control revision, or `unknown`.
    pub commit: String,
}
