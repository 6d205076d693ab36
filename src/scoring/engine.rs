use crate::collect::Metric;
use crate::config::{SourcesConfig, TimeBarConfig};
use crate::domain::Domain;
use crate::snapshot::{Counts, MetricSnapshot, StateSnapshot};
use std::collections::{BTreeMap, HashMap};

/// Round to one decimal, the precision of every reported percentage.
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Trust-weighted mean score per domain.
///
/// Metrics whose trust tier has a zero or unknown weight are excluded from both
/// numerator and denominator, so they neither count as zero scores nor dilute
/// the mean. Domains left with no counted metric are absent from the result
/// rather than materialized with a fabricated value. Out-of-range input scores
/// are clamped into `[0, 1]` instead of propagating.
#[must_use]
pub fn weighted_domain_scores(metrics: &[Metric], trust_weights: &HashMap<String, f64>) -> BTreeMap<Domain, f64> {
    let mut sums: BTreeMap<Domain, (f64, f64)> = BTreeMap::new();

    for metric in metrics {
        let weight = trust_weights.get(&metric.trust).copied().unwrap_or(0.0);
        if weight <= 0.0 {
            continue;
        }

        let (num, den) = sums.entry(metric.domain).or_insert((0.0, 0.0));
        *num += metric.score.clamp(0.0, 1.0) * weight;
        *den += weight;
    }

    // Every entry was created by a positive weight, so the denominator is nonzero.
    sums.into_iter().map(|(domain, (num, den))| (domain, num / den)).collect()
}

/// Aggregate progress percentage over the configured domain weights.
///
/// Domains without a configured weight contribute nothing even when metrics
/// exist for them; domains with a weight but no mean contribute zero.
#[must_use]
pub fn aggregate_agi_percent(domain_means: &BTreeMap<Domain, f64>, domain_weights: &HashMap<Domain, f64>) -> f64 {
    let total: f64 = domain_weights
        .iter()
        .map(|(domain, weight)| weight * domain_means.get(domain).copied().unwrap_or(0.0))
        .sum();

    round1((total * 100.0).clamp(0.0, 100.0))
}

/// Elapsed-time reference percentage.
///
/// A degenerate `median_date` configuration (`median_year <= lower_bound_year`)
/// yields `0.0` instead of dividing by zero or going negative.
#[must_use]
pub fn compute_time_bar_percent(config: &TimeBarConfig, current_year: i32) -> f64 {
    match *config {
        TimeBarConfig::MedianDate {
            lower_bound_year,
            median_year,
        } => {
            if median_year <= lower_bound_year {
                return 0.0;
            }

            let fraction = f64::from(current_year - lower_bound_year) / f64::from(median_year - lower_bound_year);
            round1(fraction.clamp(0.0, 1.0) * 100.0)
        }
        TimeBarConfig::ProgressProxy { progress } => round1(progress.clamp(0.0, 100.0)),
        TimeBarConfig::Unknown => 0.0,
    }
}

/// Score one metric snapshot into the state snapshot for the dashboard.
///
/// Pure and deterministic: identical inputs produce identical output, with
/// `as_of` and `track` carried through from the metric snapshot unchanged.
#[must_use]
pub fn score(snapshot: &MetricSnapshot, sources: &SourcesConfig, current_year: i32, commit: String) -> StateSnapshot {
    let domain_means = weighted_domain_scores(&snapshot.metrics, &sources.trust_weights);
    let agi_percent = aggregate_agi_percent(&domain_means, &sources.domain_weights);
    let time_percent = compute_time_bar_percent(&sources.time_bar, current_year);

    let metrics_counted = snapshot
        .metrics
        .iter()
        .filter(|m| sources.trust_weights.get(&m.trust).copied().unwrap_or(0.0) > 0.0)
        .count();

    StateSnapshot {
        as_of: snapshot.as_of,
        track: snapshot.track.clone(),
        domain_means,
        agi_percent,
        time_percent,
        counts: Counts {
            metrics_total: snapshot.metrics.len(),
            metrics_counted,
        },
        commit,
    }
}
