use crate::domain::Domain;
use serde::{Deserialize, Serialize};

/// Trust tier carried by every metric produced by the live collectors.
/// Other tiers are reserved for externally supplied weight tables.
pub const TRUST_MEASURED: &str = "measured";

/// One normalized observation from one data source.
///
/// A metric is created fresh by its collector on every run, never mutated, and
/// replaced wholesale by the next run. `source` is audit provenance only and does
/// not participate in scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    /// Capability domain the observation belongs to.
    pub domain: Domain,

    /// Human-readable label of the source/benchmark.
    pub name: String,

    /// Normalized value, always within `[0, 1]`.
    pub score: f64,

    /// Trust tier label; drives the scoring weight.
    pub trust: String,

    /// Provenance string, typically origin plus collection date.
    pub source: String,
}

impl Metric {
    /// Create a metric at the `measured` trust tier, clamping the score into `[0, 1]`.
    #[must_use]
    pub fn measured(domain: Domain, name: impl Into<String>, score: f64, source: impl Into<String>) -> Self {
        Self {
            domain,
            name: name.into(),
            score: score.clamp(0.0, 1.0),
            trust: TRUST_MEASURED.to_string(),
            source: source.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_is_clamped_at_construction() {
        let high = Metric::measured(Domain::R, "x", 1.7, "test");
        assert!((high.score - 1.0).abs() < f64::EPSILON);

        let low = Metric::measured(Domain::R, "x", -0.3, "test");
        assert!(low.score.abs() < f64::EPSILON);
    }

    #[test]
    fn test_measured_trust_tier() {
        let m = Metric::measured(Domain::K, "x", 0.5, "test");
        assert_eq!(m.trust, TRUST_MEASURED);
    }
}
