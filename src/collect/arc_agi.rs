use super::{Collector, Metric, source_tag};
use crate::Result;
use crate::domain::Domain;
use crate::fetch::Fetcher;
use async_trait::async_trait;
use ohno::IntoAppError;
use serde::Deserialize;
use url::Url;

const LOG_TARGET: &str = "   arc-agi";

const DEFAULT_ENDPOINT: &str = "https://leaderboard.arcprize.org/api/leaderboard";

/// Leaderboard entries report scores on a 0-100 scale.
const SCORE_DIVISOR: f64 = 100.0;

#[derive(Debug, Deserialize)]
struct Leaderboard {
    #[serde(default)]
    entries: Vec<LeaderboardEntry>,
}

#[derive(Debug, Deserialize)]
struct LeaderboardEntry {
    score: f64,
}

/// Collector for the ARC-AGI public leaderboard; reports the top entry's score.
#[derive(Debug)]
pub struct ArcAgi {
    endpoint: Url,
}

impl Default for ArcAgi {
    fn default() -> Self {
        Self::new()
    }
}

impl ArcAgi {
    #[must_use]
    pub fn new() -> Self {
        Self::with_endpoint(Url::parse(DEFAULT_ENDPOINT).expect("invalid default endpoint"))
    }

    /// Use an alternate leaderboard endpoint, e.g. a local mock server.
    #[must_use]
    pub const fn with_endpoint(endpoint: Url) -> Self {
        Self { endpoint }
    }
}

#[async_trait]
impl Collector for ArcAgi {
    fn id(&self) -> &'static str {
        "arc_agi"
    }

    async fn collect(&self, fetcher: &Fetcher) -> Result<Option<Metric>> {
        log::info!(target: LOG_TARGET, "Querying the ARC-AGI leaderboard");

        let resp = fetcher
            .get(&self.endpoint)
            .await
            .into_app_err("could not fetch the ARC-AGI leaderboard")?;

        let board: Leaderboard = resp.json().await.into_app_err("malformed ARC-AGI leaderboard payload")?;

        let Some(top_score) = board.entries.iter().map(|e| e.score).max_by(f64::total_cmp) else {
            log::warn!(target: LOG_TARGET, "Leaderboard has no entries, no metric produced");
            return Ok(None);
        };

        let score = top_score / SCORE_DIVISOR;
        log::info!(target: LOG_TARGET, "Top leaderboard score normalizes to {score:.3}");

        Ok(Some(Metric::measured(Domain::R, "ARC-AGI", score, source_tag("arc-prize"))))
    }
}
