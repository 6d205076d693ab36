use super::{Collector, Metric, source_tag};
use crate::Result;
use crate::domain::Domain;
use crate::fetch::Fetcher;
use async_trait::async_trait;
use ohno::IntoAppError;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Deserialize;
use url::Url;

const LOG_TARGET: &str = "    github";

const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Major AGI-adjacent repositories whose combined star count proxies
/// development activity in the field.
const TRACKED_REPOS: [&str; 4] = [
    "enricoros/big-AGI",
    "Josh-XT/AGiXT",
    "TransformerOptimus/SuperAGI",
    "fchollet/ARC-AGI",
];

/// Combined stars that saturate the score.
const STAR_CEILING: f64 = 100_000.0;

#[derive(Debug, Deserialize)]
struct RepoInfo {
    #[serde(default)]
    stargazers_count: Option<u64>,
}

/// Aggregate collector summing stars across a fixed list of GitHub repositories.
///
/// Individual repositories that cannot be fetched are skipped; only a run where
/// no repository was reachable produces no metric.
#[derive(Debug)]
pub struct GithubActivity {
    api_base: Url,
    token: Option<String>,
}

impl GithubActivity {
    #[must_use]
    pub fn new(token: Option<&str>) -> Self {
        Self {
            api_base: Url::parse(DEFAULT_API_BASE).expect("invalid default API base"),
            token: token.map(ToOwned::to_owned),
        }
    }

    /// Point the collector at an alternate API base, e.g. a local mock server.
    #[must_use]
    pub fn with_api_base(mut self, base: Url) -> Self {
        self.api_base = base;
        self
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        let _ = headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github.v3+json"));

        if let Some(token) = &self.token {
            let mut auth = HeaderValue::from_str(&format!("Bearer {token}")).into_app_err("invalid characters in GitHub token")?;
            auth.set_sensitive(true);
            let _ = headers.insert(AUTHORIZATION, auth);
            log::debug!(target: LOG_TARGET, "Using authenticated GitHub API calls");
        }

        Ok(headers)
    }
}

#[async_trait]
impl Collector for GithubActivity {
    fn id(&self) -> &'static str {
        "github_activity"
    }

    async fn collect(&self, fetcher: &Fetcher) -> Result<Option<Metric>> {
        log::info!(target: LOG_TARGET, "Querying GitHub activity for {} tracked repositories", TRACKED_REPOS.len());

        let headers = self.headers()?;

        let mut total_stars: u64 = 0;
        let mut reachable = 0_usize;

        for repo in TRACKED_REPOS {
            let url = self
                .api_base
                .join(&format!("repos/{repo}"))
                .into_app_err_with(|| format!("could not build URL for repository '{repo}'"))?;

            match fetcher.get_with_headers(&url, &headers).await {
                Ok(resp) => match resp.json::<RepoInfo>().await {
                    Ok(info) => {
                        let stars = info.stargazers_count.unwrap_or(0);
                        total_stars += stars;
                        reachable += 1;
                        log::debug!(target: LOG_TARGET, "{repo}: {stars} stars");
                    }
                    Err(e) => {
                        log::warn!(target: LOG_TARGET, "Malformed repository payload for '{repo}': {e}");
                    }
                },
                Err(e) => {
                    log::warn!(target: LOG_TARGET, "Could not fetch '{repo}': {e}");
                    if e.is_rate_limited() {
                        log::warn!(target: LOG_TARGET, "Set the GITHUB_TOKEN environment variable to raise the API rate limit");
                    }
                }
            }
        }

        if reachable == 0 {
            log::warn!(target: LOG_TARGET, "No tracked repository was reachable, no metric produced");
            return Ok(None);
        }

        #[expect(clippy::cast_precision_loss, reason = "star counts are far below 2^52")]
        let score = (total_stars as f64 / STAR_CEILING).min(1.0);

        log::info!(target: LOG_TARGET, "{total_stars} stars across {reachable} repositories normalize to {score:.3}");

        Ok(Some(Metric::measured(
            Domain::WM,
            "GitHub-AGI-Activity",
            score,
            source_tag("github"),
        )))
    }
}
