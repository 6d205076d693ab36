use super::{Collector, Metric, source_tag};
use crate::Result;
use crate::domain::Domain;
use crate::fetch::Fetcher;
use async_trait::async_trait;
use ohno::IntoAppError;
use serde::Deserialize;
use url::Url;

const LOG_TARGET: &str = "        hf";

const DEFAULT_API_BASE: &str = "https://huggingface.co";

/// Download counts are compressed logarithmically; one million downloads
/// (`log10 = 6`) saturates the score.
const LOG10_DOWNLOAD_CEILING: f64 = 6.0;

#[derive(Debug, Deserialize)]
struct ModelInfo {
    #[serde(default)]
    downloads: Option<u64>,
}

/// Collector over the Hugging Face model search API.
///
/// Uses the download count of the most-downloaded model matching a benchmark
/// query as a proxy for ecosystem activity around that benchmark. One instance
/// per tracked benchmark; see [`HfEcosystem::mmlu`] and [`HfEcosystem::gsm8k`].
#[derive(Debug)]
pub struct HfEcosystem {
    id: &'static str,
    query: &'static str,
    domain: Domain,
    name: &'static str,
    origin: &'static str,
    endpoint: Url,
}

impl HfEcosystem {
    /// Ecosystem activity around the MMLU knowledge benchmark.
    #[must_use]
    pub fn mmlu() -> Self {
        Self::build("mmlu", "MMLU", Domain::K, "MMLU-Ecosystem", "hf-mmlu")
    }

    /// Ecosystem activity around the GSM8K math benchmark.
    #[must_use]
    pub fn gsm8k() -> Self {
        Self::build("gsm8k", "gsm8k", Domain::M, "GSM8K-Ecosystem", "hf-gsm8k")
    }

    fn build(id: &'static str, query: &'static str, domain: Domain, name: &'static str, origin: &'static str) -> Self {
        let base = Url::parse(DEFAULT_API_BASE).expect("invalid default API base");
        Self {
            id,
            query,
            domain,
            name,
            origin,
            endpoint: Self::search_endpoint(&base, query),
        }
    }

    /// Point the collector at an alternate API base, e.g. a local mock server.
    #[must_use]
    pub fn with_api_base(mut self, base: Url) -> Self {
        self.endpoint = Self::search_endpoint(&base, self.query);
        self
    }

    fn search_endpoint(base: &Url, query: &str) -> Url {
        Url::parse_with_params(
            &format!("{}/api/models", base.as_str().trim_end_matches('/')),
            &[("search", query), ("sort", "downloads")],
        )
        .expect("invalid API base")
    }
}

#[async_trait]
impl Collector for HfEcosystem {
    fn id(&self) -> &'static str {
        self.id
    }

    async fn collect(&self, fetcher: &Fetcher) -> Result<Option<Metric>> {
        log::info!(target: LOG_TARGET, "Querying Hugging Face model search for '{}'", self.query);

        let resp = fetcher
            .get(&self.endpoint)
            .await
            .into_app_err_with(|| format!("could not fetch Hugging Face models for '{}'", self.query))?;

        let models: Vec<ModelInfo> = resp
            .json()
            .await
            .into_app_err_with(|| format!("malformed Hugging Face model payload for '{}'", self.query))?;

        if models.is_empty() {
            log::warn!(target: LOG_TARGET, "No models matched '{}', no metric produced", self.query);
            return Ok(None);
        }

        let downloads = models.iter().filter_map(|m| m.downloads).max().unwrap_or(0);

        #[expect(clippy::cast_precision_loss, reason = "download counts are far below 2^52")]
        let score = ((downloads.max(1) as f64).log10() / LOG10_DOWNLOAD_CEILING).min(1.0);

        log::info!(target: LOG_TARGET, "'{}' normalizes to {score:.3} from {downloads} downloads", self.query);

        Ok(Some(Metric::measured(self.domain, self.name, score, source_tag(self.origin))))
    }
}
