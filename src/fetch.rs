//! Bounded HTTP fetching with a fixed retry budget.

use crate::Result;
use core::error::Error;
use core::fmt;
use core::time::Duration;
use ohno::app_err;
use reqwest::header::HeaderMap;
use reqwest::{Client, StatusCode};
use url::Url;

const LOG_TARGET: &str = "     fetch";

const DEFAULT_MAX_ATTEMPTS: u32 = 3;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);
const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(5);
const DEFAULT_RATE_LIMIT_DELAY: Duration = Duration::from_secs(10);

/// Fixed retry budget for a single logical GET.
///
/// There is deliberately no exponential backoff, jitter, or circuit breaking: the
/// budget is small and the tool runs as a short periodic batch job, so bounded
/// worst-case latency matters more than being gentle with upstream servers.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts before giving up, including the first.
    pub max_attempts: u32,

    /// Per-request timeout.
    pub timeout: Duration,

    /// Delay between attempts after a transient failure.
    pub retry_delay: Duration,

    /// Delay between attempts after the server signaled rate limiting.
    pub rate_limit_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            timeout: DEFAULT_TIMEOUT,
            retry_delay: DEFAULT_RETRY_DELAY,
            rate_limit_delay: DEFAULT_RATE_LIMIT_DELAY,
        }
    }
}

/// Terminal failure of a fetch after the retry budget is exhausted.
///
/// Rate limiting is kept distinguishable from generic transient failure so callers
/// can emit an actionable hint (e.g. provide an API token).
#[derive(Debug)]
pub enum FetchError {
    /// All attempts failed with transport errors or non-2xx statuses.
    Exhausted { attempts: u32, last_error: ohno::AppError },

    /// The final attempt was rejected by the server's rate limiter.
    RateLimited { attempts: u32 },
}

impl FetchError {
    /// Returns `true` if the failure was due to upstream rate limiting.
    #[must_use]
    pub const fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exhausted { attempts, last_error } => {
                write!(f, "fetch failed after {attempts} attempt(s): {last_error}")
            }
            Self::RateLimited { attempts } => {
                write!(f, "rate limited by the server after {attempts} attempt(s)")
            }
        }
    }
}

impl Error for FetchError {}

/// Outcome of one attempt that did not produce a usable response.
struct AttemptFailure {
    rate_limited: bool,
    error: ohno::AppError,
}

/// HTTP client wrapper applying the retry policy to every GET.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    policy: RetryPolicy,
}

impl Fetcher {
    /// Create a fetcher with the given retry policy.
    pub fn new(policy: RetryPolicy) -> Result<Self> {
        let client = Client::builder().user_agent("agi-meter").timeout(policy.timeout).build()?;

        Ok(Self { client, policy })
    }

    /// Perform a GET with the default headers.
    pub async fn get(&self, url: &Url) -> Result<reqwest::Response, FetchError> {
        self.get_with_headers(url, &HeaderMap::new()).await
    }

    /// Perform a GET with additional request headers.
    ///
    /// Retries transport errors and non-2xx statuses up to the policy's attempt
    /// budget. HTTP 403 and 429 are treated as the distinguishable rate-limit
    /// condition: they wait the longer delay between attempts and surface as
    /// [`FetchError::RateLimited`] on exhaustion.
    pub async fn get_with_headers(&self, url: &Url, headers: &HeaderMap) -> Result<reqwest::Response, FetchError> {
        let max = self.policy.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;

            let failure = match self.attempt(url, headers).await {
                Ok(resp) => return Ok(resp),
                Err(failure) => failure,
            };

            log::warn!(target: LOG_TARGET, "Attempt {attempt}/{max} for '{url}' failed: {}", failure.error);

            if attempt >= max {
                return Err(if failure.rate_limited {
                    FetchError::RateLimited { attempts: attempt }
                } else {
                    FetchError::Exhausted {
                        attempts: attempt,
                        last_error: failure.error,
                    }
                });
            }

            let delay = if failure.rate_limited {
                self.policy.rate_limit_delay
            } else {
                self.policy.retry_delay
            };
            tokio::time::sleep(delay).await;
        }
    }

    async fn attempt(&self, url: &Url, headers: &HeaderMap) -> Result<reqwest::Response, AttemptFailure> {
        match self.client.get(url.clone()).headers(headers.clone()).send().await {
            Ok(resp) => {
                let status = resp.status();
                if status.is_success() {
                    Ok(resp)
                } else {
                    Err(AttemptFailure {
                        rate_limited: status == StatusCode::FORBIDDEN || status == StatusCode::TOO_MANY_REQUESTS,
                        error: app_err!("server returned {status} for '{url}'"),
                    })
                }
            }
            Err(e) => Err(AttemptFailure {
                rate_limited: false,
                error: app_err!("request to '{url}' failed: {e}"),
            }),
        }
    }
}
