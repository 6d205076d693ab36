//! Integration tests for the shipped collectors using wiremock.

use agi_meter::collect::{ArcAgi, Collector, GithubActivity, HfEcosystem, TRUST_MEASURED};
use agi_meter::domain::Domain;
use agi_meter::fetch::{Fetcher, RetryPolicy};
use core::time::Duration;
use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetcher() -> Fetcher {
    Fetcher::new(RetryPolicy {
        max_attempts: 2,
        timeout: Duration::from_secs(5),
        retry_delay: Duration::from_millis(1),
        rate_limit_delay: Duration::from_millis(1),
    })
    .expect("failed to build fetcher")
}

fn base_url(server: &MockServer) -> Url {
    Url::parse(&server.uri()).unwrap()
}

#[tokio::test]
async fn test_arc_agi_reports_top_score() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/leaderboard"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "entries": [
                {"name": "runner-up", "score": 42.0},
                {"name": "leader", "score": 85.5},
            ]
        })))
        .mount(&server)
        .await;

    let endpoint = Url::parse(&format!("{}/api/leaderboard", server.uri())).unwrap();
    let collector = ArcAgi::with_endpoint(endpoint);

    let metric = collector.collect(&fetcher()).await.unwrap().expect("metric expected");

    assert_eq!(metric.domain, Domain::R);
    assert_eq!(metric.name, "ARC-AGI");
    assert_eq!(metric.trust, TRUST_MEASURED);
    assert!((metric.score - 0.855).abs() < 1e-9);
    assert!(metric.source.starts_with("arc-prize-live-"));
}

#[tokio::test]
async fn test_arc_agi_empty_leaderboard_is_absent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/leaderboard"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"entries": []})))
        .mount(&server)
        .await;

    let endpoint = Url::parse(&format!("{}/api/leaderboard", server.uri())).unwrap();
    let collector = ArcAgi::with_endpoint(endpoint);

    assert!(collector.collect(&fetcher()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_arc_agi_malformed_payload_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/leaderboard"))
        .respond_with(ResponseTemplate::new(200).set_body_string("certainly not json"))
        .mount(&server)
        .await;

    let endpoint = Url::parse(&format!("{}/api/leaderboard", server.uri())).unwrap();
    let collector = ArcAgi::with_endpoint(endpoint);

    let err = collector.collect(&fetcher()).await.unwrap_err();
    assert!(err.to_string().contains("malformed"));
}

#[tokio::test]
async fn test_hf_download_counts_compress_logarithmically() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/models"))
        .and(query_param("search", "gsm8k"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "a", "downloads": 1000},
            {"id": "b", "downloads": 17},
        ])))
        .mount(&server)
        .await;

    let collector = HfEcosystem::gsm8k().with_api_base(base_url(&server));
    let metric = collector.collect(&fetcher()).await.unwrap().expect("metric expected");

    assert_eq!(metric.domain, Domain::M);
    assert_eq!(metric.name, "GSM8K-Ecosystem");
    // log10(1000) / 6
    assert!((metric.score - 0.5).abs() < 1e-9);
    assert!(metric.source.starts_with("hf-gsm8k-live-"));
}

#[tokio::test]
async fn test_hf_score_saturates_at_a_million_downloads() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/models"))
        .and(query_param("search", "MMLU"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "a", "downloads": 250_000_000u64},
        ])))
        .mount(&server)
        .await;

    let collector = HfEcosystem::mmlu().with_api_base(base_url(&server));
    let metric = collector.collect(&fetcher()).await.unwrap().expect("metric expected");

    assert_eq!(metric.domain, Domain::K);
    assert!((metric.score - 1.0).abs() < 1e-12);
}

#[tokio::test]
async fn test_hf_no_matching_models_is_absent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let collector = HfEcosystem::mmlu().with_api_base(base_url(&server));
    assert!(collector.collect(&fetcher()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_hf_missing_download_counts_score_zero() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": "a"}])))
        .mount(&server)
        .await;

    let collector = HfEcosystem::gsm8k().with_api_base(base_url(&server));
    let metric = collector.collect(&fetcher()).await.unwrap().expect("metric expected");
    assert!(metric.score.abs() < 1e-12);
}

#[tokio::test]
async fn test_github_sums_stars_across_reachable_repos() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/enricoros/big-AGI"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"stargazers_count": 60_000})))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/Josh-XT/AGiXT"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"stargazers_count": 20_000})))
        .mount(&server)
        .await;

    // The remaining repositories 404 and are skipped.
    let collector = GithubActivity::new(None).with_api_base(base_url(&server));
    let metric = collector.collect(&fetcher()).await.unwrap().expect("metric expected");

    assert_eq!(metric.domain, Domain::WM);
    assert_eq!(metric.name, "GitHub-AGI-Activity");
    // 80k of the 100k star ceiling.
    assert!((metric.score - 0.8).abs() < 1e-9);
    assert!(metric.source.starts_with("github-live-"));
}

#[tokio::test]
async fn test_github_no_reachable_repos_is_absent() {
    let server = MockServer::start().await;

    // No mocks mounted: every repository request 404s.
    let collector = GithubActivity::new(None).with_api_base(base_url(&server));
    assert!(collector.collect(&fetcher()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_github_rate_limited_everywhere_is_absent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let collector = GithubActivity::new(Some("test-token")).with_api_base(base_url(&server));
    assert!(collector.collect(&fetcher()).await.unwrap().is_none());
}
