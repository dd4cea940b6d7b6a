//! End-to-end pipeline runs against mock HTTP servers

use domain_sweep::config::UserAgentConfig;
use domain_sweep::fetch::HttpTransport;
use domain_sweep::output::ArtifactFormat;
use domain_sweep::pipeline::{Pipeline, PipelineConfig};
use domain_sweep::{FetchStatus, HtmlExtractor, ReachableDomain};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PAGE: &str = r#"<html>
<head>
  <title>Norsk rikskringkasting</title>
  <meta name="description" content="News and entertainment">
  <meta property="og:description" content="Latest news from Norway">
  <script type="application/ld+json">{"@type": "Organization", "name": "NRK"}</script>
</head>
<body>
  <h1>Welcome</h1>
  <p>Great coverage of weather and sport.</p>
</body>
</html>"#;

fn create_test_config(output_dir: &Path) -> PipelineConfig {
    PipelineConfig {
        concurrency: 4,
        rate_limit: Duration::from_millis(10),
        retries: 3,
        retry_backoff: Duration::from_millis(10),
        request_timeout: Duration::from_secs(5),
        formats: vec![ArtifactFormat::Txt, ArtifactFormat::Json, ArtifactFormat::Html],
        tags_to_scrape: None,
        output_dir: output_dir.to_path_buf(),
    }
}

fn create_pipeline() -> Pipeline {
    let transport = HttpTransport::from_config(&UserAgentConfig::default())
        .expect("Failed to build HTTP client");
    Pipeline::new(Arc::new(transport), Arc::new(HtmlExtractor::new()))
}

#[tokio::test]
async fn test_full_run_writes_all_artifacts() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("user-agent", "Mozilla/5.0 (compatible; DomainScraper/1.0)"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PAGE))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let domain = ReachableDomain::new(".no", mock_server.uri());

    let report = create_pipeline()
        .run_detailed("nrk", vec![domain], create_test_config(dir.path()))
        .await
        .unwrap();

    assert_eq!(report.stats.saved, 1);
    assert_eq!(report.outcomes[0].status, FetchStatus::Saved);
    assert_eq!(report.outcomes[0].artifacts.len(), 3);

    let base_dir = dir.path().join("nrk");
    let text = fs::read_to_string(base_dir.join("nrk-no.txt")).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "[title] Norsk rikskringkasting");
    assert_eq!(lines[1], "[meta description] News and entertainment");
    assert_eq!(lines[2], "[og:description] Latest news from Norway");
    assert!(text.contains("[h1] Welcome"));
    assert!(text.contains("[p] Great coverage of weather and sport."));
    assert!(text.contains("[keywords] "));
    assert!(text.contains("[sentiment] polarity="));

    let json = fs::read_to_string(base_dir.join("nrk-no.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["json_ld"][0]["name"], "NRK");
    assert_eq!(value["raw_html"], PAGE);

    let html = fs::read_to_string(base_dir.join("nrk-no.html")).unwrap();
    assert_eq!(html, PAGE);
}

#[tokio::test]
async fn test_retries_until_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .expect(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<title>Hi</title>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let domain = ReachableDomain::new(".no", mock_server.uri());

    let report = create_pipeline()
        .run_detailed("nrk", vec![domain], create_test_config(dir.path()))
        .await
        .unwrap();

    assert_eq!(report.outcomes[0].status, FetchStatus::Saved);
    assert_eq!(report.outcomes[0].attempts, 3);

    let text = fs::read_to_string(dir.path().join("nrk").join("nrk-no.txt")).unwrap();
    assert!(text.contains("[title] Hi"));
}

#[tokio::test]
async fn test_mixed_outcomes() {
    let good = MockServer::start().await;
    let broken = MockServer::start().await;
    let empty = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PAGE))
        .mount(&good)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .expect(3)
        .mount(&broken)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body></body></html>"))
        .mount(&empty)
        .await;

    let dir = TempDir::new().unwrap();
    let domains = vec![
        ReachableDomain::new(".no", good.uri()),
        ReachableDomain::new(".se", broken.uri()),
        ReachableDomain::new(".dk", empty.uri()),
    ];

    let stats = create_pipeline()
        .run("nrk", domains, create_test_config(dir.path()))
        .await
        .unwrap();

    assert_eq!(stats.total_pinged, 3);
    assert_eq!(stats.saved, 1);
    assert_eq!(stats.failed, 1);
    assert_eq!(stats.not_useful, 1);

    let base_dir = dir.path().join("nrk");
    assert!(base_dir.join("nrk-no.txt").exists());
    assert!(!base_dir.join("nrk-se.txt").exists());
    assert!(!base_dir.join("nrk-dk.txt").exists());
}

#[tokio::test]
async fn test_tag_allowlist_limits_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<html><body><h1>Headline</h1><p>Paragraph text</p></body></html>",
        ))
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let mut config = create_test_config(dir.path());
    config.formats = vec![ArtifactFormat::Txt];
    config.tags_to_scrape = Some(vec!["h1".to_string()]);

    let stats = create_pipeline()
        .run(
            "nrk",
            vec![ReachableDomain::new(".no", mock_server.uri())],
            config,
        )
        .await
        .unwrap();

    assert_eq!(stats.saved, 1);

    let text = fs::read_to_string(dir.path().join("nrk").join("nrk-no.txt")).unwrap();
    assert!(text.contains("[h1] Headline"));
    assert!(!text.contains("[p]"));
}

#[tokio::test]
async fn test_slow_server_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<title>Late</title>")
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let dir = TempDir::new().unwrap();
    let mut config = create_test_config(dir.path());
    config.retries = 1;
    config.request_timeout = Duration::from_millis(100);

    let report = create_pipeline()
        .run_detailed(
            "nrk",
            vec![ReachableDomain::new(".no", mock_server.uri())],
            config,
        )
        .await
        .unwrap();

    assert_eq!(report.outcomes[0].status, FetchStatus::Failed);
    assert_eq!(report.outcomes[0].attempts, 1);
    assert!(report.outcomes[0].document.is_none());
}
