//! Integration tests for the harvester
//!
//! These tests use wiremock to serve paginated listing pages and run the
//! full fetch → extract → write cycle end-to-end over real HTTP.

use listing_harvest::config::Config;
use listing_harvest::harvest::{harvest, Collector, FetchError};
use listing_harvest::output::{DelimitedFileSink, WriteOutcome};
use listing_harvest::StopReason;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock server
fn create_test_config(base_url: &str, output_path: &str) -> Config {
    let mut config = Config::default();
    config.source.url_template = format!("{}/d/ireland/all-events/?page={{}}", base_url);
    config.request.page_delay_ms = 10; // Very short for testing
    config.request.timeout_secs = 1;
    config.request.connect_timeout_secs = 1;
    config.output.path = output_path.to_string();
    config
}

fn listing_page(ids: &[&str]) -> String {
    let cards: String = ids
        .iter()
        .map(|id| {
            format!(
                r#"<div class="card"><a href="/e/{0}" data-event-id="{0}">Event {0}</a></div>"#,
                id
            )
        })
        .collect();
    format!(
        r#"<html><head><title>Events</title></head><body><nav><a href="/">Home</a></nav>{}</body></html>"#,
        cards
    )
}

const NO_RESULTS: &str =
    r#"<html><head><title>Events</title></head><body><p>No events found</p></body></html>"#;

async fn mount_page(server: &MockServer, page: u32, body: String, expected_hits: u64) {
    Mock::given(method("GET"))
        .and(path("/d/ireland/all-events/"))
        .and(query_param("page", page.to_string()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .expect(expected_hits)
        .mount(server)
        .await;
}

fn read_output(path: &std::path::Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .expect("Failed to read output file")
        .lines()
        .map(str::to_string)
        .collect()
}

#[tokio::test]
async fn test_full_harvest_until_empty_page() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("event_ids.csv");

    mount_page(&mock_server, 1, listing_page(&["5003", "4001", "5003"]), 1).await;
    mount_page(&mock_server, 2, listing_page(&["4001", "6002"]), 1).await;
    mount_page(&mock_server, 3, NO_RESULTS.to_string(), 1).await;
    mount_page(&mock_server, 4, listing_page(&["9999"]), 0).await;

    let config = create_test_config(&mock_server.uri(), output.to_str().unwrap());
    let report = harvest(&config).await.expect("Harvest setup failed");

    assert!(matches!(report.stop_reason, StopReason::Exhausted { page: 3 }));
    assert_eq!(report.pages_collected, 2);
    assert!(report.is_complete());
    assert_eq!(read_output(&output), vec!["Event ID", "4001", "5003", "6002"]);
}

#[tokio::test]
async fn test_configured_user_agent_is_sent() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("ids.csv");
    let mut config = create_test_config(&mock_server.uri(), output.to_str().unwrap());
    config.request.user_agent = "Mozilla/5.0 (X11; Linux x86_64) HarvestTest/1.0".to_string();

    Mock::given(method("GET"))
        .and(header("user-agent", config.request.user_agent.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_string(NO_RESULTS))
        .expect(1)
        .mount(&mock_server)
        .await;

    let sink = DelimitedFileSink::from_config(&config.output);
    let report = Collector::from_config(&config).unwrap().run(&sink).await;

    assert!(matches!(report.stop_reason, StopReason::Exhausted { page: 1 }));
}

#[tokio::test]
async fn test_lexicographic_output_order() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("ids.csv");

    mount_page(&mock_server, 1, listing_page(&["200", "10", "3"]), 1).await;
    mount_page(&mock_server, 2, NO_RESULTS.to_string(), 1).await;

    let config = create_test_config(&mock_server.uri(), output.to_str().unwrap());
    let sink = DelimitedFileSink::from_config(&config.output);
    Collector::from_config(&config).unwrap().run(&sink).await;

    assert_eq!(read_output(&output), vec!["Event ID", "10", "200", "3"]);
}

#[tokio::test]
async fn test_anomalous_page_stops_without_next_request() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("ids.csv");

    mount_page(&mock_server, 1, listing_page(&["12345"]), 1).await;
    mount_page(&mock_server, 2, listing_page(&["abc123", ""]), 1).await;
    mount_page(&mock_server, 3, listing_page(&["777"]), 0).await;

    let config = create_test_config(&mock_server.uri(), output.to_str().unwrap());
    let sink = DelimitedFileSink::from_config(&config.output);
    let report = Collector::from_config(&config).unwrap().run(&sink).await;

    assert!(matches!(report.stop_reason, StopReason::Anomalous { page: 2 }));
    assert_eq!(read_output(&output), vec!["Event ID", "12345"]);
}

#[tokio::test]
async fn test_partial_results_persisted_on_timeout() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("ids.csv");

    mount_page(&mock_server, 1, listing_page(&["101", "102"]), 1).await;
    mount_page(&mock_server, 2, listing_page(&["201", "101"]), 1).await;

    // Page 3 answers slower than the 1s client timeout
    Mock::given(method("GET"))
        .and(query_param("page", "3"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(listing_page(&["301"]))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    mount_page(&mock_server, 4, listing_page(&["401"]), 0).await;
    mount_page(&mock_server, 5, listing_page(&["501"]), 0).await;

    let config = create_test_config(&mock_server.uri(), output.to_str().unwrap());
    let sink = DelimitedFileSink::from_config(&config.output);
    let report = Collector::from_config(&config).unwrap().run(&sink).await;

    match &report.stop_reason {
        StopReason::FetchFailed { page, error } => {
            assert_eq!(*page, 3);
            assert!(matches!(error, FetchError::Transport { .. }));
        }
        other => panic!("Unexpected stop reason: {:?}", other),
    }
    assert_eq!(read_output(&output), vec!["Event ID", "101", "102", "201"]);
}

#[tokio::test]
async fn test_http_error_status_stops_loop() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("ids.csv");

    mount_page(&mock_server, 1, listing_page(&["1"]), 1).await;
    Mock::given(method("GET"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), output.to_str().unwrap());
    let sink = DelimitedFileSink::from_config(&config.output);
    let report = Collector::from_config(&config).unwrap().run(&sink).await;

    assert!(matches!(
        report.stop_reason,
        StopReason::FetchFailed {
            page: 2,
            error: FetchError::Status { status: 429, .. }
        }
    ));
    assert_eq!(read_output(&output), vec!["Event ID", "1"]);
}

#[tokio::test]
async fn test_empty_first_page_writes_nothing() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("ids.csv");

    mount_page(&mock_server, 1, NO_RESULTS.to_string(), 1).await;
    mount_page(&mock_server, 2, listing_page(&["2"]), 0).await;

    let config = create_test_config(&mock_server.uri(), output.to_str().unwrap());
    let sink = DelimitedFileSink::from_config(&config.output);
    let report = Collector::from_config(&config).unwrap().run(&sink).await;

    assert!(matches!(report.write, WriteOutcome::Skipped));
    assert!(!output.exists(), "No output file should be created");
}

#[tokio::test]
async fn test_tsv_output_with_custom_selector() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("listings.tsv");

    mount_page(
        &mock_server,
        1,
        r#"<html><body>
            <li data-listing-id="0042">A</li>
            <li data-listing-id="17">B</li>
            <a data-event-id="555">ignored</a>
        </body></html>"#
            .to_string(),
        1,
    )
    .await;
    mount_page(&mock_server, 2, NO_RESULTS.to_string(), 1).await;

    let mut config = create_test_config(&mock_server.uri(), output.to_str().unwrap());
    config.source.tag = "li".to_string();
    config.source.attribute = "data-listing-id".to_string();
    config.output.header = "Listing\tID".to_string();
    config.output.delimiter = "\t".to_string();

    let sink = DelimitedFileSink::from_config(&config.output);
    Collector::from_config(&config).unwrap().run(&sink).await;

    let content = std::fs::read_to_string(&output).unwrap();
    assert_eq!(content, "\"Listing\tID\"\n0042\n17\n");
}
