//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: YAML config → paginated requests → merged dataset

use coronaviz_data::boundary::{BoundaryLoader, REGIONS};
use coronaviz_data::config::FetcherConfig;
use coronaviz_data::http::HttpClient;
use coronaviz_data::{default_structure, Dataset, DatasetFetcher, Error, Filters, Query, Structure};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn daily_structure() -> Structure {
    Structure::new()
        .field("date", "date")
        .field("newCases", "newCasesByPublishDate")
}

fn config_for(server: &MockServer) -> FetcherConfig {
    let yaml = format!(
        r#"
endpoint: "{}/v1/data"
timeout_secs: 5
user_agent: "integration-test"
headers:
  X-Test-Run: "yes"
"#,
        server.uri()
    );
    FetcherConfig::from_yaml_str(&yaml).unwrap()
}

// ============================================================================
// JSON Pagination
// ============================================================================

#[tokio::test]
async fn test_json_walk_from_yaml_config() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/data"))
        .and(query_param("page", "1"))
        .and(query_param("filters", "areaType=nation;areaName=england"))
        .and(query_param("structure", r#"{"date":"date","newCases":"newCasesByPublishDate"}"#))
        .and(header("X-Test-Run", "yes"))
        .and(header("User-Agent", "integration-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "length": 2,
            "data": [
                {"date": "2021-01-02", "newCases": 57725},
                {"date": "2021-01-01", "newCases": 53285}
            ],
            "pagination": {"current": "/v1/data?page=1", "next": "/v1/data?page=2"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/data"))
        .and(query_param("page", "2"))
        .and(header("X-Test-Run", "yes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "length": 1,
            "data": [{"date": "2020-12-31", "newCases": 55892}],
            "pagination": {"current": "/v1/data?page=2", "next": null}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let fetcher = DatasetFetcher::from_config(&config).unwrap();

    let records = fetcher
        .fetch_json(["areaType=nation", "areaName=england"], daily_structure())
        .await
        .unwrap();

    let dates: Vec<&str> = records
        .iter()
        .map(|r| r["date"].as_str().unwrap())
        .collect();
    assert_eq!(dates, vec!["2021-01-02", "2021-01-01", "2020-12-31"]);
}

#[tokio::test]
async fn test_latest_data_uses_region_defaults() {
    let server = MockServer::start().await;
    let structure_json = default_structure().to_compact_json().unwrap();

    Mock::given(method("GET"))
        .and(query_param("filters", "areaType=region"))
        .and(query_param("structure", structure_json.as_str()))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"areaName": "London"}, {"areaName": "North West"}],
            "pagination": {"next": null}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = DatasetFetcher::from_config(&config_for(&server)).unwrap();
    let records = fetcher.get_latest_data(None, None).await.unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[1]["areaName"], "North West");
}

// ============================================================================
// CSV Pagination
// ============================================================================

#[tokio::test]
async fn test_csv_walk_strips_repeated_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("format", "csv"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("date,newCases\n2021-01-02,57725\n"),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(query_param("format", "csv"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("date,newCases\n2021-01-01,53285\n"),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = DatasetFetcher::from_config(&config_for(&server)).unwrap();
    let query = Query::new(Filters::new().with("areaType=overview"), daily_structure()).csv();

    let (dataset, stats) = fetcher.fetch_with_stats(&query).await.unwrap();

    assert_eq!(
        dataset,
        Dataset::Csv("date,newCases\n2021-01-02,57725\n2021-01-01,53285".to_string())
    );
    assert_eq!(stats.requests, 3);
    assert_eq!(stats.pages, 2);
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn test_error_status_aborts_without_partial_data() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"date": "2021-01-02"}],
            "pagination": {"next": "/v1/data?page=2"}
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(429).set_body_string("Too many requests"))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = DatasetFetcher::from_config(&config_for(&server)).unwrap();
    let err = fetcher
        .fetch_json(["areaType=nation"], daily_structure())
        .await
        .unwrap_err();

    match err {
        Error::Request { status, body } => {
            assert_eq!(status, 429);
            assert_eq!(body, "Too many requests");
        }
        other => panic!("Expected request error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_filters_send_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let fetcher = DatasetFetcher::from_config(&config_for(&server)).unwrap();
    let result = fetcher.fetch_json(Filters::new(), daily_structure()).await;

    assert!(matches!(result, Err(Error::Config { .. })));
}

// ============================================================================
// Boundaries
// ============================================================================

#[tokio::test]
async fn test_boundary_cache_file_is_reused() {
    let dir = tempfile::tempdir().unwrap();

    let loader = BoundaryLoader::new(HttpClient::new().unwrap(), dir.path());
    let cached = json!({"type": "FeatureCollection", "features": []});
    std::fs::write(loader.cache_path(&REGIONS), cached.to_string()).unwrap();

    let data = loader.load(&REGIONS).await.unwrap();
    assert_eq!(data, cached);
}
