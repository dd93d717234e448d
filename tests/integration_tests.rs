//! Integration tests for the Serper client
//!
//! Every test runs against a local mock server, so no API key or network
//! access is needed.

use serde_json::json;
use serper_search::{
    config::{ApiCredential, Config},
    error::{ErrorKind, SearchError},
    format::{ENTRY_DELIMITER, NO_RESULTS_MESSAGE},
    search_internet, web_search, SerperClient,
};
use std::time::Duration;
use wiremock::{
    matchers::{body_json, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

const TEST_KEY: &str = "test-serper-key";

fn organic_entry(i: usize) -> serde_json::Value {
    json!({
        "title": format!("Result {i}"),
        "link": format!("https://example.com/{i}"),
        "snippet": format!("Snippet for result {i}"),
        "position": i
    })
}

fn organic_response(count: usize) -> serde_json::Value {
    json!({
        "searchParameters": {"q": "rust", "type": "search", "engine": "google"},
        "organic": (1..=count).map(organic_entry).collect::<Vec<_>>()
    })
}

fn client_for(server: &MockServer) -> SerperClient {
    let config = Config::new(ApiCredential::new(TEST_KEY).unwrap())
        .with_endpoint(&format!("{}/search", server.uri()));
    SerperClient::new(&config).unwrap()
}

async fn mount_json(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_request_shape() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .and(header("X-API-KEY", TEST_KEY))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"q": "rust programming"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(organic_response(1)))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let results = web_search(&client, "rust programming").await.unwrap();
    assert_eq!(results.len(), 1);
}

#[tokio::test]
async fn test_six_entries_yield_four_blocks_in_order() {
    let server = MockServer::start().await;
    mount_json(&server, organic_response(6)).await;

    let client = client_for(&server);
    let text = search_internet(&client, "rust").await;

    assert_eq!(text.matches(ENTRY_DELIMITER).count(), 4);
    let positions: Vec<usize> = (1..=4)
        .map(|i| text.find(&format!("**Result {i}**")).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
    assert!(!text.contains("Result 5"));
    assert!(!text.contains("Result 6"));
}

#[tokio::test]
async fn test_fewer_than_four_entries() {
    for count in 0..=3 {
        let server = MockServer::start().await;
        mount_json(&server, organic_response(count)).await;

        let client = client_for(&server);
        let results = web_search(&client, "rust").await.unwrap();
        assert_eq!(results.len(), count);

        let text = search_internet(&client, "rust").await;
        assert_eq!(text.matches(ENTRY_DELIMITER).count(), count);
    }
}

#[tokio::test]
async fn test_entry_missing_snippet_is_excluded() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        json!({
            "organic": [
                organic_entry(1),
                {"title": "Partial", "link": "https://example.com/partial"},
                organic_entry(3)
            ]
        }),
    )
    .await;

    let client = client_for(&server);
    let text = search_internet(&client, "rust").await;

    assert!(!text.contains("Partial"));
    assert!(!text.contains("https://example.com/partial"));
    assert_eq!(text.matches(ENTRY_DELIMITER).count(), 2);
    assert!(text.contains("**Result 1**"));
    assert!(text.contains("**Result 3**"));
}

#[tokio::test]
async fn test_all_entries_malformed_gives_empty_text() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        json!({
            "organic": [
                {"title": "a"},
                {"link": "https://b.example"},
                {"snippet": "c"},
                {"title": "d", "link": "https://d.example"},
                organic_entry(5)
            ]
        }),
    )
    .await;

    let client = client_for(&server);
    assert_eq!(search_internet(&client, "rust").await, "");
}

#[tokio::test]
async fn test_missing_organic_field_gives_apology() {
    let server = MockServer::start().await;
    mount_json(&server, json!({"other_field": []})).await;

    let client = client_for(&server);
    assert_eq!(search_internet(&client, "rust").await, NO_RESULTS_MESSAGE);

    let error = web_search(&client, "rust").await.unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Provider);
}

#[tokio::test]
async fn test_rejected_key_gives_apology() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({"message": "Unauthorized.", "statusCode": 403})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert_eq!(search_internet(&client, "rust").await, NO_RESULTS_MESSAGE);

    match web_search(&client, "rust").await.unwrap_err() {
        SearchError::ProviderError { message, status_code } => {
            assert_eq!(message, "Unauthorized.");
            assert_eq!(status_code, Some(403));
        }
        other => panic!("Expected ProviderError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_non_json_body_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let error = web_search(&client, "rust").await.unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Decode);

    let text = search_internet(&client, "rust").await;
    assert!(text.starts_with("Search failed: "), "got {text}");
}

#[tokio::test]
async fn test_server_error_with_plain_body_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let error = web_search(&client, "rust").await.unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Transport);
    assert_eq!(error.status_code(), Some(502));
}

#[tokio::test]
async fn test_timeout_is_reported_as_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(organic_response(4))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let config = Config::new(ApiCredential::new(TEST_KEY).unwrap())
        .with_endpoint(&server.uri())
        .with_timeout_ms(50);
    let client = SerperClient::new(&config).unwrap();

    let text = search_internet(&client, "rust").await;
    assert!(text.starts_with("Search failed: "), "got {text}");
    assert!(text.contains("timeout"), "got {text}");
}

#[tokio::test]
async fn test_unreachable_provider_is_reported_as_text() {
    // Nothing listens on port 1
    let config = Config::new(ApiCredential::new(TEST_KEY).unwrap())
        .with_endpoint("http://127.0.0.1:1/search")
        .with_timeout_ms(2_000);
    let client = SerperClient::new(&config).unwrap();

    let error = web_search(&client, "rust").await.unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Transport);

    let text = search_internet(&client, "rust").await;
    assert!(text.starts_with("Search failed: "), "got {text}");
}

#[tokio::test]
async fn test_repeated_queries_are_identical() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(organic_response(5)))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let first = search_internet(&client, "same query").await;
    let second = search_internet(&client, "same query").await;

    assert_eq!(first, second);
    assert!(!first.is_empty());
}

#[tokio::test]
async fn test_max_results_override() {
    let server = MockServer::start().await;
    mount_json(&server, organic_response(8)).await;

    let client = client_for(&server).with_max_results(6);
    let results = web_search(&client, "rust").await.unwrap();

    let titles: Vec<_> = results.iter().map(|r| r.title.clone()).collect();
    assert_eq!(titles, (1..=6).map(|i| format!("Result {i}")).collect::<Vec<_>>());
}
