//! Integration tests for the HTTP client.

use std::time::Duration;

use forty_rules_net::NetworkError;
use forty_rules_net::http::{DEFAULT_TIMEOUT, HttpClient, HttpClientBuilder};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test]
fn test_client_creation() {
    let client = HttpClient::new().expect("Failed to build client");
    assert_eq!(client.timeout(), DEFAULT_TIMEOUT);
}

#[test]
fn test_request_builder_chain() {
    let client = HttpClientBuilder::new()
        .timeout(Duration::from_secs(60))
        .build()
        .expect("Failed to build client");

    let request = client
        .get("https://example.com/api")
        .header("Accept", "application/json")
        .query("page", "1")
        .query("limit", "10")
        .bearer_auth("token")
        .build();

    assert_eq!(request.url, "https://example.com/api");
    assert_eq!(request.headers.len(), 1);
    assert_eq!(request.query.len(), 2);
    assert_eq!(request.bearer.as_deref(), Some("token"));
    assert_eq!(client.timeout(), Duration::from_secs(60));
}

#[tokio::test]
async fn test_get_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/test"))
        .and(query_param("q", "love"))
        .and(header("authorization", "Bearer token123"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Hello, World!"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HttpClient::new().expect("Failed to build client");
    let response = client
        .get(format!("{}/test", mock_server.uri()))
        .query("q", "love")
        .bearer_auth("token123")
        .send()
        .await
        .expect("Request failed");

    assert_eq!(response.status(), 200);
    assert!(response.is_success());

    let body = response.text().await.expect("Failed to read body");
    assert_eq!(body, "Hello, World!");
}

#[tokio::test]
async fn test_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&mock_server)
        .await;

    let client = HttpClient::builder()
        .timeout(Duration::from_millis(100))
        .build()
        .expect("Failed to build client");

    let result = client.get(format!("{}/slow", mock_server.uri())).send().await;

    assert_eq!(result.unwrap_err(), NetworkError::Timeout);
}

#[tokio::test]
async fn test_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/not-found"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&mock_server)
        .await;

    let client = HttpClient::new().expect("Failed to build client");
    let response = client
        .get(format!("{}/not-found", mock_server.uri()))
        .send()
        .await
        .expect("Request failed");

    assert_eq!(response.status(), 404);
    assert!(!response.is_success());

    let err = response.error_for_status_with_body().await.unwrap_err();
    assert_eq!(
        err,
        NetworkError::HttpStatus {
            status: 404,
            message: Some("Not Found".to_string()),
        }
    );
}

#[tokio::test]
async fn test_success_passes_through_to_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ids"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([1, 2, 3])))
        .mount(&mock_server)
        .await;

    let client = HttpClient::new().expect("Failed to build client");
    let ids: Vec<i64> = client
        .get(format!("{}/ids", mock_server.uri()))
        .send()
        .await
        .expect("Request failed")
        .error_for_status_with_body()
        .await
        .expect("2xx passes through")
        .json()
        .await
        .expect("Failed to decode");

    assert_eq!(ids, vec![1, 2, 3]);
}
