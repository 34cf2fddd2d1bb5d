//! The Supabase source against a mock PostgREST endpoint.

use std::time::Duration;

use forty_rules::config::SourceConfig;
use forty_rules::source::{DataUnavailable, RulesSource, SupabaseRulesSource};
use forty_rules_net::NetworkError;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ANON_KEY: &str = "anon-test-key";

fn source_for(server: &MockServer) -> SupabaseRulesSource {
    SupabaseRulesSource::new(&SourceConfig::new(server.uri(), ANON_KEY))
}

#[tokio::test]
async fn test_fetch_sends_credentials_and_sorts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/rules"))
        .and(query_param("select", "*"))
        .and(query_param("order", "id.asc"))
        .and(header("apikey", ANON_KEY))
        .and(header("authorization", format!("Bearer {ANON_KEY}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 3, "rule": "third", "created_at": "2024-01-01T00:00:00Z" },
            { "id": 1, "rule": "first", "page": 12 },
            { "id": 2, "quote": "second", "rule_number": 2 }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let rules = source_for(&server).fetch_all_rules().await.unwrap();

    let ids: Vec<i64> = rules.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(rules[0].page, Some(12));
    assert_eq!(rules[1].text(), "second");
}

#[tokio::test]
async fn test_blank_rows_are_skipped_and_rule_column_preferred() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/rules"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "rule": "a", "quote": "a" },
            { "id": 2, "rule": "" },
            { "id": 3, "rule": "kept", "quote": "ignored" },
            { "id": 4, "quote": "   " }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let rules = source_for(&server).fetch_all_rules().await.unwrap();

    let ids: Vec<i64> = rules.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 3]);
    assert_eq!(rules[1].text(), "kept");
}

#[tokio::test]
async fn test_custom_table_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/forty_rules"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = SourceConfig::new(format!("{}/", server.uri()), ANON_KEY);
    config.table = "forty_rules".to_string();
    let rules = SupabaseRulesSource::new(&config).fetch_all_rules().await.unwrap();
    assert!(rules.is_empty());
}

#[tokio::test]
async fn test_server_error_is_remote_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/rules"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    let err = source_for(&server).fetch_all_rules().await.unwrap_err();
    match err {
        DataUnavailable::Remote(NetworkError::HttpStatus { status, .. }) => assert_eq!(status, 500),
        other => panic!("expected remote status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_rows_are_remote_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/rules"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "not a list" })))
        .mount(&server)
        .await;

    let err = source_for(&server).fetch_all_rules().await.unwrap_err();
    assert!(matches!(err, DataUnavailable::Remote(NetworkError::Json(_))));
}

#[tokio::test]
async fn test_slow_server_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/rules"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let mut config = SourceConfig::new(server.uri(), ANON_KEY);
    config.timeout = Duration::from_millis(200);
    let err = SupabaseRulesSource::new(&config)
        .fetch_all_rules()
        .await
        .unwrap_err();
    assert!(matches!(err, DataUnavailable::Remote(NetworkError::Timeout)));
}

#[tokio::test]
async fn test_unconfigured_source_fails_without_request() {
    let source = SupabaseRulesSource::new(&SourceConfig::default());
    assert!(!source.is_configured());

    let err = source.fetch_all_rules().await.unwrap_err();
    assert!(err.is_not_configured());
    assert_eq!(
        err,
        DataUnavailable::NotConfigured {
            missing: vec!["SUPABASE_URL", "SUPABASE_ANON_KEY"],
        }
    );
}
