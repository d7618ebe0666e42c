//! Registry client behavior: payloads, status mapping, configuration.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use nydos_crawler::config::api::{DETAIL_PATH, SEARCH_PATH};
use nydos_crawler::models::{EntityIdentifier, SearchRequest};
use nydos_crawler::{ClientError, Config, RegistryApi, RegistryClient};

fn setup_client(server: &MockServer) -> RegistryClient {
    let config = Config::for_testing(&server.uri(), "unused");
    RegistryClient::new(&config).unwrap()
}

async fn mount_search_status(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("POST")).and(path(SEARCH_PATH)).respond_with(template).mount(server).await;
}

// =============================================================================
// Payloads
// =============================================================================

#[tokio::test]
async fn test_detail_request_uses_quoted_identifier() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(DETAIL_PATH))
        .and(body_json(json!({"SearchID": "5551212", "EntityName": "", "AssumedNameFlag": "false"})))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    let client = setup_client(&server);
    let body = client.get_entity_record(EntityIdentifier::new(5_551_212)).await.unwrap();
    assert_eq!(body, b"{}");
}

#[tokio::test]
async fn test_search_returns_raw_bytes_untouched() {
    let server = MockServer::start().await;
    // Not valid JSON on purpose: the client never parses.
    let raw: &[u8] = b"\x00\xffnot json";
    mount_search_status(&server, ResponseTemplate::new(200).set_body_bytes(raw)).await;

    let client = setup_client(&server);
    let body = client.search_entities(&SearchRequest::name_contains("abc")).await.unwrap();
    assert_eq!(body, raw);
}

// =============================================================================
// Status Mapping
// =============================================================================

#[tokio::test]
async fn test_rate_limit_429() {
    let server = MockServer::start().await;
    mount_search_status(
        &server,
        ResponseTemplate::new(429).insert_header("Retry-After", "30").set_body_string("slow down"),
    )
    .await;

    let err = setup_client(&server)
        .search_entities(&SearchRequest::name_contains("abc"))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::RateLimited { retry_after } if retry_after == Duration::from_secs(30)));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_not_found_404() {
    let server = MockServer::start().await;
    mount_search_status(&server, ResponseTemplate::new(404).set_body_string("no such route")).await;

    let err = setup_client(&server)
        .search_entities(&SearchRequest::name_contains("abc"))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::NotFound { ref resource } if resource == "no such route"));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_bad_request_400() {
    let server = MockServer::start().await;
    mount_search_status(&server, ResponseTemplate::new(400).set_body_string("bad payload")).await;

    let err = setup_client(&server)
        .search_entities(&SearchRequest::name_contains("abc"))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::BadRequest { .. }));
    assert_eq!(err.status(), Some(400));
}

#[tokio::test]
async fn test_server_error_500() {
    let server = MockServer::start().await;
    mount_search_status(&server, ResponseTemplate::new(500).set_body_string("boom")).await;

    let err = setup_client(&server)
        .search_entities(&SearchRequest::name_contains("abc"))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Server { status: 500, .. }));
    assert!(err.to_string().contains("boom"));
}

#[tokio::test]
async fn test_unexpected_status() {
    let server = MockServer::start().await;
    mount_search_status(&server, ResponseTemplate::new(418)).await;

    let err = setup_client(&server)
        .search_entities(&SearchRequest::name_contains("abc"))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::UnexpectedStatus { status: 418, .. }));
}

#[tokio::test]
async fn test_unreachable_host_is_transport_error() {
    // Port 9 (discard) on localhost is not served by the mock.
    let config = Config::for_testing("http://127.0.0.1:9", "unused");
    let client = RegistryClient::new(&config).unwrap();

    let err = client.search_entities(&SearchRequest::name_contains("abc")).await.unwrap_err();

    assert!(matches!(err, ClientError::Http(_)));
    assert_eq!(err.status(), None);
}

// =============================================================================
// Construction
// =============================================================================

#[test]
fn test_client_creation_succeeds() {
    assert!(RegistryClient::new(&Config::default()).is_ok());
}

#[test]
fn test_client_uses_configured_endpoints() {
    let config = Config::for_testing("http://localhost:8080", "out");
    let client = RegistryClient::new(&config).unwrap();
    assert_eq!(client.search_url(), format!("http://localhost:8080{SEARCH_PATH}"));
    assert_eq!(client.detail_url(), format!("http://localhost:8080{DETAIL_PATH}"));

    let debug = format!("{client:?}");
    assert!(debug.contains("RegistryClient"));
    assert!(debug.contains("GetEntityRecordByID"));
}
