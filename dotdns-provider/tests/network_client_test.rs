//! `NetworkClient` against a local HTTP server

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use std::sync::Arc;

use dotdns_provider::{
    CloudflareCredentials, CloudflareProvider, ConnectivityMonitor, DnsProvider, NetworkClient,
    NetworkError, Provider, ProviderError, ProviderType, ReqwestTransport,
};
use reqwest::Method;
use serde::Deserialize;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Deserialize)]
struct Pong {
    ok: bool,
}

fn client() -> NetworkClient {
    NetworkClient::new(
        Arc::new(ReqwestTransport::new().unwrap()),
        ConnectivityMonitor::new(),
    )
}

async fn get(server: &MockServer, route: &str) -> Result<Pong, NetworkError> {
    client()
        .request(&format!("{}{route}", server.uri()), Method::GET, &[], None)
        .await
}

#[tokio::test]
async fn success_body_is_decoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"ok":true}"#))
        .mount(&server)
        .await;

    let pong = get(&server, "/ping").await.unwrap();
    assert!(pong.ok);
}

#[tokio::test]
async fn not_found_maps_to_dns_resolution_failed() {
    let server = MockServer::start().await;
    Mock::given(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    assert_eq!(
        get(&server, "/missing").await.unwrap_err(),
        NetworkError::DnsResolutionFailed
    );
}

#[tokio::test]
async fn other_statuses_keep_their_code() {
    let server = MockServer::start().await;
    Mock::given(path("/boom"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(path("/busy"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    assert_eq!(
        get(&server, "/boom").await.unwrap_err(),
        NetworkError::ServerError(500)
    );
    assert_eq!(
        get(&server, "/busy").await.unwrap_err(),
        NetworkError::ServerError(429)
    );
}

#[tokio::test]
async fn missing_key_is_described() {
    let server = MockServer::start().await;
    Mock::given(path("/ping"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .mount(&server)
        .await;

    match get(&server, "/ping").await {
        Err(NetworkError::DecodingError(detail)) => {
            assert!(detail.starts_with("Key 'ok' not found"), "{detail}");
        }
        other => panic!("expected decoding error, got {other:?}"),
    }
}

#[tokio::test]
async fn invalid_url_is_reported() {
    let result: Result<Pong, _> = client().request("not a url", Method::GET, &[], None).await;
    assert_eq!(result.unwrap_err(), NetworkError::InvalidUrl);
}

#[tokio::test]
async fn offline_monitor_blocks_before_sending() {
    let server = MockServer::start().await;
    Mock::given(path("/ping"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"ok":true}"#))
        .expect(0)
        .mount(&server)
        .await;

    let client = client();
    client
        .connectivity()
        .report(dotdns_provider::PathStatus::Unsatisfied);

    let result: Result<Pong, _> = client
        .request(&format!("{}/ping", server.uri()), Method::GET, &[], None)
        .await;
    assert_eq!(result.unwrap_err(), NetworkError::NoInternetConnection);
}

#[tokio::test]
async fn cloudflare_client_over_real_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/client/v4/zones"))
        .and(query_param("page", "1"))
        .and(header("Authorization", "Bearer live-token"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"success":true,"errors":[],"messages":[],
                "result":[{"id":"z1","name":"example.com","status":"active"}],
                "result_info":{"page":1,"total_pages":1}}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let provider = CloudflareProvider::with_base_url(
        Arc::new(client()),
        CloudflareCredentials::with_token("live-token"),
        format!("{}/client/v4/", server.uri()),
    );
    let owner = Provider::new("Cloudflare", ProviderType::Cloudflare);

    let domains = provider.get_domains(&owner).await.unwrap();
    assert_eq!(domains.len(), 1);
    assert_eq!(domains[0].name, "example.com");

    let err: ProviderError = provider
        .list_records(&domains[0])
        .await
        .unwrap_err();
    // unmatched routes answer 404
    assert_eq!(
        err,
        ProviderError::NetworkError(NetworkError::DnsResolutionFailed)
    );
}
