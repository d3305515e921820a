//! Bearer-token attachment on API calls.

use myswipe_dashboard::api::AuthToken;
use serde_json::json;
use wiremock::matchers::{header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use myswipe_integration_tests::test_api_client;

#[tokio::test]
async fn cached_session_token_is_attached_as_bearer() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/seller/kyc"))
        .and(header("authorization", "Bearer sess-abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "in_progress"})))
        .expect(1)
        .mount(&server)
        .await;

    let api = test_api_client(&server.uri());
    api.set_token(AuthToken::new("sess-abc123")).await;
    assert!(api.has_token().await);

    api.kyc_status().await.expect("authenticated call succeeds");
}

#[tokio::test]
async fn missing_token_still_attempts_the_call_unauthenticated() {
    let server = MockServer::start().await;

    // The server decides authorization; the client must not pre-empt it.
    Mock::given(method("GET"))
        .and(path("/v1/seller/kyc"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "verified"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/seller/kyc"))
        .respond_with(ResponseTemplate::new(401).set_body_string("missing bearer token"))
        .expect(1)
        .mount(&server)
        .await;

    let api = test_api_client(&server.uri());
    let err = api.kyc_status().await.expect_err("unauthenticated call is rejected upstream");
    assert_eq!(err.to_string(), "missing bearer token");
}

#[tokio::test]
async fn clearing_the_token_logs_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/seller/kyc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "not_started"})))
        .mount(&server)
        .await;

    let api = test_api_client(&server.uri());
    api.set_token(AuthToken::new("sess-abc123")).await;
    api.clear_token().await;
    assert!(!api.has_token().await);

    // Call still goes through, now without credentials.
    api.kyc_status().await.expect("call succeeds");
    let requests = server.received_requests().await.expect("recording enabled");
    assert!(
        requests
            .iter()
            .all(|r| !r.headers.contains_key("authorization"))
    );
}
