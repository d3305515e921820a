//! Bounded polling flows against the mocked backend.
//!
//! Interval/exhaustion/cancellation timing is covered by the unit tests
//! of `poll_until`; these tests exercise the terminal conditions of the
//! real endpoints.

use myswipe_core::KycStatus;
use myswipe_dashboard::tasks::{self, PollOutcome};
use serde_json::json;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use myswipe_integration_tests::test_api_client;

#[tokio::test]
async fn boost_activation_completes_on_confirmed_payment() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/boosts/activate"))
        .and(body_json(json!({"session_id": "cs_123"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "created": [
                {"id": "b_1", "product_id": "p_1", "status": "active"},
                {"id": null, "product_id": "p_2", "status": "already_active"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = test_api_client(&server.uri());
    let token = CancellationToken::new();
    let outcome = tasks::wait_for_boost_activation(&api, "cs_123", &token).await;
    assert_eq!(outcome, PollOutcome::Completed(1));
}

#[tokio::test]
async fn boost_activation_with_no_new_boosts_is_still_terminal() {
    // The webhook may have activated everything already; an OK response
    // with zero newly active boosts must not keep polling.
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/boosts/activate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"created": []})))
        .expect(1)
        .mount(&server)
        .await;

    let api = test_api_client(&server.uri());
    let token = CancellationToken::new();
    let outcome = tasks::wait_for_boost_activation(&api, "cs_456", &token).await;
    assert_eq!(outcome, PollOutcome::Completed(0));
}

#[tokio::test]
async fn kyc_poll_completes_on_terminal_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/seller/kyc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "verified"})))
        .expect(1)
        .mount(&server)
        .await;

    let api = test_api_client(&server.uri());
    let token = CancellationToken::new();
    let outcome = tasks::wait_for_kyc_decision(&api, &token).await;
    assert_eq!(outcome, PollOutcome::Completed(KycStatus::Verified));
}

#[tokio::test]
async fn cancelled_poll_makes_no_request() {
    let server = MockServer::start().await;

    let api = test_api_client(&server.uri());
    let token = CancellationToken::new();
    token.cancel();

    let outcome = tasks::wait_for_kyc_decision(&api, &token).await;
    assert_eq!(outcome, PollOutcome::Cancelled);

    let requests = server.received_requests().await.expect("recording enabled");
    assert!(requests.is_empty(), "a torn-down view must not poll");
}
