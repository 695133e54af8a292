/*
[INPUT]:  Mock token exchange responses
[OUTPUT]: Test results for token caching and refresh
[POS]:    Integration tests - authentication
[UPDATE]: When token exchange or refresh policy changes
*/

mod common;

use std::time::Duration;

use chrono::Utc;
use common::{TEST_TOKEN, client_for, envelope, mount_slow_token, mount_token, setup_mock_server};
use futures_util::future::join_all;
use iamport_adapter::IamportError;
use serde_json::json;
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_token_reused_across_calls() {
    let server = setup_mock_server().await;
    mount_token(&server, 1).await;
    Mock::given(method("GET"))
        .and(path("/payments/imp_1"))
        .and(header("authorization", TEST_TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({"imp_uid": "imp_1"}))))
        .expect(3)
        .mount(&server)
        .await;

    let client = client_for(&server);
    for _ in 0..3 {
        assert_ok!(client.find_by_imp_uid("imp_1").await);
    }
}

#[tokio::test]
async fn test_seeded_token_outside_gap_is_used() {
    let server = setup_mock_server().await;
    mount_token(&server, 0).await;
    Mock::given(method("GET"))
        .and(path("/payments/imp_1"))
        .and(header("authorization", "seeded"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({}))))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client
        .token_manager()
        .set_token(
            "seeded".to_string(),
            Some(Utc::now() + chrono::Duration::seconds(600)),
        )
        .await;

    assert_ok!(client.find_by_imp_uid("imp_1").await);
}

#[tokio::test]
async fn test_token_inside_gap_is_renewed() {
    let server = setup_mock_server().await;
    mount_token(&server, 1).await;

    let client = client_for(&server);
    client
        .token_manager()
        .set_token(
            "about-to-expire".to_string(),
            Some(Utc::now() + chrono::Duration::seconds(30)),
        )
        .await;

    let token = assert_ok!(client.get_token().await);
    assert_eq!(token, TEST_TOKEN);
}

#[tokio::test]
async fn test_concurrent_callers_share_one_exchange() {
    let server = setup_mock_server().await;
    mount_slow_token(&server, 1, Duration::from_millis(200)).await;

    let client = client_for(&server);
    let tokens = join_all((0..8).map(|_| client.get_token())).await;

    for token in tokens {
        assert_eq!(assert_ok!(token), TEST_TOKEN);
    }
}

#[tokio::test]
async fn test_rejected_credentials_surface_as_auth_error() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/users/getToken"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/payments/imp_1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = assert_err!(client.find_by_imp_uid("imp_1").await);
    assert!(err.is_auth_error());
    match err {
        IamportError::Auth(inner) => {
            assert!(matches!(*inner, IamportError::Http { code: 401, .. }))
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
