/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for iamport-adapter tests

#![allow(dead_code)]

use std::time::Duration;

use iamport_adapter::{ClientConfig, Credentials, IamportClient};
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_TOKEN: &str = "a1b2c3d4e5f6";

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

pub fn test_credentials() -> Credentials {
    Credentials::new("imp_apikey", "ekKoeW8RyKuT0zgaZsUtXXTLQ4AhPFW")
}

/// Client pointed at the mock server
pub fn client_for(server: &MockServer) -> IamportClient {
    IamportClient::with_config(
        test_credentials(),
        ClientConfig::default().with_base_url(server.uri()),
    )
    .expect("client init")
}

/// Unique merchant order id
pub fn merchant_uid() -> String {
    format!("order_{}", uuid::Uuid::new_v4().simple())
}

/// Envelope body the gateway sends on success
pub fn envelope(response: Value) -> Value {
    json!({
        "code": 0,
        "message": null,
        "response": response,
    })
}

/// Token response valid for half an hour
pub fn token_template(token: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(envelope(json!({
        "access_token": token,
        "expired_at": chrono::Utc::now().timestamp() + 1800,
        "now": chrono::Utc::now().timestamp(),
    })))
}

/// Mount the token exchange, asserting it is hit exactly `times` times
pub async fn mount_token(server: &MockServer, times: u64) {
    Mock::given(method("POST"))
        .and(path("/users/getToken"))
        .respond_with(token_template(TEST_TOKEN))
        .expect(times)
        .mount(server)
        .await;
}

/// Same as [`mount_token`] but the gateway answers slowly
pub async fn mount_slow_token(server: &MockServer, times: u64, delay: Duration) {
    Mock::given(method("POST"))
        .and(path("/users/getToken"))
        .respond_with(token_template(TEST_TOKEN).set_delay(delay))
        .expect(times)
        .mount(server)
        .await;
}
