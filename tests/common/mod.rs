#![allow(dead_code)]

use std::sync::Arc;

use jiff::Timestamp;
use servicetitan_client::clock::ManualClock;
use servicetitan_client::{Config, ServiceTitanClient};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN_PATH: &str = "/connect/token";
pub const TENANT: &str = "123456";

pub fn base_config(server_uri: &str) -> Config {
    Config::new("client-id", "client-secret", "app-key")
        .with_auth_url(format!("{server_uri}{TOKEN_PATH}"))
        .with_base_url(server_uri)
        .with_tenant(TENANT)
}

pub fn token_body(token: &str, expires_in: u64) -> serde_json::Value {
    serde_json::json!({
        "access_token": token,
        "token_type": "Bearer",
        "expires_in": expires_in,
    })
}

/// Token endpoint answering every exchange with the same token.
pub async fn mount_token(server: &MockServer, token: &str, expires_in: u64, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body(token, expires_in)))
        .expect(expected_calls)
        .mount(server)
        .await;
}

pub fn fixed_clock() -> ManualClock {
    ManualClock::new(Timestamp::from_second(1_762_500_000).unwrap())
}

pub fn client_with_clock(server: &MockServer, clock: &ManualClock) -> ServiceTitanClient {
    ServiceTitanClient::builder(base_config(&server.uri()))
        .clock(Arc::new(clock.clone()))
        .build()
        .expect("client builds")
}
