use std::time::{Duration, Instant};

use jiff::SignedDuration;
use reqwest::StatusCode;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use servicetitan_client::token::RefreshPolicy;
use servicetitan_client::{AuthError, Config, Error, RequestOptions, ServiceTitanClient};

use crate::common::{TOKEN_PATH, base_config, client_with_clock, fixed_clock};

#[tokio::test]
async fn token_exchange_posts_client_credentials_form() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("grant_type=client_credentials"))
        .and(body_string_contains("client_id=client-id"))
        .and(body_string_contains("client_secret=client-secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "tok-1",
            "expires_in": 3600,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let clock = fixed_clock();
    let client = client_with_clock(&server, &clock);
    let token = client.access_token().await.expect("token");
    assert_eq!(token, "tok-1");

    let cred = client.credential().await.expect("stored credential");
    assert_eq!(
        cred.issued_at().duration_until(cred.expires_at()),
        SignedDuration::from_secs(3600)
    );
}

#[tokio::test]
async fn missing_or_unusable_expires_in_defaults_to_900() {
    for body in [
        serde_json::json!({"access_token": "tok"}),
        serde_json::json!({"access_token": "tok", "expires_in": "3600"}),
        serde_json::json!({"access_token": "tok", "expires_in": -5}),
    ] {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(TOKEN_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let clock = fixed_clock();
        let client = client_with_clock(&server, &clock);
        client.access_token().await.expect("token");
        let cred = client.credential().await.expect("stored credential");
        assert_eq!(
            cred.issued_at().duration_until(cred.expires_at()),
            SignedDuration::from_secs(900)
        );
    }
}

#[tokio::test]
async fn rejected_exchange_carries_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad client"))
        .mount(&server)
        .await;

    let client = ServiceTitanClient::new(base_config(&server.uri())).unwrap();
    match client.access_token().await.unwrap_err() {
        Error::Auth(AuthError::Rejected { status, body }) => {
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body.to_string(), "bad client");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn unreachable_auth_server_is_an_auth_transport_error() {
    let config = Config::new("id", "secret", "key")
        .with_auth_url("http://127.0.0.1:1/connect/token")
        .with_base_url("http://127.0.0.1:1");
    let client = ServiceTitanClient::new(config).unwrap();
    let err = client.access_token().await.unwrap_err();
    assert!(err.is_auth());
    assert!(matches!(err, Error::Auth(AuthError::Transport { .. })));
}

#[tokio::test]
async fn stalled_auth_server_times_out_the_exchange() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"access_token": "late", "expires_in": 900}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let policy = RefreshPolicy::default()
        .with_exchange_timeout(Duration::from_millis(200))
        .unwrap();
    let client = ServiceTitanClient::builder(base_config(&server.uri()))
        .refresh_policy(policy)
        .build()
        .unwrap();

    let started = Instant::now();
    let err = client
        .get("tenant/employees", &RequestOptions::new())
        .await
        .unwrap_err();
    assert!(started.elapsed() < Duration::from_secs(2), "exchange was not bounded");
    match err {
        Error::Auth(AuthError::Transport { source, .. }) => assert!(source.is_timeout()),
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(client.credential().await.is_none());
}

#[tokio::test]
async fn invalid_configuration_fails_before_any_network_access() {
    let server = MockServer::start().await;
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let empty_secret = Config::new("id", "", "key")
        .with_auth_url(format!("{}{TOKEN_PATH}", server.uri()))
        .with_base_url(server.uri());
    assert!(matches!(
        ServiceTitanClient::new(empty_secret),
        Err(Error::Config(_))
    ));

    let staging = base_config(&server.uri()).with_environment("staging");
    assert!(matches!(
        ServiceTitanClient::new(staging),
        Err(Error::Config(msg)) if msg.contains("staging")
    ));
}

#[tokio::test]
async fn unknown_local_timezone_is_a_config_error() {
    let config = Config::new("id", "secret", "key").with_local_timezone("Nowhere/Special");
    assert!(matches!(
        ServiceTitanClient::new(config),
        Err(Error::Config(_))
    ));
}
