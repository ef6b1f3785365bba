//! Integration tests for the OAuth authorization code flow.
//!
//! The token exchange is verified against a local mock server standing in
//! for the Mixcloud OAuth endpoints.

use mixcloud_api::{ClientId, ClientSecret, MixcloudOAuth, OAuthError, RootUrl};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn oauth_for(server: &MockServer) -> MixcloudOAuth {
    MixcloudOAuth::new(
        ClientId::new("my-client").unwrap(),
        "https://example.com/callback",
    )
    .client_secret(ClientSecret::new("my-secret").unwrap())
    .oauth_root(RootUrl::new(format!("{}/oauth", server.uri())).unwrap())
}

#[tokio::test]
async fn test_authorization_url_points_at_server() {
    let server = MockServer::start().await;
    let url = oauth_for(&server).authorization_url();

    assert_eq!(
        url,
        format!(
            "{}/oauth/authorize?client_id=my-client&redirect_uri=https%3A%2F%2Fexample.com%2Fcallback",
            server.uri()
        )
    );
}

#[tokio::test]
async fn test_access_token_exchange_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/oauth/access_token"))
        .and(query_param("client_id", "my-client"))
        .and(query_param("client_secret", "my-secret"))
        .and(query_param("redirect_uri", "https://example.com/callback"))
        .and(query_param("code", "the-code"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"access_token": "fresh-token"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let token = oauth_for(&server).access_token("the-code").await.unwrap();

    assert_eq!(token.as_ref(), "fresh-token");
}

#[tokio::test]
async fn test_refused_code_is_authorization_failed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/oauth/access_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "Invalid code"})))
        .mount(&server)
        .await;

    let result = oauth_for(&server).access_token("stale").await;

    match result {
        Err(OAuthError::AuthorizationFailed { message }) => assert_eq!(message, "Invalid code"),
        other => panic!("expected AuthorizationFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_structured_error_uses_its_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/oauth/access_token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {"type": "OAuthException", "message": "Code expired"}
        })))
        .mount(&server)
        .await;

    let result = oauth_for(&server).access_token("old").await;

    assert!(matches!(
        result,
        Err(OAuthError::AuthorizationFailed { message }) if message == "Code expired"
    ));
}

#[tokio::test]
async fn test_server_failure_is_token_request_failed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/oauth/access_token"))
        .respond_with(ResponseTemplate::new(503).set_body_raw("Maintenance", "text/plain"))
        .mount(&server)
        .await;

    let result = oauth_for(&server).access_token("code").await;

    match result {
        Err(OAuthError::TokenRequestFailed { status, message }) => {
            assert_eq!(status, 503);
            assert_eq!(message, "Maintenance");
        }
        other => panic!("expected TokenRequestFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_secret_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let oauth = MixcloudOAuth::new(ClientId::new("my-client").unwrap(), "https://example.com/cb")
        .oauth_root(RootUrl::new(format!("{}/oauth", server.uri())).unwrap());

    assert!(matches!(
        oauth.access_token("code").await,
        Err(OAuthError::MissingClientSecret)
    ));
}
