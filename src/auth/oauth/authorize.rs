//! Authorization URLs and the code-for-token exchange.
//!
//! An application sends its user to [`MixcloudOAuth::authorization_url`].
//! Once the user allows access, Mixcloud redirects them to the application's
//! redirect URI with a `code` query parameter, which
//! [`MixcloudOAuth::access_token`] trades for an access token.

use std::sync::Arc;

use crate::auth::oauth::error::OAuthError;
use crate::clients::api::Mixcloud;
use crate::clients::{HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::config::{AccessToken, ClientId, ClientSecret, MixcloudConfig, RootUrl};

/// OAuth helper for a Mixcloud application.
///
/// # Example
///
/// ```rust
/// use mixcloud_api::auth::oauth::MixcloudOAuth;
/// use mixcloud_api::ClientId;
///
/// let oauth = MixcloudOAuth::new(
///     ClientId::new("my-client-id").unwrap(),
///     "https://example.com/callback",
/// );
///
/// assert_eq!(
///     oauth.authorization_url(),
///     "https://www.mixcloud.com/oauth/authorize?client_id=my-client-id&redirect_uri=https%3A%2F%2Fexample.com%2Fcallback"
/// );
/// ```
#[derive(Clone, Debug)]
pub struct MixcloudOAuth {
    oauth_root: RootUrl,
    client_id: ClientId,
    client_secret: Option<ClientSecret>,
    redirect_uri: String,
    transport: Option<Arc<dyn Transport>>,
}

// Verify MixcloudOAuth is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<MixcloudOAuth>();
};

impl MixcloudOAuth {
    /// Creates a helper for the application `client_id`, redirecting users
    /// to `redirect_uri`.
    #[must_use]
    pub fn new(client_id: ClientId, redirect_uri: impl Into<String>) -> Self {
        Self {
            oauth_root: MixcloudConfig::default().oauth_root().clone(),
            client_id,
            client_secret: None,
            redirect_uri: redirect_uri.into(),
            transport: None,
        }
    }

    /// Sets the client secret, needed by [`access_token`](Self::access_token).
    #[must_use]
    pub fn client_secret(mut self, secret: ClientSecret) -> Self {
        self.client_secret = Some(secret);
        self
    }

    /// Overrides the OAuth root URL.
    #[must_use]
    pub fn oauth_root(mut self, root: RootUrl) -> Self {
        self.oauth_root = root;
        self
    }

    /// Sends the token request through `transport`.
    #[must_use]
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Sends the token request through the session of `mixcloud`.
    #[must_use]
    pub fn mixcloud(self, mixcloud: &Mixcloud) -> Self {
        self.transport(mixcloud.transport())
    }

    /// Returns the client ID.
    #[must_use]
    pub const fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    /// Returns the redirect URI.
    #[must_use]
    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    /// Returns the URL to send users to for authorizing the application.
    #[must_use]
    pub fn authorization_url(&self) -> String {
        let params = [
            ("client_id", self.client_id.as_ref()),
            ("redirect_uri", self.redirect_uri.as_str()),
        ];

        let query_string = params
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        format!("{}?{}", self.oauth_root.join("authorize"), query_string)
    }

    /// Trades the OAuth `code` for an access token.
    ///
    /// Without a configured transport a new HTTP session is created for the
    /// request and dropped afterwards.
    ///
    /// # Errors
    ///
    /// - [`OAuthError::MissingClientSecret`] without a client secret, before
    ///   any request is made
    /// - [`OAuthError::AuthorizationFailed`] if the server answers without a
    ///   token
    /// - [`OAuthError::TokenRequestFailed`] for other failed responses
    /// - [`OAuthError::HttpError`] if the request cannot be sent
    pub async fn access_token(&self, code: &str) -> Result<AccessToken, OAuthError> {
        let secret = self
            .client_secret
            .as_ref()
            .ok_or(OAuthError::MissingClientSecret)?;

        let transport: Arc<dyn Transport> = match &self.transport {
            Some(transport) => Arc::clone(transport),
            None => Arc::new(HttpClient::new(&MixcloudConfig::default())?),
        };

        let request = HttpRequest::builder(HttpMethod::Get, self.oauth_root.join("access_token"))
            .query_param("client_id", self.client_id.as_ref())
            .query_param("redirect_uri", self.redirect_uri.as_str())
            .query_param("client_secret", secret.as_ref())
            .query_param("code", code)
            .build()
            .map_err(HttpError::from)?;

        tracing::debug!(client_id = %self.client_id.as_ref(), "Requesting access token");

        let response = transport.send(request).await?;
        token_from_response(&response)
    }
}

fn token_from_response(response: &HttpResponse) -> Result<AccessToken, OAuthError> {
    if let Some(token) = response
        .body
        .get("access_token")
        .and_then(serde_json::Value::as_str)
    {
        return Ok(AccessToken::new(token)?);
    }

    tracing::warn!(code = response.code, "Access token request was refused");

    match response.body.get("error") {
        Some(serde_json::Value::String(message)) => Err(OAuthError::AuthorizationFailed {
            message: message.clone(),
        }),
        Some(error) => Err(OAuthError::AuthorizationFailed {
            message: error
                .get("message")
                .and_then(serde_json::Value::as_str)
                .map_or_else(|| error.to_string(), ToString::to_string),
        }),
        None if !response.is_ok() => Err(OAuthError::TokenRequestFailed {
            status: response.code,
            message: response.text.clone(),
        }),
        None => Err(OAuthError::AuthorizationFailed {
            message: String::new(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn oauth() -> MixcloudOAuth {
        MixcloudOAuth::new(ClientId::new("abc").unwrap(), "https://example.com/cb")
    }

    #[test]
    fn test_authorization_url_encodes_params() {
        assert_eq!(
            oauth().authorization_url(),
            "https://www.mixcloud.com/oauth/authorize?client_id=abc&redirect_uri=https%3A%2F%2Fexample.com%2Fcb"
        );
    }

    #[test]
    fn test_authorization_url_uses_custom_root() {
        let oauth = oauth().oauth_root(RootUrl::new("http://localhost:8080/oauth/").unwrap());
        assert!(oauth
            .authorization_url()
            .starts_with("http://localhost:8080/oauth/authorize?client_id=abc"));
    }

    #[tokio::test]
    async fn test_access_token_requires_secret() {
        let result = oauth().access_token("code").await;
        assert!(matches!(result, Err(OAuthError::MissingClientSecret)));
    }

    #[test]
    fn test_token_from_response() {
        let ok = HttpResponse::from_json(200, &json!({"access_token": "tok"}));
        assert_eq!(token_from_response(&ok).unwrap().as_ref(), "tok");

        let refused = HttpResponse::from_json(200, &json!({"error": "Invalid code"}));
        assert!(matches!(
            token_from_response(&refused),
            Err(OAuthError::AuthorizationFailed { message }) if message == "Invalid code"
        ));

        let failed = HttpResponse::from_text(502, "text/html", "Bad gateway");
        assert!(matches!(
            token_from_response(&failed),
            Err(OAuthError::TokenRequestFailed { status: 502, .. })
        ));

        let empty = HttpResponse::from_json(200, &json!({}));
        assert!(matches!(
            token_from_response(&empty),
            Err(OAuthError::AuthorizationFailed { message }) if message.is_empty()
        ));
    }

    #[test]
    fn test_debug_masks_secret() {
        let oauth = oauth().client_secret(ClientSecret::new("very-secret").unwrap());
        assert!(!format!("{oauth:?}").contains("very-secret"));
    }
}
