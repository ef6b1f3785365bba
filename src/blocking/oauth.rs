use std::sync::Arc;

use tokio::runtime::Runtime;

use crate::auth::oauth::{self, OAuthError};
use crate::blocking::client::Mixcloud;
use crate::blocking::new_runtime;
use crate::clients::{HttpError, Transport};
use crate::config::{AccessToken, ClientId, ClientSecret, RootUrl};

/// The blocking counterpart of [`oauth::MixcloudOAuth`].
///
/// # Example
///
/// ```rust,ignore
/// use mixcloud_api::blocking::MixcloudOAuth;
/// use mixcloud_api::{ClientId, ClientSecret};
///
/// let oauth = MixcloudOAuth::new(ClientId::new("id")?, "https://example.com/cb")?
///     .client_secret(ClientSecret::new("secret")?);
/// let token = oauth.access_token(&code)?;
/// ```
#[derive(Clone, Debug)]
pub struct MixcloudOAuth {
    inner: oauth::MixcloudOAuth,
    runtime: Arc<Runtime>,
}

impl MixcloudOAuth {
    /// Creates a helper for the application `client_id`, redirecting users
    /// to `redirect_uri`.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::HttpError`] if the runtime cannot be started.
    pub fn new(client_id: ClientId, redirect_uri: impl Into<String>) -> Result<Self, OAuthError> {
        let runtime = new_runtime().map_err(HttpError::from)?;
        Ok(Self {
            inner: oauth::MixcloudOAuth::new(client_id, redirect_uri),
            runtime,
        })
    }

    /// Sets the client secret.
    #[must_use]
    pub fn client_secret(self, secret: ClientSecret) -> Self {
        Self {
            inner: self.inner.client_secret(secret),
            ..self
        }
    }

    /// Overrides the OAuth root URL.
    #[must_use]
    pub fn oauth_root(self, root: RootUrl) -> Self {
        Self {
            inner: self.inner.oauth_root(root),
            ..self
        }
    }

    /// Sends the token request through `transport`.
    #[must_use]
    pub fn transport(self, transport: Arc<dyn Transport>) -> Self {
        Self {
            inner: self.inner.transport(transport),
            ..self
        }
    }

    /// Sends the token request through the session and runtime of `mixcloud`.
    #[must_use]
    pub fn mixcloud(self, mixcloud: &Mixcloud) -> Self {
        Self {
            inner: self.inner.mixcloud(mixcloud.as_async()),
            runtime: Arc::clone(mixcloud.runtime()),
        }
    }

    /// See [`oauth::MixcloudOAuth::authorization_url`].
    #[must_use]
    pub fn authorization_url(&self) -> String {
        self.inner.authorization_url()
    }

    /// See [`oauth::MixcloudOAuth::access_token`].
    ///
    /// # Errors
    ///
    /// Same as the async operation.
    pub fn access_token(&self, code: &str) -> Result<AccessToken, OAuthError> {
        self.runtime.block_on(self.inner.access_token(code))
    }
}
