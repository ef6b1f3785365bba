//! Configuration types for the Mixcloud API client.
//!
//! This module provides the configuration used to build a
//! [`Mixcloud`](crate::Mixcloud) client: root URLs, the optional access
//! token and HTTP settings.
//!
//! # Overview
//!
//! - [`MixcloudConfig`]: The configuration struct holding all client settings
//! - [`MixcloudConfigBuilder`]: A builder for constructing [`MixcloudConfig`] instances
//! - [`AccessToken`]: A validated OAuth access token with masked debug output
//! - [`ClientId`] / [`ClientSecret`]: Validated OAuth application credentials
//! - [`RootUrl`]: A validated http(s) root URL
//!
//! # Example
//!
//! ```rust
//! use mixcloud_api::{AccessToken, MixcloudConfig};
//!
//! let config = MixcloudConfig::builder()
//!     .access_token(AccessToken::new("my-token").unwrap())
//!     .user_agent_prefix("MyApp/1.0")
//!     .build()
//!     .unwrap();
//!
//! assert!(config.access_token().is_some());
//! assert_eq!(config.api_root().as_ref(), "https://api.mixcloud.com");
//! ```

mod newtypes;

pub use newtypes::{AccessToken, ClientId, ClientSecret, RootUrl};

use std::time::Duration;

use crate::error::ConfigError;

/// Default Mixcloud API root URL.
pub const API_ROOT: &str = "https://api.mixcloud.com";

/// Default Mixcloud website root URL.
pub const MIXCLOUD_ROOT: &str = "https://www.mixcloud.com";

/// Default Mixcloud oEmbed endpoint.
pub const OEMBED_ROOT: &str = "https://www.mixcloud.com/oembed";

/// Default Mixcloud OAuth root URL.
pub const OAUTH_ROOT: &str = "https://www.mixcloud.com/oauth";

/// Maximum size of an uploaded mp3, in bytes.
pub const MP3_MAX_SIZE: u64 = 4_294_967_296;

/// Maximum size of an uploaded picture, in bytes.
pub const PICTURE_MAX_SIZE: u64 = 10_485_760;

/// Maximum length of an upload description, in characters.
pub const DESCRIPTION_MAX_SIZE: usize = 1000;

/// Maximum number of tags per upload.
pub const TAG_MAX_COUNT: usize = 5;

/// Page size used when paginating by `page` without `per_page`.
pub const DEFAULT_PER_PAGE: u64 = 20;

/// Configuration for the Mixcloud API client.
///
/// # Thread Safety
///
/// `MixcloudConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
#[derive(Clone, Debug)]
pub struct MixcloudConfig {
    api_root: RootUrl,
    mixcloud_root: RootUrl,
    oembed_root: RootUrl,
    oauth_root: RootUrl,
    access_token: Option<AccessToken>,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
}

impl MixcloudConfig {
    /// Creates a new builder for constructing a `MixcloudConfig`.
    #[must_use]
    pub fn builder() -> MixcloudConfigBuilder {
        MixcloudConfigBuilder::new()
    }

    /// Returns the API root URL.
    #[must_use]
    pub const fn api_root(&self) -> &RootUrl {
        &self.api_root
    }

    /// Returns the Mixcloud website root URL, used to build oEmbed targets.
    #[must_use]
    pub const fn mixcloud_root(&self) -> &RootUrl {
        &self.mixcloud_root
    }

    /// Returns the oEmbed endpoint URL.
    #[must_use]
    pub const fn oembed_root(&self) -> &RootUrl {
        &self.oembed_root
    }

    /// Returns the OAuth root URL.
    #[must_use]
    pub const fn oauth_root(&self) -> &RootUrl {
        &self.oauth_root
    }

    /// Returns the access token, if configured.
    #[must_use]
    pub const fn access_token(&self) -> Option<&AccessToken> {
        self.access_token.as_ref()
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the request timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns a copy of this configuration using `token`.
    #[must_use]
    pub fn with_access_token(&self, token: Option<AccessToken>) -> Self {
        Self {
            access_token: token,
            ..self.clone()
        }
    }
}

impl Default for MixcloudConfig {
    fn default() -> Self {
        Self {
            api_root: default_root(API_ROOT),
            mixcloud_root: default_root(MIXCLOUD_ROOT),
            oembed_root: default_root(OEMBED_ROOT),
            oauth_root: default_root(OAUTH_ROOT),
            access_token: None,
            user_agent_prefix: None,
            timeout: None,
        }
    }
}

// The default roots are constants known to be valid.
fn default_root(url: &str) -> RootUrl {
    match RootUrl::new(url) {
        Ok(root) => root,
        Err(_) => unreachable!("default root URL {url} is valid"),
    }
}

// Verify MixcloudConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<MixcloudConfig>();
};

/// Builder for constructing [`MixcloudConfig`] instances.
///
/// Every field is optional.
///
/// # Defaults
///
/// - `api_root`: `https://api.mixcloud.com`
/// - `mixcloud_root`: `https://www.mixcloud.com`
/// - `oembed_root`: `https://www.mixcloud.com/oembed`
/// - `oauth_root`: `https://www.mixcloud.com/oauth`
/// - `access_token`: `None`
/// - `user_agent_prefix`: `None`
/// - `timeout`: `None` (no timeout)
#[derive(Debug, Default)]
pub struct MixcloudConfigBuilder {
    api_root: Option<RootUrl>,
    mixcloud_root: Option<RootUrl>,
    oembed_root: Option<RootUrl>,
    oauth_root: Option<RootUrl>,
    access_token: Option<AccessToken>,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
}

impl MixcloudConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API root URL.
    #[must_use]
    pub fn api_root(mut self, root: RootUrl) -> Self {
        self.api_root = Some(root);
        self
    }

    /// Sets the Mixcloud website root URL.
    #[must_use]
    pub fn mixcloud_root(mut self, root: RootUrl) -> Self {
        self.mixcloud_root = Some(root);
        self
    }

    /// Sets the oEmbed endpoint URL.
    #[must_use]
    pub fn oembed_root(mut self, root: RootUrl) -> Self {
        self.oembed_root = Some(root);
        self
    }

    /// Sets the OAuth root URL.
    #[must_use]
    pub fn oauth_root(mut self, root: RootUrl) -> Self {
        self.oauth_root = Some(root);
        self
    }

    /// Sets the access token used for authorized requests.
    #[must_use]
    pub fn access_token(mut self, token: AccessToken) -> Self {
        self.access_token = Some(token);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets the timeout applied to every HTTP request.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the [`MixcloudConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTimeout`] if a zero timeout was set.
    pub fn build(self) -> Result<MixcloudConfig, ConfigError> {
        if self.timeout.is_some_and(|t| t.is_zero()) {
            return Err(ConfigError::InvalidTimeout);
        }

        let defaults = MixcloudConfig::default();
        Ok(MixcloudConfig {
            api_root: self.api_root.unwrap_or(defaults.api_root),
            mixcloud_root: self.mixcloud_root.unwrap_or(defaults.mixcloud_root),
            oembed_root: self.oembed_root.unwrap_or(defaults.oembed_root),
            oauth_root: self.oauth_root.unwrap_or(defaults.oauth_root),
            access_token: self.access_token,
            user_agent_prefix: self.user_agent_prefix,
            timeout: self.timeout,
        })
    }
}
