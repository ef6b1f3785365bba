//! OAuth 2.0 authorization for Mixcloud applications.
//!
//! Mixcloud uses the authorization code grant:
//!
//! 1. **Authorization** ([`MixcloudOAuth::authorization_url`]): Send the user
//!    to Mixcloud to allow the application access to their data.
//!
//! 2. **Token request** ([`MixcloudOAuth::access_token`]): When the user is
//!    redirected back with a `code`, trade it for an access token.
//!
//! The token is then used to configure a [`Mixcloud`](crate::Mixcloud)
//! client for personal operations.
//!
//! # Example
//!
//! ```rust,ignore
//! use mixcloud_api::auth::oauth::MixcloudOAuth;
//! use mixcloud_api::{ClientId, ClientSecret, Mixcloud, MixcloudConfig};
//!
//! let oauth = MixcloudOAuth::new(
//!     ClientId::new("your-client-id")?,
//!     "https://your-app.com/callback",
//! )
//! .client_secret(ClientSecret::new("your-client-secret")?);
//!
//! // Step 1: redirect the user
//! println!("Go to {}", oauth.authorization_url());
//!
//! // Step 2: handle the callback
//! let token = oauth.access_token(&code).await?;
//! let config = MixcloudConfig::builder().access_token(token).build()?;
//! let mixcloud = Mixcloud::new(config)?;
//! ```

mod authorize;
mod error;

pub use authorize::MixcloudOAuth;
pub use error::OAuthError;
