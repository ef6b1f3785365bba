//! Authorization for the Mixcloud API.
//!
//! See [`oauth`] for obtaining access tokens.

pub mod oauth;

pub use oauth::{MixcloudOAuth, OAuthError};
