//! Configuration error types for the Mixcloud API client.
//!
//! This module contains the error type returned while building configuration
//! values. Runtime errors raised while talking to the API live in
//! [`crate::rest::MixcloudError`].
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use mixcloud_api::{AccessToken, ConfigError};
//!
//! let result = AccessToken::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyAccessToken)));
//! ```

use thiserror::Error;

/// Errors that can occur during client configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Access token cannot be empty.
    #[error("Access token cannot be empty. Omit the token instead of passing an empty string.")]
    EmptyAccessToken,

    /// OAuth client ID cannot be empty.
    #[error("Client ID cannot be empty. Please provide the client ID issued by Mixcloud.")]
    EmptyClientId,

    /// OAuth client secret cannot be empty.
    #[error("Client secret cannot be empty. Please provide the client secret issued by Mixcloud.")]
    EmptyClientSecret,

    /// A root URL is invalid.
    #[error("Invalid root URL '{url}'. Please provide an http(s) URL with a host (e.g., 'https://api.mixcloud.com').")]
    InvalidRootUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// The request timeout is zero.
    #[error("Request timeout must be greater than zero.")]
    InvalidTimeout,
}
