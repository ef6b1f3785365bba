//! OAuth-specific error types.
//!
//! # Error Types
//!
//! - [`OAuthError::MissingClientSecret`]: No client secret configured for the token request
//! - [`OAuthError::AuthorizationFailed`]: The server refused to grant a token
//! - [`OAuthError::TokenRequestFailed`]: The token request returned a non-success status
//! - [`OAuthError::InvalidToken`]: The server returned an unusable token
//! - [`OAuthError::HttpError`]: Wrapped HTTP client error
//!
//! # Example
//!
//! ```rust
//! use mixcloud_api::auth::oauth::OAuthError;
//!
//! let error = OAuthError::MissingClientSecret;
//! assert_eq!(error.to_string(), "client_secret must be set");
//!
//! let error = OAuthError::AuthorizationFailed {
//!     message: "Invalid code".to_string(),
//! };
//! assert_eq!(error.to_string(), "Invalid code");
//! ```

use crate::clients::HttpError;
use crate::error::ConfigError;
use thiserror::Error;

/// Errors that can occur while authorizing an application.
///
/// # Thread Safety
///
/// `OAuthError` is `Send + Sync`, making it safe to use across async boundaries.
///
/// # Example
///
/// ```rust
/// use mixcloud_api::auth::oauth::OAuthError;
///
/// fn handle_oauth_error(err: OAuthError) {
///     match err {
///         OAuthError::MissingClientSecret => {
///             eprintln!("Configuration error: client secret not set");
///         }
///         OAuthError::AuthorizationFailed { message } => {
///             eprintln!("Authorization refused: {}", message);
///         }
///         OAuthError::TokenRequestFailed { status, message } => {
///             eprintln!("Token request failed ({}): {}", status, message);
///         }
///         OAuthError::InvalidToken(e) => {
///             eprintln!("Unusable token: {}", e);
///         }
///         OAuthError::HttpError(e) => {
///             eprintln!("HTTP error: {}", e);
///         }
///     }
/// }
/// ```
#[derive(Debug, Error)]
pub enum OAuthError {
    /// The token request needs a client secret, and none is configured.
    #[error("client_secret must be set")]
    MissingClientSecret,

    /// The server answered without an access token.
    ///
    /// `message` is the `error` field of the response, which is empty when
    /// the server sent none.
    #[error("{message}")]
    AuthorizationFailed {
        /// The error message from the response.
        message: String,
    },

    /// The token request returned a non-success HTTP status without an
    /// error message.
    #[error("Token request failed with status {status}: {message}")]
    TokenRequestFailed {
        /// The HTTP status code returned.
        status: u16,
        /// The response body.
        message: String,
    },

    /// The server returned an access token that fails validation.
    #[error("Invalid access token: {0}")]
    InvalidToken(#[from] ConfigError),

    /// Wrapped HTTP client error.
    ///
    /// An error occurred during HTTP communication, such as a network failure
    /// or request validation error.
    #[error(transparent)]
    HttpError(#[from] HttpError),
}

// Verify OAuthError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<OAuthError>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::HttpResponseError;

    #[test]
    fn test_authorization_failed_displays_server_message() {
        let error = OAuthError::AuthorizationFailed {
            message: "Invalid code".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid code");
    }

    #[test]
    fn test_token_request_failed_includes_status_and_message() {
        let error = OAuthError::TokenRequestFailed {
            status: 500,
            message: "Internal error".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("500"));
        assert!(message.contains("Internal error"));
    }

    #[test]
    fn test_from_http_error_conversion() {
        let http_error = HttpError::Response(HttpResponseError {
            code: 500,
            message: "Internal server error".to_string(),
            error_reference: None,
        });
        let oauth_error: OAuthError = http_error.into();
        assert!(matches!(oauth_error, OAuthError::HttpError(_)));
    }

    #[test]
    fn test_from_config_error_conversion() {
        let oauth_error: OAuthError = ConfigError::EmptyAccessToken.into();
        assert!(matches!(oauth_error, OAuthError::InvalidToken(_)));
    }

    #[test]
    fn test_oauth_error_implements_std_error() {
        let error: &dyn std::error::Error = &OAuthError::MissingClientSecret;
        let _ = error;

        let error: &dyn std::error::Error = &OAuthError::AuthorizationFailed {
            message: "test".to_string(),
        };
        let _ = error;
    }
}
