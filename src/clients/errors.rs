//! HTTP-specific error types for the Mixcloud API client.
//!
//! This module contains error types for HTTP operations: response errors,
//! request validation failures, network failures and I/O failures while
//! reading upload files.
//!
//! # Error Handling
//!
//! - [`HttpResponseError`]: Non-2xx HTTP responses the API did not describe
//! - [`InvalidHttpRequestError`]: When a request fails validation before sending
//! - [`HttpError`]: Unified error type encompassing all HTTP-related errors
//!
//! # Example
//!
//! ```rust,ignore
//! use mixcloud_api::clients::{HttpClient, HttpError, HttpMethod, HttpRequest, Transport};
//!
//! match client.send(request).await {
//!     Ok(response) => println!("Status {}", response.code),
//!     Err(HttpError::InvalidRequest(e)) => println!("Invalid request: {}", e),
//!     Err(HttpError::Network(e)) => println!("Network error: {}", e),
//!     Err(e) => println!("Other error: {}", e),
//! }
//! ```

use thiserror::Error;

/// Error describing a non-successful response that carried no API error body.
///
/// # Example
///
/// ```rust
/// use mixcloud_api::clients::HttpResponseError;
///
/// let error = HttpResponseError {
///     code: 502,
///     message: "Bad Gateway".to_string(),
///     error_reference: Some("abc-123".to_string()),
/// };
///
/// assert_eq!(error.to_string(), "HTTP 502: Bad Gateway");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("HTTP {code}: {message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The response text, or a canonical reason when the body was empty.
    pub message: String,
    /// Reference ID for error reporting (from the X-Request-Id header).
    pub error_reference: Option<String>,
}

/// Error returned when an HTTP request fails validation.
///
/// Raised before a request is sent, for example when a body is attached to a
/// method that cannot carry one.
///
/// ```rust
/// use mixcloud_api::clients::InvalidHttpRequestError;
///
/// let error = InvalidHttpRequestError::UnexpectedBody {
///     method: "get".to_string(),
/// };
/// assert_eq!(error.to_string(), "Cannot send a body with get.");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A body was attached to a GET or DELETE request.
    #[error("Cannot send a body with {method}.")]
    UnexpectedBody {
        /// The HTTP method of the request.
        method: String,
    },

    /// A multipart body was built without any parts.
    #[error("Cannot send an empty multipart body.")]
    EmptyMultipart,

    /// The request URL could not be parsed.
    #[error("Invalid request URL '{url}'.")]
    InvalidUrl {
        /// The URL that failed to parse.
        url: String,
    },
}

/// Unified error type for all HTTP-related errors.
///
/// ```rust,ignore
/// use mixcloud_api::clients::HttpError;
///
/// match result {
///     Ok(response) => { /* handle success */ }
///     Err(HttpError::Response(e)) => { /* handle HTTP error */ }
///     Err(HttpError::InvalidRequest(e)) => { /* handle validation error */ }
///     Err(HttpError::Network(e)) => { /* handle network error */ }
///     Err(HttpError::Io(e)) => { /* handle unreadable upload file */ }
/// }
/// ```
#[derive(Debug, Error)]
pub enum HttpError {
    /// An HTTP response error (non-2xx status code).
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A file attached to a multipart body could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
