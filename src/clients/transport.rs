//! The transport seam between the API client core and the network.
//!
//! [`Transport`] is the only way the core reaches the network. The default
//! implementation is [`HttpClient`](crate::clients::HttpClient); tests and
//! embedders can plug in their own.

use std::fmt;

use async_trait::async_trait;

use crate::clients::errors::HttpError;
use crate::clients::http_request::HttpRequest;
use crate::clients::http_response::HttpResponse;

/// Sends [`HttpRequest`]s and returns raw [`HttpResponse`]s.
///
/// Implementations return `Ok` for every response received, whatever its
/// status code. Mapping statuses to errors is the caller's job.
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use mixcloud_api::clients::{HttpError, HttpRequest, HttpResponse, Transport};
/// use serde_json::json;
///
/// #[derive(Debug)]
/// struct Canned;
///
/// #[async_trait]
/// impl Transport for Canned {
///     async fn send(&self, _request: HttpRequest) -> Result<HttpResponse, HttpError> {
///         Ok(HttpResponse::from_json(200, &json!({"key": "/bob/", "type": "user"})))
///     }
/// }
/// ```
#[async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    /// Sends a request and returns the response.
    ///
    /// # Errors
    ///
    /// Returns an [`HttpError`] if the request is invalid, the network fails
    /// or an attached file cannot be read.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError>;
}
