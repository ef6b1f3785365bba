//! Error types for Mixcloud API operations.
//!
//! [`MixcloudError`] is the error returned by every operation of the client
//! core, resources and resource lists.
//!
//! # Error Handling
//!
//! HTTP status codes and API error bodies are mapped to semantic variants:
//!
//! - **404**: [`MixcloudError::NotFound`] - Resource doesn't exist
//! - **401/403** or an `OAuthException`: [`MixcloudError::Unauthorized`]
//! - **`{"error": {...}}` bodies**: [`MixcloudError::Api`]
//! - **Other 4xx/5xx**: [`MixcloudError::Http`] - Wrapped HTTP error
//!
//! Locally detected problems never reach the network:
//! [`MixcloudError::BadArgument`] for invalid parameters and
//! [`MixcloudError::Unauthorized`] for personal calls without a token.
//!
//! # Example
//!
//! ```rust,ignore
//! use mixcloud_api::{Mixcloud, MixcloudError};
//!
//! match mixcloud.get("nobody-here").await {
//!     Ok(user) => println!("Found: {}", user),
//!     Err(MixcloudError::NotFound { key }) => println!("{key} not found"),
//!     Err(MixcloudError::Network(e)) => println!("Network error: {e}"),
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use crate::clients::{HttpError, HttpResponseError, InvalidHttpRequestError};
use thiserror::Error;

/// Error type for Mixcloud API operations.
///
/// # Example
///
/// ```rust
/// use mixcloud_api::MixcloudError;
///
/// let error = MixcloudError::NoSuchField {
///     field: "city".to_string(),
///     partial: true,
/// };
/// assert!(error.to_string().contains("city"));
/// assert!(error.to_string().contains("load()"));
/// ```
#[derive(Debug, Error)]
pub enum MixcloudError {
    /// The remote resource does not exist (HTTP 404).
    #[error("Resource '{key}' not found")]
    NotFound {
        /// The key or URL that was requested.
        key: String,
    },

    /// The operation requires an access token that is missing or was rejected.
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// Why the request was not authorized.
        message: String,
    },

    /// Invalid parameters, detected before any network call.
    #[error("Bad argument: {message}")]
    BadArgument {
        /// Description of the problem.
        message: String,
    },

    /// Transport-level failure (DNS, connection, timeout).
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// A field is absent from a mapping or resource.
    ///
    /// `partial` is `true` when the owner is a non-full resource, in which
    /// case loading it may make the field available.
    #[error("No such field '{field}'{}", partial_hint(.partial))]
    NoSuchField {
        /// The requested field name.
        field: String,
        /// Whether the owner is a partially loaded resource.
        partial: bool,
    },

    /// A field exists but holds a value of another type.
    #[error("Field '{field}' is not a {expected}")]
    WrongType {
        /// The requested field name.
        field: String,
        /// The expected type.
        expected: &'static str,
    },

    /// An index past the end of an exhausted resource list.
    #[error("Index {index} out of range for list of {len} items")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The number of items available.
        len: usize,
    },

    /// An error reported by the API in an `{"error": {...}}` body.
    #[error("{}", render_api_error(.kind, .message, .extra))]
    Api {
        /// Error type, as described by the API.
        kind: String,
        /// Error message.
        message: String,
        /// Additional information sent with the error.
        extra: serde_json::Map<String, serde_json::Value>,
    },

    /// A response body that could not be decoded as expected.
    #[error("Could not decode response: {message}")]
    Decode {
        /// Description of the problem.
        message: String,
    },

    /// An HTTP-level error that maps to no other variant.
    #[error(transparent)]
    Http(HttpError),

    /// A local file could not be inspected.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<HttpError> for MixcloudError {
    fn from(error: HttpError) -> Self {
        match error {
            HttpError::Network(e) => Self::Network(e),
            HttpError::InvalidRequest(e) => Self::BadArgument {
                message: e.to_string(),
            },
            HttpError::Io(e) => Self::Io(e),
            e @ HttpError::Response(_) => Self::Http(e),
        }
    }
}

impl From<InvalidHttpRequestError> for MixcloudError {
    fn from(error: InvalidHttpRequestError) -> Self {
        Self::BadArgument {
            message: error.to_string(),
        }
    }
}

impl MixcloudError {
    /// Creates a `MixcloudError` from a failed response.
    ///
    /// Maps status codes and error bodies to semantic variants:
    /// - 404, or an error of type `NotFoundException` -> `NotFound`
    /// - 401/403, or an error of type `OAuthException` -> `Unauthorized`
    /// - any other `{"error": ...}` body -> `Api`
    /// - Other -> `Http`
    ///
    /// # Example
    ///
    /// ```rust
    /// use mixcloud_api::MixcloudError;
    /// use serde_json::json;
    ///
    /// let error = MixcloudError::from_http_response(
    ///     404,
    ///     &json!({"error": {"type": "NotFoundException", "message": "Not found"}}),
    ///     Some("/nobody/"),
    ///     None,
    /// );
    /// assert!(matches!(error, MixcloudError::NotFound { .. }));
    /// ```
    #[must_use]
    pub fn from_http_response(
        code: u16,
        body: &serde_json::Value,
        key: Option<&str>,
        request_id: Option<&str>,
    ) -> Self {
        if code == 404 {
            return Self::NotFound {
                key: key.unwrap_or("unknown").to_string(),
            };
        }

        if let Some(error) = Self::from_error_body(body) {
            return match error {
                Self::Api { kind, .. } if kind == "NotFoundException" => Self::NotFound {
                    key: key.unwrap_or("unknown").to_string(),
                },
                Self::Api { kind, message, .. }
                    if kind == "OAuthException" || code == 401 || code == 403 =>
                {
                    Self::Unauthorized {
                        message: if message.is_empty() { kind } else { message },
                    }
                }
                other => other,
            };
        }

        if code == 401 || code == 403 {
            return Self::Unauthorized {
                message: format!("HTTP {code}"),
            };
        }

        let message = if body.is_null() {
            "Unexpected response".to_string()
        } else {
            body.to_string()
        };
        Self::Http(HttpError::Response(HttpResponseError {
            code,
            message,
            error_reference: request_id.map(ToString::to_string),
        }))
    }

    /// Returns an [`MixcloudError::Api`] if `body` is an API error body.
    ///
    /// Mixcloud reports errors as `{"error": {"type": ..., "message": ...}}`,
    /// sometimes with a `200` status, so bodies are checked regardless of status.
    #[must_use]
    pub fn from_error_body(body: &serde_json::Value) -> Option<Self> {
        let error = body.as_object()?.get("error")?;
        Some(match error {
            serde_json::Value::Object(info) => {
                let mut extra = info.clone();
                let kind = take_string(&mut extra, "type");
                let message = take_string(&mut extra, "message");
                Self::Api {
                    kind,
                    message,
                    extra,
                }
            }
            other => Self::Api {
                kind: String::new(),
                message: other
                    .as_str()
                    .map_or_else(|| other.to_string(), ToString::to_string),
                extra: serde_json::Map::new(),
            },
        })
    }

    /// Returns the request ID if available.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::Http(HttpError::Response(e)) => e.error_reference.as_deref(),
            _ => None,
        }
    }

    pub(crate) fn bad_argument(message: impl Into<String>) -> Self {
        Self::BadArgument {
            message: message.into(),
        }
    }

    pub(crate) fn missing_token() -> Self {
        Self::Unauthorized {
            message: "access_token must be set".to_string(),
        }
    }
}

fn partial_hint(partial: &bool) -> &'static str {
    if *partial {
        " (resource is partial, try load())"
    } else {
        ""
    }
}

fn take_string(map: &mut serde_json::Map<String, serde_json::Value>, name: &str) -> String {
    match map.remove(name) {
        Some(serde_json::Value::String(s)) => s,
        Some(serde_json::Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

fn is_empty_value(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => true,
        serde_json::Value::Bool(b) => !b,
        serde_json::Value::Number(n) => n.as_f64() == Some(0.0),
        serde_json::Value::String(s) => s.is_empty(),
        serde_json::Value::Array(a) => a.is_empty(),
        serde_json::Value::Object(o) => o.is_empty(),
    }
}

/// Renders an API error as `type: message (key: value, ...)`, leaving out
/// the parts that are empty.
fn render_api_error(
    kind: &str,
    message: &str,
    extra: &serde_json::Map<String, serde_json::Value>,
) -> String {
    let extra = extra
        .iter()
        .filter(|(_, v)| !is_empty_value(v))
        .map(|(k, v)| match v {
            serde_json::Value::String(s) => format!("{k}: {s}"),
            other => format!("{k}: {other}"),
        })
        .collect::<Vec<_>>()
        .join(", ");

    let mut parts = Vec::new();
    if !message.is_empty() {
        parts.push(message.to_string());
    }
    if !extra.is_empty() {
        parts.push(format!("({extra})"));
    }
    if !kind.is_empty() {
        if parts.is_empty() {
            parts.insert(0, kind.to_string());
        } else {
            parts.insert(0, format!("{kind}:"));
        }
    }
    parts.join(" ")
}

// Verify MixcloudError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<MixcloudError>();
};
