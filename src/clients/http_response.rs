//! HTTP response types for the Mixcloud API client.
//!
//! This module provides the [`HttpResponse`] type for accessing response
//! status, headers and the raw and decoded body.

use std::collections::HashMap;

/// An HTTP response from the Mixcloud API.
///
/// The raw text is always kept. `body` holds the decoded JSON document, or
/// `Value::Null` when the text is empty or not JSON (embed HTML, for example).
///
/// # Example
///
/// ```rust
/// use mixcloud_api::clients::HttpResponse;
/// use serde_json::json;
///
/// let response = HttpResponse::from_json(200, &json!({"key": "/bob/"}));
/// assert!(response.is_ok());
/// assert!(response.is_json());
/// assert_eq!(response.body["key"], "/bob/");
/// ```
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, keyed by lowercase name (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The raw response text.
    pub text: String,
    /// The decoded JSON body, `Value::Null` if the text is not JSON.
    pub body: serde_json::Value,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`, decoding `text` as JSON when possible.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, text: impl Into<String>) -> Self {
        let text = text.into();
        let body = if text.trim().is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(serde_json::Value::Null)
        };

        Self {
            code,
            headers,
            text,
            body,
        }
    }

    /// Creates a JSON response with an `application/json` content type.
    #[must_use]
    pub fn from_json(code: u16, body: &serde_json::Value) -> Self {
        let mut headers = HashMap::new();
        headers.insert(
            "content-type".to_string(),
            vec!["application/json".to_string()],
        );
        Self {
            code,
            headers,
            text: body.to_string(),
            body: body.clone(),
        }
    }

    /// Creates a plain text response with the given content type.
    #[must_use]
    pub fn from_text(code: u16, content_type: &str, text: impl Into<String>) -> Self {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), vec![content_type.to_string()]);
        Self::new(code, headers, text)
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the first value of header `name` (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the `Content-Type` header value, if present.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Returns `true` if the response carries a JSON document.
    ///
    /// Mixcloud serves some JSON as `text/javascript`, so both are accepted;
    /// otherwise a body that decoded as JSON counts.
    #[must_use]
    pub fn is_json(&self) -> bool {
        match self.content_type() {
            Some(ct) if ct.contains("json") || ct.contains("javascript") => true,
            Some(_) => false,
            None => !self.body.is_null(),
        }
    }

    /// Returns the `X-Request-Id` header value, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.header("x-request-id")
    }
}
