//! HTTP request types for the Mixcloud API client.
//!
//! This module provides the [`HttpRequest`] type and its builder for
//! constructing requests to the Mixcloud API.

use std::fmt;
use std::path::PathBuf;

use crate::clients::errors::InvalidHttpRequestError;

/// HTTP methods used by the Mixcloud API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for actions and uploads.
    Post,
    /// HTTP DELETE method for undoing actions.
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::Post => write!(f, "post"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// A single part of a multipart form body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormPart {
    /// A plain text field.
    Text {
        /// Field name.
        name: String,
        /// Field value.
        value: String,
    },
    /// A file field, read from disk when the request is sent.
    File {
        /// Field name.
        name: String,
        /// Path of the file to attach.
        path: PathBuf,
    },
}

impl FormPart {
    /// Returns the field name of this part.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Text { name, .. } | Self::File { name, .. } => name,
        }
    }
}

/// The body of a POST request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RequestBody {
    /// An `application/x-www-form-urlencoded` body.
    Form(Vec<(String, String)>),
    /// A `multipart/form-data` body.
    Multipart(Vec<FormPart>),
}

impl RequestBody {
    /// Returns the value of the text field `name`, if present.
    #[must_use]
    pub fn text_field(&self, name: &str) -> Option<&str> {
        match self {
            Self::Form(fields) => fields
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str()),
            Self::Multipart(parts) => parts.iter().find_map(|part| match part {
                FormPart::Text { name: n, value } if n == name => Some(value.as_str()),
                _ => None,
            }),
        }
    }
}

/// An HTTP request to be sent to the Mixcloud API.
///
/// Use [`HttpRequest::builder`] to construct requests with the builder pattern.
///
/// Query pairs have update semantics: when the request is sent they replace
/// same-named pairs already present on the URL, which keeps paging URLs
/// returned by the API usable with fresh parameters.
///
/// # Example
///
/// ```rust
/// use mixcloud_api::clients::{HttpMethod, HttpRequest, RequestBody};
///
/// let get_request = HttpRequest::builder(HttpMethod::Get, "https://api.mixcloud.com/popular/?limit=10")
///     .query_param("limit", "20")
///     .build()
///     .unwrap();
/// assert_eq!(
///     get_request.full_url().unwrap().as_str(),
///     "https://api.mixcloud.com/popular/?limit=20"
/// );
///
/// let post_request = HttpRequest::builder(HttpMethod::Post, "https://api.mixcloud.com/bob/follow/")
///     .body(RequestBody::Form(Vec::new()))
///     .build()
///     .unwrap();
/// assert!(post_request.body.is_some());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub http_method: HttpMethod,
    /// The absolute URL for this request, possibly with a query string.
    pub url: String,
    /// Ordered query parameters to merge into the URL.
    pub query: Vec<(String, String)>,
    /// The request body, if any.
    pub body: Option<RequestBody>,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, url: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, url)
    }

    /// Validates the request, ensuring it meets all requirements.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if:
    /// - a body is attached to a GET or DELETE request
    /// - a multipart body has no parts
    /// - the URL cannot be parsed
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if self.body.is_some() && self.http_method != HttpMethod::Post {
            return Err(InvalidHttpRequestError::UnexpectedBody {
                method: self.http_method.to_string(),
            });
        }

        if matches!(&self.body, Some(RequestBody::Multipart(parts)) if parts.is_empty()) {
            return Err(InvalidHttpRequestError::EmptyMultipart);
        }

        self.full_url()?;
        Ok(())
    }

    /// Returns the URL with the query parameters merged in.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError::InvalidUrl`] if the URL is not absolute.
    pub fn full_url(&self) -> Result<reqwest::Url, InvalidHttpRequestError> {
        let mut url =
            reqwest::Url::parse(&self.url).map_err(|_| InvalidHttpRequestError::InvalidUrl {
                url: self.url.clone(),
            })?;

        if self.query.is_empty() {
            return Ok(url);
        }

        let kept: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(name, _)| !self.query.iter().any(|(q, _)| q == name))
            .map(|(name, value)| (name.into_owned(), value.into_owned()))
            .collect();

        url.query_pairs_mut()
            .clear()
            .extend_pairs(kept.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .extend_pairs(self.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));

        Ok(url)
    }

    /// Returns the value of query parameter `name` after merging.
    #[must_use]
    pub fn query_value(&self, name: &str) -> Option<String> {
        self.full_url().ok().and_then(|url| {
            url.query_pairs()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.into_owned())
        })
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    http_method: HttpMethod,
    url: String,
    query: Vec<(String, String)>,
    body: Option<RequestBody>,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            http_method: method,
            url: url.into(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: RequestBody) -> Self {
        self.body = Some(body);
        self
    }

    /// Adds a single query parameter, replacing an earlier one of the same name.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        if let Some(slot) = self.query.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.query.push((key, value));
        }
        self
    }

    /// Adds several query parameters in order.
    #[must_use]
    pub fn query<I, K, V>(self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        pairs
            .into_iter()
            .fold(self, |builder, (k, v)| builder.query_param(k, v))
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let request = HttpRequest {
            http_method: self.http_method,
            url: self.url,
            query: self.query,
            body: self.body,
        };
        request.verify()?;
        Ok(request)
    }
}
