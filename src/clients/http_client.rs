//! HTTP client for Mixcloud API communication.
//!
//! This module provides the [`HttpClient`] type, the `reqwest` backed
//! [`Transport`] used by default.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio_util::io::ReaderStream;

use crate::clients::errors::HttpError;
use crate::clients::http_request::{FormPart, HttpMethod, HttpRequest, RequestBody};
use crate::clients::http_response::HttpResponse;
use crate::clients::transport::Transport;
use crate::config::MixcloudConfig;

/// Library version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making requests to the Mixcloud API.
///
/// The client handles:
/// - Default headers including User-Agent and Accept
/// - Query merging, url-encoded forms and multipart uploads
/// - Response header and body decoding
///
/// Requests are never retried. Authentication is not the client's concern:
/// the API core adds the `access_token` query parameter itself.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use mixcloud_api::clients::{HttpClient, HttpMethod, HttpRequest, Transport};
/// use mixcloud_api::MixcloudConfig;
///
/// let config = MixcloudConfig::builder().build()?;
/// let client = HttpClient::new(&config)?;
///
/// let request = HttpRequest::builder(HttpMethod::Get, "https://api.mixcloud.com/spartacus/")
///     .build()?;
///
/// let response = client.send(request).await?;
/// println!("{}", response.body["name"]);
/// ```
#[derive(Debug)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client using the user agent and timeout of `config`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client cannot
    /// be created (e.g., TLS initialization failure).
    pub fn new(config: &MixcloudConfig) -> Result<Self, HttpError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Mixcloud API Library v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        let mut builder = reqwest::Client::builder().use_rustls_tls();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            default_headers,
        })
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    /// Builds a multipart form. Attached files are opened here and streamed
    /// from disk while the request is sent.
    async fn multipart_form(parts: &[FormPart]) -> Result<reqwest::multipart::Form, HttpError> {
        let mut form = reqwest::multipart::Form::new();
        for part in parts {
            form = match part {
                FormPart::Text { name, value } => form.text(name.clone(), value.clone()),
                FormPart::File { name, path } => {
                    let file = tokio::fs::File::open(path).await?;
                    let length = file.metadata().await?.len();
                    let file_name = path
                        .file_name()
                        .map_or_else(|| name.clone(), |n| n.to_string_lossy().into_owned());
                    let body = reqwest::Body::wrap_stream(ReaderStream::new(file));
                    form.part(
                        name.clone(),
                        reqwest::multipart::Part::stream_with_length(body, length)
                            .file_name(file_name),
                    )
                }
            };
        }
        Ok(form)
    }
}

#[async_trait]
impl Transport for HttpClient {
    /// Sends an HTTP request to the Mixcloud API.
    ///
    /// Responses of any status are returned as `Ok`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - An attached file cannot be read (`Io`)
    /// - Network error occurs (`Network`)
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;
        let url = request.full_url()?;

        tracing::debug!(
            method = %request.http_method,
            url = %redact_token(&url),
            "Sending Mixcloud API request"
        );

        let mut req_builder = match request.http_method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url),
            HttpMethod::Delete => self.client.delete(url),
        };

        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }

        match &request.body {
            Some(RequestBody::Form(fields)) => {
                req_builder = req_builder.form(fields);
            }
            Some(RequestBody::Multipart(parts)) => {
                req_builder = req_builder.multipart(Self::multipart_form(parts).await?);
            }
            None => {}
        }

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let res_headers = Self::parse_response_headers(res.headers());
        let text = res.text().await?;

        Ok(HttpResponse::new(code, res_headers, text))
    }
}

/// Renders `url` for logs with the `access_token` value masked.
fn redact_token(url: &reqwest::Url) -> String {
    if !url.query_pairs().any(|(k, _)| k == "access_token") {
        return url.to_string();
    }
    let mut redacted = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "access_token" {
                "*****".to_string()
            } else {
                v.into_owned()
            };
            (k.into_owned(), v)
        })
        .collect();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted.to_string()
}
