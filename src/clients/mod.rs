//! HTTP client types for Mixcloud API communication.
//!
//! This module provides the HTTP layer the API client is built on, and the
//! API client itself in [`api`].
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`Transport`]: The seam through which every request reaches the network
//! - [`HttpClient`]: The default `reqwest`-backed transport
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A raw response from the API
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, DELETE)
//! - [`RequestBody`]: Form and multipart request bodies
//! - [`api::Mixcloud`]: The async API client
//!
//! # Example
//!
//! ```rust,ignore
//! use mixcloud_api::clients::{HttpClient, HttpMethod, HttpRequest, Transport};
//! use mixcloud_api::MixcloudConfig;
//!
//! let client = HttpClient::new(&MixcloudConfig::default())?;
//!
//! let request = HttpRequest::builder(HttpMethod::Get, "https://api.mixcloud.com/spartacus/")
//!     .query_param("metadata", "1")
//!     .build()?;
//!
//! let response = client.send(request).await?;
//! println!("{}", response.body["name"]);
//! ```

mod errors;
mod http_client;
mod http_request;
mod http_response;
mod transport;

pub mod api;

pub use errors::{HttpError, HttpResponseError, InvalidHttpRequestError};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{FormPart, HttpMethod, HttpRequest, HttpRequestBuilder, RequestBody};
pub use http_response::HttpResponse;
pub use transport::Transport;
