//! The Mixcloud API client core.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::clients::{HttpClient, HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::config::{AccessToken, MixcloudConfig};
use crate::rest::{
    build_path, is_absolute_url, is_list_shape, join_segment, key_path, normalize_key,
    AccessDict, Endpoint, MixcloudError, Pagination, Resource, ResourceList, SearchType,
};

/// The result of a GET request, decoded by the shape of the response.
///
/// A body with an array under `data` (or `results`) is a list; any other
/// object is a single, full resource.
#[derive(Clone, Debug, PartialEq)]
pub enum Decoded {
    /// A single resource.
    Resource(Resource),
    /// A paginated list of resources.
    List(ResourceList),
}

impl Decoded {
    /// Returns the resource, if this is one.
    #[must_use]
    pub fn into_resource(self) -> Option<Resource> {
        match self {
            Self::Resource(r) => Some(r),
            Self::List(_) => None,
        }
    }

    /// Returns the list, if this is one.
    #[must_use]
    pub fn into_list(self) -> Option<ResourceList> {
        match self {
            Self::List(l) => Some(l),
            Self::Resource(_) => None,
        }
    }
}

/// Async client for the Mixcloud API.
///
/// `Mixcloud` is cheap to clone: clones share the configuration and the
/// underlying HTTP session, which lives as long as the last clone (or
/// resource decoded by one).
///
/// # Thread Safety
///
/// `Mixcloud` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use mixcloud_api::{Mixcloud, MixcloudConfig, Pagination};
///
/// let mixcloud = Mixcloud::new(MixcloudConfig::default())?;
///
/// let user = mixcloud.get("spartacus").await?;
/// println!("{}", user["name"]);
///
/// let hot = mixcloud.hot(&Pagination::new().limit(10)).await?;
/// for cloudcast in &hot {
///     println!("{cloudcast}");
/// }
/// ```
#[derive(Clone)]
pub struct Mixcloud {
    inner: Arc<Inner>,
}

struct Inner {
    config: MixcloudConfig,
    transport: Arc<dyn Transport>,
}

// Verify Mixcloud is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Mixcloud>();
};

impl Mixcloud {
    /// Creates a client that talks to the API over HTTPS.
    ///
    /// # Errors
    ///
    /// Returns [`MixcloudError::Network`] if the HTTP client cannot be
    /// created.
    pub fn new(config: MixcloudConfig) -> Result<Self, MixcloudError> {
        let transport = HttpClient::new(&config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Creates a client that sends its requests through `transport`.
    #[must_use]
    pub fn with_transport(config: MixcloudConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            inner: Arc::new(Inner { config, transport }),
        }
    }

    /// Returns a client sharing this client's session but using `token`.
    #[must_use]
    pub fn with_access_token(&self, token: Option<AccessToken>) -> Self {
        Self::with_transport(
            self.inner.config.with_access_token(token),
            Arc::clone(&self.inner.transport),
        )
    }

    /// Returns the configuration of this client.
    #[must_use]
    pub fn config(&self) -> &MixcloudConfig {
        &self.inner.config
    }

    /// Returns the access token, if configured.
    #[must_use]
    pub fn access_token(&self) -> Option<&AccessToken> {
        self.inner.config.access_token()
    }

    /// Returns `true` if an access token is configured.
    #[must_use]
    pub fn is_authorized(&self) -> bool {
        self.access_token().is_some()
    }

    /// Returns the transport requests are sent through.
    #[must_use]
    pub fn transport(&self) -> Arc<dyn Transport> {
        Arc::clone(&self.inner.transport)
    }

    /// Sends a GET request to `url_or_key` and decodes the response.
    ///
    /// `url_or_key` is either a resource key, relative to the API root, or
    /// an absolute URL such as a paging URL. `metadata=1` and the access
    /// token, if any, are added to `query`; these replace same-named
    /// parameters already present on the URL.
    ///
    /// # Errors
    ///
    /// Returns [`MixcloudError::NotFound`] on a 404, the mapped error of any
    /// other failed response, or [`MixcloudError::Decode`] if the body is
    /// not a JSON object.
    pub async fn fetch(
        &self,
        url_or_key: &str,
        query: &[(String, String)],
    ) -> Result<Decoded, MixcloudError> {
        let mut builder = HttpRequest::builder(HttpMethod::Get, self.resolve(url_or_key))
            .query(query.iter().cloned())
            .query_param("metadata", "1");
        if let Some(token) = self.access_token() {
            builder = builder.query_param("access_token", token.as_ref());
        }

        let response = self.send(builder.build()?, url_or_key).await?;
        self.decode(response.body, url_or_key)
    }

    /// Fetches the full resource identified by `key`.
    ///
    /// # Errors
    ///
    /// Returns [`MixcloudError::NotFound`] if there is no such resource, or
    /// [`MixcloudError::Decode`] if `key` names a list.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let user = mixcloud.get("bob").await?;
    /// assert!(user.is_full());
    /// assert_eq!(user.key(), "/bob/");
    /// ```
    pub async fn get(&self, key: &str) -> Result<Resource, MixcloudError> {
        match self.fetch(key, &[]).await? {
            Decoded::Resource(resource) => Ok(resource),
            Decoded::List(_) => Err(MixcloudError::Decode {
                message: format!("expected a resource at '{key}', got a list"),
            }),
        }
    }

    /// Fetches the list at `url_or_key`.
    ///
    /// # Errors
    ///
    /// Returns [`MixcloudError::BadArgument`] for invalid pagination, or
    /// [`MixcloudError::Decode`] if `url_or_key` names a single resource.
    pub async fn get_list(
        &self,
        url_or_key: &str,
        pagination: &Pagination,
    ) -> Result<ResourceList, MixcloudError> {
        let query = pagination.to_query()?;
        self.expect_list(url_or_key, &query).await
    }

    /// Fetches the user the access token belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`MixcloudError::Unauthorized`] without a token, before any
    /// request is made.
    pub async fn me(&self) -> Result<Resource, MixcloudError> {
        self.require_token()?;
        self.get(Endpoint::Me.template()).await
    }

    /// Fetches information about `tag`.
    ///
    /// # Errors
    ///
    /// Returns [`MixcloudError::NotFound`] for unknown tags.
    pub async fn discover(&self, tag: &str) -> Result<Decoded, MixcloudError> {
        let ids = HashMap::from([("tag", tag.trim_matches('/'))]);
        self.fetch(&build_path(Endpoint::Discover.template(), &ids), &[]).await
    }

    /// Lists popular cloudcasts.
    ///
    /// # Errors
    ///
    /// Returns [`MixcloudError::BadArgument`] for invalid pagination.
    pub async fn popular(&self, pagination: &Pagination) -> Result<ResourceList, MixcloudError> {
        self.get_list(Endpoint::Popular.template(), pagination).await
    }

    /// Lists hot cloudcasts.
    ///
    /// # Errors
    ///
    /// Returns [`MixcloudError::BadArgument`] for invalid pagination.
    pub async fn hot(&self, pagination: &Pagination) -> Result<ResourceList, MixcloudError> {
        self.get_list(Endpoint::Hot.template(), pagination).await
    }

    /// Lists new cloudcasts.
    ///
    /// # Errors
    ///
    /// Returns [`MixcloudError::BadArgument`] for invalid pagination.
    pub async fn new_cloudcasts(
        &self,
        pagination: &Pagination,
    ) -> Result<ResourceList, MixcloudError> {
        self.get_list(Endpoint::New.template(), pagination).await
    }

    /// Searches resources of `search_type` matching `term`.
    ///
    /// # Errors
    ///
    /// Returns [`MixcloudError::BadArgument`] for invalid pagination.
    pub async fn search(
        &self,
        term: &str,
        search_type: SearchType,
        pagination: &Pagination,
    ) -> Result<ResourceList, MixcloudError> {
        let mut query = pagination.to_query()?;
        query.push(("q".to_string(), term.to_string()));
        query.push(("type".to_string(), search_type.to_string()));
        self.expect_list(Endpoint::Search.template(), &query).await
    }

    /// Searches with a search type given as text.
    ///
    /// # Errors
    ///
    /// Returns [`MixcloudError::BadArgument`], before any request is made,
    /// unless `search_type` is `cloudcast`, `user` or `tag`.
    pub async fn search_str(
        &self,
        term: &str,
        search_type: &str,
        pagination: &Pagination,
    ) -> Result<ResourceList, MixcloudError> {
        let search_type: SearchType = search_type.parse()?;
        self.search(term, search_type, pagination).await
    }

    /// Lists connection `name` of the resource identified by `key`.
    ///
    /// # Errors
    ///
    /// Returns [`MixcloudError::NotFound`] if the resource has no such
    /// connection.
    pub async fn connection(
        &self,
        key: &str,
        name: &str,
        pagination: &Pagination,
    ) -> Result<ResourceList, MixcloudError> {
        self.get_list(&join_segment(key, name), pagination).await
    }

    /// Sends `request` and maps failed responses to errors.
    ///
    /// API error bodies are errors whatever the status code.
    pub(crate) async fn send(
        &self,
        request: HttpRequest,
        key: &str,
    ) -> Result<HttpResponse, MixcloudError> {
        let response = self.inner.transport.send(request).await?;

        if !response.is_ok() || MixcloudError::from_error_body(&response.body).is_some() {
            tracing::warn!(
                code = response.code,
                key = %key,
                request_id = ?response.request_id(),
                "Mixcloud API returned an error"
            );
            return Err(MixcloudError::from_http_response(
                response.code,
                &response.body,
                Some(key),
                response.request_id(),
            ));
        }

        Ok(response)
    }

    /// Returns the absolute URL for `url_or_key`.
    pub(crate) fn resolve(&self, url_or_key: &str) -> String {
        if is_absolute_url(url_or_key) {
            url_or_key.to_string()
        } else {
            self.config().api_root().join(&key_path(url_or_key))
        }
    }

    pub(crate) fn require_token(&self) -> Result<&AccessToken, MixcloudError> {
        self.access_token().ok_or_else(MixcloudError::missing_token)
    }

    /// Wraps the body of an action or embed response.
    pub(crate) fn native_result(
        &self,
        body: serde_json::Value,
    ) -> Result<AccessDict, MixcloudError> {
        match body {
            serde_json::Value::Object(map) => Ok(AccessDict::wrap(map, self)),
            serde_json::Value::Null => Ok(AccessDict::default()),
            other => Err(MixcloudError::Decode {
                message: format!("expected a JSON object, got {other}"),
            }),
        }
    }

    async fn expect_list(
        &self,
        url_or_key: &str,
        query: &[(String, String)],
    ) -> Result<ResourceList, MixcloudError> {
        match self.fetch(url_or_key, query).await? {
            Decoded::List(list) => Ok(list),
            Decoded::Resource(resource) => Err(MixcloudError::Decode {
                message: format!("expected a list at '{url_or_key}', got {resource}"),
            }),
        }
    }

    fn decode(
        &self,
        body: serde_json::Value,
        url_or_key: &str,
    ) -> Result<Decoded, MixcloudError> {
        let list = is_list_shape(&body);
        match body {
            serde_json::Value::Object(map) if list => {
                Ok(Decoded::List(ResourceList::from_map(map, self)))
            }
            serde_json::Value::Object(map) => {
                let resource = Resource::from_map(map, true, self);
                Ok(Decoded::Resource(
                    resource.with_fallback_key(&requested_key(url_or_key)),
                ))
            }
            serde_json::Value::Null => Err(MixcloudError::Decode {
                message: format!("response for '{url_or_key}' is not JSON"),
            }),
            other => Err(MixcloudError::Decode {
                message: format!("expected a JSON object for '{url_or_key}', got {other}"),
            }),
        }
    }
}

/// The key a request for `url_or_key` asked for.
fn requested_key(url_or_key: &str) -> String {
    if is_absolute_url(url_or_key) {
        reqwest::Url::parse(url_or_key)
            .map(|url| normalize_key(url.path()))
            .unwrap_or_default()
    } else {
        normalize_key(url_or_key)
    }
}

impl fmt::Debug for Mixcloud {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mixcloud")
            .field("config", &self.inner.config)
            .field("transport", &self.inner.transport)
            .finish()
    }
}
