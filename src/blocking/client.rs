use std::path::Path;
use std::sync::Arc;

use tokio::runtime::Runtime;

use crate::blocking::models::{Resource, ResourceList};
use crate::blocking::new_runtime;
use crate::clients::api::{self, Action, Embed, UploadOptions};
use crate::clients::Transport;
use crate::config::{AccessToken, MixcloudConfig};
use crate::rest::{AccessDict, EmbedOptions, MixcloudError, Pagination, SearchType};

/// The blocking counterpart of [`api::Decoded`].
#[derive(Clone, Debug)]
pub enum Decoded {
    /// A single resource.
    Resource(Resource),
    /// A paginated list of resources.
    List(ResourceList),
}

impl Decoded {
    fn wrap(decoded: api::Decoded, runtime: &Arc<Runtime>) -> Self {
        match decoded {
            api::Decoded::Resource(r) => Self::Resource(Resource::wrap(r, Arc::clone(runtime))),
            api::Decoded::List(l) => Self::List(ResourceList::wrap(l, Arc::clone(runtime))),
        }
    }

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

/// Blocking client for the Mixcloud API.
///
/// See [`crate::Mixcloud`] for the operations; each one here blocks until
/// the response is decoded.
#[derive(Clone, Debug)]
pub struct Mixcloud {
    inner: api::Mixcloud,
    runtime: Arc<Runtime>,
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
    /// Returns [`MixcloudError::Io`] if the runtime cannot be started, or
    /// [`MixcloudError::Network`] if the HTTP client cannot be created.
    pub fn new(config: MixcloudConfig) -> Result<Self, MixcloudError> {
        let runtime = new_runtime()?;
        Ok(Self {
            inner: api::Mixcloud::new(config)?,
            runtime,
        })
    }

    /// Creates a client that sends its requests through `transport`.
    ///
    /// # Errors
    ///
    /// Returns [`MixcloudError::Io`] if the runtime cannot be started.
    pub fn with_transport(
        config: MixcloudConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, MixcloudError> {
        Ok(Self {
            inner: api::Mixcloud::with_transport(config, transport),
            runtime: new_runtime()?,
        })
    }

    /// Returns a client sharing this client's session and runtime but
    /// using `token`.
    #[must_use]
    pub fn with_access_token(&self, token: Option<AccessToken>) -> Self {
        Self {
            inner: self.inner.with_access_token(token),
            runtime: Arc::clone(&self.runtime),
        }
    }

    /// Returns the async client this client wraps.
    #[must_use]
    pub const fn as_async(&self) -> &api::Mixcloud {
        &self.inner
    }

    pub(crate) const fn runtime(&self) -> &Arc<Runtime> {
        &self.runtime
    }

    /// Returns the configuration of this client.
    #[must_use]
    pub fn config(&self) -> &MixcloudConfig {
        self.inner.config()
    }

    /// Returns the access token, if configured.
    #[must_use]
    pub fn access_token(&self) -> Option<&AccessToken> {
        self.inner.access_token()
    }

    /// Returns `true` if an access token is configured.
    #[must_use]
    pub fn is_authorized(&self) -> bool {
        self.inner.is_authorized()
    }

    /// See [`crate::Mixcloud::fetch`].
    ///
    /// # Errors
    ///
    /// Same as the async operation.
    pub fn fetch(
        &self,
        url_or_key: &str,
        query: &[(String, String)],
    ) -> Result<Decoded, MixcloudError> {
        let decoded = self.runtime.block_on(self.inner.fetch(url_or_key, query))?;
        Ok(Decoded::wrap(decoded, &self.runtime))
    }

    /// See [`crate::Mixcloud::get`].
    ///
    /// # Errors
    ///
    /// Same as the async operation.
    pub fn get(&self, key: &str) -> Result<Resource, MixcloudError> {
        self.resource(self.runtime.block_on(self.inner.get(key)))
    }

    /// See [`crate::Mixcloud::get_list`].
    ///
    /// # Errors
    ///
    /// Same as the async operation.
    pub fn get_list(
        &self,
        url_or_key: &str,
        pagination: &Pagination,
    ) -> Result<ResourceList, MixcloudError> {
        self.list(self.runtime.block_on(self.inner.get_list(url_or_key, pagination)))
    }

    /// See [`crate::Mixcloud::me`].
    ///
    /// # Errors
    ///
    /// Same as the async operation.
    pub fn me(&self) -> Result<Resource, MixcloudError> {
        self.resource(self.runtime.block_on(self.inner.me()))
    }

    /// See [`crate::Mixcloud::discover`].
    ///
    /// # Errors
    ///
    /// Same as the async operation.
    pub fn discover(&self, tag: &str) -> Result<Decoded, MixcloudError> {
        let decoded = self.runtime.block_on(self.inner.discover(tag))?;
        Ok(Decoded::wrap(decoded, &self.runtime))
    }

    /// See [`crate::Mixcloud::popular`].
    ///
    /// # Errors
    ///
    /// Same as the async operation.
    pub fn popular(&self, pagination: &Pagination) -> Result<ResourceList, MixcloudError> {
        self.list(self.runtime.block_on(self.inner.popular(pagination)))
    }

    /// See [`crate::Mixcloud::hot`].
    ///
    /// # Errors
    ///
    /// Same as the async operation.
    pub fn hot(&self, pagination: &Pagination) -> Result<ResourceList, MixcloudError> {
        self.list(self.runtime.block_on(self.inner.hot(pagination)))
    }

    /// See [`crate::Mixcloud::new_cloudcasts`].
    ///
    /// # Errors
    ///
    /// Same as the async operation.
    pub fn new_cloudcasts(&self, pagination: &Pagination) -> Result<ResourceList, MixcloudError> {
        self.list(self.runtime.block_on(self.inner.new_cloudcasts(pagination)))
    }

    /// See [`crate::Mixcloud::search`].
    ///
    /// # Errors
    ///
    /// Same as the async operation.
    pub fn search(
        &self,
        term: &str,
        search_type: SearchType,
        pagination: &Pagination,
    ) -> Result<ResourceList, MixcloudError> {
        self.list(
            self.runtime
                .block_on(self.inner.search(term, search_type, pagination)),
        )
    }

    /// See [`crate::Mixcloud::search_str`].
    ///
    /// # Errors
    ///
    /// Same as the async operation.
    pub fn search_str(
        &self,
        term: &str,
        search_type: &str,
        pagination: &Pagination,
    ) -> Result<ResourceList, MixcloudError> {
        self.list(
            self.runtime
                .block_on(self.inner.search_str(term, search_type, pagination)),
        )
    }

    /// See [`crate::Mixcloud::connection`].
    ///
    /// # Errors
    ///
    /// Same as the async operation.
    pub fn connection(
        &self,
        key: &str,
        name: &str,
        pagination: &Pagination,
    ) -> Result<ResourceList, MixcloudError> {
        self.list(
            self.runtime
                .block_on(self.inner.connection(key, name, pagination)),
        )
    }

    /// See [`crate::Mixcloud::act`].
    ///
    /// # Errors
    ///
    /// Same as the async operation.
    pub fn act(&self, key: &str, action: Action) -> Result<AccessDict, MixcloudError> {
        self.runtime.block_on(self.inner.act(key, action))
    }

    /// See [`crate::Mixcloud::undo`].
    ///
    /// # Errors
    ///
    /// Same as the async operation.
    pub fn undo(&self, key: &str, action: Action) -> Result<AccessDict, MixcloudError> {
        self.runtime.block_on(self.inner.undo(key, action))
    }

    /// Follows the user identified by `key`.
    ///
    /// # Errors
    ///
    /// Same as the async operation.
    pub fn follow(&self, key: &str) -> Result<AccessDict, MixcloudError> {
        self.act(key, Action::Follow)
    }

    /// Unfollows the user identified by `key`.
    ///
    /// # Errors
    ///
    /// Same as the async operation.
    pub fn unfollow(&self, key: &str) -> Result<AccessDict, MixcloudError> {
        self.undo(key, Action::Follow)
    }

    /// Favorites the cloudcast identified by `key`.
    ///
    /// # Errors
    ///
    /// Same as the async operation.
    pub fn favorite(&self, key: &str) -> Result<AccessDict, MixcloudError> {
        self.act(key, Action::Favorite)
    }

    /// Unfavorites the cloudcast identified by `key`.
    ///
    /// # Errors
    ///
    /// Same as the async operation.
    pub fn unfavorite(&self, key: &str) -> Result<AccessDict, MixcloudError> {
        self.undo(key, Action::Favorite)
    }

    /// Reposts the cloudcast identified by `key`.
    ///
    /// # Errors
    ///
    /// Same as the async operation.
    pub fn repost(&self, key: &str) -> Result<AccessDict, MixcloudError> {
        self.act(key, Action::Repost)
    }

    /// Removes the repost of the cloudcast identified by `key`.
    ///
    /// # Errors
    ///
    /// Same as the async operation.
    pub fn unrepost(&self, key: &str) -> Result<AccessDict, MixcloudError> {
        self.undo(key, Action::Repost)
    }

    /// Adds the cloudcast identified by `key` to the listen-later list.
    ///
    /// # Errors
    ///
    /// Same as the async operation.
    pub fn listen_later(&self, key: &str) -> Result<AccessDict, MixcloudError> {
        self.act(key, Action::ListenLater)
    }

    /// Removes the cloudcast identified by `key` from the listen-later list.
    ///
    /// # Errors
    ///
    /// Same as the async operation.
    pub fn unlisten_later(&self, key: &str) -> Result<AccessDict, MixcloudError> {
        self.undo(key, Action::ListenLater)
    }

    /// See [`crate::Mixcloud::upload`].
    ///
    /// # Errors
    ///
    /// Same as the async operation.
    pub fn upload(
        &self,
        mp3: impl AsRef<Path>,
        name: &str,
        options: &UploadOptions,
    ) -> Result<AccessDict, MixcloudError> {
        self.runtime.block_on(self.inner.upload(mp3, name, options))
    }

    /// See [`crate::Mixcloud::edit`].
    ///
    /// # Errors
    ///
    /// Same as the async operation.
    pub fn edit(
        &self,
        key: &str,
        name: Option<&str>,
        options: &UploadOptions,
    ) -> Result<AccessDict, MixcloudError> {
        self.runtime.block_on(self.inner.edit(key, name, options))
    }

    /// See [`crate::Mixcloud::embed_json`].
    ///
    /// # Errors
    ///
    /// Same as the async operation.
    pub fn embed_json(
        &self,
        key: &str,
        options: &EmbedOptions,
    ) -> Result<AccessDict, MixcloudError> {
        self.runtime.block_on(self.inner.embed_json(key, options))
    }

    /// See [`crate::Mixcloud::embed_html`].
    ///
    /// # Errors
    ///
    /// Same as the async operation.
    pub fn embed_html(
        &self,
        key: &str,
        options: &EmbedOptions,
    ) -> Result<String, MixcloudError> {
        self.runtime.block_on(self.inner.embed_html(key, options))
    }

    /// See [`crate::Mixcloud::oembed`].
    ///
    /// # Errors
    ///
    /// Same as the async operation.
    pub fn oembed(&self, key: &str, options: &EmbedOptions) -> Result<Embed, MixcloudError> {
        self.runtime.block_on(self.inner.oembed(key, options))
    }

    fn resource(
        &self,
        result: Result<crate::rest::Resource, MixcloudError>,
    ) -> Result<Resource, MixcloudError> {
        result.map(|r| Resource::wrap(r, Arc::clone(&self.runtime)))
    }

    fn list(
        &self,
        result: Result<crate::rest::ResourceList, MixcloudError>,
    ) -> Result<ResourceList, MixcloudError> {
        result.map(|l| ResourceList::wrap(l, Arc::clone(&self.runtime)))
    }
}
