use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use tokio::runtime::Runtime;

use crate::clients::api::{Embed, UploadOptions};
use crate::rest::{self, AccessDict, EmbedOptions, FieldAccess, MixcloudError, Pagination};

/// The blocking counterpart of [`crate::Resource`].
///
/// Field access, `key()`, `kind()` and the other accessors are available
/// through `Deref`; operations that reach the network block.
#[derive(Clone, Debug)]
pub struct Resource {
    inner: rest::Resource,
    runtime: Arc<Runtime>,
}

impl Resource {
    pub(crate) const fn wrap(inner: rest::Resource, runtime: Arc<Runtime>) -> Self {
        Self { inner, runtime }
    }

    /// Returns the async resource this resource wraps.
    #[must_use]
    pub fn into_async(self) -> rest::Resource {
        self.inner
    }

    /// Returns the resource embedded in field `name`, e.g. a cloudcast's
    /// `user`, as a blocking resource sharing this one's runtime.
    ///
    /// # Errors
    ///
    /// Returns `NoSuchField` or `WrongType`.
    pub fn resource_field(&self, name: &str) -> Result<Self, MixcloudError> {
        let embedded = self.inner.resource_field(name)?.clone();
        Ok(self.adopt(embedded))
    }

    /// Returns every resource in list field `name`, e.g. a cloudcast's
    /// `tags`. Entries that are not resources are skipped.
    ///
    /// # Errors
    ///
    /// Returns `NoSuchField` or `WrongType`.
    pub fn resources_field(&self, name: &str) -> Result<Vec<Self>, MixcloudError> {
        let list = self.inner.list_field(name)?;
        Ok(list
            .iter()
            .filter_map(rest::Value::as_resource)
            .map(|r| self.adopt(r.clone()))
            .collect())
    }

    /// Wraps an async resource, such as one reached through `Deref`, so it
    /// runs on this resource's runtime.
    #[must_use]
    pub fn adopt(&self, resource: rest::Resource) -> Self {
        Self::wrap(resource, Arc::clone(&self.runtime))
    }

    /// See [`crate::Resource::load`].
    ///
    /// # Errors
    ///
    /// Same as the async operation.
    pub fn load(&mut self) -> Result<&mut Self, MixcloudError> {
        self.runtime.block_on(self.inner.load())?;
        Ok(self)
    }

    /// See [`crate::Resource::load_if_partial`].
    ///
    /// # Errors
    ///
    /// Same as the async operation.
    pub fn load_if_partial(&mut self) -> Result<&mut Self, MixcloudError> {
        self.runtime.block_on(self.inner.load_if_partial())?;
        Ok(self)
    }

    /// See [`crate::Resource::connection`].
    ///
    /// # Errors
    ///
    /// Same as the async operation.
    pub fn connection(
        &self,
        name: &str,
        pagination: &Pagination,
    ) -> Result<ResourceList, MixcloudError> {
        let list = self
            .runtime
            .block_on(self.inner.connection(name, pagination))?;
        Ok(ResourceList::wrap(list, Arc::clone(&self.runtime)))
    }

    /// Lists the followers of this user.
    ///
    /// # Errors
    ///
    /// Same as the async operation.
    pub fn followers(&self, pagination: &Pagination) -> Result<ResourceList, MixcloudError> {
        self.connection("followers", pagination)
    }

    /// Lists the users this user follows.
    ///
    /// # Errors
    ///
    /// Same as the async operation.
    pub fn following(&self, pagination: &Pagination) -> Result<ResourceList, MixcloudError> {
        self.connection("following", pagination)
    }

    /// Lists the cloudcasts of this user or tag.
    ///
    /// # Errors
    ///
    /// Same as the async operation.
    pub fn cloudcasts(&self, pagination: &Pagination) -> Result<ResourceList, MixcloudError> {
        self.connection("cloudcasts", pagination)
    }

    /// Lists favorites.
    ///
    /// # Errors
    ///
    /// Same as the async operation.
    pub fn favorites(&self, pagination: &Pagination) -> Result<ResourceList, MixcloudError> {
        self.connection("favorites", pagination)
    }

    /// Lists listens.
    ///
    /// # Errors
    ///
    /// Same as the async operation.
    pub fn listens(&self, pagination: &Pagination) -> Result<ResourceList, MixcloudError> {
        self.connection("listens", pagination)
    }

    /// Lists comments.
    ///
    /// # Errors
    ///
    /// Same as the async operation.
    pub fn comments(&self, pagination: &Pagination) -> Result<ResourceList, MixcloudError> {
        self.connection("comments", pagination)
    }

    /// Lists the feed of this user.
    ///
    /// # Errors
    ///
    /// Same as the async operation.
    pub fn feed(&self, pagination: &Pagination) -> Result<ResourceList, MixcloudError> {
        self.connection("feed", pagination)
    }

    /// Lists the playlists of this user.
    ///
    /// # Errors
    ///
    /// Same as the async operation.
    pub fn playlists(&self, pagination: &Pagination) -> Result<ResourceList, MixcloudError> {
        self.connection("playlists", pagination)
    }

    /// Follows this user.
    ///
    /// # Errors
    ///
    /// Same as the async operation.
    pub fn follow(&self) -> Result<AccessDict, MixcloudError> {
        self.runtime.block_on(self.inner.follow())
    }

    /// Unfollows this user.
    ///
    /// # Errors
    ///
    /// Same as the async operation.
    pub fn unfollow(&self) -> Result<AccessDict, MixcloudError> {
        self.runtime.block_on(self.inner.unfollow())
    }

    /// Favorites this cloudcast.
    ///
    /// # Errors
    ///
    /// Same as the async operation.
    pub fn favorite(&self) -> Result<AccessDict, MixcloudError> {
        self.runtime.block_on(self.inner.favorite())
    }

    /// Unfavorites this cloudcast.
    ///
    /// # Errors
    ///
    /// Same as the async operation.
    pub fn unfavorite(&self) -> Result<AccessDict, MixcloudError> {
        self.runtime.block_on(self.inner.unfavorite())
    }

    /// Reposts this cloudcast.
    ///
    /// # Errors
    ///
    /// Same as the async operation.
    pub fn repost(&self) -> Result<AccessDict, MixcloudError> {
        self.runtime.block_on(self.inner.repost())
    }

    /// Removes the repost of this cloudcast.
    ///
    /// # Errors
    ///
    /// Same as the async operation.
    pub fn unrepost(&self) -> Result<AccessDict, MixcloudError> {
        self.runtime.block_on(self.inner.unrepost())
    }

    /// Adds this cloudcast to the listen-later list.
    ///
    /// # Errors
    ///
    /// Same as the async operation.
    pub fn listen_later(&self) -> Result<AccessDict, MixcloudError> {
        self.runtime.block_on(self.inner.listen_later())
    }

    /// Removes this cloudcast from the listen-later list.
    ///
    /// # Errors
    ///
    /// Same as the async operation.
    pub fn unlisten_later(&self) -> Result<AccessDict, MixcloudError> {
        self.runtime.block_on(self.inner.unlisten_later())
    }

    /// See [`crate::Resource::edit`].
    ///
    /// # Errors
    ///
    /// Same as the async operation.
    pub fn edit(
        &self,
        name: Option<&str>,
        options: &UploadOptions,
    ) -> Result<AccessDict, MixcloudError> {
        self.runtime.block_on(self.inner.edit(name, options))
    }

    /// See [`crate::Resource::embed_json`].
    ///
    /// # Errors
    ///
    /// Same as the async operation.
    pub fn embed_json(&self, options: &EmbedOptions) -> Result<AccessDict, MixcloudError> {
        self.runtime.block_on(self.inner.embed_json(options))
    }

    /// See [`crate::Resource::embed_html`].
    ///
    /// # Errors
    ///
    /// Same as the async operation.
    pub fn embed_html(&self, options: &EmbedOptions) -> Result<String, MixcloudError> {
        self.runtime.block_on(self.inner.embed_html(options))
    }

    /// See [`crate::Resource::oembed`].
    ///
    /// # Errors
    ///
    /// Same as the async operation.
    pub fn oembed(&self, options: &EmbedOptions) -> Result<Embed, MixcloudError> {
        self.runtime.block_on(self.inner.oembed(options))
    }
}

impl Deref for Resource {
    type Target = rest::Resource;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl PartialEq for Resource {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

/// The blocking counterpart of [`crate::ResourceList`].
///
/// Iterating over `&mut list` yields every item, fetching pages as needed;
/// each iteration starts over at the first item.
#[derive(Clone, Debug)]
pub struct ResourceList {
    inner: rest::ResourceList,
    runtime: Arc<Runtime>,
}

impl ResourceList {
    pub(crate) const fn wrap(inner: rest::ResourceList, runtime: Arc<Runtime>) -> Self {
        Self { inner, runtime }
    }

    /// Returns the async list this list wraps.
    #[must_use]
    pub fn into_async(self) -> rest::ResourceList {
        self.inner
    }

    /// See [`crate::ResourceList::fetch_next_page`].
    ///
    /// # Errors
    ///
    /// Same as the async operation.
    pub fn fetch_next_page(&mut self) -> Result<usize, MixcloudError> {
        self.runtime.block_on(self.inner.fetch_next_page())
    }

    /// See [`crate::ResourceList::item`].
    ///
    /// # Errors
    ///
    /// Same as the async operation.
    pub fn item(&mut self, index: usize) -> Result<Resource, MixcloudError> {
        let runtime = Arc::clone(&self.runtime);
        let resource = runtime.block_on(self.inner.item(index))?.clone();
        Ok(Resource::wrap(resource, runtime))
    }

    /// Returns the already fetched item at `index` without fetching.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Resource> {
        self.inner
            .get(index)
            .map(|r| Resource::wrap(r.clone(), Arc::clone(&self.runtime)))
    }

    /// See [`crate::ResourceList::by_key`].
    #[must_use]
    pub fn by_key(&self, key: &str) -> Option<Resource> {
        self.inner
            .by_key(key)
            .map(|r| Resource::wrap(r.clone(), Arc::clone(&self.runtime)))
    }

    /// See [`crate::ResourceList::next_page`].
    ///
    /// # Errors
    ///
    /// Same as the async operation.
    pub fn next_page(&self) -> Result<Option<Self>, MixcloudError> {
        let page = self.runtime.block_on(self.inner.next_page())?;
        Ok(page.map(|l| Self::wrap(l, Arc::clone(&self.runtime))))
    }

    /// See [`crate::ResourceList::previous_page`].
    ///
    /// # Errors
    ///
    /// Same as the async operation.
    pub fn previous_page(&self) -> Result<Option<Self>, MixcloudError> {
        let page = self.runtime.block_on(self.inner.previous_page())?;
        Ok(page.map(|l| Self::wrap(l, Arc::clone(&self.runtime))))
    }

    /// Iterates over every item from the first one, fetching pages on demand.
    pub fn iter_all(&mut self) -> ResourceIter<'_> {
        ResourceIter {
            list: self,
            index: 0,
            done: false,
        }
    }
}

impl Deref for ResourceList {
    type Target = rest::ResourceList;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl fmt::Display for ResourceList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl<'a> IntoIterator for &'a mut ResourceList {
    type Item = Result<Resource, MixcloudError>;
    type IntoIter = ResourceIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_all()
    }
}

/// Lazy iterator over every item of a [`ResourceList`].
///
/// Ends after the last item or the first error.
#[derive(Debug)]
pub struct ResourceIter<'a> {
    list: &'a mut ResourceList,
    index: usize,
    done: bool,
}

impl Iterator for ResourceIter<'_> {
    type Item = Result<Resource, MixcloudError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.list.item(self.index) {
            Ok(resource) => {
                self.index += 1;
                Some(Ok(resource))
            }
            Err(MixcloudError::IndexOutOfRange { .. }) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
