//! Paginated lists of resources.
//!
//! Mixcloud returns collections as `{"data": [...], "paging": {"next": ...,
//! "previous": ...}, "name": ...}`. A [`ResourceList`] holds the items
//! fetched so far and follows `paging.next` on demand: [`ResourceList::item`]
//! fetches exactly as many pages as needed to reach an index, and
//! [`ResourceList::stream`] yields every item, fetching lazily.
//!
//! # Example
//!
//! ```rust,ignore
//! use futures::TryStreamExt;
//! use mixcloud_api::{Mixcloud, Pagination};
//!
//! let mut popular = mixcloud.popular(&Pagination::new().limit(20)).await?;
//! let fiftieth = popular.item(49).await?;
//!
//! let all: Vec<_> = popular.stream().try_collect().await?;
//! ```

use std::fmt;
use std::ops::Index;

use futures::stream::{self, Stream};

use crate::clients::api::Mixcloud;
use crate::rest::access::AccessDict;
use crate::rest::errors::MixcloudError;
use crate::rest::params::Pagination;
use crate::rest::path::normalize_key;
use crate::rest::resource::Resource;

/// Fields holding the items of a list response, in lookup order.
const ITEM_FIELDS: [&str; 2] = ["data", "results"];

/// Returns `true` if `body` has the shape of a list response: an object
/// with an array under `data` or `results`.
#[must_use]
pub fn is_list_shape(body: &serde_json::Value) -> bool {
    body.as_object().is_some_and(|map| {
        ITEM_FIELDS
            .iter()
            .any(|field| map.get(*field).is_some_and(serde_json::Value::is_array))
    })
}

/// A lazily paginated list of partial resources.
#[derive(Clone)]
pub struct ResourceList {
    items: Vec<Resource>,
    name: Option<String>,
    count: Option<u64>,
    next: Option<String>,
    previous: Option<String>,
    cursor: Option<String>,
    meta: AccessDict,
    client: Mixcloud,
}

impl ResourceList {
    /// Wraps a decoded list response.
    pub(crate) fn from_map(
        mut map: serde_json::Map<String, serde_json::Value>,
        client: &Mixcloud,
    ) -> Self {
        // Only an array-valued field is taken; anything else stays in `meta`
        let raw_items = ITEM_FIELDS
            .iter()
            .find(|field| map.get(**field).is_some_and(serde_json::Value::is_array))
            .and_then(|field| match map.remove(*field) {
                Some(serde_json::Value::Array(items)) => Some(items),
                _ => None,
            })
            .unwrap_or_default();

        // Items that are not objects cannot be resources and are skipped
        let total = raw_items.len();
        let items: Vec<Resource> = raw_items
            .into_iter()
            .filter_map(|item| match item {
                serde_json::Value::Object(obj) => Some(Resource::from_map(obj, false, client)),
                _ => None,
            })
            .collect();
        if items.len() < total {
            tracing::warn!(
                skipped = total - items.len(),
                "Skipping list items that are not objects"
            );
        }

        let paging = map.get("paging");
        let next = paging_url(paging, "next");
        let previous = paging_url(paging, "previous");
        let name = map
            .get("name")
            .and_then(serde_json::Value::as_str)
            .map(ToString::to_string);
        let count = ["count", "total"]
            .iter()
            .find_map(|field| map.get(*field).and_then(serde_json::Value::as_u64));

        Self {
            items,
            name,
            count,
            cursor: next.clone(),
            next,
            previous,
            meta: AccessDict::wrap(map, client),
            client: client.clone(),
        }
    }

    /// The name of the collection, e.g. `Spartacus's followers`.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The total number of items, when the API reports it.
    #[must_use]
    pub const fn count(&self) -> Option<u64> {
        self.count
    }

    /// The URL of the page after the first one fetched, if any.
    #[must_use]
    pub fn next_url(&self) -> Option<&str> {
        self.next.as_deref()
    }

    /// The URL of the page before the first one fetched, if any.
    #[must_use]
    pub fn previous_url(&self) -> Option<&str> {
        self.previous.as_deref()
    }

    /// Remaining fields of the response, including `paging` and `name`.
    #[must_use]
    pub const fn meta(&self) -> &AccessDict {
        &self.meta
    }

    /// The number of items fetched so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if no item has been fetched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns `true` once every page has been fetched.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.cursor.is_none()
    }

    /// Returns a fetched item, without fetching more pages.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Resource> {
        self.items.get(index)
    }

    /// Returns the first fetched item whose key is `key`.
    ///
    /// Only items fetched so far are searched; no page is fetched.
    #[must_use]
    pub fn by_key(&self, key: &str) -> Option<&Resource> {
        let key = normalize_key(key);
        self.items.iter().find(|r| r.key() == key)
    }

    /// Iterates over the items fetched so far.
    pub fn iter(&self) -> std::slice::Iter<'_, Resource> {
        self.items.iter()
    }

    /// The items fetched so far.
    #[must_use]
    pub fn items(&self) -> &[Resource] {
        &self.items
    }

    /// Fetches the next page and appends its items.
    ///
    /// Returns the number of new items; `0` once the list is exhausted.
    ///
    /// # Errors
    ///
    /// Returns any error of the underlying request. The list is left as it
    /// was and the page can be fetched again.
    pub async fn fetch_next_page(&mut self) -> Result<usize, MixcloudError> {
        let Some(url) = self.cursor.clone() else {
            return Ok(0);
        };

        tracing::debug!(url = %url, fetched = self.items.len(), "Fetching next page");

        let page = self.client.get_list(&url, &Pagination::new()).await?;
        let added = page.items.len();
        self.cursor = if added == 0 { None } else { page.cursor };
        self.items.extend(page.items);
        if self.count.is_none() {
            self.count = page.count;
        }
        Ok(added)
    }

    /// Returns item `index`, fetching pages until it is available.
    ///
    /// # Errors
    ///
    /// Returns [`MixcloudError::IndexOutOfRange`] if the list runs out of
    /// pages first, or any error of the underlying requests.
    pub async fn item(&mut self, index: usize) -> Result<&Resource, MixcloudError> {
        while index >= self.items.len() {
            if self.is_exhausted() {
                return Err(MixcloudError::IndexOutOfRange {
                    index,
                    len: self.items.len(),
                });
            }
            self.fetch_next_page().await?;
        }
        Ok(&self.items[index])
    }

    /// Fetches the page after the first one fetched, as a new list.
    ///
    /// # Errors
    ///
    /// Returns any error of the underlying request.
    pub async fn next_page(&self) -> Result<Option<Self>, MixcloudError> {
        self.navigate(self.next.as_deref()).await
    }

    /// Fetches the page before the first one fetched, as a new list.
    ///
    /// # Errors
    ///
    /// Returns any error of the underlying request.
    pub async fn previous_page(&self) -> Result<Option<Self>, MixcloudError> {
        self.navigate(self.previous.as_deref()).await
    }

    /// Streams every item from the first one, fetching pages on demand.
    ///
    /// Each call starts over at the first item; items already fetched are
    /// not fetched again. The stream ends after the first error.
    pub fn stream(&mut self) -> impl Stream<Item = Result<Resource, MixcloudError>> + '_ {
        stream::try_unfold((self, 0_usize), |(list, index)| async move {
            match list.item(index).await {
                Ok(resource) => {
                    let resource = resource.clone();
                    Ok(Some((resource, (list, index + 1))))
                }
                Err(MixcloudError::IndexOutOfRange { .. }) => Ok(None),
                Err(e) => Err(e),
            }
        })
    }

    async fn navigate(&self, url: Option<&str>) -> Result<Option<Self>, MixcloudError> {
        match url {
            Some(url) => self.client.get_list(url, &Pagination::new()).await.map(Some),
            None => Ok(None),
        }
    }
}

fn paging_url(paging: Option<&serde_json::Value>, direction: &str) -> Option<String> {
    paging?
        .get(direction)?
        .as_str()
        .filter(|url| !url.is_empty())
        .map(ToString::to_string)
}

impl Index<usize> for ResourceList {
    type Output = Resource;

    /// # Panics
    ///
    /// Panics if `index` has not been fetched. Use
    /// [`ResourceList::item`] to fetch on demand.
    fn index(&self, index: usize) -> &Self::Output {
        &self.items[index]
    }
}

impl<'a> IntoIterator for &'a ResourceList {
    type Item = &'a Resource;
    type IntoIter = std::slice::Iter<'a, Resource>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl PartialEq for ResourceList {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
            && self.name == other.name
            && self.count == other.count
            && self.next == other.next
            && self.previous == other.previous
            && self.cursor == other.cursor
            && self.meta == other.meta
    }
}

impl fmt::Debug for ResourceList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceList")
            .field("name", &self.name)
            .field("len", &self.items.len())
            .field("count", &self.count)
            .field("next", &self.next)
            .field("previous", &self.previous)
            .field("exhausted", &self.is_exhausted())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for ResourceList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "<ResourceList '{name}'>"),
            None => f.write_str("<ResourceList>"),
        }
    }
}

// Verify ResourceList is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceList>();
};
