//! Mixcloud resources: users, cloudcasts, tags, categories and the like.
//!
//! A [`Resource`] is a mapping with a `"type"` field. Resources fetched
//! directly with [`Mixcloud::get`] are *full*; resources embedded in other
//! responses (a cloudcast's `user`, the items of a list) are *partial* and
//! can be upgraded with [`Resource::load`].
//!
//! # Example
//!
//! ```rust,ignore
//! use mixcloud_api::{FieldAccess, Mixcloud, Pagination};
//!
//! let mut cloudcast = mixcloud.get("/spartacus/party-time/").await?;
//! let user = cloudcast.resource_field("user")?.clone();
//! assert!(!user.is_full());
//!
//! let followers = user.followers(&Pagination::new().limit(10)).await?;
//! cloudcast.favorite().await?;
//! ```

use std::fmt;
use std::ops::Index;

use crate::clients::api::{Embed, Mixcloud, UploadOptions};
use crate::rest::access::{AccessDict, FieldAccess};
use crate::rest::errors::MixcloudError;
use crate::rest::params::{EmbedOptions, Pagination};
use crate::rest::path::is_absolute_url;
use crate::rest::resource_list::ResourceList;
use crate::rest::value::Value;

/// A Mixcloud resource, identified by its key.
#[derive(Clone)]
pub struct Resource {
    key: String,
    kind: String,
    full: bool,
    data: AccessDict,
    client: Mixcloud,
}

impl Resource {
    /// Wraps a decoded JSON object that has a `"type"` field.
    pub(crate) fn from_map(
        map: serde_json::Map<String, serde_json::Value>,
        full: bool,
        client: &Mixcloud,
    ) -> Self {
        let key = map
            .get("key")
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default()
            .to_string();
        let kind = map
            .get("type")
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default()
            .to_string();

        Self {
            key,
            kind,
            full,
            data: AccessDict::wrap(map, client),
            client: client.clone(),
        }
    }

    /// Sets the key of a resource whose body did not carry one.
    pub(crate) fn with_fallback_key(mut self, key: &str) -> Self {
        if self.key.is_empty() {
            self.key = key.to_string();
        }
        self
    }

    /// The canonical path of this resource, e.g. `/spartacus/party-time/`.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The resource type, e.g. `user` or `cloudcast`.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Returns `true` if this resource holds every field the API reports
    /// for it.
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.full
    }

    /// The decoded fields of this resource.
    #[must_use]
    pub const fn data(&self) -> &AccessDict {
        &self.data
    }

    /// Returns the value of `name`, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.data.get(name)
    }

    /// The client this resource was decoded by.
    #[must_use]
    pub const fn client(&self) -> &Mixcloud {
        &self.client
    }

    /// Fetches this resource again and replaces its fields with the result.
    ///
    /// Afterwards the resource is full. The key is kept.
    ///
    /// # Errors
    ///
    /// Returns [`MixcloudError::BadArgument`] if the resource has no key,
    /// [`MixcloudError::NotFound`] if it no longer exists, or any other error
    /// of [`Mixcloud::get`].
    pub async fn load(&mut self) -> Result<&mut Self, MixcloudError> {
        if self.key.is_empty() {
            return Err(MixcloudError::bad_argument(format!(
                "cannot load a {} resource without a key",
                if self.kind.is_empty() { "typeless" } else { self.kind.as_str() }
            )));
        }
        tracing::debug!(key = %self.key, kind = %self.kind, "Loading resource");

        let fresh = self.client.get(&self.key).await?;
        self.kind = fresh.kind;
        self.data = fresh.data;
        self.full = true;
        Ok(self)
    }

    /// Loads this resource only if it is partial.
    ///
    /// # Errors
    ///
    /// See [`load`](Self::load).
    pub async fn load_if_partial(&mut self) -> Result<&mut Self, MixcloudError> {
        if self.full {
            Ok(self)
        } else {
            self.load().await
        }
    }

    /// Returns the names of the connections this resource advertises.
    ///
    /// Only full resources fetched with metadata carry them.
    #[must_use]
    pub fn connection_names(&self) -> Vec<&str> {
        self.advertised_connections()
            .map(|connections| connections.keys().collect())
            .unwrap_or_default()
    }

    /// Returns the URL or key path of connection `name`.
    ///
    /// The URL advertised in `metadata.connections` is preferred; otherwise
    /// the connection is assumed to live at `{key}{name}/`.
    #[must_use]
    pub fn connection_url(&self, name: &str) -> String {
        self.advertised_connections()
            .and_then(|connections| connections.get(name))
            .and_then(Value::as_str)
            .filter(|url| is_absolute_url(url))
            .map_or_else(
                || crate::rest::path::join_segment(&self.key, name),
                ToString::to_string,
            )
    }

    /// Lists connection `name` of this resource, e.g. `followers`.
    ///
    /// Any name is accepted; the API answers unknown connections with a 404.
    ///
    /// # Errors
    ///
    /// Returns [`MixcloudError::NotFound`] for unknown connections, or
    /// [`MixcloudError::BadArgument`] for invalid pagination.
    pub async fn connection(
        &self,
        name: &str,
        pagination: &Pagination,
    ) -> Result<ResourceList, MixcloudError> {
        let url = self.connection_url(name);
        if is_absolute_url(&url) {
            self.client.get_list(&url, pagination).await
        } else {
            self.client.connection(&self.key, name, pagination).await
        }
    }

    /// Lists the followers of this user.
    ///
    /// # Errors
    ///
    /// See [`connection`](Self::connection).
    pub async fn followers(&self, pagination: &Pagination) -> Result<ResourceList, MixcloudError> {
        self.connection("followers", pagination).await
    }

    /// Lists the users this user follows.
    ///
    /// # Errors
    ///
    /// See [`connection`](Self::connection).
    pub async fn following(&self, pagination: &Pagination) -> Result<ResourceList, MixcloudError> {
        self.connection("following", pagination).await
    }

    /// Lists the cloudcasts of this user or tag.
    ///
    /// # Errors
    ///
    /// See [`connection`](Self::connection).
    pub async fn cloudcasts(&self, pagination: &Pagination) -> Result<ResourceList, MixcloudError> {
        self.connection("cloudcasts", pagination).await
    }

    /// Lists the favorites of this user, or the users favoriting this cloudcast.
    ///
    /// # Errors
    ///
    /// See [`connection`](Self::connection).
    pub async fn favorites(&self, pagination: &Pagination) -> Result<ResourceList, MixcloudError> {
        self.connection("favorites", pagination).await
    }

    /// Lists the listens of this user or cloudcast.
    ///
    /// # Errors
    ///
    /// See [`connection`](Self::connection).
    pub async fn listens(&self, pagination: &Pagination) -> Result<ResourceList, MixcloudError> {
        self.connection("listens", pagination).await
    }

    /// Lists the comments on this resource.
    ///
    /// # Errors
    ///
    /// See [`connection`](Self::connection).
    pub async fn comments(&self, pagination: &Pagination) -> Result<ResourceList, MixcloudError> {
        self.connection("comments", pagination).await
    }

    /// Lists the feed of this user.
    ///
    /// # Errors
    ///
    /// See [`connection`](Self::connection).
    pub async fn feed(&self, pagination: &Pagination) -> Result<ResourceList, MixcloudError> {
        self.connection("feed", pagination).await
    }

    /// Lists the playlists of this user.
    ///
    /// # Errors
    ///
    /// See [`connection`](Self::connection).
    pub async fn playlists(&self, pagination: &Pagination) -> Result<ResourceList, MixcloudError> {
        self.connection("playlists", pagination).await
    }

    /// Follows this user.
    ///
    /// # Errors
    ///
    /// Returns [`MixcloudError::Unauthorized`] without a token.
    pub async fn follow(&self) -> Result<AccessDict, MixcloudError> {
        self.client.follow(&self.key).await
    }

    /// Unfollows this user.
    ///
    /// # Errors
    ///
    /// Returns [`MixcloudError::Unauthorized`] without a token.
    pub async fn unfollow(&self) -> Result<AccessDict, MixcloudError> {
        self.client.unfollow(&self.key).await
    }

    /// Favorites this cloudcast.
    ///
    /// # Errors
    ///
    /// Returns [`MixcloudError::Unauthorized`] without a token.
    pub async fn favorite(&self) -> Result<AccessDict, MixcloudError> {
        self.client.favorite(&self.key).await
    }

    /// Unfavorites this cloudcast.
    ///
    /// # Errors
    ///
    /// Returns [`MixcloudError::Unauthorized`] without a token.
    pub async fn unfavorite(&self) -> Result<AccessDict, MixcloudError> {
        self.client.unfavorite(&self.key).await
    }

    /// Reposts this cloudcast.
    ///
    /// # Errors
    ///
    /// Returns [`MixcloudError::Unauthorized`] without a token.
    pub async fn repost(&self) -> Result<AccessDict, MixcloudError> {
        self.client.repost(&self.key).await
    }

    /// Removes the repost of this cloudcast.
    ///
    /// # Errors
    ///
    /// Returns [`MixcloudError::Unauthorized`] without a token.
    pub async fn unrepost(&self) -> Result<AccessDict, MixcloudError> {
        self.client.unrepost(&self.key).await
    }

    /// Adds this cloudcast to the listen-later list.
    ///
    /// # Errors
    ///
    /// Returns [`MixcloudError::Unauthorized`] without a token.
    pub async fn listen_later(&self) -> Result<AccessDict, MixcloudError> {
        self.client.listen_later(&self.key).await
    }

    /// Removes this cloudcast from the listen-later list.
    ///
    /// # Errors
    ///
    /// Returns [`MixcloudError::Unauthorized`] without a token.
    pub async fn unlisten_later(&self) -> Result<AccessDict, MixcloudError> {
        self.client.unlisten_later(&self.key).await
    }

    /// Edits this upload. See [`Mixcloud::edit`].
    ///
    /// # Errors
    ///
    /// Returns [`MixcloudError::BadArgument`] for invalid options or
    /// [`MixcloudError::Unauthorized`] without a token.
    pub async fn edit(
        &self,
        name: Option<&str>,
        options: &UploadOptions,
    ) -> Result<AccessDict, MixcloudError> {
        self.client.edit(&self.key, name, options).await
    }

    /// Returns the embedding information of this cloudcast.
    ///
    /// # Errors
    ///
    /// See [`Mixcloud::embed_json`].
    pub async fn embed_json(&self, options: &EmbedOptions) -> Result<AccessDict, MixcloudError> {
        self.client.embed_json(&self.key, options).await
    }

    /// Returns the HTML embedding code of this cloudcast.
    ///
    /// # Errors
    ///
    /// See [`Mixcloud::embed_html`].
    pub async fn embed_html(&self, options: &EmbedOptions) -> Result<String, MixcloudError> {
        self.client.embed_html(&self.key, options).await
    }

    /// Returns the oEmbed information of this resource.
    ///
    /// # Errors
    ///
    /// See [`Mixcloud::oembed`].
    pub async fn oembed(&self, options: &EmbedOptions) -> Result<Embed, MixcloudError> {
        self.client.oembed(&self.key, options).await
    }

    fn advertised_connections(&self) -> Option<&AccessDict> {
        let connections = self.data.get("metadata")?.get("connections")?;
        match connections {
            Value::Dict(d) => Some(d),
            Value::Resource(r) => Some(r.data()),
            _ => None,
        }
    }
}

impl FieldAccess for Resource {
    fn lookup(&self, name: &str) -> Option<&Value> {
        self.data.get(name)
    }

    fn is_partial(&self) -> bool {
        !self.full
    }
}

impl Index<&str> for Resource {
    type Output = Value;

    /// # Panics
    ///
    /// Panics if the field is absent.
    fn index(&self, name: &str) -> &Self::Output {
        &self.data[name]
    }
}

impl PartialEq for Resource {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
            && self.kind == other.kind
            && self.full == other.full
            && self.data == other.data
    }
}

impl fmt::Debug for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("key", &self.key)
            .field("kind", &self.kind)
            .field("full", &self.full)
            .field("data", &self.data)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Resource: {} '{}'>", title_case(&self.kind), self.key)
    }
}

/// `cloudcast_tag` -> `Cloudcast Tag`.
fn title_case(kind: &str) -> String {
    kind.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// Verify Resource is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Resource>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::api::test_client;
    use serde_json::json;

    fn resource(body: serde_json::Value, full: bool) -> Resource {
        match body {
            serde_json::Value::Object(map) => Resource::from_map(map, full, &test_client()),
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn test_key_and_kind_come_from_fields() {
        let r = resource(json!({"key": "/bob/mix/", "type": "cloudcast", "name": "Mix"}), true);
        assert_eq!(r.key(), "/bob/mix/");
        assert_eq!(r.kind(), "cloudcast");
        assert!(r.is_full());
        assert_eq!(r["name"], "Mix");
    }

    #[test]
    fn test_missing_field_reports_partial_state() {
        let partial = resource(json!({"key": "/bob/", "type": "user"}), false);
        assert!(matches!(
            partial.field("city"),
            Err(MixcloudError::NoSuchField { partial: true, .. })
        ));

        let full = resource(json!({"key": "/bob/", "type": "user"}), true);
        assert!(matches!(
            full.field("city"),
            Err(MixcloudError::NoSuchField { partial: false, .. })
        ));
    }

    #[test]
    fn test_display_title_cases_kind() {
        let r = resource(json!({"key": "/bob/mix/", "type": "cloudcast"}), true);
        assert_eq!(r.to_string(), "<Resource: Cloudcast '/bob/mix/'>");
        assert_eq!(title_case("cloudcast_tag"), "Cloudcast Tag");
    }

    #[test]
    fn test_connection_url_prefers_advertised_url() {
        let r = resource(
            json!({
                "key": "/bob/",
                "type": "user",
                "metadata": {
                    "type": "user",
                    "connections": {
                        "followers": "https://api.mixcloud.com/bob/followers/",
                        "listens": "https://api.mixcloud.com/bob/listens/"
                    }
                }
            }),
            true,
        );
        assert_eq!(r.connection_url("followers"), "https://api.mixcloud.com/bob/followers/");
        assert_eq!(r.connection_url("playlists"), "bob/playlists/");

        let mut names = r.connection_names();
        names.sort_unstable();
        assert_eq!(names, vec!["followers", "listens"]);
    }

    #[test]
    fn test_connection_names_empty_without_metadata() {
        let r = resource(json!({"key": "/bob/", "type": "user"}), false);
        assert!(r.connection_names().is_empty());
        assert_eq!(r.connection_url("cloudcasts"), "bob/cloudcasts/");
    }

    #[test]
    fn test_fallback_key_only_fills_missing_key() {
        let r = resource(json!({"type": "user"}), true).with_fallback_key("/bob/");
        assert_eq!(r.key(), "/bob/");

        let r =
            resource(json!({"key": "/alice/", "type": "user"}), true).with_fallback_key("/bob/");
        assert_eq!(r.key(), "/alice/");
    }

    #[test]
    fn test_equality_ignores_client() {
        let a = resource(json!({"key": "/bob/", "type": "user"}), true);
        let b = resource(json!({"key": "/bob/", "type": "user"}), true);
        assert_eq!(a, b);
    }
}
