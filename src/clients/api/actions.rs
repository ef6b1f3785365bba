//! Personal actions on resources and embedding information.

use std::fmt;

use crate::clients::api::Mixcloud;
use crate::clients::{HttpMethod, HttpRequest};
use crate::rest::{join_segment, normalize_key, AccessDict, EmbedOptions, MixcloudError};

/// An action the authorized user can take on a resource.
///
/// Each action is taken with a POST to `{key}{action}/` and undone with a
/// DELETE to the same URL.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    /// Follow a user.
    Follow,
    /// Favorite a cloudcast.
    Favorite,
    /// Repost a cloudcast.
    Repost,
    /// Add a cloudcast to the listen-later list.
    ListenLater,
}

impl Action {
    /// The path segment of this action.
    #[must_use]
    pub const fn segment(&self) -> &'static str {
        match self {
            Self::Follow => "follow",
            Self::Favorite => "favorite",
            Self::Repost => "repost",
            Self::ListenLater => "listen-later",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.segment())
    }
}

/// oEmbed information, in the format the server chose.
#[derive(Clone, Debug, PartialEq)]
pub enum Embed {
    /// A JSON response.
    Json(AccessDict),
    /// Any other response, as text.
    Html(String),
}

impl Embed {
    /// Returns the JSON data, if the response was JSON.
    #[must_use]
    pub const fn as_json(&self) -> Option<&AccessDict> {
        match self {
            Self::Json(d) => Some(d),
            Self::Html(_) => None,
        }
    }

    /// Returns the text, if the response was not JSON.
    #[must_use]
    pub fn as_html(&self) -> Option<&str> {
        match self {
            Self::Html(s) => Some(s),
            Self::Json(_) => None,
        }
    }
}

impl Mixcloud {
    /// Takes `action` on the resource identified by `key`.
    ///
    /// # Errors
    ///
    /// Returns [`MixcloudError::Unauthorized`] without a token, before any
    /// request is made, or the mapped error of a failed response.
    pub async fn act(&self, key: &str, action: Action) -> Result<AccessDict, MixcloudError> {
        self.send_action(key, action, HttpMethod::Post).await
    }

    /// Undoes `action` on the resource identified by `key`.
    ///
    /// # Errors
    ///
    /// See [`act`](Self::act).
    pub async fn undo(&self, key: &str, action: Action) -> Result<AccessDict, MixcloudError> {
        self.send_action(key, action, HttpMethod::Delete).await
    }

    /// Follows the user identified by `key`.
    ///
    /// # Errors
    ///
    /// See [`act`](Self::act).
    pub async fn follow(&self, key: &str) -> Result<AccessDict, MixcloudError> {
        self.act(key, Action::Follow).await
    }

    /// Unfollows the user identified by `key`.
    ///
    /// # Errors
    ///
    /// See [`act`](Self::act).
    pub async fn unfollow(&self, key: &str) -> Result<AccessDict, MixcloudError> {
        self.undo(key, Action::Follow).await
    }

    /// Favorites the cloudcast identified by `key`.
    ///
    /// # Errors
    ///
    /// See [`act`](Self::act).
    pub async fn favorite(&self, key: &str) -> Result<AccessDict, MixcloudError> {
        self.act(key, Action::Favorite).await
    }

    /// Unfavorites the cloudcast identified by `key`.
    ///
    /// # Errors
    ///
    /// See [`act`](Self::act).
    pub async fn unfavorite(&self, key: &str) -> Result<AccessDict, MixcloudError> {
        self.undo(key, Action::Favorite).await
    }

    /// Reposts the cloudcast identified by `key`.
    ///
    /// # Errors
    ///
    /// See [`act`](Self::act).
    pub async fn repost(&self, key: &str) -> Result<AccessDict, MixcloudError> {
        self.act(key, Action::Repost).await
    }

    /// Removes the repost of the cloudcast identified by `key`.
    ///
    /// # Errors
    ///
    /// See [`act`](Self::act).
    pub async fn unrepost(&self, key: &str) -> Result<AccessDict, MixcloudError> {
        self.undo(key, Action::Repost).await
    }

    /// Adds the cloudcast identified by `key` to the listen-later list.
    ///
    /// # Errors
    ///
    /// See [`act`](Self::act).
    pub async fn listen_later(&self, key: &str) -> Result<AccessDict, MixcloudError> {
        self.act(key, Action::ListenLater).await
    }

    /// Removes the cloudcast identified by `key` from the listen-later list.
    ///
    /// # Errors
    ///
    /// See [`act`](Self::act).
    pub async fn unlisten_later(&self, key: &str) -> Result<AccessDict, MixcloudError> {
        self.undo(key, Action::ListenLater).await
    }

    /// Returns embedding information for the cloudcast identified by `key`.
    ///
    /// # Errors
    ///
    /// Returns [`MixcloudError::NotFound`] for unknown cloudcasts.
    pub async fn embed_json(
        &self,
        key: &str,
        options: &EmbedOptions,
    ) -> Result<AccessDict, MixcloudError> {
        let url = self.config().api_root().join(&join_segment(key, "embed-json"));
        let request = HttpRequest::builder(HttpMethod::Get, url)
            .query(options.to_query())
            .build()?;
        let response = self.send(request, key).await?;
        self.native_result(response.body)
    }

    /// Returns the HTML embedding code for the cloudcast identified by `key`.
    ///
    /// # Errors
    ///
    /// Returns [`MixcloudError::NotFound`] for unknown cloudcasts.
    pub async fn embed_html(
        &self,
        key: &str,
        options: &EmbedOptions,
    ) -> Result<String, MixcloudError> {
        let url = self.config().api_root().join(&join_segment(key, "embed-html"));
        let request = HttpRequest::builder(HttpMethod::Get, url)
            .query(options.to_query())
            .build()?;
        Ok(self.send(request, key).await?.text)
    }

    /// Returns oEmbed information for the resource identified by `key`.
    ///
    /// The resource is identified to the oEmbed endpoint by its URL on the
    /// Mixcloud website.
    ///
    /// # Errors
    ///
    /// Returns [`MixcloudError::NotFound`] for unknown resources.
    pub async fn oembed(&self, key: &str, options: &EmbedOptions) -> Result<Embed, MixcloudError> {
        let target = self.config().mixcloud_root().join(&normalize_key(key));
        let request = HttpRequest::builder(HttpMethod::Get, self.config().oembed_root().as_ref())
            .query(options.to_query())
            .query_param("url", target)
            .build()?;

        let response = self.send(request, key).await?;
        if response.is_json() {
            Ok(Embed::Json(self.native_result(response.body)?))
        } else {
            Ok(Embed::Html(response.text))
        }
    }

    async fn send_action(
        &self,
        key: &str,
        action: Action,
        method: HttpMethod,
    ) -> Result<AccessDict, MixcloudError> {
        let token = self.require_token()?;
        let url = self.config().api_root().join(&join_segment(key, action.segment()));

        tracing::debug!(key = %key, action = %action, method = %method, "Sending action");

        let request = HttpRequest::builder(method, url)
            .query_param("access_token", token.as_ref())
            .build()?;
        let response = self.send(request, key).await?;
        self.native_result(response.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_segments() {
        assert_eq!(Action::Follow.segment(), "follow");
        assert_eq!(Action::ListenLater.to_string(), "listen-later");
    }

    #[tokio::test]
    async fn test_actions_require_token() {
        let client = crate::clients::api::test_client();
        assert!(matches!(
            client.follow("bob").await,
            Err(MixcloudError::Unauthorized { .. })
        ));
        assert!(matches!(
            client.unlisten_later("/bob/mix/").await,
            Err(MixcloudError::Unauthorized { .. })
        ));
    }

    #[test]
    fn test_embed_accessors() {
        let html = Embed::Html("<iframe></iframe>".to_string());
        assert_eq!(html.as_html(), Some("<iframe></iframe>"));
        assert!(html.as_json().is_none());
    }
}
