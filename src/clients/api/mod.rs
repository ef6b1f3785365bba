//! The Mixcloud API client.
//!
//! [`Mixcloud`] sends requests through a [`Transport`](crate::clients::Transport)
//! and decodes responses by their shape: lists become
//! [`ResourceList`](crate::ResourceList)s, anything else a full
//! [`Resource`](crate::Resource).
//!
//! Operations are grouped by concern:
//!
//! - fetching resources and lists (`get`, `get_list`, `popular`, `search`, ...)
//! - personal actions and embedding information ([`Action`], [`Embed`])
//! - uploads and edits ([`UploadOptions`], [`Section`])
//!
//! # Example
//!
//! ```rust,ignore
//! use mixcloud_api::{AccessToken, Mixcloud, MixcloudConfig, Pagination, SearchType};
//!
//! let config = MixcloudConfig::builder()
//!     .access_token(AccessToken::new("token")?)
//!     .build()?;
//! let mixcloud = Mixcloud::new(config)?;
//!
//! let me = mixcloud.me().await?;
//! let found = mixcloud.search("deep house", SearchType::Cloudcast, &Pagination::new()).await?;
//! mixcloud.favorite(found[0].key()).await?;
//! ```

mod actions;
mod client;
mod upload;

pub use actions::{Action, Embed};
pub use client::{Decoded, Mixcloud};
pub use upload::{Section, UploadOptions};

#[cfg(test)]
pub(crate) use tests::test_client;
