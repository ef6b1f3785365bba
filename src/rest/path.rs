//! Path building for Mixcloud API endpoints.
//!
//! Mixcloud identifies every resource by a *key*, a path such as
//! `/spartacus/party-time/`. Endpoints are either fixed (`popular/`),
//! templated (`discover/{tag}/`) or derived from a key (`{key}follow/`).
//!
//! # Example
//!
//! ```rust
//! use mixcloud_api::rest::{build_path, join_segment, normalize_key, Endpoint};
//! use std::collections::HashMap;
//!
//! assert_eq!(normalize_key("spartacus"), "/spartacus/");
//! assert_eq!(join_segment("/spartacus/", "followers"), "spartacus/followers/");
//!
//! let mut ids = HashMap::new();
//! ids.insert("tag", "house");
//! assert_eq!(build_path(Endpoint::Discover.template(), &ids), "discover/house/");
//! ```

use std::collections::HashMap;
use std::fmt::Display;

/// Well-known API endpoints, relative to the API root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// The authorized user (`me/`).
    Me,
    /// Information about a tag (`discover/{tag}/`).
    Discover,
    /// Popular cloudcasts (`popular/`).
    Popular,
    /// Hot cloudcasts (`popular/hot/`).
    Hot,
    /// New cloudcasts (`new/`).
    New,
    /// Search (`search/`).
    Search,
    /// Cloudcast upload (`upload/`).
    Upload,
    /// Upload edit (`upload/{key}edit/`), `key` without leading slash.
    Edit,
}

impl Endpoint {
    /// Returns the path template of this endpoint.
    #[must_use]
    pub const fn template(&self) -> &'static str {
        match self {
            Self::Me => "me/",
            Self::Discover => "discover/{tag}/",
            Self::Popular => "popular/",
            Self::Hot => "popular/hot/",
            Self::New => "new/",
            Self::Search => "search/",
            Self::Upload => "upload/",
            Self::Edit => "upload/{key}edit/",
        }
    }
}

/// Builds a path by interpolating `{name}` placeholders of `template`.
#[must_use]
#[allow(clippy::implicit_hasher)]
pub fn build_path<V: Display>(template: &str, ids: &HashMap<&str, V>) -> String {
    let mut result = template.to_string();

    for (key, value) in ids {
        let placeholder = format!("{{{key}}}");
        result = result.replace(&placeholder, &value.to_string());
    }

    result
}

/// Surrounds `key` with slashes, if it is not already.
#[must_use]
pub fn normalize_key(key: &str) -> String {
    let trimmed = key.trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{trimmed}/")
    }
}

/// Returns `key` as a path relative to the API root, with a trailing slash.
#[must_use]
pub fn key_path(key: &str) -> String {
    normalize_key(key).trim_start_matches('/').to_string()
}

/// Appends `segment` to the path of `key`, e.g. `("/bob/", "follow")` -> `bob/follow/`.
#[must_use]
pub fn join_segment(key: &str, segment: &str) -> String {
    format!("{}{}/", key_path(key), segment.trim_matches('/'))
}

/// Returns `true` if `url` is an absolute http(s) URL rather than a key.
#[must_use]
pub fn is_absolute_url(url: &str) -> bool {
    let lower = url.get(..8).unwrap_or(url).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

// Verify types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Endpoint>();
};
