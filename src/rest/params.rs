//! Request parameters: pagination, search types and embed display options.
//!
//! Mixcloud lists are paginated with `offset`/`limit` and can be bounded in
//! time with `since`/`until`. [`Pagination`] also accepts `page`/`per_page`,
//! translated into `offset`/`limit`. The two strategies are mutually
//! exclusive; mixing them is rejected before any request is made.
//!
//! # Example
//!
//! ```rust
//! use mixcloud_api::rest::Pagination;
//!
//! let query = Pagination::new().page(2).per_page(10).to_query().unwrap();
//! assert_eq!(
//!     query,
//!     vec![("offset".to_string(), "20".to_string()), ("limit".to_string(), "10".to_string())]
//! );
//!
//! assert!(Pagination::new().offset(40).limit(80).page(2).to_query().is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::config::DEFAULT_PER_PAGE;
use crate::rest::datetime::{parse_datetime, to_timestamp};
use crate::rest::errors::MixcloudError;

/// A point in time given as a UNIX timestamp, a datetime or text.
///
/// Text is parsed leniently (see [`parse_datetime`]); every variant is
/// normalized to UNIX seconds before it is sent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Timestamp {
    /// Seconds since the UNIX epoch.
    Unix(i64),
    /// A datetime-like string, such as `"2019-11-10T09:33:04"`.
    Text(String),
    /// A UTC datetime.
    DateTime(DateTime<Utc>),
}

impl Timestamp {
    /// Returns the timestamp as UNIX seconds.
    ///
    /// # Errors
    ///
    /// Returns [`MixcloudError::BadArgument`] if text cannot be parsed.
    pub fn to_unix(&self) -> Result<i64, MixcloudError> {
        match self {
            Self::Unix(secs) => Ok(*secs),
            Self::DateTime(dt) => Ok(to_timestamp(dt)),
            Self::Text(text) => parse_datetime(text).map(|dt| to_timestamp(&dt)).ok_or_else(|| {
                MixcloudError::bad_argument(format!(
                    "expected a datetime, a valid datetime string or a timestamp, got '{text}'"
                ))
            }),
        }
    }

    /// Returns the timestamp as a UTC datetime.
    ///
    /// # Errors
    ///
    /// Returns [`MixcloudError::BadArgument`] if text cannot be parsed or
    /// the timestamp is out of range.
    pub fn to_datetime(&self) -> Result<DateTime<Utc>, MixcloudError> {
        match self {
            Self::DateTime(dt) => Ok(*dt),
            other => {
                let secs = other.to_unix()?;
                DateTime::from_timestamp(secs, 0).ok_or_else(|| {
                    MixcloudError::bad_argument(format!("timestamp {secs} is out of range"))
                })
            }
        }
    }
}

impl From<i64> for Timestamp {
    fn from(secs: i64) -> Self {
        Self::Unix(secs)
    }
}

impl From<&str> for Timestamp {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Timestamp {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::DateTime(dt)
    }
}

/// Pagination parameters for list endpoints.
///
/// All options are optional. `page` cannot be combined with `offset`,
/// `limit`, `since` or `until`, and `per_page` cannot be combined with
/// `offset` or `limit`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Pagination {
    offset: Option<u64>,
    limit: Option<u64>,
    since: Option<Timestamp>,
    until: Option<Timestamp>,
    page: Option<u64>,
    per_page: Option<u64>,
}

impl Pagination {
    /// Creates empty pagination parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of items to skip.
    #[must_use]
    pub const fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Sets the maximum number of items per response.
    #[must_use]
    pub const fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Only return items after this point in time.
    #[must_use]
    pub fn since(mut self, since: impl Into<Timestamp>) -> Self {
        self.since = Some(since.into());
        self
    }

    /// Only return items before this point in time.
    #[must_use]
    pub fn until(mut self, until: impl Into<Timestamp>) -> Self {
        self.until = Some(until.into());
        self
    }

    /// Sets the zero-based page number.
    #[must_use]
    pub const fn page(mut self, page: u64) -> Self {
        self.page = Some(page);
        self
    }

    /// Sets the page size used with [`page`](Self::page). Defaults to 20.
    #[must_use]
    pub const fn per_page(mut self, per_page: u64) -> Self {
        self.per_page = Some(per_page);
        self
    }

    /// Returns `true` if no option is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.offset.is_none()
            && self.limit.is_none()
            && self.since.is_none()
            && self.until.is_none()
            && self.page.is_none()
            && self.per_page.is_none()
    }

    /// Validates the options and returns the query parameters to send.
    ///
    /// `page` becomes `offset = page * per_page` and `limit = per_page`;
    /// `since`/`until` become UNIX timestamps.
    ///
    /// # Errors
    ///
    /// Returns [`MixcloudError::BadArgument`] if the two pagination
    /// strategies are mixed or a timestamp cannot be parsed.
    pub fn to_query(&self) -> Result<Vec<(String, String)>, MixcloudError> {
        let explicit_window = self.offset.is_some() || self.limit.is_some();

        if self.page.is_some()
            && (explicit_window || self.since.is_some() || self.until.is_some())
        {
            return Err(MixcloudError::bad_argument(
                "page and offset/limit/since/until cannot be specified simultaneously",
            ));
        }
        if self.per_page.is_some() && explicit_window {
            return Err(MixcloudError::bad_argument(
                "per_page and offset/limit cannot be specified simultaneously",
            ));
        }

        let (offset, limit) = match (self.page, self.per_page) {
            (Some(page), per_page) => {
                let per_page = per_page.unwrap_or(DEFAULT_PER_PAGE);
                let offset = page.checked_mul(per_page).ok_or_else(|| {
                    MixcloudError::bad_argument("page * per_page is out of range")
                })?;
                (Some(offset), Some(per_page))
            }
            (None, Some(per_page)) => (None, Some(per_page)),
            (None, None) => (self.offset, self.limit),
        };

        let mut query = Vec::new();
        if let Some(offset) = offset {
            query.push(("offset".to_string(), offset.to_string()));
        }
        if let Some(limit) = limit {
            query.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(since) = &self.since {
            query.push(("since".to_string(), since.to_unix()?.to_string()));
        }
        if let Some(until) = &self.until {
            query.push(("until".to_string(), until.to_unix()?.to_string()));
        }
        Ok(query)
    }
}

/// The kind of resource a search looks for.
///
/// ```rust
/// use mixcloud_api::rest::SearchType;
///
/// assert_eq!("user".parse::<SearchType>().unwrap(), SearchType::User);
/// assert!("bogus".parse::<SearchType>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SearchType {
    /// Search cloudcasts.
    #[default]
    Cloudcast,
    /// Search users.
    User,
    /// Search tags.
    Tag,
}

impl SearchType {
    /// Returns the value sent as the `type` query parameter.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cloudcast => "cloudcast",
            Self::User => "user",
            Self::Tag => "tag",
        }
    }
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchType {
    type Err = MixcloudError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cloudcast" => Ok(Self::Cloudcast),
            "user" => Ok(Self::User),
            "tag" => Ok(Self::Tag),
            other => Err(MixcloudError::bad_argument(format!(
                "search type must be one of cloudcast, user, tag; got '{other}'"
            ))),
        }
    }
}

/// Display options for embed and oEmbed requests.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EmbedOptions {
    width: Option<u32>,
    height: Option<u32>,
    color: Option<String>,
}

impl EmbedOptions {
    /// Creates empty display options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the widget width, in pixels.
    #[must_use]
    pub const fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    /// Sets the widget height, in pixels.
    #[must_use]
    pub const fn height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    /// Sets the widget color, as a hex string such as `"ff0000"`.
    #[must_use]
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Returns the query parameters for the options that are set.
    #[must_use]
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(width) = self.width {
            query.push(("width".to_string(), width.to_string()));
        }
        if let Some(height) = self.height {
            query.push(("height".to_string(), height.to_string()));
        }
        if let Some(color) = &self.color {
            query.push(("color".to_string(), color.clone()));
        }
        query
    }
}
