//! The Mixcloud data model.
//!
//! This module provides the types API responses are decoded into:
//!
//! - **[`Value`]**: A decoded JSON value, with datetimes and embedded
//!   resources recognized
//! - **[`AccessDict`] / [`AccessList`]**: Mappings and sequences with
//!   indexing and fallible, typed access through [`FieldAccess`]
//! - **[`Resource`]**: A user, cloudcast, tag or other typed object, with
//!   connections, actions and on-demand loading
//! - **[`ResourceList`]**: A lazily paginated list of resources
//! - **[`Pagination`]**: Paging parameters for list endpoints
//! - **[`MixcloudError`]**: Semantic error types for API operations
//!
//! # Example
//!
//! ```rust,ignore
//! use mixcloud_api::rest::{FieldAccess, Pagination};
//!
//! let mut cloudcast = mixcloud.get("/spartacus/party-time/").await?;
//! println!("{}", cloudcast["name"]);
//!
//! // Embedded resources are partial until loaded
//! let mut user = cloudcast.resource_field("user")?.clone();
//! if user.field("city").is_err() {
//!     user.load().await?;
//! }
//!
//! // Lists fetch further pages on demand
//! let mut listens = cloudcast.listens(&Pagination::new().limit(20)).await?;
//! let listener = listens.item(45).await?;
//! ```

mod access;
mod datetime;
mod errors;
mod params;
mod path;
mod resource;
mod resource_list;
mod value;

pub use access::{AccessDict, AccessList, FieldAccess};
pub use datetime::{format_datetime, parse_datetime, parse_rfc3339, to_timestamp};
pub use errors::MixcloudError;
pub use params::{EmbedOptions, Pagination, SearchType, Timestamp};
pub use path::{build_path, is_absolute_url, join_segment, key_path, normalize_key, Endpoint};
pub use resource::Resource;
pub use resource_list::{is_list_shape, ResourceList};
pub use value::Value;
