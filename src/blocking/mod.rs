//! Blocking wrappers around the async client.
//!
//! The types in this module mirror [`crate::Mixcloud`], [`crate::Resource`],
//! [`crate::ResourceList`] and [`crate::auth::oauth::MixcloudOAuth`] with the
//! same method names, arguments and errors, but drive every call to
//! completion on a private current-thread `tokio` runtime. The runtime is
//! shared by a client and everything decoded through it, and shut down when
//! the last of them is dropped.
//!
//! Blocking types must not be used from within an async runtime; calling
//! them from async code panics.
//!
//! # Example
//!
//! ```rust,ignore
//! use mixcloud_api::blocking::Mixcloud;
//! use mixcloud_api::{MixcloudConfig, Pagination};
//!
//! let mixcloud = Mixcloud::new(MixcloudConfig::default())?;
//!
//! let mut user = mixcloud.get("spartacus")?;
//! user.load()?;
//!
//! let mut cloudcasts = user.cloudcasts(&Pagination::new().limit(20))?;
//! for cloudcast in &mut cloudcasts {
//!     println!("{}", cloudcast?);
//! }
//! ```

mod client;
mod models;
mod oauth;

use std::sync::Arc;

use tokio::runtime::Runtime;

pub use client::{Decoded, Mixcloud};
pub use models::{Resource, ResourceIter, ResourceList};
pub use oauth::MixcloudOAuth;

/// Builds the runtime blocking calls run on.
fn new_runtime() -> std::io::Result<Arc<Runtime>> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map(Arc::new)
}
