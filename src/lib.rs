//! # Mixcloud API Rust Client
//!
//! A Rust client for the Mixcloud REST API, providing typed configuration,
//! OAuth helpers, lazily paginated resource lists and both async and blocking
//! interfaces.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`MixcloudConfig`] and [`MixcloudConfigBuilder`]
//! - Validated newtypes for access tokens, OAuth credentials and root URLs
//! - An async API client, [`Mixcloud`], for fetching, searching, actions,
//!   uploads and embeds
//! - A dynamic data model: [`Resource`], [`ResourceList`] and [`Value`],
//!   with datetimes and embedded resources recognized on decode
//! - OAuth 2.0 authorization code flow via [`auth::oauth`]
//! - A blocking facade over the whole API via [`blocking`]
//!
//! ## Quick Start
//!
//! ```rust
//! use mixcloud_api::{AccessToken, MixcloudConfig};
//!
//! let config = MixcloudConfig::builder()
//!     .access_token(AccessToken::new("my-token").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert!(config.access_token().is_some());
//! ```
//!
//! ## Fetching Resources
//!
//! ```rust,ignore
//! use mixcloud_api::{FieldAccess, Mixcloud, MixcloudConfig, Pagination};
//!
//! let mixcloud = Mixcloud::new(MixcloudConfig::default())?;
//!
//! let user = mixcloud.get("spartacus").await?;
//! println!("{} lives in {}", user["name"], user.str_field("city")?);
//!
//! let mut cloudcasts = user.cloudcasts(&Pagination::new().limit(10)).await?;
//! let tenth = cloudcasts.item(9).await?;
//! println!("{tenth}");
//! ```
//!
//! ## OAuth Authentication
//!
//! ```rust,ignore
//! use mixcloud_api::{ClientId, ClientSecret, Mixcloud, MixcloudOAuth};
//!
//! let oauth = MixcloudOAuth::new(ClientId::new("id")?, "https://my-app.com/callback")
//!     .client_secret(ClientSecret::new("secret")?);
//!
//! // Step 1: send the user to the authorization URL
//! let url = oauth.authorization_url();
//!
//! // Step 2: trade the code Mixcloud redirects back with for a token
//! let token = oauth.access_token(&code).await?;
//!
//! // Step 3: use the token
//! let mixcloud = mixcloud.with_access_token(Some(token));
//! let me = mixcloud.me().await?;
//! ```
//!
//! ## Error Handling
//!
//! Operations return [`MixcloudError`], which distinguishes bad arguments
//! caught before any request from the semantic errors Mixcloud reports:
//!
//! ```rust,ignore
//! use mixcloud_api::{MixcloudError, Pagination};
//!
//! match mixcloud.get("no-such-user").await {
//!     Ok(user) => println!("{user}"),
//!     Err(MixcloudError::NotFound { key, .. }) => println!("{key:?} does not exist"),
//!     Err(e) => return Err(e.into()),
//! }
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: Newtypes and parameters validate before any request
//! - **Thread-safe**: Clients, resources and lists are `Send + Sync`
//! - **Async-first**: The blocking facade drives the async client on a private runtime

pub mod auth;
pub mod blocking;
pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

// Re-export public types at crate root for convenience
pub use clients::api::{Action, Decoded, Embed, Mixcloud, Section, UploadOptions};
pub use config::{
    AccessToken, ClientId, ClientSecret, MixcloudConfig, MixcloudConfigBuilder, RootUrl,
};
pub use error::ConfigError;

// Re-export data model types
pub use rest::{
    AccessDict, AccessList, EmbedOptions, FieldAccess, MixcloudError, Pagination, Resource,
    ResourceList, SearchType, Timestamp, Value,
};

// Re-export OAuth types for convenience
pub use auth::oauth::{MixcloudOAuth, OAuthError};
