//! # eduadmin-resource
//!
//! Data-source abstraction for the paginated list pages of the eduadmin console
//! (branches, rooms, staff, schools, student levels, benefits, wallets, family
//! accounts, ...).
//!
//! Every list page talks to its backend through up to four operations, each a
//! separate trait so a page can leave out what it does not support:
//!
//! | Trait | Operation |
//! |-------|-----------|
//! | [`ListSource`] | fetch one page for a [`ListQuery`] |
//! | [`ItemCreator`] | create a record from form data |
//! | [`ItemUpdater`] | update a record by [`ItemId`] |
//! | [`ItemDeleter`] | delete a record by [`ItemId`] |
//!
//! [`RestResource`] implements all four against a REST collection endpoint.
//!
//! ## Feature Flags
//!
//! - **`rustls`** *(default)*: Use rustls for HTTPS.
//! - **`native-tls`**: Use the platform's native TLS implementation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use eduadmin_resource::{ListQuery, ListSource, RestConfig, RestResource};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RestConfig::from_env()?;
//!     let branches: RestResource<serde_json::Value> = RestResource::new(&config, "branches")?;
//!
//!     let query = ListQuery::new(1, 20).with_search("Cầu Giấy");
//!     let page = branches.load(&query).await?.normalize();
//!     println!("{} of {} branches", page.items.len(), page.total_count);
//!     Ok(())
//! }
//! ```
//!
//! ## Response Shapes
//!
//! List endpoints answer either `{ "items": [...], "totalCount": n }` or a bare
//! array. [`LoadResponse`] models both and [`LoadResponse::normalize`] collapses
//! them into a [`ListResult`].
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, ResourceError>`](ResourceError).
//! [`ResourceError::user_message`] yields the text to show an operator,
//! preferring the backend's own `message`.

mod config;
mod error;
mod http_client;
mod rest;
mod traits;
mod types;
mod utils;

pub use config::{ENV_BASE_URL, ENV_MAX_RETRIES, ENV_TIMEOUT_SECS, ENV_TOKEN, RestConfig};
pub use error::{ResourceError, Result};
pub use rest::{REQUEST_ID_HEADER, RestResource};
pub use traits::{ItemCreator, ItemDeleter, ItemUpdater, ListSource, ResourceItem};
pub use types::{FilterMap, FilterValue, ItemId, ListQuery, ListResult, LoadResponse};

pub use utils::log_sanitizer;
