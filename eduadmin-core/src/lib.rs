//! Eduadmin Core Library
//!
//! The list-resource controller behind every admin list page:
//! - Pagination and keyword/filter search (search changes reset the page)
//! - List loading with response normalization and last-request-wins ordering
//! - Create/edit dialog state machine
//! - Delete confirmation prompt
//! - Success/error notification bridge
//!
//! The data source is injected through the `eduadmin-resource` traits, so the
//! same controller drives REST-backed pages and in-memory test doubles.

pub mod error;
pub mod messages;
pub mod services;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult, ResourceError};
pub use services::{ControllerBuilder, ListResourceController};
pub use traits::{ErrorSurface, LogNotifier, NotificationBridge, Notifier};
pub use types::{ActionOutcome, ControllerOptions, LoadOutcome};
