//! Notification and data source trait definitions

mod notifier;

pub use notifier::{ErrorSurface, LogNotifier, NotificationBridge, Notifier};

// Re-export 数据源 trait
pub use eduadmin_resource::{ItemCreator, ItemDeleter, ItemUpdater, ListSource, ResourceItem};
