//! Notification sink Traits

use std::sync::Arc;

/// Notification sink Trait
///
/// Receives the outcome of every controller action. The host decides how to
/// show it (toast, status bar, log line).
pub trait Notifier: Send + Sync {
    /// A create/update/delete succeeded
    ///
    /// # Arguments
    /// * `message` - Fixed success text
    fn report_success(&self, message: &str);

    /// A load or mutation failed
    ///
    /// # Arguments
    /// * `message` - Operator-facing error text
    fn report_error(&self, message: &str);
}

/// Global error context Trait
///
/// The application-wide error slot (banner, error boundary) that mirrors every
/// failure reported by a controller.
pub trait ErrorSurface: Send + Sync {
    /// Show `message` in the global error context
    fn raise(&self, message: &str);
}

/// Fans controller notifications out to a toast sink and the global error surface.
///
/// Successes go to the toast sink only; errors go to both.
#[derive(Clone)]
pub struct NotificationBridge {
    toast: Arc<dyn Notifier>,
    surface: Arc<dyn ErrorSurface>,
}

impl NotificationBridge {
    #[must_use]
    pub fn new(toast: Arc<dyn Notifier>, surface: Arc<dyn ErrorSurface>) -> Self {
        Self { toast, surface }
    }
}

impl Notifier for NotificationBridge {
    fn report_success(&self, message: &str) {
        self.toast.report_success(message);
    }

    fn report_error(&self, message: &str) {
        self.toast.report_error(message);
        self.surface.raise(message);
    }
}

/// Writes notifications through the `log` facade
///
/// Default sink when the host configures none.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn report_success(&self, message: &str) {
        log::info!("[notify] {message}");
    }

    fn report_error(&self, message: &str) {
        log::warn!("[notify] {message}");
    }
}

impl ErrorSurface for LogNotifier {
    fn raise(&self, message: &str) {
        log::error!("[global-error] {message}");
    }
}
