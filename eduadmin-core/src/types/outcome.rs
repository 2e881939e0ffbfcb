//! Handler results

use serde::Serialize;

use eduadmin_resource::ListQuery;

/// Result of a user action (submit, confirm).
///
/// Failures are already reported through the notifier by the time this is
/// returned; pages only use it to decide what to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionOutcome {
    /// The backend call succeeded
    Completed,
    /// The backend call failed and was reported
    Failed,
    /// Nothing to do in the current state
    Ignored,
}

/// Result of one load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum LoadOutcome {
    /// The list state now holds this page
    #[serde(rename_all = "camelCase")]
    Loaded { total_count: u64 },
    /// The list was cleared and the error reported
    Failed,
    /// A newer load was started; this result was dropped
    Stale,
}

/// Handle for one in-flight load, issued by `begin_load`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    /// Sequence number; only the most recently issued ticket is applied
    pub seq: u64,
    /// Parameters captured when the load started
    pub query: ListQuery,
}
