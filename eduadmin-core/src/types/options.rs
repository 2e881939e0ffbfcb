//! Controller configuration

use serde::{Deserialize, Serialize};

use eduadmin_resource::FilterMap;

/// Page size used when nothing else is configured.
pub const DEFAULT_ROWS_PER_PAGE: u32 = 10;

/// Per-page controller options.
///
/// Deserializable so a page can be configured from JSON:
///
/// ```json
/// { "loadOnMount": false, "defaultFilters": { "status": "active" }, "rowsPerPage": 25 }
/// ```
///
/// Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ControllerOptions {
    /// Run one load from `mount()`
    pub load_on_mount: bool,
    /// Initial named filters, restored by "clear search"
    pub default_filters: FilterMap,
    /// Initial page size
    pub rows_per_page: u32,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            load_on_mount: true,
            default_filters: FilterMap::new(),
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
        }
    }
}
