//! Pagination and search state records

use serde::{Deserialize, Serialize};

use eduadmin_resource::FilterMap;

use super::options::DEFAULT_ROWS_PER_PAGE;

/// Current page of a list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageState {
    /// 0-based page index
    pub page: u32,
    /// Page size, always at least 1
    pub rows_per_page: u32,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            page: 0,
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
        }
    }
}

impl PageState {
    /// First page with `rows_per_page` rows (0 is clamped to 1).
    #[must_use]
    pub fn new(rows_per_page: u32) -> Self {
        Self {
            page: 0,
            rows_per_page: rows_per_page.max(1),
        }
    }

    /// 1-based page number sent to the backend.
    #[must_use]
    pub fn page_index(&self) -> u32 {
        self.page.saturating_add(1)
    }
}

/// Search keyword plus named filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filters {
    /// Free-text keyword as typed (untrimmed)
    pub keyword: String,
    /// Named filters, e.g. `status`, `branchId`
    pub extra: FilterMap,
}

impl Filters {
    /// Empty keyword with `extra` as the filter set.
    #[must_use]
    pub fn with_extra(extra: FilterMap) -> Self {
        Self {
            keyword: String::new(),
            extra,
        }
    }
}
