//! 分页与搜索状态

use crate::types::{
    ControllerOptions, FilterMap, FilterValue, Filters, ListQuery, PageState,
};

/// Pagination plus keyword/filter state of one list view.
///
/// Any change to what is being searched for resets the page to 0. Nothing here
/// triggers a load; the caller decides when to reload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState {
    page: PageState,
    filters: Filters,
    default_filters: FilterMap,
}

impl SearchState {
    /// First page, empty keyword, `default_filters` as the filter set.
    #[must_use]
    pub fn new(options: &ControllerOptions) -> Self {
        Self {
            page: PageState::new(options.rows_per_page),
            filters: Filters::with_extra(options.default_filters.clone()),
            default_filters: options.default_filters.clone(),
        }
    }

    pub fn page_state(&self) -> PageState {
        self.page
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    pub fn set_page(&mut self, page: u32) {
        self.page.page = page;
    }

    /// Change the page size (0 is clamped to 1) and go back to the first page.
    pub fn set_rows_per_page(&mut self, rows_per_page: u32) {
        self.page = PageState::new(rows_per_page);
    }

    /// Keeps the raw text; [`Self::to_query`] trims it and drops it when blank.
    pub fn handle_keyword_change(&mut self, keyword: impl Into<String>) {
        self.filters.keyword = keyword.into();
        self.page.page = 0;
    }

    /// Merge one named filter.
    pub fn update_filter(&mut self, name: impl Into<String>, value: impl Into<FilterValue>) {
        self.filters.extra.insert(name.into(), value.into());
        self.page.page = 0;
    }

    /// Drop one named filter. Returns whether it was set.
    pub fn remove_filter(&mut self, name: &str) -> bool {
        self.page.page = 0;
        self.filters.extra.remove(name).is_some()
    }

    /// Replace all named filters.
    pub fn set_filters(&mut self, filters: FilterMap) {
        self.filters.extra = filters;
        self.page.page = 0;
    }

    /// Empty keyword, default filters, first page.
    pub fn handle_clear_search(&mut self) {
        self.filters.keyword.clear();
        self.set_filters(self.default_filters.clone());
    }

    /// Request parameters for the current state.
    ///
    /// The keyword is trimmed and only sent when non-blank; blank filter values
    /// are left out.
    pub fn to_query(&self) -> ListQuery {
        ListQuery::new(self.page.page_index(), self.page.rows_per_page)
            .with_search(&self.filters.keyword)
            .with_filters(&self.filters.extra)
    }
}

impl Default for SearchState {
    fn default() -> Self {
        Self::new(&ControllerOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options_with_defaults() -> ControllerOptions {
        let mut default_filters = FilterMap::new();
        default_filters.insert("status".to_string(), FilterValue::from("active"));
        ControllerOptions {
            default_filters,
            ..ControllerOptions::default()
        }
    }

    #[test]
    fn test_query_uses_one_based_page() {
        let mut state = SearchState::default();
        state.set_rows_per_page(20);
        state.set_page(1);

        let query = state.to_query();
        assert_eq!(query.page_index, 2);
        assert_eq!(query.page_size, 20);
        assert!(query.search_term.is_none());
        assert!(query.keyword.is_none());
    }

    #[test]
    fn test_keyword_is_trimmed_and_duplicated() {
        let mut state = SearchState::default();
        state.handle_keyword_change("  test ");

        let query = state.to_query();
        assert_eq!(query.search_term.as_deref(), Some("test"));
        assert_eq!(query.keyword.as_deref(), Some("test"));
        assert_eq!(state.filters().keyword, "  test ");
    }

    #[test]
    fn test_blank_keyword_is_not_sent() {
        let mut state = SearchState::default();
        state.handle_keyword_change("   ");

        let query = state.to_query();
        assert!(query.search_term.is_none());
        assert!(query.keyword.is_none());
        assert_eq!(state.filters().keyword, "   ");
    }

    #[test]
    fn test_search_changes_reset_page() {
        let mut state = SearchState::default();

        state.set_page(3);
        state.handle_keyword_change("abc");
        assert_eq!(state.page_state().page, 0);

        state.set_page(3);
        state.update_filter("level", 2);
        assert_eq!(state.page_state().page, 0);

        state.set_page(3);
        assert!(state.remove_filter("level"));
        assert_eq!(state.page_state().page, 0);

        state.set_page(3);
        state.set_rows_per_page(50);
        assert_eq!(state.page_state().page, 0);
    }

    #[test]
    fn test_filters_sent_without_keyword() {
        let mut state = SearchState::new(&options_with_defaults());
        state.update_filter("branchId", "");

        let query = state.to_query();
        assert!(query.search_term.is_none());
        assert_eq!(query.filters.get("status"), Some(&FilterValue::from("active")));
        assert!(!query.filters.contains_key("branchId"));
    }

    #[test]
    fn test_clear_search_restores_defaults() {
        let mut state = SearchState::new(&options_with_defaults());
        state.handle_keyword_change("test");
        state.update_filter("status", "inactive");
        state.update_filter("level", 3);
        state.set_page(4);

        state.handle_clear_search();

        assert_eq!(state.filters().keyword, "");
        assert_eq!(state.filters().extra, options_with_defaults().default_filters);
        assert_eq!(state.page_state().page, 0);
    }

    #[test]
    fn test_zero_rows_per_page_is_clamped() {
        let mut state = SearchState::default();
        state.set_rows_per_page(0);
        assert_eq!(state.page_state().rows_per_page, 1);
    }
}
