//! 列表加载状态

use chrono::{DateTime, Utc};

use crate::types::ListResult;

/// Fetched page plus load bookkeeping.
///
/// Every load gets a sequence number from [`ListState::begin`]; results are
/// applied only for the most recently issued number.
#[derive(Debug, Clone)]
pub struct ListState<T> {
    items: Vec<T>,
    total_count: u64,
    loading: bool,
    error: Option<String>,
    loaded_at: Option<DateTime<Utc>>,
    issued: u64,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
            loading: false,
            error: None,
            loaded_at: None,
            issued: 0,
        }
    }
}

impl<T> ListState<T> {
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    /// Start a load and return its sequence number.
    pub fn begin(&mut self) -> u64 {
        self.issued += 1;
        self.loading = true;
        self.issued
    }

    /// Whether `seq` is the most recently issued load.
    pub fn is_current(&self, seq: u64) -> bool {
        seq == self.issued
    }

    /// Replace the list with `result`. Returns `false` (and changes nothing) for stale loads.
    pub fn apply(&mut self, seq: u64, result: ListResult<T>) -> bool {
        if !self.is_current(seq) {
            return false;
        }
        self.items = result.items;
        self.total_count = result.total_count;
        self.error = None;
        self.loading = false;
        self.loaded_at = Some(Utc::now());
        true
    }

    /// Clear the list and record `message`. Returns `false` (and changes nothing) for stale loads.
    pub fn fail(&mut self, seq: u64, message: String) -> bool {
        if !self.is_current(seq) {
            return false;
        }
        self.items.clear();
        self.total_count = 0;
        self.error = Some(message);
        self.loading = false;
        true
    }

    /// Record a mutation failure; the list itself is kept.
    pub fn set_error(&mut self, message: String) {
        self.error = Some(message);
    }
}
