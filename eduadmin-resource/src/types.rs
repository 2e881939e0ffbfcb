use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

// ============ Identifiers ============

/// Stable identifier of a backend record.
///
/// Backends use both numeric and string keys; both are carried as text so that
/// `ItemId::from(1)` and `ItemId::from("1")` compare equal. Deserialization
/// accepts either a JSON string or a JSON integer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Borrow the identifier as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the identifier is empty (record has no usable key).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<i64> for ItemId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl From<i32> for ItemId {
    fn from(value: i32) -> Self {
        Self(value.to_string())
    }
}

impl From<u64> for ItemId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Signed(i64),
            Unsigned(u64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => Self(s),
            RawId::Signed(n) => Self(n.to_string()),
            RawId::Unsigned(n) => Self(n.to_string()),
        })
    }
}

// ============ Filters ============

/// Value of one named list filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// `true` / `false` switches (e.g. `isActive`).
    Bool(bool),
    /// Numeric selectors (e.g. `branchId`).
    Integer(i64),
    /// Free text or enum-like values (e.g. `status = "active"`).
    Text(String),
}

impl FilterValue {
    /// Whether the filter should be sent to the backend.
    ///
    /// Blank text means "no filter selected".
    pub fn is_active(&self) -> bool {
        match self {
            Self::Text(s) => !s.trim().is_empty(),
            Self::Bool(_) | Self::Integer(_) => true,
        }
    }

    /// Render as a query-string value.
    pub fn to_query_value(&self) -> String {
        match self {
            Self::Bool(b) => b.to_string(),
            Self::Integer(n) => n.to_string(),
            Self::Text(s) => s.trim().to_string(),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for FilterValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Named filter values, ordered by name so generated queries are stable.
pub type FilterMap = BTreeMap<String, FilterValue>;

// ============ Query ============

/// Parameters of one list request.
///
/// Pages are 1-indexed on the wire. When a search keyword is present it is sent
/// twice, as `searchTerm` and as `Keyword`, because backend endpoints disagree
/// on the name. Named filters are flattened next to the paging fields.
///
/// # Default
///
/// The default is `page_index = 1, page_size = 10`, no search, no filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    /// Page number (1-indexed).
    pub page_index: u32,
    /// Number of items per page.
    pub page_size: u32,
    /// Search keyword, `searchTerm` flavour.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_term: Option<String>,
    /// Search keyword, `Keyword` flavour. Always equal to `search_term`.
    #[serde(rename = "Keyword", skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    /// Active named filters.
    #[serde(flatten)]
    pub filters: FilterMap,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::new(1, 10)
    }
}

impl ListQuery {
    /// Query for one page without search or filters.
    pub fn new(page_index: u32, page_size: u32) -> Self {
        Self {
            page_index,
            page_size,
            search_term: None,
            keyword: None,
            filters: FilterMap::new(),
        }
    }

    /// Set the search keyword (both wire names). Blank keywords clear the search.
    #[must_use]
    pub fn with_search(mut self, keyword: &str) -> Self {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            self.search_term = None;
            self.keyword = None;
        } else {
            self.search_term = Some(keyword.to_string());
            self.keyword = Some(keyword.to_string());
        }
        self
    }

    /// Add the active entries of `filters`; inactive (blank) ones are skipped.
    #[must_use]
    pub fn with_filters<'a>(
        mut self,
        filters: impl IntoIterator<Item = (&'a String, &'a FilterValue)>,
    ) -> Self {
        for (name, value) in filters {
            if value.is_active() {
                self.filters.insert(name.clone(), value.clone());
            }
        }
        self
    }

    /// Flatten into `(name, value)` pairs for a URL query string.
    ///
    /// Paging fields come first, then the search fields, then filters by name.
    /// A filter named like a reserved field is dropped.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("pageIndex".to_string(), self.page_index.to_string()),
            ("pageSize".to_string(), self.page_size.to_string()),
        ];
        if let Some(term) = &self.search_term {
            pairs.push(("searchTerm".to_string(), term.clone()));
        }
        if let Some(keyword) = &self.keyword {
            pairs.push(("Keyword".to_string(), keyword.clone()));
        }
        for (name, value) in &self.filters {
            if matches!(
                name.as_str(),
                "pageIndex" | "pageSize" | "searchTerm" | "Keyword"
            ) {
                log::warn!("Filter '{name}' shadows a paging/search parameter, skipped");
                continue;
            }
            pairs.push((name.clone(), value.to_query_value()));
        }
        pairs
    }
}

// ============ Responses ============

/// Normalized list payload: one page of items plus the overall count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResult<T> {
    /// Items in the current page.
    pub items: Vec<T>,
    /// Total number of items across all pages.
    pub total_count: u64,
}

impl<T> Default for ListResult<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
        }
    }
}

impl<T> ListResult<T> {
    /// Number of pages needed for `total_count` at `page_size` items per page.
    pub fn page_count(&self, page_size: u32) -> u64 {
        if page_size == 0 {
            return 0;
        }
        self.total_count.div_ceil(u64::from(page_size))
    }
}

/// Raw result of a list call, in either of the two shapes backends return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LoadResponse<T> {
    /// `{ "items": [...], "totalCount": n }`; `totalCount` may be missing.
    Paged {
        /// Items of the page.
        items: Vec<T>,
        /// Explicit total, if the backend sent one.
        #[serde(
            default,
            rename = "totalCount",
            alias = "total_count",
            skip_serializing_if = "Option::is_none"
        )]
        total_count: Option<u64>,
    },
    /// A bare array of items.
    Bare(Vec<T>),
}

impl<T> LoadResponse<T> {
    /// Paged response with an explicit total.
    pub fn paged(items: Vec<T>, total_count: u64) -> Self {
        Self::Paged {
            items,
            total_count: Some(total_count),
        }
    }

    /// Empty response, used when the backend payload is unusable.
    pub fn empty() -> Self {
        Self::Bare(Vec::new())
    }

    /// Collapse into a [`ListResult`].
    ///
    /// A paged response uses its explicit total, falling back to the number of
    /// items; a bare collection counts its own length.
    pub fn normalize(self) -> ListResult<T> {
        match self {
            Self::Paged { items, total_count } => {
                let total_count = total_count.unwrap_or(items.len() as u64);
                ListResult { items, total_count }
            }
            Self::Bare(items) => ListResult {
                total_count: items.len() as u64,
                items,
            },
        }
    }
}

impl<T> LoadResponse<T>
where
    T: serde::de::DeserializeOwned,
{
    /// Interpret an arbitrary JSON payload.
    ///
    /// Accepts an object with an `items` array, a bare array, or either of those
    /// wrapped in a `{ "data": ... }` envelope. Returns `Ok(None)` for any other
    /// shape. Items that do not deserialize as `T` are an error.
    pub fn from_json(value: serde_json::Value) -> Result<Option<Self>, serde_json::Error> {
        match value {
            serde_json::Value::Array(_) => {
                serde_json::from_value(value).map(|items| Some(Self::Bare(items)))
            }
            serde_json::Value::Object(mut map) => match map.remove("items") {
                Some(items @ serde_json::Value::Array(_)) => {
                    let items: Vec<T> = serde_json::from_value(items)?;
                    let total_count = map
                        .get("totalCount")
                        .or_else(|| map.get("total_count"))
                        .and_then(serde_json::Value::as_u64);
                    Ok(Some(Self::Paged { items, total_count }))
                }
                Some(_) => Ok(None),
                None => match map.remove("data") {
                    Some(inner) => Self::from_json(inner),
                    None => Ok(None),
                },
            },
            _ => Ok(None),
        }
    }
}
