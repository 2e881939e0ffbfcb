use async_trait::async_trait;

use crate::error::Result;
use crate::types::{ItemId, ListQuery, LoadResponse};

/// A backend record managed through a list page.
///
/// The controller only needs a stable identifier (for update/delete calls) and
/// a name to show in confirmation prompts.
pub trait ResourceItem: Clone + Send + Sync + 'static {
    /// Stable identifier used for update and delete calls.
    fn id(&self) -> ItemId;

    /// Human-readable name used in prompts. Defaults to the identifier.
    fn display_name(&self) -> String {
        self.id().to_string()
    }
}

/// Untyped records: `id` from the `id` field, name from the first of
/// `name`, `fullName`, `title`, `code` that is a non-empty string.
impl ResourceItem for serde_json::Value {
    fn id(&self) -> ItemId {
        match self.get("id") {
            Some(serde_json::Value::String(s)) => ItemId::from(s.as_str()),
            Some(serde_json::Value::Number(n)) => ItemId::from(n.to_string()),
            _ => ItemId::default(),
        }
    }

    fn display_name(&self) -> String {
        ["name", "fullName", "title", "code"]
            .iter()
            .filter_map(|key| self.get(*key).and_then(serde_json::Value::as_str))
            .find(|s| !s.trim().is_empty())
            .map_or_else(|| self.id().to_string(), ToString::to_string)
    }
}

/// 列表数据源 Trait
///
/// Fetches one page of a collection. Implemented by [`RestResource`](crate::RestResource)
/// and by test doubles.
#[async_trait]
pub trait ListSource<T>: Send + Sync
where
    T: Send,
{
    /// Collection name, used in logs and errors (e.g. `"branches"`).
    fn resource_name(&self) -> &str;

    /// Fetch one page.
    async fn load(&self, query: &ListQuery) -> Result<LoadResponse<T>>;
}

/// Creates records from form data.
#[async_trait]
pub trait ItemCreator<T, D>: Send + Sync
where
    T: Send,
    D: Send + Sync,
{
    /// Create a record and return it as stored by the backend.
    ///
    /// `None` when the backend acknowledged the create without a body (e.g. `201` with no content).
    async fn create(&self, data: &D) -> Result<Option<T>>;
}

/// Updates existing records from form data.
#[async_trait]
pub trait ItemUpdater<T, D>: Send + Sync
where
    T: Send,
    D: Send + Sync,
{
    /// Update the record identified by `id`.
    ///
    /// `None` when the backend acknowledged the update without a body (e.g. `204`).
    async fn update(&self, id: &ItemId, data: &D) -> Result<Option<T>>;
}

/// Deletes records.
#[async_trait]
pub trait ItemDeleter: Send + Sync {
    /// Delete the record identified by `id`.
    async fn delete(&self, id: &ItemId) -> Result<()>;
}
