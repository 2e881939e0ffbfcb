//! 测试辅助模块
//!
//! 提供 mock 实现和便捷的测试工厂方法。

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use eduadmin_resource::{ItemCreator, ItemDeleter, ItemUpdater, ListSource};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::RwLock;

use crate::services::{ControllerBuilder, ListResourceController};
use crate::traits::{ErrorSurface, Notifier, ResourceItem};
use crate::types::{ControllerOptions, ItemId, ListQuery, LoadResponse};
use crate::ResourceError;

// ===== TestItem =====

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestItem {
    pub id: i64,
    pub name: String,
}

impl ResourceItem for TestItem {
    fn id(&self) -> ItemId {
        ItemId::from(self.id)
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }
}

pub fn test_item(id: i64) -> TestItem {
    TestItem {
        id,
        name: format!("Item {id}"),
    }
}

pub fn test_items(count: i64) -> Vec<TestItem> {
    (1..=count).map(test_item).collect()
}

pub fn backend_error(status: u16, message: &str) -> ResourceError {
    ResourceError::Backend {
        resource: "test-items".to_string(),
        status,
        message: Some(message.to_string()),
        raw_body: None,
    }
}

// ===== MockResource =====

/// In-memory data source implementing all four operations.
pub struct MockResource {
    response: RwLock<Result<LoadResponse<TestItem>, ResourceError>>,
    /// 如果 Some，create/update/delete 返回此错误
    mutation_error: RwLock<Option<ResourceError>>,
    /// 为 true 时 create/update 成功但不返回记录（如 201/204 空响应）
    acknowledge_only: RwLock<bool>,
    queries: RwLock<Vec<ListQuery>>,
    created: RwLock<Vec<Value>>,
    updated: RwLock<Vec<(ItemId, Value)>>,
    deleted: RwLock<Vec<ItemId>>,
}

impl MockResource {
    pub fn new() -> Self {
        Self {
            response: RwLock::new(Ok(LoadResponse::paged(Vec::new(), 0))),
            mutation_error: RwLock::new(None),
            acknowledge_only: RwLock::new(false),
            queries: RwLock::new(Vec::new()),
            created: RwLock::new(Vec::new()),
            updated: RwLock::new(Vec::new()),
            deleted: RwLock::new(Vec::new()),
        }
    }

    pub async fn set_page(&self, items: Vec<TestItem>, total_count: u64) {
        *self.response.write().await = Ok(LoadResponse::paged(items, total_count));
    }

    pub async fn set_bare(&self, items: Vec<TestItem>) {
        *self.response.write().await = Ok(LoadResponse::Bare(items));
    }

    pub async fn set_load_error(&self, err: ResourceError) {
        *self.response.write().await = Err(err);
    }

    pub async fn set_mutation_error(&self, err: Option<ResourceError>) {
        *self.mutation_error.write().await = err;
    }

    pub async fn set_acknowledge_only(&self, acknowledge_only: bool) {
        *self.acknowledge_only.write().await = acknowledge_only;
    }

    pub async fn queries(&self) -> Vec<ListQuery> {
        self.queries.read().await.clone()
    }

    pub async fn load_count(&self) -> usize {
        self.queries.read().await.len()
    }

    pub async fn created(&self) -> Vec<Value> {
        self.created.read().await.clone()
    }

    pub async fn updated(&self) -> Vec<(ItemId, Value)> {
        self.updated.read().await.clone()
    }

    pub async fn deleted(&self) -> Vec<ItemId> {
        self.deleted.read().await.clone()
    }

    async fn check_mutation(&self) -> Result<(), ResourceError> {
        match self.mutation_error.read().await.clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ListSource<TestItem> for MockResource {
    fn resource_name(&self) -> &str {
        "test-items"
    }

    async fn load(&self, query: &ListQuery) -> Result<LoadResponse<TestItem>, ResourceError> {
        self.queries.write().await.push(query.clone());
        self.response.read().await.clone()
    }
}

#[async_trait]
impl ItemCreator<TestItem, Value> for MockResource {
    async fn create(&self, data: &Value) -> Result<Option<TestItem>, ResourceError> {
        self.check_mutation().await?;
        self.created.write().await.push(data.clone());
        if *self.acknowledge_only.read().await {
            return Ok(None);
        }
        Ok(Some(TestItem {
            id: 100,
            name: data["name"].as_str().unwrap_or_default().to_string(),
        }))
    }
}

#[async_trait]
impl ItemUpdater<TestItem, Value> for MockResource {
    async fn update(
        &self,
        id: &ItemId,
        data: &Value,
    ) -> Result<Option<TestItem>, ResourceError> {
        self.check_mutation().await?;
        self.updated.write().await.push((id.clone(), data.clone()));
        if *self.acknowledge_only.read().await {
            return Ok(None);
        }
        Ok(Some(TestItem {
            id: id.as_str().parse().unwrap_or_default(),
            name: data["name"].as_str().unwrap_or_default().to_string(),
        }))
    }
}

#[async_trait]
impl ItemDeleter for MockResource {
    async fn delete(&self, id: &ItemId) -> Result<(), ResourceError> {
        self.check_mutation().await?;
        self.deleted.write().await.push(id.clone());
        Ok(())
    }
}

// ===== RecordingNotifier =====

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Success(String),
    Error(String),
    Raised(String),
}

/// Records every notification, as toast sink and as global error surface.
pub struct RecordingNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self {
            notifications: Mutex::new(Vec::new()),
        }
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().unwrap().clone()
    }

    pub fn successes(&self) -> Vec<String> {
        self.notifications()
            .into_iter()
            .filter_map(|n| match n {
                Notification::Success(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.notifications()
            .into_iter()
            .filter_map(|n| match n {
                Notification::Error(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    fn push(&self, notification: Notification) {
        self.notifications.lock().unwrap().push(notification);
    }
}

impl Notifier for RecordingNotifier {
    fn report_success(&self, message: &str) {
        self.push(Notification::Success(message.to_string()));
    }

    fn report_error(&self, message: &str) {
        self.push(Notification::Error(message.to_string()));
    }
}

impl ErrorSurface for RecordingNotifier {
    fn raise(&self, message: &str) {
        self.push(Notification::Raised(message.to_string()));
    }
}

// ===== 工厂方法 =====

pub type TestController = ListResourceController<TestItem, Value>;

/// Controller wired to a [`MockResource`] for every operation.
pub fn create_test_controller(
    options: ControllerOptions,
) -> (TestController, Arc<MockResource>, Arc<RecordingNotifier>) {
    let resource = Arc::new(MockResource::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let controller = ControllerBuilder::with_resource(resource.clone())
        .notifier(notifier.clone())
        .options(options)
        .build();
    (controller, resource, notifier)
}

/// Test controller that does not load on mount.
pub fn create_idle_controller() -> (TestController, Arc<MockResource>, Arc<RecordingNotifier>) {
    create_test_controller(ControllerOptions {
        load_on_mount: false,
        ..ControllerOptions::default()
    })
}
