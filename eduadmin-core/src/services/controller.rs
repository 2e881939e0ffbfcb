//! 列表资源控制器
//!
//! One instance per list page: pagination, search, list loading, the
//! create/edit dialog and the delete confirmation, wired to injected data
//! source functions.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::error::{CoreError, CoreResult};
use crate::messages;
use crate::services::{ConfirmationController, DialogController, ListState, SearchState};
use crate::traits::{
    ItemCreator, ItemDeleter, ItemUpdater, ListSource, LogNotifier, Notifier, ResourceItem,
};
use crate::types::{
    ActionOutcome, ConfirmDialogState, ControllerOptions, DialogKind, DialogMode, DialogState,
    FilterMap, FilterValue, ItemId, ListQuery, LoadOutcome, LoadResponse, LoadTicket, PageState,
    PendingAction,
};

/// Generic CRUD controller for one list page.
///
/// `T` is the record type, `D` the form data submitted from the dialog.
/// The controller is the only writer of its state; pages read it through the
/// accessors and change it through the `handle_*` / `set_*` methods.
///
/// # Example
///
/// ```ignore
/// let rooms = Arc::new(RestResource::<Room, RoomForm>::new(&config, "rooms")?);
/// let mut controller = ControllerBuilder::with_resource(rooms)
///     .notifier(Arc::new(NotificationBridge::new(toasts, global_errors)))
///     .build();
///
/// controller.mount().await;
/// controller.handle_keyword_change("A1");
/// controller.load_data().await;
/// ```
pub struct ListResourceController<T, D>
where
    T: ResourceItem,
    D: Send + Sync + 'static,
{
    list_source: Arc<dyn ListSource<T>>,
    creator: Option<Arc<dyn ItemCreator<T, D>>>,
    updater: Option<Arc<dyn ItemUpdater<T, D>>>,
    deleter: Option<Arc<dyn ItemDeleter>>,
    notifier: Arc<dyn Notifier>,
    options: ControllerOptions,
    search: SearchState,
    list: ListState<T>,
    dialog: DialogController<T>,
    confirmation: ConfirmationController,
}

impl<T, D> ListResourceController<T, D>
where
    T: ResourceItem,
    D: Send + Sync + 'static,
{
    // ===== 生命周期 =====

    /// Initial load, unless `load_on_mount` is off.
    pub async fn mount(&mut self) -> Option<LoadOutcome> {
        if self.options.load_on_mount {
            Some(self.load_data().await)
        } else {
            log::debug!("[{}] mount without initial load", self.resource_name());
            None
        }
    }

    // ===== 列表加载 =====

    /// Fetch the page described by the current pagination and search state.
    pub async fn load_data(&mut self) -> LoadOutcome {
        let ticket = self.begin_load();
        let source = Arc::clone(&self.list_source);
        let result = source.load(&ticket.query).await;
        self.finish_load(ticket, result)
    }

    /// Mark a load as started and capture its parameters.
    ///
    /// Use together with [`finish_load`](Self::finish_load) when the host runs
    /// the fetch itself; only the most recently issued ticket is applied.
    pub fn begin_load(&mut self) -> LoadTicket {
        let query = self.search.to_query();
        let seq = self.list.begin();
        log::debug!(
            "[{}] load #{seq}: page {} x {}",
            self.resource_name(),
            query.page_index,
            query.page_size
        );
        LoadTicket { seq, query }
    }

    /// Apply the result of the load started with `ticket`.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: eduadmin_resource::Result<LoadResponse<T>>,
    ) -> LoadOutcome {
        if !self.list.is_current(ticket.seq) {
            log::debug!(
                "[{}] dropping stale load #{}",
                self.resource_name(),
                ticket.seq
            );
            return LoadOutcome::Stale;
        }

        match result {
            Ok(response) => {
                let page = response.normalize();
                let total_count = page.total_count;
                self.list.apply(ticket.seq, page);
                LoadOutcome::Loaded { total_count }
            }
            Err(e) => {
                let err = CoreError::from(e);
                self.log_failure("load", &err);
                let message = err.user_message(messages::LOAD_FAILED);
                self.list.fail(ticket.seq, message.clone());
                self.notifier.report_error(&message);
                LoadOutcome::Failed
            }
        }
    }

    // ===== 分页与搜索 =====

    pub fn set_page(&mut self, page: u32) {
        self.search.set_page(page);
    }

    pub fn set_rows_per_page(&mut self, rows_per_page: u32) {
        self.search.set_rows_per_page(rows_per_page);
    }

    /// Store the keyword as typed and go back to the first page.
    ///
    /// Loads send it trimmed, and a blank keyword sends no search at all.
    pub fn handle_keyword_change(&mut self, keyword: impl Into<String>) {
        self.search.handle_keyword_change(keyword);
    }

    /// Set one named filter. Blank text values stay stored but are not sent.
    pub fn update_filter(&mut self, name: impl Into<String>, value: impl Into<FilterValue>) {
        self.search.update_filter(name, value);
    }

    pub fn remove_filter(&mut self, name: &str) -> bool {
        self.search.remove_filter(name)
    }

    pub fn set_filters(&mut self, filters: FilterMap) {
        self.search.set_filters(filters);
    }

    /// Reset keyword and filters to their defaults. Does not reload.
    pub fn handle_clear_search(&mut self) {
        self.search.handle_clear_search();
    }

    // ===== 创建/编辑对话框 =====

    pub fn handle_create(&mut self) {
        self.dialog.open_create();
    }

    pub fn handle_edit(&mut self, item: T) {
        self.dialog.open_edit(item);
    }

    pub fn handle_close_dialog(&mut self) {
        self.dialog.close();
    }

    /// Submit the dialog form.
    ///
    /// On success the dialog closes and the list reloads. On failure the
    /// dialog stays open so the operator can correct the form.
    pub async fn handle_form_submit(&mut self, data: D) -> ActionOutcome {
        let (kind, target) = match self.dialog.mode() {
            None => {
                log::debug!(
                    "[{}] submit ignored: dialog is closed",
                    self.resource_name()
                );
                return ActionOutcome::Ignored;
            }
            Some(DialogMode::Create) => (DialogKind::Create, None),
            Some(DialogMode::Edit { selected }) => (DialogKind::Edit, Some(selected.id())),
        };

        self.dialog.set_submitting(true);
        let result = self.submit(target.as_ref(), &data).await;
        self.dialog.set_submitting(false);

        match result {
            Ok(record) => {
                if record.is_none() {
                    log::debug!(
                        "[{}] {} returned no record",
                        self.resource_name(),
                        kind.as_str()
                    );
                }
                log::info!("[{}] {} succeeded", self.resource_name(), kind.as_str());
                self.notifier.report_success(kind.success_message());
                self.dialog.close();
                self.load_data().await;
                ActionOutcome::Completed
            }
            Err(err) => {
                self.report_failure(kind.as_str(), &err, messages::SAVE_FAILED);
                ActionOutcome::Failed
            }
        }
    }

    async fn submit(&self, target: Option<&ItemId>, data: &D) -> CoreResult<Option<T>> {
        match target {
            None => {
                let creator = self
                    .creator
                    .as_ref()
                    .ok_or_else(|| CoreError::OperationUnavailable("create".to_string()))?;
                Ok(creator.create(data).await?)
            }
            Some(id) => {
                let updater = self
                    .updater
                    .as_ref()
                    .ok_or_else(|| CoreError::OperationUnavailable("update".to_string()))?;
                Ok(updater.update(id, data).await?)
            }
        }
    }

    // ===== 删除确认 =====

    /// Ask for confirmation before deleting `item`.
    pub fn handle_delete(&mut self, item: &T) {
        if self.deleter.is_none() {
            log::warn!(
                "[{}] delete requested but no deleter is configured",
                self.resource_name()
            );
            return;
        }
        self.confirmation
            .request(ConfirmDialogState::delete(item.id(), item.display_name()));
    }

    /// Run the pending action. The prompt closes before the call is made.
    pub async fn handle_confirm(&mut self) -> ActionOutcome {
        let Some(action) = self.confirmation.take() else {
            log::debug!(
                "[{}] confirm ignored: nothing pending",
                self.resource_name()
            );
            return ActionOutcome::Ignored;
        };

        match action {
            PendingAction::Delete { id, name } => self.delete_item(&id, &name).await,
        }
    }

    /// Close the prompt without running its action.
    pub fn handle_cancel_confirm(&mut self) {
        if self.confirmation.cancel() {
            log::debug!("[{}] confirmation cancelled", self.resource_name());
        }
    }

    async fn delete_item(&mut self, id: &ItemId, name: &str) -> ActionOutcome {
        let result = match &self.deleter {
            Some(deleter) => deleter.delete(id).await.map_err(CoreError::from),
            None => Err(CoreError::OperationUnavailable("delete".to_string())),
        };

        match result {
            Ok(()) => {
                log::info!("[{}] deleted {name} ({id})", self.resource_name());
                self.notifier.report_success(messages::DELETE_SUCCESS);
                self.load_data().await;
                ActionOutcome::Completed
            }
            Err(err) => {
                self.report_failure("delete", &err, messages::DELETE_FAILED);
                ActionOutcome::Failed
            }
        }
    }

    // ===== 错误上报 =====

    fn log_failure(&self, action: &str, err: &CoreError) {
        if err.is_expected() {
            log::warn!("[{}] {action} failed: {err}", self.resource_name());
        } else {
            log::error!("[{}] {action} failed: {err}", self.resource_name());
        }
    }

    /// Mutation failure: keep the list, record and surface the message.
    fn report_failure(&mut self, action: &str, err: &CoreError, fallback: &str) {
        self.log_failure(action, err);
        let message = err.user_message(fallback);
        self.list.set_error(message.clone());
        self.notifier.report_error(&message);
    }

    // ===== 状态访问 =====

    pub fn resource_name(&self) -> &str {
        self.list_source.resource_name()
    }

    pub fn options(&self) -> &ControllerOptions {
        &self.options
    }

    pub fn data(&self) -> &[T] {
        self.list.items()
    }

    pub fn total_count(&self) -> u64 {
        self.list.total_count()
    }

    pub fn is_loading(&self) -> bool {
        self.list.is_loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.list.error()
    }

    /// When the list was last replaced by a successful load.
    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.list.loaded_at()
    }

    pub fn page_state(&self) -> PageState {
        self.search.page_state()
    }

    pub fn page(&self) -> u32 {
        self.search.page_state().page
    }

    pub fn rows_per_page(&self) -> u32 {
        self.search.page_state().rows_per_page
    }

    pub fn keyword(&self) -> &str {
        &self.search.filters().keyword
    }

    pub fn filters(&self) -> &FilterMap {
        &self.search.filters().extra
    }

    /// Parameters the next load would send.
    pub fn query(&self) -> ListQuery {
        self.search.to_query()
    }

    pub fn open_dialog(&self) -> bool {
        self.dialog.is_open()
    }

    pub fn dialog_mode(&self) -> DialogKind {
        self.dialog.kind()
    }

    pub fn dialog_state(&self) -> &DialogState<T> {
        self.dialog.state()
    }

    pub fn selected_item(&self) -> Option<&T> {
        self.dialog.selected()
    }

    pub fn is_submitting(&self) -> bool {
        self.dialog.is_submitting()
    }

    pub fn confirm_dialog(&self) -> &ConfirmDialogState {
        self.confirmation.state()
    }

    pub fn can_create(&self) -> bool {
        self.creator.is_some()
    }

    pub fn can_edit(&self) -> bool {
        self.updater.is_some()
    }

    pub fn can_delete(&self) -> bool {
        self.deleter.is_some()
    }
}

/// Builder for [`ListResourceController`]
///
/// Only the list source is required. Without a notifier, notifications go to
/// [`LogNotifier`].
pub struct ControllerBuilder<T, D>
where
    T: ResourceItem,
    D: Send + Sync + 'static,
{
    list_source: Arc<dyn ListSource<T>>,
    creator: Option<Arc<dyn ItemCreator<T, D>>>,
    updater: Option<Arc<dyn ItemUpdater<T, D>>>,
    deleter: Option<Arc<dyn ItemDeleter>>,
    notifier: Option<Arc<dyn Notifier>>,
    options: ControllerOptions,
}

impl<T, D> ControllerBuilder<T, D>
where
    T: ResourceItem,
    D: Send + Sync + 'static,
{
    #[must_use]
    pub fn new(list_source: Arc<dyn ListSource<T>>) -> Self {
        Self {
            list_source,
            creator: None,
            updater: None,
            deleter: None,
            notifier: None,
            options: ControllerOptions::default(),
        }
    }

    /// Use one resource for loading, creating, updating and deleting.
    #[must_use]
    pub fn with_resource<R>(resource: Arc<R>) -> Self
    where
        R: ListSource<T> + ItemCreator<T, D> + ItemUpdater<T, D> + ItemDeleter + 'static,
    {
        let list_source: Arc<dyn ListSource<T>> = resource.clone();
        let creator: Arc<dyn ItemCreator<T, D>> = resource.clone();
        let updater: Arc<dyn ItemUpdater<T, D>> = resource.clone();
        let deleter: Arc<dyn ItemDeleter> = resource;
        Self::new(list_source)
            .creator(creator)
            .updater(updater)
            .deleter(deleter)
    }

    #[must_use]
    pub fn creator(mut self, creator: Arc<dyn ItemCreator<T, D>>) -> Self {
        self.creator = Some(creator);
        self
    }

    #[must_use]
    pub fn updater(mut self, updater: Arc<dyn ItemUpdater<T, D>>) -> Self {
        self.updater = Some(updater);
        self
    }

    #[must_use]
    pub fn deleter(mut self, deleter: Arc<dyn ItemDeleter>) -> Self {
        self.deleter = Some(deleter);
        self
    }

    #[must_use]
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    #[must_use]
    pub fn options(mut self, options: ControllerOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn load_on_mount(mut self, load_on_mount: bool) -> Self {
        self.options.load_on_mount = load_on_mount;
        self
    }

    #[must_use]
    pub fn default_filters(mut self, default_filters: FilterMap) -> Self {
        self.options.default_filters = default_filters;
        self
    }

    #[must_use]
    pub fn rows_per_page(mut self, rows_per_page: u32) -> Self {
        self.options.rows_per_page = rows_per_page;
        self
    }

    #[must_use]
    pub fn build(self) -> ListResourceController<T, D> {
        let search = SearchState::new(&self.options);
        ListResourceController {
            list_source: self.list_source,
            creator: self.creator,
            updater: self.updater,
            deleter: self.deleter,
            notifier: self.notifier.unwrap_or_else(|| Arc::new(LogNotifier)),
            options: self.options,
            search,
            list: ListState::default(),
            dialog: DialogController::default(),
            confirmation: ConfirmationController::default(),
        }
    }
}
