//! 类型定义模块

mod dialog;
mod options;
mod outcome;
mod search;

pub use dialog::{ConfirmDialogState, DialogKind, DialogMode, DialogState, PendingAction};
pub use options::{ControllerOptions, DEFAULT_ROWS_PER_PAGE};
pub use outcome::{ActionOutcome, LoadOutcome, LoadTicket};
pub use search::{Filters, PageState};

// Re-export 数据源库的公共类型
pub use eduadmin_resource::{
    FilterMap, FilterValue, ItemId, ListQuery, ListResult, LoadResponse, ResourceItem,
};
