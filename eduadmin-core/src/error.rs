//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

use crate::messages;

// Re-export library error type
pub use eduadmin_resource::ResourceError;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Data source error (converting from library)
    #[error("{0}")]
    Resource(#[from] ResourceError),

    /// The page did not configure the function for this operation
    #[error("Operation not available: {0}")]
    OperationUnavailable(String),
}

impl CoreError {
    /// 是否为预期行为（用户输入、资源不存在等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    /// **新增变体时请同步更新此方法。**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::Resource(e) => e.is_expected(),
            Self::OperationUnavailable(_) => true,
        }
    }

    /// Text shown to the operator.
    ///
    /// Order of preference: the backend's `message`, the error's own text, then `fallback`.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Resource(e) => e.user_message().unwrap_or_else(|| fallback.to_string()),
            Self::OperationUnavailable(operation) => messages::operation_unavailable(operation),
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
