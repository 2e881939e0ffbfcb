use serde::{Deserialize, Serialize};

/// Unified error type for all data-source operations.
///
/// Each variant carries a `resource` field naming the collection that produced
/// the error (e.g. `"branches"`), plus variant-specific context. All variants are
/// serializable for structured error reporting.
///
/// # Retryable Errors
///
/// The following variants represent transient failures that may succeed on retry:
/// - [`NetworkError`](Self::NetworkError): network connectivity issues
/// - [`Timeout`](Self::Timeout): request timed out
/// - [`RateLimited`](Self::RateLimited): backend rate limit exceeded
///
/// The REST adapter retries these with exponential backoff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ResourceError {
    /// A network-level error occurred (DNS resolution failure, connection refused, etc.).
    NetworkError {
        /// Resource that produced the error.
        resource: String,
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    Timeout {
        /// Resource that produced the error.
        resource: String,
        /// Error details.
        detail: String,
    },

    /// The backend rate limit has been exceeded (HTTP 429).
    RateLimited {
        /// Resource that produced the error.
        resource: String,
        /// Suggested wait time in seconds, if the backend sent `Retry-After`.
        retry_after: Option<u64>,
        /// Raw response body, if any.
        raw_message: Option<String>,
    },

    /// The backend answered with a non-success status.
    Backend {
        /// Resource that produced the error.
        resource: String,
        /// HTTP status code.
        status: u16,
        /// Human-readable message supplied by the backend (`message` field of the body).
        message: Option<String>,
        /// Raw response body, kept for diagnostics.
        raw_body: Option<String>,
    },

    /// Failed to parse the backend response.
    ParseError {
        /// Resource that produced the error.
        resource: String,
        /// Details about the parse failure.
        detail: String,
    },

    /// Failed to serialize a request body.
    SerializationError {
        /// Resource that produced the error.
        resource: String,
        /// Details about the serialization failure.
        detail: String,
    },

    /// The client configuration is unusable (bad base URL, etc.).
    InvalidConfig {
        /// Which setting is wrong.
        field: String,
        /// Description of what's wrong.
        detail: String,
    },

    /// An item operation was called with an empty record id.
    MissingId {
        /// Resource that produced the error.
        resource: String,
        /// Operation name (`update`, `delete`).
        operation: String,
    },

    /// Catch-all for failures with nothing more specific to say.
    Unknown {
        /// Resource that produced the error.
        resource: String,
        /// Raw error message.
        raw_message: String,
    },
}

impl ResourceError {
    /// 是否为预期行为（用户输入、资源不存在等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    /// **新增变体时请同步更新此方法。**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::Backend { status, .. } => (400..500).contains(status),
            Self::MissingId { .. } => true,
            _ => false,
        }
    }

    /// Whether retrying the same request may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::NetworkError { .. } | Self::Timeout { .. } | Self::RateLimited { .. }
        )
    }

    /// The error's own message, without the resource prefix used by `Display`.
    #[must_use]
    pub fn detail_message(&self) -> String {
        match self {
            Self::NetworkError { detail, .. }
            | Self::Timeout { detail, .. }
            | Self::ParseError { detail, .. }
            | Self::SerializationError { detail, .. } => detail.clone(),
            Self::RateLimited { .. } => "Too many requests".to_string(),
            Self::Backend { status, .. } => format!("Request failed with status code {status}"),
            Self::InvalidConfig { field, detail } => format!("Invalid setting '{field}': {detail}"),
            Self::MissingId { operation, .. } => format!("Operation '{operation}' requires a record id"),
            Self::Unknown { raw_message, .. } => raw_message.clone(),
        }
    }

    /// Message suitable for showing to an operator.
    ///
    /// Prefers the backend-supplied `message`, then the error's own message.
    /// Returns `None` when neither carries any text, leaving the fallback to the caller.
    #[must_use]
    pub fn user_message(&self) -> Option<String> {
        if let Self::Backend {
            message: Some(message),
            ..
        } = self
        {
            let message = message.trim();
            if !message.is_empty() {
                return Some(message.to_string());
            }
        }

        let detail = self.detail_message();
        let detail = detail.trim();
        if detail.is_empty() {
            None
        } else {
            Some(detail.to_string())
        }
    }
}

impl std::fmt::Display for ResourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { resource, detail } => {
                write!(f, "[{resource}] Network error: {detail}")
            }
            Self::Timeout { resource, detail } => {
                write!(f, "[{resource}] Request timeout: {detail}")
            }
            Self::RateLimited {
                resource,
                retry_after,
                ..
            } => {
                if let Some(secs) = retry_after {
                    write!(f, "[{resource}] Rate limited (retry after {secs}s)")
                } else {
                    write!(f, "[{resource}] Rate limited")
                }
            }
            Self::Backend {
                resource,
                status,
                message,
                ..
            } => {
                if let Some(msg) = message {
                    write!(f, "[{resource}] HTTP {status}: {msg}")
                } else {
                    write!(f, "[{resource}] HTTP {status}")
                }
            }
            Self::ParseError { resource, detail } => {
                write!(f, "[{resource}] Parse error: {detail}")
            }
            Self::SerializationError { resource, detail } => {
                write!(f, "[{resource}] Serialization error: {detail}")
            }
            Self::InvalidConfig { field, detail } => {
                write!(f, "Invalid configuration '{field}': {detail}")
            }
            Self::MissingId {
                resource,
                operation,
            } => {
                write!(f, "[{resource}] {operation} requires a record id")
            }
            Self::Unknown {
                resource,
                raw_message,
            } => {
                write!(f, "[{resource}] {raw_message}")
            }
        }
    }
}

impl std::error::Error for ResourceError {}

/// Convenience type alias for `Result<T, ResourceError>`.
pub type Result<T> = std::result::Result<T, ResourceError>;
