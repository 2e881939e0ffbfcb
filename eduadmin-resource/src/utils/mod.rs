//! Utility modules.

/// Truncation helpers for logging response bodies.
pub mod log_sanitizer;
