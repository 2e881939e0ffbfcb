//! Log sanitization utilities
//!
//! Keeps response bodies (which may carry personal data of students and
//! families) from being dumped whole into debug/error logs.

/// Maximum number of bytes of a body to include in log output.
const TRUNCATE_LIMIT: usize = 256;

/// Largest char boundary not greater than `index`.
fn char_boundary_at_or_before(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    (0..=index)
        .rev()
        .find(|i| s.is_char_boundary(*i))
        .unwrap_or(0)
}

/// Truncate a body for logging.
///
/// Bodies within the limit are returned unchanged; longer ones keep their
/// first `TRUNCATE_LIMIT` bytes (cut on a char boundary) and note the full size.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        return s.to_string();
    }
    let cut = char_boundary_at_or_before(s, TRUNCATE_LIMIT);
    format!("{}... [truncated, total {} bytes]", &s[..cut], s.len())
}
