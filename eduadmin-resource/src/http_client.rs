//! HTTP request plumbing shared by REST resources
//!
//! Sends a prepared `RequestBuilder`, logs it, maps transport failures and
//! non-success statuses into [`ResourceError`], and retries transient failures.

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::error::ResourceError;
use crate::utils::log_sanitizer::truncate_for_log;

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Performs an HTTP request and returns the response text of a 2xx answer.
    ///
    /// # Arguments
    /// * `request_builder` - configured request (URL, headers, body)
    /// * `resource` - resource name (for logs and errors)
    /// * `method_name` - HTTP method (for logs)
    /// * `url` - target URL (for logs)
    ///
    /// # Returns
    /// * `Ok(response_text)` on 2xx
    /// * `Err(ResourceError::RateLimited)` on 429
    /// * `Err(ResourceError::NetworkError)` on transport failures and 502-504
    /// * `Err(ResourceError::Backend)` on any other non-success status
    pub async fn execute_request(
        request_builder: RequestBuilder,
        resource: &str,
        method_name: &str,
        url: &str,
    ) -> Result<String, ResourceError> {
        log::debug!("[{resource}] {method_name} {url}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ResourceError::Timeout {
                    resource: resource.to_string(),
                    detail: e.to_string(),
                }
            } else {
                ResourceError::NetworkError {
                    resource: resource.to_string(),
                    detail: e.to_string(),
                }
            }
        })?;

        let status_code = response.status().as_u16();
        log::debug!("[{resource}] Response Status: {status_code}");

        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        let response_text = response
            .text()
            .await
            .map_err(|e| ResourceError::NetworkError {
                resource: resource.to_string(),
                detail: format!("Failed to read response body: {e}"),
            })?;

        log::debug!(
            "[{resource}] Response Body: {}",
            truncate_for_log(&response_text)
        );

        check_status(status_code, response_text, retry_after, resource)
    }

    /// Parse a JSON response body.
    pub fn parse_json<T>(response_text: &str, resource: &str) -> Result<T, ResourceError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("[{resource}] JSON parse failed: {e}");
            log::error!(
                "[{resource}] Raw response: {}",
                truncate_for_log(response_text)
            );
            ResourceError::ParseError {
                resource: resource.to_string(),
                detail: e.to_string(),
            }
        })
    }

    /// Performs an HTTP request, retrying transient failures.
    ///
    /// # Retry strategy
    /// - Only [`ResourceError::is_retryable`] errors are retried
    /// - `Retry-After` is honoured for 429 (capped at 30s)
    /// - Otherwise exponential backoff: 100ms, 200ms, 400ms, ... (maximum 10 seconds)
    pub async fn execute_request_with_retry(
        request_builder: RequestBuilder,
        resource: &str,
        method_name: &str,
        url: &str,
        max_retries: u32,
    ) -> Result<String, ResourceError> {
        if max_retries == 0 {
            return Self::execute_request(request_builder, resource, method_name, url).await;
        }

        let mut last_error = None;

        for attempt in 0..=max_retries {
            // RequestBuilder is single-use
            let Some(req) = request_builder.try_clone() else {
                log::warn!("[{resource}] Cannot clone request, disabling retry");
                return Self::execute_request(request_builder, resource, method_name, url).await;
            };

            match Self::execute_request(req, resource, method_name, url).await {
                Ok(resp) => return Ok(resp),
                Err(e) if attempt < max_retries && e.is_retryable() => {
                    let delay = retry_delay(&e, attempt);
                    log::warn!(
                        "[{}] Request failed (attempt {}/{}), retrying in {:.1}s: {}",
                        resource,
                        attempt + 1,
                        max_retries,
                        delay.as_secs_f32(),
                        e
                    );
                    tokio::time::sleep(delay).await;
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| ResourceError::NetworkError {
            resource: resource.to_string(),
            detail: "All retries exhausted with no error captured".to_string(),
        }))
    }
}

/// Map a status code and body to the request outcome.
fn check_status(
    status_code: u16,
    body: String,
    retry_after: Option<u64>,
    resource: &str,
) -> Result<String, ResourceError> {
    match status_code {
        200..=299 => Ok(body),
        429 => {
            log::warn!("[{resource}] Rate limited (HTTP 429), retry_after={retry_after:?}");
            Err(ResourceError::RateLimited {
                resource: resource.to_string(),
                retry_after,
                raw_message: non_empty(body),
            })
        }
        502..=504 => {
            log::warn!("[{resource}] Server error (HTTP {status_code})");
            Err(ResourceError::NetworkError {
                resource: resource.to_string(),
                detail: format!("HTTP {status_code}: {}", truncate_for_log(&body)),
            })
        }
        _ => Err(ResourceError::Backend {
            resource: resource.to_string(),
            status: status_code,
            message: backend_message(&body),
            raw_body: non_empty(body),
        }),
    }
}

/// Extract the `message` field of a JSON error body.
///
/// Also looks one level into a `data` or `error` object, which some endpoints
/// use as an envelope.
fn backend_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let direct = value.get("message");
    let nested = || {
        ["data", "error"]
            .iter()
            .find_map(|key| value.get(*key).and_then(|inner| inner.get("message")))
    };
    direct
        .or_else(nested)
        .and_then(serde_json::Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

fn non_empty(body: String) -> Option<String> {
    if body.trim().is_empty() { None } else { Some(body) }
}

/// Calculate retry delay
fn retry_delay(error: &ResourceError, attempt: u32) -> Duration {
    if let ResourceError::RateLimited {
        retry_after: Some(secs),
        ..
    } = error
    {
        Duration::from_secs((*secs).min(30))
    } else {
        backoff_delay(attempt)
    }
}

/// Exponential backoff: 100ms, 200ms, 400ms, 800ms, 1.6s, ... capped at 10 seconds
fn backoff_delay(attempt: u32) -> Duration {
    let capped_attempt = attempt.min(20);
    let delay_ms = 100_u64.saturating_mul(1_u64 << capped_attempt);
    Duration::from_millis(delay_ms.min(10_000))
}
