//! REST client configuration

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ResourceError, Result};

/// Environment variable holding the API base URL.
pub const ENV_BASE_URL: &str = "EDUADMIN_API_BASE_URL";
/// Environment variable holding the request timeout in seconds.
pub const ENV_TIMEOUT_SECS: &str = "EDUADMIN_API_TIMEOUT_SECS";
/// Environment variable holding the retry budget for idempotent requests.
pub const ENV_MAX_RETRIES: &str = "EDUADMIN_API_MAX_RETRIES";
/// Environment variable holding the bearer token.
pub const ENV_TOKEN: &str = "EDUADMIN_API_TOKEN";

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    2
}

/// Connection settings shared by every [`RestResource`](crate::RestResource).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestConfig {
    /// API root, e.g. `https://api.example.edu.vn/api`.
    pub base_url: String,
    /// Per-request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Retries for idempotent requests (GET, PUT, DELETE). POST is never retried.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Sent as `Authorization: Bearer <token>` when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearer_token: Option<String>,
}

impl RestConfig {
    /// Configuration with default timeout and retries.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            bearer_token: None,
        }
    }

    /// Set the bearer token.
    #[must_use]
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Read configuration from `EDUADMIN_API_*` environment variables.
    ///
    /// The base URL is required; the other values fall back to their defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let base_url = lookup(ENV_BASE_URL)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ResourceError::InvalidConfig {
                field: ENV_BASE_URL.to_string(),
                detail: "not set".to_string(),
            })?;

        let mut config = Self::new(base_url.trim());

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            config.timeout_secs = parse_number(ENV_TIMEOUT_SECS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_MAX_RETRIES) {
            config.max_retries = parse_number(ENV_MAX_RETRIES, &raw)?;
        }
        config.bearer_token = lookup(ENV_TOKEN).filter(|v| !v.trim().is_empty());

        config.validate()?;
        Ok(config)
    }

    /// Parse and check the base URL.
    ///
    /// Only `http` and `https` roots are accepted.
    pub fn validate(&self) -> Result<Url> {
        let url = Url::parse(self.base_url.trim()).map_err(|e| ResourceError::InvalidConfig {
            field: "baseUrl".to_string(),
            detail: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ResourceError::InvalidConfig {
                field: "baseUrl".to_string(),
                detail: format!("unsupported scheme '{}'", url.scheme()),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ResourceError::InvalidConfig {
                field: "timeoutSecs".to_string(),
                detail: "must be greater than zero".to_string(),
            });
        }
        Ok(url)
    }
}

fn parse_number<N: std::str::FromStr>(field: &str, raw: &str) -> Result<N>
where
    N::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<N>()
        .map_err(|e| ResourceError::InvalidConfig {
            field: field.to_string(),
            detail: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn deserialize_with_defaults() {
        let config: RestConfig =
            serde_json::from_str(r#"{"baseUrl":"https://api.example.vn"}"#).unwrap();
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.max_retries, 2);
        assert!(config.bearer_token.is_none());
    }

    #[test]
    fn from_lookup_reads_all_values() {
        let config = RestConfig::from_lookup(lookup_from(&[
            (ENV_BASE_URL, " https://api.example.vn/api "),
            (ENV_TIMEOUT_SECS, "5"),
            (ENV_MAX_RETRIES, "0"),
            (ENV_TOKEN, "secret"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "https://api.example.vn/api");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.max_retries, 0);
        assert_eq!(config.bearer_token.as_deref(), Some("secret"));
    }

    #[test]
    fn from_lookup_requires_base_url() {
        let err = RestConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, ResourceError::InvalidConfig { field, .. } if field == ENV_BASE_URL));
    }

    #[test]
    fn from_lookup_rejects_bad_numbers() {
        let err = RestConfig::from_lookup(lookup_from(&[
            (ENV_BASE_URL, "https://api.example.vn"),
            (ENV_TIMEOUT_SECS, "soon"),
        ]))
        .unwrap_err();
        assert!(
            matches!(err, ResourceError::InvalidConfig { field, .. } if field == ENV_TIMEOUT_SECS)
        );
    }

    #[test]
    fn validate_rejects_non_http_scheme() {
        assert!(RestConfig::new("ftp://files.example.vn").validate().is_err());
        assert!(RestConfig::new("not a url").validate().is_err());
        assert!(RestConfig::new("http://localhost:8080").validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let mut config = RestConfig::new("http://localhost:8080");
        config.timeout_secs = 0;
        assert!(config.validate().is_err());
    }
}
