//! Per-product connection configuration: base URL, credentials, timeout.

use super::credentials::Credentials;
use crate::error::ConfigError;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
const MIN_TIMEOUT_SECONDS: i64 = 1;
const MAX_TIMEOUT_SECONDS: i64 = 300;

/// Immutable connection settings for one product. Constructed once at
/// startup and read-only for the process lifetime.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    base_url: String,
    credentials: Credentials,
    timeout_seconds: u64,
}

impl ConnectionConfig {
    /// Builds a connection config. `base_url`'s trailing slash is
    /// stripped. `timeout_seconds` must be in `[1, 300]`.
    ///
    /// # Errors
    /// Returns [`ConfigError::OutOfRange`] if the timeout is out of bounds.
    pub fn new(
        base_url: impl Into<String>,
        credentials: Credentials,
        timeout_seconds: u64,
    ) -> Result<Self, ConfigError> {
        let ts = i64::try_from(timeout_seconds).unwrap_or(i64::MAX);
        if !(MIN_TIMEOUT_SECONDS..=MAX_TIMEOUT_SECONDS).contains(&ts) {
            return Err(ConfigError::OutOfRange {
                key: "timeoutSeconds",
                value: ts,
                min: MIN_TIMEOUT_SECONDS,
                max: MAX_TIMEOUT_SECONDS,
            });
        }
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials,
            timeout_seconds,
        })
    }

    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    #[must_use]
    pub const fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Concatenates the base URL and `api_path`, inserting a single `/`
    /// if the path doesn't already start with one.
    #[must_use]
    pub fn build_url(&self, api_path: &str) -> String {
        if api_path.starts_with('/') {
            format!("{}{}", self.base_url, api_path)
        } else {
            format!("{}/{}", self.base_url, api_path)
        }
    }
}
