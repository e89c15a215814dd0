use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

pub const DEFAULT_GET_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_PUT_TIMEOUT_SECS: u64 = 30;

pub const BASE_URL_ENV: &str = "CATALOGUE_URL";
pub const API_KEY_ENV: &str = "CATALOGUE_API_KEY";

#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub base_url: String,
    /// Never logged.
    #[serde(default, skip_serializing)]
    pub api_key: String,
    pub timeouts: TimeoutConfig,
    pub retry: RetryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    pub get_timeout_secs: u64,
    pub put_timeout_secs: u64,
}

/// Transport-level retries. Status codes are never retried.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    pub max_retries: usize,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("timeouts", &self.timeouts)
            .field("retry", &self.retry)
            .finish()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8082/api".to_string(),
            api_key: String::new(),
            timeouts: TimeoutConfig::default(),
            retry: RetryConfig::default(),
        }
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            get_timeout_secs: DEFAULT_GET_TIMEOUT_SECS,
            put_timeout_secs: DEFAULT_PUT_TIMEOUT_SECS,
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 0,
            initial_backoff_ms: 500,
            max_backoff_ms: 5000,
        }
    }
}

impl TimeoutConfig {
    pub fn get_timeout(&self) -> Duration {
        Duration::from_secs(self.get_timeout_secs)
    }

    pub fn put_timeout(&self) -> Duration {
        Duration::from_secs(self.put_timeout_secs)
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Read base URL and key from `CATALOGUE_URL` / `CATALOGUE_API_KEY`,
    /// keeping defaults for anything unset.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            config.base_url = url;
        }
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            config.api_key = key;
        }
        config
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Join an endpoint onto the base URL with exactly one `/` between them.
    pub fn api_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }
}
