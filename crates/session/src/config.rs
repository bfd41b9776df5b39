//! Client configuration.

use std::time::Duration;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080/api";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Transport settings for the HTTP collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL the endpoint paths are joined onto, without trailing slash.
    pub base_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read overrides from `MEDCONSOLE_BASE_URL` and `MEDCONSOLE_TIMEOUT_MS`.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("MEDCONSOLE_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let mut config = Self::new(base_url);
        if let Some(ms) = std::env::var("MEDCONSOLE_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
        {
            config.timeout = Duration::from_millis(ms);
        }
        config
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_trimmed() {
        let config = ClientConfig::new("http://localhost:8080/api//");
        assert_eq!(config.base_url, "http://localhost:8080/api");
    }

    #[test]
    fn default_matches_the_server_conventions() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.base_url.ends_with("/api"));
    }
}
