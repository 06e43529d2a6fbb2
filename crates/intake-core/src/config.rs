use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{IntakeError, Result};
use crate::session::DEFAULT_CONVERSATION_PREFIX;

/// Default backend origin.
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Default per-request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Client configuration shared by the transport and the session.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ClientConfig {
    /// Backend origin; endpoint paths are appended to it.
    pub api_url: String,
    /// Upper bound on any single HTTP request.
    pub request_timeout_secs: u64,
    /// Prefix for generated conversation identifiers.
    pub conversation_prefix: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            conversation_prefix: DEFAULT_CONVERSATION_PREFIX.to_string(),
        }
    }
}

impl ClientConfig {
    /// Request timeout as a `Duration`.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Builds the full URL of an endpoint path such as `/chat`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }

    /// Normalizes and checks the configuration.
    ///
    /// Trailing slashes are trimmed from the URL. An empty URL, a URL without
    /// an http(s) scheme, a zero timeout or an empty prefix is rejected.
    pub fn validated(mut self) -> Result<Self> {
        self.api_url = self.api_url.trim().trim_end_matches('/').to_string();

        if self.api_url.is_empty() {
            return Err(IntakeError::config("api_url must not be empty"));
        }
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(IntakeError::config(format!(
                "api_url must start with http:// or https:// (got {})",
                self.api_url
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(IntakeError::config("request_timeout_secs must be greater than zero"));
        }
        if self.conversation_prefix.trim().is_empty() {
            return Err(IntakeError::config("conversation_prefix must not be empty"));
        }

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.api_url, "http://localhost:5000");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.conversation_prefix, "default");
    }

    #[test]
    fn test_validated_trims_trailing_slash() {
        let config = ClientConfig {
            api_url: "https://intake.example.com/ ".to_string(),
            ..ClientConfig::default()
        }
        .validated()
        .expect("Should accept https URL");

        assert_eq!(config.api_url, "https://intake.example.com");
        assert_eq!(config.endpoint("/chat"), "https://intake.example.com/chat");
        assert_eq!(config.endpoint("health"), "https://intake.example.com/health");
    }

    #[test]
    fn test_validated_rejects_bad_values() {
        let no_scheme = ClientConfig {
            api_url: "localhost:5000".to_string(),
            ..ClientConfig::default()
        };
        assert!(no_scheme.validated().unwrap_err().is_config());

        let zero_timeout = ClientConfig {
            request_timeout_secs: 0,
            ..ClientConfig::default()
        };
        assert!(zero_timeout.validated().unwrap_err().is_config());

        let blank_prefix = ClientConfig {
            conversation_prefix: "  ".to_string(),
            ..ClientConfig::default()
        };
        assert!(blank_prefix.validated().unwrap_err().is_config());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ClientConfig = toml::from_str("api_url = \"http://10.0.0.2:8080\"")
            .expect("Should parse partial config");
        assert_eq!(config.api_url, "http://10.0.0.2:8080");
        assert_eq!(config.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
    }
}
