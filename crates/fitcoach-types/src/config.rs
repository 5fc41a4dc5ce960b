//! Client configuration types.
//!
//! `ClientConfig` represents `config.toml` in the data directory and controls
//! which backend the client talks to and how long navigation messages stay
//! on screen.

use serde::{Deserialize, Serialize};

use std::time::Duration;

/// Top-level client configuration. All fields have defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the backend REST API, including the `/api` prefix.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Delay before leaving the chat after a plan arrives.
    #[serde(default = "default_plan_redirect_delay_ms")]
    pub plan_redirect_delay_ms: u64,

    /// Delay before prompting an anonymous user to sign in.
    #[serde(default = "default_login_redirect_delay_ms")]
    pub login_redirect_delay_ms: u64,

    /// Export spans to stdout through OpenTelemetry.
    #[serde(default)]
    pub enable_otel: bool,
}

fn default_api_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_plan_redirect_delay_ms() -> u64 {
    1200
}

fn default_login_redirect_delay_ms() -> u64 {
    1500
}

impl ClientConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn plan_redirect_delay(&self) -> Duration {
        Duration::from_millis(self.plan_redirect_delay_ms)
    }

    pub fn login_redirect_delay(&self) -> Duration {
        Duration::from_millis(self.login_redirect_delay_ms)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            plan_redirect_delay_ms: default_plan_redirect_delay_ms(),
            login_redirect_delay_ms: default_login_redirect_delay_ms(),
            enable_otel: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_default_values() {
        let config = ClientConfig::default();
        assert_eq!(config.api_base_url, "http://localhost:8080/api");
        assert_eq!(config.plan_redirect_delay(), Duration::from_millis(1200));
        assert_eq!(config.login_redirect_delay(), Duration::from_millis(1500));
        assert!(!config.enable_otel);
    }

    #[test]
    fn test_client_config_deserialize_with_defaults() {
        let config: ClientConfig = toml::from_str("").unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_client_config_deserialize_with_values() {
        let toml_str = r#"
api_base_url = "https://coach.example.com/api"
request_timeout_secs = 5
plan_redirect_delay_ms = 0
enable_otel = true
"#;
        let config: ClientConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.api_base_url, "https://coach.example.com/api");
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert_eq!(config.plan_redirect_delay_ms, 0);
        assert_eq!(config.login_redirect_delay_ms, 1500);
        assert!(config.enable_otel);
    }
}
