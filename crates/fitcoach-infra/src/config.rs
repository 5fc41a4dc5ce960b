//! Client configuration loader.
//!
//! Reads `config.toml` from the data directory and deserializes it into
//! [`ClientConfig`]. Falls back to defaults when the file is missing or
//! malformed. `FITCOACH_API_URL` overrides the backend URL.

use std::path::Path;

use fitcoach_types::config::ClientConfig;

pub const API_URL_ENV: &str = "FITCOACH_API_URL";

/// Load configuration from `{data_dir}/config.toml` and apply the environment override.
pub async fn load_client_config(data_dir: &Path) -> ClientConfig {
    let config = read_config_file(data_dir).await;
    apply_api_url_override(config, std::env::var(API_URL_ENV).ok())
}

async fn read_config_file(data_dir: &Path) -> ClientConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return ClientConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return ClientConfig::default();
        }
    };

    match toml::from_str::<ClientConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            ClientConfig::default()
        }
    }
}

fn apply_api_url_override(mut config: ClientConfig, api_url: Option<String>) -> ClientConfig {
    if let Some(url) = api_url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty()) {
        config.api_base_url = url;
    }
    config
}
