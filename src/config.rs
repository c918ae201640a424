use serde::{Deserialize, Serialize};
use std::fs;

/// Env var overriding the configured API base URL.
pub const API_URL_ENV: &str = "LEDGERDESK_API_URL";

/// Local default used when neither config nor env provide a base URL.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8090";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    pub rotation: String,
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_dir: "./logs".to_string(),
            log_file: "ledgerdesk.log".to_string(),
            use_json: false,
            rotation: "daily".to_string(),
            api: ApiConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn load(env: &str) -> anyhow::Result<Self> {
        let config_path = format!("config/{}.yaml", env);
        let content = fs::read_to_string(&config_path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {}", config_path, e))?;
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Load `config/{env}.yaml`, falling back to defaults if absent.
    pub fn load_or_default(env: &str) -> Self {
        Self::load(env).unwrap_or_default()
    }

    /// Effective API base URL: `LEDGERDESK_API_URL` wins over the file,
    /// the file over the hardcoded local default.
    pub fn api_base_url(&self) -> String {
        std::env::var(API_URL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| self.api.base_url.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api.base_url, DEFAULT_API_URL);
        assert_eq!(config.api.timeout_secs, 30);
    }

    #[test]
    fn test_api_section_is_optional_in_yaml() {
        let yaml = r#"
log_level: debug
log_dir: ./logs
log_file: test.log
use_json: false
rotation: never
"#;
        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.api.base_url, DEFAULT_API_URL);
    }
}
