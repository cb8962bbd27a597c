//! Client configuration with file and environment loading.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable names.
pub mod env {
    /// Path to a TOML config file
    pub const CONFIG: &str = "JUPAG_CONFIG";
    pub const API_URL: &str = "JUPAG_API_URL";
    pub const TIMEOUT_MS: &str = "JUPAG_TIMEOUT_MS";
    pub const MAX_RETRIES: &str = "JUPAG_MAX_RETRIES";
}

/// Endpoint and transport settings for the aggregator client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL all endpoint paths are appended to
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_quote_path")]
    pub quote_path: String,

    #[serde(default = "default_swap_path")]
    pub swap_path: String,

    #[serde(default = "default_price_path")]
    pub price_path: String,

    #[serde(default = "default_routes_map_path")]
    pub routes_map_path: String,

    /// Per-request timeout (milliseconds)
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Retry behaviour for transient failures
    #[serde(default)]
    pub retry: RetryConfig,
}

fn default_api_url() -> String {
    "https://price.jup.ag/v6".to_string()
}
fn default_quote_path() -> String {
    "/quote".to_string()
}
fn default_swap_path() -> String {
    "/swap".to_string()
}
fn default_price_path() -> String {
    "/price".to_string()
}
fn default_routes_map_path() -> String {
    "/indexed-route-map".to_string()
}
fn default_timeout_ms() -> u64 {
    500
}
fn default_user_agent() -> String {
    concat!("jupag/", env!("CARGO_PKG_VERSION")).to_string()
}

/// Constant backoff with random jitter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Retries after the first attempt
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Base wait between attempts (milliseconds)
    #[serde(default = "default_backoff_ms")]
    pub backoff_ms: u64,

    /// Upper bound of the random jitter added to each wait (milliseconds)
    #[serde(default = "default_max_jitter_ms")]
    pub max_jitter_ms: u64,
}

fn default_max_retries() -> u32 {
    1
}
fn default_backoff_ms() -> u64 {
    500
}
fn default_max_jitter_ms() -> u64 {
    1000
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            backoff_ms: default_backoff_ms(),
            max_jitter_ms: default_max_jitter_ms(),
        }
    }
}

impl RetryConfig {
    pub fn backoff(&self) -> Duration {
        Duration::from_millis(self.backoff_ms)
    }

    pub fn max_jitter(&self) -> Duration {
        Duration::from_millis(self.max_jitter_ms)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            quote_path: default_quote_path(),
            swap_path: default_swap_path(),
            price_path: default_price_path(),
            routes_map_path: default_routes_map_path(),
            timeout_ms: default_timeout_ms(),
            user_agent: default_user_agent(),
            retry: RetryConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {path}"))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {path}"))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `JUPAG_CONFIG` if set, else defaults, then apply
    /// `JUPAG_API_URL`, `JUPAG_TIMEOUT_MS` and `JUPAG_MAX_RETRIES`.
    pub fn from_env() -> Result<Self> {
        let base = match std::env::var(env::CONFIG) {
            Ok(path) => Self::from_file(&path)?,
            Err(_) => Self::default(),
        };
        base.with_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from a variable lookup.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(env::API_URL) {
            self.api_url = url;
        }
        if let Some(timeout) = lookup(env::TIMEOUT_MS) {
            self.timeout_ms = timeout
                .trim()
                .parse()
                .with_context(|| format!("Invalid {}: {timeout}", env::TIMEOUT_MS))?;
        }
        if let Some(retries) = lookup(env::MAX_RETRIES) {
            self.retry.max_retries = retries
                .trim()
                .parse()
                .with_context(|| format!("Invalid {}: {retries}", env::MAX_RETRIES))?;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            anyhow::bail!("api_url must be an http(s) URL, got {:?}", self.api_url);
        }
        if self.timeout_ms == 0 {
            anyhow::bail!("timeout_ms must be greater than zero");
        }
        Ok(())
    }

    /// Join the base URL and an endpoint path.
    pub fn endpoint(&self, path: &str) -> String {
        let base = self.api_url.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        }
    }

    pub fn quote_url(&self) -> String {
        self.endpoint(&self.quote_path)
    }

    pub fn swap_url(&self) -> String {
        self.endpoint(&self.swap_path)
    }

    pub fn price_url(&self) -> String {
        self.endpoint(&self.price_path)
    }

    pub fn routes_map_url(&self) -> String {
        self.endpoint(&self.routes_map_path)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Log the current configuration.
    pub fn log_config(&self) {
        tracing::info!(
            api_url = %self.api_url,
            timeout_ms = self.timeout_ms,
            "Client configuration loaded"
        );
        tracing::info!(
            max_retries = self.retry.max_retries,
            backoff_ms = self.retry.backoff_ms,
            max_jitter_ms = self.retry.max_jitter_ms,
            "Retry policy"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.api_url, "https://price.jup.ag/v6");
        assert_eq!(config.timeout(), Duration::from_millis(500));
        assert_eq!(config.retry.max_retries, 1);
        assert_eq!(config.retry.backoff(), Duration::from_millis(500));
        assert_eq!(config.retry.max_jitter(), Duration::from_millis(1000));
        assert!(config.user_agent.starts_with("jupag/"));
    }

    #[test]
    fn test_endpoints() {
        let config = ClientConfig::default();
        assert_eq!(config.quote_url(), "https://price.jup.ag/v6/quote");
        assert_eq!(config.swap_url(), "https://price.jup.ag/v6/swap");
        assert_eq!(config.price_url(), "https://price.jup.ag/v6/price");
        assert_eq!(config.routes_map_url(), "https://price.jup.ag/v6/indexed-route-map");

        let config = ClientConfig {
            api_url: "http://localhost:8080/".to_string(),
            ..Default::default()
        };
        assert_eq!(config.endpoint("quote"), "http://localhost:8080/quote");
        assert_eq!(config.endpoint("/quote"), "http://localhost:8080/quote");
    }

    #[test]
    fn test_partial_toml() {
        let config: ClientConfig = toml::from_str(
            r#"
            api_url = "https://quote-api.jup.ag/v6"
            timeout_ms = 2000

            [retry]
            max_retries = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.api_url, "https://quote-api.jup.ag/v6");
        assert_eq!(config.timeout_ms, 2000);
        assert_eq!(config.quote_path, "/quote");
        assert_eq!(config.retry.max_retries, 3);
        assert_eq!(config.retry.backoff_ms, 500);
    }

    #[test]
    fn test_serialization() {
        let config = ClientConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("api_url = \"https://price.jup.ag/v6\""));

        let parsed: ClientConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (env::API_URL, "http://127.0.0.1:9000"),
            (env::TIMEOUT_MS, "1500"),
            (env::MAX_RETRIES, "0"),
        ]);
        let config = ClientConfig::default()
            .with_overrides(|name| vars.get(name).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.api_url, "http://127.0.0.1:9000");
        assert_eq!(config.timeout_ms, 1500);
        assert_eq!(config.retry.max_retries, 0);
    }

    #[test]
    fn test_invalid_overrides() {
        let bad_timeout = ClientConfig::default()
            .with_overrides(|name| (name == env::TIMEOUT_MS).then(|| "fast".to_string()));
        assert!(bad_timeout.is_err());

        let bad_url = ClientConfig::default()
            .with_overrides(|name| (name == env::API_URL).then(|| "ftp://x".to_string()));
        assert!(bad_url.is_err());

        let zero_timeout = ClientConfig::default()
            .with_overrides(|name| (name == env::TIMEOUT_MS).then(|| "0".to_string()));
        assert!(zero_timeout.is_err());
    }

    #[test]
    fn test_from_file() {
        let path = std::env::temp_dir().join(format!("jupag-config-{}.toml", std::process::id()));
        std::fs::write(&path, "timeout_ms = 750\n").unwrap();

        let config = ClientConfig::from_file(path.to_str().unwrap()).unwrap();
        assert_eq!(config.timeout_ms, 750);

        std::fs::remove_file(&path).unwrap();
        assert!(ClientConfig::from_file(path.to_str().unwrap()).is_err());
    }
}
