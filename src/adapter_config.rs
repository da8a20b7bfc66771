/*!
 * Adapter configuration module
 *
 * This module builds the immutable per-adapter configuration from the
 * already-validated configuration map handed over by the dispatcher.
 * Every required field must be present with the right type; anything else
 * is a construction-time error, never a runtime surprise.
 */

use std::time::Duration;

use anyhow::{Result, anyhow};
use log::info;
use serde_json::{Map, Value};
use url::Url;

/// Immutable configuration captured when an adapter is initialized
#[derive(Debug, Clone)]
pub struct AdapterConfig {
    /// Endpoint the batch requests are posted to
    pub url: Url,

    /// Model identifier forwarded in every payload
    pub language_model: String,

    /// Usage-type tag forwarded in every payload
    pub usage_type: String,

    /// Accept-Language header value
    pub accept_language: String,

    /// x-app-os-version header value
    pub app_os_version: String,

    /// x-app-device header value
    pub app_device: String,

    /// x-app-build header value
    pub app_build: String,

    /// x-app-version header value
    pub app_version: String,

    /// User-Agent header value
    pub user_agent: String,

    /// Optional bearer credential, attached as an Authorization header
    pub auth_token: Option<String>,

    /// Maximum additional attempts after the first failed exchange
    pub retry_count: u32,

    /// Fixed pause between attempts
    pub retry_delay: Duration,

    /// Connection pool size; matches the caller's concurrency limit
    pub concurrent_requests: usize,
}

impl AdapterConfig {
    /// Build a configuration from a raw config map, failing fast on any
    /// missing or mistyped field
    pub fn from_map(configs: &Map<String, Value>) -> Result<Self> {
        let raw_url = require_string(configs, "url")?;
        let url = Url::parse(&raw_url)
            .map_err(|e| anyhow!("config field url is not a valid URL: {}", e))?;

        let config = Self {
            url,
            language_model: require_string(configs, "languageModel")?,
            usage_type: require_string(configs, "usageType")?,
            accept_language: require_string(configs, "acceptLanguage")?,
            app_os_version: require_string(configs, "appOsVersion")?,
            app_device: require_string(configs, "appDevice")?,
            app_build: require_string(configs, "appBuild")?,
            app_version: require_string(configs, "appVersion")?,
            user_agent: require_string(configs, "userAgent")?,
            auth_token: optional_string(configs, "authToken")?,
            retry_count: require_number(configs, "retryCount")? as u32,
            retry_delay: Duration::from_millis(require_number(configs, "retryDelayMs")?),
            concurrent_requests: optional_number(configs, "concurrentRequests")?
                .map(|n| n as usize)
                .unwrap_or_else(default_concurrent_requests),
        };

        info!(
            "adapter config loaded, endpoint host:{}, model:{}",
            config.url.host_str().unwrap_or("<none>"),
            config.language_model
        );
        Ok(config)
    }

    /// Host component of the endpoint, the key for cookie affinity
    pub fn host(&self) -> &str {
        self.url.host_str().unwrap_or_default()
    }
}

fn default_concurrent_requests() -> usize {
    4
}

fn require_string(configs: &Map<String, Value>, key: &str) -> Result<String> {
    let value = configs
        .get(key)
        .ok_or_else(|| anyhow!("missing required config field: {}", key))?;
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| anyhow!("config field {} must be a string", key))
}

fn optional_string(configs: &Map<String, Value>, key: &str) -> Result<Option<String>> {
    match configs.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_str()
            .map(|s| Some(s.to_string()))
            .ok_or_else(|| anyhow!("config field {} must be a string", key)),
    }
}

fn require_number(configs: &Map<String, Value>, key: &str) -> Result<u64> {
    let value = configs
        .get(key)
        .ok_or_else(|| anyhow!("missing required config field: {}", key))?;
    value
        .as_u64()
        .ok_or_else(|| anyhow!("config field {} must be a non-negative number", key))
}

fn optional_number(configs: &Map<String, Value>, key: &str) -> Result<Option<u64>> {
    match configs.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_u64()
            .map(Some)
            .ok_or_else(|| anyhow!("config field {} must be a non-negative number", key)),
    }
}
