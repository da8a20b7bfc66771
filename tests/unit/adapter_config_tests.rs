/*!
 * Tests for adapter configuration building and validation
 */

use std::time::Duration;

use serde_json::json;

use babelgate::adapter_config::AdapterConfig;

use crate::common::test_config_map;

#[test]
fn test_fromMap_withFullConfig_shouldCaptureAllFields() {
    let configs = test_config_map("https://translate.example.com/v2/batch");
    let config = AdapterConfig::from_map(&configs).unwrap();

    assert_eq!(config.url.as_str(), "https://translate.example.com/v2/batch");
    assert_eq!(config.host(), "translate.example.com");
    assert_eq!(config.language_model, "freed-mt-v2");
    assert_eq!(config.usage_type, "batch");
    assert_eq!(config.accept_language, "en-US,en;q=0.9");
    assert_eq!(config.app_os_version, "14.0");
    assert_eq!(config.app_device, "Pixel 8");
    assert_eq!(config.app_build, "2024120");
    assert_eq!(config.app_version, "5.12.0");
    assert_eq!(config.user_agent, "gateway-test/5.12.0");
    assert_eq!(config.retry_count, 2);
    assert_eq!(config.retry_delay, Duration::from_millis(25));
    assert_eq!(config.auth_token, None);
    assert_eq!(config.concurrent_requests, 4);
}

#[test]
fn test_fromMap_withMissingField_shouldNameTheField() {
    let mut configs = test_config_map("https://translate.example.com/v2/batch");
    configs.remove("languageModel");

    let error = AdapterConfig::from_map(&configs).unwrap_err();
    assert!(error.to_string().contains("languageModel"));
}

#[test]
fn test_fromMap_withMistypedString_shouldNameTheField() {
    let mut configs = test_config_map("https://translate.example.com/v2/batch");
    configs.insert("usageType".to_string(), json!(42));

    let error = AdapterConfig::from_map(&configs).unwrap_err();
    assert!(error.to_string().contains("usageType"));
}

#[test]
fn test_fromMap_withMistypedNumber_shouldNameTheField() {
    let mut configs = test_config_map("https://translate.example.com/v2/batch");
    configs.insert("retryCount".to_string(), json!("three"));

    let error = AdapterConfig::from_map(&configs).unwrap_err();
    assert!(error.to_string().contains("retryCount"));
}

#[test]
fn test_fromMap_withInvalidUrl_shouldFail() {
    let configs = test_config_map("not a url");
    let error = AdapterConfig::from_map(&configs).unwrap_err();
    assert!(error.to_string().contains("url"));
}

#[test]
fn test_fromMap_withAuthToken_shouldCaptureIt() {
    let mut configs = test_config_map("https://translate.example.com/v2/batch");
    configs.insert("authToken".to_string(), json!("secret-token"));

    let config = AdapterConfig::from_map(&configs).unwrap();
    assert_eq!(config.auth_token.as_deref(), Some("secret-token"));
}

#[test]
fn test_fromMap_withConcurrentRequests_shouldOverrideDefault() {
    let mut configs = test_config_map("https://translate.example.com/v2/batch");
    configs.insert("concurrentRequests".to_string(), json!(16));

    let config = AdapterConfig::from_map(&configs).unwrap();
    assert_eq!(config.concurrent_requests, 16);
}
