use std::time::Instant;

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, error, info, warn};
use reqwest::header::{
    ACCEPT, ACCEPT_LANGUAGE, AUTHORIZATION, CONNECTION, CONTENT_TYPE, HeaderMap, HeaderName,
    HeaderValue, USER_AGENT,
};
use serde_json::{Value, json};

use crate::adapter_config::AdapterConfig;
use crate::adapters::{BatchRequest, EngineInfo, TranslationAdapter};
use crate::errors::{AdapterError, LanguageRole};
use crate::language_codes::LanguageCodec;
use crate::retry::RetryPolicy;
use crate::transport::HttpTransport;

/// Human-readable adapter name
pub const ENGINE_NAME: &str = "Freed";

/// Engine code the dispatcher selects this adapter by
pub const ENGINE_CODE: &str = "freed";

/// Adapter for the Freed batch translation HTTP service
///
/// Owns its transport (connection pool and cookie store), language codec,
/// and retry policy for the adapter's whole lifetime; nothing here is
/// process-global.
#[derive(Debug)]
pub struct FreedAdapter {
    config: AdapterConfig,
    codec: &'static LanguageCodec,
    transport: HttpTransport,
    retry: RetryPolicy,
    /// Fixed header set attached to every request
    headers: HeaderMap,
}

impl FreedAdapter {
    /// Build an adapter from a raw configuration map, failing fast on any
    /// missing or mistyped field
    pub fn from_map(configs: &serde_json::Map<String, Value>) -> Result<Self> {
        Self::new(AdapterConfig::from_map(configs)?)
    }

    /// Build an adapter from an already-validated configuration
    pub fn new(config: AdapterConfig) -> Result<Self> {
        let headers = build_fixed_headers(&config)?;
        let transport = HttpTransport::new(config.concurrent_requests)?;
        let retry = RetryPolicy::new(config.retry_count, config.retry_delay);

        info!(
            "{} adapter init success, engine code:{}, endpoint host:{}",
            ENGINE_NAME,
            ENGINE_CODE,
            config.host()
        );

        Ok(Self {
            config,
            codec: LanguageCodec::shared(),
            transport,
            retry,
            headers,
        })
    }

    /// The transport owned by this adapter, exposed for diagnostics
    pub fn transport(&self) -> &HttpTransport {
        &self.transport
    }

    async fn translate_inner(&self, request: &BatchRequest) -> Result<Vec<String>, AdapterError> {
        let target_code = self.codec.resolve(&request.target_lang).ok_or_else(|| {
            AdapterError::UnsupportedLanguage {
                role: LanguageRole::Target,
                tag: request.target_lang.clone(),
            }
        })?;

        // Auto-detection is the absence of a source code: the remote
        // service detects, and any tag the caller supplied alongside the
        // auto flag is ignored.
        let source_code = if request.source_is_auto {
            None
        } else {
            let tag = request.source_lang.as_deref().unwrap_or_default();
            match self.codec.resolve(tag) {
                Some(code) => Some(code),
                None => {
                    return Err(AdapterError::UnsupportedLanguage {
                        role: LanguageRole::Source,
                        tag: tag.to_string(),
                    });
                }
            }
        };

        let mut payload = json!({
            "text": request.inputs,
            "target_lang": target_code,
            "language_model": self.config.language_model,
            "usage_type": self.config.usage_type,
        });
        if let Some(code) = source_code {
            payload["source_lang"] = json!(code);
        }
        let body = payload.to_string();

        let outputs = self
            .retry
            .run(|| self.execute_once(&body, request))
            .await?;

        // The service answers one translation per input; anything else is a
        // malformed batch and no partial data leaves the adapter.
        if outputs.len() != request.inputs.len() {
            error!(
                "{} returned {} translations for {} inputs, request:{}, target:{}",
                ENGINE_NAME,
                outputs.len(),
                request.inputs.len(),
                request.request_id,
                request.target_lang
            );
            return Err(AdapterError::InvalidResponse(format!(
                "expected {} translations, got {}",
                request.inputs.len(),
                outputs.len()
            )));
        }

        Ok(outputs)
    }

    /// One full exchange: send the payload, classify the response
    async fn execute_once(
        &self,
        body: &str,
        request: &BatchRequest,
    ) -> Result<Vec<String>, AdapterError> {
        let exchange = self
            .transport
            .post_json(&self.config.url, self.headers.clone(), body.to_string())
            .await?;

        if !exchange.status.is_success() || exchange.body.is_empty() {
            error!(
                "{} return code invalid, request:{}, target:{}, code:{}",
                ENGINE_NAME,
                request.request_id,
                request.target_lang,
                exchange.status.as_u16()
            );
            return Err(AdapterError::ServiceUnavailable {
                status_code: exchange.status.as_u16(),
                message: format!("{} returned status {}", ENGINE_NAME, exchange.status.as_u16()),
            });
        }

        let value: Value = serde_json::from_str(&exchange.body).map_err(|e| {
            error!(
                "{} return invalid, request:{}, target:{}, result:{}",
                ENGINE_NAME, request.request_id, request.target_lang, exchange.body
            );
            AdapterError::InvalidResponse(format!("response body is not valid JSON: {}", e))
        })?;

        let translations = value
            .get("translations")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                error!(
                    "{} return invalid, request:{}, target:{}, result:{}",
                    ENGINE_NAME, request.request_id, request.target_lang, exchange.body
                );
                AdapterError::InvalidResponse(
                    "missing or mistyped translations field".to_string(),
                )
            })?;

        // A translation object without a text field contributes an empty
        // string rather than failing the batch.
        Ok(translations
            .iter()
            .map(|item| {
                item.get("text")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string()
            })
            .collect())
    }
}

#[async_trait]
impl TranslationAdapter for FreedAdapter {
    fn name(&self) -> &str {
        ENGINE_NAME
    }

    fn supported_engines(&self) -> Vec<EngineInfo> {
        vec![EngineInfo::new(ENGINE_CODE, ENGINE_NAME)]
    }

    fn is_pair_supported(&self, source_lang: &str, target_lang: &str) -> bool {
        self.codec.resolve(source_lang).is_some() && self.codec.resolve(target_lang).is_some()
    }

    fn is_target_supported(&self, target_lang: &str) -> bool {
        self.codec.resolve(target_lang).is_some()
    }

    async fn translate_batch(&self, request: &BatchRequest) -> Result<Vec<String>, AdapterError> {
        let started = Instant::now();
        debug!(
            "{} translate start, request:{}, target:{}, inputs:{:?}",
            ENGINE_NAME, request.request_id, request.target_lang, request.inputs
        );

        match self.translate_inner(request).await {
            Ok(outputs) => {
                info!(
                    "{} translate end, request:{}, time:{}ms, target:{}, results:{:?}",
                    ENGINE_NAME,
                    request.request_id,
                    started.elapsed().as_millis(),
                    request.target_lang,
                    outputs
                );
                Ok(outputs)
            }
            Err(error) => {
                warn!(
                    "{} translation failure, request:{}, inputs:{:?}, target:{}, error:{}",
                    ENGINE_NAME, request.request_id, request.inputs, request.target_lang, error
                );
                Err(error)
            }
        }
    }
}

/// Build the fixed header set once at construction
fn build_fixed_headers(config: &AdapterConfig) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    insert_header(&mut headers, "x-app-os-version", &config.app_os_version)?;
    insert_header(&mut headers, "x-app-device", &config.app_device)?;
    insert_header(&mut headers, "x-app-build", &config.app_build)?;
    insert_header(&mut headers, "x-app-version", &config.app_version)?;
    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(&config.user_agent).context("invalid userAgent header value")?,
    );
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_str(&config.accept_language)
            .context("invalid acceptLanguage header value")?,
    );
    if let Some(token) = &config.auth_token {
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token))
                .context("invalid authToken header value")?,
        );
    }
    Ok(headers)
}

fn insert_header(headers: &mut HeaderMap, name: &'static str, value: &str) -> Result<()> {
    headers.insert(
        HeaderName::from_static(name),
        HeaderValue::from_str(value).with_context(|| format!("invalid {} header value", name))?,
    );
    Ok(())
}
