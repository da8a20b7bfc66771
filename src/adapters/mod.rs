/*!
 * Adapter implementations for remote translation engines.
 *
 * This module contains the trait every engine adapter implements and the
 * registry the dispatcher uses to pick one:
 * - Freed: batch translation HTTP service
 */

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AdapterError;

/// An engine advertised by an adapter; `code` keys the registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineInfo {
    /// Stable engine code the dispatcher selects by
    pub code: String,
    /// Human-readable engine name
    pub name: String,
}

impl EngineInfo {
    /// Create an engine descriptor
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

/// One translate-batch call as handed over by the dispatcher
#[derive(Debug, Clone)]
pub struct BatchRequest {
    /// Correlation id for logs and diagnostics
    pub request_id: String,

    /// Target language tag, resolved by the adapter
    pub target_lang: String,

    /// Input strings, non-empty and order-preserving
    pub inputs: Vec<String>,

    /// Source language tag; ignored when `source_is_auto` is set
    pub source_lang: Option<String>,

    /// True when the caller selected automatic source detection
    pub source_is_auto: bool,

    /// Glossary word pairs; accepted for interface uniformity across
    /// engines, unused by engines that do not support glossaries
    pub glossary: Vec<(String, String)>,

    /// Whether glossary matching ignores case
    pub glossary_ignore_case: bool,
}

impl BatchRequest {
    /// Create a request with automatic source detection
    pub fn new(
        request_id: impl Into<String>,
        target_lang: impl Into<String>,
        inputs: Vec<String>,
    ) -> Self {
        Self {
            request_id: request_id.into(),
            target_lang: target_lang.into(),
            inputs,
            source_lang: None,
            source_is_auto: true,
            glossary: Vec::new(),
            glossary_ignore_case: false,
        }
    }

    /// Pin the source language instead of auto-detecting
    pub fn with_source(mut self, source_lang: impl Into<String>) -> Self {
        self.source_lang = Some(source_lang.into());
        self.source_is_auto = false;
        self
    }

    /// Keep auto-detection while recording the tag the caller supplied
    pub fn with_auto_source_tag(mut self, source_lang: impl Into<String>) -> Self {
        self.source_lang = Some(source_lang.into());
        self.source_is_auto = true;
        self
    }

    /// Attach glossary word pairs
    pub fn with_glossary(mut self, glossary: Vec<(String, String)>, ignore_case: bool) -> Self {
        self.glossary = glossary;
        self.glossary_ignore_case = ignore_case;
        self
    }
}

/// Common trait for all translation engine adapters
///
/// This trait defines the interface the dispatcher programs against,
/// allowing engine adapters to be selected and used interchangeably.
#[async_trait]
pub trait TranslationAdapter: Send + Sync + Debug {
    /// Human-readable adapter name
    fn name(&self) -> &str;

    /// Engines this adapter serves
    fn supported_engines(&self) -> Vec<EngineInfo>;

    /// Whether both sides of a language pair resolve, without any network
    fn is_pair_supported(&self, source_lang: &str, target_lang: &str) -> bool;

    /// Whether a target language resolves, without any network
    fn is_target_supported(&self, target_lang: &str) -> bool;

    /// Translate a batch of inputs, returning outputs in input order
    async fn translate_batch(&self, request: &BatchRequest) -> Result<Vec<String>, AdapterError>;
}

/// Registry of adapters keyed by engine code
///
/// The dispatcher registers every configured adapter once and selects by
/// the engine code carried on incoming requests.
#[derive(Debug, Default)]
pub struct AdapterRegistry {
    by_code: HashMap<String, Arc<dyn TranslationAdapter>>,
}

impl AdapterRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Index an adapter under every engine code it advertises
    pub fn register(&mut self, adapter: Arc<dyn TranslationAdapter>) {
        for engine in adapter.supported_engines() {
            self.by_code.insert(engine.code, Arc::clone(&adapter));
        }
    }

    /// The adapter serving an engine code, if any
    pub fn get(&self, engine_code: &str) -> Option<Arc<dyn TranslationAdapter>> {
        self.by_code.get(engine_code).cloned()
    }

    /// Registered engine codes, sorted
    pub fn engine_codes(&self) -> Vec<String> {
        let mut codes: Vec<String> = self.by_code.keys().cloned().collect();
        codes.sort();
        codes
    }
}

pub mod freed;
