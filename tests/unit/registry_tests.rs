/*!
 * Tests for the adapter trait surface and the engine registry
 */

use std::sync::Arc;

use babelgate::adapters::{AdapterRegistry, BatchRequest, TranslationAdapter};

use crate::common::MockAdapter;

#[test]
fn test_register_withMockAdapter_shouldBeFoundByEngineCode() {
    let mut registry = AdapterRegistry::new();
    registry.register(Arc::new(MockAdapter::new("mock")));

    let adapter = registry.get("mock").unwrap();
    assert_eq!(adapter.name(), "Mock");
    assert!(registry.get("freed").is_none());
}

#[test]
fn test_engineCodes_withMultipleAdapters_shouldListAllSorted() {
    let mut registry = AdapterRegistry::new();
    registry.register(Arc::new(MockAdapter::new("zeta")));
    registry.register(Arc::new(MockAdapter::new("alpha")));

    assert_eq!(registry.engine_codes(), vec!["alpha", "zeta"]);
}

#[test]
fn test_register_withSameEngineCodeTwice_shouldKeepLatest() {
    let mut registry = AdapterRegistry::new();
    let second: Arc<dyn TranslationAdapter> = Arc::new(MockAdapter::new("mock"));
    registry.register(Arc::new(MockAdapter::new("mock")));
    registry.register(Arc::clone(&second));

    let resolved = registry.get("mock").unwrap();
    assert!(Arc::ptr_eq(&resolved, &second));
    assert_eq!(registry.engine_codes(), vec!["mock"]);
}

#[tokio::test]
async fn test_translateBatch_throughTraitObject_shouldPreserveOrder() {
    let mut registry = AdapterRegistry::new();
    registry.register(Arc::new(MockAdapter::new("mock")));

    let adapter = registry.get("mock").unwrap();
    let request = BatchRequest::new(
        "req-1",
        "fr",
        vec!["one".to_string(), "two".to_string(), "three".to_string()],
    );
    let outputs = adapter.translate_batch(&request).await.unwrap();

    assert_eq!(outputs, vec!["mock:one", "mock:two", "mock:three"]);
}

#[test]
fn test_batchRequest_builders_shouldSetSourceFlags() {
    let auto = BatchRequest::new("req-1", "de", vec!["hi".to_string()]);
    assert!(auto.source_is_auto);
    assert_eq!(auto.source_lang, None);

    let pinned = BatchRequest::new("req-2", "de", vec!["hi".to_string()]).with_source("en");
    assert!(!pinned.source_is_auto);
    assert_eq!(pinned.source_lang.as_deref(), Some("en"));

    let auto_with_tag =
        BatchRequest::new("req-3", "de", vec!["hi".to_string()]).with_auto_source_tag("en");
    assert!(auto_with_tag.source_is_auto);
    assert_eq!(auto_with_tag.source_lang.as_deref(), Some("en"));
}
