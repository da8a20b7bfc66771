/*!
 * Tests for error types and classification
 */

use babelgate::errors::{AdapterError, LanguageRole};

#[test]
fn test_adapterError_unsupportedLanguage_shouldDisplayRoleAndTag() {
    let error = AdapterError::UnsupportedLanguage {
        role: LanguageRole::Target,
        tag: "xx-ZZ".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("target"));
    assert!(display.contains("xx-ZZ"));
}

#[test]
fn test_adapterError_transport_shouldDisplayCause() {
    let error = AdapterError::Transport("connection refused".to_string());
    let display = format!("{}", error);
    assert!(display.contains("transport failure"));
    assert!(display.contains("connection refused"));
}

#[test]
fn test_adapterError_serviceUnavailable_shouldDisplayStatus() {
    let error = AdapterError::ServiceUnavailable {
        status_code: 503,
        message: "service melting".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("503"));
    assert!(display.contains("service melting"));
}

#[test]
fn test_adapterError_invalidResponse_shouldDisplayCause() {
    let error = AdapterError::InvalidResponse("missing translations".to_string());
    let display = format!("{}", error);
    assert!(display.contains("invalid response"));
    assert!(display.contains("missing translations"));
}

#[test]
fn test_isTransient_shouldOnlyMarkTransportErrors() {
    assert!(AdapterError::Transport("timeout".to_string()).is_transient());

    assert!(
        !AdapterError::UnsupportedLanguage {
            role: LanguageRole::Source,
            tag: "xx".to_string(),
        }
        .is_transient()
    );
    assert!(
        !AdapterError::ServiceUnavailable {
            status_code: 500,
            message: "boom".to_string(),
        }
        .is_transient()
    );
    assert!(!AdapterError::InvalidResponse("bad".to_string()).is_transient());
}

#[test]
fn test_statusCode_shouldOnlyComeFromServiceUnavailable() {
    let unavailable = AdapterError::ServiceUnavailable {
        status_code: 502,
        message: "bad gateway".to_string(),
    };
    assert_eq!(unavailable.status_code(), Some(502));
    assert_eq!(AdapterError::Transport("x".to_string()).status_code(), None);
    assert_eq!(
        AdapterError::InvalidResponse("x".to_string()).status_code(),
        None
    );
}
