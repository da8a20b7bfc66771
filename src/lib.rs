/*!
 * # babelgate - pluggable backend adapters for a translation gateway
 *
 * A Rust library implementing the backend side of a multi-engine text
 * translation gateway: batches of strings go in with a language pair,
 * translated strings come back in the same order.
 *
 * ## Features
 *
 * - Language-code negotiation between caller tags and each engine's
 *   canonical code set, including alias handling for generic tags
 * - A long-lived HTTP transport with pooled connections, host-keyed cookie
 *   affinity, and batch-translation timeouts
 * - Bounded fixed-delay retry of transient transport failures
 * - A typed error taxonomy separating unsupported languages, transient
 *   transport failures, service-level failures, and schema violations
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `adapter_config`: per-adapter configuration built from a config map
 * - `language_codes`: canonical code sets and tag resolution
 * - `transport`: shared HTTP client and cookie affinity store
 * - `retry`: bounded retry of transient failures
 * - `adapters`: the `TranslationAdapter` trait, the engine registry, and
 *   the engine implementations:
 *   - `adapters::freed`: Freed batch translation service
 * - `errors`: error types for the adapter boundary
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod adapter_config;
pub mod adapters;
pub mod errors;
pub mod language_codes;
pub mod retry;
pub mod transport;

// Re-export main types for easier usage
pub use adapter_config::AdapterConfig;
pub use adapters::freed::FreedAdapter;
pub use adapters::{AdapterRegistry, BatchRequest, EngineInfo, TranslationAdapter};
pub use errors::{AdapterError, LanguageRole};
pub use language_codes::{LanguageCodec, SUPPORTED_LANGUAGE_CODES};
pub use retry::RetryPolicy;
pub use transport::{CookieAffinityStore, HttpTransport, SessionCookie};
