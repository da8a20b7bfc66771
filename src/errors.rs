/*!
 * Error types for the babelgate adapters.
 *
 * This module contains the error taxonomy shared by all engine adapters,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Which side of a translation pair a language tag was supplied for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageRole {
    /// The language the inputs are written in
    Source,
    /// The language the inputs are translated into
    Target,
}

impl std::fmt::Display for LanguageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Source => write!(f, "source"),
            Self::Target => write!(f, "target"),
        }
    }
}

/// Errors surfaced by a translation adapter
#[derive(Error, Debug)]
pub enum AdapterError {
    /// Error when a language tag does not resolve to a canonical engine code
    #[error("{role} language not supported: {tag}")]
    UnsupportedLanguage {
        /// Whether the tag was the source or the target of the pair
        role: LanguageRole,
        /// The tag as supplied by the caller
        tag: String,
    },

    /// Error at the transport layer (connect, timeout, I/O) - retryable
    #[error("transport failure: {0}")]
    Transport(String),

    /// Error when the service answers with a non-success status or no body
    #[error("service unavailable ({status_code}): {message}")]
    ServiceUnavailable {
        /// HTTP status code observed on the exchange
        status_code: u16,
        /// Error message describing the failure
        message: String,
    },

    /// Error when a 2xx response body fails shape validation
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl AdapterError {
    /// Whether a bounded retry is allowed to re-run the failed attempt.
    ///
    /// Only transport-level failures qualify; HTTP-level failures surface
    /// immediately to the caller.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Status code carried by the error, when the exchange got that far
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::ServiceUnavailable { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for AdapterError {
    fn from(error: reqwest::Error) -> Self {
        Self::Transport(error.to_string())
    }
}
