//! Error types for domain normalization and suffix resolution.

use thiserror::Error;

/// Errors that can occur while turning an input string into a registrable domain.
///
/// Per-call variants never cross the database boundary: the normalizer logs
/// them and answers with "no value". Only [`EtldError::InvalidParameterCount`]
/// surfaces to the caller, at function registration time.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EtldError {
    /// The input string was empty.
    #[error("Input is empty")]
    EmptyInput,

    /// URL parsing failed, even after scheme inference.
    #[error("URL parsing failed: {0}")]
    ParseFailure(String),

    /// No public suffix rule applies to the hostname.
    #[error("No public suffix rule matches {0}")]
    NoMatchingRule(String),

    /// The hostname is its own public suffix (or shorter).
    #[error("Cannot derive eTLD+1 for domain {0}")]
    InsufficientLabels(String),

    /// The hostname is empty or contains an empty label.
    #[error("Invalid hostname: {0:?}")]
    InvalidHostname(String),

    /// The function was registered with the wrong number of arguments.
    #[error("`get_etld_p1` requires 1 parameter: the URL string")]
    InvalidParameterCount(usize),

    /// A public suffix rule file could not be loaded.
    #[error("Failed to load public suffix rules: {0}")]
    RuleSetLoad(String),
}

impl From<url::ParseError> for EtldError {
    fn from(err: url::ParseError) -> Self {
        EtldError::ParseFailure(err.to_string())
    }
}
