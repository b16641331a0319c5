//! Error types for the ARTR core.
//!
//! Style errors are configuration mistakes caught when a cache is built.
//! Transform and load errors come from the external module and are carried
//! as messages; the core never inspects them beyond display.

use thiserror::Error;

/// Errors from style cache configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StyleError {
    /// Cache key is empty or contains characters other than `a-z` and `-`.
    ///
    /// The key prefixes every generated class name and the `data-emotion`
    /// attribute, so it must stay a plain identifier.
    #[error("invalid cache key {key:?}: expected lowercase letters and '-'")]
    InvalidKey {
        /// Rejected key
        key: String,
    },
}

/// Rejection raised by a transform module.
///
/// Displays exactly the module's message; the invoker surfaces it verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct TransformError {
    /// Why the input is invalid for the requested direction.
    pub message: String,
}

impl TransformError {
    /// Create an error carrying the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Errors from loading a transform module.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// Fetching the module failed.
    #[error("module fetch failed: {0}")]
    Fetch(String),

    /// The module was fetched but its initialization entry point did not
    /// report readiness.
    #[error("module initialization failed: {0}")]
    Init(String),
}
