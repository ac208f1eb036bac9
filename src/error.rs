//! Central error types for Aura.
//!
//! DOM hosts can fail in ways the core cannot prevent (a detached document,
//! a JS exception from `setProperty`). These errors are surfaced by the
//! style functions and swallowed, with a warning, by the binding layer.
//! All errors implement `Serialize` so they cross the wasm boundary as strings.

use serde::Serialize;
use thiserror::Error;

/// Main error type for Aura operations.
#[derive(Error, Debug)]
pub enum AuraError {
    /// No window/document available (non-browser context)
    #[error("No DOM environment available")]
    NoEnvironment,

    /// A DOM call on the host failed
    #[error("DOM error: {0}")]
    DomError(String),

    /// Element expected in the document was not found
    #[error("Element not found with ID {id}")]
    ElementNotFound { id: String },

    /// Color cannot be embedded into a cursor image
    #[error("Invalid color: {0:?}")]
    InvalidColor(String),

    /// Options object could not be parsed
    #[error("Config error: {0}")]
    ConfigError(#[from] serde_json::Error),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Serialize for AuraError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Extension trait for adding context to Results.
///
/// Mirrors anyhow's `Context` for host results whose error type only
/// implements `Display` (or `Debug`, after a `map_err`).
pub trait ResultExt<T> {
    /// Add context to an error, converting it to `AuraError::DomError`.
    fn context(self, msg: &str) -> AuraResult<T>;

    /// Add context lazily (only evaluated on error).
    fn with_context<F: FnOnce() -> String>(self, f: F) -> AuraResult<T>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for Result<T, E> {
    fn context(self, msg: &str) -> AuraResult<T> {
        self.map_err(|e| AuraError::DomError(format!("{}: {}", msg, e)))
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> AuraResult<T> {
        self.map_err(|e| AuraError::DomError(format!("{}: {}", f(), e)))
    }
}

/// Extension trait for adding context to Option types.
pub trait OptionExt<T> {
    /// Convert None to `AuraError::Other` with the given message.
    fn context(self, msg: &str) -> AuraResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn context(self, msg: &str) -> AuraResult<T> {
        self.ok_or_else(|| AuraError::Other(msg.to_string()))
    }
}

/// Type alias for Results using AuraError.
pub type AuraResult<T> = Result<T, AuraError>;
