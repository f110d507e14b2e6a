#![deny(missing_docs)]

//! # Error Handling
//!
//! Provides the unified `TypegenError` enum used across the crate, plus the
//! non-fatal `Diagnostic` record collected during a generation run.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum TypegenError {
    /// Invalid or incomplete caller configuration, detected before the
    /// pipeline runs (e.g. a raw schema without a declared version).
    #[from(ignore)]
    #[display("Configuration Error: {_0}")]
    Config(String),

    /// A `$ref` pointer with no matching definition. Carries the pointer
    /// string and the document path of the referencing node.
    #[from(ignore)]
    #[display("Resolution Error: unresolvable $ref '{pointer}' at {location}")]
    Resolution {
        /// The offending `$ref` pointer string.
        pointer: String,
        /// JSON Pointer of the node holding the reference.
        location: String,
    },

    /// Wrapper for JSON deserialization errors.
    #[display("Parse Error: {_0}")]
    Json(serde_json::Error),

    /// Wrapper for YAML deserialization errors.
    #[display("Parse Error: {_0}")]
    Yaml(serde_yaml::Error),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for TypegenError {}

impl TypegenError {
    /// Builds a configuration error from any message.
    pub fn config(message: impl Into<String>) -> Self {
        TypegenError::Config(message.into())
    }

    /// Builds a resolution error for `pointer` referenced at `location`.
    pub fn resolution(pointer: impl Into<String>, location: impl Into<String>) -> Self {
        TypegenError::Resolution {
            pointer: pointer.into(),
            location: location.into(),
        }
    }
}

/// Helper type alias for Result using TypegenError.
pub type TypegenResult<T> = Result<T, TypegenError>;

/// A non-fatal finding produced while transforming a document.
///
/// Diagnostics never abort a run; they are collected on the result and, when
/// logging is not suppressed, forwarded to the `log` facade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// JSON Pointer of the node the finding applies to.
    pub location: String,
    /// Human-readable description of the fallback taken.
    pub message: String,
}
