#![deny(missing_docs)]

//! # openapi-typegen
//!
//! Converts a parsed OpenAPI 2 (Swagger) or OpenAPI 3 document into
//! statically-typed TypeScript declarations.
//!
//! The pipeline runs leaves-first over one immutable in-memory document:
//! version normalization, reference resolution, composition transformation,
//! path/operation projection, then emission. Configuration is resolved once
//! per run into a read-only context; concurrent runs never share state.
//!
//! Document acquisition (disk/network fetch) and output pretty-printing are
//! collaborator concerns: callers hand in an already-parsed value and may
//! post-process the emitted text.

/// Shared error types and diagnostics.
pub mod error;

/// OpenAPI parsing, normalization, resolution and projection.
pub mod oas;

/// Caller options and the per-run context.
pub mod options;

/// The canonical type-expression algebra and its rendering.
pub mod ts;

/// Declaration-text emission.
pub mod emit;

use indexmap::IndexMap;
use serde_json::Value;

pub use error::{Diagnostic, TypegenError, TypegenResult};
pub use oas::models::{Document, Version};
pub use oas::registry::DocumentSet;
pub use options::{Context, Options, SchemaFormatter, DEFAULT_COMMENT_HEADER};

use oas::models::SchemaOrRef;
use oas::normalize::{normalize, normalize_raw_schema};
use oas::paths::project;
use oas::resolve::Resolver;
use oas::transform::Transformer;

/// The result of one generation run.
#[derive(Debug, Clone)]
pub struct Generated {
    /// The emitted declaration text.
    pub source: String,
    /// Non-fatal findings collected during the run.
    pub diagnostics: Vec<Diagnostic>,
}

/// Generates TypeScript declarations from a parsed document value.
///
/// The value is either a full OpenAPI/Swagger document or, with
/// `Options::raw_schema`, a bare name-to-schema map (the `version` option is
/// then mandatory).
pub fn generate_typescript(input: &Value, options: &Options) -> TypegenResult<Generated> {
    generate_typescript_with_documents(input, options, None)
}

/// Like [`generate_typescript`], with auxiliary documents for
/// cross-document `$ref` resolution.
pub fn generate_typescript_with_documents(
    input: &Value,
    options: &Options,
    documents: Option<&DocumentSet>,
) -> TypegenResult<Generated> {
    let normalized = if options.raw_schema {
        let version = match options.version {
            Some(2) => Version::V2,
            Some(3) => Version::V3,
            Some(other) => {
                return Err(TypegenError::config(format!(
                    "unrecognized OpenAPI version {}",
                    other
                )))
            }
            None => {
                return Err(TypegenError::config(
                    "rawSchema input requires the version option",
                ))
            }
        };
        let schemas: IndexMap<String, SchemaOrRef> = serde_json::from_value(input.clone())?;
        normalize_raw_schema(schemas, version)
    } else {
        let document = Document::from_value(input, options.version)?;
        normalize(&document)
    };

    let ctx = Context::new(options, normalized.version());
    let resolver = Resolver::new(&normalized, documents);
    let mut transformer = Transformer::new(&ctx);
    let projection = project(&ctx, &resolver, &mut transformer, &normalized)?;
    let source = emit::emit(&ctx, &projection);

    Ok(Generated {
        source,
        diagnostics: transformer.into_diagnostics(),
    })
}

/// Convenience wrapper parsing YAML text before generation.
pub fn generate_typescript_from_yaml(yaml: &str, options: &Options) -> TypegenResult<Generated> {
    let value: Value = serde_yaml::from_str(yaml)?;
    generate_typescript(&value, options)
}
