#![deny(missing_docs)]

//! # Generation Options
//!
//! The caller-facing options record and the per-run `Context` it resolves
//! into. The context is constructed once per run and passed by shared
//! reference to every stage; concurrent runs each own their configuration
//! and never observe each other's state.

use crate::oas::models::{SchemaObject, Version};
use std::collections::BTreeMap;
use url::Url;

/// Per-node emission override.
///
/// Consulted before the default rendering rules for every concrete schema
/// node; a returned string is used verbatim as that node's type text.
pub type SchemaFormatter = fn(&SchemaObject) -> Option<String>;

/// Comment banner prepended to generated files unless overridden.
pub const DEFAULT_COMMENT_HEADER: &str = "/**\n* This file was auto-generated by openapi-typegen.\n* Do not make direct changes to the file.\n*/";

/// Caller-facing generation options.
///
/// Fields marked "loader" or "formatter" are honored by external
/// collaborators (the document loader, the source pretty-printer); the
/// engine carries them but never reads them.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Allow arbitrary properties on schemas that omit
    /// `additionalProperties` (adds an `unknown` index signature).
    pub additional_properties: bool,
    /// Loader: auth credential used when fetching a remote document.
    pub auth: Option<String>,
    /// Loader: base URL for resolving on-disk relative documents.
    pub cwd: Option<Url>,
    /// Per-node emission override, consulted before default rendering.
    pub formatter: Option<SchemaFormatter>,
    /// Emit `readonly` members and arrays.
    pub immutable_types: bool,
    /// Emit `never` instead of `unknown` for responses with no declared
    /// body.
    pub content_never: bool,
    /// A present `default` suppresses an otherwise-nullable result.
    pub default_non_nullable: bool,
    /// Formatter: path to a Prettier configuration applied after emission.
    pub prettier_config: Option<String>,
    /// Treat the input as a bare name-to-schema map instead of a full
    /// document. Requires `version`.
    pub raw_schema: bool,
    /// Additionally emit an enum of all literal path strings.
    pub make_paths_enum: bool,
    /// Suppress diagnostic logging (diagnostics are still collected).
    pub silent: bool,
    /// Declared OpenAPI major version, mandatory with `raw_schema` and
    /// consulted when the document carries no version tag.
    pub version: Option<u8>,
    /// Loader: extra headers sent when fetching a remote document.
    pub http_headers: BTreeMap<String, String>,
    /// Loader: HTTP verb used to fetch a remote document (default GET).
    pub http_method: Option<String>,
    /// Emit `export type X = {...}` instead of `export interface X {...}`.
    pub export_type: bool,
    /// Emit fixed-length tuples when `minItems` equals `maxItems`.
    pub support_array_length: bool,
    /// Substitute `{param}` path segments with the parameter's type.
    pub path_params_as_types: bool,
    /// Verbatim text prepended to the output (not validated).
    pub comment_header: Option<String>,
}

/// Resolved, read-only configuration threaded through a single run.
#[derive(Debug, Clone)]
pub struct Context {
    /// Index-signature policy when `additionalProperties` is omitted.
    pub additional_properties: bool,
    /// Banner text prepended to the output.
    pub comment_header: String,
    /// A present `default` suppresses nullability.
    pub default_non_nullable: bool,
    /// Per-node emission override.
    pub formatter: Option<SchemaFormatter>,
    /// Emit `readonly` markers.
    pub immutable_types: bool,
    /// `never` over `unknown` for undeclared response bodies.
    pub content_never: bool,
    /// Collect path strings into an enum.
    pub make_paths_enum: bool,
    /// Substitute path template segments with parameter types.
    pub path_params_as_types: bool,
    /// Input is a bare schema collection.
    pub raw_schema: bool,
    /// Diagnostic logging suppressed.
    pub silent: bool,
    /// Tuples from equal `minItems`/`maxItems`.
    pub support_array_length: bool,
    /// Type-alias emission over interface emission.
    pub export_type: bool,
    /// The version this run operates under.
    pub version: Version,
}

impl Context {
    /// Resolves caller options into a run context for `version`.
    pub fn new(options: &Options, version: Version) -> Self {
        Context {
            additional_properties: options.additional_properties,
            comment_header: options
                .comment_header
                .clone()
                .unwrap_or_else(|| DEFAULT_COMMENT_HEADER.to_string()),
            default_non_nullable: options.default_non_nullable,
            formatter: options.formatter,
            immutable_types: options.immutable_types,
            content_never: options.content_never,
            make_paths_enum: options.make_paths_enum,
            path_params_as_types: options.path_params_as_types,
            raw_schema: options.raw_schema,
            silent: options.silent,
            support_array_length: options.support_array_length,
            export_type: options.export_type,
            version,
        }
    }
}
