#![deny(missing_docs)]

//! # OpenAPI Pipeline Module
//!
//! - **models**: document object model (serde deserialization layer).
//! - **normalize**: version normalization into one internal shape.
//! - **resolve**: `$ref` resolution index and cycle handling.
//! - **registry**: auxiliary document set for cross-document references.
//! - **transform**: schema composition into canonical type expressions.
//! - **paths**: path/operation/component projection for emission.

pub mod models;
pub mod normalize;
pub mod paths;
pub mod registry;
pub mod resolve;
pub mod transform;

// Re-export the types most callers touch.
pub use models::{Document, Version};
pub use normalize::{normalize, normalize_raw_schema, NormalizedDocument};
pub use registry::DocumentSet;
pub use resolve::Resolver;
pub use transform::Transformer;
