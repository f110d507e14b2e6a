#![deny(missing_docs)]

//! # Document Set
//!
//! Stores externally supplied, already-parsed documents for multi-document
//! reference resolution. No network access is performed; fetching and
//! parsing auxiliary documents is the loader's job.

use crate::error::{TypegenError, TypegenResult};
use crate::oas::models::Document;
use crate::oas::normalize::{normalize, NormalizedDocument};
use std::collections::HashMap;
use url::Url;

const DUMMY_BASE: &str = "http://example.invalid/";

/// Registry of auxiliary documents keyed by retrieval URI.
///
/// A `$ref` whose pointer carries a document part (e.g.
/// `pets.yaml#/components/schemas/Pet`) resolves against this set.
#[derive(Default)]
pub struct DocumentSet {
    docs: Vec<NormalizedDocument>,
    index: HashMap<String, usize>,
}

impl DocumentSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a parsed document under `retrieval_uri`.
    ///
    /// The document is normalized on registration so cross-document lookups
    /// read the same shape as local ones. Registering two documents under
    /// the same URI (or URI alias) is an error.
    pub fn register(&mut self, retrieval_uri: &str, document: &Document) -> TypegenResult<()> {
        let idx = self.docs.len();
        let mut aliases = vec![retrieval_uri.to_string()];
        if let Some(canonical) = canonical_uri(retrieval_uri) {
            if canonical != retrieval_uri {
                aliases.push(canonical);
            }
        }

        for alias in &aliases {
            if self.index.contains_key(alias) {
                return Err(TypegenError::General(format!(
                    "document set URI collision for '{}'",
                    alias
                )));
            }
        }

        self.docs.push(normalize(document));
        for alias in aliases {
            self.index.insert(alias, idx);
        }
        Ok(())
    }

    /// Looks up a registered document by any known URI spelling.
    pub fn get(&self, uri: &str) -> Option<&NormalizedDocument> {
        if let Some(idx) = self.index.get(uri) {
            return self.docs.get(*idx);
        }
        let canonical = canonical_uri(uri)?;
        self.index.get(&canonical).and_then(|idx| self.docs.get(*idx))
    }
}

/// Normalizes a URI spelling so relative and absolute forms alias.
fn canonical_uri(uri: &str) -> Option<String> {
    if let Ok(url) = Url::parse(uri) {
        return Some(url.to_string());
    }
    let dummy = Url::parse(DUMMY_BASE).ok()?;
    dummy.join(uri).ok().map(|u| u.to_string())
}
