#![deny(missing_docs)]

//! # Reference Resolution
//!
//! Resolves `$ref` pointers against the normalized document. The resolver
//! builds its index once, up front; every lookup after construction is an
//! O(1) map probe. Reference-to-reference chains are followed with a
//! visited set, so cyclic graphs terminate: a schema cycle resolves to the
//! named handle of its first target (emitted as an indexed-access type,
//! never inlined), while a pure reference loop with no concrete node behind
//! it is unresolvable.
//!
//! Pointer decoding handles `~0`/`~1` escapes and percent encoding.

use crate::error::{TypegenError, TypegenResult};
use crate::oas::models::{
    HeaderObject, ObjOrRef, ParameterObject, PathItemObject, Reference, RequestBodyObject,
    ResponseObject, SchemaOrRef, Version,
};
use crate::oas::normalize::NormalizedDocument;
use crate::oas::registry::DocumentSet;
use crate::ts::TypePath;
use indexmap::IndexMap;
use percent_encoding::percent_decode_str;
use std::collections::{HashMap, HashSet};

/// The bag a pointer resolves into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// Reusable schemas (`definitions` / `components.schemas`).
    Schemas,
    /// Reusable responses.
    Responses,
    /// Reusable parameters.
    Parameters,
    /// Reusable request bodies (OpenAPI 3 only).
    RequestBodies,
    /// Reusable headers (OpenAPI 3 only).
    Headers,
    /// Reusable path items (OpenAPI 3 only).
    PathItems,
}

impl Section {
    fn v3_key(self) -> &'static str {
        match self {
            Section::Schemas => "schemas",
            Section::Responses => "responses",
            Section::Parameters => "parameters",
            Section::RequestBodies => "requestBodies",
            Section::Headers => "headers",
            Section::PathItems => "pathItems",
        }
    }
}

/// A parsed `$ref` pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ParsedPointer {
    /// Document part before `#`, when the reference is cross-document.
    document: Option<String>,
    section: Section,
    name: String,
}

/// Decodes a JSON Pointer segment (handles `~1` and `~0`).
pub(crate) fn decode_pointer_segment(segment: &str) -> String {
    let decoded = segment.replace("~1", "/").replace("~0", "~");
    percent_decode_str(&decoded)
        .decode_utf8_lossy()
        .into_owned()
}

/// Escapes a path for use as a JSON Pointer segment in occurrence paths.
pub(crate) fn encode_pointer_segment(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}

fn parse_pointer(ref_str: &str) -> Option<ParsedPointer> {
    let (document, fragment) = match ref_str.split_once('#') {
        Some((doc, frag)) => {
            let document = if doc.is_empty() {
                None
            } else {
                Some(doc.to_string())
            };
            (document, frag)
        }
        None => return None,
    };

    let fragment = fragment.strip_prefix('/')?;
    let segments: Vec<&str> = fragment.split('/').collect();

    let (section, name_seg) = match segments.as_slice() {
        ["definitions", name] => (Section::Schemas, name),
        ["parameters", name] => (Section::Parameters, name),
        ["responses", name] => (Section::Responses, name),
        ["components", "schemas", name] => (Section::Schemas, name),
        ["components", "responses", name] => (Section::Responses, name),
        ["components", "parameters", name] => (Section::Parameters, name),
        ["components", "requestBodies", name] => (Section::RequestBodies, name),
        ["components", "headers", name] => (Section::Headers, name),
        ["components", "pathItems", name] => (Section::PathItems, name),
        _ => return None,
    };

    let name = decode_pointer_segment(name_seg);
    if name.is_empty() {
        return None;
    }

    Some(ParsedPointer {
        document,
        section,
        name,
    })
}

/// Where a schema `$ref` lands.
#[derive(Debug)]
pub enum SchemaTarget<'a> {
    /// A named local bag entry, emitted as an indexed-access reference.
    Local(TypePath),
    /// An entry of a registered auxiliary document, transformed inline.
    External {
        /// Unique key for cycle detection across external expansions.
        key: String,
        /// The target node inside the auxiliary document.
        node: &'a SchemaOrRef,
        /// The auxiliary document the node belongs to.
        doc: &'a NormalizedDocument,
    },
}

/// A non-schema reference resolved to its concrete node.
pub struct Resolved<'a, T> {
    /// Indexed-access path of the first named target in the chain, when the
    /// value came through a reference at all.
    pub handle: Option<TypePath>,
    /// The terminal concrete node.
    pub node: &'a T,
}

/// The per-run reference resolver.
pub struct Resolver<'a> {
    doc: &'a NormalizedDocument,
    external: Option<&'a DocumentSet>,
    index: HashMap<String, (Section, String)>,
}

impl<'a> Resolver<'a> {
    /// Builds the resolution index for `doc`.
    ///
    /// Both pointer spellings are indexed for every bag entry, so lenient
    /// documents that mix `#/definitions/X` and `#/components/schemas/X`
    /// still resolve.
    pub fn new(doc: &'a NormalizedDocument, external: Option<&'a DocumentSet>) -> Self {
        let mut index = HashMap::new();

        let mut add = |section: Section, v2_prefix: Option<&str>, names: Vec<&String>| {
            for name in names {
                let encoded = encode_pointer_segment(name);
                if let Some(prefix) = v2_prefix {
                    index.insert(format!("#/{}/{}", prefix, name), (section, name.clone()));
                    if encoded != *name {
                        index.insert(format!("#/{}/{}", prefix, encoded), (section, name.clone()));
                    }
                }
                index.insert(
                    format!("#/components/{}/{}", section.v3_key(), name),
                    (section, name.clone()),
                );
                if encoded != *name {
                    index.insert(
                        format!("#/components/{}/{}", section.v3_key(), encoded),
                        (section, name.clone()),
                    );
                }
            }
        };

        add(
            Section::Schemas,
            Some("definitions"),
            doc.schemas.keys().collect(),
        );
        add(
            Section::Parameters,
            Some("parameters"),
            doc.parameters.keys().collect(),
        );
        add(
            Section::Responses,
            Some("responses"),
            doc.responses.keys().collect(),
        );
        add(
            Section::RequestBodies,
            None,
            doc.request_bodies.keys().collect(),
        );
        add(Section::Headers, None, doc.headers.keys().collect());
        add(Section::PathItems, None, doc.path_items.keys().collect());

        Resolver {
            doc,
            external,
            index,
        }
    }

    /// The document set auxiliary documents resolve against.
    pub fn external_set(&self) -> Option<&'a DocumentSet> {
        self.external
    }

    /// Builds the indexed-access path for a named bag entry.
    pub fn type_path(&self, section: Section, name: &str) -> TypePath {
        match self.doc.version() {
            Version::V2 => {
                let root = match section {
                    Section::Schemas => "definitions",
                    Section::Parameters => "parameters",
                    Section::Responses => "responses",
                    // Remaining sections do not exist under Swagger 2.0;
                    // the V2 bags for them are always empty.
                    other => return TypePath(vec!["components".into(), other.v3_key().into(), name.into()]),
                };
                TypePath(vec![root.to_string(), name.to_string()])
            }
            Version::V3 => TypePath(vec![
                "components".to_string(),
                section.v3_key().to_string(),
                name.to_string(),
            ]),
        }
    }

    fn local_lookup(&self, pointer: &str) -> Option<(Section, String)> {
        if let Some(hit) = self.index.get(pointer) {
            return Some(hit.clone());
        }
        let parsed = parse_pointer(pointer)?;
        if parsed.document.is_some() {
            return None;
        }
        if self.contains(parsed.section, &parsed.name) {
            Some((parsed.section, parsed.name))
        } else {
            None
        }
    }

    fn contains(&self, section: Section, name: &str) -> bool {
        match section {
            Section::Schemas => self.doc.schemas.contains_key(name),
            Section::Responses => self.doc.responses.contains_key(name),
            Section::Parameters => self.doc.parameters.contains_key(name),
            Section::RequestBodies => self.doc.request_bodies.contains_key(name),
            Section::Headers => self.doc.headers.contains_key(name),
            Section::PathItems => self.doc.path_items.contains_key(name),
        }
    }

    /// Resolves a schema-position reference to its emission target.
    ///
    /// Local hits return the named handle (never a copy of the target);
    /// cross-document hits return the external node for inline expansion.
    /// Anything else is a fatal resolution error naming the pointer and the
    /// occurrence path.
    pub fn schema_target(
        &self,
        reference: &Reference,
        location: &str,
    ) -> TypegenResult<SchemaTarget<'a>> {
        let pointer = reference.target.as_str();

        if let Some(parsed) = parse_pointer(pointer) {
            if let Some(doc_part) = &parsed.document {
                return self.external_schema(pointer, doc_part, &parsed, location);
            }
        }

        match self.local_lookup(pointer) {
            Some((Section::Schemas, name)) => {
                Ok(SchemaTarget::Local(self.type_path(Section::Schemas, &name)))
            }
            _ => Err(TypegenError::resolution(pointer, location)),
        }
    }

    fn external_schema(
        &self,
        pointer: &str,
        doc_part: &str,
        parsed: &ParsedPointer,
        location: &str,
    ) -> TypegenResult<SchemaTarget<'a>> {
        if parsed.section != Section::Schemas {
            return Err(TypegenError::resolution(pointer, location));
        }
        let set = self
            .external
            .ok_or_else(|| TypegenError::resolution(pointer, location))?;
        let doc = set
            .get(doc_part)
            .ok_or_else(|| TypegenError::resolution(pointer, location))?;
        let node = doc
            .schemas
            .get(&parsed.name)
            .ok_or_else(|| TypegenError::resolution(pointer, location))?;
        Ok(SchemaTarget::External {
            key: format!("{}#/schemas/{}", doc_part, parsed.name),
            node,
            doc,
        })
    }

    fn follow_chain<T>(
        &self,
        section: Section,
        map: &'a IndexMap<String, ObjOrRef<T>>,
        node: &'a ObjOrRef<T>,
        location: &str,
    ) -> TypegenResult<Resolved<'a, T>> {
        let mut handle = None;
        let mut current = node;
        let mut visited: HashSet<String> = HashSet::new();

        loop {
            match current {
                ObjOrRef::Obj(t) => return Ok(Resolved { handle, node: t }),
                ObjOrRef::Ref(r) => {
                    let (target_section, name) = self
                        .local_lookup(&r.target)
                        .ok_or_else(|| TypegenError::resolution(&r.target, location))?;
                    if target_section != section {
                        return Err(TypegenError::resolution(&r.target, location));
                    }
                    // A revisited target means the chain is a pure loop with
                    // no concrete node anywhere behind it.
                    if !visited.insert(name.clone()) {
                        return Err(TypegenError::resolution(&r.target, location));
                    }
                    if handle.is_none() {
                        handle = Some(self.type_path(section, &name));
                    }
                    current = map
                        .get(&name)
                        .ok_or_else(|| TypegenError::resolution(&r.target, location))?;
                }
            }
        }
    }

    /// Resolves a parameter or a reference chain to one.
    pub fn parameter(
        &self,
        node: &'a ObjOrRef<ParameterObject>,
        location: &str,
    ) -> TypegenResult<Resolved<'a, ParameterObject>> {
        self.follow_chain(Section::Parameters, &self.doc.parameters, node, location)
    }

    /// Resolves a response or a reference chain to one.
    pub fn response(
        &self,
        node: &'a ObjOrRef<ResponseObject>,
        location: &str,
    ) -> TypegenResult<Resolved<'a, ResponseObject>> {
        self.follow_chain(Section::Responses, &self.doc.responses, node, location)
    }

    /// Resolves a request body or a reference chain to one.
    pub fn request_body(
        &self,
        node: &'a ObjOrRef<RequestBodyObject>,
        location: &str,
    ) -> TypegenResult<Resolved<'a, RequestBodyObject>> {
        self.follow_chain(
            Section::RequestBodies,
            &self.doc.request_bodies,
            node,
            location,
        )
    }

    /// Resolves a header or a reference chain to one.
    pub fn header(
        &self,
        node: &'a ObjOrRef<HeaderObject>,
        location: &str,
    ) -> TypegenResult<Resolved<'a, HeaderObject>> {
        self.follow_chain(Section::Headers, &self.doc.headers, node, location)
    }

    /// Resolves a path item or a reference chain to one.
    pub fn path_item(
        &self,
        node: &'a ObjOrRef<PathItemObject>,
        location: &str,
    ) -> TypegenResult<Resolved<'a, PathItemObject>> {
        self.follow_chain(Section::PathItems, &self.doc.path_items, node, location)
    }

    /// Resolves a path-item `$ref` field (e.g. on a Paths entry).
    pub fn path_item_by_pointer(
        &self,
        pointer: &str,
        location: &str,
    ) -> TypegenResult<Resolved<'a, PathItemObject>> {
        match self.local_lookup(pointer) {
            Some((Section::PathItems, name)) => {
                let entry = self
                    .doc
                    .path_items
                    .get(&name)
                    .ok_or_else(|| TypegenError::resolution(pointer, location))?;
                self.follow_chain(Section::PathItems, &self.doc.path_items, entry, location)
            }
            _ => Err(TypegenError::resolution(pointer, location)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oas::models::Document;
    use crate::oas::normalize::normalize;
    use serde_json::json;

    fn normalized(value: serde_json::Value) -> NormalizedDocument {
        normalize(&Document::from_value(&value, None).unwrap())
    }

    #[test]
    fn test_decode_pointer_segment() {
        assert_eq!(decode_pointer_segment("User~1Profile"), "User/Profile");
        assert_eq!(decode_pointer_segment("a~0b"), "a~b");
        assert_eq!(decode_pointer_segment("User%20Profile"), "User Profile");
    }

    #[test]
    fn test_encode_pointer_segment() {
        assert_eq!(encode_pointer_segment("/pets/{id}"), "~1pets~1{id}");
    }

    #[test]
    fn test_parse_pointer_spellings() {
        let v2 = parse_pointer("#/definitions/Pet").unwrap();
        assert_eq!(v2.section, Section::Schemas);
        assert_eq!(v2.name, "Pet");
        assert!(v2.document.is_none());

        let v3 = parse_pointer("#/components/requestBodies/NewPet").unwrap();
        assert_eq!(v3.section, Section::RequestBodies);

        let external = parse_pointer("pets.yaml#/components/schemas/Pet").unwrap();
        assert_eq!(external.document.as_deref(), Some("pets.yaml"));

        assert!(parse_pointer("#/nope/Pet").is_none());
        assert!(parse_pointer("not-a-pointer").is_none());
    }

    #[test]
    fn test_schema_target_local() {
        let doc = normalized(json!({
            "openapi": "3.0.0",
            "components": { "schemas": { "Pet": { "type": "object" } } }
        }));
        let resolver = Resolver::new(&doc, None);
        let reference = Reference {
            target: "#/components/schemas/Pet".to_string(),
        };
        match resolver.schema_target(&reference, "#/test").unwrap() {
            SchemaTarget::Local(path) => {
                assert_eq!(path.render(), "components[\"schemas\"][\"Pet\"]")
            }
            SchemaTarget::External { .. } => panic!("expected local target"),
        }
    }

    #[test]
    fn test_schema_target_v2_path_shape() {
        let doc = normalized(json!({
            "swagger": "2.0",
            "definitions": { "Pet": { "type": "object" } }
        }));
        let resolver = Resolver::new(&doc, None);
        let reference = Reference {
            target: "#/definitions/Pet".to_string(),
        };
        match resolver.schema_target(&reference, "#/test").unwrap() {
            SchemaTarget::Local(path) => assert_eq!(path.render(), "definitions[\"Pet\"]"),
            SchemaTarget::External { .. } => panic!("expected local target"),
        }
    }

    #[test]
    fn test_unresolvable_ref_is_fatal_and_named() {
        let doc = normalized(json!({
            "openapi": "3.0.0",
            "components": { "schemas": {} }
        }));
        let resolver = Resolver::new(&doc, None);
        let reference = Reference {
            target: "#/components/schemas/Missing".to_string(),
        };
        let err = resolver
            .schema_target(&reference, "#/paths/~1pets/get/responses/200")
            .unwrap_err();
        let text = format!("{}", err);
        assert!(text.contains("Missing"));
        assert!(text.contains("#/paths/~1pets/get/responses/200"));
    }

    #[test]
    fn test_parameter_chain_followed() {
        let doc = normalized(json!({
            "openapi": "3.0.0",
            "components": {
                "parameters": {
                    "Alias": { "$ref": "#/components/parameters/Limit" },
                    "Limit": { "name": "limit", "in": "query", "schema": { "type": "integer" } }
                }
            }
        }));
        let resolver = Resolver::new(&doc, None);
        let node: ObjOrRef<ParameterObject> = serde_json::from_value(json!({
            "$ref": "#/components/parameters/Alias"
        }))
        .unwrap();
        let resolved = resolver.parameter(&node, "#/test").unwrap();
        assert_eq!(resolved.node.name.as_deref(), Some("limit"));
        assert_eq!(
            resolved.handle.as_ref().unwrap().render(),
            "components[\"parameters\"][\"Alias\"]"
        );
    }

    #[test]
    fn test_pure_reference_loop_is_unresolvable() {
        let doc = normalized(json!({
            "openapi": "3.0.0",
            "components": {
                "parameters": {
                    "A": { "$ref": "#/components/parameters/B" },
                    "B": { "$ref": "#/components/parameters/A" }
                }
            }
        }));
        let resolver = Resolver::new(&doc, None);
        let node: ObjOrRef<ParameterObject> = serde_json::from_value(json!({
            "$ref": "#/components/parameters/A"
        }))
        .unwrap();
        assert!(resolver.parameter(&node, "#/test").is_err());
    }

    #[test]
    fn test_repeated_lookup_returns_same_target() {
        let doc = normalized(json!({
            "openapi": "3.0.0",
            "components": { "schemas": { "Pet": { "type": "object" } } }
        }));
        let resolver = Resolver::new(&doc, None);
        let reference = Reference {
            target: "#/components/schemas/Pet".to_string(),
        };
        let first = match resolver.schema_target(&reference, "#/a").unwrap() {
            SchemaTarget::Local(path) => path,
            SchemaTarget::External { .. } => panic!("expected local"),
        };
        let second = match resolver.schema_target(&reference, "#/b").unwrap() {
            SchemaTarget::Local(path) => path,
            SchemaTarget::External { .. } => panic!("expected local"),
        };
        assert_eq!(first, second);
    }

    #[test]
    fn test_external_schema_resolution() {
        use crate::oas::registry::DocumentSet;

        let mut set = DocumentSet::new();
        set.register(
            "shared.yaml",
            &Document::from_value(
                &json!({
                    "openapi": "3.0.0",
                    "components": { "schemas": { "Shared": { "type": "string" } } }
                }),
                None,
            )
            .unwrap(),
        )
        .unwrap();

        let doc = normalized(json!({ "openapi": "3.0.0" }));
        let resolver = Resolver::new(&doc, Some(&set));
        let reference = Reference {
            target: "shared.yaml#/components/schemas/Shared".to_string(),
        };
        match resolver.schema_target(&reference, "#/test").unwrap() {
            SchemaTarget::External { key, .. } => {
                assert_eq!(key, "shared.yaml#/schemas/Shared")
            }
            SchemaTarget::Local(_) => panic!("expected external target"),
        }
    }
}
