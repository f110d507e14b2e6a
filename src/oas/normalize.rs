#![deny(missing_docs)]

//! # Version Normalization
//!
//! Collapses the two document shapes into one version-agnostic
//! [`NormalizedDocument`] before resolution and transformation run. From
//! this point on, no later stage branches on the source version except
//! where the specification itself is version-specific (response bodies,
//! nullability).
//!
//! These rewrites are intentionally conservative: only known shape gaps
//! between Swagger 2.0 and OpenAPI 3.x are translated.

use crate::oas::models::{
    Document, Method, ObjOrRef, OperationObject, ParameterObject, PathItemObject,
    ResponseObject, SchemaObject, SchemaOrRef, Version,
};
use crate::oas::models::{HeaderObject, RequestBodyObject};
use indexmap::IndexMap;

/// The version-agnostic document shape every later stage operates on.
///
/// All reusable objects live in flat name-keyed maps (Swagger `definitions`
/// and OpenAPI `components.schemas` merge into `schemas`, and so on); paths
/// keep their structure with method keys restricted to those legal for the
/// declared version.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NormalizedDocument {
    /// The version the source document was written against.
    pub version: Option<Version>,
    /// Reusable schemas.
    pub schemas: IndexMap<String, SchemaOrRef>,
    /// Reusable responses.
    pub responses: IndexMap<String, ObjOrRef<ResponseObject>>,
    /// Reusable parameters, already in schema-bearing form.
    pub parameters: IndexMap<String, ObjOrRef<ParameterObject>>,
    /// Reusable request bodies (OpenAPI 3 only).
    pub request_bodies: IndexMap<String, ObjOrRef<RequestBodyObject>>,
    /// Reusable headers (OpenAPI 3 only).
    pub headers: IndexMap<String, ObjOrRef<HeaderObject>>,
    /// Reusable path items (OpenAPI 3 only).
    pub path_items: IndexMap<String, ObjOrRef<PathItemObject>>,
    /// Path items keyed by path template.
    pub paths: IndexMap<String, PathItemObject>,
    /// Webhook path items keyed by name (OpenAPI 3 only).
    pub webhooks: IndexMap<String, ObjOrRef<PathItemObject>>,
}

impl NormalizedDocument {
    /// The effective version of the run.
    pub fn version(&self) -> Version {
        self.version.unwrap_or(Version::V3)
    }
}

/// Normalizes a version-tagged document.
///
/// The source document is never mutated; the normalized shape owns its own
/// (translated) copies.
pub fn normalize(document: &Document) -> NormalizedDocument {
    match document {
        Document::V2(doc) => {
            let mut out = NormalizedDocument {
                version: Some(Version::V2),
                schemas: doc.definitions.clone(),
                responses: doc.responses.clone(),
                ..NormalizedDocument::default()
            };
            out.parameters = doc
                .parameters
                .iter()
                .map(|(name, param)| (name.clone(), translate_parameter_node(param)))
                .collect();
            out.paths = doc
                .paths
                .iter()
                .map(|(path, item)| (path.clone(), normalize_path_item(item, Version::V2)))
                .collect();
            out
        }
        Document::V3(doc) => {
            let mut out = NormalizedDocument {
                version: Some(Version::V3),
                ..NormalizedDocument::default()
            };
            if let Some(components) = &doc.components {
                out.schemas = components.schemas.clone();
                out.responses = components.responses.clone();
                out.parameters = components.parameters.clone();
                out.request_bodies = components.request_bodies.clone();
                out.headers = components.headers.clone();
                out.path_items = components.path_items.clone();
            }
            out.paths = doc
                .paths
                .iter()
                .map(|(path, item)| (path.clone(), normalize_path_item(item, Version::V3)))
                .collect();
            out.webhooks = doc
                .webhooks
                .iter()
                .map(|(name, item)| {
                    let normalized = match item {
                        ObjOrRef::Obj(pi) => {
                            ObjOrRef::Obj(normalize_path_item(pi, Version::V3))
                        }
                        ObjOrRef::Ref(r) => ObjOrRef::Ref(r.clone()),
                    };
                    (name.clone(), normalized)
                })
                .collect();
            out
        }
    }
}

/// Normalizes a bare name-to-schema collection (`rawSchema` mode).
pub fn normalize_raw_schema(
    schemas: IndexMap<String, SchemaOrRef>,
    version: Version,
) -> NormalizedDocument {
    NormalizedDocument {
        version: Some(version),
        schemas,
        ..NormalizedDocument::default()
    }
}

fn normalize_path_item(item: &PathItemObject, version: Version) -> PathItemObject {
    let mut out = item.clone();

    // trace is not a legal method key under Swagger 2.0.
    if !Method::Trace.allowed_in(version) {
        out.trace = None;
    }

    if version == Version::V2 {
        out.parameters = out
            .parameters
            .iter()
            .map(translate_parameter_node)
            .collect();
        for method in Method::ALL {
            if let Some(op) = operation_mut(&mut out, method) {
                translate_operation(op);
            }
        }
    }

    out
}

fn operation_mut(item: &mut PathItemObject, method: Method) -> Option<&mut OperationObject> {
    match method {
        Method::Get => item.get.as_mut(),
        Method::Put => item.put.as_mut(),
        Method::Post => item.post.as_mut(),
        Method::Delete => item.delete.as_mut(),
        Method::Options => item.options.as_mut(),
        Method::Head => item.head.as_mut(),
        Method::Patch => item.patch.as_mut(),
        Method::Trace => item.trace.as_mut(),
    }
}

fn translate_operation(op: &mut OperationObject) {
    op.parameters = op.parameters.iter().map(translate_parameter_node).collect();
}

fn translate_parameter_node(node: &ObjOrRef<ParameterObject>) -> ObjOrRef<ParameterObject> {
    match node {
        ObjOrRef::Ref(r) => ObjOrRef::Ref(r.clone()),
        ObjOrRef::Obj(param) => ObjOrRef::Obj(translate_parameter(param)),
    }
}

/// Rewrites a Swagger 2.0 inline-typed parameter into the schema-bearing
/// form used everywhere downstream. Parameters that already carry a schema
/// (OpenAPI 3, Swagger `in: body`) pass through untouched.
fn translate_parameter(param: &ParameterObject) -> ParameterObject {
    if param.schema.is_some() {
        return param.clone();
    }
    if param.param_type.is_none() && param.items.is_none() && param.enum_values.is_none() {
        return param.clone();
    }

    let mut out = param.clone();
    let schema = SchemaObject {
        schema_type: out.param_type.take(),
        items: out.items.take(),
        enum_values: out.enum_values.take(),
        ..SchemaObject::default()
    };
    out.schema = Some(ObjOrRef::Obj(schema));
    out
}
