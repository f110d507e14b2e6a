#![deny(missing_docs)]

//! # Path & Operation Projection
//!
//! Derives, for every path and method, the named bundle of type
//! expressions the operation consumes and produces: merged parameters,
//! request body, and the status-keyed response map. Also projects the
//! reusable component bags into their emitted members, collects
//! `operationId`-named operations, and implements the `pathParamsAsTypes`
//! and `makePathsEnum` features.

use crate::error::TypegenResult;
use crate::oas::models::{
    HeaderObject, Method, ObjOrRef, OperationObject, ParamLocation, ParameterObject,
    PathItemObject, ResponseObject, SchemaObject, Version,
};
use crate::oas::normalize::NormalizedDocument;
use crate::oas::resolve::{encode_pointer_segment, Resolver};
use crate::oas::transform::Transformer;
use crate::options::Context;
use crate::ts::{render, TypeExpr, TypePath};
use indexmap::IndexMap;
use std::collections::HashSet;

/// How a path key is emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathKey {
    /// The literal path string, quoted.
    Literal(String),
    /// A template-literal type with `{param}` segments substituted
    /// (`pathParamsAsTypes`).
    Template(String),
}

/// A parameter resolved down to its emitted member.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedParameter {
    /// Parameter name.
    pub name: String,
    /// Grouping location (query, path, header, cookie, formData, body).
    pub location: ParamLocation,
    /// Whether the member is mandatory (always true for path parameters).
    pub required: bool,
    /// Doc comment for the member.
    pub description: Option<String>,
    /// The member type.
    pub ty: TypeExpr,
}

/// Shape of a projected request body.
#[derive(Debug, Clone, PartialEq)]
pub enum BodyShape {
    /// Reference to a named request body component.
    Ref(TypePath),
    /// Media-type keyed body shapes.
    Media(Vec<(String, TypeExpr)>),
}

/// A projected request body.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyProjection {
    /// Whether the body is required.
    pub required: bool,
    /// The body shape.
    pub shape: BodyShape,
}

/// A projected response header.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedHeader {
    /// Header name.
    pub name: String,
    /// Whether the header is always present.
    pub required: bool,
    /// The header value type.
    pub ty: TypeExpr,
}

/// The body position of a projected response.
///
/// The Swagger 2 `schema` and OpenAPI 3 `content` forms stay distinct here;
/// the emitter synthesizes the single-media-type content map for V2.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// No body declared; emits `unknown`, or `never` under `contentNever`.
    None,
    /// A Swagger 2 response schema.
    Schema(TypeExpr),
    /// OpenAPI 3 media-type keyed body shapes.
    Media(Vec<(String, TypeExpr)>),
}

/// A projected inline response.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseProjection {
    /// Response description.
    pub description: Option<String>,
    /// Projected headers.
    pub headers: Vec<ProjectedHeader>,
    /// Projected body.
    pub body: ResponseBody,
}

/// A response position: a named component reference or an inline shape.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseEntry {
    /// Reference to a named response component.
    Ref(TypePath),
    /// Inline response shape.
    Inline(ResponseProjection),
}

/// The full projection of one operation.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationProjection {
    /// Merged parameters (operation-level overrides path-level per
    /// (name, location) key, never removes).
    pub parameters: Vec<ProjectedParameter>,
    /// Projected request body (OpenAPI 3 only; Swagger 2 body parameters
    /// stay in `parameters` under the `body` group).
    pub request_body: Option<BodyProjection>,
    /// Responses keyed by status code or `default`, in source order.
    pub responses: Vec<(String, ResponseEntry)>,
}

/// How an operation is emitted under its path.
#[derive(Debug, Clone, PartialEq)]
pub enum OperationEntry {
    /// Reference to the `operations` interface by operationId.
    Named(String),
    /// Inlined operation shape.
    Inline(OperationProjection),
}

/// The projection of one path (or webhook) item.
#[derive(Debug, Clone, PartialEq)]
pub struct PathProjection {
    /// The source path string (or webhook name).
    pub path: String,
    /// The emitted key.
    pub key: PathKey,
    /// Operations in method order.
    pub operations: Vec<(Method, OperationEntry)>,
}

/// A named member of an emitted bag section.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedMember {
    /// Member name.
    pub name: String,
    /// Doc comment for the member.
    pub description: Option<String>,
    /// Member type.
    pub expr: TypeExpr,
}

/// A projected named response component.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedResponse {
    /// Component name.
    pub name: String,
    /// Component description.
    pub description: Option<String>,
    /// The response shape.
    pub entry: ResponseEntry,
}

/// A projected named request body component.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedRequestBody {
    /// Component name.
    pub name: String,
    /// The body shape.
    pub body: BodyProjection,
}

/// Everything the emitter consumes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Projection {
    /// Projected paths, in source order.
    pub paths: Vec<PathProjection>,
    /// Projected webhooks (OpenAPI 3 only).
    pub webhooks: Vec<PathProjection>,
    /// Operations named by operationId, in collection order.
    pub operations: Vec<(String, OperationProjection)>,
    /// Reusable schemas.
    pub schemas: Vec<NamedMember>,
    /// Reusable responses.
    pub responses: Vec<NamedResponse>,
    /// Reusable parameters (emitted as their schema type).
    pub parameters: Vec<NamedMember>,
    /// Reusable request bodies.
    pub request_bodies: Vec<NamedRequestBody>,
    /// Reusable headers.
    pub headers: Vec<NamedMember>,
    /// `(member name, path string)` pairs for the paths enum, when enabled.
    pub paths_enum: Vec<(String, String)>,
}

/// Projects the normalized document into its emitted structure.
pub fn project<'a>(
    ctx: &Context,
    resolver: &Resolver<'a>,
    transformer: &mut Transformer<'_>,
    doc: &'a NormalizedDocument,
) -> TypegenResult<Projection> {
    let mut projection = Projection::default();
    let version = doc.version();

    for (name, node) in &doc.schemas {
        let location = bag_location(version, "definitions", "schemas", name);
        let expr = transformer.transform(resolver, node, &location)?;
        projection.schemas.push(NamedMember {
            name: name.clone(),
            description: node.as_obj().and_then(|s| s.description.clone()),
            expr,
        });
    }

    for (name, node) in &doc.parameters {
        let location = bag_location(version, "parameters", "parameters", name);
        let (description, expr) = match node {
            ObjOrRef::Ref(_) => {
                let resolved = resolver.parameter(node, &location)?;
                let expr = match resolved.handle {
                    Some(path) => TypeExpr::Ref(path),
                    None => parameter_type(transformer, resolver, resolved.node, &location)?,
                };
                (resolved.node.description.clone(), expr)
            }
            ObjOrRef::Obj(param) => (
                param.description.clone(),
                parameter_type(transformer, resolver, param, &location)?,
            ),
        };
        projection.parameters.push(NamedMember {
            name: name.clone(),
            description,
            expr,
        });
    }

    for (name, node) in &doc.responses {
        let location = bag_location(version, "responses", "responses", name);
        let (description, entry) = match node {
            ObjOrRef::Ref(_) => {
                let resolved = resolver.response(node, &location)?;
                match resolved.handle {
                    Some(path) => (resolved.node.description.clone(), ResponseEntry::Ref(path)),
                    None => {
                        let inline =
                            project_response(ctx, resolver, transformer, resolved.node, &location)?;
                        (resolved.node.description.clone(), ResponseEntry::Inline(inline))
                    }
                }
            }
            ObjOrRef::Obj(response) => (
                response.description.clone(),
                ResponseEntry::Inline(project_response(
                    ctx,
                    resolver,
                    transformer,
                    response,
                    &location,
                )?),
            ),
        };
        projection.responses.push(NamedResponse {
            name: name.clone(),
            description,
            entry,
        });
    }

    for (name, node) in &doc.request_bodies {
        let location = format!("#/components/requestBodies/{}", encode_pointer_segment(name));
        let resolved = resolver.request_body(node, &location)?;
        let body = match resolved.handle {
            Some(path) => BodyProjection {
                required: resolved.node.required.unwrap_or(false),
                shape: BodyShape::Ref(path),
            },
            None => project_request_body(transformer, resolver, resolved.node, &location)?,
        };
        projection.request_bodies.push(NamedRequestBody {
            name: name.clone(),
            body,
        });
    }

    for (name, node) in &doc.headers {
        let location = format!("#/components/headers/{}", encode_pointer_segment(name));
        let resolved = resolver.header(node, &location)?;
        let expr = match resolved.handle {
            Some(path) => TypeExpr::Ref(path),
            None => header_type(transformer, resolver, resolved.node, &location)?,
        };
        projection.headers.push(NamedMember {
            name: name.clone(),
            description: resolved.node.description.clone(),
            expr,
        });
    }

    let mut seen_operations: HashSet<String> = HashSet::new();
    let mut enum_names: HashSet<String> = HashSet::new();

    for (path, item) in &doc.paths {
        let location = format!("#/paths/{}", encode_pointer_segment(path));
        let projected = project_path_item(
            ctx,
            resolver,
            transformer,
            path,
            item,
            &location,
            &mut projection.operations,
            &mut seen_operations,
        )?;

        if ctx.make_paths_enum {
            let member = unique_enum_member(path, &mut enum_names);
            projection.paths_enum.push((member, path.clone()));
        }

        projection.paths.push(projected);
    }

    for (name, node) in &doc.webhooks {
        let location = format!("#/webhooks/{}", encode_pointer_segment(name));
        let item_storage;
        let item = match node {
            ObjOrRef::Obj(item) => item,
            ObjOrRef::Ref(_) => {
                item_storage = resolver.path_item(node, &location)?;
                item_storage.node
            }
        };
        let mut projected = project_path_item(
            ctx,
            resolver,
            transformer,
            name,
            item,
            &location,
            &mut projection.operations,
            &mut seen_operations,
        )?;
        // Webhook keys are names, never path templates.
        projected.key = PathKey::Literal(name.clone());
        projection.webhooks.push(projected);
    }

    Ok(projection)
}

#[allow(clippy::too_many_arguments)]
fn project_path_item<'a>(
    ctx: &Context,
    resolver: &Resolver<'a>,
    transformer: &mut Transformer<'_>,
    path: &str,
    item: &'a PathItemObject,
    location: &str,
    operations: &mut Vec<(String, OperationProjection)>,
    seen_operations: &mut HashSet<String>,
) -> TypegenResult<PathProjection> {
    let resolved_storage;
    let item = match &item.ref_path {
        Some(pointer) => {
            resolved_storage = resolver.path_item_by_pointer(pointer, location)?;
            resolved_storage.node
        }
        None => item,
    };

    let path_level = resolve_parameters(ctx, resolver, transformer, &item.parameters, location)?;

    let mut ops = Vec::new();
    let mut path_param_types: IndexMap<String, TypeExpr> = IndexMap::new();
    for param in path_level.values() {
        if param.location == ParamLocation::Path {
            path_param_types
                .entry(param.name.clone())
                .or_insert_with(|| param.ty.clone());
        }
    }

    for method in Method::ALL {
        let Some(op) = item.operation(method) else {
            continue;
        };
        let op_location = format!("{}/{}", location, method.as_str());
        let projected = project_operation(
            ctx,
            resolver,
            transformer,
            op,
            &path_level,
            &op_location,
        )?;

        for param in &projected.parameters {
            if param.location == ParamLocation::Path {
                path_param_types
                    .entry(param.name.clone())
                    .or_insert_with(|| param.ty.clone());
            }
        }

        let entry = match &op.operation_id {
            Some(id) if seen_operations.insert(id.clone()) => {
                operations.push((id.clone(), projected));
                OperationEntry::Named(id.clone())
            }
            Some(id) => {
                transformer.warn(
                    &op_location,
                    format!("duplicate operationId '{}'; operation inlined", id),
                );
                OperationEntry::Inline(projected)
            }
            None => OperationEntry::Inline(projected),
        };
        ops.push((method, entry));
    }

    let key = path_key(ctx, path, &path_param_types);

    Ok(PathProjection {
        path: path.to_string(),
        key,
        operations: ops,
    })
}

fn project_operation<'a>(
    ctx: &Context,
    resolver: &Resolver<'a>,
    transformer: &mut Transformer<'_>,
    op: &'a OperationObject,
    path_level: &IndexMap<(String, ParamLocation), ProjectedParameter>,
    location: &str,
) -> TypegenResult<OperationProjection> {
    // Operation-level parameters override path-level entries with the same
    // (name, location) key but never remove them.
    let mut merged = path_level.clone();
    let op_level = resolve_parameters(ctx, resolver, transformer, &op.parameters, location)?;
    for (key, param) in op_level {
        merged.insert(key, param);
    }

    let request_body = match &op.request_body {
        Some(node) => {
            let body_location = format!("{}/requestBody", location);
            let resolved = resolver.request_body(node, &body_location)?;
            Some(match resolved.handle {
                Some(path) => BodyProjection {
                    required: resolved.node.required.unwrap_or(false),
                    shape: BodyShape::Ref(path),
                },
                None => project_request_body(transformer, resolver, resolved.node, &body_location)?,
            })
        }
        None => None,
    };

    let mut responses = Vec::new();
    for (status, node) in &op.responses {
        let response_location = format!(
            "{}/responses/{}",
            location,
            encode_pointer_segment(status)
        );
        let entry = match node {
            ObjOrRef::Ref(_) => {
                let resolved = resolver.response(node, &response_location)?;
                match resolved.handle {
                    Some(path) => ResponseEntry::Ref(path),
                    None => ResponseEntry::Inline(project_response(
                        ctx,
                        resolver,
                        transformer,
                        resolved.node,
                        &response_location,
                    )?),
                }
            }
            ObjOrRef::Obj(response) => ResponseEntry::Inline(project_response(
                ctx,
                resolver,
                transformer,
                response,
                &response_location,
            )?),
        };
        responses.push((status.clone(), entry));
    }

    Ok(OperationProjection {
        parameters: merged.into_values().collect(),
        request_body,
        responses,
    })
}

fn resolve_parameters<'a>(
    _ctx: &Context,
    resolver: &Resolver<'a>,
    transformer: &mut Transformer<'_>,
    nodes: &'a [ObjOrRef<ParameterObject>],
    location: &str,
) -> TypegenResult<IndexMap<(String, ParamLocation), ProjectedParameter>> {
    let mut out = IndexMap::new();

    for (i, node) in nodes.iter().enumerate() {
        let param_location = format!("{}/parameters/{}", location, i);
        let resolved = resolver.parameter(node, &param_location)?;
        let param = resolved.node;

        let Some(name) = param.name.clone() else {
            transformer.warn(&param_location, "parameter without a name skipped");
            continue;
        };
        let Some(in_loc) = param.in_loc else {
            transformer.warn(&param_location, "parameter without a location skipped");
            continue;
        };

        let ty = match resolved.handle {
            Some(path) => TypeExpr::Ref(path),
            None => parameter_type(transformer, resolver, param, &param_location)?,
        };

        let projected = ProjectedParameter {
            name: name.clone(),
            location: in_loc,
            // Path parameters are mandatory regardless of what the document
            // says.
            required: param.required.unwrap_or(false) || in_loc == ParamLocation::Path,
            description: param.description.clone(),
            ty,
        };
        out.insert((name, in_loc), projected);
    }

    Ok(out)
}

fn parameter_type(
    transformer: &mut Transformer<'_>,
    resolver: &Resolver<'_>,
    param: &ParameterObject,
    location: &str,
) -> TypegenResult<TypeExpr> {
    match &param.schema {
        Some(node) => transformer.transform(resolver, node, &format!("{}/schema", location)),
        None => Ok(TypeExpr::Unknown),
    }
}

fn header_type(
    transformer: &mut Transformer<'_>,
    resolver: &Resolver<'_>,
    header: &HeaderObject,
    location: &str,
) -> TypegenResult<TypeExpr> {
    if let Some(node) = &header.schema {
        return transformer.transform(resolver, node, &format!("{}/schema", location));
    }
    if let Some(header_type) = &header.header_type {
        let schema = SchemaObject {
            schema_type: Some(header_type.clone()),
            ..SchemaObject::default()
        };
        return transformer.transform_schema(resolver, &schema, location);
    }
    Ok(TypeExpr::Unknown)
}

fn project_request_body(
    transformer: &mut Transformer<'_>,
    resolver: &Resolver<'_>,
    body: &crate::oas::models::RequestBodyObject,
    location: &str,
) -> TypegenResult<BodyProjection> {
    let mut media = Vec::new();
    if let Some(content) = &body.content {
        for (media_type, entry) in content {
            let media_location = format!(
                "{}/content/{}",
                location,
                encode_pointer_segment(media_type)
            );
            let expr = match &entry.schema {
                Some(node) => transformer.transform(resolver, node, &media_location)?,
                None => TypeExpr::Unknown,
            };
            media.push((media_type.clone(), expr));
        }
    }
    Ok(BodyProjection {
        required: body.required.unwrap_or(false),
        shape: BodyShape::Media(media),
    })
}

fn project_response<'a>(
    _ctx: &Context,
    resolver: &Resolver<'a>,
    transformer: &mut Transformer<'_>,
    response: &'a ResponseObject,
    location: &str,
) -> TypegenResult<ResponseProjection> {
    let mut headers = Vec::new();
    if let Some(map) = &response.headers {
        for (name, node) in map {
            let header_location =
                format!("{}/headers/{}", location, encode_pointer_segment(name));
            let resolved = resolver.header(node, &header_location)?;
            let ty = match resolved.handle {
                Some(path) => TypeExpr::Ref(path),
                None => header_type(transformer, resolver, resolved.node, &header_location)?,
            };
            headers.push(ProjectedHeader {
                name: name.clone(),
                required: resolved.node.required.unwrap_or(false),
                ty,
            });
        }
    }

    let body = if let Some(content) = &response.content {
        if content.is_empty() {
            ResponseBody::None
        } else {
            let mut media = Vec::new();
            for (media_type, entry) in content {
                let media_location = format!(
                    "{}/content/{}",
                    location,
                    encode_pointer_segment(media_type)
                );
                let expr = match &entry.schema {
                    Some(node) => transformer.transform(resolver, node, &media_location)?,
                    None => TypeExpr::Unknown,
                };
                media.push((media_type.clone(), expr));
            }
            ResponseBody::Media(media)
        }
    } else if let Some(schema) = &response.schema {
        ResponseBody::Schema(transformer.transform(
            resolver,
            schema,
            &format!("{}/schema", location),
        )?)
    } else {
        ResponseBody::None
    };

    Ok(ResponseProjection {
        description: response.description.clone(),
        headers,
        body,
    })
}

fn path_key(ctx: &Context, path: &str, path_params: &IndexMap<String, TypeExpr>) -> PathKey {
    if !ctx.path_params_as_types || !path.contains('{') {
        return PathKey::Literal(path.to_string());
    }

    let mut template = String::new();
    let mut rest = path;
    while let Some(open) = rest.find('{') {
        template.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let name = &after[..close];
                let rendered = path_params
                    .get(name)
                    .map(|ty| render(ty, false, 0))
                    .unwrap_or_else(|| "string".to_string());
                template.push_str(&format!("${{{}}}", rendered));
                rest = &after[close + 1..];
            }
            None => {
                template.push('{');
                rest = after;
            }
        }
    }
    template.push_str(rest);
    PathKey::Template(template)
}

/// Derives a unique Pascal-cased enum member name from a path string.
fn unique_enum_member(path: &str, seen: &mut HashSet<String>) -> String {
    let base = enum_member_name(path);
    if seen.insert(base.clone()) {
        return base;
    }
    let mut i = 2;
    loop {
        let candidate = format!("{}{}", base, i);
        if seen.insert(candidate.clone()) {
            return candidate;
        }
        i += 1;
    }
}

fn enum_member_name(path: &str) -> String {
    let mut out = String::new();
    for segment in path.split('/') {
        let cleaned: String = segment
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        let mut chars = cleaned.chars();
        if let Some(first) = chars.next() {
            out.push(first.to_ascii_uppercase());
            out.push_str(chars.as_str());
        }
    }
    if out.is_empty() {
        "Root".to_string()
    } else {
        out
    }
}

fn bag_location(version: Version, v2_section: &str, v3_section: &str, name: &str) -> String {
    match version {
        Version::V2 => format!("#/{}/{}", v2_section, encode_pointer_segment(name)),
        Version::V3 => format!(
            "#/components/{}/{}",
            v3_section,
            encode_pointer_segment(name)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oas::models::Document;
    use crate::oas::normalize::normalize;
    use crate::options::Options;
    use crate::ts::Primitive;
    use serde_json::json;

    fn project_document(value: serde_json::Value, options: Options) -> Projection {
        let document = Document::from_value(&value, None).unwrap();
        let ctx = Context::new(&options, document.version());
        let normalized = normalize(&document);
        let resolver = Resolver::new(&normalized, None);
        let mut transformer = Transformer::new(&ctx);
        project(&ctx, &resolver, &mut transformer, &normalized).unwrap()
    }

    #[test]
    fn test_operation_params_override_path_params() {
        let projection = project_document(
            json!({
                "openapi": "3.0.0",
                "paths": {
                    "/pets/{id}": {
                        "parameters": [
                            { "name": "id", "in": "path", "schema": { "type": "string" } },
                            { "name": "verbose", "in": "query", "schema": { "type": "boolean" } }
                        ],
                        "get": {
                            "parameters": [
                                { "name": "id", "in": "path", "schema": { "type": "number" } }
                            ],
                            "responses": {}
                        }
                    }
                }
            }),
            Options::default(),
        );

        let (_, entry) = &projection.paths[0].operations[0];
        let OperationEntry::Inline(op) = entry else {
            panic!("expected inline operation");
        };
        // Override replaces the type, the merged set keeps both members.
        assert_eq!(op.parameters.len(), 2);
        let id = op.parameters.iter().find(|p| p.name == "id").unwrap();
        assert_eq!(id.ty, TypeExpr::Primitive(Primitive::Number));
        assert!(id.required);
        assert!(op.parameters.iter().any(|p| p.name == "verbose"));
    }

    #[test]
    fn test_operation_id_collected_once() {
        let projection = project_document(
            json!({
                "openapi": "3.0.0",
                "paths": {
                    "/pets": {
                        "get": { "operationId": "listPets", "responses": {} }
                    }
                }
            }),
            Options::default(),
        );
        assert_eq!(projection.operations.len(), 1);
        assert_eq!(projection.operations[0].0, "listPets");
        let (_, entry) = &projection.paths[0].operations[0];
        assert_eq!(*entry, OperationEntry::Named("listPets".to_string()));
    }

    #[test]
    fn test_response_component_ref_not_duplicated() {
        let projection = project_document(
            json!({
                "openapi": "3.0.0",
                "paths": {
                    "/pets": {
                        "get": {
                            "responses": {
                                "404": { "$ref": "#/components/responses/NotFound" }
                            }
                        }
                    }
                },
                "components": {
                    "responses": {
                        "NotFound": { "description": "missing" }
                    }
                }
            }),
            Options::default(),
        );

        let (_, entry) = &projection.paths[0].operations[0];
        let OperationEntry::Inline(op) = entry else {
            panic!("expected inline operation");
        };
        let (status, response) = &op.responses[0];
        assert_eq!(status, "404");
        match response {
            ResponseEntry::Ref(path) => {
                assert_eq!(path.render(), "components[\"responses\"][\"NotFound\"]")
            }
            ResponseEntry::Inline(_) => panic!("component response must be referenced, not copied"),
        }
    }

    #[test]
    fn test_v2_body_parameter_stays_in_body_group() {
        let projection = project_document(
            json!({
                "swagger": "2.0",
                "paths": {
                    "/pets": {
                        "post": {
                            "parameters": [
                                {
                                    "name": "pet",
                                    "in": "body",
                                    "required": true,
                                    "schema": { "$ref": "#/definitions/Pet" }
                                }
                            ],
                            "responses": {}
                        }
                    }
                },
                "definitions": { "Pet": { "type": "object" } }
            }),
            Options::default(),
        );

        let (_, entry) = &projection.paths[0].operations[0];
        let OperationEntry::Inline(op) = entry else {
            panic!("expected inline operation");
        };
        assert!(op.request_body.is_none());
        let body = &op.parameters[0];
        assert_eq!(body.location, ParamLocation::Body);
        assert_eq!(
            body.ty,
            TypeExpr::Ref(TypePath(vec!["definitions".to_string(), "Pet".to_string()]))
        );
    }

    #[test]
    fn test_path_params_as_types_template() {
        let projection = project_document(
            json!({
                "openapi": "3.0.0",
                "paths": {
                    "/pets/{id}/photos/{photoId}": {
                        "get": {
                            "parameters": [
                                { "name": "id", "in": "path", "schema": { "type": "number" } }
                            ],
                            "responses": {}
                        }
                    }
                }
            }),
            Options {
                path_params_as_types: true,
                ..Options::default()
            },
        );

        match &projection.paths[0].key {
            PathKey::Template(template) => {
                assert_eq!(template, "/pets/${number}/photos/${string}")
            }
            PathKey::Literal(_) => panic!("expected template key"),
        }
    }

    #[test]
    fn test_make_paths_enum_members() {
        let projection = project_document(
            json!({
                "openapi": "3.0.0",
                "paths": {
                    "/": { "get": { "responses": {} } },
                    "/pets/{id}": { "get": { "responses": {} } }
                }
            }),
            Options {
                make_paths_enum: true,
                ..Options::default()
            },
        );
        assert_eq!(
            projection.paths_enum,
            vec![
                ("Root".to_string(), "/".to_string()),
                ("PetsId".to_string(), "/pets/{id}".to_string()),
            ]
        );
    }

    #[test]
    fn test_response_headers_projected() {
        let projection = project_document(
            json!({
                "openapi": "3.0.0",
                "paths": {
                    "/pets": {
                        "get": {
                            "responses": {
                                "200": {
                                    "description": "ok",
                                    "headers": {
                                        "X-Rate-Limit": {
                                            "required": true,
                                            "schema": { "type": "number" }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }),
            Options::default(),
        );

        let (_, entry) = &projection.paths[0].operations[0];
        let OperationEntry::Inline(op) = entry else {
            panic!("expected inline operation");
        };
        let (_, ResponseEntry::Inline(response)) = &op.responses[0] else {
            panic!("expected inline response");
        };
        assert_eq!(response.headers.len(), 1);
        assert_eq!(response.headers[0].name, "X-Rate-Limit");
        assert!(response.headers[0].required);
        assert_eq!(response.body, ResponseBody::None);
    }
}
