#![deny(missing_docs)]

//! # Declaration Emission
//!
//! Serializes the projected document into TypeScript declaration text.
//! Options affect shape only, never semantics: `exportType` switches the
//! interface form for a type alias, `immutableTypes` adds `readonly`
//! markers, `contentNever` picks `never` over `unknown` for responses with
//! no declared body, and `commentHeader` is prepended verbatim.

use crate::oas::models::{ParamLocation, Version};
use crate::oas::paths::{
    BodyProjection, BodyShape, OperationEntry, PathKey, PathProjection, Projection,
    ProjectedParameter, ResponseBody, ResponseEntry, ResponseProjection,
};
use crate::options::Context;
use crate::ts::{quote_key, render, Property, TypeExpr, TypePath};

/// Synthetic media type used when presenting a Swagger 2 response schema as
/// a content map.
const V2_MEDIA_TYPE: &str = "application/json";

const PARAM_GROUP_ORDER: [ParamLocation; 6] = [
    ParamLocation::Query,
    ParamLocation::Path,
    ParamLocation::Header,
    ParamLocation::Cookie,
    ParamLocation::FormData,
    ParamLocation::Body,
];

/// Emits the full declaration text for one projected document.
pub fn emit(ctx: &Context, projection: &Projection) -> String {
    let mut sections = Vec::new();

    if !ctx.comment_header.is_empty() {
        sections.push(ctx.comment_header.clone());
    }

    if !projection.paths.is_empty() {
        sections.push(emit_path_map(ctx, "paths", &projection.paths));
    }
    if !projection.webhooks.is_empty() {
        sections.push(emit_path_map(ctx, "webhooks", &projection.webhooks));
    }

    match ctx.version {
        Version::V2 => {
            if !projection.schemas.is_empty() {
                sections.push(emit_block(ctx, "definitions", &bag_expr(&projection.schemas)));
            }
            if !projection.parameters.is_empty() {
                sections.push(emit_block(ctx, "parameters", &bag_expr(&projection.parameters)));
            }
            if !projection.responses.is_empty() {
                sections.push(emit_block(ctx, "responses", &responses_expr(ctx, projection)));
            }
        }
        Version::V3 => {
            if let Some(expr) = components_expr(ctx, projection) {
                sections.push(emit_block(ctx, "components", &expr));
            }
        }
    }

    if !projection.operations.is_empty() {
        let members = projection
            .operations
            .iter()
            .map(|(id, op)| Property::required(id.clone(), operation_expr(ctx, op)))
            .collect();
        sections.push(emit_block(ctx, "operations", &TypeExpr::object(members, None)));
    }

    if !projection.paths_enum.is_empty() {
        sections.push(emit_paths_enum(&projection.paths_enum));
    }

    let mut out = sections.join("\n\n");
    out.push('\n');
    out
}

fn emit_block(ctx: &Context, name: &str, expr: &TypeExpr) -> String {
    let rendered = render(expr, ctx.immutable_types, 0);
    if ctx.export_type {
        format!("export type {} = {};", name, rendered)
    } else {
        format!("export interface {} {}", name, rendered)
    }
}

fn emit_path_map(ctx: &Context, name: &str, items: &[PathProjection]) -> String {
    let readonly = if ctx.immutable_types { "readonly " } else { "" };
    let mut lines = Vec::new();

    for item in items {
        let key = match &item.key {
            PathKey::Literal(path) => quote_key(path),
            PathKey::Template(template) => format!("[path: `{}`]", template),
        };
        let expr = path_item_expr(ctx, item);
        lines.push(format!(
            "  {}{}: {};",
            readonly,
            key,
            render(&expr, ctx.immutable_types, 1)
        ));
    }

    let body = format!("{{\n{}\n}}", lines.join("\n"));
    if ctx.export_type {
        format!("export type {} = {};", name, body)
    } else {
        format!("export interface {} {}", name, body)
    }
}

fn path_item_expr(ctx: &Context, item: &PathProjection) -> TypeExpr {
    let members = item
        .operations
        .iter()
        .map(|(method, entry)| {
            let ty = match entry {
                OperationEntry::Named(id) => TypeExpr::Ref(TypePath(vec![
                    "operations".to_string(),
                    id.clone(),
                ])),
                OperationEntry::Inline(op) => operation_expr(ctx, op),
            };
            Property::required(method.as_str(), ty)
        })
        .collect();
    TypeExpr::object(members, None)
}

fn operation_expr(ctx: &Context, op: &crate::oas::paths::OperationProjection) -> TypeExpr {
    let mut props = Vec::new();

    let groups = parameter_groups(&op.parameters);
    if !groups.is_empty() {
        props.push(Property::required(
            "parameters",
            TypeExpr::object(groups, None),
        ));
    }

    if let Some(body) = &op.request_body {
        props.push(Property {
            name: "requestBody".to_string(),
            required: body.required,
            description: None,
            ty: body_expr(body),
        });
    }

    if !op.responses.is_empty() {
        let members = op
            .responses
            .iter()
            .map(|(status, entry)| {
                let description = match entry {
                    ResponseEntry::Inline(response) => response.description.clone(),
                    ResponseEntry::Ref(_) => None,
                };
                Property {
                    name: status.clone(),
                    required: true,
                    description,
                    ty: response_expr(ctx, entry),
                }
            })
            .collect();
        props.push(Property::required(
            "responses",
            TypeExpr::object(members, None),
        ));
    }

    TypeExpr::object(props, None)
}

fn parameter_groups(parameters: &[ProjectedParameter]) -> Vec<Property> {
    let mut groups = Vec::new();

    for location in PARAM_GROUP_ORDER {
        let members: Vec<&ProjectedParameter> = parameters
            .iter()
            .filter(|p| p.location == location)
            .collect();
        if members.is_empty() {
            continue;
        }
        let group_required = members.iter().any(|m| m.required);
        let member_props = members
            .iter()
            .map(|m| Property {
                name: m.name.clone(),
                required: m.required,
                description: m.description.clone(),
                ty: m.ty.clone(),
            })
            .collect();
        groups.push(Property {
            name: location.as_str().to_string(),
            required: group_required,
            description: None,
            ty: TypeExpr::object(member_props, None),
        });
    }

    groups
}

fn body_expr(body: &BodyProjection) -> TypeExpr {
    match &body.shape {
        BodyShape::Ref(path) => TypeExpr::Ref(path.clone()),
        BodyShape::Media(entries) => {
            let media = entries
                .iter()
                .map(|(media_type, ty)| Property::required(media_type.clone(), ty.clone()))
                .collect();
            TypeExpr::object(
                vec![Property::required("content", TypeExpr::object(media, None))],
                None,
            )
        }
    }
}

fn response_expr(ctx: &Context, entry: &ResponseEntry) -> TypeExpr {
    match entry {
        ResponseEntry::Ref(path) => TypeExpr::Ref(path.clone()),
        ResponseEntry::Inline(response) => inline_response_expr(ctx, response),
    }
}

fn inline_response_expr(ctx: &Context, response: &ResponseProjection) -> TypeExpr {
    let content = match &response.body {
        ResponseBody::Media(entries) => Some(TypeExpr::object(
            entries
                .iter()
                .map(|(media_type, ty)| Property::required(media_type.clone(), ty.clone()))
                .collect(),
            None,
        )),
        // Swagger 2 schemas surface as a synthetic single-media content map.
        ResponseBody::Schema(ty) => Some(TypeExpr::object(
            vec![Property::required(V2_MEDIA_TYPE, ty.clone())],
            None,
        )),
        ResponseBody::None => None,
    };

    let fallback = if ctx.content_never {
        TypeExpr::Never
    } else {
        TypeExpr::Unknown
    };

    if response.headers.is_empty() {
        return match content {
            Some(content) => {
                TypeExpr::object(vec![Property::required("content", content)], None)
            }
            None => fallback,
        };
    }

    let header_props = response
        .headers
        .iter()
        .map(|h| Property {
            name: h.name.clone(),
            required: h.required,
            description: None,
            ty: h.ty.clone(),
        })
        .collect();

    TypeExpr::object(
        vec![
            Property::required("headers", TypeExpr::object(header_props, None)),
            Property::required("content", content.unwrap_or(fallback)),
        ],
        None,
    )
}

fn bag_expr(members: &[crate::oas::paths::NamedMember]) -> TypeExpr {
    TypeExpr::object(
        members
            .iter()
            .map(|member| Property {
                name: member.name.clone(),
                required: true,
                description: member.description.clone(),
                ty: member.expr.clone(),
            })
            .collect(),
        None,
    )
}

fn responses_expr(ctx: &Context, projection: &Projection) -> TypeExpr {
    TypeExpr::object(
        projection
            .responses
            .iter()
            .map(|named| Property {
                name: named.name.clone(),
                required: true,
                description: named.description.clone(),
                ty: response_expr(ctx, &named.entry),
            })
            .collect(),
        None,
    )
}

fn components_expr(ctx: &Context, projection: &Projection) -> Option<TypeExpr> {
    let mut props = Vec::new();

    if !projection.schemas.is_empty() {
        props.push(Property::required("schemas", bag_expr(&projection.schemas)));
    }
    if !projection.responses.is_empty() {
        props.push(Property::required(
            "responses",
            responses_expr(ctx, projection),
        ));
    }
    if !projection.parameters.is_empty() {
        props.push(Property::required(
            "parameters",
            bag_expr(&projection.parameters),
        ));
    }
    if !projection.request_bodies.is_empty() {
        let members = projection
            .request_bodies
            .iter()
            .map(|named| Property::required(named.name.clone(), body_expr(&named.body)))
            .collect();
        props.push(Property::required(
            "requestBodies",
            TypeExpr::object(members, None),
        ));
    }
    if !projection.headers.is_empty() {
        props.push(Property::required("headers", bag_expr(&projection.headers)));
    }

    if props.is_empty() {
        None
    } else {
        Some(TypeExpr::object(props, None))
    }
}

fn emit_paths_enum(members: &[(String, String)]) -> String {
    let lines: Vec<String> = members
        .iter()
        .map(|(name, path)| {
            let value =
                serde_json::to_string(path).unwrap_or_else(|_| format!("\"{}\"", path));
            format!("  {} = {},", name, value)
        })
        .collect();
    format!("export enum ApiPaths {{\n{}\n}}", lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oas::models::Document;
    use crate::oas::normalize::normalize;
    use crate::oas::paths::project;
    use crate::oas::resolve::Resolver;
    use crate::oas::transform::Transformer;
    use crate::options::Options;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn emit_document(value: serde_json::Value, options: Options) -> String {
        let document = Document::from_value(&value, None).unwrap();
        let ctx = Context::new(&options, document.version());
        let normalized = normalize(&document);
        let resolver = Resolver::new(&normalized, None);
        let mut transformer = Transformer::new(&ctx);
        let projection = project(&ctx, &resolver, &mut transformer, &normalized).unwrap();
        emit(&ctx, &projection)
    }

    fn no_header() -> Options {
        Options {
            comment_header: Some(String::new()),
            ..Options::default()
        }
    }

    #[test]
    fn test_emit_v3_components_and_operations() {
        let output = emit_document(
            json!({
                "openapi": "3.0.0",
                "paths": {
                    "/pets": {
                        "get": {
                            "operationId": "listPets",
                            "responses": {
                                "200": {
                                    "description": "ok",
                                    "content": {
                                        "application/json": {
                                            "schema": {
                                                "type": "array",
                                                "items": { "$ref": "#/components/schemas/Pet" }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                },
                "components": {
                    "schemas": {
                        "Pet": {
                            "type": "object",
                            "properties": { "name": { "type": "string" } },
                            "required": ["name"]
                        }
                    }
                }
            }),
            no_header(),
        );

        assert_eq!(
            output,
            "export interface paths {\n  \"/pets\": {\n    get: operations[\"listPets\"];\n  };\n}\n\nexport interface components {\n  schemas: {\n    Pet: {\n      name: string;\n    };\n  };\n}\n\nexport interface operations {\n  listPets: {\n    responses: {\n      /** ok */\n      200: {\n        content: {\n          \"application/json\": (components[\"schemas\"][\"Pet\"])[];\n        };\n      };\n    };\n  };\n}\n"
        );
    }

    #[test]
    fn test_emit_v2_definitions_and_synthetic_content() {
        let output = emit_document(
            json!({
                "swagger": "2.0",
                "paths": {
                    "/pets": {
                        "get": {
                            "responses": {
                                "200": {
                                    "schema": { "$ref": "#/definitions/Pet" }
                                }
                            }
                        }
                    }
                },
                "definitions": {
                    "Pet": { "type": "object", "properties": { "name": { "type": "string" } } }
                }
            }),
            no_header(),
        );

        assert!(output.contains("export interface definitions {"));
        // V2 response schemas surface under a synthetic content map.
        assert!(output.contains("\"application/json\": definitions[\"Pet\"];"));
    }

    #[test]
    fn test_content_never_toggle() {
        let doc = json!({
            "openapi": "3.0.0",
            "paths": {
                "/ping": {
                    "get": { "responses": { "204": { "description": "no body" } } }
                }
            }
        });

        let unknown = emit_document(doc.clone(), no_header());
        assert!(unknown.contains("204: unknown;"));

        let never = emit_document(
            doc,
            Options {
                content_never: true,
                ..no_header()
            },
        );
        assert!(never.contains("204: never;"));
    }

    #[test]
    fn test_export_type_and_immutable_shapes() {
        let doc = json!({
            "openapi": "3.0.0",
            "components": {
                "schemas": {
                    "Tags": { "type": "array", "items": { "type": "string" } }
                }
            }
        });

        let output = emit_document(
            doc,
            Options {
                export_type: true,
                immutable_types: true,
                ..no_header()
            },
        );
        assert!(output.starts_with("export type components = {"));
        assert!(output.contains("readonly Tags: readonly (string)[];"));
        assert!(output.trim_end().ends_with("};"));
    }

    #[test]
    fn test_comment_header_prepended_verbatim() {
        let output = emit_document(
            json!({ "openapi": "3.0.0", "components": { "schemas": { "A": { "type": "string" } } } }),
            Options {
                comment_header: Some("// banner".to_string()),
                ..Options::default()
            },
        );
        assert!(output.starts_with("// banner\n\n"));
    }

    #[test]
    fn test_paths_enum_emitted() {
        let output = emit_document(
            json!({
                "openapi": "3.0.0",
                "paths": {
                    "/pets": { "get": { "responses": {} } }
                }
            }),
            Options {
                make_paths_enum: true,
                ..no_header()
            },
        );
        assert!(output.contains("export enum ApiPaths {\n  Pets = \"/pets\",\n}"));
    }

    #[test]
    fn test_template_path_key_emission() {
        let output = emit_document(
            json!({
                "openapi": "3.0.0",
                "paths": {
                    "/pets/{id}": {
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
                ..no_header()
            },
        );
        assert!(output.contains("[path: `/pets/${number}`]:"));
    }

    #[test]
    fn test_parameter_groups_and_optionality() {
        let output = emit_document(
            json!({
                "openapi": "3.0.0",
                "paths": {
                    "/pets/{id}": {
                        "get": {
                            "parameters": [
                                { "name": "id", "in": "path", "schema": { "type": "string" } },
                                { "name": "limit", "in": "query", "schema": { "type": "number" } }
                            ],
                            "responses": {}
                        }
                    }
                }
            }),
            no_header(),
        );

        // All-optional groups carry the optional marker; path groups never do.
        assert!(output.contains("query?: {"));
        assert!(output.contains("limit?: number;"));
        assert!(output.contains("path: {"));
        assert!(output.contains("id: string;"));
    }
}
