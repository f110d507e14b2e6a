#![deny(missing_docs)]

//! # Composition Transformation
//!
//! Maps every resolved Schema Node to exactly one canonical type
//! expression. Rules are applied in a fixed precedence: the caller-supplied
//! formatter, then `enum`, then `oneOf`/`anyOf`, then `allOf`, then the
//! `type` dispatch, with nullability wrapped last.
//!
//! Degenerate nodes never abort the run: they collapse to the documented
//! fallback type and are recorded as diagnostics.

use crate::error::Diagnostic;
use crate::error::TypegenResult;
use crate::oas::models::{AdditionalProperties, ObjOrRef, SchemaObject, SchemaOrRef, Version};
use crate::oas::resolve::{encode_pointer_segment, Resolver, SchemaTarget};
use crate::options::Context;
use crate::ts::{Primitive, Property, TypeExpr};
use indexmap::IndexMap;

/// The per-run schema transformer.
///
/// Holds the run context, the collected diagnostics, and the stack of
/// external expansions used to break cross-document cycles. Transformation
/// is a pure function of (node, context): transforming the same resolved
/// node twice yields structurally identical expressions.
pub struct Transformer<'a> {
    ctx: &'a Context,
    diagnostics: Vec<Diagnostic>,
    external_seen: Vec<String>,
}

impl<'a> Transformer<'a> {
    /// Creates a transformer for one run.
    pub fn new(ctx: &'a Context) -> Self {
        Transformer {
            ctx,
            diagnostics: Vec::new(),
            external_seen: Vec::new(),
        }
    }

    /// The diagnostics collected so far.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Consumes the transformer, yielding the collected diagnostics.
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub(crate) fn warn(&mut self, location: &str, message: impl Into<String>) {
        let message = message.into();
        if !self.ctx.silent {
            log::warn!("{}: {}", location, message);
        }
        self.diagnostics.push(Diagnostic {
            location: location.to_string(),
            message,
        });
    }

    /// Transforms a schema-or-reference node at `location`.
    ///
    /// References to named definitions resolve to indexed-access type
    /// references (never to copies of the target), which is what keeps
    /// self-referential schemas finite.
    pub fn transform(
        &mut self,
        resolver: &Resolver<'_>,
        node: &SchemaOrRef,
        location: &str,
    ) -> TypegenResult<TypeExpr> {
        match node {
            ObjOrRef::Ref(reference) => match resolver.schema_target(reference, location)? {
                SchemaTarget::Local(path) => Ok(TypeExpr::Ref(path)),
                SchemaTarget::External { key, node, doc } => {
                    if self.external_seen.contains(&key) {
                        self.warn(
                            location,
                            format!("circular external reference '{}' collapses to unknown", key),
                        );
                        return Ok(TypeExpr::Unknown);
                    }
                    self.external_seen.push(key);
                    let sub_resolver = Resolver::new(doc, resolver.external_set());
                    let result = self.transform(&sub_resolver, node, location);
                    self.external_seen.pop();
                    result
                }
            },
            ObjOrRef::Obj(schema) => self.transform_schema(resolver, schema, location),
        }
    }

    /// Transforms a concrete schema node.
    pub fn transform_schema(
        &mut self,
        resolver: &Resolver<'_>,
        schema: &SchemaObject,
        location: &str,
    ) -> TypegenResult<TypeExpr> {
        if let Some(formatter) = self.ctx.formatter {
            if let Some(text) = formatter(schema) {
                return Ok(TypeExpr::Raw(text));
            }
        }
        let base = self.base_type(resolver, schema, location)?;
        Ok(self.apply_nullable(schema, base))
    }

    fn base_type(
        &mut self,
        resolver: &Resolver<'_>,
        schema: &SchemaObject,
        location: &str,
    ) -> TypegenResult<TypeExpr> {
        if let Some(values) = &schema.enum_values {
            if !values.is_empty() {
                return Ok(TypeExpr::Union(
                    values
                        .iter()
                        .map(|value| TypeExpr::Literal(value.clone()))
                        .collect(),
                ));
            }
        }

        if let Some(members) = &schema.one_of {
            return self.union_of(resolver, members, location, "oneOf");
        }
        if let Some(members) = &schema.any_of {
            return self.union_of(resolver, members, location, "anyOf");
        }

        if let Some(members) = &schema.all_of {
            return self.intersection_of(resolver, members, location);
        }

        match schema.schema_type.as_deref() {
            Some("string") => Ok(TypeExpr::Primitive(Primitive::String)),
            Some("number") | Some("integer") => Ok(TypeExpr::Primitive(Primitive::Number)),
            Some("boolean") => Ok(TypeExpr::Primitive(Primitive::Boolean)),
            Some("array") => self.array_type(resolver, schema, location),
            Some("object") => self.object_type(resolver, schema, location),
            // Swagger 2.0 file uploads have no TypeScript shape.
            Some("file") => Ok(TypeExpr::Unknown),
            Some(other) => {
                self.warn(
                    location,
                    format!("unrecognized type '{}' collapses to unknown", other),
                );
                Ok(TypeExpr::Unknown)
            }
            None => {
                if schema.properties.is_some()
                    || schema.additional_properties.is_some()
                    || schema.required.is_some()
                {
                    self.object_type(resolver, schema, location)
                } else if schema.items.is_some() {
                    self.array_type(resolver, schema, location)
                } else {
                    self.warn(location, "schema with no recognizable signal collapses to unknown");
                    Ok(TypeExpr::Unknown)
                }
            }
        }
    }

    fn union_of(
        &mut self,
        resolver: &Resolver<'_>,
        members: &[SchemaOrRef],
        location: &str,
        keyword: &str,
    ) -> TypegenResult<TypeExpr> {
        if members.is_empty() {
            self.warn(location, format!("empty {} collapses to never", keyword));
            return Ok(TypeExpr::Never);
        }
        let mut out = Vec::with_capacity(members.len());
        for (i, member) in members.iter().enumerate() {
            out.push(self.transform(resolver, member, &format!("{}/{}/{}", location, keyword, i))?);
        }
        Ok(TypeExpr::Union(out))
    }

    fn intersection_of(
        &mut self,
        resolver: &Resolver<'_>,
        members: &[SchemaOrRef],
        location: &str,
    ) -> TypegenResult<TypeExpr> {
        if members.is_empty() {
            self.warn(location, "empty allOf collapses to unknown");
            return Ok(TypeExpr::Unknown);
        }

        // When every member is an inline plain object the intersection is
        // presented merged: properties unioned, required sets unioned.
        if members.iter().all(is_plain_object) {
            let mut properties: IndexMap<String, SchemaOrRef> = IndexMap::new();
            let mut required: Vec<String> = Vec::new();
            for member in members {
                if let ObjOrRef::Obj(schema) = member {
                    if let Some(props) = &schema.properties {
                        for (name, node) in props {
                            properties.insert(name.clone(), node.clone());
                        }
                    }
                    if let Some(names) = &schema.required {
                        for name in names {
                            if !required.contains(name) {
                                required.push(name.clone());
                            }
                        }
                    }
                }
            }
            let merged = SchemaObject {
                schema_type: Some("object".to_string()),
                properties: Some(properties),
                required: if required.is_empty() {
                    None
                } else {
                    Some(required)
                },
                ..SchemaObject::default()
            };
            return self.object_type(resolver, &merged, location);
        }

        let mut out = Vec::with_capacity(members.len());
        for (i, member) in members.iter().enumerate() {
            out.push(self.transform(resolver, member, &format!("{}/allOf/{}", location, i))?);
        }
        Ok(TypeExpr::Intersection(out))
    }

    fn object_type(
        &mut self,
        resolver: &Resolver<'_>,
        schema: &SchemaObject,
        location: &str,
    ) -> TypegenResult<TypeExpr> {
        let required: Vec<&String> = schema.required.iter().flatten().collect();
        let mut properties = Vec::new();

        if let Some(props) = &schema.properties {
            for (name, node) in props {
                let prop_location =
                    format!("{}/properties/{}", location, encode_pointer_segment(name));
                let ty = self.transform(resolver, node, &prop_location)?;
                let description = node.as_obj().and_then(|s| s.description.clone());
                properties.push(Property {
                    name: name.clone(),
                    required: required.iter().any(|r| *r == name),
                    description,
                    ty,
                });
            }
        }

        // A required entry naming an undeclared property is kept, typed
        // unknown, and surfaced as a diagnostic rather than dropped.
        for name in required {
            let declared = schema
                .properties
                .as_ref()
                .map_or(false, |props| props.contains_key(name));
            if !declared {
                self.warn(
                    location,
                    format!("required property '{}' is not declared; typed as unknown", name),
                );
                properties.push(Property {
                    name: name.clone(),
                    required: true,
                    description: None,
                    ty: TypeExpr::Unknown,
                });
            }
        }

        let index = match &schema.additional_properties {
            Some(AdditionalProperties::Flag(true)) => Some(TypeExpr::Unknown),
            Some(AdditionalProperties::Flag(false)) => None,
            Some(AdditionalProperties::Schema(node)) => Some(self.transform(
                resolver,
                node,
                &format!("{}/additionalProperties", location),
            )?),
            None => {
                if self.ctx.additional_properties {
                    Some(TypeExpr::Unknown)
                } else {
                    None
                }
            }
        };

        Ok(TypeExpr::object(properties, index))
    }

    fn array_type(
        &mut self,
        resolver: &Resolver<'_>,
        schema: &SchemaObject,
        location: &str,
    ) -> TypegenResult<TypeExpr> {
        let item = match &schema.items {
            Some(node) => self.transform(resolver, node, &format!("{}/items", location))?,
            None => TypeExpr::Unknown,
        };

        if self.ctx.support_array_length {
            if let (Some(min), Some(max)) = (schema.min_items, schema.max_items) {
                if min == max {
                    return Ok(TypeExpr::Tuple(vec![item; min as usize]));
                }
            }
        }

        Ok(TypeExpr::Array(Box::new(item)))
    }

    fn apply_nullable(&self, schema: &SchemaObject, base: TypeExpr) -> TypeExpr {
        // nullable is an OpenAPI 3 keyword; under Swagger 2 it is ignored.
        if self.ctx.version != Version::V3 {
            return base;
        }
        if schema.nullable != Some(true) {
            return base;
        }
        if self.ctx.default_non_nullable && schema.default.is_some() {
            return base;
        }
        base.nullable()
    }
}

fn is_plain_object(member: &SchemaOrRef) -> bool {
    match member {
        ObjOrRef::Ref(_) => false,
        ObjOrRef::Obj(schema) => {
            schema.enum_values.is_none()
                && schema.one_of.is_none()
                && schema.any_of.is_none()
                && schema.all_of.is_none()
                && schema.items.is_none()
                && matches!(schema.schema_type.as_deref(), None | Some("object"))
        }
    }
}
