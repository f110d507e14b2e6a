#![deny(missing_docs)]

//! # TypeScript Type Algebra
//!
//! The canonical type-expression representation every resolved schema is
//! transformed into, plus its text rendering. The algebra is deliberately
//! small: primitives, literals, arrays, tuples, objects, unions,
//! intersections, named references, and the `unknown`/`never` bounds.

use serde_json::Value;

/// TypeScript primitive types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    /// `string`.
    String,
    /// `number` (OpenAPI `number` and `integer` both land here).
    Number,
    /// `boolean`.
    Boolean,
}

impl Primitive {
    /// The rendered keyword.
    pub fn as_str(self) -> &'static str {
        match self {
            Primitive::String => "string",
            Primitive::Number => "number",
            Primitive::Boolean => "boolean",
        }
    }
}

/// An indexed-access path to a named emitted type.
///
/// The first segment is a bare identifier and every following segment is an
/// index access, e.g. `["components", "schemas", "Pet"]` renders as
/// `components["schemas"]["Pet"]`. References to named definitions always
/// render as such a path instead of inlining the target, which is what makes
/// cyclic reference graphs terminate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypePath(pub Vec<String>);

impl TypePath {
    /// Renders the indexed-access expression.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (i, segment) in self.0.iter().enumerate() {
            if i == 0 {
                out.push_str(segment);
            } else {
                out.push_str(&format!("[{}]", json_string(segment)));
            }
        }
        out
    }
}

/// A member of an object type.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    /// Member name, quoted at render time when necessary.
    pub name: String,
    /// Whether the member is mandatory (`?` marker when false).
    pub required: bool,
    /// Doc comment emitted above the member.
    pub description: Option<String>,
    /// Member type.
    pub ty: TypeExpr,
}

impl Property {
    /// Builds a required, undocumented member.
    pub fn required(name: impl Into<String>, ty: TypeExpr) -> Self {
        Property {
            name: name.into(),
            required: true,
            description: None,
            ty,
        }
    }
}

/// An object type: named members plus an optional index signature.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectType {
    /// The named members, in source order.
    pub properties: Vec<Property>,
    /// Value type of the `[key: string]` index signature, when present.
    pub index: Option<Box<TypeExpr>>,
}

/// The canonical type expression algebra.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpr {
    /// A primitive keyword.
    Primitive(Primitive),
    /// A literal type (string/number/boolean/null literal).
    Literal(Value),
    /// `(T)[]`.
    Array(Box<TypeExpr>),
    /// A fixed-length tuple `[T0, .., Tn]`.
    Tuple(Vec<TypeExpr>),
    /// An object type.
    Object(ObjectType),
    /// A union of the members, in source order.
    Union(Vec<TypeExpr>),
    /// An intersection of the members, in source order.
    Intersection(Vec<TypeExpr>),
    /// An indexed-access reference to a named emitted type.
    Ref(TypePath),
    /// Caller-supplied text, emitted verbatim (formatter override).
    Raw(String),
    /// `unknown`: shape not declared.
    Unknown,
    /// `never`: provably no value.
    Never,
}

impl TypeExpr {
    /// Builds an object expression.
    pub fn object(properties: Vec<Property>, index: Option<TypeExpr>) -> Self {
        TypeExpr::Object(ObjectType {
            properties,
            index: index.map(Box::new),
        })
    }

    /// Builds a union, flattening `expr | null`-style nesting one level.
    pub fn nullable(self) -> Self {
        match self {
            TypeExpr::Union(mut members) => {
                members.push(TypeExpr::Literal(Value::Null));
                TypeExpr::Union(members)
            }
            other => TypeExpr::Union(vec![other, TypeExpr::Literal(Value::Null)]),
        }
    }
}

/// Renders `expr` as TypeScript source.
///
/// `indent` is the nesting depth of the surrounding member (two spaces per
/// level); `immutable` adds `readonly` markers to members, index signatures,
/// arrays and tuples.
pub fn render(expr: &TypeExpr, immutable: bool, indent: usize) -> String {
    match expr {
        TypeExpr::Primitive(p) => p.as_str().to_string(),
        TypeExpr::Literal(value) => literal_text(value),
        TypeExpr::Array(inner) => {
            let rendered = format!("({})[]", render(inner, immutable, indent));
            if immutable {
                format!("readonly {}", rendered)
            } else {
                rendered
            }
        }
        TypeExpr::Tuple(items) => {
            let rendered: Vec<String> = items
                .iter()
                .map(|item| render(item, immutable, indent))
                .collect();
            let body = format!("[{}]", rendered.join(", "));
            if immutable {
                format!("readonly {}", body)
            } else {
                body
            }
        }
        TypeExpr::Object(obj) => render_object(obj, immutable, indent),
        TypeExpr::Union(members) => render_composite(members, " | ", "never", immutable, indent),
        TypeExpr::Intersection(members) => {
            render_composite(members, " & ", "unknown", immutable, indent)
        }
        TypeExpr::Ref(path) => path.render(),
        TypeExpr::Raw(text) => text.clone(),
        TypeExpr::Unknown => "unknown".to_string(),
        TypeExpr::Never => "never".to_string(),
    }
}

fn render_composite(
    members: &[TypeExpr],
    separator: &str,
    empty: &str,
    immutable: bool,
    indent: usize,
) -> String {
    match members {
        [] => empty.to_string(),
        [single] => render(single, immutable, indent),
        _ => members
            .iter()
            .map(|member| {
                let rendered = render(member, immutable, indent);
                if needs_parens(member) {
                    format!("({})", rendered)
                } else {
                    rendered
                }
            })
            .collect::<Vec<_>>()
            .join(separator),
    }
}

fn needs_parens(member: &TypeExpr) -> bool {
    matches!(
        member,
        TypeExpr::Union(m) | TypeExpr::Intersection(m) if m.len() > 1
    )
}

fn render_object(obj: &ObjectType, immutable: bool, indent: usize) -> String {
    if obj.properties.is_empty() && obj.index.is_none() {
        return "Record<string, never>".to_string();
    }

    let pad = "  ".repeat(indent + 1);
    let close_pad = "  ".repeat(indent);
    let readonly = if immutable { "readonly " } else { "" };
    let mut lines = Vec::new();

    for prop in &obj.properties {
        if let Some(description) = &prop.description {
            lines.push(format!("{}/** {} */", pad, comment_text(description)));
        }
        let marker = if prop.required { "" } else { "?" };
        lines.push(format!(
            "{}{}{}{}: {};",
            pad,
            readonly,
            quote_key(&prop.name),
            marker,
            render(&prop.ty, immutable, indent + 1)
        ));
    }

    if let Some(index) = &obj.index {
        lines.push(format!(
            "{}{}[key: string]: {};",
            pad,
            readonly,
            render(index, immutable, indent + 1)
        ));
    }

    format!("{{\n{}\n{}}}", lines.join("\n"), close_pad)
}

/// Renders a literal type from a JSON value.
fn literal_text(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => serde_json::to_string(other).unwrap_or_else(|_| "unknown".to_string()),
    }
}

/// Quotes an object key unless it is a plain identifier or numeric key.
pub(crate) fn quote_key(key: &str) -> String {
    if is_plain_key(key) {
        key.to_string()
    } else {
        json_string(key)
    }
}

fn is_plain_key(key: &str) -> bool {
    if key.bytes().all(|b| b.is_ascii_digit()) {
        return !key.is_empty();
    }
    let mut chars = key.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    }
}

fn json_string(text: &str) -> String {
    serde_json::to_string(text).unwrap_or_else(|_| format!("\"{}\"", text))
}

fn comment_text(description: &str) -> String {
    description
        .replace("*/", "* /")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_primitives_and_bounds() {
        assert_eq!(render(&TypeExpr::Primitive(Primitive::String), false, 0), "string");
        assert_eq!(render(&TypeExpr::Unknown, false, 0), "unknown");
        assert_eq!(render(&TypeExpr::Never, false, 0), "never");
    }

    #[test]
    fn test_render_literal_union() {
        let expr = TypeExpr::Union(vec![
            TypeExpr::Literal(json!("asc")),
            TypeExpr::Literal(json!("desc")),
            TypeExpr::Literal(json!(42)),
        ]);
        assert_eq!(render(&expr, false, 0), "\"asc\" | \"desc\" | 42");
    }

    #[test]
    fn test_render_empty_union_is_never() {
        assert_eq!(render(&TypeExpr::Union(vec![]), false, 0), "never");
    }

    #[test]
    fn test_single_member_union_collapses() {
        let expr = TypeExpr::Union(vec![TypeExpr::Primitive(Primitive::Number)]);
        assert_eq!(render(&expr, false, 0), "number");
    }

    #[test]
    fn test_render_array_and_tuple() {
        let array = TypeExpr::Array(Box::new(TypeExpr::Primitive(Primitive::Number)));
        assert_eq!(render(&array, false, 0), "(number)[]");
        assert_eq!(render(&array, true, 0), "readonly (number)[]");

        let tuple = TypeExpr::Tuple(vec![
            TypeExpr::Primitive(Primitive::Number),
            TypeExpr::Primitive(Primitive::Number),
        ]);
        assert_eq!(render(&tuple, false, 0), "[number, number]");
        assert_eq!(render(&tuple, true, 0), "readonly [number, number]");
    }

    #[test]
    fn test_render_object_members() {
        let expr = TypeExpr::object(
            vec![
                Property::required("id", TypeExpr::Primitive(Primitive::Number)),
                Property {
                    name: "tag".to_string(),
                    required: false,
                    description: Some("Free-form label".to_string()),
                    ty: TypeExpr::Primitive(Primitive::String),
                },
            ],
            None,
        );
        let rendered = render(&expr, false, 0);
        assert_eq!(
            rendered,
            "{\n  id: number;\n  /** Free-form label */\n  tag?: string;\n}"
        );
    }

    #[test]
    fn test_render_object_immutable_and_index() {
        let expr = TypeExpr::object(
            vec![Property::required("id", TypeExpr::Primitive(Primitive::Number))],
            Some(TypeExpr::Unknown),
        );
        let rendered = render(&expr, true, 0);
        assert!(rendered.contains("readonly id: number;"));
        assert!(rendered.contains("readonly [key: string]: unknown;"));
    }

    #[test]
    fn test_render_empty_object() {
        let expr = TypeExpr::object(vec![], None);
        assert_eq!(render(&expr, false, 0), "Record<string, never>");
    }

    #[test]
    fn test_type_path_render() {
        let path = TypePath(vec![
            "components".to_string(),
            "schemas".to_string(),
            "Pet".to_string(),
        ]);
        assert_eq!(path.render(), "components[\"schemas\"][\"Pet\"]");

        let v2 = TypePath(vec!["definitions".to_string(), "Pet".to_string()]);
        assert_eq!(v2.render(), "definitions[\"Pet\"]");
    }

    #[test]
    fn test_quote_key_rules() {
        assert_eq!(quote_key("Pet"), "Pet");
        assert_eq!(quote_key("200"), "200");
        assert_eq!(quote_key("default"), "default");
        assert_eq!(quote_key("application/json"), "\"application/json\"");
        assert_eq!(quote_key("/pets/{id}"), "\"/pets/{id}\"");
    }

    #[test]
    fn test_nullable_flattens_unions() {
        let expr = TypeExpr::Union(vec![
            TypeExpr::Primitive(Primitive::String),
            TypeExpr::Primitive(Primitive::Number),
        ])
        .nullable();
        assert_eq!(render(&expr, false, 0), "string | number | null");
    }
}
