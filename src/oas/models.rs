#![deny(missing_docs)]

//! # Document Object Model
//!
//! Serde structures mapping directly to OpenAPI 2 (Swagger) and OpenAPI 3
//! documents. These structs act as an Intermediate Deserialization Layer:
//! every "X-or-Reference" position is an [`ObjOrRef`] variant so the later
//! stages can pattern-match exhaustively instead of probing raw JSON.
//!
//! Deserialization is best-effort: almost every field is optional and
//! unrecognized keys are captured into `extensions` maps rather than
//! rejected.

use crate::error::{TypegenError, TypegenResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// The OpenAPI major version a run operates under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Version {
    /// Swagger 2.0.
    V2,
    /// OpenAPI 3.x.
    V3,
}

/// A parsed API description, tagged by major version.
///
/// Exactly one shape is active per run. The version is read from the
/// `swagger` / `openapi` tag when present, otherwise from the caller's
/// declared version; a document carrying both tags is ambiguous and
/// rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    /// A Swagger 2.0 document.
    V2(DocumentV2),
    /// An OpenAPI 3.x document.
    V3(DocumentV3),
}

impl Document {
    /// Parses a raw JSON value into a version-tagged document.
    ///
    /// `declared` is consulted only when the document itself carries no
    /// version tag (e.g. a stripped-down fragment). A document with both
    /// `swagger` and `openapi` tags, an unrecognized tag value, or no tag
    /// and no declared version is a fatal configuration error.
    pub fn from_value(value: &Value, declared: Option<u8>) -> TypegenResult<Self> {
        let swagger_tag = value.get("swagger").and_then(Value::as_str);
        let openapi_tag = value.get("openapi").and_then(Value::as_str);

        match (swagger_tag, openapi_tag) {
            (Some(_), Some(_)) => Err(TypegenError::config(
                "document carries both 'swagger' and 'openapi' version tags",
            )),
            (Some(tag), None) => {
                if !tag.starts_with('2') {
                    return Err(TypegenError::config(format!(
                        "unrecognized swagger version tag '{}'",
                        tag
                    )));
                }
                Ok(Document::V2(serde_json::from_value(value.clone())?))
            }
            (None, Some(tag)) => {
                if !tag.starts_with('3') {
                    return Err(TypegenError::config(format!(
                        "unrecognized openapi version tag '{}'",
                        tag
                    )));
                }
                Ok(Document::V3(serde_json::from_value(value.clone())?))
            }
            (None, None) => match declared {
                Some(2) => Ok(Document::V2(serde_json::from_value(value.clone())?)),
                Some(3) => Ok(Document::V3(serde_json::from_value(value.clone())?)),
                Some(other) => Err(TypegenError::config(format!(
                    "unrecognized OpenAPI version {}",
                    other
                ))),
                None => Err(TypegenError::config(
                    "document carries no 'swagger'/'openapi' tag and no version was supplied",
                )),
            },
        }
    }

    /// Returns the major version of this document.
    pub fn version(&self) -> Version {
        match self {
            Document::V2(_) => Version::V2,
            Document::V3(_) => Version::V3,
        }
    }
}

/// A Reference Object: a single `$ref` pointer and nothing else.
///
/// Sibling fields appearing next to `$ref` on a raw node are dropped during
/// deserialization; the pointer wins.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Reference {
    /// The pointer string, e.g. `#/components/schemas/Pet`.
    #[serde(rename = "$ref")]
    pub target: String,
}

/// Either a concrete object of kind `T` or a [`Reference`] to one.
///
/// The reference arm is tried first, so any map containing a `$ref` key
/// deserializes as a reference regardless of sibling fields.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ObjOrRef<T> {
    /// A `$ref` pointer to the object.
    Ref(Reference),
    /// The object itself, inline.
    Obj(T),
}

impl<T> ObjOrRef<T> {
    /// Returns the inline object, if this is not a reference.
    pub fn as_obj(&self) -> Option<&T> {
        match self {
            ObjOrRef::Obj(t) => Some(t),
            ObjOrRef::Ref(_) => None,
        }
    }
}

/// Shorthand for the most common reference position.
pub type SchemaOrRef = ObjOrRef<SchemaObject>;

/// A Swagger 2.0 root document.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct DocumentV2 {
    /// The `swagger` version tag (e.g. "2.0").
    pub swagger: Option<String>,
    /// Metadata about the API.
    pub info: Option<InfoObject>,
    /// Path items keyed by path template.
    #[serde(default)]
    pub paths: IndexMap<String, PathItemObject>,
    /// Reusable schema definitions.
    #[serde(default)]
    pub definitions: IndexMap<String, SchemaOrRef>,
    /// Reusable named parameters.
    #[serde(default)]
    pub parameters: IndexMap<String, ObjOrRef<ParameterObject>>,
    /// Reusable named responses.
    #[serde(default)]
    pub responses: IndexMap<String, ObjOrRef<ResponseObject>>,
    /// Base path prepended to all paths.
    #[serde(rename = "basePath")]
    pub base_path: Option<String>,
    /// Specification extensions and unmodeled keys.
    #[serde(flatten)]
    pub extensions: BTreeMap<String, Value>,
}

/// An OpenAPI 3.x root document.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct DocumentV3 {
    /// The `openapi` version tag (e.g. "3.0.3").
    pub openapi: Option<String>,
    /// Metadata about the API.
    pub info: Option<InfoObject>,
    /// Default JSON Schema dialect for contained Schema Objects.
    #[serde(rename = "jsonSchemaDialect")]
    pub json_schema_dialect: Option<String>,
    /// Connectivity information to target servers.
    #[serde(default)]
    pub servers: Vec<ServerObject>,
    /// Path items keyed by path template.
    #[serde(default)]
    pub paths: IndexMap<String, PathItemObject>,
    /// Incoming webhooks keyed by name.
    #[serde(default)]
    pub webhooks: IndexMap<String, ObjOrRef<PathItemObject>>,
    /// Reusable objects of the document.
    pub components: Option<ComponentsObject>,
    /// Global security requirements (raw shape).
    #[serde(default)]
    pub security: Vec<Value>,
    /// Tags used by the document.
    #[serde(default)]
    pub tags: Vec<TagObject>,
    /// Additional external documentation.
    #[serde(rename = "externalDocs")]
    pub external_docs: Option<ExternalDocumentationObject>,
    /// Specification extensions and unmodeled keys.
    #[serde(flatten)]
    pub extensions: BTreeMap<String, Value>,
}

/// Metadata about the API (Info Object).
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct InfoObject {
    /// The title of the API.
    pub title: Option<String>,
    /// A short summary of the API.
    pub summary: Option<String>,
    /// A description of the API.
    pub description: Option<String>,
    /// A URL to the Terms of Service for the API.
    #[serde(rename = "termsOfService")]
    pub terms_of_service: Option<String>,
    /// The contact information for the exposed API.
    pub contact: Option<ContactObject>,
    /// The license information for the exposed API.
    pub license: Option<LicenseObject>,
    /// The version of the document itself.
    pub version: Option<String>,
    /// Specification extensions.
    #[serde(flatten)]
    pub extensions: BTreeMap<String, Value>,
}

/// Contact information for the exposed API.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct ContactObject {
    /// The identifying name of the contact person/organization.
    pub name: Option<String>,
    /// The URL pointing to the contact information.
    pub url: Option<String>,
    /// The email address of the contact person/organization.
    pub email: Option<String>,
}

/// License information for the exposed API.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct LicenseObject {
    /// The license name used for the API.
    pub name: Option<String>,
    /// An SPDX license expression for the API.
    pub identifier: Option<String>,
    /// A URL to the license used for the API.
    pub url: Option<String>,
}

/// An object representing a Server.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct ServerObject {
    /// A URL to the target host (raw template, not resolved).
    pub url: Option<String>,
    /// An optional string describing the host.
    pub description: Option<String>,
    /// A map between a variable name and its value.
    #[serde(default)]
    pub variables: IndexMap<String, ServerVariableObject>,
}

/// An object representing a Server Variable for URL template substitution.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct ServerVariableObject {
    /// An enumeration of string values for the substitution.
    #[serde(rename = "enum")]
    pub enum_values: Option<Vec<String>>,
    /// The default value to use for substitution.
    pub default: Option<String>,
    /// An optional description for the server variable.
    pub description: Option<String>,
}

/// Adds metadata to a single tag used by operations.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct TagObject {
    /// The name of the tag.
    pub name: Option<String>,
    /// A description for the tag.
    pub description: Option<String>,
    /// Additional external documentation for this tag.
    #[serde(rename = "externalDocs")]
    pub external_docs: Option<ExternalDocumentationObject>,
}

/// Allows referencing an external resource for extended documentation.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct ExternalDocumentationObject {
    /// A description of the target documentation.
    pub description: Option<String>,
    /// The URL for the target documentation.
    pub url: Option<String>,
}

/// Holds the reusable objects of an OpenAPI 3.x document.
///
/// This bag is the resolution target for every local `$ref`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct ComponentsObject {
    /// Reusable Schema Objects.
    #[serde(default)]
    pub schemas: IndexMap<String, SchemaOrRef>,
    /// Reusable Response Objects.
    #[serde(default)]
    pub responses: IndexMap<String, ObjOrRef<ResponseObject>>,
    /// Reusable Parameter Objects.
    #[serde(default)]
    pub parameters: IndexMap<String, ObjOrRef<ParameterObject>>,
    /// Reusable Example Objects.
    #[serde(default)]
    pub examples: IndexMap<String, ObjOrRef<ExampleObject>>,
    /// Reusable Request Body Objects.
    #[serde(rename = "requestBodies", default)]
    pub request_bodies: IndexMap<String, ObjOrRef<RequestBodyObject>>,
    /// Reusable Header Objects.
    #[serde(default)]
    pub headers: IndexMap<String, ObjOrRef<HeaderObject>>,
    /// Reusable Security Scheme Objects (raw shape).
    #[serde(rename = "securitySchemes", default)]
    pub security_schemes: IndexMap<String, Value>,
    /// Reusable Link Objects.
    #[serde(default)]
    pub links: IndexMap<String, ObjOrRef<LinkObject>>,
    /// Reusable Callback Objects (raw shape).
    #[serde(default)]
    pub callbacks: IndexMap<String, Value>,
    /// Reusable Path Item Objects.
    #[serde(rename = "pathItems", default)]
    pub path_items: IndexMap<String, ObjOrRef<PathItemObject>>,
    /// Specification extensions.
    #[serde(flatten)]
    pub extensions: BTreeMap<String, Value>,
}

/// The HTTP methods a Path Item may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET.
    Get,
    /// PUT.
    Put,
    /// POST.
    Post,
    /// DELETE.
    Delete,
    /// OPTIONS.
    Options,
    /// HEAD.
    Head,
    /// PATCH.
    Patch,
    /// TRACE (OpenAPI 3 only).
    Trace,
}

impl Method {
    /// Every method, in emission order.
    pub const ALL: [Method; 8] = [
        Method::Get,
        Method::Put,
        Method::Post,
        Method::Delete,
        Method::Options,
        Method::Head,
        Method::Patch,
        Method::Trace,
    ];

    /// The lowercase method key as it appears in a document.
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "get",
            Method::Put => "put",
            Method::Post => "post",
            Method::Delete => "delete",
            Method::Options => "options",
            Method::Head => "head",
            Method::Patch => "patch",
            Method::Trace => "trace",
        }
    }

    /// Whether the method key is legal under the given document version.
    pub fn allowed_in(self, version: Version) -> bool {
        self != Method::Trace || version == Version::V3
    }
}

/// Describes the operations available on a single path.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct PathItemObject {
    /// A referenced definition of this path item.
    #[serde(rename = "$ref")]
    pub ref_path: Option<String>,
    /// Optional summary for all operations in this path.
    pub summary: Option<String>,
    /// Optional description for all operations in this path.
    pub description: Option<String>,
    /// GET operation.
    pub get: Option<OperationObject>,
    /// PUT operation.
    pub put: Option<OperationObject>,
    /// POST operation.
    pub post: Option<OperationObject>,
    /// DELETE operation.
    pub delete: Option<OperationObject>,
    /// OPTIONS operation.
    pub options: Option<OperationObject>,
    /// HEAD operation.
    pub head: Option<OperationObject>,
    /// PATCH operation.
    pub patch: Option<OperationObject>,
    /// TRACE operation (OpenAPI 3 only).
    pub trace: Option<OperationObject>,
    /// Alternative server array for this path item.
    pub servers: Option<Vec<ServerObject>>,
    /// Parameters common to all operations in this path.
    #[serde(default)]
    pub parameters: Vec<ObjOrRef<ParameterObject>>,
    /// Specification extensions.
    #[serde(flatten)]
    pub extensions: BTreeMap<String, Value>,
}

impl PathItemObject {
    /// Returns the operation stored under `method`, if any.
    pub fn operation(&self, method: Method) -> Option<&OperationObject> {
        match method {
            Method::Get => self.get.as_ref(),
            Method::Put => self.put.as_ref(),
            Method::Post => self.post.as_ref(),
            Method::Delete => self.delete.as_ref(),
            Method::Options => self.options.as_ref(),
            Method::Head => self.head.as_ref(),
            Method::Patch => self.patch.as_ref(),
            Method::Trace => self.trace.as_ref(),
        }
    }
}

/// Describes a single API operation on a path.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct OperationObject {
    /// Tags for documentation grouping.
    pub tags: Option<Vec<String>>,
    /// A short summary of what the operation does.
    pub summary: Option<String>,
    /// A verbose explanation of the operation behavior.
    pub description: Option<String>,
    /// Unique string identifying the operation.
    #[serde(rename = "operationId")]
    pub operation_id: Option<String>,
    /// Operation-specific parameters.
    #[serde(default)]
    pub parameters: Vec<ObjOrRef<ParameterObject>>,
    /// The request body (OpenAPI 3; Swagger 2 uses a body-typed parameter).
    #[serde(rename = "requestBody")]
    pub request_body: Option<ObjOrRef<RequestBodyObject>>,
    /// Possible responses keyed by status code or `default`.
    #[serde(default)]
    pub responses: IndexMap<String, ObjOrRef<ResponseObject>>,
    /// Whether the operation is deprecated.
    pub deprecated: Option<bool>,
    /// Operation-level security requirements (raw shape).
    pub security: Option<Vec<Value>>,
    /// Specification extensions.
    #[serde(flatten)]
    pub extensions: BTreeMap<String, Value>,
}

/// The location of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ParamLocation {
    /// Query string.
    Query,
    /// HTTP header.
    Header,
    /// Path template segment. Such parameters are always required.
    Path,
    /// Cookie (OpenAPI 3 only).
    Cookie,
    /// Form data (Swagger 2 only).
    FormData,
    /// Request body (Swagger 2 only).
    Body,
}

impl ParamLocation {
    /// The lowercase/camelCase key used when grouping parameters.
    pub fn as_str(self) -> &'static str {
        match self {
            ParamLocation::Query => "query",
            ParamLocation::Header => "header",
            ParamLocation::Path => "path",
            ParamLocation::Cookie => "cookie",
            ParamLocation::FormData => "formData",
            ParamLocation::Body => "body",
        }
    }
}

/// Describes a single operation parameter.
///
/// OpenAPI 3 parameters carry a `schema`; Swagger 2 parameters describe
/// their shape inline via `type` / `items` / `enum`, except `in: body`
/// parameters which carry a `schema` as well.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct ParameterObject {
    /// The case-sensitive parameter name.
    pub name: Option<String>,
    /// The location of the parameter.
    #[serde(rename = "in")]
    pub in_loc: Option<ParamLocation>,
    /// A brief description of the parameter.
    pub description: Option<String>,
    /// Whether the parameter is mandatory (forced for path parameters).
    pub required: Option<bool>,
    /// Whether the parameter is deprecated.
    pub deprecated: Option<bool>,
    /// The schema defining the parameter type (OpenAPI 3 and Swagger 2 body).
    pub schema: Option<SchemaOrRef>,
    /// Inline value type (Swagger 2 only).
    #[serde(rename = "type")]
    pub param_type: Option<String>,
    /// Inline array item shape (Swagger 2 only).
    pub items: Option<Box<SchemaOrRef>>,
    /// Inline enumeration of allowed values (Swagger 2 only).
    #[serde(rename = "enum")]
    pub enum_values: Option<Vec<Value>>,
    /// Specification extensions.
    #[serde(flatten)]
    pub extensions: BTreeMap<String, Value>,
}

/// A single media type entry inside `content`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct MediaTypeObject {
    /// The schema describing the payload for this media type.
    pub schema: Option<SchemaOrRef>,
    /// Specification extensions and unmodeled keys (examples, encoding).
    #[serde(flatten)]
    pub extensions: BTreeMap<String, Value>,
}

/// Describes a single response from an operation.
///
/// Swagger 2 responses carry a single `schema`; OpenAPI 3 responses carry a
/// media-type keyed `content` map. The two are kept distinct until emission
/// so that "missing content" keeps its version-specific meaning.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct ResponseObject {
    /// A description of the response.
    pub description: Option<String>,
    /// Response headers keyed by name.
    pub headers: Option<IndexMap<String, ObjOrRef<HeaderObject>>>,
    /// The response body shape (Swagger 2 only).
    pub schema: Option<SchemaOrRef>,
    /// The response body shapes keyed by media type (OpenAPI 3 only).
    pub content: Option<IndexMap<String, MediaTypeObject>>,
    /// Links to related operations (OpenAPI 3 only, raw shape exposure).
    pub links: Option<IndexMap<String, ObjOrRef<LinkObject>>>,
    /// Specification extensions.
    #[serde(flatten)]
    pub extensions: BTreeMap<String, Value>,
}

/// Describes a request body (OpenAPI 3 only).
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct RequestBodyObject {
    /// A description of the request body.
    pub description: Option<String>,
    /// Whether the body is required.
    pub required: Option<bool>,
    /// The body shapes keyed by media type.
    pub content: Option<IndexMap<String, MediaTypeObject>>,
    /// Specification extensions.
    #[serde(flatten)]
    pub extensions: BTreeMap<String, Value>,
}

/// Describes a response header. Extends a parameter, minus name/location.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct HeaderObject {
    /// Inline value type (Swagger 2 only).
    #[serde(rename = "type")]
    pub header_type: Option<String>,
    /// A description of the header.
    pub description: Option<String>,
    /// Whether the header is always present.
    pub required: Option<bool>,
    /// The schema defining the header type (OpenAPI 3).
    pub schema: Option<SchemaOrRef>,
    /// Specification extensions.
    #[serde(flatten)]
    pub extensions: BTreeMap<String, Value>,
}

/// An example of a schema or media type (carried, not typed).
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct ExampleObject {
    /// Short description for the example.
    pub summary: Option<String>,
    /// Long description for the example.
    pub description: Option<String>,
    /// The literal example value.
    pub value: Option<Value>,
    /// A URI pointing to the example value.
    #[serde(rename = "externalValue")]
    pub external_value: Option<String>,
}

/// A design-time link to another operation (raw shape exposure).
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct LinkObject {
    /// A URI reference to an operation.
    #[serde(rename = "operationRef")]
    pub operation_ref: Option<String>,
    /// The operationId of a linked operation.
    #[serde(rename = "operationId")]
    pub operation_id: Option<String>,
    /// A description of the link.
    pub description: Option<String>,
    /// Specification extensions and unmodeled keys.
    #[serde(flatten)]
    pub extensions: BTreeMap<String, Value>,
}

/// Whether a schema admits properties beyond those it declares.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    /// `true` admits arbitrary properties, `false` admits none.
    Flag(bool),
    /// Extra properties must match the given schema.
    Schema(Box<SchemaOrRef>),
}

/// The recursive type-description unit of a document.
///
/// A node with a non-empty `enum` is treated as a literal union regardless
/// of its `type`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct SchemaObject {
    /// Title (carried, not typed).
    pub title: Option<String>,
    /// Description, surfaced as a doc comment on emitted members.
    pub description: Option<String>,
    /// The value type; an absent type with property-ish fields means object.
    #[serde(rename = "type")]
    pub schema_type: Option<String>,
    /// Names of properties that are mandatory.
    pub required: Option<Vec<String>>,
    /// Ordered sequence of admissible literal values.
    #[serde(rename = "enum")]
    pub enum_values: Option<Vec<Value>>,
    /// Array item shape.
    pub items: Option<Box<SchemaOrRef>>,
    /// Intersection of the member schemas.
    #[serde(rename = "allOf")]
    pub all_of: Option<Vec<SchemaOrRef>>,
    /// Union of the member schemas (exactly one must match).
    #[serde(rename = "oneOf")]
    pub one_of: Option<Vec<SchemaOrRef>>,
    /// Union of the member schemas (at least one must match).
    #[serde(rename = "anyOf")]
    pub any_of: Option<Vec<SchemaOrRef>>,
    /// Named member shapes.
    pub properties: Option<IndexMap<String, SchemaOrRef>>,
    /// Default value, carried as metadata.
    pub default: Option<Value>,
    /// Index-signature policy for undeclared properties.
    #[serde(rename = "additionalProperties")]
    pub additional_properties: Option<AdditionalProperties>,
    /// Whether `null` is admissible (OpenAPI 3 only).
    pub nullable: Option<bool>,
    /// Value format hint (OpenAPI 3 only; carried, not typed).
    pub format: Option<String>,
    /// Minimum array length.
    #[serde(rename = "minItems")]
    pub min_items: Option<u64>,
    /// Maximum array length.
    #[serde(rename = "maxItems")]
    pub max_items: Option<u64>,
    /// Specification extensions and unmodeled keys.
    #[serde(flatten)]
    pub extensions: BTreeMap<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ref_wins_over_sibling_fields() {
        let node: SchemaOrRef = serde_json::from_value(json!({
            "$ref": "#/components/schemas/Pet",
            "description": "ignored"
        }))
        .unwrap();
        match node {
            ObjOrRef::Ref(r) => assert_eq!(r.target, "#/components/schemas/Pet"),
            ObjOrRef::Obj(_) => panic!("$ref sibling fields must not demote a reference"),
        }
    }

    #[test]
    fn test_schema_object_best_effort_fields() {
        let node: SchemaObject = serde_json::from_value(json!({
            "type": "array",
            "items": { "type": "integer" },
            "minItems": 2,
            "maxItems": 2,
            "x-internal": true
        }))
        .unwrap();
        assert_eq!(node.schema_type.as_deref(), Some("array"));
        assert_eq!(node.min_items, Some(2));
        assert_eq!(node.max_items, Some(2));
        assert_eq!(node.extensions.get("x-internal"), Some(&json!(true)));
    }

    #[test]
    fn test_document_version_detection() {
        let v2 = json!({ "swagger": "2.0", "definitions": {} });
        assert_eq!(
            Document::from_value(&v2, None).unwrap().version(),
            Version::V2
        );

        let v3 = json!({ "openapi": "3.0.3", "paths": {} });
        assert_eq!(
            Document::from_value(&v3, None).unwrap().version(),
            Version::V3
        );
    }

    #[test]
    fn test_document_ambiguous_version_rejected() {
        let both = json!({ "swagger": "2.0", "openapi": "3.0.0" });
        assert!(matches!(
            Document::from_value(&both, None),
            Err(TypegenError::Config(_))
        ));
    }

    #[test]
    fn test_document_missing_version_uses_declared() {
        let bare = json!({ "paths": {} });
        assert!(Document::from_value(&bare, None).is_err());
        assert_eq!(
            Document::from_value(&bare, Some(2)).unwrap().version(),
            Version::V2
        );
    }

    #[test]
    fn test_parameter_location_spelling() {
        let param: ParameterObject = serde_json::from_value(json!({
            "name": "file",
            "in": "formData",
            "type": "string"
        }))
        .unwrap();
        assert_eq!(param.in_loc, Some(ParamLocation::FormData));
    }

    #[test]
    fn test_additional_properties_variants() {
        let flag: AdditionalProperties = serde_json::from_value(json!(false)).unwrap();
        assert_eq!(flag, AdditionalProperties::Flag(false));

        let typed: AdditionalProperties =
            serde_json::from_value(json!({ "type": "string" })).unwrap();
        assert!(matches!(typed, AdditionalProperties::Schema(_)));
    }
}
