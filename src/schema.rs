//! RSDL schema data model.
//!
//! A [`Schema`] is a named, versioned collection of type definitions and
//! HTTP-style resource definitions, decoded from a closed JSON shape. Types
//! form a single-parent derivation hierarchy referenced by name; the chain is
//! resolved on demand by [`crate::registry::TypeRegistry`] rather than linked
//! up front.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// Vendor extension annotations (`x-` prefixed names), the side-channel for
/// information the Swagger format cannot natively carry.
pub type Annotations = BTreeMap<String, String>;

/// The built-in primitive and structural categories every user type
/// ultimately derives from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BaseType {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    Bytes,
    String,
    Timestamp,
    Symbol,
    #[serde(rename = "UUID")]
    Uuid,
    Array,
    Map,
    Struct,
    Enum,
    Union,
    Any,
}

impl BaseType {
    /// Every base type, in declaration order.
    pub const ALL: [BaseType; 18] = [
        BaseType::Bool,
        BaseType::Int8,
        BaseType::Int16,
        BaseType::Int32,
        BaseType::Int64,
        BaseType::Float32,
        BaseType::Float64,
        BaseType::Bytes,
        BaseType::String,
        BaseType::Timestamp,
        BaseType::Symbol,
        BaseType::Uuid,
        BaseType::Array,
        BaseType::Map,
        BaseType::Struct,
        BaseType::Enum,
        BaseType::Union,
        BaseType::Any,
    ];

    /// The type name as it appears in schema `type` references.
    pub fn name(&self) -> &'static str {
        match self {
            BaseType::Bool => "Bool",
            BaseType::Int8 => "Int8",
            BaseType::Int16 => "Int16",
            BaseType::Int32 => "Int32",
            BaseType::Int64 => "Int64",
            BaseType::Float32 => "Float32",
            BaseType::Float64 => "Float64",
            BaseType::Bytes => "Bytes",
            BaseType::String => "String",
            BaseType::Timestamp => "Timestamp",
            BaseType::Symbol => "Symbol",
            BaseType::Uuid => "UUID",
            BaseType::Array => "Array",
            BaseType::Map => "Map",
            BaseType::Struct => "Struct",
            BaseType::Enum => "Enum",
            BaseType::Union => "Union",
            BaseType::Any => "Any",
        }
    }

    /// Look up a base type by its reference name.
    pub fn from_name(name: &str) -> Option<BaseType> {
        BaseType::ALL.iter().copied().find(|b| b.name() == name)
    }
}

/// A type definition: one variant per RSDL type category, plus the implicit
/// [`Base`](Type::Base) leaf the registry synthesizes for built-ins.
///
/// Every non-base variant carries its own name and the name of the immediate
/// supertype it derives from; following `type` references always terminates
/// at a base type in a well-formed schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Type {
    Base(BaseType),
    Alias(AliasDef),
    String(StringDef),
    Number(NumberDef),
    Bytes(BytesDef),
    Array(ArrayDef),
    Map(MapDef),
    Struct(StructDef),
    Enum(EnumDef),
    Union(UnionDef),
}

impl Type {
    /// The type's declared name.
    pub fn name(&self) -> &str {
        match self {
            Type::Base(b) => b.name(),
            Type::Alias(d) => &d.name,
            Type::String(d) => &d.name,
            Type::Number(d) => &d.name,
            Type::Bytes(d) => &d.name,
            Type::Array(d) => &d.name,
            Type::Map(d) => &d.name,
            Type::Struct(d) => &d.name,
            Type::Enum(d) => &d.name,
            Type::Union(d) => &d.name,
        }
    }

    /// The name of the immediate supertype this type derives from.
    ///
    /// For a base type this is its own name — the fixed point that terminates
    /// derivation chains.
    pub fn type_ref(&self) -> &str {
        match self {
            Type::Base(b) => b.name(),
            Type::Alias(d) => &d.type_ref,
            Type::String(d) => &d.type_ref,
            Type::Number(d) => &d.type_ref,
            Type::Bytes(d) => &d.type_ref,
            Type::Array(d) => &d.type_ref,
            Type::Map(d) => &d.type_ref,
            Type::Struct(d) => &d.type_ref,
            Type::Enum(d) => &d.type_ref,
            Type::Union(d) => &d.type_ref,
        }
    }

    pub fn comment(&self) -> Option<&str> {
        match self {
            Type::Base(_) => None,
            Type::Alias(d) => d.comment.as_deref(),
            Type::String(d) => d.comment.as_deref(),
            Type::Number(d) => d.comment.as_deref(),
            Type::Bytes(d) => d.comment.as_deref(),
            Type::Array(d) => d.comment.as_deref(),
            Type::Map(d) => d.comment.as_deref(),
            Type::Struct(d) => d.comment.as_deref(),
            Type::Enum(d) => d.comment.as_deref(),
            Type::Union(d) => d.comment.as_deref(),
        }
    }
}

/// A pure rename of another type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AliasDef {
    pub name: String,
    #[serde(rename = "type")]
    pub type_ref: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: Annotations,
}

/// A string subtype, optionally constrained by pattern, value set, or size.
///
/// Absent constraints inherit from the ancestor chain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StringDef {
    pub name: String,
    #[serde(rename = "type")]
    pub type_ref: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_size: Option<u32>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: Annotations,
}

/// A numeric subtype with optional range bounds.
///
/// Bounds are kept as JSON numbers so integer bounds survive round trips
/// without a float detour.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NumberDef {
    pub name: String,
    #[serde(rename = "type")]
    pub type_ref: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<Number>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: Annotations,
}

/// A byte-sequence subtype with optional size bounds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BytesDef {
    pub name: String,
    #[serde(rename = "type")]
    pub type_ref: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_size: Option<u32>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: Annotations,
}

/// An array subtype. `items` of `None` (or `"Any"`) means unconstrained
/// element types.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArrayDef {
    pub name: String,
    #[serde(rename = "type")]
    pub type_ref: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_size: Option<u32>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: Annotations,
}

/// A map subtype keyed by `keys` (a string-category type) holding `items`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MapDef {
    pub name: String,
    #[serde(rename = "type")]
    pub type_ref: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keys: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_size: Option<u32>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: Annotations,
}

/// A struct subtype with an ordered field list.
///
/// Deriving from another struct concatenates field lists (ancestor fields
/// first); there is no field-name overriding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StructDef {
    pub name: String,
    #[serde(rename = "type")]
    pub type_ref: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<StructField>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: Annotations,
}

/// One struct field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StructField {
    pub name: String,
    #[serde(rename = "type")]
    pub type_ref: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub optional: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Element type override for collection-typed fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<String>,
    /// Key type override for map-typed fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keys: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: Annotations,
}

/// An enumeration of symbols.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnumDef {
    pub name: String,
    #[serde(rename = "type")]
    pub type_ref: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub elements: Vec<EnumElement>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: Annotations,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnumElement {
    pub symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// A tagged union over an ordered list of variant type references.
///
/// Unions have no Swagger 2.0 equivalent; the exporter omits them with a
/// diagnostic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UnionDef {
    pub name: String,
    #[serde(rename = "type")]
    pub type_ref: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: Annotations,
}

/// One HTTP-style operation definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Resource {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// The resource's primary output type.
    #[serde(rename = "type")]
    pub type_ref: String,
    pub method: String,
    /// Path template with `{name}` placeholders.
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub inputs: Vec<ResourceInput>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub outputs: Vec<ResourceOutput>,
    /// Symbolic status code of the expected response.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub expected: String,
    /// Other symbolic codes sharing the primary type.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<String>,
    /// Error responses, keyed by symbolic (or numeric) status code.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub exceptions: BTreeMap<String, ExceptionDef>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: Annotations,
}

impl Resource {
    /// The expected symbolic status code, defaulting to `OK` when the schema
    /// leaves it unset.
    pub fn expected_or_default(&self) -> &str {
        if self.expected.is_empty() {
            "OK"
        } else {
            &self.expected
        }
    }
}

/// One declared resource input parameter.
///
/// Classification (path / query / header / body) is derived from which of
/// `path_param`, `query_param`, and `header` is set, in that priority.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResourceInput {
    pub name: String,
    #[serde(rename = "type")]
    pub type_ref: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub path_param: bool,
    /// External query key; the wire name may differ from `name`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_param: Option<String>,
    /// HTTP header name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub optional: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: Annotations,
}

/// A response-header binding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResourceOutput {
    pub name: String,
    #[serde(rename = "type")]
    pub type_ref: String,
    pub header: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub optional: bool,
}

/// An error response: a distinct exception type plus an optional comment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExceptionDef {
    #[serde(rename = "type")]
    pub type_ref: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// The top-level IDL document: named types plus pathed resources.
///
/// Immutable once decoded or imported; the registry and resource model are
/// read-only views over it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Schema {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Explicit base path, overriding the derived `/api/...` default on
    /// export.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<Type>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<Resource>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn base_type_names_round_trip() {
        for b in BaseType::ALL {
            assert_eq!(BaseType::from_name(b.name()), Some(b));
        }
        assert_eq!(BaseType::from_name("NotAType"), None);
    }

    #[test]
    fn uuid_name_is_uppercase() {
        assert_eq!(BaseType::Uuid.name(), "UUID");
    }

    #[test]
    fn type_decodes_from_tagged_json() {
        let t: Type = serde_json::from_value(json!({
            "String": {
                "name": "Name",
                "type": "String",
                "maxSize": 64
            }
        }))
        .unwrap();
        assert_eq!(t.name(), "Name");
        assert_eq!(t.type_ref(), "String");
        match t {
            Type::String(d) => assert_eq!(d.max_size, Some(64)),
            other => panic!("expected String variant, got {:?}", other),
        }
    }

    #[test]
    fn struct_field_defaults() {
        let t: Type = serde_json::from_value(json!({
            "Struct": {
                "name": "Pet",
                "type": "Struct",
                "fields": [
                    { "name": "name", "type": "String" },
                    { "name": "age", "type": "Int32", "optional": true }
                ]
            }
        }))
        .unwrap();
        let Type::Struct(def) = t else {
            panic!("expected Struct variant")
        };
        assert!(!def.fields[0].optional);
        assert!(def.fields[1].optional);
    }

    #[test]
    fn serialization_skips_absent_fields() {
        let t = Type::String(StringDef {
            name: "Name".into(),
            type_ref: "String".into(),
            ..Default::default()
        });
        let v = serde_json::to_value(&t).unwrap();
        assert_eq!(v, json!({ "String": { "name": "Name", "type": "String" } }));
    }

    #[test]
    fn schema_round_trips_through_json() {
        let schema: Schema = serde_json::from_value(json!({
            "name": "petstore",
            "version": 2,
            "types": [
                { "Struct": { "name": "Pet", "type": "Struct",
                    "fields": [{ "name": "name", "type": "String" }] } }
            ],
            "resources": [
                { "type": "Pet", "method": "GET", "path": "/pets/{id}",
                  "expected": "OK",
                  "inputs": [{ "name": "id", "type": "String", "pathParam": true }] }
            ]
        }))
        .unwrap();
        let encoded = serde_json::to_value(&schema).unwrap();
        let decoded: Schema = serde_json::from_value(encoded).unwrap();
        assert_eq!(schema, decoded);
    }

    #[test]
    fn expected_defaults_to_ok() {
        let r = Resource::default();
        assert_eq!(r.expected_or_default(), "OK");
    }
}
