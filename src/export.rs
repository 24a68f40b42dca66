//! Swagger 2.0 export.
//!
//! Walks the type registry and resource models and produces a document
//! value; all file and network I/O stays with the caller. Constructs the
//! target format cannot carry (unions, header parameters) are omitted with a
//! diagnostic, never guessed at.

use crate::diagnostic::Diagnostic;
use crate::error::ExportError;
use crate::registry::TypeRegistry;
use crate::resource::{ParamKind, ResourceModel};
use crate::schema::{BaseType, Schema, StructDef, StructField, Type};
use crate::status::status_code;
use crate::swagger::{
    Doc, Operation, Parameter, Response, SchemaObject, APPLICATION_JSON, SWAGGER_VERSION,
};

/// Name of the synthetic error definition added to every exported document
/// that carries type definitions.
pub const RESOURCE_ERROR: &str = "ResourceError";

/// An exported document plus the diagnostics produced along the way.
#[derive(Debug)]
pub struct SwaggerExport {
    pub doc: Doc,
    pub diagnostics: Vec<Diagnostic>,
}

/// Export a schema to a Swagger 2.0 document value.
///
/// `base_prefix` replaces the default `/api` prefix of the derived base
/// path; a schema-declared base path overrides the derived one wholesale.
///
/// # Errors
///
/// Returns `ExportError` when a resource violates the one-body-parameter
/// invariant. Representational gaps are reported as diagnostics instead.
pub fn export_schema(
    schema: &Schema,
    base_prefix: Option<&str>,
) -> Result<SwaggerExport, ExportError> {
    let registry = TypeRegistry::new(schema);
    let mut diagnostics = Vec::new();

    let mut doc = Doc {
        swagger: SWAGGER_VERSION.to_string(),
        schemes: vec!["http".to_string()],
        ..Default::default()
    };

    let mut base_path = base_prefix.unwrap_or("/api").to_string();
    match schema.name.as_deref().filter(|n| !n.is_empty()) {
        Some(name) => {
            doc.info.title = format!("The {} API", name);
            base_path.push('/');
            base_path.push_str(name);
        }
        None => doc.info.title = "API".to_string(),
    }
    if let Some(version) = schema.version {
        doc.info.version = version.to_string();
        base_path.push_str("/v");
        base_path.push_str(&version.to_string());
    }
    if let Some(base) = schema.base.as_deref().filter(|b| !b.is_empty()) {
        base_path = base.to_string();
    }
    doc.base_path = Some(base_path);
    doc.info.description = schema.comment.clone();

    for resource in &schema.resources {
        let model = ResourceModel::new(resource)?;
        let context = format!("{} {}", resource.method, resource.path);
        let method = resource.method.to_lowercase();
        let item = doc.paths.entry(resource.path.clone()).or_default();
        let Some(slot) = item.slot_mut(&method) else {
            diagnostics.push(Diagnostic::warning(
                context,
                format!("method {} has no Swagger operation slot", resource.method),
            ));
            continue;
        };
        *slot = Some(operation(&registry, &model, &context, &mut diagnostics));
    }

    if !schema.types.is_empty() {
        for t in &schema.types {
            if let Some(def) = type_definition(&registry, t, &mut diagnostics) {
                doc.definitions.insert(t.name().to_string(), def);
            }
        }
        doc.definitions
            .insert(RESOURCE_ERROR.to_string(), resource_error_definition());
    }

    Ok(SwaggerExport { doc, diagnostics })
}

fn operation(
    registry: &TypeRegistry,
    model: &ResourceModel,
    context: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Operation {
    let resource = model.resource;
    let mut op = Operation {
        summary: resource.comment.clone(),
        // The schema has no tag taxonomy; the primary type groups operations.
        tags: vec![resource.type_ref.clone()],
        produces: vec![APPLICATION_JSON.to_string()],
        operation_id: Some(format!(
            "{}{}",
            resource.method.to_lowercase(),
            resource.type_ref
        )),
        ..Default::default()
    };
    if matches!(resource.method.as_str(), "POST" | "PUT") && model.body().is_some() {
        op.consumes = vec![APPLICATION_JSON.to_string()];
    }

    for param in &model.parameters {
        let input = param.input;
        let (location, name) = match &param.kind {
            ParamKind::Path => ("path", input.name.clone()),
            // The wire name is the external query key.
            ParamKind::Query(key) => ("query", key.clone()),
            ParamKind::Header(header) => {
                diagnostics.push(Diagnostic::warning(
                    context,
                    format!(
                        "header parameter {} ({}) has no Swagger equivalent, dropped",
                        input.name, header
                    ),
                ));
                continue;
            }
            ParamKind::Body => ("body", input.name.clone()),
        };
        let mut p = Parameter {
            name,
            location: location.to_string(),
            description: input.comment.clone(),
            required: param.required,
            ..Default::default()
        };
        match type_mapping(registry, &input.type_ref) {
            TypeMapping::Primitive { schema_type, format } => {
                p.param_type = Some(schema_type.to_string());
                p.format = format;
            }
            TypeMapping::Ref(schema) => p.schema = Some(schema),
        }
        if matches!(&param.kind, ParamKind::Query(key) if key.contains("[]")) {
            p.collection_format = Some("multi".to_string());
        }
        op.parameters.push(p);
    }

    for (code, entry) in &model.responses {
        op.responses.insert(
            status_code(code).to_string(),
            Response {
                description: entry.description.clone(),
                schema: entry.type_ref.map(SchemaObject::reference),
            },
        );
    }
    op
}

/// The fixed primitive mapping shared by parameters, struct properties, and
/// collection element types.
pub(crate) enum TypeMapping {
    Primitive {
        schema_type: &'static str,
        format: Option<String>,
    },
    Ref(SchemaObject),
}

pub(crate) fn type_mapping(registry: &TypeRegistry, name: &str) -> TypeMapping {
    fn primitive(schema_type: &'static str, format: Option<&str>) -> TypeMapping {
        TypeMapping::Primitive {
            schema_type,
            format: format.map(str::to_string),
        }
    }
    match registry.find_base_type(name) {
        Some(BaseType::Int8) => primitive("string", Some("byte")),
        // The format is the referenced type name, not the base category, so
        // a subtype keeps its identity as a format hint.
        Some(BaseType::Int16 | BaseType::Int32 | BaseType::Int64) => {
            primitive("integer", Some(&name.to_lowercase()))
        }
        Some(BaseType::Float32) => primitive("number", Some("float")),
        Some(BaseType::Float64) => primitive("number", Some("double")),
        Some(BaseType::String) => primitive("string", None),
        Some(BaseType::Timestamp) => primitive("string", Some("date-time")),
        Some(BaseType::Uuid | BaseType::Symbol) => {
            primitive("string", Some(&name.to_lowercase()))
        }
        // Structural categories and unresolved references both fall back to
        // an opaque reference.
        _ => TypeMapping::Ref(SchemaObject::reference(name)),
    }
}

fn inline_schema(registry: &TypeRegistry, name: &str) -> SchemaObject {
    match type_mapping(registry, name) {
        TypeMapping::Primitive { schema_type, format } => {
            SchemaObject::primitive(schema_type, format)
        }
        TypeMapping::Ref(schema) => schema,
    }
}

fn type_definition<'a>(
    registry: &TypeRegistry<'a>,
    t: &'a Type,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<SchemaObject> {
    match t {
        Type::Struct(def) => Some(struct_definition(registry, t, def)),
        Type::Array(_) => {
            let mut st = SchemaObject::primitive("array", None);
            if let Some(items) = registry.effective_items(t).filter(|i| *i != "Any") {
                st.items = Some(Box::new(inline_schema(registry, items)));
            }
            st.min_items = registry.effective_min_size(t);
            st.max_items = registry.effective_max_size(t);
            Some(st)
        }
        Type::Map(_) => {
            let mut st = SchemaObject::primitive("object", None);
            if let Some(items) = registry.effective_items(t).filter(|i| *i != "Any") {
                st.additional_properties = Some(Box::new(inline_schema(registry, items)));
            }
            st.min_properties = registry.effective_min_size(t);
            st.max_properties = registry.effective_max_size(t);
            Some(st)
        }
        Type::Enum(def) => {
            let mut st = SchemaObject::default();
            st.enum_values = def.elements.iter().map(|e| e.symbol.clone()).collect();
            Some(st)
        }
        Type::Union(def) => {
            diagnostics.push(Diagnostic::warning(
                def.name.clone(),
                "unions cannot be represented in Swagger 2.0, definition omitted",
            ));
            None
        }
        // String, number, and bytes subtypes map inline at each use; they
        // produce no standalone definition.
        Type::Base(_) | Type::Alias(_) | Type::String(_) | Type::Number(_) | Type::Bytes(_) => {
            None
        }
    }
}

fn struct_definition<'a>(registry: &TypeRegistry<'a>, t: &'a Type, def: &StructDef) -> SchemaObject {
    let mut st = SchemaObject::default();
    st.description = def.comment.clone();
    let mut required = Vec::new();
    // The full field surface, inherited fields first.
    for flattened in registry.flattened_fields(t) {
        let field = flattened.field;
        if !field.optional && !required.contains(&field.name) {
            required.push(field.name.clone());
        }
        st.properties
            .insert(field.name.clone(), field_property(registry, field));
    }
    st.required = required;
    st
}

fn field_property(registry: &TypeRegistry, field: &StructField) -> SchemaObject {
    let mut prop = match registry.find_base_type(&field.type_ref) {
        Some(BaseType::Array) => {
            let mut prop = SchemaObject::primitive("array", None);
            if let Some(items) = field_items(registry, field) {
                prop.items = Some(Box::new(inline_schema(registry, &items)));
            }
            prop
        }
        Some(BaseType::Map) => {
            let mut prop = SchemaObject::primitive("object", None);
            if let Some(items) = field_items(registry, field) {
                prop.additional_properties = Some(Box::new(inline_schema(registry, &items)));
            }
            prop
        }
        _ => inline_schema(registry, &field.type_ref),
    };
    prop.description = field.comment.clone();
    prop.default_value = field.default.clone();
    prop
}

/// Element type for a collection field: the field's own override, falling
/// back to the referenced collection typedef's (inherited) element type.
fn field_items(registry: &TypeRegistry, field: &StructField) -> Option<String> {
    let items = match &field.items {
        Some(items) => Some(items.clone()),
        None => registry
            .find_type(&field.type_ref)
            .and_then(|t| registry.effective_items(t))
            .map(str::to_string),
    };
    items.filter(|i| *i != "Any")
}

fn resource_error_definition() -> SchemaObject {
    let mut st = SchemaObject::default();
    st.properties.insert(
        "code".to_string(),
        SchemaObject::primitive("integer", Some("int32".to_string())),
    );
    st.properties
        .insert("message".to_string(), SchemaObject::primitive("string", None));
    st.required = vec!["code".to_string(), "message".to_string()];
    st
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema(v: serde_json::Value) -> Schema {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn unnamed_schema_gets_generic_title() {
        let out = export_schema(&Schema::default(), None).unwrap();
        assert_eq!(out.doc.info.title, "API");
        assert_eq!(out.doc.base_path.as_deref(), Some("/api"));
    }

    #[test]
    fn named_versioned_base_path() {
        let s = schema(json!({ "name": "pets", "version": 3 }));
        let out = export_schema(&s, None).unwrap();
        assert_eq!(out.doc.info.title, "The pets API");
        assert_eq!(out.doc.info.version, "3");
        assert_eq!(out.doc.base_path.as_deref(), Some("/api/pets/v3"));
    }

    #[test]
    fn declared_base_overrides_derived() {
        let s = schema(json!({ "name": "pets", "version": 3, "base": "/petstore/v2" }));
        let out = export_schema(&s, None).unwrap();
        assert_eq!(out.doc.base_path.as_deref(), Some("/petstore/v2"));
    }

    #[test]
    fn base_prefix_replaces_api() {
        let s = schema(json!({ "name": "pets" }));
        let out = export_schema(&s, Some("/svc")).unwrap();
        assert_eq!(out.doc.base_path.as_deref(), Some("/svc/pets"));
    }

    #[test]
    fn primitive_mapping_table() {
        let s = schema(json!({ "types": [
            { "String": { "name": "Name", "type": "String" } },
            { "Number": { "name": "Count", "type": "Int64" } }
        ] }));
        let registry = TypeRegistry::new(&s);

        let expect_primitive = |name: &str, ty: &str, format: Option<&str>| {
            match type_mapping(&registry, name) {
                TypeMapping::Primitive { schema_type, format: f } => {
                    assert_eq!(schema_type, ty, "type for {}", name);
                    assert_eq!(f.as_deref(), format, "format for {}", name);
                }
                TypeMapping::Ref(_) => panic!("expected primitive mapping for {}", name),
            }
        };
        expect_primitive("Int8", "string", Some("byte"));
        expect_primitive("Int32", "integer", Some("int32"));
        expect_primitive("Count", "integer", Some("count"));
        expect_primitive("Float32", "number", Some("float"));
        expect_primitive("Float64", "number", Some("double"));
        expect_primitive("String", "string", None);
        expect_primitive("Name", "string", None);
        expect_primitive("Timestamp", "string", Some("date-time"));
        expect_primitive("UUID", "string", Some("uuid"));
        expect_primitive("Symbol", "string", Some("symbol"));

        match type_mapping(&registry, "Unknowable") {
            TypeMapping::Ref(obj) => {
                assert_eq!(obj.reference_name(), Some("Unknowable"));
            }
            TypeMapping::Primitive { .. } => panic!("unknown names fall back to $ref"),
        }
    }

    #[test]
    fn resource_error_always_present_with_types() {
        let s = schema(json!({ "types": [
            { "String": { "name": "Name", "type": "String" } }
        ] }));
        let out = export_schema(&s, None).unwrap();
        let err = &out.doc.definitions[RESOURCE_ERROR];
        assert_eq!(err.required, ["code", "message"]);
        assert_eq!(
            err.properties["code"].format.as_deref(),
            Some("int32")
        );
    }

    #[test]
    fn no_types_no_definitions() {
        let out = export_schema(&Schema::default(), None).unwrap();
        assert!(out.doc.definitions.is_empty());
    }
}
