//! Swagger 2.0 import.
//!
//! Reconstructs a schema from a document, synthesizing named types where
//! inline property constraints cannot be expressed as plain field types.
//! Vendor `x-*` extensions become free-form annotations, the side-channel
//! that keeps re-export close to lossless.

use std::collections::BTreeMap;

use heck::ToUpperCamelCase;
use serde_json::Value;

use crate::diagnostic::Diagnostic;
use crate::export::RESOURCE_ERROR;
use crate::schema::{
    Annotations, ArrayDef, EnumDef, EnumElement, ExceptionDef, NumberDef, Resource,
    ResourceInput, Schema, StringDef, StructDef, StructField, Type,
};
use crate::status::status_symbol;
use crate::swagger::{Doc, Operation, SchemaObject, APPLICATION_JSON};

/// An imported schema plus the diagnostics produced along the way.
#[derive(Debug)]
pub struct SchemaImport {
    pub schema: Schema,
    pub diagnostics: Vec<Diagnostic>,
}

/// Reconstruct a schema from a Swagger 2.0 document.
///
/// `fallback_name` names the schema when the document title does not match
/// the exporter's `"The {name} API"` convention; callers usually derive it
/// from the source filename.
pub fn import_document(doc: &Doc, fallback_name: &str) -> SchemaImport {
    let mut diagnostics = Vec::new();
    let mut schema = Schema::default();

    let name = doc
        .info
        .title
        .strip_prefix("The ")
        .and_then(|t| t.strip_suffix(" API"))
        .unwrap_or(fallback_name);
    if !name.is_empty() {
        schema.name = Some(name.to_string());
    }
    schema.comment = nonempty(doc.info.description.as_deref());
    if !doc.info.version.is_empty() {
        match doc.info.version.parse::<i32>() {
            Ok(v) => schema.version = Some(v),
            Err(_) => diagnostics.push(Diagnostic::warning(
                "info.version",
                format!(
                    "version is not an integer, ignoring it: {:?}",
                    doc.info.version
                ),
            )),
        }
    }
    if let Some(base) = doc.base_path.as_deref().filter(|b| !b.is_empty()) {
        schema.base = Some(base.to_string());
    }

    for (name, def) in &doc.definitions {
        import_type(&mut schema.types, name, def, false, &mut diagnostics);
    }
    for (path, item) in &doc.paths {
        for (method, op) in item.operations() {
            schema
                .resources
                .push(import_resource(path, method, op, &mut diagnostics));
        }
    }

    SchemaImport {
        schema,
        diagnostics,
    }
}

fn import_type(
    out: &mut Vec<Type>,
    raw_name: &str,
    def: &SchemaObject,
    from_field: bool,
    diagnostics: &mut Vec<Diagnostic>,
) {
    // The exporter's synthetic error shape, not a schema type.
    if raw_name == RESOURCE_ERROR {
        return;
    }
    let name = camelize(raw_name);
    // A promoted field type does not inherit the field description.
    let comment = if from_field {
        None
    } else {
        nonempty(def.description.as_deref())
    };

    let schema_type = match def.schema_type.as_deref() {
        Some(t) => Some(t),
        None if !def.properties.is_empty() => Some("object"),
        None if def.items.is_some() => Some("array"),
        None => None,
    };

    match schema_type {
        Some("object") => import_struct(out, name, comment, def, from_field, diagnostics),
        Some("string") if !def.enum_values.is_empty() => {
            out.push(Type::Enum(EnumDef {
                name,
                type_ref: "Enum".to_string(),
                comment,
                // The document carries no per-element comments.
                elements: def
                    .enum_values
                    .iter()
                    .map(|symbol| EnumElement {
                        symbol: symbol.clone(),
                        comment: None,
                    })
                    .collect(),
                annotations: Annotations::new(),
            }));
        }
        Some("string") => {
            let mut annotations = Annotations::new();
            extension_annotations(def, &mut annotations);
            if !from_field {
                example_annotation(def, &mut annotations);
            }
            out.push(Type::String(StringDef {
                name,
                type_ref: "String".to_string(),
                comment,
                pattern: def.pattern.clone(),
                min_size: def.min_length,
                max_size: def.max_length,
                annotations,
                ..Default::default()
            }));
        }
        Some("integer") => out.push(Type::Number(number_def(
            name,
            "Int32",
            comment,
            def,
            from_field,
            diagnostics,
        ))),
        Some("number") => out.push(Type::Number(number_def(
            name,
            "Float64",
            comment,
            def,
            from_field,
            diagnostics,
        ))),
        Some("array") => {
            let mut annotations = Annotations::new();
            extension_annotations(def, &mut annotations);
            example_annotation(def, &mut annotations);
            out.push(Type::Array(ArrayDef {
                name,
                type_ref: "Array".to_string(),
                comment,
                items: def.items.as_deref().and_then(schema_type_name),
                min_size: def.min_items,
                max_size: def.max_items,
                annotations,
            }));
        }
        other => diagnostics.push(Diagnostic::warning(
            name,
            format!("unsupported definition type {:?}, skipped", other),
        )),
    }
}

fn import_struct(
    out: &mut Vec<Type>,
    name: String,
    comment: Option<String>,
    def: &SchemaObject,
    from_field: bool,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let mut fields = Vec::with_capacity(def.properties.len());
    for (field_name, field_def) in &def.properties {
        let optional = !def.required.contains(field_name);
        let type_ref = match requires_type_def(field_def) {
            // Inline constraints cannot live on a field; promote them into
            // a named type and reference it.
            true => {
                let promoted = format!("{}_{}", name, field_name.to_upper_camel_case());
                import_type(out, &promoted, field_def, true, diagnostics);
                promoted
            }
            false => schema_type_name(field_def).unwrap_or_else(|| "Any".to_string()),
        };
        let mut field = StructField {
            name: field_name.clone(),
            type_ref,
            optional,
            default: field_def.default_value.clone(),
            comment: nonempty(field_def.description.as_deref()),
            ..Default::default()
        };
        example_annotation(field_def, &mut field.annotations);
        fields.push(field);
    }

    let mut annotations = Annotations::new();
    if !from_field {
        example_annotation(def, &mut annotations);
    }
    out.push(Type::Struct(StructDef {
        name,
        type_ref: "Struct".to_string(),
        comment,
        fields,
        annotations,
    }));
}

fn number_def(
    name: String,
    base: &str,
    comment: Option<String>,
    def: &SchemaObject,
    from_field: bool,
    diagnostics: &mut Vec<Diagnostic>,
) -> NumberDef {
    let mut out = NumberDef {
        name,
        type_ref: base.to_string(),
        comment,
        min: def.minimum.clone(),
        max: def.maximum.clone(),
        annotations: Annotations::new(),
    };
    if let Some(Value::Object(constraints)) = def.extensions.get("x-constraint") {
        for (key, value) in constraints {
            if key == "positive" {
                if value == &Value::Bool(true) && out.min.is_none() {
                    out.min = Some(0.into());
                }
            } else {
                diagnostics.push(Diagnostic::warning(
                    out.name.clone(),
                    format!("unknown numeric constraint {:?}, ignored", key),
                ));
            }
        }
    }
    if !from_field {
        example_annotation(def, &mut out.annotations);
    }
    out
}

fn import_resource(
    path: &str,
    method: &str,
    op: &Operation,
    diagnostics: &mut Vec<Diagnostic>,
) -> Resource {
    let context = format!("{} {}", method, path);

    let mut primary: Option<String> = None;
    let mut expected: Option<String> = None;
    let mut alternatives: Vec<String> = Vec::new();
    let mut exceptions: BTreeMap<String, ExceptionDef> = BTreeMap::new();

    if let Some(resp) = op.responses.get("default") {
        if let Some(t) = resp.schema.as_ref().and_then(schema_type_name) {
            primary = Some(t);
            expected = Some("OK".to_string());
        }
    }
    for (code, resp) in &op.responses {
        if code == "default" {
            continue;
        }
        let type_name = resp.schema.as_ref().and_then(schema_type_name);
        let symbol = status_symbol(code)
            .map(str::to_string)
            .unwrap_or_else(|| code.clone());
        if code.starts_with('4') || code.starts_with('5') {
            // Error codes never claim the expected slot.
            match (&primary, type_name) {
                (Some(p), Some(t)) if *p == t => alternatives.push(symbol),
                (_, Some(t)) => {
                    exceptions.insert(
                        code.clone(),
                        ExceptionDef {
                            type_ref: t,
                            comment: None,
                        },
                    );
                }
                (_, None) => alternatives.push(symbol),
            }
            continue;
        }
        match type_name {
            Some(t) => {
                if primary.is_none() || primary.as_deref() == Some(t.as_str()) {
                    primary.get_or_insert(t);
                    if expected.is_none() {
                        expected = Some(symbol);
                    } else if expected.as_deref() != Some(symbol.as_str()) {
                        alternatives.push(symbol);
                    }
                } else {
                    exceptions.insert(
                        code.clone(),
                        ExceptionDef {
                            type_ref: t,
                            comment: None,
                        },
                    );
                }
            }
            None => {
                // Body-less success response (e.g. 204).
                if expected.is_none() {
                    expected = Some(symbol);
                } else if expected.as_deref() != Some(symbol.as_str()) {
                    alternatives.push(symbol);
                }
            }
        }
    }

    // The primary type is unrecoverable when no response carries a schema.
    let type_ref = primary.unwrap_or_else(|| "Any".to_string());

    for produced in &op.produces {
        if produced != APPLICATION_JSON {
            diagnostics.push(Diagnostic::warning(
                context.clone(),
                format!("unexpected produces media type: {}", produced),
            ));
        }
    }

    let mut inputs = Vec::new();
    for param in &op.parameters {
        let param_type = param
            .schema
            .as_ref()
            .and_then(schema_type_name)
            .or_else(|| param.param_type.as_deref().map(camelize))
            .unwrap_or_else(|| "Any".to_string());
        let mut input = ResourceInput {
            name: param.name.clone(),
            type_ref: param_type,
            comment: nonempty(param.description.as_deref()),
            optional: !param.required,
            ..Default::default()
        };
        match param.location.as_str() {
            "path" => input.path_param = true,
            // The internal name doubles as the external query key.
            "query" => input.query_param = Some(param.name.clone()),
            "body" => {}
            other => {
                diagnostics.push(Diagnostic::warning(
                    context.clone(),
                    format!(
                        "unsupported parameter location {:?} for {}, skipped",
                        other, param.name
                    ),
                ));
                continue;
            }
        }
        inputs.push(input);
    }

    let mut annotations = Annotations::new();
    if !op.tags.is_empty() {
        annotations.insert("x-tags".to_string(), op.tags.join(","));
    }

    // Keep a declared operation id only when it differs from the exporter's
    // derived default.
    let default_id = format!("{}{}", method.to_lowercase(), type_ref);
    let name = op
        .operation_id
        .as_ref()
        .filter(|id| **id != default_id)
        .cloned();

    Resource {
        name,
        type_ref,
        method: method.to_string(),
        path: path.to_string(),
        comment: nonempty(op.summary.as_deref()),
        inputs,
        expected: expected.unwrap_or_else(|| "OK".to_string()),
        alternatives,
        exceptions,
        annotations,
        ..Default::default()
    }
}

/// The schema-model name a document schema object refers to: a definition
/// reference by name, or a primitive mapped onto its base type.
fn schema_type_name(obj: &SchemaObject) -> Option<String> {
    if let Some(name) = obj.reference_name() {
        return Some(camelize(name));
    }
    obj.schema_type.as_deref().map(camelize)
}

/// A property whose shape carries constraints cannot be referenced as a
/// plain field type; it must be promoted into a named type.
fn requires_type_def(def: &SchemaObject) -> bool {
    def.pattern.is_some()
        || def.extensions.contains_key("x-constraint")
        || def.extensions.contains_key("x-format")
        || def.max_length.is_some()
        || def.min_length.is_some()
        || def.maximum.is_some()
        || def.minimum.is_some()
        || def.min_items.is_some()
        || def.max_items.is_some()
        || !def.enum_values.is_empty()
}

fn camelize(raw: &str) -> String {
    match raw {
        "string" => "String".to_string(),
        "integer" => "Int32".to_string(),
        "number" => "Float64".to_string(),
        "boolean" => "Bool".to_string(),
        "array" => "Array".to_string(),
        "object" => "Struct".to_string(),
        other if other.contains(' ') => other.to_upper_camel_case(),
        other => other.to_string(),
    }
}

/// Copy `x-constraint` and `x-format` extension objects into flat
/// annotations (`x-constraint-<key>`, `x-format-<key>`).
fn extension_annotations(def: &SchemaObject, annotations: &mut Annotations) {
    for (extension, prefix) in [("x-constraint", "x-constraint-"), ("x-format", "x-format-")] {
        if let Some(Value::Object(map)) = def.extensions.get(extension) {
            for (key, value) in map {
                annotations.insert(format!("{}{}", prefix, key), annotation_value(value));
            }
        }
    }
}

fn example_annotation(def: &SchemaObject, annotations: &mut Annotations) {
    if let Some(example) = &def.example {
        annotations.insert("x-example".to_string(), annotation_value(example));
    }
}

fn annotation_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn nonempty(s: Option<&str>) -> Option<String> {
    s.filter(|s| !s.is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn camelize_maps_primitive_names() {
        assert_eq!(camelize("string"), "String");
        assert_eq!(camelize("integer"), "Int32");
        assert_eq!(camelize("number"), "Float64");
        assert_eq!(camelize("boolean"), "Bool");
        assert_eq!(camelize("object"), "Struct");
        assert_eq!(camelize("array"), "Array");
    }

    #[test]
    fn camelize_keeps_identifiers() {
        assert_eq!(camelize("Pet"), "Pet");
        assert_eq!(camelize("Pet_Name"), "Pet_Name");
        assert_eq!(camelize("pet store entry"), "PetStoreEntry");
    }

    #[test]
    fn title_pattern_recovers_name() {
        let doc: Doc = serde_json::from_value(json!({
            "swagger": "2.0",
            "info": { "title": "The petstore API", "version": "2" }
        }))
        .unwrap();
        let out = import_document(&doc, "fallback");
        assert_eq!(out.schema.name.as_deref(), Some("petstore"));
        assert_eq!(out.schema.version, Some(2));
        assert!(out.diagnostics.is_empty());
    }

    #[test]
    fn odd_title_falls_back_to_caller_name() {
        let doc: Doc = serde_json::from_value(json!({
            "swagger": "2.0",
            "info": { "title": "Petstore", "version": "" }
        }))
        .unwrap();
        let out = import_document(&doc, "petstore-file");
        assert_eq!(out.schema.name.as_deref(), Some("petstore-file"));
        assert_eq!(out.schema.version, None);
    }

    #[test]
    fn non_integer_version_warns_and_is_unset() {
        let doc: Doc = serde_json::from_value(json!({
            "swagger": "2.0",
            "info": { "title": "The pets API", "version": "1.0.3" }
        }))
        .unwrap();
        let out = import_document(&doc, "pets");
        assert_eq!(out.schema.version, None);
        assert_eq!(out.diagnostics.len(), 1);
        assert!(out.diagnostics[0].message.contains("not an integer"));
    }

    #[test]
    fn requires_type_def_triggers() {
        let plain: SchemaObject = serde_json::from_value(json!({ "type": "string" })).unwrap();
        assert!(!requires_type_def(&plain));
        for constrained in [
            json!({ "type": "string", "pattern": "^x+$" }),
            json!({ "type": "string", "maxLength": 10 }),
            json!({ "type": "integer", "minimum": 0 }),
            json!({ "type": "string", "enum": ["a", "b"] }),
            json!({ "type": "string", "x-constraint": { "positive": true } }),
            json!({ "type": "array", "maxItems": 5 }),
        ] {
            let def: SchemaObject = serde_json::from_value(constrained).unwrap();
            assert!(requires_type_def(&def));
        }
    }
}
