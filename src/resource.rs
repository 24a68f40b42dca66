//! Normalized view of one resource: classified parameters and the response
//! table, computed against the status-code table.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::ModelError;
use crate::schema::{Resource, ResourceInput};
use crate::status::status_message;

/// Where a parameter travels on the wire.
///
/// Classification is mutually exclusive, decided by the first matching
/// declaration in priority order: path, query, header, body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamKind {
    Path,
    /// Carries the external query key, which may differ from the internal
    /// parameter name.
    Query(String),
    /// Carries the HTTP header name.
    Header(String),
    Body,
}

/// One classified input parameter.
#[derive(Debug, Clone)]
pub struct Parameter<'a> {
    pub input: &'a ResourceInput,
    pub kind: ParamKind,
    pub required: bool,
    pub default: Option<&'a Value>,
}

/// One row of the response table.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseEntry<'a> {
    /// Schema type reference; `None` for responses without a body
    /// (`NO_CONTENT`).
    pub type_ref: Option<&'a str>,
    pub description: String,
}

/// Read-only normalized model of a single resource.
#[derive(Debug)]
pub struct ResourceModel<'a> {
    pub resource: &'a Resource,
    pub parameters: Vec<Parameter<'a>>,
    /// Symbolic status code → response entry.
    pub responses: BTreeMap<&'a str, ResponseEntry<'a>>,
}

impl<'a> ResourceModel<'a> {
    /// Build the model, rejecting resources that declare more than one body
    /// input.
    pub fn new(resource: &'a Resource) -> Result<Self, ModelError> {
        let mut parameters = Vec::with_capacity(resource.inputs.len());
        let mut body_name: Option<&str> = None;
        for input in &resource.inputs {
            let kind = classify(input);
            if kind == ParamKind::Body {
                if let Some(first) = body_name {
                    return Err(ModelError::DuplicateBody {
                        method: resource.method.clone(),
                        path: resource.path.clone(),
                        first: first.to_string(),
                        second: input.name.clone(),
                    });
                }
                body_name = Some(&input.name);
            }
            // A declared default implies the caller may omit the parameter.
            let required = !input.optional && input.default.is_none();
            parameters.push(Parameter {
                input,
                kind,
                required,
                default: input.default.as_ref(),
            });
        }

        let mut responses: BTreeMap<&'a str, ResponseEntry<'a>> = BTreeMap::new();
        let expected = resource.expected_or_default();
        responses.insert(expected, response_entry(&resource.type_ref, expected, None));
        for alt in &resource.alternatives {
            responses.insert(alt.as_str(), response_entry(&resource.type_ref, alt, None));
        }
        for (code, exc) in &resource.exceptions {
            responses.insert(
                code.as_str(),
                response_entry(&exc.type_ref, code, exc.comment.as_deref()),
            );
        }

        Ok(ResourceModel {
            resource,
            parameters,
            responses,
        })
    }

    /// The body parameter, if the resource declares one.
    pub fn body(&self) -> Option<&Parameter<'a>> {
        self.parameters.iter().find(|p| p.kind == ParamKind::Body)
    }
}

fn classify(input: &ResourceInput) -> ParamKind {
    if input.path_param {
        return ParamKind::Path;
    }
    if let Some(key) = input.query_param.as_deref().filter(|k| !k.is_empty()) {
        return ParamKind::Query(key.to_string());
    }
    if let Some(name) = input.header.as_deref().filter(|h| !h.is_empty()) {
        return ParamKind::Header(name.to_string());
    }
    ParamKind::Body
}

fn response_entry<'a>(
    type_ref: &'a str,
    code: &str,
    comment: Option<&str>,
) -> ResponseEntry<'a> {
    let mut description = status_message(code).to_string();
    if let Some(comment) = comment {
        description.push_str(" - ");
        description.push_str(comment);
    }
    ResponseEntry {
        type_ref: if code == "NO_CONTENT" {
            None
        } else {
            Some(type_ref)
        },
        description,
    }
}

/// One segment of a `{name}`-bracketed path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Literal(String),
    Variable(String),
}

/// Split a path template into ordered literal and variable segments.
///
/// Pure function; consumed by source emitters building routing tables. An
/// unterminated `{` is kept as literal text.
pub fn split_path_template(path: &str) -> Vec<PathSegment> {
    let mut segments = Vec::new();
    let mut rest = path;
    while !rest.is_empty() {
        match rest.find('{') {
            None => {
                segments.push(PathSegment::Literal(rest.to_string()));
                break;
            }
            Some(open) => {
                if open > 0 {
                    segments.push(PathSegment::Literal(rest[..open].to_string()));
                }
                match rest[open..].find('}') {
                    None => {
                        segments.push(PathSegment::Literal(rest[open..].to_string()));
                        break;
                    }
                    Some(close) => {
                        let name = &rest[open + 1..open + close];
                        segments.push(PathSegment::Variable(name.to_string()));
                        rest = &rest[open + close + 1..];
                    }
                }
            }
        }
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn resource(v: serde_json::Value) -> Resource {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn classification_priority() {
        let r = resource(json!({
            "type": "Pet", "method": "POST", "path": "/pets", "expected": "OK",
            "inputs": [
                { "name": "id", "type": "String", "pathParam": true },
                { "name": "verbose", "type": "Bool", "queryParam": "verbose", "optional": true },
                { "name": "auth", "type": "String", "header": "Authorization" },
                { "name": "pet", "type": "Pet" }
            ]
        }));
        let model = ResourceModel::new(&r).unwrap();
        let kinds: Vec<&ParamKind> = model.parameters.iter().map(|p| &p.kind).collect();
        assert_eq!(
            kinds,
            [
                &ParamKind::Path,
                &ParamKind::Query("verbose".into()),
                &ParamKind::Header("Authorization".into()),
                &ParamKind::Body
            ]
        );
        assert_eq!(model.body().unwrap().input.name, "pet");
    }

    #[test]
    fn empty_query_key_is_body() {
        let r = resource(json!({
            "type": "Pet", "method": "POST", "path": "/pets", "expected": "OK",
            "inputs": [{ "name": "pet", "type": "Pet", "queryParam": "" }]
        }));
        let model = ResourceModel::new(&r).unwrap();
        assert_eq!(model.parameters[0].kind, ParamKind::Body);
    }

    #[test]
    fn default_implies_optional() {
        let r = resource(json!({
            "type": "Pets", "method": "GET", "path": "/pets", "expected": "OK",
            "inputs": [
                { "name": "limit", "type": "Int32", "queryParam": "limit", "default": 25 },
                { "name": "filter", "type": "String", "queryParam": "filter" }
            ]
        }));
        let model = ResourceModel::new(&r).unwrap();
        assert!(!model.parameters[0].required);
        assert_eq!(model.parameters[0].default, Some(&json!(25)));
        assert!(model.parameters[1].required);
    }

    #[test]
    fn second_body_parameter_rejected() {
        let r = resource(json!({
            "type": "Pet", "method": "POST", "path": "/pets", "expected": "OK",
            "inputs": [
                { "name": "pet", "type": "Pet" },
                { "name": "owner", "type": "Owner" }
            ]
        }));
        assert!(matches!(
            ResourceModel::new(&r),
            Err(ModelError::DuplicateBody { .. })
        ));
    }

    #[test]
    fn response_table_build_order() {
        let r = resource(json!({
            "type": "Pet", "method": "GET", "path": "/pets/{id}", "expected": "OK",
            "alternatives": ["FOUND"],
            "exceptions": {
                "NOT_FOUND": { "type": "ResourceError", "comment": "no such pet" }
            }
        }));
        let model = ResourceModel::new(&r).unwrap();
        assert_eq!(
            model.responses["OK"],
            ResponseEntry {
                type_ref: Some("Pet"),
                description: "OK".into()
            }
        );
        assert_eq!(model.responses["FOUND"].type_ref, Some("Pet"));
        assert_eq!(
            model.responses["NOT_FOUND"],
            ResponseEntry {
                type_ref: Some("ResourceError"),
                description: "Not Found - no such pet".into()
            }
        );
    }

    #[test]
    fn no_content_carries_no_schema() {
        let r = resource(json!({
            "type": "Pet", "method": "DELETE", "path": "/pets/{id}",
            "expected": "NO_CONTENT"
        }));
        let model = ResourceModel::new(&r).unwrap();
        assert_eq!(model.responses["NO_CONTENT"].type_ref, None);
        assert_eq!(model.responses["NO_CONTENT"].description, "No Content");
    }

    #[test]
    fn missing_expected_defaults_to_ok() {
        let r = resource(json!({ "type": "Pet", "method": "GET", "path": "/pets" }));
        let model = ResourceModel::new(&r).unwrap();
        assert!(model.responses.contains_key("OK"));
    }

    #[test]
    fn path_template_literals_and_variables() {
        assert_eq!(
            split_path_template("/pets/{id}/toys/{toyId}"),
            [
                PathSegment::Literal("/pets/".into()),
                PathSegment::Variable("id".into()),
                PathSegment::Literal("/toys/".into()),
                PathSegment::Variable("toyId".into()),
            ]
        );
    }

    #[test]
    fn path_template_without_variables() {
        assert_eq!(
            split_path_template("/pets"),
            [PathSegment::Literal("/pets".into())]
        );
    }

    #[test]
    fn path_template_unterminated_brace() {
        assert_eq!(
            split_path_template("/pets/{id"),
            [
                PathSegment::Literal("/pets/".into()),
                PathSegment::Literal("{id".into()),
            ]
        );
    }

    #[test]
    fn path_template_empty() {
        assert!(split_path_template("").is_empty());
    }
}
