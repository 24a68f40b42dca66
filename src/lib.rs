//! RSDL Schema Transcoder
//!
//! Type resolution and Swagger 2.0 transcoding for RSDL schemas.
//!
//! An RSDL schema declares named types (deriving from built-in base types,
//! with inherited constraints) and HTTP-style resources. This library
//! resolves derivation chains against a [`TypeRegistry`], normalizes
//! resources through a [`ResourceModel`], and transcodes schemas to and from
//! Swagger 2.0 documents.
//!
//! # Example
//!
//! ```
//! use rsdl_schema::{export_schema, import_document, load_schema_str};
//!
//! let schema = load_schema_str(r#"{
//!     "name": "petstore",
//!     "version": 1,
//!     "types": [
//!         { "Struct": { "name": "Pet", "type": "Struct", "fields": [
//!             { "name": "name", "type": "String" },
//!             { "name": "age", "type": "Int32", "optional": true }
//!         ] } }
//!     ],
//!     "resources": [
//!         { "type": "Pet", "method": "GET", "path": "/pets/{id}",
//!           "expected": "OK",
//!           "inputs": [{ "name": "id", "type": "String", "pathParam": true }] }
//!     ]
//! }"#).unwrap();
//!
//! let exported = export_schema(&schema, None).unwrap();
//! assert_eq!(exported.doc.info.title, "The petstore API");
//! assert_eq!(exported.doc.base_path.as_deref(), Some("/api/petstore/v1"));
//! assert!(exported.doc.definitions.contains_key("Pet"));
//!
//! // The mirror direction reconstructs the schema from the document.
//! let imported = import_document(&exported.doc, "petstore");
//! assert_eq!(imported.schema.name.as_deref(), Some("petstore"));
//! ```
//!
//! # Lossy boundaries
//!
//! Swagger 2.0 has a strictly smaller type vocabulary. Union types and
//! header parameters have no representation there; both directions report
//! them as [`Diagnostic`]s and omit the construct rather than guessing.

mod diagnostic;
mod error;
mod export;
mod import;
mod loader;
mod registry;
mod resource;
mod schema;
mod status;
pub mod swagger;

pub use diagnostic::{Diagnostic, Severity};
pub use error::{ExportError, LoadError, ModelError};
pub use export::{export_schema, SwaggerExport, RESOURCE_ERROR};
pub use import::{import_document, SchemaImport};
pub use loader::{
    is_url, load_document, load_document_auto, load_document_str, load_schema, load_schema_str,
};
pub use registry::{FlattenedField, TypeRegistry};
pub use resource::{
    split_path_template, ParamKind, Parameter, PathSegment, ResourceModel, ResponseEntry,
};
pub use schema::{
    AliasDef, Annotations, ArrayDef, BaseType, BytesDef, EnumDef, EnumElement, ExceptionDef,
    MapDef, NumberDef, Resource, ResourceInput, ResourceOutput, Schema, StringDef, StructDef,
    StructField, Type, UnionDef,
};
pub use status::{status_code, status_message, status_symbol};

#[cfg(feature = "remote")]
pub use loader::load_document_url;
