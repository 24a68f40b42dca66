//! Type resolution over a schema's declared types.
//!
//! The registry indexes types by name and resolves derivation chains on
//! demand. Built-in base types are part of the index; they are the fixed
//! points where a type's reference names itself, terminating every
//! well-formed chain.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde_json::Number;

use crate::schema::{BaseType, Schema, StructField, Type};

/// Upper bound on derivation-chain walks. Well-formed schemas are acyclic;
/// a cycle introduced by bad input truncates here instead of hanging.
const MAX_CHAIN_DEPTH: usize = 64;

fn builtin_types() -> &'static [Type] {
    static BUILTINS: OnceLock<Vec<Type>> = OnceLock::new();
    BUILTINS.get_or_init(|| BaseType::ALL.iter().map(|b| Type::Base(*b)).collect())
}

/// A struct field together with the name of the chain level that declared
/// it (provenance for documentation emitters).
#[derive(Debug, Clone, Copy)]
pub struct FlattenedField<'a> {
    pub field: &'a StructField,
    pub origin: &'a str,
}

/// Read-only resolution service over one schema's types.
///
/// Pure queries only; the registry never mutates the schema and is built
/// fresh per compilation run.
pub struct TypeRegistry<'a> {
    types: HashMap<&'a str, &'a Type>,
}

impl<'a> TypeRegistry<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        let mut types: HashMap<&'a str, &'a Type> = HashMap::new();
        for t in builtin_types() {
            types.insert(t.name(), t);
        }
        // Declared types shadow builtins of the same name.
        for t in &schema.types {
            types.insert(t.name(), t);
        }
        TypeRegistry { types }
    }

    /// Look up a type by name. `None` for unknown references is not an
    /// error; transcoding falls back to an opaque pass-through reference.
    pub fn find_type(&self, name: &str) -> Option<&'a Type> {
        self.types.get(name).copied()
    }

    /// The ultimate base-type category a named type derives from, or `None`
    /// when the name (or an ancestor) is unknown.
    pub fn find_base_type(&self, name: &str) -> Option<BaseType> {
        self.base_type(self.find_type(name)?)
    }

    /// The base-type category of a resolved type.
    pub fn base_type(&self, t: &'a Type) -> Option<BaseType> {
        match self.type_chain(t).last() {
            Some(Type::Base(b)) => Some(*b),
            _ => None,
        }
    }

    /// The derivation chain from `t` (index 0) to its ultimate base (last
    /// index). The walk stops at the fixed point where a type's reference
    /// names itself, at an unresolved ancestor, or at the depth cap.
    pub fn type_chain(&self, t: &'a Type) -> Vec<&'a Type> {
        let mut chain = vec![t];
        let mut current = t;
        while chain.len() < MAX_CHAIN_DEPTH {
            if current.type_ref() == current.name() {
                break;
            }
            match self.find_type(current.type_ref()) {
                Some(parent) => {
                    chain.push(parent);
                    current = parent;
                }
                None => break,
            }
        }
        chain
    }

    /// Every struct field along the chain, root ancestor first.
    ///
    /// Struct derivation is additive concatenation: an ancestor's fields and
    /// a descendant's fields all appear, in chain order, each tagged with
    /// the declaring type's name.
    pub fn flattened_fields(&self, t: &'a Type) -> Vec<FlattenedField<'a>> {
        let mut out = Vec::new();
        for level in self.type_chain(t).into_iter().rev() {
            if let Type::Struct(def) = level {
                out.extend(def.fields.iter().map(|field| FlattenedField {
                    field,
                    origin: def.name.as_str(),
                }));
            }
        }
        out
    }

    /// The effective value of an inheritable constraint: the first explicit
    /// value walking from the leaf toward the root. Absence at a level is a
    /// no-op, never a reset.
    pub fn effective_constraint<T>(
        &self,
        t: &'a Type,
        select: impl Fn(&'a Type) -> Option<T>,
    ) -> Option<T> {
        self.type_chain(t).into_iter().find_map(select)
    }

    pub fn effective_pattern(&self, t: &'a Type) -> Option<&'a str> {
        self.effective_constraint(t, |t| match t {
            Type::String(d) => d.pattern.as_deref(),
            _ => None,
        })
    }

    pub fn effective_values(&self, t: &'a Type) -> Option<&'a [String]> {
        self.effective_constraint(t, |t| match t {
            Type::String(d) => d.values.as_deref(),
            _ => None,
        })
    }

    pub fn effective_min(&self, t: &'a Type) -> Option<&'a Number> {
        self.effective_constraint(t, |t| match t {
            Type::Number(d) => d.min.as_ref(),
            _ => None,
        })
    }

    pub fn effective_max(&self, t: &'a Type) -> Option<&'a Number> {
        self.effective_constraint(t, |t| match t {
            Type::Number(d) => d.max.as_ref(),
            _ => None,
        })
    }

    pub fn effective_min_size(&self, t: &'a Type) -> Option<u32> {
        self.effective_constraint(t, |t| match t {
            Type::String(d) => d.min_size,
            Type::Bytes(d) => d.min_size,
            Type::Array(d) => d.min_size,
            Type::Map(d) => d.min_size,
            _ => None,
        })
    }

    pub fn effective_max_size(&self, t: &'a Type) -> Option<u32> {
        self.effective_constraint(t, |t| match t {
            Type::String(d) => d.max_size,
            Type::Bytes(d) => d.max_size,
            Type::Array(d) => d.max_size,
            Type::Map(d) => d.max_size,
            _ => None,
        })
    }

    /// Effective element type of an array or map chain.
    pub fn effective_items(&self, t: &'a Type) -> Option<&'a str> {
        self.effective_constraint(t, |t| match t {
            Type::Array(d) => d.items.as_deref(),
            Type::Map(d) => d.items.as_deref(),
            _ => None,
        })
    }

    pub fn is_array_type(&self, name: &str) -> bool {
        self.find_base_type(name) == Some(BaseType::Array)
    }

    pub fn is_string_type(&self, name: &str) -> bool {
        self.find_base_type(name) == Some(BaseType::String)
    }
}
