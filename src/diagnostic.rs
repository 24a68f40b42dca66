//! Non-fatal findings from transcoding.
//!
//! Representational gaps (unions, header parameters), unresolved references,
//! and ambiguous input never abort a transcoding run; they are collected as
//! diagnostics beside the result and surfaced by the CLI.

use std::fmt;

use serde::Serialize;

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// A single non-fatal finding, tied to the construct that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// The offending construct (a type name, or `METHOD /path`).
    pub context: String,
    pub message: String,
}

impl Diagnostic {
    pub fn warning(context: impl Into<String>, message: impl Into<String>) -> Self {
        Diagnostic {
            severity: Severity::Warning,
            context: context.into(),
            message: message.into(),
        }
    }

    pub fn error(context: impl Into<String>, message: impl Into<String>) -> Self {
        Diagnostic {
            severity: Severity::Error,
            context: context.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "{}: {}: {}", level, self.context, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_format() {
        let d = Diagnostic::warning("Shape", "unions have no Swagger representation");
        assert_eq!(
            d.to_string(),
            "warning: Shape: unions have no Swagger representation"
        );
    }

    #[test]
    fn serializes_severity_lowercase() {
        let d = Diagnostic::error("GET /pets", "broken");
        let v = serde_json::to_value(&d).unwrap();
        assert_eq!(v["severity"], "error");
    }
}
