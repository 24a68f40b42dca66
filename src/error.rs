//! Error types for loading and transcoding.

use std::path::PathBuf;

use thiserror::Error;

/// Errors loading a schema or Swagger document from a file, string, or URL.
///
/// Structural decoding failure is fatal: no partial output is produced.
#[derive(Debug, Error)]
pub enum LoadError {
    // IO errors (exit code 3)
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[cfg(feature = "remote")]
    #[error("failed to fetch {url}: {source}")]
    NetworkError {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    // Decode errors (exit code 2)
    #[error("invalid JSON: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },
}

impl LoadError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            LoadError::FileNotFound { .. } | LoadError::ReadError { .. } => 3,
            #[cfg(feature = "remote")]
            LoadError::NetworkError { .. } => 3,
            LoadError::InvalidJson { .. } => 2,
        }
    }
}

/// Errors constructing the normalized resource model.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("resource {method} {path} declares more than one body parameter ({first}, {second})")]
    DuplicateBody {
        method: String,
        path: String,
        first: String,
        second: String,
    },
}

/// Errors during Swagger export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl ExportError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            ExportError::Model(_) => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_error_exit_codes() {
        let err = LoadError::FileNotFound {
            path: PathBuf::from("schema.json"),
        };
        assert_eq!(err.exit_code(), 3);

        let err = LoadError::InvalidJson {
            source: serde_json::from_str::<serde_json::Value>("not json").unwrap_err(),
        };
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn export_error_exit_code() {
        let err = ExportError::Model(ModelError::DuplicateBody {
            method: "POST".into(),
            path: "/pets".into(),
            first: "a".into(),
            second: "b".into(),
        });
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn duplicate_body_message_names_both_inputs() {
        let err = ModelError::DuplicateBody {
            method: "POST".into(),
            path: "/pets".into(),
            first: "pet".into(),
            second: "owner".into(),
        };
        assert_eq!(
            err.to_string(),
            "resource POST /pets declares more than one body parameter (pet, owner)"
        );
    }
}
