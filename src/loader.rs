//! Input loading from files, strings, and HTTP URLs.
//!
//! All I/O lives here, on the CLI side of the core; the transcoding
//! algorithms themselves only see in-memory values.

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::LoadError;
use crate::schema::Schema;
use crate::swagger::Doc;

#[cfg(feature = "remote")]
use std::time::Duration;

/// Default timeout for HTTP requests (10 seconds).
#[cfg(feature = "remote")]
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    if !path.exists() {
        return Err(LoadError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| LoadError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| LoadError::InvalidJson { source })
}

/// Load a schema from a file path.
///
/// # Errors
///
/// Returns `LoadError::FileNotFound` if the file doesn't exist, or
/// `LoadError::InvalidJson` if the content doesn't decode as a schema.
pub fn load_schema(path: &Path) -> Result<Schema, LoadError> {
    load_json(path)
}

/// Load a schema from a JSON string.
pub fn load_schema_str(content: &str) -> Result<Schema, LoadError> {
    serde_json::from_str(content).map_err(|source| LoadError::InvalidJson { source })
}

/// Load a Swagger document from a file path.
pub fn load_document(path: &Path) -> Result<Doc, LoadError> {
    load_json(path)
}

/// Load a Swagger document from a JSON string.
pub fn load_document_str(content: &str) -> Result<Doc, LoadError> {
    serde_json::from_str(content).map_err(|source| LoadError::InvalidJson { source })
}

/// Load a Swagger document from an HTTP/HTTPS URL.
///
/// Requires the `remote` feature (enabled by default).
#[cfg(feature = "remote")]
pub fn load_document_url(url: &str) -> Result<Doc, LoadError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .map_err(|source| LoadError::NetworkError {
            url: url.to_string(),
            source,
        })?;

    let response = client
        .get(url)
        .send()
        .map_err(|source| LoadError::NetworkError {
            url: url.to_string(),
            source,
        })?;

    // Check for HTTP errors before parsing
    let response = response
        .error_for_status()
        .map_err(|source| LoadError::NetworkError {
            url: url.to_string(),
            source,
        })?;

    response.json().map_err(|source| LoadError::NetworkError {
        url: url.to_string(),
        source,
    })
}

/// Check if a string looks like a URL (starts with http:// or https://).
pub fn is_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

/// Load a Swagger document from a file path or URL.
///
/// URL loading requires the `remote` feature.
pub fn load_document_auto(source: &str) -> Result<Doc, LoadError> {
    if is_url(source) {
        #[cfg(feature = "remote")]
        {
            load_document_url(source)
        }
        #[cfg(not(feature = "remote"))]
        {
            Err(LoadError::FileNotFound {
                path: std::path::PathBuf::from(source),
            })
        }
    } else {
        load_document(Path::new(source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn load_schema_valid_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"name": "pets", "version": 1}}"#).unwrap();

        let schema = load_schema(file.path()).unwrap();
        assert_eq!(schema.name.as_deref(), Some("pets"));
        assert_eq!(schema.version, Some(1));
    }

    #[test]
    fn load_schema_file_not_found() {
        let result = load_schema(Path::new("/nonexistent/path.json"));
        assert!(matches!(result, Err(LoadError::FileNotFound { .. })));
    }

    #[test]
    fn load_schema_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid json").unwrap();

        let result = load_schema(file.path());
        assert!(matches!(result, Err(LoadError::InvalidJson { .. })));
    }

    #[test]
    fn load_schema_wrong_shape() {
        // Structurally invalid input is fatal, not patched over.
        let result = load_schema_str(r#"{"types": "not-a-list"}"#);
        assert!(matches!(result, Err(LoadError::InvalidJson { .. })));
    }

    #[test]
    fn load_document_valid_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{"swagger": "2.0", "info": {{"title": "The pets API", "version": "1"}}}}"#
        )
        .unwrap();

        let doc = load_document(file.path()).unwrap();
        assert_eq!(doc.swagger, "2.0");
        assert_eq!(doc.info.title, "The pets API");
    }

    #[test]
    fn is_url_detection() {
        assert!(is_url("https://example.com/swagger.json"));
        assert!(is_url("http://example.com/swagger.json"));
        assert!(!is_url("/path/to/swagger.json"));
        assert!(!is_url("swagger.json"));
    }

    #[test]
    fn load_document_auto_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"swagger": "2.0"}}"#).unwrap();

        let doc = load_document_auto(file.path().to_str().unwrap()).unwrap();
        assert_eq!(doc.swagger, "2.0");
    }

    // Remote tests use a local mock server; see tests/import_test.rs.
}
