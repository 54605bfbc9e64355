//! Header source backed by a JSON file.

use std::collections::BTreeMap;
use std::path::PathBuf;

use log::info;

use super::{HeaderSet, HeaderSource};
use crate::error_handling::HeaderCaptureError;

/// Reads a JSON object of header name to value on every fetch.
///
/// Re-reading on each refresh lets an operator replace the file while a run
/// is in progress.
#[derive(Debug, Clone)]
pub struct FileHeaderSource {
    path: PathBuf,
}

impl FileHeaderSource {
    /// Creates a source reading `path`.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl HeaderSource for FileHeaderSource {
    async fn fetch_headers(&mut self) -> Result<HeaderSet, HeaderCaptureError> {
        info!("Loading headers from {}", self.path.display());
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| HeaderCaptureError::HeadersFile {
                path: self.path.clone(),
                source,
            })?;
        let pairs: BTreeMap<String, String> =
            serde_json::from_str(&raw).map_err(|source| HeaderCaptureError::HeadersFileFormat {
                path: self.path.clone(),
                source,
            })?;
        let headers = HeaderSet::from_pairs(pairs);
        if headers.is_empty() {
            return Err(HeaderCaptureError::Empty);
        }
        Ok(headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_reads_header_object() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("headers.json");
        std::fs::write(
            &path,
            r#"{"x-authorization-api": "bearer abc", "user-agent": "Mozilla/5.0"}"#,
        )
        .unwrap();

        let headers = FileHeaderSource::new(path).fetch_headers().await.unwrap();
        assert_eq!(headers.get("x-authorization-api"), Some("bearer abc"));
        assert_eq!(headers.len(), 2);
    }

    #[tokio::test]
    async fn test_rereads_file_on_each_fetch() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("headers.json");
        std::fs::write(&path, r#"{"x-token": "one"}"#).unwrap();
        let mut source = FileHeaderSource::new(path.clone());
        assert_eq!(source.fetch_headers().await.unwrap().get("x-token"), Some("one"));

        std::fs::write(&path, r#"{"x-token": "two"}"#).unwrap();
        assert_eq!(source.fetch_headers().await.unwrap().get("x-token"), Some("two"));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = FileHeaderSource::new(dir.path().join("absent.json"))
            .fetch_headers()
            .await
            .unwrap_err();
        assert!(matches!(err, HeaderCaptureError::HeadersFile { .. }));
    }

    #[tokio::test]
    async fn test_non_string_values_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("headers.json");
        std::fs::write(&path, r#"{"x-token": 5}"#).unwrap();
        let err = FileHeaderSource::new(path).fetch_headers().await.unwrap_err();
        assert!(matches!(err, HeaderCaptureError::HeadersFileFormat { .. }));
    }

    #[tokio::test]
    async fn test_only_transport_headers_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("headers.json");
        std::fs::write(&path, r#"{"host": "www.united.com"}"#).unwrap();
        let err = FileHeaderSource::new(path).fetch_headers().await.unwrap_err();
        assert!(matches!(err, HeaderCaptureError::Empty));
    }
}
