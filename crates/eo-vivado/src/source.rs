//! Line acquisition: read logs from files, mocks, or other backends.
//!
//! The processor only consumes lines; reading and decoding them happens
//! here, and failures surface before parsing starts.

use async_trait::async_trait;

use crate::error::{FilterError, FilterResult};

/// Abstraction over where log lines come from.
#[async_trait]
pub trait LogSource: Send + Sync {
    /// Read all lines of the given path/identifier.
    async fn read_lines(&self, path: &str) -> FilterResult<Vec<String>>;

    /// Check if a source path exists and is readable.
    async fn exists(&self, path: &str) -> bool;
}

/// Reads logs from the local filesystem.
pub struct FileLogSource;

#[async_trait]
impl LogSource for FileLogSource {
    async fn read_lines(&self, path: &str) -> FilterResult<Vec<String>> {
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                FilterError::SourceNotFound(path.to_string())
            } else {
                FilterError::Io(format!("{path}: {e}"))
            }
        })?;
        let content = String::from_utf8(bytes)
            .map_err(|e| FilterError::Io(format!("{path}: not valid UTF-8: {e}")))?;
        Ok(content.lines().map(String::from).collect())
    }

    async fn exists(&self, path: &str) -> bool {
        tokio::fs::metadata(path).await.is_ok()
    }
}
