//! Log source abstraction: read raw file content from disk, mocks, or other
//! backends.

use async_trait::async_trait;

use crate::error::{MergeError, MergeResult};

/// Reads raw log content by path.
///
/// Enables mocking in tests and keeps the merge core free of I/O.
#[async_trait]
pub trait LogSource: Send + Sync {
    /// Read the full content of `path`.
    async fn read_bytes(&self, path: &str) -> MergeResult<Vec<u8>>;
}

/// Reads logs from the local filesystem.
pub struct FileLogSource;

#[async_trait]
impl LogSource for FileLogSource {
    async fn read_bytes(&self, path: &str) -> MergeResult<Vec<u8>> {
        tokio::fs::read(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                MergeError::NotFound(path.to_string())
            } else {
                MergeError::Io(format!("{path}: {e}"))
            }
        })
    }
}
