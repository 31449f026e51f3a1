//! Local file storage for uploaded icons.

use std::path::PathBuf;

use crate::config::UPLOAD_URL_PREFIX;
use crate::errors::{AppError, AppResult};

/// Writes uploaded files under a root directory that is also served
/// statically at `/upload`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Persist `data` as `file_name`, creating the root directory if needed.
    ///
    /// Returns the relative path clients use to fetch the file. A file with
    /// the same name is overwritten.
    pub async fn save(&self, file_name: &str, data: &[u8]) -> AppResult<String> {
        tokio::fs::create_dir_all(&self.root).await.map_err(|e| {
            AppError::internal(format!(
                "Failed to create upload directory {}: {}",
                self.root.display(),
                e
            ))
        })?;

        let target = self.root.join(file_name);
        tokio::fs::write(&target, data).await.map_err(|e| {
            AppError::internal(format!("Failed to write {}: {}", target.display(), e))
        })?;

        tracing::debug!(path = %target.display(), bytes = data.len(), "Upload stored");

        Ok(format!("{}/{}", UPLOAD_URL_PREFIX, file_name))
    }
}
