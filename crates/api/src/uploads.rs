//! Local storage for attachment bytes.
//!
//! Attachment bytes are opaque to the workflow: they are written under the
//! configured upload directory before the database transaction commits and
//! served back verbatim at `/uploads/{filename}`. Removal is best-effort —
//! a leftover file can never corrupt entity state.

use std::io;
use std::path::{Path, PathBuf};

/// Writes and removes stored attachment files.
#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory files are stored in; also the directory served at
    /// `/uploads`.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write one file under the store, creating the directory on first use.
    pub async fn store(&self, filename: &str, bytes: &[u8]) -> io::Result<PathBuf> {
        tokio::fs::create_dir_all(&self.root).await?;
        let path = self.root.join(filename);
        tokio::fs::write(&path, bytes).await?;
        Ok(path)
    }

    /// Remove one stored file, ignoring failures.
    pub async fn remove(&self, filename: &str) {
        let path = self.root.join(filename);
        if let Err(e) = tokio::fs::remove_file(&path).await {
            tracing::debug!(path = %path.display(), error = %e, "Upload removal skipped");
        }
    }
}
