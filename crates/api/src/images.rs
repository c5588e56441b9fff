//! Local image store.
//!
//! Files are written under a root directory at the relative paths recorded
//! in `image_files.file_path`. Writes fail the request; removals are best
//! effort, since the database row is the source of truth.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Reads and writes image files below a root directory.
#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute location of a store-relative path.
    pub fn resolve(&self, relative: &Path) -> PathBuf {
        self.root.join(relative)
    }

    /// Write `bytes` at `relative`, creating parent directories.
    pub async fn save(&self, relative: &Path, bytes: &[u8]) -> std::io::Result<()> {
        let path = self.resolve(relative);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, bytes).await?;
        tracing::debug!(path = %path.display(), size = bytes.len(), "Stored image");
        Ok(())
    }

    /// Remove one file. Returns `false` when it was already gone.
    pub async fn remove(&self, relative: &str) -> std::io::Result<bool> {
        let path = self.resolve(Path::new(relative));
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "Image file already missing");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Remove several files, logging and skipping any failure.
    ///
    /// Returns how many files were actually removed.
    pub async fn remove_all<S: AsRef<str>>(&self, paths: &[S]) -> usize {
        let mut removed = 0;
        for relative in paths {
            match self.remove(relative.as_ref()).await {
                Ok(true) => removed += 1,
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!(path = relative.as_ref(), error = %e, "Failed to remove image file");
                }
            }
        }
        removed
    }
}
