//! Local file sink
//!
//! The engine never touches the filesystem directly; it writes
//! through a [`FileSink`] handed in at construction. The sink is
//! write-only: it can answer whether a destination already exists
//! and it can write bytes, creating parent directories as needed.

use std::path::{Path, PathBuf};

use super::RegistryError;

/// Destination for materialized component files
pub trait FileSink: Send + Sync {
    /// Whether anything already exists at this destination path,
    /// relative to the sink root.
    fn exists(&self, relative: &str) -> bool;

    /// Write bytes to a destination path relative to the sink root,
    /// creating parent directories. Overwrites silently.
    fn write(&self, relative: &str, bytes: &[u8]) -> Result<(), RegistryError>;
}

/// File sink rooted at a local directory
pub struct DirSink {
    root: PathBuf,
}

impl DirSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl FileSink for DirSink {
    fn exists(&self, relative: &str) -> bool {
        self.root.join(relative).exists()
    }

    fn write(&self, relative: &str, bytes: &[u8]) -> Result<(), RegistryError> {
        let path = self.root.join(relative);

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| {
                RegistryError::LocalWriteFailure {
                    path: path.clone(),
                    source,
                }
            })?;
        }

        std::fs::write(&path, bytes)
            .map_err(|source| RegistryError::LocalWriteFailure { path, source })
    }
}
