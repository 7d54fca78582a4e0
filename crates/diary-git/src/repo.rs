//! Repository handles supplied by the caller

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A repository to scan: display name plus absolute working-tree path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryHandle {
    /// Display name, usually the directory name
    pub name: String,
    /// Working-tree path
    pub path: PathBuf,
}

impl RepositoryHandle {
    /// Create a handle with an explicit name
    #[must_use]
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Create a handle named after the last component of `path`
    ///
    /// Falls back to the full path when there is no final component
    /// (for example `/`).
    #[must_use]
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::new(name, path)
    }
}
