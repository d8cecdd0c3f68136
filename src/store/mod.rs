//! File store contract consumed by the page locator.
//!
//! The locator never touches the filesystem directly. It asks a [`FileStore`] for the
//! [`FileInfo`] of a relative path and works purely from the returned values, so any
//! backing (local disk, an archive, an in-memory tree) can serve pages.

mod directory;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

pub use directory::DirectoryStore;

/// Description of a single entry in the content tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    /// Raw file name including its extension. Empty for the content root.
    pub name: String,
    /// Canonical path relative to the content root, always using `/`.
    pub relative_path: String,
    /// Whether the entry is a directory.
    pub directory: bool,
    /// Direct children of a directory. Child entries do not carry their own children.
    pub children: Vec<FileInfo>,
}

impl FileInfo {
    /// Describe a plain file.
    pub fn file(name: impl Into<String>, relative_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            relative_path: relative_path.into(),
            directory: false,
            children: Vec::new(),
        }
    }

    /// Describe a directory with the provided children.
    pub fn directory(
        name: impl Into<String>,
        relative_path: impl Into<String>,
        children: Vec<FileInfo>,
    ) -> Self {
        Self {
            name: name.into(),
            relative_path: relative_path.into(),
            directory: true,
            children,
        }
    }
}

/// Index a directory's children by raw file name.
///
/// The map borrows from `info` and is rebuilt for every lookup. When two children share a
/// name the later one wins.
pub fn siblings_by_name(info: &FileInfo) -> HashMap<&str, &FileInfo> {
    info.children
        .iter()
        .map(|child| (child.name.as_str(), child))
        .collect()
}

/// Errors reported by a [`FileStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No entry exists at the requested path.
    #[error("no entry at `{path}`")]
    NotFound {
        /// Path that was requested.
        path: String,
    },
    /// The requested path would resolve outside the store's root.
    #[error("`{path}` escapes the content root")]
    OutsideRoot {
        /// Path that was requested.
        path: String,
    },
    /// The entry exists but could not be read.
    #[error("failed to read `{path}`: {source}")]
    Io {
        /// Path that was requested.
        path: String,
        /// Source I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    /// Classify an I/O error raised while reading `path`.
    pub fn from_io(path: &str, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound {
                path: path.to_string(),
            }
        } else {
            Self::Io {
                path: path.to_string(),
                source,
            }
        }
    }
}

/// Source of file and directory information for a content tree.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Look up the entry at `path`, relative to the content root.
    ///
    /// Fails when the path does not correspond to an existing entry.
    async fn get_info(&self, path: &str) -> Result<FileInfo, StoreError>;
}

#[async_trait]
impl<S: FileStore + ?Sized> FileStore for Arc<S> {
    async fn get_info(&self, path: &str) -> Result<FileInfo, StoreError> {
        (**self).get_info(path).await
    }
}

#[async_trait]
impl<S: FileStore + ?Sized> FileStore for &S {
    async fn get_info(&self, path: &str) -> Result<FileInfo, StoreError> {
        (**self).get_info(path).await
    }
}
