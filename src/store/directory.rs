//! Local filesystem backing for [`FileStore`].

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::trace;

use super::{FileInfo, FileStore, StoreError};
use crate::naming::{join_relative, normalize_path, split_parent_and_name};

/// Serves a directory tree on the local filesystem as a [`FileStore`].
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    /// Create a store rooted at `root`. The directory is not checked until the first lookup.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory that relative paths are resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve `relative` against the root, returning the absolute path and the canonical
    /// `/`-joined relative path.
    fn resolve(&self, relative: &str) -> Result<(PathBuf, String), StoreError> {
        let mut resolved = self.root.clone();
        let mut segments = Vec::new();
        for component in Path::new(relative).components() {
            match component {
                Component::Normal(part) => {
                    resolved.push(part);
                    segments.push(part.to_string_lossy().into_owned());
                }
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(StoreError::OutsideRoot {
                        path: relative.to_string(),
                    });
                }
            }
        }
        Ok((resolved, segments.join("/")))
    }

    async fn read_children(
        &self,
        relative: &str,
        absolute: &Path,
    ) -> Result<Vec<FileInfo>, StoreError> {
        let mut entries = fs::read_dir(absolute)
            .await
            .map_err(|err| StoreError::from_io(relative, err))?;

        let mut children = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|err| StoreError::from_io(relative, err))?
        {
            let name = entry.file_name().to_string_lossy().into_owned();
            let child_relative = join_relative(relative, &name);
            // Follow symlinks so linked templates behave like regular files.
            let metadata = match fs::metadata(entry.path()).await {
                Ok(metadata) => metadata,
                Err(err) => {
                    trace!(path = %child_relative, error = %err, "skipping unreadable entry");
                    continue;
                }
            };

            let child = if metadata.is_dir() {
                FileInfo::directory(name, child_relative, Vec::new())
            } else {
                FileInfo::file(name, child_relative)
            };
            children.push(child);
        }

        children.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(children)
    }
}

#[async_trait]
impl FileStore for DirectoryStore {
    async fn get_info(&self, path: &str) -> Result<FileInfo, StoreError> {
        let (absolute, relative) = self.resolve(normalize_path(path))?;
        let metadata = fs::metadata(&absolute)
            .await
            .map_err(|err| StoreError::from_io(&relative, err))?;
        let name = split_parent_and_name(&relative).1.to_string();

        if metadata.is_dir() {
            let children = self.read_children(&relative, &absolute).await?;
            Ok(FileInfo::directory(name, relative, children))
        } else {
            Ok(FileInfo::file(name, relative))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::DirectoryStore;
    use crate::store::{FileStore, StoreError};

    fn content_tree() -> std::io::Result<tempfile::TempDir> {
        let temp = tempfile::tempdir()?;
        fs::create_dir_all(temp.path().join("three/seven"))?;
        fs::write(temp.path().join("one.tri"), "one")?;
        fs::write(temp.path().join("three/four.tri"), "four")?;
        fs::write(temp.path().join("three/four.json"), "{}")?;
        Ok(temp)
    }

    #[tokio::test]
    async fn describes_root_directory() -> Result<(), Box<dyn std::error::Error>> {
        let temp = content_tree()?;
        let store = DirectoryStore::new(temp.path());

        let root = store.get_info("/").await?;
        assert!(root.directory);
        assert_eq!(root.relative_path, "");
        let names: Vec<_> = root.children.iter().map(|child| child.name.as_str()).collect();
        assert_eq!(names, vec!["one.tri", "three"]);
        assert!(root.children[1].directory);
        Ok(())
    }

    #[tokio::test]
    async fn children_carry_forward_slash_paths() -> Result<(), Box<dyn std::error::Error>> {
        let temp = content_tree()?;
        let store = DirectoryStore::new(temp.path());

        let three = store.get_info("three/").await?;
        assert_eq!(three.name, "three");
        let paths: Vec<_> = three
            .children
            .iter()
            .map(|child| child.relative_path.as_str())
            .collect();
        assert_eq!(paths, vec!["three/four.json", "three/four.tri", "three/seven"]);
        Ok(())
    }

    #[tokio::test]
    async fn describes_plain_files() -> Result<(), Box<dyn std::error::Error>> {
        let temp = content_tree()?;
        let store = DirectoryStore::new(temp.path());

        let file = store.get_info("/three/four.tri").await?;
        assert!(!file.directory);
        assert_eq!(file.name, "four.tri");
        assert_eq!(file.relative_path, "three/four.tri");
        assert!(file.children.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn relative_paths_are_canonical() -> Result<(), Box<dyn std::error::Error>> {
        let temp = content_tree()?;
        let store = DirectoryStore::new(temp.path());

        let file = store.get_info("three//./four.tri").await?;
        assert_eq!(file.relative_path, "three/four.tri");
        assert_eq!(file.name, "four.tri");

        let dir = store.get_info("three//seven").await?;
        assert_eq!(dir.relative_path, "three/seven");
        Ok(())
    }

    #[tokio::test]
    async fn missing_entries_are_not_found() -> Result<(), Box<dyn std::error::Error>> {
        let temp = content_tree()?;
        let store = DirectoryStore::new(temp.path());

        let err = store.get_info("three/nine").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn refuses_to_leave_the_root() -> Result<(), Box<dyn std::error::Error>> {
        let temp = content_tree()?;
        let store = DirectoryStore::new(temp.path().join("three"));

        let err = store.get_info("../one.tri").await.unwrap_err();
        assert!(matches!(err, StoreError::OutsideRoot { .. }));
        Ok(())
    }
}
