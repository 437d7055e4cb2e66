//! Local checkout of the notes repository

use crate::error::{DevlogError, Result};
use crate::infrastructure::source::{ContentKind, ContentSource, RemoteContent};
use async_trait::async_trait;
use std::path::PathBuf;
use walkdir::WalkDir;

/// Reads a notes repository from a directory on disk.
///
/// Download locations are absolute file paths.
#[derive(Debug, Clone)]
pub struct LocalSource {
    root: PathBuf,
}

impl LocalSource {
    pub fn new(root: PathBuf) -> Self {
        LocalSource { root }
    }

    fn list_dir(&self, path: &str) -> Result<Vec<RemoteContent>> {
        let dir = self.root.join(path.trim_matches('/'));
        if !dir.is_dir() {
            return Err(DevlogError::Api {
                status: 404,
                message: format!("Folder not found: {}", dir.display()),
            });
        }

        let mut items = Vec::new();
        for entry in WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| DevlogError::Io(e.into()))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            let relative = entry
                .path()
                .strip_prefix(&self.root)
                .unwrap_or(entry.path())
                .to_string_lossy()
                .replace('\\', "/");

            let (kind, download_url) = if entry.file_type().is_file() {
                (
                    ContentKind::File,
                    Some(entry.path().to_string_lossy().into_owned()),
                )
            } else if entry.file_type().is_dir() {
                (ContentKind::Dir, None)
            } else {
                (ContentKind::Other, None)
            };

            items.push(RemoteContent {
                name,
                path: relative,
                kind,
                download_url,
            });
        }

        Ok(items)
    }
}

#[async_trait]
impl ContentSource for LocalSource {
    async fn verify_authentication(&self) -> bool {
        let found = self.root.is_dir();
        if !found {
            tracing::warn!(root = %self.root.display(), "notes directory not found");
        }
        found
    }

    async fn list_contents(&self, path: &str) -> Result<Vec<RemoteContent>> {
        self.list_dir(path)
    }

    async fn fetch_text(&self, download_url: &str) -> Result<String> {
        Ok(tokio::fs::read_to_string(download_url).await?)
    }

    async fn fetch_bytes(&self, download_url: &str) -> Result<Vec<u8>> {
        Ok(tokio::fs::read(download_url).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_lists_files_and_folders_sorted() {
        let temp = TempDir::new().unwrap();
        let journal = temp.path().join("Notes/Programming Journal");
        fs::create_dir_all(journal.join("drafts")).unwrap();
        fs::write(journal.join("b.md"), "b").unwrap();
        fs::write(journal.join("a.md"), "a").unwrap();

        let source = LocalSource::new(temp.path().to_path_buf());
        let items = source
            .list_contents("Notes/Programming Journal")
            .await
            .unwrap();

        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["a.md", "b.md", "drafts"]);
        assert_eq!(items[0].path, "Notes/Programming Journal/a.md");
        assert_eq!(items[2].kind, ContentKind::Dir);
        assert!(items[2].file_url().is_none());

        let text = source.fetch_text(items[1].file_url().unwrap()).await.unwrap();
        assert_eq!(text, "b");
    }

    #[tokio::test]
    async fn test_missing_folder_is_api_error() {
        let temp = TempDir::new().unwrap();
        let source = LocalSource::new(temp.path().to_path_buf());
        assert!(source.verify_authentication().await);
        assert!(matches!(
            source.list_contents("missing").await,
            Err(DevlogError::Api { status: 404, .. })
        ));
    }

    #[tokio::test]
    async fn test_missing_root_fails_verification() {
        let source = LocalSource::new(PathBuf::from("/definitely/not/a/notes/dir"));
        assert!(!source.verify_authentication().await);
    }
}
