//! Image sync use case
//!
//! Mirrors the image folder of the notes repository into a local directory
//! so rewritten `/ObsidianImages/...` links resolve.

use crate::error::{DevlogError, Result};
use crate::infrastructure::{Config, ContentSource};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::OnceCell;

/// Service syncing journal images at most once per process
pub struct ImageSync {
    source: Arc<dyn ContentSource>,
    images_path: String,
    dest: PathBuf,
    synced: OnceCell<usize>,
}

impl ImageSync {
    /// Create a new image sync writing into `config.images_dir`
    pub fn new(source: Arc<dyn ContentSource>, config: &Config) -> Self {
        Self::with_dest(source, config, config.images_dir.clone())
    }

    pub fn with_dest(source: Arc<dyn ContentSource>, config: &Config, dest: PathBuf) -> Self {
        ImageSync {
            source,
            images_path: config.images_path.clone(),
            dest,
            synced: OnceCell::new(),
        }
    }

    pub fn dest(&self) -> &Path {
        &self.dest
    }

    /// Number of files written by the successful sync, if one has run
    pub fn synced_count(&self) -> Option<usize> {
        self.synced.get().copied()
    }

    /// Sync images, returning false when the run failed.
    ///
    /// Once a run succeeds later calls return true without touching the
    /// network.
    pub async fn sync(&self) -> bool {
        match self.synced.get_or_try_init(|| self.download()).await {
            Ok(_) => true,
            Err(e) => {
                tracing::error!(%e, "failed to sync journal images");
                false
            }
        }
    }

    async fn download(&self) -> Result<usize> {
        // 1. Credential must be accepted before anything is listed
        if !self.source.verify_authentication().await {
            return Err(DevlogError::Authentication(
                "content source rejected the credential".to_string(),
            ));
        }

        // 2. List the image folder
        let files = self.source.list_contents(&self.images_path).await?;
        if files.is_empty() {
            tracing::info!(path = %self.images_path, "no files found in images folder");
            return Ok(0);
        }

        // 3. Download everything before touching the destination
        let mut downloads = Vec::new();
        for file in &files {
            let Some(url) = file.file_url() else {
                continue;
            };
            if !is_plain_file_name(&file.name) {
                tracing::warn!(file = %file.name, "skipping image with unsafe file name");
                continue;
            }
            let bytes = self
                .source
                .fetch_bytes(url)
                .await
                .map_err(|e| DevlogError::FileFetch {
                    file: file.name.clone(),
                    reason: e.to_string(),
                })?;
            downloads.push((file.name.clone(), bytes));
        }

        // 4. Stage the new contents beside the destination, then swap them in
        let staging = sibling_path(&self.dest, "staging")?;
        if let Err(e) = write_all(&staging, &downloads).await {
            remove_dir_logged(&staging).await;
            return Err(e);
        }
        replace_dir(&staging, &self.dest).await?;

        tracing::info!(
            count = downloads.len(),
            dest = %self.dest.display(),
            "synced journal images"
        );
        Ok(downloads.len())
    }
}

/// A single path component: no separators, not `.` or `..`
fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

/// `<dir>.devlog-<tag>-<pid>` in the same parent, so renames stay on one filesystem
fn sibling_path(dir: &Path, tag: &str) -> Result<PathBuf> {
    let name = dir
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            DevlogError::Config(format!("invalid images directory: {}", dir.display()))
        })?;
    Ok(dir.with_file_name(format!("{}.devlog-{}-{}", name, tag, std::process::id())))
}

async fn write_all(dir: &Path, files: &[(String, Vec<u8>)]) -> Result<()> {
    if fs::try_exists(dir).await? {
        fs::remove_dir_all(dir).await?;
    }
    fs::create_dir_all(dir).await?;

    for (name, bytes) in files {
        fs::write(dir.join(name), bytes).await?;
        tracing::info!(file = %name, "downloaded image");
    }
    Ok(())
}

/// Move `staging` to `dest`, discarding whatever `dest` held.
/// If the final rename fails the previous contents are put back.
async fn replace_dir(staging: &Path, dest: &Path) -> Result<()> {
    let previous = sibling_path(dest, "previous")?;
    let had_previous = fs::try_exists(dest).await?;

    if had_previous {
        if fs::try_exists(&previous).await? {
            fs::remove_dir_all(&previous).await?;
        }
        fs::rename(dest, &previous).await?;
    }

    if let Err(e) = fs::rename(staging, dest).await {
        if had_previous {
            if let Err(restore) = fs::rename(&previous, dest).await {
                tracing::error!(%restore, "failed to restore previous images");
            }
        }
        remove_dir_logged(staging).await;
        return Err(e.into());
    }

    if had_previous {
        remove_dir_logged(&previous).await;
    }
    Ok(())
}

async fn remove_dir_logged(dir: &Path) {
    if let Err(e) = fs::remove_dir_all(dir).await {
        tracing::error!(dir = %dir.display(), %e, "failed to remove temporary image directory");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::FakeSource;
    use std::sync::atomic::Ordering;
    use tempfile::TempDir;

    const IMAGES: &str = "Notes/images/Notes";

    fn image_sync(source: FakeSource, dest: &Path) -> (Arc<FakeSource>, ImageSync) {
        let source = Arc::new(source);
        let sync = ImageSync::with_dest(source.clone(), &Config::default(), dest.to_path_buf());
        (source, sync)
    }

    #[tokio::test]
    async fn test_sync_replaces_directory_contents() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("ObsidianImages");
        std::fs::create_dir_all(&dest).unwrap();
        std::fs::write(dest.join("stale.png"), b"old").unwrap();

        let (_, sync) = image_sync(
            FakeSource::new(IMAGES)
                .with_file("a.png", b"png-a")
                .with_file("b.jpg", b"jpg-b")
                .with_dir("nested"),
            &dest,
        );

        assert!(sync.sync().await);
        assert_eq!(sync.synced_count(), Some(2));
        assert!(!dest.join("stale.png").exists());
        assert_eq!(std::fs::read(dest.join("a.png")).unwrap(), b"png-a");
        assert_eq!(std::fs::read(dest.join("b.jpg")).unwrap(), b"jpg-b");
    }

    #[tokio::test]
    async fn test_sync_creates_missing_directory() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("wwwroot/ObsidianImages");
        let (_, sync) = image_sync(FakeSource::new(IMAGES).with_file("a.png", b"a"), &dest);

        assert!(sync.sync().await);
        assert!(dest.join("a.png").is_file());
    }

    #[tokio::test]
    async fn test_sync_runs_once_after_success() {
        let temp = TempDir::new().unwrap();
        let (source, sync) = image_sync(FakeSource::new(IMAGES).with_file("a.png", b"a"), temp.path());

        assert!(sync.sync().await);
        assert!(sync.sync().await);
        assert_eq!(source.list_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_download_keeps_old_images() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("old.png"), b"old").unwrap();
        let (_, sync) = image_sync(
            FakeSource::new(IMAGES)
                .with_file("a.png", b"a")
                .failing("a.png"),
            temp.path(),
        );

        assert!(!sync.sync().await);
        assert_eq!(sync.synced_count(), None);
        assert!(temp.path().join("old.png").exists());
    }

    #[tokio::test]
    async fn test_unsafe_names_are_skipped() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("site").join("ObsidianImages");
        let (_, sync) = image_sync(
            FakeSource::new(IMAGES)
                .with_file("../escape.png", b"bad")
                .with_file("nested/inner.png", b"bad")
                .with_file("..", b"bad")
                .with_file("ok.png", b"ok"),
            &dest,
        );

        assert!(sync.sync().await);
        assert_eq!(sync.synced_count(), Some(1));
        assert_eq!(std::fs::read(dest.join("ok.png")).unwrap(), b"ok");
        assert!(!temp.path().join("site").join("escape.png").exists());
        assert!(!dest.join("nested").exists());
    }

    #[tokio::test]
    async fn test_sync_leaves_no_temporary_directories() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("ObsidianImages");
        std::fs::create_dir_all(&dest).unwrap();
        std::fs::write(dest.join("old.png"), b"old").unwrap();
        let (_, sync) = image_sync(FakeSource::new(IMAGES).with_file("a.png", b"a"), &dest);

        assert!(sync.sync().await);
        let names: Vec<String> = std::fs::read_dir(temp.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["ObsidianImages"]);
    }

    #[tokio::test]
    async fn test_failed_staging_keeps_old_images() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("ObsidianImages");
        std::fs::create_dir_all(&dest).unwrap();
        std::fs::write(dest.join("old.png"), b"old").unwrap();
        // A plain file where the staging directory should go
        std::fs::write(sibling_path(&dest, "staging").unwrap(), b"blocker").unwrap();

        let (_, sync) = image_sync(FakeSource::new(IMAGES).with_file("a.png", b"a"), &dest);

        assert!(!sync.sync().await);
        assert_eq!(std::fs::read(dest.join("old.png")).unwrap(), b"old");
        assert!(!dest.join("a.png").exists());
    }

    #[test]
    fn test_plain_file_names() {
        assert!(is_plain_file_name("diagram.png"));
        assert!(is_plain_file_name("..hidden.png"));
        assert!(!is_plain_file_name(""));
        assert!(!is_plain_file_name(".."));
        assert!(!is_plain_file_name("a/b.png"));
        assert!(!is_plain_file_name("a\\b.png"));
    }

    #[tokio::test]
    async fn test_rejected_credential_fails() {
        let temp = TempDir::new().unwrap();
        let (source, sync) = image_sync(
            FakeSource::new(IMAGES).rejecting_credentials(),
            temp.path(),
        );
        assert!(!sync.sync().await);
        assert_eq!(source.list_calls.load(Ordering::SeqCst), 0);
    }
}
