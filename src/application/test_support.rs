//! In-memory content source for service tests

use crate::error::{DevlogError, Result};
use crate::infrastructure::{ContentKind, ContentSource, RemoteContent};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Serves a single folder of files from memory
pub(crate) struct FakeSource {
    folder: String,
    items: Vec<RemoteContent>,
    files: HashMap<String, Vec<u8>>,
    failing: HashSet<String>,
    authenticated: bool,
    pub list_calls: AtomicUsize,
}

impl FakeSource {
    pub fn new(folder: &str) -> Self {
        FakeSource {
            folder: folder.to_string(),
            items: Vec::new(),
            files: HashMap::new(),
            failing: HashSet::new(),
            authenticated: true,
            list_calls: AtomicUsize::new(0),
        }
    }

    fn url(&self, name: &str) -> String {
        format!("fake://{}/{}", self.folder, name)
    }

    pub fn with_file(mut self, name: &str, content: impl AsRef<[u8]>) -> Self {
        let url = self.url(name);
        self.items.push(RemoteContent {
            name: name.to_string(),
            path: format!("{}/{}", self.folder, name),
            kind: ContentKind::File,
            download_url: Some(url.clone()),
        });
        self.files.insert(url, content.as_ref().to_vec());
        self
    }

    pub fn with_dir(mut self, name: &str) -> Self {
        self.items.push(RemoteContent {
            name: name.to_string(),
            path: format!("{}/{}", self.folder, name),
            kind: ContentKind::Dir,
            download_url: None,
        });
        self
    }

    /// Downloads of `name` fail with a server error
    pub fn failing(mut self, name: &str) -> Self {
        let url = self.url(name);
        self.failing.insert(url);
        self
    }

    pub fn rejecting_credentials(mut self) -> Self {
        self.authenticated = false;
        self
    }

    fn download(&self, url: &str) -> Result<Vec<u8>> {
        if self.failing.contains(url) {
            return Err(DevlogError::Api {
                status: 500,
                message: "Internal Server Error".to_string(),
            });
        }
        self.files.get(url).cloned().ok_or_else(|| DevlogError::Api {
            status: 404,
            message: format!("No file at {}", url),
        })
    }
}

#[async_trait]
impl ContentSource for FakeSource {
    async fn verify_authentication(&self) -> bool {
        self.authenticated
    }

    async fn list_contents(&self, path: &str) -> Result<Vec<RemoteContent>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        // Let concurrent callers pile up behind the first ingestion
        tokio::task::yield_now().await;
        if path != self.folder {
            return Err(DevlogError::Api {
                status: 404,
                message: "Not Found".to_string(),
            });
        }
        Ok(self.items.clone())
    }

    async fn fetch_text(&self, download_url: &str) -> Result<String> {
        let bytes = self.download(download_url)?;
        String::from_utf8(bytes).map_err(|e| DevlogError::FileFetch {
            file: download_url.to_string(),
            reason: e.to_string(),
        })
    }

    async fn fetch_bytes(&self, download_url: &str) -> Result<Vec<u8>> {
        self.download(download_url)
    }
}
