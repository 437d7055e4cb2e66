//! Content source abstraction
//!
//! A content source is the notes repository seen as a folder listing plus
//! file downloads. The remote hosting API and a local checkout both fit.

use crate::error::Result;
use async_trait::async_trait;
use serde::Deserialize;

/// Kind of item in a folder listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    File,
    Dir,
    #[serde(other)]
    Other,
}

/// One item of a folder listing
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteContent {
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub kind: ContentKind,
    /// Location to pass to [`ContentSource::fetch_text`]; absent for folders
    pub download_url: Option<String>,
}

impl RemoteContent {
    /// Download location of a file, `None` for folders and unlinked items
    pub fn file_url(&self) -> Option<&str> {
        match (self.kind, self.download_url.as_deref()) {
            (ContentKind::File, Some(url)) if !url.is_empty() => Some(url),
            _ => None,
        }
    }

    pub fn is_markdown(&self) -> bool {
        self.name.ends_with(".md")
    }
}

/// Read access to a notes repository
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Check that the credential is accepted. Must succeed before listing.
    async fn verify_authentication(&self) -> bool;

    /// List the items of a folder
    async fn list_contents(&self, path: &str) -> Result<Vec<RemoteContent>>;

    /// Download a file as text
    async fn fetch_text(&self, download_url: &str) -> Result<String>;

    /// Download a file as bytes
    async fn fetch_bytes(&self, download_url: &str) -> Result<Vec<u8>>;
}
