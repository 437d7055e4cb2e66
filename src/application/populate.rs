//! Journal ingestion use case
//!
//! Pulls every markdown file from the journal folder of a content source,
//! runs it through parsing and validation, and caches the resulting catalog
//! for the rest of the process.

use crate::domain::{filter_and_sort, JournalCatalog, JournalEntry, JournalQuery, JournalView, RawEntry};
use crate::error::DevlogError;
use crate::infrastructure::{Config, ContentSource, FetchFailurePolicy};
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Parse and validate one journal file.
///
/// Returns `None` when the file fails validation; each violation has
/// already been logged.
pub fn ingest_document(file_name: &str, markdown: &str) -> Option<JournalEntry> {
    match RawEntry::from_markdown(file_name, markdown).into_entry() {
        Ok(entry) => {
            tracing::debug!(
                file = %file_name,
                application_type = %entry.application_type(),
                technologies = ?entry.technologies(),
                date = %entry.date().value,
                "parsed journal entry"
            );
            Some(entry)
        }
        Err(report) => {
            tracing::info!(file = %file_name, %report, "skipping invalid journal file");
            None
        }
    }
}

/// An ingestion run that did not finish; its entries are served but not cached
#[derive(Debug)]
struct Incomplete {
    catalog: JournalCatalog,
    reason: DevlogError,
}

impl Incomplete {
    fn empty(reason: DevlogError) -> Self {
        Incomplete {
            catalog: JournalCatalog::new(),
            reason,
        }
    }
}

/// Service owning the process-wide journal catalog
pub struct JournalService {
    source: Arc<dyn ContentSource>,
    journal_path: String,
    on_fetch_error: FetchFailurePolicy,
    catalog: OnceCell<Arc<JournalCatalog>>,
}

impl JournalService {
    /// Create a new journal service reading from `source`
    pub fn new(source: Arc<dyn ContentSource>, config: &Config) -> Self {
        JournalService {
            source,
            journal_path: config.journal_path.clone(),
            on_fetch_error: config.on_fetch_error,
            catalog: OnceCell::new(),
        }
    }

    /// True once a complete catalog has been cached
    pub fn is_populated(&self) -> bool {
        self.catalog.initialized()
    }

    /// Get the journal catalog, ingesting it on first use.
    ///
    /// Only one ingestion runs at a time and a finished catalog is published
    /// whole. After the first complete run the cached catalog is returned
    /// forever. Failed or aborted runs are returned to the caller but not
    /// cached, so the next call tries again.
    pub async fn populate_catalog(&self) -> Arc<JournalCatalog> {
        let result = self
            .catalog
            .get_or_try_init(|| async { self.ingest().await.map(Arc::new) })
            .await;

        match result {
            Ok(catalog) => Arc::clone(catalog),
            Err(incomplete) => {
                tracing::warn!(
                    reason = %incomplete.reason,
                    entries = incomplete.catalog.len(),
                    "journal ingestion incomplete, result not cached"
                );
                Arc::new(incomplete.catalog)
            }
        }
    }

    /// Filter and sort the catalog for one display request
    pub async fn browse(&self, query: &JournalQuery) -> JournalView {
        let catalog = self.populate_catalog().await;
        filter_and_sort(&catalog, query)
    }

    async fn ingest(&self) -> Result<JournalCatalog, Incomplete> {
        // 1. Credential must be accepted before anything is listed
        if !self.source.verify_authentication().await {
            tracing::warn!("failed to authenticate when retrieving journal entries");
            return Err(Incomplete::empty(DevlogError::Authentication(
                "content source rejected the credential".to_string(),
            )));
        }

        // 2. List the journal folder
        let files = match self.source.list_contents(&self.journal_path).await {
            Ok(files) => files,
            Err(e) => {
                tracing::warn!(path = %self.journal_path, %e, "failed to list journal folder");
                return Err(Incomplete::empty(e));
            }
        };

        if files.is_empty() {
            tracing::info!(path = %self.journal_path, "no files found in journal folder");
        }

        // 3. Fetch, parse and validate each markdown file in listing order
        let mut catalog = JournalCatalog::new();
        for file in &files {
            let Some(url) = file.file_url().filter(|_| file.is_markdown()) else {
                continue;
            };

            tracing::info!(file = %file.name, "processing journal file");
            let markdown = match self.source.fetch_text(url).await {
                Ok(text) => text,
                Err(e) => {
                    tracing::error!(file = %file.name, %e, "error fetching journal file");
                    match self.on_fetch_error {
                        FetchFailurePolicy::SkipFile => continue,
                        FetchFailurePolicy::AbortBatch => {
                            return Err(Incomplete {
                                catalog,
                                reason: DevlogError::FileFetch {
                                    file: file.name.clone(),
                                    reason: e.to_string(),
                                },
                            });
                        }
                    }
                }
            };

            if let Some(entry) = ingest_document(&file.name, &markdown) {
                catalog.add(entry);
            }
        }

        tracing::info!(entries = catalog.len(), "journal catalog populated");
        Ok(catalog)
    }
}
