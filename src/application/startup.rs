//! Startup pass: warm the journal cache and sync images

use crate::application::{ImageSync, JournalService};
use std::future::Future;

/// How a startup pass ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupOutcome {
    Completed { entries: usize, images_synced: bool },
    Cancelled,
}

/// Populate the journal catalog, then sync images, stopping early if
/// `shutdown` resolves first.
pub async fn run_startup<F>(journals: &JournalService, images: &ImageSync, shutdown: F) -> StartupOutcome
where
    F: Future<Output = ()>,
{
    tracing::info!("initializing journal data");

    let work = async {
        let catalog = journals.populate_catalog().await;
        let images_synced = images.sync().await;
        StartupOutcome::Completed {
            entries: catalog.len(),
            images_synced,
        }
    };

    tokio::select! {
        outcome = work => {
            tracing::info!(?outcome, "journal data initialization finished");
            outcome
        }
        _ = shutdown => {
            tracing::warn!("journal data initialization cancelled");
            StartupOutcome::Cancelled
        }
    }
}
