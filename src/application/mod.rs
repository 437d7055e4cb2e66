//! Application layer - Use cases and orchestration

pub mod populate;
pub mod startup;
pub mod sync_images;

#[cfg(test)]
pub(crate) mod test_support;

pub use populate::{ingest_document, JournalService};
pub use startup::{run_startup, StartupOutcome};
pub use sync_images::ImageSync;
