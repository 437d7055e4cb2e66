//! devlog - Developer journal ingestion
//!
//! Pulls markdown journal entries from a notes repository, parses and
//! validates their frontmatter, and serves filtered, sorted views of the
//! resulting catalog.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::DevlogError;
