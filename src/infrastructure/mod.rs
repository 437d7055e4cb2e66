//! Infrastructure layer - Configuration and content sources

pub mod config;
pub mod github;
pub mod local;
pub mod source;

pub use config::{Config, FetchFailurePolicy};
pub use github::GithubSource;
pub use local::LocalSource;
pub use source::{ContentKind, ContentSource, RemoteContent};
