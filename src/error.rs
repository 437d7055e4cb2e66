//! Error types for devlog

use thiserror::Error;

/// Main error type for devlog
#[derive(Debug, Error)]
pub enum DevlogError {
    #[error("Access token not found in environment variable {0}")]
    MissingCredential(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to fetch {file}: {reason}")]
    FileFetch { file: String, reason: String },

    #[error("Invalid journal entry: {0}")]
    InvalidEntry(String),

    #[error("Journal entry not found: {0}")]
    EntryNotFound(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),
}

impl DevlogError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            DevlogError::MissingCredential(_) => 2,
            DevlogError::InvalidEntry(_) => 3,
            DevlogError::EntryNotFound(_) => 4,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            DevlogError::MissingCredential(var) => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Export a token with read access to the notes repository: export {}=<token>\n\
                    • Point devlog at a local checkout instead: devlog --source-dir <path> list\n\
                    • Change the variable name with 'token_env' in devlog.toml",
                    self, var
                )
            }
            DevlogError::InvalidEntry(msg) => {
                format!(
                    "Invalid journal entry: {}\n\n\
                    Expected frontmatter:\n\
                    ---\n\
                    application type: Web Application\n\
                    technologies: '\"C#, SQL\"'\n\
                    date: 2025-03-18\n\
                    ---",
                    msg
                )
            }
            DevlogError::EntryNotFound(title) => {
                format!(
                    "Journal entry not found: '{}'\n\n\
                    Suggestions:\n\
                    • Titles are file names without the .md extension\n\
                    • Use 'devlog list' to see available entries",
                    title
                )
            }
            DevlogError::Api { status: 401, .. } | DevlogError::Api { status: 403, .. } => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Check that the access token has not expired\n\
                    • Check that the token can read the configured repository",
                    self
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using DevlogError
pub type Result<T> = std::result::Result<T, DevlogError>;
