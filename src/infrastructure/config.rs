//! Configuration management

use crate::error::{DevlogError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "devlog.toml";

/// What to do when one journal file cannot be downloaded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FetchFailurePolicy {
    /// Log the failure and continue with the next file
    #[default]
    SkipFile,
    /// Stop ingesting and return the entries read so far, uncached
    AbortBatch,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Owner of the notes repository
    pub owner: String,
    /// Name of the notes repository
    pub repository: String,
    pub api_base: String,
    /// Folder holding the journal markdown files
    pub journal_path: String,
    /// Folder holding the images referenced by journal entries
    pub images_path: String,
    /// Local directory images are synced into
    pub images_dir: PathBuf,
    /// Environment variable holding the access token
    pub token_env: String,
    pub on_fetch_error: FetchFailurePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            owner: "conormcq24".to_string(),
            repository: "MyObsidianNotes".to_string(),
            api_base: "https://api.github.com/".to_string(),
            journal_path: "Notes/Programming Journal".to_string(),
            images_path: "Notes/images/Notes".to_string(),
            images_dir: PathBuf::from("wwwroot/ObsidianImages"),
            token_env: "GITHUB_REPO_ACCESS".to_string(),
            on_fetch_error: FetchFailurePolicy::default(),
        }
    }
}

impl Config {
    /// Load config from an explicit path, or from `devlog.toml` in the
    /// working directory if present, or fall back to defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    Self::load_from_file(default_path)
                } else {
                    Ok(Config::default())
                }
            }
        }
    }

    /// Load config from a TOML file; unspecified keys keep their defaults
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                DevlogError::Config(format!("Config file not found: {}", path.display()))
            } else {
                DevlogError::Io(e)
            }
        })?;

        Ok(toml::from_str(&contents)?)
    }

    /// Read the access token from the configured environment variable
    pub fn token(&self) -> Result<String> {
        match std::env::var(&self.token_env) {
            Ok(token) if !token.trim().is_empty() => Ok(token),
            _ => {
                tracing::error!(var = %self.token_env, "access token not found in environment");
                Err(DevlogError::MissingCredential(self.token_env.clone()))
            }
        }
    }
}
