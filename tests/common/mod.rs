#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};

pub const JOURNAL_DIR: &str = "Notes/Programming Journal";

pub fn devlog_cmd() -> Command {
    let mut cmd = Command::cargo_bin("devlog").unwrap();
    cmd.env_remove("GITHUB_REPO_ACCESS");
    cmd.env_remove("DEVLOG_LOG");
    cmd
}

/// A journal document with well-formed frontmatter
pub fn journal_doc(app_type: &str, technologies: &str, date: &str, body: &str) -> String {
    format!(
        "---\napplication type: {}\ntechnologies: '\"{}\"'\ndate: {}\n---\n{}",
        app_type, technologies, date, body
    )
}

/// Write a file into the journal folder of a notes checkout
pub fn write_journal(root: &Path, name: &str, content: &str) -> PathBuf {
    let dir = root.join(JOURNAL_DIR);
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}
