//! Journal entries

use crate::domain::body::{render_html, rewrite_image_paths};
use crate::domain::fields::{parse_technologies, EntryDate};
use crate::domain::frontmatter::{Frontmatter, RawField};
use crate::domain::validation::{validate, ValidationReport};
use serde::Serialize;
use std::path::Path;

/// Fields read from a journal file before normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    /// File name the entry came from, for diagnostics
    pub source: String,
    pub title: String,
    /// Body with image paths already rewritten
    pub body: String,
    pub application_type: RawField,
    pub technologies: RawField,
    pub date: RawField,
}

impl RawEntry {
    /// Split a journal file into its raw fields.
    ///
    /// The title is the file name without its extension.
    pub fn from_markdown(file_name: &str, markdown: &str) -> Self {
        let frontmatter = Frontmatter::parse(markdown);
        let fields = frontmatter.fields();

        RawEntry {
            source: file_name.to_string(),
            title: title_from_file_name(file_name),
            body: rewrite_image_paths(&frontmatter.body),
            application_type: fields.application_type,
            technologies: fields.technologies,
            date: fields.date,
        }
    }

    /// Validate and normalize into a [`JournalEntry`]
    pub fn into_entry(self) -> Result<JournalEntry, ValidationReport> {
        let report = validate(&self);
        if !report.is_valid() {
            return Err(report);
        }

        Ok(JournalEntry {
            technologies: parse_technologies(self.technologies.as_str()),
            date: EntryDate::parse(self.date.as_str()),
            application_type: self.application_type.as_str().to_string(),
            title: self.title,
            body: self.body,
        })
    }
}

fn title_from_file_name(file_name: &str) -> String {
    Path::new(file_name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// A validated journal entry.
///
/// The only way to obtain one outside this crate is [`RawEntry::into_entry`],
/// so every entry in a catalog has passed validation.
///
/// ```compile_fail
/// use devlog::domain::{EntryDate, JournalEntry};
///
/// let entry = JournalEntry::new("", "", "NOT FOUND", vec![], EntryDate::unset());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JournalEntry {
    title: String,
    body: String,
    application_type: String,
    technologies: Vec<String>,
    date: EntryDate,
}

impl JournalEntry {
    #[cfg(test)]
    pub(crate) fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        application_type: impl Into<String>,
        technologies: Vec<String>,
        date: EntryDate,
    ) -> Self {
        JournalEntry {
            title: title.into(),
            body: body.into(),
            application_type: application_type.into(),
            technologies,
            date,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Markdown body, image paths already pointing at the published folder
    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn body_html(&self) -> String {
        render_html(&self.body)
    }

    pub fn application_type(&self) -> &str {
        &self.application_type
    }

    pub fn technologies(&self) -> &[String] {
        &self.technologies
    }

    pub fn uses(&self, technology: &str) -> bool {
        self.technologies.iter().any(|t| t == technology)
    }

    pub fn date(&self) -> EntryDate {
        self.date
    }
}
