//! Frontmatter extraction from journal markdown
//!
//! A journal document starts with a properties block bounded by two `---`
//! markers. The block holds three labelled lines:
//!
//! ```text
//! ---
//! application type: API
//! technologies: '"C#, SQL"'
//! date: 3/18/2025
//! ---
//! Body text
//! ```
//!
//! Labels are located independently and case-insensitively, so their order
//! inside the block does not matter.

use std::fmt;

/// Placeholder reported for a label that is absent from the properties block
pub const NOT_FOUND: &str = "NOT FOUND";

const DELIMITER: &str = "---";

const APPLICATION_TYPE_LABEL: &str = "application type:";
const TECHNOLOGIES_LABEL: &str = "technologies:";
const DATE_LABEL: &str = "date:";

/// A labelled value read from the properties block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawField {
    /// Label absent, or nothing follows it before the end of the line
    Missing,
    /// Trimmed text following the label (may be empty)
    Value(String),
}

impl RawField {
    /// Text of the field, `NOT FOUND` when missing
    pub fn as_str(&self) -> &str {
        match self {
            RawField::Missing => NOT_FOUND,
            RawField::Value(value) => value,
        }
    }

    /// True when the field carries no usable value: missing, empty, or the
    /// literal placeholder text
    pub fn is_absent(&self) -> bool {
        is_blank_or_placeholder(self.as_str())
    }
}

impl fmt::Display for RawField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// True for empty text or the `NOT FOUND` placeholder
pub fn is_blank_or_placeholder(text: &str) -> bool {
    text.is_empty() || text == NOT_FOUND
}

/// The three labelled fields of a journal document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontmatterFields {
    pub application_type: RawField,
    pub technologies: RawField,
    pub date: RawField,
}

/// A document split into its properties block and its body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontmatter {
    /// Text between the two delimiters, trimmed
    pub properties: String,
    /// Text after the second delimiter, trimmed
    pub body: String,
}

impl Frontmatter {
    /// Split a markdown document on its first two `---` markers.
    ///
    /// Documents with fewer than two markers yield empty properties and an
    /// empty body; validation rejects them later.
    pub fn parse(markdown: &str) -> Self {
        let Some(first) = markdown.find(DELIMITER) else {
            return Frontmatter::default();
        };

        let properties_start = first + DELIMITER.len();
        let Some(offset) = markdown[properties_start..].find(DELIMITER) else {
            return Frontmatter::default();
        };
        let second = properties_start + offset;

        Frontmatter {
            properties: markdown[properties_start..second].trim().to_string(),
            body: markdown[second + DELIMITER.len()..].trim().to_string(),
        }
    }

    /// Extract the labelled fields from the properties block
    pub fn fields(&self) -> FrontmatterFields {
        FrontmatterFields {
            application_type: extract_label(&self.properties, APPLICATION_TYPE_LABEL),
            technologies: extract_label(&self.properties, TECHNOLOGIES_LABEL),
            date: extract_label(&self.properties, DATE_LABEL),
        }
    }
}

/// Find `label` case-insensitively and return the rest of its line.
fn extract_label(properties: &str, label: &str) -> RawField {
    // ASCII lowering keeps byte offsets aligned with the original text
    let lowered = properties.to_ascii_lowercase();
    let Some(index) = lowered.find(label) else {
        return RawField::Missing;
    };

    let start = index + label.len();
    let end = properties[start..]
        .find('\n')
        .map(|offset| start + offset)
        .unwrap_or(properties.len());

    if end > start {
        RawField::Value(properties[start..end].trim().to_string())
    } else {
        RawField::Missing
    }
}
