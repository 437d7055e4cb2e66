//! Journal entry validation
//!
//! Every rule runs on every entry so a single pass reports all problems
//! with a file. Violations are logged, never raised.

use crate::domain::entry::RawEntry;
use crate::domain::fields::is_quoted_technologies;
use crate::domain::frontmatter::is_blank_or_placeholder;
use std::fmt;

/// A single rule broken by a raw entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    Title,
    Body,
    ApplicationType,
    Technologies,
    UnquotedTechnologies,
    Date,
}

impl Violation {
    /// Frontmatter field the violation concerns
    pub fn field(&self) -> &'static str {
        match self {
            Violation::Title => "title",
            Violation::Body => "body",
            Violation::ApplicationType => "application type",
            Violation::Technologies | Violation::UnquotedTechnologies => "technologies",
            Violation::Date => "date",
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Title => write!(f, "invalid title"),
            Violation::Body => write!(f, "invalid body content"),
            Violation::ApplicationType => write!(f, "invalid application type"),
            Violation::Technologies => write!(f, "invalid technologies"),
            Violation::UnquotedTechnologies => write!(f, "technologies are not properly quoted"),
            Violation::Date => write!(f, "invalid date"),
        }
    }
}

/// Outcome of validating one raw entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn contains(&self, violation: Violation) -> bool {
        self.violations.contains(&violation)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.violations.iter().map(|v| v.to_string()).collect();
        f.write_str(&messages.join("; "))
    }
}

/// Check a raw entry against the journal rules, logging each violation
pub fn validate(entry: &RawEntry) -> ValidationReport {
    let mut report = ValidationReport::default();

    if is_blank_or_placeholder(&entry.title) {
        report.violations.push(Violation::Title);
    }

    if is_blank_or_placeholder(&entry.body) {
        report.violations.push(Violation::Body);
    }

    if entry.application_type.is_absent() {
        report.violations.push(Violation::ApplicationType);
    }

    if entry.technologies.is_absent() {
        report.violations.push(Violation::Technologies);
    } else if !is_quoted_technologies(entry.technologies.as_str()) {
        report.violations.push(Violation::UnquotedTechnologies);
    }

    // Only presence is checked; unparsable dates become the unset date
    if entry.date.is_absent() {
        report.violations.push(Violation::Date);
    }

    for violation in &report.violations {
        tracing::warn!(
            file = %entry.source,
            field = violation.field(),
            "journal file has {}",
            violation
        );
    }

    report
}
