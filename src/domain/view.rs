//! Filtered, sorted views over the journal catalog
//!
//! Views are computed from an explicit catalog and query on every request;
//! the catalog is never modified.

use crate::domain::catalog::JournalCatalog;
use crate::domain::entry::JournalEntry;
use crate::domain::frontmatter::is_blank_or_placeholder;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Ordering of a journal view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    TitleAsc,
    TitleDesc,
    DateAsc,
    #[default]
    DateDesc,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::TitleAsc => "title-asc",
            SortKey::TitleDesc => "title-desc",
            SortKey::DateAsc => "date-asc",
            SortKey::DateDesc => "date-desc",
        }
    }

    /// Parse a sort key, falling back to newest first for unknown input
    pub fn parse_or_default(input: &str) -> Self {
        input.parse().unwrap_or_else(|e| {
            tracing::warn!("{}; using {}", e, SortKey::default());
            SortKey::default()
        })
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "title-asc" => Ok(SortKey::TitleAsc),
            "title-desc" => Ok(SortKey::TitleDesc),
            "date-asc" => Ok(SortKey::DateAsc),
            "date-desc" => Ok(SortKey::DateDesc),
            _ => Err(format!(
                "Invalid sort key: {}. Must be one of: title-asc, title-desc, date-asc, date-desc",
                s
            )),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filters, ordering and selection requested for a view
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JournalQuery {
    pub application_type: Option<String>,
    pub technology: Option<String>,
    pub sort: SortKey,
    pub selected_title: Option<String>,
}

impl JournalQuery {
    /// Application type to filter on, if any.
    /// "all" and "all types" mean no filter.
    fn application_type_filter(&self) -> Option<&str> {
        let value = self.application_type.as_deref()?.trim();
        let lowered = value.to_lowercase();
        if is_blank_or_placeholder(value) || lowered == "all" || lowered == "all types" {
            None
        } else {
            Some(value)
        }
    }

    fn technology_filter(&self) -> Option<&str> {
        self.technology
            .as_deref()
            .map(str::trim)
            .filter(|tech| !tech.is_empty())
    }

    fn matches(&self, entry: &JournalEntry) -> bool {
        let app_type_ok = self
            .application_type_filter()
            .map_or(true, |app_type| entry.application_type() == app_type);
        let technology_ok = self
            .technology_filter()
            .map_or(true, |tech| entry.uses(tech));
        app_type_ok && technology_ok
    }
}

/// Result of applying a [`JournalQuery`] to a catalog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct JournalView {
    /// Matching entries in the requested order
    pub entries: Vec<JournalEntry>,
    /// Index into `entries` of the selected entry
    pub selected: Option<usize>,
    /// Application types across the whole catalog
    pub application_types: Vec<String>,
    /// Technologies across the whole catalog
    pub technologies: Vec<String>,
}

impl JournalView {
    pub fn selected_entry(&self) -> Option<&JournalEntry> {
        self.selected.and_then(|index| self.entries.get(index))
    }
}

/// Filter, sort and resolve the selection for one display request.
///
/// Selection marks an entry without moving it: an empty or unknown title
/// selects the first entry of the result.
pub fn filter_and_sort(catalog: &JournalCatalog, query: &JournalQuery) -> JournalView {
    let mut entries: Vec<JournalEntry> = catalog
        .iter()
        .filter(|entry| query.matches(entry))
        .cloned()
        .collect();

    sort_entries(&mut entries, query.sort);

    let selected = resolve_selection(&entries, query.selected_title.as_deref());

    JournalView {
        entries,
        selected,
        application_types: catalog.unique_application_types(),
        technologies: catalog.unique_technologies(),
    }
}

/// Stable sort: entries comparing equal keep their relative order
pub fn sort_entries(entries: &mut [JournalEntry], key: SortKey) {
    match key {
        SortKey::TitleAsc => entries.sort_by(|a, b| a.title().cmp(b.title())),
        SortKey::TitleDesc => entries.sort_by(|a, b| b.title().cmp(a.title())),
        SortKey::DateAsc => entries.sort_by(|a, b| a.date().value.cmp(&b.date().value)),
        SortKey::DateDesc => entries.sort_by(|a, b| b.date().value.cmp(&a.date().value)),
    }
}

fn resolve_selection(entries: &[JournalEntry], title: Option<&str>) -> Option<usize> {
    if entries.is_empty() {
        return None;
    }

    let found = title
        .filter(|t| !t.is_empty())
        .and_then(|t| entries.iter().position(|entry| entry.title() == t));

    Some(found.unwrap_or(0))
}
