//! Journal catalog

use crate::domain::entry::JournalEntry;
use std::collections::BTreeSet;

/// Validated journal entries in source listing order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JournalCatalog {
    entries: Vec<JournalEntry>,
}

impl JournalCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entry: JournalEntry) {
        self.entries.push(entry);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, JournalEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every technology used by any entry, deduplicated and sorted
    pub fn unique_technologies(&self) -> Vec<String> {
        self.entries
            .iter()
            .flat_map(|entry| entry.technologies().iter().cloned())
            .collect::<BTreeSet<String>>()
            .into_iter()
            .collect()
    }

    /// Every application type, deduplicated and sorted
    pub fn unique_application_types(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|entry| entry.application_type().to_string())
            .collect::<BTreeSet<String>>()
            .into_iter()
            .collect()
    }
}

impl FromIterator<JournalEntry> for JournalCatalog {
    fn from_iter<I: IntoIterator<Item = JournalEntry>>(iter: I) -> Self {
        JournalCatalog {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a JournalCatalog {
    type Item = &'a JournalEntry;
    type IntoIter = std::slice::Iter<'a, JournalEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
