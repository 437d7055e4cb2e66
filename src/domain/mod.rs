//! Domain layer - Journal parsing, validation and views

pub mod body;
pub mod catalog;
pub mod entry;
pub mod fields;
pub mod frontmatter;
pub mod validation;
pub mod view;

pub use catalog::JournalCatalog;
pub use entry::{JournalEntry, RawEntry};
pub use fields::EntryDate;
pub use frontmatter::{Frontmatter, RawField, NOT_FOUND};
pub use validation::{ValidationReport, Violation};
pub use view::{filter_and_sort, JournalQuery, JournalView, SortKey};
