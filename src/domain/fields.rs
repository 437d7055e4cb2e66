//! Normalization of raw frontmatter values into typed fields

use chrono::NaiveDate;
use serde::Serialize;

const QUOTE_OPEN: &str = "'\"";
const QUOTE_CLOSE: &str = "\"'";

/// Date formats accepted in the `date:` field, tried in order.
/// Slash dates are month-first.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// True when technology text is wrapped as `'"…"'`
pub fn is_quoted_technologies(raw: &str) -> bool {
    raw.starts_with(QUOTE_OPEN) && raw.ends_with(QUOTE_CLOSE)
}

/// Split `'"a, b, c"'` into `["a", "b", "c"]`.
///
/// Empty segments are kept so `'"a,,b"'` gives three items.
pub fn parse_technologies(raw: &str) -> Vec<String> {
    let inner = if raw.len() >= 4 && is_quoted_technologies(raw) {
        &raw[QUOTE_OPEN.len()..raw.len() - QUOTE_CLOSE.len()]
    } else {
        raw
    };

    inner
        .trim_matches('"')
        .split(',')
        .map(|tech| tech.trim().to_string())
        .collect()
}

/// Calendar date of a journal entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct EntryDate {
    pub value: NaiveDate,
    /// The raw text could not be parsed and `value` is the unset date
    pub defaulted: bool,
}

impl EntryDate {
    /// A successfully parsed date
    pub fn new(value: NaiveDate) -> Self {
        EntryDate {
            value,
            defaulted: false,
        }
    }

    /// The placeholder used when a date cannot be parsed: 0001-01-01
    pub fn unset() -> Self {
        EntryDate {
            value: NaiveDate::from_ymd_opt(1, 1, 1).unwrap_or(NaiveDate::MIN),
            defaulted: true,
        }
    }

    /// Parse date text. Never fails: unparsable text gives [`EntryDate::unset`].
    pub fn parse(raw: &str) -> Self {
        let text = raw.trim();
        DATE_FORMATS
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
            .map(EntryDate::new)
            .unwrap_or_else(EntryDate::unset)
    }
}
