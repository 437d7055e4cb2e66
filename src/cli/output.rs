//! Output formatting utilities

use crate::domain::{EntryDate, JournalEntry, JournalView};

fn format_date(date: EntryDate) -> String {
    if date.defaulted {
        "undated   ".to_string()
    } else {
        date.value.format("%Y-%m-%d").to_string()
    }
}

/// Format a journal view, one entry per line, `*` marking the selection
pub fn format_entry_list(view: &JournalView) -> String {
    if view.entries.is_empty() {
        return "No journal entries found".to_string();
    }

    let mut output = String::new();
    for (index, entry) in view.entries.iter().enumerate() {
        let marker = if view.selected == Some(index) { '*' } else { ' ' };
        output.push_str(&format!(
            "{} {}  {}  [{}] {}\n",
            marker,
            format_date(entry.date()),
            entry.title(),
            entry.application_type(),
            entry.technologies().join(", ")
        ));
    }
    output
}

/// Format the distinct application types and technologies
pub fn format_facets(application_types: &[String], technologies: &[String]) -> String {
    if application_types.is_empty() && technologies.is_empty() {
        return "No journal entries found".to_string();
    }

    let mut output = String::from("Application types:\n");
    for app_type in application_types {
        output.push_str(&format!("  {}\n", app_type));
    }
    output.push_str("Technologies:\n");
    for tech in technologies {
        output.push_str(&format!("  {}\n", tech));
    }
    output
}

/// Format the metadata of one entry
pub fn format_entry_details(entry: &JournalEntry) -> String {
    let date = entry.date();
    let date_text = if date.defaulted {
        format!("{} (unparsed)", date.value.format("%Y-%m-%d"))
    } else {
        date.value.format("%Y-%m-%d").to_string()
    };

    format!(
        "Title: {}\nApplication type: {}\nTechnologies: {}\nDate: {}\n",
        entry.title(),
        entry.application_type(),
        entry.technologies().join(", "),
        date_text
    )
}

/// Format one entry with its body as markdown or HTML
pub fn format_entry(entry: &JournalEntry, html: bool) -> String {
    let body = if html {
        entry.body_html()
    } else {
        entry.body().to_string()
    };
    format!("{}\n{}\n", format_entry_details(entry), body.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn entry(title: &str, date: EntryDate) -> JournalEntry {
        JournalEntry::new(
            title,
            "Some **bold** text",
            "API",
            vec!["C#".to_string(), "SQL".to_string()],
            date,
        )
    }

    fn dated(y: i32, m: u32, d: u32) -> EntryDate {
        EntryDate::new(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn test_format_empty_list() {
        let output = format_entry_list(&JournalView::default());
        assert_eq!(output, "No journal entries found");
    }

    #[test]
    fn test_format_entry_list_marks_selection() {
        let view = JournalView {
            entries: vec![entry("One", dated(2025, 3, 19)), entry("Two", dated(2025, 3, 18))],
            selected: Some(1),
            ..Default::default()
        };

        let output = format_entry_list(&view);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "  2025-03-19  One  [API] C#, SQL");
        assert_eq!(lines[1], "* 2025-03-18  Two  [API] C#, SQL");
    }

    #[test]
    fn test_format_undated_entry() {
        let view = JournalView {
            entries: vec![entry("Old", EntryDate::unset())],
            selected: Some(0),
            ..Default::default()
        };
        assert!(format_entry_list(&view).contains("undated"));
    }

    #[test]
    fn test_format_facets() {
        let output = format_facets(
            &["API".to_string(), "Game".to_string()],
            &["C#".to_string()],
        );
        assert_eq!(output, "Application types:\n  API\n  Game\nTechnologies:\n  C#\n");
    }

    #[test]
    fn test_format_entry_markdown_and_html() {
        let e = entry("One", dated(2025, 3, 18));
        let markdown = format_entry(&e, false);
        assert!(markdown.starts_with("Title: One\n"));
        assert!(markdown.contains("Some **bold** text"));

        let html = format_entry(&e, true);
        assert!(html.contains("<strong>bold</strong>"));
    }

    #[test]
    fn test_format_details_flags_unparsed_date() {
        let output = format_entry_details(&entry("Old", EntryDate::unset()));
        assert!(output.contains("Date: 0001-01-01 (unparsed)"));
    }
}
