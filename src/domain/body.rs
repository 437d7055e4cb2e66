//! Journal body rewriting and rendering

use pulldown_cmark::{html, Options, Parser as MdParser};
use regex::Regex;
use std::sync::OnceLock;

/// Folder segment image links use inside the notes repository
pub const SOURCE_IMAGE_SEGMENT: &str = "Images/Notes/";

/// Path segment the synced images are published under
pub const PUBLISHED_IMAGE_SEGMENT: &str = "/ObsidianImages/";

/// `![alt](…images/notes/rest)` where the path still holds the source segment
fn source_image_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"(?i)!\[([^\]]*)\]\(\s*[^)\s]*?images/notes/([^)]*)\)").unwrap()
    })
}

/// `![alt](ObsidianImages/rest)` missing its leading slash
fn relative_published_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"!\[([^\]]*)\]\(\s*ObsidianImages/([^)]*)\)").unwrap())
}

/// Point image references at the published image folder.
///
/// Runs three passes in order: a literal replace of the source segment, a
/// case-insensitive rewrite of markdown image links the literal pass missed,
/// and a pass adding the leading `/` to relative published links.
pub fn rewrite_image_paths(body: &str) -> String {
    if body.is_empty() {
        return String::new();
    }

    let replaced = body.replace(SOURCE_IMAGE_SEGMENT, PUBLISHED_IMAGE_SEGMENT);

    let linked = source_image_regex().replace_all(&replaced, |caps: &regex::Captures| {
        format!("![{}]({}{})", &caps[1], PUBLISHED_IMAGE_SEGMENT, &caps[2])
    });

    relative_published_regex()
        .replace_all(&linked, "![$1](/ObsidianImages/$2)")
        .into_owned()
}

/// Render a markdown body to HTML
pub fn render_html(body: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = MdParser::new_ext(body, options);
    let mut output = String::new();
    html::push_html(&mut output, parser);
    output
}
