//! Heading recognition and rendering
//!
//! ATX headings map one level deeper than their hash count suggests: the
//! single `#` title names the document (the surrounding LaTeX template
//! already carries it) and is dropped, `##` opens a chapter, and `###`
//! through `#####` map to section, subsection and subsubsection.
//!
//! A heading may carry an empty-text anchor, `[](#some-label)`, directly
//! after the hashes. The sectioning command always gets a `\label{}` so
//! that downstream references fail loudly inside LaTeX rather than
//! silently pointing nowhere.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::inline::InlineRules;

static RE_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?<hashes>#{1,5}) (?<rest>.*)$").expect("valid heading regex"));
static RE_ANCHOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\[\]\(#(?<label>[^)]*)\)(?<title>.*)$").expect("valid anchor regex")
});

/// A recognized ATX heading line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// Hash count, 1 through 5.
    pub level: u8,
    /// Title text with any anchor removed, not yet inline-processed.
    pub title: String,
    /// Anchor label, empty when the heading carries no anchor.
    pub label: String,
}

impl Heading {
    /// Parse a trimmed line as a heading. Lines with six or more hashes,
    /// or without a space after the hashes, are not headings.
    pub fn parse(line: &str) -> Option<Heading> {
        let caps = RE_HEADING.captures(line)?;
        let level = caps["hashes"].len() as u8;
        let rest = caps["rest"].trim();
        let (label, title) = match RE_ANCHOR.captures(rest) {
            Some(anchor) => (
                anchor["label"].to_string(),
                anchor["title"].trim().to_string(),
            ),
            None => (String::new(), rest.to_string()),
        };
        Some(Heading {
            level,
            title,
            label,
        })
    }

    /// Render the sectioning command, or `None` for the suppressed
    /// document-level heading.
    pub fn render(&self, rules: &InlineRules) -> Option<String> {
        let command = command_for_level(self.level)?;
        Some(format!(
            "\\{command}{{{}}}\\label{{{}}}",
            rules.apply(&self.title),
            self.label
        ))
    }
}

fn command_for_level(level: u8) -> Option<&'static str> {
    match level {
        2 => Some("chapter"),
        3 => Some("section"),
        4 => Some("subsection"),
        5 => Some("subsubsection"),
        _ => None,
    }
}
