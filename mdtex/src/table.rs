//! Pipe-table rendering into booktabs tabulars
//!
//! A table starts at its header row and emits `\begin{table}`,
//! `\begin{tabular}{...}` and `\toprule` immediately; later rows stream
//! out one by one, so the whole table is never buffered. Header cells may
//! carry an alignment annotation, `<!-- c --> Title`, whose content is
//! copied verbatim into the tabular column list. Cells without one use
//! the configured default.
//!
//! Rows after the header are either a dashed separator (discarded), a
//! `<!--` configuration row selecting the horizontal-rule policy, or a
//! data row.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ConvertError;
use crate::inline::InlineRules;

static RE_HEADER_CELL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:<!--(?<align>.+?)-->)?(?<label>.*)$").expect("valid header cell regex")
});

/// State carried by an open table between its header row and the blank
/// line that closes it.
#[derive(Debug, Clone)]
pub struct TableContext {
    /// One tabular column expression per header cell.
    pub alignments: Vec<String>,
    /// Draw a `\midrule` before every data row.
    pub rule_every_row: bool,
    pub(crate) caption: String,
}

impl TableContext {
    /// Parse a trimmed header row and emit the table preamble. The header
    /// must be closed by a trailing `|`; a half-open header is the one
    /// input this converter refuses outright, since every later row would
    /// be misread as prose.
    pub fn from_header(
        line: &str,
        default_alignment: &str,
    ) -> Result<(TableContext, Vec<String>), ConvertError> {
        if !line.ends_with('|') {
            return Err(ConvertError::MalformedTable(format!(
                "header row must end with '|': {line}"
            )));
        }

        let mut alignments = Vec::new();
        let mut labels = Vec::new();
        for cell in header_cells(line) {
            let (align, label) = match RE_HEADER_CELL.captures(cell) {
                Some(caps) => (
                    caps.name("align").map(|found| found.as_str().trim().to_string()),
                    caps["label"].trim().to_string(),
                ),
                None => (None, cell.to_string()),
            };
            alignments.push(align.unwrap_or_else(|| default_alignment.to_string()));
            labels.push(label);
        }

        let header = labels
            .iter()
            .map(|label| format!("\\textbf{{{label}}}"))
            .collect::<Vec<_>>()
            .join(" & ");
        let preamble = vec![
            "\\begin{table}".to_string(),
            format!("\\begin{{tabular}}{{{}}}", alignments.join(" ")),
            "\\toprule".to_string(),
            format!("{header} \\\\"),
        ];

        let context = TableContext {
            alignments,
            rule_every_row: false,
            caption: String::new(),
        };
        Ok((context, preamble))
    }

    /// Apply a configuration row. Selecting the header-only policy emits
    /// its `\midrule` right away; the every-row policy defers to
    /// [`TableContext::render_row`]. Rows with no recognized marker are
    /// discarded.
    pub fn configure(&mut self, line: &str) -> Vec<String> {
        if line.contains("line every row") {
            self.rule_every_row = true;
            Vec::new()
        } else if line.contains("line header only") {
            vec!["\\midrule".to_string()]
        } else {
            Vec::new()
        }
    }

    /// Render one data row. Cells are split on `|` with empty edge fields
    /// dropped, trimmed, and run through the inline pipeline.
    pub fn render_row(&self, line: &str, rules: &InlineRules) -> Vec<String> {
        let mut fields: Vec<&str> = line.split('|').collect();
        if matches!(fields.first(), Some(first) if first.is_empty()) {
            fields.remove(0);
        }
        if matches!(fields.last(), Some(last) if last.is_empty()) {
            fields.pop();
        }
        let cells: Vec<String> = fields.iter().map(|cell| rules.apply(cell.trim())).collect();
        let row = format!("{} \\\\", cells.join(" & "));
        if self.rule_every_row {
            vec!["\\midrule".to_string(), row]
        } else {
            vec![row]
        }
    }
}

/// Header cells are everything between the first and last `|`.
fn header_cells(line: &str) -> impl Iterator<Item = &str> {
    let mut fields: Vec<&str> = line.split('|').collect();
    if !fields.is_empty() {
        fields.remove(0);
    }
    fields.pop();
    fields.into_iter().map(str::trim)
}

/// A dashed row under the header carries only alignment hints for other
/// Markdown tools and produces no output.
pub fn is_separator_row(line: &str) -> bool {
    line.starts_with("|---") || line.starts_with("| ---")
}

/// Configuration rows open with a comment marker instead of a pipe.
pub fn is_config_row(line: &str) -> bool {
    line.starts_with("<!--")
}
