//! Inline substitution pipeline
//!
//! Each line of prose passes through a fixed sequence of textual
//! substitutions, one per Markdown convention. The sequence is data rather
//! than a hard-coded function body: callers can drop individual rules (a
//! code-looking line keeps its literal quote characters, for example)
//! without disturbing the relative order of the rest.
//!
//! Paired delimiters match the *outermost* pair on a line, so two separate
//! spans of the same kind merge into one. Lines with a single span per
//! delimiter convert exactly; the merge is a known limitation of the
//! line-at-a-time approach.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static RE_COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<!--(?<note>.*)-->").expect("valid comment regex"));
static RE_SUPERSCRIPT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\^(?<span>.+)\^").expect("valid superscript regex"));
static RE_BOLD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*(?<span>.+)\*").expect("valid bold regex"));
static RE_INLINE_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"`(?<span>.+)`").expect("valid inline code regex"));
static RE_SINGLE_QUOTES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"'(?<span>.+)'").expect("valid single quote regex"));
static RE_DOUBLE_QUOTES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""(?<span>.+)""#).expect("valid double quote regex"));
static RE_EMPHASIS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r" _(?<span>.+)_ ").expect("valid emphasis regex"));

/// A single substitution in the inline pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineRule {
    /// `&` becomes `\&`.
    EscapeAmpersand,
    /// `<!-- ... -->` spans are dropped.
    StripComments,
    /// `^text^` becomes `\textsuperscript{text}`.
    Superscript,
    /// `*text*` becomes `\textbf{text}`.
    Bold,
    /// `` `text` `` becomes `\texttt{text}`.
    InlineCode,
    /// `'text'` becomes `` `text' ``.
    SingleQuotes,
    /// `"text"` becomes ``` ``text'' ```.
    DoubleQuotes,
    /// `_text_`, surrounded by spaces, becomes `\emph{text}`.
    Emphasis,
}

/// The canonical rule order. Ampersand escaping runs first so that later
/// rules never see an unescaped `&`, and comment stripping runs before any
/// delimiter matching so comment bodies cannot open a span.
const STANDARD: [InlineRule; 8] = [
    InlineRule::EscapeAmpersand,
    InlineRule::StripComments,
    InlineRule::Superscript,
    InlineRule::Bold,
    InlineRule::InlineCode,
    InlineRule::SingleQuotes,
    InlineRule::DoubleQuotes,
    InlineRule::Emphasis,
];

/// An ordered set of inline substitutions.
#[derive(Debug, Clone)]
pub struct InlineRules {
    rules: Vec<InlineRule>,
}

impl InlineRules {
    /// The full pipeline in its canonical order.
    pub fn standard() -> Self {
        InlineRules {
            rules: STANDARD.to_vec(),
        }
    }

    /// The canonical pipeline with the given rules removed. The relative
    /// order of the remaining rules is preserved.
    pub fn without(skipped: &[InlineRule]) -> Self {
        InlineRules {
            rules: STANDARD
                .iter()
                .copied()
                .filter(|rule| !skipped.contains(rule))
                .collect(),
        }
    }

    /// Run every configured substitution over one line of prose.
    pub fn apply(&self, line: &str) -> String {
        let mut result = line.to_string();
        for rule in &self.rules {
            result = apply_rule(*rule, &result);
        }
        result
    }
}

impl Default for InlineRules {
    fn default() -> Self {
        InlineRules::standard()
    }
}

fn apply_rule(rule: InlineRule, text: &str) -> String {
    match rule {
        InlineRule::EscapeAmpersand => text.replace('&', "\\&"),
        InlineRule::StripComments => RE_COMMENT.replace_all(text, "").into_owned(),
        InlineRule::Superscript => RE_SUPERSCRIPT
            .replace_all(text, |caps: &Captures| {
                format!("\\textsuperscript{{{}}}", &caps["span"])
            })
            .into_owned(),
        InlineRule::Bold => RE_BOLD
            .replace_all(text, |caps: &Captures| {
                format!("\\textbf{{{}}}", &caps["span"])
            })
            .into_owned(),
        InlineRule::InlineCode => RE_INLINE_CODE
            .replace_all(text, |caps: &Captures| {
                format!("\\texttt{{{}}}", &caps["span"])
            })
            .into_owned(),
        InlineRule::SingleQuotes => RE_SINGLE_QUOTES
            .replace_all(text, |caps: &Captures| format!("`{}'", &caps["span"]))
            .into_owned(),
        InlineRule::DoubleQuotes => RE_DOUBLE_QUOTES
            .replace_all(text, |caps: &Captures| format!("``{}''", &caps["span"]))
            .into_owned(),
        InlineRule::Emphasis => RE_EMPHASIS
            .replace_all(text, |caps: &Captures| {
                format!(" \\emph{{{}}} ", &caps["span"])
            })
            .into_owned(),
    }
}
