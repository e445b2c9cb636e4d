//! Line-oriented converter core
//!
//! A document flows through [`Converter::process_line`] one line at a time.
//! The converter is a small state machine: most lines are prose handled in
//! the `Text` state, while lists, quotes, fenced code, figures and tables
//! each get their own state with their own line handling. Every call
//! returns the output lines produced by that input line, so block bodies
//! stream instead of being buffered; only caption text accumulates.
//!
//! States are entered only on their trigger line (a block opener) and left
//! only on their closing line (usually a blank). [`Converter::finish`]
//! closes whatever is still open at end of input, so a truncated document
//! yields balanced LaTeX.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ConvertError;
use crate::heading::Heading;
use crate::inline::{InlineRule, InlineRules};
use crate::table::{self, TableContext};

static RE_UNORDERED_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[*+-] (?<item>.+)$").expect("valid unordered item regex"));
static RE_ORDERED_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+\. (?<item>.+)$").expect("valid ordered item regex"));
static RE_LOCAL_INCLUDE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\[(?<text>.+)]\(\./(?<path>.+)\.md\)$").expect("valid local include regex")
});
static RE_LINK_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[(?<text>.+)]\((?<dest>.+)\)$").expect("valid link line regex"));
static RE_LINE_COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^<!--.*-->$").expect("valid line comment regex"));
static RE_FLOAT_LISTING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^```(?<lang>[^<]+)<!--(?<label>.+?)--><!--(?<caption>.+?)-->$")
        .expect("valid floated listing regex")
});

/// The block-level states of the converter. Exactly one is active at a
/// time; the set is closed and matched exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    Text,
    OrderedList,
    UnorderedList,
    Quote,
    Code,
    Figure,
    FigureCaption,
    Table,
    TableCaption,
}

/// Knobs for a conversion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Column expression used for table header cells that carry no
    /// alignment annotation of their own.
    pub default_column_alignment: String,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        ConvertOptions {
            default_column_alignment: "l".to_string(),
        }
    }
}

/// Caption buffer for the figure under construction.
#[derive(Debug, Clone, Default)]
struct FigureContext {
    caption: String,
}

/// Language tag captured at fence-open; body lines pass through unmodified.
#[derive(Debug, Clone)]
struct CodeBlockContext {
    language: Option<String>,
}

impl CodeBlockContext {
    fn opening_line(&self) -> String {
        match &self.language {
            Some(language) => {
                format!("\\begin{{lstlisting}}[style={language},language={language}]")
            }
            None => "\\begin{lstlisting}".to_string(),
        }
    }
}

/// The top-level driver: feeds each input line to the handler of the
/// current state and owns the per-block context while a block is open.
#[derive(Debug)]
pub struct Converter {
    state: ParserState,
    inline: InlineRules,
    code_line_rules: InlineRules,
    default_alignment: String,
    table: Option<TableContext>,
    figure: Option<FigureContext>,
    code: Option<CodeBlockContext>,
}

impl Converter {
    pub fn new() -> Self {
        Converter::with_options(ConvertOptions::default())
    }

    pub fn with_options(options: ConvertOptions) -> Self {
        Converter {
            state: ParserState::Text,
            inline: InlineRules::standard(),
            // Code-looking lines keep their literal quote characters, but
            // ampersands still need escaping.
            code_line_rules: InlineRules::without(&[
                InlineRule::SingleQuotes,
                InlineRule::DoubleQuotes,
            ]),
            default_alignment: options.default_column_alignment,
            table: None,
            figure: None,
            code: None,
        }
    }

    /// The current block-level state, mainly useful to drivers and tests.
    pub fn state(&self) -> ParserState {
        self.state
    }

    /// Convert one input line into zero or more output lines.
    pub fn process_line(&mut self, line: &str) -> Result<Vec<String>, ConvertError> {
        match self.state {
            ParserState::Text => self.text_line(line),
            ParserState::OrderedList => Ok(self.ordered_list_line(line)),
            ParserState::UnorderedList => Ok(self.unordered_list_line(line)),
            ParserState::Quote => Ok(self.quote_line(line)),
            ParserState::Code => Ok(self.code_line(line)),
            ParserState::Figure => Ok(self.figure_line(line)),
            ParserState::FigureCaption => Ok(self.figure_caption_line(line)),
            ParserState::Table => Ok(self.table_line(line)),
            ParserState::TableCaption => Ok(self.table_caption_line(line)),
        }
    }

    /// Close whatever block is still open at end of input, flushing a
    /// pending caption as-is (possibly empty).
    pub fn finish(&mut self) -> Vec<String> {
        let lines = match self.state {
            ParserState::Text => Vec::new(),
            ParserState::OrderedList => vec!["\\end{enumerate}".to_string()],
            ParserState::UnorderedList => vec!["\\end{itemize}".to_string()],
            ParserState::Quote => vec!["\\end{displayquote}".to_string()],
            ParserState::Code => vec!["\\end{lstlisting}".to_string()],
            ParserState::Figure => vec!["\\end{figure}".to_string()],
            ParserState::FigureCaption => {
                let caption = self
                    .figure
                    .take()
                    .map(|figure| figure.caption)
                    .unwrap_or_default();
                vec![format!("\\caption{{{caption}}}"), "\\end{figure}".to_string()]
            }
            ParserState::Table => vec![
                "\\bottomrule".to_string(),
                "\\end{tabular}".to_string(),
                "\\end{table}".to_string(),
            ],
            ParserState::TableCaption => {
                let caption = self
                    .table
                    .take()
                    .map(|table| table.caption)
                    .unwrap_or_default();
                vec![format!("\\caption{{{caption}}}"), "\\end{table}".to_string()]
            }
        };
        self.state = ParserState::Text;
        self.table = None;
        self.figure = None;
        self.code = None;
        lines
    }

    fn text_line(&mut self, line: &str) -> Result<Vec<String>, ConvertError> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(vec![String::new()]);
        }
        if let Some(heading) = Heading::parse(trimmed) {
            // Level 1 renders to nothing; the surrounding template carries
            // the document title.
            return Ok(heading.render(&self.inline).into_iter().collect());
        }
        if RE_LINE_COMMENT.is_match(trimmed) {
            return Ok(Vec::new());
        }
        if trimmed == "|figure" {
            self.figure = Some(FigureContext::default());
            self.state = ParserState::Figure;
            return Ok(vec!["\\begin{figure}".to_string()]);
        }
        if trimmed.starts_with('|') {
            let (context, preamble) = TableContext::from_header(trimmed, &self.default_alignment)?;
            self.table = Some(context);
            self.state = ParserState::Table;
            return Ok(preamble);
        }
        if let Some(caps) = RE_FLOAT_LISTING.captures(trimmed) {
            let language = caps["lang"].trim().to_string();
            let label = caps["label"].trim().to_string();
            let caption = caps["caption"].trim().to_string();
            self.code = Some(CodeBlockContext {
                language: Some(language.clone()),
            });
            self.state = ParserState::Code;
            return Ok(vec![
                "\\begin{lstlisting}[".to_string(),
                format!("\tstyle={language},"),
                format!("\tlanguage={language},"),
                format!("\tlabel={label},"),
                format!("\tcaption={{{caption}}},"),
                "\tfloat]".to_string(),
            ]);
        }
        if let Some(rest) = trimmed.strip_prefix("```") {
            let tag = rest.trim();
            let context = CodeBlockContext {
                language: (!tag.is_empty()).then(|| tag.to_string()),
            };
            let opener = context.opening_line();
            self.code = Some(context);
            self.state = ParserState::Code;
            return Ok(vec![opener]);
        }
        if let Some(rest) = trimmed.strip_prefix("> ") {
            self.state = ParserState::Quote;
            return Ok(vec![
                "\\begin{displayquote}".to_string(),
                self.inline.apply(rest),
            ]);
        }
        if let Some(caps) = RE_UNORDERED_ITEM.captures(trimmed) {
            self.state = ParserState::UnorderedList;
            return Ok(vec![
                "\\begin{itemize}".to_string(),
                format!("\\item {}", self.inline.apply(&caps["item"])),
            ]);
        }
        if let Some(caps) = RE_ORDERED_ITEM.captures(trimmed) {
            self.state = ParserState::OrderedList;
            return Ok(vec![
                "\\begin{enumerate}".to_string(),
                format!("\\item {}", self.inline.apply(&caps["item"])),
            ]);
        }
        if let Some(caps) = RE_LOCAL_INCLUDE.captures(trimmed) {
            return Ok(vec![format!("\\input{{{}}}", &caps["path"])]);
        }
        if let Some(caps) = RE_LINK_LINE.captures(trimmed) {
            return Ok(vec![format!("\\url{{{}}}", &caps["text"])]);
        }
        if trimmed.starts_with('`') && trimmed[1..].contains('`') {
            return Ok(vec![self.code_line_rules.apply(trimmed)]);
        }
        Ok(vec![self.inline.apply(trimmed)])
    }

    fn unordered_list_line(&mut self, line: &str) -> Vec<String> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            self.state = ParserState::Text;
            return vec!["\\end{itemize}".to_string(), String::new()];
        }
        match RE_UNORDERED_ITEM.captures(trimmed) {
            Some(caps) => vec![format!("\\item {}", self.inline.apply(&caps["item"]))],
            None => vec![self.inline.apply(trimmed)],
        }
    }

    fn ordered_list_line(&mut self, line: &str) -> Vec<String> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            self.state = ParserState::Text;
            return vec!["\\end{enumerate}".to_string(), String::new()];
        }
        match RE_ORDERED_ITEM.captures(trimmed) {
            Some(caps) => vec![format!("\\item {}", self.inline.apply(&caps["item"]))],
            None => vec![self.inline.apply(trimmed)],
        }
    }

    fn quote_line(&mut self, line: &str) -> Vec<String> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            self.state = ParserState::Text;
            return vec!["\\end{displayquote}".to_string(), String::new()];
        }
        let body = trimmed
            .strip_prefix("> ")
            .or_else(|| trimmed.strip_prefix('>'))
            .unwrap_or(trimmed);
        vec![self.inline.apply(body)]
    }

    fn code_line(&mut self, line: &str) -> Vec<String> {
        // Raw comparison: an indented fence is code body, not a terminator.
        if line == "```" {
            self.code.take();
            self.state = ParserState::Text;
            return vec!["\\end{lstlisting}".to_string()];
        }
        vec![line.to_string()]
    }

    fn figure_line(&mut self, line: &str) -> Vec<String> {
        if line.trim().is_empty() {
            self.state = ParserState::FigureCaption;
            return Vec::new();
        }
        vec![line.to_string()]
    }

    fn figure_caption_line(&mut self, line: &str) -> Vec<String> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            let caption = self
                .figure
                .take()
                .map(|figure| figure.caption)
                .unwrap_or_default();
            self.state = ParserState::Text;
            return vec![
                format!("\\caption{{{caption}}}"),
                "\\end{figure}".to_string(),
                String::new(),
            ];
        }
        if let Some(figure) = self.figure.as_mut() {
            append_caption_line(&mut figure.caption, trimmed, &self.inline);
        }
        Vec::new()
    }

    fn table_line(&mut self, line: &str) -> Vec<String> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            self.state = ParserState::TableCaption;
            return vec!["\\bottomrule".to_string(), "\\end{tabular}".to_string()];
        }
        if table::is_separator_row(trimmed) {
            return Vec::new();
        }
        if table::is_config_row(trimmed) {
            return match self.table.as_mut() {
                Some(context) => context.configure(trimmed),
                None => Vec::new(),
            };
        }
        match self.table.as_ref() {
            Some(context) => context.render_row(trimmed, &self.inline),
            None => Vec::new(),
        }
    }

    fn table_caption_line(&mut self, line: &str) -> Vec<String> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            let caption = self
                .table
                .take()
                .map(|table| table.caption)
                .unwrap_or_default();
            self.state = ParserState::Text;
            return vec![
                format!("\\caption{{{caption}}}"),
                "\\end{table}".to_string(),
                String::new(),
            ];
        }
        if let Some(context) = self.table.as_mut() {
            append_caption_line(&mut context.caption, trimmed, &self.inline);
        }
        Vec::new()
    }
}

impl Default for Converter {
    fn default() -> Self {
        Converter::new()
    }
}

/// Caption lines accumulate into one `\caption{...}` argument, joined by
/// single spaces. Lines that already carry a `\label{...}` are appended
/// raw so hand-written labels survive.
fn append_caption_line(buffer: &mut String, line: &str, rules: &InlineRules) {
    if !buffer.is_empty() {
        buffer.push(' ');
    }
    if line.starts_with("\\label{") {
        buffer.push_str(line);
    } else {
        buffer.push_str(&rules.apply(line));
    }
}
