//! Markdown to LaTeX conversion for the mdtex toolchain
//!
//!     mdtex turns a small, regular Markdown dialect into LaTeX fragments
//!     that slot into a hand-maintained report template. It is deliberately
//!     not a general Markdown engine: the dialect is strictly line-oriented,
//!     block structure is decided by line prefixes, and the output is a
//!     fragment (sectioning commands, environments, inline markup) rather
//!     than a standalone document.
//!
//! Architecture
//!
//!     The core is a line-at-a-time state machine (./block.rs). Each input
//!     line is interpreted against the current block state — prose, list,
//!     quote, fenced code, figure or table — and produces zero or more
//!     output lines immediately, so block bodies stream and nothing but
//!     caption text is ever buffered. Inline spans are rewritten by an
//!     ordered rule pipeline (./inline.rs); the pipeline is data, so call
//!     sites can skip individual rules without disturbing the others.
//!
//!     Everything under src/ is shell-agnostic library code, with one
//!     deliberate exception: ./typeset.rs exists to drive the external
//!     LaTeX toolchain and is feature-gated behind "native-typeset".
//!
//!     The file structure:
//!     .
//!     ├── lib.rs
//!     ├── error.rs
//!     ├── inline.rs      # Ordered inline substitution rules
//!     ├── heading.rs     # ATX headings to sectioning commands
//!     ├── table.rs       # Pipe tables to booktabs tabulars
//!     ├── block.rs       # The state machine driver
//!     ├── publish.rs     # File-level jobs and the project document pair
//!     └── typeset.rs     # External toolchain runner (feature-gated)
//!
//! Testing
//!
//!     Unit tests live next to the code they exercise; end-to-end document
//!     conversions live under tests/latex/ and the toolchain runner is
//!     exercised with stub binaries in tests/typeset.rs. Note that rust
//!     does not by default discover tests in subdirectories, so tests/lib.rs
//!     declares the modules explicitly.

pub mod block;
pub mod error;
pub mod heading;
pub mod inline;
pub mod publish;
pub mod table;

#[cfg(feature = "native-typeset")]
pub mod typeset;

pub use block::{ConvertOptions, Converter, ParserState};
pub use error::ConvertError;
pub use heading::Heading;
pub use inline::{InlineRule, InlineRules};
pub use table::TableContext;

/// Convert one whole document with default options.
pub fn convert(source: &str) -> Result<String, ConvertError> {
    convert_with_options(source, &ConvertOptions::default())
}

/// Convert one whole document.
///
/// Lines stream through the converter one at a time and every emitted line
/// gets a trailing newline, so generated fragments concatenate cleanly.
/// Whatever block is still open at end of input is closed.
pub fn convert_with_options(
    source: &str,
    options: &ConvertOptions,
) -> Result<String, ConvertError> {
    let mut converter = Converter::with_options(options.clone());
    let mut output = String::new();
    for line in source.lines() {
        for emitted in converter.process_line(line)? {
            output.push_str(&emitted);
            output.push('\n');
        }
    }
    for emitted in converter.finish() {
        output.push_str(&emitted);
        output.push('\n');
    }
    Ok(output)
}
