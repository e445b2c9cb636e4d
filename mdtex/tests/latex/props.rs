//! Property tests over the inline pipeline and the whole converter.

use mdtex::{convert, InlineRules};
use proptest::prelude::*;

proptest! {
    // Ampersand escaping runs first and nothing later re-introduces a bare
    // ampersand, so every `&` in the output is escaped exactly once. Comment
    // spans are stripped wholesale and may swallow ampersands with them, so
    // the count comparison only holds for comment-free lines.
    #[test]
    fn ampersands_are_escaped_exactly_once(line in "[ -~]{0,60}") {
        prop_assume!(!line.contains("<!--"));
        let escaped = InlineRules::standard().apply(&line);
        let bytes = escaped.as_bytes();
        for (index, byte) in bytes.iter().enumerate() {
            if *byte == b'&' {
                prop_assert!(index > 0 && bytes[index - 1] == b'\\');
            }
        }
        prop_assert_eq!(escaped.matches('&').count(), line.matches('&').count());
    }

    #[test]
    fn conversion_never_panics(source in "[ -~\n]{0,400}") {
        let _ = convert(&source);
    }

    // Backslash-free input cannot smuggle environment commands through the
    // verbatim paths, so every emitted \begin has a matching \end even when
    // blocks are left open at end of input.
    #[test]
    fn successful_conversions_balance_environments(source in "[ -\\[\\]-~\n]{0,400}") {
        if let Ok(output) = convert(&source) {
            prop_assert_eq!(
                output.matches("\\begin{").count(),
                output.matches("\\end{").count()
            );
        }
    }
}
