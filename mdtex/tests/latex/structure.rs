//! Block structure tests: headings, lists, quotes, code and figures.

use mdtex::convert;

#[test]
fn test_heading_ladder() {
    let source = "# Title\n## Chapter\n### Section\n#### Subsection\n##### Subsubsection\n";
    let latex = convert(source).expect("converts");
    assert_eq!(
        latex,
        "\\chapter{Chapter}\\label{}\n\\section{Section}\\label{}\n\\subsection{Subsection}\\label{}\n\\subsubsection{Subsubsection}\\label{}\n"
    );
}

#[test]
fn test_ordered_list_exact_shape() {
    let latex = convert("1. foo\n2. bar\n\n").expect("converts");
    assert_eq!(
        latex,
        "\\begin{enumerate}\n\\item foo\n\\item bar\n\\end{enumerate}\n\n"
    );
}

#[test]
fn test_unordered_markers_are_interchangeable() {
    let latex = convert("* one\n+ two\n- three\n\n").expect("converts");
    assert_eq!(
        latex,
        "\\begin{itemize}\n\\item one\n\\item two\n\\item three\n\\end{itemize}\n\n"
    );
}

#[test]
fn test_list_item_continuation() {
    let latex = convert("* a point that\nkeeps going\n\n").expect("converts");
    assert_eq!(
        latex,
        "\\begin{itemize}\n\\item a point that\nkeeps going\n\\end{itemize}\n\n"
    );
}

#[test]
fn test_quote_block() {
    let latex = convert("> first line\n> second line\n\nafter\n").expect("converts");
    assert_eq!(
        latex,
        "\\begin{displayquote}\nfirst line\nsecond line\n\\end{displayquote}\n\nafter\n"
    );
}

#[test]
fn test_code_block_body_is_untouched() {
    let source = "```\nlet x = a & b; // *raw*\n'not a quote'\n```\n";
    let latex = convert(source).expect("converts");
    assert_eq!(
        latex,
        "\\begin{lstlisting}\nlet x = a & b; // *raw*\n'not a quote'\n\\end{lstlisting}\n"
    );
}

#[test]
fn test_floated_listing_parameters() {
    let source = "```python<!--lst:demo--><!--A worked demo-->\nprint(1)\n```\n";
    let latex = convert(source).expect("converts");
    assert!(latex.starts_with(
        "\\begin{lstlisting}[\n\tstyle=python,\n\tlanguage=python,\n\tlabel=lst:demo,\n\tcaption={A worked demo},\n\tfloat]\n"
    ));
    assert!(latex.ends_with("print(1)\n\\end{lstlisting}\n"));
}

#[test]
fn test_figure_exact_shape() {
    let source = "|figure\n\\includegraphics{x.pdf}\n\nA chart\n\n";
    let latex = convert(source).expect("converts");
    assert_eq!(
        latex,
        "\\begin{figure}\n\\includegraphics{x.pdf}\n\\caption{A chart}\n\\end{figure}\n\n"
    );
}

#[test]
fn test_unclosed_blocks_are_closed_at_end_of_input() {
    assert!(convert("```rust\nlet x = 1;")
        .expect("converts")
        .ends_with("\\end{lstlisting}\n"));
    assert!(convert("> dangling quote")
        .expect("converts")
        .ends_with("\\end{displayquote}\n"));
    assert!(convert("* dangling item")
        .expect("converts")
        .ends_with("\\end{itemize}\n"));
}

#[test]
fn test_paragraph_blank_lines_survive() {
    let latex = convert("one\n\ntwo\n").expect("converts");
    assert_eq!(latex, "one\n\ntwo\n");
}
