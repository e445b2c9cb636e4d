//! Export tests for whole documents
//!
//! A kitchensink document exercising every block and inline construct in
//! one pass, plus a compact snapshot of the exact emitted LaTeX.

use insta::assert_snapshot;
use mdtex::convert;

#[test]
fn test_kitchensink_document() {
    let source = r#"# Field Notes

## [](#ch-tools) Tools and Methods

We measured *twice*, cut 'once', and logged "everything" in `notes.txt`.
The patio is 12m^2^ overall.

### Procedure

1. Mark the boards
2. Cut & stack them

> Measure twice, cut once.

```bash
make cut
```

|figure
\includegraphics[width=\textwidth]{patio.pdf}

The finished patio
\label{fig:patio}

| Material | <!-- r --> Cost |
| --- | --- |
<!-- line every row -->
| Cedar | 120 |
| Screws | 8 |

Bill of materials

`cost['cedar']` was higher than "expected".
<!-- this never ships -->
[Supplier notes](./appendix.md)
[vendor site](https://cedar.example)
"#;

    let latex = convert(source).expect("kitchensink converts");
    println!("Output:\n{latex}");

    // Headings: document title gone, chapter and section with labels.
    assert!(!latex.contains("Field Notes"));
    assert!(latex.contains("\\chapter{Tools and Methods}\\label{ch-tools}"));
    assert!(latex.contains("\\section{Procedure}\\label{}"));

    // Inline spans, all on one line.
    assert!(latex.contains(
        "We measured \\textbf{twice}, cut `once', and logged ``everything'' in \\texttt{notes.txt}."
    ));
    assert!(latex.contains("12m\\textsuperscript{2} overall."));

    // Ordered list with escaped ampersand in an item.
    assert!(latex.contains("\\begin{enumerate}"));
    assert!(latex.contains("\\item Cut \\& stack them"));
    assert!(latex.contains("\\end{enumerate}"));

    // Quote.
    assert!(latex.contains("\\begin{displayquote}"));
    assert!(latex.contains("Measure twice, cut once."));

    // Fenced code with a language tag, body untouched.
    assert!(latex.contains("\\begin{lstlisting}[style=bash,language=bash]"));
    assert!(latex.contains("make cut"));

    // Figure with a raw label line folded into the caption.
    assert!(latex.contains("\\begin{figure}"));
    assert!(latex.contains("\\includegraphics[width=\\textwidth]{patio.pdf}"));
    assert!(latex.contains("\\caption{The finished patio \\label{fig:patio}}"));

    // Table: annotated column, bold header, a rule before every row.
    assert!(latex.contains("\\begin{tabular}{l r}"));
    assert!(latex.contains("\\textbf{Material} & \\textbf{Cost} \\\\"));
    assert!(latex.contains("\\midrule\nCedar & 120 \\\\"));
    assert!(latex.contains("\\midrule\nScrews & 8 \\\\"));
    assert!(latex.contains("\\caption{Bill of materials}"));

    // Code-looking line keeps its literal quotes.
    assert!(latex.contains("\\texttt{cost['cedar']} was higher than \"expected\"."));

    // Comments vanish; link lines resolve.
    assert!(!latex.contains("never ships"));
    assert!(latex.contains("\\input{appendix}"));
    assert!(latex.contains("\\url{vendor site}"));
}

#[test]
fn test_compact_document_snapshot() {
    let source = r"# Field Notes
## [](#ch-tools) Tools

We measured *twice* and cut 'once'.

* tape measure
* chalk line

| Tool | Price |
| --- | --- |
<!-- line header only -->
| Saw | 40 & up |

Street prices
\label{tab:prices}

Done.";

    let latex = convert(source).expect("document converts");
    assert_snapshot!(latex.trim_end(), @r"
    \chapter{Tools}\label{ch-tools}

    We measured \textbf{twice} and cut `once'.

    \begin{itemize}
    \item tape measure
    \item chalk line
    \end{itemize}

    \begin{table}
    \begin{tabular}{l l}
    \toprule
    \textbf{Tool} & \textbf{Price} \\
    \midrule
    Saw & 40 \& up \\
    \bottomrule
    \end{tabular}
    \caption{Street prices \label{tab:prices}}
    \end{table}

    Done.
    ");
}

#[test]
fn test_empty_document_converts_to_nothing() {
    assert_eq!(convert("").expect("empty input converts"), "");
}

#[test]
fn test_every_emitted_line_ends_with_newline() {
    let latex = convert("plain paragraph\n").expect("converts");
    assert_eq!(latex, "plain paragraph\n");
}
