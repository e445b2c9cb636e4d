//! Table protocol tests.

use mdtex::convert;

#[test]
fn test_reference_table_shape() {
    let source = "| A | B |\n|---|---|\n| x | y |\n\nCap\n\n";
    let latex = convert(source).expect("converts");
    assert_eq!(
        latex,
        "\\begin{table}\n\\begin{tabular}{l l}\n\\toprule\n\\textbf{A} & \\textbf{B} \\\\\nx & y \\\\\n\\bottomrule\n\\end{tabular}\n\\caption{Cap}\n\\end{table}\n\n"
    );
}

#[test]
fn test_no_config_row_draws_no_midrule() {
    let source = "| A | B |\n|---|---|\n| x | y |\n| z | w |\n\nCap\n\n";
    let latex = convert(source).expect("converts");
    assert!(!latex.contains("\\midrule"));
}

#[test]
fn test_rule_every_row() {
    let source = "| A |\n|---|\n<!-- line every row -->\n| 1 |\n| 2 |\n\nCap\n\n";
    let latex = convert(source).expect("converts");
    assert_eq!(latex.matches("\\midrule").count(), 2);
}

#[test]
fn test_rule_header_only() {
    let source = "| A |\n|---|\n<!-- line header only -->\n| 1 |\n| 2 |\n\nCap\n\n";
    let latex = convert(source).expect("converts");
    assert_eq!(latex.matches("\\midrule").count(), 1);
    assert!(latex.contains("\\toprule\n\\textbf{A} \\\\\n\\midrule\n1 \\\\"));
}

#[test]
fn test_alignment_annotations_pass_verbatim() {
    let source =
        "| <!-- >{\\raggedright}p{4cm} --> Notes | Qty |\n|---|---|\n| long text | 3 |\n\nCap\n\n";
    let latex = convert(source).expect("converts");
    assert!(latex.contains("\\begin{tabular}{>{\\raggedright}p{4cm} l}"));
    assert!(latex.contains("\\textbf{Notes} & \\textbf{Qty} \\\\"));
}

#[test]
fn test_irregular_rows_render_best_effort() {
    let source = "| A | B |\n|---|---|\n| only one |\n| 1 | 2 | 3 |\n\nCap\n\n";
    let latex = convert(source).expect("converts");
    assert!(latex.contains("only one \\\\"));
    assert!(latex.contains("1 & 2 & 3 \\\\"));
}

#[test]
fn test_multi_line_caption_joins() {
    let source = "| A |\n|---|\n| 1 |\n\nfirst part\nsecond part\n\n";
    let latex = convert(source).expect("converts");
    assert!(latex.contains("\\caption{first part second part}"));
}

#[test]
fn test_caption_label_line_passes_raw() {
    let source = "| A |\n|---|\n| 1 |\n\nPrices\n\\label{tab:p}\n\n";
    let latex = convert(source).expect("converts");
    assert!(latex.contains("\\caption{Prices \\label{tab:p}}"));
}

#[test]
fn test_table_cells_run_inline_rules() {
    let source = "| Item | Note |\n|---|---|\n| `cfg` | uses 'quotes' |\n\nCap\n\n";
    let latex = convert(source).expect("converts");
    assert!(latex.contains("\\texttt{cfg} & uses `quotes' \\\\"));
}

#[test]
fn test_half_open_header_is_an_error() {
    let err = convert("| A | B\n").expect_err("malformed header");
    assert!(matches!(err, mdtex::ConvertError::MalformedTable(_)));
}

#[test]
fn test_table_at_end_of_input_is_balanced() {
    let latex = convert("| A |\n| 1 |").expect("converts");
    assert!(latex.ends_with("\\bottomrule\n\\end{tabular}\n\\end{table}\n"));
}
