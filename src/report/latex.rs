use std::fmt::Write;

use crate::models::TimingResults;

const PREAMBLE: &str = "\\documentclass[11pt]{article}\n\\usepackage{fullpage}\n";
const TABLE_HEAD: &str = "\\begin{tabular}{|l||c|c|c|} \\hline\n\
                          Size & Write & Read & Delete \\\\ \\hline\\hline\n";

/// Render `results` as a LaTeX article with one table
///
/// Rows run in ascending size order; each timing is printed in seconds with
/// five decimals, in write, read, delete order.
pub fn format_table(title: &str, results: &TimingResults) -> String {
    let mut out = String::new();
    out.push_str(PREAMBLE);
    out.push('\n');
    // writing into a String cannot fail
    let _ = writeln!(out, "\\title{{{}}}", escape_latex(title));
    out.push('\n');
    out.push_str("\\begin{document}\n\\maketitle\n");
    out.push_str(TABLE_HEAD);

    for (size, timings) in results {
        let _ = write!(out, "{}", size_label(*size));
        for value in timings.as_array() {
            let _ = write!(out, "&{:.5}", value);
        }
        out.push_str("\\\\ \\hline\n");
    }

    out.push_str("\\end{tabular}\n\\end{document}\n");
    out
}

/// `$10^k$` where `k` is the exponent of `size` in one-digit scientific
/// notation
///
/// Only meaningful for exact powers of ten: 50 renders as `$10^1$`.
pub fn size_label(size: u64) -> String {
    let scientific = format!("{:.0e}", size as f64);
    let exponent = scientific
        .split_once('e')
        .and_then(|(_, exp)| exp.parse::<i32>().ok())
        .unwrap_or(0);
    format!("$10^{}$", exponent)
}

/// Escape characters that LaTeX treats specially in running text
pub fn escape_latex(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '~' => escaped.push_str("\\textasciitilde{}"),
            '^' => escaped.push_str("\\textasciicircum{}"),
            '\\' => escaped.push_str("\\textbackslash{}"),
            _ => escaped.push(c),
        }
    }
    escaped
}
