use std::fmt::Write;

use crate::matcher::MismatchReport;

use super::location::{is_multiline, locate};

/// Renders a report as:
///
/// ```text
/// Mismatch at 1:
///   b3
///    ^
/// "3" does not match "1"
/// ```
///
/// The header offset is the 0-based character offset. Multi-line input adds
/// the 1-based line and column, and only the failing line is echoed.
pub fn format_report(report: &MismatchReport<'_>, text: &str) -> String {
    let location = locate(text, report.position());
    let line = &text[location.line_start..location.line_end];

    let mut out = String::with_capacity(line.len() * 2 + 64);
    if is_multiline(text) {
        let _ = writeln!(
            out,
            "Mismatch at {} (line {}, column {}):",
            location.char_offset, location.line, location.column
        );
    } else {
        let _ = writeln!(out, "Mismatch at {}:", location.char_offset);
    }

    let _ = writeln!(out, "  {}", line);
    let caret_at = location.offset.min(location.line_end);
    let _ = writeln!(
        out,
        "  {}^",
        caret_indent(&text[location.line_start..caret_at])
    );

    let lines: Vec<String> = report
        .alternatives()
        .iter()
        .map(|alternative| alternative.to_string())
        .collect();
    out.push_str(&lines.join("\n"));

    out
}

/// Whitespace of the same visual width as `prefix`; tabs are kept so the
/// caret lines up under tab-indented text.
fn caret_indent(prefix: &str) -> String {
    prefix
        .chars()
        .map(|ch| if ch == '\t' { '\t' } else { ' ' })
        .collect()
}

/// First `max_chars` characters of `rest`, with `...` when cut.
pub fn preview(rest: &str, max_chars: usize) -> String {
    match rest.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &rest[..cut]),
        None => rest.to_string(),
    }
}
