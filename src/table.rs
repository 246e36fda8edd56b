//! Grid table rendering for console reports.
//!
//! Tables are drawn in the familiar `psql` layout: a ruled border, a header
//! row separated from the body by `|---+---|`, and one space of padding on
//! each side of every cell.

use std::borrow::Cow;
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
}

pub fn render_grid(headers: &[String], rows: &[Vec<String>], alignments: &[Alignment]) -> String {
    let column_count = headers.len();
    let mut widths = headers.iter().map(|h| display_width(h)).collect::<Vec<_>>();

    for row in rows {
        for (idx, cell) in row.iter().enumerate().take(column_count) {
            widths[idx] = widths[idx].max(display_width(&sanitize_cell(cell)));
        }
    }

    let mut output = String::new();
    let border = rule_line(&widths, '+', '+', '+');
    let _ = writeln!(output, "{border}");
    let _ = writeln!(output, "{}", format_row(headers, &widths, alignments));
    let _ = writeln!(output, "{}", rule_line(&widths, '|', '+', '|'));
    for row in rows {
        let _ = writeln!(output, "{}", format_row(row, &widths, alignments));
    }
    let _ = writeln!(output, "{border}");
    output
}

fn rule_line(widths: &[usize], left: char, joint: char, right: char) -> String {
    let segments = widths
        .iter()
        .map(|w| "-".repeat(w + 2))
        .collect::<Vec<_>>();
    format!("{left}{}{right}", segments.join(&joint.to_string()))
}

fn format_row(values: &[String], widths: &[usize], alignments: &[Alignment]) -> String {
    let mut line = String::from("|");
    for (idx, width) in widths.iter().enumerate() {
        let value = values.get(idx).map(String::as_str).unwrap_or("");
        let sanitized = sanitize_cell(value);
        let padding = " ".repeat(width.saturating_sub(display_width(&sanitized)));
        let alignment = alignments.get(idx).copied().unwrap_or(Alignment::Left);
        match alignment {
            Alignment::Left => {
                let _ = write!(line, " {sanitized}{padding} |");
            }
            Alignment::Right => {
                let _ = write!(line, " {padding}{sanitized} |");
            }
        }
    }
    line
}

fn display_width(value: &str) -> usize {
    let mut width = 0usize;
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        if ch == '\u{1b}' {
            // Skip ANSI escape sequence (e.g. \x1b[31m)
            for next in chars.by_ref() {
                if next == 'm' {
                    break;
                }
            }
        } else {
            width += 1;
        }
    }
    width
}

fn sanitize_cell(value: &str) -> Cow<'_, str> {
    if value.contains(['\n', '\r', '\t']) {
        Cow::Owned(value.replace(['\n', '\r', '\t'], " "))
    } else {
        Cow::Borrowed(value)
    }
}
