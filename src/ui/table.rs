//! Plain-text matrix tables
//!
//! Column widths are computed with `unicode-width` so non-ASCII ids line up.

use std::collections::BTreeMap;

use unicode_width::UnicodeWidthStr;

/// Render a process x resource matrix with right-aligned values
///
/// `corner` labels the row-id column (e.g. "Allocation"). Returns an empty
/// string when there is nothing to show.
pub fn render_matrix(corner: &str, columns: &[String], rows: &[(String, Vec<u32>)]) -> String {
    if columns.is_empty() && rows.is_empty() {
        return String::new();
    }

    let label_width = rows
        .iter()
        .map(|(id, _)| id.width())
        .chain(std::iter::once(corner.width()))
        .max()
        .unwrap_or(0);

    let col_widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, col)| {
            rows.iter()
                .map(|(_, values)| digits(values.get(i).copied().unwrap_or(0)))
                .chain(std::iter::once(col.width()))
                .max()
                .unwrap_or(1)
        })
        .collect();

    let mut out = String::new();
    out.push_str(&pad_right(corner, label_width));
    for (col, width) in columns.iter().zip(&col_widths) {
        out.push_str("  ");
        out.push_str(&pad_left(col, *width));
    }
    out.push('\n');

    for (id, values) in rows {
        out.push_str(&pad_right(id, label_width));
        for (i, width) in col_widths.iter().enumerate() {
            let value = values.get(i).copied().unwrap_or(0);
            out.push_str("  ");
            out.push_str(&pad_left(&value.to_string(), *width));
        }
        out.push('\n');
    }
    out
}

/// Render the availability vector as `id: count` lines
pub fn render_available(available: &BTreeMap<String, u32>) -> String {
    let mut out = String::new();
    for (id, count) in available {
        out.push_str(&format!("{}: {}\n", id, count));
    }
    out
}

fn digits(value: u32) -> usize {
    value.to_string().len()
}

fn pad_right(text: &str, width: usize) -> String {
    let padding = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(padding))
}

fn pad_left(text: &str, width: usize) -> String {
    let padding = width.saturating_sub(text.width());
    format!("{}{}", " ".repeat(padding), text)
}
