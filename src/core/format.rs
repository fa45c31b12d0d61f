//! Turning items into the lines the picker receives

use super::item::{key_len, Item};

/// Terminator appended to every line handed to the picker
pub const LINE_TERMINATOR: &[u8] = b"\n";

/// Widest key (in characters) among `items`; 0 for an empty list.
pub fn key_width<T: Item>(items: &[T]) -> usize {
    items
        .iter()
        .map(|item| key_len(&item.key()))
        .max()
        .unwrap_or(0)
}

/// Append the line terminator unless `line` already ends with it.
///
/// Idempotent: terminating a terminated line returns it unchanged.
pub fn ensure_terminated(mut line: Vec<u8>) -> Vec<u8> {
    if !line.ends_with(LINE_TERMINATOR) {
        line.extend_from_slice(LINE_TERMINATOR);
    }
    line
}

/// Render every item, in order, to its terminated line.
pub fn format_lines<T: Item>(items: &[T]) -> Vec<Vec<u8>> {
    let width = key_width(items);
    items
        .iter()
        .map(|item| ensure_terminated(item.menu_line(width)))
        .collect()
}

/// Collapse runs of whitespace and control characters into single spaces,
/// dropping leading ones. The result never contains a line break.
pub fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = true;
    for c in text.chars() {
        if c > ' ' {
            out.push(c);
            in_space = false;
        } else if !in_space {
            out.push(' ');
            in_space = true;
        }
    }
    out
}

/// Concatenate formatted lines into one picker input payload.
pub fn join_lines(lines: &[Vec<u8>]) -> Vec<u8> {
    lines.concat()
}
