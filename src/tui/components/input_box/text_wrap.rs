//! Row layout and dimensional constants for the InputBox.
//!
//! The input hard-wraps at the column limit instead of at word boundaries,
//! so every byte of the buffer lands in exactly one row and the cursor
//! position can be computed without guessing how trailing spaces were
//! dropped.

use std::ops::Range;

use unicode_width::UnicodeWidthChar;

/// Border (2) + padding (2) consumed horizontally by the bordered block
pub(super) const HORIZONTAL_OVERHEAD: u16 = 4;
/// Top + bottom borders consumed vertically
pub(super) const VERTICAL_OVERHEAD: u16 = 2;
/// Maximum visible content lines before internal scrolling kicks in
pub(super) const MAX_VISIBLE_LINES: u16 = 5;
/// Offset from area edge to content (border + padding)
pub(super) const CONTENT_OFFSET_X: u16 = 2;
pub(super) const CONTENT_OFFSET_Y: u16 = 1;

/// Calculate the inner content width after subtracting border/padding overhead.
pub(super) fn inner_width(area_width: u16) -> u16 {
    area_width.saturating_sub(HORIZONTAL_OVERHEAD)
}

/// Display width of one char. Control chars still take a cell.
fn char_width(c: char) -> u16 {
    c.width().unwrap_or(1) as u16
}

/// Split `text` into rows no wider than `width` columns.
///
/// Returns byte ranges into `text`. Newlines end a row and are not part of
/// any range. Always returns at least one row.
pub(super) fn rows(text: &str, width: u16) -> Vec<Range<usize>> {
    let width = width.max(1);
    let mut rows = Vec::new();
    let mut row_start = 0;
    let mut col: u16 = 0;

    for (i, c) in text.char_indices() {
        if c == '\n' {
            rows.push(row_start..i);
            row_start = i + c.len_utf8();
            col = 0;
            continue;
        }
        let w = char_width(c);
        if col > 0 && col + w > width {
            rows.push(row_start..i);
            row_start = i;
            col = 0;
        }
        col += w;
    }
    rows.push(row_start..text.len());
    rows
}

/// (row, column) of the byte offset `cursor` within the laid-out rows.
pub(super) fn cursor_cell(text: &str, rows: &[Range<usize>], cursor: usize) -> (u16, u16) {
    let row = rows
        .iter()
        .rposition(|r| r.start <= cursor)
        .unwrap_or(0);
    let start = rows.get(row).map(|r| r.start).unwrap_or(0);
    let col: u16 = text[start..cursor].chars().map(char_width).sum();
    (row as u16, col)
}

/// Find the byte offset of the previous character boundary before `pos` in `text`.
pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Find the byte offset of the next character boundary after `pos` in `text`.
pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}
