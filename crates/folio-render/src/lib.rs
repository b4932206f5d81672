#![forbid(unsafe_code)]

//! Render kernel: cells, buffers, frames with hit grids, diffs, and ANSI
//! presentation.

pub mod buffer;
pub mod cell;
pub mod diff;
pub mod drawing;
pub mod frame;
#[cfg(not(target_arch = "wasm32"))]
pub mod presenter;

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of a single character in cells.
///
/// Control characters count as zero.
#[inline]
pub fn char_width(c: char) -> usize {
    UnicodeWidthChar::width(c).unwrap_or(0)
}

/// Display width of a string in cells, summed per grapheme cluster.
pub fn display_width(text: &str) -> usize {
    if text.is_ascii() {
        return text.bytes().filter(|b| (0x20..=0x7E).contains(b)).count();
    }
    text.graphemes(true).map(UnicodeWidthStr::width).sum()
}

/// Flatten a buffer to plain text, one line per row.
///
/// Trailing blanks of each row and trailing blank rows are dropped, which
/// keeps snapshot assertions readable.
pub fn buffer_to_text(buf: &buffer::Buffer) -> String {
    let mut lines: Vec<String> = (0..buf.height())
        .map(|y| {
            let line: String = buf
                .row_cells(y)
                .iter()
                .filter(|cell| !cell.is_continuation())
                .map(|cell| cell.content.as_char().unwrap_or(' '))
                .collect();
            line.trim_end().to_string()
        })
        .collect();
    while lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths() {
        assert_eq!(display_width("hello"), 5);
        assert_eq!(display_width("中文"), 4);
        assert_eq!(display_width("e\u{301}"), 1);
        assert_eq!(char_width('\u{7}'), 0);
    }

    #[test]
    fn buffer_to_text_trims() {
        let mut buf = buffer::Buffer::new(6, 3);
        buf.set(0, 0, cell::Cell::from_char('a'));
        assert_eq!(buffer_to_text(&buf), "a");
    }
}
