#![forbid(unsafe_code)]

//! Drawing primitives for the buffer.
//!
//! Helpers on top of `Buffer::set()` so widgets can draw borders, lines and
//! text without duplicating cell loops. All operations respect the scissor
//! stack through `Buffer::set()`.

use crate::buffer::Buffer;
use crate::cell::{Cell, CellContent};
use folio_core::geometry::Rect;

/// Characters used to draw a border around a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderChars {
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
    pub horizontal: char,
    pub vertical: char,
}

impl BorderChars {
    /// Simple box-drawing characters (U+250x).
    pub const SQUARE: Self = Self {
        top_left: '┌',
        top_right: '┐',
        bottom_left: '└',
        bottom_right: '┘',
        horizontal: '─',
        vertical: '│',
    };

    /// Rounded corners, used for cards.
    pub const ROUNDED: Self = Self {
        top_left: '╭',
        top_right: '╮',
        bottom_left: '╰',
        bottom_right: '╯',
        horizontal: '─',
        vertical: '│',
    };

    /// ASCII-only border.
    pub const ASCII: Self = Self {
        top_left: '+',
        top_right: '+',
        bottom_left: '+',
        bottom_right: '+',
        horizontal: '-',
        vertical: '|',
    };
}

/// Extension trait for drawing on a Buffer.
pub trait Draw {
    /// Draw a horizontal line of cells.
    fn draw_horizontal_line(&mut self, x: u16, y: u16, width: u16, cell: Cell);

    /// Print text using the colors and attributes of `base_cell`.
    ///
    /// Stops at the buffer edge. Returns the x position after the last
    /// character.
    fn print_text(&mut self, x: u16, y: u16, text: &str, base_cell: Cell) -> u16;

    /// Like `print_text` but stops at `max_x` (exclusive).
    fn print_text_clipped(
        &mut self,
        x: u16,
        y: u16,
        text: &str,
        base_cell: Cell,
        max_x: u16,
    ) -> u16;

    /// Draw a border inside `rect` (edges and corners).
    fn draw_border(&mut self, rect: Rect, chars: BorderChars, base_cell: Cell);

    /// Fill the interior with `fill_cell`, then draw the border.
    fn draw_box(&mut self, rect: Rect, chars: BorderChars, border_cell: Cell, fill_cell: Cell);
}

impl Draw for Buffer {
    fn draw_horizontal_line(&mut self, x: u16, y: u16, width: u16, cell: Cell) {
        for i in 0..width {
            self.set(x.saturating_add(i), y, cell);
        }
    }

    fn print_text(&mut self, x: u16, y: u16, text: &str, base_cell: Cell) -> u16 {
        self.print_text_clipped(x, y, text, base_cell, self.width())
    }

    fn print_text_clipped(
        &mut self,
        x: u16,
        y: u16,
        text: &str,
        base_cell: Cell,
        max_x: u16,
    ) -> u16 {
        use unicode_width::UnicodeWidthChar;

        let mut cx = x;
        for c in text.chars() {
            let width = UnicodeWidthChar::width(c).unwrap_or(0) as u16;
            if width == 0 {
                continue;
            }
            if cx >= max_x || cx.saturating_add(width) > max_x {
                break;
            }

            self.set(
                cx,
                y,
                Cell {
                    content: CellContent::from_char(c),
                    ..base_cell
                },
            );
            cx += width;
        }
        cx
    }

    fn draw_border(&mut self, rect: Rect, chars: BorderChars, base_cell: Cell) {
        if rect.is_empty() {
            return;
        }

        let make_cell = |c: char| Cell {
            content: CellContent::from_char(c),
            ..base_cell
        };
        let h_cell = make_cell(chars.horizontal);
        let v_cell = make_cell(chars.vertical);
        let (left, top) = (rect.x, rect.y);
        let (right, bottom) = (rect.right() - 1, rect.bottom() - 1);

        for x in left..=right {
            self.set(x, top, h_cell);
            if bottom > top {
                self.set(x, bottom, h_cell);
            }
        }
        for y in top.saturating_add(1)..bottom {
            self.set(left, y, v_cell);
            if right > left {
                self.set(right, y, v_cell);
            }
        }

        // Corners last so they win over edges.
        self.set(left, top, make_cell(chars.top_left));
        if right > left {
            self.set(right, top, make_cell(chars.top_right));
        }
        if bottom > top {
            self.set(left, bottom, make_cell(chars.bottom_left));
            if right > left {
                self.set(right, bottom, make_cell(chars.bottom_right));
            }
        }
    }

    fn draw_box(&mut self, rect: Rect, chars: BorderChars, border_cell: Cell, fill_cell: Cell) {
        if rect.is_empty() {
            return;
        }
        if rect.width > 2 && rect.height > 2 {
            let inner = Rect::new(rect.x + 1, rect.y + 1, rect.width - 2, rect.height - 2);
            self.fill(inner, fill_cell);
        }
        self.draw_border(rect, chars, border_cell);
    }
}
