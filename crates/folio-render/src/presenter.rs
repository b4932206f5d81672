#![forbid(unsafe_code)]

//! Presenter: state-tracked ANSI emission through crossterm.
//!
//! The presenter turns a [`BufferDiff`] into terminal output. It remembers
//! the cursor position and the active style so it only emits a cursor move
//! at the start of each run and an SGR change when the style differs. Each
//! frame is wrapped in a synchronized update and flushed once.

use std::io::{self, BufWriter, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{
    Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{BeginSynchronizedUpdate, Clear, ClearType, EndSynchronizedUpdate};

use crate::buffer::Buffer;
use crate::cell::{Cell, PackedRgba, StyleFlags};
use crate::diff::BufferDiff;

const BUFFER_CAPACITY: usize = 64 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CellStyle {
    fg: PackedRgba,
    bg: PackedRgba,
    attrs: StyleFlags,
}

impl CellStyle {
    fn from_cell(cell: &Cell) -> Self {
        Self {
            fg: cell.fg,
            bg: cell.bg,
            attrs: cell.attrs,
        }
    }
}

fn to_color(color: PackedRgba) -> Color {
    if color.a() == 0 {
        Color::Reset
    } else {
        Color::Rgb {
            r: color.r(),
            g: color.g(),
            b: color.b(),
        }
    }
}

const ATTRIBUTES: [(StyleFlags, Attribute); 8] = [
    (StyleFlags::BOLD, Attribute::Bold),
    (StyleFlags::DIM, Attribute::Dim),
    (StyleFlags::ITALIC, Attribute::Italic),
    (StyleFlags::UNDERLINE, Attribute::Underlined),
    (StyleFlags::BLINK, Attribute::SlowBlink),
    (StyleFlags::REVERSE, Attribute::Reverse),
    (StyleFlags::STRIKETHROUGH, Attribute::CrossedOut),
    (StyleFlags::HIDDEN, Attribute::Hidden),
];

/// Writes buffers to a terminal.
#[derive(Debug)]
pub struct Presenter<W: Write> {
    writer: BufWriter<W>,
    current_style: Option<CellStyle>,
    cursor_x: Option<u16>,
    cursor_y: Option<u16>,
}

impl<W: Write> Presenter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::with_capacity(BUFFER_CAPACITY, writer),
            current_style: None,
            cursor_x: None,
            cursor_y: None,
        }
    }

    /// Present the changed cells of `buffer`.
    pub fn present(&mut self, buffer: &Buffer, diff: &BufferDiff) -> io::Result<()> {
        let _span = tracing::debug_span!(
            "present",
            width = buffer.width(),
            height = buffer.height(),
            changes = diff.len()
        )
        .entered();

        queue!(self.writer, BeginSynchronizedUpdate)?;
        for run in diff.runs() {
            self.move_cursor_to(run.x0, run.y)?;
            for x in run.x0..=run.x1 {
                if let Some(cell) = buffer.get(x, run.y) {
                    self.emit_cell(cell)?;
                }
            }
        }
        queue!(self.writer, SetAttribute(Attribute::Reset), EndSynchronizedUpdate)?;
        self.current_style = None;
        self.writer.flush()
    }

    fn emit_cell(&mut self, cell: &Cell) -> io::Result<()> {
        if cell.is_continuation() {
            return Ok(());
        }
        self.emit_style_changes(cell)?;

        let width = match cell.content.as_char() {
            Some(c) => {
                queue!(self.writer, Print(c))?;
                cell.content.width().max(1)
            }
            None => {
                queue!(self.writer, Print(' '))?;
                1
            }
        };
        if let Some(x) = self.cursor_x {
            self.cursor_x = Some(x.saturating_add(width as u16));
        }
        Ok(())
    }

    fn emit_style_changes(&mut self, cell: &Cell) -> io::Result<()> {
        let style = CellStyle::from_cell(cell);
        if self.current_style == Some(style) {
            return Ok(());
        }

        // Reset then apply keeps attribute removal simple.
        queue!(
            self.writer,
            SetAttribute(Attribute::Reset),
            SetForegroundColor(to_color(style.fg)),
            SetBackgroundColor(to_color(style.bg))
        )?;
        for (flag, attribute) in ATTRIBUTES {
            if style.attrs.contains(flag) {
                queue!(self.writer, SetAttribute(attribute))?;
            }
        }
        self.current_style = Some(style);
        Ok(())
    }

    fn move_cursor_to(&mut self, x: u16, y: u16) -> io::Result<()> {
        if self.cursor_x == Some(x) && self.cursor_y == Some(y) {
            return Ok(());
        }
        queue!(self.writer, MoveTo(x, y))?;
        self.cursor_x = Some(x);
        self.cursor_y = Some(y);
        Ok(())
    }

    /// Clear the screen and home the cursor.
    pub fn clear_screen(&mut self) -> io::Result<()> {
        queue!(self.writer, Clear(ClearType::All), MoveTo(0, 0))?;
        self.cursor_x = Some(0);
        self.cursor_y = Some(0);
        self.writer.flush()
    }

    /// Forget tracked state (after a resize or foreign output).
    pub fn reset(&mut self) {
        self.current_style = None;
        self.cursor_x = None;
        self.cursor_y = None;
    }

    /// Get the inner writer, flushing buffered data first.
    pub fn into_inner(self) -> io::Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| io::Error::other(e.to_string()))
    }
}
