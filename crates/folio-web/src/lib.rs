#![forbid(unsafe_code)]

//! Web host for the Folio portfolio.
//!
//! The browser drives everything: JavaScript pushes input and calls
//! [`StepProgram::step`] from its frame loop, then reads the rendered cells
//! out of [`WebOutputs`]. Nothing here blocks or spawns threads.
//!
//! Under `wasm32` the [`FolioWeb`] class exposes this surface through
//! `wasm-bindgen`.

pub mod input;
pub mod step_program;

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::FolioWeb;

pub use step_program::{StepProgram, StepResult};

use folio_render::buffer::Buffer;
use folio_render::cell::{Cell, CellContent};

/// Human-readable name of this host, for diagnostics and display.
pub const PLATFORM_NAME: &str = "Web with Rust/Wasm";

/// Name of the platform the portfolio is running on.
#[must_use]
pub const fn platform_name() -> &'static str {
    PLATFORM_NAME
}

/// Web backend error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebBackendError {
    /// Operation that makes no sense for a host-driven runner.
    Unsupported(&'static str),
}

impl core::fmt::Display for WebBackendError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Unsupported(msg) => write!(f, "unsupported: {msg}"),
        }
    }
}

impl std::error::Error for WebBackendError {}

/// Number of `u32` words per flattened cell.
pub const CELL_WORDS: usize = 4;

/// What the runner produced since the outputs were last taken.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct WebOutputs {
    /// Most recently rendered frame.
    pub last_buffer: Option<Buffer>,
    /// The last frame had no diff baseline and must be drawn in full.
    pub last_full_repaint_hint: bool,
    /// Cells that changed in the last frame.
    pub last_dirty_cells: usize,
    /// Messages from `Cmd::Log`.
    pub logs: Vec<String>,
    /// Links the model asked to open, oldest first.
    pub open_requests: Vec<String>,
}

impl WebOutputs {
    /// The last frame as row-major `[bg, fg, glyph, attrs]` words.
    ///
    /// Empty when nothing has been rendered.
    #[must_use]
    pub fn flat_cells(&self) -> Vec<u32> {
        self.last_buffer
            .as_ref()
            .map(flatten_cells_u32)
            .unwrap_or_default()
    }
}

/// Flatten `buf` row-major into `[bg, fg, glyph, attrs]` words per cell.
///
/// Colors stay in `0xRRGGBBAA`. Empty and continuation cells carry glyph `0`.
#[must_use]
pub fn flatten_cells_u32(buf: &Buffer) -> Vec<u32> {
    let mut out = Vec::with_capacity(buf.cells().len() * CELL_WORDS);
    for cell in buf.cells() {
        out.extend_from_slice(&cell_words(cell));
    }
    out
}

fn cell_words(cell: &Cell) -> [u32; CELL_WORDS] {
    let glyph = match cell.content {
        CellContent::EMPTY | CellContent::CONTINUATION => 0,
        other => other.as_char().map_or(0, u32::from),
    };
    [cell.bg.0, cell.fg.0, glyph, u32::from(cell.attrs.bits())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_render::cell::{PackedRgba, StyleFlags};
    use pretty_assertions::assert_eq;

    #[test]
    fn platform_name_is_stable() {
        assert_eq!(platform_name(), "Web with Rust/Wasm");
    }

    #[test]
    fn unsupported_display() {
        assert_eq!(
            WebBackendError::Unsupported("x").to_string(),
            "unsupported: x"
        );
    }

    #[test]
    fn flatten_emits_row_major_words() {
        let mut buf = Buffer::new(2, 1);
        buf.set(
            0,
            0,
            Cell::from_char('A')
                .with_bg(PackedRgba::rgb(1, 2, 3))
                .with_attrs(StyleFlags::BOLD),
        );
        let words = flatten_cells_u32(&buf);
        assert_eq!(words.len(), 2 * CELL_WORDS);
        assert_eq!(words[0], PackedRgba::rgb(1, 2, 3).0);
        assert_eq!(words[1], PackedRgba::WHITE.0);
        assert_eq!(words[2], 'A' as u32);
        assert_eq!(words[3], u32::from(StyleFlags::BOLD.bits()));
        assert_eq!(words[6], 0);
    }

    #[test]
    fn flat_cells_empty_without_frame() {
        assert!(WebOutputs::default().flat_cells().is_empty());
    }
}
