#![forbid(unsafe_code)]

//! Buffer grid storage.
//!
//! The `Buffer` is a 2D grid of [`Cell`]s, stored row-major
//! (`index = y * width + x`), with a scissor stack for clipping.
//!
//! # Invariants
//!
//! 1. `cells.len() == width * height`
//! 2. Width and height never change after creation
//! 3. The scissor stack is never empty and only shrinks on push
//! 4. A wide character is written whole or not at all

use crate::cell::Cell;
use folio_core::geometry::Rect;

/// A 2D grid of terminal cells.
///
/// ```
/// use folio_render::buffer::Buffer;
/// use folio_render::cell::Cell;
///
/// let mut buffer = Buffer::new(80, 24);
/// buffer.set(0, 0, Cell::from_char('H'));
/// buffer.set(1, 0, Cell::from_char('i'));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
    scissor_stack: Vec<Rect>,
}

impl Buffer {
    /// Create a buffer filled with default cells.
    ///
    /// Zero dimensions are clamped to 1.
    pub fn new(width: u16, height: u16) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
            scissor_stack: vec![Rect::from_size(width, height)],
        }
    }

    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// The full buffer area.
    #[inline]
    pub const fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Get the cell at (x, y).
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Get a mutable reference to the cell at (x, y).
    #[inline]
    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        self.index(x, y).map(|i| &mut self.cells[i])
    }

    /// Clear any wide character that (x, y) is part of, so that overwriting
    /// one cell never leaves a dangling head or continuation.
    fn cleanup_overlap(&mut self, x: u16, y: u16) {
        let Some(idx) = self.index(x, y) else {
            return;
        };
        let existing = self.cells[idx];

        if existing.is_continuation() {
            let mut hx = x;
            while hx > 0 {
                hx -= 1;
                let hidx = y as usize * self.width as usize + hx as usize;
                if self.cells[hidx].is_continuation() {
                    continue;
                }
                let head_width = self.cells[hidx].content.width();
                if (hx as usize) + head_width > x as usize {
                    self.clear_run(hx, y, head_width);
                }
                break;
            }
        } else {
            let width = existing.content.width();
            if width > 1 {
                self.clear_run(x, y, width);
            }
        }
    }

    fn clear_run(&mut self, x: u16, y: u16, width: usize) {
        for i in 0..width {
            if let Some(idx) = self.index(x.saturating_add(i as u16), y) {
                let bg = self.cells[idx].bg;
                self.cells[idx] = Cell::default().with_bg(bg);
            }
        }
    }

    /// Set the cell at (x, y).
    ///
    /// Respects the current scissor, composites the cell background over the
    /// existing one, and writes continuation cells for wide characters. A
    /// wide character that does not fit completely is not written.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        let width = cell.content.width().max(1);
        let scissor = self.current_scissor();
        for i in 0..width {
            let cx = x as usize + i;
            if cx >= self.width as usize || !scissor.contains(cx as u16, y) {
                return;
            }
        }

        for i in 0..width {
            self.cleanup_overlap(x + i as u16, y);
        }

        let idx = y as usize * self.width as usize + x as usize;
        let bg = cell.bg.over(self.cells[idx].bg);
        self.cells[idx] = Cell { bg, ..cell };

        for i in 1..width {
            let tail = idx + i;
            let bg = self.cells[tail].bg;
            self.cells[tail] = Cell::CONTINUATION.with_bg(cell.bg.over(bg));
        }
    }

    /// Fill a rectangle with `cell`, clipped to the scissor.
    pub fn fill(&mut self, rect: Rect, cell: Cell) {
        let clipped = self.current_scissor().intersection(&rect);
        for y in clipped.y..clipped.bottom() {
            for x in clipped.x..clipped.right() {
                self.set(x, y, cell);
            }
        }
    }

    /// Reset every cell to the default.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Reset every cell to `cell`.
    pub fn clear_with(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    /// Raw access to the cell slice.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cells of row `y`. Empty if out of bounds.
    pub fn row_cells(&self, y: u16) -> &[Cell] {
        if y >= self.height {
            return &[];
        }
        let start = y as usize * self.width as usize;
        &self.cells[start..start + self.width as usize]
    }

    // ========== Scissor Stack ==========

    /// Push a clipping region. The effective scissor is the intersection of
    /// all pushed rects.
    pub fn push_scissor(&mut self, rect: Rect) {
        let intersected = self.current_scissor().intersection(&rect);
        self.scissor_stack.push(intersected);
    }

    /// Pop a clipping region. The base scissor is never popped.
    pub fn pop_scissor(&mut self) {
        if self.scissor_stack.len() > 1 {
            self.scissor_stack.pop();
        }
    }

    /// The effective clipping region.
    #[inline]
    pub fn current_scissor(&self) -> Rect {
        self.scissor_stack
            .last()
            .copied()
            .unwrap_or_else(|| self.bounds())
    }

    #[inline]
    pub fn scissor_depth(&self) -> usize {
        self.scissor_stack.len()
    }

    // ========== Copying ==========

    /// Copy `src_rect` of `src` to this buffer at (`dst_x`, `dst_y`).
    ///
    /// Cells are copied verbatim (no compositing); destination cells outside
    /// the scissor are left untouched.
    pub fn copy_from(&mut self, src: &Buffer, src_rect: Rect, dst_x: u16, dst_y: u16) {
        let scissor = self.current_scissor();
        for dy in 0..src_rect.height {
            for dx in 0..src_rect.width {
                let (Some(tx), Some(ty)) = (dst_x.checked_add(dx), dst_y.checked_add(dy)) else {
                    continue;
                };
                if !scissor.contains(tx, ty) {
                    continue;
                }
                let Some(cell) = src.get(src_rect.x + dx, src_rect.y + dy) else {
                    continue;
                };
                if let Some(idx) = self.index(tx, ty) {
                    self.cells[idx] = *cell;
                }
            }
        }
    }

    /// Check if two buffers have identical content and size.
    pub fn content_eq(&self, other: &Buffer) -> bool {
        self.width == other.width && self.height == other.height && self.cells == other.cells
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::PackedRgba;

    #[test]
    fn zero_size_is_clamped() {
        let buf = Buffer::new(0, 0);
        assert_eq!((buf.width(), buf.height()), (1, 1));
        assert_eq!(buf.cells().len(), 1);
    }

    #[test]
    fn set_and_get() {
        let mut buf = Buffer::new(4, 2);
        buf.set(1, 1, Cell::from_char('x'));
        assert_eq!(buf.get(1, 1).and_then(|c| c.content.as_char()), Some('x'));
        assert!(buf.get(4, 0).is_none());
    }

    #[test]
    fn out_of_bounds_set_is_ignored() {
        let mut buf = Buffer::new(2, 2);
        buf.set(5, 5, Cell::from_char('x'));
        assert!(buf.cells().iter().all(|c| c.content.is_empty()));
    }

    #[test]
    fn scissor_clips_writes() {
        let mut buf = Buffer::new(10, 3);
        buf.push_scissor(Rect::new(2, 0, 3, 1));
        buf.fill(buf.bounds(), Cell::from_char('#'));
        buf.pop_scissor();

        let row: String = buf
            .row_cells(0)
            .iter()
            .map(|c| c.content.as_char().unwrap_or('.'))
            .collect();
        assert_eq!(row, "..###.....");
        assert!(buf.row_cells(1).iter().all(|c| c.content.is_empty()));
    }

    #[test]
    fn scissor_intersects_and_base_survives_pop() {
        let mut buf = Buffer::new(10, 10);
        buf.push_scissor(Rect::new(0, 0, 5, 5));
        buf.push_scissor(Rect::new(3, 3, 5, 5));
        assert_eq!(buf.current_scissor(), Rect::new(3, 3, 2, 2));
        buf.pop_scissor();
        buf.pop_scissor();
        buf.pop_scissor();
        assert_eq!(buf.scissor_depth(), 1);
        assert_eq!(buf.current_scissor(), buf.bounds());
    }

    #[test]
    fn wide_char_writes_continuation() {
        let mut buf = Buffer::new(4, 1);
        buf.set(0, 0, Cell::from_char('中'));
        assert_eq!(buf.get(0, 0).and_then(|c| c.content.as_char()), Some('中'));
        assert!(buf.get(1, 0).is_some_and(|c| c.is_continuation()));
    }

    #[test]
    fn wide_char_at_edge_is_not_written() {
        let mut buf = Buffer::new(3, 1);
        buf.set(2, 0, Cell::from_char('中'));
        assert!(buf.get(2, 0).is_some_and(|c| c.content.is_empty()));
    }

    #[test]
    fn overwriting_continuation_clears_head() {
        let mut buf = Buffer::new(4, 1);
        buf.set(0, 0, Cell::from_char('中'));
        buf.set(1, 0, Cell::from_char('a'));
        assert!(buf.get(0, 0).is_some_and(|c| c.content.is_empty()));
        assert_eq!(buf.get(1, 0).and_then(|c| c.content.as_char()), Some('a'));
    }

    #[test]
    fn transparent_bg_keeps_existing_bg() {
        let mut buf = Buffer::new(2, 1);
        let blue = PackedRgba::rgb(0, 0, 255);
        buf.fill(buf.bounds(), Cell::default().with_bg(blue));
        buf.set(0, 0, Cell::from_char('a'));
        assert_eq!(buf.get(0, 0).map(|c| c.bg), Some(blue));
    }

    #[test]
    fn copy_from_respects_scissor_and_offsets() {
        let mut src = Buffer::new(4, 4);
        for y in 0..4 {
            for x in 0..4 {
                src.set(x, y, Cell::from_char(char::from(b'a' + (y * 4 + x) as u8)));
            }
        }
        let mut dst = Buffer::new(4, 4);
        dst.push_scissor(Rect::new(0, 0, 4, 1));
        dst.copy_from(&src, Rect::new(0, 1, 4, 3), 0, 0);

        assert_eq!(dst.get(0, 0).and_then(|c| c.content.as_char()), Some('e'));
        assert!(dst.get(0, 1).is_some_and(|c| c.content.is_empty()));
    }

    #[test]
    fn content_eq_compares_cells() {
        let mut a = Buffer::new(3, 1);
        let b = Buffer::new(3, 1);
        assert!(a.content_eq(&b));
        a.set(0, 0, Cell::from_char('z'));
        assert!(!a.content_eq(&b));
    }
}
