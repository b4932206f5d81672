#![forbid(unsafe_code)]

//! Frame = Buffer + hit grid for a render pass.
//!
//! The `Frame` is the render target that `Model::view()` writes to. It
//! bundles the cell grid ([`Buffer`]) with an optional [`HitGrid`] that maps
//! cells back to the widget drawn there, so mouse events can be routed.
//!
//! ```
//! use folio_core::geometry::Rect;
//! use folio_render::frame::{Frame, HitId, HitRegion};
//!
//! let mut frame = Frame::with_hit_grid(20, 5);
//! frame.register_hit(Rect::new(2, 1, 6, 1), HitId::new(7), HitRegion::Button, 0);
//! assert_eq!(frame.hit_test(3, 1).map(|(id, ..)| id), Some(HitId::new(7)));
//! assert_eq!(frame.hit_test(0, 0), None);
//! ```

use crate::buffer::Buffer;
use folio_core::geometry::Rect;

/// Identifier for a clickable region in the hit grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HitId(pub u32);

impl HitId {
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn id(self) -> u32 {
        self.0
    }
}

/// Opaque user data attached to a hit cell.
pub type HitData = u64;

/// Regions within a widget for mouse interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HitRegion {
    /// No interactive region.
    #[default]
    None,
    /// Main content area.
    Content,
    /// Widget border area.
    Border,
    /// Clickable button.
    Button,
    /// Hyperlink.
    Link,
}

/// A single hit cell in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HitCell {
    /// Widget that registered this cell, if any.
    pub widget_id: Option<HitId>,
    pub region: HitRegion,
    pub data: HitData,
}

impl HitCell {
    #[inline]
    pub const fn new(widget_id: HitId, region: HitRegion, data: HitData) -> Self {
        Self {
            widget_id: Some(widget_id),
            region,
            data,
        }
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.widget_id.is_none()
    }
}

/// Hit testing grid for mouse interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct HitGrid {
    width: u16,
    height: u16,
    cells: Vec<HitCell>,
}

impl HitGrid {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![HitCell::default(); width as usize * height as usize],
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

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&HitCell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    #[inline]
    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut HitCell> {
        self.index(x, y).map(|i| &mut self.cells[i])
    }

    /// Map every cell of `rect` to the given hit metadata.
    pub fn register(&mut self, rect: Rect, widget_id: HitId, region: HitRegion, data: HitData) {
        let x_end = (rect.x as usize + rect.width as usize).min(self.width as usize);
        let y_end = (rect.y as usize + rect.height as usize).min(self.height as usize);
        if rect.x as usize >= x_end || rect.y as usize >= y_end {
            return;
        }

        let hit_cell = HitCell::new(widget_id, region, data);
        for y in rect.y as usize..y_end {
            let row_start = y * self.width as usize;
            self.cells[row_start + rect.x as usize..row_start + x_end].fill(hit_cell);
        }
    }

    /// The hit registered at (x, y), if any.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<(HitId, HitRegion, HitData)> {
        self.get(x, y)
            .and_then(|cell| cell.widget_id.map(|id| (id, cell.region, cell.data)))
    }

    /// All hits within `rect`, row-major.
    pub fn hits_in(&self, rect: Rect) -> Vec<(HitId, HitRegion, HitData)> {
        let x_end = rect.right().min(self.width);
        let y_end = rect.bottom().min(self.height);
        let mut hits = Vec::new();
        for y in rect.y..y_end {
            for x in rect.x..x_end {
                if let Some(hit) = self.hit_test(x, y) {
                    hits.push(hit);
                }
            }
        }
        hits
    }

    pub fn clear(&mut self) {
        self.cells.fill(HitCell::default());
    }
}

/// Render target for one view pass.
#[derive(Debug, Clone)]
pub struct Frame {
    /// The cell grid.
    pub buffer: Buffer,
    /// Optional hit grid; `None` disables hit registration.
    pub hit_grid: Option<HitGrid>,
}

impl Frame {
    /// Create a frame without hit testing.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            buffer: Buffer::new(width, height),
            hit_grid: None,
        }
    }

    /// Create a frame with hit testing enabled.
    pub fn with_hit_grid(width: u16, height: u16) -> Self {
        let buffer = Buffer::new(width, height);
        let hit_grid = Some(HitGrid::new(buffer.width(), buffer.height()));
        Self { buffer, hit_grid }
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.buffer.width()
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.buffer.height()
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        self.buffer.bounds()
    }

    /// Reset cells and hits.
    pub fn clear(&mut self) {
        self.buffer.clear();
        if let Some(grid) = &mut self.hit_grid {
            grid.clear();
        }
    }

    /// Register a hit region, clipped to the current scissor.
    ///
    /// Returns `false` if the frame has no hit grid.
    pub fn register_hit(
        &mut self,
        rect: Rect,
        id: HitId,
        region: HitRegion,
        data: HitData,
    ) -> bool {
        let Some(grid) = &mut self.hit_grid else {
            return false;
        };
        let clipped = rect.intersection(&self.buffer.current_scissor());
        if !clipped.is_empty() {
            grid.register(clipped, id, region, data);
        }
        true
    }

    /// Hit test at (x, y).
    pub fn hit_test(&self, x: u16, y: u16) -> Option<(HitId, HitRegion, HitData)> {
        self.hit_grid.as_ref().and_then(|grid| grid.hit_test(x, y))
    }

    /// Copy `src_rect` of `src` (cells and hits) to (`dst_x`, `dst_y`).
    ///
    /// Used to show a window of a taller off-screen frame. Destination cells
    /// outside the current scissor are untouched. Hits are copied only when
    /// both frames carry a hit grid.
    pub fn blit(&mut self, src: &Frame, src_rect: Rect, dst_x: u16, dst_y: u16) {
        self.buffer.copy_from(&src.buffer, src_rect, dst_x, dst_y);

        let scissor = self.buffer.current_scissor();
        let (Some(dst_grid), Some(src_grid)) = (&mut self.hit_grid, &src.hit_grid) else {
            return;
        };
        for dy in 0..src_rect.height {
            for dx in 0..src_rect.width {
                let (Some(tx), Some(ty)) = (dst_x.checked_add(dx), dst_y.checked_add(dy)) else {
                    continue;
                };
                if !scissor.contains(tx, ty) {
                    continue;
                }
                let Some(hit) = src_grid.get(src_rect.x + dx, src_rect.y + dy).copied() else {
                    continue;
                };
                if let Some(cell) = dst_grid.get_mut(tx, ty) {
                    *cell = hit;
                }
            }
        }
    }
}
