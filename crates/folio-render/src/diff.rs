#![forbid(unsafe_code)]

//! Buffer diffing.
//!
//! `BufferDiff::compute` scans two equally sized buffers row-major and
//! records every position whose cell changed. The presenter coalesces the
//! positions into [`ChangeRun`]s so it moves the cursor once per run.

use crate::buffer::Buffer;

/// A contiguous run of changed cells on a single row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeRun {
    pub y: u16,
    /// Start column (inclusive).
    pub x0: u16,
    /// End column (inclusive).
    pub x1: u16,
}

impl ChangeRun {
    #[inline]
    pub const fn new(y: u16, x0: u16, x1: u16) -> Self {
        Self { y, x0, x1 }
    }

    /// Number of cells in this run.
    #[inline]
    pub const fn len(&self) -> u16 {
        self.x1 - self.x0 + 1
    }
}

/// Positions where two buffers differ, sorted by (y, x).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BufferDiff {
    changes: Vec<(u16, u16)>,
}

impl BufferDiff {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the diff between two buffers.
    ///
    /// Buffers of different sizes produce a full diff of `new`.
    pub fn compute(old: &Buffer, new: &Buffer) -> Self {
        if old.width() != new.width() || old.height() != new.height() {
            return Self::full(new.width(), new.height());
        }

        let mut changes = Vec::new();
        for y in 0..new.height() {
            for (x, (a, b)) in old.row_cells(y).iter().zip(new.row_cells(y)).enumerate() {
                if a != b {
                    changes.push((x as u16, y));
                }
            }
        }
        tracing::trace!(changes = changes.len(), "diff computed");
        Self { changes }
    }

    /// A diff covering every cell (first frame, after resize).
    pub fn full(width: u16, height: u16) -> Self {
        let mut changes = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                changes.push((x, y));
            }
        }
        Self { changes }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    #[inline]
    pub fn changes(&self) -> &[(u16, u16)] {
        &self.changes
    }

    /// Coalesce consecutive positions on the same row into runs.
    pub fn runs(&self) -> Vec<ChangeRun> {
        let mut runs: Vec<ChangeRun> = Vec::new();
        for &(x, y) in &self.changes {
            match runs.last_mut() {
                Some(run) if run.y == y && run.x1 + 1 == x => run.x1 = x,
                _ => runs.push(ChangeRun::new(y, x, x)),
            }
        }
        runs
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (u16, u16)> + '_ {
        self.changes.iter().copied()
    }
}
