#![forbid(unsafe_code)]

//! Layout primitives.
//!
//! - [`Flex`] - splits a row into columns by percentage of its width
//! - [`responsive`] - Desktop/mobile layout selection from the display width

pub mod responsive;

pub use folio_core::geometry::{Rect, Sides};
pub use responsive::{DESKTOP_MIN_WIDTH_DP, DisplayMetrics, LayoutVariant, select_layout};

/// A row of columns sized by percentage of the available width.
///
/// ```
/// use folio_layout::{Flex, Rect};
///
/// let cols = Flex::horizontal()
///     .percentages([35.0, 65.0])
///     .split(Rect::new(0, 0, 100, 30));
/// assert_eq!(cols[0].width, 35);
/// assert_eq!(cols[1].x, 35);
/// assert_eq!(cols[1].width, 65);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Flex {
    percentages: Vec<f32>,
}

impl Flex {
    pub fn horizontal() -> Self {
        Self::default()
    }

    /// Column widths, each a percentage (0.0 to 100.0) of the row.
    pub fn percentages(mut self, percentages: impl IntoIterator<Item = f32>) -> Self {
        self.percentages = percentages.into_iter().collect();
        self
    }

    /// Split the area into one rect per percentage, left to right.
    ///
    /// Columns share the area's height. Widths never sum past `area.width`;
    /// once the row is used up, later columns are empty.
    pub fn split(&self, area: Rect) -> Vec<Rect> {
        let mut x = area.x;
        solve_percentages(&self.percentages, area.width)
            .into_iter()
            .map(|width| {
                let rect = Rect::new(x, area.y, width, area.height);
                x = x.saturating_add(width);
                rect
            })
            .collect()
    }
}

/// Sizes for `percentages` of `available`, rounded to whole cells.
///
/// Allocation is in order and each size is capped by what is left, so the
/// sum never exceeds `available`. Percentages that are not finite count as
/// zero; the rest are clamped to `0.0..=100.0`.
pub fn solve_percentages(percentages: &[f32], available: u16) -> Vec<u16> {
    let mut remaining = available;
    percentages
        .iter()
        .map(|&p| {
            let p = if p.is_finite() { p.clamp(0.0, 100.0) } else { 0.0 };
            let size = ((f32::from(available) * p / 100.0).round() as u16).min(remaining);
            remaining -= size;
            size
        })
        .collect()
}
