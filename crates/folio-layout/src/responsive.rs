#![forbid(unsafe_code)]

//! Responsive layout selection.
//!
//! The portfolio has two arrangements: a two-column desktop layout and a
//! single scrolling column for narrow displays. The choice depends only on
//! the available width in density-independent pixels (dp).
//!
//! ```
//! use folio_layout::responsive::{DisplayMetrics, LayoutVariant, select_layout};
//!
//! assert_eq!(select_layout(1024.0), LayoutVariant::Desktop);
//! assert_eq!(select_layout(800.0), LayoutVariant::Mobile);
//!
//! let metrics = DisplayMetrics::terminal();
//! assert_eq!(metrics.select(100), LayoutVariant::Mobile);
//! assert_eq!(metrics.select(101), LayoutVariant::Desktop);
//! ```

use serde::{Deserialize, Serialize};

/// Widths strictly above this select the desktop layout.
pub const DESKTOP_MIN_WIDTH_DP: f32 = 800.0;

/// Default dp per terminal column.
pub const DEFAULT_CELL_WIDTH_DP: f32 = 8.0;

/// The two page arrangements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutVariant {
    /// Profile column on the left, scrolling project list on the right.
    Desktop,
    /// Everything in one scrolling column.
    Mobile,
}

impl LayoutVariant {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            LayoutVariant::Desktop => "desktop",
            LayoutVariant::Mobile => "mobile",
        }
    }
}

impl std::fmt::Display for LayoutVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Pick the layout for the available width in dp.
///
/// `Desktop` iff the width is strictly greater than
/// [`DESKTOP_MIN_WIDTH_DP`]. NaN and negative widths fall back to `Mobile`.
#[inline]
pub fn select_layout(available_width_dp: f32) -> LayoutVariant {
    if available_width_dp > DESKTOP_MIN_WIDTH_DP {
        LayoutVariant::Desktop
    } else {
        LayoutVariant::Mobile
    }
}

/// Conversion from host cells to dp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayMetrics {
    /// Width of one cell (terminal column or canvas cell) in dp.
    pub cell_width_dp: f32,
}

impl Default for DisplayMetrics {
    fn default() -> Self {
        Self::terminal()
    }
}

impl DisplayMetrics {
    /// Metrics with an explicit cell width. Non-finite or non-positive
    /// values fall back to [`DEFAULT_CELL_WIDTH_DP`].
    pub fn new(cell_width_dp: f32) -> Self {
        if cell_width_dp.is_finite() && cell_width_dp > 0.0 {
            Self { cell_width_dp }
        } else {
            Self::terminal()
        }
    }

    /// Terminal default: 8 dp per column.
    pub const fn terminal() -> Self {
        Self {
            cell_width_dp: DEFAULT_CELL_WIDTH_DP,
        }
    }

    /// Width of `columns` cells in dp.
    #[inline]
    pub fn width_dp(&self, columns: u16) -> f32 {
        f32::from(columns) * self.cell_width_dp
    }

    /// Layout for a display `columns` cells wide.
    #[inline]
    pub fn select(&self, columns: u16) -> LayoutVariant {
        select_layout(self.width_dp(columns))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_exclusive() {
        assert_eq!(select_layout(800.0), LayoutVariant::Mobile);
        assert_eq!(select_layout(800.01), LayoutVariant::Desktop);
        assert_eq!(select_layout(1024.0), LayoutVariant::Desktop);
        assert_eq!(select_layout(600.0), LayoutVariant::Mobile);
        assert_eq!(select_layout(0.0), LayoutVariant::Mobile);
    }

    #[test]
    fn invalid_widths_select_mobile() {
        assert_eq!(select_layout(f32::NAN), LayoutVariant::Mobile);
        assert_eq!(select_layout(-1.0), LayoutVariant::Mobile);
        assert_eq!(select_layout(f32::NEG_INFINITY), LayoutVariant::Mobile);
        assert_eq!(select_layout(f32::INFINITY), LayoutVariant::Desktop);
    }

    #[test]
    fn labels() {
        assert_eq!(LayoutVariant::Desktop.label(), "desktop");
        assert_eq!(LayoutVariant::Mobile.to_string(), "mobile");
    }

    #[test]
    fn terminal_boundary_is_between_100_and_101_columns() {
        let m = DisplayMetrics::terminal();
        assert_eq!(m.width_dp(100), 800.0);
        assert_eq!(m.select(100), LayoutVariant::Mobile);
        assert_eq!(m.select(101), LayoutVariant::Desktop);
    }

    #[test]
    fn invalid_cell_width_falls_back() {
        assert_eq!(DisplayMetrics::new(0.0), DisplayMetrics::terminal());
        assert_eq!(DisplayMetrics::new(f32::NAN), DisplayMetrics::terminal());
        assert_eq!(DisplayMetrics::new(10.0).select(81), LayoutVariant::Desktop);
    }
}
