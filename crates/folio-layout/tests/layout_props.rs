#![forbid(unsafe_code)]

//! Property tests for the layout selector and the percentage split.

use folio_layout::{DESKTOP_MIN_WIDTH_DP, DisplayMetrics, Flex, LayoutVariant, Rect, select_layout};
use proptest::prelude::*;

proptest! {
    #[test]
    fn narrow_widths_are_mobile(w in 0.0f32..=DESKTOP_MIN_WIDTH_DP) {
        prop_assert_eq!(select_layout(w), LayoutVariant::Mobile);
    }

    #[test]
    fn wide_widths_are_desktop(w in 800.001f32..100_000.0) {
        prop_assert_eq!(select_layout(w), LayoutVariant::Desktop);
    }

    #[test]
    fn selection_is_idempotent(w in proptest::num::f32::ANY) {
        prop_assert_eq!(select_layout(w), select_layout(w));
    }

    #[test]
    fn selection_is_monotone_in_columns(cols in 0u16..1000, cell in 0.5f32..32.0) {
        let m = DisplayMetrics::new(cell);
        if m.select(cols) == LayoutVariant::Desktop {
            prop_assert_eq!(m.select(cols.saturating_add(1)), LayoutVariant::Desktop);
        }
    }

    #[test]
    fn split_never_overflows_its_row(
        percentages in proptest::collection::vec(-10.0f32..120.0, 0..6),
        x in 0u16..100,
        width in 0u16..300,
    ) {
        let area = Rect::new(x, 2, width, 10);
        let rects = Flex::horizontal().percentages(percentages.clone()).split(area);

        prop_assert_eq!(rects.len(), percentages.len());
        for r in &rects {
            prop_assert_eq!(r.y, area.y);
            prop_assert_eq!(r.height, area.height);
            if !r.is_empty() {
                prop_assert!(r.x >= area.x);
                prop_assert!(r.right() <= area.right());
            }
        }
        let total: u32 = rects.iter().map(|r| u32::from(r.width)).sum();
        prop_assert!(total <= u32::from(width));
    }

    #[test]
    fn split_columns_are_adjacent(left in 0.0f32..=100.0, width in 0u16..400) {
        let rects = Flex::horizontal()
            .percentages([left, 100.0 - left])
            .split(Rect::new(0, 0, width, 5));
        prop_assert_eq!(rects[0].right(), rects[1].x);
        prop_assert!(rects[1].right() <= width);
    }
}
