//! Property tests for word wrapping and chip measurement.

use folio_render::display_width;
use folio_widgets::{Chip, chips_width, wrap_text};
use proptest::prelude::*;

proptest! {
    #[test]
    fn wrapped_lines_fit(text in "[a-zA-Z ,.]{0,200}", width in 1usize..60) {
        for line in wrap_text(&text, width) {
            prop_assert!(display_width(&line) <= width, "{line:?} wider than {width}");
        }
    }

    #[test]
    fn wrapping_keeps_every_word(text in "[a-z]{1,8}( [a-z]{1,8}){0,20}", width in 8usize..40) {
        let joined = wrap_text(&text, width).join(" ");
        let original: Vec<&str> = text.split_whitespace().collect();
        prop_assert_eq!(joined.split_whitespace().collect::<Vec<_>>(), original);
    }

    #[test]
    fn chips_width_sums_labels_and_gaps(labels in prop::collection::vec("[A-Za-z]{1,10}", 0..6), gap in 0u16..4) {
        let expected: u16 = labels.iter().map(|l| Chip::new(l).width()).sum::<u16>()
            + gap * labels.len().saturating_sub(1) as u16;
        prop_assert_eq!(chips_width(labels.iter().map(String::as_str), gap), expected);
    }
}
