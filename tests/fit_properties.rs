//! Property tests for the fit computation.

use iconfit::{Error, compute_fit};
use proptest::prelude::*;

proptest! {
    #[test]
    fn fit_stays_inside_canvas_and_touches_one_side(
        w in 1u32..5000, h in 1u32..5000, cw in 1u32..2048, ch in 1u32..2048,
    ) {
        let fit = compute_fit((w, h), (cw, ch)).unwrap();
        prop_assert!(fit.new_width >= 1 && fit.new_width <= cw);
        prop_assert!(fit.new_height >= 1 && fit.new_height <= ch);
        prop_assert!(fit.new_width == cw || fit.new_height == ch);
        prop_assert_eq!(fit.offset_x, (cw - fit.new_width) / 2);
        prop_assert_eq!(fit.offset_y, (ch - fit.new_height) / 2);
    }

    #[test]
    fn fit_preserves_aspect_ratio(
        w in 1u32..5000, h in 1u32..5000, cw in 16u32..2048, ch in 16u32..2048,
    ) {
        let fit = compute_fit((w, h), (cw, ch)).unwrap();
        // each side is within rounding (or the 1px floor) of the exact uniform scale
        let scale = (cw as f64 / w as f64).min(ch as f64 / h as f64);
        prop_assert!((fit.new_width as f64 - scale * w as f64).abs() <= 1.0);
        prop_assert!((fit.new_height as f64 - scale * h as f64).abs() <= 1.0);
    }

    #[test]
    fn zero_sided_content_is_rejected(side in 0u32..4096, cw in 1u32..1024) {
        let wide = compute_fit((side, 0), (cw, cw));
        let tall = compute_fit((0, side), (cw, cw));
        let wide_is_invalid = matches!(wide, Err(Error::InvalidDimensions { .. }));
        let tall_is_invalid = matches!(tall, Err(Error::InvalidDimensions { .. }));
        prop_assert!(wide_is_invalid);
        prop_assert!(tall_is_invalid);
    }
}
