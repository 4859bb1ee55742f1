//! Property-based invariant tests for cell width measurement and truncation.
//!
//! 1. Truncation returns a prefix that fits the width budget.
//! 2. Text that already fits is returned unchanged.
//! 3. Truncation keeps as many graphemes as fit and never splits one.
//! 4. A larger budget never yields a shorter prefix.
//! 5. Width is additive over printable ASCII.

use numfield_core::text_width::{display_width, grapheme_width, truncate_to_width};
use proptest::prelude::*;
use unicode_segmentation::UnicodeSegmentation;

// ── Helpers ─────────────────────────────────────────────────────────────

/// Mix of narrow, wide, combining and emoji graphemes.
fn mixed_text() -> impl Strategy<Value = String> {
    prop_oneof![
        "\\PC{0,16}",
        "[a-z 0-9]{0,24}",
        proptest::collection::vec(
            proptest::sample::select(vec![
                "a", "Z", " ", "7", "日", "本", "語", "e\u{301}", "👍", "🇩🇪", "…", "\u{202f}",
            ]),
            0..16,
        )
        .prop_map(|parts| parts.concat()),
    ]
}

fn boundaries(text: &str) -> Vec<usize> {
    let mut ends: Vec<usize> = text.grapheme_indices(true).map(|(i, _)| i).collect();
    ends.push(text.len());
    ends
}

// ═════════════════════════════════════════════════════════════════════════
// 1-3. Truncation
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn truncation_is_a_fitting_prefix(text in mixed_text(), max in 0usize..32) {
        let cut = truncate_to_width(&text, max);
        prop_assert!(text.starts_with(cut));
        prop_assert!(display_width(cut) <= max, "{cut:?} wider than {max}");
    }

    #[test]
    fn fitting_text_is_untouched(text in mixed_text(), slack in 0usize..4) {
        let max = display_width(&text) + slack;
        prop_assert_eq!(truncate_to_width(&text, max), text.as_str());
    }

    #[test]
    fn truncation_stops_at_first_overflowing_grapheme(text in mixed_text(), max in 0usize..32) {
        let cut = truncate_to_width(&text, max);
        prop_assert!(boundaries(&text).contains(&cut.len()), "split inside a grapheme");
        if let Some(next) = text[cut.len()..].graphemes(true).next() {
            prop_assert!(display_width(cut) + grapheme_width(next) > max);
        }
    }

    // ═════════════════════════════════════════════════════════════════
    // 4. Monotonic in the budget
    // ═════════════════════════════════════════════════════════════════

    #[test]
    fn wider_budget_keeps_longer_prefix(text in mixed_text(), a in 0usize..32, b in 0usize..32) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let short = truncate_to_width(&text, lo);
        let long = truncate_to_width(&text, hi);
        prop_assert!(long.starts_with(short));
    }

    // ═════════════════════════════════════════════════════════════════
    // 5. Width
    // ═════════════════════════════════════════════════════════════════

    #[test]
    fn ascii_width_is_additive(a in "[ -~]{0,20}", b in "[ -~]{0,20}") {
        let joined = format!("{a}{b}");
        prop_assert_eq!(display_width(&joined), display_width(&a) + display_width(&b));
        prop_assert_eq!(display_width(&joined), joined.len());
    }

    #[test]
    fn width_is_sum_of_grapheme_widths(text in mixed_text()) {
        let sum: usize = text.graphemes(true).map(grapheme_width).sum();
        prop_assert_eq!(display_width(&text), sum);
    }
}
