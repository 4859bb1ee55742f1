//! Property-based invariant tests for locale number handling.
//!
//! 1. Formatting then parsing returns the original value (≤3 fractional digits).
//! 2. Formatting never panics and is deterministic for any f64.
//! 3. Parsing never panics for arbitrary text.
//! 4. Stripped text never contains the group symbol.
//! 5. Grouped integers only carry group symbols between digits.

use numfield_i18n::{
    NumberFormat, NumberLocale, NumberSymbols, format_value, parse_free_text, parse_leading_float,
    strip_thousand_separators,
};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

const TAGS: &[&str] = &[
    "en", "en-US", "en-IN", "de-DE", "de-CH", "fr-FR", "fr-CA", "es-ES", "es-MX", "pt-BR",
    "pt-PT", "pl", "ru", "sv-SE", "ja-JP", "hi-IN", "gl-ES", "az-AZ", "mk-MK", "sq-AL",
    "ka-GE", "be-BY",
];

fn locale_strategy() -> impl Strategy<Value = Option<NumberLocale>> {
    prop_oneof![
        Just(None),
        proptest::sample::select(TAGS).prop_map(|t| Some(NumberLocale::parse(t).unwrap())),
    ]
}

/// Values with at most three fractional digits.
fn milli_value_strategy() -> impl Strategy<Value = f64> {
    (-1_000_000_000_000i64..=1_000_000_000_000).prop_map(|m| m as f64 / 1000.0)
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Round trip
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn format_then_parse_round_trips(
        value in milli_value_strategy(),
        locale in locale_strategy(),
    ) {
        let format = NumberFormat::resolve(locale.as_ref());
        let text = format.format(value);
        let back = format.parse(&text);
        prop_assert!(back.is_some(), "{text:?} did not parse");
        let back = back.unwrap();
        let tolerance = value.abs().max(1.0) * 1e-12;
        prop_assert!((back - value).abs() <= tolerance, "{value} -> {text:?} -> {back}");
    }

    // ═════════════════════════════════════════════════════════════════
    // 2. Formatting is total and deterministic
    // ═════════════════════════════════════════════════════════════════

    #[test]
    fn format_is_total(bits in any::<u64>(), locale in locale_strategy()) {
        let value = f64::from_bits(bits);
        let a = format_value(value, locale.as_ref());
        let b = format_value(value, locale.as_ref());
        prop_assert_eq!(&a, &b);
        prop_assert!(!a.is_empty());
    }

    // ═════════════════════════════════════════════════════════════════
    // 3. Parsing is total
    // ═════════════════════════════════════════════════════════════════

    #[test]
    fn parse_never_panics(text in "\\PC{0,24}") {
        let _ = parse_leading_float(&text);
        let _ = parse_free_text(&text, &NumberSymbols::DEFAULT);
    }

    #[test]
    fn parse_accepts_plain_decimals(int in 0u32..1_000_000, frac in 0u32..1000) {
        let text = format!("{int}.{frac:03}");
        let expected: f64 = text.parse().unwrap();
        prop_assert_eq!(parse_leading_float(&text), Some(expected));
    }

    // ═════════════════════════════════════════════════════════════════
    // 4. Stripping removes every group symbol
    // ═════════════════════════════════════════════════════════════════

    #[test]
    fn strip_removes_group_symbol(value in milli_value_strategy(), locale in locale_strategy()) {
        let symbols = NumberSymbols::resolve(locale.as_ref());
        let text = format_value(value, locale.as_ref());
        let stripped = strip_thousand_separators(&text, locale.as_ref());
        prop_assert!(!stripped.contains(symbols.group));
    }

    // ═════════════════════════════════════════════════════════════════
    // 5. Group symbols sit between digits
    // ═════════════════════════════════════════════════════════════════

    #[test]
    fn group_symbols_between_digits(
        int in 0u64..10_000_000_000_000,
        tag in proptest::sample::select(TAGS),
    ) {
        let format = NumberFormat::for_locale(&NumberLocale::parse(tag).unwrap());
        let symbols = format.symbols();
        let text = format.format(int as f64);
        let chars: Vec<char> = text.chars().collect();
        for (i, &c) in chars.iter().enumerate() {
            if c == symbols.group {
                prop_assert!(i > 0 && i + 1 < chars.len());
                prop_assert!(chars[i - 1].is_ascii_digit() && chars[i + 1].is_ascii_digit());
            }
        }
    }
}
