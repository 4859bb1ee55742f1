//! Display width helpers for single-line widgets.
//!
//! Widths are measured in terminal cells from Unicode data tables. East
//! Asian ambiguous-width glyphs count as two cells when the environment asks
//! for it (`NUMFIELD_CJK_WIDTH`) or the locale is Chinese, Japanese or Korean.

use std::sync::OnceLock;

use unicode_display_width::width as unicode_display_width;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Environment variable forcing the CJK width policy on or off.
pub const ENV_CJK_WIDTH: &str = "NUMFIELD_CJK_WIDTH";

#[inline]
fn env_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[inline]
fn is_cjk_locale(locale: &str) -> bool {
    let lower = locale.trim().to_ascii_lowercase();
    lower.starts_with("ja") || lower.starts_with("zh") || lower.starts_with("ko")
}

/// Compute the CJK width policy using a custom environment lookup.
#[must_use]
pub fn cjk_width_from_env<F>(get_env: F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = get_env(ENV_CJK_WIDTH) {
        return env_flag(&value);
    }
    if let Some(locale) = get_env("LC_CTYPE").or_else(|| get_env("LANG")) {
        return is_cjk_locale(&locale);
    }
    false
}

/// Cached CJK width policy.
#[inline]
pub fn cjk_width_enabled() -> bool {
    static CJK_WIDTH: OnceLock<bool> = OnceLock::new();
    *CJK_WIDTH.get_or_init(|| cjk_width_from_env(|key| std::env::var(key).ok()))
}

/// Width of a single grapheme cluster.
#[must_use]
pub fn grapheme_width(grapheme: &str) -> usize {
    if grapheme.is_ascii() {
        return grapheme.bytes().filter(|b| (0x20..=0x7E).contains(b)).count();
    }
    if cjk_width_enabled() {
        return grapheme.width_cjk();
    }
    unicode_display_width(grapheme) as usize
}

/// Width of a string in terminal cells.
#[must_use]
pub fn display_width(text: &str) -> usize {
    if text.bytes().all(|b| (0x20..=0x7E).contains(&b)) {
        return text.len();
    }
    text.graphemes(true).map(grapheme_width).sum()
}

/// Longest prefix of `text` that fits in `max_width` cells.
///
/// Never splits a grapheme cluster; a wide glyph that would straddle the
/// limit is dropped entirely.
#[must_use]
pub fn truncate_to_width(text: &str, max_width: usize) -> &str {
    let mut used = 0;
    let mut end = 0;
    for (idx, grapheme) in text.grapheme_indices(true) {
        let w = grapheme_width(grapheme);
        if used + w > max_width {
            break;
        }
        used += w;
        end = idx + grapheme.len();
    }
    &text[..end]
}
