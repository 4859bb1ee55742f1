//! Pure text rules behind [`DecimalInput`](super::DecimalInput).
//!
//! Nothing here holds state: the widget calls these functions from its event
//! handlers, and tests can exercise them directly.

use std::borrow::Cow;

use numfield_i18n::parse_leading_float;
use regex::Regex;
use tracing::warn;

/// Value reported by `on_change` when the text holds no number yet.
pub const DEFAULT_EMPTY_VALUE: f64 = 0.0;

/// Fractional digits accepted when no precision is configured.
pub const DEFAULT_PRECISION: u8 = 2;

/// Compiled `^-?[0-9]*(SEP)?([0-9]{0,precision})?$` for one decimal
/// separator and precision.
///
/// The separator is escaped, so `.` and other regex metacharacters match
/// literally.
#[derive(Debug, Clone)]
pub struct EntryPattern {
    separator: char,
    precision: u8,
    regex: Option<Regex>,
}

impl EntryPattern {
    /// Compile the pattern.
    #[must_use]
    pub fn new(separator: char, precision: u8) -> Self {
        let source = format!(
            "^-?[0-9]*({})?([0-9]{{0,{}}})?$",
            regex::escape(separator.encode_utf8(&mut [0; 4])),
            precision
        );
        let regex = Regex::new(&source).ok();
        if regex.is_none() {
            warn!(%source, "entry pattern failed to compile, rejecting all input");
        }
        Self {
            separator,
            precision,
            regex,
        }
    }

    /// Decimal separator the pattern was built for.
    #[must_use]
    pub fn separator(&self) -> char {
        self.separator
    }

    /// Maximum fractional digits.
    #[must_use]
    pub fn precision(&self) -> u8 {
        self.precision
    }

    /// Whether `text` is a plausible number in progress.
    #[must_use]
    pub fn matches(&self, text: &str) -> bool {
        self.regex.as_ref().is_some_and(|regex| regex.is_match(text))
    }
}

/// Whether `text` may be shown while the user is typing.
///
/// Compiles an [`EntryPattern`] per call; the widget keeps one instead.
#[must_use]
pub fn is_valid_partial_entry(text: &str, decimal_separator: char, precision: u8) -> bool {
    EntryPattern::new(decimal_separator, precision).matches(text)
}

/// Clamp to the configured bounds. `min` applies first, so `max` wins when
/// the bounds are inverted.
#[must_use]
pub fn clamp_value(value: f64, min: Option<f64>, max: Option<f64>) -> f64 {
    let mut value = value;
    if let Some(min) = min
        && value < min
    {
        value = min;
    }
    if let Some(max) = max
        && value > max
    {
        value = max;
    }
    value
}

/// Whether `value` lies within the optional bounds (inclusive).
#[must_use]
pub fn within_bounds(value: f64, min: Option<f64>, max: Option<f64>) -> bool {
    min.is_none_or(|min| value >= min) && max.is_none_or(|max| value <= max)
}

fn replace_decimal(text: &str, decimal_separator: char) -> Cow<'_, str> {
    if decimal_separator != '.' && text.contains(decimal_separator) {
        Cow::Owned(text.replace(decimal_separator, "."))
    } else {
        Cow::Borrowed(text)
    }
}

/// Parse text produced while typing (already a valid partial entry).
#[must_use]
pub fn parse_typed_text(text: &str, decimal_separator: char) -> Option<f64> {
    parse_leading_float(&replace_decimal(text, decimal_separator))
}

/// Parse text on blur: both `,` and the locale decimal separator count as a
/// decimal point.
#[must_use]
pub fn parse_committed_text(text: &str, decimal_separator: char) -> Option<f64> {
    let commas = if text.contains(',') {
        Cow::Owned(text.replace(',', "."))
    } else {
        Cow::Borrowed(text)
    };
    parse_leading_float(&replace_decimal(&commas, decimal_separator))
}

/// Whether a typed value should stay silent: the separator is present but
/// the value is still integral (`12.`, `12.0`).
#[must_use]
pub fn is_pending_fraction(text: &str, decimal_separator: char, value: f64) -> bool {
    text.contains(decimal_separator) && value.fract() == 0.0
}
