//! Number formatting and forgiving number parsing.
//!
//! # Invariants
//!
//! 1. **Round trip**: for every finite `v` with at most
//!    [`MAX_FRACTION_DIGITS`] fractional digits,
//!    `f.parse(&f.format(v)) == Some(v)` for a [`NumberFormat`] `f`, up to
//!    floating-point tolerance.
//! 2. **Totality**: no function in this module panics, whatever the input.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | No digits | `""`, `"-"`, `"abc"` | `parse_leading_float` returns `None` |
//! | Trailing junk | `"12.5kg"` | Longest numeric prefix is parsed (`12.5`) |
//! | Dangling exponent | `"1e"` | Exponent ignored (`1`) |
//! | Non-finite value | `NaN`, `±inf` | Formatted as `NaN`, `∞`, `-∞` |

use std::fmt;

use fixed_decimal::{Decimal, FloatPrecision, SignedRoundingMode, UnsignedRoundingMode};
use icu::decimal::options::DecimalFormatterOptions;
use icu::decimal::{DecimalFormatter, DecimalFormatterPreferences};
use icu::locale::extensions::unicode::{key, value};
use tracing::{debug, warn};

use crate::locale::NumberLocale;
use crate::symbols::NumberSymbols;

/// Fractional digits kept by locale formatting.
pub const MAX_FRACTION_DIGITS: usize = 3;

/// Shortest round-trip text for `value` (`1234.5`, `1e+21`, `0.1`).
///
/// Negative zero prints as `0`. No grouping is applied.
#[must_use]
pub fn to_plain_string(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    let mut buf = ryu_js::Buffer::new();
    buf.format(value).to_string()
}

/// Number formatting for one locale, or plain text when there is none.
///
/// Localized output comes from ICU's decimal formatter with Latin digits,
/// keeps at most [`MAX_FRACTION_DIGITS`] fractional digits (rounded half away
/// from zero on the shortest decimal representation) and drops trailing
/// zeros. The sign is always an ASCII `-`, negative zero included.
pub struct NumberFormat {
    locale: Option<NumberLocale>,
    formatter: Option<DecimalFormatter>,
    symbols: NumberSymbols,
}

impl fmt::Debug for NumberFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NumberFormat")
            .field("locale", &self.locale.as_ref().map(NumberLocale::tag))
            .field("formatter", &self.formatter.is_some())
            .field("symbols", &self.symbols)
            .finish()
    }
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self::plain()
    }
}

impl NumberFormat {
    /// No locale: [`to_plain_string`] output and [`NumberSymbols::DEFAULT`].
    #[must_use]
    pub fn plain() -> Self {
        Self {
            locale: None,
            formatter: None,
            symbols: NumberSymbols::DEFAULT,
        }
    }

    /// Formatter for `locale`.
    #[must_use]
    pub fn for_locale(locale: &NumberLocale) -> Self {
        let mut icu_locale = locale.as_icu().clone();
        icu_locale
            .extensions
            .unicode
            .keywords
            .set(key!("nu"), value!("latn"));
        let prefs = DecimalFormatterPreferences::from(&icu_locale);

        match DecimalFormatter::try_new(prefs, DecimalFormatterOptions::default()) {
            Ok(formatter) => {
                let symbols = NumberSymbols::with_decimal(
                    separator_in(&formatter, "1.5").unwrap_or('.'),
                    separator_in(&formatter, "1234567"),
                );
                debug!(locale = %locale, ?symbols, "number format ready");
                Self {
                    locale: Some(locale.clone()),
                    formatter: Some(formatter),
                    symbols,
                }
            }
            Err(error) => {
                warn!(
                    locale = %locale,
                    %error,
                    "no decimal data for locale, digits stay ungrouped"
                );
                Self {
                    locale: Some(locale.clone()),
                    formatter: None,
                    symbols: NumberSymbols::DEFAULT,
                }
            }
        }
    }

    /// [`NumberFormat::plain`] for `None`, [`NumberFormat::for_locale`] otherwise.
    #[must_use]
    pub fn resolve(locale: Option<&NumberLocale>) -> Self {
        locale.map_or_else(Self::plain, Self::for_locale)
    }

    /// Configured locale.
    #[must_use]
    pub fn locale(&self) -> Option<&NumberLocale> {
        self.locale.as_ref()
    }

    /// Decimal and group symbols this format writes.
    #[must_use]
    pub fn symbols(&self) -> NumberSymbols {
        self.symbols
    }

    /// Format `value` for display.
    #[must_use]
    pub fn format(&self, value: f64) -> String {
        if self.locale.is_none() {
            return to_plain_string(value);
        }
        if value.is_nan() {
            return "NaN".to_string();
        }
        let negative = value.is_sign_negative();
        if value.is_infinite() {
            return if negative { "-∞" } else { "∞" }.to_string();
        }

        let digits = rounded_decimal(value.abs());
        let body = match &self.formatter {
            Some(formatter) => formatter.format(&digits).to_string(),
            None => digits.to_string().replace('.', &self.symbols.decimal.to_string()),
        };
        if negative { format!("-{body}") } else { body }
    }

    /// Parse text written in this format. See [`parse_free_text`].
    #[must_use]
    pub fn parse(&self, text: &str) -> Option<f64> {
        parse_free_text(text, &self.symbols)
    }
}

fn separator_in(formatter: &DecimalFormatter, sample: &str) -> Option<char> {
    let decimal = Decimal::try_from_str(sample).ok()?;
    formatter
        .format(&decimal)
        .to_string()
        .chars()
        .find(|c| !c.is_ascii_digit())
}

fn rounded_decimal(abs: f64) -> Decimal {
    let mut decimal =
        Decimal::try_from_f64(abs, FloatPrecision::RoundTrip).unwrap_or_else(|_| Decimal::from(0));
    decimal.round_with_mode(
        -(MAX_FRACTION_DIGITS as i16),
        SignedRoundingMode::Unsigned(UnsignedRoundingMode::HalfExpand),
    );
    decimal.absolute.trim_end();
    decimal
}

/// Format `value` for display.
///
/// Without a locale this is [`to_plain_string`]. With a locale, see
/// [`NumberFormat`]. Hot paths should keep a [`NumberFormat`] instead.
#[must_use]
pub fn format_value(value: f64, locale: Option<&NumberLocale>) -> String {
    NumberFormat::resolve(locale).format(value)
}

/// Remove every occurrence of the locale's group symbol.
///
/// The separator is matched literally. When the decimal and group symbols
/// coincide, the text is treated as grouped and the symbol is removed.
#[must_use]
pub fn strip_thousand_separators(text: &str, locale: Option<&NumberLocale>) -> String {
    strip_group_symbols(text, &NumberSymbols::resolve(locale))
}

/// [`strip_thousand_separators`] with explicit symbols.
#[must_use]
pub fn strip_group_symbols(text: &str, symbols: &NumberSymbols) -> String {
    text.replace(symbols.group, "")
}

/// Parse text written with `symbols`: group symbols are dropped, the decimal
/// symbol becomes `.`, and the result goes through [`parse_leading_float`].
#[must_use]
pub fn parse_free_text(text: &str, symbols: &NumberSymbols) -> Option<f64> {
    let stripped = strip_group_symbols(text, symbols);
    if symbols.decimal == '.' || symbols.decimal == symbols.group {
        parse_leading_float(&stripped)
    } else {
        parse_leading_float(&stripped.replace(symbols.decimal, "."))
    }
}

/// Parse the longest numeric prefix of `text`.
///
/// Leading whitespace is skipped. Accepts an optional sign, `Infinity`, or
/// ASCII digits with an optional `.` fraction and `e` exponent. Returns
/// `None` when no digit is found.
#[must_use]
pub fn parse_leading_float(text: &str) -> Option<f64> {
    let s = text.trim_start_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    let bytes = s.as_bytes();
    let mut i = 0;

    let negative = match bytes.first() {
        Some(b'-') => {
            i = 1;
            true
        }
        Some(b'+') => {
            i = 1;
            false
        }
        _ => false,
    };

    if s[i..].starts_with("Infinity") {
        return Some(if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_start = i;
    i = skip_digits(bytes, i);
    let int_digits = &s[int_start..i];

    let mut frac_digits = "";
    if bytes.get(i) == Some(&b'.') {
        let frac_start = i + 1;
        let frac_end = skip_digits(bytes, frac_start);
        frac_digits = &s[frac_start..frac_end];
        if !int_digits.is_empty() || !frac_digits.is_empty() {
            i = frac_end;
        }
    }

    if int_digits.is_empty() && frac_digits.is_empty() {
        return None;
    }

    let mut exponent = "0";
    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_digits_end = skip_digits(bytes, j);
        if exp_digits_end > j {
            exponent = &s[i + 1..exp_digits_end];
        }
    }

    let literal = format!(
        "{sign}{int}.{frac}e{exponent}",
        sign = if negative { "-" } else { "" },
        int = if int_digits.is_empty() { "0" } else { int_digits },
        frac = if frac_digits.is_empty() { "0" } else { frac_digits },
    );
    literal.parse::<f64>().ok()
}

fn skip_digits(bytes: &[u8], mut i: usize) -> usize {
    while bytes.get(i).is_some_and(u8::is_ascii_digit) {
        i += 1;
    }
    i
}
