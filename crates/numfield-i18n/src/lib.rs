#![forbid(unsafe_code)]

//! Locale-aware number handling for numfield.
//!
//! Provides locale tag parsing, per-locale decimal and group symbols,
//! CLDR-backed number formatting through ICU, and forgiving free-text
//! number parsing.

pub mod locale;
pub mod number;
pub mod symbols;

pub use locale::{I18nError, NumberLocale};
pub use number::{
    NumberFormat, format_value, parse_free_text, parse_leading_float, strip_thousand_separators,
    to_plain_string,
};
pub use symbols::NumberSymbols;
