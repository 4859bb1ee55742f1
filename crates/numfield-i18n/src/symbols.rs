//! Decimal and group symbols.
//!
//! Symbols are read back from the locale's decimal formatter (see
//! [`NumberFormat`](crate::number::NumberFormat)): the first non-digit in a
//! formatted `1.5` is the decimal symbol, the first non-digit in a formatted
//! `1234567` is the group symbol. Locales without formatting data use the
//! root conventions, `.` and `,`.

use crate::locale::NumberLocale;
use crate::number::NumberFormat;

/// Punctuation used to write numbers in a locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NumberSymbols {
    /// Separator between integer and fractional digits.
    pub decimal: char,
    /// Separator between digit groups.
    pub group: char,
}

impl Default for NumberSymbols {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl NumberSymbols {
    /// Punctuation used when no locale is configured: `.` and `,`.
    pub const DEFAULT: Self = Self::new('.', ',');

    /// Construct a symbol set.
    #[must_use]
    pub const fn new(decimal: char, group: char) -> Self {
        Self { decimal, group }
    }

    /// Symbols for an optional locale; `None` yields [`NumberSymbols::DEFAULT`].
    #[must_use]
    pub fn resolve(locale: Option<&NumberLocale>) -> Self {
        locale.map_or(Self::DEFAULT, Self::for_locale)
    }

    /// Symbols for a locale.
    ///
    /// Builds a formatter; callers that also format should keep a
    /// [`NumberFormat`] and ask it for [`NumberFormat::symbols`] instead.
    #[must_use]
    pub fn for_locale(locale: &NumberLocale) -> Self {
        NumberFormat::for_locale(locale).symbols()
    }

    /// Symbols with `decimal` and a group symbol that differs from it.
    pub(crate) fn with_decimal(decimal: char, group: Option<char>) -> Self {
        let fallback = if decimal == ',' { '.' } else { ',' };
        let group = group.filter(|&g| g != decimal).unwrap_or(fallback);
        Self::new(decimal, group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbols(tag: &str) -> NumberSymbols {
        NumberSymbols::for_locale(&NumberLocale::parse(tag).unwrap())
    }

    #[test]
    fn no_locale_uses_default_punctuation() {
        let s = NumberSymbols::resolve(None);
        assert_eq!(s.decimal, '.');
        assert_eq!(s.group, ',');
    }

    #[test]
    fn english_and_german() {
        assert_eq!(symbols("en-US"), NumberSymbols::new('.', ','));
        assert_eq!(symbols("de-DE"), NumberSymbols::new(',', '.'));
    }

    #[test]
    fn regional_data_is_used() {
        assert_eq!(symbols("de-CH"), NumberSymbols::new('.', '\u{2019}'));
        assert_eq!(symbols("fr-FR"), NumberSymbols::new(',', '\u{202f}'));
        assert_eq!(symbols("en-IN"), NumberSymbols::new('.', ','));
    }

    #[test]
    fn comma_decimal_locales_beyond_western_europe() {
        for tag in ["gl-ES", "az-AZ", "mk-MK"] {
            assert_eq!(symbols(tag), NumberSymbols::new(',', '.'), "{tag}");
        }
        for tag in ["sq-AL", "ka-GE", "be-BY"] {
            let s = symbols(tag);
            assert_eq!(s.decimal, ',', "{tag}");
            assert!(s.group.is_whitespace(), "{tag}: {:?}", s.group);
        }
    }

    #[test]
    fn unknown_language_uses_root_symbols() {
        assert_eq!(symbols("zz"), NumberSymbols::DEFAULT);
    }

    #[test]
    fn group_never_equals_decimal() {
        assert_eq!(NumberSymbols::with_decimal(',', None), NumberSymbols::new(',', '.'));
        assert_eq!(NumberSymbols::with_decimal('.', Some('.')), NumberSymbols::DEFAULT);
        assert_eq!(
            NumberSymbols::with_decimal(',', Some('\u{a0}')),
            NumberSymbols::new(',', '\u{a0}')
        );
    }
}
