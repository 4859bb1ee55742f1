//! Locale tags for number formatting.
//!
//! [`NumberLocale`] wraps an ICU [`Locale`] so the rest of the workspace can
//! pass locales around, print them, and (with the `serde` feature) store them
//! as plain tag strings.
//!
//! # Invariants
//!
//! 1. **Canonical form**: a parsed [`NumberLocale`] prints as a canonical
//!    BCP-47 tag (`zh-Hant-TW`), whatever case or separator it was written in.
//! 2. **Parsing is total over strings**: every input either yields a locale or
//!    an [`I18nError::InvalidLocale`]; nothing panics.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Empty tag | `""` or whitespace | `InvalidLocale` |
//! | Bad subtag | digits as language, empty or over-long subtags | `InvalidLocale` |
//! | POSIX `C` locale | `from_posix("C")` | `None` (no locale) |

use std::fmt;
use std::str::FromStr;

use icu::locale::Locale;

/// Errors from i18n operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum I18nError {
    /// A locale string was malformed.
    InvalidLocale(String),
}

impl fmt::Display for I18nError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLocale(l) => write!(f, "invalid locale: {l:?}"),
        }
    }
}

impl std::error::Error for I18nError {}

/// A validated locale tag (e.g., `"en"`, `"de-DE"`, `"pt-BR"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct NumberLocale {
    locale: Locale,
}

impl NumberLocale {
    /// Parse a BCP-47 tag. `_` is accepted as a subtag separator.
    pub fn parse(tag: &str) -> Result<Self, I18nError> {
        let invalid = || I18nError::InvalidLocale(tag.to_string());
        let trimmed = tag.trim();
        if trimmed.is_empty() {
            return Err(invalid());
        }
        let locale = trimmed
            .replace('_', "-")
            .parse::<Locale>()
            .map_err(|_| invalid())?;
        Ok(Self { locale })
    }

    /// Interpret a POSIX locale value such as `de_DE.UTF-8@euro`.
    ///
    /// `C`, `POSIX` and empty values mean "no locale" and yield `None`, as do
    /// values that do not form a valid tag.
    #[must_use]
    pub fn from_posix(value: &str) -> Option<Self> {
        let base = value
            .trim()
            .split(['.', '@'])
            .next()
            .unwrap_or_default();
        if base.is_empty() || base.eq_ignore_ascii_case("c") || base.eq_ignore_ascii_case("posix")
        {
            return None;
        }
        Self::parse(base).ok()
    }

    /// Lowercase language subtag.
    #[must_use]
    pub fn language(&self) -> &str {
        self.locale.id.language.as_str()
    }

    /// Titlecased script subtag, if any.
    #[must_use]
    pub fn script(&self) -> Option<&str> {
        self.locale.id.script.as_ref().map(|s| s.as_str())
    }

    /// Uppercase region subtag, if any.
    #[must_use]
    pub fn region(&self) -> Option<&str> {
        self.locale.id.region.as_ref().map(|r| r.as_str())
    }

    /// Canonical tag string.
    #[must_use]
    pub fn tag(&self) -> String {
        self.to_string()
    }

    /// The underlying ICU locale.
    #[must_use]
    pub fn as_icu(&self) -> &Locale {
        &self.locale
    }
}

impl fmt::Display for NumberLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.locale, f)
    }
}

impl From<Locale> for NumberLocale {
    fn from(locale: Locale) -> Self {
        Self { locale }
    }
}

impl FromStr for NumberLocale {
    type Err = I18nError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for NumberLocale {
    type Error = I18nError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for NumberLocale {
    type Error = I18nError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<NumberLocale> for String {
    fn from(locale: NumberLocale) -> Self {
        locale.to_string()
    }
}
