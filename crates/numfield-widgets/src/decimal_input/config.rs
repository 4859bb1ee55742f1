//! Configuration for [`DecimalInput`](super::DecimalInput).
//!
//! Built with chained setters, loaded from environment variables, or (with
//! the `serde` feature) deserialized.
//!
//! Environment variables:
//! - `NUMFIELD_LOCALE` (tag such as `de-DE`; falls back to `LC_NUMERIC`,
//!   `LC_ALL`, then `LANG` in POSIX form)
//! - `NUMFIELD_PRECISION` (integer 0..=20)
//! - `NUMFIELD_MIN` / `NUMFIELD_MAX` (number)
//! - `NUMFIELD_DEFAULT` (number)
//! - `NUMFIELD_DISABLE_DEFAULT` (bool)
//! - `NUMFIELD_ZERO_POLICY` = empty|literal

use std::env;
use std::fmt;

use numfield_i18n::NumberLocale;

use super::normalize::{DEFAULT_EMPTY_VALUE, DEFAULT_PRECISION};

pub const ENV_LOCALE: &str = "NUMFIELD_LOCALE";
pub const ENV_PRECISION: &str = "NUMFIELD_PRECISION";
pub const ENV_MIN: &str = "NUMFIELD_MIN";
pub const ENV_MAX: &str = "NUMFIELD_MAX";
pub const ENV_DEFAULT: &str = "NUMFIELD_DEFAULT";
pub const ENV_DISABLE_DEFAULT: &str = "NUMFIELD_DISABLE_DEFAULT";
pub const ENV_ZERO_POLICY: &str = "NUMFIELD_ZERO_POLICY";

/// POSIX variables consulted, in order, when `NUMFIELD_LOCALE` is unset.
const POSIX_LOCALE_VARS: [&str; 3] = ["LC_NUMERIC", "LC_ALL", "LANG"];

/// Largest accepted precision.
pub const MAX_PRECISION: u8 = 20;

/// How an exact zero is interpreted.
///
/// `TreatAsEmpty` reproduces the long-standing widget behaviour: an external
/// value of `0` shows the default (or nothing), and committing `0` falls back
/// to the default value. `Literal` treats zero as an ordinary number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum ZeroPolicy {
    #[default]
    TreatAsEmpty,
    Literal,
}

impl ZeroPolicy {
    /// Parse `empty` / `treat_as_empty` / `literal`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "empty" | "treat_as_empty" | "treat-as-empty" => Some(Self::TreatAsEmpty),
            "literal" | "zero" => Some(Self::Literal),
            _ => None,
        }
    }

    /// Whether `value` counts as "no value" under this policy.
    ///
    /// `None` and `NaN` are always empty.
    #[must_use]
    pub fn is_empty(self, value: Option<f64>) -> bool {
        match value {
            None => true,
            Some(v) if v.is_nan() => true,
            Some(v) => self == Self::TreatAsEmpty && v == 0.0,
        }
    }
}

impl fmt::Display for ZeroPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TreatAsEmpty => f.write_str("empty"),
            Self::Literal => f.write_str("literal"),
        }
    }
}

/// Decimal input configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct DecimalInputConfig {
    /// Externally controlled value.
    pub value: Option<f64>,
    /// Value used when the field is left empty (default 0).
    pub default_value: f64,
    /// Leave the field empty instead of showing the default value.
    pub disable_default_value: bool,
    /// Locale for punctuation. `None` uses `.` and no grouping.
    pub locale: Option<NumberLocale>,
    /// Committed values below this snap to it.
    pub min_value: Option<f64>,
    /// Committed values above this snap to it.
    pub max_value: Option<f64>,
    /// Digits accepted after the decimal separator.
    pub precision: u8,
    /// Interpretation of an exact zero.
    pub zero_policy: ZeroPolicy,
}

impl Default for DecimalInputConfig {
    fn default() -> Self {
        Self {
            value: None,
            default_value: DEFAULT_EMPTY_VALUE,
            disable_default_value: false,
            locale: None,
            min_value: None,
            max_value: None,
            precision: DEFAULT_PRECISION,
            zero_policy: ZeroPolicy::TreatAsEmpty,
        }
    }
}

/// Configuration error with field context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub field: &'static str,
    pub value: String,
    pub message: String,
}

impl ConfigError {
    fn new(field: &'static str, value: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={} ({})", self.field, self.value, self.message)
    }
}

impl std::error::Error for ConfigError {}

/// Configuration parse diagnostics (env + validation).
#[derive(Debug, Clone)]
pub struct ConfigParse {
    pub config: DecimalInputConfig,
    pub errors: Vec<ConfigError>,
}

impl DecimalInputConfig {
    /// Default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the externally controlled value.
    #[must_use]
    pub fn value(mut self, value: impl Into<Option<f64>>) -> Self {
        self.value = value.into();
        self
    }

    /// Set the fallback value.
    #[must_use]
    pub fn default_value(mut self, value: f64) -> Self {
        self.default_value = value;
        self
    }

    /// Leave the field empty rather than showing the default.
    #[must_use]
    pub fn disable_default_value(mut self, disable: bool) -> Self {
        self.disable_default_value = disable;
        self
    }

    /// Set the locale.
    #[must_use]
    pub fn locale(mut self, locale: impl Into<Option<NumberLocale>>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Parse and set the locale from a tag.
    pub fn try_locale(mut self, tag: &str) -> Result<Self, numfield_i18n::I18nError> {
        self.locale = Some(NumberLocale::parse(tag)?);
        Ok(self)
    }

    /// Set the lower bound.
    #[must_use]
    pub fn min_value(mut self, min: impl Into<Option<f64>>) -> Self {
        self.min_value = min.into();
        self
    }

    /// Set the upper bound.
    #[must_use]
    pub fn max_value(mut self, max: impl Into<Option<f64>>) -> Self {
        self.max_value = max.into();
        self
    }

    /// Set the fractional digit count.
    #[must_use]
    pub fn precision(mut self, precision: u8) -> Self {
        self.precision = precision;
        self
    }

    /// Set the zero interpretation.
    #[must_use]
    pub fn zero_policy(mut self, policy: ZeroPolicy) -> Self {
        self.zero_policy = policy;
        self
    }

    /// Parse config from environment variables, discarding diagnostics.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with_diagnostics().config
    }

    /// Parse config from environment variables and return diagnostics.
    #[must_use]
    pub fn from_env_with_diagnostics() -> ConfigParse {
        from_env_with(|key| env::var(key).ok())
    }

    /// Validate config constraints and return all violations.
    pub fn validate(&self) -> Result<(), Vec<ConfigError>> {
        let mut errors = Vec::new();
        if self.precision > MAX_PRECISION {
            errors.push(ConfigError::new(
                "precision",
                self.precision.to_string(),
                format!("must be at most {MAX_PRECISION}"),
            ));
        }
        if !self.default_value.is_finite() {
            errors.push(ConfigError::new(
                "default_value",
                self.default_value.to_string(),
                "must be finite",
            ));
        }
        for (field, bound) in [("min_value", self.min_value), ("max_value", self.max_value)] {
            if let Some(b) = bound
                && b.is_nan()
            {
                errors.push(ConfigError::new(field, "NaN", "must be a number"));
            }
        }
        if let (Some(min), Some(max)) = (self.min_value, self.max_value)
            && min > max
        {
            errors.push(ConfigError::new(
                "min_value",
                min.to_string(),
                format!("must not exceed max_value ({max})"),
            ));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Parse config using a custom environment lookup.
pub fn from_env_with<F>(get: F) -> ConfigParse
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = DecimalInputConfig::default();
    let mut errors = Vec::new();

    if let Some(value) = get(ENV_LOCALE) {
        match NumberLocale::parse(&value) {
            Ok(locale) => config.locale = Some(locale),
            Err(err) => errors.push(ConfigError::new("locale", value, err.to_string())),
        }
    } else {
        config.locale = POSIX_LOCALE_VARS
            .iter()
            .filter_map(|key| get(*key))
            .find(|value| !value.trim().is_empty())
            .and_then(|value| NumberLocale::from_posix(&value));
    }

    if let Some(value) = get(ENV_PRECISION) {
        match value.trim().parse::<u8>() {
            Ok(parsed) => config.precision = parsed,
            Err(_) => errors.push(ConfigError::new(
                "precision",
                value,
                "expected integer 0..=20",
            )),
        }
    }

    if let Some(value) = get(ENV_MIN) {
        match parse_number(&value) {
            Some(parsed) => config.min_value = Some(parsed),
            None => errors.push(ConfigError::new("min_value", value, "expected number")),
        }
    }

    if let Some(value) = get(ENV_MAX) {
        match parse_number(&value) {
            Some(parsed) => config.max_value = Some(parsed),
            None => errors.push(ConfigError::new("max_value", value, "expected number")),
        }
    }

    if let Some(value) = get(ENV_DEFAULT) {
        match parse_number(&value) {
            Some(parsed) => config.default_value = parsed,
            None => errors.push(ConfigError::new("default_value", value, "expected number")),
        }
    }

    if let Some(value) = get(ENV_DISABLE_DEFAULT) {
        match parse_bool(&value) {
            Some(parsed) => config.disable_default_value = parsed,
            None => errors.push(ConfigError::new(
                "disable_default_value",
                value,
                "expected bool (1/0/true/false)",
            )),
        }
    }

    if let Some(value) = get(ENV_ZERO_POLICY) {
        match ZeroPolicy::parse(&value) {
            Some(parsed) => config.zero_policy = parsed,
            None => errors.push(ConfigError::new(
                "zero_policy",
                value,
                "expected empty|literal",
            )),
        }
    }

    if let Err(mut violations) = config.validate() {
        errors.append(&mut violations);
    }

    if !errors.is_empty() {
        tracing::warn!(count = errors.len(), "decimal input config from env has errors");
    }

    ConfigParse { config, errors }
}

fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = DecimalInputConfig::default();
        assert_eq!(config.default_value, 0.0);
        assert!(!config.disable_default_value);
        assert_eq!(config.precision, 2);
        assert_eq!(config.locale, None);
        assert_eq!(config.zero_policy, ZeroPolicy::TreatAsEmpty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builder_chain() {
        let config = DecimalInputConfig::new()
            .value(12.5)
            .default_value(5.0)
            .disable_default_value(true)
            .min_value(0.0)
            .max_value(100.0)
            .precision(3)
            .zero_policy(ZeroPolicy::Literal)
            .try_locale("de_DE")
            .unwrap();
        assert_eq!(config.value, Some(12.5));
        assert_eq!(config.min_value, Some(0.0));
        assert_eq!(config.max_value, Some(100.0));
        assert_eq!(config.locale.as_ref().map(NumberLocale::tag).as_deref(), Some("de-DE"));
        assert!(DecimalInputConfig::new().try_locale("!!").is_err());
    }

    #[test]
    fn validate_reports_every_violation() {
        let errors = DecimalInputConfig::new()
            .precision(25)
            .min_value(10.0)
            .max_value(1.0)
            .default_value(f64::INFINITY)
            .validate()
            .unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["precision", "default_value", "min_value"]);
    }

    #[test]
    fn env_overrides() {
        let parse = from_env_with(env_from(&[
            (ENV_LOCALE, "fr-FR"),
            (ENV_PRECISION, "3"),
            (ENV_MIN, "-10"),
            (ENV_MAX, "1e3"),
            (ENV_DEFAULT, "2.5"),
            (ENV_DISABLE_DEFAULT, "yes"),
            (ENV_ZERO_POLICY, "literal"),
        ]));
        assert!(parse.errors.is_empty(), "{:?}", parse.errors);
        let c = parse.config;
        assert_eq!(c.locale.map(|l| l.tag()), Some("fr-FR".to_string()));
        assert_eq!(c.precision, 3);
        assert_eq!(c.min_value, Some(-10.0));
        assert_eq!(c.max_value, Some(1000.0));
        assert_eq!(c.default_value, 2.5);
        assert!(c.disable_default_value);
        assert_eq!(c.zero_policy, ZeroPolicy::Literal);
    }

    #[test]
    fn env_locale_falls_back_to_posix_vars() {
        let parse = from_env_with(env_from(&[("LANG", "de_DE.UTF-8"), ("LC_ALL", "")]));
        assert_eq!(parse.config.locale.map(|l| l.tag()), Some("de-DE".to_string()));

        let parse = from_env_with(env_from(&[("LC_NUMERIC", "sv_SE.UTF-8"), ("LANG", "en_US")]));
        assert_eq!(parse.config.locale.map(|l| l.tag()), Some("sv-SE".to_string()));

        let parse = from_env_with(env_from(&[("LANG", "C.UTF-8")]));
        assert_eq!(parse.config.locale, None);
    }

    #[test]
    fn env_errors_keep_defaults() {
        let parse = from_env_with(env_from(&[
            (ENV_LOCALE, "not a locale"),
            (ENV_PRECISION, "many"),
            (ENV_MIN, "NaN"),
            (ENV_DISABLE_DEFAULT, "maybe"),
            (ENV_ZERO_POLICY, "sometimes"),
        ]));
        let fields: Vec<_> = parse.errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec!["locale", "precision", "min_value", "disable_default_value", "zero_policy"]
        );
        assert_eq!(parse.config.precision, DEFAULT_PRECISION);
        assert_eq!(parse.config.locale, None);
        assert_eq!(parse.config.min_value, None);
    }

    #[test]
    fn env_validation_errors_are_reported() {
        let parse = from_env_with(env_from(&[
            (ENV_PRECISION, "30"),
            (ENV_MIN, "5"),
            (ENV_MAX, "1"),
        ]));
        let fields: Vec<_> = parse.errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["precision", "min_value"]);
    }

    #[test]
    fn zero_policy_semantics() {
        assert!(ZeroPolicy::TreatAsEmpty.is_empty(Some(0.0)));
        assert!(ZeroPolicy::TreatAsEmpty.is_empty(Some(-0.0)));
        assert!(!ZeroPolicy::Literal.is_empty(Some(0.0)));
        assert!(ZeroPolicy::Literal.is_empty(None));
        assert!(ZeroPolicy::Literal.is_empty(Some(f64::NAN)));
        assert!(!ZeroPolicy::TreatAsEmpty.is_empty(Some(3.0)));
        assert_eq!(ZeroPolicy::parse("EMPTY"), Some(ZeroPolicy::TreatAsEmpty));
        assert_eq!(ZeroPolicy::Literal.to_string(), "literal");
    }

    #[test]
    fn config_error_display() {
        let err = ConfigError::new("precision", "30", "must be at most 20");
        assert_eq!(err.to_string(), "precision=30 (must be at most 20)");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_round_trip() {
        let config = DecimalInputConfig::new()
            .try_locale("de-DE")
            .unwrap()
            .min_value(0.0)
            .zero_policy(ZeroPolicy::Literal);
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"locale\":\"de-DE\""));
        assert!(json.contains("\"zero_policy\":\"literal\""));
        let back: DecimalInputConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);

        let partial: DecimalInputConfig = serde_json::from_str(r#"{"precision":4}"#).unwrap();
        assert_eq!(partial.precision, 4);
        assert_eq!(partial.default_value, 0.0);
    }
}
