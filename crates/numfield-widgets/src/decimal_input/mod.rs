#![forbid(unsafe_code)]

//! Locale-aware decimal input.
//!
//! [`DecimalInput`] keeps the text of a numeric field consistent with a
//! locale's punctuation. It accepts keystrokes only while the text remains a
//! plausible number, stays quiet while the user is typing a fraction, and
//! commits a clamped, formatted value when focus leaves the field.
//!
//! # Invariants
//!
//! 1. Text applied by [`DecimalInput::change`] always satisfies
//!    [`is_valid_partial_entry`] for the active decimal separator and
//!    precision; anything else is dropped without side effects.
//! 2. After [`DecimalInput::blur`] the text is either a formatted number or,
//!    when the default value is disabled and the field held no number, empty.
//! 3. Bounds never reject keystrokes. They silence `on_change` while typing
//!    and clamp the committed value on blur.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Rejected keystroke | Text fails the entry pattern | Text unchanged, no notification |
//! | No number yet | `""`, `"-"`, `"."` | `on_change(0)` |
//! | Out of bounds while typing | `150` with max 100 | Text applied, no notification |
//! | Unparsable on blur | Empty or partial text | Falls back to the default value |
//!
//! # Example
//! ```
//! use numfield_widgets::decimal_input::{DecimalInput, DecimalInputConfig, Notification};
//!
//! let config = DecimalInputConfig::new()
//!     .min_value(0.0)
//!     .max_value(100.0)
//!     .precision(2);
//! let mut input = DecimalInput::new(config);
//!
//! input.focus();
//! assert_eq!(input.change("150"), None);
//! assert_eq!(input.blur(), Some(Notification::Blurred(Some(100.0))));
//! assert_eq!(input.text(), "100");
//! ```

mod config;
mod normalize;

pub use config::{
    ConfigError, ConfigParse, DecimalInputConfig, ENV_DEFAULT, ENV_DISABLE_DEFAULT, ENV_LOCALE,
    ENV_MAX, ENV_MIN, ENV_PRECISION, ENV_ZERO_POLICY, MAX_PRECISION, ZeroPolicy, from_env_with,
};
pub use normalize::{
    DEFAULT_EMPTY_VALUE, DEFAULT_PRECISION, EntryPattern, clamp_value, is_pending_fraction,
    is_valid_partial_entry, parse_committed_text, parse_typed_text, within_bounds,
};

use std::fmt;

use numfield_core::event::{Event, KeyCode, KeyEvent, Modifiers};
use numfield_i18n::number::strip_group_symbols;
use numfield_i18n::{NumberFormat, NumberLocale, NumberSymbols, parse_free_text};
use tracing::{debug, trace};
use unicode_segmentation::UnicodeSegmentation;

/// Accessible label exposed to the display layer.
pub const LABEL: &str = "decimal-input";

/// A notification emitted by an event handler.
///
/// The same value is passed to the registered callback, if any, and returned
/// from the handler so message-driven hosts can route it themselves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Notification {
    /// The typed value changed (`on_change`).
    Changed(f64),
    /// The field was committed (`on_blur`). `None` means "cleared".
    Blurred(Option<f64>),
}

/// What the display layer needs to draw the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextFieldView<'a> {
    pub label: &'static str,
    pub text: &'a str,
    pub focused: bool,
}

type ChangeCallback = Box<dyn FnMut(f64)>;
type BlurCallback = Box<dyn FnMut(Option<f64>)>;

/// Decimal text field state machine.
pub struct DecimalInput {
    config: DecimalInputConfig,
    format: NumberFormat,
    entry: EntryPattern,
    text: String,
    focused: bool,
    on_change: Option<ChangeCallback>,
    on_blur: Option<BlurCallback>,
}

impl Default for DecimalInput {
    fn default() -> Self {
        Self::new(DecimalInputConfig::default())
    }
}

impl fmt::Debug for DecimalInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecimalInput")
            .field("config", &self.config)
            .field("format", &self.format)
            .field("entry", &self.entry)
            .field("text", &self.text)
            .field("focused", &self.focused)
            .field("on_change", &self.on_change.is_some())
            .field("on_blur", &self.on_blur.is_some())
            .finish()
    }
}

impl DecimalInput {
    /// Create an unfocused input with text derived from `config`.
    #[must_use]
    pub fn new(config: DecimalInputConfig) -> Self {
        let format = NumberFormat::resolve(config.locale.as_ref());
        let entry = EntryPattern::new(format.symbols().decimal, config.precision);
        let mut input = Self {
            config,
            format,
            entry,
            text: String::new(),
            focused: false,
            on_change: None,
            on_blur: None,
        };
        input.text = input.synced_text();
        input
    }

    // ── Builder methods ────────────────────────────────────────────

    /// Register the change callback (builder).
    #[must_use]
    pub fn with_on_change(mut self, callback: impl FnMut(f64) + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    /// Register the blur callback (builder).
    #[must_use]
    pub fn with_on_blur(mut self, callback: impl FnMut(Option<f64>) + 'static) -> Self {
        self.on_blur = Some(Box::new(callback));
        self
    }

    /// Replace the change callback.
    pub fn set_on_change(&mut self, callback: impl FnMut(f64) + 'static) {
        self.on_change = Some(Box::new(callback));
    }

    /// Replace the blur callback.
    pub fn set_on_blur(&mut self, callback: impl FnMut(Option<f64>) + 'static) {
        self.on_blur = Some(Box::new(callback));
    }

    // ── State access ───────────────────────────────────────────────

    /// Current display text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Accessible label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        LABEL
    }

    /// Whether the field is being edited.
    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &DecimalInputConfig {
        &self.config
    }

    /// Punctuation derived from the configured locale.
    #[must_use]
    pub fn symbols(&self) -> NumberSymbols {
        self.format.symbols()
    }

    /// Snapshot for the display layer.
    #[must_use]
    pub fn view(&self) -> TextFieldView<'_> {
        TextFieldView {
            label: LABEL,
            text: &self.text,
            focused: self.focused,
        }
    }

    /// Format a value the way this field displays it.
    #[must_use]
    pub fn format_value(&self, value: f64) -> String {
        self.format.format(value)
    }

    // ── External updates ───────────────────────────────────────────

    /// Update the externally controlled value and resynchronize the text.
    pub fn set_value(&mut self, value: impl Into<Option<f64>>) {
        let value = value.into();
        if self.config.value == value {
            return;
        }
        self.config.value = value;
        self.resync("value");
    }

    /// Change the locale. The text is reformatted with the new punctuation.
    pub fn set_locale(&mut self, locale: Option<NumberLocale>) {
        if self.config.locale == locale {
            return;
        }
        self.format = NumberFormat::resolve(locale.as_ref());
        self.entry = EntryPattern::new(self.format.symbols().decimal, self.config.precision);
        self.config.locale = locale;
        self.resync("locale");
    }

    /// Change the default value, resynchronizing the text.
    pub fn set_default_value(&mut self, value: f64) {
        if self.config.default_value == value {
            return;
        }
        self.config.default_value = value;
        self.resync("default_value");
    }

    /// Toggle the default value, resynchronizing the text.
    pub fn set_disable_default_value(&mut self, disable: bool) {
        if self.config.disable_default_value == disable {
            return;
        }
        self.config.disable_default_value = disable;
        self.resync("disable_default_value");
    }

    /// Change the bounds. Takes effect on the next change or blur.
    pub fn set_bounds(&mut self, min: Option<f64>, max: Option<f64>) {
        self.config.min_value = min;
        self.config.max_value = max;
    }

    /// Change the precision. Takes effect on the next keystroke.
    pub fn set_precision(&mut self, precision: u8) {
        if self.config.precision == precision {
            return;
        }
        self.config.precision = precision;
        self.entry = EntryPattern::new(self.entry.separator(), precision);
    }

    fn synced_text(&self) -> String {
        match self.config.value {
            Some(value) if !self.config.zero_policy.is_empty(Some(value)) => {
                self.format_value(value)
            }
            _ if self.config.disable_default_value => String::new(),
            _ => self.format_value(self.config.default_value),
        }
    }

    fn resync(&mut self, cause: &'static str) {
        self.text = self.synced_text();
        debug!(cause, text = %self.text, "decimal input resynchronized");
    }

    // ── Event handlers ─────────────────────────────────────────────

    /// Enter edit mode: `"0"` clears, otherwise group separators are removed.
    pub fn focus(&mut self) {
        if self.focused {
            return;
        }
        self.focused = true;
        if self.text == "0" {
            self.text.clear();
        } else {
            self.text = strip_group_symbols(&self.text, &self.format.symbols());
        }
        trace!(text = %self.text, "decimal input focused");
    }

    /// Apply edited text. Returns the notification fired, if any.
    pub fn change(&mut self, new_text: &str) -> Option<Notification> {
        let decimal = self.entry.separator();
        if !self.entry.matches(new_text) {
            trace!(candidate = new_text, "decimal input keystroke rejected");
            return None;
        }
        self.text.clear();
        self.text.push_str(new_text);

        let Some(value) = parse_typed_text(new_text, decimal) else {
            return self.notify(Notification::Changed(DEFAULT_EMPTY_VALUE));
        };

        if is_pending_fraction(new_text, decimal, value) {
            trace!(text = new_text, "decimal input waiting for fraction digits");
            return None;
        }

        if within_bounds(value, self.config.min_value, self.config.max_value) {
            self.notify(Notification::Changed(value))
        } else {
            trace!(value, "decimal input value out of bounds, change suppressed");
            None
        }
    }

    /// Leave edit mode and commit the value. Always notifies.
    ///
    /// An unfocused field still shows formatted text, so group symbols are
    /// stripped before parsing it.
    pub fn blur(&mut self) -> Option<Notification> {
        let was_focused = std::mem::replace(&mut self.focused, false);
        let symbols = self.format.symbols();
        let cfg = &self.config;
        let parsed = if was_focused {
            parse_committed_text(&self.text, symbols.decimal)
        } else {
            parse_free_text(&self.text, &symbols)
        };
        let parsed = parsed.filter(|v| !cfg.zero_policy.is_empty(Some(*v)));

        let committed = match parsed {
            Some(value) => Some(clamp_value(value, cfg.min_value, cfg.max_value)),
            None if cfg.disable_default_value => None,
            None => Some(clamp_value(cfg.default_value, cfg.min_value, cfg.max_value)),
        };

        let reported = match committed {
            Some(value) => {
                self.text = self.format_value(value);
                let cleared = self.config.disable_default_value && value == 0.0;
                (!cleared).then_some(value)
            }
            None => {
                self.text.clear();
                None
            }
        };

        debug!(text = %self.text, value = ?reported, "decimal input committed");
        self.notify(Notification::Blurred(reported))
    }

    /// Dispatch a canonical input event.
    ///
    /// Focus events map to [`focus`](Self::focus) / [`blur`](Self::blur).
    /// Typed characters, backspace and paste build a candidate text that goes
    /// through [`change`](Self::change). Enter and Tab commit the field.
    pub fn handle_event(&mut self, event: &Event) -> Option<Notification> {
        let _span = tracing::debug_span!("widget_event", widget = "DecimalInput").entered();
        match event {
            Event::Focus(true) => {
                self.focus();
                None
            }
            Event::Focus(false) => self.blur(),
            Event::Key(key) if key.is_press() => self.handle_key(key),
            Event::Paste(paste) => {
                let candidate = format!("{}{}", self.text, paste.text);
                self.change(&candidate)
            }
            _ => None,
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> Option<Notification> {
        let ctrl = key.modifiers.contains(Modifiers::CTRL);
        let alt = key.modifiers.contains(Modifiers::ALT);

        match key.code {
            KeyCode::Char(c) if !ctrl && !alt => {
                let mut candidate = self.text.clone();
                candidate.push(c);
                self.change(&candidate)
            }
            KeyCode::Backspace => {
                let (idx, _) = self.text.grapheme_indices(true).next_back()?;
                let candidate = self.text[..idx].to_string();
                self.change(&candidate)
            }
            KeyCode::Enter | KeyCode::Tab | KeyCode::BackTab => self.blur(),
            _ => None,
        }
    }

    fn notify(&mut self, notification: Notification) -> Option<Notification> {
        match notification {
            Notification::Changed(value) => {
                if let Some(callback) = self.on_change.as_mut() {
                    callback(value);
                }
            }
            Notification::Blurred(value) => {
                if let Some(callback) = self.on_blur.as_mut() {
                    callback(value);
                }
            }
        }
        Some(notification)
    }
}
