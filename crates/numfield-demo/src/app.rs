use numfield_core::event::{Event, KeyCode};
use numfield_widgets::overflow_tip::OverflowRender;
use numfield_widgets::{
    CellMeasure, DecimalInput, DecimalInputConfig, Notification, OverflowStyle, OverflowTip,
};
use tracing::info;

use crate::msg::Msg;

/// Columns reserved around the caption.
const CAPTION_MARGIN: u16 = 4;

pub struct DemoApp {
    input: DecimalInput,
    caption: OverflowTip,
    style: OverflowStyle,
    last_change: Option<f64>,
    committed: Option<Option<f64>>,
    quit: bool,
}

impl DemoApp {
    pub fn new(config: DecimalInputConfig, width: u16) -> Self {
        let measure = CellMeasure::fill(width, CAPTION_MARGIN);
        let caption = OverflowTip::new(caption_text(&config), measure);
        let mut input = DecimalInput::new(config);
        input.focus();
        Self {
            input,
            caption,
            style: OverflowStyle::default(),
            last_change: None,
            committed: None,
            quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn update(&mut self, msg: Msg) {
        match msg {
            Msg::Input(event) => {
                // Typing into a committed field starts a new edit.
                if let Event::Key(key) = &event
                    && matches!(key.code, KeyCode::Char(_) | KeyCode::Backspace)
                    && !self.input.is_focused()
                {
                    self.input.focus();
                }
                if let Some(notification) = self.input.handle_event(&event) {
                    self.update(Msg::Field(notification));
                }
            }
            Msg::Resize { width, height } => {
                self.caption.handle_event(&Event::Resize { width, height });
            }
            Msg::Field(Notification::Changed(value)) => self.last_change = Some(value),
            Msg::Field(Notification::Blurred(value)) => {
                info!(?value, "field committed");
                self.committed = Some(value);
            }
            Msg::Quit => self.quit = true,
            Msg::Noop => {}
        }
    }

    /// Lines to draw, top to bottom.
    pub fn view(&self) -> Vec<String> {
        let OverflowRender { lines, tooltip, .. } = self.caption.render(&self.style);
        let view = self.input.view();
        let cursor = if view.focused { "_" } else { "" };

        let mut out = lines;
        out.push(String::new());
        out.push(format!("[{}] {}{}", view.label, view.text, cursor));
        out.push(String::new());
        out.push(match self.last_change {
            Some(v) => format!("on_change: {v}"),
            None => "on_change: -".to_string(),
        });
        out.push(match self.committed {
            Some(Some(v)) => format!("on_blur:   {v}"),
            Some(None) => "on_blur:   (cleared)".to_string(),
            None => "on_blur:   -".to_string(),
        });
        if let Some(full) = tooltip {
            out.push(format!("tooltip:   {full}"));
        }
        out.push(String::new());
        out.push("Enter/Tab commit · Esc quit".to_string());
        out
    }
}

fn caption_text(config: &DecimalInputConfig) -> String {
    let locale = config
        .locale
        .as_ref()
        .map_or_else(|| "plain".to_string(), |l| l.tag());
    let bound = |b: Option<f64>| b.map_or_else(|| "none".to_string(), |v| v.to_string());
    format!(
        "Decimal input, locale {locale}, precision {}, min {}, max {}, default {}{}",
        config.precision,
        bound(config.min_value),
        bound(config.max_value),
        config.default_value,
        if config.disable_default_value {
            " (disabled)"
        } else {
            ""
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(app: &mut DemoApp, text: &str) {
        for c in text.chars() {
            app.update(Msg::from(Event::key(KeyCode::Char(c))));
        }
    }

    #[test]
    fn typing_and_commit_are_reported() {
        let mut app = DemoApp::new(DecimalInputConfig::new().max_value(50.0), 120);
        keys(&mut app, "42.5");
        assert_eq!(app.last_change, Some(42.5));
        app.update(Msg::from(Event::key(KeyCode::Enter)));
        assert_eq!(app.committed, Some(Some(42.5)));
        let view = app.view();
        assert!(view.iter().any(|l| l == "[decimal-input] 42.5"));
    }

    #[test]
    fn typing_after_commit_refocuses() {
        let mut app = DemoApp::new(DecimalInputConfig::new(), 120);
        keys(&mut app, "3");
        app.update(Msg::from(Event::key(KeyCode::Tab)));
        keys(&mut app, "7");
        assert_eq!(app.last_change, Some(37.0));
    }

    #[test]
    fn narrow_terminal_shows_tooltip() {
        let mut app = DemoApp::new(DecimalInputConfig::new(), 200);
        assert!(!app.view().iter().any(|l| l.starts_with("tooltip:")));
        app.update(Msg::from(Event::Resize {
            width: 20,
            height: 10,
        }));
        let view = app.view();
        assert!(view[0].ends_with('…'));
        assert!(view.iter().any(|l| l.starts_with("tooltip:")));
    }

    #[test]
    fn escape_quits() {
        let mut app = DemoApp::new(DecimalInputConfig::new(), 80);
        app.update(Msg::from(Event::key(KeyCode::Escape)));
        assert!(app.should_quit());
    }
}
