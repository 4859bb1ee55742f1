use numfield_core::event::{Event, KeyCode, KeyEvent, Modifiers};
use numfield_widgets::Notification;

#[derive(Debug)]
pub enum Msg {
    /// Input routed to the decimal field.
    Input(Event),
    /// Viewport changed; the caption re-measures.
    Resize { width: u16, height: u16 },
    /// A notification the field emitted.
    Field(Notification),
    Quit,
    Noop,
}

impl From<Event> for Msg {
    fn from(event: Event) -> Self {
        match event {
            Event::Key(KeyEvent {
                code: KeyCode::Escape,
                ..
            }) => Msg::Quit,
            Event::Key(KeyEvent {
                code: KeyCode::Char('c'),
                modifiers,
                ..
            }) if modifiers.contains(Modifiers::CTRL) => Msg::Quit,
            Event::Resize { width, height } => Msg::Resize { width, height },
            other => Msg::Input(other),
        }
    }
}
