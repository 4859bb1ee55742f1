mod app;
mod msg;

use std::io::{self, Write};

use crossterm::event::{self, DisableBracketedPaste, EnableBracketedPaste};
use crossterm::{cursor, execute, queue, style, terminal};
use numfield_core::event::Event;
use numfield_core::logging;
use numfield_widgets::DecimalInputConfig;
use tracing::warn;

use crate::app::DemoApp;
use crate::msg::Msg;

/// Restores the terminal when dropped, including on early return.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(
            io::stdout(),
            terminal::EnterAlternateScreen,
            EnableBracketedPaste,
            cursor::Hide
        )?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(
            io::stdout(),
            cursor::Show,
            DisableBracketedPaste,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

fn draw(out: &mut impl Write, lines: &[String]) -> io::Result<()> {
    queue!(out, terminal::Clear(terminal::ClearType::All))?;
    for (row, line) in lines.iter().enumerate() {
        let row = u16::try_from(row + 1).unwrap_or(u16::MAX);
        queue!(out, cursor::MoveTo(2, row), style::Print(line))?;
    }
    out.flush()
}

fn main() -> io::Result<()> {
    logging::init_from_env();

    let parse = DecimalInputConfig::from_env_with_diagnostics();
    for error in &parse.errors {
        warn!(%error, "ignoring invalid environment setting");
    }
    if let Err(errors) = parse.config.validate() {
        for error in errors {
            warn!(%error, "configuration constraint violated");
        }
    }

    let (width, _) = terminal::size()?;
    let mut app = DemoApp::new(parse.config, width);

    let _guard = TerminalGuard::enter()?;
    let mut stdout = io::stdout();
    while !app.should_quit() {
        draw(&mut stdout, &app.view())?;
        let msg = Event::from_crossterm(event::read()?).map_or(Msg::Noop, Msg::from);
        app.update(msg);
    }
    Ok(())
}
