//! The crossterm terminal behind a running presentation.

use std::io::{self, Stdout, Write};
use std::panic::{self, AssertUnwindSafe};
use std::thread;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use termdeck_core::{Host, Size};
use tracing::{debug, warn};

use crate::app::{Action, PresentationApp};
use crate::ui::{self, Chrome};

/// Full-screen terminal that slides can temporarily hand back to the shell
pub struct TerminalHost {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    active: bool,
}

impl TerminalHost {
    /// Switch to raw mode on the alternate screen.
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self {
            terminal,
            active: true,
        })
    }

    fn leave(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()
    }

    fn resume(&mut self) -> io::Result<()> {
        if self.active {
            return Ok(());
        }
        enable_raw_mode()?;
        execute!(self.terminal.backend_mut(), EnterAlternateScreen)?;
        self.active = true;
        self.terminal.clear()
    }

    /// Draw one frame of `app`.
    pub fn draw(&mut self, app: &mut PresentationApp, chrome: Chrome) -> io::Result<()> {
        self.terminal.draw(|frame| ui::draw(frame, app, chrome))?;
        Ok(())
    }
}

impl Host for TerminalHost {
    fn size(&self) -> Size {
        crossterm::terminal::size()
            .map(|(width, height)| Size::new(width, height))
            .unwrap_or_default()
    }

    fn suspend(&mut self, wait_for_key: bool, task: &mut dyn FnMut()) -> io::Result<()> {
        self.leave()?;
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| task()));

        let waited = if wait_for_key && outcome.is_ok() {
            wait_for_any_key()
        } else {
            Ok(())
        };
        let resumed = self.resume();
        finish_handoff(outcome, resumed, waited)
    }
}

/// Settle a hand-off once the terminal is back. A panic in the task is
/// re-raised even when restoring the terminal failed.
fn finish_handoff(
    outcome: thread::Result<()>,
    resumed: io::Result<()>,
    waited: io::Result<()>,
) -> io::Result<()> {
    if let Err(payload) = outcome {
        if let Err(e) = resumed {
            warn!(error = %e, "failed to resume terminal after panic");
        }
        panic::resume_unwind(payload);
    }
    resumed.and(waited)
}

impl Drop for TerminalHost {
    fn drop(&mut self) {
        if let Err(e) = self.leave() {
            warn!(error = %e, "failed to restore terminal");
        }
    }
}

fn wait_for_any_key() -> io::Result<()> {
    let mut stdout = io::stdout();
    write!(stdout, "\r\nPress any key to continue...")?;
    stdout.flush()?;

    enable_raw_mode()?;
    let result = loop {
        match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => break Ok(()),
            Ok(_) => {}
            Err(e) => break Err(e),
        }
    };
    disable_raw_mode()?;
    result
}

/// Run the event loop until the presenter quits.
pub fn run(app: &mut PresentationApp, chrome: Chrome) -> io::Result<()> {
    let mut host = TerminalHost::enter()?;
    app.refresh(&mut host);

    while !app.should_quit() {
        host.draw(app, chrome)?;

        match event::read()? {
            Event::Key(key) => {
                if let Some(action) = Action::from_key(key) {
                    app.handle(action, &mut host);
                }
            }
            Event::Resize(width, height) => {
                debug!(width, height, "terminal resized");
                app.refresh(&mut host);
            }
            _ => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn broken() -> io::Result<()> {
        Err(io::Error::other("tty gone"))
    }

    #[test]
    #[should_panic(expected = "slide task failed")]
    fn task_panic_survives_failed_resume() {
        let _ = finish_handoff(Err(Box::new("slide task failed")), broken(), Ok(()));
    }

    #[test]
    fn resume_error_wins_over_key_wait() {
        let err = finish_handoff(Ok(()), broken(), Err(io::Error::other("no key"))).unwrap_err();
        assert_eq!(err.to_string(), "tty gone");
        assert!(finish_handoff(Ok(()), Ok(()), Ok(())).is_ok());
    }
}
