//! Presentation session state
//!
//! [`PresentationApp`] owns the slides and everything the presenter can change
//! while the deck is running: the current index, scroll offset, status message
//! and the cached view of the current slide. It never touches the terminal
//! itself; everything that needs the screen goes through a [`Host`].

use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use termdeck_core::exec::{self, ExecutionContext, Interpreter};
use termdeck_core::{Host, Slide, View};
use tracing::{debug, info, warn};

use crate::progress::ProgressStore;

/// Message shown when a presentation has no slides
pub const EMPTY_PRESENTATION: &str = "**Error**: Empty presentation.";

/// Something the presenter asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Previous,
    Next,
    First,
    Last,
    Run,
    Reload,
    Edit,
    Shell,
    ScrollUp,
    ScrollDown,
    Quit,
}

impl Action {
    /// Default key binding for an action, if the key has one.
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let action = match key.code {
            KeyCode::Char('c') if ctrl => Self::Quit,
            KeyCode::Char('o') if ctrl => Self::Shell,
            KeyCode::PageUp | KeyCode::Left => Self::Previous,
            KeyCode::PageDown | KeyCode::Right | KeyCode::Char(' ') => Self::Next,
            KeyCode::Home => Self::First,
            KeyCode::End => Self::Last,
            KeyCode::Up => Self::ScrollUp,
            KeyCode::Down => Self::ScrollDown,
            KeyCode::Char(_) if ctrl => return None,
            KeyCode::Char('.') => Self::Run,
            KeyCode::Char('r') => Self::Reload,
            KeyCode::Char('e') => Self::Edit,
            KeyCode::Char('q') => Self::Quit,
            _ => return None,
        };
        Some(action)
    }
}

/// A running presentation
pub struct PresentationApp {
    slides: Vec<Slide>,
    title: String,
    index: usize,
    shell_cwd: Option<PathBuf>,
    editor: String,
    progress: Option<Box<dyn ProgressStore>>,
    view: Option<View>,
    scroll: u16,
    status: Option<String>,
    should_quit: bool,
}

impl PresentationApp {
    /// Create a session showing the first slide.
    ///
    /// An empty deck gets a single error slide so there is always something
    /// to display.
    pub fn new(slides: Vec<Slide>, title: impl Into<String>) -> Self {
        let slides = if slides.is_empty() {
            vec![Slide::error(EMPTY_PRESENTATION)]
        } else {
            slides
        };
        Self {
            slides,
            title: title.into(),
            index: 0,
            shell_cwd: None,
            editor: "vi".to_string(),
            progress: None,
            view: None,
            scroll: 0,
            status: None,
            should_quit: false,
        }
    }

    /// Directory the interactive shell starts in.
    pub fn with_shell_cwd(mut self, shell_cwd: Option<PathBuf>) -> Self {
        self.shell_cwd = shell_cwd;
        self
    }

    /// Editor command used by the edit action. May include arguments.
    pub fn with_editor(mut self, editor: impl Into<String>) -> Self {
        self.editor = editor.into();
        self
    }

    /// Record index changes in `progress`.
    pub fn with_progress(mut self, progress: Box<dyn ProgressStore>) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Start at `index`, clamped to the last slide.
    pub fn with_start_index(mut self, index: usize) -> Self {
        self.index = index.min(self.slides.len() - 1);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn current_slide(&self) -> &Slide {
        &self.slides[self.index]
    }

    /// Position indicator, `i / n` with 1-based `i`.
    pub fn subtitle(&self) -> String {
        format!("{} / {}", self.index + 1, self.slides.len())
    }

    /// Last rendered view of the current slide.
    pub fn view(&self) -> Option<&View> {
        self.view.as_ref()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    /// Keep the scroll offset within the rendered content.
    pub fn clamp_scroll(&mut self, max: u16) {
        self.scroll = self.scroll.min(max);
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Render the current slide again, for example after a resize.
    pub fn refresh(&mut self, host: &mut dyn Host) {
        let slide = &mut self.slides[self.index];
        debug!(index = self.index, kind = %slide.kind(), "rendering slide");
        self.view = Some(slide.render(host));
    }

    /// Perform `action`.
    pub fn handle(&mut self, action: Action, host: &mut dyn Host) {
        debug!(?action, "handling action");
        match action {
            Action::Previous => self.go_to(self.index.saturating_sub(1), host),
            Action::Next => self.go_to(self.index + 1, host),
            Action::First => self.go_to(0, host),
            Action::Last => self.go_to(self.slides.len() - 1, host),
            Action::Run => self.run(host),
            Action::Reload => {
                self.reload_current();
                self.refresh(host);
            }
            Action::Edit => self.edit(host),
            Action::Shell => self.shell(host),
            Action::ScrollUp => self.scroll = self.scroll.saturating_sub(1),
            Action::ScrollDown => self.scroll = self.scroll.saturating_add(1),
            Action::Quit => self.should_quit = true,
        }
    }

    fn go_to(&mut self, index: usize, host: &mut dyn Host) {
        let index = index.min(self.slides.len() - 1);
        if index == self.index {
            return;
        }
        self.index = index;
        self.scroll = 0;
        self.status = None;
        self.refresh(host);

        if let Some(progress) = &self.progress {
            if let Err(e) = progress.save(index) {
                warn!(error = %e, "failed to save progress");
            }
        }
    }

    fn run(&mut self, host: &mut dyn Host) {
        let slide = &mut self.slides[self.index];
        if !slide.is_runnable() {
            return;
        }
        info!(index = self.index, kind = %slide.kind(), "running slide");
        slide.run();
        self.refresh(host);
    }

    fn reload_current(&mut self) {
        match self.slides[self.index].reload() {
            Ok(()) => self.status = None,
            Err(e) => {
                warn!(index = self.index, error = %e, "reload failed");
                self.status = Some(format!("Reload failed: {e}"));
            }
        }
    }

    fn edit(&mut self, host: &mut dyn Host) {
        let Some(path) = self.current_slide().path().map(Path::to_path_buf) else {
            self.status = Some("This slide has no file to edit".to_string());
            return;
        };

        info!(path = %path.display(), editor = %self.editor, "editing slide");
        let editor = self.editor.clone();
        let mut outcome = Ok(());
        let suspended = host.suspend(false, &mut || outcome = open_in_editor(&editor, &path));

        if let Err(e) = suspended.and(outcome) {
            warn!(error = %e, "editor failed");
            self.status = Some(format!("Editor failed: {e}"));
            self.refresh(host);
            return;
        }

        self.reload_current();
        self.refresh(host);
    }

    fn shell(&mut self, host: &mut dyn Host) {
        info!(cwd = ?self.shell_cwd, "opening shell");
        let cwd = self.shell_cwd.clone();
        let mut result = None;
        let suspended = host.suspend(false, &mut || {
            let context = ExecutionContext {
                cwd: cwd.as_deref(),
                env: &[],
            };
            result = Some(exec::run_attached(Interpreter::Shell, "", &context));
        });

        if let Err(e) = suspended {
            self.status = Some(format!("Shell failed: {e}"));
        } else if let Some(result) = result.filter(|r| !r.success) {
            self.status = Some(format!("Shell failed: {}", result.stderr));
        }
        self.refresh(host);
    }
}

/// Run `editor` (a command line, possibly with arguments) on `path`.
fn open_in_editor(editor: &str, path: &Path) -> io::Result<()> {
    let mut parts = editor.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "empty editor command"))?;

    let status = Command::new(program).args(parts).arg(path).status()?;
    if status.success() {
        Ok(())
    } else {
        Err(io::Error::other(format!("{program} exited with {status}")))
    }
}
