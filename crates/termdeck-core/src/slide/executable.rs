//! Slides whose code can be run from the presentation.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

use super::code::render_code;
use super::source::SlideSource;
use crate::exec::{self, ExecutionContext, Interpreter};
use crate::host::Host;
use crate::view::View;

/// What an executable slide currently shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// The source code
    #[default]
    Code,
    /// The result of running it
    Output,
}

impl Mode {
    fn toggled(self) -> Self {
        match self {
            Self::Code => Self::Output,
            Self::Output => Self::Code,
        }
    }
}

/// Execution state of one slide.
///
/// Transitions:
/// - `toggle`: `code` <-> `output`, never executes by itself
/// - `record`: stores the result of an inline run
/// - `finish_takeover`: stores the error flag and returns to `code`
/// - `reset`: forgets the cached output so the next `output` render re-runs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionState {
    mode: Mode,
    is_error: bool,
    output: Option<String>,
}

impl ExecutionState {
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Whether the most recent run failed.
    pub fn is_error(&self) -> bool {
        self.is_error
    }

    /// Cached inline output, if the code ran since the last reset.
    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    pub fn has_executed(&self) -> bool {
        self.output.is_some()
    }

    fn toggle(&mut self) {
        self.mode = self.mode.toggled();
    }

    fn record(&mut self, output: String, is_error: bool) {
        self.output = Some(output);
        self.is_error = is_error;
    }

    fn finish_takeover(&mut self, is_error: bool) {
        self.is_error = is_error;
        self.mode = Mode::Code;
    }

    fn reset(&mut self) {
        self.output = None;
    }
}

/// Python or shell code that can be run inline or in takeover mode.
#[derive(Debug, Clone)]
pub struct ExecutableSlide {
    source: SlideSource,
    interpreter: Interpreter,
    title: Option<String>,
    alt_screen: bool,
    wait_for_key: bool,
    runnable: bool,
    cwd: Option<PathBuf>,
    state: ExecutionState,
}

impl ExecutableSlide {
    pub fn new(interpreter: Interpreter, source: impl Into<String>) -> Self {
        Self::with_source(interpreter, SlideSource::inline(source))
    }

    pub fn from_path(interpreter: Interpreter, path: impl Into<PathBuf>) -> Self {
        Self::with_source(interpreter, SlideSource::from_path(path))
    }

    /// Inline Python slide.
    pub fn python(source: impl Into<String>) -> Self {
        Self::new(Interpreter::Python, source)
    }

    /// Inline shell slide. Blank source opens the user's shell.
    pub fn shell(source: impl Into<String>) -> Self {
        Self::new(Interpreter::Shell, source)
    }

    fn with_source(interpreter: Interpreter, source: SlideSource) -> Self {
        Self {
            source,
            interpreter,
            title: None,
            alt_screen: false,
            wait_for_key: false,
            runnable: true,
            cwd: None,
            state: ExecutionState::default(),
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Run with the UI suspended instead of capturing output.
    #[must_use]
    pub fn with_alt_screen(mut self, alt_screen: bool) -> Self {
        self.alt_screen = alt_screen;
        self
    }

    /// Block for a key press after a takeover run.
    #[must_use]
    pub fn with_wait_for_key(mut self, wait_for_key: bool) -> Self {
        self.wait_for_key = wait_for_key;
        self
    }

    #[must_use]
    pub fn with_runnable(mut self, runnable: bool) -> Self {
        self.runnable = runnable;
        self
    }

    #[must_use]
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.state.mode = mode;
        self
    }

    #[must_use]
    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn interpreter(&self) -> Interpreter {
        self.interpreter
    }

    pub fn language(&self) -> &'static str {
        self.interpreter.language()
    }

    pub fn path(&self) -> Option<&Path> {
        self.source.path()
    }

    pub fn source(&self) -> &str {
        self.source.text()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn alt_screen(&self) -> bool {
        self.alt_screen
    }

    pub fn wait_for_key(&self) -> bool {
        self.wait_for_key
    }

    pub fn is_runnable(&self) -> bool {
        self.runnable
    }

    pub fn cwd(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    pub fn state(&self) -> &ExecutionState {
        &self.state
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    /// Re-read the source and drop any cached output.
    pub fn load(&mut self) {
        self.state.reset();
        self.source.load();
    }

    /// Switch between code and output.
    pub fn run(&mut self) {
        self.state.toggle();
    }

    pub fn render(&mut self, host: &mut dyn Host) -> View {
        match self.state.mode {
            Mode::Code => self.render_code(),
            Mode::Output if self.alt_screen => {
                self.execute_in_takeover(host);
                self.render_code()
            }
            Mode::Output => {
                self.execute_inline(host);
                self.render_output()
            }
        }
    }

    fn render_code(&self) -> View {
        render_code(self.source.text(), self.language(), self.title.as_deref())
    }

    fn render_output(&self) -> View {
        let mut text = self.state.output().unwrap_or_default().to_string();
        text.push('\n');
        let output = View::Output {
            text,
            is_error: self.state.is_error,
        };
        match &self.title {
            Some(title) => View::Column(vec![View::heading(title), output]),
            None => View::Column(vec![output]),
        }
    }

    /// Environment describing the area available to the program.
    fn size_env(&self, host: &dyn Host) -> Vec<(&'static str, String)> {
        if self.interpreter != Interpreter::Python {
            return Vec::new();
        }
        let size = host.size();
        let margin = if self.title.is_some() { 10 } else { 4 };
        vec![
            ("WIDTH", size.width.saturating_sub(margin).to_string()),
            ("HEIGHT", size.height.saturating_sub(2).to_string()),
        ]
    }

    fn execute_inline(&mut self, host: &mut dyn Host) {
        if self.state.has_executed() {
            return;
        }
        let env = self.size_env(host);
        let context = ExecutionContext {
            cwd: self.cwd.as_deref(),
            env: &env,
        };
        let result = exec::run_captured(self.interpreter, self.source.text(), &context);
        info!(
            language = self.language(),
            success = result.success,
            "executed slide inline"
        );
        let output = self.interpreter.format_output(&result);
        self.state.record(output, !result.success);
    }

    fn execute_in_takeover(&mut self, host: &mut dyn Host) {
        let env = self.size_env(host);
        let context = ExecutionContext {
            cwd: self.cwd.as_deref(),
            env: &env,
        };
        let interpreter = self.interpreter;
        let source = self.source.text();
        let mut result = None;

        let handoff = host.suspend(self.wait_for_key, &mut || {
            result = Some(exec::run_attached(interpreter, source, &context));
        });
        if let Err(e) = handoff {
            warn!(error = %e, "terminal hand-off failed");
        }

        let is_error = result.as_ref().map_or(true, |r| !r.success);
        info!(language = self.language(), success = !is_error, "executed slide in takeover");
        self.state.finish_takeover(is_error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HeadlessHost, Size};

    fn host() -> HeadlessHost {
        HeadlessHost::new(Size::new(100, 30))
    }

    #[test]
    fn run_toggles_mode() {
        let mut slide = ExecutableSlide::shell("echo hi");
        assert_eq!(slide.mode(), Mode::Code);
        slide.run();
        assert_eq!(slide.mode(), Mode::Output);
        slide.run();
        assert_eq!(slide.mode(), Mode::Code);
    }

    #[test]
    fn code_mode_never_executes() {
        let mut slide = ExecutableSlide::shell("echo hi").with_title("Greeting");
        let view = slide.render(&mut host());
        assert!(!slide.state().has_executed());
        let View::Column(children) = view else {
            panic!("expected column");
        };
        assert_eq!(children[0], View::heading("Greeting"));
        assert!(matches!(&children[1], View::Code { language, .. } if language == "shell"));
    }

    #[cfg(unix)]
    #[test]
    fn inline_output_is_memoized_until_reload() {
        let dir = tempfile::TempDir::new().unwrap();
        let counter = dir.path().join("runs");
        let mut slide = ExecutableSlide::shell(format!("echo run >> '{}'; echo done", counter.display()));
        let mut host = host();

        slide.run();
        let first = slide.render(&mut host);
        let second = slide.render(&mut host);
        assert_eq!(first, second);
        assert_eq!(std::fs::read_to_string(&counter).unwrap().lines().count(), 1);
        assert_eq!(
            first,
            View::Column(vec![View::Output {
                text: "done\n\n".into(),
                is_error: false
            }])
        );

        slide.load();
        slide.render(&mut host);
        assert_eq!(std::fs::read_to_string(&counter).unwrap().lines().count(), 2);
        assert_eq!(host.suspensions(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn failing_command_sets_error_flag() {
        let mut slide = ExecutableSlide::shell("echo broken >&2; exit 1").with_mode(Mode::Output);
        let view = slide.render(&mut host());
        assert!(slide.state().is_error());
        assert_eq!(
            view,
            View::Column(vec![View::Output {
                text: "broken\n\n".into(),
                is_error: true
            }])
        );
    }

    #[cfg(unix)]
    #[test]
    fn takeover_runs_every_time_and_returns_to_code() {
        let dir = tempfile::TempDir::new().unwrap();
        let counter = dir.path().join("runs");
        let mut slide = ExecutableSlide::shell(format!("echo run >> '{}'", counter.display()))
            .with_alt_screen(true);
        let mut host = host();

        for expected in 1..=2 {
            slide.run();
            let view = slide.render(&mut host);
            assert!(matches!(view, View::Column(ref c) if matches!(c[0], View::Code { .. })));
            assert_eq!(slide.mode(), Mode::Code);
            assert_eq!(std::fs::read_to_string(&counter).unwrap().lines().count(), expected);
        }
        assert_eq!(host.suspensions(), 2);
        assert!(!slide.state().has_executed());
    }

    #[cfg(unix)]
    #[test]
    fn shell_runs_in_configured_directory() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("marker.txt"), "").unwrap();
        let mut slide = ExecutableSlide::shell("ls")
            .with_cwd(dir.path())
            .with_mode(Mode::Output);
        slide.render(&mut host());
        assert!(slide.state().output().unwrap().contains("marker.txt"));
    }

    #[test]
    fn python_gets_size_environment() {
        let slide = ExecutableSlide::python("print(1)").with_title("T");
        let env = slide.size_env(&host());
        assert_eq!(env, vec![("WIDTH", "90".to_string()), ("HEIGHT", "28".to_string())]);
        assert!(ExecutableSlide::shell("ls").size_env(&host()).is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn python_sees_size_as_globals() {
        let mut slide = ExecutableSlide::python("print(WIDTH)\nprint('-' * HEIGHT)").with_mode(Mode::Output);
        slide.render(&mut HeadlessHost::new(Size::new(20, 10)));
        assert!(!slide.state().is_error(), "{:?}", slide.state().output());
        assert_eq!(slide.state().output(), Some("16\n--------\n"));
    }
}
