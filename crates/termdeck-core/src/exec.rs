//! Running slide code in external processes
//!
//! Executable slides never evaluate code in-process. Python source goes to the
//! configured interpreter and shell source to the platform shell, either with
//! output captured (inline mode) or attached to the terminal (takeover mode).

use std::env;
use std::io::{self, Write};
use std::path::Path;
use std::process::{Command, Output, Stdio};

use tracing::{debug, warn};

/// Environment variable overriding the Python interpreter
pub const PYTHON_ENV: &str = "TERMDECK_PYTHON";

#[cfg(windows)]
const DEFAULT_PYTHON: &str = "python";
#[cfg(not(windows))]
const DEFAULT_PYTHON: &str = "python3";

/// Runs a slide program with `WIDTH` and `HEIGHT` defined as globals.
///
/// The program is the first argument when present, otherwise standard input.
const PYTHON_BOOTSTRAP: &str = "\
import os, sys
WIDTH = int(os.environ.get('WIDTH', '80'))
HEIGHT = int(os.environ.get('HEIGHT', '24'))
source = sys.argv[1] if len(sys.argv) > 1 else sys.stdin.read()
del os, sys
exec(compile(source, '<slide>', 'exec'), {'__name__': '__main__', 'WIDTH': WIDTH, 'HEIGHT': HEIGHT})
";

/// How an executable slide runs its source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interpreter {
    Python,
    Shell,
}

impl Interpreter {
    /// Language identifier used for syntax highlighting
    pub fn language(self) -> &'static str {
        match self {
            Self::Python => "python",
            Self::Shell => "shell",
        }
    }

    /// Build the command that runs `source`.
    ///
    /// Shell source that is blank falls back to the user's interactive shell.
    pub fn command(self, source: &str) -> Command {
        match self {
            Self::Python => {
                let mut command = python_command();
                command.arg(source);
                command
            }
            Self::Shell => {
                let source = source.trim();
                if source.is_empty() {
                    return Command::new(interactive_shell());
                }
                shell_command(source)
            }
        }
    }

    /// Text shown for a captured run.
    pub fn format_output(self, result: &ExecutionResult) -> String {
        match self {
            Self::Python => {
                if result.success {
                    return result.stdout.clone();
                }
                let message = result
                    .stderr
                    .lines()
                    .rev()
                    .find(|line| !line.trim().is_empty())
                    .unwrap_or("process failed");
                let mut out = result.stdout.clone();
                if !out.is_empty() && !out.ends_with('\n') {
                    out.push('\n');
                }
                out.push_str(&format!("Error: {message}\n\n{}", result.stderr));
                out
            }
            Self::Shell => {
                if result.stdout.is_empty() {
                    result.stderr.clone()
                } else {
                    result.stdout.clone()
                }
            }
        }
    }
}

/// The Python bootstrap without a program argument; it reads standard input.
fn python_command() -> Command {
    let program = env::var(PYTHON_ENV)
        .ok()
        .filter(|p| !p.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_PYTHON.to_string());
    let mut command = Command::new(program);
    command.arg("-c").arg(PYTHON_BOOTSTRAP);
    command
}

#[cfg(not(windows))]
fn shell_command(source: &str) -> Command {
    let mut command = Command::new("sh");
    command.arg("-c").arg(source);
    command
}

#[cfg(windows)]
fn shell_command(source: &str) -> Command {
    let mut command = Command::new("cmd");
    command.arg("/C").arg(source);
    command
}

/// The user's interactive shell.
#[cfg(not(windows))]
pub fn interactive_shell() -> String {
    env::var("SHELL")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| "/bin/sh".to_string())
}

/// The user's interactive shell.
#[cfg(windows)]
pub fn interactive_shell() -> String {
    env::var("COMSPEC")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| "cmd.exe".to_string())
}

/// Result of running slide code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Whether the process exited successfully
    pub success: bool,
    /// Captured standard output (empty when attached)
    pub stdout: String,
    /// Captured standard error, or the spawn failure message
    pub stderr: String,
}

impl ExecutionResult {
    /// Create a successful execution result
    pub fn success(stdout: String, stderr: String) -> Self {
        Self {
            success: true,
            stdout,
            stderr,
        }
    }

    /// Create a failed execution result
    pub fn failure(stdout: String, stderr: String) -> Self {
        Self {
            success: false,
            stdout,
            stderr,
        }
    }
}

/// Where and with what environment a slide's code runs
#[derive(Debug, Clone, Copy, Default)]
pub struct ExecutionContext<'a> {
    pub cwd: Option<&'a Path>,
    pub env: &'a [(&'a str, String)],
}

impl ExecutionContext<'_> {
    fn apply(&self, command: &mut Command) {
        if let Some(cwd) = self.cwd {
            command.current_dir(cwd);
        }
        for (key, value) in self.env {
            command.env(key, value);
        }
    }
}

/// Run `source` and capture its output.
///
/// Python reads the program from standard input; shell gets an empty one.
pub fn run_captured(
    interpreter: Interpreter,
    source: &str,
    context: &ExecutionContext<'_>,
) -> ExecutionResult {
    let (mut command, input) = match interpreter {
        Interpreter::Python => (python_command(), Some(source)),
        Interpreter::Shell => (interpreter.command(source), None),
    };
    context.apply(&mut command);

    debug!(program = ?command.get_program(), cwd = ?context.cwd, "running captured");
    match capture(&mut command, input) {
        Ok(output) => {
            let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            if output.status.success() {
                ExecutionResult::success(stdout, stderr)
            } else {
                debug!(status = %output.status, "captured run failed");
                ExecutionResult::failure(stdout, stderr)
            }
        }
        Err(e) => spawn_failure(&command, &e),
    }
}

fn capture(command: &mut Command, input: Option<&str>) -> io::Result<Output> {
    let Some(input) = input else {
        return command.stdin(Stdio::null()).output();
    };
    let mut child = command
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;
    if let Some(mut stdin) = child.stdin.take() {
        // The bootstrap reads all of stdin before running anything.
        if let Err(e) = stdin.write_all(input.as_bytes()) {
            debug!(error = %e, "program closed stdin early");
        }
    }
    child.wait_with_output()
}

/// Run `source` attached to the current terminal.
///
/// The terminal keeps standard input, so Python gets the program as an argument.
pub fn run_attached(
    interpreter: Interpreter,
    source: &str,
    context: &ExecutionContext<'_>,
) -> ExecutionResult {
    let mut command = interpreter.command(source);
    context.apply(&mut command);

    debug!(program = ?command.get_program(), cwd = ?context.cwd, "running attached");
    match command.status() {
        Ok(status) if status.success() => ExecutionResult::success(String::new(), String::new()),
        Ok(status) => ExecutionResult::failure(String::new(), format!("process exited with {status}")),
        Err(e) => spawn_failure(&command, &e),
    }
}

fn spawn_failure(command: &Command, err: &io::Error) -> ExecutionResult {
    let program = command.get_program().to_string_lossy();
    warn!(%program, error = %err, "failed to start process");
    ExecutionResult::failure(String::new(), format!("failed to run `{program}`: {err}"))
}
