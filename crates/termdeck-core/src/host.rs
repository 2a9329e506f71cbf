//! The seam between slides and the UI that displays them.
//!
//! Slides never talk to the terminal directly. They ask the [`Host`] for the
//! available area and for a scoped hand-off of the raw terminal when code runs
//! in takeover mode.

use std::io;

/// Terminal area available to a slide, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

impl Size {
    /// Create a new size.
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::new(80, 24)
    }
}

/// The application hosting a slide.
pub trait Host {
    /// Current size of the display area.
    fn size(&self) -> Size;

    /// Pause the UI, hand the raw terminal to `task`, then resume.
    ///
    /// When `wait_for_key` is set the host blocks for a key press after the
    /// task returns and before the UI comes back. Implementations must resume
    /// the UI on every exit path, including a panic unwinding out of `task`.
    fn suspend(&mut self, wait_for_key: bool, task: &mut dyn FnMut()) -> io::Result<()>;
}

/// A host without a terminal.
///
/// Tasks handed to [`Host::suspend`] run in place and are counted, which makes
/// this host useful for tests and for resolving slides outside a session.
#[derive(Debug, Clone, Default)]
pub struct HeadlessHost {
    size: Size,
    suspensions: usize,
}

impl HeadlessHost {
    /// Create a headless host reporting the given size.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            suspensions: 0,
        }
    }

    /// Number of takeover hand-offs performed so far.
    pub fn suspensions(&self) -> usize {
        self.suspensions
    }
}

impl Host for HeadlessHost {
    fn size(&self) -> Size {
        self.size
    }

    fn suspend(&mut self, _wait_for_key: bool, task: &mut dyn FnMut()) -> io::Result<()> {
        self.suspensions += 1;
        task();
        Ok(())
    }
}
