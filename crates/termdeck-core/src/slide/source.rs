//! Text content shared by every file-backed slide.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// Slide text, either inline or read from a file.
///
/// When a path is set the text is re-read on every [`SlideSource::load`].
/// Read failures become visible placeholder text rather than errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlideSource {
    path: Option<PathBuf>,
    text: String,
}

impl SlideSource {
    /// Inline text with no backing file.
    pub fn inline(text: impl Into<String>) -> Self {
        Self {
            path: None,
            text: text.into(),
        }
    }

    /// Text backed by `path`, loaded immediately.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let mut source = Self {
            path: Some(path.into()),
            text: String::new(),
        };
        source.load();
        source
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Re-read the backing file, if any.
    pub fn load(&mut self) {
        let Some(path) = &self.path else {
            return;
        };
        self.text = match std::fs::read_to_string(path) {
            Ok(text) => {
                debug!(path = %path.display(), bytes = text.len(), "loaded slide source");
                text
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(path = %path.display(), "slide file not found");
                format!("File not found: {}.", path.display())
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read slide file");
                format!("Could not read {}: {e}.", path.display())
            }
        };
    }
}
