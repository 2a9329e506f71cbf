//! Read-only source code slides.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

use super::source::SlideSource;
use crate::view::View;

/// Language used when none is given and the extension is unknown
pub const DEFAULT_LANGUAGE: &str = "text";

/// Source code shown with syntax highlighting. Never executes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeSlide {
    source: SlideSource,
    title: Option<String>,
    language: String,
}

impl CodeSlide {
    pub fn new(source: impl Into<String>) -> Self {
        Self::with_source(SlideSource::inline(source))
    }

    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::with_source(SlideSource::from_path(path))
    }

    fn with_source(source: SlideSource) -> Self {
        Self {
            source,
            title: None,
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
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

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn load(&mut self) {
        self.source.load();
    }

    pub fn render(&self) -> View {
        render_code(self.source.text(), &self.language, self.title.as_deref())
    }
}

/// Code view with an optional heading, shared with executable slides.
pub(crate) fn render_code(source: &str, language: &str, title: Option<&str>) -> View {
    let code = View::Code {
        language: language.to_string(),
        code: visible_code(source),
    };
    match title {
        Some(title) => View::Column(vec![View::heading(title), code]),
        None => View::Column(vec![code]),
    }
}

fn hide_marker() -> Option<&'static Regex> {
    static MARKER: OnceLock<Option<Regex>> = OnceLock::new();
    MARKER
        .get_or_init(|| Regex::new(r"(?:#|//|--|;)\s*(HIDE_ABOVE|HIDE_BELOW|HIDE)\b").ok())
        .as_ref()
}

/// Strip lines hidden by comment markers.
///
/// `HIDE_ABOVE` drops everything before it, `HIDE_BELOW` everything after it
/// and `HIDE` only its own line. Trailing whitespace is trimmed.
pub fn visible_code(source: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    for line in source.lines() {
        let line = line.trim_end();
        let marker = hide_marker()
            .and_then(|re| re.captures(line))
            .and_then(|c| c.get(1))
            .map(|m| m.as_str());
        match marker {
            Some("HIDE_ABOVE") => lines.clear(),
            Some("HIDE_BELOW") => break,
            Some(_) => {}
            None => lines.push(line),
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hide_markers_trim_code() {
        let source = "import os  \n# HIDE_ABOVE\nprint(1)\nsecret()  # HIDE\nprint(2)\n// HIDE_BELOW\ncleanup()\n";
        assert_eq!(visible_code(source), "print(1)\nprint(2)");
    }

    #[test]
    fn plain_words_are_not_markers() {
        let source = "HIDE = True\nx = 'HIDE'";
        assert_eq!(visible_code(source), source);
    }

    #[test]
    fn render_includes_title_heading() {
        let slide = CodeSlide::new("fn main() {}")
            .with_language("rust")
            .with_title("Entry point");
        let View::Column(children) = slide.render() else {
            panic!("expected column");
        };
        assert_eq!(children[0], View::heading("Entry point"));
        assert_eq!(
            children[1],
            View::Code {
                language: "rust".into(),
                code: "fn main() {}".into()
            }
        );
    }

    #[test]
    fn default_language_is_text() {
        assert_eq!(CodeSlide::new("").language(), DEFAULT_LANGUAGE);
    }
}
