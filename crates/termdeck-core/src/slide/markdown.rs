//! Markdown and plain text slides.

use std::path::{Path, PathBuf};

use super::source::SlideSource;
use crate::view::View;

/// Markdown slide with source from an external file or string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownSlide {
    source: SlideSource,
    title: Option<String>,
    classes: Option<String>,
}

impl MarkdownSlide {
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
            classes: None,
        }
    }

    /// Title rendered as a leading `#` heading.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Space-separated style classes for the hosting UI.
    #[must_use]
    pub fn with_classes(mut self, classes: impl Into<String>) -> Self {
        let classes = classes.into();
        self.classes = (!classes.trim().is_empty()).then_some(classes);
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

    pub fn classes(&self) -> Option<&str> {
        self.classes.as_deref()
    }

    pub fn load(&mut self) {
        self.source.load();
    }

    pub fn render(&self) -> View {
        let body = dedent(self.source.text());
        let text = match &self.title {
            Some(title) => format!("# {title}\n\n{body}"),
            None => body,
        };
        View::Markdown {
            text,
            classes: self.classes.clone(),
        }
    }
}

/// Plain text with an optional title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSlide {
    source: SlideSource,
    title: Option<String>,
}

impl TextSlide {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: SlideSource::inline(source),
            title: None,
        }
    }

    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            source: SlideSource::from_path(path),
            title: None,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
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

    pub fn load(&mut self) {
        self.source.load();
    }

    pub fn render(&self) -> View {
        let mut children = Vec::with_capacity(2);
        if let Some(title) = &self.title {
            children.push(View::heading(title));
        }
        children.push(View::Text(self.source.text().to_string()));
        View::Column(children)
    }
}

/// Remove the whitespace prefix common to all non-blank lines.
pub fn dedent(text: &str) -> String {
    let indent = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);

    let mut out = text
        .lines()
        .map(|line| line.get(indent..).unwrap_or_else(|| line.trim_start()))
        .collect::<Vec<_>>()
        .join("\n");
    if text.ends_with('\n') {
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedent_strips_common_indent() {
        let text = "    # Example\n\n      indented\n    Hello world.\n";
        assert_eq!(dedent(text), "# Example\n\n  indented\nHello world.\n");
    }

    #[test]
    fn dedent_leaves_flush_text_alone() {
        assert_eq!(dedent("# Title\n  body"), "# Title\n  body");
    }

    #[test]
    fn markdown_title_becomes_heading() {
        let slide = MarkdownSlide::new("Some text").with_title("Intro");
        assert_eq!(slide.render(), View::markdown("# Intro\n\nSome text"));
    }

    #[test]
    fn markdown_keeps_classes() {
        let slide = MarkdownSlide::new("Big").with_classes("center large");
        assert_eq!(
            slide.render(),
            View::Markdown {
                text: "Big".into(),
                classes: Some("center large".into())
            }
        );
        assert_eq!(MarkdownSlide::new("x").with_classes(" ").classes(), None);
    }

    #[test]
    fn text_slide_renders_title_and_body() {
        let slide = TextSlide::new("plain").with_title("Notes");
        assert_eq!(
            slide.render(),
            View::Column(vec![View::heading("Notes"), View::Text("plain".into())])
        );
    }
}
