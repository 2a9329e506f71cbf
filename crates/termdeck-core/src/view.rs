//! Framework-neutral render tree produced by slides.

use crate::slide::dedent;

/// Rendered content of a slide.
///
/// The hosting UI turns this into widgets. Slides only describe what to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// Markdown source, optionally tagged with style classes.
    Markdown {
        text: String,
        classes: Option<String>,
    },
    /// Source code to display with syntax highlighting.
    Code { language: String, code: String },
    /// Captured program output, possibly containing ANSI escapes.
    Output { text: String, is_error: bool },
    /// Plain preformatted text.
    Text(String),
    /// Tabular data.
    Table(TableView),
    /// Children stacked vertically inside one scroll container.
    Column(Vec<View>),
}

impl View {
    /// Markdown view without style classes.
    pub fn markdown(text: impl Into<String>) -> Self {
        Self::Markdown {
            text: text.into(),
            classes: None,
        }
    }

    /// Top-level markdown heading.
    pub fn heading(title: &str) -> Self {
        Self::markdown(format!("# {title}"))
    }
}

/// Plain strings become dedented markdown, so indented literals read naturally.
impl From<String> for View {
    fn from(text: String) -> Self {
        Self::markdown(dedent(&text))
    }
}

impl From<&str> for View {
    fn from(text: &str) -> Self {
        Self::markdown(dedent(text))
    }
}

/// Table contents already formatted for display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableView {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableView {
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }
}
