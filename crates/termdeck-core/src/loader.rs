//! Reading presentation documents.

use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::PresentationError;
use crate::presentation::Presentation;

/// Structured document formats a presentation can be written in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Toml,
    Json,
}

impl DocumentFormat {
    /// Format implied by the file extension, compared case-insensitively.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Load a presentation from a `.toml` or `.json` file.
///
/// Slide paths are resolved relative to the file's directory.
pub fn load_presentation(path: impl AsRef<Path>) -> Result<Presentation, PresentationError> {
    let path = path.as_ref();
    let format = DocumentFormat::from_path(path).ok_or_else(|| PresentationError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    let content = std::fs::read_to_string(path).map_err(|source| PresentationError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let root = path.parent().map(Path::to_path_buf).unwrap_or_default();

    let presentation = parse_presentation(&content, format, root)?;
    info!(
        path = %path.display(),
        slides = presentation.slides.len(),
        "loaded presentation"
    );
    Ok(presentation)
}

/// Load a TOML presentation from a reader.
///
/// Slide paths are resolved relative to the current directory.
pub fn load_presentation_from_reader(mut reader: impl Read) -> Result<Presentation, PresentationError> {
    let mut content = String::new();
    reader
        .read_to_string(&mut content)
        .map_err(|source| PresentationError::Io {
            path: PathBuf::from("<stream>"),
            source,
        })?;
    let root = std::env::current_dir().map_err(|source| PresentationError::Io {
        path: PathBuf::from("."),
        source,
    })?;
    parse_presentation(&content, DocumentFormat::Toml, root)
}

/// Parse document text and inject the directory slide paths are relative to.
pub fn parse_presentation(
    content: &str,
    format: DocumentFormat,
    root: impl Into<PathBuf>,
) -> Result<Presentation, PresentationError> {
    let presentation: Presentation = match format {
        DocumentFormat::Toml => toml::from_str(content)?,
        DocumentFormat::Json => serde_json::from_str(content)?,
    };
    Ok(presentation.with_root(root))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::SlideEntry;
    use std::io::Cursor;
    use tempfile::TempDir;

    #[test]
    fn format_from_extension() {
        assert_eq!(DocumentFormat::from_path(Path::new("deck.TOML")), Some(DocumentFormat::Toml));
        assert_eq!(DocumentFormat::from_path(Path::new("deck.json")), Some(DocumentFormat::Json));
        assert_eq!(DocumentFormat::from_path(Path::new("deck.yaml")), None);
        assert_eq!(DocumentFormat::from_path(Path::new("deck")), None);
    }

    #[test]
    fn unsupported_format_fails_before_reading() {
        let err = load_presentation("/does/not/exist/deck.yaml").unwrap_err();
        assert!(matches!(err, PresentationError::UnsupportedFormat { .. }));
    }

    #[test]
    fn json_document_gets_file_root() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("deck.json");
        std::fs::write(
            &path,
            r#"{"title": "JSON deck", "slides": ["a.md", {"source": "hi"}]}"#,
        )
        .unwrap();

        let presentation = load_presentation(&path).unwrap();
        assert_eq!(presentation.title.as_deref(), Some("JSON deck"));
        assert_eq!(presentation.root(), dir.path());
        assert_eq!(presentation.slides.len(), 2);
    }

    #[test]
    fn reader_is_parsed_as_toml_relative_to_cwd() {
        let content = r##"
title = "My Presentation"
slides = [
    {source = "# This is slide 1"},
    {source = "import this", type = "python" },
]
"##;
        let presentation = load_presentation_from_reader(Cursor::new(content)).unwrap();
        assert_eq!(presentation.root(), std::env::current_dir().unwrap());
        assert_eq!(presentation.create_slides().unwrap().len(), 2);
    }

    #[test]
    fn syntax_errors_are_reported() {
        let err = parse_presentation("slides = [", DocumentFormat::Toml, ".").unwrap_err();
        assert!(matches!(err, PresentationError::Toml(_)));

        let err = parse_presentation("{\"slides\": [1]}", DocumentFormat::Json, ".").unwrap_err();
        assert!(matches!(err, PresentationError::Json(_)));
    }

    #[test]
    fn empty_document_has_no_slides() {
        let presentation = parse_presentation("", DocumentFormat::Toml, ".").unwrap();
        assert!(presentation.slides.is_empty());
        assert_eq!(presentation.slides, Vec::<SlideEntry>::new());
    }
}
