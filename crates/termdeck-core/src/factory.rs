//! Building slides from files.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::SlideError;
use crate::exec::Interpreter;
use crate::slide::{
    CodeSlide, DataSlide, ExecutableSlide, MarkdownSlide, Mode, Slide, TextSlide, DEFAULT_LANGUAGE,
};

/// Display languages for known source file extensions.
pub const EXTENSION_LANGUAGES: &[(&str, &str)] = &[
    ("json", "json"),
    ("toml", "toml"),
    ("yaml", "yaml"),
    ("rs", "rust"),
    ("scm", "scheme"),
    ("go", "go"),
];

/// Optional settings forwarded to the slide built from a file.
///
/// Each variant picks up only the fields it understands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlideOptions {
    pub title: Option<String>,
    pub language: Option<String>,
    pub alt_screen: Option<bool>,
    pub mode: Option<Mode>,
    pub runnable: Option<bool>,
    pub wait_for_key: Option<bool>,
    pub classes: Vec<String>,
    pub cwd: Option<PathBuf>,
}

impl SlideOptions {
    /// Apply the fields used by code slides.
    pub fn apply_code(&self, mut slide: CodeSlide) -> CodeSlide {
        if let Some(title) = &self.title {
            slide = slide.with_title(title);
        }
        if let Some(language) = &self.language {
            slide = slide.with_language(language);
        }
        slide
    }

    /// Apply the fields used by executable slides.
    pub fn apply_executable(&self, mut slide: ExecutableSlide) -> ExecutableSlide {
        if let Some(title) = &self.title {
            slide = slide.with_title(title);
        }
        if let Some(alt_screen) = self.alt_screen {
            slide = slide.with_alt_screen(alt_screen);
        }
        if let Some(mode) = self.mode {
            slide = slide.with_mode(mode);
        }
        if let Some(runnable) = self.runnable {
            slide = slide.with_runnable(runnable);
        }
        if let Some(wait_for_key) = self.wait_for_key {
            slide = slide.with_wait_for_key(wait_for_key);
        }
        if let Some(cwd) = &self.cwd {
            slide = slide.with_cwd(cwd);
        }
        slide
    }

    /// Apply the fields used by markdown slides.
    pub fn apply_markdown(&self, mut slide: MarkdownSlide) -> MarkdownSlide {
        if let Some(title) = &self.title {
            slide = slide.with_title(title);
        }
        if !self.classes.is_empty() {
            slide = slide.with_classes(self.classes.join(" "));
        }
        slide
    }

    /// Apply the fields used by text slides.
    pub fn apply_text(&self, mut slide: TextSlide) -> TextSlide {
        if let Some(title) = &self.title {
            slide = slide.with_title(title);
        }
        slide
    }
}

/// Display language for a file extension, `text` when unknown.
pub fn language_for_extension(extension: &str) -> &'static str {
    EXTENSION_LANGUAGES
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map_or(DEFAULT_LANGUAGE, |&(_, language)| language)
}

/// Load a slide from an external file.
///
/// The variant is chosen from the extension as written (case-sensitive):
/// `.py` runs Python, `.md` is markdown, `.csv`/`.pq`/`.parquet` are tables,
/// `.txt` is plain text and everything else is displayed as code.
pub fn load(path: impl AsRef<Path>, options: &SlideOptions) -> Result<Slide, SlideError> {
    let path = path.as_ref();
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
    debug!(path = %path.display(), extension, "loading slide");

    let slide = match extension {
        "py" => options
            .apply_executable(ExecutableSlide::from_path(Interpreter::Python, path))
            .into(),
        "md" => options.apply_markdown(MarkdownSlide::from_path(path)).into(),
        "csv" | "pq" | "parquet" => DataSlide::from_path(path)?.into(),
        "txt" => options.apply_text(TextSlide::from_path(path)).into(),
        other => {
            let slide = CodeSlide::from_path(path).with_language(language_for_extension(other));
            options.apply_code(slide).into()
        }
    };
    Ok(slide)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slide::SlideKind;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn dispatches_on_extension() {
        let dir = TempDir::new().unwrap();
        let cases = [
            ("intro.md", SlideKind::Markdown),
            ("demo.py", SlideKind::Python),
            ("notes.txt", SlideKind::Text),
            ("main.rs", SlideKind::Code),
            ("fib.c", SlideKind::Code),
            ("table.csv", SlideKind::Data),
        ];
        for (name, kind) in cases {
            let path = write(&dir, name, "a,b\n1,2\n");
            let slide = load(&path, &SlideOptions::default()).unwrap();
            assert_eq!(slide.kind(), kind, "{name}");
        }
    }

    #[test]
    fn code_language_comes_from_table_or_override() {
        let dir = TempDir::new().unwrap();
        let rust = write(&dir, "main.rs", "fn main() {}");
        let c = write(&dir, "fib.c", "int main() {}");

        let Slide::Code(slide) = load(&rust, &SlideOptions::default()).unwrap() else {
            panic!("expected code slide");
        };
        assert_eq!(slide.language(), "rust");

        let Slide::Code(slide) = load(&c, &SlideOptions::default()).unwrap() else {
            panic!("expected code slide");
        };
        assert_eq!(slide.language(), "text");

        let options = SlideOptions {
            language: Some("c".into()),
            title: Some("Fibonacci".into()),
            ..SlideOptions::default()
        };
        let Slide::Code(slide) = load(&c, &options).unwrap() else {
            panic!("expected code slide");
        };
        assert_eq!(slide.language(), "c");
        assert_eq!(slide.title(), Some("Fibonacci"));
    }

    #[test]
    fn extension_match_is_case_sensitive() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "SHOUT.MD", "# hi");
        assert_eq!(load(&path, &SlideOptions::default()).unwrap().kind(), SlideKind::Code);
    }

    #[test]
    fn executable_options_are_forwarded() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "plot.py", "print('hi')");
        let options = SlideOptions {
            alt_screen: Some(true),
            wait_for_key: Some(true),
            runnable: Some(false),
            cwd: Some(dir.path().to_path_buf()),
            language: Some("ignored".into()),
            ..SlideOptions::default()
        };

        let Slide::Executable(slide) = load(&path, &options).unwrap() else {
            panic!("expected executable slide");
        };
        assert!(slide.alt_screen());
        assert!(slide.wait_for_key());
        assert!(!slide.is_runnable());
        assert_eq!(slide.cwd(), Some(dir.path()));
        assert_eq!(slide.language(), "python");
        assert_eq!(slide.source(), "print('hi')");
    }

    #[test]
    fn unknown_extension_falls_back_to_text_language() {
        assert_eq!(language_for_extension("scm"), "scheme");
        assert_eq!(language_for_extension("zig"), "text");
        assert_eq!(language_for_extension(""), "text");
    }
}
