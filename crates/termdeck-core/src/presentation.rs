//! Presentation description and slide realization.
//!
//! A [`Presentation`] is the parsed, validated form of a presentation
//! document. [`Presentation::slides`] turns each entry into a concrete
//! [`Slide`], in declaration order.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use tracing::{debug, warn};

use crate::error::SlideError;
use crate::factory::{self, SlideOptions};
use crate::slide::{CodeSlide, ExecutableSlide, MarkdownSlide, Mode, Slide};

/// Explicit slide type of a described entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideType {
    Python,
    Shell,
    Markdown,
    Code,
}

/// A structured slide entry.
///
/// Every field is optional. Only the fields a variant understands are
/// forwarded to it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SlideDescription {
    /// Slide type; ignored when `path` is set.
    #[serde(default, rename = "type")]
    pub kind: Option<SlideType>,

    /// Inline content.
    #[serde(default)]
    pub source: Option<String>,

    /// External file, relative to the slide base path.
    #[serde(default)]
    pub path: Option<PathBuf>,

    #[serde(default)]
    pub title: Option<String>,

    /// Language used for syntax highlighting.
    #[serde(default)]
    pub language: Option<String>,

    /// Run with the UI suspended.
    #[serde(default)]
    pub alt_screen: Option<bool>,

    /// Initial display mode of executable slides.
    #[serde(default)]
    pub mode: Option<Mode>,

    #[serde(default)]
    pub runnable: Option<bool>,

    /// Wait for a key press after a takeover run.
    #[serde(default)]
    pub wait_for_key: Option<bool>,

    /// Style classes for markdown slides.
    #[serde(default)]
    pub classes: Vec<String>,

    /// Working directory override for executable slides.
    #[serde(default)]
    pub cwd: Option<PathBuf>,
}

impl SlideDescription {
    /// Options forwarded to the constructed slide.
    fn options(&self, cwd: Option<PathBuf>) -> SlideOptions {
        SlideOptions {
            title: self.title.clone(),
            language: self.language.clone(),
            alt_screen: self.alt_screen,
            mode: self.mode,
            runnable: self.runnable,
            wait_for_key: self.wait_for_key,
            classes: self.classes.clone(),
            cwd,
        }
    }
}

/// One entry of the `slides` list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlideEntry {
    /// Bare path, relative to the slide base path.
    Path(String),
    /// Structured description.
    Described(SlideDescription),
}

impl From<&str> for SlideEntry {
    fn from(path: &str) -> Self {
        Self::Path(path.to_string())
    }
}

impl From<SlideDescription> for SlideEntry {
    fn from(description: SlideDescription) -> Self {
        Self::Described(description)
    }
}

impl<'de> Deserialize<'de> for SlideEntry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntryVisitor;

        impl<'de> Visitor<'de> for EntryVisitor {
            type Value = SlideEntry;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a slide path or a slide description table")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<SlideEntry, E> {
                Ok(SlideEntry::Path(value.to_string()))
            }

            fn visit_string<E: de::Error>(self, value: String) -> Result<SlideEntry, E> {
                Ok(SlideEntry::Path(value))
            }

            fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<SlideEntry, A::Error> {
                SlideDescription::deserialize(de::value::MapAccessDeserializer::new(map))
                    .map(SlideEntry::Described)
            }
        }

        deserializer.deserialize_any(EntryVisitor)
    }
}

/// A whole deck before slide realization.
///
/// Top-level keys other than the ones below are ignored, so documents may
/// carry their own metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Presentation {
    #[serde(default)]
    pub title: Option<String>,

    /// Directory slide paths are relative to, itself relative to the document.
    #[serde(default)]
    pub slide_base_path: Option<PathBuf>,

    /// Default working directory of executable slides, relative to the slide
    /// base path.
    #[serde(default)]
    pub shell_cwd: Option<PathBuf>,

    #[serde(default)]
    pub slides: Vec<SlideEntry>,

    /// Directory containing the document, injected by the loader.
    #[serde(skip)]
    root: PathBuf,
}

impl Presentation {
    pub fn new(title: Option<String>, slides: Vec<SlideEntry>) -> Self {
        Self {
            title,
            slides,
            ..Self::default()
        }
    }

    /// Presentation made of one file, relative to the current directory.
    pub fn single(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_string_lossy().into_owned();
        Self::new(None, vec![SlideEntry::Path(path)])
    }

    /// Set the directory the document was read from.
    #[must_use]
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory relative slide paths are resolved against.
    pub fn base_path(&self) -> PathBuf {
        match &self.slide_base_path {
            Some(base) => self.root.join(base),
            None => self.root.clone(),
        }
    }

    /// Default working directory of executable slides.
    pub fn working_dir(&self) -> Option<PathBuf> {
        self.shell_cwd.as_ref().map(|cwd| self.resolve(cwd))
    }

    /// Resolve `path` against the slide base path. Absolute paths are kept.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.base_path().join(path)
    }

    /// Realize each entry in declaration order.
    pub fn slides(&self) -> impl Iterator<Item = Result<Slide, SlideError>> + '_ {
        self.slides.iter().map(|entry| self.realize(entry))
    }

    /// Realize all entries, failing on the first configuration error.
    pub fn create_slides(&self) -> Result<Vec<Slide>, SlideError> {
        self.slides().collect()
    }

    fn realize(&self, entry: &SlideEntry) -> Result<Slide, SlideError> {
        match entry {
            SlideEntry::Path(path) => {
                let path = self.resolve(Path::new(path));
                if !path.exists() {
                    return Ok(missing_file(&path));
                }
                let options = SlideOptions {
                    cwd: self.working_dir(),
                    ..SlideOptions::default()
                };
                factory::load(&path, &options)
            }
            SlideEntry::Described(description) => self.realize_description(description),
        }
    }

    fn realize_description(&self, description: &SlideDescription) -> Result<Slide, SlideError> {
        let cwd = description
            .cwd
            .as_ref()
            .map(|cwd| self.resolve(cwd))
            .or_else(|| self.working_dir());
        let options = description.options(cwd);

        if let Some(path) = &description.path {
            let path = self.resolve(path);
            if !path.exists() {
                return Ok(missing_file(&path));
            }
            return factory::load(&path, &options);
        }

        let source = description.source.clone().unwrap_or_default();
        let slide: Slide = match (description.kind, &description.language) {
            (Some(SlideType::Python), _) => {
                options.apply_executable(ExecutableSlide::python(source)).into()
            }
            (Some(SlideType::Shell), _) => {
                options.apply_executable(ExecutableSlide::shell(source)).into()
            }
            (Some(SlideType::Code), _) | (None, Some(_)) => {
                options.apply_code(CodeSlide::new(source)).into()
            }
            (Some(SlideType::Markdown), _) | (None, None) => {
                options.apply_markdown(MarkdownSlide::new(source)).into()
            }
        };
        debug!(kind = %slide.kind(), "realized described slide");
        Ok(slide)
    }
}

fn missing_file(path: &Path) -> Slide {
    warn!(path = %path.display(), "slide file does not exist");
    Slide::error(format!("**Error**: File not found: `{}`", path.display()))
}
