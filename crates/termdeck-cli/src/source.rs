//! Turning the command-line source argument into a presentation.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use termdeck_core::{load_presentation, Presentation};

/// Documents looked up, in order, when the source is a directory
const DIRECTORY_DOCUMENTS: [&str; 2] = ["presentation.toml", "presentation.json"];

/// Extensions shown as a one-slide presentation
const SINGLE_SLIDE_EXTENSIONS: [&str; 7] = ["md", "markdown", "csv", "py", "pq", "parquet", "txt"];

/// Build the presentation described by `source`.
///
/// A directory must contain a presentation document. Documents are loaded as
/// decks, and individual slide files become a deck of one.
pub fn create_presentation(source: &Path) -> Result<Presentation> {
    let source = resolve_document(source)?;

    let extension = source
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "toml" | "json" => load_presentation(&source)
            .with_context(|| format!("Failed to load presentation {}", source.display())),
        ext if SINGLE_SLIDE_EXTENSIONS.contains(&ext) => {
            if !source.is_file() {
                bail!("File not found: {}", source.display());
            }
            Ok(Presentation::single(&source))
        }
        "" => bail!("Unsupported file type: {} has no extension", source.display()),
        ext => bail!("Unsupported file type: .{ext}"),
    }
}

fn resolve_document(source: &Path) -> Result<PathBuf> {
    if !source.is_dir() {
        return Ok(source.to_path_buf());
    }

    DIRECTORY_DOCUMENTS
        .iter()
        .map(|name| source.join(name))
        .find(|path| path.is_file())
        .with_context(|| format!("presentation.toml not found in {}", source.display()))
}
