//! Error types for slide and presentation loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading a single slide.
///
/// Only configuration mistakes surface here. A missing text file degrades
/// into placeholder content inside the slide instead.
#[derive(Error, Debug)]
pub enum SlideError {
    #[error("unsupported data format for '{}', expected .csv, .pq or .parquet", path.display())]
    UnsupportedDataFormat { path: PathBuf },

    #[error("failed to read data from '{}': {message}", path.display())]
    Data { path: PathBuf, message: String },
}

/// Errors raised while loading or resolving a presentation document.
#[derive(Error, Debug)]
pub enum PresentationError {
    #[error("failed to read presentation '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse presentation: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to parse presentation: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cannot parse '{}', expected a .toml or .json presentation", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error(transparent)]
    Slide(#[from] SlideError),
}
