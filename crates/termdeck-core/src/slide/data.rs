//! Slides displaying a CSV or Parquet table.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::data::{read_csv, read_parquet, Dataset};
use crate::error::SlideError;
use crate::view::View;

/// Tabular data loaded from disk or supplied directly.
#[derive(Debug, Clone, Default)]
pub struct DataSlide {
    path: Option<PathBuf>,
    data: Option<Dataset>,
}

impl DataSlide {
    /// Load a table from `path`, dispatching on its extension.
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self, SlideError> {
        let mut slide = Self {
            path: Some(path.into()),
            data: None,
        };
        slide.load()?;
        Ok(slide)
    }

    /// Show an already loaded dataset.
    pub fn from_dataset(data: Dataset) -> Self {
        Self {
            path: None,
            data: Some(data),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn data(&self) -> Option<&Dataset> {
        self.data.as_ref()
    }

    pub fn load(&mut self) -> Result<(), SlideError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let data = match path.extension().and_then(|e| e.to_str()) {
            Some("csv") => read_csv(path)?,
            Some("pq" | "parquet") => read_parquet(path)?,
            _ => return Err(SlideError::UnsupportedDataFormat { path: path.clone() }),
        };
        debug!(path = %path.display(), rows = data.num_rows(), "loaded data slide");
        self.data = Some(data);
        Ok(())
    }

    pub fn render(&self) -> View {
        match &self.data {
            Some(data) => View::Table(data.to_table_view()),
            None => View::markdown("No data."),
        }
    }
}
