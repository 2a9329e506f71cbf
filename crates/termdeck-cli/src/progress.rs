//! Remembering the last displayed slide between sessions.

use std::io;
use std::path::PathBuf;

use tracing::debug;

/// Storage for the index of the current slide
pub trait ProgressStore {
    /// Last saved index, if any.
    fn load(&self) -> Option<usize>;

    /// Record the current index.
    fn save(&self, index: usize) -> io::Result<()>;
}

/// Progress kept in a small side file holding the index as text
#[derive(Debug, Clone)]
pub struct FileProgress {
    path: PathBuf,
}

impl FileProgress {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ProgressStore for FileProgress {
    fn load(&self) -> Option<usize> {
        let content = std::fs::read_to_string(&self.path).ok()?;
        let index = content.trim().parse().ok();
        debug!(path = %self.path.display(), ?index, "restored progress");
        index
    }

    fn save(&self, index: usize) -> io::Result<()> {
        std::fs::write(&self.path, index.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn round_trip() {
        let dir = TempDir::new().unwrap();
        let progress = FileProgress::new(dir.path().join(".current_slide"));
        assert_eq!(progress.load(), None);

        progress.save(7).unwrap();
        assert_eq!(progress.load(), Some(7));
    }

    #[test]
    fn garbage_is_ignored() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".current_slide");
        std::fs::write(&path, "seven").unwrap();
        assert_eq!(FileProgress::new(path).load(), None);
    }
}
