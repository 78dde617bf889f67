use crate::error::ExportResult;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One file produced by an export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub filename: String,
    pub contents: String,
}

impl Artifact {
    pub fn new(filename: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            contents: contents.into(),
        }
    }

    pub fn write_to(&self, dir: &Path) -> ExportResult<PathBuf> {
        let path = dir.join(&self.filename);
        fs::write(&path, &self.contents)?;
        debug!(path = %path.display(), bytes = self.contents.len(), "Wrote artifact");
        Ok(path)
    }
}

/// Write every artifact into `dir`, creating it when needed
pub fn write_artifacts(dir: &Path, artifacts: &[Artifact]) -> ExportResult<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;
    artifacts.iter().map(|a| a.write_to(dir)).collect()
}
