//! Draft and version persistence.
//!
//! The session never touches a storage medium directly. It goes through the
//! [`Storage`] trait, so tests run against [`MemoryStorage`] and the CLI
//! against [`FileStorage`].

use crate::errors::EditorError;
use chrono::{DateTime, Utc};
use pulse_schema::Newsletter;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A named snapshot kept alongside the working draft
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedVersion {
    pub id: String,
    pub label: String,
    pub created_at: DateTime<Utc>,
    pub newsletter: Newsletter,
}

pub trait Storage {
    fn save(&self, document: &Newsletter) -> Result<(), EditorError>;

    /// The last saved draft, if any
    fn load(&self) -> Result<Option<Newsletter>, EditorError>;

    fn save_versions(&self, versions: &[SavedVersion]) -> Result<(), EditorError>;

    fn load_versions(&self) -> Result<Vec<SavedVersion>, EditorError>;
}

impl<S: Storage + ?Sized> Storage for std::rc::Rc<S> {
    fn save(&self, document: &Newsletter) -> Result<(), EditorError> {
        (**self).save(document)
    }

    fn load(&self) -> Result<Option<Newsletter>, EditorError> {
        (**self).load()
    }

    fn save_versions(&self, versions: &[SavedVersion]) -> Result<(), EditorError> {
        (**self).save_versions(versions)
    }

    fn load_versions(&self) -> Result<Vec<SavedVersion>, EditorError> {
        (**self).load_versions()
    }
}

/// In-process storage
#[derive(Debug, Default)]
pub struct MemoryStorage {
    draft: RefCell<Option<Newsletter>>,
    versions: RefCell<Vec<SavedVersion>>,
    saves: RefCell<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful draft saves
    pub fn save_count(&self) -> usize {
        *self.saves.borrow()
    }
}

impl Storage for MemoryStorage {
    fn save(&self, document: &Newsletter) -> Result<(), EditorError> {
        *self.draft.borrow_mut() = Some(document.clone());
        *self.saves.borrow_mut() += 1;
        Ok(())
    }

    fn load(&self) -> Result<Option<Newsletter>, EditorError> {
        Ok(self.draft.borrow().clone())
    }

    fn save_versions(&self, versions: &[SavedVersion]) -> Result<(), EditorError> {
        *self.versions.borrow_mut() = versions.to_vec();
        Ok(())
    }

    fn load_versions(&self) -> Result<Vec<SavedVersion>, EditorError> {
        Ok(self.versions.borrow().clone())
    }
}

/// Pretty-printed JSON files on disk
#[derive(Debug, Clone)]
pub struct FileStorage {
    draft_path: PathBuf,
    versions_path: PathBuf,
}

impl FileStorage {
    pub fn new(draft_path: impl Into<PathBuf>, versions_path: impl Into<PathBuf>) -> Self {
        Self {
            draft_path: draft_path.into(),
            versions_path: versions_path.into(),
        }
    }

    pub fn draft_path(&self) -> &Path {
        &self.draft_path
    }

    pub fn versions_path(&self) -> &Path {
        &self.versions_path
    }

    fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), EditorError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, serde_json::to_string_pretty(value)?)?;
        debug!(path = %path.display(), "Wrote JSON");
        Ok(())
    }
}

impl Storage for FileStorage {
    fn save(&self, document: &Newsletter) -> Result<(), EditorError> {
        Self::write_json(&self.draft_path, document)
    }

    fn load(&self) -> Result<Option<Newsletter>, EditorError> {
        if !self.draft_path.exists() {
            return Ok(None);
        }
        let source = fs::read_to_string(&self.draft_path)?;
        Ok(Some(Newsletter::from_json(&source)?))
    }

    fn save_versions(&self, versions: &[SavedVersion]) -> Result<(), EditorError> {
        Self::write_json(&self.versions_path, versions)
    }

    fn load_versions(&self) -> Result<Vec<SavedVersion>, EditorError> {
        if !self.versions_path.exists() {
            return Ok(Vec::new());
        }
        let source = fs::read_to_string(&self.versions_path)?;
        Ok(serde_json::from_str(&source)?)
    }
}
