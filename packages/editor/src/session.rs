//! # Edit Session
//!
//! The single owner and writer of a newsletter while it is being edited.
//!
//! A session holds the current snapshot, the undo history, the collaborators
//! that reducers need (identifier source, clock) and the storage used for
//! autosave and named versions. Renderers and exporters only ever see
//! `&Newsletter` borrowed from [`EditSession::document`].

use crate::clock::{Clock, SystemClock};
use crate::errors::EditorError;
use crate::mutations::{Mutation, MutationContext};
use crate::storage::{SavedVersion, Storage};
use crate::undo_stack::UndoStack;
use chrono::{DateTime, Duration, Utc};
use pulse_schema::{IdSource, Newsletter, UuidIds};
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Minimum time between two autosaves
    pub autosave_interval: Duration,

    /// Named versions kept, newest first
    pub max_versions: usize,

    pub max_undo_levels: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            autosave_interval: Duration::seconds(30),
            max_versions: 20,
            max_undo_levels: 100,
        }
    }
}

pub struct EditSession {
    document: Newsletter,
    history: UndoStack,
    ids: Box<dyn IdSource>,
    clock: Box<dyn Clock>,
    storage: Box<dyn Storage>,
    options: SessionOptions,
    versions: Vec<SavedVersion>,
    dirty: bool,
    last_saved_at: DateTime<Utc>,
}

impl EditSession {
    /// Session with random identifiers and wall-clock time
    pub fn new(document: Newsletter, storage: Box<dyn Storage>) -> Result<Self, EditorError> {
        Self::with_collaborators(
            document,
            storage,
            Box::new(UuidIds),
            Box::new(SystemClock),
            SessionOptions::default(),
        )
    }

    pub fn with_collaborators(
        document: Newsletter,
        storage: Box<dyn Storage>,
        ids: Box<dyn IdSource>,
        clock: Box<dyn Clock>,
        options: SessionOptions,
    ) -> Result<Self, EditorError> {
        let mut versions = storage.load_versions()?;
        versions.truncate(options.max_versions);
        let last_saved_at = clock.now();

        Ok(Self {
            document,
            history: UndoStack::with_max_levels(options.max_undo_levels),
            ids,
            clock,
            storage,
            options,
            versions,
            dirty: false,
            last_saved_at,
        })
    }

    /// Resume the stored draft, or start from the default issue
    pub fn resume(
        storage: Box<dyn Storage>,
        mut ids: Box<dyn IdSource>,
        clock: Box<dyn Clock>,
        options: SessionOptions,
    ) -> Result<Self, EditorError> {
        let document = match storage.load()? {
            Some(draft) => draft,
            None => {
                debug!("No stored draft, starting from the default issue");
                Newsletter::with_defaults(ids.as_mut(), clock.now())
            }
        };
        Self::with_collaborators(document, storage, ids, clock, options)
    }

    pub fn document(&self) -> &Newsletter {
        &self.document
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn history(&self) -> &UndoStack {
        &self.history
    }

    /// Apply a mutation and make the result the current snapshot
    pub fn apply(&mut self, mutation: &Mutation) {
        let mut cx = MutationContext::new(self.ids.as_mut(), self.clock.as_ref());
        let next = mutation.apply(&self.document, &mut cx);

        self.history.record(&self.document, Some(mutation.describe()));
        self.document = next;
        self.dirty = true;
    }

    /// Apply several mutations as a single undo step
    pub fn apply_batch(&mut self, description: &str, mutations: &[Mutation]) {
        self.history.begin_batch(&self.document, Some(description));
        for mutation in mutations {
            self.apply(mutation);
        }
        self.history.end_batch();
    }

    pub fn undo(&mut self) -> bool {
        match self.history.undo(&self.document) {
            Some(previous) => {
                self.document = previous;
                self.dirty = true;
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo(&self.document) {
            Some(next) => {
                self.document = next;
                self.dirty = true;
                true
            }
            None => false,
        }
    }

    /// Save the draft now
    pub fn save_now(&mut self) -> Result<(), EditorError> {
        self.storage.save(&self.document)?;
        self.dirty = false;
        self.last_saved_at = self.clock.now();
        Ok(())
    }

    /// Timer tick. Saves when there are unsaved edits and the interval has
    /// elapsed. Failures are logged and never reach the caller.
    pub fn maybe_autosave(&mut self) -> bool {
        if !self.dirty {
            return false;
        }

        let now = self.clock.now();
        if now - self.last_saved_at < self.options.autosave_interval {
            return false;
        }

        match self.save_now() {
            Ok(()) => {
                info!(blocks = self.document.block_order.len(), "Autosaved draft");
                true
            }
            Err(e) => {
                warn!(error = %e, "Autosave failed");
                false
            }
        }
    }

    /// Store the current snapshot as a named version
    pub fn save_version(&mut self, label: &str) -> Result<&SavedVersion, EditorError> {
        let version = SavedVersion {
            id: self.ids.next_id(),
            label: label.to_string(),
            created_at: self.clock.now(),
            newsletter: self.document.clone(),
        };

        self.versions.insert(0, version);
        self.versions.truncate(self.options.max_versions);
        self.storage.save_versions(&self.versions)?;

        info!(label, count = self.versions.len(), "Saved version");
        Ok(&self.versions[0])
    }

    /// Named versions, newest first
    pub fn versions(&self) -> &[SavedVersion] {
        &self.versions
    }

    /// Replace the current snapshot with a saved version (undoable)
    pub fn restore_version(&mut self, id: &str) -> Result<(), EditorError> {
        let version = self
            .versions
            .iter()
            .find(|v| v.id == id)
            .ok_or_else(|| EditorError::VersionNotFound(id.to_string()))?;

        let load = Mutation::Load {
            document: Box::new(version.newsletter.clone()),
        };
        self.apply(&load);
        Ok(())
    }
}
