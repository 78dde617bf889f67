//! # Pulse Editor
//!
//! Document editing engine for Pulse newsletters.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ schema: block registry + Newsletter model   │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: snapshot lifecycle + mutations      │
//! │  - Pure reducers (old snapshot → new)       │
//! │  - Undo/redo as snapshot history            │
//! │  - Autosave and named versions              │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ render / export: read-only consumers        │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Snapshots are values**: a mutation never changes the document it reads
//! 2. **Single writer**: only the session replaces the current snapshot
//! 3. **Stale references degrade**: missing ids and bad indices are no-ops
//! 4. **Injected collaborators**: ids, time and storage come in through traits
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pulse_editor::{EditSession, FileStorage, Mutation};
//!
//! let storage = FileStorage::new("draft.json", "versions.json");
//! let mut session = EditSession::new(doc, Box::new(storage))?;
//!
//! session.apply(&Mutation::MoveBlock { from: 2, to: 0 });
//! session.undo();
//! session.maybe_autosave();
//! ```

mod clock;
mod errors;
mod mutations;
pub mod patch;
mod session;
mod storage;
mod undo_stack;

pub use clock::{Clock, FixedClock, SystemClock};
pub use errors::EditorError;
pub use mutations::{Mutation, MutationContext};
pub use patch::{merge, Patch};
pub use session::{EditSession, SessionOptions};
pub use storage::{FileStorage, MemoryStorage, SavedVersion, Storage};
pub use undo_stack::{Snapshot, UndoStack};

#[doc(hidden)]
pub use serde_json;
