//! # Undo/Redo Stack
//!
//! Snapshot history for an editing session.
//!
//! ## Design
//!
//! - Mutations are pure, so the state before each one is kept whole
//! - Undo swaps the current document for the previous snapshot and parks the
//!   current one on the redo side
//! - Recording new history clears the redo stack
//! - Batches collapse several mutations into one undo step
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut stack = UndoStack::new();
//! stack.record(&doc, Some("Add block"));
//! doc = mutation.apply(&doc, &mut cx);
//!
//! if let Some(previous) = stack.undo(&doc) {
//!     doc = previous;
//! }
//! ```

use pulse_schema::Newsletter;

/// A document state with an optional label for the step that left it
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub document: Newsletter,
    pub description: Option<String>,
}

#[derive(Debug)]
struct OpenBatch {
    before: Snapshot,
    steps: usize,
}

/// Undo/redo stack for newsletter editing
#[derive(Debug)]
pub struct UndoStack {
    /// States before each step (most recent last)
    undo_stack: Vec<Snapshot>,

    /// States undone away from (most recent last)
    redo_stack: Vec<Snapshot>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,

    current_batch: Option<OpenBatch>,
}

impl UndoStack {
    /// Create a new undo stack with default max levels (100)
    pub fn new() -> Self {
        Self::with_max_levels(100)
    }

    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
            current_batch: None,
        }
    }

    /// Remember `before` as the state to return to on the next undo.
    ///
    /// Inside a batch only the state at `begin_batch` is kept.
    pub fn record(&mut self, before: &Newsletter, description: Option<&str>) {
        if let Some(batch) = &mut self.current_batch {
            batch.steps += 1;
            return;
        }

        self.push_snapshot(Snapshot {
            document: before.clone(),
            description: description.map(str::to_string),
        });
    }

    /// Start a batch; every step until `end_batch` undoes as one
    pub fn begin_batch(&mut self, current: &Newsletter, description: Option<&str>) {
        self.current_batch = Some(OpenBatch {
            before: Snapshot {
                document: current.clone(),
                description: description.map(str::to_string),
            },
            steps: 0,
        });
    }

    /// Close the open batch. Empty batches leave no history.
    pub fn end_batch(&mut self) {
        if let Some(batch) = self.current_batch.take() {
            if batch.steps > 0 {
                self.push_snapshot(batch.before);
            }
        }
    }

    pub fn in_batch(&self) -> bool {
        self.current_batch.is_some()
    }

    fn push_snapshot(&mut self, snapshot: Snapshot) {
        self.undo_stack.push(snapshot);

        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }

        self.redo_stack.clear();
    }

    /// Step back. Returns the document to restore, `None` when history is empty.
    pub fn undo(&mut self, current: &Newsletter) -> Option<Newsletter> {
        let snapshot = self.undo_stack.pop()?;
        self.redo_stack.push(Snapshot {
            document: current.clone(),
            description: snapshot.description.clone(),
        });
        Some(snapshot.document)
    }

    /// Step forward again after an undo
    pub fn redo(&mut self, current: &Newsletter) -> Option<Newsletter> {
        let snapshot = self.redo_stack.pop()?;
        self.undo_stack.push(Snapshot {
            document: current.clone(),
            description: snapshot.description.clone(),
        });
        Some(snapshot.document)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.current_batch = None;
    }

    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack
            .last()
            .and_then(|snapshot| snapshot.description.as_deref())
    }

    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack
            .last()
            .and_then(|snapshot| snapshot.description.as_deref())
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}
