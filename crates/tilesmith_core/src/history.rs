//! Undo history as full-world snapshots.

use crate::world::TileWorld;

/// Default depth cap for a [`HistoryStack`].
pub const DEFAULT_HISTORY_LIMIT: usize = 256;

/// A LIFO of world snapshots with top-equality dedup and an optional depth
/// cap (oldest entries are discarded past the cap).
#[derive(Debug, Clone, Default)]
pub struct HistoryStack {
    entries: Vec<TileWorld>,
    limit: Option<usize>,
}

impl HistoryStack {
    /// An unbounded stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// A stack that keeps at most `limit` snapshots.
    pub fn with_limit(limit: usize) -> Self {
        HistoryStack {
            entries: Vec::new(),
            limit: Some(limit),
        }
    }

    /// Pushes a snapshot of `world` unless it equals the current top, so
    /// checkpoints around no-op edits collapse into one entry.
    pub fn checkpoint(&mut self, world: &TileWorld) {
        if self.entries.last().is_some_and(|top| top == world) {
            return;
        }
        self.push(world.clone());
    }

    /// Pushes unconditionally, still honoring the depth cap.
    pub fn push(&mut self, world: TileWorld) {
        self.entries.push(world);
        if let Some(limit) = self.limit {
            if self.entries.len() > limit {
                let excess = self.entries.len() - limit;
                self.entries.drain(..excess);
            }
        }
    }

    pub fn pop(&mut self) -> Option<TileWorld> {
        self.entries.pop()
    }

    pub fn peek(&self) -> Option<&TileWorld> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// The undo/redo pair an editing session owns.
///
/// Snapshots move between the two stacks through the caller's current world:
/// [`undo`](Self::undo) trades the top undo snapshot for the current world
/// (which lands on the redo stack), and [`redo`](Self::redo) trades the
/// other way. There is nothing to roll back when a stack is empty; callers
/// treat `None` as a silent no-op.
#[derive(Debug, Clone, Default)]
pub struct EditHistory {
    undo: HistoryStack,
    redo: HistoryStack,
}

impl EditHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Caps both stacks at `limit` snapshots.
    pub fn with_limit(limit: usize) -> Self {
        EditHistory {
            undo: HistoryStack::with_limit(limit),
            redo: HistoryStack::with_limit(limit),
        }
    }

    /// Records `world` on the undo stack (deduplicated; redo is untouched).
    pub fn checkpoint(&mut self, world: &TileWorld) {
        self.undo.checkpoint(world);
    }

    /// Pops the last checkpoint, parking `current` on the redo stack.
    ///
    /// Returns the world to adopt, or `None` when there is nothing to undo.
    pub fn undo(&mut self, current: &TileWorld) -> Option<TileWorld> {
        let restored = self.undo.pop()?;
        self.redo.push(current.clone());
        Some(restored)
    }

    /// Inverse of [`undo`](Self::undo).
    pub fn redo(&mut self, current: &TileWorld) -> Option<TileWorld> {
        let restored = self.redo.pop()?;
        self.undo.push(current.clone());
        Some(restored)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }

    /// Forgets both stacks (after loading a different world, for example).
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}
