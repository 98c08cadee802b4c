#![forbid(unsafe_code)]

//! Undo and redo stacks of step batches.
//!
//! # Invariants
//!
//! 1. Both stacks are LIFO: the most recently pushed batch is popped first.
//! 2. `undo.len() <= max_depth` after every push.
//! 3. Batches move between stacks whole; steps are never split.
//!
//! ```text
//! record(b3)
//! ┌───────────────────────────────────────────┐
//! │ Undo: [b1, b2, b3]      Redo: []          │
//! └───────────────────────────────────────────┘
//! pop_undo() -> b3, push_redo(b3)
//! ┌───────────────────────────────────────────┐
//! │ Undo: [b1, b2]          Redo: [b3]        │
//! └───────────────────────────────────────────┘
//! erase_redo() + record(b4)   <-- linear history
//! ┌───────────────────────────────────────────┐
//! │ Undo: [b1, b2, b4]      Redo: []          │
//! └───────────────────────────────────────────┘
//! ```

use std::collections::VecDeque;
use std::fmt;

use super::step::StepBatch;

/// The two stacks owned by the coordinator.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct HistoryStacks {
    /// Newest at back.
    undo: VecDeque<StepBatch>,
    /// Newest at back.
    redo: VecDeque<StepBatch>,
    max_depth: Option<usize>,
}

impl fmt::Debug for HistoryStacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryStacks")
            .field("undo_depth", &self.undo.len())
            .field("redo_depth", &self.redo.len())
            .field("max_depth", &self.max_depth)
            .finish()
    }
}

impl HistoryStacks {
    /// Unbounded stacks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stacks whose undo side keeps at most `max_depth` batches.
    /// `usize::MAX` means unbounded.
    #[must_use]
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            max_depth: (max_depth != usize::MAX).then_some(max_depth),
            ..Self::default()
        }
    }

    /// Push a batch onto the undo stack, evicting the oldest batches when the
    /// depth cap is exceeded. Empty batches are ignored.
    pub fn push_undo(&mut self, batch: StepBatch) {
        if batch.is_empty() {
            return;
        }
        self.undo.push_back(batch);
        self.enforce_depth();
    }

    /// Push a batch onto the redo stack. Empty batches are ignored.
    pub fn push_redo(&mut self, batch: StepBatch) {
        if batch.is_empty() {
            return;
        }
        self.redo.push_back(batch);
    }

    pub fn pop_undo(&mut self) -> Option<StepBatch> {
        self.undo.pop_back()
    }

    pub fn pop_redo(&mut self) -> Option<StepBatch> {
        self.redo.pop_back()
    }

    /// Drop every pending redo batch. Returns how many were dropped.
    pub fn erase_redo(&mut self) -> usize {
        let dropped = self.redo.len();
        self.redo.clear();
        dropped
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    #[must_use]
    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }

    /// Batch the next `undo` would pop.
    #[must_use]
    pub fn peek_undo(&self) -> Option<&StepBatch> {
        self.undo.back()
    }

    /// Batch the next `redo` would pop.
    #[must_use]
    pub fn peek_redo(&self) -> Option<&StepBatch> {
        self.redo.back()
    }

    /// Undo batches, oldest first.
    pub fn undo_batches(&self) -> impl Iterator<Item = &StepBatch> {
        self.undo.iter()
    }

    /// Redo batches, oldest first.
    pub fn redo_batches(&self) -> impl Iterator<Item = &StepBatch> {
        self.redo.iter()
    }

    fn enforce_depth(&mut self) {
        let Some(max) = self.max_depth else {
            return;
        };
        while self.undo.len() > max {
            self.undo.pop_front();
        }
    }
}
