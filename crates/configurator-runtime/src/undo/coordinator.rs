#![forbid(unsafe_code)]

//! Undo/redo coordination between navigation and the engine.
//!
//! [`UndoRedoCoordinator`] records user navigation (group, step, attribute and
//! option selection) as [`StepBatch`]es and replays them on request:
//!
//! - group, step and attribute steps are re-resolved against the engine's
//!   current product tree and written into the [`SelectionState`];
//! - option steps call the engine's own `undo`/`redo`, which owns the real
//!   option history.
//!
//! # Invariants
//!
//! 1. Recording a change erases the redo stack (linear history).
//! 2. `undo()` moves one whole batch from the undo stack to the redo stack and
//!    replays its `Undo` steps in insertion order; `redo()` is symmetric.
//! 3. Nothing is recorded while a replay is in progress.
//! 4. Popping an empty stack changes nothing and writes nothing.
//!
//! # Failure Modes
//!
//! - **Stale id**: the recorded id no longer exists after a structural change
//!   of the tree. The selection for that level is cleared instead.
//! - **Setter panics**: scopes are RAII, so the replay flag is released while
//!   unwinding and the batch has already moved to the opposite stack.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use configurator_core::{find_attribute, find_group, find_step};
use tracing::{debug, debug_span, info, trace};
use web_time::Instant;

use super::history::HistoryStacks;
use super::registration::{HistoryState, RegistrationScope, ReplayScope, SharedHistory};
use super::step::{Direction, SelectionChange, StepBatch, StepTarget, UndoRedoStep};
use crate::config::CoordinatorConfig;
use crate::engine::ConfiguratorEngine;
use crate::selection::SelectionState;

/// What a single `undo()`/`redo()` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayOutcome {
    pub direction: Direction,
    /// Group/step/attribute setter calls.
    pub selection_writes: usize,
    /// Engine `undo`/`redo` calls.
    pub engine_calls: usize,
    /// Null-target steps skipped on this platform.
    pub skipped: usize,
    /// Recorded ids that no longer exist and were written as `None`.
    pub unresolved: usize,
}

impl ReplayOutcome {
    #[must_use]
    pub const fn new(direction: Direction) -> Self {
        Self {
            direction,
            selection_writes: 0,
            engine_calls: 0,
            skipped: 0,
            unresolved: 0,
        }
    }
}

/// Session-wide undo/redo coordinator.
///
/// Cloning yields another handle to the same stacks and guards, so menus,
/// the viewer toolbar and store subscribers can all hold one.
#[derive(Clone)]
pub struct UndoRedoCoordinator {
    history: SharedHistory,
    config: Rc<CoordinatorConfig>,
}

impl fmt::Debug for UndoRedoCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.history.borrow();
        f.debug_struct("UndoRedoCoordinator")
            .field("undo_depth", &state.stacks.undo_depth())
            .field("redo_depth", &state.stacks.redo_depth())
            .field("registering", &state.is_registering())
            .field("replaying", &state.is_replaying())
            .field("config", &self.config)
            .finish()
    }
}

impl Default for UndoRedoCoordinator {
    fn default() -> Self {
        Self::new(CoordinatorConfig::default())
    }
}

impl UndoRedoCoordinator {
    #[must_use]
    pub fn new(config: CoordinatorConfig) -> Self {
        let stacks = HistoryStacks::with_max_depth(config.max_depth);
        Self {
            history: Rc::new(RefCell::new(HistoryState::new(stacks))),
            config: Rc::new(config),
        }
    }

    #[must_use]
    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    // ========================================================================
    // Recording
    // ========================================================================

    /// Start a user action. Changes recorded until the outermost scope drops
    /// form one batch.
    pub fn begin_registration(&self) -> RegistrationScope {
        RegistrationScope::new(&self.history)
    }

    /// Record a user-originated selection change.
    ///
    /// Erases the redo stack, then adds the change's undo/redo pair either to
    /// the open registration or, outside one, as a batch of its own. Returns
    /// `false` without touching the stacks when the change is a no-op, when a
    /// replay is in progress, or when undo/redo is disabled.
    pub fn record_selection_change(&self, change: SelectionChange) -> bool {
        if !self.config.enabled {
            return false;
        }
        let mut state = self.history.borrow_mut();
        if state.is_replaying() {
            trace!(kind = %change.kind(), "recording suppressed during replay");
            return false;
        }
        if change.is_noop() {
            return false;
        }

        let erased = state.stacks.erase_redo();
        match state.pending.as_mut() {
            Some(batch) => batch.push_change(change),
            None => state.stacks.push_undo(StepBatch::from_change(change)),
        }
        debug!(
            kind = %change.kind(),
            previous = ?change.previous(),
            next = ?change.next(),
            erased_redo = erased,
            undo_depth = state.stacks.undo_depth(),
            "selection change recorded"
        );
        true
    }

    /// Drop every pending redo batch. Returns how many were dropped.
    pub fn erase_redo_stack(&self) -> usize {
        let erased = self.history.borrow_mut().stacks.erase_redo();
        if erased > 0 {
            debug!(erased, "redo stack erased");
        }
        erased
    }

    // ========================================================================
    // Replay
    // ========================================================================

    /// Run `f` with the replay guard engaged. The guard is released on every
    /// exit path, including unwinding.
    pub fn with_replay_guard<R>(&self, f: impl FnOnce() -> R) -> R {
        let _scope = ReplayScope::new(&self.history);
        f()
    }

    /// Revert the most recent batch.
    ///
    /// Returns `None` when there is nothing to undo (or undo/redo is
    /// disabled); neither stack nor selection is touched then.
    pub fn undo<E, S>(&self, engine: &mut E, selection: &mut S) -> Option<ReplayOutcome>
    where
        E: ConfiguratorEngine + ?Sized,
        S: SelectionState + ?Sized,
    {
        self.step(Direction::Undo, engine, selection)
    }

    /// Re-apply the most recently undone batch.
    pub fn redo<E, S>(&self, engine: &mut E, selection: &mut S) -> Option<ReplayOutcome>
    where
        E: ConfiguratorEngine + ?Sized,
        S: SelectionState + ?Sized,
    {
        self.step(Direction::Redo, engine, selection)
    }

    fn step<E, S>(&self, direction: Direction, engine: &mut E, selection: &mut S) -> Option<ReplayOutcome>
    where
        E: ConfiguratorEngine + ?Sized,
        S: SelectionState + ?Sized,
    {
        if !self.config.enabled {
            return None;
        }
        // Move the batch before replaying; the borrow must not outlive this
        // block because setters may re-enter the coordinator.
        let batch = {
            let mut state = self.history.borrow_mut();
            let batch = match direction {
                Direction::Undo => state.stacks.pop_undo(),
                Direction::Redo => state.stacks.pop_redo(),
            }?;
            match direction {
                Direction::Undo => state.stacks.push_redo(batch.clone()),
                Direction::Redo => state.stacks.push_undo(batch.clone()),
            }
            batch
        };

        let start = Instant::now();
        let _span = debug_span!(
            "undo.replay",
            direction = direction.as_str(),
            steps = batch.len() as u64,
            duration_us = tracing::field::Empty
        )
        .entered();

        let outcome = self.with_replay_guard(|| {
            let mut outcome = ReplayOutcome::new(direction);
            for step in batch.steps_for(direction) {
                self.replay_step(step, engine, selection, &mut outcome);
            }
            outcome
        });

        let duration_us = start.elapsed().as_micros() as u64;
        tracing::Span::current().record("duration_us", duration_us);
        debug!(
            selection_writes = outcome.selection_writes,
            engine_calls = outcome.engine_calls,
            skipped = outcome.skipped,
            unresolved = outcome.unresolved,
            "batch replayed"
        );
        Some(outcome)
    }

    fn replay_step<E, S>(
        &self,
        step: &UndoRedoStep,
        engine: &mut E,
        selection: &mut S,
        outcome: &mut ReplayOutcome,
    ) where
        E: ConfiguratorEngine + ?Sized,
        S: SelectionState + ?Sized,
    {
        match step.target {
            StepTarget::Option(_) => {
                match step.direction {
                    Direction::Undo => engine.undo(),
                    Direction::Redo => engine.redo(),
                }
                outcome.engine_calls += 1;
            }
            target if target.is_null() && !self.config.replays_null_targets() => {
                trace!(%step, platform = ?self.config.platform, "null target skipped");
                outcome.skipped += 1;
            }
            StepTarget::Group(id) => {
                let resolved = id.and_then(|id| find_group(engine.groups(), id)).map(|g| g.id);
                if id.is_some() && resolved.is_none() {
                    outcome.unresolved += 1;
                }
                selection.set_selected_group(resolved);
                outcome.selection_writes += 1;
            }
            StepTarget::Step(id) => {
                let resolved = id.and_then(|id| find_step(engine.groups(), id)).map(|s| s.id);
                if id.is_some() && resolved.is_none() {
                    outcome.unresolved += 1;
                }
                selection.set_selected_step(resolved);
                outcome.selection_writes += 1;
            }
            StepTarget::Attribute(id) => {
                let resolved = id
                    .and_then(|id| find_attribute(engine.groups(), id))
                    .map(|a| a.id);
                if id.is_some() && resolved.is_none() {
                    outcome.unresolved += 1;
                }
                selection.set_selected_attribute(resolved);
                outcome.selection_writes += 1;
            }
        }
    }

    // ========================================================================
    // Info
    // ========================================================================

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.borrow().stacks.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.borrow().stacks.can_redo()
    }

    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.history.borrow().stacks.undo_depth()
    }

    #[must_use]
    pub fn redo_depth(&self) -> usize {
        self.history.borrow().stacks.redo_depth()
    }

    /// Batch the next `undo()` would replay.
    #[must_use]
    pub fn peek_undo(&self) -> Option<StepBatch> {
        self.history.borrow().stacks.peek_undo().cloned()
    }

    /// Batch the next `redo()` would replay.
    #[must_use]
    pub fn peek_redo(&self) -> Option<StepBatch> {
        self.history.borrow().stacks.peek_redo().cloned()
    }

    /// Copy of both stacks.
    #[must_use]
    pub fn stacks(&self) -> HistoryStacks {
        self.history.borrow().stacks.clone()
    }

    /// Whether a user action is being registered.
    #[must_use]
    pub fn is_registering(&self) -> bool {
        self.history.borrow().is_registering()
    }

    /// Whether undo/redo replay is in progress.
    #[must_use]
    pub fn is_replaying(&self) -> bool {
        self.history.borrow().is_replaying()
    }

    // ========================================================================
    // Maintenance
    // ========================================================================

    /// Drop both stacks and any batch still being registered, e.g. after the
    /// engine loaded another product.
    pub fn clear(&self) {
        let mut state = self.history.borrow_mut();
        let (undo, redo) = (state.stacks.undo_depth(), state.stacks.redo_depth());
        state.stacks.clear();
        if let Some(pending) = state.pending.as_mut() {
            *pending = StepBatch::new();
        }
        info!(undo, redo, "history cleared");
    }
}
