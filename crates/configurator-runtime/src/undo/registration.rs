#![forbid(unsafe_code)]

//! Registration and replay scopes.
//!
//! Two flags guard the history:
//!
//! - **Registration**: while a [`RegistrationScope`] is alive, recorded
//!   changes collect into one pending batch. When the outermost scope drops,
//!   that batch is pushed onto the undo stack. Nested scopes only bump a depth
//!   counter, so re-entrant recording collapses into the outer action.
//! - **Replay**: while a [`ReplayScope`] is alive, recording is suppressed, so
//!   selection writes performed by undo/redo are never captured as new user
//!   actions.
//!
//! Both scopes release in `Drop`, which runs on early return and while
//! unwinding.
//!
//! ```ignore
//! {
//!     let _scope = coordinator.begin_registration();
//!     coordinator.record_selection_change(group_change);  // pending
//!     coordinator.record_selection_change(step_change);   // same batch
//! }   // one batch with four steps lands on the undo stack here
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::debug;

use super::history::HistoryStacks;
use super::step::StepBatch;

/// State shared by a coordinator and every scope it hands out.
#[derive(Debug, Default)]
pub(crate) struct HistoryState {
    pub(crate) stacks: HistoryStacks,
    /// Batch being assembled by the open registration, if any.
    pub(crate) pending: Option<StepBatch>,
    registration_depth: u32,
    replay_depth: u32,
}

impl HistoryState {
    pub(crate) fn new(stacks: HistoryStacks) -> Self {
        Self {
            stacks,
            ..Self::default()
        }
    }

    pub(crate) fn is_registering(&self) -> bool {
        self.registration_depth > 0
    }

    pub(crate) fn is_replaying(&self) -> bool {
        self.replay_depth > 0
    }

    pub(crate) fn pending_len(&self) -> usize {
        self.pending.as_ref().map_or(0, StepBatch::len)
    }
}

pub(crate) type SharedHistory = Rc<RefCell<HistoryState>>;

/// RAII guard for one user action.
///
/// Obtained from
/// [`UndoRedoCoordinator::begin_registration`](super::UndoRedoCoordinator::begin_registration).
#[must_use = "dropping the scope immediately commits an empty registration"]
pub struct RegistrationScope {
    history: SharedHistory,
    /// Whether this scope is the outermost (responsible for commit).
    is_root: bool,
}

impl RegistrationScope {
    pub(crate) fn new(history: &SharedHistory) -> Self {
        let is_root = {
            let mut state = history.borrow_mut();
            state.registration_depth += 1;
            if state.registration_depth == 1 {
                state.pending = Some(StepBatch::new());
                true
            } else {
                false
            }
        };
        Self {
            history: Rc::clone(history),
            is_root,
        }
    }

    /// Whether this scope started the registration (as opposed to joining an
    /// outer one).
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.is_root
    }

    /// Number of steps collected so far in the current registration.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.history.borrow().pending_len()
    }
}

impl Drop for RegistrationScope {
    fn drop(&mut self) {
        let mut state = self.history.borrow_mut();
        state.registration_depth = state.registration_depth.saturating_sub(1);
        if state.registration_depth > 0 {
            return;
        }
        if let Some(batch) = state.pending.take()
            && !batch.is_empty()
        {
            debug!(steps = batch.len(), "registration committed");
            state.stacks.push_undo(batch);
        }
    }
}

impl fmt::Debug for RegistrationScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationScope")
            .field("is_root", &self.is_root)
            .field("pending", &self.pending_len())
            .finish()
    }
}

/// RAII guard marking replay in progress.
pub struct ReplayScope {
    history: SharedHistory,
}

impl ReplayScope {
    pub(crate) fn new(history: &SharedHistory) -> Self {
        history.borrow_mut().replay_depth += 1;
        Self {
            history: Rc::clone(history),
        }
    }
}

impl Drop for ReplayScope {
    fn drop(&mut self) {
        let mut state = self.history.borrow_mut();
        state.replay_depth = state.replay_depth.saturating_sub(1);
    }
}

impl fmt::Debug for ReplayScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReplayScope").finish_non_exhaustive()
    }
}
