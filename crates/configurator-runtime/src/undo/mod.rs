#![forbid(unsafe_code)]

//! Undo/redo history for configurator navigation.
//!
//! The engine already keeps an undo log for option changes, but knows nothing
//! about which group, step or attribute the customer was looking at. This
//! module records both kinds of change in one linear history and replays each
//! against its owner: selection state for navigation, the engine for options.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    UndoRedoCoordinator                        │
//! │  ┌──────────────────┐            ┌──────────────────┐        │
//! │  │   Undo Stack     │   undo()   │   Redo Stack     │        │
//! │  │  [batch, ...]    │ ─────────► │  [batch, ...]    │        │
//! │  │                  │ ◄───────── │                  │        │
//! │  └──────────────────┘   redo()   └──────────────────┘        │
//! │            │ replay Undo/Redo steps of the moved batch        │
//! │            ▼                                                  │
//! │  group/step/attribute ──► SelectionState setters              │
//! │  option               ──► ConfiguratorEngine::undo/redo       │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Module Structure
//!
//! - [`step`]: step, change and batch types
//! - [`history`]: the two LIFO stacks
//! - [`registration`]: registration and replay scopes
//! - [`coordinator`]: recording and replay

pub mod coordinator;
pub mod history;
pub mod registration;
pub mod step;

pub use coordinator::{ReplayOutcome, UndoRedoCoordinator};
pub use history::HistoryStacks;
pub use registration::{RegistrationScope, ReplayScope};
pub use step::{Direction, SelectionChange, StepBatch, StepTarget, TargetKind, UndoRedoStep};
