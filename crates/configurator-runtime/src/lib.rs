#![forbid(unsafe_code)]

//! Configurator Runtime
//!
//! Session-side state of a 3D product configurator front-end: what the
//! customer has selected, and a single undo/redo history covering both
//! navigation and option choices.
//!
//! # Key Components
//!
//! - [`UndoRedoCoordinator`] - Records selection changes as batches and replays them
//! - [`Navigator`] - Menu flows that record and apply one user action at a time
//! - [`SelectionStore`] - Observable group/step/attribute/template-group selection
//! - [`ConfiguratorEngine`] - The engine capability (tree, option history)
//! - [`CoordinatorConfig`] - Platform, enable switch and depth cap
//!
//! # How it fits in the system
//! The engine owns the product and its option undo log. Menus call the
//! [`Navigator`]; the toolbar calls [`UndoRedoCoordinator::undo`] and
//! [`UndoRedoCoordinator::redo`], which route option steps back to the engine
//! and navigation steps into the selection store.

pub mod config;
pub mod engine;
pub mod navigation;
pub mod reactive;
pub mod selection;
pub mod undo;

pub use config::{ConfigError, CoordinatorConfig, NullTargetReplay, Platform};
pub use engine::{ConfiguratorEngine, InMemoryEngine};
pub use navigation::Navigator;
pub use reactive::{Observable, Subscription};
pub use selection::{SelectionState, SelectionStore};
pub use undo::{
    Direction, ReplayOutcome, SelectionChange, StepBatch, StepTarget, TargetKind,
    UndoRedoCoordinator, UndoRedoStep,
};
