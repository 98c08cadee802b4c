#![forbid(unsafe_code)]

//! Reactive state shared between menus, the viewer and the history
//! coordinator.

pub mod observable;

pub use observable::{Observable, Subscription};
