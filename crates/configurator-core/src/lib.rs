#![forbid(unsafe_code)]

//! Core: typed ids and the product tree of a 3D product configurator.
//!
//! # Role in the workspace
//! `configurator-core` is the data layer. The configurator engine owns the
//! product and publishes it as a tree of groups, steps, attributes and
//! options; this crate models that tree and the id lookups the runtime needs
//! when it replays navigation history.
//!
//! # How it fits in the system
//! `configurator-runtime` reads a [`ProductTree`] through its engine trait and
//! re-resolves recorded ids against it with [`find_group`], [`find_step`] and
//! [`find_attribute`] before writing them back into the selection store.

pub mod catalog;
pub mod ids;

#[cfg(feature = "test-helpers")]
pub mod fixtures;

pub use catalog::{
    Attribute, ConfigOption, Group, ProductTree, Step, TemplateGroup, find_attribute, find_group,
    find_option, find_step,
};
pub use ids::{AttributeId, GroupId, OptionId, StepId, TemplateGroupId};
