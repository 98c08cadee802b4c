#![forbid(unsafe_code)]

//! Current navigation selection.
//!
//! [`SelectionState`] is the capability the history coordinator writes
//! through when it replays group, step and attribute steps. [`SelectionStore`]
//! is the observable implementation used by menus: each selected id is an
//! [`Observable`] so views re-render when it changes.

use std::collections::BTreeMap;

use configurator_core::{AttributeId, GroupId, StepId, TemplateGroupId};

use crate::reactive::{Observable, Subscription};

/// Read/write access to the currently selected navigation ids.
///
/// `None` means nothing is selected at that level.
pub trait SelectionState {
    fn selected_group(&self) -> Option<GroupId>;
    fn selected_step(&self) -> Option<StepId>;
    fn selected_attribute(&self) -> Option<AttributeId>;
    fn selected_template_group(&self) -> Option<TemplateGroupId>;

    fn set_selected_group(&mut self, id: Option<GroupId>);
    fn set_selected_step(&mut self, id: Option<StepId>);
    fn set_selected_attribute(&mut self, id: Option<AttributeId>);
    fn set_selected_template_group(&mut self, id: Option<TemplateGroupId>);

    /// Remember `step` as the last step visited inside `group`.
    fn remember_step(&mut self, _group: GroupId, _step: Option<StepId>) {}
}

/// Observable selection store.
///
/// Cloning yields another handle to the same state.
#[derive(Clone, Debug)]
pub struct SelectionStore {
    group: Observable<Option<GroupId>>,
    step: Observable<Option<StepId>>,
    attribute: Observable<Option<AttributeId>>,
    template_group: Observable<Option<TemplateGroupId>>,
    last_steps: Observable<BTreeMap<GroupId, StepId>>,
}

impl Default for SelectionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            group: Observable::new(None),
            step: Observable::new(None),
            attribute: Observable::new(None),
            template_group: Observable::new(None),
            last_steps: Observable::new(BTreeMap::new()),
        }
    }

    pub fn on_group_change(&self, f: impl Fn(&Option<GroupId>) + 'static) -> Subscription {
        self.group.subscribe(f)
    }

    pub fn on_step_change(&self, f: impl Fn(&Option<StepId>) + 'static) -> Subscription {
        self.step.subscribe(f)
    }

    pub fn on_attribute_change(
        &self,
        f: impl Fn(&Option<AttributeId>) + 'static,
    ) -> Subscription {
        self.attribute.subscribe(f)
    }

    pub fn on_template_group_change(
        &self,
        f: impl Fn(&Option<TemplateGroupId>) + 'static,
    ) -> Subscription {
        self.template_group.subscribe(f)
    }

    #[must_use]
    pub fn last_selected_step(&self, group: GroupId) -> Option<StepId> {
        self.last_steps.with(|steps| steps.get(&group).copied())
    }

    /// Total number of value changes across all selected ids.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.group.version()
            + self.step.version()
            + self.attribute.version()
            + self.template_group.version()
    }
}

impl SelectionState for SelectionStore {
    fn selected_group(&self) -> Option<GroupId> {
        self.group.get()
    }

    fn selected_step(&self) -> Option<StepId> {
        self.step.get()
    }

    fn selected_attribute(&self) -> Option<AttributeId> {
        self.attribute.get()
    }

    fn selected_template_group(&self) -> Option<TemplateGroupId> {
        self.template_group.get()
    }

    fn set_selected_group(&mut self, id: Option<GroupId>) {
        self.group.set(id);
    }

    fn set_selected_step(&mut self, id: Option<StepId>) {
        self.step.set(id);
    }

    fn set_selected_attribute(&mut self, id: Option<AttributeId>) {
        self.attribute.set(id);
    }

    fn set_selected_template_group(&mut self, id: Option<TemplateGroupId>) {
        self.template_group.set(id);
    }

    fn remember_step(&mut self, group: GroupId, step: Option<StepId>) {
        self.last_steps.update(|steps| match step {
            Some(step) => {
                steps.insert(group, step);
            }
            None => {
                steps.remove(&group);
            }
        });
    }
}
