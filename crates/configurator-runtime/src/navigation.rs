#![forbid(unsafe_code)]

//! Menu-side selection flows.
//!
//! Each `select_*` call is one user action: it opens a registration scope,
//! records the change (if any) and applies it. Store subscribers reacting to
//! the write may record follow-up changes (e.g. auto-opening the first step
//! of a new group); those join the same batch, so one undo reverts the whole
//! action.

use configurator_core::{AttributeId, GroupId, OptionId, StepId, TemplateGroupId, find_option};
use tracing::debug;

use crate::engine::ConfiguratorEngine;
use crate::selection::SelectionState;
use crate::undo::{SelectionChange, UndoRedoCoordinator};

/// Selection flows bound to one coordinator.
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    history: UndoRedoCoordinator,
}

impl Navigator {
    #[must_use]
    pub fn new(history: UndoRedoCoordinator) -> Self {
        Self { history }
    }

    #[must_use]
    pub fn history(&self) -> &UndoRedoCoordinator {
        &self.history
    }

    /// Open `group`, or close the open group with `None`.
    ///
    /// Only opening a different group is recorded.
    pub fn select_group<S>(&self, selection: &mut S, group: Option<GroupId>)
    where
        S: SelectionState + ?Sized,
    {
        let _scope = self.history.begin_registration();
        let current = selection.selected_group();
        if group.is_some() {
            self.history.record_selection_change(SelectionChange::Group {
                from: current,
                to: group,
            });
        }
        selection.set_selected_group(group);
    }

    /// Open `step` inside the current group (`None` leaves the step view).
    pub fn select_step<S>(&self, selection: &mut S, step: Option<StepId>)
    where
        S: SelectionState + ?Sized,
    {
        let _scope = self.history.begin_registration();
        self.history.record_selection_change(SelectionChange::Step {
            from: selection.selected_step(),
            to: step,
        });
        selection.set_selected_step(step);
        if let Some(group) = selection.selected_group() {
            selection.remember_step(group, step);
        }
    }

    /// Open `attribute`.
    pub fn select_attribute<S>(&self, selection: &mut S, attribute: AttributeId)
    where
        S: SelectionState + ?Sized,
    {
        let _scope = self.history.begin_registration();
        self.history.record_selection_change(SelectionChange::Attribute {
            from: selection.selected_attribute(),
            to: Some(attribute),
        });
        selection.set_selected_attribute(Some(attribute));
    }

    /// Open a template group. Not part of the history.
    pub fn select_template_group<S>(&self, selection: &mut S, template_group: Option<TemplateGroupId>)
    where
        S: SelectionState + ?Sized,
    {
        selection.set_selected_template_group(template_group);
    }

    /// Apply `option` through the engine and record it against the option
    /// its attribute had before.
    ///
    /// Returns `false` if the option is not part of the current product.
    pub fn select_option<E>(&self, engine: &mut E, option: OptionId) -> bool
    where
        E: ConfiguratorEngine + ?Sized,
    {
        let Some(previous) = find_option(engine.groups(), option)
            .map(|(attribute, _)| attribute.selected_option().map(|o| o.id))
        else {
            debug!(%option, "option not in product");
            return false;
        };

        let _scope = self.history.begin_registration();
        self.history.erase_redo_stack();
        self.history.record_selection_change(SelectionChange::Option {
            from: previous,
            to: Some(option),
        });
        engine.select_option(option);
        true
    }

    /// Close the menu drawer: clear group, attribute and template group.
    /// Not part of the history.
    pub fn close_menu<S>(&self, selection: &mut S)
    where
        S: SelectionState + ?Sized,
    {
        selection.set_selected_group(None);
        selection.set_selected_attribute(None);
        selection.set_selected_template_group(None);
    }
}
