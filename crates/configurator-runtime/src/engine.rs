#![forbid(unsafe_code)]

//! Capability interface of the external configurator engine.
//!
//! The engine owns the product tree, the 3D scene and its own fine-grained
//! history of option changes. The history coordinator never touches that
//! history directly: it only asks the engine to step it back or forward.
//!
//! [`InMemoryEngine`] is a self-contained implementation that keeps the option
//! history itself. It backs tests and headless sessions.

use configurator_core::{AttributeId, Group, OptionId, ProductTree};
use tracing::debug;

/// Operations the coordinator consumes from the configurator engine.
pub trait ConfiguratorEngine {
    /// Revert one entry of the engine's option-change history.
    fn undo(&mut self);

    /// Re-apply one previously reverted option change.
    fn redo(&mut self);

    /// Apply an option, recording it in the engine's own history.
    fn select_option(&mut self, option: OptionId);

    /// Current groups of the loaded product.
    fn groups(&self) -> &[Group];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OptionChange {
    attribute: AttributeId,
    from: Option<OptionId>,
    to: OptionId,
}

/// Engine that applies option changes to an owned [`ProductTree`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryEngine {
    product: ProductTree,
    undo_log: Vec<OptionChange>,
    redo_log: Vec<OptionChange>,
    undo_calls: usize,
    redo_calls: usize,
}

impl InMemoryEngine {
    #[must_use]
    pub fn new(product: ProductTree) -> Self {
        Self {
            product,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn product(&self) -> &ProductTree {
        &self.product
    }

    /// Replace the product tree, as a template switch does. Option history is
    /// discarded because it refers to the old tree.
    pub fn replace_product(&mut self, product: ProductTree) {
        self.product = product;
        self.undo_log.clear();
        self.redo_log.clear();
    }

    /// Currently applied option of `attribute`.
    #[must_use]
    pub fn selected_option(&self, attribute: AttributeId) -> Option<OptionId> {
        self.product
            .attribute(attribute)
            .and_then(|a| a.selected_option())
            .map(|o| o.id)
    }

    /// Number of `undo` calls received so far.
    #[must_use]
    pub fn undo_calls(&self) -> usize {
        self.undo_calls
    }

    /// Number of `redo` calls received so far.
    #[must_use]
    pub fn redo_calls(&self) -> usize {
        self.redo_calls
    }

    #[must_use]
    pub fn option_history_len(&self) -> usize {
        self.undo_log.len()
    }

    fn apply(&mut self, attribute: AttributeId, option: Option<OptionId>) {
        for attr in self
            .product
            .groups
            .iter_mut()
            .flat_map(|g| {
                g.attributes
                    .iter_mut()
                    .chain(g.steps.iter_mut().flat_map(|s| s.attributes.iter_mut()))
            })
            .filter(|a| a.id == attribute)
        {
            for opt in &mut attr.options {
                opt.selected = Some(opt.id) == option;
            }
        }
    }
}

impl ConfiguratorEngine for InMemoryEngine {
    fn undo(&mut self) {
        self.undo_calls += 1;
        let Some(change) = self.undo_log.pop() else {
            debug!("engine undo with empty option history");
            return;
        };
        self.apply(change.attribute, change.from);
        self.redo_log.push(change);
    }

    fn redo(&mut self) {
        self.redo_calls += 1;
        let Some(change) = self.redo_log.pop() else {
            debug!("engine redo with empty option history");
            return;
        };
        self.apply(change.attribute, Some(change.to));
        self.undo_log.push(change);
    }

    fn select_option(&mut self, option: OptionId) {
        let Some((attribute, from)) = self
            .product
            .option(option)
            .map(|(a, _)| (a.id, a.selected_option().map(|o| o.id)))
        else {
            debug!(%option, "engine ignored unknown option");
            return;
        };
        if from == Some(option) {
            return;
        }
        self.apply(attribute, Some(option));
        self.redo_log.clear();
        self.undo_log.push(OptionChange {
            attribute,
            from,
            to: option,
        });
    }

    fn groups(&self) -> &[Group] {
        &self.product.groups
    }
}
